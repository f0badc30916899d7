#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Listing browser CLI.
//!
//! Without a subcommand this drops into the interactive browser. With one
//! it runs a single operation and exits, which keeps the catalog easy to
//! script against:
//!
//! ```text
//! estate_map_app list --type APARTMENT --max-price 20000000 --sort PRICE_LOW_TO_HIGH
//! estate_map_app show 4
//! estate_map_app favorite 4
//! estate_map_app compare 1 3 4
//! estate_map_app map --near 55.7539,37.6208 --limit 3
//! estate_map_app calc --price 10000000 --down 2000000 --rate 12 --years 20
//! ```
//!
//! Favorites, the compare set and the viewing history persist across runs
//! in a JSON state file, so one-shot commands and interactive sessions see
//! the same shortlists.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use estate_map_app::{
    App, interactive, parse_bounds, parse_lat_lng, parse_property_type, parse_sort_option,
    parse_status, render,
};
use estate_map_listing_models::ListingId;
use estate_map_mortgage::{LoanRequest, amortize};
use estate_map_search::FilterCriteria;
use estate_map_shortlist::{ShortlistError, ToggleOutcome};

#[derive(Parser)]
#[command(name = "estate_map_app", about = "Browse the property listing catalog")]
struct Cli {
    /// Shortlist state file (defaults to data/shortlists.json)
    #[arg(long)]
    state_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List listings matching the given filters
    List {
        /// Case-insensitive text filter over title, address and city
        #[arg(long)]
        search: Option<String>,
        /// Property type (APARTMENT, HOUSE, STUDIO, PENTHOUSE, VILLA, LAND)
        #[arg(long = "type")]
        property_type: Option<String>,
        /// Listing status (FOR_SALE, FOR_RENT)
        #[arg(long)]
        status: Option<String>,
        /// Lower price bound in rubles
        #[arg(long)]
        min_price: Option<f64>,
        /// Upper price bound in rubles
        #[arg(long)]
        max_price: Option<f64>,
        /// Lower area bound in square meters
        #[arg(long)]
        min_area: Option<f64>,
        /// Upper area bound in square meters
        #[arg(long)]
        max_area: Option<f64>,
        /// Exact number of rooms
        #[arg(long)]
        rooms: Option<u32>,
        /// Exact city match
        #[arg(long)]
        city: Option<String>,
        /// Sort order (NEWEST, PRICE_LOW_TO_HIGH, PRICE_HIGH_TO_LOW,
        /// AREA_LOW_TO_HIGH, AREA_HIGH_TO_LOW)
        #[arg(long, default_value = "NEWEST")]
        sort: String,
        /// Maximum number of rows to print
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Show one listing in full and record the view
    Show { id: ListingId },
    /// Toggle a listing in the favorites set
    Favorite { id: ListingId },
    /// List the favorites in catalog order
    Favorites,
    /// Toggle listings in the compare set, then show the comparison
    Compare { ids: Vec<ListingId> },
    /// Show recently viewed listings, most recent first
    History,
    /// Search listings by map viewport or proximity
    Map {
        /// Viewport as west,south,east,north
        #[arg(long)]
        bounds: Option<String>,
        /// Center for a proximity search, as lat,lng
        #[arg(long)]
        near: Option<String>,
        /// Number of proximity results
        #[arg(long, default_value = "3")]
        limit: usize,
    },
    /// Calculate a fixed-rate mortgage payment
    Calc {
        /// Property price in rubles
        #[arg(long, default_value = "10000000")]
        price: f64,
        /// Down payment in rubles
        #[arg(long, default_value = "2000000")]
        down: f64,
        /// Annual interest rate in percent
        #[arg(long, default_value = "12")]
        rate: f64,
        /// Loan term in years
        #[arg(long, default_value = "20")]
        years: u32,
    },
    /// List the agent roster
    Agents,
    /// Dump the catalog as JSON
    Export,
}

#[allow(clippy::too_many_lines)]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let mut app = App::open(cli.state_file)?;

    let Some(command) = cli.command else {
        return interactive::run(&mut app);
    };

    match command {
        Commands::List {
            search,
            property_type,
            status,
            min_price,
            max_price,
            min_area,
            max_area,
            rooms,
            city,
            sort,
            limit,
        } => {
            let criteria = FilterCriteria {
                search_text: search.unwrap_or_default(),
                property_type: property_type
                    .as_deref()
                    .map(parse_property_type)
                    .transpose()?,
                status: status.as_deref().map(parse_status).transpose()?,
                min_price,
                max_price,
                min_area,
                max_area,
                rooms,
                city,
            };
            let sort = parse_sort_option(&sort)?;

            let mut results = app.browse(&criteria, sort);
            if results.is_empty() {
                println!("No listings match the filter.");
            } else {
                let total = results.len();
                results.truncate(limit);
                println!("{}", render::listing_header());
                println!("{}", "-".repeat(100));
                for property in &results {
                    println!("{}", render::listing_row(property));
                }
                if results.len() < total {
                    println!("\n{} of {total} listing(s)", results.len());
                } else {
                    println!("\n{total} listing(s)");
                }
            }
        }
        Commands::Show { id } => {
            if app.view(id)?.is_none() {
                eprintln!("Listing not found: {id}");
                std::process::exit(1);
            }
            let is_favorite = app.shortlists().is_favorite(id);
            let in_compare = app.shortlists().in_compare(id);
            if let Some(property) = app.catalog().get(id) {
                println!("{}", render::listing_card(property, is_favorite, in_compare));
            }
        }
        Commands::Favorite { id } => {
            if app.catalog().get(id).is_none() {
                eprintln!("Listing not found: {id}");
                std::process::exit(1);
            }
            match app.shortlists_mut().toggle_favorite(id)? {
                ToggleOutcome::Added => println!("Added listing {id} to favorites."),
                ToggleOutcome::Removed => println!("Removed listing {id} from favorites."),
            }
        }
        Commands::Favorites => {
            let favorites = app.favorite_listings();
            if favorites.is_empty() {
                println!("No favorites yet.");
            } else {
                println!("{}", render::listing_header());
                println!("{}", "-".repeat(100));
                for property in &favorites {
                    println!("{}", render::listing_row(property));
                }
                println!("\n{} favorite(s)", favorites.len());
            }
        }
        Commands::Compare { ids } => {
            for id in ids {
                if app.catalog().get(id).is_none() {
                    eprintln!("Listing not found: {id}");
                    std::process::exit(1);
                }
                match app.shortlists_mut().toggle_compare(id) {
                    Ok(ToggleOutcome::Added) => println!("Added listing {id} to compare."),
                    Ok(ToggleOutcome::Removed) => println!("Removed listing {id} from compare."),
                    Err(ShortlistError::CompareFull { capacity }) => {
                        eprintln!("Compare is full: at most {capacity} listings side by side.");
                        std::process::exit(1);
                    }
                    Err(error) => return Err(error.into()),
                }
            }
            let compare = app.compare_listings();
            if compare.is_empty() {
                println!("Compare is empty.");
            } else {
                println!();
                println!("{}", render::compare_table(&compare));
            }
        }
        Commands::History => {
            let history = app.history_listings();
            if history.is_empty() {
                println!("No viewing history yet.");
            }
            for (position, property) in history.iter().enumerate() {
                println!("{:>2}. {}", position + 1, render::listing_row(property));
            }
        }
        Commands::Map {
            bounds,
            near,
            limit,
        } => {
            let viewport = bounds.as_deref().map(parse_bounds).transpose()?;

            if let Some(text) = near {
                let origin = parse_lat_lng(&text)?;
                for hit in app.index().nearest(origin, limit) {
                    if let Some(property) = app.catalog().get(hit.id) {
                        println!("{}", render::nearest_row(property, hit.distance_meters));
                    }
                }
            } else if let Some(bounds) = viewport {
                let ids = app.index().within(&bounds);
                if ids.is_empty() {
                    println!("No listings in the viewport.");
                }
                for id in ids {
                    if let Some(property) = app.catalog().get(id) {
                        println!("{}", render::map_row(property));
                    }
                }
            } else if let Some(bounds) = app.index().bounds_of() {
                println!(
                    "Map bounds: lat {:.4} to {:.4}, lng {:.4} to {:.4}",
                    bounds.south, bounds.north, bounds.west, bounds.east
                );
                for id in app.index().within(&bounds) {
                    if let Some(property) = app.catalog().get(id) {
                        println!("{}", render::map_row(property));
                    }
                }
            }
        }
        Commands::Calc {
            price,
            down,
            rate,
            years,
        } => {
            let request = LoanRequest {
                property_price: price,
                down_payment: down,
                annual_rate_percent: rate,
                term_years: years,
            };
            match amortize(&request) {
                Ok(breakdown) => println!("{}", render::mortgage_summary(&request, &breakdown)),
                Err(error) => {
                    eprintln!("{error}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Agents => {
            for agent in app.catalog().agents() {
                println!("{}", render::agent_rows(agent));
            }
        }
        Commands::Export => {
            println!("{}", serde_json::to_string_pretty(app.catalog().properties())?);
        }
    }

    Ok(())
}
