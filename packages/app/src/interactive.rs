//! Interactive listing browser.
//!
//! Launched when the binary runs without a subcommand. A main menu fans
//! out to the browse flow (filter prompts, sort prompt, paginated picker,
//! detail card with favorite/compare toggles and a nearby lookup), the
//! shortlist views, the map search and the mortgage calculator. All state
//! changes go through [`App`], so everything toggled here is visible to
//! later CLI runs.

use std::error::Error;

use dialoguer::{Confirm, Input, Select};
use estate_map_listing_models::{ListingId, ListingStatus, PropertyType};
use estate_map_mortgage::{LoanRequest, amortize};
use estate_map_search::{FilterCriteria, SortOption};
use estate_map_shortlist::{COMPARE_CAPACITY, KeyValueStore, ShortlistError, ToggleOutcome};

use crate::{App, parse_lat_lng, render};

const PAGE_SIZE: usize = 5;

// --- Main menu ------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MainAction {
    Browse,
    Favorites,
    Compare,
    History,
    Map,
    Calculator,
    Agents,
    Quit,
}

impl MainAction {
    const ALL: &[Self] = &[
        Self::Browse,
        Self::Favorites,
        Self::Compare,
        Self::History,
        Self::Map,
        Self::Calculator,
        Self::Agents,
        Self::Quit,
    ];

    const fn label(&self) -> &'static str {
        match self {
            Self::Browse => "Browse listings",
            Self::Favorites => "Favorites",
            Self::Compare => "Compare listings",
            Self::History => "Viewing history",
            Self::Map => "Map search",
            Self::Calculator => "Mortgage calculator",
            Self::Agents => "Agents",
            Self::Quit => "Quit",
        }
    }
}

/// Runs the menu loop until the user quits.
///
/// # Errors
///
/// * If a terminal prompt fails.
/// * If persisting shortlist state fails.
pub fn run<S: KeyValueStore>(app: &mut App<S>) -> Result<(), Box<dyn Error>> {
    if !app.shortlists().has_visited() {
        println!("Welcome to Estate Map!");
        println!(
            "Browse the catalog, keep favorites, compare up to {COMPARE_CAPACITY} listings side by side, and estimate a mortgage."
        );
        println!();
        app.shortlists_mut().mark_visited()?;
    }

    println!("{}", render::stats_panel(&app.catalog().stats()));

    loop {
        println!();
        let labels: Vec<&str> = MainAction::ALL.iter().map(MainAction::label).collect();
        let choice = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        match MainAction::ALL[choice] {
            MainAction::Browse => browse(app)?,
            MainAction::Favorites => favorites(app)?,
            MainAction::Compare => compare(app),
            MainAction::History => history(app),
            MainAction::Map => map_search(app)?,
            MainAction::Calculator => calculator()?,
            MainAction::Agents => agents(app),
            MainAction::Quit => break,
        }
    }

    Ok(())
}

// --- Browse flow ----------------------------------------------------------

fn browse<S: KeyValueStore>(app: &mut App<S>) -> Result<(), Box<dyn Error>> {
    let criteria = prompt_criteria(app)?;
    let sort = prompt_sort()?;

    let results = app.browse(&criteria, sort);
    if results.is_empty() {
        println!("No listings match the filter.");
        return Ok(());
    }
    let ids: Vec<ListingId> = results.iter().map(|property| property.id).collect();
    let rows: Vec<String> = results.iter().map(|property| render::listing_row(property)).collect();

    println!();
    println!("{}", render::listing_header());
    println!("{}", "-".repeat(100));
    for row in &rows {
        println!("{row}");
    }
    let active = criteria.active_clause_count();
    if active > 0 {
        println!("\n{} listing(s), {active} filter(s) active", ids.len());
    } else {
        println!("\n{} listing(s)", ids.len());
    }

    while let Some(id) = pick_listing(app, &ids)? {
        open_listing(app, id)?;
    }
    Ok(())
}

fn prompt_criteria<S: KeyValueStore>(app: &App<S>) -> Result<FilterCriteria, Box<dyn Error>> {
    let search_text: String = Input::new()
        .with_prompt("Search text (title, address or city; empty for all)")
        .allow_empty(true)
        .interact_text()?;

    Ok(FilterCriteria {
        search_text,
        property_type: prompt_choice("Property type", PropertyType::all(), PropertyType::label)?,
        status: prompt_choice("Status", ListingStatus::all(), ListingStatus::label)?,
        min_price: prompt_optional_f64("Min price, ₽ (empty for any)")?,
        max_price: prompt_optional_f64("Max price, ₽ (empty for any)")?,
        min_area: prompt_optional_f64("Min area, m² (empty for any)")?,
        max_area: prompt_optional_f64("Max area, m² (empty for any)")?,
        rooms: prompt_optional_u32("Rooms (empty for any)")?,
        city: prompt_city(app)?,
    })
}

fn prompt_choice<T: Copy>(
    prompt: &str,
    options: &[T],
    label: fn(T) -> &'static str,
) -> Result<Option<T>, Box<dyn Error>> {
    let mut labels = vec!["Any"];
    labels.extend(options.iter().map(|option| label(*option)));
    let choice = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(if choice == 0 {
        None
    } else {
        Some(options[choice - 1])
    })
}

fn prompt_city<S: KeyValueStore>(app: &App<S>) -> Result<Option<String>, Box<dyn Error>> {
    let cities = app.catalog().cities();
    let mut labels = vec!["Any".to_string()];
    labels.extend(cities.iter().cloned());
    let choice = Select::new()
        .with_prompt("City")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(if choice == 0 {
        None
    } else {
        Some(cities[choice - 1].clone())
    })
}

fn prompt_optional_f64(prompt: &str) -> Result<Option<f64>, Box<dyn Error>> {
    let text: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(text.trim().parse().ok())
}

fn prompt_optional_u32(prompt: &str) -> Result<Option<u32>, Box<dyn Error>> {
    let text: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(text.trim().parse().ok())
}

fn prompt_sort() -> Result<SortOption, Box<dyn Error>> {
    let labels: Vec<&str> = SortOption::all()
        .iter()
        .map(|option| option.label())
        .collect();
    let choice = Select::new()
        .with_prompt("Sort by")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(SortOption::all()[choice])
}

// --- Listing picker -------------------------------------------------------

#[derive(Clone, Copy)]
enum PickerItem {
    Listing(usize),
    PreviousPage,
    NextPage,
    Back,
}

fn pick_listing<S: KeyValueStore>(
    app: &App<S>,
    ids: &[ListingId],
) -> Result<Option<ListingId>, Box<dyn Error>> {
    let total_pages = ids.len().div_ceil(PAGE_SIZE).max(1);
    let mut page = 0_usize;

    loop {
        let (items, labels) = build_picker_page(app, ids, page, total_pages);
        let choice = Select::new()
            .with_prompt(format!("Open a listing (page {}/{total_pages})", page + 1))
            .items(&labels)
            .default(usize::from(page > 0))
            .interact()?;

        match items[choice] {
            PickerItem::Listing(index) => return Ok(Some(ids[index])),
            PickerItem::PreviousPage => page = page.saturating_sub(1),
            PickerItem::NextPage => page = (page + 1).min(total_pages - 1),
            PickerItem::Back => return Ok(None),
        }
    }
}

fn build_picker_page<S: KeyValueStore>(
    app: &App<S>,
    ids: &[ListingId],
    page: usize,
    total_pages: usize,
) -> (Vec<PickerItem>, Vec<String>) {
    let mut items = Vec::new();
    let mut labels = Vec::new();

    if page > 0 {
        items.push(PickerItem::PreviousPage);
        labels.push("← Previous page".to_string());
    }

    let start = page * PAGE_SIZE;
    for (offset, id) in ids.iter().skip(start).take(PAGE_SIZE).enumerate() {
        let label = app.catalog().get(*id).map_or_else(
            || format!("#{id}"),
            |property| {
                format!(
                    "#{} {} ({}, {})",
                    property.id,
                    property.title,
                    render::format_price_short(property.price),
                    property.city
                )
            },
        );
        items.push(PickerItem::Listing(start + offset));
        labels.push(label);
    }

    if page + 1 < total_pages {
        items.push(PickerItem::NextPage);
        labels.push("Next page →".to_string());
    }

    items.push(PickerItem::Back);
    labels.push("Back".to_string());

    (items, labels)
}

// --- Listing detail -------------------------------------------------------

fn open_listing<S: KeyValueStore>(app: &mut App<S>, id: ListingId) -> Result<(), Box<dyn Error>> {
    if app.view(id)?.is_none() {
        println!("Listing not found: {id}");
        return Ok(());
    }

    loop {
        let is_favorite = app.shortlists().is_favorite(id);
        let in_compare = app.shortlists().in_compare(id);
        if let Some(property) = app.catalog().get(id) {
            println!();
            println!("{}", render::listing_card(property, is_favorite, in_compare));
        }

        let favorite_label = if is_favorite {
            "Remove from favorites"
        } else {
            "Add to favorites"
        };
        let compare_label = if in_compare {
            "Remove from compare"
        } else {
            "Add to compare"
        };
        let labels = [favorite_label, compare_label, "Nearby listings", "Back"];
        let choice = Select::new()
            .with_prompt("Listing actions")
            .items(&labels)
            .default(3)
            .interact()?;

        match choice {
            0 => match app.shortlists_mut().toggle_favorite(id)? {
                ToggleOutcome::Added => println!("Added to favorites."),
                ToggleOutcome::Removed => println!("Removed from favorites."),
            },
            1 => match app.shortlists_mut().toggle_compare(id) {
                Ok(ToggleOutcome::Added) => println!("Added to compare."),
                Ok(ToggleOutcome::Removed) => println!("Removed from compare."),
                Err(ShortlistError::CompareFull { capacity }) => {
                    println!("Compare is full: at most {capacity} listings side by side.");
                }
                Err(error) => return Err(error.into()),
            },
            2 => nearby(app, id),
            _ => return Ok(()),
        }
    }
}

fn nearby<S: KeyValueStore>(app: &App<S>, id: ListingId) {
    let Some(origin) = app.catalog().get(id).map(|property| property.coordinate) else {
        return;
    };
    println!();
    for hit in app.index().nearest(origin, 4) {
        if hit.id == id {
            continue;
        }
        if let Some(property) = app.catalog().get(hit.id) {
            println!("{}", render::nearest_row(property, hit.distance_meters));
        }
    }
}

// --- Shortlist views ------------------------------------------------------

fn favorites<S: KeyValueStore>(app: &mut App<S>) -> Result<(), Box<dyn Error>> {
    let favorites = app.favorite_listings();
    if favorites.is_empty() {
        println!("No favorites yet.");
        return Ok(());
    }

    println!("{}", render::listing_header());
    println!("{}", "-".repeat(100));
    let mut ids = Vec::new();
    for property in &favorites {
        println!("{}", render::listing_row(property));
        ids.push(property.id);
    }

    while let Some(id) = pick_listing(app, &ids)? {
        open_listing(app, id)?;
    }
    Ok(())
}

fn compare<S: KeyValueStore>(app: &App<S>) {
    let compare = app.compare_listings();
    if compare.is_empty() {
        println!("Compare is empty. Open a listing and add it, up to {COMPARE_CAPACITY} at a time.");
        return;
    }
    println!("{}", render::compare_table(&compare));
}

fn history<S: KeyValueStore>(app: &App<S>) {
    let history = app.history_listings();
    if history.is_empty() {
        println!("No viewing history yet.");
        return;
    }
    for (position, property) in history.iter().enumerate() {
        println!("{:>2}. {}", position + 1, render::listing_row(property));
    }
}

// --- Map search -----------------------------------------------------------

fn map_search<S: KeyValueStore>(app: &App<S>) -> Result<(), Box<dyn Error>> {
    let Some(bounds) = app.index().bounds_of() else {
        println!("No listings on the map.");
        return Ok(());
    };

    println!(
        "Map bounds: lat {:.4} to {:.4}, lng {:.4} to {:.4}",
        bounds.south, bounds.north, bounds.west, bounds.east
    );
    for id in app.index().within(&bounds) {
        if let Some(property) = app.catalog().get(id) {
            println!("{}", render::map_row(property));
        }
    }

    if Confirm::new()
        .with_prompt("Search for listings near a point?")
        .default(false)
        .interact()?
    {
        let text: String = Input::new()
            .with_prompt("Coordinates (lat,lng)")
            .default("55.7539,37.6208".to_string())
            .interact_text()?;
        let origin = match parse_lat_lng(&text) {
            Ok(origin) => origin,
            Err(error) => {
                println!("{error}");
                return Ok(());
            }
        };
        let limit: String = Input::new()
            .with_prompt("How many results?")
            .default("3".to_string())
            .interact_text()?;
        let limit = limit.trim().parse().unwrap_or(3);

        println!();
        for hit in app.index().nearest(origin, limit) {
            if let Some(property) = app.catalog().get(hit.id) {
                println!("{}", render::nearest_row(property, hit.distance_meters));
            }
        }
    }
    Ok(())
}

// --- Mortgage calculator --------------------------------------------------

fn calculator() -> Result<(), Box<dyn Error>> {
    let defaults = LoanRequest::default();
    let request = LoanRequest {
        property_price: prompt_amount("Property price, ₽", defaults.property_price)?,
        down_payment: prompt_amount("Down payment, ₽", defaults.down_payment)?,
        annual_rate_percent: prompt_amount("Annual rate, %", defaults.annual_rate_percent)?,
        term_years: prompt_term("Loan term, years", defaults.term_years)?,
    };

    match amortize(&request) {
        Ok(breakdown) => println!("\n{}", render::mortgage_summary(&request, &breakdown)),
        Err(error) => println!("{error}"),
    }
    Ok(())
}

fn prompt_amount(prompt: &str, default: f64) -> Result<f64, Box<dyn Error>> {
    let text: String = Input::new()
        .with_prompt(prompt)
        .default(format!("{default:.0}"))
        .interact_text()?;
    Ok(text.trim().parse().unwrap_or(default))
}

fn prompt_term(prompt: &str, default: u32) -> Result<u32, Box<dyn Error>> {
    let text: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;
    Ok(text.trim().parse().unwrap_or(default))
}

// --- Agents ---------------------------------------------------------------

fn agents<S: KeyValueStore>(app: &App<S>) {
    for agent in app.catalog().agents() {
        println!("{}", render::agent_rows(agent));
    }
}
