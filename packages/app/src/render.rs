//! Terminal rendering for listings, agents and mortgage results.
//!
//! All money stays in rubles: full amounts are grouped into thousands the
//! way `ru-RU` locales group them, and anything from a million up is
//! abbreviated to `mln ₽` on cards and tables. The core packages hand over
//! raw numbers only; every display decision lives here.

use std::fmt::Write as _;

use estate_map_catalog::CatalogStats;
use estate_map_listing_models::{Agent, Property};
use estate_map_mortgage::{LoanRequest, PaymentBreakdown};

/// Rounds to whole rubles, groups thousands, appends the ruble sign.
#[must_use]
pub fn format_rubles(amount: f64) -> String {
    format!("{} ₽", group_thousands(amount))
}

/// Abbreviates amounts from one million rubles up to one decimal place;
/// smaller amounts render in full.
#[must_use]
pub fn format_price_short(amount: f64) -> String {
    if amount >= 1_000_000.0 {
        format!("{:.1} mln ₽", amount / 1_000_000.0)
    } else {
        format_rubles(amount)
    }
}

/// Price per square meter, rounded to whole rubles.
#[must_use]
pub fn format_price_per_meter(amount: f64) -> String {
    format!("{} ₽/m²", group_thousands(amount))
}

/// Living area in whole square meters.
#[must_use]
pub fn format_area(area: f64) -> String {
    format!("{area:.0} m²")
}

/// Distances under a kilometer in meters, the rest in kilometers.
#[must_use]
pub fn format_distance(meters: f64) -> String {
    if meters < 1_000.0 {
        format!("{meters:.0} m")
    } else {
        format!("{:.1} km", meters / 1_000.0)
    }
}

fn group_thousands(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        grouped.insert(0, '-');
    }
    grouped
}

fn clip(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}

fn floor_label(property: &Property) -> String {
    if property.floor == 0 {
        "whole building".to_string()
    } else {
        format!("{}/{}", property.floor, property.total_floors)
    }
}

fn badges(property: &Property) -> String {
    let mut badges = String::new();
    if property.is_new {
        badges.push_str(" [NEW]");
    }
    if property.is_featured {
        badges.push_str(" [FEATURED]");
    }
    badges
}

/// Header row matching [`listing_row`].
#[must_use]
pub fn listing_header() -> String {
    format!(
        "{:<4} {:<10} {:<9} {:>12} {:>8} {:>6} {:<14} TITLE",
        "ID", "TYPE", "STATUS", "PRICE", "AREA", "ROOMS", "CITY"
    )
}

/// One table line for the listing overview.
#[must_use]
pub fn listing_row(property: &Property) -> String {
    format!(
        "{:<4} {:<10} {:<9} {:>12} {:>8} {:>6} {:<14} {}{}",
        property.id,
        property.property_type.label(),
        property.status.label(),
        format_price_short(property.price),
        format_area(property.area),
        property.rooms,
        clip(&property.city, 14),
        clip(&property.title, 44),
        badges(property)
    )
}

/// One table line for the map overview, with coordinates.
#[must_use]
pub fn map_row(property: &Property) -> String {
    format!(
        "{:<4} ({:.4}, {:.4}) {:>12}  {}",
        property.id,
        property.coordinate.latitude,
        property.coordinate.longitude,
        format_price_short(property.price),
        clip(&property.title, 44)
    )
}

/// One table line for a proximity result.
#[must_use]
pub fn nearest_row(property: &Property, distance_meters: f64) -> String {
    format!(
        "{:<4} {:>8} {:>12}  {}",
        property.id,
        format_distance(distance_meters),
        format_price_short(property.price),
        clip(&property.title, 44)
    )
}

/// The full detail card shown by the `show` command and the interactive
/// browser.
#[must_use]
pub fn listing_card(property: &Property, is_favorite: bool, in_compare: bool) -> String {
    let mut card = String::new();
    let _ = writeln!(
        card,
        "#{} {}{}",
        property.id,
        property.title,
        badges(property)
    );
    let _ = writeln!(
        card,
        "{} · {} · {}, {}",
        property.status.label(),
        property.property_type.label(),
        property.address,
        property.city
    );
    let _ = writeln!(
        card,
        "Price      {} ({})",
        format_price_short(property.price),
        format_price_per_meter(property.price_per_meter())
    );
    let _ = writeln!(
        card,
        "Layout     {} rooms · {} bathrooms · {} · floor {}",
        property.rooms,
        property.bathrooms,
        format_area(property.area),
        floor_label(property)
    );
    let _ = writeln!(
        card,
        "Built      {} · rating {:.1} · {} views",
        property.year_built, property.rating, property.views
    );
    let _ = writeln!(card, "Features   {}", property.features.join(", "));
    let _ = writeln!(card, "About      {}", property.description);
    let _ = writeln!(
        card,
        "Agent      {} · {} · {} ({:.1}★, {} yrs, {} listings)",
        property.agent.name,
        property.agent.phone,
        property.agent.email,
        property.agent.rating,
        property.agent.experience_years,
        property.agent.properties_count
    );
    let _ = writeln!(
        card,
        "Saved      favorite: {} · compare: {}",
        if is_favorite { "yes" } else { "no" },
        if in_compare { "yes" } else { "no" }
    );
    card
}

/// Side-by-side comparison of up to three listings, attributes as rows.
#[must_use]
pub fn compare_table(properties: &[&Property]) -> String {
    const LABEL_WIDTH: usize = 12;
    const COLUMN_WIDTH: usize = 24;

    let mut table = String::new();

    let mut header = format!("{:<LABEL_WIDTH$}", "");
    for property in properties {
        let title = clip(&format!("#{} {}", property.id, property.title), 22);
        let _ = write!(header, "{title:<COLUMN_WIDTH$}");
    }
    let _ = writeln!(table, "{}", header.trim_end());

    let mut row = |label: &str, cells: Vec<String>| {
        let mut line = format!("{label:<LABEL_WIDTH$}");
        for cell in cells {
            let _ = write!(line, "{cell:<COLUMN_WIDTH$}");
        }
        let _ = writeln!(table, "{}", line.trim_end());
    };

    row(
        "Price",
        properties
            .iter()
            .map(|p| format_price_short(p.price))
            .collect(),
    );
    row(
        "Per m²",
        properties
            .iter()
            .map(|p| format_price_per_meter(p.price_per_meter()))
            .collect(),
    );
    row(
        "Area",
        properties.iter().map(|p| format_area(p.area)).collect(),
    );
    row(
        "Rooms",
        properties.iter().map(|p| p.rooms.to_string()).collect(),
    );
    row(
        "Bathrooms",
        properties.iter().map(|p| p.bathrooms.to_string()).collect(),
    );
    row(
        "Floor",
        properties.iter().map(|p| floor_label(p)).collect(),
    );
    row(
        "Year",
        properties.iter().map(|p| p.year_built.to_string()).collect(),
    );
    row(
        "Type",
        properties
            .iter()
            .map(|p| p.property_type.label().to_string())
            .collect(),
    );
    row(
        "Status",
        properties
            .iter()
            .map(|p| p.status.label().to_string())
            .collect(),
    );
    row(
        "Rating",
        properties.iter().map(|p| format!("{:.1}", p.rating)).collect(),
    );

    table
}

/// One table line for the agent roster, with the bio on a second line.
#[must_use]
pub fn agent_rows(agent: &Agent) -> String {
    format!(
        "{:<18} {:<20} {:<30} {:>4.1}★ {:>3} yrs {:>3} listings\n     {}",
        agent.name,
        agent.phone,
        agent.email,
        agent.rating,
        agent.experience_years,
        agent.properties_count,
        agent.bio
    )
}

/// The home-screen catalog summary.
#[must_use]
pub fn stats_panel(stats: &CatalogStats) -> String {
    let mut panel = String::new();
    let _ = writeln!(
        panel,
        "{} listings · {} for sale · {} for rent",
        stats.total_listings, stats.for_sale, stats.for_rent
    );
    let _ = write!(
        panel,
        "Prices {} to {} · avg {}",
        format_price_short(stats.min_price),
        format_price_short(stats.max_price),
        format_price_per_meter(stats.avg_price_per_meter)
    );
    panel
}

/// The calculator result block: headline monthly payment, then the
/// breakdown.
#[must_use]
pub fn mortgage_summary(request: &LoanRequest, breakdown: &PaymentBreakdown) -> String {
    let mut summary = String::new();
    let _ = writeln!(
        summary,
        "Monthly payment   {}",
        format_rubles(breakdown.monthly_payment)
    );
    let _ = writeln!(
        summary,
        "Property price    {}",
        format_price_short(request.property_price)
    );
    let _ = writeln!(
        summary,
        "Down payment      {} ({:.0}%)",
        format_price_short(request.down_payment),
        request.down_payment_percent()
    );
    let _ = writeln!(
        summary,
        "Loan amount       {}",
        format_price_short(breakdown.loan_amount)
    );
    let _ = writeln!(
        summary,
        "Interest rate     {:.1}%",
        request.annual_rate_percent
    );
    let _ = writeln!(summary, "Loan term         {} years", request.term_years);
    let _ = writeln!(
        summary,
        "Total payment     {}",
        format_price_short(breakdown.total_payment)
    );
    let _ = write!(
        summary,
        "Total interest    {}",
        format_price_short(breakdown.total_interest)
    );
    summary
}

#[cfg(test)]
mod tests {
    use estate_map_catalog::Catalog;
    use estate_map_mortgage::amortize;

    use super::*;

    #[test]
    fn rubles_group_thousands_with_spaces() {
        assert_eq!(format_rubles(0.0), "0 ₽");
        assert_eq!(format_rubles(999.0), "999 ₽");
        assert_eq!(format_rubles(66_666.666_667), "66 667 ₽");
        assert_eq!(format_rubles(1_234_567.0), "1 234 567 ₽");
        assert_eq!(format_rubles(-5_000.0), "-5 000 ₽");
    }

    #[test]
    fn short_prices_abbreviate_from_one_million() {
        assert_eq!(format_price_short(25_000_000.0), "25.0 mln ₽");
        assert_eq!(format_price_short(8_500_000.0), "8.5 mln ₽");
        assert_eq!(format_price_short(999_999.0), "999 999 ₽");
    }

    #[test]
    fn distances_switch_units_at_a_kilometer() {
        assert_eq!(format_distance(347.2), "347 m");
        assert_eq!(format_distance(2_400.0), "2.4 km");
    }

    #[test]
    fn listing_row_carries_the_essentials() {
        let catalog = Catalog::seed();
        let penthouse = catalog.properties().iter().find(|p| p.id.0 == 4).unwrap();
        let row = listing_row(penthouse);
        assert!(row.contains("4"));
        assert!(row.contains("Penthouse"));
        assert!(row.contains("120.0 mln ₽"));
        assert!(row.contains("[NEW]"));
        assert!(row.contains("[FEATURED]"));
    }

    #[test]
    fn listing_row_columns_line_up_with_the_header() {
        let catalog = Catalog::seed();
        let penthouse = catalog.properties().iter().find(|p| p.id.0 == 4).unwrap();
        let header = listing_header();
        let row = listing_row(penthouse);
        assert_eq!(header.find("TYPE"), row.find("Penthouse"));
        assert_eq!(header.find("STATUS"), row.find("For sale"));
    }

    #[test]
    fn long_cyrillic_titles_clip_on_character_boundaries() {
        let title = "Суперсовременнаявидоваяквартира в центре Москвы";
        let clipped = clip(title, 44);
        assert_eq!(clipped.chars().count(), 44);
        assert!(clipped.ends_with("..."));

        let catalog = Catalog::seed();
        let mut property = catalog.properties()[0].clone();
        property.title = title.to_string();
        let row = listing_row(&property);
        assert!(row.contains("Суперсовременная"));
        assert!(row.contains("..."));
    }

    #[test]
    fn card_reports_whole_building_floors() {
        let catalog = Catalog::seed();
        let villa = catalog.properties().iter().find(|p| p.id.0 == 3).unwrap();
        let card = listing_card(villa, true, false);
        assert!(card.contains("whole building"));
        assert!(card.contains("favorite: yes"));
        assert!(card.contains("compare: no"));
        assert!(card.contains("Elena Smirnova"));
    }

    #[test]
    fn compare_table_lays_attributes_out_as_rows() {
        let catalog = Catalog::seed();
        let picks: Vec<&_> = catalog
            .properties()
            .iter()
            .filter(|p| [1, 3].contains(&p.id.0))
            .collect();
        let table = compare_table(&picks);
        assert!(table.contains("#1 Luxury apartmen"));
        assert!(table.contains("Per m²"));
        assert!(table.contains("25.0 mln ₽"));
        assert!(table.contains("85.0 mln ₽"));
        assert!(table.contains("whole building"));
    }

    #[test]
    fn mortgage_summary_includes_the_breakdown_lines() {
        let request = LoanRequest {
            property_price: 10_000_000.0,
            down_payment: 2_000_000.0,
            annual_rate_percent: 0.0,
            term_years: 10,
        };
        let breakdown = amortize(&request).unwrap();
        let summary = mortgage_summary(&request, &breakdown);
        assert!(summary.contains("Monthly payment   66 667 ₽"));
        assert!(summary.contains("Down payment      2.0 mln ₽ (20%)"));
        assert!(summary.contains("Loan term         10 years"));
        assert!(summary.contains("Total interest    0 ₽"));
    }
}
