#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Session wiring for the listing browser.
//!
//! [`App`] owns the three collaborators every command needs: the seeded
//! [`Catalog`], the [`ListingIndex`] built over it, and the persisted
//! [`Shortlists`]. The binary and the interactive browser both go through
//! this type so that CLI one-shots and menu sessions behave identically.

pub mod interactive;
pub mod render;

use std::path::PathBuf;

use estate_map_catalog::Catalog;
use estate_map_listing_models::{Coordinate, ListingId, ListingStatus, Property, PropertyType};
use estate_map_search::{FilterCriteria, SortOption, filter_and_sort};
use estate_map_shortlist::{
    JsonFileStore, KeyValueStore, MemoryStore, ShortlistError, Shortlists,
};
use estate_map_spatial::{ListingIndex, MapBounds};

/// A browser session: catalog, spatial index and persisted shortlists.
pub struct App<S: KeyValueStore = JsonFileStore> {
    catalog: Catalog,
    index: ListingIndex,
    shortlists: Shortlists<S>,
}

impl App {
    /// Opens a session backed by a JSON state file, either the given path
    /// or the default one under `data/`.
    ///
    /// # Errors
    ///
    /// * If the state file exists but cannot be read.
    pub fn open(state_file: Option<PathBuf>) -> Result<Self, ShortlistError> {
        let store = match state_file {
            Some(path) => JsonFileStore::open(path)?,
            None => JsonFileStore::open_default()?,
        };
        Self::with_store(store)
    }
}

impl App<MemoryStore> {
    /// Opens a throwaway session that forgets everything on drop.
    ///
    /// # Errors
    ///
    /// * Never fails for a fresh [`MemoryStore`]; the signature matches
    ///   [`App::open`] so callers can swap backends.
    pub fn in_memory() -> Result<Self, ShortlistError> {
        Self::with_store(MemoryStore::new())
    }
}

impl<S: KeyValueStore> App<S> {
    /// Wires a session around an explicit store backend.
    ///
    /// # Errors
    ///
    /// * If reading the persisted shortlist keys from the store fails.
    pub fn with_store(store: S) -> Result<Self, ShortlistError> {
        let catalog = Catalog::seed();
        let index = ListingIndex::build(catalog.properties());
        let shortlists = Shortlists::load(store)?;
        log::debug!(
            "Loaded shortlists: {} favorite(s), {} in compare, {} viewed",
            shortlists.favorites().len(),
            shortlists.compare().len(),
            shortlists.view_history().len()
        );
        Ok(Self {
            catalog,
            index,
            shortlists,
        })
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn index(&self) -> &ListingIndex {
        &self.index
    }

    #[must_use]
    pub const fn shortlists(&self) -> &Shortlists<S> {
        &self.shortlists
    }

    pub const fn shortlists_mut(&mut self) -> &mut Shortlists<S> {
        &mut self.shortlists
    }

    /// Filters and sorts the catalog in one pass.
    #[must_use]
    pub fn browse(&self, criteria: &FilterCriteria, sort: SortOption) -> Vec<&Property> {
        filter_and_sort(self.catalog.properties(), criteria, sort)
    }

    /// Favorite listings in catalog order.
    #[must_use]
    pub fn favorite_listings(&self) -> Vec<&Property> {
        self.catalog
            .properties()
            .iter()
            .filter(|property| self.shortlists.is_favorite(property.id))
            .collect()
    }

    /// Compare-set listings in catalog order.
    #[must_use]
    pub fn compare_listings(&self) -> Vec<&Property> {
        self.catalog
            .properties()
            .iter()
            .filter(|property| self.shortlists.in_compare(property.id))
            .collect()
    }

    /// Recently viewed listings, most recent first.
    #[must_use]
    pub fn history_listings(&self) -> Vec<&Property> {
        self.shortlists
            .view_history()
            .iter()
            .filter_map(|id| self.catalog.get(*id))
            .collect()
    }

    /// Looks a listing up and records the view, like opening its detail
    /// page.
    ///
    /// # Errors
    ///
    /// * If persisting the updated view history fails.
    pub fn view(&mut self, id: ListingId) -> Result<Option<&Property>, ShortlistError> {
        let Some(property) = self.catalog.get(id) else {
            return Ok(None);
        };
        self.shortlists.record_view(id)?;
        Ok(Some(property))
    }
}

/// Parses a property type the way users type it (`villa`, `VILLA`).
///
/// # Errors
///
/// * If the value names no known property type.
pub fn parse_property_type(value: &str) -> Result<PropertyType, String> {
    value
        .trim()
        .to_uppercase()
        .parse()
        .map_err(|_| format!("unknown property type: {value}"))
}

/// Parses a listing status, accepting `for_sale` as well as `FOR_SALE`.
///
/// # Errors
///
/// * If the value names no known listing status.
pub fn parse_status(value: &str) -> Result<ListingStatus, String> {
    value
        .trim()
        .to_uppercase()
        .parse()
        .map_err(|_| format!("unknown listing status: {value}"))
}

/// Parses a sort order, accepting `price_low_to_high` as well as
/// `PRICE_LOW_TO_HIGH`.
///
/// # Errors
///
/// * If the value names no known sort order.
pub fn parse_sort_option(value: &str) -> Result<SortOption, String> {
    value
        .trim()
        .to_uppercase()
        .parse()
        .map_err(|_| format!("unknown sort order: {value}"))
}

/// Parses a `lat,lng` pair into a [`Coordinate`].
///
/// # Errors
///
/// * If the value is not two comma-separated numbers, or the numbers are
///   outside the valid latitude/longitude ranges.
pub fn parse_lat_lng(value: &str) -> Result<Coordinate, String> {
    let error = || format!("expected lat,lng, got: {value}");
    let (lat, lng) = value.split_once(',').ok_or_else(error)?;
    let latitude: f64 = lat.trim().parse().map_err(|_| error())?;
    let longitude: f64 = lng.trim().parse().map_err(|_| error())?;
    let coordinate = Coordinate::new(latitude, longitude);
    if !coordinate.is_valid() {
        return Err(format!("coordinate out of range: {value}"));
    }
    Ok(coordinate)
}

/// Parses a `"west,south,east,north"` viewport from CLI input.
///
/// # Errors
///
/// * If the text is not four comma-separated numbers, or a corner falls
///   outside the WGS84 domain, or the edges are out of order.
pub fn parse_bounds(value: &str) -> Result<MapBounds, String> {
    let error = || format!("expected west,south,east,north, got: {value}");
    let parts: Vec<f64> = value
        .split(',')
        .map(|part| part.trim().parse())
        .collect::<Result<_, _>>()
        .map_err(|_| error())?;
    let [west, south, east, north] = parts[..] else {
        return Err(error());
    };
    if !Coordinate::new(south, west).is_valid() || !Coordinate::new(north, east).is_valid() {
        return Err(format!("viewport out of range: {value}"));
    }
    if west > east || south > north {
        return Err(format!("viewport edges out of order: {value}"));
    }
    Ok(MapBounds::new(west, south, east, north))
}

#[cfg(test)]
mod tests {
    use estate_map_shortlist::ToggleOutcome;

    use super::*;

    #[test]
    fn favorites_resolve_in_catalog_order() {
        let mut app = App::in_memory().expect("in-memory session should open");

        assert_eq!(
            app.shortlists_mut().toggle_favorite(ListingId(6)).unwrap(),
            ToggleOutcome::Added
        );
        assert_eq!(
            app.shortlists_mut().toggle_favorite(ListingId(2)).unwrap(),
            ToggleOutcome::Added
        );

        let ids: Vec<u32> = app.favorite_listings().iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![2, 6], "catalog order, not toggle order");
    }

    #[test]
    fn history_resolves_most_recent_first() {
        let mut app = App::in_memory().unwrap();

        assert!(app.view(ListingId(5)).unwrap().is_some());
        assert!(app.view(ListingId(1)).unwrap().is_some());
        assert!(app.view(ListingId(5)).unwrap().is_some());

        let ids: Vec<u32> = app.history_listings().iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![5, 1]);
    }

    #[test]
    fn viewing_an_unknown_listing_records_nothing() {
        let mut app = App::in_memory().unwrap();

        assert!(app.view(ListingId(999)).unwrap().is_none());
        assert!(app.history_listings().is_empty());
    }

    #[test]
    fn browse_applies_filter_and_sort_together() {
        let app = App::in_memory().unwrap();
        let criteria = FilterCriteria {
            city: Some("Moscow Oblast".to_string()),
            ..FilterCriteria::default()
        };

        let ids: Vec<u32> = app
            .browse(&criteria, SortOption::PriceLowToHigh)
            .iter()
            .map(|p| p.id.0)
            .collect();
        assert_eq!(ids, vec![6, 3]);
    }

    #[test]
    fn enum_arguments_parse_case_insensitively() {
        assert_eq!(parse_property_type("villa").unwrap(), PropertyType::Villa);
        assert_eq!(parse_status("for_rent").unwrap(), ListingStatus::ForRent);
        assert_eq!(
            parse_sort_option("price_high_to_low").unwrap(),
            SortOption::PriceHighToLow
        );
        assert!(parse_property_type("castle").is_err());
        assert!(parse_status("SOLD").is_err());
        assert!(parse_sort_option("cheapest").is_err());
    }

    #[test]
    fn lat_lng_pairs_parse_and_validate() {
        let coordinate = parse_lat_lng("55.7539, 37.6208").unwrap();
        assert!((coordinate.latitude - 55.7539).abs() < 1e-9);
        assert!((coordinate.longitude - 37.6208).abs() < 1e-9);

        assert!(parse_lat_lng("55.75").is_err(), "missing longitude");
        assert!(parse_lat_lng("abc,37.6").is_err(), "latitude not a number");
        assert!(parse_lat_lng("123.0,37.6").is_err(), "latitude out of range");
    }

    #[test]
    fn viewports_parse_and_validate() {
        let bounds = parse_bounds("37.0, 55.0, 38.0, 56.0").unwrap();
        assert!(bounds.contains(Coordinate::new(55.5, 37.5)));
        assert!(!bounds.contains(Coordinate::new(56.5, 37.5)));

        assert!(parse_bounds("37.0,55.0,38.0").is_err(), "missing an edge");
        assert!(parse_bounds("37.0,55.0,38.0,abc").is_err(), "edge not a number");
        assert!(parse_bounds("38.0,55.0,37.0,56.0").is_err(), "west past east");
        assert!(parse_bounds("37.0,55.0,38.0,99.0").is_err(), "north out of range");
    }
}
