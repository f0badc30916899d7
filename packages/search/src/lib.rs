#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Filtering and sorting for the listing catalog.
//!
//! [`FilterCriteria`] narrows the collection (every active clause must
//! hold), [`SortOption`] orders what is left. Both passes are stable:
//! listings that compare equal keep their catalog order, so browsing the
//! same catalog with the same inputs always renders the same sequence.

use estate_map_listing_models::{ListingStatus, Property, PropertyType};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Criteria for narrowing the listing collection.
///
/// Every field is optional; `None` (or empty search text) places no
/// constraint. Active clauses combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against title, address and city.
    pub search_text: String,
    /// Keep only this dwelling kind.
    pub property_type: Option<PropertyType>,
    /// Keep only this listing status.
    pub status: Option<ListingStatus>,
    /// Lowest acceptable price, inclusive.
    pub min_price: Option<f64>,
    /// Highest acceptable price, inclusive.
    pub max_price: Option<f64>,
    /// Smallest acceptable living area, inclusive.
    pub min_area: Option<f64>,
    /// Largest acceptable living area, inclusive.
    pub max_area: Option<f64>,
    /// Exact room count.
    pub rooms: Option<u32>,
    /// Exact city name; an empty string places no constraint.
    pub city: Option<String>,
}

impl FilterCriteria {
    /// `true` when no clause is active, i.e. every listing would match.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search_text.is_empty()
            && self.property_type.is_none()
            && self.status.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.min_area.is_none()
            && self.max_area.is_none()
            && self.rooms.is_none()
            && self.city.as_ref().is_none_or(|city| city.is_empty())
    }

    /// Number of active clauses, for "N filter(s) active" summaries.
    ///
    /// The price pair and the area pair each count as one clause per
    /// bound, matching how the clauses are entered.
    #[must_use]
    pub fn active_clause_count(&self) -> usize {
        let mut count = usize::from(!self.search_text.is_empty());
        count += usize::from(self.property_type.is_some());
        count += usize::from(self.status.is_some());
        count += usize::from(self.min_price.is_some());
        count += usize::from(self.max_price.is_some());
        count += usize::from(self.min_area.is_some());
        count += usize::from(self.max_area.is_some());
        count += usize::from(self.rooms.is_some());
        count += usize::from(self.city.as_ref().is_some_and(|city| !city.is_empty()));
        count
    }

    /// Deactivate every clause, returning the criteria to match-all.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether one listing satisfies every active clause.
    ///
    /// Equality clauses run before the substring scan.
    #[must_use]
    pub fn matches(&self, property: &Property) -> bool {
        if self
            .property_type
            .is_some_and(|wanted| property.property_type != wanted)
        {
            return false;
        }
        if self.status.is_some_and(|wanted| property.status != wanted) {
            return false;
        }
        if self.rooms.is_some_and(|wanted| property.rooms != wanted) {
            return false;
        }
        if let Some(city) = &self.city {
            if !city.is_empty() && property.city != *city {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| property.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| property.price > max) {
            return false;
        }
        if self.min_area.is_some_and(|min| property.area < min) {
            return false;
        }
        if self.max_area.is_some_and(|max| property.area > max) {
            return false;
        }
        if !self.search_text.is_empty() {
            let needle = self.search_text.to_lowercase();
            let hit = property.title.to_lowercase().contains(&needle)
                || property.address.to_lowercase().contains(&needle)
                || property.city.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        true
    }
}

/// How to order a filtered listing collection.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOption {
    /// Recently added listings first. There is no listing date, so this is
    /// a stable partition on the NEW badge, not a chronological sort.
    #[default]
    Newest,
    /// Cheapest first.
    PriceLowToHigh,
    /// Most expensive first.
    PriceHighToLow,
    /// Smallest living area first.
    AreaLowToHigh,
    /// Largest living area first.
    AreaHighToLow,
}

impl SortOption {
    /// Human-readable label for the sort menu.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest",
            Self::PriceLowToHigh => "Price ↑",
            Self::PriceHighToLow => "Price ↓",
            Self::AreaLowToHigh => "Area ↑",
            Self::AreaHighToLow => "Area ↓",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Newest,
            Self::PriceLowToHigh,
            Self::PriceHighToLow,
            Self::AreaLowToHigh,
            Self::AreaHighToLow,
        ]
    }
}

/// Filters `properties` down to those matching `criteria`, preserving
/// catalog order.
#[must_use]
pub fn filter_listings<'a>(
    properties: &'a [Property],
    criteria: &FilterCriteria,
) -> Vec<&'a Property> {
    properties
        .iter()
        .filter(|property| criteria.matches(property))
        .collect()
}

/// Sorts listings in place. The sort is stable, so listings that compare
/// equal keep their incoming order.
pub fn sort_listings(properties: &mut [&Property], option: SortOption) {
    match option {
        SortOption::Newest => {
            properties.sort_by_key(|property| !property.is_new);
        }
        SortOption::PriceLowToHigh => {
            properties.sort_by(|a, b| a.price.total_cmp(&b.price));
        }
        SortOption::PriceHighToLow => {
            properties.sort_by(|a, b| b.price.total_cmp(&a.price));
        }
        SortOption::AreaLowToHigh => {
            properties.sort_by(|a, b| a.area.total_cmp(&b.area));
        }
        SortOption::AreaHighToLow => {
            properties.sort_by(|a, b| b.area.total_cmp(&a.area));
        }
    }
}

/// The standard browse pipeline: filter, then stable sort.
#[must_use]
pub fn filter_and_sort<'a>(
    properties: &'a [Property],
    criteria: &FilterCriteria,
    option: SortOption,
) -> Vec<&'a Property> {
    let mut matches = filter_listings(properties, criteria);
    sort_listings(&mut matches, option);
    matches
}
