#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Core domain types for property listings.
//!
//! This crate defines the canonical listing record shared across the entire
//! estate-map system: the property itself, its embedded agent, its map
//! location, and the small enums describing what kind of listing it is.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Identifier of a property listing.
///
/// Ids are assigned by the catalog seed data and stay stable across
/// sessions, so persisted favorite/compare sets resolve on the next launch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ListingId(pub u32);

impl std::fmt::Display for ListingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for ListingId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl std::str::FromStr for ListingId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Identifier of an agent in the roster.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AgentId(pub u32);

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for AgentId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// The kind of dwelling a listing offers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyType {
    /// Unit in a multi-dwelling building
    Apartment,
    /// Stand-alone single-family home
    House,
    /// Single-room unit with a combined living space
    Studio,
    /// Top-floor luxury unit
    Penthouse,
    /// Detached luxury home, usually gated
    Villa,
    /// Undeveloped plot
    Land,
}

impl PropertyType {
    /// Human-readable label for menus and listing cards.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Apartment => "Apartment",
            Self::House => "House",
            Self::Studio => "Studio",
            Self::Penthouse => "Penthouse",
            Self::Villa => "Villa",
            Self::Land => "Land",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Apartment,
            Self::House,
            Self::Studio,
            Self::Penthouse,
            Self::Villa,
            Self::Land,
        ]
    }
}

/// Whether a listing is offered for sale or for rent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingStatus {
    /// Listed for purchase; `price` is the asking price.
    ForSale,
    /// Listed for rent; `price` is the monthly rate.
    ForRent,
}

impl ListingStatus {
    /// Human-readable label for menus and listing cards.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ForSale => "For sale",
            Self::ForRent => "For rent",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::ForSale, Self::ForRent]
    }
}

/// A WGS84 point locating a listing on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from decimal degrees.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `true` when the point lies inside the WGS84 domain
    /// (latitude -90..=90, longitude -180..=180).
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// A real-estate agent attached to one or more listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Roster identifier.
    pub id: AgentId,
    /// Full display name.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
    /// Contact email address.
    pub email: String,
    /// Average review rating on a 0-5 scale.
    pub rating: f64,
    /// Number of listings this agent currently represents.
    pub properties_count: u32,
    /// Years of experience.
    pub experience_years: u32,
    /// Short professional bio shown on the listing detail screen.
    pub bio: String,
}

/// A property listing as it appears in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Catalog identifier, stable across sessions.
    pub id: ListingId,
    /// Short marketing title.
    pub title: String,
    /// Asking price (sale) or monthly rate (rent), in rubles.
    pub price: f64,
    /// Street address.
    pub address: String,
    /// City name.
    pub city: String,
    /// Number of rooms; 0 for studios.
    pub rooms: u32,
    /// Number of bathrooms.
    pub bathrooms: u32,
    /// Living area in square meters.
    pub area: f64,
    /// Floor the unit is on; 0 means the listing is a whole building.
    pub floor: u32,
    /// Total floors in the building.
    pub total_floors: u32,
    /// Year of construction.
    pub year_built: u16,
    /// The kind of dwelling.
    pub property_type: PropertyType,
    /// Whether it is for sale or for rent.
    pub status: ListingStatus,
    /// Map location.
    pub coordinate: Coordinate,
    /// Image references, display-only.
    pub images: Vec<String>,
    /// Marketing description shown on the detail screen.
    pub description: String,
    /// Feature tags ("Parking", "Concierge", ...).
    pub features: Vec<String>,
    /// Listing agent, embedded so a card renders without a roster lookup.
    pub agent: Agent,
    /// `true` for recently added listings; drives the NEW badge and sort.
    pub is_new: bool,
    /// `true` for listings promoted on the home screen.
    pub is_featured: bool,
    /// Average review rating on a 0-5 scale.
    pub rating: f64,
    /// View counter from the listing portal.
    pub views: u32,
}

impl Property {
    /// Price divided by living area, in rubles per square meter.
    ///
    /// Always derived, never stored. Returns `0.0` for listings without a
    /// positive area.
    #[must_use]
    pub fn price_per_meter(&self) -> f64 {
        if self.area > 0.0 {
            self.price / self.area
        } else {
            0.0
        }
    }
}
