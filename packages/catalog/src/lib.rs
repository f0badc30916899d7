#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Immutable in-memory listing catalog.
//!
//! The catalog is the single source of truth for listings and agents. It is
//! built once at startup (normally from the built-in seed data) and never
//! mutated afterwards; every other package reads from it by reference or by
//! [`ListingId`].

use estate_map_listing_models::{Agent, AgentId, ListingId, ListingStatus, Property};
use serde::Serialize;

mod seed;

/// The full set of listings and the agent roster, fixed for the lifetime of
/// the process.
#[derive(Debug, Clone)]
pub struct Catalog {
    agents: Vec<Agent>,
    properties: Vec<Property>,
}

impl Catalog {
    /// Builds a catalog from explicit data. Listings keep the order given
    /// here; that order is what "catalog order" means everywhere else.
    #[must_use]
    pub const fn new(agents: Vec<Agent>, properties: Vec<Property>) -> Self {
        Self { agents, properties }
    }

    /// Builds the catalog from the built-in seed data: eight Moscow-region
    /// listings represented by three agents.
    #[must_use]
    pub fn seed() -> Self {
        let (agents, properties) = seed::load();
        Self::new(agents, properties)
    }

    /// All listings in catalog order.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Looks up a single listing by id.
    #[must_use]
    pub fn get(&self, id: ListingId) -> Option<&Property> {
        self.properties.iter().find(|property| property.id == id)
    }

    /// The agent roster.
    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Looks up a single agent by id.
    #[must_use]
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|agent| agent.id == id)
    }

    /// Distinct city names, sorted alphabetically.
    #[must_use]
    pub fn cities(&self) -> Vec<String> {
        let mut cities: Vec<String> = self
            .properties
            .iter()
            .map(|property| property.city.clone())
            .collect();
        cities.sort();
        cities.dedup();
        cities
    }

    /// Listings promoted on the home screen, in catalog order.
    #[must_use]
    pub fn featured(&self) -> Vec<&Property> {
        self.properties
            .iter()
            .filter(|property| property.is_featured)
            .collect()
    }

    /// Number of listings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// `true` when the catalog holds no listings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Aggregates shown on the home screen header.
    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        let total_listings = self.properties.len();
        let for_rent = self
            .properties
            .iter()
            .filter(|property| property.status == ListingStatus::ForRent)
            .count();

        let mut min_price = f64::INFINITY;
        let mut max_price = f64::NEG_INFINITY;
        let mut meter_sum = 0.0;
        let mut meter_count = 0.0f64;
        for property in &self.properties {
            min_price = min_price.min(property.price);
            max_price = max_price.max(property.price);
            if property.area > 0.0 {
                meter_sum += property.price_per_meter();
                meter_count += 1.0;
            }
        }

        CatalogStats {
            total_listings,
            for_sale: total_listings - for_rent,
            for_rent,
            min_price: if total_listings == 0 { 0.0 } else { min_price },
            max_price: if total_listings == 0 { 0.0 } else { max_price },
            avg_price_per_meter: if meter_count > 0.0 {
                meter_sum / meter_count
            } else {
                0.0
            },
        }
    }
}

/// Catalog-wide aggregates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    /// Number of listings in the catalog.
    pub total_listings: usize,
    /// Listings offered for sale.
    pub for_sale: usize,
    /// Listings offered for rent.
    pub for_rent: usize,
    /// Lowest listing price, in rubles.
    pub min_price: f64,
    /// Highest listing price, in rubles.
    pub max_price: f64,
    /// Mean price per square meter across listings with a positive area.
    pub avg_price_per_meter: f64,
}
