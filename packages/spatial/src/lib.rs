#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! In-memory spatial index for listing pins.
//!
//! Builds an R-tree over the catalog's coordinates at startup and answers
//! the two map-screen questions: which listings fall inside a viewport, and
//! which listings sit closest to a point. Distances are haversine meters;
//! the R-tree itself works in plain WGS84 degrees.

use estate_map_listing_models::{Coordinate, ListingId, Property};
use geo::{Distance, Haversine, Point};
use rstar::{AABB, PointDistance, RTree, RTreeObject};
use serde::{Deserialize, Serialize};

/// A geographic viewport in WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    /// Western longitude boundary.
    pub west: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Northern latitude boundary.
    pub north: f64,
}

impl MapBounds {
    /// Creates a new viewport from the given boundaries.
    #[must_use]
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// `true` when the coordinate falls inside the viewport, edges
    /// included.
    #[must_use]
    pub const fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.longitude >= self.west
            && coordinate.longitude <= self.east
            && coordinate.latitude >= self.south
            && coordinate.latitude <= self.north
    }
}

/// A listing coordinate stored in the R-tree with its catalog position.
struct ListingPin {
    id: ListingId,
    /// Position in catalog order; viewport hits sort by this.
    rank: usize,
    /// `[longitude, latitude]`.
    position: [f64; 2],
}

impl RTreeObject for ListingPin {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for ListingPin {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        dx.mul_add(dx, dy * dy)
    }
}

/// One result from a proximity query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestHit {
    /// The listing at this pin.
    pub id: ListingId,
    /// Great-circle distance from the query origin, in meters.
    pub distance_meters: f64,
}

/// Pre-built spatial index over the catalog's listing pins.
///
/// Constructed once and shared across all consumers.
pub struct ListingIndex {
    tree: RTree<ListingPin>,
}

impl ListingIndex {
    /// Builds the index from the catalog's listings.
    ///
    /// Listings with an out-of-domain coordinate are skipped with a
    /// warning; everything else is bulk-loaded.
    #[must_use]
    pub fn build(properties: &[Property]) -> Self {
        let mut pins = Vec::with_capacity(properties.len());
        for (rank, property) in properties.iter().enumerate() {
            if !property.coordinate.is_valid() {
                log::warn!(
                    "listing {} has an out-of-domain coordinate; skipping",
                    property.id
                );
                continue;
            }
            pins.push(ListingPin {
                id: property.id,
                rank,
                position: [
                    property.coordinate.longitude,
                    property.coordinate.latitude,
                ],
            });
        }
        log::info!("Loaded {} listing pins into spatial index", pins.len());

        Self {
            tree: RTree::bulk_load(pins),
        }
    }

    /// Number of pins in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// `true` when the index holds no pins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Ids of the listings whose pins fall inside `bounds`, in catalog
    /// order.
    #[must_use]
    pub fn within(&self, bounds: &MapBounds) -> Vec<ListingId> {
        let envelope =
            AABB::from_corners([bounds.west, bounds.south], [bounds.east, bounds.north]);
        let mut hits: Vec<&ListingPin> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .collect();
        hits.sort_by_key(|pin| pin.rank);
        hits.into_iter().map(|pin| pin.id).collect()
    }

    /// The up-to-`limit` listings closest to `origin`, nearest first.
    ///
    /// The R-tree walks candidates in degree space; results are re-ranked
    /// by haversine meters so anisotropy at high latitudes cannot reorder
    /// them.
    #[must_use]
    pub fn nearest(&self, origin: Coordinate, limit: usize) -> Vec<NearestHit> {
        if limit == 0 {
            return Vec::new();
        }
        let mut hits: Vec<NearestHit> = self
            .tree
            .nearest_neighbor_iter(&[origin.longitude, origin.latitude])
            .map(|pin| NearestHit {
                id: pin.id,
                distance_meters: haversine_meters(
                    origin,
                    Coordinate::new(pin.position[1], pin.position[0]),
                ),
            })
            .collect();
        hits.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
        hits.truncate(limit);
        hits
    }

    /// Smallest viewport containing every pin, or `None` for an empty
    /// index. Feeds the map's fit-all-listings zoom.
    #[must_use]
    pub fn bounds_of(&self) -> Option<MapBounds> {
        let mut pins = self.tree.iter();
        let first = pins.next()?;
        let mut bounds = MapBounds::new(
            first.position[0],
            first.position[1],
            first.position[0],
            first.position[1],
        );
        for pin in pins {
            bounds.west = bounds.west.min(pin.position[0]);
            bounds.east = bounds.east.max(pin.position[0]);
            bounds.south = bounds.south.min(pin.position[1]);
            bounds.north = bounds.north.max(pin.position[1]);
        }
        Some(bounds)
    }
}

/// Great-circle distance between two coordinates, in meters.
#[must_use]
pub fn haversine_meters(from: Coordinate, to: Coordinate) -> f64 {
    Haversine.distance(
        Point::new(from.longitude, from.latitude),
        Point::new(to.longitude, to.latitude),
    )
}

#[cfg(test)]
mod tests {
    use estate_map_catalog::Catalog;

    use super::*;

    fn seed_index() -> ListingIndex {
        ListingIndex::build(Catalog::seed().properties())
    }

    #[test]
    fn build_indexes_every_seed_listing() {
        let index = seed_index();
        assert_eq!(index.len(), 8);
        assert!(!index.is_empty());
    }

    #[test]
    fn out_of_domain_coordinates_are_skipped() {
        let mut properties = Catalog::seed().properties().to_vec();
        properties[0].coordinate = Coordinate::new(123.0, 37.0);
        let index = ListingIndex::build(&properties);
        assert_eq!(index.len(), 7);
    }

    #[test]
    fn within_returns_viewport_hits_in_catalog_order() {
        let index = seed_index();
        let central_moscow = MapBounds::new(37.55, 55.70, 37.65, 55.80);
        let ids: Vec<u32> = index
            .within(&central_moscow)
            .into_iter()
            .map(|id| id.0)
            .collect();
        assert_eq!(ids, [1, 2, 8]);
    }

    #[test]
    fn within_an_empty_viewport_finds_nothing() {
        let index = seed_index();
        let pacific = MapBounds::new(-140.0, 10.0, -130.0, 20.0);
        assert!(index.within(&pacific).is_empty());
    }

    #[test]
    fn nearest_ranks_by_meters_ascending() {
        let index = seed_index();
        let red_square = Coordinate::new(55.7539, 37.6208);

        let hits = index.nearest(red_square, 3);
        let ids: Vec<u32> = hits.iter().map(|hit| hit.id.0).collect();
        assert_eq!(ids, [1, 8, 2]);
        assert!(hits[0].distance_meters < hits[1].distance_meters);
        assert!(hits[1].distance_meters < hits[2].distance_meters);
        assert!(hits[0].distance_meters > 0.0);
    }

    #[test]
    fn nearest_limit_bounds_are_respected() {
        let index = seed_index();
        let origin = Coordinate::new(55.7539, 37.6208);

        assert!(index.nearest(origin, 0).is_empty());
        assert_eq!(index.nearest(origin, 100).len(), 8);
    }

    #[test]
    fn bounds_of_fits_every_pin() {
        let index = seed_index();
        let bounds = index.bounds_of().unwrap();
        assert!((bounds.west - 37.2667).abs() < 1e-9);
        assert!((bounds.east - 37.6850).abs() < 1e-9);
        assert!((bounds.south - 55.6667).abs() < 1e-9);
        assert!((bounds.north - 55.7950).abs() < 1e-9);

        for property in Catalog::seed().properties() {
            assert!(bounds.contains(property.coordinate));
        }

        assert!(ListingIndex::build(&[]).bounds_of().is_none());
    }

    #[test]
    fn haversine_distances_look_like_moscow() {
        let tverskaya = Coordinate::new(55.7558, 37.6173);
        let presnenskaya = Coordinate::new(55.7497, 37.5386);

        assert!((haversine_meters(tverskaya, tverskaya) - 0.0).abs() < f64::EPSILON);

        let crosstown = haversine_meters(tverskaya, presnenskaya);
        assert!(
            (4_000.0..7_000.0).contains(&crosstown),
            "unexpected crosstown distance {crosstown}"
        );
    }
}
