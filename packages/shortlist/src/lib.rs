#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Favorites, compare set, view history and the onboarding flag.
//!
//! [`Shortlists`] owns the per-user state around the catalog. It persists
//! write-through into an injected [`KeyValueStore`], so every completed
//! mutation is already durable when it returns; there is no save step to
//! forget. Only listing ids are stored, never listing snapshots, because
//! the catalog itself is immutable.

pub mod paths;
pub mod store;

use std::collections::BTreeSet;

use estate_map_listing_models::ListingId;
use log::warn;
use serde::Serialize;
use thiserror::Error;

pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};

/// Storage key for the favorites id list.
pub const FAVORITES_KEY: &str = "favorites";
/// Storage key for the compare id list.
pub const COMPARE_KEY: &str = "compareList";
/// Storage key for the view history id list.
pub const VIEW_HISTORY_KEY: &str = "viewHistory";
/// Storage key for the first-launch flag.
pub const HAS_VISITED_KEY: &str = "hasVisited";

/// Hard cap on the compare set; a full set rejects further additions
/// instead of evicting.
pub const COMPARE_CAPACITY: usize = 3;

/// Most entries the view history keeps.
pub const VIEW_HISTORY_CAPACITY: usize = 10;

/// Errors from shortlist operations.
#[derive(Debug, Error)]
pub enum ShortlistError {
    /// The compare set already holds [`COMPARE_CAPACITY`] listings.
    #[error("compare set is full: at most {capacity} listings can be compared")]
    CompareFull {
        /// The fixed capacity that was hit.
        capacity: usize,
    },

    /// The persistence collaborator failed.
    #[error("persistence error: {0}")]
    Store(#[from] StoreError),
}

/// What a membership toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The id was absent and has been added.
    Added,
    /// The id was present and has been removed.
    Removed,
}

/// Per-user state around the catalog: favorites, the compare set, the view
/// history and the onboarding flag.
///
/// All mutations persist before they commit: a write that fails leaves the
/// in-memory state exactly as it was. Loading is forgiving: missing keys
/// mean empty collections, and values that fail to parse are logged and
/// dropped rather than aborting startup.
#[derive(Debug)]
pub struct Shortlists<S: KeyValueStore> {
    store: S,
    favorites: BTreeSet<ListingId>,
    compare: BTreeSet<ListingId>,
    view_history: Vec<ListingId>,
    has_visited: bool,
}

impl<S: KeyValueStore> Shortlists<S> {
    /// Loads shortlist state from `store`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the store itself cannot be read;
    /// malformed values degrade to empty collections.
    pub fn load(store: S) -> Result<Self, ShortlistError> {
        let favorites: BTreeSet<ListingId> =
            load_id_list(&store, FAVORITES_KEY)?.into_iter().collect();

        let mut compare_ids = load_id_list(&store, COMPARE_KEY)?;
        dedup_in_order(&mut compare_ids);
        if compare_ids.len() > COMPARE_CAPACITY {
            warn!(
                "stored compare list has {} entries; keeping the first {COMPARE_CAPACITY}",
                compare_ids.len()
            );
            compare_ids.truncate(COMPARE_CAPACITY);
        }
        let compare: BTreeSet<ListingId> = compare_ids.into_iter().collect();

        let mut view_history = load_id_list(&store, VIEW_HISTORY_KEY)?;
        dedup_in_order(&mut view_history);
        view_history.truncate(VIEW_HISTORY_CAPACITY);

        let has_visited = store
            .get(HAS_VISITED_KEY)?
            .is_some_and(|value| value == "true");

        Ok(Self {
            store,
            favorites,
            compare,
            view_history,
            has_visited,
        })
    }

    /// Adds or removes a favorite. Toggling twice restores the starting
    /// state.
    ///
    /// # Errors
    ///
    /// Returns an error when the updated set cannot be persisted; the set
    /// then keeps its previous contents.
    pub fn toggle_favorite(&mut self, id: ListingId) -> Result<ToggleOutcome, ShortlistError> {
        let mut updated = self.favorites.clone();
        let outcome = if updated.remove(&id) {
            ToggleOutcome::Removed
        } else {
            updated.insert(id);
            ToggleOutcome::Added
        };
        write_json(&mut self.store, FAVORITES_KEY, &updated)?;
        self.favorites = updated;
        Ok(outcome)
    }

    /// Adds or removes a listing from the compare set.
    ///
    /// # Errors
    ///
    /// Returns [`ShortlistError::CompareFull`] when this would grow the set
    /// past [`COMPARE_CAPACITY`]; nothing is evicted. Also fails when the
    /// updated set cannot be persisted. Either way the set is left
    /// untouched.
    pub fn toggle_compare(&mut self, id: ListingId) -> Result<ToggleOutcome, ShortlistError> {
        let mut updated = self.compare.clone();
        let outcome = if updated.remove(&id) {
            ToggleOutcome::Removed
        } else {
            if updated.len() >= COMPARE_CAPACITY {
                return Err(ShortlistError::CompareFull {
                    capacity: COMPARE_CAPACITY,
                });
            }
            updated.insert(id);
            ToggleOutcome::Added
        };
        write_json(&mut self.store, COMPARE_KEY, &updated)?;
        self.compare = updated;
        Ok(outcome)
    }

    /// Records a listing view: most recent first, repeat views move the id
    /// back to the front, and the list never exceeds
    /// [`VIEW_HISTORY_CAPACITY`] entries.
    ///
    /// # Errors
    ///
    /// Returns an error when the updated history cannot be persisted; the
    /// history then keeps its previous contents.
    pub fn record_view(&mut self, id: ListingId) -> Result<(), ShortlistError> {
        let mut updated = self.view_history.clone();
        updated.retain(|seen| *seen != id);
        updated.insert(0, id);
        updated.truncate(VIEW_HISTORY_CAPACITY);
        write_json(&mut self.store, VIEW_HISTORY_KEY, &updated)?;
        self.view_history = updated;
        Ok(())
    }

    /// Marks onboarding as shown. Sticky: there is no way back to `false`.
    ///
    /// # Errors
    ///
    /// Returns an error when the flag cannot be persisted; the in-memory
    /// flag is then unchanged.
    pub fn mark_visited(&mut self) -> Result<(), ShortlistError> {
        self.store.set(HAS_VISITED_KEY, "true")?;
        self.has_visited = true;
        Ok(())
    }

    /// Whether onboarding has already been shown.
    #[must_use]
    pub const fn has_visited(&self) -> bool {
        self.has_visited
    }

    /// Whether `id` is currently a favorite.
    #[must_use]
    pub fn is_favorite(&self, id: ListingId) -> bool {
        self.favorites.contains(&id)
    }

    /// The favorite ids.
    #[must_use]
    pub const fn favorites(&self) -> &BTreeSet<ListingId> {
        &self.favorites
    }

    /// Whether `id` is currently in the compare set.
    #[must_use]
    pub fn in_compare(&self, id: ListingId) -> bool {
        self.compare.contains(&id)
    }

    /// The compare-set ids.
    #[must_use]
    pub const fn compare(&self) -> &BTreeSet<ListingId> {
        &self.compare
    }

    /// The view history, most recent first.
    #[must_use]
    pub fn view_history(&self) -> &[ListingId] {
        &self.view_history
    }
}

fn load_id_list<S: KeyValueStore>(
    store: &S,
    key: &str,
) -> Result<Vec<ListingId>, ShortlistError> {
    let Some(raw) = store.get(key)? else {
        return Ok(Vec::new());
    };
    match serde_json::from_str::<Vec<ListingId>>(&raw) {
        Ok(ids) => Ok(ids),
        Err(error) => {
            warn!("stored {key} list is corrupt ({error}); starting empty");
            Ok(Vec::new())
        }
    }
}

fn dedup_in_order(ids: &mut Vec<ListingId>) {
    let mut seen = BTreeSet::new();
    ids.retain(|id| seen.insert(*id));
}

fn write_json<S: KeyValueStore, T: Serialize>(
    store: &mut S,
    key: &str,
    value: &T,
) -> Result<(), ShortlistError> {
    let raw = serde_json::to_string(value).map_err(StoreError::Json)?;
    store.set(key, &raw)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    /// Serves seeded values but refuses every write.
    struct ReadOnlyStore {
        values: BTreeMap<String, String>,
    }

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Ok(self.values.get(key).cloned())
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("write refused")))
        }
    }

    #[test]
    fn favorite_toggle_is_an_involution() {
        let mut lists = Shortlists::load(MemoryStore::new()).unwrap();
        let id = ListingId(4);

        assert_eq!(lists.toggle_favorite(id).unwrap(), ToggleOutcome::Added);
        assert!(lists.is_favorite(id));
        assert_eq!(lists.toggle_favorite(id).unwrap(), ToggleOutcome::Removed);
        assert!(!lists.is_favorite(id));
        assert!(lists.favorites().is_empty());
    }

    #[test]
    fn state_survives_a_reload_from_the_same_store() {
        let mut store = MemoryStore::new();

        {
            let mut lists = Shortlists::load(&mut store).unwrap();
            lists.toggle_favorite(ListingId(2)).unwrap();
            lists.toggle_favorite(ListingId(6)).unwrap();
            lists.toggle_compare(ListingId(1)).unwrap();
            lists.record_view(ListingId(3)).unwrap();
            lists.record_view(ListingId(2)).unwrap();
            lists.mark_visited().unwrap();
        }

        let lists = Shortlists::load(&mut store).unwrap();
        assert!(lists.is_favorite(ListingId(2)));
        assert!(lists.is_favorite(ListingId(6)));
        assert!(lists.in_compare(ListingId(1)));
        assert_eq!(lists.view_history(), [ListingId(2), ListingId(3)]);
        assert!(lists.has_visited());
    }

    #[test]
    fn compare_set_rejects_a_fourth_listing() {
        let mut lists = Shortlists::load(MemoryStore::new()).unwrap();
        for id in 1..=3 {
            lists.toggle_compare(ListingId(id)).unwrap();
        }

        let error = lists.toggle_compare(ListingId(4)).unwrap_err();
        assert!(matches!(
            error,
            ShortlistError::CompareFull { capacity: COMPARE_CAPACITY }
        ));
        // Nothing was evicted and the rejected id was not added.
        assert_eq!(lists.compare().len(), 3);
        assert!(!lists.in_compare(ListingId(4)));

        // Removing one frees a slot.
        lists.toggle_compare(ListingId(2)).unwrap();
        assert_eq!(
            lists.toggle_compare(ListingId(4)).unwrap(),
            ToggleOutcome::Added
        );
    }

    #[test]
    fn view_history_is_mru_deduplicated_and_capped() {
        let mut lists = Shortlists::load(MemoryStore::new()).unwrap();

        lists.record_view(ListingId(1)).unwrap();
        lists.record_view(ListingId(2)).unwrap();
        lists.record_view(ListingId(3)).unwrap();
        assert_eq!(
            lists.view_history(),
            [ListingId(3), ListingId(2), ListingId(1)]
        );

        // A repeat view moves to the front without duplicating.
        lists.record_view(ListingId(1)).unwrap();
        assert_eq!(
            lists.view_history(),
            [ListingId(1), ListingId(3), ListingId(2)]
        );

        for id in 4..=14 {
            lists.record_view(ListingId(id)).unwrap();
        }
        assert_eq!(lists.view_history().len(), VIEW_HISTORY_CAPACITY);
        assert_eq!(lists.view_history()[0], ListingId(14));
        assert!(!lists.view_history().contains(&ListingId(1)));
    }

    #[test]
    fn persists_under_the_exact_storage_keys() {
        let mut store = MemoryStore::new();
        {
            let mut lists = Shortlists::load(&mut store).unwrap();
            lists.toggle_favorite(ListingId(5)).unwrap();
            lists.toggle_compare(ListingId(7)).unwrap();
            lists.record_view(ListingId(5)).unwrap();
            lists.mark_visited().unwrap();
        }

        assert_eq!(store.get("favorites").unwrap().as_deref(), Some("[5]"));
        assert_eq!(store.get("compareList").unwrap().as_deref(), Some("[7]"));
        assert_eq!(store.get("viewHistory").unwrap().as_deref(), Some("[5]"));
        assert_eq!(store.get("hasVisited").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn corrupt_values_degrade_to_empty() {
        let mut store = MemoryStore::new();
        store.set(FAVORITES_KEY, "definitely not json").unwrap();
        store.set(COMPARE_KEY, "{\"wrong\": \"shape\"}").unwrap();

        let lists = Shortlists::load(&mut store).unwrap();
        assert!(lists.favorites().is_empty());
        assert!(lists.compare().is_empty());
        assert!(!lists.has_visited());
    }

    #[test]
    fn oversized_stored_compare_list_is_trimmed() {
        let mut store = MemoryStore::new();
        store.set(COMPARE_KEY, "[4, 1, 3, 2, 8]").unwrap();

        let lists = Shortlists::load(&mut store).unwrap();
        assert_eq!(lists.compare().len(), COMPARE_CAPACITY);
        assert!(lists.in_compare(ListingId(4)));
        assert!(lists.in_compare(ListingId(1)));
        assert!(lists.in_compare(ListingId(3)));
        assert!(!lists.in_compare(ListingId(2)));
    }

    #[test]
    fn stored_duplicates_collapse_on_load() {
        let mut store = MemoryStore::new();
        store.set(VIEW_HISTORY_KEY, "[2, 2, 1, 2, 1]").unwrap();

        let lists = Shortlists::load(&mut store).unwrap();
        assert_eq!(lists.view_history(), [ListingId(2), ListingId(1)]);
    }

    #[test]
    fn failed_writes_leave_in_memory_state_unchanged() {
        let seeded = BTreeMap::from([(FAVORITES_KEY.to_string(), "[7]".to_string())]);
        let mut lists = Shortlists::load(ReadOnlyStore { values: seeded }).unwrap();
        assert!(lists.is_favorite(ListingId(7)));

        let error = lists.toggle_favorite(ListingId(7)).unwrap_err();
        assert!(matches!(error, ShortlistError::Store(_)));
        assert!(lists.is_favorite(ListingId(7)));

        assert!(lists.toggle_favorite(ListingId(2)).is_err());
        assert!(!lists.is_favorite(ListingId(2)));

        assert!(lists.toggle_compare(ListingId(3)).is_err());
        assert!(!lists.in_compare(ListingId(3)));

        assert!(lists.record_view(ListingId(4)).is_err());
        assert!(lists.view_history().is_empty());

        assert!(lists.mark_visited().is_err());
        assert!(!lists.has_visited());
    }
}
