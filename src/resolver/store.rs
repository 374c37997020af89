use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use serde_json::Value;

use super::{Entity, Kind};

struct CollectionEntry {
  values: Vec<Value>,
  fetched_at: Instant,
}

struct ItemEntry {
  value: Value,
  fetched_at: Instant,
}

/// Keyed in-memory cache shared by the fetcher and the item resolver.
///
/// One map holds every collection: entities are stored as JSON values so
/// a single entry type serves both kinds, and typed accessors deserialize
/// on the way out. A second map remembers point-fetched items under
/// (kind, id). Mutexes serialize access because fetches complete on
/// spawned tasks; no guard is held across an await.
#[derive(Default)]
pub(super) struct CollectionStore {
  collections: Mutex<HashMap<Kind, CollectionEntry>>,
  items: Mutex<HashMap<(Kind, String), ItemEntry>>,
}

impl CollectionStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// The cached sequence for `T`'s kind, if it is younger than
  /// `stale_after`. Stale and absent entries both come back as `None`.
  pub fn fresh_collection<T: Entity>(&self, stale_after: Duration) -> Option<Vec<T>> {
    let map = self
      .collections
      .lock()
      .unwrap_or_else(PoisonError::into_inner);
    let entry = map.get(&T::kind())?;
    if entry.fetched_at.elapsed() > stale_after {
      return None;
    }

    Some(
      entry
        .values
        .iter()
        .filter_map(|v| serde_json::from_value(v.clone()).ok())
        .collect(),
    )
  }

  /// Scan the fresh cached sequence for the first entity whose
  /// normalized id equals `id`. A stale or absent cache yields no
  /// candidates.
  pub fn find_in_fresh_collection<T: Entity>(
    &self,
    id: &str,
    stale_after: Duration,
  ) -> Option<T> {
    let map = self
      .collections
      .lock()
      .unwrap_or_else(PoisonError::into_inner);
    let entry = map.get(&T::kind())?;
    if entry.fetched_at.elapsed() > stale_after {
      return None;
    }

    entry
      .values
      .iter()
      .filter_map(|v| serde_json::from_value::<T>(v.clone()).ok())
      .find(|e| e.item_id() == id)
  }

  /// Replace the cached sequence for `T`'s kind with a freshly fetched
  /// one. The entry is swapped whole, never merged.
  pub fn put_collection<T: Entity>(&self, entities: &[T]) {
    let values = entities
      .iter()
      .filter_map(|e| serde_json::to_value(e).ok())
      .collect();

    let mut map = self
      .collections
      .lock()
      .unwrap_or_else(PoisonError::into_inner);
    map.insert(
      T::kind(),
      CollectionEntry {
        values,
        fetched_at: Instant::now(),
      },
    );
  }

  /// A point-fetched item remembered under (kind, id), if still fresh.
  pub fn fresh_item<T: Entity>(&self, id: &str, stale_after: Duration) -> Option<T> {
    let map = self.items.lock().unwrap_or_else(PoisonError::into_inner);
    let entry = map.get(&(T::kind(), id.to_string()))?;
    if entry.fetched_at.elapsed() > stale_after {
      return None;
    }

    serde_json::from_value(entry.value.clone()).ok()
  }

  /// Remember a point-fetched item.
  pub fn put_item<T: Entity>(&self, id: &str, entity: &T) {
    let Ok(value) = serde_json::to_value(entity) else {
      return;
    };

    let mut map = self.items.lock().unwrap_or_else(PoisonError::into_inner);
    map.insert(
      (T::kind(), id.to_string()),
      ItemEntry {
        value,
        fetched_at: Instant::now(),
      },
    );
  }
}
