use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::api::{FetchError, Post, User};

use super::store::CollectionStore;
use super::Entity;

/// How long a fetched collection stays authoritative.
const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(5 * 60);

/// Remote source of collections and items.
///
/// `ApiClient` is the production implementation; tests substitute a
/// counting mock to pin down when the resolver goes to the network.
pub trait Remote: Clone + Send + Sync + 'static {
  /// Fetch the entire remote collection for `T`'s kind.
  fn fetch_collection<T: Entity>(&self) -> impl Future<Output = Result<Vec<T>, FetchError>> + Send;

  /// Point fetch: one entity by identifier.
  fn fetch_item<T: Entity>(&self, id: &str) -> impl Future<Output = Result<T, FetchError>> + Send;
}

/// Cache-first resolution of collections and single items.
///
/// While a cached collection is younger than the staleness window it is
/// authoritative: [`collection`](Self::collection) serves it without
/// network access, and [`item`](Self::item) resolves identifiers against
/// it before falling back to a point fetch. A failed fetch is surfaced
/// as-is; expired data is never silently substituted.
#[derive(Clone)]
pub struct CollectionResolver<R: Remote> {
  remote: R,
  store: Arc<CollectionStore>,
  stale_after: Duration,
}

impl<R: Remote> CollectionResolver<R> {
  pub fn new(remote: R) -> Self {
    Self {
      remote,
      store: Arc::new(CollectionStore::new()),
      stale_after: DEFAULT_STALE_AFTER,
    }
  }

  /// Set the staleness window for cached data.
  pub fn with_stale_after(mut self, window: Duration) -> Self {
    self.stale_after = window;
    self
  }

  /// The full collection for `T`, from cache while fresh.
  ///
  /// A stale entry triggers one network fetch that replaces the cached
  /// sequence wholesale. Concurrent callers racing a stale cache may
  /// each fetch; last write wins.
  pub async fn collection<T: Entity>(&self) -> Result<Vec<T>, FetchError> {
    let kind = T::kind();

    if let Some(cached) = self.store.fresh_collection::<T>(self.stale_after) {
      debug!(%kind, len = cached.len(), "collection served from cache");
      return Ok(cached);
    }

    let fetched = self.remote.fetch_collection::<T>().await?;
    self.store.put_collection(&fetched);
    info!(%kind, len = fetched.len(), "collection fetched");
    Ok(fetched)
  }

  /// A single entity by identifier.
  ///
  /// Identifiers are normalized to trimmed string form, so numeric and
  /// string ids address the same entity. Resolution order: first match
  /// in the fresh collection cache, then the item cache, then a point
  /// fetch. A stale collection cache yields no candidates and is NOT
  /// refreshed here; the miss goes straight to the single-item endpoint.
  pub async fn item<T: Entity>(&self, id: impl Display) -> Result<T, FetchError> {
    let kind = T::kind();
    let id = id.to_string();
    let id = id.trim();
    if id.is_empty() {
      return Err(FetchError::EmptyId { kind });
    }

    if let Some(hit) = self.store.find_in_fresh_collection::<T>(id, self.stale_after) {
      debug!(%kind, id, "item resolved from collection cache");
      return Ok(hit);
    }

    if let Some(hit) = self.store.fresh_item::<T>(id, self.stale_after) {
      debug!(%kind, id, "item served from item cache");
      return Ok(hit);
    }

    let fetched = self.remote.fetch_item::<T>(id).await?;
    self.store.put_item(id, &fetched);
    debug!(%kind, id, "item point-fetched");
    Ok(fetched)
  }

  pub async fn users(&self) -> Result<Vec<User>, FetchError> {
    self.collection().await
  }

  pub async fn posts(&self) -> Result<Vec<Post>, FetchError> {
    self.collection().await
  }

  pub async fn user(&self, id: impl Display + Send) -> Result<User, FetchError> {
    self.item(id).await
  }

  pub async fn post(&self, id: impl Display + Send) -> Result<Post, FetchError> {
    self.item(id).await
  }
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
  use std::sync::Mutex;

  use serde_json::{json, Value};

  use crate::resolver::Kind;

  use super::*;

  /// Remote backed by a JSON array, counting every network-shaped call.
  #[derive(Clone, Default)]
  struct MockRemote {
    inner: Arc<MockInner>,
  }

  #[derive(Default)]
  struct MockInner {
    collection: Mutex<Value>,
    collection_calls: AtomicUsize,
    item_calls: AtomicUsize,
    fail: AtomicBool,
  }

  impl MockRemote {
    fn with_data(collection: Value) -> Self {
      let mock = Self::default();
      mock.set_collection(collection);
      mock
    }

    fn set_collection(&self, collection: Value) {
      *self.inner.collection.lock().unwrap() = collection;
    }

    fn set_fail(&self, fail: bool) {
      self.inner.fail.store(fail, Ordering::SeqCst);
    }

    fn collection_calls(&self) -> usize {
      self.inner.collection_calls.load(Ordering::SeqCst)
    }

    fn item_calls(&self) -> usize {
      self.inner.item_calls.load(Ordering::SeqCst)
    }
  }

  impl Remote for MockRemote {
    fn fetch_collection<T: Entity>(
      &self,
    ) -> impl Future<Output = Result<Vec<T>, FetchError>> + Send {
      let inner = self.inner.clone();
      async move {
        inner.collection_calls.fetch_add(1, Ordering::SeqCst);
        if inner.fail.load(Ordering::SeqCst) {
          return Err(FetchError::collection(T::kind(), "remote down"));
        }
        let data = inner.collection.lock().unwrap().clone();
        Ok(serde_json::from_value(data).expect("mock collection"))
      }
    }

    fn fetch_item<T: Entity>(
      &self,
      id: &str,
    ) -> impl Future<Output = Result<T, FetchError>> + Send {
      let inner = self.inner.clone();
      let id = id.to_string();
      async move {
        inner.item_calls.fetch_add(1, Ordering::SeqCst);
        if inner.fail.load(Ordering::SeqCst) {
          return Err(FetchError::item(T::kind(), id, "remote down"));
        }
        let data = inner.collection.lock().unwrap().clone();
        let found = data
          .as_array()
          .and_then(|arr| {
            arr
              .iter()
              .find(|v| v.get("id").map(|i| i.to_string()) == Some(id.clone()))
          })
          .cloned();
        match found {
          Some(v) => Ok(serde_json::from_value(v).expect("mock item")),
          None => Err(FetchError::item(T::kind(), id, "server returned 404 Not Found")),
        }
      }
    }
  }

  fn post(id: i64, title: &str) -> Value {
    json!({"id": id, "userId": 1, "title": title, "body": format!("body of {}", title)})
  }

  fn posts(n: i64) -> Value {
    Value::Array((1..=n).map(|i| post(i, &format!("post {}", i))).collect())
  }

  fn user(id: i64, name: &str) -> Value {
    json!({
      "id": id,
      "name": name,
      "username": name.to_lowercase(),
      "email": format!("{}@example.com", name.to_lowercase()),
      "phone": "1-770-736-8031",
      "website": "example.org",
      "address": {
        "street": "Kulas Light",
        "suite": "Apt. 556",
        "city": "Gwenborough",
        "zipcode": "92998-3874",
        "geo": {"lat": "-37.3159", "lng": "81.1496"}
      },
      "company": {
        "name": "Romaguera-Crona",
        "catchPhrase": "Multi-layered client-server neural-net",
        "bs": "harness real-time e-markets"
      }
    })
  }

  #[tokio::test]
  async fn test_fresh_collection_fetches_once() {
    let remote = MockRemote::with_data(posts(3));
    let resolver = CollectionResolver::new(remote.clone());

    let first = resolver.posts().await.unwrap();
    let second = resolver.posts().await.unwrap();

    assert_eq!(remote.collection_calls(), 1);
    assert_eq!(first.len(), 3);
    assert_eq!(
      first.iter().map(|p| p.id).collect::<Vec<_>>(),
      second.iter().map(|p| p.id).collect::<Vec<_>>()
    );
  }

  #[tokio::test]
  async fn test_stale_collection_refetches_and_replaces() {
    let remote = MockRemote::with_data(posts(3));
    let resolver = CollectionResolver::new(remote.clone()).with_stale_after(Duration::ZERO);

    let first = resolver.posts().await.unwrap();
    assert_eq!(first.len(), 3);

    remote.set_collection(posts(5));
    let second = resolver.posts().await.unwrap();

    assert_eq!(remote.collection_calls(), 2);
    assert_eq!(second.len(), 5, "cached sequence must be fully replaced");
  }

  #[tokio::test]
  async fn test_fetch_failure_is_not_masked_by_expired_cache() {
    let remote = MockRemote::with_data(posts(3));
    let resolver = CollectionResolver::new(remote.clone()).with_stale_after(Duration::ZERO);

    resolver.posts().await.unwrap();
    remote.set_fail(true);

    let result = resolver.posts().await;
    match result {
      Err(FetchError::Collection { kind, .. }) => assert_eq!(kind, Kind::Posts),
      other => panic!("expected collection error, got {:?}", other.map(|v| v.len())),
    }
  }

  #[tokio::test]
  async fn test_item_short_circuits_on_fresh_cache() {
    let remote = MockRemote::with_data(posts(10));
    let resolver = CollectionResolver::new(remote.clone());

    resolver.posts().await.unwrap();
    let hit = resolver.post(2).await.unwrap();

    assert_eq!(hit.title, "post 2");
    assert_eq!(remote.item_calls(), 0, "fresh cache must answer without a point fetch");
  }

  #[tokio::test]
  async fn test_item_point_fetches_on_empty_cache() {
    let remote = MockRemote::with_data(json!([user(3, "Clementine")]));
    let resolver = CollectionResolver::new(remote.clone());

    let fetched = resolver.user(3).await.unwrap();

    assert_eq!(fetched.id, 3);
    assert_eq!(remote.item_calls(), 1);
    assert_eq!(remote.collection_calls(), 0);
  }

  #[tokio::test]
  async fn test_item_treats_stale_cache_as_absent() {
    let remote = MockRemote::with_data(posts(3));
    let resolver = CollectionResolver::new(remote.clone()).with_stale_after(Duration::ZERO);

    resolver.posts().await.unwrap();
    resolver.post(1).await.unwrap();

    // The stale list is neither scanned nor refreshed; the lookup goes
    // straight to the single-item endpoint.
    assert_eq!(remote.item_calls(), 1);
    assert_eq!(remote.collection_calls(), 1);
  }

  #[tokio::test]
  async fn test_item_miss_surfaces_point_fetch_failure() {
    let remote = MockRemote::with_data(posts(3));
    let resolver = CollectionResolver::new(remote.clone());

    resolver.posts().await.unwrap();
    let result = resolver.post(99).await;

    assert_eq!(remote.item_calls(), 1);
    match result {
      Err(FetchError::Item { kind, id, .. }) => {
        assert_eq!(kind, Kind::Posts);
        assert_eq!(id, "99");
      }
      other => panic!("expected item error, got {:?}", other.map(|p| p.id)),
    }
  }

  #[tokio::test]
  async fn test_numeric_and_string_ids_resolve_alike() {
    let remote = MockRemote::with_data(posts(10));
    let resolver = CollectionResolver::new(remote.clone());

    resolver.posts().await.unwrap();
    let by_number = resolver.post(5).await.unwrap();
    let by_string = resolver.post("5").await.unwrap();
    let padded = resolver.post(" 5 ").await.unwrap();

    assert_eq!(by_number.id, by_string.id);
    assert_eq!(by_number.id, padded.id);
    assert_eq!(remote.item_calls(), 0);
  }

  #[tokio::test]
  async fn test_blank_id_is_guarded() {
    let remote = MockRemote::with_data(posts(3));
    let resolver = CollectionResolver::new(remote.clone());

    let result = resolver.post("   ").await;

    match result {
      Err(FetchError::EmptyId { kind }) => assert_eq!(kind, Kind::Posts),
      other => panic!("expected empty-id guard, got {:?}", other.map(|p| p.id)),
    }
    assert_eq!(remote.item_calls(), 0);
    assert_eq!(remote.collection_calls(), 0);
  }

  #[tokio::test]
  async fn test_point_fetched_item_is_remembered() {
    let remote = MockRemote::with_data(posts(10));
    let resolver = CollectionResolver::new(remote.clone());

    resolver.post(7).await.unwrap();
    resolver.post(7).await.unwrap();

    assert_eq!(remote.item_calls(), 1);
  }

  #[tokio::test]
  async fn test_duplicate_ids_resolve_to_lowest_index() {
    let remote = MockRemote::with_data(json!([post(1, "first"), post(1, "second")]));
    let resolver = CollectionResolver::new(remote.clone());

    resolver.posts().await.unwrap();
    let hit = resolver.post(1).await.unwrap();

    assert_eq!(hit.title, "first");
  }
}
