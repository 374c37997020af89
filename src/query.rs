//! Poll-based async fetch state for views.
//!
//! A `Query<T>` owns the fetching closure for one piece of remote data
//! and tracks its lifecycle. Views call `fetch()` once, `poll()` on
//! every tick, and render from `state()`:
//!
//! ```ignore
//! let resolver = resolver.clone();
//! let mut query = Query::new(move || {
//!     let resolver = resolver.clone();
//!     async move { resolver.posts().await }
//! });
//! query.fetch();
//!
//! // in tick(): if query.poll() { /* state changed */ }
//! // in render():
//! match query.state() {
//!     QueryState::Loading => { /* spinner */ }
//!     QueryState::Ready(posts) => { /* rows */ }
//!     QueryState::Failed(e) => { /* error text */ }
//!     QueryState::Idle => {}
//! }
//! ```
//!
//! Freshness is not tracked here; the resolver underneath decides
//! whether a fetch touches the network or the cache.

use std::future::Future;
use std::pin::Pin;
use tokio::sync::oneshot;

use crate::api::FetchError;

/// The state of a query
#[derive(Debug)]
pub enum QueryState<T> {
  /// Not started
  Idle,
  /// A fetch is in flight
  Loading,
  /// The last fetch succeeded
  Ready(T),
  /// The last fetch failed
  Failed(FetchError),
}

type BoxFuture<T> = Pin<Box<dyn Future<Output = Result<T, FetchError>> + Send>>;
type FetcherFn<T> = Box<dyn Fn() -> BoxFuture<T> + Send + Sync>;

/// Async fetch with poll-driven state transitions.
pub struct Query<T> {
  state: QueryState<T>,
  fetcher: FetcherFn<T>,
  rx: Option<oneshot::Receiver<Result<T, FetchError>>>,
}

impl<T: Send + 'static> Query<T> {
  /// Create a query from a fetcher closure. The closure is re-invoked
  /// on every `fetch()`/`refetch()`.
  pub fn new<F, Fut>(fetcher: F) -> Self
  where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
  {
    Self {
      state: QueryState::Idle,
      fetcher: Box::new(move || Box::pin(fetcher())),
      rx: None,
    }
  }

  pub fn state(&self) -> &QueryState<T> {
    &self.state
  }

  /// The data, if the last fetch succeeded.
  pub fn data(&self) -> Option<&T> {
    match &self.state {
      QueryState::Ready(data) => Some(data),
      _ => None,
    }
  }

  pub fn is_loading(&self) -> bool {
    matches!(self.state, QueryState::Loading)
  }

  /// The error, if the last fetch failed.
  pub fn error(&self) -> Option<&FetchError> {
    match &self.state {
      QueryState::Failed(e) => Some(e),
      _ => None,
    }
  }

  /// Start fetching unless a fetch is already in flight.
  pub fn fetch(&mut self) {
    if self.is_loading() {
      return;
    }
    self.start_fetch();
  }

  /// Force a new fetch. An in-flight result is discarded when it lands.
  pub fn refetch(&mut self) {
    self.rx = None;
    self.start_fetch();
  }

  /// Poll the in-flight fetch. Returns `true` when the state changed.
  pub fn poll(&mut self) -> bool {
    let Some(rx) = &mut self.rx else {
      return false;
    };

    match rx.try_recv() {
      Ok(Ok(data)) => {
        self.state = QueryState::Ready(data);
        self.rx = None;
        true
      }
      Ok(Err(error)) => {
        tracing::warn!(kind = %error.kind(), %error, "fetch failed");
        self.state = QueryState::Failed(error);
        self.rx = None;
        true
      }
      Err(oneshot::error::TryRecvError::Empty) => false,
      Err(oneshot::error::TryRecvError::Closed) => {
        // The task died without reporting; back to idle so the caller
        // can fetch again.
        self.state = QueryState::Idle;
        self.rx = None;
        true
      }
    }
  }

  fn start_fetch(&mut self) {
    let (tx, rx) = oneshot::channel();
    self.rx = Some(rx);
    self.state = QueryState::Loading;

    let future = (self.fetcher)();
    tokio::spawn(async move {
      let result = future.await;
      // The receiver may have been replaced by a refetch
      let _ = tx.send(result);
    });
  }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Query<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Query")
      .field("state", &self.state)
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use crate::resolver::Kind;

  use super::*;

  #[tokio::test]
  async fn test_query_success() {
    let mut query = Query::new(|| async { Ok(vec![1, 2, 3]) });

    assert!(matches!(query.state(), QueryState::Idle));

    query.fetch();
    assert!(query.is_loading());

    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(query.poll());
    assert_eq!(query.data(), Some(&vec![1, 2, 3]));
  }

  #[tokio::test]
  async fn test_query_failure() {
    let mut query: Query<i32> =
      Query::new(|| async { Err(FetchError::collection(Kind::Posts, "boom")) });

    query.fetch();
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(query.poll());
    assert_eq!(query.error().map(FetchError::kind), Some(Kind::Posts));
  }

  #[tokio::test]
  async fn test_fetch_while_loading_is_noop() {
    let mut query = Query::new(|| async {
      tokio::time::sleep(Duration::from_millis(100)).await;
      Ok(42)
    });

    query.fetch();
    assert!(query.is_loading());

    query.fetch();
    assert!(query.is_loading());
  }

  #[tokio::test]
  async fn test_refetch_discards_pending_result() {
    let counter = std::sync::Arc::new(std::sync::atomic::AtomicU32::new(0));
    let counter_clone = counter.clone();

    let mut query = Query::new(move || {
      let counter = counter_clone.clone();
      async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst))
      }
    });

    query.fetch();
    tokio::time::sleep(Duration::from_millis(10)).await;

    query.refetch();
    tokio::time::sleep(Duration::from_millis(100)).await;

    query.poll();
    // Only the second fetch reaches the live receiver
    assert_eq!(query.data(), Some(&1));
  }
}
