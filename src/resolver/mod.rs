//! The collection resolver: read-through caching for remote collections,
//! identifier-based item resolution, and list projection.
//!
//! Three cooperating parts:
//! - [`CollectionResolver::collection`] serves a cached collection while
//!   it is fresh and replaces it wholesale once it goes stale.
//! - [`CollectionResolver::item`] scans the fresh collection for a match
//!   before falling back to a point fetch of the single entity.
//! - [`project`] filters and pages an already-loaded collection for
//!   display, with no side effects.

mod projection;
mod resolver;
mod store;

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};

pub use projection::{project, Projected, Searchable};
pub use resolver::{CollectionResolver, Remote};

/// Collection discriminator. Its string form is both the cache key and
/// the endpoint path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
  Users,
  Posts,
}

impl Kind {
  pub fn as_str(self) -> &'static str {
    match self {
      Kind::Users => "users",
      Kind::Posts => "posts",
    }
  }
}

impl fmt::Display for Kind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Trait for entities that live in a remote collection.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
  /// The collection this entity belongs to.
  fn kind() -> Kind;

  /// Stable identifier in normalized (string) form. Identifiers may
  /// arrive numeric or string-typed depending on origin, so comparisons
  /// always go through this form.
  fn item_id(&self) -> String;
}
