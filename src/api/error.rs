use thiserror::Error;

use crate::resolver::Kind;

/// The single failure mode of the data layer: a fetch that did not
/// produce the requested data.
///
/// Carries which collection (and item, for point fetches) was being
/// resolved. The upstream detail is kept as text so the error stays
/// cloneable through query state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
  /// The full-collection endpoint failed.
  #[error("failed to fetch {kind}: {reason}")]
  Collection { kind: Kind, reason: String },

  /// The single-item endpoint failed.
  #[error("failed to fetch {kind}/{id}: {reason}")]
  Item {
    kind: Kind,
    id: String,
    reason: String,
  },

  /// An item lookup with an identifier that normalizes to the empty
  /// string. Callers are expected to guard against this before asking.
  #[error("empty id for {kind} lookup")]
  EmptyId { kind: Kind },
}

impl FetchError {
  pub fn collection(kind: Kind, reason: impl ToString) -> Self {
    Self::Collection {
      kind,
      reason: reason.to_string(),
    }
  }

  pub fn item(kind: Kind, id: impl Into<String>, reason: impl ToString) -> Self {
    Self::Item {
      kind,
      id: id.into(),
      reason: reason.to_string(),
    }
  }

  /// The collection the failed fetch was addressed to.
  pub fn kind(&self) -> Kind {
    match self {
      Self::Collection { kind, .. } | Self::Item { kind, .. } | Self::EmptyId { kind } => *kind,
    }
  }
}
