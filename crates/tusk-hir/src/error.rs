//! Engine error types.
//!
//! Recoverable conditions (unresolved names, missing members, cancelled
//! queries) never surface here; they yield empty results instead. These
//! errors mark API contract violations by the caller.

use thiserror::Error;

/// An error raised by the engine facade or the symbol store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A document with this URI is already registered; callers must remove
    /// it first.
    #[error("document already present: {0}")]
    DuplicateDocument(String),

    /// The URI does not name a known document.
    #[error("unknown document: {0}")]
    DocumentNotFound(String),

    /// A type aggregate was requested for a symbol that is not a class,
    /// interface, or trait.
    #[error("not a class-like symbol: {0}")]
    NotClassLike(String),
}
