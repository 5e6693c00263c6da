//! Symbol definitions.
//!
//! This module provides the typed records for everything a document can
//! declare: namespaces, class-likes, functions, members, parameters.

mod defs;

pub use defs::{Location, Modifiers, Symbol, SymbolKind};
