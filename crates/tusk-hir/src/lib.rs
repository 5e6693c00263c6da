//! `tusk-hir` - Symbol model and semantic analysis for PHP.
//!
//! This crate is the semantic engine built on top of `tusk-syntax`:
//!
//! - **Symbol Reader**: parse tree -> per-document symbol tree
//! - **Name Resolution**: namespace + import rules to fully-qualified names
//! - **Symbol Store**: workspace-wide index with per-document replacement
//! - **Type Aggregate**: effective member sets across inheritance and traits
//! - **Type Resolver**: the static type of the expression at a position
//! - **Engine**: open documents, debounced reparsing, and queries
//!
//! # Example
//!
//! ```
//! use tusk_hir::{CancellationToken, DocumentItem, Engine};
//! use tusk_syntax::LineCol;
//!
//! let mut engine = Engine::new();
//! engine.open_document(DocumentItem {
//!     uri: "file:///demo.php".into(),
//!     language_id: "php".into(),
//!     text: "<?php class Greeter { public function hi(): string {} }".into(),
//!     version: 1,
//! }).unwrap();
//!
//! let agg = engine
//!     .aggregate("Greeter", &CancellationToken::new())
//!     .unwrap();
//! assert_eq!(agg.members(Default::default()).len(), 1);
//! # let _ = LineCol { line: 0, col: 0 };
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod cancel;
pub mod diagnostics;
pub mod docblock;
pub mod engine;
pub mod error;
pub mod nameres;
pub mod reader;
pub mod store;
pub mod symbols;
pub mod type_resolver;
pub mod types;
pub mod var_table;

pub use aggregate::{MergeStrategy, TypeAggregate};
pub use cancel::CancellationToken;
pub use diagnostics::{Diagnostic, DiagnosticSeverity};
pub use engine::{ContentChange, DocumentEvent, DocumentItem, Engine, OpenDocument};
pub use error::EngineError;
pub use nameres::{ImportRule, ImportTable, NameKind, NameResolver};
pub use reader::{declaration_name_range, read_document, DocumentSymbols};
pub use store::SymbolStore;
pub use symbols::{Location, Modifiers, Symbol, SymbolKind};
pub use types::TypeString;
pub use var_table::VariableTable;
