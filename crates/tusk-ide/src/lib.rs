//! `tusk-ide` - IDE features for PHP.
//!
//! Thin providers over the `tusk-hir` semantic engine:
//!
//! - **Document Symbols**: outline tree for one document
//! - **Workspace Symbols**: FQN prefix search over the store
//! - **Completion**: members after `->`/`::`, names and keywords elsewhere
//! - **Signature Help**: callable signatures with the active parameter
//! - **Go to Definition**: names, members, and parameters
//! - **References**: name references across open documents

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod completion;
pub mod document_symbols;
pub mod goto_def;
pub mod references;
pub mod signature_help;
pub mod workspace_symbols;
mod util;

pub use completion::{completions, CompletionItem, CompletionKind};
pub use document_symbols::{document_symbols, DocumentSymbol};
pub use goto_def::{goto_definition, DefinitionResult};
pub use references::{references, ReferenceResult};
pub use signature_help::{signature_help, ParameterInfo, SignatureHelp, SignatureInfo};
pub use workspace_symbols::{workspace_symbols, WorkspaceSymbol};
