//! `tusk-syntax` - Lexer, parser, and concrete syntax tree for PHP.
//!
//! This crate provides the low-level syntactic analysis for PHP source code:
//!
//! - **Lexer**: Tokenizes source text into a stream of tokens
//! - **Parser**: Builds a concrete syntax tree (CST) from tokens
//! - **Syntax Tree**: Lossless representation of the source code
//! - **Line Index**: Offset/position mapping for editor interop
//!
//! # Design Principles
//!
//! This crate follows the design of `rust-analyzer` and uses the `rowan`
//! library for building lossless syntax trees. Key design decisions:
//!
//! - **Lossless**: All source text is preserved, including whitespace,
//!   comments, and `<?php` tags
//! - **Error-tolerant**: Parsing continues after errors, producing a
//!   partial tree
//!
//! # Example
//!
//! ```
//! use tusk_syntax::lexer::{lex, TokenKind};
//!
//! let source = "$x = 42;";
//! let tokens = lex(source);
//!
//! // Filter out whitespace to see the meaningful tokens
//! let meaningful: Vec<_> = tokens.iter()
//!     .filter(|t| !t.kind.is_trivia())
//!     .collect();
//!
//! assert_eq!(meaningful[0].kind, TokenKind::Variable);
//! assert_eq!(meaningful[1].kind, TokenKind::Eq);
//! assert_eq!(meaningful[2].kind, TokenKind::IntLiteral);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod lexer;
pub mod line_index;
pub mod parser;
pub mod syntax;
mod token_kinds;
pub mod walk;

pub use lexer::{lex, Lexer, Token, TokenKind};
pub use line_index::{LineCol, LineIndex};
pub use parser::{parse, Parse, ParseError};
pub use syntax::{PhpLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
pub use walk::{walk, Visitor};
