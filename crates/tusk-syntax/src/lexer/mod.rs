//! Lexer for PHP source text.
//!
//! This module provides a lexer that tokenizes PHP source into a stream of
//! tokens with their byte positions in the source text.

mod tokens;

pub use tokens::TokenKind;

use logos::Logos;
use text_size::{TextRange, TextSize};

/// A token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The byte range of the token in the source text.
    pub range: TextRange,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, range: TextRange) -> Self {
        Self { kind, range }
    }

    /// Returns the length of the token in bytes.
    #[must_use]
    pub fn len(&self) -> TextSize {
        self.range.len()
    }

    /// Returns true if the token has zero length.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Lexer for PHP source code.
///
/// The lexer is an iterator over tokens. It handles all error recovery
/// internally - any unrecognized characters are returned as
/// `TokenKind::Error`.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    source: &'src str,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            source,
        }
    }

    /// Returns the source text being lexed.
    #[must_use]
    pub fn source(&self) -> &'src str {
        self.source
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let kind = self.inner.next()?;
        let span = self.inner.span();

        let kind = kind.unwrap_or(TokenKind::Error);
        let range = TextRange::new(
            TextSize::from(span.start as u32),
            TextSize::from(span.end as u32),
        );
        Some(Token::new(kind, range))
    }
}

/// Lex the entire source and return all tokens, trivia included.
///
/// The parser consumes this list; it is also handy on its own for tests
/// and tooling.
#[must_use]
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// Lex source and return tokens paired with their text.
///
/// Useful for debugging and testing.
#[must_use]
pub fn lex_with_text(source: &str) -> Vec<(Token, &str)> {
    Lexer::new(source)
        .map(|token| {
            let text = &source[usize::from(token.range.start())..usize::from(token.range.end())];
            (token, text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexer_basic() {
        let source = "$x = 42;";
        let tokens = lex(source);

        let non_trivia: Vec<_> = tokens.iter().filter(|t| !t.kind.is_trivia()).collect();
        assert_eq!(non_trivia.len(), 4);
        assert_eq!(non_trivia[0].kind, TokenKind::Variable);
        assert_eq!(non_trivia[1].kind, TokenKind::Eq);
        assert_eq!(non_trivia[2].kind, TokenKind::IntLiteral);
        assert_eq!(non_trivia[3].kind, TokenKind::Semicolon);
    }

    #[test]
    fn test_lexer_preserves_positions() {
        let source = "$abc = 123";
        let tokens = lex(source);

        assert_eq!(tokens[0].range, TextRange::new(0.into(), 4.into()));
        assert_eq!(tokens[1].range, TextRange::new(4.into(), 5.into()));
        assert_eq!(tokens[2].range, TextRange::new(5.into(), 6.into()));
    }

    #[test]
    fn test_open_tag_is_trivia() {
        let source = "<?php $a = 1;";
        let tokens = lex(source);
        assert_eq!(tokens[0].kind, TokenKind::OpenTag);
        assert!(tokens[0].kind.is_trivia());
    }

    #[test]
    fn test_lex_with_text() {
        let source = "$x = 'hi'";
        let tokens = lex_with_text(source);

        let non_trivia: Vec<_> = tokens.iter().filter(|(t, _)| !t.kind.is_trivia()).collect();
        assert_eq!(non_trivia[0].1, "$x");
        assert_eq!(non_trivia[1].1, "=");
        assert_eq!(non_trivia[2].1, "'hi'");
    }

    #[test]
    fn test_full_class() {
        let source = r#"<?php

namespace App;

use Vendor\Logger as Log;

class Account extends Base
{
    /** @var string */
    private $owner;

    public function owner(): string
    {
        return $this->owner;
    }
}
"#;
        let tokens = lex(source);
        let non_trivia: Vec<_> = tokens.iter().filter(|t| !t.kind.is_trivia()).collect();

        assert!(non_trivia.iter().any(|t| t.kind == TokenKind::KwNamespace));
        assert!(non_trivia.iter().any(|t| t.kind == TokenKind::KwUse));
        assert!(non_trivia.iter().any(|t| t.kind == TokenKind::KwClass));
        assert!(non_trivia.iter().any(|t| t.kind == TokenKind::Arrow));
        assert!(tokens.iter().any(|t| t.kind == TokenKind::DocComment));
    }
}
