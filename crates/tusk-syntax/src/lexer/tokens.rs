//! Token definitions for PHP source text.
//!
//! Token kinds are designed to work with both the `logos` lexer generator
//! and the `rowan` lossless syntax tree library. PHP keywords are matched
//! case-insensitively; identifiers keep their source casing.

use logos::Logos;

fn lex_doc_comment(lex: &mut logos::Lexer<TokenKind>) -> bool {
    lex_until_comment_close(lex)
}

fn lex_block_comment(lex: &mut logos::Lexer<TokenKind>) -> bool {
    lex_until_comment_close(lex)
}

fn lex_until_comment_close(lex: &mut logos::Lexer<TokenKind>) -> bool {
    let bytes = lex.remainder().as_bytes();
    let mut i = 0usize;
    while i + 1 < bytes.len() {
        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            lex.bump(i + 2);
            return true;
        }
        i += 1;
    }
    lex.bump(bytes.len());
    false
}

/// All token kinds in PHP source text.
///
/// Token kinds are divided into categories:
/// - Trivia (whitespace, comments, open/close tags) - preserved but not
///   semantically significant
/// - Punctuation and operators
/// - Keywords (matched case-insensitively, per the language rules)
/// - Literals (numbers, strings)
/// - Identifiers and `$variables`
/// - Special tokens (errors, EOF)
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[derive(Default)]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    /// Whitespace (spaces, tabs, newlines)
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    /// Single-line comment: `// ...` or `# ...`
    #[regex(r"//[^\r\n]*", allow_greedy = true)]
    #[regex(r"#[^\r\n]*", allow_greedy = true)]
    LineComment,

    /// Documentation comment: `/** ... */`
    #[token("/**", lex_doc_comment)]
    DocComment,

    /// Block comment: `/* ... */`
    #[token("/*", lex_block_comment)]
    BlockComment,

    /// Opening tag: `<?php` or `<?`
    #[regex(r"<\?(php)?")]
    OpenTag,

    /// Closing tag: `?>`
    #[token("?>")]
    CloseTag,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    /// `;`
    #[token(";")]
    Semicolon,

    /// `:`
    #[token(":")]
    Colon,

    /// `::`
    #[token("::")]
    DoubleColon,

    /// `,`
    #[token(",")]
    Comma,

    /// `.`
    #[token(".")]
    Dot,

    /// `->`
    #[token("->")]
    Arrow,

    /// `=>`
    #[token("=>")]
    FatArrow,

    /// `?`
    #[token("?")]
    Question,

    /// `??`
    #[token("??")]
    QuestionQuestion,

    /// `\`
    #[token("\\")]
    Backslash,

    /// `...`
    #[token("...")]
    Ellipsis,

    /// `&`
    #[token("&")]
    Amp,

    /// `&&`
    #[token("&&")]
    AmpAmp,

    /// `|`
    #[token("|")]
    Pipe,

    /// `||`
    #[token("||")]
    PipePipe,

    /// `(`
    #[token("(")]
    LParen,

    /// `)`
    #[token(")")]
    RParen,

    /// `{`
    #[token("{")]
    LBrace,

    /// `}`
    #[token("}")]
    RBrace,

    /// `[`
    #[token("[")]
    LBracket,

    /// `]`
    #[token("]")]
    RBracket,

    // =========================================================================
    // OPERATORS
    // =========================================================================
    /// `=`
    #[token("=")]
    Eq,

    /// `==`
    #[token("==")]
    EqEq,

    /// `===`
    #[token("===")]
    EqEqEq,

    /// `!=` or `<>`
    #[token("!=")]
    #[token("<>")]
    BangEq,

    /// `!==`
    #[token("!==")]
    BangEqEq,

    /// `<`
    #[token("<")]
    Lt,

    /// `>`
    #[token(">")]
    Gt,

    /// `<=`
    #[token("<=")]
    LtEq,

    /// `>=`
    #[token(">=")]
    GtEq,

    /// `+`
    #[token("+")]
    Plus,

    /// `-`
    #[token("-")]
    Minus,

    /// `*`
    #[token("*")]
    Star,

    /// `/`
    #[token("/")]
    Slash,

    /// `%`
    #[token("%")]
    Percent,

    /// `!`
    #[token("!")]
    Bang,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    /// `namespace`
    #[token("namespace", ignore(case))]
    KwNamespace,

    /// `use`
    #[token("use", ignore(case))]
    KwUse,

    /// `as`
    #[token("as", ignore(case))]
    KwAs,

    /// `insteadof`
    #[token("insteadof", ignore(case))]
    KwInsteadof,

    /// `class`
    #[token("class", ignore(case))]
    KwClass,

    /// `interface`
    #[token("interface", ignore(case))]
    KwInterface,

    /// `trait`
    #[token("trait", ignore(case))]
    KwTrait,

    /// `extends`
    #[token("extends", ignore(case))]
    KwExtends,

    /// `implements`
    #[token("implements", ignore(case))]
    KwImplements,

    /// `function`
    #[token("function", ignore(case))]
    KwFunction,

    /// `const`
    #[token("const", ignore(case))]
    KwConst,

    /// `public`
    #[token("public", ignore(case))]
    KwPublic,

    /// `protected`
    #[token("protected", ignore(case))]
    KwProtected,

    /// `private`
    #[token("private", ignore(case))]
    KwPrivate,

    /// `static`
    #[token("static", ignore(case))]
    KwStatic,

    /// `abstract`
    #[token("abstract", ignore(case))]
    KwAbstract,

    /// `final`
    #[token("final", ignore(case))]
    KwFinal,

    /// `new`
    #[token("new", ignore(case))]
    KwNew,

    /// `instanceof`
    #[token("instanceof", ignore(case))]
    KwInstanceof,

    /// `if`
    #[token("if", ignore(case))]
    KwIf,

    /// `elseif`
    #[token("elseif", ignore(case))]
    KwElseif,

    /// `else`
    #[token("else", ignore(case))]
    KwElse,

    /// `foreach`
    #[token("foreach", ignore(case))]
    KwForeach,

    /// `while`
    #[token("while", ignore(case))]
    KwWhile,

    /// `for`
    #[token("for", ignore(case))]
    KwFor,

    /// `return`
    #[token("return", ignore(case))]
    KwReturn,

    /// `echo`
    #[token("echo", ignore(case))]
    KwEcho,

    /// `array`
    #[token("array", ignore(case))]
    KwArray,

    /// `true`
    #[token("true", ignore(case))]
    KwTrue,

    /// `false`
    #[token("false", ignore(case))]
    KwFalse,

    /// `null`
    #[token("null", ignore(case))]
    KwNull,

    // =========================================================================
    // LITERALS, NAMES
    // =========================================================================
    /// Integer literal: decimal, hex, octal, or binary, with `_` separators
    #[regex(r"0[xX][0-9a-fA-F_]+")]
    #[regex(r"0[bB][01_]+")]
    #[regex(r"[0-9][0-9_]*")]
    IntLiteral,

    /// Float literal
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+")]
    FloatLiteral,

    /// String literal, single- or double-quoted (interpolation is not split)
    #[regex(r"'([^'\\]|\\.)*'")]
    #[regex(r#""([^"\\]|\\.)*""#)]
    StringLiteral,

    /// A `$variable`
    #[regex(r"\$[a-zA-Z_][a-zA-Z0-9_]*")]
    Variable,

    /// Identifier
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    /// Lexer error (unrecognized character, unterminated comment)
    #[default]
    Error,

    /// End of file (never produced by the lexer; parser sentinel)
    Eof,
}

impl TokenKind {
    /// Returns `true` if this is a trivia kind.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace
                | Self::LineComment
                | Self::BlockComment
                | Self::DocComment
                | Self::OpenTag
                | Self::CloseTag
        )
    }

    /// Returns `true` if this is a keyword.
    #[must_use]
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::KwNamespace as u16) && (self as u16) <= (Self::KwNull as u16)
    }

    /// Returns `true` if this token can appear as a member/class-member
    /// modifier.
    #[must_use]
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::KwPublic
                | Self::KwProtected
                | Self::KwPrivate
                | Self::KwStatic
                | Self::KwAbstract
                | Self::KwFinal
        )
    }

    /// Returns `true` if this token can start a type hint.
    #[must_use]
    pub fn can_start_type_hint(self) -> bool {
        matches!(
            self,
            Self::Question
                | Self::Ident
                | Self::Backslash
                | Self::KwArray
                | Self::KwStatic
                | Self::KwNull
                | Self::KwNamespace
        )
    }

    /// Returns `true` if this token can start an expression.
    #[must_use]
    pub fn can_start_expr(self) -> bool {
        matches!(
            self,
            Self::Variable
                | Self::Ident
                | Self::Backslash
                | Self::IntLiteral
                | Self::FloatLiteral
                | Self::StringLiteral
                | Self::KwTrue
                | Self::KwFalse
                | Self::KwNull
                | Self::KwNew
                | Self::KwArray
                | Self::KwStatic
                | Self::KwFunction
                | Self::KwNamespace
                | Self::LParen
                | Self::LBracket
                | Self::Bang
                | Self::Plus
                | Self::Minus
                | Self::Amp
        )
    }

    /// Returns `true` if this token can start a statement.
    #[must_use]
    pub fn can_start_statement(self) -> bool {
        self.can_start_expr()
            || matches!(
                self,
                Self::KwIf
                    | Self::KwForeach
                    | Self::KwWhile
                    | Self::KwFor
                    | Self::KwReturn
                    | Self::KwEcho
                    | Self::LBrace
                    | Self::Semicolon
            )
    }

    /// Prefix (unary) binding power.
    ///
    /// Sits between the multiplicative and `instanceof` tiers, so
    /// `!$x instanceof T` negates the check rather than the operand.
    #[must_use]
    pub fn prefix_binding_power(self) -> Option<u8> {
        Some(match self {
            Self::Bang | Self::Plus | Self::Minus => 20,
            _ => return None,
        })
    }

    /// Infix (binary) binding power, `(left, right)`.
    ///
    /// Precedence low to high: `=` (right associative), `??` (right
    /// associative), `||`, `&&`, `|`, `&`, equality, relational,
    /// additive and `.`, multiplicative, `instanceof`.
    #[must_use]
    pub fn infix_binding_power(self) -> Option<(u8, u8)> {
        Some(match self {
            Self::Eq => (2, 1), // Right associative
            Self::QuestionQuestion => (4, 3), // Right associative
            Self::PipePipe => (5, 6),
            Self::AmpAmp => (7, 8),
            Self::Pipe => (9, 10),
            Self::Amp => (11, 12),
            Self::EqEq | Self::EqEqEq | Self::BangEq | Self::BangEqEq => (13, 14),
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => (15, 16),
            Self::Plus | Self::Minus | Self::Dot => (17, 18),
            Self::Star | Self::Slash | Self::Percent => (19, 20),
            Self::KwInstanceof => (21, 22),
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logos::Logos;

    fn kinds(source: &str) -> Vec<TokenKind> {
        TokenKind::lexer(source)
            .map(|kind| kind.unwrap_or(TokenKind::Error))
            .filter(|kind| !kind.is_trivia())
            .collect()
    }

    #[test]
    fn test_keywords_case_insensitive() {
        assert_eq!(kinds("class Class CLASS"), vec![
            TokenKind::KwClass,
            TokenKind::KwClass,
            TokenKind::KwClass,
        ]);
    }

    #[test]
    fn test_keyword_prefix_is_ident() {
        assert_eq!(kinds("className"), vec![TokenKind::Ident]);
        assert_eq!(kinds("news"), vec![TokenKind::Ident]);
    }

    #[test]
    fn test_variables_and_arrows() {
        assert_eq!(kinds("$this->name"), vec![
            TokenKind::Variable,
            TokenKind::Arrow,
            TokenKind::Ident,
        ]);
        assert_eq!(kinds("Foo::BAR"), vec![
            TokenKind::Ident,
            TokenKind::DoubleColon,
            TokenKind::Ident,
        ]);
    }

    #[test]
    fn test_doc_comment_vs_block_comment() {
        let all: Vec<TokenKind> = TokenKind::lexer("/** doc */ /* plain */")
            .map(|kind| kind.unwrap_or(TokenKind::Error))
            .collect();
        assert!(all.contains(&TokenKind::DocComment));
        assert!(all.contains(&TokenKind::BlockComment));
    }

    #[test]
    fn test_qualified_name_tokens() {
        assert_eq!(kinds(r"\App\Model"), vec![
            TokenKind::Backslash,
            TokenKind::Ident,
            TokenKind::Backslash,
            TokenKind::Ident,
        ]);
    }

    #[test]
    fn test_numeric_literals() {
        assert_eq!(kinds("42 0xFF 1_000 3.14 1e9"), vec![
            TokenKind::IntLiteral,
            TokenKind::IntLiteral,
            TokenKind::IntLiteral,
            TokenKind::FloatLiteral,
            TokenKind::FloatLiteral,
        ]);
    }
}
