//! Parser for PHP source text.
//!
//! A hand-written recursive descent over the token stream that builds a
//! lossless `rowan` green tree directly. There is no intermediate event
//! stream: grammar rules that only discover what they parsed after the
//! fact (postfix chains, binary operators, member modifiers) take a
//! [`Marker`] up front and complete it with the node kind once the shape
//! is clear. A marker is a `rowan` checkpoint, so wrapping an
//! already-built expression into a wider node is a single
//! `start_node_at` call.
//!
//! Lookahead is constant-time: the token list is indexed once and the
//! parser walks the positions of non-trivia tokens, so `peek_kind_n`
//! never rescans past comments or `<?php` tags.
//!
//! Trivia policy: trivia between two declarations or statements belongs
//! to the enclosing body, never to the construct that follows. A
//! docblock therefore sits as a sibling immediately before the
//! declaration it documents, and every node's range starts at its first
//! meaningful token. Trivia between the tokens of one construct stays
//! inside it, keeping the tree lossless.
//!
//! The parser never fails. Unexpected input becomes a [`ParseError`] and
//! recovery resumes at the nearest statement or declaration boundary.

pub mod grammar;

use crate::lexer::{lex, Token, TokenKind};
use crate::syntax::{SyntaxKind, SyntaxNode};
use drop_bomb::DropBomb;
use rowan::{Checkpoint, GreenNodeBuilder};
use text_size::{TextRange, TextSize};

/// Result of parsing source text.
#[derive(Debug, Clone)]
pub struct Parse {
    green: rowan::GreenNode,
    errors: Vec<ParseError>,
}

impl Parse {
    /// The root of the tree. Every byte of the input is reachable from
    /// it, errors included.
    #[must_use]
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Errors collected while parsing, in source order.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Returns `true` when the input parsed cleanly.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A parsing error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {}..{}", u32::from(self.range.start()), u32::from(self.range.end()))]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// The byte range where the error occurred.
    pub range: TextRange,
}

/// Parses source text into a syntax tree.
#[must_use]
pub fn parse(source: &str) -> Parse {
    let tokens = lex(source);
    let significant: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| !token.kind.is_trivia())
        .map(|(index, _)| index)
        .collect();

    let mut parser = Parser {
        source,
        tokens,
        significant,
        pos: 0,
        emitted: 0,
        builder: GreenNodeBuilder::new(),
        errors: Vec::new(),
    };

    parser.builder.start_node(SyntaxKind::SourceFile.into());
    while !parser.at_end() {
        parser.parse_item();
    }
    // Trailing trivia still belongs inside the root.
    parser.attach_trivia();
    parser.builder.finish_node();

    Parse {
        green: parser.builder.finish(),
        errors: parser.errors,
    }
}

/// An open node. Taken before a grammar rule knows what it is parsing and
/// completed with the final kind; dropping one without completing is a
/// grammar bug and panics via [`DropBomb`].
pub(crate) struct Marker {
    checkpoint: Checkpoint,
    bomb: DropBomb,
}

impl Marker {
    /// Closes the node: everything built since the marker was taken
    /// becomes its children.
    pub(crate) fn complete(mut self, parser: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
        self.bomb.defuse();
        parser.builder.start_node_at(self.checkpoint, kind.into());
        parser.builder.finish_node();
        CompletedMarker {
            checkpoint: self.checkpoint,
        }
    }
}

/// A finished node that can still be wrapped by a wider one.
#[derive(Clone, Copy)]
pub(crate) struct CompletedMarker {
    checkpoint: Checkpoint,
}

impl CompletedMarker {
    /// Reopens the span of the finished node so a wider node (a call, a
    /// member chain, a binary operator) can take it as its first child.
    pub(crate) fn precede(self) -> Marker {
        Marker {
            checkpoint: self.checkpoint,
            bomb: DropBomb::new("marker must be completed"),
        }
    }
}

/// The parser state: the token list, a cursor over its non-trivia
/// positions, and the tree under construction.
pub(crate) struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    /// Indices of the non-trivia tokens, for constant-time lookahead.
    significant: Vec<usize>,
    /// Position within `significant`.
    pos: usize,
    /// Tokens before this index are already in the tree.
    emitted: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<ParseError>,
}

impl Parser<'_> {
    // =========================================================================
    // Cursor and lookahead
    // =========================================================================

    /// The current token kind, `Eof` past the end.
    pub(crate) fn current(&self) -> TokenKind {
        self.peek_kind_n(0)
    }

    /// The kind of the nth non-trivia token ahead (0 = current).
    pub(crate) fn peek_kind_n(&self, n: usize) -> TokenKind {
        self.significant
            .get(self.pos + n)
            .map_or(TokenKind::Eof, |&index| self.tokens[index].kind)
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.current() == kind
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.significant.len()
    }

    /// Returns true if a `{` occurs before the terminating `;` of the
    /// current `use` declaration (group import syntax).
    pub(crate) fn has_use_group_ahead(&self) -> bool {
        for &index in &self.significant[self.pos..] {
            match self.tokens[index].kind {
                TokenKind::LBrace => return true,
                TokenKind::Semicolon | TokenKind::RBrace => return false,
                _ => {}
            }
        }
        false
    }

    // =========================================================================
    // Tree building
    // =========================================================================

    /// Emits pending trivia into whichever node is currently open.
    fn attach_trivia(&mut self) {
        let boundary = self
            .significant
            .get(self.pos)
            .copied()
            .unwrap_or(self.tokens.len());
        while self.emitted < boundary {
            self.emit_next();
        }
    }

    /// Puts the next raw token into the tree.
    fn emit_next(&mut self) {
        let token = self.tokens[self.emitted];
        let text = &self.source[usize::from(token.range.start())..usize::from(token.range.end())];
        self.builder
            .token(SyntaxKind::from(token.kind).into(), text);
        self.emitted += 1;
    }

    /// Consumes the current token into the tree, preceded by its pending
    /// trivia.
    pub(crate) fn bump(&mut self) {
        self.attach_trivia();
        if self.pos < self.significant.len() {
            self.emit_next();
            self.pos += 1;
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, message: &str) {
        if self.at(kind) {
            self.bump();
        } else {
            self.error(message);
        }
    }

    /// Takes a marker at the current position. Pending trivia is flushed
    /// first so the node starts at its first meaningful token.
    pub(crate) fn start(&mut self) -> Marker {
        self.attach_trivia();
        Marker {
            checkpoint: self.builder.checkpoint(),
            bomb: DropBomb::new("marker must be completed"),
        }
    }

    /// Opens a node whose kind is already known.
    pub(crate) fn start_node(&mut self, kind: SyntaxKind) {
        self.attach_trivia();
        self.builder.start_node(kind.into());
    }

    pub(crate) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    /// Records an error at the current token, or at end-of-file.
    pub(crate) fn error(&mut self, message: &str) {
        let range = self
            .significant
            .get(self.pos)
            .map(|&index| self.tokens[index].range)
            .unwrap_or_else(|| TextRange::empty(TextSize::of(self.source)));

        self.errors.push(ParseError {
            message: message.to_string(),
            range,
        });
    }

    // =========================================================================
    // Recovery
    // =========================================================================

    /// Returns true if the current token is a synchronization point.
    pub(crate) fn is_sync_point(&self) -> bool {
        matches!(
            self.current(),
            TokenKind::Semicolon
                | TokenKind::LBrace
                | TokenKind::RBrace
                | TokenKind::KwNamespace
                | TokenKind::KwUse
                | TokenKind::KwClass
                | TokenKind::KwInterface
                | TokenKind::KwTrait
                | TokenKind::KwFunction
                | TokenKind::KwConst
                | TokenKind::KwPublic
                | TokenKind::KwProtected
                | TokenKind::KwPrivate
                | TokenKind::KwStatic
                | TokenKind::KwAbstract
                | TokenKind::KwFinal
                | TokenKind::KwIf
                | TokenKind::KwForeach
                | TokenKind::KwWhile
                | TokenKind::KwFor
                | TokenKind::KwReturn
                | TokenKind::KwEcho
        )
    }

    /// Recover at statement level - skip to the next statement or block end.
    pub(crate) fn recover_statement(&mut self) {
        while !self.at_end() {
            if self.at(TokenKind::Semicolon) {
                self.bump();
                break;
            }
            if self.is_sync_point() || self.current().can_start_statement() {
                break;
            }
            self.bump();
        }
    }

    /// Consume a statement terminator, or treat it as inserted when the
    /// next token unambiguously starts a new statement or closes a block.
    pub(crate) fn expect_semicolon(&mut self) {
        if self.at(TokenKind::Semicolon) {
            self.bump();
            return;
        }

        self.error("expected ';'");
        if self.at_end() || self.is_sync_point() || self.current().can_start_statement() {
            return;
        }
        self.recover_statement();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn test_parse_empty() {
        let parse = parse("");
        assert!(parse.ok());
    }

    #[test]
    fn test_parse_simple_class() {
        let source = "<?php class Account {}";
        let parse = parse(source);
        assert!(parse.ok(), "errors: {:?}", parse.errors());
    }

    #[test]
    fn test_class_node_structure() {
        let parse = parse("<?php class A extends B {}");
        assert!(parse.ok(), "errors: {:?}", parse.errors());
        let kinds: Vec<String> = parse
            .syntax()
            .descendants()
            .map(|node| format!("{:?}", node.kind()))
            .collect();
        expect!["SourceFile ClassDecl Name ExtendsClause NameRef"].assert_eq(&kinds.join(" "));
    }

    #[test]
    fn test_member_expr_structure() {
        let parse = parse("<?php $a->b();");
        assert!(parse.ok(), "errors: {:?}", parse.errors());
        let kinds: Vec<String> = parse
            .syntax()
            .descendants()
            .map(|node| format!("{:?}", node.kind()))
            .collect();
        expect!["SourceFile ExprStmt CallExpr MemberExpr VarRef Name ArgList"]
            .assert_eq(&kinds.join(" "));
    }

    #[test]
    fn test_lossless_round_trip() {
        let source = "<?php  /* keep */ class A {}  // tail\n";
        let parse = parse(source);
        assert_eq!(parse.syntax().text().to_string(), source);
    }

    #[test]
    fn test_declaration_excludes_leading_trivia() {
        let source = "<?php\n/** doc */\nclass A {}";
        let parse = parse(source);
        let class = parse
            .syntax()
            .descendants()
            .find(|node| node.kind() == crate::syntax::SyntaxKind::ClassDecl)
            .unwrap();
        // The header tag and docblock stay in the root; the class starts
        // at its keyword.
        assert_eq!(
            usize::from(class.text_range().start()),
            source.find("class").unwrap()
        );
    }

    #[test]
    fn test_parse_namespaced_class() {
        let source = r#"<?php
namespace App\Model;

use Vendor\Clock;

class Account extends Base implements Countable
{
    private $items = [];

    public function add(Item $item): void
    {
        $this->items[] = $item;
    }
}
"#;
        let parse = parse(source);
        assert!(parse.ok(), "errors: {:?}", parse.errors());
    }

    #[test]
    fn test_parse_statements() {
        let source = r#"<?php
$a = new Foo();
if ($a instanceof Bar) {
    $b = $a->value();
} else {
    $b = 0;
}
foreach ($items as $key => $item) {
    echo $item;
}
"#;
        let parse = parse(source);
        assert!(parse.ok(), "errors: {:?}", parse.errors());
    }

    #[test]
    fn test_missing_semicolon_recovery() {
        let source = r#"<?php
$x = 1
$y = 2;
"#;
        let parse = parse(source);
        assert!(!parse.ok(), "expected errors for missing semicolon");
        assert!(
            parse
                .errors()
                .iter()
                .any(|error| error.message == "expected ';'"),
            "errors: {:?}",
            parse.errors()
        );
    }

    #[test]
    fn test_unclosed_class_recovery() {
        let source = r#"<?php
class Broken {
    public function ok() {}
"#;
        let parse = parse(source);
        assert!(!parse.ok(), "expected errors for unclosed class body");
        // The class declaration must still be present in the tree.
        let root = parse.syntax();
        assert!(root
            .descendants()
            .any(|node| node.kind() == crate::syntax::SyntaxKind::ClassDecl));
    }
}
