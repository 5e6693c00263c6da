//! Expression parsing using Pratt parsing.
//!
//! Operator precedence (low to high):
//! - `=` (2-1, right associative)
//! - `??` (4-3, right associative)
//! - `||` (5-6)
//! - `&&` (7-8)
//! - `|` (9-10), `&` (11-12)
//! - `==`, `===`, `!=`, `!==` (13-14)
//! - `<`, `<=`, `>`, `>=` (15-16)
//! - `+`, `-`, `.` (17-18)
//! - `*`, `/`, `%` (19-20)
//! - `instanceof` (21-22)
//! - `!`, unary `+`/`-` (20, prefix; looser than `instanceof`)

use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

use super::super::CompletedMarker;
use super::super::Parser;

impl Parser<'_> {
    /// Parse an expression using Pratt parsing.
    pub(crate) fn parse_expression(&mut self) -> CompletedMarker {
        self.parse_expr_bp(0)
    }

    /// Parse expression with minimum binding power.
    pub(crate) fn parse_expr_bp(&mut self, min_bp: u8) -> CompletedMarker {
        let mut lhs = if let Some(bp) = self.current().prefix_binding_power() {
            let marker = self.start();
            self.bump();
            self.parse_expr_bp(bp);
            marker.complete(self, SyntaxKind::UnaryExpr)
        } else {
            self.parse_primary_expr()
        };

        loop {
            if let Some(next) = self.parse_postfix_expr(lhs) {
                lhs = next;
                continue;
            }

            let op = self.current();
            if let Some((l_bp, r_bp)) = op.infix_binding_power() {
                if l_bp < min_bp {
                    break;
                }

                let marker = lhs.precede();
                let kind = match op {
                    TokenKind::Eq => SyntaxKind::AssignExpr,
                    TokenKind::KwInstanceof => SyntaxKind::InstanceofExpr,
                    _ => SyntaxKind::BinaryExpr,
                };
                self.bump(); // operator
                if op == TokenKind::KwInstanceof && self.at_class_name_ref() {
                    self.parse_name_ref();
                } else {
                    self.parse_expr_bp(r_bp);
                }
                lhs = marker.complete(self, kind);
                continue;
            }

            break;
        }

        lhs
    }

    fn at_class_name_ref(&self) -> bool {
        matches!(
            self.current(),
            TokenKind::Ident
                | TokenKind::Backslash
                | TokenKind::KwStatic
                | TokenKind::KwNamespace
        )
    }

    /// Parse postfix expressions (member access, scoped access, calls,
    /// indexing).
    pub(crate) fn parse_postfix_expr(&mut self, lhs: CompletedMarker) -> Option<CompletedMarker> {
        match self.current() {
            TokenKind::Arrow => {
                let marker = lhs.precede();
                self.bump();
                self.parse_member_name();
                Some(marker.complete(self, SyntaxKind::MemberExpr))
            }
            TokenKind::DoubleColon => {
                let marker = lhs.precede();
                self.bump();
                if self.at(TokenKind::KwClass) {
                    self.bump();
                } else if self.at(TokenKind::Variable) {
                    self.start_node(SyntaxKind::VarRef);
                    self.bump();
                    self.finish_node();
                } else {
                    self.parse_member_name();
                }
                Some(marker.complete(self, SyntaxKind::ScopedExpr))
            }
            TokenKind::LParen => {
                let marker = lhs.precede();
                self.parse_arg_list();
                Some(marker.complete(self, SyntaxKind::CallExpr))
            }
            TokenKind::LBracket => {
                let marker = lhs.precede();
                self.bump();
                if self.current().can_start_expr() {
                    self.parse_expression();
                }
                self.expect(TokenKind::RBracket, "expected ']'");
                Some(marker.complete(self, SyntaxKind::IndexExpr))
            }
            _ => None,
        }
    }

    /// Parse a member name after `->` or `::`. Reserved words are allowed
    /// as member names.
    fn parse_member_name(&mut self) {
        if self.at(TokenKind::Variable) {
            self.start_node(SyntaxKind::VarRef);
            self.bump();
            self.finish_node();
        } else if self.at(TokenKind::Ident) || self.current().is_keyword() {
            self.parse_name();
        } else {
            self.error("expected member name");
        }
    }

    /// Parse primary expressions (literals, variables, names, `new`, arrays,
    /// closures).
    pub(crate) fn parse_primary_expr(&mut self) -> CompletedMarker {
        match self.current() {
            TokenKind::IntLiteral
            | TokenKind::FloatLiteral
            | TokenKind::StringLiteral
            | TokenKind::KwTrue
            | TokenKind::KwFalse
            | TokenKind::KwNull => {
                let marker = self.start();
                self.bump();
                marker.complete(self, SyntaxKind::Literal)
            }
            TokenKind::Variable => {
                let marker = self.start();
                self.bump();
                marker.complete(self, SyntaxKind::VarRef)
            }
            TokenKind::Ident
            | TokenKind::Backslash
            | TokenKind::KwStatic
            | TokenKind::KwNamespace => self.parse_name_ref(),
            TokenKind::KwArray => {
                if self.peek_kind_n(1) == TokenKind::LParen {
                    self.parse_legacy_array()
                } else {
                    self.parse_name_ref()
                }
            }
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LParen => {
                let marker = self.start();
                self.bump();
                self.parse_expression();
                self.expect(TokenKind::RParen, "expected ')'");
                marker.complete(self, SyntaxKind::ParenExpr)
            }
            TokenKind::KwNew => self.parse_new_expr(),
            TokenKind::KwFunction => self.parse_closure(),
            _ => {
                let marker = self.start();
                self.error("expected expression");
                if !self.at_end() && !self.is_sync_point() {
                    self.bump();
                }
                marker.complete(self, SyntaxKind::Error)
            }
        }
    }

    /// Parse `new Foo(args)`, `new $var`, or `new class ... { ... }`.
    fn parse_new_expr(&mut self) -> CompletedMarker {
        let marker = self.start();
        self.bump(); // new

        if self.at(TokenKind::KwClass) {
            // Anonymous class: `new class(args) extends B implements I {}`.
            let inner = self.start();
            self.bump();
            if self.at(TokenKind::LParen) {
                self.parse_arg_list();
            }
            if self.at(TokenKind::KwExtends) {
                self.start_node(SyntaxKind::ExtendsClause);
                self.bump();
                self.parse_name_ref();
                self.finish_node();
            }
            if self.at(TokenKind::KwImplements) {
                self.start_node(SyntaxKind::ImplementsClause);
                self.bump();
                self.parse_name_ref();
                while self.at(TokenKind::Comma) {
                    self.bump();
                    self.parse_name_ref();
                }
                self.finish_node();
            }
            self.parse_class_body();
            inner.complete(self, SyntaxKind::ClassDecl);
            return marker.complete(self, SyntaxKind::NewExpr);
        }

        if self.at(TokenKind::Variable) {
            self.start_node(SyntaxKind::VarRef);
            self.bump();
            self.finish_node();
        } else if self.at_class_name_ref() {
            self.parse_name_ref();
        } else {
            self.error("expected class name");
        }
        if self.at(TokenKind::LParen) {
            self.parse_arg_list();
        }
        marker.complete(self, SyntaxKind::NewExpr)
    }

    /// Parse `[item, key => value, ...]`.
    fn parse_array_literal(&mut self) -> CompletedMarker {
        let marker = self.start();
        self.bump(); // [
        self.parse_array_items(TokenKind::RBracket);
        self.expect(TokenKind::RBracket, "expected ']'");
        marker.complete(self, SyntaxKind::ArrayExpr)
    }

    /// Parse `array(item, ...)`.
    fn parse_legacy_array(&mut self) -> CompletedMarker {
        let marker = self.start();
        self.bump(); // array
        self.expect(TokenKind::LParen, "expected '('");
        self.parse_array_items(TokenKind::RParen);
        self.expect(TokenKind::RParen, "expected ')'");
        marker.complete(self, SyntaxKind::ArrayExpr)
    }

    fn parse_array_items(&mut self, terminator: TokenKind) {
        while !self.at(terminator) && !self.at_end() {
            self.start_node(SyntaxKind::ArrayItem);
            self.parse_expression();
            if self.at(TokenKind::FatArrow) {
                self.bump();
                self.parse_expression();
            }
            self.finish_node();
            if self.at(TokenKind::Comma) {
                self.bump();
            } else {
                break;
            }
        }
    }

    /// Parse `function (...) use (...) : type { ... }`.
    fn parse_closure(&mut self) -> CompletedMarker {
        let marker = self.start();
        self.bump(); // function
        if self.at(TokenKind::Amp) {
            self.bump();
        }
        self.parse_param_list();
        if self.at(TokenKind::KwUse) {
            self.start_node(SyntaxKind::ClosureUse);
            self.bump();
            self.expect(TokenKind::LParen, "expected '('");
            while !self.at(TokenKind::RParen) && !self.at_end() {
                if self.at(TokenKind::Amp) {
                    self.bump();
                }
                if self.at(TokenKind::Variable) {
                    self.start_node(SyntaxKind::VarRef);
                    self.bump();
                    self.finish_node();
                } else {
                    self.error("expected captured variable");
                    break;
                }
                if self.at(TokenKind::Comma) {
                    self.bump();
                } else {
                    break;
                }
            }
            self.expect(TokenKind::RParen, "expected ')'");
            self.finish_node();
        }
        if self.at(TokenKind::Colon) {
            self.bump();
            self.parse_type_hint();
        }
        if self.at(TokenKind::LBrace) {
            self.parse_block();
        } else {
            self.error("expected closure body");
        }
        marker.complete(self, SyntaxKind::ClosureExpr)
    }

    /// Parse an argument list for a call. Named arguments (`name: expr`)
    /// are tolerated.
    pub(crate) fn parse_arg_list(&mut self) {
        self.start_node(SyntaxKind::ArgList);
        self.bump(); // (

        while !self.at(TokenKind::RParen) && !self.at_end() {
            self.start_node(SyntaxKind::Arg);
            if self.at(TokenKind::Ellipsis) {
                self.bump();
            }
            self.parse_expression();
            if self.at(TokenKind::Colon) {
                self.bump();
                self.parse_expression();
            }
            self.finish_node();

            if self.at(TokenKind::Comma) {
                self.bump();
            } else {
                break;
            }
        }

        self.expect(TokenKind::RParen, "expected ')'");
        self.finish_node();
    }
}
