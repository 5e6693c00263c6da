//! Statement parsing.

use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

use super::super::Parser;

impl Parser<'_> {
    /// Parse a single statement.
    pub(crate) fn parse_statement(&mut self) {
        match self.current() {
            TokenKind::LBrace => self.parse_block(),
            TokenKind::KwIf => self.parse_if(),
            TokenKind::KwForeach => self.parse_foreach(),
            TokenKind::KwWhile => self.parse_while(),
            TokenKind::KwFor => self.parse_for(),
            TokenKind::KwReturn => self.parse_return(),
            TokenKind::KwEcho => self.parse_echo(),
            TokenKind::KwFunction if self.at_function_decl() => self.parse_function_decl(),
            TokenKind::Semicolon => {
                let marker = self.start();
                self.bump();
                marker.complete(self, SyntaxKind::EmptyStmt);
            }
            kind if kind.can_start_expr() => {
                let marker = self.start();
                self.parse_expression();
                self.expect_semicolon();
                marker.complete(self, SyntaxKind::ExprStmt);
            }
            _ => {
                self.error("expected statement");
                self.bump();
            }
        }
    }

    /// Parse a `{ ... }` block.
    pub(crate) fn parse_block(&mut self) {
        let marker = self.start();
        self.expect(TokenKind::LBrace, "expected '{'");
        while !self.at(TokenKind::RBrace) && !self.at_end() {
            self.parse_statement();
        }
        self.expect(TokenKind::RBrace, "expected '}'");
        marker.complete(self, SyntaxKind::Block);
    }

    /// Parse an if statement with its elseif/else chain.
    ///
    /// An `else if` pair nests a fresh `IfStmt` inside the else branch, so
    /// both spellings produce the same shape one level down.
    fn parse_if(&mut self) {
        let marker = self.start();
        self.bump(); // if
        self.parse_condition();
        self.parse_statement();

        while self.at(TokenKind::KwElseif) {
            self.start_node(SyntaxKind::ElseIfBranch);
            self.bump();
            self.parse_condition();
            self.parse_statement();
            self.finish_node();
        }

        if self.at(TokenKind::KwElse) {
            self.start_node(SyntaxKind::ElseBranch);
            self.bump();
            self.parse_statement();
            self.finish_node();
        }

        marker.complete(self, SyntaxKind::IfStmt);
    }

    fn parse_condition(&mut self) {
        self.expect(TokenKind::LParen, "expected '('");
        self.parse_expression();
        self.expect(TokenKind::RParen, "expected ')'");
    }

    /// Parse `foreach (expr as $k => $v) stmt`. Bound variables are wrapped
    /// in `VarRef` nodes so consumers can find them by kind.
    fn parse_foreach(&mut self) {
        let marker = self.start();
        self.bump(); // foreach
        self.expect(TokenKind::LParen, "expected '('");
        self.parse_expression();
        self.expect(TokenKind::KwAs, "expected 'as'");
        self.parse_foreach_binding();
        if self.at(TokenKind::FatArrow) {
            self.bump();
            self.parse_foreach_binding();
        }
        self.expect(TokenKind::RParen, "expected ')'");
        self.parse_statement();
        marker.complete(self, SyntaxKind::ForeachStmt);
    }

    fn parse_foreach_binding(&mut self) {
        if self.at(TokenKind::Amp) {
            self.bump();
        }
        if self.at(TokenKind::Variable) {
            self.start_node(SyntaxKind::VarRef);
            self.bump();
            self.finish_node();
        } else {
            self.error("expected variable");
        }
    }

    fn parse_while(&mut self) {
        let marker = self.start();
        self.bump(); // while
        self.parse_condition();
        self.parse_statement();
        marker.complete(self, SyntaxKind::WhileStmt);
    }

    /// Parse `for (init; cond; step) stmt`. Each section is a comma-separated
    /// expression list and may be empty.
    fn parse_for(&mut self) {
        let marker = self.start();
        self.bump(); // for
        self.expect(TokenKind::LParen, "expected '('");
        for section in 0..3 {
            while self.current().can_start_expr() {
                self.parse_expression();
                if self.at(TokenKind::Comma) {
                    self.bump();
                } else {
                    break;
                }
            }
            if section < 2 {
                self.expect(TokenKind::Semicolon, "expected ';'");
            }
        }
        self.expect(TokenKind::RParen, "expected ')'");
        self.parse_statement();
        marker.complete(self, SyntaxKind::ForStmt);
    }

    fn parse_return(&mut self) {
        let marker = self.start();
        self.bump(); // return
        if self.current().can_start_expr() {
            self.parse_expression();
        }
        self.expect_semicolon();
        marker.complete(self, SyntaxKind::ReturnStmt);
    }

    fn parse_echo(&mut self) {
        let marker = self.start();
        self.bump(); // echo
        self.parse_expression();
        while self.at(TokenKind::Comma) {
            self.bump();
            self.parse_expression();
        }
        self.expect_semicolon();
        marker.complete(self, SyntaxKind::EchoStmt);
    }
}
