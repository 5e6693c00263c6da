//! Class-like body member parsing: methods, properties, class constants,
//! and trait-use statements.

use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

use super::super::{Marker, Parser};

impl Parser<'_> {
    /// Parse a `{ ... }` class-like body.
    pub(crate) fn parse_class_body(&mut self) {
        self.expect(TokenKind::LBrace, "expected '{'");

        while !self.at(TokenKind::RBrace) && !self.at_end() {
            // A stray declaration keyword means the closing brace is missing;
            // bail out so the outer item loop can pick it up.
            if matches!(
                self.current(),
                TokenKind::KwClass
                    | TokenKind::KwInterface
                    | TokenKind::KwTrait
                    | TokenKind::KwNamespace
            ) {
                self.error("expected '}'");
                return;
            }
            self.parse_member();
        }

        self.expect(TokenKind::RBrace, "expected '}'");
    }

    /// Parse a single class member.
    fn parse_member(&mut self) {
        let marker = self.start();
        match self.current() {
            TokenKind::KwUse => self.parse_use_trait(marker),
            TokenKind::KwConst => self.parse_class_const(marker),
            TokenKind::KwFunction => self.parse_method(marker),
            kind if kind.is_modifier() => {
                while self.current().is_modifier() {
                    self.bump();
                }
                match self.current() {
                    TokenKind::KwFunction => self.parse_method(marker),
                    TokenKind::KwConst => self.parse_class_const(marker),
                    TokenKind::Variable => self.parse_property(marker),
                    kind if kind.can_start_type_hint() => {
                        self.parse_type_hint();
                        self.parse_property(marker);
                    }
                    _ => {
                        self.error("expected member declaration");
                        if !self.at(TokenKind::RBrace) && !self.at_end() {
                            self.bump();
                        }
                        marker.complete(self, SyntaxKind::Error);
                    }
                }
            }
            TokenKind::Variable => self.parse_property(marker),
            _ => {
                self.error("expected class member");
                if !self.at(TokenKind::RBrace) && !self.at_end() {
                    self.bump();
                }
                marker.complete(self, SyntaxKind::Error);
            }
        }
    }

    /// Parse a method declaration; leading modifiers are already consumed.
    fn parse_method(&mut self, marker: Marker) {
        self.bump(); // function
        if self.at(TokenKind::Amp) {
            self.bump();
        }
        if self.at(TokenKind::Ident) {
            self.parse_name();
        } else if self.current().is_keyword() {
            // Member names may collide with reserved words.
            self.parse_name();
        } else {
            self.error("expected method name");
        }
        self.parse_param_list();
        if self.at(TokenKind::Colon) {
            self.bump();
            self.parse_type_hint();
        }
        if self.at(TokenKind::LBrace) {
            self.parse_block();
        } else {
            // Abstract and interface methods end with a semicolon.
            self.expect_semicolon();
        }
        marker.complete(self, SyntaxKind::MethodDecl);
    }

    /// Parse a property declaration; modifiers and an optional type hint are
    /// already consumed.
    fn parse_property(&mut self, marker: Marker) {
        loop {
            if self.at(TokenKind::Variable) {
                self.bump();
            } else {
                self.error("expected property variable");
                break;
            }
            if self.at(TokenKind::Eq) {
                self.bump();
                self.parse_expression();
            }
            if self.at(TokenKind::Comma) {
                self.bump();
            } else {
                break;
            }
        }
        self.expect_semicolon();
        marker.complete(self, SyntaxKind::PropertyDecl);
    }

    /// Parse a class constant declaration; leading modifiers are already
    /// consumed.
    fn parse_class_const(&mut self, marker: Marker) {
        self.parse_const_tail();
        marker.complete(self, SyntaxKind::ClassConstDecl);
    }

    /// Parse a trait-use statement: `use T1, T2;` with an optional
    /// adaptation block, whose entries are consumed without fine structure.
    fn parse_use_trait(&mut self, marker: Marker) {
        self.bump(); // use
        self.parse_name_ref();
        while self.at(TokenKind::Comma) {
            self.bump();
            self.parse_name_ref();
        }
        if self.at(TokenKind::LBrace) {
            self.start_node(SyntaxKind::TraitAdaptations);
            self.bump();
            while !self.at(TokenKind::RBrace) && !self.at_end() {
                self.bump();
            }
            self.expect(TokenKind::RBrace, "expected '}'");
            self.finish_node();
        } else {
            self.expect_semicolon();
        }
        marker.complete(self, SyntaxKind::UseTraitDecl);
    }
}
