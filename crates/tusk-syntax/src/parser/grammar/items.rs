//! Top-level item parsing: namespaces, imports, class-likes, functions,
//! and constants.

use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

use super::super::{CompletedMarker, Parser};

impl Parser<'_> {
    /// Parse a single top-level item.
    pub(crate) fn parse_item(&mut self) {
        match self.current() {
            TokenKind::KwNamespace => self.parse_namespace(),
            TokenKind::KwUse => self.parse_use_decl(),
            TokenKind::KwClass => self.parse_class(),
            TokenKind::KwAbstract | TokenKind::KwFinal => {
                let mut n = 0;
                while self.peek_kind_n(n).is_modifier() {
                    n += 1;
                }
                if self.peek_kind_n(n) == TokenKind::KwClass {
                    self.parse_class();
                } else {
                    self.error("expected 'class' after modifier");
                    self.bump();
                }
            }
            TokenKind::KwInterface => self.parse_interface(),
            TokenKind::KwTrait if self.peek_kind_n(1) == TokenKind::Ident => self.parse_trait(),
            TokenKind::KwFunction if self.at_function_decl() => self.parse_function_decl(),
            TokenKind::KwConst => self.parse_const_decl(),
            _ => self.parse_statement(),
        }
    }

    /// Returns true if a `function` token starts a named declaration rather
    /// than a closure expression.
    pub(crate) fn at_function_decl(&self) -> bool {
        match self.peek_kind_n(1) {
            TokenKind::Ident => true,
            TokenKind::Amp => self.peek_kind_n(2) == TokenKind::Ident,
            _ => false,
        }
    }

    /// Parse `namespace A\B;` or `namespace A\B { ... }`.
    fn parse_namespace(&mut self) {
        let marker = self.start();
        self.bump(); // namespace

        if self.at(TokenKind::Ident) {
            self.parse_name_ref();
        }

        if self.at(TokenKind::LBrace) {
            self.bump();
            while !self.at(TokenKind::RBrace) && !self.at_end() {
                self.parse_item();
            }
            self.expect(TokenKind::RBrace, "expected '}'");
        } else {
            self.expect_semicolon();
        }

        marker.complete(self, SyntaxKind::NamespaceDef);
    }

    /// Parse `use A\B as C, D\E;` or `use A\{B, C as D};` with optional
    /// `function`/`const` kind flags.
    fn parse_use_decl(&mut self) {
        let marker = self.start();
        self.bump(); // use

        if matches!(self.current(), TokenKind::KwFunction | TokenKind::KwConst) {
            self.bump();
        }

        if self.has_use_group_ahead() {
            self.parse_name_ref(); // group prefix
            self.expect(TokenKind::Backslash, "expected '\\'");
            self.start_node(SyntaxKind::UseGroup);
            self.expect(TokenKind::LBrace, "expected '{'");
            while !self.at(TokenKind::RBrace) && !self.at_end() {
                self.parse_use_clause();
                if self.at(TokenKind::Comma) {
                    self.bump();
                } else {
                    break;
                }
            }
            self.expect(TokenKind::RBrace, "expected '}'");
            self.finish_node();
        } else {
            self.parse_use_clause();
            while self.at(TokenKind::Comma) {
                self.bump();
                self.parse_use_clause();
            }
        }

        self.expect_semicolon();
        marker.complete(self, SyntaxKind::UseDecl);
    }

    /// Parse one import clause: `[function|const] A\B [as C]`.
    fn parse_use_clause(&mut self) {
        self.start_node(SyntaxKind::UseClause);
        if matches!(self.current(), TokenKind::KwFunction | TokenKind::KwConst) {
            self.bump();
        }
        self.parse_name_ref();
        if self.at(TokenKind::KwAs) {
            self.bump();
            if self.at(TokenKind::Ident) {
                self.parse_name();
            } else {
                self.error("expected alias name");
            }
        }
        self.finish_node();
    }

    /// Parse a class declaration, including leading `abstract`/`final`
    /// modifiers.
    pub(crate) fn parse_class(&mut self) {
        let marker = self.start();
        while self.current().is_modifier() {
            self.bump();
        }
        self.expect(TokenKind::KwClass, "expected 'class'");
        if self.at(TokenKind::Ident) {
            self.parse_name();
        } else {
            self.error("expected class name");
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
        marker.complete(self, SyntaxKind::ClassDecl);
    }

    /// Parse an interface declaration. The extends clause of an interface
    /// may list several parents.
    fn parse_interface(&mut self) {
        let marker = self.start();
        self.bump(); // interface
        if self.at(TokenKind::Ident) {
            self.parse_name();
        } else {
            self.error("expected interface name");
        }
        if self.at(TokenKind::KwExtends) {
            self.start_node(SyntaxKind::ExtendsClause);
            self.bump();
            self.parse_name_ref();
            while self.at(TokenKind::Comma) {
                self.bump();
                self.parse_name_ref();
            }
            self.finish_node();
        }
        self.parse_class_body();
        marker.complete(self, SyntaxKind::InterfaceDecl);
    }

    /// Parse a trait declaration.
    fn parse_trait(&mut self) {
        let marker = self.start();
        self.bump(); // trait
        if self.at(TokenKind::Ident) {
            self.parse_name();
        } else {
            self.error("expected trait name");
        }
        self.parse_class_body();
        marker.complete(self, SyntaxKind::TraitDecl);
    }

    /// Parse a named function declaration.
    pub(crate) fn parse_function_decl(&mut self) {
        let marker = self.start();
        self.bump(); // function
        if self.at(TokenKind::Amp) {
            self.bump();
        }
        if self.at(TokenKind::Ident) {
            self.parse_name();
        } else {
            self.error("expected function name");
        }
        self.parse_param_list();
        if self.at(TokenKind::Colon) {
            self.bump();
            self.parse_type_hint();
        }
        if self.at(TokenKind::LBrace) {
            self.parse_block();
        } else {
            self.error("expected function body");
        }
        marker.complete(self, SyntaxKind::FunctionDecl);
    }

    /// Parse a top-level `const A = 1, B = 2;` declaration.
    fn parse_const_decl(&mut self) {
        let marker = self.start();
        self.parse_const_tail();
        marker.complete(self, SyntaxKind::ConstDecl);
    }

    /// Shared tail of `const` declarations: the keyword, elements, and
    /// terminator.
    pub(crate) fn parse_const_tail(&mut self) {
        self.expect(TokenKind::KwConst, "expected 'const'");
        loop {
            self.start_node(SyntaxKind::ConstElement);
            if self.at(TokenKind::Ident) {
                self.parse_name();
            } else {
                self.error("expected constant name");
            }
            if self.at(TokenKind::Eq) {
                self.bump();
                self.parse_expression();
            } else {
                self.error("expected '='");
            }
            self.finish_node();
            if self.at(TokenKind::Comma) {
                self.bump();
            } else {
                break;
            }
        }
        self.expect_semicolon();
    }

    /// Parse a declared name (an identifier at a declaration site).
    pub(crate) fn parse_name(&mut self) {
        self.start_node(SyntaxKind::Name);
        self.bump();
        self.finish_node();
    }

    /// Parse a possibly qualified name reference: `Foo`, `A\B`, `\A\B`,
    /// `namespace\A`, `static`.
    pub(crate) fn parse_name_ref(&mut self) -> CompletedMarker {
        let marker = self.start();
        if self.at(TokenKind::Backslash) {
            self.bump();
        }
        if self.at(TokenKind::KwNamespace) {
            self.bump();
            self.expect(TokenKind::Backslash, "expected '\\'");
        }
        if matches!(
            self.current(),
            TokenKind::Ident | TokenKind::KwStatic | TokenKind::KwArray
        ) {
            self.bump();
            while self.at(TokenKind::Backslash) && self.peek_kind_n(1) == TokenKind::Ident {
                self.bump();
                self.bump();
            }
        } else {
            self.error("expected name");
        }
        marker.complete(self, SyntaxKind::NameRef)
    }

    /// Parse a type hint: `?int`, `Foo|Bar|null`, `\A\B`.
    pub(crate) fn parse_type_hint(&mut self) {
        self.start_node(SyntaxKind::TypeHint);
        if self.at(TokenKind::Question) {
            self.bump();
        }
        self.parse_type_hint_atom();
        while self.at(TokenKind::Pipe) {
            self.bump();
            self.parse_type_hint_atom();
        }
        self.finish_node();
    }

    fn parse_type_hint_atom(&mut self) {
        match self.current() {
            TokenKind::Ident | TokenKind::Backslash | TokenKind::KwNamespace => {
                self.parse_name_ref();
            }
            TokenKind::KwArray | TokenKind::KwStatic | TokenKind::KwNull => self.bump(),
            _ => self.error("expected type"),
        }
    }

    /// Parse a parameter list.
    pub(crate) fn parse_param_list(&mut self) {
        self.start_node(SyntaxKind::ParamList);
        self.expect(TokenKind::LParen, "expected '('");

        while !self.at(TokenKind::RParen) && !self.at_end() {
            self.start_node(SyntaxKind::Param);
            if self.current().can_start_type_hint() && !self.at(TokenKind::KwStatic) {
                self.parse_type_hint();
            }
            if self.at(TokenKind::Amp) {
                self.bump();
            }
            if self.at(TokenKind::Ellipsis) {
                self.bump();
            }
            if self.at(TokenKind::Variable) {
                self.bump();
            } else {
                self.error("expected parameter variable");
                if !matches!(self.current(), TokenKind::RParen | TokenKind::Comma)
                    && !self.at_end()
                {
                    self.bump();
                }
            }
            if self.at(TokenKind::Eq) {
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
