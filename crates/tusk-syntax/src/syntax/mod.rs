//! Syntax tree types for PHP.
//!
//! This module provides the `rowan`-based syntax tree implementation,
//! including the `SyntaxKind` enum that covers both tokens and composite
//! nodes.

use crate::lexer::TokenKind;
use crate::token_kinds::for_each_token_kind;

macro_rules! define_syntax_kind {
    ($($token:ident),* $(,)?) => {
        /// All syntax node and token kinds in PHP source text.
        ///
        /// This enum includes both token kinds (from the lexer) and composite
        /// node kinds (produced by the parser).
        // Variants mirror lexer/token names; documenting each would be noisy.
        #[allow(missing_docs)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u16)]
        pub enum SyntaxKind {
            // =========================================================================
            // TOKEN KINDS (mirrors TokenKind)
            // =========================================================================
            $($token,)*

            // COMPOSITE NODE KINDS (produced by parser)
            // =========================================================================
            /// Root node of a source file
            SourceFile,

            /// A namespace declaration: `namespace A\B;` or `namespace A\B { ... }`
            NamespaceDef,

            /// An import declaration: `use A\B as C;`
            UseDecl,

            /// A grouped import: `use A\{B, C as D};`
            UseGroup,

            /// A single import clause: `A\B as C`
            UseClause,

            /// A trait-use statement inside a class body: `use T1, T2;`
            UseTraitDecl,

            /// The `{ ... }` adaptation block of a trait-use statement
            TraitAdaptations,

            /// A class declaration: `class Name ... { ... }`
            ClassDecl,

            /// An interface declaration: `interface Name { ... }`
            InterfaceDecl,

            /// A trait declaration: `trait Name { ... }`
            TraitDecl,

            /// A top-level function declaration
            FunctionDecl,

            /// A method declaration inside a class-like body
            MethodDecl,

            /// A property declaration: `public ?Foo $x, $y = 1;`
            PropertyDecl,

            /// A class constant declaration: `const A = 1, B = 2;`
            ClassConstDecl,

            /// A top-level constant declaration: `const A = 1;`
            ConstDecl,

            /// One `name = value` element of a constant declaration
            ConstElement,

            /// Extends clause: `extends Base`
            ExtendsClause,

            /// Implements clause: `implements I1, I2`
            ImplementsClause,

            /// A declared name (identifier at a declaration site)
            Name,

            /// A (possibly qualified) name reference: `Foo`, `A\B`, `\A\B`
            NameRef,

            /// A type hint: `?int`, `Foo|Bar`, `\A\B`
            TypeHint,

            /// Parameter list in a declaration
            ParamList,

            /// Single parameter
            Param,

            /// Argument list in a call
            ArgList,

            /// Single argument
            Arg,

            /// Brace-delimited statement block
            Block,

            /// If statement: `if (...) ... elseif ... else ...`
            IfStmt,

            /// Elseif branch
            ElseIfBranch,

            /// Else branch
            ElseBranch,

            /// Foreach statement: `foreach (expr as $k => $v) ...`
            ForeachStmt,

            /// While statement
            WhileStmt,

            /// For statement
            ForStmt,

            /// Return statement
            ReturnStmt,

            /// Echo statement
            EchoStmt,

            /// Expression statement
            ExprStmt,

            /// Empty statement: `;`
            EmptyStmt,

            // Expressions
            /// Assignment: `$x = expr`
            AssignExpr,

            /// Binary expression: `a + b`
            BinaryExpr,

            /// Unary expression: `!x`, `-x`
            UnaryExpr,

            /// Instanceof check: `$x instanceof Foo`
            InstanceofExpr,

            /// Instance member access: `expr->name`
            MemberExpr,

            /// Scoped (static) access: `Expr::name`, `Expr::$var`, `Expr::class`
            ScopedExpr,

            /// Function/method call: `callee(args)`
            CallExpr,

            /// Object creation: `new Foo(args)`
            NewExpr,

            /// Index expression: `arr[i]`
            IndexExpr,

            /// Parenthesized expression: `(expr)`
            ParenExpr,

            /// Array literal: `[1, 2]` or `array(1, 2)`
            ArrayExpr,

            /// Single array item: `expr` or `key => value`
            ArrayItem,

            /// Anonymous function: `function (...) use (...) { ... }`
            ClosureExpr,

            /// The `use (...)` capture clause of a closure
            ClosureUse,

            /// A `$variable` reference
            VarRef,

            /// Literal value
            Literal,
        }
    };
}

for_each_token_kind!(define_syntax_kind);

impl SyntaxKind {
    /// Returns `true` if this is a trivia kind.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace
                | Self::LineComment
                | Self::DocComment
                | Self::BlockComment
                | Self::OpenTag
                | Self::CloseTag
        )
    }

    /// Returns `true` if this is a token kind (not a composite node).
    #[must_use]
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::Eof as u16)
    }

    /// Returns `true` if this is a composite node kind.
    #[must_use]
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns `true` if this kind is a class-like declaration node.
    #[must_use]
    pub fn is_class_like(self) -> bool {
        matches!(
            self,
            Self::ClassDecl | Self::InterfaceDecl | Self::TraitDecl
        )
    }

    /// Returns `true` if this kind is an expression node.
    #[must_use]
    pub fn is_expr(self) -> bool {
        matches!(
            self,
            Self::AssignExpr
                | Self::BinaryExpr
                | Self::UnaryExpr
                | Self::InstanceofExpr
                | Self::MemberExpr
                | Self::ScopedExpr
                | Self::CallExpr
                | Self::NewExpr
                | Self::IndexExpr
                | Self::ParenExpr
                | Self::ArrayExpr
                | Self::ClosureExpr
                | Self::VarRef
                | Self::NameRef
                | Self::Literal
        )
    }
}

macro_rules! map_token_kinds {
    ($($name:ident),* $(,)?) => {
        impl From<TokenKind> for SyntaxKind {
            fn from(kind: TokenKind) -> Self {
                match kind {
                    $(TokenKind::$name => SyntaxKind::$name,)*
                }
            }
        }
    };
}

for_each_token_kind!(map_token_kinds);

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// The language type for PHP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PhpLanguage {}

macro_rules! define_syntax_kinds {
    ($($token:ident),* $(,)?) => {
        const SYNTAX_KINDS: &[SyntaxKind] = &[
            $(SyntaxKind::$token,)*
            SyntaxKind::SourceFile,
            SyntaxKind::NamespaceDef,
            SyntaxKind::UseDecl,
            SyntaxKind::UseGroup,
            SyntaxKind::UseClause,
            SyntaxKind::UseTraitDecl,
            SyntaxKind::TraitAdaptations,
            SyntaxKind::ClassDecl,
            SyntaxKind::InterfaceDecl,
            SyntaxKind::TraitDecl,
            SyntaxKind::FunctionDecl,
            SyntaxKind::MethodDecl,
            SyntaxKind::PropertyDecl,
            SyntaxKind::ClassConstDecl,
            SyntaxKind::ConstDecl,
            SyntaxKind::ConstElement,
            SyntaxKind::ExtendsClause,
            SyntaxKind::ImplementsClause,
            SyntaxKind::Name,
            SyntaxKind::NameRef,
            SyntaxKind::TypeHint,
            SyntaxKind::ParamList,
            SyntaxKind::Param,
            SyntaxKind::ArgList,
            SyntaxKind::Arg,
            SyntaxKind::Block,
            SyntaxKind::IfStmt,
            SyntaxKind::ElseIfBranch,
            SyntaxKind::ElseBranch,
            SyntaxKind::ForeachStmt,
            SyntaxKind::WhileStmt,
            SyntaxKind::ForStmt,
            SyntaxKind::ReturnStmt,
            SyntaxKind::EchoStmt,
            SyntaxKind::ExprStmt,
            SyntaxKind::EmptyStmt,
            SyntaxKind::AssignExpr,
            SyntaxKind::BinaryExpr,
            SyntaxKind::UnaryExpr,
            SyntaxKind::InstanceofExpr,
            SyntaxKind::MemberExpr,
            SyntaxKind::ScopedExpr,
            SyntaxKind::CallExpr,
            SyntaxKind::NewExpr,
            SyntaxKind::IndexExpr,
            SyntaxKind::ParenExpr,
            SyntaxKind::ArrayExpr,
            SyntaxKind::ArrayItem,
            SyntaxKind::ClosureExpr,
            SyntaxKind::ClosureUse,
            SyntaxKind::VarRef,
            SyntaxKind::Literal,
        ];
    };
}

for_each_token_kind!(define_syntax_kinds);

impl rowan::Language for PhpLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        SYNTAX_KINDS
            .get(raw.0 as usize)
            .copied()
            .unwrap_or(SyntaxKind::Error)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// A syntax node in the PHP syntax tree.
pub type SyntaxNode = rowan::SyntaxNode<PhpLanguage>;

/// A syntax token in the PHP syntax tree.
pub type SyntaxToken = rowan::SyntaxToken<PhpLanguage>;

/// A syntax element (either node or token) in the PHP syntax tree.
pub type SyntaxElement = rowan::SyntaxElement<PhpLanguage>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_kind_to_syntax_kind() {
        assert_eq!(SyntaxKind::from(TokenKind::KwClass), SyntaxKind::KwClass);
        assert_eq!(SyntaxKind::from(TokenKind::Ident), SyntaxKind::Ident);
        assert_eq!(SyntaxKind::from(TokenKind::Variable), SyntaxKind::Variable);
    }

    #[test]
    fn test_is_trivia() {
        assert!(SyntaxKind::Whitespace.is_trivia());
        assert!(SyntaxKind::DocComment.is_trivia());
        assert!(SyntaxKind::OpenTag.is_trivia());
        assert!(!SyntaxKind::Ident.is_trivia());
    }

    #[test]
    fn test_is_token_vs_node() {
        assert!(SyntaxKind::Ident.is_token());
        assert!(SyntaxKind::KwIf.is_token());
        assert!(!SyntaxKind::IfStmt.is_token());
        assert!(!SyntaxKind::ClassDecl.is_token());

        assert!(!SyntaxKind::Ident.is_node());
        assert!(SyntaxKind::IfStmt.is_node());
    }

    #[test]
    fn test_raw_round_trip() {
        use rowan::Language;
        for kind in [
            SyntaxKind::SourceFile,
            SyntaxKind::ClassDecl,
            SyntaxKind::VarRef,
            SyntaxKind::Literal,
        ] {
            let raw = PhpLanguage::kind_to_raw(kind);
            assert_eq!(PhpLanguage::kind_from_raw(raw), kind);
        }
    }
}
