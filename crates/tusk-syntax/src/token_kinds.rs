//! Shared token-kind list.
//!
//! `SyntaxKind` mirrors every `TokenKind` variant before adding composite
//! node kinds. The mirroring is done with a callback macro so the list is
//! written exactly once; order here must match `lexer::TokenKind`.

macro_rules! for_each_token_kind {
    ($callback:ident) => {
        $callback! {
            Whitespace,
            LineComment,
            DocComment,
            BlockComment,
            OpenTag,
            CloseTag,
            Semicolon,
            Colon,
            DoubleColon,
            Comma,
            Dot,
            Arrow,
            FatArrow,
            Question,
            QuestionQuestion,
            Backslash,
            Ellipsis,
            Amp,
            AmpAmp,
            Pipe,
            PipePipe,
            LParen,
            RParen,
            LBrace,
            RBrace,
            LBracket,
            RBracket,
            Eq,
            EqEq,
            EqEqEq,
            BangEq,
            BangEqEq,
            Lt,
            Gt,
            LtEq,
            GtEq,
            Plus,
            Minus,
            Star,
            Slash,
            Percent,
            Bang,
            KwNamespace,
            KwUse,
            KwAs,
            KwInsteadof,
            KwClass,
            KwInterface,
            KwTrait,
            KwExtends,
            KwImplements,
            KwFunction,
            KwConst,
            KwPublic,
            KwProtected,
            KwPrivate,
            KwStatic,
            KwAbstract,
            KwFinal,
            KwNew,
            KwInstanceof,
            KwIf,
            KwElseif,
            KwElse,
            KwForeach,
            KwWhile,
            KwFor,
            KwReturn,
            KwEcho,
            KwArray,
            KwTrue,
            KwFalse,
            KwNull,
            IntLiteral,
            FloatLiteral,
            StringLiteral,
            Variable,
            Ident,
            Error,
            Eof,
        }
    };
}

pub(crate) use for_each_token_kind;
