//! Shared utilities for IDE features.

use smol_str::SmolStr;
use text_size::TextSize;
use tusk_hir::{DocumentSymbols, NameKind, SymbolKind, TypeString};
use tusk_syntax::{SyntaxKind, SyntaxNode, SyntaxToken};

/// Picks the token at an offset. On a boundary, an identifier-like token
/// to the right wins (the caret sits at the start of a word); otherwise
/// the non-trivia token on the left does.
pub(crate) fn token_at(root: &SyntaxNode, offset: TextSize) -> Option<SyntaxToken> {
    let candidates: Vec<SyntaxToken> = root.token_at_offset(offset).collect();
    match candidates.as_slice() {
        [] => None,
        [single] => Some(single.clone()),
        [left, right, ..] => {
            if matches!(right.kind(), SyntaxKind::Ident | SyntaxKind::Variable) {
                Some(right.clone())
            } else if left.kind().is_trivia() && !right.kind().is_trivia() {
                Some(right.clone())
            } else {
                Some(left.clone())
            }
        }
    }
}

/// The previous non-trivia token.
pub(crate) fn prev_meaningful(token: &SyntaxToken) -> Option<SyntaxToken> {
    let mut current = token.prev_token();
    while let Some(t) = current {
        if !t.kind().is_trivia() {
            return Some(t);
        }
        current = t.prev_token();
    }
    None
}

/// The member access surrounding a completion position, if any.
#[derive(Debug)]
pub(crate) struct MemberAccess {
    /// The receiver expression left of the operator.
    pub(crate) receiver: SyntaxNode,
    /// Whether access is via `::` (static) rather than `->`.
    pub(crate) is_static: bool,
    /// The already-typed member prefix, possibly empty.
    pub(crate) prefix: String,
}

/// Detects `expr->` / `expr::` (optionally with a partial member name)
/// at the given offset.
pub(crate) fn member_access_at(root: &SyntaxNode, offset: TextSize) -> Option<MemberAccess> {
    let token = token_at(root, offset)?;

    // Either the caret sits right after the operator, or inside/after a
    // partial member name that follows one.
    let (op, prefix) = match token.kind() {
        SyntaxKind::Arrow | SyntaxKind::DoubleColon => (token, String::new()),
        SyntaxKind::Ident | SyntaxKind::Variable => {
            let typed = &token.text()[..usize::from(
                offset
                    .checked_sub(token.text_range().start())
                    .unwrap_or_default(),
            )
            .min(token.text().len())];
            let prev = prev_meaningful(&token)?;
            if !matches!(prev.kind(), SyntaxKind::Arrow | SyntaxKind::DoubleColon) {
                return None;
            }
            (prev, typed.to_string())
        }
        _ => {
            let prev = prev_meaningful(&token)?;
            if !matches!(prev.kind(), SyntaxKind::Arrow | SyntaxKind::DoubleColon) {
                return None;
            }
            (prev, String::new())
        }
    };

    let is_static = op.kind() == SyntaxKind::DoubleColon;
    let access = op.parent()?;
    let receiver = access.children().find(|child| child.kind().is_expr())?;
    Some(MemberAccess {
        receiver,
        is_static,
        prefix,
    })
}

/// Joins the identifier path of a `NameRef`, without a leading separator.
pub(crate) fn name_ref_text(node: &SyntaxNode) -> SmolStr {
    let mut text = String::new();
    for token in node
        .children_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| !token.kind().is_trivia())
    {
        text.push_str(token.text());
    }
    SmolStr::new(text.strip_prefix('\\').unwrap_or(&text))
}

/// The FQN of the class-like declaration enclosing `node`, if any.
pub(crate) fn enclosing_class_fqn(doc: &DocumentSymbols, node: &SyntaxNode) -> Option<SmolStr> {
    let class_node = node
        .ancestors()
        .find(|ancestor| ancestor.kind().is_class_like())?;
    let name_range = tusk_hir::declaration_name_range(&class_node)?;
    doc.symbols
        .iter()
        .find(|symbol| symbol.kind.is_class_like() && symbol.location.range == name_range)
        .map(|symbol| symbol.name.clone())
}

/// Resolves a `NameRef` receiver of a static access to a class type,
/// honoring `self`, `static`, and `parent`.
pub(crate) fn static_receiver_type(
    doc: &DocumentSymbols,
    name_ref: &SyntaxNode,
) -> TypeString {
    let written = name_ref_text(name_ref);
    if written.eq_ignore_ascii_case("self") || written.eq_ignore_ascii_case("static") {
        return enclosing_class_fqn(doc, name_ref)
            .map(|fqn| TypeString::atom(fqn.as_str()))
            .unwrap_or_default();
    }
    if written.eq_ignore_ascii_case("parent") {
        // The extends target sits first in the enclosing class's
        // associated list.
        let Some(class_fqn) = enclosing_class_fqn(doc, name_ref) else {
            return TypeString::empty();
        };
        return doc
            .symbols
            .iter()
            .find(|symbol| symbol.kind == SymbolKind::Class && symbol.name == class_fqn)
            .and_then(|symbol| symbol.associated.first().cloned())
            .map(|fqn| TypeString::atom(fqn.as_str()))
            .unwrap_or_default();
    }
    let resolver = doc.resolver_at(name_ref.text_range().start());
    let fqn = resolver.resolve(&written, NameKind::Class);
    if fqn.is_empty() {
        TypeString::empty()
    } else {
        TypeString::atom(fqn.as_str())
    }
}

/// The identifier-ish word ending at `offset`, for prefix completion.
pub(crate) fn word_before(root: &SyntaxNode, offset: TextSize) -> String {
    let Some(token) = token_at(root, offset) else {
        return String::new();
    };
    if !matches!(
        token.kind(),
        SyntaxKind::Ident | SyntaxKind::Variable | SyntaxKind::Backslash
    ) {
        return String::new();
    }
    let start = token.text_range().start();
    let len = usize::from(offset.checked_sub(start).unwrap_or_default()).min(token.text().len());
    token.text()[..len].to_string()
}
