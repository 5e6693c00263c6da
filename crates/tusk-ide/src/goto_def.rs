//! Go to definition.

use std::sync::Arc;
use text_size::TextRange;

use tusk_hir::type_resolver;
use tusk_hir::{
    CancellationToken, Engine, MergeStrategy, NameKind, Symbol, SymbolKind, TypeAggregate,
};
use tusk_syntax::{LineCol, SyntaxKind, SyntaxNode};

use crate::util::{name_ref_text, static_receiver_type, token_at};

/// Result of a go-to-definition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionResult {
    /// The document containing the definition.
    pub uri: Arc<str>,
    /// The range of the definition.
    pub range: TextRange,
}

impl DefinitionResult {
    fn of(symbol: &Symbol) -> Self {
        Self {
            uri: symbol.location.uri.clone(),
            range: symbol.location.range,
        }
    }
}

/// Finds the definition of the symbol at a position.
#[must_use]
pub fn goto_definition(
    engine: &Engine,
    uri: &str,
    position: LineCol,
    cancel: &CancellationToken,
) -> Option<DefinitionResult> {
    let document = engine.document(uri)?;
    let root = document.parse().syntax();
    let offset = document.offset(position);
    let token = token_at(&root, offset)?;

    // A member name after `->` / `::`.
    if let Some(name) = token
        .parent_ancestors()
        .find(|node| node.kind() == SyntaxKind::Name)
    {
        if let Some(access) = name.parent().filter(|parent| {
            matches!(parent.kind(), SyntaxKind::MemberExpr | SyntaxKind::ScopedExpr)
        }) {
            return member_definition(engine, document.symbols(), &access, &name, cancel);
        }
    }

    // A (possibly qualified) name reference.
    if let Some(name_ref) = token
        .parent_ancestors()
        .find(|node| node.kind() == SyntaxKind::NameRef)
    {
        return name_definition(engine, document.symbols(), &name_ref);
    }

    // A variable: its parameter declaration, if it is one.
    if token.kind() == SyntaxKind::Variable {
        return variable_definition(document.symbols(), &token.parent()?, token.text());
    }

    None
}

fn member_definition(
    engine: &Engine,
    doc: &tusk_hir::DocumentSymbols,
    access: &SyntaxNode,
    name: &SyntaxNode,
    cancel: &CancellationToken,
) -> Option<DefinitionResult> {
    let receiver = access.children().find(|child| child.kind().is_expr())?;
    let receiver_type =
        if access.kind() == SyntaxKind::ScopedExpr && receiver.kind() == SyntaxKind::NameRef {
            static_receiver_type(doc, &receiver)
        } else {
            type_resolver::resolve_node(engine.store(), doc, &receiver, cancel)
        };

    let member = name.text().to_string().trim().to_string();
    for class_fqn in receiver_type.atomic_classes() {
        let Ok(aggregate) = TypeAggregate::for_fqn(engine.store(), &class_fqn, cancel) else {
            continue;
        };
        if let Some(found) = aggregate
            .members(MergeStrategy::Override)
            .into_iter()
            .find(|candidate| {
                if candidate.kind.case_sensitive_name() {
                    candidate.name == member
                } else {
                    candidate.name.eq_ignore_ascii_case(&member)
                }
            })
        {
            return Some(DefinitionResult::of(&found));
        }
    }
    None
}

fn name_definition(
    engine: &Engine,
    doc: &tusk_hir::DocumentSymbols,
    name_ref: &SyntaxNode,
) -> Option<DefinitionResult> {
    let written = name_ref_text(name_ref);
    let resolver = doc.resolver_at(name_ref.text_range().start());

    // Class first, then function, then constant, mirroring how references
    // usually appear.
    for kind in [NameKind::Class, NameKind::Function, NameKind::Constant] {
        let fqn = resolver.resolve(&written, kind);
        let found = engine.store().find(&fqn, |symbol| match kind {
            NameKind::Class => symbol.kind.is_class_like(),
            NameKind::Function => symbol.kind == SymbolKind::Function,
            NameKind::Constant => symbol.kind == SymbolKind::Constant,
        });
        if let Some(symbol) = found.first() {
            return Some(DefinitionResult::of(symbol));
        }
    }
    None
}

fn variable_definition(
    doc: &tusk_hir::DocumentSymbols,
    var_parent: &SyntaxNode,
    var_name: &str,
) -> Option<DefinitionResult> {
    // A parameter of the enclosing callable.
    let callable = var_parent.ancestors().find(|ancestor| {
        matches!(
            ancestor.kind(),
            SyntaxKind::FunctionDecl | SyntaxKind::MethodDecl
        )
    })?;
    let range = tusk_hir::declaration_name_range(&callable)?;

    let symbol = if callable.kind() == SyntaxKind::FunctionDecl {
        doc.symbols
            .iter()
            .find(|symbol| symbol.kind == SymbolKind::Function && symbol.location.range == range)
            .cloned()
    } else {
        doc.symbols
            .iter()
            .filter(|symbol| symbol.kind.is_class_like())
            .flat_map(|class| class.children.iter())
            .find(|member| member.kind == SymbolKind::Method && member.location.range == range)
            .cloned()
    }?;

    symbol
        .children
        .iter()
        .find(|child| child.kind == SymbolKind::Parameter && child.name == var_name)
        .map(|param| DefinitionResult::of(param))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tusk_hir::DocumentItem;

    fn engine_with(uri: &str, text: &str) -> Engine {
        let mut engine = Engine::new();
        engine
            .open_document(DocumentItem {
                uri: uri.to_string(),
                language_id: "php".to_string(),
                text: text.to_string(),
                version: 1,
            })
            .unwrap();
        engine
    }

    fn position_of(text: &str, pattern: &str) -> LineCol {
        let offset = text.find(pattern).expect("pattern");
        let line = text[..offset].bytes().filter(|b| *b == b'\n').count() as u32;
        let line_start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
        LineCol {
            line,
            col: (offset - line_start) as u32,
        }
    }

    #[test]
    fn test_goto_class_from_new() {
        let text = "<?php\nclass Target {}\n$a = new Target();\n";
        let engine = engine_with("file:///t.php", text);
        let result = goto_definition(
            &engine,
            "file:///t.php",
            position_of(text, "Target();"),
            &CancellationToken::new(),
        )
        .unwrap();
        assert_eq!(&*result.uri, "file:///t.php");
        // The definition range anchors on the declared name, not the
        // reference.
        let covered = &text[usize::from(result.range.start())..usize::from(result.range.end())];
        assert_eq!(covered, "Target");
        assert!(usize::from(result.range.start()) < text.find("new Target").unwrap());
    }

    #[test]
    fn test_goto_method_through_member_access() {
        let text = "<?php
class Svc { public function run(): int {} }
$s = new Svc();
$s->run();
";
        let engine = engine_with("file:///t.php", text);
        let result = goto_definition(
            &engine,
            "file:///t.php",
            position_of(text, "run();"),
            &CancellationToken::new(),
        )
        .unwrap();
        let covered = &text[usize::from(result.range.start())..usize::from(result.range.end())];
        assert_eq!(covered, "run");
        assert!(usize::from(result.range.start()) < text.find("$s->run").unwrap());
    }

    #[test]
    fn test_goto_across_documents() {
        let mut engine = engine_with("file:///lib.php", "<?php namespace Lib; class Conn {}");
        let text = "<?php\nuse Lib\\Conn;\n$c = new Conn();\n";
        engine
            .open_document(DocumentItem {
                uri: "file:///app.php".to_string(),
                language_id: "php".to_string(),
                text: text.to_string(),
                version: 1,
            })
            .unwrap();

        let result = goto_definition(
            &engine,
            "file:///app.php",
            position_of(text, "Conn();"),
            &CancellationToken::new(),
        )
        .unwrap();
        assert_eq!(&*result.uri, "file:///lib.php");
    }
}
