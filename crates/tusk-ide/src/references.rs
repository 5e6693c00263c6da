//! Find references.
//!
//! Reference search scans the open documents' trees for name references
//! that resolve to the same FQN as the symbol at the request position.
//! Unopened workspace files are not scanned; this is a documented
//! approximation, since the store keeps symbols but not parse trees for
//! discovered files.

use std::sync::Arc;
use text_size::TextRange;

use tusk_hir::{CancellationToken, Engine, NameKind};
use tusk_syntax::walk::{walk, Visitor};
use tusk_syntax::{LineCol, SyntaxKind, SyntaxNode};

use crate::util::{name_ref_text, token_at};

/// One reference occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceResult {
    /// The document containing the reference.
    pub uri: Arc<str>,
    /// The range of the referencing name.
    pub range: TextRange,
}

/// Finds references to the name at a position, across open documents.
#[must_use]
pub fn references(
    engine: &Engine,
    uri: &str,
    position: LineCol,
    open_documents: &[&str],
    cancel: &CancellationToken,
) -> Vec<ReferenceResult> {
    let Some(document) = engine.document(uri) else {
        return Vec::new();
    };
    let root = document.parse().syntax();
    let offset = document.offset(position);

    // Resolve the target FQN from the name or declaration at the caret.
    let Some(token) = token_at(&root, offset) else {
        return Vec::new();
    };
    let target_fqn = if let Some(name_ref) = token
        .parent_ancestors()
        .find(|node| node.kind() == SyntaxKind::NameRef)
    {
        let resolver = document
            .symbols()
            .resolver_at(name_ref.text_range().start());
        resolver.resolve(&name_ref_text(&name_ref), NameKind::Class)
    } else if let Some(name) = token
        .parent_ancestors()
        .find(|node| node.kind() == SyntaxKind::Name)
    {
        // A declaration name: qualify against the namespace in effect.
        let resolver = document.symbols().resolver_at(name.text_range().start());
        resolver.resolve(name.text().to_string().trim(), NameKind::Class)
    } else {
        return Vec::new();
    };
    if target_fqn.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();
    for open_uri in open_documents {
        if cancel.is_cancelled() {
            return Vec::new();
        }
        let Some(other) = engine.document(open_uri) else {
            continue;
        };
        let other_root = other.parse().syntax();
        collect_matches(&other_root, other.symbols(), &target_fqn, open_uri, &mut results);
    }
    results
}

struct NameRefCollector<'a> {
    doc: &'a tusk_hir::DocumentSymbols,
    target_fqn: &'a str,
    uri: &'a str,
    results: &'a mut Vec<ReferenceResult>,
}

impl Visitor for NameRefCollector<'_> {
    fn preorder(&mut self, node: &SyntaxNode) {
        if node.kind() != SyntaxKind::NameRef {
            return;
        }
        let resolver = self.doc.resolver_at(node.text_range().start());
        let fqn = resolver.resolve(&name_ref_text(node), NameKind::Class);
        if fqn.eq_ignore_ascii_case(self.target_fqn) {
            self.results.push(ReferenceResult {
                uri: Arc::from(self.uri),
                range: node.text_range(),
            });
        }
    }

    fn should_descend(&mut self, node: &SyntaxNode) -> bool {
        // Name references never nest inside other name references.
        node.kind() != SyntaxKind::NameRef
    }
}

fn collect_matches(
    root: &SyntaxNode,
    doc: &tusk_hir::DocumentSymbols,
    target_fqn: &str,
    uri: &str,
    results: &mut Vec<ReferenceResult>,
) {
    let mut collector = NameRefCollector {
        doc,
        target_fqn,
        uri,
        results,
    };
    walk(root, &mut collector);

    // Declarations of the target count as references too.
    for symbol in &doc.symbols {
        if symbol.kind.is_class_like() && symbol.name.eq_ignore_ascii_case(target_fqn) {
            results.push(ReferenceResult {
                uri: Arc::from(uri),
                range: symbol.location.range,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tusk_hir::DocumentItem;

    #[test]
    fn test_references_across_open_documents() {
        let mut engine = Engine::new();
        engine
            .open_document(DocumentItem {
                uri: "file:///lib.php".to_string(),
                language_id: "php".to_string(),
                text: "<?php namespace Lib; class Conn {}".to_string(),
                version: 1,
            })
            .unwrap();
        let app = "<?php\nuse Lib\\Conn;\nfunction f(Conn $c) {}\n$x = new Conn();\n";
        engine
            .open_document(DocumentItem {
                uri: "file:///app.php".to_string(),
                language_id: "php".to_string(),
                text: app.to_string(),
                version: 1,
            })
            .unwrap();

        let offset = app.find("Conn();").unwrap();
        let line = app[..offset].bytes().filter(|b| *b == b'\n').count() as u32;
        let line_start = app[..offset].rfind('\n').map_or(0, |i| i + 1);
        let position = LineCol {
            line,
            col: (offset - line_start) as u32,
        };

        let found = references(
            &engine,
            "file:///app.php",
            position,
            &["file:///app.php", "file:///lib.php"],
            &CancellationToken::new(),
        );

        // The import, the hint, the `new`, and the declaration itself.
        assert!(found.len() >= 4);
        assert!(found.iter().any(|r| &*r.uri == "file:///lib.php"));
    }
}
