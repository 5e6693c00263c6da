//! Document symbol outline.

use smol_str::SmolStr;
use text_size::TextRange;

use tusk_hir::{Engine, Symbol, SymbolKind};

/// One outline entry, with nested children.
#[derive(Debug, Clone)]
pub struct DocumentSymbol {
    /// The symbol's display name.
    pub name: SmolStr,
    /// The symbol kind.
    pub kind: SymbolKind,
    /// The declaration range.
    pub range: TextRange,
    /// Type or signature detail.
    pub detail: Option<SmolStr>,
    /// Nested members or parameters.
    pub children: Vec<DocumentSymbol>,
}

/// Builds the outline tree of an open document.
#[must_use]
pub fn document_symbols(engine: &Engine, uri: &str) -> Vec<DocumentSymbol> {
    let Some(doc) = engine.document_symbols(uri) else {
        return Vec::new();
    };
    doc.symbols.iter().map(|symbol| convert(symbol)).collect()
}

fn convert(symbol: &Symbol) -> DocumentSymbol {
    DocumentSymbol {
        name: symbol.name.clone(),
        kind: symbol.kind,
        range: symbol.location.range,
        detail: (!symbol.type_string.is_empty())
            .then(|| SmolStr::new(symbol.type_string.to_string())),
        children: symbol
            .children
            .iter()
            // Parameters stay out of the outline; members stay in.
            .filter(|child| child.kind != SymbolKind::Parameter)
            .map(|child| convert(child))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tusk_hir::DocumentItem;

    #[test]
    fn test_outline_shape() {
        let mut engine = Engine::new();
        engine
            .open_document(DocumentItem {
                uri: "file:///t.php".to_string(),
                language_id: "php".to_string(),
                text: "<?php\nnamespace App;\nclass A { public $x; public function m(int $p) {} }\n"
                    .to_string(),
                version: 1,
            })
            .unwrap();

        let outline = document_symbols(&engine, "file:///t.php");
        // The namespace entry and the class.
        assert_eq!(outline.len(), 2);
        let class = outline
            .iter()
            .find(|entry| entry.kind == SymbolKind::Class)
            .unwrap();
        assert_eq!(class.name, "App\\A");
        assert_eq!(class.children.len(), 2);
        // The method's parameter does not appear in the outline.
        let method = class
            .children
            .iter()
            .find(|child| child.kind == SymbolKind::Method)
            .unwrap();
        assert!(method.children.is_empty());
    }
}
