//! Workspace symbol search.

use smol_str::SmolStr;
use std::sync::Arc;
use text_size::TextRange;

use tusk_hir::{Engine, SymbolKind};

/// One workspace symbol match.
#[derive(Debug, Clone)]
pub struct WorkspaceSymbol {
    /// The simple (unqualified) name.
    pub name: SmolStr,
    /// The fully-qualified name.
    pub fqn: SmolStr,
    /// The symbol kind.
    pub kind: SymbolKind,
    /// The declaring document.
    pub uri: Arc<str>,
    /// The declaration range.
    pub range: TextRange,
}

/// Searches the store by FQN prefix, case-insensitively.
#[must_use]
pub fn workspace_symbols(engine: &Engine, query: &str) -> Vec<WorkspaceSymbol> {
    engine
        .workspace_symbols(query)
        .into_iter()
        .map(|symbol| WorkspaceSymbol {
            name: SmolStr::new(symbol.short_name()),
            fqn: symbol.name.clone(),
            kind: symbol.kind,
            uri: symbol.location.uri.clone(),
            range: symbol.location.range,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tusk_hir::DocumentItem;

    #[test]
    fn test_prefix_query() {
        let mut engine = Engine::new();
        engine
            .open_document(DocumentItem {
                uri: "file:///t.php".to_string(),
                language_id: "php".to_string(),
                text: "<?php namespace App; class UserRepo {} class UserModel {} class Order {}"
                    .to_string(),
                version: 1,
            })
            .unwrap();

        let matches = workspace_symbols(&engine, "app\\user");
        let names: Vec<&str> = matches.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["UserModel", "UserRepo"]);
    }
}
