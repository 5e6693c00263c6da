//! The global symbol store.
//!
//! An index of every top-level symbol in the workspace, keyed by
//! case-folded FQN. Duplicate FQNs across documents are kept side by side;
//! queries filter by kind. A per-URI index supports atomic replacement
//! when a document reparses.

use smol_str::SmolStr;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use indexmap::IndexMap;

use crate::error::EngineError;
use crate::reader::DocumentSymbols;
use crate::symbols::{Symbol, SymbolKind};

/// Case-folds an FQN for indexing: one leading separator stripped, ASCII
/// lowercased. Case-sensitive kinds re-check the exact name on lookup.
fn fold_fqn(name: &str) -> SmolStr {
    let stripped = name.strip_prefix('\\').unwrap_or(name);
    SmolStr::new(stripped.to_ascii_lowercase())
}

/// The global symbol index.
#[derive(Debug, Default)]
pub struct SymbolStore {
    /// Folded FQN -> symbols carrying that name.
    by_fqn: BTreeMap<SmolStr, Vec<Arc<Symbol>>>,
    /// URI -> the top-level symbols owned by that document.
    by_uri: IndexMap<Arc<str>, Vec<Arc<Symbol>>>,
}

impl SymbolStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts all top-level symbols of a document.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicateDocument`] if the URI is already
    /// registered; callers must `remove` first.
    pub fn add(&mut self, table: &DocumentSymbols) -> Result<usize, EngineError> {
        if self.by_uri.contains_key(&table.uri) {
            return Err(EngineError::DuplicateDocument(table.uri.to_string()));
        }

        let mut owned = Vec::with_capacity(table.symbols.len());
        for symbol in &table.symbols {
            if symbol.name.is_empty() {
                continue;
            }
            self.by_fqn
                .entry(fold_fqn(&symbol.name))
                .or_default()
                .push(symbol.clone());
            owned.push(symbol.clone());
        }

        let count = owned.len();
        self.by_uri.insert(table.uri.clone(), owned);
        debug!(uri = %table.uri, count, "indexed document");
        Ok(count)
    }

    /// Removes all symbols registered under `uri`. Returns how many were
    /// dropped.
    pub fn remove(&mut self, uri: &str) -> usize {
        let Some(owned) = self.by_uri.shift_remove(uri) else {
            return 0;
        };

        for symbol in &owned {
            let key = fold_fqn(&symbol.name);
            if let Some(bucket) = self.by_fqn.get_mut(&key) {
                bucket.retain(|existing| !Arc::ptr_eq(existing, symbol));
                if bucket.is_empty() {
                    self.by_fqn.remove(&key);
                }
            }
        }
        debug!(uri, count = owned.len(), "dropped document symbols");
        owned.len()
    }

    /// Atomically replaces a document's symbols with a new table.
    pub fn replace(&mut self, table: &DocumentSymbols) -> usize {
        self.remove(&table.uri);
        self.add(table).unwrap_or(0)
    }

    /// Handles a document change event by replacing the document's symbols.
    pub fn on_document_change(&mut self, table: &DocumentSymbols) {
        self.replace(table);
    }

    /// Finds symbols by FQN. Class-likes, functions, and namespaces match
    /// case-insensitively; case-sensitive kinds require an exact name.
    #[must_use]
    pub fn find(&self, fqn: &str, predicate: impl Fn(&Symbol) -> bool) -> Vec<Arc<Symbol>> {
        let stripped = fqn.strip_prefix('\\').unwrap_or(fqn);
        let Some(bucket) = self.by_fqn.get(&fold_fqn(stripped)) else {
            return Vec::new();
        };
        bucket
            .iter()
            .filter(|symbol| {
                let name_matches = if symbol.kind.case_sensitive_name() {
                    symbol.name == stripped
                } else {
                    true
                };
                name_matches && predicate(symbol)
            })
            .cloned()
            .collect()
    }

    /// Finds symbols of one kind by FQN.
    #[must_use]
    pub fn find_kind(&self, fqn: &str, kind: SymbolKind) -> Vec<Arc<Symbol>> {
        self.find(fqn, |symbol| symbol.kind == kind)
    }

    /// Returns the first class-like symbol with this FQN.
    #[must_use]
    pub fn class_like(&self, fqn: &str) -> Option<Arc<Symbol>> {
        self.find(fqn, |symbol| symbol.kind.is_class_like())
            .into_iter()
            .next()
    }

    /// Returns symbols whose FQN starts with `prefix`, case-insensitively,
    /// in stable name order. Suitable for workspace-symbol queries and
    /// completion.
    #[must_use]
    pub fn fuzzy_match(
        &self,
        prefix: &str,
        predicate: impl Fn(&Symbol) -> bool,
    ) -> Vec<Arc<Symbol>> {
        let folded = fold_fqn(prefix);
        let mut results: Vec<Arc<Symbol>> = self
            .by_fqn
            .range(folded.clone()..)
            .take_while(|(key, _)| key.starts_with(folded.as_str()))
            .flat_map(|(_, bucket)| bucket.iter())
            .filter(|symbol| predicate(symbol))
            .cloned()
            .collect();
        results.sort_by(|a, b| a.name.cmp(&b.name));
        results
    }

    /// Returns the symbols owned by one document.
    #[must_use]
    pub fn document_symbols(&self, uri: &str) -> Option<&[Arc<Symbol>]> {
        self.by_uri.get(uri).map(Vec::as_slice)
    }

    /// Returns `true` if a document is registered under `uri`.
    #[must_use]
    pub fn contains_document(&self, uri: &str) -> bool {
        self.by_uri.contains_key(uri)
    }

    /// Returns the number of distinct FQNs in the index.
    #[must_use]
    pub fn fqn_count(&self) -> usize {
        self.by_fqn.len()
    }

    /// Returns the number of registered documents.
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.by_uri.len()
    }

    /// Returns `true` if the store holds no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_fqn.is_empty() && self.by_uri.is_empty()
    }

    /// Iterates all indexed symbols in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Symbol>> {
        self.by_fqn.values().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_document;
    use tusk_syntax::parse;

    fn table(uri: &str, source: &str) -> DocumentSymbols {
        read_document(Arc::from(uri), &parse(source))
    }

    #[test]
    fn test_add_find_remove_round_trip() {
        let mut store = SymbolStore::new();
        let doc = table("file:///a.php", "<?php namespace X; class Y {}");
        store.add(&doc).unwrap();

        assert_eq!(store.find_kind("X\\Y", SymbolKind::Class).len(), 1);
        assert_eq!(store.find_kind("x\\y", SymbolKind::Class).len(), 1);

        store.remove("file:///a.php");
        assert!(store.is_empty());
    }

    #[test]
    fn test_duplicate_document_rejected() {
        let mut store = SymbolStore::new();
        let doc = table("file:///a.php", "<?php class A {}");
        store.add(&doc).unwrap();
        assert!(matches!(
            store.add(&doc),
            Err(EngineError::DuplicateDocument(_))
        ));
    }

    #[test]
    fn test_same_fqn_from_two_documents() {
        let mut store = SymbolStore::new();
        store
            .add(&table("file:///a.php", "<?php namespace X; class Y {}"))
            .unwrap();
        store
            .add(&table("file:///b.php", "<?php namespace X; class Y {}"))
            .unwrap();

        assert_eq!(store.find_kind("X\\Y", SymbolKind::Class).len(), 2);

        store.remove("file:///a.php");
        let remaining = store.find_kind("X\\Y", SymbolKind::Class);
        assert_eq!(remaining.len(), 1);
        assert_eq!(&*remaining[0].location.uri, "file:///b.php");
    }

    #[test]
    fn test_constants_are_case_sensitive() {
        let mut store = SymbolStore::new();
        store
            .add(&table("file:///a.php", "<?php const LIMIT = 10;"))
            .unwrap();

        assert_eq!(store.find_kind("LIMIT", SymbolKind::Constant).len(), 1);
        assert!(store.find_kind("limit", SymbolKind::Constant).is_empty());
    }

    #[test]
    fn test_fuzzy_match_sorted() {
        let mut store = SymbolStore::new();
        store
            .add(&table(
                "file:///a.php",
                "<?php namespace App; class Zeta {} class Alpha {} function beta() {}",
            ))
            .unwrap();

        let matches = store.fuzzy_match("App\\", |_| true);
        let names: Vec<&str> = matches.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["App\\Alpha", "App\\Zeta", "App\\beta"]);
    }

    #[test]
    fn test_replace_swaps_content() {
        let mut store = SymbolStore::new();
        store
            .add(&table("file:///a.php", "<?php class Old {}"))
            .unwrap();
        store.replace(&table("file:///a.php", "<?php class New2 {}"));

        assert!(store.find_kind("Old", SymbolKind::Class).is_empty());
        assert_eq!(store.find_kind("New2", SymbolKind::Class).len(), 1);
    }
}
