//! The engine facade: live documents, debounced reparsing, and queries.
//!
//! The engine owns the symbol store and the set of open documents. All
//! operations run on one serialized request loop; the debounce clock is
//! observed through [`Engine::poll`], which the host calls between
//! requests, so a reparse never interleaves with a running traversal.
//! Reparse completions replace the document's symbols atomically and
//! broadcast a change event to subscribers.

use crossbeam_channel::{unbounded, Receiver, Sender};
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use text_size::TextSize;
use tusk_syntax::{parse, LineCol, LineIndex, Parse};

use crate::aggregate::TypeAggregate;
use crate::cancel::CancellationToken;
use crate::diagnostics::Diagnostic;
use crate::error::EngineError;
use crate::reader::{read_document, DocumentSymbols};
use crate::store::SymbolStore;
use crate::symbols::Symbol;
use crate::type_resolver;
use crate::types::TypeString;

/// The quiet window between the last edit and a reparse.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// A document handed to the engine by the editor.
#[derive(Debug, Clone)]
pub struct DocumentItem {
    /// The document URI.
    pub uri: String,
    /// The language identifier (informational).
    pub language_id: String,
    /// The full text.
    pub text: String,
    /// The editor's version counter.
    pub version: i32,
}

/// One incremental content change: a ranged splice, or a full-text
/// replacement when `range` is `None`.
#[derive(Debug, Clone)]
pub struct ContentChange {
    /// The replaced range in line/column positions.
    pub range: Option<(LineCol, LineCol)>,
    /// The replacement text.
    pub text: String,
}

/// A change broadcast to engine subscribers.
#[derive(Debug, Clone)]
pub enum DocumentEvent {
    /// A document was opened and indexed.
    Opened {
        /// The document URI.
        uri: Arc<str>,
    },
    /// A document reparsed; its symbols were replaced in the store.
    Changed {
        /// The document URI.
        uri: Arc<str>,
        /// The version the reparse observed.
        version: i32,
        /// Top-level symbols now owned by the document.
        symbol_count: usize,
    },
    /// A document was closed and its symbols dropped.
    Closed {
        /// The document URI.
        uri: Arc<str>,
    },
}

/// A live, parsed document.
#[derive(Debug)]
pub struct OpenDocument {
    uri: Arc<str>,
    version: i32,
    text: String,
    parse: Parse,
    line_index: LineIndex,
    symbols: DocumentSymbols,
    dirty_since: Option<Instant>,
}

impl OpenDocument {
    /// The document URI.
    #[must_use]
    pub fn uri(&self) -> &Arc<str> {
        &self.uri
    }

    /// The current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The editor version last applied.
    #[must_use]
    pub fn version(&self) -> i32 {
        self.version
    }

    /// The last completed parse. Edits newer than the last reparse are not
    /// reflected until the debounce fires or `flush` runs.
    #[must_use]
    pub fn parse(&self) -> &Parse {
        &self.parse
    }

    /// The line index for the current text.
    #[must_use]
    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// The document's symbol tree as of the last reparse.
    #[must_use]
    pub fn symbols(&self) -> &DocumentSymbols {
        &self.symbols
    }

    /// Parse diagnostics as of the last reparse.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.symbols.diagnostics
    }

    /// Converts a line/column position to a byte offset.
    #[must_use]
    pub fn offset(&self, pos: LineCol) -> TextSize {
        self.line_index.offset(&self.text, pos)
    }
}

/// The semantic engine.
pub struct Engine {
    documents: FxHashMap<Arc<str>, OpenDocument>,
    store: SymbolStore,
    debounce: Duration,
    subscribers: Vec<Sender<DocumentEvent>>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with the default debounce window.
    #[must_use]
    pub fn new() -> Self {
        Self::with_debounce(DEFAULT_DEBOUNCE)
    }

    /// Creates an engine with a custom debounce window.
    #[must_use]
    pub fn with_debounce(debounce: Duration) -> Self {
        Self {
            documents: FxHashMap::default(),
            store: SymbolStore::new(),
            debounce,
            subscribers: Vec::new(),
        }
    }

    /// The global symbol store.
    #[must_use]
    pub fn store(&self) -> &SymbolStore {
        &self.store
    }

    /// An open document by URI.
    #[must_use]
    pub fn document(&self, uri: &str) -> Option<&OpenDocument> {
        self.documents.get(uri)
    }

    /// Subscribes to document events.
    pub fn subscribe(&mut self) -> Receiver<DocumentEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    fn publish(&mut self, event: &DocumentEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }

    /// Opens a document: parses, reads symbols, and indexes them.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicateDocument`] when the URI is already
    /// open.
    pub fn open_document(&mut self, item: DocumentItem) -> Result<usize, EngineError> {
        let uri: Arc<str> = Arc::from(item.uri.as_str());
        if self.documents.contains_key(&uri) {
            return Err(EngineError::DuplicateDocument(item.uri));
        }

        let parsed = parse(&item.text);
        let symbols = read_document(uri.clone(), &parsed);
        // `replace` rather than `add`: the file may have been discovered
        // during workspace indexing before being opened.
        let count = self.store.replace(&symbols);

        let document = OpenDocument {
            uri: uri.clone(),
            version: item.version,
            line_index: LineIndex::new(&item.text),
            text: item.text,
            parse: parsed,
            symbols,
            dirty_since: None,
        };
        self.documents.insert(uri.clone(), document);
        debug!(uri = %uri, count, "opened document");
        self.publish(&DocumentEvent::Opened { uri });
        Ok(count)
    }

    /// Closes a document and drops its symbols.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DocumentNotFound`] when the URI is not open.
    pub fn close_document(&mut self, uri: &str) -> Result<(), EngineError> {
        let Some(document) = self.documents.remove(uri) else {
            return Err(EngineError::DocumentNotFound(uri.to_string()));
        };
        self.store.remove(uri);
        self.publish(&DocumentEvent::Closed { uri: document.uri });
        Ok(())
    }

    /// Applies incremental edits to a document's buffer and schedules a
    /// reparse after the quiet window.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DocumentNotFound`] when the URI is not open.
    pub fn edit_document(
        &mut self,
        uri: &str,
        version: i32,
        changes: &[ContentChange],
    ) -> Result<(), EngineError> {
        let Some(document) = self.documents.get_mut(uri) else {
            return Err(EngineError::DocumentNotFound(uri.to_string()));
        };

        for change in changes {
            match &change.range {
                None => {
                    document.text = change.text.clone();
                }
                Some((start, end)) => {
                    let start = document.line_index.offset(&document.text, *start);
                    let end = document.line_index.offset(&document.text, *end);
                    let (start, end) = (usize::from(start), usize::from(end.max(start)));
                    document.text.replace_range(start..end, &change.text);
                }
            }
            document.line_index = LineIndex::new(&document.text);
        }

        document.version = version;
        document.dirty_since = Some(Instant::now());
        Ok(())
    }

    /// Reparses every document whose quiet window has elapsed. Returns the
    /// URIs that were refreshed. The host calls this between requests and
    /// on timer ticks.
    pub fn poll(&mut self) -> Vec<Arc<str>> {
        let now = Instant::now();
        let due: Vec<Arc<str>> = self
            .documents
            .values()
            .filter(|document| {
                document
                    .dirty_since
                    .is_some_and(|since| now.duration_since(since) >= self.debounce)
            })
            .map(|document| document.uri.clone())
            .collect();

        for uri in &due {
            self.reparse(uri);
        }
        due
    }

    /// Forces an immediate reparse of a dirty document.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DocumentNotFound`] when the URI is not open.
    pub fn flush(&mut self, uri: &str) -> Result<(), EngineError> {
        if !self.documents.contains_key(uri) {
            return Err(EngineError::DocumentNotFound(uri.to_string()));
        }
        if self
            .documents
            .get(uri)
            .is_some_and(|document| document.dirty_since.is_some())
        {
            self.reparse(uri);
        }
        Ok(())
    }

    fn reparse(&mut self, uri: &str) {
        let Some(document) = self.documents.get_mut(uri) else {
            return;
        };
        let parsed = parse(&document.text);
        let symbols = read_document(document.uri.clone(), &parsed);
        document.parse = parsed;
        document.symbols = symbols;
        document.dirty_since = None;

        let uri = document.uri.clone();
        let version = document.version;
        let table = document.symbols.clone();

        // The store is the engine's own subscriber to reparse completion;
        // the replacement is atomic with respect to queries because the
        // loop is serialized.
        self.store.on_document_change(&table);
        let symbol_count = table.symbols.len();
        debug!(uri = %uri, version, symbol_count, "reparsed document");
        self.publish(&DocumentEvent::Changed {
            uri,
            version,
            symbol_count,
        });
    }

    /// Indexes a workspace file without keeping it open. Returns the
    /// number of symbols indexed.
    pub fn discover(&mut self, item: &DocumentItem) -> usize {
        let uri: Arc<str> = Arc::from(item.uri.as_str());
        if self.documents.contains_key(&uri) {
            // Open documents are already indexed with fresher content.
            return self
                .store
                .document_symbols(&uri)
                .map_or(0, <[Arc<Symbol>]>::len);
        }
        let parsed = parse(&item.text);
        let symbols = read_document(uri, &parsed);
        self.store.replace(&symbols)
    }

    /// Drops a document's symbols from the index. Returns how many were
    /// removed.
    pub fn forget(&mut self, uri: &str) -> usize {
        self.documents.remove(uri);
        self.store.remove(uri)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The symbol tree of an open document.
    #[must_use]
    pub fn document_symbols(&self, uri: &str) -> Option<&DocumentSymbols> {
        self.documents.get(uri).map(OpenDocument::symbols)
    }

    /// Workspace-wide symbol search by FQN prefix.
    #[must_use]
    pub fn workspace_symbols(&self, query: &str) -> Vec<Arc<Symbol>> {
        self.store.fuzzy_match(query, |_| true)
    }

    /// Resolves the type of the expression at a position.
    #[must_use]
    pub fn resolve_type(
        &self,
        uri: &str,
        position: LineCol,
        cancel: &CancellationToken,
    ) -> TypeString {
        let Some(document) = self.documents.get(uri) else {
            return TypeString::empty();
        };
        let offset = document.offset(position);
        type_resolver::type_at(
            &self.store,
            &document.symbols,
            &document.parse.syntax(),
            offset,
            cancel,
        )
    }

    /// Builds a type aggregate for a class-like FQN.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotClassLike`] when the FQN does not name a
    /// class, interface, or trait.
    pub fn aggregate(
        &self,
        fqn: &str,
        cancel: &CancellationToken,
    ) -> Result<TypeAggregate, EngineError> {
        TypeAggregate::for_fqn(&self.store, fqn, cancel)
    }

    /// The namespace in effect at a position, for providers that assemble
    /// their own resolvers.
    #[must_use]
    pub fn namespace_at(&self, uri: &str, position: LineCol) -> SmolStr {
        let Some(document) = self.documents.get(uri) else {
            return SmolStr::default();
        };
        let offset = document.offset(position);
        document.symbols.namespace_at(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(uri: &str, text: &str) -> DocumentItem {
        DocumentItem {
            uri: uri.to_string(),
            language_id: "php".to_string(),
            text: text.to_string(),
            version: 1,
        }
    }

    #[test]
    fn test_open_close_round_trip() {
        let mut engine = Engine::new();
        let count = engine
            .open_document(item("file:///a.php", "<?php class A {} function f() {}"))
            .unwrap();
        assert_eq!(count, 2);
        assert!(engine.store().contains_document("file:///a.php"));

        engine.close_document("file:///a.php").unwrap();
        assert!(engine.store().is_empty());
    }

    #[test]
    fn test_open_twice_is_an_error() {
        let mut engine = Engine::new();
        engine
            .open_document(item("file:///a.php", "<?php"))
            .unwrap();
        assert!(matches!(
            engine.open_document(item("file:///a.php", "<?php")),
            Err(EngineError::DuplicateDocument(_))
        ));
    }

    #[test]
    fn test_edit_flush_replaces_symbols() {
        let mut engine = Engine::new();
        engine
            .open_document(item("file:///a.php", "<?php class Old {}"))
            .unwrap();

        engine
            .edit_document(
                "file:///a.php",
                2,
                &[ContentChange {
                    range: None,
                    text: "<?php class Renamed {}".to_string(),
                }],
            )
            .unwrap();

        // Before the flush, the store still sees the old parse.
        assert_eq!(engine.workspace_symbols("Old").len(), 1);

        engine.flush("file:///a.php").unwrap();
        assert!(engine.workspace_symbols("Old").is_empty());
        assert_eq!(engine.workspace_symbols("Renamed").len(), 1);
    }

    #[test]
    fn test_ranged_edit() {
        let mut engine = Engine::new();
        engine
            .open_document(item("file:///a.php", "<?php class Abc {}"))
            .unwrap();

        // Replace "Abc" (line 0, cols 12..15).
        engine
            .edit_document(
                "file:///a.php",
                2,
                &[ContentChange {
                    range: Some((
                        LineCol { line: 0, col: 12 },
                        LineCol { line: 0, col: 15 },
                    )),
                    text: "Xyz".to_string(),
                }],
            )
            .unwrap();
        engine.flush("file:///a.php").unwrap();

        assert_eq!(engine.workspace_symbols("Xyz").len(), 1);
    }

    #[test]
    fn test_poll_respects_quiet_window() {
        let mut engine = Engine::with_debounce(Duration::from_secs(3600));
        engine
            .open_document(item("file:///a.php", "<?php class A {}"))
            .unwrap();
        engine
            .edit_document(
                "file:///a.php",
                2,
                &[ContentChange {
                    range: None,
                    text: "<?php class B {}".to_string(),
                }],
            )
            .unwrap();

        // The window has not elapsed; nothing reparses.
        assert!(engine.poll().is_empty());

        let mut eager = Engine::with_debounce(Duration::ZERO);
        eager
            .open_document(item("file:///a.php", "<?php class A {}"))
            .unwrap();
        eager
            .edit_document(
                "file:///a.php",
                2,
                &[ContentChange {
                    range: None,
                    text: "<?php class B {}".to_string(),
                }],
            )
            .unwrap();
        let reparsed = eager.poll();
        assert_eq!(reparsed.len(), 1);
        assert_eq!(eager.workspace_symbols("B").len(), 1);
    }

    #[test]
    fn test_change_events_reach_subscribers() {
        let mut engine = Engine::with_debounce(Duration::ZERO);
        let events = engine.subscribe();
        engine
            .open_document(item("file:///a.php", "<?php class A {}"))
            .unwrap();
        engine
            .edit_document(
                "file:///a.php",
                2,
                &[ContentChange {
                    range: None,
                    text: "<?php class B {} class C {}".to_string(),
                }],
            )
            .unwrap();
        engine.poll();

        let received: Vec<DocumentEvent> = events.try_iter().collect();
        assert!(matches!(received[0], DocumentEvent::Opened { .. }));
        assert!(matches!(
            received[1],
            DocumentEvent::Changed {
                version: 2,
                symbol_count: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_discover_and_forget() {
        let mut engine = Engine::new();
        let count = engine.discover(&item("file:///lib.php", "<?php class Lib {}"));
        assert_eq!(count, 1);
        assert!(engine.document("file:///lib.php").is_none());
        assert_eq!(engine.workspace_symbols("Lib").len(), 1);

        assert_eq!(engine.forget("file:///lib.php"), 1);
        assert!(engine.store().is_empty());
    }
}
