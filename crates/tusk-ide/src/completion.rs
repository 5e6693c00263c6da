//! Code completion.
//!
//! Member completion after `->` and `::` goes through the type resolver
//! and the type aggregate; elsewhere, names come from the symbol store,
//! the document's imports, and a keyword table.

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tracing::debug;

use tusk_hir::type_resolver;
use tusk_hir::{CancellationToken, Engine, MergeStrategy, Modifiers, SymbolKind, TypeAggregate};
use tusk_syntax::{LineCol, SyntaxKind};

use crate::util::{member_access_at, static_receiver_type, word_before};

/// The kind of completion item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionKind {
    /// A keyword.
    Keyword,
    /// A class.
    Class,
    /// An interface.
    Interface,
    /// A trait.
    Trait,
    /// A function.
    Function,
    /// A method.
    Method,
    /// A property.
    Property,
    /// A constant (class or namespace level).
    Constant,
    /// A variable.
    Variable,
    /// A namespace.
    Namespace,
}

/// A completion item.
#[derive(Debug, Clone)]
pub struct CompletionItem {
    /// The label shown in the completion list.
    pub label: SmolStr,
    /// The kind of completion.
    pub kind: CompletionKind,
    /// Additional detail (e.g. a type).
    pub detail: Option<SmolStr>,
    /// Documentation.
    pub documentation: Option<SmolStr>,
    /// Text to insert (if different from label).
    pub insert_text: Option<SmolStr>,
    /// Sort priority (lower = higher priority).
    pub sort_priority: u32,
}

impl CompletionItem {
    /// Creates a new completion item.
    pub fn new(label: impl Into<SmolStr>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            documentation: None,
            insert_text: None,
            sort_priority: 100,
        }
    }

    /// Sets the detail text.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<SmolStr>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Sets the documentation.
    #[must_use]
    pub fn with_documentation(mut self, doc: impl Into<SmolStr>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    /// Sets the sort priority.
    #[must_use]
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.sort_priority = priority;
        self
    }
}

static STATEMENT_KEYWORDS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "class", "interface", "trait", "function", "const", "namespace", "use", "if", "else",
        "elseif", "foreach", "while", "for", "return", "echo", "new", "instanceof", "static",
        "public", "protected", "private", "abstract", "final", "extends", "implements", "true",
        "false", "null", "array",
    ]
});

/// Computes completions at a position.
#[must_use]
pub fn completions(
    engine: &Engine,
    uri: &str,
    position: LineCol,
    cancel: &CancellationToken,
) -> Vec<CompletionItem> {
    let Some(document) = engine.document(uri) else {
        return Vec::new();
    };
    let root = document.parse().syntax();
    let offset = document.offset(position);

    let mut items = if let Some(access) = member_access_at(&root, offset) {
        let receiver_type = if access.is_static && access.receiver.kind() == SyntaxKind::NameRef {
            static_receiver_type(document.symbols(), &access.receiver)
        } else {
            type_resolver::resolve_node(
                engine.store(),
                document.symbols(),
                &access.receiver,
                cancel,
            )
        };
        debug!(receiver = %receiver_type, static_access = access.is_static, "member completion");

        let receiver_is_this = access.receiver.kind() == SyntaxKind::VarRef
            && access.receiver.text().to_string().trim() == "$this";

        let mut seen: FxHashSet<SmolStr> = FxHashSet::default();
        let mut items = Vec::new();
        for class_fqn in receiver_type.atomic_classes() {
            let Ok(aggregate) = TypeAggregate::for_fqn(engine.store(), &class_fqn, cancel) else {
                continue;
            };
            member_items(
                &aggregate,
                access.is_static,
                receiver_is_this,
                &access.prefix,
                &mut seen,
                &mut items,
            );
        }
        items
    } else {
        name_items(engine, uri, position, &word_before(&root, offset))
    };

    items.sort_by(|a, b| {
        a.sort_priority
            .cmp(&b.sort_priority)
            .then_with(|| a.label.cmp(&b.label))
    });
    items
}

fn member_items(
    aggregate: &TypeAggregate,
    static_access: bool,
    receiver_is_this: bool,
    prefix: &str,
    seen: &mut FxHashSet<SmolStr>,
    items: &mut Vec<CompletionItem>,
) {
    let prefix_stripped = prefix.trim_start_matches('$');

    for member in aggregate.members(MergeStrategy::Documented) {
        if !member
            .name
            .to_ascii_lowercase()
            .starts_with(&prefix_stripped.to_ascii_lowercase())
        {
            continue;
        }
        // Non-public members only complete on `$this`.
        if !receiver_is_this
            && (member.modifiers.contains(Modifiers::PRIVATE)
                || member.modifiers.contains(Modifiers::PROTECTED))
        {
            continue;
        }
        let is_static_member = member.modifiers.contains(Modifiers::STATIC);
        let keep = match member.kind {
            SymbolKind::Method => true,
            SymbolKind::Property => static_access == is_static_member,
            SymbolKind::ClassConstant => static_access,
            _ => false,
        };
        if !keep {
            continue;
        }
        if !seen.insert(member.name.clone()) {
            continue;
        }

        let kind = match member.kind {
            SymbolKind::Method => CompletionKind::Method,
            SymbolKind::Property => CompletionKind::Property,
            _ => CompletionKind::Constant,
        };
        let label = match (member.kind, static_access) {
            (SymbolKind::Property, true) => SmolStr::new(format!("${}", member.name)),
            _ => member.name.clone(),
        };
        let mut item = CompletionItem::new(label, kind);
        if !member.type_string.is_empty() {
            item = item.with_detail(member.type_string.to_string());
        }
        if !member.description.is_empty() {
            item = item.with_documentation(member.description.clone());
        }
        items.push(item);
    }
}

fn name_items(
    engine: &Engine,
    uri: &str,
    position: LineCol,
    word: &str,
) -> Vec<CompletionItem> {
    let mut items = Vec::new();

    // Keywords, at a lower priority than resolved symbols.
    for keyword in STATEMENT_KEYWORDS.iter() {
        if keyword.starts_with(&word.to_ascii_lowercase()) {
            items.push(
                CompletionItem::new(*keyword, CompletionKind::Keyword).with_priority(200),
            );
        }
    }

    let Some(document) = engine.document(uri) else {
        return items;
    };

    // Import aliases are completable by their alias name.
    for rule in document.symbols().imports.rules() {
        if rule
            .alias
            .to_ascii_lowercase()
            .starts_with(&word.to_ascii_lowercase())
        {
            items.push(
                CompletionItem::new(rule.alias.clone(), CompletionKind::Class)
                    .with_detail(rule.fqn.clone())
                    .with_priority(40),
            );
        }
    }

    // Store symbols: try the word as written and rebased onto the current
    // namespace.
    let namespace = engine.namespace_at(uri, position);
    let mut prefixes = vec![word.to_string()];
    if !namespace.is_empty() && !word.starts_with('\\') {
        prefixes.push(format!("{namespace}\\{word}"));
    }

    let mut seen: FxHashSet<SmolStr> = FxHashSet::default();
    for prefix in prefixes {
        for symbol in engine
            .store()
            .fuzzy_match(prefix.trim_start_matches('\\'), |s| !s.kind.is_member())
        {
            if !seen.insert(symbol.name.clone()) {
                continue;
            }
            let kind = match symbol.kind {
                SymbolKind::Class => CompletionKind::Class,
                SymbolKind::Interface => CompletionKind::Interface,
                SymbolKind::Trait => CompletionKind::Trait,
                SymbolKind::Function => CompletionKind::Function,
                SymbolKind::Constant => CompletionKind::Constant,
                SymbolKind::Namespace => CompletionKind::Namespace,
                _ => continue,
            };
            let mut item = CompletionItem::new(symbol.short_name(), kind)
                .with_detail(symbol.name.clone())
                .with_priority(50);
            if !symbol.description.is_empty() {
                item = item.with_documentation(symbol.description.clone());
            }
            items.push(item);
        }
    }

    items
}
