//! The symbol reader.
//!
//! Walks a parsed document and produces its symbol tree: top-level symbols
//! with fully-qualified names, the import table, namespace regions, and
//! parse diagnostics. Children are assembled before their parents, so every
//! constructed symbol is complete when attached.

use smol_str::SmolStr;
use std::sync::Arc;
use text_size::TextRange;

use tusk_syntax::{Parse, SyntaxKind, SyntaxNode};

use crate::diagnostics::Diagnostic;
use crate::docblock::{self, Docblock, PropertyAccess, Tag};
use crate::nameres::{ImportTable, NameKind, NameResolver};
use crate::symbols::{Location, Modifiers, Symbol, SymbolKind};
use crate::types::TypeString;

/// A region of the document governed by one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceRegion {
    /// The namespace name, empty for the global namespace.
    pub name: SmolStr,
    /// The covered byte range. Statement-form namespaces extend to the end
    /// of the file; later regions shadow earlier ones.
    pub range: TextRange,
}

/// The symbol tree of a single document.
#[derive(Debug, Clone)]
pub struct DocumentSymbols {
    /// The document URI.
    pub uri: Arc<str>,
    /// Top-level symbols in source order, FQN-named.
    pub symbols: Vec<Arc<Symbol>>,
    /// The document's import table.
    pub imports: ImportTable,
    /// Namespace regions in source order.
    pub namespaces: Vec<NamespaceRegion>,
    /// Parse diagnostics for the document.
    pub diagnostics: Vec<Diagnostic>,
}

impl DocumentSymbols {
    /// Returns the namespace in effect at `offset`.
    #[must_use]
    pub fn namespace_at(&self, offset: text_size::TextSize) -> SmolStr {
        self.namespaces
            .iter()
            .rev()
            .find(|region| region.range.contains_inclusive(offset))
            .map(|region| region.name.clone())
            .unwrap_or_default()
    }

    /// Builds a name resolver for a position in this document.
    #[must_use]
    pub fn resolver_at(&self, offset: text_size::TextSize) -> NameResolver {
        NameResolver::new(self.namespace_at(offset), self.imports.clone())
    }

    /// Counts all symbols in the tree, children included.
    #[must_use]
    pub fn symbol_count(&self) -> usize {
        fn count(symbols: &[Arc<Symbol>]) -> usize {
            symbols
                .iter()
                .map(|symbol| 1 + count(&symbol.children))
                .sum()
        }
        count(&self.symbols)
    }

    /// Finds a top-level symbol by FQN, case-insensitively.
    #[must_use]
    pub fn find(&self, fqn: &str) -> Option<&Arc<Symbol>> {
        self.symbols
            .iter()
            .find(|symbol| symbol.name.eq_ignore_ascii_case(fqn))
    }
}

/// Reads the symbol tree of a parsed document.
#[must_use]
pub fn read_document(uri: Arc<str>, parse: &Parse) -> DocumentSymbols {
    let root = parse.syntax();
    let mut reader = SymbolReader {
        uri: uri.clone(),
        namespace: SmolStr::default(),
        imports: ImportTable::new(),
        namespaces: Vec::new(),
        symbols: Vec::new(),
        end_of_file: root.text_range().end(),
    };

    reader.read_items(&root);

    DocumentSymbols {
        uri,
        symbols: reader.symbols,
        imports: reader.imports,
        namespaces: reader.namespaces,
        diagnostics: parse.errors().iter().map(Diagnostic::from).collect(),
    }
}

struct SymbolReader {
    uri: Arc<str>,
    namespace: SmolStr,
    imports: ImportTable,
    namespaces: Vec<NamespaceRegion>,
    symbols: Vec<Arc<Symbol>>,
    end_of_file: text_size::TextSize,
}

impl SymbolReader {
    /// The location of a declaration: its name token's range when it has
    /// one, the whole node otherwise. Name tokens are the precise anchor
    /// for navigation and for matching syntax nodes back to symbols.
    fn location(&self, node: &SyntaxNode) -> Location {
        let range = declaration_name_range(node).unwrap_or_else(|| node.text_range());
        Location::new(self.uri.clone(), range)
    }

    fn resolver(&self) -> NameResolver {
        NameResolver::new(self.namespace.clone(), self.imports.clone())
    }

    fn qualify(&self, name: &str) -> SmolStr {
        if self.namespace.is_empty() {
            SmolStr::new(name)
        } else {
            SmolStr::new(format!("{}\\{}", self.namespace, name))
        }
    }

    fn read_items(&mut self, parent: &SyntaxNode) {
        for child in parent.children() {
            self.read_item(&child);
        }
    }

    fn read_item(&mut self, node: &SyntaxNode) {
        match node.kind() {
            SyntaxKind::NamespaceDef => self.read_namespace(node),
            SyntaxKind::UseDecl => self.read_use_decl(node),
            SyntaxKind::ClassDecl => self.read_class_like(node, SymbolKind::Class),
            SyntaxKind::InterfaceDecl => self.read_class_like(node, SymbolKind::Interface),
            SyntaxKind::TraitDecl => self.read_class_like(node, SymbolKind::Trait),
            SyntaxKind::FunctionDecl => {
                if let Some(symbol) = self.read_callable(node, SymbolKind::Function, "") {
                    self.symbols.push(Arc::new(symbol));
                }
            }
            SyntaxKind::ConstDecl => self.read_const_decl(node),
            _ => {}
        }
    }

    fn read_namespace(&mut self, node: &SyntaxNode) {
        let name = node
            .children()
            .find(|child| child.kind() == SyntaxKind::NameRef)
            .map(|name_ref| name_ref_text(&name_ref))
            .unwrap_or_default();

        if !name.is_empty() {
            let symbol = Symbol::new(SymbolKind::Namespace, name.clone(), self.location(node));
            self.symbols.push(Arc::new(symbol));
        }

        let braced = node
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .any(|token| token.kind() == SyntaxKind::LBrace);

        if braced {
            let previous = std::mem::replace(&mut self.namespace, name.clone());
            self.namespaces.push(NamespaceRegion {
                name,
                range: node.text_range(),
            });
            self.read_items(node);
            self.namespace = previous;
        } else {
            // Statement form scopes to the end of the file; a later
            // namespace statement shadows this region.
            self.namespace = name.clone();
            self.namespaces.push(NamespaceRegion {
                name,
                range: TextRange::new(node.text_range().start(), self.end_of_file),
            });
        }
    }

    fn read_use_decl(&mut self, node: &SyntaxNode) {
        let base_kind = use_kind_flag(node).unwrap_or(NameKind::Class);

        if let Some(group) = node
            .children()
            .find(|child| child.kind() == SyntaxKind::UseGroup)
        {
            let prefix = node
                .children()
                .find(|child| child.kind() == SyntaxKind::NameRef)
                .map(|name_ref| name_ref_text(&name_ref))
                .unwrap_or_default();

            for clause in group
                .children()
                .filter(|child| child.kind() == SyntaxKind::UseClause)
            {
                self.read_use_clause(&clause, Some(prefix.as_str()), base_kind);
            }
        } else {
            for clause in node
                .children()
                .filter(|child| child.kind() == SyntaxKind::UseClause)
            {
                self.read_use_clause(&clause, None, base_kind);
            }
        }
    }

    fn read_use_clause(&mut self, clause: &SyntaxNode, prefix: Option<&str>, base_kind: NameKind) {
        let kind = use_kind_flag(clause).unwrap_or(base_kind);
        let Some(name_ref) = clause
            .children()
            .find(|child| child.kind() == SyntaxKind::NameRef)
        else {
            return;
        };
        let path = name_ref_text(&name_ref);
        if path.is_empty() {
            return;
        }

        let fqn = match prefix {
            Some(prefix) if !prefix.is_empty() => format!("{prefix}\\{path}"),
            _ => path.to_string(),
        };

        let alias = clause
            .children()
            .find(|child| child.kind() == SyntaxKind::Name)
            .map(|name| SmolStr::new(name.text().to_string().trim()))
            .unwrap_or_else(|| {
                SmolStr::new(fqn.rsplit('\\').next().unwrap_or(fqn.as_str()))
            });

        self.imports.add(alias, &fqn, kind);
    }

    fn read_class_like(&mut self, node: &SyntaxNode, kind: SymbolKind) {
        let Some(name) = declared_name(node) else {
            return;
        };
        let fqn = self.qualify(&name);
        let resolver = self.resolver();

        let mut symbol = Symbol::new(kind, fqn.clone(), self.location(node));
        symbol.modifiers = class_modifiers(node);

        // extends / implements targets, resolved to absolute form.
        for clause in node.children().filter(|child| {
            matches!(
                child.kind(),
                SyntaxKind::ExtendsClause | SyntaxKind::ImplementsClause
            )
        }) {
            for name_ref in clause
                .children()
                .filter(|child| child.kind() == SyntaxKind::NameRef)
            {
                let resolved = resolver.resolve(&name_ref_text(&name_ref), NameKind::Class);
                if !resolved.is_empty() {
                    symbol.associated.push(resolved);
                }
            }
        }

        // Members.
        for member in node.children() {
            match member.kind() {
                SyntaxKind::MethodDecl => {
                    if let Some(method) = self.read_callable(&member, SymbolKind::Method, &fqn) {
                        symbol.children.push(Arc::new(method));
                    }
                }
                SyntaxKind::PropertyDecl => {
                    for property in self.read_properties(&member, &fqn) {
                        symbol.children.push(Arc::new(property));
                    }
                }
                SyntaxKind::ClassConstDecl => {
                    for constant in self.read_constants(&member, SymbolKind::ClassConstant, &fqn) {
                        symbol.children.push(Arc::new(constant));
                    }
                }
                SyntaxKind::UseTraitDecl => {
                    for name_ref in member
                        .children()
                        .filter(|child| child.kind() == SyntaxKind::NameRef)
                    {
                        let resolved =
                            resolver.resolve(&name_ref_text(&name_ref), NameKind::Class);
                        if !resolved.is_empty() {
                            symbol.associated.push(resolved);
                        }
                    }
                }
                _ => {}
            }
        }

        // Docblock last: the summary lands on the symbol, and
        // @property/@method tags synthesize magic members.
        if let Some(doc) = doc_for(node) {
            symbol.description = SmolStr::new(&doc.summary);
            for tag in &doc.tags {
                match tag {
                    Tag::Property {
                        access,
                        type_string,
                        name,
                        description,
                    } => {
                        let mut magic = Symbol::new(
                            SymbolKind::Property,
                            name.trim_start_matches('$'),
                            self.location(node),
                        );
                        magic.modifiers = Modifiers::MAGIC.union(Modifiers::PUBLIC);
                        match access {
                            PropertyAccess::ReadOnly => {
                                magic.modifiers.insert(Modifiers::READONLY);
                            }
                            PropertyAccess::WriteOnly => {
                                magic.modifiers.insert(Modifiers::WRITEONLY);
                            }
                            PropertyAccess::ReadWrite => {}
                        }
                        magic.type_string = self.resolve_type(type_string, &resolver);
                        magic.description = SmolStr::new(description);
                        magic.scope = fqn.clone();
                        symbol.children.push(Arc::new(magic));
                    }
                    Tag::Method {
                        is_static,
                        return_type,
                        name,
                        params,
                        description,
                    } => {
                        let mut magic =
                            Symbol::new(SymbolKind::Method, name.clone(), self.location(node));
                        magic.modifiers = Modifiers::MAGIC.union(Modifiers::PUBLIC);
                        if *is_static {
                            magic.modifiers.insert(Modifiers::STATIC);
                        }
                        magic.type_string = self.resolve_type(return_type, &resolver);
                        magic.description = SmolStr::new(description);
                        magic.scope = fqn.clone();
                        for param in params {
                            let mut param_symbol = Symbol::new(
                                SymbolKind::Parameter,
                                param.name.clone(),
                                self.location(node),
                            );
                            param_symbol.type_string =
                                self.resolve_type(&param.type_string, &resolver);
                            param_symbol.scope = SmolStr::new(format!("{fqn}::{name}"));
                            magic.children.push(Arc::new(param_symbol));
                        }
                        symbol.children.push(Arc::new(magic));
                    }
                    _ => {}
                }
            }
        }

        self.symbols.push(Arc::new(symbol));
    }

    /// Reads a function or method declaration, parameters included.
    fn read_callable(&self, node: &SyntaxNode, kind: SymbolKind, scope: &str) -> Option<Symbol> {
        let name = declared_name(node)?;
        let resolver = self.resolver();
        let doc = doc_for(node);

        let full_name = if kind == SymbolKind::Function {
            self.qualify(&name)
        } else {
            SmolStr::new(name.as_str())
        };

        let mut symbol = Symbol::new(kind, full_name, self.location(node));
        symbol.scope = SmolStr::new(scope);
        if kind == SymbolKind::Method {
            symbol.modifiers = member_modifiers(node);
        }

        // Return type: declaration first, docblock unioned after.
        if let Some(hint) = node
            .children()
            .find(|child| child.kind() == SyntaxKind::TypeHint)
        {
            symbol.type_string = self.resolve_type(&type_hint_to_type(&hint), &resolver);
        }
        if let Some(doc) = &doc {
            if let Some(return_type) = doc.return_type() {
                symbol.type_string = symbol
                    .type_string
                    .merge(&self.resolve_type(return_type, &resolver));
            }
            symbol.description = SmolStr::new(&doc.summary);
        }

        // Parameters, left to right. A parameter without a name is skipped.
        if let Some(param_list) = node
            .children()
            .find(|child| child.kind() == SyntaxKind::ParamList)
        {
            for param in param_list
                .children()
                .filter(|child| child.kind() == SyntaxKind::Param)
            {
                let Some(var_token) = param
                    .children_with_tokens()
                    .filter_map(|element| element.into_token())
                    .find(|token| token.kind() == SyntaxKind::Variable)
                else {
                    continue;
                };
                let param_name = SmolStr::new(var_token.text());

                let mut param_symbol = Symbol::new(
                    SymbolKind::Parameter,
                    param_name.clone(),
                    Location::new(self.uri.clone(), var_token.text_range()),
                );
                param_symbol.scope = if scope.is_empty() {
                    symbol.name.clone()
                } else {
                    SmolStr::new(format!("{}::{}", scope, symbol.name))
                };

                if let Some(hint) = param
                    .children()
                    .find(|child| child.kind() == SyntaxKind::TypeHint)
                {
                    param_symbol.type_string =
                        self.resolve_type(&type_hint_to_type(&hint), &resolver);
                }
                if let Some(doc) = &doc {
                    if let Some(tag_type) = doc.param_type(&param_name) {
                        param_symbol.type_string = param_symbol
                            .type_string
                            .merge(&self.resolve_type(tag_type, &resolver));
                    }
                }

                symbol.children.push(Arc::new(param_symbol));
            }
        }

        Some(symbol)
    }

    /// Reads a property declaration; one symbol per declared variable.
    fn read_properties(&self, node: &SyntaxNode, scope: &str) -> Vec<Symbol> {
        let resolver = self.resolver();
        let doc = doc_for(node);
        let modifiers = member_modifiers(node);

        let hint_type = node
            .children()
            .find(|child| child.kind() == SyntaxKind::TypeHint)
            .map(|hint| self.resolve_type(&type_hint_to_type(&hint), &resolver));

        let mut properties: Vec<Symbol> = Vec::new();
        for element in node.children_with_tokens() {
            match element {
                rowan::NodeOrToken::Token(token) if token.kind() == SyntaxKind::Variable => {
                    let mut property = Symbol::new(
                        SymbolKind::Property,
                        token.text().trim_start_matches('$'),
                        Location::new(self.uri.clone(), token.text_range()),
                    );
                    property.modifiers = modifiers;
                    property.scope = SmolStr::new(scope);
                    if let Some(hint) = &hint_type {
                        property.type_string = hint.clone();
                    }
                    if let Some(doc) = &doc {
                        if let Some((tag_type, description)) =
                            doc.var_tag(&format!("${}", property.name))
                        {
                            property.type_string = property
                                .type_string
                                .merge(&self.resolve_type(tag_type, &resolver));
                            if !description.is_empty() {
                                property.description = SmolStr::new(description);
                            }
                        }
                        if property.description.is_empty() {
                            property.description = SmolStr::new(&doc.summary);
                        }
                    }
                    properties.push(property);
                }
                rowan::NodeOrToken::Node(expr) if expr.kind().is_expr() => {
                    // Initializer of the most recent variable: fills in a
                    // literal type when nothing else declared one.
                    if let Some(property) = properties.last_mut() {
                        if property.type_string.is_empty() {
                            property.type_string = infer_literal_type(&expr);
                        }
                    }
                }
                _ => {}
            }
        }
        properties
    }

    /// Reads `const` elements as constants of the given kind.
    fn read_constants(&self, node: &SyntaxNode, kind: SymbolKind, scope: &str) -> Vec<Symbol> {
        let resolver = self.resolver();
        let doc = doc_for(node);
        let modifiers = if kind == SymbolKind::ClassConstant {
            member_modifiers(node)
        } else {
            Modifiers::NONE
        };

        node.children()
            .filter(|child| child.kind() == SyntaxKind::ConstElement)
            .filter_map(|element| {
                let name = declared_name(&element)?;
                let full_name = if kind == SymbolKind::Constant {
                    self.qualify(&name)
                } else {
                    SmolStr::new(name.as_str())
                };
                let mut constant = Symbol::new(kind, full_name, self.location(&element));
                constant.modifiers = modifiers;
                constant.scope = SmolStr::new(scope);
                if let Some(expr) = element.children().find(|child| child.kind().is_expr()) {
                    constant.type_string = infer_literal_type(&expr);
                }
                if let Some(doc) = &doc {
                    if let Some((tag_type, _)) = doc.var_tag("") {
                        constant.type_string = constant
                            .type_string
                            .merge(&self.resolve_type(tag_type, &resolver));
                    }
                    constant.description = SmolStr::new(&doc.summary);
                }
                Some(constant)
            })
            .collect()
    }

    fn read_const_decl(&mut self, node: &SyntaxNode) {
        for constant in self.read_constants(node, SymbolKind::Constant, "") {
            self.symbols.push(Arc::new(constant));
        }
    }

    /// Resolves the class atoms of a type against the document position.
    fn resolve_type(&self, type_string: &TypeString, resolver: &NameResolver) -> TypeString {
        resolve_type_with(type_string, resolver)
    }
}

/// Resolves each class atom of a type expression to absolute form. Scalar
/// tags pass through; `T[]` suffixes and `array<K, V>` value parameters
/// resolve their class component.
#[must_use]
pub fn resolve_type_with(type_string: &TypeString, resolver: &NameResolver) -> TypeString {
    let mut result = TypeString::empty();
    for atom in type_string.atoms() {
        if crate::types::is_scalar_tag(atom) {
            result.push(atom);
        } else if let Some(element) = atom.strip_suffix("[]") {
            if crate::types::is_scalar_tag(element) {
                result.push(atom);
            } else {
                let resolved = resolver.resolve(element, NameKind::Class);
                result.push(&format!("{resolved}[]"));
            }
        } else if atom.contains('<') {
            result.push(atom);
        } else {
            let resolved = resolver.resolve(atom, NameKind::Class);
            result.push(&resolved);
        }
    }
    result
}

/// Extracts the declared name from a node's `Name` child.
fn declared_name(node: &SyntaxNode) -> Option<SmolStr> {
    node.children()
        .find(|child| child.kind() == SyntaxKind::Name)
        .map(|name| SmolStr::new(name.text().to_string().trim()))
}

/// The range of a declaration's name token: the identifier inside the
/// `Name` child. Used as the symbol location anchor and to match syntax
/// nodes back to their symbols.
#[must_use]
pub fn declaration_name_range(node: &SyntaxNode) -> Option<TextRange> {
    node.children()
        .find(|child| child.kind() == SyntaxKind::Name)
        .and_then(|name| {
            name.children_with_tokens()
                .filter_map(|element| element.into_token())
                .find(|token| !token.kind().is_trivia())
        })
        .map(|token| token.text_range())
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

/// Reads a `use` kind flag (`function` / `const`) among a node's direct
/// tokens.
fn use_kind_flag(node: &SyntaxNode) -> Option<NameKind> {
    node.children_with_tokens()
        .filter_map(|element| element.into_token())
        .find_map(|token| match token.kind() {
            SyntaxKind::KwFunction => Some(NameKind::Function),
            SyntaxKind::KwConst => Some(NameKind::Constant),
            _ => None,
        })
}

/// Decodes `abstract` / `final` flags on a class-like declaration.
fn class_modifiers(node: &SyntaxNode) -> Modifiers {
    let mut modifiers = Modifiers::NONE;
    for token in node
        .children_with_tokens()
        .filter_map(|element| element.into_token())
    {
        match token.kind() {
            SyntaxKind::KwAbstract => modifiers.insert(Modifiers::ABSTRACT),
            SyntaxKind::KwFinal => modifiers.insert(Modifiers::FINAL),
            _ => {}
        }
    }
    modifiers
}

/// Decodes member modifiers; visibility defaults to public when absent.
fn member_modifiers(node: &SyntaxNode) -> Modifiers {
    let mut modifiers = Modifiers::NONE;
    for token in node
        .children_with_tokens()
        .filter_map(|element| element.into_token())
    {
        match token.kind() {
            SyntaxKind::KwPublic => modifiers.insert(Modifiers::PUBLIC),
            SyntaxKind::KwProtected => modifiers.insert(Modifiers::PROTECTED),
            SyntaxKind::KwPrivate => modifiers.insert(Modifiers::PRIVATE),
            SyntaxKind::KwStatic => modifiers.insert(Modifiers::STATIC),
            SyntaxKind::KwAbstract => modifiers.insert(Modifiers::ABSTRACT),
            SyntaxKind::KwFinal => modifiers.insert(Modifiers::FINAL),
            _ => {}
        }
    }
    if modifiers.has_no_visibility() {
        modifiers.insert(Modifiers::PUBLIC);
    }
    modifiers
}

/// Converts a `TypeHint` node into a type string. A leading `?` adds
/// `null` to the union.
pub(crate) fn type_hint_to_type(hint: &SyntaxNode) -> TypeString {
    let mut result = TypeString::empty();
    let mut atom = String::new();
    for element in hint.descendants_with_tokens() {
        let Some(token) = element.into_token() else {
            continue;
        };
        if token.kind().is_trivia() {
            continue;
        }
        match token.kind() {
            SyntaxKind::Question => result.push("null"),
            SyntaxKind::Pipe => {
                result.push(&atom);
                atom.clear();
            }
            _ => atom.push_str(token.text()),
        }
    }
    result.push(&atom);
    result
}

/// Finds the docblock immediately preceding a declaration, crossing node
/// boundaries; whitespace and plain comments in between are skipped.
fn doc_for(node: &SyntaxNode) -> Option<Docblock> {
    // The docblock sits among the trivia right before the declaration;
    // scan backwards over whitespace and plain comments to reach it.
    let first = node.first_token()?;
    let mut current = first.prev_token();
    while let Some(token) = current {
        match token.kind() {
            SyntaxKind::Whitespace | SyntaxKind::LineComment | SyntaxKind::BlockComment => {
                current = token.prev_token();
            }
            SyntaxKind::DocComment => return Some(docblock::parse(token.text())),
            _ => return None,
        }
    }
    None
}

/// Infers a scalar type from a literal initializer expression.
fn infer_literal_type(expr: &SyntaxNode) -> TypeString {
    match expr.kind() {
        SyntaxKind::Literal => literal_token_type(expr),
        SyntaxKind::ArrayExpr => TypeString::atom("array"),
        SyntaxKind::UnaryExpr => expr
            .children()
            .next()
            .map(|inner| infer_literal_type(&inner))
            .unwrap_or_default(),
        _ => TypeString::empty(),
    }
}

fn literal_token_type(literal: &SyntaxNode) -> TypeString {
    let Some(token) = literal
        .children_with_tokens()
        .filter_map(|element| element.into_token())
        .find(|token| !token.kind().is_trivia())
    else {
        return TypeString::empty();
    };
    match token.kind() {
        SyntaxKind::IntLiteral => TypeString::atom("int"),
        SyntaxKind::FloatLiteral => TypeString::atom("float"),
        SyntaxKind::StringLiteral => TypeString::atom("string"),
        SyntaxKind::KwTrue | SyntaxKind::KwFalse => TypeString::atom("bool"),
        SyntaxKind::KwNull => TypeString::atom("null"),
        _ => TypeString::empty(),
    }
}

/// Re-export used by the type resolver for foreach/member typing.
pub(crate) fn literal_type_of(expr: &SyntaxNode) -> TypeString {
    infer_literal_type(expr)
}
