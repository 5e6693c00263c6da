//! Name resolution.
//!
//! Turns written names into fully-qualified names using the current
//! namespace and the document's import table. Resolution is purely
//! lexical: no symbol-store lookups happen here.

use smol_str::SmolStr;

/// The kind of name being imported or resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    /// Class, interface, or trait names.
    Class,
    /// Function names.
    Function,
    /// Constant names.
    Constant,
}

/// One alias in a document's import table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRule {
    /// The alias introduced into the document.
    pub alias: SmolStr,
    /// The fully-qualified target, without a leading separator.
    pub fqn: SmolStr,
    /// What kind of name the alias covers.
    pub kind: NameKind,
}

/// A document's import table.
///
/// Alias lookup is case-insensitive for classes and functions and
/// case-sensitive for constants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportTable {
    rules: Vec<ImportRule>,
}

impl ImportTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule. The target FQN is normalized by stripping one leading
    /// separator.
    pub fn add(&mut self, alias: impl Into<SmolStr>, fqn: &str, kind: NameKind) {
        let fqn = fqn.strip_prefix('\\').unwrap_or(fqn);
        self.rules.push(ImportRule {
            alias: alias.into(),
            fqn: SmolStr::new(fqn),
            kind,
        });
    }

    /// Finds the rule for `alias` with the given kind, honoring the kind's
    /// case rules.
    #[must_use]
    pub fn find(&self, alias: &str, kind: NameKind) -> Option<&ImportRule> {
        self.rules.iter().find(|rule| {
            rule.kind == kind
                && match kind {
                    NameKind::Class | NameKind::Function => rule.alias.eq_ignore_ascii_case(alias),
                    NameKind::Constant => rule.alias == alias,
                }
        })
    }

    /// Returns all rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[ImportRule] {
        &self.rules
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the table has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Resolves written names against a namespace and import table.
///
/// The output is a fully-qualified name stored without a leading
/// separator. Feeding a fully-qualified written name (leading `\`) back in
/// returns it unchanged modulo that separator; a bare resolved name is
/// indistinguishable from an unqualified one, so idempotence is expressed
/// through the fully-qualified written form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameResolver {
    /// The active namespace prefix, empty at global scope.
    pub namespace: SmolStr,
    /// The document's import table.
    pub imports: ImportTable,
}

impl NameResolver {
    /// Creates a resolver for a namespace and import table.
    #[must_use]
    pub fn new(namespace: impl Into<SmolStr>, imports: ImportTable) -> Self {
        Self {
            namespace: namespace.into(),
            imports,
        }
    }

    /// Resolves a written name of the given kind to an FQN.
    ///
    /// Relativity is derived from the written form: a leading `\` marks a
    /// fully-qualified name used verbatim, a `namespace\` prefix is
    /// relative to the current namespace, anything else is unqualified.
    #[must_use]
    pub fn resolve(&self, written: &str, kind: NameKind) -> SmolStr {
        let written = written.trim();
        if written.is_empty() {
            return SmolStr::default();
        }

        // Fully qualified: used verbatim.
        if let Some(rest) = written.strip_prefix('\\') {
            return SmolStr::new(rest);
        }

        // Relative: `namespace\X` is rebased onto the current namespace.
        if let Some(rest) = strip_relative_prefix(written) {
            return self.prefix_with_namespace(rest);
        }

        let (head, tail) = match written.split_once('\\') {
            Some((head, tail)) => (head, Some(tail)),
            None => (written, None),
        };

        // Class names go through the import table by their first segment.
        if kind == NameKind::Class {
            if let Some(rule) = self.imports.find(head, NameKind::Class) {
                return match tail {
                    Some(tail) => SmolStr::new(format!("{}\\{}", rule.fqn, tail)),
                    None => rule.fqn.clone(),
                };
            }
        }

        // Single-segment function and constant names check their own
        // kind-matched aliases; no global fallback otherwise.
        if matches!(kind, NameKind::Function | NameKind::Constant) && tail.is_none() {
            if let Some(rule) = self.imports.find(head, kind) {
                return rule.fqn.clone();
            }
        }

        self.prefix_with_namespace(written)
    }

    fn prefix_with_namespace(&self, name: &str) -> SmolStr {
        if self.namespace.is_empty() {
            SmolStr::new(name)
        } else {
            SmolStr::new(format!("{}\\{}", self.namespace, name))
        }
    }
}

/// Strips a leading `namespace\` keyword segment (case-insensitive).
fn strip_relative_prefix(written: &str) -> Option<&str> {
    let (head, tail) = written.split_once('\\')?;
    head.eq_ignore_ascii_case("namespace").then_some(tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> NameResolver {
        let mut imports = ImportTable::new();
        imports.add("E", "C\\D", NameKind::Class);
        imports.add("strlen2", "Acme\\strlen2", NameKind::Function);
        imports.add("LIMIT", "Acme\\LIMIT", NameKind::Constant);
        NameResolver::new("A\\B", imports)
    }

    #[test]
    fn test_fully_qualified_verbatim() {
        let r = resolver();
        assert_eq!(r.resolve("\\X\\Y", NameKind::Class), "X\\Y");
    }

    #[test]
    fn test_relative_prefix() {
        let r = resolver();
        assert_eq!(r.resolve("namespace\\Sub\\Z", NameKind::Class), "A\\B\\Sub\\Z");
    }

    #[test]
    fn test_class_alias_head_replacement() {
        let r = resolver();
        assert_eq!(r.resolve("E\\G", NameKind::Class), "C\\D\\G");
        assert_eq!(r.resolve("e", NameKind::Class), "C\\D");
    }

    #[test]
    fn test_unqualified_prefixes_namespace() {
        let r = resolver();
        assert_eq!(r.resolve("F", NameKind::Class), "A\\B\\F");
        assert_eq!(r.resolve("helper", NameKind::Function), "A\\B\\helper");
    }

    #[test]
    fn test_function_and_constant_aliases() {
        let r = resolver();
        assert_eq!(r.resolve("STRLEN2", NameKind::Function), "Acme\\strlen2");
        assert_eq!(r.resolve("LIMIT", NameKind::Constant), "Acme\\LIMIT");
        // Constants are case-sensitive; no alias match falls through.
        assert_eq!(r.resolve("limit", NameKind::Constant), "A\\B\\limit");
    }

    #[test]
    fn test_idempotent_on_fully_qualified_form() {
        let r = resolver();
        for (name, kind) in [
            ("E\\G", NameKind::Class),
            ("F", NameKind::Class),
            ("helper", NameKind::Function),
            ("namespace\\Sub", NameKind::Class),
        ] {
            let once = r.resolve(name, kind);
            let twice = r.resolve(&format!("\\{once}"), kind);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_no_namespace() {
        let r = NameResolver::default();
        assert_eq!(r.resolve("Foo", NameKind::Class), "Foo");
    }
}
