//! Type strings.
//!
//! A [`TypeString`] is an unordered union of atomic type literals. An atom
//! is either a scalar tag (`int`, `string`, `bool`, ...) or a
//! fully-qualified class name. Unions come from docblocks (`int|string`),
//! branch merging, and member aggregation.

use smol_str::SmolStr;
use std::fmt;

/// Scalar tags recognized in type expressions. Everything else is treated
/// as a class name.
pub const SCALAR_TAGS: &[&str] = &[
    "int", "string", "bool", "float", "array", "mixed", "void", "null", "self", "static", "$this",
    "callable", "iterable", "object", "resource",
];

/// Returns `true` if `atom` is a scalar tag rather than a class name.
#[must_use]
pub fn is_scalar_tag(atom: &str) -> bool {
    SCALAR_TAGS.iter().any(|tag| atom.eq_ignore_ascii_case(tag))
}

/// An unordered union of atomic type literals.
///
/// The empty union (no information) is distinct from `mixed` (any value).
/// `merge` is commutative, associative, and idempotent up to atom order;
/// equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct TypeString {
    atoms: Vec<SmolStr>,
}

impl TypeString {
    /// The empty type (no information).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a type from a single atom.
    #[must_use]
    pub fn atom(atom: impl AsRef<str>) -> Self {
        let mut result = Self::empty();
        result.push(atom.as_ref());
        result
    }

    /// Parses a type expression: atoms separated by `|` at the top level.
    /// Separators inside `<...>` parameter lists do not split.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut result = Self::empty();
        let mut depth = 0u32;
        let mut start = 0usize;
        for (i, ch) in text.char_indices() {
            match ch {
                '<' | '(' => depth += 1,
                '>' | ')' => depth = depth.saturating_sub(1),
                '|' if depth == 0 => {
                    result.push(&text[start..i]);
                    start = i + 1;
                }
                _ => {}
            }
        }
        result.push(&text[start..]);
        result
    }

    /// Returns `true` if the union carries no atoms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Returns the atoms in insertion order.
    #[must_use]
    pub fn atoms(&self) -> &[SmolStr] {
        &self.atoms
    }

    /// Adds one atom, normalizing and de-duplicating.
    pub fn push(&mut self, atom: &str) {
        let atom = normalize_atom(atom);
        if atom.is_empty() {
            return;
        }
        if !self
            .atoms
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(&atom))
        {
            self.atoms.push(SmolStr::new(atom));
        }
    }

    /// Unions `other` into a new type string.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for atom in &other.atoms {
            result.push(atom);
        }
        result
    }

    /// Returns only the class-name atoms (no scalar tags, no array shapes).
    #[must_use]
    pub fn atomic_classes(&self) -> Vec<SmolStr> {
        self.atoms
            .iter()
            .filter(|atom| !is_scalar_tag(atom) && !atom.ends_with("[]") && !atom.contains('<'))
            .cloned()
            .collect()
    }

    /// Deduces element types for iteration: `T[]` yields `T`,
    /// `array<K, V>` and `iterable<V>` yield their value parameter.
    #[must_use]
    pub fn element_types(&self) -> Self {
        let mut result = Self::empty();
        for atom in &self.atoms {
            if let Some(element) = atom.strip_suffix("[]") {
                result.push(element);
            } else if let Some(value) = generic_value_parameter(atom) {
                result.push(value);
            }
        }
        result
    }

    /// Replaces the `self`, `static`, and `$this` atoms with a concrete
    /// class name.
    #[must_use]
    pub fn bind_class(&self, class_fqn: &str) -> Self {
        let mut result = Self::empty();
        for atom in &self.atoms {
            if atom.eq_ignore_ascii_case("self")
                || atom.eq_ignore_ascii_case("static")
                || atom.as_str() == "$this"
            {
                result.push(class_fqn);
            } else {
                result.push(atom);
            }
        }
        result
    }
}

/// Extracts the value parameter of `array<K, V>` / `iterable<V>` shapes.
fn generic_value_parameter(atom: &str) -> Option<&str> {
    let open = atom.find('<')?;
    let head = &atom[..open];
    if !head.eq_ignore_ascii_case("array") && !head.eq_ignore_ascii_case("iterable") {
        return None;
    }
    let inner = atom[open + 1..].strip_suffix('>')?;
    let mut depth = 0u32;
    let mut last_start = 0usize;
    for (i, ch) in inner.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => last_start = i + 1,
            _ => {}
        }
    }
    Some(inner[last_start..].trim())
}

/// Trims an atom and strips one leading namespace separator. Recognized
/// scalar tags are lowercased; class names keep their source casing.
fn normalize_atom(atom: &str) -> String {
    let trimmed = atom.trim();
    let stripped = trimmed.strip_prefix('\\').unwrap_or(trimmed);
    if is_scalar_tag(stripped) {
        stripped.to_ascii_lowercase()
    } else {
        stripped.to_string()
    }
}

impl PartialEq for TypeString {
    fn eq(&self, other: &Self) -> bool {
        self.atoms.len() == other.atoms.len()
            && self
                .atoms
                .iter()
                .all(|atom| other.atoms.iter().any(|o| o.eq_ignore_ascii_case(atom)))
    }
}

impl Eq for TypeString {}

impl fmt::Display for TypeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for atom in &self.atoms {
            if !first {
                f.write_str("|")?;
            }
            f.write_str(atom)?;
            first = false;
        }
        Ok(())
    }
}

impl From<&str> for TypeString {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_is_commutative_and_idempotent() {
        let a = TypeString::parse("int|string");
        let b = TypeString::parse("string|Foo");

        assert_eq!(a.merge(&b), b.merge(&a));
        assert_eq!(a.merge(&a), a);
        assert_eq!(a.merge(&TypeString::empty()), a);
    }

    #[test]
    fn test_merge_is_associative() {
        let a = TypeString::parse("int");
        let b = TypeString::parse("Foo");
        let c = TypeString::parse("null|int");

        assert_eq!(a.merge(&b).merge(&c), a.merge(&b.merge(&c)));
    }

    #[test]
    fn test_empty_distinct_from_mixed() {
        assert!(TypeString::empty().is_empty());
        assert!(!TypeString::parse("mixed").is_empty());
        assert_ne!(TypeString::empty(), TypeString::parse("mixed"));
    }

    #[test]
    fn test_normalization() {
        let parsed = TypeString::parse(r" \App\Model | INT ");
        assert_eq!(parsed.to_string(), "App\\Model|int");
    }

    #[test]
    fn test_atomic_classes() {
        let parsed = TypeString::parse(r"int|\Foo\Bar|string[]|array<int, Baz>|Qux");
        let classes = parsed.atomic_classes();
        assert_eq!(classes, vec!["Foo\\Bar", "Qux"]);
    }

    #[test]
    fn test_element_types() {
        assert_eq!(
            TypeString::parse("Item[]").element_types(),
            TypeString::parse("Item")
        );
        assert_eq!(
            TypeString::parse("array<int, Item>").element_types(),
            TypeString::parse("Item")
        );
        assert_eq!(
            TypeString::parse("iterable<Item>").element_types(),
            TypeString::parse("Item")
        );
        assert!(TypeString::parse("array").element_types().is_empty());
    }

    #[test]
    fn test_bind_class() {
        let parsed = TypeString::parse("static|int");
        assert_eq!(parsed.bind_class("App\\Foo"), TypeString::parse("App\\Foo|int"));
    }

    #[test]
    fn test_round_trip() {
        let text = "int|App\\Model|null";
        assert_eq!(TypeString::parse(text).to_string(), text);
    }

    #[test]
    fn test_merge_display() {
        use expect_test::expect;
        let merged = TypeString::parse("int|Foo").merge(&TypeString::parse("null|INT"));
        expect!["int|Foo|null"].assert_eq(&merged.to_string());
    }
}
