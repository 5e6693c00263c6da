//! Symbol record types.

use smol_str::SmolStr;
use std::sync::Arc;
use text_size::TextRange;

use crate::types::TypeString;

/// The kind of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// A namespace.
    Namespace,
    /// A class.
    Class,
    /// An interface.
    Interface,
    /// A trait.
    Trait,
    /// A free function.
    Function,
    /// A method of a class-like.
    Method,
    /// A property of a class-like.
    Property,
    /// A class constant.
    ClassConstant,
    /// A free (namespace-level) constant.
    Constant,
    /// A parameter of a function or method.
    Parameter,
    /// A local variable.
    Variable,
}

impl SymbolKind {
    /// Returns `true` for classes, interfaces, and traits.
    #[must_use]
    pub fn is_class_like(self) -> bool {
        matches!(self, Self::Class | Self::Interface | Self::Trait)
    }

    /// Returns `true` for functions and methods.
    #[must_use]
    pub fn is_callable(self) -> bool {
        matches!(self, Self::Function | Self::Method)
    }

    /// Returns `true` for symbols owned by a class-like body.
    #[must_use]
    pub fn is_member(self) -> bool {
        matches!(self, Self::Method | Self::Property | Self::ClassConstant)
    }

    /// Returns `true` if names of this kind compare case-sensitively.
    ///
    /// Class-likes, functions, and namespaces fold case in lookups;
    /// constants, properties, parameters, and variables do not.
    #[must_use]
    pub fn case_sensitive_name(self) -> bool {
        matches!(
            self,
            Self::ClassConstant | Self::Constant | Self::Property | Self::Parameter | Self::Variable
        )
    }
}

/// A bitset of symbol modifiers.
///
/// Visibility, `static`, `abstract`, `final`, plus the synthetic flags for
/// docblock-declared (magic) members and anonymous classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Modifiers(u16);

impl Modifiers {
    /// No modifiers.
    pub const NONE: Self = Self(0);
    /// `public` (also the implied default for members).
    pub const PUBLIC: Self = Self(1 << 0);
    /// `protected`.
    pub const PROTECTED: Self = Self(1 << 1);
    /// `private`.
    pub const PRIVATE: Self = Self(1 << 2);
    /// `static`.
    pub const STATIC: Self = Self(1 << 3);
    /// `abstract`.
    pub const ABSTRACT: Self = Self(1 << 4);
    /// `final`.
    pub const FINAL: Self = Self(1 << 5);
    /// Declared only in a docblock annotation.
    pub const MAGIC: Self = Self(1 << 6);
    /// Readable but not writable (`@property-read`).
    pub const READONLY: Self = Self(1 << 7);
    /// Writable but not readable (`@property-write`).
    pub const WRITEONLY: Self = Self(1 << 8);
    /// An anonymous class.
    pub const ANONYMOUS: Self = Self(1 << 9);
    /// Introduced through a trait `use`.
    pub const USE: Self = Self(1 << 10);

    /// Returns the union of two modifier sets.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Adds the given flags in place.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Returns `true` if all flags of `other` are present.
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Returns `true` if no visibility flag is set.
    #[must_use]
    pub fn has_no_visibility(self) -> bool {
        !self.contains(Self::PUBLIC)
            && !self.contains(Self::PROTECTED)
            && !self.contains(Self::PRIVATE)
    }
}

/// A source location: document URI plus byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// The owning document's URI.
    pub uri: Arc<str>,
    /// The byte range of the declaration.
    pub range: TextRange,
}

impl Location {
    /// Creates a new location.
    #[must_use]
    pub fn new(uri: Arc<str>, range: TextRange) -> Self {
        Self { uri, range }
    }
}

/// A declared symbol.
///
/// Top-level symbols carry fully-qualified names (no leading separator);
/// members carry simple names. Properties are named without the `$` sigil,
/// parameters and variables with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// The kind of symbol.
    pub kind: SymbolKind,
    /// The symbol's name.
    pub name: SmolStr,
    /// Modifier bitset, consistent with `kind`.
    pub modifiers: Modifiers,
    /// The declared or inferred type.
    pub type_string: TypeString,
    /// Docblock summary, empty when undocumented.
    pub description: SmolStr,
    /// Owning declaration's name, empty for top-level symbols.
    pub scope: SmolStr,
    /// Where the symbol is declared.
    pub location: Location,
    /// For class-likes: referenced FQNs (extends target, implemented
    /// interfaces, used traits).
    pub associated: Vec<SmolStr>,
    /// Owned symbols: members for class-likes, parameters for callables.
    pub children: Vec<Arc<Symbol>>,
}

impl Symbol {
    /// Creates a new symbol with no modifiers, type, or children.
    #[must_use]
    pub fn new(kind: SymbolKind, name: impl Into<SmolStr>, location: Location) -> Self {
        Self {
            kind,
            name: name.into(),
            modifiers: Modifiers::NONE,
            type_string: TypeString::empty(),
            description: SmolStr::default(),
            scope: SmolStr::default(),
            location,
            associated: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Returns the child members of a class-like, or the parameters of a
    /// callable.
    #[must_use]
    pub fn children(&self) -> &[Arc<Symbol>] {
        &self.children
    }

    /// Finds a direct child by name, honoring the kind's case rules.
    #[must_use]
    pub fn find_child(&self, name: &str) -> Option<&Arc<Symbol>> {
        self.children.iter().find(|child| {
            if child.kind.case_sensitive_name() {
                child.name == name
            } else {
                child.name.eq_ignore_ascii_case(name)
            }
        })
    }

    /// Returns `true` if the member is private.
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.modifiers.contains(Modifiers::PRIVATE)
    }

    /// Returns `true` if the member exists only through a docblock
    /// annotation.
    #[must_use]
    pub fn is_magic(&self) -> bool {
        self.modifiers.contains(Modifiers::MAGIC)
    }

    /// Returns the simple (unqualified) part of the symbol's name.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.name
            .rsplit('\\')
            .next()
            .unwrap_or(self.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> Location {
        Location::new(Arc::from("file:///t.php"), TextRange::empty(0.into()))
    }

    #[test]
    fn test_modifier_bitset() {
        let mut mods = Modifiers::PUBLIC;
        mods.insert(Modifiers::STATIC);
        assert!(mods.contains(Modifiers::PUBLIC));
        assert!(mods.contains(Modifiers::STATIC));
        assert!(!mods.contains(Modifiers::PRIVATE));
        assert!(Modifiers::NONE.has_no_visibility());
        assert!(!mods.has_no_visibility());
    }

    #[test]
    fn test_find_child_case_rules() {
        let mut class = Symbol::new(SymbolKind::Class, "App\\Foo", loc());
        let mut method = Symbol::new(SymbolKind::Method, "getName", loc());
        method.scope = SmolStr::new("App\\Foo");
        let mut constant = Symbol::new(SymbolKind::ClassConstant, "MAX", loc());
        constant.scope = SmolStr::new("App\\Foo");
        class.children.push(Arc::new(method));
        class.children.push(Arc::new(constant));

        // Methods fold case, constants do not.
        assert!(class.find_child("GETNAME").is_some());
        assert!(class.find_child("max").is_none());
        assert!(class.find_child("MAX").is_some());
    }

    #[test]
    fn test_short_name() {
        let class = Symbol::new(SymbolKind::Class, "App\\Model\\User", loc());
        assert_eq!(class.short_name(), "User");
    }
}
