//! Type aggregation.
//!
//! Walks a class-like's inheritance and trait-composition graph through
//! the symbol store and produces the effective member set under a chosen
//! merge strategy. Associations are followed by FQN lookup, never by
//! stored parent pointers, so the view stays consistent across reparses.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::cancel::CancellationToken;
use crate::error::EngineError;
use crate::store::SymbolStore;
use crate::symbols::{Symbol, SymbolKind};

/// How members with the same name merge across the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// Concatenate everything; no de-duplication.
    None,
    /// Root-first: the first member seen per name wins.
    #[default]
    Override,
    /// As `Override`, but a documented member later in the chain replaces
    /// an undocumented kept one.
    Documented,
    /// Root-last: the last member seen per name wins.
    Base,
}

/// The resolved view of a class-like: its associated set and merged
/// members.
#[derive(Debug, Clone)]
pub struct TypeAggregate {
    root: Arc<Symbol>,
    /// Class/interface ancestry, root first, breadth-first order.
    lineage: Vec<Arc<Symbol>>,
    /// Traits reached anywhere in the walk, in encounter order.
    traits: Vec<Arc<Symbol>>,
}

impl TypeAggregate {
    /// Builds the aggregate for a class-like FQN.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotClassLike`] when the FQN does not name a
    /// class, interface, or trait.
    pub fn for_fqn(
        store: &SymbolStore,
        fqn: &str,
        cancel: &CancellationToken,
    ) -> Result<Self, EngineError> {
        let root = store
            .class_like(fqn)
            .ok_or_else(|| EngineError::NotClassLike(fqn.to_string()))?;
        Ok(Self::new(store, root, cancel))
    }

    /// Builds the aggregate for an already-resolved class-like symbol.
    ///
    /// Cycles in the association graph are broken with a visited set; a
    /// back edge is never followed.
    #[must_use]
    pub fn new(store: &SymbolStore, root: Arc<Symbol>, cancel: &CancellationToken) -> Self {
        let mut lineage = vec![root.clone()];
        let mut traits = Vec::new();

        let mut visited: FxHashSet<SmolStr> = FxHashSet::default();
        visited.insert(fold(&root.name));

        let mut queue: VecDeque<SmolStr> = root.associated.iter().cloned().collect();
        while let Some(fqn) = queue.pop_front() {
            if cancel.is_cancelled() {
                break;
            }
            if !visited.insert(fold(&fqn)) {
                continue;
            }
            let Some(symbol) = store.class_like(&fqn) else {
                continue;
            };
            for next in &symbol.associated {
                queue.push_back(next.clone());
            }
            if symbol.kind == SymbolKind::Trait {
                traits.push(symbol);
            } else {
                lineage.push(symbol);
            }
        }

        Self {
            root,
            lineage,
            traits,
        }
    }

    /// The root symbol the aggregate was built for.
    #[must_use]
    pub fn root(&self) -> &Arc<Symbol> {
        &self.root
    }

    /// The associated set: ancestors and traits, root excluded, in
    /// traversal order.
    #[must_use]
    pub fn associated(&self) -> Vec<Arc<Symbol>> {
        self.lineage
            .iter()
            .skip(1)
            .chain(self.traits.iter())
            .cloned()
            .collect()
    }

    /// The effective member set under `strategy`.
    ///
    /// Ancestor privates are filtered out (the root's own stay). Trait
    /// members are appended after the class chain; a member already kept
    /// under the same name is not displaced (naive trait union). In every
    /// strategy but `None`, a real member beats a previously kept magic
    /// member of the same name.
    #[must_use]
    pub fn members(&self, strategy: MergeStrategy) -> Vec<Arc<Symbol>> {
        // Interface and trait roots concatenate their parents' members
        // without merging.
        let strategy = if self.root.kind == SymbolKind::Class {
            strategy
        } else {
            MergeStrategy::None
        };

        if strategy == MergeStrategy::None {
            return self.visible_members().collect();
        }

        let mut kept: Vec<Arc<Symbol>> = Vec::new();
        let mut index_of: rustc_hash::FxHashMap<MemberKey, usize> = rustc_hash::FxHashMap::default();

        for (member, from_trait) in self.visible_members_tagged() {
            let key = MemberKey::of(&member);
            match index_of.get(&key) {
                None => {
                    index_of.insert(key, kept.len());
                    kept.push(member);
                }
                Some(&at) => {
                    let current = &kept[at];
                    let replace = if current.is_magic() && !member.is_magic() {
                        true
                    } else if member.is_magic() && !current.is_magic() {
                        false
                    } else if from_trait {
                        false
                    } else {
                        match strategy {
                            MergeStrategy::Override | MergeStrategy::None => false,
                            MergeStrategy::Documented => {
                                current.description.is_empty() && !member.description.is_empty()
                            }
                            MergeStrategy::Base => true,
                        }
                    };
                    if replace {
                        kept[at] = member;
                    }
                }
            }
        }

        kept
    }

    /// Finds one effective member by name under the default strategy.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<Arc<Symbol>> {
        self.members(MergeStrategy::Override)
            .into_iter()
            .find(|member| {
                if member.kind.case_sensitive_name() {
                    member.name == name
                } else {
                    member.name.eq_ignore_ascii_case(name)
                }
            })
    }

    /// Members visible from the root, privacy-filtered, class chain before
    /// traits.
    fn visible_members(&self) -> impl Iterator<Item = Arc<Symbol>> + '_ {
        self.visible_members_tagged().map(|(member, _)| member)
    }

    fn visible_members_tagged(&self) -> impl Iterator<Item = (Arc<Symbol>, bool)> + '_ {
        let root_name = self.root.name.clone();
        self.lineage
            .iter()
            .map(|owner| (owner, false))
            .chain(self.traits.iter().map(|owner| (owner, true)))
            .flat_map(move |(owner, from_trait)| {
                let own = owner.name.eq_ignore_ascii_case(&root_name);
                owner
                    .children
                    .iter()
                    .filter(move |member| member.kind.is_member())
                    .filter(move |member| own || !member.is_private())
                    .map(move |member| (member.clone(), from_trait))
            })
    }
}

fn fold(name: &str) -> SmolStr {
    SmolStr::new(name.to_ascii_lowercase())
}

/// Merge key: members occupy separate namespaces per kind group, and
/// method names fold case while property/constant names do not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MemberKey {
    kind: SymbolKind,
    name: SmolStr,
}

impl MemberKey {
    fn of(member: &Symbol) -> Self {
        let name = if member.kind.case_sensitive_name() {
            member.name.clone()
        } else {
            fold(&member.name)
        };
        Self {
            kind: member.kind,
            name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_document;
    use tusk_syntax::parse;

    fn store_of(sources: &[(&str, &str)]) -> SymbolStore {
        let mut store = SymbolStore::new();
        for (uri, source) in sources {
            let table = read_document(Arc::from(*uri), &parse(source));
            store.add(&table).unwrap();
        }
        store
    }

    fn aggregate<'s>(store: &'s SymbolStore, fqn: &str) -> TypeAggregate {
        TypeAggregate::for_fqn(store, fqn, &CancellationToken::new()).unwrap()
    }

    #[test]
    fn test_plain_class_members_equal_children() {
        let store = store_of(&[(
            "file:///a.php",
            "<?php class C { public function m(): int {} public $x; }",
        )]);
        let agg = aggregate(&store, "C");
        let members = agg.members(MergeStrategy::Override);
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].name, "m");
        assert_eq!(members[1].name, "x");
    }

    #[test]
    fn test_inherited_member() {
        let store = store_of(&[(
            "file:///a.php",
            "<?php class Base { public function m(): int {} } class Sub extends Base {}",
        )]);
        let agg = aggregate(&store, "Sub");
        let members = agg.members(MergeStrategy::Override);
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "m");
        assert_eq!(members[0].type_string.to_string(), "int");
    }

    #[test]
    fn test_override_keeps_root_member() {
        let store = store_of(&[(
            "file:///a.php",
            "<?php class Base { public function m(): int {} } \
             class Sub extends Base { public function m(): string {} }",
        )]);
        let agg = aggregate(&store, "Sub");
        let members = agg.members(MergeStrategy::Override);
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].type_string.to_string(), "string");

        let base_members = agg.members(MergeStrategy::Base);
        assert_eq!(base_members.len(), 1);
        assert_eq!(base_members[0].type_string.to_string(), "int");
    }

    #[test]
    fn test_documented_prefers_description() {
        let store = store_of(&[(
            "file:///a.php",
            "<?php class Base { /** Documented. */ public function m(): int {} } \
             class Sub extends Base { public function m(): string {} }",
        )]);
        let agg = aggregate(&store, "Sub");
        let members = agg.members(MergeStrategy::Documented);
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].description, "Documented.");
    }

    #[test]
    fn test_ancestor_privates_hidden() {
        let store = store_of(&[(
            "file:///a.php",
            "<?php class Base { private function secret() {} public function open() {} } \
             class Sub extends Base { private function own() {} }",
        )]);
        let agg = aggregate(&store, "Sub");
        let members = agg.members(MergeStrategy::Override);
        let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
        assert!(names.contains(&"own"));
        assert!(names.contains(&"open"));
        assert!(!names.contains(&"secret"));
    }

    #[test]
    fn test_trait_members_appended() {
        let store = store_of(&[(
            "file:///a.php",
            "<?php trait Greets { public function hello(): string {} } \
             class C { use Greets; public function own() {} }",
        )]);
        let agg = aggregate(&store, "C");
        let members = agg.members(MergeStrategy::Override);
        let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["own", "hello"]);
    }

    #[test]
    fn test_real_member_beats_magic() {
        let store = store_of(&[(
            "file:///a.php",
            "<?php /** @property string $x */ class Base { } \
             class Sub extends Base { public $x; }",
        )]);
        // Root-first: Sub's real $x is seen before Base's magic $x.
        let agg = aggregate(&store, "Sub");
        let members = agg.members(MergeStrategy::Base);
        assert_eq!(members.len(), 1);
        assert!(!members[0].is_magic());
    }

    #[test]
    fn test_cycle_is_broken() {
        let store = store_of(&[(
            "file:///a.php",
            "<?php class A extends B { public function fromA() {} } \
             class B extends A { public function fromB() {} }",
        )]);
        let agg = aggregate(&store, "A");
        let members = agg.members(MergeStrategy::Override);
        let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["fromA", "fromB"]);
    }

    #[test]
    fn test_not_class_like_fails_fast() {
        let store = store_of(&[("file:///a.php", "<?php function f() {}")]);
        assert!(matches!(
            TypeAggregate::for_fqn(&store, "f", &CancellationToken::new()),
            Err(EngineError::NotClassLike(_))
        ));
    }

    #[test]
    fn test_cancelled_aggregate_stops_expansion() {
        let store = store_of(&[(
            "file:///a.php",
            "<?php class Base { public function m() {} } class Sub extends Base {}",
        )]);
        let token = CancellationToken::new();
        token.cancel();
        let root = store.class_like("Sub").unwrap();
        let agg = TypeAggregate::new(&store, root, &token);
        // Only the root's own (empty) member set remains.
        assert!(agg.members(MergeStrategy::Override).is_empty());
    }

    #[test]
    fn test_interface_root_concatenates() {
        let store = store_of(&[(
            "file:///a.php",
            "<?php interface A { public function m(); } \
             interface B extends A { public function m(); }",
        )]);
        let agg = aggregate(&store, "B");
        let members = agg.members(MergeStrategy::Override);
        assert_eq!(members.len(), 2);
    }
}
