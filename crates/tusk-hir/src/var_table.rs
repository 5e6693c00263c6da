//! The resolved variable table.
//!
//! A stack of frames tracking variable types during a type-resolver
//! traversal. Scopes correspond to function/method/closure bodies; branch
//! groups model mutually exclusive paths (if/elseif/else) whose bindings
//! merge by union when the group closes.
//!
//! The frame is an explicit tagged variant so scope-push and branch-push
//! cannot be conflated.

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use crate::types::TypeString;

#[derive(Debug)]
enum Frame {
    Scope {
        vars: FxHashMap<SmolStr, TypeString>,
    },
    BranchGroup {
        branches: Vec<FxHashMap<SmolStr, TypeString>>,
    },
    Branch {
        vars: FxHashMap<SmolStr, TypeString>,
    },
}

/// Scoped variable-name-to-type bindings with branch-group merging.
#[derive(Debug)]
pub struct VariableTable {
    frames: Vec<Frame>,
}

impl Default for VariableTable {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableTable {
    /// Creates a table with one root scope.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::Scope {
                vars: FxHashMap::default(),
            }],
        }
    }

    /// Enters a new lexical scope.
    pub fn push_scope(&mut self) {
        self.frames.push(Frame::Scope {
            vars: FxHashMap::default(),
        });
    }

    /// Leaves the current scope, dropping its bindings. The root scope is
    /// never popped.
    pub fn pop_scope(&mut self) {
        if self.frames.len() > 1 && matches!(self.frames.last(), Some(Frame::Scope { .. })) {
            self.frames.pop();
        }
    }

    /// Opens a branch group (an if/elseif/else list).
    pub fn push_branch_group(&mut self) {
        self.frames.push(Frame::BranchGroup {
            branches: Vec::new(),
        });
    }

    /// Opens one branch within the current group.
    pub fn push_branch(&mut self) {
        self.frames.push(Frame::Branch {
            vars: FxHashMap::default(),
        });
    }

    /// Commits the current branch overlay into its group.
    pub fn pop_branch(&mut self) {
        let Some(Frame::Branch { vars }) = self.frames.pop() else {
            return;
        };
        if let Some(Frame::BranchGroup { branches }) = self.frames.last_mut() {
            branches.push(vars);
        }
    }

    /// Closes the current branch group.
    ///
    /// Per variable touched in any branch, the union of its per-branch
    /// types is computed; a branch that did not touch the variable
    /// contributes the pre-group type (or nothing when there was none).
    /// The result folds into the enclosing scope.
    pub fn pop_branch_group(&mut self) {
        let Some(Frame::BranchGroup { branches }) = self.frames.pop() else {
            return;
        };

        let mut touched: FxHashSet<SmolStr> = FxHashSet::default();
        for branch in &branches {
            touched.extend(branch.keys().cloned());
        }

        for name in touched {
            let prior = self.lookup(&name);
            let mut merged = TypeString::empty();
            for branch in &branches {
                match branch.get(&name) {
                    Some(ty) => merged = merged.merge(ty),
                    None => {
                        if let Some(prior) = &prior {
                            merged = merged.merge(prior);
                        }
                    }
                }
            }
            self.bind(&name, merged);
        }
    }

    /// Sets a variable's type in the innermost active frame: the topmost
    /// branch overlay, or the scope when no branch is active.
    pub fn set_type(&mut self, name: &str, ty: TypeString) {
        self.bind(name, ty);
    }

    /// Looks up a variable's type.
    ///
    /// Precedence: topmost branch overlay, enclosing branch groups' merged
    /// views, the scope, then outer scopes.
    #[must_use]
    pub fn get_type(&self, name: &str) -> TypeString {
        self.lookup(name).unwrap_or_default()
    }

    fn lookup(&self, name: &str) -> Option<TypeString> {
        for frame in self.frames.iter().rev() {
            match frame {
                Frame::Branch { vars } | Frame::Scope { vars } => {
                    if let Some(ty) = vars.get(name) {
                        return Some(ty.clone());
                    }
                }
                Frame::BranchGroup { branches } => {
                    let mut merged = TypeString::empty();
                    let mut found = false;
                    for branch in branches {
                        if let Some(ty) = branch.get(name) {
                            merged = merged.merge(ty);
                            found = true;
                        }
                    }
                    if found {
                        return Some(merged);
                    }
                }
            }
        }
        None
    }

    /// Writes into the innermost branch if one is active, else into the
    /// innermost scope.
    fn bind(&mut self, name: &str, ty: TypeString) {
        for frame in self.frames.iter_mut().rev() {
            match frame {
                Frame::Branch { vars } | Frame::Scope { vars } => {
                    vars.insert(SmolStr::new(name), ty);
                    return;
                }
                Frame::BranchGroup { .. } => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(text: &str) -> TypeString {
        TypeString::parse(text)
    }

    #[test]
    fn test_scope_shadowing_and_pop() {
        let mut table = VariableTable::new();
        table.set_type("$x", ty("int"));
        table.push_scope();
        assert_eq!(table.get_type("$x"), ty("int"));
        table.set_type("$x", ty("string"));
        assert_eq!(table.get_type("$x"), ty("string"));
        table.pop_scope();
        assert_eq!(table.get_type("$x"), ty("int"));
    }

    #[test]
    fn test_branch_group_union() {
        let mut table = VariableTable::new();
        table.push_branch_group();
        table.push_branch();
        table.set_type("$v", ty("A"));
        table.pop_branch();
        table.push_branch();
        table.set_type("$v", ty("B"));
        table.pop_branch();
        table.pop_branch_group();

        assert_eq!(table.get_type("$v"), ty("A|B"));
    }

    #[test]
    fn test_untouched_branch_contributes_prior() {
        let mut table = VariableTable::new();
        table.set_type("$x", ty("Baz"));
        table.push_branch_group();
        table.push_branch();
        table.set_type("$x", ty("Bar"));
        table.pop_branch();
        table.push_branch();
        // The else branch does not touch $x.
        table.pop_branch();
        table.pop_branch_group();

        assert_eq!(table.get_type("$x"), ty("Bar|Baz"));
    }

    #[test]
    fn test_no_prior_and_single_branch() {
        let mut table = VariableTable::new();
        table.push_branch_group();
        table.push_branch();
        table.set_type("$fresh", ty("int"));
        table.pop_branch();
        table.push_branch();
        table.pop_branch();
        table.pop_branch_group();

        // Absent from the other branch with no prior type: the union is
        // just the branch's own contribution.
        assert_eq!(table.get_type("$fresh"), ty("int"));
    }

    #[test]
    fn test_lookup_inside_branch_sees_overlay_first() {
        let mut table = VariableTable::new();
        table.set_type("$x", ty("Baz"));
        table.push_branch_group();
        table.push_branch();
        table.set_type("$x", ty("Bar"));
        assert_eq!(table.get_type("$x"), ty("Bar"));
        table.pop_branch();
        // Between branches, the committed overlay is visible through the
        // group's merged view.
        assert_eq!(table.get_type("$x"), ty("Bar"));
        table.push_branch();
        // A fresh branch that has not touched $x sees... the group merge
        // first, then the scope.
        table.pop_branch();
        table.pop_branch_group();
        assert_eq!(table.get_type("$x"), ty("Bar|Baz"));
    }

    #[test]
    fn test_nested_groups() {
        // Models: if (p) { if (q) { $x = B; } else {} } else {}
        let mut table = VariableTable::new();
        table.set_type("$x", ty("A"));
        table.push_branch_group();
        table.push_branch();
        table.push_branch_group();
        table.push_branch();
        table.set_type("$x", ty("B"));
        table.pop_branch();
        table.push_branch();
        table.pop_branch();
        table.pop_branch_group();
        // The inner group folded B with the untouched-else prior A into
        // the outer branch.
        assert_eq!(table.get_type("$x"), ty("A|B"));
        table.pop_branch();
        table.push_branch();
        table.pop_branch();
        table.pop_branch_group();
        assert_eq!(table.get_type("$x"), ty("A|B"));
    }
}
