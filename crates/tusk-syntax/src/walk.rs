//! Depth-first traversal over the syntax tree.
//!
//! Traversal is strictly structural; visitors carry their own state. A
//! visitor can prune whole subtrees by returning `false` from
//! [`Visitor::should_descend`].

use crate::syntax::SyntaxNode;
use rowan::WalkEvent;

/// A depth-first syntax tree visitor.
pub trait Visitor {
    /// Called when a node is entered, before its children.
    fn preorder(&mut self, _node: &SyntaxNode) {}

    /// Called when a node is left, after its children.
    fn postorder(&mut self, _node: &SyntaxNode) {}

    /// Returns `false` to skip the children of `node`. `postorder` still
    /// fires for the node itself.
    fn should_descend(&mut self, _node: &SyntaxNode) -> bool {
        true
    }
}

/// Walks `root` depth-first, invoking the visitor on every node.
pub fn walk(root: &SyntaxNode, visitor: &mut dyn Visitor) {
    let mut preorder = root.preorder();
    while let Some(event) = preorder.next() {
        match event {
            WalkEvent::Enter(node) => {
                visitor.preorder(&node);
                if !visitor.should_descend(&node) {
                    preorder.skip_subtree();
                }
            }
            WalkEvent::Leave(node) => visitor.postorder(&node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::syntax::SyntaxKind;

    struct Counter {
        entered: usize,
        left: usize,
        skip_blocks: bool,
        saw_inside_block: bool,
    }

    impl Visitor for Counter {
        fn preorder(&mut self, node: &SyntaxNode) {
            self.entered += 1;
            if node.kind() == SyntaxKind::VarRef {
                self.saw_inside_block = true;
            }
        }

        fn postorder(&mut self, _node: &SyntaxNode) {
            self.left += 1;
        }

        fn should_descend(&mut self, node: &SyntaxNode) -> bool {
            !(self.skip_blocks && node.kind() == SyntaxKind::Block)
        }
    }

    #[test]
    fn test_enter_leave_balance() {
        let parse = parse("<?php function f() { $a = 1; }");
        let mut counter = Counter {
            entered: 0,
            left: 0,
            skip_blocks: false,
            saw_inside_block: true,
        };
        walk(&parse.syntax(), &mut counter);
        assert_eq!(counter.entered, counter.left);
        assert!(counter.entered > 0);
    }

    #[test]
    fn test_should_descend_prunes() {
        let parse = parse("<?php function f() { $a = 1; }");
        let mut counter = Counter {
            entered: 0,
            left: 0,
            skip_blocks: true,
            saw_inside_block: false,
        };
        walk(&parse.syntax(), &mut counter);
        assert!(!counter.saw_inside_block);
    }
}
