//! Ground-truth computations used by the topic generators.
//!
//! | Module    | Purpose |
//! |-----------|---------|
//! | `bst`     | Arena-backed binary search tree: insert, delete, neighbours, traversals |
//! | `avl`     | AVL tree with switchable rotations and the insertion-sequence builder |
//! | `modular` | gcd, modular inverse, fast exponentiation, Chinese Remainder Theorem |
//! | `stack`   | LIFO stack and a replay runner recording return values |
//!
//! Both trees store nodes in a `Vec` and link them by [`NodeId`], so parent
//! back-references never own anything.

use std::collections::VecDeque;

pub mod avl;
pub mod bst;
pub mod modular;
pub mod stack;

/// Stable index of a node inside one tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Read access shared by the BST and AVL arenas; traversals come for free.
pub trait BinaryTree {
    fn root(&self) -> Option<NodeId>;
    fn key(&self, id: NodeId) -> i64;
    fn left(&self, id: NodeId) -> Option<NodeId>;
    fn right(&self, id: NodeId) -> Option<NodeId>;

    /// All keys in ascending order.
    fn in_order(&self) -> Vec<i64> {
        let mut keys = Vec::new();
        let mut stack = Vec::new();
        let mut cursor = self.root();
        while cursor.is_some() || !stack.is_empty() {
            while let Some(id) = cursor {
                stack.push(id);
                cursor = self.left(id);
            }
            if let Some(id) = stack.pop() {
                keys.push(self.key(id));
                cursor = self.right(id);
            }
        }
        keys
    }

    /// Breadth-first snapshot. Every present node contributes its key and
    /// queues both child slots, so missing children show up as `None`.
    /// Trailing `None`s are trimmed; the empty tree yields `[]`.
    fn level_order(&self) -> Vec<Option<i64>> {
        let mut out = Vec::new();
        let mut queue = VecDeque::from([self.root()]);
        if self.root().is_none() {
            return out;
        }
        while let Some(slot) = queue.pop_front() {
            match slot {
                Some(id) => {
                    out.push(Some(self.key(id)));
                    queue.push_back(self.left(id));
                    queue.push_back(self.right(id));
                }
                None => out.push(None),
            }
        }
        while out.last() == Some(&None) {
            out.pop();
        }
        out
    }

    /// Rows of child slots per depth, for display. Row `d + 1` holds the two
    /// child slots of every present node in row `d`.
    fn levels(&self) -> Vec<Vec<Option<i64>>> {
        let mut rows = Vec::new();
        let mut current = vec![self.root()];
        while current.iter().any(Option::is_some) {
            rows.push(current.iter().map(|slot| slot.map(|id| self.key(id))).collect());
            current = current
                .iter()
                .flatten()
                .flat_map(|&id| [self.left(id), self.right(id)])
                .collect();
        }
        rows
    }

    /// Number of nodes on the longest root-to-leaf path.
    fn depth(&self) -> usize {
        self.levels().len()
    }
}
