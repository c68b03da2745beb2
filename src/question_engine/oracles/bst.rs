//! Unbalanced binary search tree over integer keys.
//!
//! Nodes live in an arena; `parent` is an index used for walking upwards
//! only. Slots of deleted nodes are not reused, which is fine for trees that
//! live for a single question.

use crate::question_engine::{
    oracles::{BinaryTree, NodeId},
    random::Random,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    key: i64,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct BstTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    len: usize,
}

impl BstTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree by inserting `keys` in order.
    pub fn from_keys(keys: &[i64]) -> Self {
        let mut tree = Self::new();
        for &key in keys {
            tree.insert(key);
        }
        tree
    }

    /// Random tree of `size` distinct keys drawn from `keys`, inserted in
    /// draw order.
    pub fn random(random: &mut Random, size: usize, keys: std::ops::RangeInclusive<i64>) -> Self {
        let pool: Vec<i64> = keys.collect();
        Self::from_keys(&random.subset(&pool, size))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, key: i64) -> bool {
        self.find(key).is_some()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Insert `key`. Returns `false` (and changes nothing) if it is present.
    pub fn insert(&mut self, key: i64) -> bool {
        let mut parent = None;
        let mut cursor = self.root;
        while let Some(id) = cursor {
            parent = Some(id);
            let current = self.node(id).key;
            if key == current {
                return false;
            }
            cursor = if key < current { self.node(id).left } else { self.node(id).right };
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { key, parent, left: None, right: None });
        match parent {
            None => self.root = Some(id),
            Some(p) if key < self.node(p).key => self.node_mut(p).left = Some(id),
            Some(p) => self.node_mut(p).right = Some(id),
        }
        self.len += 1;
        true
    }

    /// Delete `key`. Returns `false` if it was not present.
    pub fn delete(&mut self, key: i64) -> bool {
        match self.find(key) {
            Some(id) => {
                self.remove_node(id);
                true
            }
            None => false,
        }
    }

    /// Three-case deletion: no left child, no right child, or both children
    /// (the in-order successor takes the node's place).
    fn remove_node(&mut self, z: NodeId) {
        let Node { left, right, .. } = self.node(z).clone();
        match (left, right) {
            (None, _) => self.transplant(z, right),
            (Some(l), None) => self.transplant(z, Some(l)),
            (Some(l), Some(r)) => {
                let y = self.minimum(r);
                if self.node(y).parent != Some(z) {
                    let y_right = self.node(y).right;
                    self.transplant(y, y_right);
                    self.node_mut(y).right = Some(r);
                    self.node_mut(r).parent = Some(y);
                }
                self.transplant(z, Some(y));
                self.node_mut(y).left = Some(l);
                self.node_mut(l).parent = Some(y);
            }
        }
        let removed = self.node_mut(z);
        removed.parent = None;
        removed.left = None;
        removed.right = None;
        self.len -= 1;
    }

    /// Put the subtree rooted at `v` where the subtree rooted at `u` was.
    fn transplant(&mut self, u: NodeId, v: Option<NodeId>) {
        let parent = self.node(u).parent;
        match parent {
            None => self.root = v,
            Some(p) if self.node(p).left == Some(u) => self.node_mut(p).left = v,
            Some(p) => self.node_mut(p).right = v,
        }
        if let Some(v) = v {
            self.node_mut(v).parent = parent;
        }
    }

    pub fn find(&self, key: i64) -> Option<NodeId> {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let current = self.node(id).key;
            if key == current {
                return Some(id);
            }
            cursor = if key < current { self.node(id).left } else { self.node(id).right };
        }
        None
    }

    /// Leftmost node of the subtree rooted at `id`.
    pub fn minimum(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }

    /// Rightmost node of the subtree rooted at `id`.
    pub fn maximum(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.node(id).right {
            id = right;
        }
        id
    }

    /// Node with the largest key smaller than `id`'s key.
    pub fn predecessor(&self, mut id: NodeId) -> Option<NodeId> {
        if let Some(left) = self.node(id).left {
            return Some(self.maximum(left));
        }
        let mut parent = self.node(id).parent;
        while let Some(p) = parent {
            if self.node(p).left != Some(id) {
                break;
            }
            id = p;
            parent = self.node(p).parent;
        }
        parent
    }

    /// Node with the smallest key larger than `id`'s key.
    pub fn successor(&self, mut id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.node(id).right {
            return Some(self.minimum(right));
        }
        let mut parent = self.node(id).parent;
        while let Some(p) = parent {
            if self.node(p).right != Some(id) {
                break;
            }
            id = p;
            parent = self.node(p).parent;
        }
        parent
    }

    pub fn min_key(&self) -> Option<i64> {
        self.root.map(|r| self.node(self.minimum(r)).key)
    }

    pub fn max_key(&self) -> Option<i64> {
        self.root.map(|r| self.node(self.maximum(r)).key)
    }
}

impl BinaryTree for BstTree {
    fn root(&self) -> Option<NodeId> {
        self.root
    }

    fn key(&self, id: NodeId) -> i64 {
        self.node(id).key
    }

    fn left(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).left
    }

    fn right(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    /// Walk every reachable node and check ordering bounds and parent links.
    fn assert_well_formed(tree: &BstTree) {
        fn walk(tree: &BstTree, id: NodeId, lo: Option<i64>, hi: Option<i64>, count: &mut usize) {
            *count += 1;
            let node = tree.node(id);
            assert!(lo.map_or(true, |lo| node.key > lo), "key {} breaks lower bound", node.key);
            assert!(hi.map_or(true, |hi| node.key < hi), "key {} breaks upper bound", node.key);
            for child in [node.left, node.right].into_iter().flatten() {
                assert_eq!(tree.node(child).parent, Some(id), "stale parent link below {}", node.key);
            }
            if let Some(l) = node.left {
                walk(tree, l, lo, Some(node.key), count);
            }
            if let Some(r) = node.right {
                walk(tree, r, Some(node.key), hi, count);
            }
        }
        let mut count = 0;
        if let Some(root) = tree.root {
            assert_eq!(tree.node(root).parent, None, "root must not have a parent");
            walk(tree, root, None, None, &mut count);
        }
        assert_eq!(count, tree.len());
    }

    #[test]
    fn insert_keeps_keys_sorted() {
        let mut tree = BstTree::new();
        tree.insert(10);
        assert_eq!(tree.in_order(), vec![10]);

        for k in [5, 7, 13] {
            tree.insert(k);
        }
        assert_eq!(tree.in_order(), vec![5, 7, 10, 13]);

        for k in [11, 16, 15] {
            tree.insert(k);
        }
        assert_eq!(tree.in_order(), vec![5, 7, 10, 11, 13, 15, 16]);
        assert_well_formed(&tree);
    }

    #[test]
    fn ascending_inserts_build_a_sorted_chain() {
        let keys: Vec<i64> = (0..100).collect();
        let tree = BstTree::from_keys(&keys);
        assert_eq!(tree.in_order(), keys);
        assert_eq!(tree.depth(), 100);
    }

    #[test]
    fn duplicate_insert_is_a_no_op() {
        let mut tree = BstTree::from_keys(&[4, 2, 6]);
        assert!(!tree.insert(2));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.in_order(), vec![2, 4, 6]);
    }

    #[test]
    fn delete_covers_all_three_cases() {
        let mut tree = BstTree::from_keys(&[5, 7, 13, 11, 2, 1, 3]);
        // 2 has two children, 11 is a leaf.
        assert!(tree.delete(2));
        assert!(tree.delete(11));
        assert_eq!(tree.in_order(), vec![1, 3, 5, 7, 13]);
        assert_well_formed(&tree);

        // 7 now has a single right child.
        assert!(tree.delete(7));
        assert_eq!(tree.in_order(), vec![1, 3, 5, 13]);
        assert_well_formed(&tree);

        assert!(!tree.delete(42));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn deleting_the_root_promotes_its_successor() {
        let mut tree = BstTree::from_keys(&[8, 4, 12, 10, 14, 9]);
        tree.delete(8);
        assert_eq!(tree.level_order(), vec![Some(9), Some(4), Some(12), None, None, Some(10), Some(14)]);
        assert_well_formed(&tree);
    }

    #[test]
    fn delete_everything_leaves_an_empty_tree() {
        let mut tree = BstTree::from_keys(&[3, 1, 2]);
        for k in [3, 1, 2] {
            assert!(tree.delete(k));
        }
        assert!(tree.is_empty());
        assert!(tree.level_order().is_empty());
        assert_eq!(tree.min_key(), None);
    }

    #[test]
    fn neighbours_walk_parent_links() {
        let tree = BstTree::from_keys(&[20, 10, 30, 5, 15, 25, 35, 12]);
        let key_of = |id: Option<NodeId>| id.map(|id| tree.key(id));

        let n15 = tree.find(15).unwrap();
        assert_eq!(key_of(tree.successor(n15)), Some(20));
        assert_eq!(key_of(tree.predecessor(n15)), Some(12));

        let n12 = tree.find(12).unwrap();
        assert_eq!(key_of(tree.predecessor(n12)), Some(10));

        let n25 = tree.find(25).unwrap();
        assert_eq!(key_of(tree.predecessor(n25)), Some(20));

        let n35 = tree.find(35).unwrap();
        assert_eq!(tree.successor(n35), None);
        let n5 = tree.find(5).unwrap();
        assert_eq!(tree.predecessor(n5), None);

        assert_eq!(tree.min_key(), Some(5));
        assert_eq!(tree.max_key(), Some(35));
    }

    #[test]
    fn level_order_marks_missing_children() {
        let tree = BstTree::from_keys(&[8, 3, 10, 14]);
        assert_eq!(tree.level_order(), vec![Some(8), Some(3), Some(10), None, None, None, Some(14)]);
        assert_eq!(
            tree.levels(),
            vec![
                vec![Some(8)],
                vec![Some(3), Some(10)],
                vec![None, None, None, Some(14)],
            ]
        );
    }

    #[test]
    fn random_tree_has_requested_size() {
        let mut random = Random::new("bst");
        let tree = BstTree::random(&mut random, 9, 1..=100);
        assert_eq!(tree.len(), 9);
        assert!(tree.in_order().iter().all(|k| (1..=100).contains(k)));
    }

    proptest! {
        #[test]
        fn in_order_matches_a_sorted_set(ops in prop::collection::vec((any::<bool>(), 0i64..40), 0..120)) {
            let mut tree = BstTree::new();
            let mut model = BTreeSet::new();
            for (is_insert, key) in ops {
                if is_insert {
                    prop_assert_eq!(tree.insert(key), model.insert(key));
                } else {
                    prop_assert_eq!(tree.delete(key), model.remove(&key));
                }
            }
            prop_assert_eq!(tree.in_order(), model.iter().copied().collect::<Vec<_>>());
            assert_well_formed(&tree);
        }
    }
}
