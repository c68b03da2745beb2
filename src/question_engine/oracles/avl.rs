//! AVL tree with a switchable balancing policy, plus the builder that
//! produces "insert these keys next" sequences for the AVL generator.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::question_engine::{
    error::GenerationError,
    oracles::{BinaryTree, NodeId},
    random::Random,
};

/// Smallest and largest key the sequence builder draws.
pub const KEY_MIN: i64 = 1;
pub const KEY_MAX: i64 = 99;

/// Whether insertions rebalance the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Balance {
    /// Plain BST insertion; heights are tracked but never corrected.
    None,
    /// Classic AVL: single and double rotations after every insertion.
    Rotate,
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Balance::None   => write!(f, "none"),
            Balance::Rotate => write!(f, "rotate"),
        }
    }
}

impl FromStr for Balance {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none"   => Ok(Balance::None),
            "rotate" => Ok(Balance::Rotate),
            _        => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AvlNode {
    key: i64,
    height: i32,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct AvlTree {
    nodes: Vec<AvlNode>,
    root: Option<NodeId>,
}

impl AvlTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, key: i64) -> bool {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            cursor = match key.cmp(&self.nodes[id.0].key) {
                Ordering::Equal   => return true,
                Ordering::Less    => self.nodes[id.0].left,
                Ordering::Greater => self.nodes[id.0].right,
            };
        }
        false
    }

    /// Insert `key`; returns `false` if it was already present.
    pub fn insert(&mut self, key: i64, balance: Balance) -> bool {
        let (root, inserted) = self.insert_at(self.root, key, balance);
        self.root = Some(root);
        inserted
    }

    fn insert_at(&mut self, slot: Option<NodeId>, key: i64, balance: Balance) -> (NodeId, bool) {
        let Some(id) = slot else {
            let id = NodeId(self.nodes.len());
            self.nodes.push(AvlNode { key, height: 1, left: None, right: None });
            return (id, true);
        };

        let inserted = match key.cmp(&self.nodes[id.0].key) {
            Ordering::Equal => false,
            Ordering::Less => {
                let (child, inserted) = self.insert_at(self.nodes[id.0].left, key, balance);
                self.nodes[id.0].left = Some(child);
                inserted
            }
            Ordering::Greater => {
                let (child, inserted) = self.insert_at(self.nodes[id.0].right, key, balance);
                self.nodes[id.0].right = Some(child);
                inserted
            }
        };
        if !inserted {
            return (id, false);
        }

        self.update_height(id);
        match balance {
            Balance::None   => (id, true),
            Balance::Rotate => (self.rebalance(id), true),
        }
    }

    fn height(&self, slot: Option<NodeId>) -> i32 {
        slot.map_or(0, |id| self.nodes[id.0].height)
    }

    fn update_height(&mut self, id: NodeId) {
        let node = &self.nodes[id.0];
        let height = 1 + self.height(node.left).max(self.height(node.right));
        self.nodes[id.0].height = height;
    }

    /// Height of the left subtree minus height of the right subtree.
    pub fn balance_factor(&self, id: NodeId) -> i32 {
        let node = &self.nodes[id.0];
        self.height(node.left) - self.height(node.right)
    }

    fn rebalance(&mut self, id: NodeId) -> NodeId {
        let factor = self.balance_factor(id);
        if factor > 1 {
            if let Some(left) = self.nodes[id.0].left {
                if self.balance_factor(left) < 0 {
                    self.nodes[id.0].left = Some(self.rotate_left(left));
                }
            }
            return self.rotate_right(id);
        }
        if factor < -1 {
            if let Some(right) = self.nodes[id.0].right {
                if self.balance_factor(right) > 0 {
                    self.nodes[id.0].right = Some(self.rotate_right(right));
                }
            }
            return self.rotate_left(id);
        }
        id
    }

    fn rotate_right(&mut self, y: NodeId) -> NodeId {
        let Some(x) = self.nodes[y.0].left else { return y };
        self.nodes[y.0].left = self.nodes[x.0].right;
        self.nodes[x.0].right = Some(y);
        self.update_height(y);
        self.update_height(x);
        x
    }

    fn rotate_left(&mut self, x: NodeId) -> NodeId {
        let Some(y) = self.nodes[x.0].right else { return x };
        self.nodes[x.0].right = self.nodes[y.0].left;
        self.nodes[y.0].left = Some(x);
        self.update_height(x);
        self.update_height(y);
        y
    }
}

impl BinaryTree for AvlTree {
    fn root(&self) -> Option<NodeId> {
        self.root
    }

    fn key(&self, id: NodeId) -> i64 {
        self.nodes[id.0].key
    }

    fn left(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].left
    }

    fn right(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].right
    }
}

/// A starting tree plus the keys the student is asked to insert next.
#[derive(Debug, Clone)]
pub struct AvlSequence {
    pub balance: Balance,
    /// Insertion order that produced `before`.
    pub initial_keys: Vec<i64>,
    /// Keys to insert next, in order.
    pub asked: Vec<i64>,
    /// Tree shown to the student.
    pub before: AvlTree,
    /// Tree after inserting every key in `asked`.
    pub after: AvlTree,
}

impl AvlSequence {
    /// Draw `size` distinct keys into a fresh tree, snapshot it, then draw
    /// `asks` further keys not yet present and insert them as well.
    pub fn build(
        random: &mut Random,
        size: usize,
        asks: usize,
        balance: Balance,
        max_redraws: usize,
    ) -> Result<Self, GenerationError> {
        let mut tree = AvlTree::new();
        let mut initial_keys = Vec::with_capacity(size);
        for _ in 0..size {
            let key = random.redraw(
                "distinct AVL key",
                max_redraws,
                |r| r.int(KEY_MIN, KEY_MAX),
                |k| !tree.contains(*k),
            )?;
            tree.insert(key, balance);
            initial_keys.push(key);
        }

        let before = tree.clone();
        let mut asked = Vec::with_capacity(asks);
        for _ in 0..asks {
            let key = random.redraw(
                "AVL key to insert",
                max_redraws,
                |r| r.int(KEY_MIN, KEY_MAX),
                |k| !tree.contains(*k),
            )?;
            tree.insert(key, balance);
            asked.push(key);
        }

        Ok(AvlSequence { balance, initial_keys, asked, before, after: tree })
    }

    /// Every key in the order it was inserted.
    pub fn insertions(&self) -> impl Iterator<Item = i64> + '_ {
        self.initial_keys.iter().chain(self.asked.iter()).copied()
    }
}
