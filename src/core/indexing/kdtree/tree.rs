// src/core/indexing/kdtree/tree.rs

//! Defines the core KD-Tree structures: `KdNode` and `KdTree`.

use super::builder::SplitPolicy;
use crate::core::types::Product;

/// A node in the KD-Tree.
///
/// Every node stores one product (its pivot) together with the axis the
/// surrounding range was partitioned on. Children are owned exclusively, so
/// dropping a node drops its whole subtree.
#[derive(Debug, Clone)]
pub struct KdNode {
    pub(super) product: Product,
    pub(super) axis: usize,
    pub(super) left: Option<Box<KdNode>>,
    pub(super) right: Option<Box<KdNode>>,
}

impl KdNode {
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// The split axis (0 = x, 1 = y, 2 = z).
    pub fn axis(&self) -> usize {
        self.axis
    }

    pub fn left(&self) -> Option<&KdNode> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&KdNode> {
        self.right.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// An immutable KD-Tree over a set of products.
///
/// Built once with [`build_kdtree`](super::build_kdtree) and read-only
/// afterwards, so a shared reference can be queried from any number of threads.
#[derive(Debug, Clone)]
pub struct KdTree {
    pub(super) root: Option<Box<KdNode>>,
    len: usize,
    policy: SplitPolicy,
}

impl KdTree {
    pub(super) fn new(root: Option<Box<KdNode>>, len: usize, policy: SplitPolicy) -> Self {
        Self { root, len, policy }
    }

    pub fn root(&self) -> Option<&KdNode> {
        self.root.as_deref()
    }

    /// Number of products (and therefore nodes) in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The axis selection policy the tree was built with.
    pub fn policy(&self) -> SplitPolicy {
        self.policy
    }

    /// Number of levels; 0 for an empty tree.
    pub fn height(&self) -> usize {
        fn node_height(node: Option<&KdNode>) -> usize {
            node.map_or(0, |n| 1 + node_height(n.left()).max(node_height(n.right())))
        }
        node_height(self.root())
    }

    /// In-order traversal over every product in the tree.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.root())
    }

    /// Checks the partition ordering at every node: each product in the left
    /// subtree is `<=` the pivot on the node's axis, each product in the right
    /// subtree is `>=` it.
    pub fn satisfies_invariant(&self) -> bool {
        self.root().map_or(true, node_satisfies_invariant)
    }
}

fn node_satisfies_invariant(node: &KdNode) -> bool {
    let axis = node.axis;
    let pivot = node.product.coordinates[axis];

    Iter::new(node.left()).all(|p| p.coordinates[axis] <= pivot)
        && Iter::new(node.right()).all(|p| p.coordinates[axis] >= pivot)
        && node.left().map_or(true, node_satisfies_invariant)
        && node.right().map_or(true, node_satisfies_invariant)
}

impl<'a> IntoIterator for &'a KdTree {
    type Item = &'a Product;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over the products of a (sub)tree.
#[derive(Debug)]
pub struct Iter<'a> {
    stack: Vec<&'a KdNode>,
}

impl<'a> Iter<'a> {
    fn new(root: Option<&'a KdNode>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a KdNode>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Product;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(&node.product)
    }
}
