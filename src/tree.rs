// 🌳 Ordered tree store - unbalanced binary search tree of bids keyed by bid_id

use crate::bid::Bid;
use std::cmp::Ordering;

/// Visit order for `BinarySearchTree::traverse`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    PreOrder,
    InOrder,
    PostOrder,
}

impl Traversal {
    /// Human-readable name for display
    pub fn name(&self) -> &str {
        match self {
            Traversal::PreOrder => "pre-order",
            Traversal::InOrder => "in-order",
            Traversal::PostOrder => "post-order",
        }
    }
}

struct Node {
    bid: Bid,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn new(bid: Bid) -> Self {
        Node {
            bid,
            left: None,
            right: None,
        }
    }
}

/// Binary search tree of bids
///
/// Every node owns its two subtrees. The shape depends only on insertion
/// order: there is no rebalancing, so sorted input degrades to a list.
pub struct BinarySearchTree {
    root: Option<Box<Node>>,
    len: usize,
}

impl Default for BinarySearchTree {
    fn default() -> Self {
        Self::new()
    }
}

impl BinarySearchTree {
    pub fn new() -> Self {
        BinarySearchTree { root: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Insert a bid
    ///
    /// Returns `false` and leaves the tree untouched when a bid with the
    /// same id is already stored. The existing bid is not updated.
    pub fn insert(&mut self, bid: Bid) -> bool {
        let mut slot = &mut self.root;

        while let Some(node) = slot {
            match bid.bid_id.cmp(&node.bid.bid_id) {
                Ordering::Less => slot = &mut node.left,
                Ordering::Greater => slot = &mut node.right,
                Ordering::Equal => return false,
            }
        }

        *slot = Some(Box::new(Node::new(bid)));
        self.len += 1;
        true
    }

    /// Find a bid by id
    pub fn search(&self, bid_id: &str) -> Option<&Bid> {
        let mut current = self.root.as_deref();

        while let Some(node) = current {
            match bid_id.cmp(node.bid.bid_id.as_str()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Equal => return Some(&node.bid),
            }
        }

        None
    }

    pub fn contains(&self, bid_id: &str) -> bool {
        self.search(bid_id).is_some()
    }

    /// Remove a bid by id, returning it if it was stored
    ///
    /// A node with two children takes over its in-order successor's bid and
    /// the successor node is unlinked from the right subtree instead.
    pub fn remove(&mut self, bid_id: &str) -> Option<Bid> {
        let removed = remove_node(&mut self.root, bid_id);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty)
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node, usize)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, 1));
        }

        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            if let Some(left) = node.left.as_deref() {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right.as_deref() {
                stack.push((right, depth + 1));
            }
        }

        height
    }

    /// Collect the bids in the requested visit order
    pub fn traverse(&self, order: Traversal) -> Vec<&Bid> {
        match order {
            Traversal::PreOrder => self.pre_order(),
            Traversal::InOrder => self.in_order(),
            Traversal::PostOrder => self.post_order(),
        }
    }

    /// Bids in ascending bid_id order
    pub fn in_order(&self) -> Vec<&Bid> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node> = Vec::new();
        let mut current = self.root.as_deref();

        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            match stack.pop() {
                Some(node) => {
                    out.push(&node.bid);
                    current = node.right.as_deref();
                }
                None => break,
            }
        }

        out
    }

    pub fn pre_order(&self) -> Vec<&Bid> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node> = self.root.as_deref().into_iter().collect();

        while let Some(node) = stack.pop() {
            out.push(&node.bid);
            // Right first so the left subtree is visited first
            if let Some(right) = node.right.as_deref() {
                stack.push(right);
            }
            if let Some(left) = node.left.as_deref() {
                stack.push(left);
            }
        }

        out
    }

    pub fn post_order(&self) -> Vec<&Bid> {
        // Node-right-left visit, reversed, is left-right-node
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node> = self.root.as_deref().into_iter().collect();

        while let Some(node) = stack.pop() {
            out.push(&node.bid);
            if let Some(left) = node.left.as_deref() {
                stack.push(left);
            }
            if let Some(right) = node.right.as_deref() {
                stack.push(right);
            }
        }

        out.reverse();
        out
    }

    /// Drop every node, leaving an empty tree
    pub fn clear(&mut self) {
        let mut stack: Vec<Box<Node>> = self.root.take().into_iter().collect();

        while let Some(mut node) = stack.pop() {
            if let Some(left) = node.left.take() {
                stack.push(left);
            }
            if let Some(right) = node.right.take() {
                stack.push(right);
            }
        }

        self.len = 0;
    }
}

// Boxed children would otherwise drop recursively, one frame per level
impl Drop for BinarySearchTree {
    fn drop(&mut self) {
        self.clear();
    }
}

fn remove_node(slot: &mut Option<Box<Node>>, bid_id: &str) -> Option<Bid> {
    let node = slot.as_mut()?;

    match bid_id.cmp(node.bid.bid_id.as_str()) {
        Ordering::Less => remove_node(&mut node.left, bid_id),
        Ordering::Greater => remove_node(&mut node.right, bid_id),
        Ordering::Equal => {
            if node.left.is_some() && node.right.is_some() {
                let successor = take_min(&mut node.right)?;
                return Some(std::mem::replace(&mut node.bid, successor));
            }

            // Leaf or single child: the child (if any) takes the slot
            let mut removed = slot.take()?;
            *slot = removed.left.take().or_else(|| removed.right.take());
            Some(removed.bid)
        }
    }
}

/// Unlink the leftmost node of a subtree and return its bid
fn take_min(slot: &mut Option<Box<Node>>) -> Option<Bid> {
    let node = slot.as_mut()?;
    if node.left.is_some() {
        return take_min(&mut node.left);
    }

    let mut min = slot.take()?;
    *slot = min.right.take();
    Some(min.bid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn bid(id: &str) -> Bid {
        Bid::new(id, format!("Item {}", id), "General Fund", 10.0)
    }

    fn tree_of(ids: &[&str]) -> BinarySearchTree {
        let mut tree = BinarySearchTree::new();
        for id in ids {
            tree.insert(bid(id));
        }
        tree
    }

    fn ids(bids: Vec<&Bid>) -> Vec<String> {
        bids.into_iter().map(|b| b.bid_id.clone()).collect()
    }

    #[test]
    fn test_empty_tree() {
        let tree = BinarySearchTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert!(tree.search("98223").is_none());
        assert!(tree.in_order().is_empty());
        assert!(tree.pre_order().is_empty());
        assert!(tree.post_order().is_empty());
    }

    #[test]
    fn test_insert_search_remove_scenario() {
        let mut tree = tree_of(&["98109", "98223", "98001"]);

        assert_eq!(ids(tree.in_order()), vec!["98001", "98109", "98223"]);
        assert_eq!(tree.search("98223"), Some(&bid("98223")));

        let removed = tree.remove("98109");
        assert_eq!(removed, Some(bid("98109")));
        assert_eq!(ids(tree.in_order()), vec!["98001", "98223"]);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_remove_only_record() {
        let mut tree = tree_of(&["A1"]);
        assert_eq!(tree.remove("A1"), Some(bid("A1")));
        assert!(tree.in_order().is_empty());
        assert!(tree.search("A1").is_none());
        assert!(tree.is_empty());
    }

    #[test]
    fn test_search_missing_id() {
        let tree = tree_of(&["98109", "98223", "98001"]);
        assert!(tree.search("98002").is_none());
        assert!(!tree.contains(""));
    }

    #[test]
    fn test_duplicate_insert_is_ignored() {
        let mut tree = tree_of(&["98109"]);
        let replacement = Bid::new("98109", "Other", "Other Fund", 99.0);

        assert!(!tree.insert(replacement));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.search("98109"), Some(&bid("98109")));
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let tree = tree_of(&["100", "9", "20"]);
        assert_eq!(ids(tree.in_order()), vec!["100", "20", "9"]);
    }

    #[test]
    fn test_traversal_orders() {
        //        m
        //      /   \
        //     f     t
        //    / \     \
        //   c   h     w
        let tree = tree_of(&["m", "f", "t", "c", "h", "w"]);

        assert_eq!(ids(tree.traverse(Traversal::PreOrder)), vec!["m", "f", "c", "h", "t", "w"]);
        assert_eq!(ids(tree.traverse(Traversal::InOrder)), vec!["c", "f", "h", "m", "t", "w"]);
        assert_eq!(ids(tree.traverse(Traversal::PostOrder)), vec!["c", "h", "f", "w", "t", "m"]);
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn test_remove_leaf() {
        let mut tree = tree_of(&["m", "f", "t", "c", "h", "w"]);
        tree.remove("c");
        assert_eq!(ids(tree.pre_order()), vec!["m", "f", "h", "t", "w"]);
    }

    #[test]
    fn test_remove_single_child_node() {
        let mut tree = tree_of(&["m", "f", "t", "c", "h", "w"]);
        tree.remove("t");
        // w moves up into t's slot
        assert_eq!(ids(tree.pre_order()), vec!["m", "f", "c", "h", "w"]);
    }

    #[test]
    fn test_remove_two_children_uses_successor() {
        let mut tree = tree_of(&["m", "f", "t", "c", "h", "w", "p", "r"]);
        tree.remove("m");
        // p is the leftmost node of the right subtree; its right child r takes its place
        assert_eq!(ids(tree.pre_order()), vec!["p", "f", "c", "h", "t", "r", "w"]);
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let mut tree = tree_of(&["m", "f", "t"]);
        assert!(tree.remove("z").is_none());
        assert_eq!(ids(tree.pre_order()), vec!["m", "f", "t"]);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_sorted_input_degenerates() {
        let mut tree = BinarySearchTree::new();
        for i in 0..1000 {
            tree.insert(bid(&format!("{:05}", i)));
        }
        assert_eq!(tree.height(), 1000);
        assert_eq!(tree.in_order().len(), 1000);
    }

    #[test]
    fn test_deep_tree_drops_without_overflow() {
        let mut tree = BinarySearchTree::new();
        for i in 0..10_000 {
            tree.insert(Bid::new(format!("{:07}", i), "", "", 0.0));
        }
        assert_eq!(tree.len(), 10_000);
        assert_eq!(tree.height(), 10_000);
        drop(tree);
    }

    #[test]
    fn test_clear() {
        let mut tree = tree_of(&["b", "a", "c"]);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.insert(bid("a")));
    }

    proptest! {
        #[test]
        fn in_order_is_sorted(keys in prop::collection::hash_set("[0-9]{1,6}", 0..128)) {
            let mut tree = BinarySearchTree::new();
            for key in &keys {
                prop_assert!(tree.insert(bid(key)));
            }

            let mut expected: Vec<String> = keys.iter().cloned().collect();
            expected.sort();
            prop_assert_eq!(ids(tree.in_order()), expected);
            prop_assert_eq!(tree.len(), keys.len());
        }

        #[test]
        fn every_inserted_bid_is_found(keys in prop::collection::vec("[a-z0-9]{1,5}", 1..64)) {
            let mut tree = BinarySearchTree::new();
            for key in &keys {
                tree.insert(bid(key));
            }
            for key in &keys {
                prop_assert_eq!(tree.search(key), Some(&bid(key)));
            }
            prop_assert!(tree.search("not-a-key").is_none());
        }

        #[test]
        fn remove_drops_exactly_one(
            keys in prop::collection::hash_set("[0-9]{1,4}", 1..96),
            pick in any::<prop::sample::Index>(),
        ) {
            let keys: Vec<String> = keys.into_iter().collect();
            let mut tree = BinarySearchTree::new();
            for key in &keys {
                tree.insert(bid(key));
            }

            let target = pick.get(&keys).clone();
            prop_assert_eq!(tree.remove(&target), Some(bid(&target)));
            prop_assert!(tree.search(&target).is_none());

            let mut expected: Vec<String> = keys.iter().filter(|k| **k != target).cloned().collect();
            expected.sort();
            prop_assert_eq!(ids(tree.in_order()), expected);
            prop_assert_eq!(tree.len(), keys.len() - 1);
        }

        #[test]
        fn removing_absent_id_changes_nothing(keys in prop::collection::hash_set("[0-9]{1,4}", 0..64)) {
            let mut tree = BinarySearchTree::new();
            for key in &keys {
                tree.insert(bid(key));
            }
            let before = ids(tree.pre_order());

            prop_assert!(tree.remove("x").is_none());
            prop_assert_eq!(ids(tree.pre_order()), before);
        }
    }
}
