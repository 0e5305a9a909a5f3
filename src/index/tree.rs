// =====================================================================
// File: index/tree.rs
//
// Description:
//   Implements the AVL index (`AvlIndex`) that manages insertion,
//   search, and deletion of products over `AvlNode` structures. This
//   index is the in-memory catalog: it owns every product and keeps
//   them ordered by id with O(log n) lookups.
//
// Features:
//   - `insert`: Adds a product. An existing id is rejected, never
//               overwritten.
//   - `search`: Standard BST descent; returns the product for an id.
//   - `delete`: Removes a product, replacing a two-child node with its
//               in-order successor.
//   - Rotation helpers: Restore the height balance on the way back up.
//
// Notes:
//   * Relies on `node.rs` for the `AvlNode` definition.
//   * Insert rebalancing picks the rotation case from the new key,
//     delete rebalancing picks it from the heavier child's balance.
//   * Internal helpers (`insert_internal`, `delete_internal`, etc.)
//     take the owning link of a subtree and leave its new root there.
// =====================================================================

use std::cmp::Ordering;

use tracing::{debug, trace};

use super::node::{balance, height, AvlNode, Link};
use crate::error::{Result, SalesError};
use crate::product::{Product, ProductId};

/// AVL Index, owns every product of the catalog keyed by id.
#[derive(Debug, Default)]
pub struct AvlIndex {
    pub(crate) root: Link,
    pub(crate) len: usize,
}


impl AvlIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of products in the index.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the whole tree, 0 when empty.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Id of the product at the root, if any.
    pub fn root_id(&self) -> Option<ProductId> {
        self.root.as_ref().map(|node| node.product.id)
    }

    /// Search for a product by id.
    ///
    /// # Returns
    /// * `Some(&Product)` if the id exists.
    /// * `None` if it does not.
    ///
    /// # Notes
    /// - Runs in **O(log n)** thanks to the height balance.
    ///
    /// # Example
    /// ```
    /// use sales_insight::index::AvlIndex;
    /// use sales_insight::product::Product;
    ///
    /// let mut index = AvlIndex::new();
    /// index.insert(Product::new(5, "Fan", 2.0, "Grey", "Reno", 10, 30.0)).unwrap();
    /// assert_eq!(index.search(5).map(|p| p.name.as_str()), Some("Fan"));
    /// assert!(index.search(6).is_none());
    /// ```
    pub fn search(&self, id: ProductId) -> Option<&Product> {

        // Recursive function declaration for node search
        fn search_node(link: &Link, id: ProductId) -> Option<&Product> {
            let node = link.as_deref()?;
            match id.cmp(&node.product.id) {
                Ordering::Less => search_node(&node.left, id),
                Ordering::Greater => search_node(&node.right, id),
                Ordering::Equal => Some(&node.product),
            }
        }
        search_node(&self.root, id)
    }

    /// Mutable lookup. Callers may change any field except `id`, which
    /// positions the node in the tree.
    pub fn search_mut(&mut self, id: ProductId) -> Option<&mut Product> {

        fn search_node_mut(link: &mut Link, id: ProductId) -> Option<&mut Product> {
            let node = link.as_deref_mut()?;
            match id.cmp(&node.product.id) {
                Ordering::Less => search_node_mut(&mut node.left, id),
                Ordering::Greater => search_node_mut(&mut node.right, id),
                Ordering::Equal => Some(&mut node.product),
            }
        }
        search_node_mut(&mut self.root, id)
    }

    /// Insert a product into the index.
    ///
    /// - If the id already exists the tree is left untouched and
    ///   [`SalesError::DuplicateKey`] is returned; the new fields are
    ///   not applied.
    /// - Otherwise the product is placed at its sorted position and
    ///   every ancestor on the way back up is rebalanced.
    ///
    /// # Example
    /// ```
    /// use sales_insight::index::AvlIndex;
    /// use sales_insight::product::Product;
    ///
    /// let mut index = AvlIndex::new();
    /// for id in [10, 20, 30] {
    ///     index.insert(Product::new(id, "item", 1.0, "c", "l", 0, 1.0)).unwrap();
    /// }
    /// // Third ascending insert triggers a single left rotation
    /// assert_eq!(index.root_id(), Some(20));
    ///
    /// let dup = Product::new(20, "other", 1.0, "c", "l", 0, 1.0);
    /// assert!(index.insert(dup).is_err());
    /// assert_eq!(index.search(20).map(|p| p.name.as_str()), Some("item"));
    /// ```
    pub fn insert(&mut self, product: Product) -> Result<()> {
        let id = product.id;
        Self::insert_internal(&mut self.root, product)?;
        self.len += 1;
        debug!(id, len = self.len, "product inserted");
        Ok(())
    }


    /// Deletes a product from the index if present and returns it.
    ///
    /// - A node with at most one child is spliced out, its child (if
    ///   any) takes its place.
    /// - A node with two children receives the payload of its in-order
    ///   successor (minimum of the right subtree), and the successor's
    ///   old position is removed instead.
    /// - Every ancestor on the path is re-evaluated and rebalanced.
    ///
    /// Returns [`SalesError::NotFound`] with no mutation if the id is
    /// absent.
    ///
    /// # Example
    /// ```
    /// use sales_insight::index::AvlIndex;
    /// use sales_insight::product::Product;
    ///
    /// let mut index = AvlIndex::new();
    /// index.insert(Product::new(1, "Cup", 0.2, "Red", "Ames", 5, 3.0)).unwrap();
    /// let removed = index.delete(1).unwrap();
    /// assert_eq!(removed.name, "Cup");
    /// assert!(index.search(1).is_none());
    /// assert!(index.delete(1).is_err());
    /// ```
    pub fn delete(&mut self, id: ProductId) -> Result<Product> {
        let removed = Self::delete_internal(&mut self.root, id)?;
        self.len -= 1;
        debug!(id, len = self.len, "product deleted");
        Ok(removed)
    }

    /// In-order iterator over the products, ascending by id.
    pub fn iter(&self) -> InOrder<'_> {
        InOrder::new(&self.root)
    }

    /// Checks the AVL balance, the cached heights and the BST ordering
    /// at every node.
    pub fn invariants_hold(&self) -> bool {

        // Returns the subtree height, or None at the first violation
        fn check(link: &Link, lower: Option<ProductId>, upper: Option<ProductId>) -> Option<usize> {
            let Some(node) = link.as_deref() else {
                return Some(0);
            };
            let id = node.product.id;
            if lower.is_some_and(|lo| id <= lo) || upper.is_some_and(|hi| id >= hi) {
                return None;
            }
            let left = check(&node.left, lower, Some(id))?;
            let right = check(&node.right, Some(id), upper)?;
            let expected = 1 + left.max(right);
            if left.abs_diff(right) > 1 || node.height != expected {
                return None;
            }
            Some(expected)
        }
        check(&self.root, None, None).is_some()
    }


    // =========================
    // Insertion helpers
    // =========================

    /// Inserts `product` into the subtree owned by `link`.
    ///
    /// # Behavior
    /// - **Empty link**: a new leaf is created in place.
    /// - **Equal id**: returns `DuplicateKey`; nothing on the path has
    ///   been touched yet, so the ancestors skip their rebalance too.
    /// - **Otherwise**: recurse left or right, then rebalance this node.
    fn insert_internal(link: &mut Link, product: Product) -> Result<()> {
        let node = match *link {
            Some(ref mut node) => node,
            None => {
                // Base case - empty position
                *link = Some(Box::new(AvlNode::new(product)));
                return Ok(());
            }
        };

        let id = product.id;
        match id.cmp(&node.product.id) {
            Ordering::Less => Self::insert_internal(&mut node.left, product)?,
            Ordering::Greater => Self::insert_internal(&mut node.right, product)?,
            Ordering::Equal => return Err(SalesError::DuplicateKey { id }),
        }

        Self::rebalance_after_insert(link, id);
        Ok(())
    }


    /// Restores the balance of the node in `link` after `id` was
    /// inserted somewhere below it.
    ///
    /// # Behavior
    /// Uses the balance factor of the node and where the new key went
    /// relative to the heavy child:
    /// - Left-Left   : single right rotation.
    /// - Right-Right : single left rotation.
    /// - Left-Right  : rotate left child left, then node right.
    /// - Right-Left  : rotate right child right, then node left.
    fn rebalance_after_insert(link: &mut Link, id: ProductId) {
        let Some(node) = link.as_deref_mut() else {
            return;
        };
        node.update_height();

        let balance = node.balance_factor();
        let left_id = node.left.as_ref().map(|left| left.product.id);
        let right_id = node.right.as_ref().map(|right| right.product.id);

        if balance > 1 && left_id.is_some_and(|key| id < key) {
            Self::rotate_right(link);
        } else if balance < -1 && right_id.is_some_and(|key| id > key) {
            Self::rotate_left(link);
        } else if balance > 1 && left_id.is_some_and(|key| id > key) {
            Self::rotate_left(&mut node.left);
            Self::rotate_right(link);
        } else if balance < -1 && right_id.is_some_and(|key| id < key) {
            Self::rotate_right(&mut node.right);
            Self::rotate_left(link);
        }
    }


    // =========================
    // Deletion helpers
    // =========================

    /// Recursive helper for deleting `id` from the subtree owned by `link`.
    ///
    /// # Behavior
    /// 1. **Id not here**: recurse into the matching child; an empty
    ///    link means the id is absent.
    /// 2. **Id here with two children**: detach the minimum of the right
    ///    subtree and move its product into this node.
    /// 3. **Id here with at most one child**: the child replaces the node.
    ///
    /// After the recursion this node is always re-evaluated. A fix lower
    /// down can still leave an ancestor shorter, so nothing is skipped.
    fn delete_internal(link: &mut Link, id: ProductId) -> Result<Product> {
        let Some(mut node) = link.take() else {
            return Err(SalesError::NotFound { id });
        };

        let removed = match id.cmp(&node.product.id) {
            Ordering::Less => Self::delete_internal(&mut node.left, id),
            Ordering::Greater => Self::delete_internal(&mut node.right, id),
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                (Some(left), Some(right)) => {
                    let (rest, successor) = Self::take_min(right);
                    trace!(id, successor = successor.id, "replacing with successor");
                    node.left = Some(left);
                    node.right = rest;
                    Ok(std::mem::replace(&mut node.product, successor))
                }
                (only, None) | (None, only) => {
                    // Splice: the single child (or nothing) takes this slot
                    *link = only;
                    return Ok(node.product);
                }
            },
        };

        *link = Some(node);
        Self::rebalance_after_delete(link);
        removed
    }


    /// Detaches the minimum node of the subtree rooted at `node`.
    ///
    /// Returns the remaining subtree (rebalanced along the left spine)
    /// and the product that was removed.
    fn take_min(mut node: Box<AvlNode>) -> (Link, Product) {
        match node.left.take() {
            Some(left) => {
                let (rest, min) = Self::take_min(left);
                node.left = rest;
                let mut link = Some(node);
                Self::rebalance_after_delete(&mut link);
                (link, min)
            }
            None => {
                let AvlNode { product, right, .. } = *node;
                (right, product)
            }
        }
    }


    /// Restores the balance of the node in `link` after a removal below it.
    ///
    /// # Behavior
    /// - Left heavy, left child balanced or left leaning : right rotation.
    /// - Left heavy, left child right leaning            : left-right.
    /// - Right heavy, right child balanced or right leaning : left rotation.
    /// - Right heavy, right child left leaning              : right-left.
    fn rebalance_after_delete(link: &mut Link) {
        let Some(node) = link.as_deref_mut() else {
            return;
        };
        node.update_height();

        let balance_factor = node.balance_factor();
        if balance_factor > 1 {
            if balance(&node.left) < 0 {
                Self::rotate_left(&mut node.left);
            }
            Self::rotate_right(link);
        } else if balance_factor < -1 {
            if balance(&node.right) > 0 {
                Self::rotate_right(&mut node.right);
            }
            Self::rotate_left(link);
        }
    }


    // =========================
    // Rotations
    // =========================

    /// Right rotation of the subtree in `link`.
    ///
    /// The left child becomes the subtree root, the old root becomes its
    /// right child and inherits the child's former right subtree.
    fn rotate_right(link: &mut Link) {
        let Some(mut pivot) = link.take() else {
            return;
        };
        let Some(mut child) = pivot.left.take() else {
            *link = Some(pivot);
            return;
        };
        trace!(pivot = pivot.product.id, new_root = child.product.id, "rotate right");

        pivot.left = child.right.take();
        pivot.update_height();
        child.right = Some(pivot);
        child.update_height();
        *link = Some(child);
    }


    /// Left rotation of the subtree in `link`, the mirror of `rotate_right`.
    fn rotate_left(link: &mut Link) {
        let Some(mut pivot) = link.take() else {
            return;
        };
        let Some(mut child) = pivot.right.take() else {
            *link = Some(pivot);
            return;
        };
        trace!(pivot = pivot.product.id, new_root = child.product.id, "rotate left");

        pivot.right = child.left.take();
        pivot.update_height();
        child.left = Some(pivot);
        child.update_height();
        *link = Some(child);
    }
}


impl<'a> IntoIterator for &'a AvlIndex {
    type Item = &'a Product;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}


/// Borrowing in-order traversal, yields products by ascending id.
///
/// Keeps the pending left spine on an explicit stack so deep trees do
/// not recurse.
pub struct InOrder<'a> {
    stack: Vec<&'a AvlNode>,
}

impl<'a> InOrder<'a> {
    fn new(root: &'a Link) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root.as_deref());
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<&'a AvlNode>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a Product;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.product)
    }
}
