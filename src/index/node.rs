// =====================================================================
// File: index/node.rs
//
// Description:
//   Defines the AVL node (`AvlNode`) used by the catalog index. Each
//   node maintains:
//
//   - `product`: The record stored at this position.
//   - `left`   : Owning link to the subtree of smaller ids.
//   - `right`  : Owning link to the subtree of larger ids.
//   - `height` : Cached height of the subtree rooted here (leaf = 1).
//
// Notes:
//   * An empty subtree has height 0.
//   * Only the node representation lives here. Insert, delete and the
//     rotations are implemented in `tree.rs`.
// =====================================================================

use std::cmp::max;

use crate::product::Product;

/// Owning link to a subtree, `None` for an empty one.
pub type Link = Option<Box<AvlNode>>;

/// A single tree position holding exactly one product.
#[derive(Debug)]
pub struct AvlNode {
    pub product: Product,
    pub left: Link,
    pub right: Link,
    pub height: usize,
}

impl AvlNode {
    /// Creates a leaf node for `product`.
    ///
    /// # Example
    /// ```
    /// use sales_insight::index::AvlNode;
    /// use sales_insight::product::Product;
    ///
    /// let node = AvlNode::new(Product::new(1, "Pen", 0.1, "Blue", "Austin", 3, 1.0));
    /// assert_eq!(node.height, 1);
    /// assert!(node.left.is_none() && node.right.is_none());
    /// ```
    pub fn new(product: Product) -> Self {
        Self {
            product,
            left: None,
            right: None,
            height: 1,
        }
    }

    /// Recompute the cached height from the children.
    pub fn update_height(&mut self) {
        self.height = 1 + max(height(&self.left), height(&self.right));
    }

    /// `height(left) - height(right)`.
    pub fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }
}

/// Height of a possibly empty subtree.
pub fn height(link: &Link) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

/// Balance factor of a possibly empty subtree (0 when empty).
pub fn balance(link: &Link) -> isize {
    link.as_ref().map_or(0, |node| node.balance_factor())
}
