// =====================================================================
// File: index/mod.rs
//
//! The `index` module contains the AVL tree that keeps the product
//! catalog ordered by id.
//!
//! Structure:
//! - `node.rs`  : Defines the [`AvlNode`] structure and its helpers.
//! - `tree.rs`  : Defines the [`AvlIndex`] and its algorithms
//!                (insert, search, delete, rotations).
//! - `tests.rs` : Unit tests for the tree (compiled only in test mode).
//!
//! Each node owns its product and both subtrees, so every mutation is
//! written as a rebuild of the path back to the root: the recursive
//! helpers work on the owning link of a subtree and leave the new
//! subtree root in it.
// =====================================================================

pub mod node;
pub mod tree;

pub use self::node::{AvlNode, Link};
pub use self::tree::{AvlIndex, InOrder};
