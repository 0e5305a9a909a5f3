// =====================================================================
// File: product/mod.rs
//
//! The `product` module holds the record type stored in the catalog.
//!
//! Structure:
//! - `record.rs` : Defines [`Product`], its id type and field bounds.
//! - `window.rs` : Defines [`SalesWindow`], the bounded FIFO of the
//!                 most recent monthly sales figures.
//! - `tests.rs`  : Unit tests (compiled only in test mode).
// =====================================================================

pub mod record;
pub mod window;

pub use self::record::{table_header, Product, ProductId, COLOR_LEN, LOCATION_LEN, NAME_LEN};
pub use self::window::{SalesWindow, EMPTY_SLOT, SALES_WINDOW};

#[cfg(test)]
pub mod tests;
