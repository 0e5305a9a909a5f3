// =====================================================================
// File: prediction.rs
//
// Description:
//   Naive next-month forecast: the trailing moving average of the
//   product's rolling sales window, plus the hook that records a new
//   monthly figure into that window.
// =====================================================================

use crate::error::{Result, SalesError};
use crate::product::Product;

/// Truncating average of the product's recorded sales.
///
/// Returns [`SalesError::InsufficientHistory`] when nothing has been
/// recorded yet.
///
/// # Example
/// ```
/// use sales_insight::prediction::{predict, record_sale};
/// use sales_insight::product::Product;
///
/// let mut p = Product::new(1, "Pen", 0.1, "Blue", "Austin", 0, 1.0);
/// assert!(predict(&p).is_err());
///
/// for sale in [10, 20, 30] {
///     record_sale(&mut p, sale);
/// }
/// assert_eq!(predict(&p).unwrap(), 20);
/// ```
pub fn predict(product: &Product) -> Result<i32> {
    product
        .past_sales
        .average()
        .ok_or(SalesError::InsufficientHistory { id: product.id })
}

/// Push a monthly sales figure into the product's rolling window.
pub fn record_sale(product: &mut Product, value: i32) {
    product.past_sales.push(value);
}
