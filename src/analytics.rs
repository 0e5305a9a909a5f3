// =====================================================================
// File: analytics.rs
//
// Description:
//   Read-only folds over the whole catalog, all built on the index's
//   in-order traversal:
//
//   - `ordered_dump`     : products sorted by id.
//   - `total_revenue`    : sum of units sold times price.
//   - `best_seller`      : product with the most units sold.
//   - `least_seller`     : product with the fewest units sold.
//   - `location_summary` : units and revenue for one exact location.
//
// Notes:
//   * Ties between sellers go to the first product visited, which in
//     an in-order traversal is the one with the lowest id.
//   * Location matching is exact and case-sensitive.
// =====================================================================

use crate::index::AvlIndex;
use crate::product::Product;

/// Units and revenue summed over the products of one location.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocationSummary {
    pub units: i64,
    pub revenue: f64,
}

/// Catalog-wide figures shown together by the insights command.
#[derive(Debug, Clone, Copy)]
pub struct Insights<'a> {
    pub total_revenue: f64,
    pub best_seller: Option<&'a Product>,
    pub least_seller: Option<&'a Product>,
}

/// All products, ascending by id.
pub fn ordered_dump(index: &AvlIndex) -> Vec<&Product> {
    index.iter().collect()
}

/// Sum of `units_sold * price` over every product.
///
/// # Example
/// ```
/// use sales_insight::analytics::total_revenue;
/// use sales_insight::index::AvlIndex;
/// use sales_insight::product::Product;
///
/// let mut index = AvlIndex::new();
/// index.insert(Product::new(1, "a", 1.0, "c", "A", 5, 2.0)).unwrap();
/// index.insert(Product::new(2, "b", 1.0, "c", "B", 3, 1.0)).unwrap();
/// assert_eq!(total_revenue(&index), 13.0);
/// ```
pub fn total_revenue(index: &AvlIndex) -> f64 {
    index.iter().map(Product::revenue).sum()
}

/// Product with the most units sold; the first one visited wins a tie.
pub fn best_seller(index: &AvlIndex) -> Option<&Product> {
    first_extreme(index, |candidate, current| candidate > current)
}

/// Product with the fewest units sold; the first one visited wins a tie.
pub fn least_seller(index: &AvlIndex) -> Option<&Product> {
    first_extreme(index, |candidate, current| candidate < current)
}

/// Keeps the current pick unless `replaces` says the candidate's units
/// strictly beat it.
fn first_extreme(index: &AvlIndex, replaces: impl Fn(i32, i32) -> bool) -> Option<&Product> {
    index.iter().fold(None::<&Product>, |pick, product| match pick {
        Some(current) if !replaces(product.units_sold, current.units_sold) => Some(current),
        _ => Some(product),
    })
}

/// Units and revenue over products whose location equals `location`.
///
/// # Example
/// ```
/// use sales_insight::analytics::location_summary;
/// use sales_insight::index::AvlIndex;
/// use sales_insight::product::Product;
///
/// let mut index = AvlIndex::new();
/// index.insert(Product::new(1, "a", 1.0, "c", "A", 5, 2.0)).unwrap();
/// index.insert(Product::new(2, "b", 1.0, "c", "B", 3, 1.0)).unwrap();
/// index.insert(Product::new(3, "c", 1.0, "c", "A", 1, 10.0)).unwrap();
///
/// let summary = location_summary(&index, "A");
/// assert_eq!(summary.units, 6);
/// assert_eq!(summary.revenue, 20.0);
/// ```
pub fn location_summary(index: &AvlIndex, location: &str) -> LocationSummary {
    index
        .iter()
        .filter(|product| product.location == location)
        .fold(LocationSummary::default(), |mut summary, product| {
            summary.units += i64::from(product.units_sold);
            summary.revenue += product.revenue();
            summary
        })
}

/// Revenue, best seller and least seller in one call.
pub fn insights(index: &AvlIndex) -> Insights<'_> {
    Insights {
        total_revenue: total_revenue(index),
        best_seller: best_seller(index),
        least_seller: least_seller(index),
    }
}
