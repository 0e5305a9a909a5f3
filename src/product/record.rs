// =====================================================================
// File: product/record.rs
//
// Description:
//   Defines the `Product` record held by each node of the catalog
//   index. A product is identified by its integer id, which never
//   changes once the product is in the index.
//
//   - Descriptive fields: name, weight, color, location.
//   - Sales fields      : units sold, unit price and the rolling
//                         window of past monthly sales.
//
// Notes:
//   * Text fields are bounded. Longer input is cut at a char boundary
//     when the product is built, nothing else is validated.
// =====================================================================

use std::fmt;

use super::window::SalesWindow;

/// Unique product identifier, the key of the catalog index.
pub type ProductId = i32;

/// Maximum number of characters kept for a product name.
pub const NAME_LEN: usize = 49;
/// Maximum number of characters kept for a color.
pub const COLOR_LEN: usize = 19;
/// Maximum number of characters kept for a location.
pub const LOCATION_LEN: usize = 19;

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub weight: f64,
    pub color: String,
    pub location: String,
    pub units_sold: i32,
    pub price: f64,
    /// Most recent monthly sales figures, oldest first.
    pub past_sales: SalesWindow,
}

impl Product {
    /// Build a product with an empty sales window.
    ///
    /// # Example
    /// ```
    /// use sales_insight::product::Product;
    ///
    /// let p = Product::new(7, "Desk Lamp", 1.2, "Black", "Austin", 40, 19.99);
    /// assert_eq!(p.id, 7);
    /// assert!(p.past_sales.is_empty());
    /// ```
    pub fn new(
        id: ProductId,
        name: &str,
        weight: f64,
        color: &str,
        location: &str,
        units_sold: i32,
        price: f64,
    ) -> Self {
        Self {
            id,
            name: bounded(name, NAME_LEN),
            weight,
            color: bounded(color, COLOR_LEN),
            location: bounded(location, LOCATION_LEN),
            units_sold,
            price,
            past_sales: SalesWindow::new(),
        }
    }

    /// Replace the sales window, used when restoring persisted state.
    pub fn with_past_sales(mut self, past_sales: SalesWindow) -> Self {
        self.past_sales = past_sales;
        self
    }

    /// Units sold times unit price.
    pub fn revenue(&self) -> f64 {
        f64::from(self.units_sold) * self.price
    }
}

/// Keep at most `max` characters of `value`.
fn bounded(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((cut, _)) => value[..cut].to_string(),
        None => value.to_string(),
    }
}

/// Header lines matching the row layout of `Product`'s `Display`.
pub fn table_header() -> String {
    let rule = "-".repeat(79);
    format!(
        "{rule}\n| {:<5} | {:<20} | {:<6} | {:<8} | {:<8} | {:<5} | {:<7} |\n{rule}",
        "ID", "Name", "Wght", "Color", "Location", "Sold", "Price"
    )
}

/// One table row.
impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "| {:<5} | {:<20} | {:<6.2} | {:<8} | {:<8} | {:<5} | ${:<6.2} |",
            self.id, self.name, self.weight, self.color, self.location, self.units_sold, self.price
        )
    }
}
