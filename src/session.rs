// =====================================================================
// File: session.rs
//
// Description:
// Defines the `Session` struct, the running context of the tool. It
// owns the catalog index for the whole run and knows where the data
// file lives.
//
// Responsibilities:
// - Load the catalog from the data file when the session opens.
// - Route every command-level operation to the index, the analytics
//   folds or the predictor.
// - Write the catalog back out when the session saves.
//
// Each REPL run corresponds to a single session; nothing else holds
// the tree.
// =====================================================================

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::analytics::{self, Insights, LocationSummary};
use crate::error::{Result, SalesError};
use crate::index::AvlIndex;
use crate::prediction;
use crate::product::{Product, ProductId};
use crate::storage;

/// Represents a single catalog session.
#[derive(Debug)]
pub struct Session {
    /// The in-memory catalog (AVL tree keyed by product id).
    pub index: AvlIndex,

    /// Where the catalog is loaded from and saved to.
    data_file: PathBuf,
}


impl Session {
    /// Creates a session with an empty catalog bound to `data_file`.
    /// Nothing is read from disk.
    ///
    /// # Example
    /// ```
    /// use sales_insight::Session;
    /// let session = Session::new("unused.txt");
    /// assert!(session.index.is_empty());
    /// ```
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            index: AvlIndex::new(),
            data_file: data_file.into(),
        }
    }

    /// Opens a session, loading the catalog from `data_file`.
    /// A missing file gives an empty catalog.
    pub fn open(data_file: impl Into<PathBuf>) -> Result<Self> {
        let data_file = data_file.into();
        let index = storage::load_catalog(&data_file)?;
        info!(products = index.len(), "session opened");
        Ok(Self { index, data_file })
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Writes the whole catalog back to the data file.
    pub fn save(&self) -> Result<usize> {
        storage::save_catalog(&self.data_file, &self.index)
    }

    /// Adds a new product. An existing id is reported as
    /// [`SalesError::DuplicateKey`] and the catalog is left unchanged.
    ///
    /// Text fields may not contain the persistence delimiter.
    pub fn add_product(&mut self, product: Product) -> Result<()> {
        for (field, value) in [
            ("name", &product.name),
            ("color", &product.color),
            ("location", &product.location),
        ] {
            if value.contains(storage::DELIMITER) {
                return Err(SalesError::InvalidField {
                    field,
                    value: value.clone(),
                });
            }
        }
        self.index.insert(product)
    }

    pub fn find(&self, id: ProductId) -> Result<&Product> {
        self.index.search(id).ok_or(SalesError::NotFound { id })
    }

    /// Sets the product's units sold and records `past_sale` in its
    /// rolling window.
    pub fn update_sales(&mut self, id: ProductId, units_sold: i32, past_sale: i32) -> Result<()> {
        let product = self.index.search_mut(id).ok_or(SalesError::NotFound { id })?;
        product.units_sold = units_sold;
        prediction::record_sale(product, past_sale);
        debug!(id, units_sold, past_sale, "sales updated");
        Ok(())
    }

    /// Removes a product and returns it.
    pub fn remove(&mut self, id: ProductId) -> Result<Product> {
        self.index.delete(id)
    }

    /// Next-month forecast for one product.
    pub fn predict(&self, id: ProductId) -> Result<i32> {
        prediction::predict(self.find(id)?)
    }

    /// Products in ascending id order.
    pub fn list(&self) -> Vec<&Product> {
        analytics::ordered_dump(&self.index)
    }

    pub fn insights(&self) -> Insights<'_> {
        analytics::insights(&self.index)
    }

    pub fn location_summary(&self, location: &str) -> LocationSummary {
        analytics::location_summary(&self.index, location)
    }
}


// =====================================================================
// Unit Tests for Session
// =====================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn lamp(id: ProductId) -> Product {
        Product::new(id, "Lamp", 1.0, "Black", "Austin", 10, 20.0)
    }

    // Basic Session Creation
    #[test]
    fn test_new_session_initial_state() {
        let session = Session::new("session_unused.txt");
        assert!(session.index.is_empty());
        assert_eq!(session.data_file(), Path::new("session_unused.txt"));
        assert!(session.list().is_empty());
    }

    #[test]
    fn test_add_and_find_product() {
        let mut session = Session::new("session_unused.txt");
        session.add_product(lamp(4)).unwrap();
        assert_eq!(session.find(4).unwrap().name, "Lamp");
        assert!(matches!(session.find(5), Err(SalesError::NotFound { id: 5 })));
    }

    #[test]
    fn test_add_duplicate_reports_conflict() {
        let mut session = Session::new("session_unused.txt");
        session.add_product(lamp(4)).unwrap();

        let other = Product::new(4, "Chair", 5.0, "Oak", "Boise", 1, 80.0);
        assert!(matches!(session.add_product(other), Err(SalesError::DuplicateKey { id: 4 })));
        assert_eq!(session.find(4).unwrap().name, "Lamp");
    }

    #[test]
    fn test_add_rejects_delimiter_in_text() {
        let mut session = Session::new("session_unused.txt");
        let bad = Product::new(1, "Pens,Blue", 0.1, "Blue", "Austin", 1, 1.0);
        assert!(matches!(
            session.add_product(bad),
            Err(SalesError::InvalidField { field: "name", .. })
        ));
        assert!(session.index.is_empty());
    }

    // Sales updates and prediction
    #[test]
    fn test_update_sales_sets_units_and_pushes_window() {
        let mut session = Session::new("session_unused.txt");
        session.add_product(lamp(1)).unwrap();

        session.update_sales(1, 55, 30).unwrap();
        session.update_sales(1, 60, 40).unwrap();

        let p = session.find(1).unwrap();
        assert_eq!(p.units_sold, 60);
        assert_eq!(p.past_sales.to_vec(), vec![30, 40]);
        assert_eq!(session.predict(1).unwrap(), 35);
    }

    #[test]
    fn test_update_missing_product() {
        let mut session = Session::new("session_unused.txt");
        assert!(matches!(session.update_sales(3, 1, 1), Err(SalesError::NotFound { id: 3 })));
    }

    #[test]
    fn test_predict_outcomes() {
        let mut session = Session::new("session_unused.txt");
        session.add_product(lamp(1)).unwrap();

        assert!(matches!(session.predict(1), Err(SalesError::InsufficientHistory { id: 1 })));
        assert!(matches!(session.predict(2), Err(SalesError::NotFound { id: 2 })));
    }

    // Removal
    #[test]
    fn test_remove_product() {
        let mut session = Session::new("session_unused.txt");
        session.add_product(lamp(1)).unwrap();
        session.add_product(lamp(2)).unwrap();

        assert_eq!(session.remove(1).unwrap().id, 1);
        assert!(session.find(1).is_err());
        assert!(matches!(session.remove(1), Err(SalesError::NotFound { id: 1 })));
        assert_eq!(session.list().len(), 1);
    }

    // Persistence lifecycle
    #[test]
    fn test_open_save_reopen() {
        let file = "session_test_lifecycle.txt";
        let _ = std::fs::remove_file(file);

        let mut session = Session::open(file).unwrap();
        assert!(session.index.is_empty());
        session.add_product(lamp(7)).unwrap();
        session.update_sales(7, 12, 9).unwrap();
        assert_eq!(session.save().unwrap(), 1);

        let reopened = Session::open(file).unwrap();
        let p = reopened.find(7).unwrap();
        assert_eq!(p.units_sold, 12);
        assert_eq!(p.past_sales.to_vec(), vec![9]);

        std::fs::remove_file(file).unwrap();
    }
}
