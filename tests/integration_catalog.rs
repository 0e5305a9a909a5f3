// =====================================================================
// File: integration_catalog.rs
//
// Description:
//   Integration tests for the sales catalog. These tests exercise the
//   full end-to-end flow of the system, including:
//
//   - Building the AVL index through the public API and checking its
//     balance and ordering invariants under random workloads
//   - Saving the catalog to a data file and loading it back
//   - Driving a session with scripted REPL input across a restart
// =====================================================================
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use proptest::prelude::*;
use sales_insight::analytics::{location_summary, total_revenue};
use sales_insight::{load_catalog, run_commands, save_catalog, AvlIndex, Product, SalesError, Session};


/// Produces a clean file path for integration tests.
fn setup_file(file: &str) -> PathBuf {
    let path = PathBuf::from(file);
    let _ = fs::remove_file(&path);
    path
}

fn simple(id: i32) -> Product {
    Product::new(id, &format!("item-{id}"), 1.0, "Black", "Austin", id, 1.0)
}


#[test]
fn test_ascending_inserts_rebalance_root() {
    let mut index = AvlIndex::new();
    for id in [10, 20, 30] {
        index.insert(simple(id)).unwrap();
    }
    assert_eq!(index.root_id(), Some(20));
    assert!(index.invariants_hold());
}


#[test]
fn test_location_rollup_scenario() {
    let mut index = AvlIndex::new();
    index.insert(Product::new(1, "a", 1.0, "c", "A", 5, 2.0)).unwrap();
    index.insert(Product::new(2, "b", 1.0, "c", "B", 3, 1.0)).unwrap();
    index.insert(Product::new(3, "c", 1.0, "c", "A", 1, 10.0)).unwrap();

    let summary = location_summary(&index, "A");
    assert_eq!(summary.units, 6);
    assert!((summary.revenue - 20.0).abs() < 1e-9);
    assert!((total_revenue(&index) - 23.0).abs() < 1e-9);
}


#[test]
fn test_delete_then_search_reports_not_found() {
    let mut index = AvlIndex::new();
    for id in 1..=10 {
        index.insert(simple(id)).unwrap();
    }
    index.delete(4).unwrap();
    assert!(index.search(4).is_none());
    assert!(matches!(index.delete(4), Err(SalesError::NotFound { id: 4 })));
    assert!(index.invariants_hold());
}


#[test]
fn test_save_and_reload_catalog() {
    let path = setup_file("integration_catalog_reload.txt");

    let mut index = AvlIndex::new();
    let mut kettle = Product::new(8, "Kettle", 1.25, "Steel", "Tulsa", 14, 22.5);
    for sale in [1, 2, 3, 4, 5, 6] {
        kettle.past_sales.push(sale);
    }
    index.insert(kettle.clone()).unwrap();
    for id in [3, 12, 1, 5] {
        index.insert(simple(id)).unwrap();
    }

    assert_eq!(save_catalog(&path, &index).unwrap(), 5);
    let loaded = load_catalog(&path).unwrap();

    let before: Vec<&Product> = index.iter().collect();
    let after: Vec<&Product> = loaded.iter().collect();
    assert_eq!(before, after);
    assert_eq!(loaded.search(8).unwrap().past_sales.to_vec(), vec![2, 3, 4, 5, 6]);

    fs::remove_file(&path).unwrap();
}


#[test]
fn test_session_survives_restart() {
    let path = setup_file("integration_catalog_session.txt");

    // First run: add products and record some sales
    let mut session = Session::open(&path).unwrap();
    let script = "\
ADD 20 Lamp 1.5 Black Austin 40 19.99
ADD 10 Chair 7.25 Oak Boise 3 80.00
ADD 30 Mug 0.35 White Austin 12 6.50
UPDATE 10 5 10
UPDATE 10 6 20
UPDATE 10 7 30
DEL 30
EXIT
";
    run_commands(script.as_bytes(), &mut session);
    session.save().unwrap();

    // Second run: everything is back, ordered by id
    let reopened = Session::open(&path).unwrap();
    let ids: Vec<i32> = reopened.list().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![10, 20]);

    let chair = reopened.find(10).unwrap();
    assert_eq!(chair.units_sold, 7);
    assert_eq!(chair.past_sales.to_vec(), vec![10, 20, 30]);
    assert_eq!(reopened.predict(10).unwrap(), 20);
    assert!(matches!(reopened.predict(20), Err(SalesError::InsufficientHistory { id: 20 })));

    fs::remove_file(&path).unwrap();
}


#[test]
fn test_tolerates_partially_corrupt_file() {
    let path = setup_file("integration_catalog_corrupt.txt");
    fs::write(
        &path,
        "1,Pen,0.10,Blue,Austin,3,1.00,-1,-1,-1,-1,-1,0\n\
         2,Cup,0.20,Red\n\
         3,Mug,0.35,White,Boise,8,6.50,4,-1,-1,-1,-1,1\n",
    )
    .unwrap();

    let index = load_catalog(&path).unwrap();
    let ids: Vec<i32> = index.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 3]);

    fs::remove_file(&path).unwrap();
}


// =================================================================
// Property tests
// =================================================================

#[derive(Debug, Clone)]
enum Op {
    Insert(i32),
    Delete(i32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-200..200i32).prop_map(Op::Insert),
        2 => (-200..200i32).prop_map(Op::Delete),
    ]
}

fn finite_f64() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("finite", |v| v.is_finite())
}

/// Arbitrary products with up to eight recorded sales.
fn product_strategy() -> impl Strategy<Value = Product> {
    (
        any::<i32>(),
        "[A-Za-z][A-Za-z ]{0,12}",
        finite_f64(),
        "[a-z]{1,10}",
        "[A-Z][a-z]{0,8}",
        0..10_000i32,
        finite_f64(),
        proptest::collection::vec(0..5_000i32, 0..8),
    )
        .prop_map(|(id, name, weight, color, location, units, price, sales)| {
            let mut product = Product::new(id, &name, weight, &color, &location, units, price);
            for sale in sales {
                product.past_sales.push(sale);
            }
            product
        })
}

proptest! {
    #[test]
    /// The index behaves like a `BTreeMap` keyed by id and keeps its
    /// AVL and ordering invariants after every operation.
    fn index_matches_btreemap(ops in proptest::collection::vec(op_strategy(), 0..300)) {
        let mut index = AvlIndex::new();
        let mut model = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(id) => {
                    let result = index.insert(simple(id));
                    if model.contains_key(&id) {
                        let is_duplicate = matches!(result, Err(SalesError::DuplicateKey { .. }));
                        prop_assert!(is_duplicate);
                    } else {
                        prop_assert!(result.is_ok());
                        model.insert(id, ());
                    }
                }
                Op::Delete(id) => {
                    let result = index.delete(id);
                    if model.remove(&id).is_some() {
                        prop_assert_eq!(result.map(|p| p.id).ok(), Some(id));
                        prop_assert!(index.search(id).is_none());
                    } else {
                        let is_not_found = matches!(result, Err(SalesError::NotFound { .. }));
                        prop_assert!(is_not_found);
                    }
                }
            }
            prop_assert!(index.invariants_hold());
            prop_assert_eq!(index.len(), model.len());
        }

        let ids: Vec<i32> = index.iter().map(|p| p.id).collect();
        let expected: Vec<i32> = model.keys().copied().collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    /// Saving then loading reproduces the same records regardless of
    /// the shape the tree had.
    fn save_load_round_trip(products in proptest::collection::vec(product_strategy(), 0..40)) {
        let path = PathBuf::from("integration_catalog_prop.txt");

        let mut index = AvlIndex::new();
        for product in products {
            // Repeated ids are simply rejected
            let _ = index.insert(product);
        }

        save_catalog(&path, &index).unwrap();
        let loaded = load_catalog(&path).unwrap();
        fs::remove_file(&path).unwrap();

        prop_assert!(loaded.invariants_hold());
        let before: Vec<&Product> = index.iter().collect();
        let after: Vec<&Product> = loaded.iter().collect();
        prop_assert_eq!(before, after);
    }
}
