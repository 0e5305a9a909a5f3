// =====================================================================
// File: product/tests.rs
//
// Description:
//   Unit tests for `Product` and the rolling `SalesWindow`.
// =====================================================================


// =================================================================
// Rolling window behavior
// =================================================================
mod window_tests {
    use crate::product::{SalesWindow, EMPTY_SLOT, SALES_WINDOW};

    #[test]
    fn new_window_is_empty() {
        let window = SalesWindow::new();
        assert!(window.is_empty());
        assert_eq!(window.len(), 0);
        assert_eq!(window.average(), None);
    }

    #[test]
    fn push_fills_in_order() {
        let mut window = SalesWindow::new();
        window.push(10);
        window.push(20);
        window.push(30);
        assert_eq!(window.to_vec(), vec![10, 20, 30]);
        assert!(!window.is_full());
    }

    #[test]
    fn push_on_full_window_evicts_oldest() {
        let mut window = SalesWindow::restore([1, 2, 3, 4, 5], 5);
        assert!(window.is_full());

        window.push(6);
        assert_eq!(window.to_vec(), vec![2, 3, 4, 5, 6]);
        assert_eq!(window.len(), SALES_WINDOW);
    }

    #[test]
    fn average_truncates() {
        let mut window = SalesWindow::new();
        window.push(10);
        window.push(20);
        window.push(30);
        assert_eq!(window.average(), Some(20));

        // 7 / 2 = 3.5 -> 3
        let window = SalesWindow::restore([3, 4, EMPTY_SLOT, EMPTY_SLOT, EMPTY_SLOT], 2);
        assert_eq!(window.average(), Some(3));
    }

    #[test]
    fn average_does_not_overflow() {
        let window = SalesWindow::restore([i32::MAX; SALES_WINDOW], SALES_WINDOW);
        assert_eq!(window.average(), Some(i32::MAX));
    }

    #[test]
    fn restore_ignores_slots_past_count() {
        let window = SalesWindow::restore([9, 8, 7, 6, 5], 3);
        assert_eq!(window.to_vec(), vec![9, 8, 7]);
    }

    #[test]
    fn restore_clamps_count_to_capacity() {
        let window = SalesWindow::restore([1, 2, 3, 4, 5], 12);
        assert_eq!(window.len(), SALES_WINDOW);
    }

    #[test]
    fn slots_pad_with_sentinel() {
        let mut window = SalesWindow::new();
        window.push(42);
        window.push(7);

        let (slots, count) = window.to_slots();
        assert_eq!(slots, [42, 7, EMPTY_SLOT, EMPTY_SLOT, EMPTY_SLOT]);
        assert_eq!(count, 2);
    }
}


// =================================================================
// Product construction and display
// =================================================================
mod product_tests {
    use crate::product::{table_header, Product, COLOR_LEN, LOCATION_LEN, NAME_LEN};

    #[test]
    fn new_product_keeps_fields() {
        let p = Product::new(3, "Kettle", 1.5, "Red", "Denver", 12, 25.0);
        assert_eq!(p.id, 3);
        assert_eq!(p.name, "Kettle");
        assert_eq!(p.color, "Red");
        assert_eq!(p.location, "Denver");
        assert_eq!(p.units_sold, 12);
        assert!(p.past_sales.is_empty());
    }

    #[test]
    fn long_text_fields_are_truncated() {
        let long = "x".repeat(80);
        let p = Product::new(1, &long, 0.0, &long, &long, 0, 0.0);
        assert_eq!(p.name.chars().count(), NAME_LEN);
        assert_eq!(p.color.chars().count(), COLOR_LEN);
        assert_eq!(p.location.chars().count(), LOCATION_LEN);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let accented = "é".repeat(30);
        let p = Product::new(1, "n", 0.0, &accented, "loc", 0, 0.0);
        assert_eq!(p.color, "é".repeat(COLOR_LEN));
    }

    #[test]
    fn revenue_is_units_times_price() {
        let p = Product::new(1, "Pen", 0.1, "Blue", "Austin", 4, 2.5);
        assert_eq!(p.revenue(), 10.0);
    }

    #[test]
    fn display_row_matches_header_width() {
        let p = Product::new(12, "Mug", 0.35, "White", "Boise", 8, 6.5);
        let row = p.to_string();
        assert!(row.starts_with("| 12    | Mug"));
        assert!(row.contains("$6.50"));

        let header = table_header();
        let title = header.lines().nth(1).unwrap_or_default();
        assert_eq!(title.len(), row.len());
    }
}
