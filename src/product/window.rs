// =====================================================================
// File: product/window.rs
//
// Description:
//   Fixed-capacity FIFO of past sales figures, oldest first. Once the
//   window is full every new figure evicts the oldest one.
//
// Notes:
//   * The persisted form still uses five slots with -1 for unused
//     entries; `to_slots` / `restore` translate to and from it so the
//     sentinel never leaks into the in-memory type.
// =====================================================================

use std::collections::VecDeque;

/// Number of past sales figures kept per product.
pub const SALES_WINDOW: usize = 5;

/// Value written into unused slots of the persisted window.
pub const EMPTY_SLOT: i32 = -1;

/// Rolling window of the most recent sales figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesWindow {
    entries: VecDeque<i32>,
}

impl Default for SalesWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl SalesWindow {
    /// Create an empty window.
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(SALES_WINDOW),
        }
    }

    /// Rebuild a window from its persisted slots.
    ///
    /// The first `count` slots are taken as-is, no FIFO logic is
    /// applied. `count` is clamped to the window capacity.
    ///
    /// # Example
    /// ```
    /// use sales_insight::product::SalesWindow;
    ///
    /// let window = SalesWindow::restore([4, 8, -1, -1, -1], 2);
    /// assert_eq!(window.to_vec(), vec![4, 8]);
    /// ```
    pub fn restore(slots: [i32; SALES_WINDOW], count: usize) -> Self {
        let count = count.min(SALES_WINDOW);
        Self {
            entries: slots[..count].iter().copied().collect(),
        }
    }

    /// Append a sales figure, evicting the oldest when the window is full.
    ///
    /// # Example
    /// ```
    /// use sales_insight::product::SalesWindow;
    ///
    /// let mut window = SalesWindow::new();
    /// for sale in 1..=6 {
    ///     window.push(sale);
    /// }
    /// assert_eq!(window.to_vec(), vec![2, 3, 4, 5, 6]);
    /// ```
    pub fn push(&mut self, value: i32) {
        if self.entries.len() == SALES_WINDOW {
            self.entries.pop_front();
        }
        self.entries.push_back(value);
    }

    /// Truncating integer mean of the recorded figures, `None` when empty.
    pub fn average(&self) -> Option<i32> {
        if self.entries.is_empty() {
            return None;
        }
        let sum: i64 = self.entries.iter().map(|&v| i64::from(v)).sum();
        // The mean of i32 values always fits back into an i32
        Some((sum / self.entries.len() as i64) as i32)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() == SALES_WINDOW
    }

    /// Recorded figures, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.entries.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<i32> {
        self.iter().collect()
    }

    /// Persisted slot layout: recorded figures followed by `EMPTY_SLOT`
    /// padding, plus the number of valid entries.
    pub fn to_slots(&self) -> ([i32; SALES_WINDOW], usize) {
        let mut slots = [EMPTY_SLOT; SALES_WINDOW];
        for (slot, value) in slots.iter_mut().zip(self.entries.iter()) {
            *slot = *value;
        }
        (slots, self.entries.len())
    }
}
