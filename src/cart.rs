use crate::errors::WidgetError;
use crate::models::{CartEntry, CartSnapshot};

/// Ordered cart held for the lifetime of the page session.
///
/// The total is re-summed from the entries on every mutation so it never
/// drifts from `sum(entries.price)` through float rounding.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    entries: Vec<CartEntry>,
    total: f64,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: CartEntry) {
        self.entries.push(entry);
        self.resum();
    }

    pub fn remove_at(&mut self, position: usize) -> Result<CartEntry, WidgetError> {
        if position >= self.entries.len() {
            return Err(WidgetError::index(position, self.entries.len()));
        }
        let removed = self.entries.remove(position);
        self.resum();
        Ok(removed)
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            entries: self.entries.clone(),
            total: self.total,
        }
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn resum(&mut self) {
        self.total = self.entries.iter().map(|entry| entry.price).sum();
    }
}
