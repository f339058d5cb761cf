//! Application state for the payroll engine API.

use std::sync::Arc;

use crate::config::RateTable;

/// Shared application state.
///
/// Holds the rate table every handler calculates against. The table is
/// never written after startup, so clones share it without locking.
#[derive(Clone)]
pub struct AppState {
    rate_table: Arc<RateTable>,
}

impl AppState {
    /// Creates application state around a loaded rate table.
    pub fn new(rate_table: RateTable) -> Self {
        Self {
            rate_table: Arc::new(rate_table),
        }
    }

    /// Returns the shared rate table.
    pub fn rate_table(&self) -> &RateTable {
        &self.rate_table
    }
}
