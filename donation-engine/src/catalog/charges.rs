//! Courier Charge Table

use shared::models::{CourierChargeEntry, CourierRegion};
use std::collections::HashMap;

/// Region tier → courier charge; a missing region means no charge
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourierChargeTable {
    charges: HashMap<CourierRegion, f64>,
}

impl CourierChargeTable {
    /// Build the table, keeping the first entry per region
    pub fn from_entries(entries: Vec<CourierChargeEntry>) -> Self {
        let mut charges = HashMap::with_capacity(entries.len());
        for entry in entries {
            if charges.contains_key(&entry.region) {
                tracing::warn!(region = %entry.region, "Duplicate courier charge, keeping first");
                continue;
            }
            let amount = if entry.amount.is_finite() && entry.amount >= 0.0 {
                entry.amount
            } else {
                tracing::warn!(region = %entry.region, amount = entry.amount, "Invalid courier charge, using 0");
                0.0
            };
            charges.insert(entry.region, amount);
        }
        Self { charges }
    }

    /// Charge for a tier (0 when the table has no entry)
    pub fn charge_for(&self, region: CourierRegion) -> f64 {
        self.charges.get(&region).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }
}
