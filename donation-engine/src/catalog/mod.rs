//! Category Catalog
//!
//! Immutable, per-session view of the donation categories with each
//! category's [`CategoryKind`] resolved once at load time.

mod charges;

pub use charges::CourierChargeTable;

use shared::models::{Category, CategoryKind};
use std::collections::{HashMap, HashSet};

/// Category with its kind resolved and numeric fields sanitized
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogCategory {
    pub id: String,
    pub name: String,
    pub kind: CategoryKind,
    pub unit_rate: f64,
    pub unit_weight_grams: f64,
    pub unit_is_packet: bool,
    /// Dynamic weight threshold (0 for non-dynamic categories)
    pub min_value_grams: f64,
}

impl CatalogCategory {
    pub fn from_category(category: Category) -> Self {
        let kind = category.kind();
        Self {
            unit_rate: sanitize(category.unit_rate, &category.id, "unitRate"),
            unit_weight_grams: sanitize(
                category.unit_weight_grams,
                &category.id,
                "unitWeightGrams",
            ),
            unit_is_packet: category.unit_is_packet,
            min_value_grams: if kind == CategoryKind::Dynamic {
                sanitize(category.dynamic.min_value_grams, &category.id, "minValueGrams")
            } else {
                0.0
            },
            kind,
            id: category.id,
            name: category.name,
        }
    }

    /// Minimum payable amount for a given quantity
    ///
    /// - Service: `unit_rate × quantity`
    /// - Dynamic: `unit_rate` when the category defines one
    /// - Standard: none (amount is computed, never entered)
    pub fn minimum_amount(&self, quantity: i32) -> Option<f64> {
        match self.kind {
            CategoryKind::Standard => None,
            CategoryKind::Service => Some(crate::pricing::multiply(self.unit_rate, quantity)),
            CategoryKind::Dynamic => (self.unit_rate > 0.0).then_some(self.unit_rate),
        }
    }
}

/// Negative and non-finite reference values are treated as zero
fn sanitize(value: f64, id: &str, field: &str) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        tracing::warn!(category_id = %id, field, value, "Invalid category value, using 0");
        0.0
    }
}

/// Ordered category catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<CatalogCategory>,
    index: HashMap<String, usize>,
    min_weight_floor: Option<f64>,
}

impl Catalog {
    /// Build the catalog from the source order, dropping duplicate ids
    pub fn from_categories(categories: Vec<Category>) -> Self {
        let mut resolved: Vec<CatalogCategory> = Vec::with_capacity(categories.len());
        let mut index = HashMap::with_capacity(categories.len());

        for category in categories {
            if index.contains_key(&category.id) {
                tracing::warn!(category_id = %category.id, "Duplicate category id, keeping first");
                continue;
            }
            index.insert(category.id.clone(), resolved.len());
            resolved.push(CatalogCategory::from_category(category));
        }

        // Floor is catalog-wide: every dynamic category counts, selected or not
        let min_weight_floor = resolved
            .iter()
            .filter(|c| c.kind == CategoryKind::Dynamic && c.min_value_grams > 0.0)
            .map(|c| c.min_value_grams)
            .reduce(f64::min);

        Self {
            categories: resolved,
            index,
            min_weight_floor,
        }
    }

    pub fn get(&self, id: &str) -> Option<&CatalogCategory> {
        self.index.get(id).map(|&i| &self.categories[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogCategory> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Smallest positive dynamic threshold in the whole catalog
    pub fn min_weight_floor(&self) -> Option<f64> {
        self.min_weight_floor
    }

    /// Categories that may be offered for one line item
    ///
    /// Excludes categories chosen by other items; when donating for a child
    /// only dynamic categories are offered.
    pub fn available(
        &self,
        taken_by_others: &HashSet<&str>,
        for_child: bool,
    ) -> Vec<&CatalogCategory> {
        self.categories
            .iter()
            .filter(|c| !taken_by_others.contains(c.id.as_str()))
            .filter(|c| !for_child || c.kind == CategoryKind::Dynamic)
            .collect()
    }
}
