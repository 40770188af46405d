//! Donation Category Model

use crate::util::contains_ignore_case;
use serde::{Deserialize, Serialize};

/// Name fragment that marks a non-dynamic category as a service
pub const SERVICE_NAME_MARKER: &str = "service";

/// Dynamic pricing settings of a category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicPricing {
    #[serde(default)]
    pub is_dynamic: bool,
    /// Minimum order weight (grams) once any dynamic category exists
    #[serde(default, alias = "minvalue")]
    pub min_value_grams: f64,
}

/// Category entity as delivered by the category source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Per-unit rate; for service categories the per-unit minimum amount
    #[serde(default)]
    pub unit_rate: f64,
    #[serde(default)]
    pub unit_weight_grams: f64,
    /// Whether one unit is one packet
    #[serde(default)]
    pub unit_is_packet: bool,
    #[serde(default)]
    pub dynamic: DynamicPricing,
}

impl Category {
    /// Resolve the behavioural kind of this category
    pub fn kind(&self) -> CategoryKind {
        CategoryKind::resolve(self)
    }
}

/// Behavioural kind of a category
///
/// Resolved once when the category is loaded: the dynamic flag wins, then the
/// "service" name rule, else standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// Fixed unit rate and weight, amount computed from quantity
    Standard,
    /// Donor-entered amount floored by `unit_rate × quantity`, no weight
    Service,
    /// Donor-entered amount, weight floored at order level
    Dynamic,
}

impl CategoryKind {
    pub fn resolve(category: &Category) -> Self {
        if category.dynamic.is_dynamic {
            Self::Dynamic
        } else if contains_ignore_case(&category.name, SERVICE_NAME_MARKER) {
            Self::Service
        } else {
            Self::Standard
        }
    }

    /// Whether the donor types the amount directly
    pub fn is_amount_editable(&self) -> bool {
        !matches!(self, Self::Standard)
    }

    /// Whether the quantity field is shown to the donor
    pub fn has_quantity(&self) -> bool {
        !matches!(self, Self::Dynamic)
    }
}
