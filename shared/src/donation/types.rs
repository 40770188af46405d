//! Shared types for donation orders

use crate::models::{CategoryKind, CourierRegion};
use serde::{Deserialize, Serialize};

// ============================================================================
// Fulfillment & Donor
// ============================================================================

/// 履约方式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Fulfillment {
    /// Collected in person at the organization's premises
    #[default]
    SelfCollect,
    /// Delivered by courier to the donor's address
    Courier,
}

/// Whom the donation is made for (`donatedFor`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum DonatedFor {
    /// The logged-in donor
    #[default]
    Own,
    /// A child dependent of the donor
    Child { id: String, name: String },
}

/// Relationship the donor is donating in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Relationship {
    #[default]
    Own,
    /// Donating as spouse, on behalf of the named person
    Spouse { spouse_name: String },
}

// ============================================================================
// Line Items
// ============================================================================

/// Donation line item - mutable per-session editing state
///
/// `weight_grams`, `packet_count` and `minimum_amount` are derived by the
/// line-item resolver and never entered by the donor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DonationLineItem {
    /// Chosen category (None until the donor picks one)
    pub category_id: Option<String>,
    /// Quantity; 0 means the field is blank. Always 1 for dynamic categories.
    pub quantity: i32,
    /// Payable amount (computed for standard, entered for service/dynamic)
    pub amount: f64,
    /// Minimum payable amount for service/dynamic categories
    #[serde(default)]
    pub minimum_amount: f64,
    #[serde(default)]
    pub weight_grams: f64,
    #[serde(default)]
    pub packet_count: i32,
    /// Inline message when amount is positive but below the minimum
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_error: Option<String>,
}

impl DonationLineItem {
    /// Blank item, as created by "add item"
    pub fn blank() -> Self {
        Self {
            quantity: 1,
            ..Default::default()
        }
    }

    pub fn has_category(&self) -> bool {
        self.category_id.is_some()
    }
}

// ============================================================================
// Totals & Order
// ============================================================================

/// Order totals - all fields derived, recomputed from scratch on each change
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    /// Σ item amount
    pub total_amount: f64,
    /// Σ item weight before the dynamic floor
    pub raw_weight_grams: f64,
    /// Weight after the dynamic floor
    pub total_weight_grams: f64,
    /// `total_weight_grams - raw_weight_grams` (shown after payment)
    pub weight_rounded_up_by_grams: f64,
    pub total_packet_count: i32,
    pub courier_charge: f64,
    /// `total_amount + courier_charge`
    pub net_payable: f64,
}

/// Finalized order line handed to the payment collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub category_id: String,
    pub category_name: String,
    pub kind: CategoryKind,
    pub quantity: i32,
    pub amount: f64,
    pub weight_grams: f64,
    pub packet_count: i32,
    pub is_packet: bool,
}

/// Finalized donation order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonationOrder {
    pub donated_for: DonatedFor,
    pub relationship: Relationship,
    pub fulfillment: Fulfillment,
    /// Courier address (present iff fulfillment is courier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Resolved courier tier, when a courier charge applies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courier_region: Option<CourierRegion>,
    /// False when the address lies in the local pickup area
    pub courier_eligible: bool,
    pub items: Vec<OrderItem>,
    pub totals: OrderTotals,
    /// Creation timestamp (Unix millis)
    pub created_at: i64,
}

/// Opaque handle returned when the payment collaborator accepts an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentHandle {
    pub order_id: String,
    /// Gateway-specific checkout payload, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_item() {
        let item = DonationLineItem::blank();
        assert!(!item.has_category());
        assert_eq!(item.quantity, 1);
        assert_eq!(item.amount, 0.0);
        assert!(item.validation_error.is_none());
    }

    #[test]
    fn test_donated_for_wire_shape() {
        let json = serde_json::to_value(DonatedFor::Child {
            id: "ch1".to_string(),
            name: "Asha".to_string(),
        })
        .unwrap();
        assert_eq!(json["type"], "child");
        assert_eq!(json["name"], "Asha");

        let own: DonatedFor = serde_json::from_str(r#"{"type":"own"}"#).unwrap();
        assert_eq!(own, DonatedFor::Own);
    }

    #[test]
    fn test_fulfillment_default_is_self_collect() {
        assert_eq!(Fulfillment::default(), Fulfillment::SelfCollect);
        assert_eq!(
            serde_json::to_string(&Fulfillment::Courier).unwrap(),
            "\"courier\""
        );
    }

    #[test]
    fn test_order_wire_keys_are_camel_case() {
        let order = DonationOrder {
            donated_for: DonatedFor::Own,
            relationship: Relationship::Spouse {
                spouse_name: "Meera".to_string(),
            },
            fulfillment: Fulfillment::Courier,
            address: Some("Patna".to_string()),
            courier_region: Some(CourierRegion::InIndiaOutsideBihar),
            courier_eligible: true,
            items: vec![OrderItem {
                category_id: "rice".to_string(),
                category_name: "Rice".to_string(),
                kind: CategoryKind::Standard,
                quantity: 2,
                amount: 200.0,
                weight_grams: 500.0,
                packet_count: 0,
                is_packet: false,
            }],
            totals: OrderTotals {
                total_amount: 200.0,
                net_payable: 350.0,
                courier_charge: 150.0,
                ..Default::default()
            },
            created_at: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["donatedFor"]["type"], "own");
        assert_eq!(json["relationship"]["spouseName"], "Meera");
        assert_eq!(json["courierEligible"], true);
        assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
        assert_eq!(json["items"][0]["categoryId"], "rice");
        assert_eq!(json["items"][0]["weightGrams"], 500.0);
        assert_eq!(json["items"][0]["isPacket"], false);
        assert_eq!(json["totals"]["netPayable"], 350.0);
        assert!(json.get("donated_for").is_none());

        let back: DonationOrder = serde_json::from_value(json).unwrap();
        assert_eq!(back, order);
    }
}
