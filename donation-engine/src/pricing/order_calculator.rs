//! Order Totalizer
//!
//! Folds all line items and the courier quote into [`OrderTotals`]:
//! 1. Sum amounts, weights and packets across items
//! 2. Apply the catalog-wide dynamic weight floor to the raw weight
//! 3. Add the courier charge to get the net payable amount
//!
//! Always recomputed from scratch; there is no incremental state.

use crate::catalog::Catalog;
use rust_decimal::prelude::*;
use shared::donation::{DonationLineItem, OrderTotals};

use super::money::{format_amount, to_decimal, to_f64};
use super::region::CourierQuote;

/// Raise a positive raw weight to the floor when it falls short
///
/// Zero weight (nothing physical selected) is exempt.
pub fn apply_weight_floor(raw_weight: f64, floor: Option<f64>) -> f64 {
    match floor {
        Some(floor) if raw_weight > 0.0 && raw_weight < floor => floor,
        _ => raw_weight,
    }
}

/// Calculate order totals
///
/// # Arguments
/// * `items` - Current line items (blank amounts count as 0)
/// * `catalog` - Session catalog, source of the weight floor
/// * `quote` - Courier charge for the current fulfillment and address
pub fn calculate_order_totals(
    items: &[DonationLineItem],
    catalog: &Catalog,
    quote: &CourierQuote,
) -> OrderTotals {
    let mut amount = Decimal::ZERO;
    let mut weight = Decimal::ZERO;
    let mut packets: i32 = 0;

    for item in items {
        amount += to_decimal(item.amount);
        weight += to_decimal(item.weight_grams);
        packets = packets.saturating_add(item.packet_count);
    }

    let raw_weight = to_f64(weight);
    let total_weight = apply_weight_floor(raw_weight, catalog.min_weight_floor());
    let courier = to_decimal(quote.charge);

    let totals = OrderTotals {
        total_amount: to_f64(amount),
        raw_weight_grams: raw_weight,
        total_weight_grams: total_weight,
        weight_rounded_up_by_grams: to_f64(to_decimal(total_weight) - weight),
        total_packet_count: packets,
        courier_charge: to_f64(courier),
        net_payable: to_f64(amount + courier),
    };

    tracing::debug!(
        total_amount = totals.total_amount,
        total_weight = totals.total_weight_grams,
        net_payable = totals.net_payable,
        "Order totals recomputed"
    );

    totals
}

/// Post-payment note shown when the dynamic floor raised the weight
pub fn rounded_up_note(totals: &OrderTotals) -> Option<String> {
    (totals.weight_rounded_up_by_grams > 0.0).then(|| {
        format!(
            "Your offering of {} g has been rounded up to {} g",
            format_amount(totals.raw_weight_grams),
            format_amount(totals.total_weight_grams)
        )
    })
}

// ==================== Tests ====================
