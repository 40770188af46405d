//! Line-Item Resolver
//!
//! Translates a (category, donor input) pair into amount, weight, packet
//! count and inline validation error:
//! - Standard: amount and weight follow `unit × quantity`, amount not editable
//! - Service: donor amount floored by `unit_rate × quantity`, no weight
//! - Dynamic: donor amount, quantity fixed at 1, weight handled at order level
//!
//! Uses rust_decimal for precision calculations.

use crate::catalog::CatalogCategory;
use crate::utils::DonationError;
use shared::donation::DonationLineItem;
use shared::models::CategoryKind;

use super::money::{MAX_AMOUNT, MAX_QUANTITY, format_amount, multiply};

/// Reset an item to the defaults of a newly chosen category
///
/// Clears everything the previous category left behind, so no stale amount
/// or weight survives a switch.
pub fn apply_category(item: &mut DonationLineItem, category: &CatalogCategory) {
    *item = DonationLineItem {
        category_id: Some(category.id.clone()),
        quantity: 1,
        ..Default::default()
    };
    resolve_item(item, category);
}

/// Apply a quantity edit. `None` is a blank field.
///
/// Dynamic categories ignore quantity entirely.
pub fn apply_quantity(
    item: &mut DonationLineItem,
    category: &CatalogCategory,
    quantity: Option<i32>,
) -> Result<(), DonationError> {
    if !category.kind.has_quantity() {
        tracing::debug!(category_id = %category.id, "Quantity ignored for dynamic category");
        resolve_item(item, category);
        return Ok(());
    }

    let quantity = quantity.unwrap_or(0);
    if quantity < 0 {
        return Err(DonationError::InvalidQuantity(format!(
            "quantity must not be negative, got {}",
            quantity
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(DonationError::InvalidQuantity(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, quantity
        )));
    }

    item.quantity = quantity;
    resolve_item(item, category);
    Ok(())
}

/// Quantity field lost focus: blank or zero becomes 1
///
/// Returns true when the value was coerced.
pub fn coerce_quantity_on_blur(item: &mut DonationLineItem, category: &CatalogCategory) -> bool {
    let coerced = item.quantity < 1;
    if coerced {
        item.quantity = 1;
    }
    resolve_item(item, category);
    coerced
}

/// Apply a donor-entered amount (service and dynamic categories only)
pub fn apply_amount(
    item: &mut DonationLineItem,
    category: &CatalogCategory,
    amount: f64,
) -> Result<(), DonationError> {
    if !category.kind.is_amount_editable() {
        return Err(DonationError::AmountNotEditable(category.id.clone()));
    }
    if !amount.is_finite() || amount < 0.0 {
        return Err(DonationError::InvalidAmount(format!(
            "amount must be a finite non-negative number, got {}",
            amount
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(DonationError::InvalidAmount(format!(
            "amount exceeds maximum allowed ({}), got {}",
            MAX_AMOUNT, amount
        )));
    }

    item.amount = amount;
    resolve_item(item, category);
    Ok(())
}

/// Recompute every derived field of an item from its current input
pub fn resolve_item(item: &mut DonationLineItem, category: &CatalogCategory) {
    match category.kind {
        CategoryKind::Standard => {
            let quantity = item.quantity;
            item.amount = multiply(category.unit_rate, quantity);
            item.weight_grams = multiply(category.unit_weight_grams, quantity);
            item.packet_count = if category.unit_is_packet { quantity } else { 0 };
            item.minimum_amount = 0.0;
            item.validation_error = None;
        }
        CategoryKind::Service | CategoryKind::Dynamic => {
            if category.kind == CategoryKind::Dynamic {
                item.quantity = 1;
            }
            // Weight for dynamic items is applied once, at order level
            item.weight_grams = 0.0;
            item.packet_count = 0;
            // A cleared quantity still owes the single-unit minimum
            item.minimum_amount = category
                .minimum_amount(item.quantity.max(1))
                .unwrap_or(0.0);
            item.validation_error = minimum_error(item.amount, item.minimum_amount, &category.name);
        }
    }
}

/// Inline error for a positive amount below the minimum
fn minimum_error(amount: f64, minimum: f64, name: &str) -> Option<String> {
    (amount > 0.0 && amount < minimum)
        .then(|| format!("Minimum amount for {} is Rs. {}", name, format_amount(minimum)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::catalog::tests::{dynamic, service, standard};

    fn catalog() -> Catalog {
        let mut dyn_min = dynamic("bhog", 500.0);
        dyn_min.unit_rate = 251.0;
        Catalog::from_categories(vec![
            standard("rice", 100.0, 250.0, false),
            standard("ghee", 450.0, 500.0, true),
            service("puja", 500.0),
            dynamic("anna", 500.0),
            dyn_min,
        ])
    }

    fn item_for(catalog: &Catalog, id: &str) -> DonationLineItem {
        let mut item = DonationLineItem::blank();
        apply_category(&mut item, catalog.get(id).unwrap());
        item
    }

    // ==================== Standard ====================

    #[test]
    fn test_standard_scenario_a() {
        let catalog = catalog();
        let rice = catalog.get("rice").unwrap();
        let mut item = item_for(&catalog, "rice");

        apply_quantity(&mut item, rice, Some(3)).unwrap();

        assert_eq!(item.amount, 300.0);
        assert_eq!(item.weight_grams, 750.0);
        assert_eq!(item.packet_count, 0);
        assert!(item.validation_error.is_none());
    }

    #[test]
    fn test_standard_follows_quantity() {
        let catalog = catalog();
        let ghee = catalog.get("ghee").unwrap();
        let mut item = item_for(&catalog, "ghee");

        for quantity in 1..=25 {
            apply_quantity(&mut item, ghee, Some(quantity)).unwrap();
            assert_eq!(item.amount, 450.0 * quantity as f64);
            assert_eq!(item.weight_grams, 500.0 * quantity as f64);
            assert_eq!(item.packet_count, quantity);
        }
    }

    #[test]
    fn test_standard_defaults_on_select() {
        let catalog = catalog();
        let item = item_for(&catalog, "ghee");
        assert_eq!(item.quantity, 1);
        assert_eq!(item.amount, 450.0);
        assert_eq!(item.weight_grams, 500.0);
        assert_eq!(item.packet_count, 1);
    }

    #[test]
    fn test_standard_amount_not_editable() {
        let catalog = catalog();
        let rice = catalog.get("rice").unwrap();
        let mut item = item_for(&catalog, "rice");
        assert_eq!(
            apply_amount(&mut item, rice, 5.0),
            Err(DonationError::AmountNotEditable("rice".into()))
        );
        assert_eq!(item.amount, 100.0);
    }

    #[test]
    fn test_blank_quantity_then_blur() {
        let catalog = catalog();
        let rice = catalog.get("rice").unwrap();
        let mut item = item_for(&catalog, "rice");

        apply_quantity(&mut item, rice, None).unwrap();
        assert_eq!(item.quantity, 0);
        assert_eq!(item.amount, 0.0);

        assert!(coerce_quantity_on_blur(&mut item, rice));
        assert_eq!(item.quantity, 1);
        assert_eq!(item.amount, 100.0);
        assert_eq!(item.weight_grams, 250.0);

        assert!(!coerce_quantity_on_blur(&mut item, rice));
    }

    #[test]
    fn test_invalid_quantity_rejected() {
        let catalog = catalog();
        let rice = catalog.get("rice").unwrap();
        let mut item = item_for(&catalog, "rice");

        assert!(matches!(
            apply_quantity(&mut item, rice, Some(-2)),
            Err(DonationError::InvalidQuantity(_))
        ));
        assert!(matches!(
            apply_quantity(&mut item, rice, Some(MAX_QUANTITY + 1)),
            Err(DonationError::InvalidQuantity(_))
        ));
        // Unchanged
        assert_eq!(item.quantity, 1);
    }

    // ==================== Service ====================

    #[test]
    fn test_service_scenario_b() {
        let catalog = catalog();
        let puja = catalog.get("puja").unwrap();
        let mut item = item_for(&catalog, "puja");

        apply_quantity(&mut item, puja, Some(2)).unwrap();
        assert_eq!(item.minimum_amount, 1000.0);

        apply_amount(&mut item, puja, 800.0).unwrap();
        assert_eq!(
            item.validation_error.as_deref(),
            Some("Minimum amount for Puja Service puja is Rs. 1000")
        );

        apply_amount(&mut item, puja, 1200.0).unwrap();
        assert!(item.validation_error.is_none());
        assert_eq!(item.amount, 1200.0);
    }

    #[test]
    fn test_service_quantity_never_changes_amount() {
        let catalog = catalog();
        let puja = catalog.get("puja").unwrap();
        let mut item = item_for(&catalog, "puja");
        apply_amount(&mut item, puja, 1200.0).unwrap();

        for quantity in [1, 2, 3, 5] {
            apply_quantity(&mut item, puja, Some(quantity)).unwrap();
            assert_eq!(item.amount, 1200.0);
            assert_eq!(item.minimum_amount, 500.0 * quantity as f64);
            assert_eq!(item.validation_error.is_some(), 1200.0 < 500.0 * quantity as f64);
        }
    }

    #[test]
    fn test_service_blank_quantity_keeps_unit_minimum() {
        let catalog = catalog();
        let puja = catalog.get("puja").unwrap();
        let mut item = item_for(&catalog, "puja");

        apply_quantity(&mut item, puja, None).unwrap();
        apply_amount(&mut item, puja, 1.0).unwrap();

        assert_eq!(item.quantity, 0);
        assert_eq!(item.minimum_amount, 500.0);
        assert_eq!(
            item.validation_error.as_deref(),
            Some("Minimum amount for Puja Service puja is Rs. 500")
        );
    }

    #[test]
    fn test_service_has_no_weight() {
        let catalog = catalog();
        let puja = catalog.get("puja").unwrap();
        let mut item = item_for(&catalog, "puja");
        apply_quantity(&mut item, puja, Some(4)).unwrap();
        apply_amount(&mut item, puja, 2500.0).unwrap();
        assert_eq!(item.weight_grams, 0.0);
        assert_eq!(item.packet_count, 0);
    }

    #[test]
    fn test_service_zero_amount_is_not_an_error() {
        let catalog = catalog();
        let puja = catalog.get("puja").unwrap();
        let mut item = item_for(&catalog, "puja");
        apply_amount(&mut item, puja, 0.0).unwrap();
        assert!(item.validation_error.is_none());
    }

    #[test]
    fn test_invalid_amount_rejected() {
        let catalog = catalog();
        let puja = catalog.get("puja").unwrap();
        let mut item = item_for(&catalog, "puja");
        assert!(matches!(
            apply_amount(&mut item, puja, f64::INFINITY),
            Err(DonationError::InvalidAmount(_))
        ));
        assert!(matches!(
            apply_amount(&mut item, puja, -1.0),
            Err(DonationError::InvalidAmount(_))
        ));
        assert!(matches!(
            apply_amount(&mut item, puja, MAX_AMOUNT + 1.0),
            Err(DonationError::InvalidAmount(_))
        ));
    }

    // ==================== Dynamic ====================

    #[test]
    fn test_dynamic_quantity_is_always_one() {
        let catalog = catalog();
        let anna = catalog.get("anna").unwrap();
        let mut item = item_for(&catalog, "anna");

        apply_quantity(&mut item, anna, Some(7)).unwrap();
        assert_eq!(item.quantity, 1);

        item.quantity = 42;
        apply_amount(&mut item, anna, 1001.0).unwrap();
        assert_eq!(item.quantity, 1);
        assert_eq!(item.amount, 1001.0);
        assert_eq!(item.weight_grams, 0.0);
        assert_eq!(item.packet_count, 0);
    }

    #[test]
    fn test_dynamic_without_minimum_accepts_any_amount() {
        let catalog = catalog();
        let anna = catalog.get("anna").unwrap();
        let mut item = item_for(&catalog, "anna");
        apply_amount(&mut item, anna, 1.0).unwrap();
        assert!(item.validation_error.is_none());
    }

    #[test]
    fn test_dynamic_with_minimum_validates() {
        let catalog = catalog();
        let bhog = catalog.get("bhog").unwrap();
        let mut item = item_for(&catalog, "bhog");

        apply_amount(&mut item, bhog, 100.0).unwrap();
        assert!(item.validation_error.is_some());

        apply_amount(&mut item, bhog, 251.0).unwrap();
        assert!(item.validation_error.is_none());
    }

    // ==================== Category switch ====================

    #[test]
    fn test_switch_category_resets_derived_fields() {
        let catalog = catalog();
        let ghee = catalog.get("ghee").unwrap();
        let mut item = item_for(&catalog, "ghee");
        apply_quantity(&mut item, ghee, Some(5)).unwrap();
        assert_eq!(item.weight_grams, 2500.0);

        apply_category(&mut item, catalog.get("puja").unwrap());
        assert_eq!(item.category_id.as_deref(), Some("puja"));
        assert_eq!(item.quantity, 1);
        assert_eq!(item.amount, 0.0);
        assert_eq!(item.weight_grams, 0.0);
        assert_eq!(item.packet_count, 0);
        assert_eq!(item.minimum_amount, 500.0);
        assert!(item.validation_error.is_none());
    }
}
