//! Submission Validator
//!
//! Gate in front of order creation. States:
//!
//! ```text
//! Editing ──evaluate()──► Ready | Blocked(reasons)
//!    ▲                         │
//!    └──────mark_edited()──────┘
//! ```
//!
//! Failures are reported synchronously and never auto-corrected.

use serde::Serialize;
use shared::donation::{DonationLineItem, Fulfillment, OrderTotals};
use shared::error::ErrorCode;
use shared::util::is_blank;
use std::fmt;

/// One reason the order cannot be created yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum BlockReason {
    /// Item carries an inline amount error
    ItemInvalid { index: usize, message: String },
    /// Item has no category chosen
    CategoryNotSelected { index: usize },
    /// Quantity left blank or zero
    QuantityRequired { index: usize },
    /// Donating for a child, none selected
    ChildNotSelected,
    /// Child profile form is open with unsaved edits
    ChildFormUnsaved,
    /// Courier chosen but address blank
    AddressRequired,
    NetPayableNotPositive,
    SpouseNameRequired,
}

impl BlockReason {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ItemInvalid { .. } => ErrorCode::AmountBelowMinimum,
            Self::CategoryNotSelected { .. } => ErrorCode::CategoryNotSelected,
            Self::QuantityRequired { .. } => ErrorCode::QuantityRequired,
            Self::ChildNotSelected => ErrorCode::ChildNotSelected,
            Self::ChildFormUnsaved => ErrorCode::ChildFormUnsaved,
            Self::AddressRequired => ErrorCode::AddressRequired,
            Self::NetPayableNotPositive => ErrorCode::NetPayableNotPositive,
            Self::SpouseNameRequired => ErrorCode::SpouseNameRequired,
        }
    }
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ItemInvalid { index, message } => write!(f, "Item {}: {}", index + 1, message),
            Self::CategoryNotSelected { index } | Self::QuantityRequired { index } => {
                write!(f, "Item {}: {}", index + 1, self.code().message())
            }
            other => f.write_str(other.code().message()),
        }
    }
}

/// Snapshot of everything the gate looks at
#[derive(Debug, Clone, Copy)]
pub struct SubmissionInput<'a> {
    pub items: &'a [DonationLineItem],
    pub totals: &'a OrderTotals,
    pub for_child: bool,
    pub child_selected: bool,
    pub child_form_dirty: bool,
    pub fulfillment: Fulfillment,
    pub address: &'a str,
    pub as_spouse: bool,
    pub spouse_name: &'a str,
}

/// Collect every blocking reason, in form order
pub fn check_submission(input: &SubmissionInput<'_>) -> Vec<BlockReason> {
    let mut reasons = Vec::new();

    if input.for_child && !input.child_selected {
        reasons.push(BlockReason::ChildNotSelected);
    }
    if input.child_form_dirty {
        reasons.push(BlockReason::ChildFormUnsaved);
    }
    if input.as_spouse && is_blank(input.spouse_name) {
        reasons.push(BlockReason::SpouseNameRequired);
    }

    for (index, item) in input.items.iter().enumerate() {
        if !item.has_category() {
            reasons.push(BlockReason::CategoryNotSelected { index });
            continue;
        }
        // Dynamic items are pinned to 1, so only a cleared field lands here
        if item.quantity < 1 {
            reasons.push(BlockReason::QuantityRequired { index });
        }
        if let Some(message) = &item.validation_error {
            reasons.push(BlockReason::ItemInvalid {
                index,
                message: message.clone(),
            });
        }
    }

    if input.fulfillment == Fulfillment::Courier && is_blank(input.address) {
        reasons.push(BlockReason::AddressRequired);
    }
    if input.totals.net_payable <= 0.0 {
        reasons.push(BlockReason::NetPayableNotPositive);
    }

    reasons
}

/// Gate state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "reasons", rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Editing,
    Ready,
    Blocked(Vec<BlockReason>),
}

/// Submission gate state machine
#[derive(Debug, Clone, Default)]
pub struct SubmissionGate {
    state: SubmissionState,
}

impl SubmissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == SubmissionState::Ready
    }

    /// Any field change drops the gate back to Editing
    pub fn mark_edited(&mut self) {
        self.state = SubmissionState::Editing;
    }

    /// Run every check and move to Ready or Blocked
    pub fn evaluate(&mut self, input: &SubmissionInput<'_>) -> &SubmissionState {
        let reasons = check_submission(input);
        self.state = if reasons.is_empty() {
            SubmissionState::Ready
        } else {
            tracing::debug!(count = reasons.len(), "Submission blocked");
            SubmissionState::Blocked(reasons)
        };
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_item() -> DonationLineItem {
        DonationLineItem {
            category_id: Some("rice".to_string()),
            quantity: 1,
            amount: 100.0,
            ..Default::default()
        }
    }

    fn totals(net: f64) -> OrderTotals {
        OrderTotals {
            total_amount: net,
            net_payable: net,
            ..Default::default()
        }
    }

    fn input<'a>(items: &'a [DonationLineItem], totals: &'a OrderTotals) -> SubmissionInput<'a> {
        SubmissionInput {
            items,
            totals,
            for_child: false,
            child_selected: false,
            child_form_dirty: false,
            fulfillment: Fulfillment::SelfCollect,
            address: "",
            as_spouse: false,
            spouse_name: "",
        }
    }

    #[test]
    fn test_ready_when_consistent() {
        let items = [valid_item()];
        let totals = totals(100.0);
        let mut gate = SubmissionGate::new();
        assert_eq!(gate.state(), &SubmissionState::Editing);
        assert_eq!(gate.evaluate(&input(&items, &totals)), &SubmissionState::Ready);
        assert!(gate.is_ready());

        gate.mark_edited();
        assert_eq!(gate.state(), &SubmissionState::Editing);
    }

    #[test]
    fn test_scenario_e_courier_without_address() {
        let items = [valid_item()];
        let totals = totals(100.0);
        let mut check = input(&items, &totals);
        check.fulfillment = Fulfillment::Courier;
        check.address = "  ";

        let mut gate = SubmissionGate::new();
        assert_eq!(
            gate.evaluate(&check),
            &SubmissionState::Blocked(vec![BlockReason::AddressRequired])
        );
    }

    #[test]
    fn test_each_blocking_condition() {
        let totals_ok = totals(100.0);

        let mut bad_item = valid_item();
        bad_item.validation_error = Some("Minimum amount for Puja is Rs. 1000".into());
        let items = [bad_item];
        assert!(matches!(
            check_submission(&input(&items, &totals_ok)).as_slice(),
            [BlockReason::ItemInvalid { index: 0, .. }]
        ));

        let items = [valid_item(), DonationLineItem::blank()];
        assert_eq!(
            check_submission(&input(&items, &totals_ok)),
            vec![BlockReason::CategoryNotSelected { index: 1 }]
        );

        let items = [valid_item()];
        let mut child = input(&items, &totals_ok);
        child.for_child = true;
        assert_eq!(check_submission(&child), vec![BlockReason::ChildNotSelected]);
        child.child_selected = true;
        assert!(check_submission(&child).is_empty());

        let mut dirty = input(&items, &totals_ok);
        dirty.child_form_dirty = true;
        assert_eq!(check_submission(&dirty), vec![BlockReason::ChildFormUnsaved]);

        let mut spouse = input(&items, &totals_ok);
        spouse.as_spouse = true;
        assert_eq!(check_submission(&spouse), vec![BlockReason::SpouseNameRequired]);
        spouse.spouse_name = "Sita Devi";
        assert!(check_submission(&spouse).is_empty());

        let zero = totals(0.0);
        assert_eq!(
            check_submission(&input(&items, &zero)),
            vec![BlockReason::NetPayableNotPositive]
        );
    }

    #[test]
    fn test_blank_quantity_blocks() {
        let mut cleared = valid_item();
        cleared.quantity = 0;
        cleared.amount = 0.0;
        let items = [cleared, valid_item()];
        let totals_ok = totals(100.0);

        let reasons = check_submission(&input(&items, &totals_ok));
        assert_eq!(reasons, vec![BlockReason::QuantityRequired { index: 0 }]);
        assert_eq!(reasons[0].code(), ErrorCode::QuantityRequired);
        assert_eq!(
            reasons[0].to_string(),
            "Item 1: Please enter a quantity for every item"
        );
    }

    #[test]
    fn test_reasons_aggregate() {
        let items = [DonationLineItem::blank()];
        let zero = totals(0.0);
        let mut check = input(&items, &zero);
        check.fulfillment = Fulfillment::Courier;
        check.as_spouse = true;

        let reasons = check_submission(&check);
        assert_eq!(
            reasons,
            vec![
                BlockReason::SpouseNameRequired,
                BlockReason::CategoryNotSelected { index: 0 },
                BlockReason::AddressRequired,
                BlockReason::NetPayableNotPositive,
            ]
        );
    }

    #[test]
    fn test_reason_display_and_codes() {
        let reason = BlockReason::ItemInvalid {
            index: 0,
            message: "Minimum amount for Puja is Rs. 1000".into(),
        };
        assert_eq!(reason.to_string(), "Item 1: Minimum amount for Puja is Rs. 1000");
        assert_eq!(reason.code(), ErrorCode::AmountBelowMinimum);
        assert_eq!(
            BlockReason::AddressRequired.to_string(),
            "Please enter a delivery address"
        );
    }

    #[test]
    fn test_state_serialization() {
        let state = SubmissionState::Blocked(vec![BlockReason::AddressRequired]);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["state"], "blocked");
        assert_eq!(json["reasons"][0]["reason"], "address_required");
    }
}
