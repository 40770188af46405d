//! Donation Session
//!
//! Per-donor editing state of the donation form. Every edit resolves the
//! touched item, then re-quotes the courier charge and recomputes the totals
//! from scratch, and drops the submission gate back to `Editing`.
//!
//! ```text
//! edit ──► resolve item ──► quote courier ──► totals ──► gate: Editing
//!                                                           │
//! evaluate() / submit() ─────────────────────────────► Ready | Blocked
//! ```

use crate::catalog::{Catalog, CatalogCategory};
use crate::pricing::{
    CourierQuote, apply_amount, apply_category, apply_quantity, calculate_order_totals,
    coerce_quantity_on_blur, quote_courier, rounded_up_note,
};
use crate::services::{CatalogSnapshot, ChildDirectory, OrderSubmissionSink};
use crate::utils::DonationError;
use crate::validation::{SubmissionGate, SubmissionInput, SubmissionState};
use shared::donation::{
    DonatedFor, DonationLineItem, DonationOrder, Fulfillment, OrderItem, OrderTotals,
    PaymentHandle, Relationship,
};
use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
use shared::models::{CategoryKind, ChildDependent};
use shared::util::now_millis;
use std::collections::HashSet;
use std::sync::Arc;


/// Outcome of the most recent submission attempt
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    /// Order handed to the payment collaborator, no answer yet
    Pending,
    Accepted(PaymentHandle),
    /// Rejected by the collaborator; the donor may retry
    Rejected(String),
    /// Failed after the order may have been created; locked until
    /// [`DonationSession::reset_submission`]
    Unconfirmed(String),
}

/// Editing state of one donation form
#[derive(Debug, Clone)]
pub struct DonationSession {
    snapshot: CatalogSnapshot,
    items: Vec<DonationLineItem>,
    for_child: bool,
    child: Option<ChildDependent>,
    child_form_dirty: bool,
    as_spouse: bool,
    spouse_name: String,
    fulfillment: Fulfillment,
    address: String,
    quote: CourierQuote,
    totals: OrderTotals,
    gate: SubmissionGate,
    submission: SubmissionStatus,
}

impl DonationSession {
    /// Start a form with one blank item
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        let mut session = Self {
            snapshot,
            items: vec![DonationLineItem::blank()],
            for_child: false,
            child: None,
            child_form_dirty: false,
            as_spouse: false,
            spouse_name: String::new(),
            fulfillment: Fulfillment::default(),
            address: String::new(),
            quote: CourierQuote::default(),
            totals: OrderTotals::default(),
            gate: SubmissionGate::new(),
            submission: SubmissionStatus::Idle,
        };
        session.recompute();
        session
    }

    // ==================== Accessors ====================

    pub fn catalog(&self) -> &Catalog {
        &self.snapshot.catalog
    }

    pub fn items(&self) -> &[DonationLineItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&DonationLineItem> {
        self.items.get(index)
    }

    pub fn totals(&self) -> &OrderTotals {
        &self.totals
    }

    pub fn quote(&self) -> &CourierQuote {
        &self.quote
    }

    /// Courier chosen for an address inside the pickup area
    pub fn courier_ineligible(&self) -> bool {
        self.fulfillment == Fulfillment::Courier && self.quote.is_ineligible()
    }

    pub fn fulfillment(&self) -> Fulfillment {
        self.fulfillment
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn is_for_child(&self) -> bool {
        self.for_child
    }

    pub fn child(&self) -> Option<&ChildDependent> {
        self.child.as_ref()
    }

    pub fn state(&self) -> &SubmissionState {
        self.gate.state()
    }

    pub fn submission_status(&self) -> &SubmissionStatus {
        &self.submission
    }

    /// Note for the confirmation page when the weight floor applied
    pub fn rounded_up_note(&self) -> Option<String> {
        rounded_up_note(&self.totals)
    }

    // ==================== Line items ====================

    /// Append a blank item, returning its index
    pub fn add_item(&mut self) -> usize {
        self.items.push(DonationLineItem::blank());
        self.recompute();
        self.items.len() - 1
    }

    /// Remove an item. The last remaining item cannot be removed.
    pub fn remove_item(&mut self, index: usize) -> Result<DonationLineItem, DonationError> {
        if index >= self.items.len() {
            return Err(DonationError::ItemNotFound(index));
        }
        if self.items.len() == 1 {
            return Err(DonationError::LastItem);
        }
        let removed = self.items.remove(index);
        self.recompute();
        Ok(removed)
    }

    /// Categories the item at `index` may switch to
    pub fn available_categories(
        &self,
        index: usize,
    ) -> Result<Vec<&CatalogCategory>, DonationError> {
        if index >= self.items.len() {
            return Err(DonationError::ItemNotFound(index));
        }
        let taken: HashSet<&str> = self
            .items
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .filter_map(|(_, item)| item.category_id.as_deref())
            .collect();
        Ok(self.snapshot.catalog.available(&taken, self.for_child))
    }

    /// Choose a category for an item, resetting it to the category defaults
    pub fn select_category(&mut self, index: usize, category_id: &str) -> Result<(), DonationError> {
        if index >= self.items.len() {
            return Err(DonationError::ItemNotFound(index));
        }
        let catalog = Arc::clone(&self.snapshot.catalog);
        let category = catalog
            .get(category_id)
            .ok_or_else(|| DonationError::CategoryNotFound(category_id.to_string()))?;

        if self.for_child && category.kind != CategoryKind::Dynamic {
            return Err(DonationError::CategoryNotOfferedForChild(category.id.clone()));
        }
        let taken_elsewhere = self
            .items
            .iter()
            .enumerate()
            .any(|(i, item)| i != index && item.category_id.as_deref() == Some(category_id));
        if taken_elsewhere {
            return Err(DonationError::CategoryAlreadySelected(category.id.clone()));
        }

        apply_category(&mut self.items[index], category);
        tracing::debug!(index, category_id, kind = ?category.kind, "Category selected");
        self.recompute();
        Ok(())
    }

    /// Quantity edit; `None` is a cleared field
    pub fn set_quantity(&mut self, index: usize, quantity: Option<i32>) -> Result<(), DonationError> {
        self.edit_item(index, |item, category| apply_quantity(item, category, quantity))
    }

    /// Quantity field lost focus. Returns true when a blank value became 1.
    pub fn blur_quantity(&mut self, index: usize) -> Result<bool, DonationError> {
        self.edit_item(index, |item, category| Ok(coerce_quantity_on_blur(item, category)))
    }

    /// Donor-entered amount for service and dynamic items
    pub fn set_amount(&mut self, index: usize, amount: f64) -> Result<(), DonationError> {
        self.edit_item(index, |item, category| apply_amount(item, category, amount))
    }

    fn edit_item<R>(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut DonationLineItem, &CatalogCategory) -> Result<R, DonationError>,
    ) -> Result<R, DonationError> {
        let catalog = Arc::clone(&self.snapshot.catalog);
        let item = self
            .items
            .get_mut(index)
            .ok_or(DonationError::ItemNotFound(index))?;
        let category_id = item
            .category_id
            .as_deref()
            .ok_or(DonationError::CategoryNotSelected(index))?;
        let category = catalog
            .get(category_id)
            .ok_or_else(|| DonationError::CategoryNotFound(category_id.to_string()))?;

        let result = edit(item, category)?;
        self.recompute();
        Ok(result)
    }

    // ==================== Donor, relationship, fulfillment ====================

    pub fn donate_for_self(&mut self) {
        self.for_child = false;
        self.child = None;
        self.recompute();
    }

    /// Switch to child mode
    ///
    /// Only dynamic categories can be donated for a child; items holding any
    /// other category are reset to blank.
    pub fn donate_for_child(&mut self, child: Option<ChildDependent>) {
        self.for_child = true;
        self.child = child;

        let catalog = Arc::clone(&self.snapshot.catalog);
        let mut cleared = 0;
        for item in &mut self.items {
            let is_dynamic = item
                .category_id
                .as_deref()
                .and_then(|id| catalog.get(id))
                .is_some_and(|c| c.kind == CategoryKind::Dynamic);
            if item.has_category() && !is_dynamic {
                *item = DonationLineItem::blank();
                cleared += 1;
            }
        }
        if cleared > 0 {
            tracing::info!(cleared, "Non-dynamic items cleared for child donation");
        }
        self.recompute();
    }

    /// Select a child from the donor's directory by id
    pub async fn select_child(
        &mut self,
        directory: &dyn ChildDirectory,
        child_id: &str,
    ) -> AppResult<()> {
        let children = directory.list_children().await?;
        let child = children
            .into_iter()
            .find(|c| c.id == child_id)
            .ok_or_else(|| DonationError::ChildNotFound(child_id.to_string()))?;
        self.donate_for_child(Some(child));
        Ok(())
    }

    /// Child profile form opened/edited (true) or saved/closed (false)
    pub fn set_child_form_dirty(&mut self, dirty: bool) {
        self.child_form_dirty = dirty;
        self.recompute();
    }

    pub fn set_as_spouse(&mut self, as_spouse: bool) {
        self.as_spouse = as_spouse;
        self.recompute();
    }

    pub fn set_spouse_name(&mut self, name: impl Into<String>) {
        self.spouse_name = name.into();
        self.recompute();
    }

    pub fn set_fulfillment(&mut self, fulfillment: Fulfillment) {
        self.fulfillment = fulfillment;
        self.recompute();
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = address.into();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.quote = quote_courier(self.fulfillment, &self.address, &self.snapshot.charges);
        self.totals = calculate_order_totals(&self.items, &self.snapshot.catalog, &self.quote);
        self.gate.mark_edited();
    }

    // ==================== Submission ====================

    /// Run the submission gate against the current form
    pub fn evaluate(&mut self) -> &SubmissionState {
        let input = SubmissionInput {
            items: &self.items,
            totals: &self.totals,
            for_child: self.for_child,
            child_selected: self.child.is_some(),
            child_form_dirty: self.child_form_dirty,
            fulfillment: self.fulfillment,
            address: &self.address,
            as_spouse: self.as_spouse,
            spouse_name: &self.spouse_name,
        };
        self.gate.evaluate(&input)
    }

    /// Finalize the order. Fails with every blocking reason when not ready.
    pub fn build_order(&mut self) -> Result<DonationOrder, DonationError> {
        if let SubmissionState::Blocked(reasons) = self.evaluate() {
            return Err(DonationError::Blocked(reasons.clone()));
        }

        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| -> Result<OrderItem, DonationError> {
                let category_id = item
                    .category_id
                    .as_deref()
                    .ok_or(DonationError::CategoryNotSelected(index))?;
                let category = self
                    .snapshot
                    .catalog
                    .get(category_id)
                    .ok_or_else(|| DonationError::CategoryNotFound(category_id.to_string()))?;
                Ok(OrderItem {
                    category_id: category.id.clone(),
                    category_name: category.name.clone(),
                    kind: category.kind,
                    quantity: item.quantity,
                    amount: item.amount,
                    weight_grams: item.weight_grams,
                    packet_count: item.packet_count,
                    is_packet: category.unit_is_packet,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let donated_for = match (&self.child, self.for_child) {
            (Some(child), true) => DonatedFor::Child {
                id: child.id.clone(),
                name: child.name.clone(),
            },
            _ => DonatedFor::Own,
        };
        let relationship = if self.as_spouse {
            Relationship::Spouse {
                spouse_name: self.spouse_name.trim().to_string(),
            }
        } else {
            Relationship::Own
        };
        let address = (self.fulfillment == Fulfillment::Courier)
            .then(|| self.address.trim().to_string());

        Ok(DonationOrder {
            donated_for,
            relationship,
            fulfillment: self.fulfillment,
            address,
            courier_region: self.quote.region(),
            courier_eligible: !self.quote.is_ineligible(),
            items,
            totals: self.totals.clone(),
            created_at: now_millis(),
        })
    }

    /// Hand the finalized order to the payment collaborator
    ///
    /// The sink is never called while the gate is blocked. Only one
    /// submission may be in flight; an accepted order cannot be resubmitted.
    /// A definite rejection allows a retry. Any other failure, or a future
    /// dropped mid-flight, keeps the session locked until the owner has
    /// checked with the collaborator and calls [`Self::reset_submission`].
    pub async fn submit(&mut self, sink: &dyn OrderSubmissionSink) -> AppResult<PaymentHandle> {
        match self.submission {
            SubmissionStatus::Pending => return Err(DonationError::SubmissionPending.into()),
            SubmissionStatus::Accepted(_) => return Err(DonationError::AlreadySubmitted.into()),
            SubmissionStatus::Unconfirmed(_) => return Err(DonationError::OutcomeUnknown.into()),
            SubmissionStatus::Idle | SubmissionStatus::Rejected(_) => {}
        }

        let order = self.build_order()?;
        self.submission = SubmissionStatus::Pending;
        tracing::info!(
            items = order.items.len(),
            net_payable = order.totals.net_payable,
            fulfillment = ?order.fulfillment,
            "Submitting donation order"
        );

        match sink.submit(&order).await {
            Ok(handle) => {
                tracing::info!(order_id = %handle.order_id, "Donation order accepted");
                self.submission = SubmissionStatus::Accepted(handle.clone());
                Ok(handle)
            }
            Err(err) if is_definite_rejection(&err) => {
                tracing::error!(code = %err.code, error = %err, "Donation order rejected");
                self.submission = SubmissionStatus::Rejected(err.message.clone());
                Err(err)
            }
            Err(err) => {
                tracing::error!(code = %err.code, error = %err, "Donation order outcome unknown");
                self.submission = SubmissionStatus::Unconfirmed(err.message.clone());
                Err(err)
            }
        }
    }

    /// Release a `Pending` or `Unconfirmed` lock
    ///
    /// Only call after confirming with the collaborator that no order was
    /// created.
    pub fn reset_submission(&mut self) -> Result<(), DonationError> {
        match self.submission {
            SubmissionStatus::Accepted(_) => Err(DonationError::AlreadySubmitted),
            SubmissionStatus::Pending | SubmissionStatus::Unconfirmed(_) => {
                tracing::warn!(status = ?self.submission, "Submission lock released");
                self.submission = SubmissionStatus::Idle;
                Ok(())
            }
            SubmissionStatus::Idle | SubmissionStatus::Rejected(_) => Ok(()),
        }
    }
}

/// Failures that prove no order was created
fn is_definite_rejection(err: &AppError) -> bool {
    matches!(err.code, ErrorCode::PaymentRejected | ErrorCode::PaymentFailed)
        || matches!(
            err.code.category(),
            ErrorCategory::Donation | ErrorCategory::Dependent
        )
}
