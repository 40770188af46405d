//! External collaborators
//!
//! The engine only sees these traits; transport and persistence live in
//! the surrounding application (see [`crate::client`] for the HTTP adapter).

use async_trait::async_trait;
use shared::donation::{DonationOrder, PaymentHandle};
use shared::error::AppResult;
use shared::models::{Category, ChildCreate, ChildDependent, ChildUpdate, CourierChargeEntry};

/// Ordered list of donation categories, read once per session
#[async_trait]
pub trait CategorySource: Send + Sync {
    async fn fetch_categories(&self) -> AppResult<Vec<Category>>;
}

/// Courier charge table, read once per session
#[async_trait]
pub trait CourierChargeSource: Send + Sync {
    async fn fetch_courier_charges(&self) -> AppResult<Vec<CourierChargeEntry>>;
}

/// Accepts a finalized order and starts payment
///
/// A rejection is an `Err` carrying the collaborator's reason.
#[async_trait]
pub trait OrderSubmissionSink: Send + Sync {
    async fn submit(&self, order: &DonationOrder) -> AppResult<PaymentHandle>;
}

/// Child dependents of the logged-in donor
#[async_trait]
pub trait ChildDirectory: Send + Sync {
    async fn list_children(&self) -> AppResult<Vec<ChildDependent>>;
    async fn add_child(&self, child: &ChildCreate) -> AppResult<ChildDependent>;
    async fn update_child(&self, id: &str, changes: &ChildUpdate) -> AppResult<ChildDependent>;
    async fn delete_child(&self, id: &str) -> AppResult<()>;
}
