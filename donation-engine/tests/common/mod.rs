//! In-memory collaborators for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use donation_engine::{CategorySource, ChildDirectory, CourierChargeSource, OrderSubmissionSink};
use parking_lot::Mutex;
use shared::donation::{DonationOrder, PaymentHandle};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Category, ChildCreate, ChildDependent, ChildUpdate, CourierChargeEntry, CourierRegion,
    DynamicPricing,
};
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn category(id: &str, name: &str, rate: f64, weight: f64, packet: bool) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        unit_rate: rate,
        unit_weight_grams: weight,
        unit_is_packet: packet,
        dynamic: DynamicPricing::default(),
    }
}

pub fn dynamic_category(id: &str, name: &str, min_value_grams: f64) -> Category {
    Category {
        dynamic: DynamicPricing {
            is_dynamic: true,
            min_value_grams,
        },
        ..category(id, name, 0.0, 0.0, false)
    }
}

/// Rice (standard), Ghee (standard packet), Rudrabhishek Service, Anna Daan (dynamic)
pub fn temple_catalog() -> Vec<Category> {
    vec![
        category("rice", "Rice", 100.0, 250.0, false),
        category("ghee", "Ghee", 450.0, 500.0, true),
        category("rudra", "Rudrabhishek Service", 500.0, 0.0, false),
        dynamic_category("anna", "Anna Daan", 500.0),
    ]
}

pub fn charge_table() -> Vec<CourierChargeEntry> {
    vec![
        CourierChargeEntry {
            region: CourierRegion::InGayaOutsideManpur,
            amount: 50.0,
        },
        CourierChargeEntry {
            region: CourierRegion::InBiharOutsideGaya,
            amount: 80.0,
        },
        CourierChargeEntry {
            region: CourierRegion::InIndiaOutsideBihar,
            amount: 150.0,
        },
        CourierChargeEntry {
            region: CourierRegion::OutsideIndia,
            amount: 900.0,
        },
    ]
}

/// Category and charge source backed by fixed data, counting fetches
pub struct FakeBackend {
    pub categories: AppResult<Vec<Category>>,
    pub charges: AppResult<Vec<CourierChargeEntry>>,
    pub category_fetches: AtomicUsize,
    pub charge_fetches: AtomicUsize,
}

impl FakeBackend {
    pub fn new(categories: Vec<Category>, charges: Vec<CourierChargeEntry>) -> Self {
        Self {
            categories: Ok(categories),
            charges: Ok(charges),
            category_fetches: AtomicUsize::new(0),
            charge_fetches: AtomicUsize::new(0),
        }
    }

    pub fn temple() -> Self {
        Self::new(temple_catalog(), charge_table())
    }

    pub fn failing_categories(mut self) -> Self {
        self.categories = Err(AppError::network("connection refused"));
        self
    }

    pub fn failing_charges(mut self) -> Self {
        self.charges = Err(AppError::with_message(ErrorCode::TimeoutError, "timed out"));
        self
    }

    pub fn fetches(&self) -> (usize, usize) {
        (
            self.category_fetches.load(Ordering::SeqCst),
            self.charge_fetches.load(Ordering::SeqCst),
        )
    }
}

#[async_trait]
impl CategorySource for FakeBackend {
    async fn fetch_categories(&self) -> AppResult<Vec<Category>> {
        self.category_fetches.fetch_add(1, Ordering::SeqCst);
        self.categories.clone()
    }
}

#[async_trait]
impl CourierChargeSource for FakeBackend {
    async fn fetch_courier_charges(&self) -> AppResult<Vec<CourierChargeEntry>> {
        self.charge_fetches.fetch_add(1, Ordering::SeqCst);
        self.charges.clone()
    }
}

/// Payment sink that records orders
#[derive(Default)]
pub struct RecordingSink {
    pub orders: Mutex<Vec<DonationOrder>>,
}

impl RecordingSink {
    pub fn count(&self) -> usize {
        self.orders.lock().len()
    }
}

#[async_trait]
impl OrderSubmissionSink for RecordingSink {
    async fn submit(&self, order: &DonationOrder) -> AppResult<PaymentHandle> {
        let mut orders = self.orders.lock();
        orders.push(order.clone());
        Ok(PaymentHandle {
            order_id: format!("order-{}", orders.len()),
            checkout: Some(serde_json::json!({ "amount": order.totals.net_payable })),
        })
    }
}

/// Payment sink that never answers
pub struct HangingSink;

#[async_trait]
impl OrderSubmissionSink for HangingSink {
    async fn submit(&self, _order: &DonationOrder) -> AppResult<PaymentHandle> {
        std::future::pending::<()>().await;
        Err(AppError::internal("unreachable"))
    }
}

/// Child directory kept in memory
#[derive(Default)]
pub struct MemoryChildren {
    pub children: Mutex<Vec<ChildDependent>>,
}

#[async_trait]
impl ChildDirectory for MemoryChildren {
    async fn list_children(&self) -> AppResult<Vec<ChildDependent>> {
        Ok(self.children.lock().clone())
    }

    async fn add_child(&self, child: &ChildCreate) -> AppResult<ChildDependent> {
        if child.name.trim().is_empty() {
            return Err(AppError::new(ErrorCode::ChildNameRequired));
        }
        let mut children = self.children.lock();
        let created = ChildDependent {
            id: format!("child-{}", children.len() + 1),
            name: child.name.trim().to_string(),
            date_of_birth: child.date_of_birth.clone(),
        };
        children.push(created.clone());
        Ok(created)
    }

    async fn update_child(&self, id: &str, changes: &ChildUpdate) -> AppResult<ChildDependent> {
        let mut children = self.children.lock();
        let child = children
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::new(ErrorCode::ChildNotFound))?;
        if let Some(name) = &changes.name {
            child.name = name.clone();
        }
        if let Some(dob) = &changes.date_of_birth {
            child.date_of_birth = Some(dob.clone());
        }
        Ok(child.clone())
    }

    async fn delete_child(&self, id: &str) -> AppResult<()> {
        let mut children = self.children.lock();
        let before = children.len();
        children.retain(|c| c.id != id);
        if children.len() == before {
            return Err(AppError::new(ErrorCode::ChildNotFound));
        }
        Ok(())
    }
}
