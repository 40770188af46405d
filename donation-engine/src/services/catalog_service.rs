//! Catalog Service - session reference data with in-memory caching
//!
//! Holds the category catalog and courier charge table behind an explicit
//! lifecycle:
//! - `load()` always fetches both sources and replaces the cache
//! - `get_or_load()` fetches only when nothing is cached
//! - `invalidate()` drops the cache (donation flow closed)
//!
//! A failed fetch leaves an empty table in place so the form degrades to
//! "no categories" / "no courier charge" instead of failing outright.

use crate::catalog::{Catalog, CourierChargeTable};
use parking_lot::RwLock;
use shared::error::{AppError, AppResult, ErrorCode};
use std::sync::Arc;

use super::sources::{CategorySource, CourierChargeSource};

/// Immutable reference data for one donation session
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub catalog: Arc<Catalog>,
    pub charges: Arc<CourierChargeTable>,
}

/// Process-wide read-through cache of the catalog and charge table
#[derive(Clone, Default)]
pub struct CatalogService {
    cached: Arc<RwLock<Option<CatalogSnapshot>>>,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let guard = self.cached.read();
        f.debug_struct("CatalogService")
            .field("loaded", &guard.is_some())
            .field("categories", &guard.as_ref().map(|s| s.catalog.len()))
            .finish()
    }
}

impl CatalogService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.cached.read().is_some()
    }

    /// Cached snapshot, if loaded
    pub fn snapshot(&self) -> Option<CatalogSnapshot> {
        self.cached.read().clone()
    }

    /// Drop the cached data
    pub fn invalidate(&self) {
        if self.cached.write().take().is_some() {
            tracing::info!("Catalog cache invalidated");
        }
    }

    /// Fetch both sources and replace the cache
    ///
    /// On failure the affected table is cached empty and the first error is
    /// returned for the donor-facing notice.
    pub async fn load(
        &self,
        categories: &dyn CategorySource,
        charges: &dyn CourierChargeSource,
    ) -> AppResult<CatalogSnapshot> {
        let (category_result, charge_result) = tokio::join!(
            categories.fetch_categories(),
            charges.fetch_courier_charges()
        );

        let mut first_error: Option<AppError> = None;

        let catalog = match category_result {
            Ok(list) => Catalog::from_categories(list),
            Err(e) => {
                tracing::error!(code = %e.code, error = %e, "Failed to load donation categories");
                first_error.get_or_insert(AppError::with_message(
                    ErrorCode::CatalogLoadFailed,
                    e.message,
                ));
                Catalog::default()
            }
        };

        let table = match charge_result {
            Ok(entries) => CourierChargeTable::from_entries(entries),
            Err(e) => {
                tracing::error!(code = %e.code, error = %e, "Failed to load courier charges");
                first_error.get_or_insert(AppError::with_message(
                    ErrorCode::CourierChargesLoadFailed,
                    e.message,
                ));
                CourierChargeTable::default()
            }
        };

        let snapshot = CatalogSnapshot {
            catalog: Arc::new(catalog),
            charges: Arc::new(table),
        };
        *self.cached.write() = Some(snapshot.clone());

        tracing::info!(
            categories = snapshot.catalog.len(),
            degraded = first_error.is_some(),
            "Catalog loaded"
        );

        match first_error {
            Some(err) => Err(err),
            None => Ok(snapshot),
        }
    }

    /// Return the cached snapshot, loading it first when empty
    pub async fn get_or_load(
        &self,
        categories: &dyn CategorySource,
        charges: &dyn CourierChargeSource,
    ) -> AppResult<CatalogSnapshot> {
        if let Some(snapshot) = self.snapshot() {
            return Ok(snapshot);
        }
        self.load(categories, charges).await
    }
}
