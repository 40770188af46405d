//! Services: session reference data cache and collaborator interfaces

pub mod catalog_service;
pub mod sources;

pub use catalog_service::{CatalogService, CatalogSnapshot};
pub use sources::{CategorySource, ChildDirectory, CourierChargeSource, OrderSubmissionSink};
