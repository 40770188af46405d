//! Donation Order Module
//!
//! Types shared between the pricing engine and its collaborators:
//! - Line items: per-session editing state
//! - Totals: derived order aggregates
//! - Orders: finalized payload handed to the payment collaborator

pub mod types;

pub use types::*;
