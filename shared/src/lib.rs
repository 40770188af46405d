//! Shared types for the donation engine
//!
//! Common types used across crates: the category / courier-charge reference
//! data as delivered by the donation API, the donation order shapes handed to
//! the payment collaborator, and the unified error system.

pub mod donation;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
