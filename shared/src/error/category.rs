//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 4xxx: Donation order errors
/// - 5xxx: Payment errors
/// - 6xxx: Catalog errors
/// - 7xxx: Courier errors
/// - 8xxx: Dependent errors
/// - 9xxx and anything else: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Donation order errors (4xxx)
    Donation,
    /// Payment errors (5xxx)
    Payment,
    /// Catalog errors (6xxx)
    Catalog,
    /// Courier errors (7xxx)
    Courier,
    /// Dependent errors (8xxx)
    Dependent,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            4000..5000 => Self::Donation,
            5000..6000 => Self::Payment,
            6000..7000 => Self::Catalog,
            7000..8000 => Self::Courier,
            8000..9000 => Self::Dependent,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Donation => "donation",
            Self::Payment => "payment",
            Self::Catalog => "catalog",
            Self::Courier => "courier",
            Self::Dependent => "dependent",
            Self::System => "system",
        }
    }

    /// Whether errors of this category are correctable by the donor
    pub fn is_donor_correctable(&self) -> bool {
        matches!(self, Self::General | Self::Donation | Self::Dependent)
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
