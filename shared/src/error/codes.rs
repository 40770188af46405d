//! Unified error codes for the donation engine
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Donation order errors
//! - 5xxx: Payment errors
//! - 6xxx: Catalog errors
//! - 7xxx: Courier errors
//! - 8xxx: Dependent (child) errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility with the web front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Donation ====================
    /// Line item index does not exist
    DonationItemNotFound = 4001,
    /// The last line item cannot be removed
    DonationItemRequired = 4002,
    /// A line item has no category chosen
    CategoryNotSelected = 4003,
    /// Category already chosen by another line item
    CategoryAlreadySelected = 4004,
    /// Entered amount is below the category minimum
    AmountBelowMinimum = 4005,
    /// Amount is computed for this category and cannot be entered
    AmountNotEditable = 4006,
    /// Quantity is not a positive integer within bounds
    InvalidQuantity = 4007,
    /// Amount is not a finite, non-negative number within bounds
    InvalidAmount = 4008,
    /// Donating for a child but no child selected
    ChildNotSelected = 4009,
    /// Child profile form is open with unsaved changes
    ChildFormUnsaved = 4010,
    /// Donating as spouse but the spouse name is blank
    SpouseNameRequired = 4011,
    /// Courier delivery chosen but the address is blank
    AddressRequired = 4012,
    /// Net payable amount is zero
    NetPayableNotPositive = 4013,
    /// A submission for this session is still pending
    SubmissionPending = 4014,
    /// Category cannot be chosen when donating for a child
    CategoryNotOfferedForChild = 4015,
    /// Order was already accepted for payment
    OrderAlreadySubmitted = 4016,
    /// A line item has a blank or zero quantity
    QuantityRequired = 4017,

    // ==================== 5xxx: Payment ====================
    /// Payment order creation failed
    PaymentFailed = 5001,
    /// Payment collaborator rejected the order
    PaymentRejected = 5002,
    /// Order may have reached the payment collaborator but no usable answer came back
    PaymentOutcomeUnknown = 5003,

    // ==================== 6xxx: Catalog ====================
    /// Category not found
    CategoryNotFound = 6101,
    /// Catalog has not been loaded for this session
    CatalogNotLoaded = 6102,
    /// Catalog fetch failed
    CatalogLoadFailed = 6103,

    // ==================== 7xxx: Courier ====================
    /// Courier charge table fetch failed
    CourierChargesLoadFailed = 7001,
    /// Unknown courier region name
    CourierRegionUnknown = 7002,

    // ==================== 8xxx: Dependent ====================
    /// Child dependent not found
    ChildNotFound = 8001,
    /// Child name is required
    ChildNameRequired = 8002,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Network error
    NetworkError = 9003,
    /// Timeout error
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Donation
            ErrorCode::DonationItemNotFound => "Donation item not found",
            ErrorCode::DonationItemRequired => "At least one donation item is required",
            ErrorCode::CategoryNotSelected => "Please select a category for every item",
            ErrorCode::CategoryAlreadySelected => "Category is already selected in another item",
            ErrorCode::AmountBelowMinimum => "Amount is below the minimum for this category",
            ErrorCode::AmountNotEditable => "Amount is fixed for this category",
            ErrorCode::InvalidQuantity => "Quantity must be a positive whole number",
            ErrorCode::InvalidAmount => "Amount must be a valid non-negative number",
            ErrorCode::ChildNotSelected => "Please select a child",
            ErrorCode::ChildFormUnsaved => "Please save or close the child details form",
            ErrorCode::SpouseNameRequired => "Please enter the spouse name",
            ErrorCode::AddressRequired => "Please enter a delivery address",
            ErrorCode::NetPayableNotPositive => "Total payable amount must be greater than zero",
            ErrorCode::SubmissionPending => "A donation is already being submitted",
            ErrorCode::CategoryNotOfferedForChild => {
                "Only dynamic categories can be donated for a child"
            }
            ErrorCode::OrderAlreadySubmitted => "This donation has already been submitted",
            ErrorCode::QuantityRequired => "Please enter a quantity for every item",

            // Payment
            ErrorCode::PaymentFailed => "Payment order creation failed",
            ErrorCode::PaymentRejected => "Payment order was rejected",
            ErrorCode::PaymentOutcomeUnknown => {
                "Payment order status is unknown, please check before retrying"
            }

            // Catalog
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CatalogNotLoaded => "Category catalog is not loaded",
            ErrorCode::CatalogLoadFailed => "Failed to load donation categories",

            // Courier
            ErrorCode::CourierChargesLoadFailed => "Failed to load courier charges",
            ErrorCode::CourierRegionUnknown => "Unknown courier region",

            // Dependent
            ErrorCode::ChildNotFound => "Child not found",
            ErrorCode::ChildNameRequired => "Child name is required",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Donation
            4001 => Ok(ErrorCode::DonationItemNotFound),
            4002 => Ok(ErrorCode::DonationItemRequired),
            4003 => Ok(ErrorCode::CategoryNotSelected),
            4004 => Ok(ErrorCode::CategoryAlreadySelected),
            4005 => Ok(ErrorCode::AmountBelowMinimum),
            4006 => Ok(ErrorCode::AmountNotEditable),
            4007 => Ok(ErrorCode::InvalidQuantity),
            4008 => Ok(ErrorCode::InvalidAmount),
            4009 => Ok(ErrorCode::ChildNotSelected),
            4010 => Ok(ErrorCode::ChildFormUnsaved),
            4011 => Ok(ErrorCode::SpouseNameRequired),
            4012 => Ok(ErrorCode::AddressRequired),
            4013 => Ok(ErrorCode::NetPayableNotPositive),
            4014 => Ok(ErrorCode::SubmissionPending),
            4015 => Ok(ErrorCode::CategoryNotOfferedForChild),
            4016 => Ok(ErrorCode::OrderAlreadySubmitted),
            4017 => Ok(ErrorCode::QuantityRequired),

            // Payment
            5001 => Ok(ErrorCode::PaymentFailed),
            5002 => Ok(ErrorCode::PaymentRejected),
            5003 => Ok(ErrorCode::PaymentOutcomeUnknown),

            // Catalog
            6101 => Ok(ErrorCode::CategoryNotFound),
            6102 => Ok(ErrorCode::CatalogNotLoaded),
            6103 => Ok(ErrorCode::CatalogLoadFailed),

            // Courier
            7001 => Ok(ErrorCode::CourierChargesLoadFailed),
            7002 => Ok(ErrorCode::CourierRegionUnknown),

            // Dependent
            8001 => Ok(ErrorCode::ChildNotFound),
            8002 => Ok(ErrorCode::ChildNameRequired),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
