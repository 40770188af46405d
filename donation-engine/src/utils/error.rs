//! Engine errors
//!
//! [`DonationError`] is returned by resolver and session operations. It maps
//! onto the unified [`AppError`] / [`ErrorCode`] from `shared` so callers at
//! the UI boundary see one error shape.

use crate::validation::BlockReason;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DonationError {
    #[error("Donation item {0} not found")]
    ItemNotFound(usize),

    #[error("At least one donation item is required")]
    LastItem,

    #[error("Category {0} not found")]
    CategoryNotFound(String),

    #[error("Category {0} is already selected in another item")]
    CategoryAlreadySelected(String),

    #[error("Category {0} cannot be donated for a child")]
    CategoryNotOfferedForChild(String),

    #[error("Item {} has no category selected", .0 + 1)]
    CategoryNotSelected(usize),

    #[error("Amount is fixed for category {0}")]
    AmountNotEditable(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Child {0} not found")]
    ChildNotFound(String),

    #[error("A donation is already being submitted")]
    SubmissionPending,

    #[error("This donation has already been submitted")]
    AlreadySubmitted,

    #[error("Previous submission outcome is unknown")]
    OutcomeUnknown,

    #[error("Submission blocked by {} issue(s)", .0.len())]
    Blocked(Vec<BlockReason>),
}

impl DonationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ItemNotFound(_) => ErrorCode::DonationItemNotFound,
            Self::LastItem => ErrorCode::DonationItemRequired,
            Self::CategoryNotFound(_) => ErrorCode::CategoryNotFound,
            Self::CategoryAlreadySelected(_) => ErrorCode::CategoryAlreadySelected,
            Self::CategoryNotOfferedForChild(_) => ErrorCode::CategoryNotOfferedForChild,
            Self::CategoryNotSelected(_) => ErrorCode::CategoryNotSelected,
            Self::AmountNotEditable(_) => ErrorCode::AmountNotEditable,
            Self::InvalidQuantity(_) => ErrorCode::InvalidQuantity,
            Self::InvalidAmount(_) => ErrorCode::InvalidAmount,
            Self::ChildNotFound(_) => ErrorCode::ChildNotFound,
            Self::SubmissionPending => ErrorCode::SubmissionPending,
            Self::AlreadySubmitted => ErrorCode::OrderAlreadySubmitted,
            Self::OutcomeUnknown => ErrorCode::PaymentOutcomeUnknown,
            Self::Blocked(reasons) => reasons
                .first()
                .map(BlockReason::code)
                .unwrap_or(ErrorCode::ValidationFailed),
        }
    }
}

impl From<DonationError> for AppError {
    fn from(err: DonationError) -> Self {
        let code = err.code();
        match err {
            DonationError::Blocked(reasons) => {
                let codes: Vec<u16> = reasons.iter().map(|r| r.code().code()).collect();
                let messages: Vec<String> = reasons.iter().map(ToString::to_string).collect();
                AppError::with_message(code, messages.join("; "))
                    .with_detail("codes", codes)
                    .with_detail("messages", messages)
            }
            other => AppError::with_message(code, other.to_string()),
        }
    }
}
