//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`DonationError`] - 引擎错误类型
//! - [`AppError`] / [`AppResult`] - 统一错误 (from shared::error)
//! - 日志初始化

pub mod error;
pub mod logger;

pub use error::DonationError;
pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
