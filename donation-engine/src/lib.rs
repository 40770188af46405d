//! Donation Engine - 捐赠定价与履约引擎
//!
//! # 架构概述
//!
//! Computes what a donor owes and what gets shipped as they edit the
//! donation form, and gates order creation:
//!
//! - **目录** (`catalog`): 捐赠类别与快递费表, 类别类型加载时一次性确定
//! - **定价** (`pricing`): 行项目计算、地址分区、订单合计 (纯同步计算)
//! - **校验** (`validation`): 提交闸门 Editing / Ready / Blocked
//! - **会话** (`session`): 单个捐赠表单的编辑状态与下单
//! - **服务** (`services`): 目录缓存与外部协作接口
//! - **客户端** (`client`): 基于 reqwest 的 REST 适配器
//!
//! # 模块结构
//!
//! ```text
//! donation-engine/src/
//! ├── core/          # 配置
//! ├── catalog/       # 类别目录、快递费表
//! ├── pricing/       # 计算器、地区分类
//! ├── validation/    # 提交闸门
//! ├── session/       # 捐赠会话
//! ├── services/      # 目录缓存、协作 trait
//! ├── client/        # HTTP 适配器
//! └── utils/         # 错误、日志
//! ```

pub mod catalog;
pub mod client;
pub mod core;
pub mod pricing;
pub mod services;
pub mod session;
pub mod utils;
pub mod validation;

// Re-export 公共类型
pub use catalog::{Catalog, CatalogCategory, CourierChargeTable};
pub use client::HttpDonationApi;
pub use core::Config;
pub use services::{
    CatalogService, CatalogSnapshot, CategorySource, ChildDirectory, CourierChargeSource,
    OrderSubmissionSink,
};
pub use session::{DonationSession, SubmissionStatus};
pub use utils::{AppError, AppResult, DonationError, ErrorCategory, ErrorCode};
pub use validation::{BlockReason, SubmissionGate, SubmissionState};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_from_config, init_logger_with_file};
