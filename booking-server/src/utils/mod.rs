//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`ApiResponse`] - API 响应结构 (from shared::error)
//! - 日志、时间、输入校验等工具

pub mod logger;
pub mod result;
pub mod time;
pub mod validation;

// Re-export error types from shared
pub use result::AppResult;
pub use shared::error::{ApiResponse, AppError, ErrorCategory, ErrorCode};
