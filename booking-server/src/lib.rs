//! Pavilion Booking Server - 多业态场馆预订后端
//!
//! # 架构概述
//!
//! 单体后端，管理卡拉OK房间、复古游戏机位和咖啡区椅子的预订：
//!
//! - **可用性** (`availability`): 半开区间重叠检查和按日查询
//! - **预订** (`bookings`): 生命周期管理器 + 状态机 + 定价
//! - **支付** (`payments`): 网关透传 + webhook 扇出
//! - **通知** (`notify`): fire-and-forget 邮件队列
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **认证** (`auth`): JWT + Argon2 员工认证
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! booking-server/src/
//! ├── core/          # 配置、状态、服务器、后台任务
//! ├── auth/          # JWT 认证、权限
//! ├── availability/  # 可用性检查
//! ├── bookings/      # 预订生命周期
//! ├── payments/      # 支付桥接
//! ├── notify/        # 邮件通知
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod auth;
pub mod availability;
pub mod bookings;
pub mod core;
pub mod db;
pub mod notify;
pub mod payments;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use bookings::BookingManager;
pub use core::{BackgroundTasks, Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置环境 (dotenv + 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____             _ ___
   / __ \____ __   _(_) (_)___  ____
  / /_/ / __ `/ | / / / / / __ \/ __ \
 / ____/ /_/ /| |/ / / / / /_/ / / / /
/_/    \__,_/ |___/_/_/_/\____/_/ /_/
    "#
    );
}
