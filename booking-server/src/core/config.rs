use std::path::PathBuf;

use crate::auth::JwtConfig;
use shared::error::{AppError, ErrorCode};

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/pavilion | 工作目录 (数据库、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | PAYMENT_API_URL | (未设置 = offline 模式) | 支付网关地址 |
/// | PAYMENT_API_KEY | "" | 支付网关密钥 |
/// | PAYMENT_CURRENCY | EUR | 结算货币 |
/// | MAIL_API_URL | (未设置 = log-only) | 邮件 API 地址 |
/// | MAIL_API_KEY | "" | 邮件 API 密钥 |
/// | MAIL_FROM | bookings@example.com | 发件人地址 |
/// | NOTIFY_QUEUE_SIZE | 256 | 通知队列容量 |
/// | NOTIFY_MAX_ATTEMPTS | 3 | 单封邮件最大尝试次数 |
/// | ADMIN_PIN | (未设置 = 首次启动随机) | 初始管理员 PIN |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/pavilion HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库和日志
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,

    // === 支付网关 ===
    pub payment_api_url: Option<String>,
    pub payment_api_key: String,
    pub payment_currency: String,

    // === 邮件通知 ===
    pub mail_api_url: Option<String>,
    pub mail_api_key: String,
    pub mail_from: String,
    pub notify_queue_size: usize,
    pub notify_max_attempts: u32,

    /// 初始管理员 PIN (仅首次启动种子账号时使用)
    pub admin_pin: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, AppError> {
        let jwt = JwtConfig::from_env()
            .map_err(|e| AppError::with_message(ErrorCode::ConfigError, e.to_string()))?;

        Ok(Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/pavilion".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),

            payment_api_url: std::env::var("PAYMENT_API_URL").ok(),
            payment_api_key: std::env::var("PAYMENT_API_KEY").unwrap_or_default(),
            payment_currency: std::env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "EUR".into()),

            mail_api_url: std::env::var("MAIL_API_URL").ok(),
            mail_api_key: std::env::var("MAIL_API_KEY").unwrap_or_default(),
            mail_from: std::env::var("MAIL_FROM")
                .unwrap_or_else(|_| "bookings@example.com".into()),
            notify_queue_size: std::env::var("NOTIFY_QUEUE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(256),
            notify_max_attempts: std::env::var("NOTIFY_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),

            admin_pin: std::env::var("ADMIN_PIN").ok(),
        })
    }

    /// 使用自定义值覆盖部分配置 (测试场景)
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Result<Self, AppError> {
        let mut config = Self::from_env()?;
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// 数据库目录 (work_dir/database)
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 日志目录 (work_dir/logs)
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }
}
