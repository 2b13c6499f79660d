//! Repository Module
//!
//! CRUD operations for the SurrealDB tables.

pub mod booking;
pub mod layout;
pub mod room;
pub mod settings;
pub mod staff;
pub mod user;

pub use booking::BookingRepository;
pub use layout::LayoutRepository;
pub use room::RoomRepository;
pub use settings::SettingsRepository;
pub use staff::StaffRepository;
pub use user::UserRepository;

use shared::error::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::not_found(msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 使用 surrealdb::RecordId 处理所有 ID：
//   - 解析: let id: RecordId = "room:abc".parse()?;
//   - 创建: let id = RecordId::from_table_key("room", "abc");
//   - CRUD: db.select(id) / db.delete(id) 直接使用 RecordId
//
// 椅子例外：椅子不是记录，资源 id "chair:c01" 只是 booking 里的字符串。

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
