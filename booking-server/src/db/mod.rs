//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine) — owns the connection handle and
//! applies the schema definitions at startup.

pub mod models;
pub mod repository;

use shared::error::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "pavilion";
const DATABASE: &str = "venue";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone, Debug)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database at the given path
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;
        tracing::info!(path = %db_path, "Database ready (embedded SurrealDB)");

        Ok(Self { db })
    }
}

/// Idempotent schema definitions
///
/// Tables are SCHEMALESS; indexes cover the two hot booking lookups
/// (per-date availability scans and payment webhook fan-out).
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        r#"
        DEFINE TABLE IF NOT EXISTS booking SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS booking_date ON TABLE booking COLUMNS date;
        DEFINE INDEX IF NOT EXISTS booking_payment_ref ON TABLE booking COLUMNS payment_ref;

        DEFINE TABLE IF NOT EXISTS room SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS layout SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS settings SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS staff SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS user SCHEMALESS;
        "#,
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;
    Ok(())
}
