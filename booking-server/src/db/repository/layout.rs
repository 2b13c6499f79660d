//! Café Layout Repository — single record

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::layout::{CafeLayout, LayoutUpdate, SINGLETON_ID, TABLE};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct LayoutRepository {
    base: BaseRepository,
}

impl LayoutRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn singleton_id() -> RecordId {
        RecordId::from_table_key(TABLE, SINGLETON_ID)
    }

    pub async fn get(&self) -> RepoResult<Option<CafeLayout>> {
        let layout: Option<CafeLayout> = self.base.db().select(Self::singleton_id()).await?;
        Ok(layout)
    }

    /// Get the layout, creating an empty one if missing
    pub async fn get_or_default(&self) -> RepoResult<CafeLayout> {
        if let Some(layout) = self.get().await? {
            return Ok(layout);
        }
        let created: Option<CafeLayout> = self
            .base
            .db()
            .create(Self::singleton_id())
            .content(CafeLayout::default())
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create layout".to_string()))
    }

    /// Replace chairs and/or rate
    pub async fn update(&self, data: LayoutUpdate) -> RepoResult<CafeLayout> {
        let existing = self.get_or_default().await?;

        let chairs = data.chairs.unwrap_or(existing.chairs);
        let hourly_rate = data.hourly_rate.unwrap_or(existing.hourly_rate);

        // 椅子 id 在布局内必须唯一
        let mut seen = std::collections::HashSet::new();
        for chair in &chairs {
            if !seen.insert(chair.id.as_str()) {
                return Err(RepoError::Validation(format!(
                    "Duplicate chair id '{}'",
                    chair.id
                )));
            }
        }

        self.base
            .db()
            .query("UPDATE $thing SET chairs = $chairs, hourly_rate = $hourly_rate")
            .bind(("thing", Self::singleton_id()))
            .bind(("chairs", chairs))
            .bind(("hourly_rate", hourly_rate))
            .await?;

        self.get()
            .await?
            .ok_or_else(|| RepoError::NotFound("Layout not found".to_string()))
    }
}
