//! Staff Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Staff, StaffCreate, StaffUpdate, staff::TABLE};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct StaffRepository {
    base: BaseRepository,
}

impl StaffRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Staff>> {
        let staff: Vec<Staff> = self
            .base
            .db()
            .query("SELECT * FROM staff ORDER BY name")
            .await?
            .take(0)?;
        Ok(staff)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Staff>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let staff: Option<Staff> = self.base.db().select(thing).await?;
        Ok(staff)
    }

    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Staff>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM staff WHERE name = $name LIMIT 1")
            .bind(("name", name.to_string()))
            .await?;
        let staff: Vec<Staff> = result.take(0)?;
        Ok(staff.into_iter().next())
    }

    pub async fn count(&self) -> RepoResult<usize> {
        let staff = self.find_all().await?;
        Ok(staff.len())
    }

    pub async fn create(&self, data: StaffCreate) -> RepoResult<Staff> {
        if self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Staff '{}' already exists",
                data.name
            )));
        }

        let hashed_pin = Staff::hash_pin(&data.pin)
            .map_err(|e| RepoError::Database(format!("Failed to hash PIN: {e}")))?;

        let staff = Staff {
            id: None,
            name: data.name,
            hashed_pin,
            permissions: data.permissions,
            is_active: true,
            created_at: shared::util::now_millis(),
        };

        let created: Option<Staff> = self.base.db().create(TABLE).content(staff).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create staff".to_string()))
    }

    pub async fn update(&self, id: &str, data: StaffUpdate) -> RepoResult<Staff> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Staff {} not found", id)))?;

        if let Some(new_name) = &data.name
            && let Some(found) = self.find_by_name(new_name).await?
            && found.id != existing.id
        {
            return Err(RepoError::Duplicate(format!(
                "Staff '{}' already exists",
                new_name
            )));
        }

        let name = data.name.unwrap_or(existing.name);
        let hashed_pin = match data.pin {
            Some(pin) => Staff::hash_pin(&pin)
                .map_err(|e| RepoError::Database(format!("Failed to hash PIN: {e}")))?,
            None => existing.hashed_pin,
        };
        let permissions = data.permissions.unwrap_or(existing.permissions);
        let is_active = data.is_active.unwrap_or(existing.is_active);

        self.base
            .db()
            .query(
                "UPDATE $thing SET name = $name, hashed_pin = $hashed_pin, \
                 permissions = $permissions, is_active = $is_active",
            )
            .bind(("thing", thing))
            .bind(("name", name))
            .bind(("hashed_pin", hashed_pin))
            .bind(("permissions", permissions))
            .bind(("is_active", is_active))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Staff {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
