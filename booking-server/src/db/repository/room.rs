//! Room Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Room, RoomCreate, RoomUpdate, room::TABLE};
use shared::booking::ServiceType;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct RoomRepository {
    base: BaseRepository,
}

impl RoomRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All rooms, active first
    pub async fn find_all(&self) -> RepoResult<Vec<Room>> {
        let rooms: Vec<Room> = self
            .base
            .db()
            .query("SELECT * FROM room ORDER BY name")
            .await?
            .take(0)?;
        Ok(rooms)
    }

    /// Active rooms of a given service type
    pub async fn find_active_by_type(&self, service_type: ServiceType) -> RepoResult<Vec<Room>> {
        let rooms: Vec<Room> = self
            .base
            .db()
            .query(
                "SELECT * FROM room \
                 WHERE service_type = $service_type AND is_active = true ORDER BY name",
            )
            .bind(("service_type", service_type.as_str().to_string()))
            .await?
            .take(0)?;
        Ok(rooms)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Room>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let room: Option<Room> = self.base.db().select(thing).await?;
        Ok(room)
    }

    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Room>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM room WHERE name = $name LIMIT 1")
            .bind(("name", name.to_string()))
            .await?;
        let rooms: Vec<Room> = result.take(0)?;
        Ok(rooms.into_iter().next())
    }

    pub async fn create(&self, data: RoomCreate) -> RepoResult<Room> {
        if self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Room '{}' already exists",
                data.name
            )));
        }

        let room = Room {
            id: None,
            name: data.name,
            service_type: data.service_type,
            capacity: data.capacity,
            hourly_rate: data.hourly_rate,
            description: data.description,
            is_active: true,
        };

        let created: Option<Room> = self.base.db().create(TABLE).content(room).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create room".to_string()))
    }

    pub async fn update(&self, id: &str, data: RoomUpdate) -> RepoResult<Room> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Room {} not found", id)))?;

        if let Some(new_name) = &data.name
            && let Some(found) = self.find_by_name(new_name).await?
            && found.id != existing.id
        {
            return Err(RepoError::Duplicate(format!(
                "Room '{}' already exists",
                new_name
            )));
        }

        let name = data.name.unwrap_or(existing.name);
        let capacity = data.capacity.unwrap_or(existing.capacity);
        let hourly_rate = data.hourly_rate.unwrap_or(existing.hourly_rate);
        let description = data.description.or(existing.description);
        let is_active = data.is_active.unwrap_or(existing.is_active);

        self.base
            .db()
            .query(
                "UPDATE $thing SET name = $name, capacity = $capacity, \
                 hourly_rate = $hourly_rate, description = $description, is_active = $is_active",
            )
            .bind(("thing", thing))
            .bind(("name", name))
            .bind(("capacity", capacity))
            .bind(("hourly_rate", hourly_rate))
            .bind(("description", description))
            .bind(("is_active", is_active))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Room {} not found", id)))
    }

    /// Hard delete a room
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
