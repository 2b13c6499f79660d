//! Customer Record Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{User, UserUpsert, user::TABLE};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Record a booking against the customer, creating the record on
    /// first contact and refreshing name/phone otherwise.
    pub async fn record_booking(&self, data: UserUpsert) -> RepoResult<User> {
        let now = shared::util::now_millis();

        if let Some(existing) = self.find_by_email(&data.email).await? {
            let id = existing
                .id
                .clone()
                .ok_or_else(|| RepoError::Database("User record without id".to_string()))?;
            self.base
                .db()
                .query(
                    "UPDATE $thing SET name = $name, phone = $phone, \
                     booking_count = booking_count + 1, last_booking_at = $now",
                )
                .bind(("thing", id))
                .bind(("name", data.name))
                .bind(("phone", data.phone.or(existing.phone)))
                .bind(("now", now))
                .await?;
            return self
                .find_by_email(&data.email)
                .await?
                .ok_or_else(|| RepoError::NotFound("User not found".to_string()));
        }

        let user = User {
            id: None,
            email: data.email,
            name: data.name,
            phone: data.phone,
            booking_count: 1,
            last_booking_at: now,
        };
        let created: Option<User> = self.base.db().create(TABLE).content(user).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user ORDER BY last_booking_at DESC")
            .await?
            .take(0)?;
        Ok(users)
    }
}
