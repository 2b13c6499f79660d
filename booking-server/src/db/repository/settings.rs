//! Settings Repository — single record

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::settings::{SINGLETON_ID, Settings, SettingsUpdate, TABLE};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct SettingsRepository {
    base: BaseRepository,
}

impl SettingsRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn singleton_id() -> RecordId {
        RecordId::from_table_key(TABLE, SINGLETON_ID)
    }

    pub async fn get(&self) -> RepoResult<Option<Settings>> {
        let settings: Option<Settings> = self.base.db().select(Self::singleton_id()).await?;
        Ok(settings)
    }

    /// Get settings, seeding defaults on first run
    pub async fn get_or_default(&self) -> RepoResult<Settings> {
        if let Some(settings) = self.get().await? {
            return Ok(settings);
        }
        let created: Option<Settings> = self
            .base
            .db()
            .create(Self::singleton_id())
            .content(Settings::default())
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to seed settings".to_string()))
    }

    pub async fn update(&self, data: SettingsUpdate) -> RepoResult<Settings> {
        let existing = self.get_or_default().await?;

        let venue_name = data.venue_name.unwrap_or(existing.venue_name);
        let timezone = data.timezone.unwrap_or(existing.timezone);
        let opening_hour = data.opening_hour.unwrap_or(existing.opening_hour);
        let closing_hour = data.closing_hour.unwrap_or(existing.closing_hour);
        let min_duration_hours = data.min_duration_hours.unwrap_or(existing.min_duration_hours);
        let max_duration_hours = data.max_duration_hours.unwrap_or(existing.max_duration_hours);
        let contact_email = data.contact_email.or(existing.contact_email);

        if timezone.parse::<chrono_tz::Tz>().is_err() {
            return Err(RepoError::Validation(format!(
                "Unknown timezone '{}'",
                timezone
            )));
        }
        if opening_hour >= closing_hour || closing_hour > 24 {
            return Err(RepoError::Validation(
                "opening_hour must be before closing_hour (max 24)".to_string(),
            ));
        }
        if min_duration_hours == 0 || min_duration_hours > max_duration_hours {
            return Err(RepoError::Validation(
                "Invalid duration bounds".to_string(),
            ));
        }

        self.base
            .db()
            .query(
                "UPDATE $thing SET venue_name = $venue_name, timezone = $timezone, \
                 opening_hour = $opening_hour, closing_hour = $closing_hour, \
                 min_duration_hours = $min_dur, max_duration_hours = $max_dur, \
                 contact_email = $contact_email",
            )
            .bind(("thing", Self::singleton_id()))
            .bind(("venue_name", venue_name))
            .bind(("timezone", timezone))
            .bind(("opening_hour", opening_hour))
            .bind(("closing_hour", closing_hour))
            .bind(("min_dur", min_duration_hours))
            .bind(("max_dur", max_duration_hours))
            .bind(("contact_email", contact_email))
            .await?;

        self.get()
            .await?
            .ok_or_else(|| RepoError::NotFound("Settings not found".to_string()))
    }
}
