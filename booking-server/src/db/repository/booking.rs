//! Booking Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Booking, BookingUpdate, booking::TABLE};
use shared::booking::{BookingStatus, PaymentStatus, ServiceType};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

/// List filters for the staff surface
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub date: Option<String>,
    pub status: Option<BookingStatus>,
    pub service_type: Option<ServiceType>,
    pub customer_email: Option<String>,
}

#[derive(Clone)]
pub struct BookingRepository {
    base: BaseRepository,
}

impl BookingRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a new booking
    pub async fn create(&self, booking: Booking) -> RepoResult<Booking> {
        let created: Option<Booking> = self.base.db().create(TABLE).content(booking).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create booking".to_string()))
    }

    /// Find booking by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Booking>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let booking: Option<Booking> = self.base.db().select(thing).await?;
        Ok(booking)
    }

    /// All blocking bookings on a date that touch any of the given resources.
    ///
    /// 只有 pending/confirmed 占用资源；cancelled/completed 不阻塞。
    pub async fn find_blocking_for_resources(
        &self,
        date: &str,
        resource_ids: &[String],
    ) -> RepoResult<Vec<Booking>> {
        let bookings: Vec<Booking> = self
            .base
            .db()
            .query(
                "SELECT * FROM booking \
                 WHERE date = $date \
                   AND status IN ['pending', 'confirmed'] \
                   AND resource_ids CONTAINSANY $scope",
            )
            .bind(("date", date.to_string()))
            .bind(("scope", resource_ids.to_vec()))
            .await?
            .take(0)?;
        Ok(bookings)
    }

    /// All blocking bookings on a date (availability grid)
    pub async fn find_blocking_for_date(&self, date: &str) -> RepoResult<Vec<Booking>> {
        let bookings: Vec<Booking> = self
            .base
            .db()
            .query(
                "SELECT * FROM booking \
                 WHERE date = $date AND status IN ['pending', 'confirmed']",
            )
            .bind(("date", date.to_string()))
            .await?
            .take(0)?;
        Ok(bookings)
    }

    /// All bookings carrying a gateway payment reference
    pub async fn find_by_payment_ref(&self, payment_ref: &str) -> RepoResult<Vec<Booking>> {
        let bookings: Vec<Booking> = self
            .base
            .db()
            .query("SELECT * FROM booking WHERE payment_ref = $ref")
            .bind(("ref", payment_ref.to_string()))
            .await?
            .take(0)?;
        Ok(bookings)
    }

    /// Filtered listing, newest first
    pub async fn list(&self, filter: &BookingFilter) -> RepoResult<Vec<Booking>> {
        let mut conditions: Vec<&str> = Vec::new();
        if filter.date.is_some() {
            conditions.push("date = $date");
        }
        if filter.status.is_some() {
            conditions.push("status = $status");
        }
        if filter.service_type.is_some() {
            conditions.push("service_type = $service_type");
        }
        if filter.customer_email.is_some() {
            conditions.push("customer_email = $email");
        }

        let mut sql = String::from("SELECT * FROM booking");
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = self.base.db().query(sql);
        if let Some(date) = &filter.date {
            query = query.bind(("date", date.clone()));
        }
        if let Some(status) = &filter.status {
            query = query.bind(("status", status.as_str().to_string()));
        }
        if let Some(st) = &filter.service_type {
            query = query.bind(("service_type", st.as_str().to_string()));
        }
        if let Some(email) = &filter.customer_email {
            query = query.bind(("email", email.clone()));
        }

        let bookings: Vec<Booking> = query.await?.take(0)?;
        Ok(bookings)
    }

    /// Set the lifecycle status
    pub async fn update_status(&self, id: &str, status: BookingStatus) -> RepoResult<Booking> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query("UPDATE $thing SET status = $status, updated_at = $now")
            .bind(("thing", thing))
            .bind(("status", status.as_str().to_string()))
            .bind(("now", shared::util::now_millis()))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Booking {} not found", id)))
    }

    /// Record the payment outcome and gateway reference
    pub async fn update_payment(
        &self,
        id: &str,
        payment_status: PaymentStatus,
        payment_ref: Option<String>,
    ) -> RepoResult<Booking> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query(
                "UPDATE $thing SET payment_status = $payment_status, \
                 payment_ref = $payment_ref, updated_at = $now",
            )
            .bind(("thing", thing))
            .bind(("payment_status", payment_status.as_str().to_string()))
            .bind(("payment_ref", payment_ref))
            .bind(("now", shared::util::now_millis()))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Booking {} not found", id)))
    }

    /// Staff-side edits to contact details and notes
    pub async fn update_details(&self, id: &str, data: BookingUpdate) -> RepoResult<Booking> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Booking {} not found", id)))?;

        let customer_name = data.customer_name.unwrap_or(existing.customer_name);
        let customer_email = data.customer_email.unwrap_or(existing.customer_email);
        let customer_phone = data.customer_phone.or(existing.customer_phone);
        let notes = data.notes.or(existing.notes);

        self.base
            .db()
            .query(
                "UPDATE $thing SET customer_name = $name, customer_email = $email, \
                 customer_phone = $phone, notes = $notes, updated_at = $now",
            )
            .bind(("thing", thing))
            .bind(("name", customer_name))
            .bind(("email", customer_email))
            .bind(("phone", customer_phone))
            .bind(("notes", notes))
            .bind(("now", shared::util::now_millis()))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Booking {} not found", id)))
    }

    /// Bookings in a closed date range (reports)
    pub async fn find_in_date_range(&self, from: &str, to: &str) -> RepoResult<Vec<Booking>> {
        let bookings: Vec<Booking> = self
            .base
            .db()
            .query("SELECT * FROM booking WHERE date >= $from AND date <= $to ORDER BY date")
            .bind(("from", from.to_string()))
            .bind(("to", to.to_string()))
            .await?
            .take(0)?;
        Ok(bookings)
    }
}
