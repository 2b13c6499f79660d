//! Booking Manager
//!
//! 预订生命周期的唯一入口。创建流程在每个资源的异步锁内完成
//! 可用性检查 + 落库，并发请求同一资源时串行化，杜绝 check/insert
//! 之间的竞态窗口。

use std::sync::Arc;

use dashmap::DashMap;
use rust_decimal::Decimal;
use shared::booking::{BookingStatus, PaymentStatus};
use shared::error::{AppError, ErrorCode};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::availability::AvailabilityChecker;
use crate::db::DbService;
use crate::db::models::{Booking, BookingCreate, BookingUpdate, CafeLayout, UserUpsert};
use crate::db::repository::booking::BookingFilter;
use crate::db::repository::{
    BookingRepository, LayoutRepository, RoomRepository, SettingsRepository, UserRepository,
};
use crate::notify::{Notifier, NotifyEvent};
use crate::utils::validation::{
    MAX_CUSTOMER_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppResult, time};

use super::pricing;

#[derive(Clone)]
pub struct BookingManager {
    bookings: BookingRepository,
    rooms: RoomRepository,
    layout: LayoutRepository,
    settings: SettingsRepository,
    users: UserRepository,
    checker: AvailabilityChecker,
    notifier: Notifier,
    /// Per-resource serialization locks, keyed by storage resource id
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl BookingManager {
    pub fn new(db: &DbService, notifier: Notifier) -> Self {
        Self {
            bookings: BookingRepository::new(db.db.clone()),
            rooms: RoomRepository::new(db.db.clone()),
            layout: LayoutRepository::new(db.db.clone()),
            settings: SettingsRepository::new(db.db.clone()),
            users: UserRepository::new(db.db.clone()),
            checker: AvailabilityChecker::new(db),
            notifier,
            locks: Arc::new(DashMap::new()),
        }
    }

    /// Create a booking from a public request.
    ///
    /// Zero-price bookings and bookings whose payment already settled
    /// upstream come back `confirmed`; everything else starts `pending`.
    pub async fn create(&self, req: BookingCreate) -> AppResult<Booking> {
        validate_required_text(&req.customer_name, "customer_name", MAX_CUSTOMER_NAME_LEN)?;
        validate_email(&req.customer_email, "customer_email")?;
        validate_optional_text(&req.customer_phone, "customer_phone", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&req.notes, "notes", crate::utils::validation::MAX_NAME_LEN)?;
        validate_optional_text(&req.payment_ref, "payment_ref", MAX_SHORT_TEXT_LEN)?;

        if req.resource_ids.is_empty() {
            return Err(AppError::new(ErrorCode::EmptyResourceSelection));
        }
        let mut seen = std::collections::HashSet::new();
        for rid in &req.resource_ids {
            if !seen.insert(rid.as_str()) {
                return Err(AppError::validation(format!(
                    "Duplicate resource '{rid}' in selection"
                )));
            }
        }

        let settings = self.settings.get_or_default().await?;
        let tz: chrono_tz::Tz = settings
            .timezone
            .parse()
            .map_err(|_| AppError::with_message(ErrorCode::ConfigError, "Invalid venue timezone"))?;

        if req.duration_hours < settings.min_duration_hours
            || req.duration_hours > settings.max_duration_hours
        {
            return Err(AppError::with_message(
                ErrorCode::DurationOutOfRange,
                format!(
                    "Duration must be between {} and {} hours",
                    settings.min_duration_hours, settings.max_duration_hours
                ),
            ));
        }

        // start_hour 来自请求体，先约束再做加法
        if req.start_hour >= 24 {
            return Err(AppError::with_message(
                ErrorCode::OutsideOpeningHours,
                format!("Invalid start hour: {}", req.start_hour),
            ));
        }
        let end_hour = req
            .start_hour
            .checked_add(req.duration_hours)
            .ok_or_else(|| AppError::new(ErrorCode::DurationOutOfRange))?;
        if req.start_hour < settings.opening_hour || end_hour > settings.closing_hour {
            return Err(AppError::with_message(
                ErrorCode::OutsideOpeningHours,
                format!(
                    "Venue is open {:02}:00-{:02}:00",
                    settings.opening_hour, settings.closing_hour
                ),
            ));
        }

        let date = time::parse_date(&req.date)?;
        let (start_ms, end_ms) =
            time::booking_window_millis(date, req.start_hour, req.duration_hours, tz)?;

        // 解析资源并取费率；storage_ids 是落库用的 "room:x"/"chair:x" 形式
        let (storage_ids, rates) = self.resolve_resources(&req).await?;

        // Per-resource locks, sorted to avoid lock-order inversion
        let _guards = self.acquire_locks(&storage_ids).await;

        let conflicts = self
            .checker
            .find_conflicts(&req.date, start_ms, end_ms, &storage_ids)
            .await?;
        if !conflicts.is_empty() {
            return Err(AppError::booking_conflict(conflicts));
        }

        let price = pricing::window_price(&rates, req.duration_hours);
        let payment_status = req.payment_status.unwrap_or_default();
        let status = if price.is_zero() || payment_status.is_success() {
            BookingStatus::Confirmed
        } else {
            BookingStatus::Pending
        };

        let now = shared::util::now_millis();
        let booking = Booking {
            id: None,
            service_type: req.service_type,
            resource_ids: storage_ids,
            date: req.date,
            start_hour: req.start_hour,
            duration_hours: req.duration_hours,
            start_ms,
            end_ms,
            customer_name: req.customer_name,
            customer_email: req.customer_email,
            customer_phone: req.customer_phone,
            status,
            payment_status,
            payment_ref: req.payment_ref,
            price,
            notes: req.notes,
            created_at: now,
            updated_at: now,
        };

        let created = self.bookings.create(booking).await?;

        self.users
            .record_booking(UserUpsert {
                email: created.customer_email.clone(),
                name: created.customer_name.clone(),
                phone: created.customer_phone.clone(),
            })
            .await?;

        let event = if status == BookingStatus::Confirmed {
            NotifyEvent::Confirmed
        } else {
            NotifyEvent::Received
        };
        self.notifier
            .booking_event(event, &created, &settings.venue_name);

        tracing::info!(
            id = ?created.id,
            status = %created.status,
            price = %created.price,
            "Booking created"
        );
        Ok(created)
    }

    /// Move a booking through the state machine, rejecting illegal
    /// transitions.
    pub async fn update_status(&self, id: &str, next: BookingStatus) -> AppResult<Booking> {
        let booking = self
            .bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound))?;

        if !booking.status.can_transition(next) {
            return Err(AppError::with_message(
                ErrorCode::InvalidStatusTransition,
                format!("Cannot move booking from {} to {}", booking.status, next),
            )
            .with_detail("from", booking.status.as_str())
            .with_detail("to", next.as_str()));
        }

        let updated = self.bookings.update_status(id, next).await?;
        self.notify_status_change(&updated).await;
        Ok(updated)
    }

    /// Apply a payment outcome to every booking carrying `payment_ref`.
    ///
    /// Fan-out：一次支付可能覆盖多个预订 (同一订单多个房间分开下单)。
    /// 不合法的状态转换跳过并告警，不中断其它预订。
    pub async fn apply_payment_result(
        &self,
        payment_ref: &str,
        payment_status: PaymentStatus,
        transition: Option<BookingStatus>,
    ) -> AppResult<Vec<Booking>> {
        let bookings = self.bookings.find_by_payment_ref(payment_ref).await?;
        if bookings.is_empty() {
            tracing::warn!(payment_ref, "Payment event for unknown reference");
            return Ok(Vec::new());
        }

        let mut updated = Vec::with_capacity(bookings.len());
        for booking in bookings {
            let Some(id) = booking.id.as_ref().map(|id| id.to_string()) else {
                continue;
            };

            let mut current = self
                .bookings
                .update_payment(&id, payment_status, Some(payment_ref.to_string()))
                .await?;

            if let Some(next) = transition {
                if current.status.can_transition(next) {
                    current = self.bookings.update_status(&id, next).await?;
                    self.notify_status_change(&current).await;
                } else if current.status != next {
                    tracing::warn!(
                        id = %id,
                        from = %current.status,
                        to = %next,
                        "Skipping illegal transition from payment event"
                    );
                }
            }
            updated.push(current);
        }
        Ok(updated)
    }

    /// Record the gateway reference after initiating payment
    pub async fn attach_payment_ref(&self, id: &str, payment_ref: &str) -> AppResult<Booking> {
        let booking = self
            .bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound))?;
        Ok(self
            .bookings
            .update_payment(id, booking.payment_status, Some(payment_ref.to_string()))
            .await?)
    }

    pub async fn get(&self, id: &str) -> AppResult<Booking> {
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound))
    }

    pub async fn list(&self, filter: &BookingFilter) -> AppResult<Vec<Booking>> {
        Ok(self.bookings.list(filter).await?)
    }

    /// Staff edits to contact details and notes
    pub async fn update_details(&self, id: &str, data: BookingUpdate) -> AppResult<Booking> {
        if let Some(name) = &data.customer_name {
            validate_required_text(name, "customer_name", MAX_CUSTOMER_NAME_LEN)?;
        }
        if let Some(email) = &data.customer_email {
            validate_email(email, "customer_email")?;
        }
        validate_optional_text(&data.customer_phone, "customer_phone", MAX_SHORT_TEXT_LEN)?;
        Ok(self.bookings.update_details(id, data).await?)
    }

    // ==================== internals ====================

    async fn resolve_resources(
        &self,
        req: &BookingCreate,
    ) -> AppResult<(Vec<String>, Vec<Decimal>)> {
        let mut storage_ids = Vec::with_capacity(req.resource_ids.len());
        let mut rates = Vec::with_capacity(req.resource_ids.len());

        if req.service_type.is_room() {
            for rid in &req.resource_ids {
                let room = self
                    .rooms
                    .find_by_id(rid)
                    .await
                    .map_err(|_| {
                        AppError::with_message(
                            ErrorCode::RoomNotFound,
                            format!("Unknown room '{rid}'"),
                        )
                    })?
                    .ok_or_else(|| {
                        AppError::with_message(
                            ErrorCode::RoomNotFound,
                            format!("Unknown room '{rid}'"),
                        )
                    })?;
                if !room.is_active {
                    return Err(AppError::with_message(
                        ErrorCode::RoomInactive,
                        format!("Room '{}' is not bookable", room.name),
                    ));
                }
                if room.service_type != req.service_type {
                    return Err(AppError::validation(format!(
                        "Room '{}' is a {} room, not {}",
                        room.name, room.service_type, req.service_type
                    )));
                }
                storage_ids.push(rid.clone());
                rates.push(room.hourly_rate);
            }
        } else {
            let layout = self.layout.get_or_default().await?;
            for chair_id in &req.resource_ids {
                if !layout.has_chair(chair_id) {
                    return Err(AppError::with_message(
                        ErrorCode::ChairNotInLayout,
                        format!("Unknown chair '{chair_id}'"),
                    ));
                }
                storage_ids.push(CafeLayout::chair_resource_id(chair_id));
                rates.push(layout.hourly_rate);
            }
        }

        Ok((storage_ids, rates))
    }

    async fn acquire_locks(&self, storage_ids: &[String]) -> Vec<OwnedMutexGuard<()>> {
        let mut sorted = storage_ids.to_vec();
        sorted.sort();

        let mut guards = Vec::with_capacity(sorted.len());
        for rid in sorted {
            let lock = self
                .locks
                .entry(rid)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone();
            guards.push(lock.lock_owned().await);
        }
        guards
    }

    async fn notify_status_change(&self, booking: &Booking) {
        let event = match booking.status {
            BookingStatus::Confirmed => NotifyEvent::Confirmed,
            BookingStatus::Cancelled => NotifyEvent::Cancelled,
            _ => return,
        };
        match self.settings.get_or_default().await {
            Ok(settings) => self
                .notifier
                .booking_event(event, booking, &settings.venue_name),
            Err(e) => tracing::warn!(error = %e, "Could not load settings for notification"),
        }
    }
}
