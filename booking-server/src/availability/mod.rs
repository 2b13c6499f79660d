//! Availability checking
//!
//! 半开区间重叠判断 + 按日可用性查询。
//! A window `[a_start, a_end)` conflicts with `[b_start, b_end)` iff
//! `a_start < b_end && a_end > b_start` — touching endpoints are free.

use serde::Serialize;
use shared::booking::ServiceType;
use shared::error::AppError;

use crate::db::DbService;
use crate::db::models::Booking;
use crate::db::repository::{BookingRepository, LayoutRepository, RoomRepository};
use crate::utils::AppResult;

/// Half-open interval overlap
pub fn overlaps(a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> bool {
    a_start < b_end && a_end > b_start
}

/// One busy window on a resource, in venue-local hours
#[derive(Debug, Clone, Serialize)]
pub struct BusySlot {
    pub start_hour: u32,
    pub end_hour: u32,
}

/// Per-resource availability for one day
#[derive(Debug, Clone, Serialize)]
pub struct ResourceAvailability {
    /// "room:<id>" or "chair:<id>"
    pub resource_id: String,
    pub label: String,
    pub service_type: ServiceType,
    pub busy: Vec<BusySlot>,
}

#[derive(Clone)]
pub struct AvailabilityChecker {
    bookings: BookingRepository,
    rooms: RoomRepository,
    layout: LayoutRepository,
}

impl AvailabilityChecker {
    pub fn new(db: &DbService) -> Self {
        Self {
            bookings: BookingRepository::new(db.db.clone()),
            rooms: RoomRepository::new(db.db.clone()),
            layout: LayoutRepository::new(db.db.clone()),
        }
    }

    /// Resource ids among `resource_ids` already taken in `[start_ms, end_ms)`
    /// on `date`. Empty result means the window is free.
    pub async fn find_conflicts(
        &self,
        date: &str,
        start_ms: i64,
        end_ms: i64,
        resource_ids: &[String],
    ) -> AppResult<Vec<String>> {
        let blocking = self
            .bookings
            .find_blocking_for_resources(date, resource_ids)
            .await?;

        let mut conflicts: Vec<String> = Vec::new();
        for booking in &blocking {
            if !booking.overlaps(start_ms, end_ms) {
                continue;
            }
            for rid in &booking.resource_ids {
                if resource_ids.contains(rid) && !conflicts.contains(rid) {
                    conflicts.push(rid.clone());
                }
            }
        }
        conflicts.sort();
        Ok(conflicts)
    }

    /// Spot check for a proposed window: ids of every resource of the
    /// service type already taken in `[start_ms, end_ms)` on `date`.
    pub async fn unavailable_resources(
        &self,
        date: &str,
        service_type: ServiceType,
        start_ms: i64,
        end_ms: i64,
    ) -> AppResult<Vec<String>> {
        let scope = self.resource_ids_for(service_type).await?;
        self.find_conflicts(date, start_ms, end_ms, &scope).await
    }

    async fn resource_ids_for(&self, service_type: ServiceType) -> AppResult<Vec<String>> {
        if service_type.is_room() {
            let mut ids = Vec::new();
            for room in self.rooms.find_active_by_type(service_type).await? {
                ids.push(
                    room.resource_id()
                        .ok_or_else(|| AppError::database("Room record without id"))?,
                );
            }
            Ok(ids)
        } else {
            let layout = self.layout.get_or_default().await?;
            Ok(layout
                .chairs
                .iter()
                .map(|c| crate::db::models::CafeLayout::chair_resource_id(&c.id))
                .collect())
        }
    }

    /// Day view: every active resource of the service type with its busy
    /// windows, for the public availability endpoint.
    pub async fn day_availability(
        &self,
        date: &str,
        service_type: ServiceType,
    ) -> AppResult<Vec<ResourceAvailability>> {
        let blocking = self.bookings.find_blocking_for_date(date).await?;

        let mut out: Vec<ResourceAvailability> = Vec::new();
        if service_type.is_room() {
            for room in self.rooms.find_active_by_type(service_type).await? {
                let resource_id = room
                    .resource_id()
                    .ok_or_else(|| AppError::database("Room record without id"))?;
                out.push(ResourceAvailability {
                    busy: busy_slots(&blocking, &resource_id),
                    resource_id,
                    label: room.name,
                    service_type,
                });
            }
        } else {
            let layout = self.layout.get_or_default().await?;
            for chair in &layout.chairs {
                let resource_id = crate::db::models::CafeLayout::chair_resource_id(&chair.id);
                out.push(ResourceAvailability {
                    busy: busy_slots(&blocking, &resource_id),
                    resource_id,
                    label: chair.label.clone(),
                    service_type,
                });
            }
        }
        Ok(out)
    }
}

fn busy_slots(blocking: &[Booking], resource_id: &str) -> Vec<BusySlot> {
    let mut slots: Vec<BusySlot> = blocking
        .iter()
        .filter(|b| b.resource_ids.iter().any(|r| r == resource_id))
        .map(|b| BusySlot {
            start_hour: b.start_hour,
            end_hour: b.start_hour + b.duration_hours,
        })
        .collect();
    slots.sort_by_key(|s| s.start_hour);
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_detection() {
        // 14:00-16:00 vs 15:00-17:00 overlap
        assert!(overlaps(14, 16, 15, 17));
        // containment
        assert!(overlaps(14, 18, 15, 16));
        // identical
        assert!(overlaps(14, 16, 14, 16));
        // disjoint
        assert!(!overlaps(10, 12, 14, 16));
    }

    #[test]
    fn test_touching_endpoints_do_not_overlap() {
        // a booking ending at 16:00 does not conflict with one starting at 16:00
        assert!(!overlaps(14, 16, 16, 18));
        assert!(!overlaps(16, 18, 14, 16));
    }
}
