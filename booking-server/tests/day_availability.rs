//! Per-day availability view tests
//! Run: cargo test -p booking-server --test day_availability

use booking_server::availability::AvailabilityChecker;
use booking_server::bookings::BookingManager;
use booking_server::db::DbService;
use booking_server::db::models::{BookingCreate, RoomCreate};
use booking_server::db::repository::RoomRepository;
use booking_server::notify::Notifier;
use rust_decimal::Decimal;
use shared::booking::ServiceType;

#[tokio::test]
async fn busy_slots_show_only_blocking_bookings() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("test.db");
    let db = DbService::new(&db_path.to_string_lossy()).await.unwrap();
    let (notifier, _rx) = Notifier::channel(64);
    let manager = BookingManager::new(&db, notifier);
    let checker = AvailabilityChecker::new(&db);

    let room_repo = RoomRepository::new(db.db.clone());
    let sala1 = room_repo
        .create(RoomCreate {
            name: "Sala 1".to_string(),
            service_type: ServiceType::Karaoke,
            capacity: 8,
            hourly_rate: Decimal::new(30, 0),
            description: None,
        })
        .await
        .unwrap();
    let sala2 = room_repo
        .create(RoomCreate {
            name: "Sala 2".to_string(),
            service_type: ServiceType::Karaoke,
            capacity: 12,
            hourly_rate: Decimal::new(45, 0),
            description: None,
        })
        .await
        .unwrap();

    manager
        .create(BookingCreate {
            service_type: ServiceType::Karaoke,
            resource_ids: vec![sala1.resource_id().unwrap()],
            date: "2026-09-10".to_string(),
            start_hour: 14,
            duration_hours: 2,
            customer_name: "Ana".to_string(),
            customer_email: "ana@example.com".to_string(),
            customer_phone: None,
            notes: None,
            payment_status: None,
            payment_ref: None,
        })
        .await
        .unwrap();

    let day = checker
        .day_availability("2026-09-10", ServiceType::Karaoke)
        .await
        .unwrap();
    assert_eq!(day.len(), 2);

    let busy1 = day
        .iter()
        .find(|r| r.resource_id == sala1.resource_id().unwrap())
        .unwrap();
    assert_eq!(busy1.busy.len(), 1);
    assert_eq!(busy1.busy[0].start_hour, 14);
    assert_eq!(busy1.busy[0].end_hour, 16);

    let busy2 = day
        .iter()
        .find(|r| r.resource_id == sala2.resource_id().unwrap())
        .unwrap();
    assert!(busy2.busy.is_empty());

    // Another date is untouched
    let other_day = checker
        .day_availability("2026-09-11", ServiceType::Karaoke)
        .await
        .unwrap();
    assert!(other_day.iter().all(|r| r.busy.is_empty()));
}

#[tokio::test]
async fn window_check_returns_taken_resources() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("test.db");
    let db = DbService::new(&db_path.to_string_lossy()).await.unwrap();
    let (notifier, _rx) = Notifier::channel(64);
    let manager = BookingManager::new(&db, notifier);
    let checker = AvailabilityChecker::new(&db);

    let room_repo = RoomRepository::new(db.db.clone());
    let sala1 = room_repo
        .create(RoomCreate {
            name: "Sala 1".to_string(),
            service_type: ServiceType::Karaoke,
            capacity: 8,
            hourly_rate: Decimal::new(30, 0),
            description: None,
        })
        .await
        .unwrap();

    let booking = manager
        .create(BookingCreate {
            service_type: ServiceType::Karaoke,
            resource_ids: vec![sala1.resource_id().unwrap()],
            date: "2026-09-10".to_string(),
            start_hour: 14,
            duration_hours: 2,
            customer_name: "Ana".to_string(),
            customer_email: "ana@example.com".to_string(),
            customer_phone: None,
            notes: None,
            payment_status: None,
            payment_ref: None,
        })
        .await
        .unwrap();

    let hour = 3_600_000i64;

    // 15:00-17:00 overlaps the booked 14:00-16:00 window
    let taken = checker
        .unavailable_resources(
            "2026-09-10",
            ServiceType::Karaoke,
            booking.start_ms + hour,
            booking.end_ms + hour,
        )
        .await
        .unwrap();
    assert_eq!(taken, vec![sala1.resource_id().unwrap()]);

    // 16:00-17:00 starts exactly when the booking ends
    let taken = checker
        .unavailable_resources(
            "2026-09-10",
            ServiceType::Karaoke,
            booking.end_ms,
            booking.end_ms + hour,
        )
        .await
        .unwrap();
    assert!(taken.is_empty());
}
