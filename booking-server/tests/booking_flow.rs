//! Booking lifecycle integration tests
//! Run: cargo test -p booking-server --test booking_flow

use booking_server::bookings::BookingManager;
use booking_server::db::DbService;
use booking_server::db::models::{BookingCreate, Chair, LayoutUpdate, RoomCreate};
use booking_server::db::repository::{LayoutRepository, RoomRepository};
use booking_server::notify::{Email, Notifier};
use rust_decimal::Decimal;
use shared::booking::{BookingStatus, PaymentStatus, ServiceType};
use shared::error::ErrorCode;
use tokio::sync::mpsc;

struct TestCtx {
    _tmp: tempfile::TempDir,
    db: DbService,
    manager: BookingManager,
    _rx: mpsc::Receiver<Email>,
}

async fn setup() -> TestCtx {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("test.db");
    let db = DbService::new(&db_path.to_string_lossy()).await.unwrap();
    let (notifier, rx) = Notifier::channel(64);
    let manager = BookingManager::new(&db, notifier);
    TestCtx {
        _tmp: tmp,
        db,
        manager,
        _rx: rx,
    }
}

async fn seed_karaoke_room(db: &DbService, name: &str, rate: i64) -> String {
    let room = RoomRepository::new(db.db.clone())
        .create(RoomCreate {
            name: name.to_string(),
            service_type: ServiceType::Karaoke,
            capacity: 8,
            hourly_rate: Decimal::new(rate, 0),
            description: None,
        })
        .await
        .unwrap();
    room.resource_id().unwrap()
}

fn karaoke_request(resource_ids: Vec<String>, start_hour: u32, duration_hours: u32) -> BookingCreate {
    BookingCreate {
        service_type: ServiceType::Karaoke,
        resource_ids,
        date: "2026-09-10".to_string(),
        start_hour,
        duration_hours,
        customer_name: "Ana García".to_string(),
        customer_email: "ana@example.com".to_string(),
        customer_phone: Some("+34600111222".to_string()),
        notes: None,
        payment_status: None,
        payment_ref: None,
    }
}

#[tokio::test]
async fn create_booking_computes_price_and_window() {
    let ctx = setup().await;
    let room = seed_karaoke_room(&ctx.db, "Sala 1", 30).await;

    let booking = ctx
        .manager
        .create(karaoke_request(vec![room.clone()], 14, 2))
        .await
        .unwrap();

    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.payment_status, PaymentStatus::Unpaid);
    assert_eq!(booking.price, Decimal::new(60, 0));
    assert_eq!(booking.resource_ids, vec![room]);
    // 两小时窗口，毫秒精确
    assert_eq!(booking.end_ms - booking.start_ms, 2 * 3600 * 1000);
    assert!(booking.id.is_some());
}

#[tokio::test]
async fn overlapping_booking_is_rejected() {
    let ctx = setup().await;
    let room = seed_karaoke_room(&ctx.db, "Sala 1", 30).await;

    ctx.manager
        .create(karaoke_request(vec![room.clone()], 14, 2))
        .await
        .unwrap();

    // 15:00-17:00 overlaps 14:00-16:00
    let err = ctx
        .manager
        .create(karaoke_request(vec![room.clone()], 15, 2))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::BookingConflict);
}

#[tokio::test]
async fn adjacent_booking_is_allowed() {
    let ctx = setup().await;
    let room = seed_karaoke_room(&ctx.db, "Sala 1", 30).await;

    ctx.manager
        .create(karaoke_request(vec![room.clone()], 14, 2))
        .await
        .unwrap();

    // 16:00 starts exactly when the first ends — no conflict
    let second = ctx
        .manager
        .create(karaoke_request(vec![room], 16, 2))
        .await
        .unwrap();
    assert_eq!(second.status, BookingStatus::Pending);
}

#[tokio::test]
async fn multi_room_booking_sums_rates() {
    let ctx = setup().await;
    let room1 = seed_karaoke_room(&ctx.db, "Sala 1", 30).await;
    let room2 = seed_karaoke_room(&ctx.db, "Sala 2", 30).await;

    let booking = ctx
        .manager
        .create(karaoke_request(vec![room1, room2], 14, 2))
        .await
        .unwrap();
    assert_eq!(booking.price, Decimal::new(120, 0));
}

#[tokio::test]
async fn cancelled_booking_frees_the_resource() {
    let ctx = setup().await;
    let room = seed_karaoke_room(&ctx.db, "Sala 1", 30).await;

    let booking = ctx
        .manager
        .create(karaoke_request(vec![room.clone()], 14, 2))
        .await
        .unwrap();
    let id = booking.id.unwrap().to_string();

    ctx.manager
        .update_status(&id, BookingStatus::Cancelled)
        .await
        .unwrap();

    // Same window again, now free
    let rebooked = ctx
        .manager
        .create(karaoke_request(vec![room], 14, 2))
        .await
        .unwrap();
    assert_eq!(rebooked.status, BookingStatus::Pending);
}

#[tokio::test]
async fn cafe_chairs_price_per_chair() {
    let ctx = setup().await;
    let layout_repo = LayoutRepository::new(ctx.db.db.clone());
    layout_repo
        .update(LayoutUpdate {
            chairs: Some(vec![
                Chair {
                    id: "c01".to_string(),
                    label: "Window 1".to_string(),
                },
                Chair {
                    id: "c02".to_string(),
                    label: "Window 2".to_string(),
                },
                Chair {
                    id: "c03".to_string(),
                    label: "Bar 1".to_string(),
                },
            ]),
            hourly_rate: Some(Decimal::new(250, 2)),
        })
        .await
        .unwrap();

    let booking = ctx
        .manager
        .create(BookingCreate {
            service_type: ServiceType::Cafe,
            resource_ids: vec!["c01".to_string(), "c02".to_string(), "c03".to_string()],
            date: "2026-09-10".to_string(),
            start_hour: 10,
            duration_hours: 4,
            customer_name: "Marc".to_string(),
            customer_email: "marc@example.com".to_string(),
            customer_phone: None,
            notes: None,
            payment_status: None,
            payment_ref: None,
        })
        .await
        .unwrap();

    // 3 chairs × 2.50 × 4h = 30
    assert_eq!(booking.price, Decimal::new(30, 0));
    assert_eq!(
        booking.resource_ids,
        vec!["chair:c01", "chair:c02", "chair:c03"]
    );
}

#[tokio::test]
async fn zero_price_booking_is_auto_confirmed() {
    let ctx = setup().await;
    let layout_repo = LayoutRepository::new(ctx.db.db.clone());
    // default layout rate is zero
    layout_repo
        .update(LayoutUpdate {
            chairs: Some(vec![Chair {
                id: "c01".to_string(),
                label: "Window 1".to_string(),
            }]),
            hourly_rate: None,
        })
        .await
        .unwrap();

    let booking = ctx
        .manager
        .create(BookingCreate {
            service_type: ServiceType::Cafe,
            resource_ids: vec!["c01".to_string()],
            date: "2026-09-10".to_string(),
            start_hour: 12,
            duration_hours: 1,
            customer_name: "Marc".to_string(),
            customer_email: "marc@example.com".to_string(),
            customer_phone: None,
            notes: None,
            payment_status: None,
            payment_ref: None,
        })
        .await
        .unwrap();

    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert!(booking.price.is_zero());
}

#[tokio::test]
async fn prepaid_booking_is_created_confirmed() {
    let ctx = setup().await;
    let room = seed_karaoke_room(&ctx.db, "Sala 1", 30).await;

    // 支付先行的流程：创建时已带成功的支付状态
    let mut req = karaoke_request(vec![room.clone()], 14, 2);
    req.payment_status = Some(PaymentStatus::Succeeded);
    req.payment_ref = Some("pay_pre_1".to_string());
    let booking = ctx.manager.create(req).await.unwrap();

    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert_eq!(booking.payment_status, PaymentStatus::Succeeded);
    assert_eq!(booking.payment_ref.as_deref(), Some("pay_pre_1"));

    // A failed upstream payment does not confirm anything
    let mut req = karaoke_request(vec![room], 17, 2);
    req.payment_status = Some(PaymentStatus::Failed);
    let booking = ctx.manager.create(req).await.unwrap();
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.payment_status, PaymentStatus::Failed);
}

#[tokio::test]
async fn duration_bounds_are_enforced() {
    let ctx = setup().await;
    let room = seed_karaoke_room(&ctx.db, "Sala 1", 30).await;

    // default settings: 1-8 hours
    let err = ctx
        .manager
        .create(karaoke_request(vec![room.clone()], 10, 9))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::DurationOutOfRange);

    let err = ctx
        .manager
        .create(karaoke_request(vec![room], 10, 0))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::DurationOutOfRange);
}

#[tokio::test]
async fn opening_hours_are_enforced() {
    let ctx = setup().await;
    let room = seed_karaoke_room(&ctx.db, "Sala 1", 30).await;

    // default settings: open 10:00-24:00
    let err = ctx
        .manager
        .create(karaoke_request(vec![room.clone()], 8, 2))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OutsideOpeningHours);

    // 23:00 + 2h runs past closing
    let err = ctx
        .manager
        .create(karaoke_request(vec![room], 23, 2))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OutsideOpeningHours);
}

#[tokio::test]
async fn absurd_start_hour_is_rejected() {
    let ctx = setup().await;
    let room = seed_karaoke_room(&ctx.db, "Sala 1", 30).await;

    // 溢出级别的 start_hour 只能得到校验错误，不能 panic
    let err = ctx
        .manager
        .create(karaoke_request(vec![room.clone()], u32::MAX, 1))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OutsideOpeningHours);

    let err = ctx
        .manager
        .create(karaoke_request(vec![room], 24, 1))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OutsideOpeningHours);
}

#[tokio::test]
async fn unknown_resources_are_rejected() {
    let ctx = setup().await;

    let err = ctx
        .manager
        .create(karaoke_request(vec!["room:nope".to_string()], 14, 2))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::RoomNotFound);

    let err = ctx
        .manager
        .create(BookingCreate {
            service_type: ServiceType::Cafe,
            resource_ids: vec!["c99".to_string()],
            date: "2026-09-10".to_string(),
            start_hour: 12,
            duration_hours: 1,
            customer_name: "Marc".to_string(),
            customer_email: "marc@example.com".to_string(),
            customer_phone: None,
            notes: None,
            payment_status: None,
            payment_ref: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ChairNotInLayout);
}

#[tokio::test]
async fn empty_and_duplicate_selections_are_rejected() {
    let ctx = setup().await;
    let room = seed_karaoke_room(&ctx.db, "Sala 1", 30).await;

    let err = ctx
        .manager
        .create(karaoke_request(vec![], 14, 2))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::EmptyResourceSelection);

    let err = ctx
        .manager
        .create(karaoke_request(vec![room.clone(), room], 14, 2))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);
}

#[tokio::test]
async fn inactive_room_is_not_bookable() {
    let ctx = setup().await;
    let room = seed_karaoke_room(&ctx.db, "Sala 1", 30).await;

    let room_repo = RoomRepository::new(ctx.db.db.clone());
    room_repo
        .update(
            &room,
            booking_server::db::models::RoomUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let err = ctx
        .manager
        .create(karaoke_request(vec![room], 14, 2))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::RoomInactive);
}

#[tokio::test]
async fn illegal_status_transitions_are_rejected() {
    let ctx = setup().await;
    let room = seed_karaoke_room(&ctx.db, "Sala 1", 30).await;

    let booking = ctx
        .manager
        .create(karaoke_request(vec![room], 14, 2))
        .await
        .unwrap();
    let id = booking.id.unwrap().to_string();

    // pending → completed skips confirmation
    let err = ctx
        .manager
        .update_status(&id, BookingStatus::Completed)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidStatusTransition);

    // cancelled is terminal
    ctx.manager
        .update_status(&id, BookingStatus::Cancelled)
        .await
        .unwrap();
    let err = ctx
        .manager
        .update_status(&id, BookingStatus::Confirmed)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_for_one_resource_yield_one_booking() {
    let ctx = setup().await;
    let room = seed_karaoke_room(&ctx.db, "Sala 1", 30).await;

    let m1 = ctx.manager.clone();
    let m2 = ctx.manager.clone();
    let req1 = karaoke_request(vec![room.clone()], 14, 2);
    let req2 = karaoke_request(vec![room], 15, 2);

    let (r1, r2) = tokio::join!(m1.create(req1), m2.create(req2));

    // 每个资源一把锁，check/insert 串行化：恰好一个成功
    let successes = [r1.is_ok(), r2.is_ok()].iter().filter(|&&ok| ok).count();
    assert_eq!(successes, 1);
    let err = if r1.is_err() {
        r1.unwrap_err()
    } else {
        r2.unwrap_err()
    };
    assert_eq!(err.code, ErrorCode::BookingConflict);
}
