//! Payment attachment and webhook fan-out tests
//! Run: cargo test -p booking-server --test payment_webhook

use booking_server::bookings::BookingManager;
use booking_server::db::DbService;
use booking_server::db::models::{BookingCreate, RoomCreate};
use booking_server::db::repository::RoomRepository;
use booking_server::notify::{Email, Notifier};
use booking_server::payments::{PaymentGateway, PaymentWebhookEvent, WebhookOutcome};
use rust_decimal::Decimal;
use shared::booking::{BookingStatus, PaymentStatus, ServiceType};
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

async fn seed_booking(ctx: &TestCtx, room_name: &str, start_hour: u32) -> String {
    let room = RoomRepository::new(ctx.db.db.clone())
        .create(RoomCreate {
            name: room_name.to_string(),
            service_type: ServiceType::Gaming,
            capacity: 4,
            hourly_rate: Decimal::new(20, 0),
            description: None,
        })
        .await
        .unwrap();

    let booking = ctx
        .manager
        .create(BookingCreate {
            service_type: ServiceType::Gaming,
            resource_ids: vec![room.resource_id().unwrap()],
            date: "2026-09-12".to_string(),
            start_hour,
            duration_hours: 2,
            customer_name: "Leo".to_string(),
            customer_email: "leo@example.com".to_string(),
            customer_phone: None,
            notes: None,
            payment_status: None,
            payment_ref: None,
        })
        .await
        .unwrap();
    booking.id.unwrap().to_string()
}

#[tokio::test]
async fn offline_gateway_issues_local_references() {
    let ctx = setup().await;
    let id = seed_booking(&ctx, "Booth 1", 14).await;
    let booking = ctx.manager.get(&id).await.unwrap();

    let gateway = PaymentGateway::new(None, String::new(), "EUR".to_string());
    let outcome = gateway.create_charge(&booking).await.unwrap();

    assert!(outcome.payment_ref.starts_with("local_"));
    assert!(outcome.checkout_url.is_none());
}

#[tokio::test]
async fn successful_payment_confirms_all_bookings_on_the_reference() {
    let ctx = setup().await;
    // 同一笔支付覆盖两个预订
    let id1 = seed_booking(&ctx, "Booth 1", 14).await;
    let id2 = seed_booking(&ctx, "Booth 2", 14).await;

    ctx.manager.attach_payment_ref(&id1, "pay_001").await.unwrap();
    ctx.manager.attach_payment_ref(&id2, "pay_001").await.unwrap();

    let updated = ctx
        .manager
        .apply_payment_result(
            "pay_001",
            PaymentStatus::Succeeded,
            Some(BookingStatus::Confirmed),
        )
        .await
        .unwrap();

    assert_eq!(updated.len(), 2);
    for id in [&id1, &id2] {
        let booking = ctx.manager.get(id).await.unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.payment_status, PaymentStatus::Succeeded);
        assert_eq!(booking.payment_ref.as_deref(), Some("pay_001"));
    }
}

#[tokio::test]
async fn status_carrying_event_confirms_the_booking() {
    let ctx = setup().await;
    let id = seed_booking(&ctx, "Booth 1", 14).await;
    ctx.manager.attach_payment_ref(&id, "pay_010").await.unwrap();

    // 通用事件名，结果在 status 字段里
    let event = PaymentWebhookEvent {
        event_type: "payment.updated".to_string(),
        payment_ref: "pay_010".to_string(),
        status: Some("succeeded".to_string()),
    };
    let WebhookOutcome::Apply {
        payment_status,
        transition,
    } = event.outcome()
    else {
        panic!("status-carrying event must map to an action");
    };

    let updated = ctx
        .manager
        .apply_payment_result(&event.payment_ref, payment_status, transition)
        .await
        .unwrap();

    assert_eq!(updated.len(), 1);
    let booking = ctx.manager.get(&id).await.unwrap();
    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert_eq!(booking.payment_status, PaymentStatus::Succeeded);
}

#[tokio::test]
async fn failed_payment_cancels_the_booking() {
    let ctx = setup().await;
    let id = seed_booking(&ctx, "Booth 1", 14).await;
    ctx.manager.attach_payment_ref(&id, "pay_002").await.unwrap();

    let event = PaymentWebhookEvent {
        event_type: "payment.failed".to_string(),
        payment_ref: "pay_002".to_string(),
        status: None,
    };
    let WebhookOutcome::Apply {
        payment_status,
        transition,
    } = event.outcome()
    else {
        panic!("failure event must map to an action");
    };

    ctx.manager
        .apply_payment_result(&event.payment_ref, payment_status, transition)
        .await
        .unwrap();

    let booking = ctx.manager.get(&id).await.unwrap();
    assert_eq!(booking.status, BookingStatus::Cancelled);
    assert_eq!(booking.payment_status, PaymentStatus::Failed);
}

#[tokio::test]
async fn refund_cancels_a_confirmed_booking() {
    let ctx = setup().await;
    let id = seed_booking(&ctx, "Booth 1", 14).await;
    ctx.manager.attach_payment_ref(&id, "pay_003").await.unwrap();
    ctx.manager
        .apply_payment_result(
            "pay_003",
            PaymentStatus::Succeeded,
            Some(BookingStatus::Confirmed),
        )
        .await
        .unwrap();

    ctx.manager
        .apply_payment_result(
            "pay_003",
            PaymentStatus::Refunded,
            Some(BookingStatus::Cancelled),
        )
        .await
        .unwrap();

    let booking = ctx.manager.get(&id).await.unwrap();
    assert_eq!(booking.status, BookingStatus::Cancelled);
    assert_eq!(booking.payment_status, PaymentStatus::Refunded);
}

#[tokio::test]
async fn unknown_reference_updates_nothing() {
    let ctx = setup().await;
    let updated = ctx
        .manager
        .apply_payment_result(
            "pay_missing",
            PaymentStatus::Succeeded,
            Some(BookingStatus::Confirmed),
        )
        .await
        .unwrap();
    assert!(updated.is_empty());
}

#[tokio::test]
async fn illegal_transition_from_webhook_is_skipped_not_fatal() {
    let ctx = setup().await;
    let id = seed_booking(&ctx, "Booth 1", 14).await;
    ctx.manager.attach_payment_ref(&id, "pay_004").await.unwrap();

    // Staff cancels before the late success event arrives
    ctx.manager
        .update_status(&id, BookingStatus::Cancelled)
        .await
        .unwrap();

    let updated = ctx
        .manager
        .apply_payment_result(
            "pay_004",
            PaymentStatus::Succeeded,
            Some(BookingStatus::Confirmed),
        )
        .await
        .unwrap();

    // 支付状态记录下来，状态机不动
    assert_eq!(updated.len(), 1);
    let booking = ctx.manager.get(&id).await.unwrap();
    assert_eq!(booking.status, BookingStatus::Cancelled);
    assert_eq!(booking.payment_status, PaymentStatus::Succeeded);
}
