//! Notification dispatch — fire-and-forget booking emails
//!
//! 预订操作把渲染好的邮件丢进有界队列就返回；worker 异步发送，
//! 失败重试，重试耗尽只记日志 (dead letter)。邮件永远不会让预订失败。

pub mod mailer;

pub use mailer::{Email, MailClient};

use shared::error::ErrorCode;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::db::models::Booking;

/// Booking lifecycle moments that trigger an email
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyEvent {
    /// Booking created, awaiting payment
    Received,
    /// Booking confirmed (payment settled or zero-price)
    Confirmed,
    /// Booking cancelled
    Cancelled,
}

/// Cheap clonable handle for enqueueing notifications
#[derive(Clone)]
pub struct Notifier {
    tx: mpsc::Sender<Email>,
}

impl Notifier {
    /// Create the queue; the returned receiver feeds [`dispatch_loop`],
    /// which the caller spawns as a background worker.
    pub fn channel(queue_size: usize) -> (Self, mpsc::Receiver<Email>) {
        let (tx, rx) = mpsc::channel(queue_size);
        (Self { tx }, rx)
    }

    /// Enqueue a booking email. Never blocks and never fails the caller:
    /// a full queue is logged and the email dropped.
    pub fn booking_event(&self, event: NotifyEvent, booking: &Booking, venue_name: &str) {
        let email = render_booking_email(event, booking, venue_name);
        if let Err(e) = self.tx.try_send(email) {
            tracing::warn!(
                code = %ErrorCode::NotifyQueueFull,
                error = %e,
                "Notification queue full, dropping email"
            );
        }
    }
}

/// Worker loop: drain the queue, send with capped exponential retries.
pub async fn dispatch_loop(
    mut rx: mpsc::Receiver<Email>,
    mailer: MailClient,
    max_attempts: u32,
    shutdown: CancellationToken,
) {
    loop {
        let email = tokio::select! {
            _ = shutdown.cancelled() => break,
            msg = rx.recv() => match msg {
                Some(email) => email,
                None => break,
            },
        };

        let mut attempt = 0;
        loop {
            attempt += 1;
            match mailer.send(&email).await {
                Ok(()) => {
                    tracing::debug!(to = %email.to, "Email dispatched");
                    break;
                }
                Err(e) if attempt < max_attempts => {
                    tracing::warn!(to = %email.to, attempt, error = %e, "Mail send failed, retrying");
                    tokio::time::sleep(std::time::Duration::from_secs(2u64.pow(attempt))).await;
                }
                Err(e) => {
                    // dead letter: 只记日志，不再重试
                    tracing::error!(
                        code = %ErrorCode::MailDispatchFailed,
                        to = %email.to,
                        subject = %email.subject,
                        error = %e,
                        "Mail send failed after {} attempts, dropping",
                        attempt
                    );
                    break;
                }
            }
        }
    }
    tracing::info!("Notification worker stopped");
}

/// Render the customer-facing email for a booking event
pub fn render_booking_email(event: NotifyEvent, booking: &Booking, venue_name: &str) -> Email {
    let end_hour = booking.start_hour + booking.duration_hours;
    let window = format!(
        "{} {:02}:00-{:02}:00",
        booking.date, booking.start_hour, end_hour
    );

    let (subject, lead) = match event {
        NotifyEvent::Received => (
            format!("{venue_name}: booking request received"),
            "We have received your booking request. It will be confirmed once payment completes.",
        ),
        NotifyEvent::Confirmed => (
            format!("{venue_name}: booking confirmed"),
            "Your booking is confirmed. See you soon!",
        ),
        NotifyEvent::Cancelled => (
            format!("{venue_name}: booking cancelled"),
            "Your booking has been cancelled.",
        ),
    };

    let body = format!(
        "Hello {name},\n\n{lead}\n\n\
         Service: {service}\n\
         When: {window}\n\
         Resources: {resources}\n\
         Total: {price}\n\n\
         {venue_name}",
        name = booking.customer_name,
        service = booking.service_type,
        resources = booking.resource_ids.join(", "),
        price = booking.price,
    );

    Email {
        to: booking.customer_email.clone(),
        subject,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::booking::{BookingStatus, PaymentStatus, ServiceType};

    fn sample_booking() -> Booking {
        Booking {
            id: None,
            service_type: ServiceType::Karaoke,
            resource_ids: vec!["room:sala1".into()],
            date: "2025-06-15".into(),
            start_hour: 14,
            duration_hours: 2,
            start_ms: 0,
            end_ms: 0,
            customer_name: "Ana".into(),
            customer_email: "ana@example.com".into(),
            customer_phone: None,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            payment_ref: None,
            price: Decimal::new(60, 0),
            notes: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_render_confirmed_email() {
        let email = render_booking_email(NotifyEvent::Confirmed, &sample_booking(), "Pavilion");
        assert_eq!(email.to, "ana@example.com");
        assert!(email.subject.contains("confirmed"));
        assert!(email.body.contains("2025-06-15 14:00-16:00"));
        assert!(email.body.contains("room:sala1"));
        assert!(email.body.contains("60"));
    }

    #[test]
    fn test_render_received_email_mentions_payment() {
        let email = render_booking_email(NotifyEvent::Received, &sample_booking(), "Pavilion");
        assert!(email.body.contains("payment"));
    }
}
