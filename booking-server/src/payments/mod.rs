//! Payment bridge
//!
//! The server never touches card data: it opens a charge at the external
//! processor and reacts to the processor's webhooks.

pub mod gateway;
pub mod webhook;

pub use gateway::{ChargeOutcome, PaymentGateway};
pub use webhook::{PaymentWebhookEvent, WebhookOutcome};
