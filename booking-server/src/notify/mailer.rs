//! Mail transport — HTTP mail API client
//!
//! 发信走 HTTP mail API (Mailgun 风格的 JSON POST)。未配置 api_url 时
//! 降级为 log-only 模式，开发环境不需要真实邮件服务。

use serde::Serialize;
use shared::error::{AppError, ErrorCode};

use crate::utils::AppResult;

/// A rendered email ready for dispatch
#[derive(Debug, Clone, Serialize)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Clone)]
pub struct MailClient {
    client: reqwest::Client,
    api_url: Option<String>,
    api_key: String,
    from: String,
}

#[derive(Serialize)]
struct MailPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl MailClient {
    pub fn new(api_url: Option<String>, api_key: String, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            from,
        }
    }

    /// Dispatch one email. Errors are for the worker's retry loop only,
    /// they never reach booking callers.
    pub async fn send(&self, email: &Email) -> AppResult<()> {
        let Some(api_url) = &self.api_url else {
            tracing::info!(to = %email.to, subject = %email.subject, "Mail (log-only mode)");
            return Ok(());
        };

        let payload = MailPayload {
            from: &self.from,
            to: &email.to,
            subject: &email.subject,
            text: &email.body,
        };

        let response = self
            .client
            .post(api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                AppError::with_message(
                    ErrorCode::MailDispatchFailed,
                    format!("Mail API unreachable: {e}"),
                )
            })?;

        if !response.status().is_success() {
            return Err(AppError::with_message(
                ErrorCode::MailDispatchFailed,
                format!("Mail API returned {}", response.status()),
            ));
        }
        Ok(())
    }
}
