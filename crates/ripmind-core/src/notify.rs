//! Notification collaborator for live letters.
//!
//! A live letter that carries a phone number is forwarded to an external
//! endpoint (the SMS relay). The flow spawns the call and only logs the result.

use futures::future::BoxFuture;
use reqwest::Client;
use serde::Serialize;

use crate::error::NotifyError;
use crate::types::LetterRecord;

/// Request body sent to the notification endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotifyRequest {
    /// Contact number to notify
    pub phone: String,
    /// Letter body
    pub message: String,
    /// Display name of the writer
    pub nickname: String,
}

impl NotifyRequest {
    /// Build a request for a letter. `None` if the letter has no phone.
    pub fn from_record(record: &LetterRecord) -> Option<Self> {
        let phone = record.phone.clone()?;
        Some(Self {
            phone,
            message: record.content.clone(),
            nickname: record.nickname.clone(),
        })
    }
}

/// Something that can deliver a live letter.
pub trait Notifier: Send + Sync {
    fn notify(&self, request: NotifyRequest) -> BoxFuture<'static, Result<(), NotifyError>>;
}

/// Posts the request as JSON to an HTTP endpoint.
///
/// No timeout and no retry.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    client: Client,
    endpoint: String,
}

impl HttpNotifier {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Notifier for HttpNotifier {
    fn notify(&self, request: NotifyRequest) -> BoxFuture<'static, Result<(), NotifyError>> {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();

        Box::pin(async move {
            let response = client.post(&endpoint).json(&request).send().await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(NotifyError::Status {
                    status: status.as_u16(),
                    body,
                });
            }
            Ok(())
        })
    }
}

/// Accepts every letter and does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _request: NotifyRequest) -> BoxFuture<'static, Result<(), NotifyError>> {
        Box::pin(async { Ok(()) })
    }
}
