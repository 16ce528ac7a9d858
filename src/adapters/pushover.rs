use crate::adapters::{build_client, endpoint_url};
use crate::domain::ports::Notifier;
use crate::utils::error::{AlertError, Result};
use async_trait::async_trait;
use reqwest::Client;

pub const PUSHOVER_URL: &str = "https://api.pushover.net";

#[derive(Debug, Clone)]
pub struct PushoverCredentials {
    pub user: String,
    pub token: String,
}

/// Push notifications through the Pushover messages API.
pub struct PushoverNotifier {
    client: Client,
    base_url: String,
    credentials: PushoverCredentials,
}

impl PushoverNotifier {
    pub fn new(base_url: impl Into<String>, credentials: PushoverCredentials) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            base_url: base_url.into(),
            credentials,
        })
    }
}

#[async_trait]
impl Notifier for PushoverNotifier {
    async fn notify(&self, title: &str, message: &str) -> Result<()> {
        let url = endpoint_url(&self.base_url, &["1", "messages.json"])?;

        let response = self
            .client
            .post(url)
            .form(&[
                ("token", self.credentials.token.as_str()),
                ("user", self.credentials.user.as_str()),
                ("title", title),
                ("message", message),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AlertError::NotificationError {
                message: format!("Pushover returned {}: {}", status, body.trim()),
            });
        }

        tracing::debug!("Pushover accepted notification '{}'", title);
        Ok(())
    }
}

/// Writes alerts to the log only. Used when no push credentials are configured.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, title: &str, message: &str) -> Result<()> {
        tracing::warn!("🔕 {} (push disabled):\n{}", title, message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn credentials() -> PushoverCredentials {
        PushoverCredentials {
            user: "u123".to_string(),
            token: "t456".to_string(),
        }
    }

    #[tokio::test]
    async fn test_notify_posts_form() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/1/messages.json")
                .body_contains("token=t456")
                .body_contains("user=u123")
                .body_contains("title=Aircraft+Alert");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"status": 1, "request": "abc"}));
        });

        let notifier = PushoverNotifier::new(server.base_url(), credentials()).unwrap();
        notifier.notify("Aircraft Alert", "hello").await.unwrap();

        api_mock.assert();
    }

    #[tokio::test]
    async fn test_notify_rejected() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/1/messages.json");
            then.status(400)
                .json_body(serde_json::json!({"user": "invalid", "status": 0}));
        });

        let notifier = PushoverNotifier::new(server.base_url(), credentials()).unwrap();
        let err = notifier.notify("Aircraft Alert", "hello").await.unwrap_err();

        assert!(matches!(err, AlertError::NotificationError { .. }));
        assert!(err.to_string().contains("400"));
    }

    #[tokio::test]
    async fn test_log_notifier_always_succeeds() {
        assert!(LogNotifier.notify("Aircraft Alert", "hello").await.is_ok());
    }
}
