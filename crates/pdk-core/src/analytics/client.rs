//! Reporting backends.
//!
//! [`GoogleAnalytics`] speaks Measurement Protocol v1: one form-encoded POST
//! per screen view, no batching, no retry.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::Params;
use crate::error::AnalyticsError;
use crate::storage::AnalyticsConfig;

const APP_NAME: &str = "pdk";

/// Hit fields owned by the client; params may not override them.
const RESERVED_FIELDS: &[&str] = &["v", "tid", "cid", "t", "an", "av", "cd"];

/// Every reporting backend implements this trait.
/// Implementations are shared across concurrently running report tasks.
#[async_trait]
pub trait AnalyticsClient: Send + Sync {
    /// Report that the screen (command) `name` was viewed.
    async fn screenview(&self, name: &str, params: &Params) -> Result<(), AnalyticsError>;
}

/// Backend used when analytics is opted out or unconfigured.
#[derive(Debug, Default, Clone, Copy)]
pub struct Disabled;

#[async_trait]
impl AnalyticsClient for Disabled {
    async fn screenview(&self, _name: &str, _params: &Params) -> Result<(), AnalyticsError> {
        Ok(())
    }
}

pub struct GoogleAnalytics {
    http: Client,
    endpoint: String,
    tracking_id: String,
    client_id: String,
    app_version: String,
}

impl GoogleAnalytics {
    /// Build a client whose requests give up after `request_timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(
        endpoint: impl Into<String>,
        tracking_id: impl Into<String>,
        client_id: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self, AnalyticsError> {
        let http = Client::builder().timeout(request_timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            tracking_id: tracking_id.into(),
            client_id: client_id.into(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    pub fn with_app_version(mut self, version: impl Into<String>) -> Self {
        self.app_version = version.into();
        self
    }

    fn hit(&self, name: &str, params: &Params) -> Vec<(String, String)> {
        let mut fields: Vec<(String, String)> = vec![
            ("v".into(), "1".into()),
            ("tid".into(), self.tracking_id.clone()),
            ("cid".into(), self.client_id.clone()),
            ("t".into(), "screenview".into()),
            ("an".into(), APP_NAME.into()),
            ("av".into(), self.app_version.clone()),
            ("cd".into(), name.into()),
        ];
        for (key, value) in params {
            if RESERVED_FIELDS.contains(&key.as_str()) {
                tracing::debug!(%key, "Ignoring analytics param that shadows a hit field");
                continue;
            }
            fields.push((key.clone(), value.clone()));
        }
        fields
    }
}

#[async_trait]
impl AnalyticsClient for GoogleAnalytics {
    async fn screenview(&self, name: &str, params: &Params) -> Result<(), AnalyticsError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .form(&self.hit(name, params))
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(AnalyticsError::Rejected {
                status: resp.status().as_u16(),
            })
        }
    }
}

/// Pick the backend described by `config`.
///
/// Falls back to [`Disabled`] when analytics is off, has no tracking id, or
/// the HTTP client cannot be built.
pub fn from_config(config: &AnalyticsConfig, app_version: &str) -> Arc<dyn AnalyticsClient> {
    let tracking_id = match config.tracking_id.as_deref() {
        Some(id) if config.is_enabled() => id,
        _ => {
            tracing::debug!(disabled = config.disabled, "Usage analytics not active");
            return Arc::new(Disabled);
        }
    };

    let client_id = config
        .user_id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    match GoogleAnalytics::new(
        config.endpoint.as_str(),
        tracking_id,
        client_id,
        config.request_timeout(),
    ) {
        Ok(client) => Arc::new(client.with_app_version(app_version)),
        Err(e) => {
            tracing::debug!(error = %e, "Failed to build analytics client");
            Arc::new(Disabled)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard) -> GoogleAnalytics {
        GoogleAnalytics::new(
            format!("{}/collect", server.url()),
            "UA-0000-1",
            "11111111-2222-3333-4444-555555555555",
            Duration::from_secs(2),
        )
        .unwrap()
        .with_app_version("1.2.3")
    }

    #[tokio::test]
    async fn screenview_posts_measurement_protocol_hit() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/collect")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("v".into(), "1".into()),
                Matcher::UrlEncoded("tid".into(), "UA-0000-1".into()),
                Matcher::UrlEncoded(
                    "cid".into(),
                    "11111111-2222-3333-4444-555555555555".into(),
                ),
                Matcher::UrlEncoded("t".into(), "screenview".into()),
                Matcher::UrlEncoded("an".into(), "pdk".into()),
                Matcher::UrlEncoded("av".into(), "1.2.3".into()),
                Matcher::UrlEncoded("cd".into(), "build".into()),
            ]))
            .with_status(200)
            .create_async()
            .await;

        client_for(&server)
            .screenview("build", &Params::new())
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn params_are_sent_but_cannot_shadow_hit_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/collect")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("cd".into(), "fact".into()),
                Matcher::UrlEncoded("cd1".into(), "linux".into()),
            ]))
            .with_status(200)
            .create_async()
            .await;

        let mut params = Params::new();
        params.insert("cd1".into(), "linux".into());
        params.insert("cd".into(), "spoofed".into());

        client_for(&server).screenview("fact", &params).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/collect")
            .with_status(503)
            .create_async()
            .await;

        let err = client_for(&server)
            .screenview("build", &Params::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::Rejected { status: 503 }));
    }

    #[tokio::test]
    async fn unreachable_backend_is_transport_error() {
        // Port 9 (discard) is closed on loopback in any sane test environment.
        let client = GoogleAnalytics::new(
            "http://127.0.0.1:9/collect",
            "UA-0000-1",
            "cid",
            Duration::from_secs(2),
        )
        .unwrap();

        let err = client.screenview("build", &Params::new()).await.unwrap_err();
        assert!(matches!(err, AnalyticsError::Transport(_)));
    }

    #[tokio::test]
    async fn disabled_client_always_succeeds() {
        assert!(Disabled.screenview("build", &Params::new()).await.is_ok());
    }

    #[tokio::test]
    async fn from_config_respects_opt_out() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/collect")
            .expect(0)
            .create_async()
            .await;

        let config = AnalyticsConfig {
            disabled: true,
            tracking_id: Some("UA-0000-1".into()),
            endpoint: format!("{}/collect", server.url()),
            ..AnalyticsConfig::default()
        };
        from_config(&config, "1.0.0")
            .screenview("build", &Params::new())
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn from_config_reports_when_enabled() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/collect")
            .match_body(Matcher::UrlEncoded("av".into(), "9.9.9".into()))
            .with_status(200)
            .expect(1)
            .create_async()
            .await;

        let config = AnalyticsConfig {
            tracking_id: Some("UA-0000-1".into()),
            user_id: Some("cid".into()),
            endpoint: format!("{}/collect", server.url()),
            ..AnalyticsConfig::default()
        };
        from_config(&config, "9.9.9")
            .screenview("validate", &Params::new())
            .await
            .unwrap();
        mock.assert_async().await;
    }
}
