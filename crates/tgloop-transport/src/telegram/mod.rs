//! Telegram Bot API transport.
//!
//! Every call is a POST to `https://<host>/bot<token>/<method>`: a
//! url-encoded form for scalar parameters, multipart when a file is attached.
//! Docs: <https://core.telegram.org/bots/api#making-requests>

mod form;


use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use tgloop_core::{
    config::TransportConfig, error::TgError, request::Params, response::ApiResponse,
    traits::Transport,
};
use tracing::{debug, error};

/// Bot API client. Cheap to share; the connection pool is reused across calls.
pub struct Telegram {
    client: reqwest::Client,
    /// `<scheme>://<host>/bot<token>`; never logged.
    base_url: String,
    host: String,
}

impl Telegram {
    /// Client for the public API host with default settings.
    pub fn new(token: &str) -> Result<Self, TgError> {
        Self::from_config(token, &TransportConfig::default())
    }

    /// Create a client from transport config.
    pub fn from_config(token: &str, config: &TransportConfig) -> Result<Self, TgError> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs);
        if config.ipv4_only {
            builder = builder.local_address(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        }
        let client = builder
            .build()
            .map_err(|e| TgError::Config(format!("failed to build http client: {e}")))?;
        Ok(Self::with_client(client, token, config))
    }

    /// Wrap an existing client.
    pub fn with_client(client: reqwest::Client, token: &str, config: &TransportConfig) -> Self {
        let base_url = format!("{}://{}/bot{}", config.scheme, config.api_host, token);
        Self {
            client,
            base_url,
            host: config.api_host.clone(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{method}", self.base_url)
    }
}

impl fmt::Debug for Telegram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Telegram")
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for Telegram {
    async fn call(&self, method: &str, params: Params) -> Result<Value, TgError> {
        if method.is_empty() {
            return Err(TgError::InvalidRequest("method name is empty".into()));
        }
        debug!(method, ?params, "calling telegram");

        let request = self.client.post(self.method_url(method));
        let request = if params.has_files() {
            request.multipart(form::multipart(params)?)
        } else {
            request.form(&params.to_form_pairs())
        };

        // Errors carry the request URL, which contains the token.
        let resp = request
            .send()
            .await
            .map_err(|e| TgError::Http(format!("telegram {method} failed: {}", e.without_url())))?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(|e| {
            TgError::Http(format!(
                "telegram {method} read failed: {}",
                e.without_url()
            ))
        })?;

        let envelope = ApiResponse::from_slice(&body).map_err(|e| {
            error!(
                method,
                %status,
                body = %String::from_utf8_lossy(&body),
                "telegram returned a non-envelope body"
            );
            e
        })?;

        if envelope.ok {
            debug!(method, payload = %String::from_utf8_lossy(&body), "telegram ok");
        } else {
            error!(method, %status, payload = %String::from_utf8_lossy(&body), "telegram error");
        }
        envelope.into_result()
    }
}
