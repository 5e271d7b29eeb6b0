// HTTP client for the monitor backend's JSON endpoints.

use crate::error::ClientError;
use crate::models::{
    BandwidthHistoryEntry, BandwidthSample, PingLogEntry, PingRequest, PingResponse, PingResult,
    UptimeLogEntry, UptimeRequest, UptimeResult,
};
use crate::version;
use reqwest::header::LOCATION;
use serde::de::DeserializeOwned;
use tracing::instrument;

pub struct MetricsClient {
    base_url: String,
    http: reqwest::Client,
}

impl MetricsClient {
    /// Client with a session cookie store. Redirects are not followed: an
    /// unauthenticated `/api/*` call surfaces as a parse error, not a login page.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(version::user_agent())
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Form login against `/login`; the backend answers a good login with a
    /// redirect away from the login page and sets the session cookie.
    #[instrument(skip(self, password), fields(client = "metrics", operation = "login"))]
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .post(self.url("/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;
        let location = resp
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if resp.status().is_redirection() && !location.contains("/login") {
            tracing::debug!(location, "login accepted");
            Ok(())
        } else {
            Err(ClientError::LoginRejected(username.to_string()))
        }
    }

    #[instrument(skip(self), fields(client = "metrics", operation = "simulate_bandwidth"))]
    pub async fn simulate_bandwidth(&self) -> Result<BandwidthSample, ClientError> {
        let resp = self
            .http
            .post(self.url("/api/simulate_bandwidth"))
            .send()
            .await?;
        read_json(resp).await
    }

    #[instrument(
        skip(self, target),
        fields(client = "metrics", operation = "ping", ping_target = %target)
    )]
    pub async fn ping(&self, target: &str) -> Result<PingResult, ClientError> {
        let resp = self
            .http
            .post(self.url("/api/ping"))
            .json(&PingRequest {
                target: target.to_string(),
            })
            .send()
            .await?;
        let body: PingResponse = read_json(resp).await?;
        Ok(PingResult::new(target, body))
    }

    #[instrument(skip(self), fields(client = "metrics", operation = "check_uptime"))]
    pub async fn check_uptime(&self, url: &str) -> Result<UptimeResult, ClientError> {
        let resp = self
            .http
            .post(self.url("/api/uptime"))
            .json(&UptimeRequest {
                url: url.to_string(),
            })
            .send()
            .await?;
        read_json(resp).await
    }

    pub async fn ping_logs(&self) -> Result<Vec<PingLogEntry>, ClientError> {
        let resp = self.http.get(self.url("/api/logs/ping")).send().await?;
        read_json(resp).await
    }

    pub async fn uptime_logs(&self) -> Result<Vec<UptimeLogEntry>, ClientError> {
        let resp = self.http.get(self.url("/api/logs/uptime")).send().await?;
        read_json(resp).await
    }

    /// Most recent bandwidth samples recorded by the backend, newest first.
    pub async fn bandwidth_history(&self) -> Result<Vec<BandwidthHistoryEntry>, ClientError> {
        let resp = self
            .http
            .get(self.url("/api/bandwidth/history"))
            .send()
            .await?;
        read_json(resp).await
    }
}

/// Read the full body and parse it as JSON regardless of HTTP status.
async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    let body = resp.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(%status, body_len = body.len(), "response body is not the expected JSON");
        ClientError::Parse(e)
    })
}
