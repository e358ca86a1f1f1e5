// Surveillance backend HTTP client
//
// Wraps `reqwest::Client` with backend URL construction and uniform
// failure folding: transport errors, non-2xx statuses, and body parse
// failures all surface as a single `Error` at this boundary.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{
    AddCameraResponse, AlertRecord, CameraId, CameraRecord, ErrorBody, LogRecord, NewCameraRecord,
    SnapshotResponse, StatsRecord,
};
use crate::transport::TransportConfig;

/// Raw HTTP client for the surveillance backend API.
///
/// Stateless: no session, no cookies. Each method maps to exactly one
/// endpoint and returns the parsed payload or a folded `Error`.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    /// Create a new backend client from a `TransportConfig`.
    ///
    /// `base_url` is the backend root (e.g. `http://localhost:5000`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a backend client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/api/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/api/{path}");
        Url::parse(&full).expect("invalid API URL")
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and parse the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        Self::parse_body(resp).await
    }

    /// Send a bodyless POST request and parse the JSON response.
    async fn post_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("POST {}", url);
        let resp = self.http.post(url).send().await.map_err(Error::Transport)?;
        Self::parse_body(resp).await
    }

    /// Send a POST request with a JSON body and parse the JSON response.
    async fn post_json_body<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl serde::Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::parse_body(resp).await
    }

    /// Check the status, then deserialize the body.
    ///
    /// Non-2xx responses become `Error::Status`, carrying the backend's
    /// `{"error": ...}` message when one was sent. A 2xx body that does not
    /// match the expected shape becomes `Error::Deserialization` with the
    /// raw body preserved for debugging.
    async fn parse_body<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .map(|e| e.error);
            return Err(Error::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    /// Check the status and discard the body.
    async fn expect_success(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .map(|e| e.error);
        Err(Error::Status {
            status: status.as_u16(),
            message,
        })
    }

    // ── Liveness ─────────────────────────────────────────────────────

    /// Probe backend reachability.
    ///
    /// `GET /api/status` — any 2xx means the backend is up. One request,
    /// no retries: retry cadence belongs to the caller's polling loop.
    pub async fn probe_status(&self) -> Result<(), Error> {
        let url = self.api_url("status");
        debug!("GET {} (liveness probe)", url);
        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        Self::expect_success(resp).await
    }

    // ── Resource fetchers ────────────────────────────────────────────

    /// List all alerts.
    ///
    /// `GET /api/alerts/list`
    pub async fn list_alerts(&self) -> Result<Vec<AlertRecord>, Error> {
        let url = self.api_url("alerts/list");
        debug!("listing alerts");
        self.get_json(url).await
    }

    /// List all cameras.
    ///
    /// `GET /api/camera/list`
    pub async fn list_cameras(&self) -> Result<Vec<CameraRecord>, Error> {
        let url = self.api_url("camera/list");
        debug!("listing cameras");
        self.get_json(url).await
    }

    /// Fetch aggregate statistics.
    ///
    /// `GET /api/stats`
    pub async fn get_stats(&self) -> Result<StatsRecord, Error> {
        let url = self.api_url("stats");
        debug!("fetching stats");
        self.get_json(url).await
    }

    /// List the event log.
    ///
    /// `GET /api/logs`
    pub async fn list_logs(&self) -> Result<Vec<LogRecord>, Error> {
        let url = self.api_url("logs");
        debug!("listing logs");
        self.get_json(url).await
    }

    // ── Alert actions ────────────────────────────────────────────────

    /// Acknowledge an alert.
    ///
    /// `POST /api/alerts/{id}/acknowledge` — 2xx, no required body.
    pub async fn acknowledge_alert(&self, id: i64) -> Result<(), Error> {
        let url = self.api_url(&format!("alerts/{id}/acknowledge"));
        debug!(alert = id, "acknowledging alert");
        let resp = self.http.post(url).send().await.map_err(Error::Transport)?;
        Self::expect_success(resp).await
    }

    /// Dismiss an alert.
    ///
    /// `POST /api/alerts/{id}/dismiss` — 2xx, no required body.
    pub async fn dismiss_alert(&self, id: i64) -> Result<(), Error> {
        let url = self.api_url(&format!("alerts/{id}/dismiss"));
        debug!(alert = id, "dismissing alert");
        let resp = self.http.post(url).send().await.map_err(Error::Transport)?;
        Self::expect_success(resp).await
    }

    // ── Camera actions ───────────────────────────────────────────────

    /// Register a new camera.
    ///
    /// `POST /api/camera/add` with `{name, location, url, type, username?,
    /// password?}`. The backend echoes the created camera back.
    pub async fn add_camera(&self, camera: &NewCameraRecord) -> Result<AddCameraResponse, Error> {
        let url = self.api_url("camera/add");
        debug!(name = %camera.name, "adding camera");
        self.post_json_body(url, camera).await
    }

    /// Capture a still frame from a camera.
    ///
    /// `POST /api/camera/{id}/snapshot` — success carries `image_path`.
    pub async fn snapshot_camera(&self, id: &CameraId) -> Result<SnapshotResponse, Error> {
        let url = self.api_url(&format!("camera/{id}/snapshot"));
        debug!(camera = %id, "capturing snapshot");
        self.post_json(url).await
    }

    /// Remove a camera.
    ///
    /// `DELETE /api/camera/{id}/delete`
    pub async fn delete_camera(&self, id: &CameraId) -> Result<(), Error> {
        let url = self.api_url(&format!("camera/{id}/delete"));
        debug!(camera = %id, "deleting camera");
        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::expect_success(resp).await
    }
}
