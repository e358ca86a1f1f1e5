// Wire-format records for the surveillance backend API.
//
// The backend returns bare JSON arrays/objects (no envelope). Fields the
// backend may omit are `Option` so a sparse payload never fails the fetch.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── CameraId ────────────────────────────────────────────────────────

/// Opaque camera identifier.
///
/// The backend assigns either an integer id or a database object-id string
/// depending on its storage layer. Consumers compare ids for equality and
/// echo them back into URLs; they never parse or coerce them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CameraId {
    Int(i64),
    Str(String),
}

impl fmt::Display for CameraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for CameraId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<String> for CameraId {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&str> for CameraId {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

// ── Read-path records ───────────────────────────────────────────────

/// One alert as returned by `GET /api/alerts/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: i64,
    #[serde(rename = "type")]
    pub alert_type: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    /// Omitted by the backend for freshly-created alerts; treated as active.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// One camera as returned by `GET /api/camera/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraRecord {
    pub id: CameraId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "type", default)]
    pub camera_type: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Aggregate statistics from `GET /api/stats`.
///
/// Every field is optional: the backend builds this record from whatever
/// its storage layer currently answers, and an empty object is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsRecord {
    #[serde(default)]
    pub total_cameras: Option<u32>,
    #[serde(default)]
    pub active_cameras: Option<u32>,
    #[serde(default)]
    pub total_alerts_today: Option<u32>,
    #[serde(default)]
    pub detection_accuracy: Option<f64>,
    #[serde(default)]
    pub uptime: Option<String>,
}

/// One event-log row from `GET /api/logs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: i64,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

// ── Write-path bodies and responses ─────────────────────────────────

/// Request body for `POST /api/camera/add`.
///
/// Wire-level type: credentials arrive here already exposed. The core crate
/// keeps them wrapped in `SecretString` until this boundary.
#[derive(Debug, Clone, Serialize)]
pub struct NewCameraRecord {
    pub name: String,
    pub location: String,
    pub url: String,
    #[serde(rename = "type")]
    pub camera_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Success payload of `POST /api/camera/add`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddCameraResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub camera: Option<CameraRecord>,
}

/// Success payload of `POST /api/camera/{id}/snapshot`.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    pub image_path: String,
}

/// Error body the backend attaches to failed mutating requests.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
