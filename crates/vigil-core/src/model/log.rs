// ── Event-log domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the backend's event log (camera added, snapshot captured,
/// detection recorded, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub timestamp: Option<DateTime<Utc>>,
    pub event: String,
    pub location: String,
    pub confidence: Option<f64>,
    pub action: Option<String>,
    pub image: Option<String>,
}
