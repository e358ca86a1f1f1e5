// ── Aggregate statistics ──

use serde::{Deserialize, Serialize};

/// Dashboard headline numbers.
///
/// A single record, not a collection. `Default` is the empty record the
/// store falls back to while the backend is unreachable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_cameras: Option<u32>,
    pub active_cameras: Option<u32>,
    pub total_alerts_today: Option<u32>,
    pub detection_accuracy: Option<f64>,
    pub uptime: Option<String>,
}
