// ── Alert domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How urgently an alert needs attention.
///
/// Ordering is most-severe-first so sorting a list by severity puts
/// `High` at the top.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    High,
    Medium,
    Low,
}

/// Lifecycle state of an alert, driven by user actions.
///
/// Only the action dispatcher or a full refresh overwrite may move an
/// alert out of `Active`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    #[default]
    Active,
    Acknowledged,
    Dismissed,
}

/// A detection alert raised by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Stable within a session; the key for acknowledge/dismiss.
    pub id: i64,
    /// Detection kind ("intrusion", "loitering", ...). Free-form.
    pub kind: String,
    pub location: String,
    /// `None` when the backend sent a timestamp we could not parse.
    pub timestamp: Option<DateTime<Utc>>,
    pub severity: AlertSeverity,
    pub status: AlertStatus,
    pub confidence: Option<f64>,
    pub description: Option<String>,
    pub image: Option<String>,
}
