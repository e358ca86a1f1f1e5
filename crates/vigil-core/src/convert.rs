// ── Wire → domain conversions ──
//
// Conversions are total and deterministic: a malformed field degrades to a
// documented fallback instead of failing the fetch, and converting the same
// record twice always yields the same value (refresh idempotence depends on
// this).

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::model::{Alert, AlertSeverity, AlertStatus, Camera, CameraStatus, LogEntry, Stats};
use vigil_api::{AlertRecord, CameraRecord, LogRecord, StatsRecord};

/// Parse a backend timestamp.
///
/// The backend emits RFC 3339 with an offset, or a naive ISO string
/// (Python `isoformat()` without timezone) which is taken as UTC.
/// Anything else maps to `None` rather than failing the record.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>().ok().map(|n| n.and_utc())
}

impl From<AlertRecord> for Alert {
    fn from(r: AlertRecord) -> Self {
        // Unknown severity strings fold to Low; a missing status is Active.
        let severity = r
            .severity
            .parse::<AlertSeverity>()
            .unwrap_or(AlertSeverity::Low);
        let status = r
            .status
            .as_deref()
            .and_then(|s| s.parse::<AlertStatus>().ok())
            .unwrap_or_default();
        Self {
            id: r.id,
            kind: r.alert_type,
            location: r.location,
            timestamp: parse_timestamp(&r.timestamp),
            severity,
            status,
            confidence: r.confidence,
            description: r.description,
            image: r.image,
        }
    }
}

impl From<CameraRecord> for Camera {
    fn from(r: CameraRecord) -> Self {
        let status = r
            .status
            .parse::<CameraStatus>()
            .unwrap_or(CameraStatus::Offline);
        Self {
            id: r.id,
            name: r.name,
            location: r.location,
            status,
            url: r.url,
            kind: r.camera_type,
            image: r.image,
        }
    }
}

impl From<StatsRecord> for Stats {
    fn from(r: StatsRecord) -> Self {
        Self {
            total_cameras: r.total_cameras,
            active_cameras: r.active_cameras,
            total_alerts_today: r.total_alerts_today,
            detection_accuracy: r.detection_accuracy,
            uptime: r.uptime,
        }
    }
}

impl From<LogRecord> for LogEntry {
    fn from(r: LogRecord) -> Self {
        Self {
            id: r.id,
            timestamp: parse_timestamp(&r.timestamp),
            event: r.event,
            location: r.location,
            confidence: r.confidence,
            action: r.action,
            image: r.image,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn alert_record(severity: &str, status: Option<&str>) -> AlertRecord {
        AlertRecord {
            id: 1,
            alert_type: "intrusion".into(),
            location: "North Gate".into(),
            timestamp: "2026-08-01T10:30:00Z".into(),
            severity: severity.into(),
            confidence: Some(0.92),
            description: None,
            status: status.map(String::from),
            image: None,
        }
    }

    #[test]
    fn alert_conversion_maps_known_severity() {
        let alert = Alert::from(alert_record("high", Some("active")));
        assert_eq!(alert.severity, AlertSeverity::High);
        assert_eq!(alert.status, AlertStatus::Active);
        assert!(alert.timestamp.is_some());
    }

    #[test]
    fn unknown_severity_folds_to_low() {
        let alert = Alert::from(alert_record("catastrophic", None));
        assert_eq!(alert.severity, AlertSeverity::Low);
    }

    #[test]
    fn missing_status_defaults_to_active() {
        let alert = Alert::from(alert_record("medium", None));
        assert_eq!(alert.status, AlertStatus::Active);
    }

    #[test]
    fn naive_timestamp_is_taken_as_utc() {
        let ts = parse_timestamp("2026-08-01T10:30:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2026-08-01T10:30:00+00:00");
    }

    #[test]
    fn garbage_timestamp_becomes_none() {
        assert_eq!(parse_timestamp("yesterday-ish"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn camera_conversion_is_deterministic() {
        let record = CameraRecord {
            id: vigil_api::CameraId::Int(3),
            name: "Gate".into(),
            location: "North".into(),
            status: "online".into(),
            url: "rtsp://10.0.0.3/stream".into(),
            camera_type: "ip".into(),
            image: None,
        };
        let a = Camera::from(record.clone());
        let b = Camera::from(record);
        assert_eq!(a, b);
        assert_eq!(a.status, CameraStatus::Online);
    }
}
