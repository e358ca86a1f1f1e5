// ── Central reactive data store ──
//
// Holds the authoritative client-side snapshot: alerts, cameras, stats,
// logs, and the connectivity flag. Mutated only by the synchronization
// engine and the action dispatcher; consumers observe through snapshots
// and `watch` subscriptions.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use super::cell::ResourceCell;
use crate::model::{Alert, AlertStatus, Camera, CameraId, LogEntry, Stats};
use crate::stream::ResourceStream;

/// Central reactive store for the dashboard snapshot.
///
/// Each resource slice is independent: one slice updating (or failing to
/// update) never touches the others. Server insertion order is preserved —
/// slices are replaced wholesale, never re-keyed or sorted.
pub struct DataStore {
    pub(crate) alerts: ResourceCell<Vec<Alert>>,
    pub(crate) cameras: ResourceCell<Vec<Camera>>,
    pub(crate) stats: ResourceCell<Stats>,
    pub(crate) logs: ResourceCell<Vec<LogEntry>>,

    /// Backend reachability. Starts `false`; only a successful liveness
    /// probe sets it `true`.
    pub(crate) connected: watch::Sender<bool>,
    pub(crate) last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl DataStore {
    pub fn new() -> Self {
        let (connected, _) = watch::channel(false);
        let (last_refresh, _) = watch::channel(None);

        Self {
            alerts: ResourceCell::new(),
            cameras: ResourceCell::new(),
            stats: ResourceCell::new(),
            logs: ResourceCell::new(),
            connected,
            last_refresh,
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn alerts_snapshot(&self) -> Arc<Vec<Alert>> {
        self.alerts.snapshot()
    }

    pub fn cameras_snapshot(&self) -> Arc<Vec<Camera>> {
        self.cameras.snapshot()
    }

    pub fn stats_snapshot(&self) -> Arc<Stats> {
        self.stats.snapshot()
    }

    pub fn logs_snapshot(&self) -> Arc<Vec<LogEntry>> {
        self.logs.snapshot()
    }

    // ── Single-entity lookups ────────────────────────────────────────

    pub fn alert_by_id(&self, id: i64) -> Option<Alert> {
        self.alerts.snapshot().iter().find(|a| a.id == id).cloned()
    }

    pub fn camera_by_id(&self, id: &CameraId) -> Option<Camera> {
        self.cameras
            .snapshot()
            .iter()
            .find(|c| &c.id == id)
            .cloned()
    }

    // ── Count accessors ──────────────────────────────────────────────

    pub fn alert_count(&self) -> usize {
        self.alerts.snapshot().len()
    }

    pub fn camera_count(&self) -> usize {
        self.cameras.snapshot().len()
    }

    // ── Connectivity ─────────────────────────────────────────────────

    pub fn connected(&self) -> bool {
        *self.connected.borrow()
    }

    pub fn subscribe_connected(&self) -> watch::Receiver<bool> {
        self.connected.subscribe()
    }

    pub(crate) fn set_connected(&self, connected: bool) {
        self.connected.send_if_modified(|c| {
            if *c == connected {
                false
            } else {
                *c = connected;
                true
            }
        });
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_alerts(&self) -> ResourceStream<Vec<Alert>> {
        ResourceStream::new(self.alerts.subscribe())
    }

    pub fn subscribe_cameras(&self) -> ResourceStream<Vec<Camera>> {
        ResourceStream::new(self.cameras.subscribe())
    }

    pub fn subscribe_stats(&self) -> ResourceStream<Stats> {
        ResourceStream::new(self.stats.subscribe())
    }

    pub fn subscribe_logs(&self) -> ResourceStream<Vec<LogEntry>> {
        ResourceStream::new(self.logs.subscribe())
    }

    // ── Local mutations (action dispatcher) ──────────────────────────

    /// Set the status of one alert in place.
    ///
    /// Returns `false` without notifying subscribers when no alert with
    /// that id exists or it already carries the target status.
    pub(crate) fn set_alert_status(&self, id: i64, status: AlertStatus) -> bool {
        self.alerts.modify(|alerts| {
            match alerts.iter_mut().find(|a| a.id == id) {
                Some(alert) if alert.status != status => {
                    alert.status = status;
                    true
                }
                _ => false,
            }
        })
    }

    /// Append a newly-registered camera to the slice.
    pub(crate) fn push_camera(&self, camera: Camera) {
        self.cameras.modify(|cameras| {
            cameras.push(camera);
            true
        });
    }

    /// Remove a camera by id. Returns `false` if no camera matched.
    pub(crate) fn remove_camera(&self, id: &CameraId) -> bool {
        self.cameras.modify(|cameras| {
            let before = cameras.len();
            cameras.retain(|c| &c.id != id);
            cameras.len() != before
        })
    }

    // ── Metadata ─────────────────────────────────────────────────────

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }

    /// How long ago the last successful refresh completed, or `None` if
    /// never refreshed.
    pub fn data_age(&self) -> Option<chrono::Duration> {
        self.last_refresh().map(|t| Utc::now() - t)
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}
