// ── Refresh application logic ──
//
// Applies the outcome of a refresh cycle to the DataStore. Each slice is
// independent: `Some` replaces, `None` means "this resource was not
// updated this cycle" and the previous value stays (stale-but-present).

use chrono::Utc;

use super::DataStore;
use crate::model::{Alert, Camera, LogEntry, Stats};

/// Per-slice outcome of one refresh cycle.
///
/// A fetcher that failed contributes `None`; its slice keeps the value it
/// had before the cycle started.
#[derive(Debug, Default)]
pub(crate) struct RefreshSnapshot {
    pub alerts: Option<Vec<Alert>>,
    pub cameras: Option<Vec<Camera>>,
    pub stats: Option<Stats>,
    pub logs: Option<Vec<LogEntry>>,
}

impl DataStore {
    /// Apply a refresh cycle's results.
    ///
    /// Present slices are replaced wholesale in server order; absent ones
    /// are untouched. Completion order across concurrent cycles is not
    /// coordinated — the last applied write wins.
    pub(crate) fn apply_refresh(&self, snap: RefreshSnapshot) {
        if let Some(alerts) = snap.alerts {
            self.alerts.replace(alerts);
        }
        if let Some(cameras) = snap.cameras {
            self.cameras.replace(cameras);
        }
        if let Some(stats) = snap.stats {
            self.stats.replace(stats);
        }
        if let Some(logs) = snap.logs {
            self.logs.replace(logs);
        }

        let _ = self.last_refresh.send(Some(Utc::now()));
    }

    /// Transition to the unreachable state: clear every slice and drop the
    /// connectivity flag in one step, so observers never see stale security
    /// data attributed to a dead backend.
    pub(crate) fn mark_disconnected(&self) {
        self.set_connected(false);
        self.alerts.reset();
        self.cameras.reset();
        self.stats.reset();
        self.logs.reset();
    }
}
