// ── Monitor abstraction ──
//
// Full lifecycle management for a surveillance backend connection:
// liveness probing, periodic refresh, command routing, and reactive data
// streaming through the DataStore.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::command::{AddCameraRequest, Command, CommandEnvelope, CommandResult};
use crate::config::{MonitorConfig, TlsVerification};
use crate::error::CoreError;
use crate::model::{Alert, AlertStatus, Camera, CameraId, LogEntry, Stats};
use crate::store::{DataStore, RefreshSnapshot};
use crate::stream::ResourceStream;

use vigil_api::transport::{TlsMode, TransportConfig};
use vigil_api::BackendClient;

const COMMAND_CHANNEL_SIZE: usize = 64;

// ── ResourceKind ─────────────────────────────────────────────────────

/// One of the four independently-fetched resource slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Alerts,
    Cameras,
    Stats,
    Logs,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alerts => write!(f, "alerts"),
            Self::Cameras => write!(f, "cameras"),
            Self::Stats => write!(f, "stats"),
            Self::Logs => write!(f, "logs"),
        }
    }
}

// ── Monitor ──────────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<MonitorInner>`. Owns the snapshot store and
/// the background tasks that keep it loosely consistent with the backend:
/// create with [`new`](Self::new), then `start()` to begin polling and
/// `shutdown()` to tear everything down.
#[derive(Clone)]
pub struct Monitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    config: MonitorConfig,
    client: BackendClient,
    store: Arc<DataStore>,
    command_tx: Mutex<mpsc::Sender<CommandEnvelope>>,
    command_rx: Mutex<Option<mpsc::Receiver<CommandEnvelope>>>,
    cancel: CancellationToken,
    /// Child token for the current run — cancelled on shutdown, replaced
    /// on restart (avoids permanent cancellation).
    cancel_child: Mutex<CancellationToken>,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Monitor {
    /// Create a new Monitor from configuration. Does NOT touch the
    /// network -- call [`start()`](Self::start) to begin polling.
    pub fn new(config: MonitorConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let client = BackendClient::new(config.base_url.clone(), &transport)?;

        let store = Arc::new(DataStore::new());
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);
        let cancel = CancellationToken::new();
        let cancel_child = cancel.child_token();

        Ok(Self {
            inner: Arc::new(MonitorInner {
                config,
                client,
                store,
                command_tx: Mutex::new(command_tx),
                command_rx: Mutex::new(Some(command_rx)),
                cancel,
                cancel_child: Mutex::new(cancel_child),
                task_handles: Mutex::new(Vec::new()),
            }),
        })
    }

    /// Access the monitor configuration.
    pub fn config(&self) -> &MonitorConfig {
        &self.inner.config
    }

    /// Access the underlying DataStore.
    pub fn store(&self) -> &Arc<DataStore> {
        &self.inner.store
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Start the monitor.
    ///
    /// Runs one immediate full refresh, then spawns the periodic refresh
    /// task and the command processor under a fresh cancellation scope.
    /// A probe failure during the initial refresh is not an error -- the
    /// store simply starts in the disconnected state.
    pub async fn start(&self) {
        // Fresh child token for this run (supports restart after shutdown).
        let child = self.inner.cancel.child_token();
        *self.inner.cancel_child.lock().await = child.clone();

        self.refresh_all().await;

        let mut handles = self.inner.task_handles.lock().await;

        if let Some(rx) = self.inner.command_rx.lock().await.take() {
            let monitor = self.clone();
            handles.push(tokio::spawn(command_processor_task(monitor, rx)));
        }

        let interval = self.inner.config.refresh_interval;
        if !interval.is_zero() {
            let monitor = self.clone();
            let cancel = child.clone();
            handles.push(tokio::spawn(refresh_task(monitor, interval, cancel)));
        }

        info!(connected = self.inner.store.connected(), "monitor started");
    }

    /// Stop the monitor.
    ///
    /// Cancels the periodic timer and command processor, joins every
    /// background task, and leaves the store in the disconnected state.
    /// Cancellation is guaranteed: after this returns no task owned by
    /// this run will mutate the store again.
    pub async fn shutdown(&self) {
        // Cancel the child token (not the parent — allows restart).
        self.inner.cancel_child.lock().await.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }

        // Recreate the command channel so a restart can spawn a fresh
        // receiver. The previous receiver was consumed by the processor.
        {
            let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);
            *self.inner.command_tx.lock().await = tx;
            *self.inner.command_rx.lock().await = Some(rx);
        }

        self.inner.store.mark_disconnected();
        debug!("monitor stopped");
    }

    // ── Refresh ──────────────────────────────────────────────────────

    /// Run one full refresh cycle.
    ///
    /// Probes the backend first. Unreachable: the whole snapshot resets to
    /// empty and `connected` drops -- no partial fetch is attempted, a
    /// dead backend must not leave a half-populated dashboard. Reachable:
    /// all four fetchers run concurrently; each success replaces its
    /// slice, each failure leaves its slice stale-but-present.
    ///
    /// Every outcome is a defined state, so this never returns an error.
    pub async fn refresh_all(&self) {
        let store = &self.inner.store;

        if let Err(e) = self.inner.client.probe_status().await {
            warn!(error = %e, "liveness probe failed; clearing snapshot");
            store.mark_disconnected();
            return;
        }
        store.set_connected(true);

        let client = &self.inner.client;
        let (alerts_res, cameras_res, stats_res, logs_res) = tokio::join!(
            client.list_alerts(),
            client.list_cameras(),
            client.get_stats(),
            client.list_logs(),
        );

        store.apply_refresh(RefreshSnapshot {
            alerts: slice_or_stale(ResourceKind::Alerts, alerts_res),
            cameras: slice_or_stale(ResourceKind::Cameras, cameras_res),
            stats: stats_or_stale(stats_res),
            logs: slice_or_stale(ResourceKind::Logs, logs_res),
        });

        debug!(
            alerts = store.alert_count(),
            cameras = store.camera_count(),
            "refresh complete"
        );
    }

    /// Re-run a single resource fetcher on demand.
    ///
    /// Same semantics as one slice of [`refresh_all`](Self::refresh_all):
    /// replace on success, keep the previous value on failure. While the
    /// backend is marked unreachable this is a no-op -- the cleared
    /// snapshot stays cleared until a probe succeeds.
    pub async fn refresh(&self, kind: ResourceKind) {
        let store = &self.inner.store;
        if !store.connected() {
            debug!(resource = %kind, "manual refresh skipped while disconnected");
            return;
        }

        let client = &self.inner.client;
        let snapshot = match kind {
            ResourceKind::Alerts => RefreshSnapshot {
                alerts: slice_or_stale(kind, client.list_alerts().await),
                ..RefreshSnapshot::default()
            },
            ResourceKind::Cameras => RefreshSnapshot {
                cameras: slice_or_stale(kind, client.list_cameras().await),
                ..RefreshSnapshot::default()
            },
            ResourceKind::Stats => RefreshSnapshot {
                stats: stats_or_stale(client.get_stats().await),
                ..RefreshSnapshot::default()
            },
            ResourceKind::Logs => RefreshSnapshot {
                logs: slice_or_stale(kind, client.list_logs().await),
                ..RefreshSnapshot::default()
            },
        };

        store.apply_refresh(snapshot);
    }

    // ── Alert actions ────────────────────────────────────────────────

    /// Acknowledge an alert.
    ///
    /// The local status flips to `Acknowledged` immediately (optimistic),
    /// then the confirming call is issued. A remote failure returns `Err`
    /// but does NOT roll the local change back -- the next refresh cycle
    /// reconciles against the server. Unknown ids are a silent no-op.
    pub async fn acknowledge_alert(&self, id: i64) -> Result<(), CoreError> {
        self.alert_action(id, AlertStatus::Acknowledged, Command::AcknowledgeAlert { id })
            .await
    }

    /// Dismiss an alert. Same shape as
    /// [`acknowledge_alert`](Self::acknowledge_alert), target status
    /// `Dismissed`.
    pub async fn dismiss_alert(&self, id: i64) -> Result<(), CoreError> {
        self.alert_action(id, AlertStatus::Dismissed, Command::DismissAlert { id })
            .await
    }

    async fn alert_action(
        &self,
        id: i64,
        status: AlertStatus,
        command: Command,
    ) -> Result<(), CoreError> {
        if self.inner.store.alert_by_id(id).is_none() {
            debug!(alert = id, "action on unknown alert id ignored");
            return Ok(());
        }

        self.inner.store.set_alert_status(id, status);
        self.execute(command).await.map(|_| ())
    }

    // ── Camera actions ───────────────────────────────────────────────

    /// Register a new camera with the backend.
    ///
    /// On success the backend's echo of the created camera is appended to
    /// the local slice (and returned, when the backend sent one).
    pub async fn add_camera(
        &self,
        request: AddCameraRequest,
    ) -> Result<Option<Camera>, CoreError> {
        match self.execute(Command::AddCamera(request)).await? {
            CommandResult::CameraAdded(camera) => Ok(camera),
            _ => Err(CoreError::Internal("unexpected command result".into())),
        }
    }

    /// Capture a still frame from a camera; returns the backend-side
    /// image path.
    pub async fn snapshot_camera(&self, id: CameraId) -> Result<String, CoreError> {
        match self.execute(Command::SnapshotCamera { id }).await? {
            CommandResult::SnapshotCaptured { image_path } => Ok(image_path),
            _ => Err(CoreError::Internal("unexpected command result".into())),
        }
    }

    /// Remove a camera; the local slice drops it on success.
    pub async fn delete_camera(&self, id: CameraId) -> Result<(), CoreError> {
        self.execute(Command::DeleteCamera { id }).await.map(|_| ())
    }

    // ── Command execution ────────────────────────────────────────────

    /// Execute a command against the backend.
    ///
    /// Sends the command through the internal channel to the command
    /// processor task and awaits the result.
    pub async fn execute(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        if !self.inner.store.connected() {
            return Err(CoreError::BackendUnreachable);
        }

        let (tx, rx) = tokio::sync::oneshot::channel();

        let command_tx = self.inner.command_tx.lock().await.clone();

        command_tx
            .send(CommandEnvelope {
                command: cmd,
                response_tx: tx,
            })
            .await
            .map_err(|_| CoreError::BackendUnreachable)?;

        rx.await.map_err(|_| CoreError::BackendUnreachable)?
    }

    // ── State observation ────────────────────────────────────────────

    /// Current backend reachability.
    pub fn connected(&self) -> bool {
        self.inner.store.connected()
    }

    /// Subscribe to connectivity changes.
    pub fn connectivity(&self) -> watch::Receiver<bool> {
        self.inner.store.subscribe_connected()
    }

    // ── Snapshot accessors (delegate to DataStore) ───────────────────

    pub fn alerts_snapshot(&self) -> Arc<Vec<Alert>> {
        self.inner.store.alerts_snapshot()
    }

    pub fn cameras_snapshot(&self) -> Arc<Vec<Camera>> {
        self.inner.store.cameras_snapshot()
    }

    pub fn stats_snapshot(&self) -> Arc<Stats> {
        self.inner.store.stats_snapshot()
    }

    pub fn logs_snapshot(&self) -> Arc<Vec<LogEntry>> {
        self.inner.store.logs_snapshot()
    }

    // ── Stream accessors (delegate to DataStore) ─────────────────────

    pub fn alerts(&self) -> ResourceStream<Vec<Alert>> {
        self.inner.store.subscribe_alerts()
    }

    pub fn cameras(&self) -> ResourceStream<Vec<Camera>> {
        self.inner.store.subscribe_cameras()
    }

    pub fn stats(&self) -> ResourceStream<Stats> {
        self.inner.store.subscribe_stats()
    }

    pub fn logs(&self) -> ResourceStream<Vec<LogEntry>> {
        self.inner.store.subscribe_logs()
    }
}

// ── Background tasks ─────────────────────────────────────────────────

/// Periodically refresh data from the backend.
async fn refresh_task(monitor: Monitor, period: Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                monitor.refresh_all().await;
            }
        }
    }
}

/// Process commands from the mpsc channel, routing each to the
/// appropriate backend call.
async fn command_processor_task(monitor: Monitor, mut rx: mpsc::Receiver<CommandEnvelope>) {
    let cancel = monitor.inner.cancel_child.lock().await.clone();

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            envelope = rx.recv() => {
                let Some(envelope) = envelope else { break };
                let result = route_command(&monitor, envelope.command).await;
                let _ = envelope.response_tx.send(result);
            }
        }
    }
}

// ── Command routing ──────────────────────────────────────────────────

/// Route a command to its backend call and apply the local follow-up.
async fn route_command(monitor: &Monitor, cmd: Command) -> Result<CommandResult, CoreError> {
    let client = &monitor.inner.client;
    let store = &monitor.inner.store;

    match cmd {
        Command::AcknowledgeAlert { id } => {
            client.acknowledge_alert(id).await?;
            Ok(CommandResult::Ok)
        }

        Command::DismissAlert { id } => {
            client.dismiss_alert(id).await?;
            Ok(CommandResult::Ok)
        }

        Command::AddCamera(request) => {
            let resp = client.add_camera(&request.to_record()).await?;
            let camera = resp.camera.map(Camera::from);
            if let Some(ref added) = camera {
                store.push_camera(added.clone());
            }
            Ok(CommandResult::CameraAdded(camera))
        }

        Command::SnapshotCamera { id } => {
            let resp = client.snapshot_camera(&id).await.map_err(|e| {
                if e.is_not_found() {
                    CoreError::CameraNotFound {
                        identifier: id.to_string(),
                    }
                } else {
                    e.into()
                }
            })?;
            Ok(CommandResult::SnapshotCaptured {
                image_path: resp.image_path,
            })
        }

        Command::DeleteCamera { id } => {
            client.delete_camera(&id).await.map_err(|e| {
                if e.is_not_found() {
                    CoreError::CameraNotFound {
                        identifier: id.to_string(),
                    }
                } else {
                    e.into()
                }
            })?;
            store.remove_camera(&id);
            Ok(CommandResult::Ok)
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Convert one fetcher outcome into a slice update.
///
/// `None` means "not updated this cycle": the slice keeps its previous
/// value. Transport, status, and parse failures are deliberately not
/// distinguished here.
fn slice_or_stale<S, D>(
    kind: ResourceKind,
    result: Result<Vec<S>, vigil_api::Error>,
) -> Option<Vec<D>>
where
    D: From<S>,
{
    match result {
        Ok(items) => Some(items.into_iter().map(D::from).collect()),
        Err(e) => {
            warn!(resource = %kind, error = %e, "fetch failed; keeping previous slice");
            None
        }
    }
}

/// Stats counterpart of [`slice_or_stale`] — a single record, not a list.
fn stats_or_stale(result: Result<vigil_api::StatsRecord, vigil_api::Error>) -> Option<Stats> {
    let kind = ResourceKind::Stats;
    match result {
        Ok(record) => Some(Stats::from(record)),
        Err(e) => {
            warn!(resource = %kind, error = %e, "fetch failed; keeping previous value");
            None
        }
    }
}

/// Map core TLS settings into the api-level transport config.
fn build_transport(config: &MonitorConfig) -> TransportConfig {
    TransportConfig {
        tls: match &config.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        },
        timeout: config.timeout,
    }
}
