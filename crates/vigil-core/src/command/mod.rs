// ── Command API ──
//
// All write operations flow through a unified `Command` enum. The monitor
// applies the optimistic local mutation first, then routes the variant to
// the confirming backend call through the command processor task.

pub mod requests;

use crate::error::CoreError;
use crate::model::{Camera, CameraId};

pub use requests::AddCameraRequest;

/// A command envelope sent through the command channel.
/// Contains the command and a oneshot response channel.
pub(crate) struct CommandEnvelope {
    pub command: Command,
    pub response_tx: tokio::sync::oneshot::Sender<Result<CommandResult, CoreError>>,
}

/// All possible write operations against the backend.
#[derive(Debug, Clone)]
pub enum Command {
    // ── Alert operations ─────────────────────────────────────────────
    AcknowledgeAlert { id: i64 },
    DismissAlert { id: i64 },

    // ── Camera operations ────────────────────────────────────────────
    AddCamera(AddCameraRequest),
    SnapshotCamera { id: CameraId },
    DeleteCamera { id: CameraId },
}

/// Successful command outcomes.
#[derive(Debug, Clone)]
pub enum CommandResult {
    /// Command confirmed; no payload.
    Ok,
    /// Camera registered; the backend's view of the new camera, when it
    /// echoed one back.
    CameraAdded(Option<Camera>),
    /// Snapshot captured at the given backend path.
    SnapshotCaptured { image_path: String },
}
