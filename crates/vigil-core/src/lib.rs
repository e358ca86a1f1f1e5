// vigil-core: Synchronization engine between vigil-api and dashboard consumers.

pub mod command;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod monitor;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{AddCameraRequest, Command, CommandResult};
pub use config::{MonitorConfig, TlsVerification};
pub use error::CoreError;
pub use monitor::{Monitor, ResourceKind};
pub use store::DataStore;
pub use stream::ResourceStream;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Alert, AlertSeverity, AlertStatus, Camera, CameraId, CameraStatus, LogEntry, Stats,
};
