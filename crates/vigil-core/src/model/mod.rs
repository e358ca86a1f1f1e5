// ── Domain model ──
//
// Typed client-side mirror of the backend's resources. Wire records from
// `vigil-api` are converted into these in `convert.rs`; consumers never
// see raw payloads.

mod alert;
mod camera;
mod log;
mod stats;

pub use alert::{Alert, AlertSeverity, AlertStatus};
pub use camera::{Camera, CameraStatus};
pub use log::LogEntry;
pub use stats::Stats;

// The backend assigns camera ids in two shapes; the opaque key lives with
// the wire format and is the domain identity type as well.
pub use vigil_api::CameraId;
