// vigil-api: Async Rust client for the vigil surveillance backend HTTP API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::BackendClient;
pub use error::Error;
pub use models::{
    AddCameraResponse, AlertRecord, CameraId, CameraRecord, LogRecord, NewCameraRecord,
    SnapshotResponse, StatsRecord,
};
pub use transport::{TlsMode, TransportConfig};
