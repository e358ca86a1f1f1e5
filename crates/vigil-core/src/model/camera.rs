// ── Camera domain type ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use vigil_api::CameraId;

/// Reachability of a camera as reported by the backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CameraStatus {
    Online,
    #[default]
    Offline,
}

/// A registered camera.
///
/// Immutable from the client's perspective: only add/delete commands and
/// refresh overwrites change the cameras slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Opaque key — integer or object-id string, never parsed.
    pub id: CameraId,
    pub name: String,
    pub location: String,
    pub status: CameraStatus,
    /// Connection URL (RTSP/HTTP). The video transport itself is not
    /// this layer's concern.
    pub url: String,
    pub kind: String,
    pub image: Option<String>,
}
