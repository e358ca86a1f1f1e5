// ── Typed request structs for Command payloads ──

use secrecy::{ExposeSecret, SecretString};

use vigil_api::NewCameraRecord;

/// Payload for `Command::AddCamera`.
///
/// Credentials stay wrapped in `SecretString` until the wire boundary;
/// `to_record` is the only place they are exposed.
#[derive(Debug, Clone)]
pub struct AddCameraRequest {
    pub name: String,
    pub location: String,
    pub url: String,
    /// Camera kind as the backend understands it (e.g. "ip", "usb").
    pub kind: String,
    pub username: Option<String>,
    pub password: Option<SecretString>,
}

impl AddCameraRequest {
    /// Build the wire-format body, exposing the password for serialization.
    pub(crate) fn to_record(&self) -> NewCameraRecord {
        NewCameraRecord {
            name: self.name.clone(),
            location: self.location.clone(),
            url: self.url.clone(),
            camera_type: self.kind.clone(),
            username: self.username.clone(),
            password: self
                .password
                .as_ref()
                .map(|p| p.expose_secret().to_owned()),
        }
    }
}
