#![allow(clippy::unwrap_used)]
// Integration tests for `BackendClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vigil_api::{BackendClient, CameraId, Error, NewCameraRecord};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, BackendClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = BackendClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

// ── Liveness probe ──────────────────────────────────────────────────

#[tokio::test]
async fn test_probe_status_success() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "online", "version": "1.0.0"
        })))
        .mount(&server)
        .await;

    client.probe_status().await.unwrap();
}

#[tokio::test]
async fn test_probe_status_failure_on_5xx() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = client.probe_status().await;
    assert!(
        matches!(result, Err(Error::Status { status: 503, .. })),
        "expected Status error, got: {result:?}"
    );
}

// ── Resource fetchers ───────────────────────────────────────────────

#[tokio::test]
async fn test_list_alerts() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/alerts/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1,
                "type": "intrusion",
                "location": "North Gate",
                "timestamp": "2026-08-01T10:30:00Z",
                "severity": "high",
                "confidence": 0.92,
                "status": "active"
            },
            {
                "id": 2,
                "type": "loitering",
                "location": "Parking Lot",
                "timestamp": "2026-08-01T10:35:00Z",
                "severity": "low"
            }
        ])))
        .mount(&server)
        .await;

    let alerts = client.list_alerts().await.unwrap();

    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].id, 1);
    assert_eq!(alerts[0].alert_type, "intrusion");
    assert_eq!(alerts[0].severity, "high");
    assert_eq!(alerts[0].status.as_deref(), Some("active"));
    assert_eq!(alerts[1].status, None);
}

#[tokio::test]
async fn test_list_cameras_mixed_id_types() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/camera/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "6650a1b2c3d4e5f6a7b8c9d0",
                "name": "Lobby",
                "location": "HQ",
                "status": "online",
                "url": "rtsp://10.0.0.4/stream",
                "type": "ip"
            },
            {
                "id": 2,
                "name": "Gate",
                "location": "North",
                "status": "offline",
                "url": "rtsp://10.0.0.5/stream",
                "type": "ip"
            }
        ])))
        .mount(&server)
        .await;

    let cameras = client.list_cameras().await.unwrap();

    assert_eq!(cameras.len(), 2);
    assert_eq!(cameras[0].id, CameraId::from("6650a1b2c3d4e5f6a7b8c9d0"));
    assert_eq!(cameras[1].id, CameraId::Int(2));
    assert_eq!(cameras[1].status, "offline");
}

#[tokio::test]
async fn test_get_stats() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_cameras": 4,
            "active_cameras": 3,
            "total_alerts_today": 12,
            "detection_accuracy": 95,
            "uptime": "100%"
        })))
        .mount(&server)
        .await;

    let stats = client.get_stats().await.unwrap();

    assert_eq!(stats.total_cameras, Some(4));
    assert_eq!(stats.active_cameras, Some(3));
    assert_eq!(stats.detection_accuracy, Some(95.0));
    assert_eq!(stats.uptime.as_deref(), Some("100%"));
}

#[tokio::test]
async fn test_list_logs() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/logs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 10,
                "timestamp": "2026-08-01T09:00:00Z",
                "event": "camera_added",
                "location": "North",
                "action": "Camera 'Gate' added at North"
            }
        ])))
        .mount(&server)
        .await;

    let logs = client.list_logs().await.unwrap();

    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].event, "camera_added");
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    // 2xx with an object where an array is expected.
    Mock::given(method("GET"))
        .and(path("/api/alerts/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "oops": true })))
        .mount(&server)
        .await;

    let result = client.list_alerts().await;
    match result {
        Err(Error::Deserialization { ref body, .. }) => {
            assert!(body.contains("oops"), "raw body preserved: {body}");
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

// ── Alert actions ───────────────────────────────────────────────────

#[tokio::test]
async fn test_acknowledge_alert() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/alerts/7/acknowledge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true, "alert_id": 7, "status": "acknowledged"
        })))
        .expect(1)
        .mount(&server)
        .await;

    client.acknowledge_alert(7).await.unwrap();
}

#[tokio::test]
async fn test_dismiss_alert_failure_carries_status() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/alerts/7/dismiss"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client.dismiss_alert(7).await;
    assert!(matches!(result, Err(Error::Status { status: 500, .. })));
}

// ── Camera actions ──────────────────────────────────────────────────

#[tokio::test]
async fn test_add_camera_round_trip() {
    let (server, client) = setup().await;

    let expected_body = json!({
        "name": "Gate",
        "location": "North",
        "url": "rtsp://10.0.0.5/stream",
        "type": "ip",
        "username": "viewer"
    });

    Mock::given(method("POST"))
        .and(path("/api/camera/add"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Camera added successfully",
            "camera": {
                "id": "6650a1b2c3d4e5f6a7b8c9d0",
                "name": "Gate",
                "location": "North",
                "status": "offline",
                "url": "rtsp://10.0.0.5/stream",
                "type": "ip"
            }
        })))
        .mount(&server)
        .await;

    let resp = client
        .add_camera(&NewCameraRecord {
            name: "Gate".into(),
            location: "North".into(),
            url: "rtsp://10.0.0.5/stream".into(),
            camera_type: "ip".into(),
            username: Some("viewer".into()),
            password: None,
        })
        .await
        .unwrap();

    let camera = resp.camera.unwrap();
    assert_eq!(camera.name, "Gate");
    assert_eq!(camera.id, CameraId::from("6650a1b2c3d4e5f6a7b8c9d0"));
}

#[tokio::test]
async fn test_add_camera_error_body_is_parsed() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/camera/add"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "Missing required field: url"
        })))
        .mount(&server)
        .await;

    let result = client
        .add_camera(&NewCameraRecord {
            name: "Gate".into(),
            location: "North".into(),
            url: String::new(),
            camera_type: "ip".into(),
            username: None,
            password: None,
        })
        .await;

    match result {
        Err(Error::Status {
            status: 400,
            message: Some(ref msg),
        }) => {
            assert_eq!(msg, "Missing required field: url");
        }
        other => panic!("expected Status error with message, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_snapshot_camera_integer_id_in_path() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/camera/3/snapshot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Snapshot captured successfully",
            "image_path": "/snapshots/camera_3_20260801.jpg"
        })))
        .mount(&server)
        .await;

    let resp = client.snapshot_camera(&CameraId::Int(3)).await.unwrap();
    assert_eq!(resp.image_path, "/snapshots/camera_3_20260801.jpg");
}

#[tokio::test]
async fn test_snapshot_camera_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/camera/missing/snapshot"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "Camera not found" })),
        )
        .mount(&server)
        .await;

    let result = client.snapshot_camera(&CameraId::from("missing")).await;
    assert!(result.as_ref().err().is_some_and(Error::is_not_found));
}

#[tokio::test]
async fn test_delete_camera() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/camera/9/delete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true, "message": "Camera deleted successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_camera(&CameraId::Int(9)).await.unwrap();
}
