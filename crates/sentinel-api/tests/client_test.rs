// Integration tests for `SdoClient` using wiremock.
#![allow(clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sentinel_api::{Error, Ident, SdoClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, SdoClient) {
    let server = MockServer::start().await;
    let client = SdoClient::from_reqwest(reqwest::Client::new());
    (server, client)
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_servers() {
    let (server, client) = setup().await;

    let body = json!([
        {
            "id": 1, "name": "Alpha", "ip": "10.0.0.1", "port": 7777,
            "is_free": 1, "current_players": 0, "max_players": 16,
            "coordinate_x_start": null,
            "created_at": "2024-05-01T10:00:00Z", "updated_at": "2024-05-01T10:00:00Z"
        },
        {
            "id": 2, "name": "Beta", "ip": "10.0.0.2", "port": 7778,
            "is_free": 0, "current_players": 12, "max_players": 16,
            "coordinate_x_start": 0, "coordinate_x_end": 10,
            "coordinate_y_start": 0, "coordinate_y_end": 10,
            "coordinate_z_start": 0, "coordinate_z_end": 10,
            "created_at": "2024-05-01T10:00:00Z", "updated_at": "2024-05-01T10:00:00Z"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/sdo/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let servers = client
        .list_servers(&format!("{}/sdo/servers", server.uri()))
        .await
        .unwrap();

    assert_eq!(servers.len(), 2);
    assert_eq!(servers[0].name, "Alpha");
    assert!(servers[0].is_free());
    assert!(servers[0].coordinate_ranges().is_none());
    assert_eq!(servers[1].address(), "10.0.0.2:7778");
    assert!(servers[1].coordinate_ranges().is_some());
}

#[tokio::test]
async fn test_list_players() {
    let (server, client) = setup().await;

    let body = json!([
        {
            "id": 9, "name": "Nova", "client_id": 400, "server_id": 2,
            "x": 1.0, "y": 2.0, "z": 3.0,
            "created_at": "2024-05-01T10:00:00Z", "updated_at": "2024-05-01T10:00:00Z"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/sdo/players"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let players = client
        .list_players(&format!("{}/sdo/players", server.uri()))
        .await
        .unwrap();

    assert_eq!(players.len(), 1);
    assert_eq!(players[0].server_id, Ident::Int(2));
    assert!((players[0].z - 3.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_get_json_passes_body_through() {
    let (server, client) = setup().await;

    let body = json!([{ "anything": ["goes", 1, null] }]);

    Mock::given(method("GET"))
        .and(path("/raw"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let value = client.get_json(&format!("{}/raw", server.uri())).await.unwrap();
    assert_eq!(value, body);
}

// ── Error-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_non_success_status_is_reported() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/sdo/servers"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client
        .list_servers(&format!("{}/sdo/servers", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Status { status: 503, .. }));
    assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
}

#[tokio::test]
async fn test_invalid_body_is_a_parse_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/sdo/players"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client
        .list_players(&format!("{}/sdo/players", server.uri()))
        .await
        .unwrap_err();

    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "<html>oops</html>"),
        other => panic!("expected Deserialization, got {other:?}"),
    }
}

#[tokio::test]
async fn test_object_instead_of_array_is_a_parse_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/sdo/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "nope" })))
        .mount(&server)
        .await;

    let err = client
        .list_servers(&format!("{}/sdo/servers", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Deserialization { .. }));
}

#[tokio::test]
async fn test_malformed_url_fails_before_sending() {
    let client = SdoClient::from_reqwest(reqwest::Client::new());

    let err = client.list_servers("not a url/sdo/servers").await.unwrap_err();

    assert!(matches!(err, Error::InvalidUrl(_)));
}
