// Integration tests for the `Dashboard` controller using wiremock.
#![allow(clippy::unwrap_used)]

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sentinel_core::{
    Configuration, CoreError, Dashboard, LayoutMode, NotificationKind, SdoClient, ServerStats,
    ViewMode,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn client() -> SdoClient {
    SdoClient::from_reqwest(reqwest::Client::new())
}

fn dashboard(base_url: &str) -> Dashboard {
    let config = Configuration::new(3600, base_url).unwrap();
    Dashboard::new(client(), config, 1280)
}

fn servers_body(flags: &[i64]) -> Value {
    let servers: Vec<Value> = flags
        .iter()
        .enumerate()
        .map(|(i, flag)| {
            json!({
                "id": i, "name": format!("srv-{i}"), "ip": "10.0.0.1", "port": 7000 + i,
                "is_free": flag, "current_players": 0, "max_players": 16,
                "coordinate_x_start": null,
                "created_at": "2024-05-01T10:00:00Z", "updated_at": "2024-05-01T10:00:00Z"
            })
        })
        .collect();
    Value::Array(servers)
}

async fn mount_servers(server: &MockServer, flags: &[i64]) {
    Mock::given(method("GET"))
        .and(path("/sdo/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(servers_body(flags)))
        .mount(server)
        .await;
}

async fn mount_players(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/sdo/players"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
}

// ── Fetching ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_unconfigured_refresh_never_hits_the_network() {
    let server = MockServer::start().await;
    mount_servers(&server, &[1]).await;
    let dash = Dashboard::new(client(), Configuration::default(), 1280);

    let err = dash.refresh().await.unwrap_err();

    assert!(matches!(err, CoreError::NotConfigured));
    assert!(server.received_requests().await.unwrap().is_empty());
    let state = dash.snapshot();
    assert_eq!(state.notifications.len(), 1);
    assert_eq!(state.notifications.count_of(NotificationKind::Warning), 1);
    assert!(!state.loading);
    assert!(state.servers.is_none());
}

#[tokio::test]
async fn test_refresh_renders_server_stats() {
    let server = MockServer::start().await;
    mount_servers(&server, &[1, 0, 1, 1, 0]).await;
    let dash = dashboard(&format!("{}/", server.uri()));

    assert_ok!(dash.refresh().await);

    let state = dash.snapshot();
    let view = state.servers.unwrap();
    assert_eq!(
        view.stats,
        ServerStats {
            total: 5,
            free: 3,
            occupied: 2
        }
    );
    assert_eq!(view.cards[0].title, "srv-0");
    assert!(!state.loading);
    assert!(state.last_refresh.is_some());
    assert!(state.notifications.is_empty());
}

#[tokio::test]
async fn test_failure_keeps_previous_render() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sdo/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(servers_body(&[1, 1])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sdo/servers"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let dash = dashboard(&server.uri());

    assert_ok!(dash.refresh().await);
    dash.tick_countdown();
    let err = dash.refresh().await.unwrap_err();

    assert!(matches!(err, CoreError::Status { status: 503, .. }));
    let state = dash.snapshot();
    assert_eq!(state.servers.unwrap().stats.total, 2);
    assert!(!state.loading);
    assert_eq!(state.countdown.remaining(), 3600);
    let latest = state.notifications.latest().unwrap();
    assert_eq!(latest.kind, NotificationKind::Error);
    assert_eq!(latest.message, "Servers error: HTTP 503: Service Unavailable");
}

#[tokio::test]
async fn test_non_array_body_is_reported_like_a_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sdo/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "down" })))
        .mount(&server)
        .await;
    let dash = dashboard(&server.uri());

    let err = dash.refresh().await.unwrap_err();

    assert!(matches!(err, CoreError::Parse { .. }));
    assert_eq!(
        dash.snapshot()
            .notifications
            .count_of(NotificationKind::Error),
        1
    );
}

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sdo/servers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(servers_body(&[1]))
                .set_delay(Duration::from_millis(500)),
        )
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sdo/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(servers_body(&[0, 0, 0])))
        .mount(&server)
        .await;
    let dash = dashboard(&server.uri());

    let slow = {
        let dash = dash.clone();
        tokio::spawn(async move { dash.refresh().await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_ok!(dash.refresh().await);
    assert_ok!(slow.await.unwrap());

    let view = dash.snapshot().servers.unwrap();
    assert_eq!(view.stats.total, 3);
    assert_eq!(view.stats.occupied, 3);
}

// ── View and layout ─────────────────────────────────────────────────

#[tokio::test]
async fn test_view_toggles_fetch_the_mode_active_at_call_time() {
    let server = MockServer::start().await;
    mount_servers(&server, &[1]).await;
    mount_players(&server).await;
    let dash = dashboard(&server.uri());

    assert_ok!(dash.toggle_view_mode().await);
    assert_ok!(dash.toggle_view_mode().await);

    let requests = server.received_requests().await.unwrap();
    let paths: Vec<_> = requests.iter().map(|r| r.url.path().to_owned()).collect();
    assert_eq!(paths, vec!["/sdo/players", "/sdo/servers"]);

    let state = dash.snapshot();
    assert_eq!(state.view_mode, ViewMode::Servers);
    assert_eq!(state.players.unwrap().placeholder(), Some("No players found"));
}

#[tokio::test]
async fn test_view_change_restarts_the_countdown() {
    let server = MockServer::start().await;
    mount_servers(&server, &[1]).await;
    mount_players(&server).await;
    let dash = dashboard(&server.uri());
    dash.tick_countdown();
    dash.tick_countdown();
    assert_eq!(dash.snapshot().countdown.remaining(), 3598);

    assert_ok!(dash.toggle_view_mode().await);

    let countdown = dash.snapshot().countdown;
    assert_eq!(countdown.remaining(), countdown.total());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_toggles_visit_both_modes() {
    let server = MockServer::start().await;
    mount_servers(&server, &[1]).await;
    mount_players(&server).await;
    let dash = dashboard(&server.uri());

    let first = {
        let dash = dash.clone();
        tokio::spawn(async move { dash.toggle_view_mode().await })
    };
    let second = {
        let dash = dash.clone();
        tokio::spawn(async move { dash.toggle_view_mode().await })
    };
    assert_ok!(first.await.unwrap());
    assert_ok!(second.await.unwrap());

    assert_eq!(dash.snapshot().view_mode, ViewMode::Servers);
    let mut paths: Vec<_> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_owned())
        .collect();
    paths.sort();
    assert_eq!(paths, vec!["/sdo/players", "/sdo/servers"]);
}

#[tokio::test]
async fn test_layout_changes_never_fetch() {
    let server = MockServer::start().await;
    let dash = dashboard(&server.uri());

    assert_eq!(dash.snapshot().layout_mode, LayoutMode::Grid);
    assert_eq!(dash.toggle_layout_mode(), LayoutMode::List);
    dash.set_layout_mode(LayoutMode::Grid);

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_initial_layout_follows_viewport() {
    let dash = Dashboard::new(client(), Configuration::default(), 600);
    assert_eq!(dash.snapshot().layout_mode, LayoutMode::List);
}

#[tokio::test]
async fn test_resize_only_suggests() {
    let dash = Dashboard::new(client(), Configuration::default(), 1280);

    assert_eq!(dash.on_resize(1100), None);
    assert_eq!(dash.on_resize(500), Some(LayoutMode::List));
    assert_eq!(dash.snapshot().layout_mode, LayoutMode::Grid);
}

// ── Settings and timers ─────────────────────────────────────────────

#[tokio::test]
async fn test_apply_settings_with_url_starts_polling() {
    let server = MockServer::start().await;
    mount_servers(&server, &[1, 0]).await;
    let dash = Dashboard::new(client(), Configuration::default(), 1280);

    assert_ok!(dash.apply_settings_input("120", &server.uri()).await);

    assert!(dash.timers_running().await);
    let state = dash.snapshot();
    assert!(state.countdown_visible);
    assert_eq!(state.countdown.total(), 120);
    assert_eq!(state.servers.unwrap().stats.total, 2);
    assert_eq!(state.notifications.count_of(NotificationKind::Success), 1);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);

    dash.shutdown().await;
    assert!(!dash.timers_running().await);
}

#[tokio::test]
async fn test_clearing_the_url_stops_polling() {
    let server = MockServer::start().await;
    mount_servers(&server, &[1]).await;
    let dash = Dashboard::new(client(), Configuration::default(), 1280);
    assert_ok!(dash.apply_settings_input("60", &server.uri()).await);

    assert_ok!(dash.apply_settings_input("60", "   ").await);

    assert!(!dash.timers_running().await);
    let state = dash.snapshot();
    assert!(!state.countdown_visible);
    assert!(!state.config.is_polling_enabled());
    let latest = state.notifications.latest().unwrap();
    assert_eq!(latest.kind, NotificationKind::Success);
    assert!(latest.message.contains("Add a base URL"));
}

#[tokio::test]
async fn test_invalid_interval_leaves_configuration_untouched() {
    let dash = dashboard("http://127.0.0.1:9");

    assert_err!(dash.apply_settings_input("0", "http://elsewhere").await);
    assert_err!(dash.apply_settings_input("often", "http://elsewhere").await);

    let state = dash.snapshot();
    assert_eq!(state.config.base_url(), "http://127.0.0.1:9");
    assert_eq!(state.config.refresh_interval_secs(), 3600);
    assert_eq!(state.notifications.count_of(NotificationKind::Error), 2);
    assert!(!dash.timers_running().await);
}

#[tokio::test]
async fn test_start_timers_without_url_hides_countdown() {
    let dash = Dashboard::new(client(), Configuration::default(), 1280);

    dash.start_timers().await;

    assert!(!dash.timers_running().await);
    assert!(!dash.snapshot().countdown_visible);
}

#[tokio::test]
async fn test_refresh_timer_fetches_the_active_mode_each_period() {
    let server = MockServer::start().await;
    mount_servers(&server, &[1]).await;
    mount_players(&server).await;
    let config = Configuration::new(1, &server.uri()).unwrap();
    let dash = Dashboard::new(client(), config, 1280);

    dash.start_timers().await;
    assert_ok!(dash.set_view_mode(ViewMode::Players).await);
    tokio::time::sleep(Duration::from_millis(1500)).await;

    let paths: Vec<_> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_owned())
        .collect();
    assert_eq!(paths, vec!["/sdo/players", "/sdo/players"]);

    dash.stop_timers().await;
    tokio::time::sleep(Duration::from_millis(1500)).await;

    assert_eq!(server.received_requests().await.unwrap().len(), 2);
    assert!(!dash.snapshot().countdown_visible);
}

// ── Clock-driven behavior ───────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_countdown_ticks_once_per_second() {
    let dash = dashboard("http://127.0.0.1:9");
    dash.start_timers().await;

    tokio::time::sleep(Duration::from_millis(3500)).await;

    let state = dash.snapshot();
    assert!(state.countdown_visible);
    assert_eq!(state.countdown.remaining(), 3597);
    dash.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_restarting_timers_does_not_double_tick() {
    let dash = dashboard("http://127.0.0.1:9");
    dash.start_timers().await;
    dash.start_timers().await;

    tokio::time::sleep(Duration::from_millis(2500)).await;

    assert_eq!(dash.snapshot().countdown.remaining(), 3598);
    dash.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_error_notification_expires_after_five_seconds() {
    let dash = Dashboard::new(client(), Configuration::default(), 1280);
    dash.notify(NotificationKind::Error, "boom");

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(dash.snapshot().notifications.len(), 1);

    tokio::time::sleep(Duration::from_secs(4)).await;
    assert!(dash.snapshot().notifications.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_dismiss_latest_removes_newest_only() {
    let dash = Dashboard::new(client(), Configuration::default(), 1280);
    let first = dash.notify(NotificationKind::Warning, "one");
    dash.notify(NotificationKind::Error, "two");

    assert!(dash.dismiss_latest());

    let state = dash.snapshot();
    assert_eq!(state.notifications.len(), 1);
    assert_eq!(state.notifications.latest().unwrap().id, first);
}
