//! Client and actor pipeline against an in-process fake lottery backend

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::{get, post}, Json, Router};
use serde_json::{json, Value};
use tokio::sync::mpsc;

use lottery_display::{
    ApiClient, ApiError, AppActor, ConnectionStatus, NetworkActor, RenderState, Screen, Settings, UiEvent,
};

struct Lottery {
    participants: Vec<(String, String)>,
    results: Option<Value>,
    last_update: f64,
}

type Shared = Arc<Mutex<Lottery>>;

fn status_body(lottery: &Lottery) -> Value {
    let participants: Vec<Value> = lottery
        .participants
        .iter()
        .map(|(id, name)| json!({ "id": id, "name": name }))
        .collect();

    json!({
        "participants": participants,
        "participantCount": lottery.participants.len(),
        "keyword": "抽奖",
        "prizes": { "First Prize": 1, "Second Prize": 1 },
        "inProgress": false,
        "results": lottery.results,
        "lastUpdate": lottery.last_update,
        "status": "running",
    })
}

async fn status(State(lottery): State<Shared>) -> Json<Value> {
    Json(status_body(&lottery.lock().unwrap()))
}

async fn trigger_draw(State(lottery): State<Shared>) -> (StatusCode, Json<Value>) {
    let mut lottery = lottery.lock().unwrap();
    if lottery.participants.is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "No participants" })));
    }

    let winner = |i: usize| {
        let (id, name) = &lottery.participants[i];
        json!([{ "id": id, "name": name }])
    };
    let results = json!({ "First Prize": winner(0), "Second Prize": winner(1) });
    lottery.results = Some(results);
    lottery.last_update += 1.0;
    (StatusCode::OK, Json(json!({ "message": "Draw completed" })))
}

// Reset clears the round but leaves lastUpdate untouched, as the real backend does
async fn reset(State(lottery): State<Shared>) -> Json<Value> {
    let mut lottery = lottery.lock().unwrap();
    lottery.participants.clear();
    lottery.results = None;
    Json(json!({ "message": "Lottery reset" }))
}

fn lottery_router(lottery: Shared) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/trigger-draw", post(trigger_draw))
        .route("/reset", post(reset))
        .with_state(lottery)
}

fn seeded(names: &[(&str, &str)]) -> Shared {
    Arc::new(Mutex::new(Lottery {
        participants: names.iter().map(|(id, name)| (id.to_string(), name.to_string())).collect(),
        results: None,
        last_update: 1.0,
    }))
}

async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn wait_for<F>(render_rx: &mut mpsc::UnboundedReceiver<RenderState>, mut pred: F) -> RenderState
where
    F: FnMut(&RenderState) -> bool,
{
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let state = render_rx.recv().await.expect("app actor stopped");
            if pred(&state) {
                return state;
            }
        }
    })
    .await
    .expect("timed out waiting for render state")
}

#[tokio::test]
async fn test_fetch_status_decodes_backend_payload() {
    let url = spawn_backend(lottery_router(seeded(&[("!a1", "Alice"), ("!b2", "Bob")]))).await;

    let snapshot = ApiClient::new(format!("{url}/")).fetch_status().await.unwrap();

    assert_eq!(snapshot.participant_count, 2);
    assert_eq!(snapshot.participants[1].name, "Bob");
    assert_eq!(snapshot.keyword, "抽奖");
    assert!(!snapshot.in_progress);
    assert!(snapshot.results.is_none());
    assert_eq!(snapshot.last_update.0, 1.0);
    assert_eq!(snapshot.prizes.get("Second Prize"), Some(&1));
}

#[tokio::test]
async fn test_trigger_draw_rejection_carries_backend_message() {
    let url = spawn_backend(lottery_router(seeded(&[]))).await;

    let err = ApiClient::new(url).trigger_draw().await.unwrap_err();

    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message.as_deref(), Some("No participants"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_reset_succeeds() {
    let url = spawn_backend(lottery_router(seeded(&[("!a1", "Alice")]))).await;
    ApiClient::new(url).reset().await.unwrap();
}

#[tokio::test]
async fn test_status_server_error() {
    let router = Router::new().route("/status", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
    let url = spawn_backend(router).await;

    let err = ApiClient::new(url).fetch_status().await.unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 500, message: None }));
    assert_eq!(err.kind(), "status");
}

#[tokio::test]
async fn test_malformed_status_is_decode_error() {
    let router = Router::new().route("/status", get(|| async { "<html>maintenance</html>" }));
    let url = spawn_backend(router).await;

    let err = ApiClient::new(url).fetch_status().await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Grab a free port, then close it
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = ApiClient::new(format!("http://{addr}")).fetch_status().await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn test_draw_and_reset_through_actors() {
    let lottery = seeded(&[("!a1", "Alice"), ("!b2", "Bob")]);
    let url = spawn_backend(lottery_router(lottery.clone())).await;

    let settings = Settings {
        api_url: url.clone(),
        poll_interval: Duration::from_millis(100),
        ..Settings::default()
    };

    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    tokio::spawn(NetworkActor::new(ApiClient::new(url), net_resp_tx).run(net_cmd_rx));
    let app = tokio::spawn(AppActor::new(&settings, net_cmd_tx, render_tx).run(ui_rx, net_resp_rx));

    let lobby = wait_for(&mut render_rx, |s| s.screen == Screen::Lobby).await;
    assert_eq!(lobby.connection, ConnectionStatus::Connected);
    assert_eq!(lobby.participant_count, 2);
    assert_eq!(lobby.keyword, "抽奖");
    assert!(lobby.can_trigger);

    ui_tx.send(UiEvent::TriggerDraw).unwrap();
    let results = wait_for(&mut render_rx, |s| s.screen == Screen::Results).await;
    let winners = results.winners.expect("winners latched");
    assert_eq!(winners.keys().collect::<Vec<_>>(), ["First Prize", "Second Prize"]);
    assert_eq!(winners.get("First Prize").unwrap()[0].name, "Alice");

    ui_tx.send(UiEvent::Reset).unwrap();
    // The post-reset fetch carries the same lastUpdate and must still apply
    let home = wait_for(&mut render_rx, |s| s.screen == Screen::Lobby && s.participant_count == 0).await;
    assert!(home.winners.is_none());
    assert!(home.participants.is_empty());
    assert!(!home.can_trigger);
    assert_eq!(home.last_update.map(|w| w.0), Some(2.0));
    assert!(lottery.lock().unwrap().results.is_none());

    // Results stay cleared across later polls with the same lastUpdate
    tokio::time::sleep(Duration::from_millis(350)).await;
    while let Ok(state) = render_rx.try_recv() {
        assert_eq!(state.screen, Screen::Lobby);
    }

    ui_tx.send(UiEvent::Quit).unwrap();
    tokio::time::timeout(Duration::from_secs(2), app).await.unwrap().unwrap();
}
