//! End-to-end API tests: CRUD flow, report downloads, and the full
//! betting scenario driven through the router.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use betpool::config::AppConfig;
use betpool::server::build_router;
use betpool::server::routes::ServerState;

fn app() -> Router {
    build_router(Arc::new(ServerState::new(AppConfig::default())))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    let request = match body {
        Some(v) => builder.body(Body::from(serde_json::to_vec(&v).unwrap())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 10_000_000)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

fn as_json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

fn game_payload() -> Value {
    json!({
        "name": "Arsenal vs Chelsea",
        "homeTeam": "Arsenal",
        "awayTeam": "Chelsea",
        "odds": { "home": 2.0, "draw": 3.0, "away": 1.5 }
    })
}

#[tokio::test]
async fn game_crud_flow() {
    let app = app();

    let (status, body) = send(&app, "POST", "/api/games", Some(game_payload())).await;
    assert_eq!(status, StatusCode::CREATED);
    let game = as_json(&body);
    let id = game["id"].as_str().unwrap().to_string();
    assert_eq!(game["homeTeam"], "Arsenal");
    assert_eq!(game["status"], "active");

    let (status, body) = send(&app, "GET", &format!("/api/games/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["name"], "Arsenal vs Chelsea");

    let mut updated = game_payload();
    updated["name"] = json!("Arsenal vs Chelsea (rescheduled)");
    let (status, body) = send(&app, "PUT", &format!("/api/games/{id}"), Some(updated)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["name"], "Arsenal vs Chelsea (rescheduled)");

    let (status, _) = send(&app, "DELETE", &format!("/api/games/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &format!("/api/games/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(as_json(&body)["error"].as_str().unwrap().contains(&id));
}

#[tokio::test]
async fn invalid_game_is_rejected() {
    let app = app();
    let mut payload = game_payload();
    payload["odds"]["draw"] = json!(0.0);
    let (status, body) = send(&app, "POST", "/api/games", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(as_json(&body)["error"].as_str().unwrap().contains("odds"));
}

#[tokio::test]
async fn betting_scenario_end_to_end() {
    let app = app();

    let (_, body) = send(&app, "POST", "/api/games", Some(game_payload())).await;
    let game_id = as_json(&body)["id"].as_str().unwrap().to_string();

    // Bob 10 on home @ 2.0, Bob 5 on draw @ 3.0, Alice 20 on away @ 1.5.
    let mut bet_ids = Vec::new();
    for (player, selection, amount) in
        [("Bob", "home", 10.0), ("Bob", "draw", 5.0), ("Alice", "away", 20.0)]
    {
        let (status, body) = send(
            &app,
            "POST",
            "/api/bets",
            Some(json!({
                "player": player,
                "gameId": game_id,
                "type": selection,
                "amount": amount
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let bet = as_json(&body);
        assert_eq!(bet["status"], "pending");
        bet_ids.push(bet["id"].as_str().unwrap().to_string());
    }

    // Snapshots: odd and possible win are fixed at placement.
    let (_, body) = send(&app, "GET", &format!("/api/bets/{}", bet_ids[0]), None).await;
    let bob_home = as_json(&body);
    assert_eq!(bob_home["odd"], json!(2.0));
    assert_eq!(bob_home["possibleWin"], json!(20.0));
    assert_eq!(bob_home["gameDetails"]["homeTeam"], "Arsenal");

    // Settle: Bob's home bet won, Alice's lost, Bob's draw stays pending.
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/bets/{}", bet_ids[0]),
        Some(json!({ "status": "won" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/bets/{}", bet_ids[2]),
        Some(json!({ "status": "lost" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Deleting the game must not disturb the placed bets.
    let (status, _) = send(&app, "DELETE", &format!("/api/games/{game_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, body) = send(&app, "GET", "/api/bets", None).await;
    let bets = as_json(&body);
    assert_eq!(bets.as_array().unwrap().len(), 3);
    assert_eq!(bets[2]["gameName"], "Arsenal vs Chelsea");

    // Both report formats download from the store snapshot.
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate-pdf-report")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE.as_str()], "application/pdf");
    let disposition = resp.headers()[header::CONTENT_DISPOSITION.as_str()]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"report_"));
    assert!(disposition.ends_with(".pdf\""));
    let pdf = axum::body::to_bytes(resp.into_body(), 10_000_000).await.unwrap();
    assert!(pdf.starts_with(b"%PDF"));

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate-word-report")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[header::CONTENT_TYPE.as_str()],
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    let docx = axum::body::to_bytes(resp.into_body(), 10_000_000).await.unwrap();
    assert!(docx.starts_with(b"PK"));
}

#[tokio::test]
async fn report_accepts_body_override() {
    let app = app(); // empty store; the body supplies the dataset
    let payload = json!({
        "bets": [{
            "id": "b1", "player": "Bob", "gameId": "g1",
            "gameName": "Arsenal vs Chelsea", "type": "home",
            "amount": 10.0, "odd": 2.0, "possibleWin": 20.0,
            "status": "won", "createdAt": "2025-01-01T00:00:00Z",
            "gameDetails": { "homeTeam": "Arsenal", "awayTeam": "Chelsea" }
        }],
        "games": []
    });
    let (status, body) = send(&app, "POST", "/generate-pdf-report", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with(b"%PDF"));
}

#[tokio::test]
async fn malformed_override_record_fails_with_500() {
    let app = app();
    // Empty player name: the whole report must fail, not silently omit.
    let payload = json!({
        "bets": [{
            "id": "b1", "player": "", "gameId": "g1",
            "gameName": "Arsenal vs Chelsea", "type": "home",
            "amount": 10.0, "odd": 2.0, "possibleWin": 20.0,
            "status": "pending", "createdAt": "2025-01-01T00:00:00Z"
        }],
        "games": []
    });
    let (status, body) = send(&app, "POST", "/generate-word-report", Some(payload)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let err = as_json(&body);
    assert!(err["error"].as_str().unwrap().contains("b1"));
}

#[tokio::test]
async fn unknown_wire_values_are_normalized_not_rejected() {
    let app = app();
    let payload = json!({
        "bets": [{
            "id": "b1", "player": "Bob", "gameId": "g1",
            "gameName": "Arsenal vs Chelsea", "type": "banker",
            "amount": 10.0, "odd": 2.0, "possibleWin": 20.0,
            "status": "void", "createdAt": "2025-01-01T00:00:00Z"
        }],
        "games": []
    });
    // "banker"/"void" collapse to draw/pending; the report still renders.
    let (status, body) = send(&app, "POST", "/generate-pdf-report", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with(b"%PDF"));
}
