use anime_shelf::api::AppState;
use anime_shelf::config::{Config, Environment};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use sea_orm::ConnectionTrait;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

async fn spawn_app_with(environment: Environment) -> (Arc<AppState>, Router) {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.general.environment = environment;

    let state = anime_shelf::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    let router = anime_shelf::api::router(state.clone());
    (state, router)
}

async fn spawn_app() -> Router {
    spawn_app_with(Environment::Development).await.1
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create(app: &Router, body: Value) -> i64 {
    let (status, json) = send(app, "POST", "/api/anime", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {json}");
    json["id"].as_i64().expect("numeric id")
}

#[tokio::test]
async fn test_health() {
    let app = spawn_app().await;

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "OK");
    assert_eq!(json["message"], "Anime Shelf API is running");
}

#[tokio::test]
async fn test_create_then_get_returns_submitted_fields() {
    let app = spawn_app().await;

    let (status, json) = send(
        &app,
        "POST",
        "/api/anime",
        Some(json!({
            "title": "Naruto",
            "total_episodes": 220,
            "episodes_watched": 50,
            "status": "watching"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "Anime created successfully");
    let id = json["id"].as_i64().expect("numeric id");

    let (status, anime) = send(&app, "GET", &format!("/api/anime/{id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(anime["id"], id);
    assert_eq!(anime["title"], "Naruto");
    assert_eq!(anime["total_episodes"], 220);
    assert_eq!(anime["episodes_watched"], 50);
    assert_eq!(anime["status"], "watching");
    assert!(anime["image_url"].is_null());
    assert!(anime["created_at"].is_string());
}

#[tokio::test]
async fn test_every_field_round_trips_including_long_text() {
    let app = spawn_app().await;

    let description = "A wandering swordsman. ".repeat(64 * 1024 / 23 + 1);
    let image_url = format!("https://img.example.com/{}.jpg", "c".repeat(64 * 1024));
    let submitted = json!({
        "title": "Rurouni Kenshin",
        "image_url": image_url,
        "total_episodes": 94,
        "episodes_watched": 94,
        "status": "completed",
        "genres": "Action, Historical, Romance",
        "description": description,
    });

    let id = create(&app, submitted.clone()).await;
    let (status, anime) = send(&app, "GET", &format!("/api/anime/{id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(anime["id"], id);
    for field in [
        "title",
        "image_url",
        "total_episodes",
        "episodes_watched",
        "status",
        "genres",
        "description",
    ] {
        assert_eq!(anime[field], submitted[field], "field {field} differs");
    }
    assert!(anime["description"].as_str().unwrap().len() > 64 * 1024);
    assert!(!anime["created_at"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_form_encoded_bodies_are_accepted() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/anime")
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(Body::from(
                    "title=Samurai+Champloo&total_episodes=26&episodes_watched=2&status=watching",
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    let id = json["id"].as_i64().unwrap();

    let (_, anime) = send(&app, "GET", &format!("/api/anime/{id}"), None).await;
    assert_eq!(anime["title"], "Samurai Champloo");
    assert_eq!(anime["total_episodes"], 26);
    assert_eq!(anime["episodes_watched"], 2);
    assert_eq!(anime["status"], "watching");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/anime/{id}"))
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(Body::from("title=&total_episodes=0"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["details"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_empty_status_is_stored_as_null() {
    let app = spawn_app().await;
    let id = create(&app, json!({ "title": "Planetes", "status": "" })).await;

    let (_, anime) = send(&app, "GET", &format!("/api/anime/{id}"), None).await;
    assert!(anime["status"].is_null());

    let (status, _) = send(
        &app,
        "POST",
        "/api/anime",
        Some(json!({ "title": "Planetes 2", "status": false })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let app = spawn_app().await;

    let (status, json) = send(&app, "GET", "/api/anime", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([]));

    for title in ["A", "B", "C"] {
        create(&app, json!({ "title": title })).await;
    }

    let (status, json) = send(&app, "GET", "/api/anime", None).await;
    assert_eq!(status, StatusCode::OK);

    let titles: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["C", "B", "A"]);
}

#[tokio::test]
async fn test_validation_errors() {
    let app = spawn_app().await;

    let (status, json) = send(&app, "POST", "/api/anime", Some(json!({ "title": "   " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Validation failed");
    assert!(
        json["details"][0]
            .as_str()
            .unwrap()
            .contains("Title is required")
    );

    let (status, json) = send(
        &app,
        "POST",
        "/api/anime",
        Some(json!({ "title": "Bleach", "total_episodes": 12, "episodes_watched": 13 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        json["details"][0]
            .as_str()
            .unwrap()
            .contains("cannot exceed")
    );

    let (status, _) = send(
        &app,
        "POST",
        "/api/anime",
        Some(json!({ "title": "Bleach", "status": "dropped" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = send(
        &app,
        "POST",
        "/api/anime",
        Some(json!({ "total_episodes": 0, "status": "paused" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["details"].as_array().unwrap().len(), 3);

    let (_, json) = send(&app, "GET", "/api/anime", None).await;
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn test_update_validates_payload() {
    let app = spawn_app().await;
    let id = create(&app, json!({ "title": "Mushishi" })).await;

    let (status, json) = send(
        &app,
        "PUT",
        &format!("/api/anime/{id}"),
        Some(json!({ "title": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        json["details"][0]
            .as_str()
            .unwrap()
            .contains("Title is required")
    );
}

#[tokio::test]
async fn test_invalid_ids_are_rejected_before_lookup() {
    let app = spawn_app().await;

    let (status, json) = send(&app, "GET", "/api/anime/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid ID parameter");

    create(&app, json!({ "title": "Twelve" })).await;
    let (status, json) = send(&app, "GET", "/api/anime/1abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid ID parameter");

    let (status, _) = send(&app, "GET", "/api/anime/0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "DELETE", "/api/anime/-4", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The id is checked before the body.
    let (status, json) = send(&app, "PUT", "/api/anime/abc", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid ID parameter");
}

#[tokio::test]
async fn test_missing_records_are_not_found() {
    let app = spawn_app().await;

    let (status, json) = send(&app, "GET", "/api/anime/999999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Anime not found");

    let (status, _) = send(
        &app,
        "PUT",
        "/api/anime/999999",
        Some(json!({ "title": "Ghost", "total_episodes": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/api/anime/999999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_replaces_the_whole_record() {
    let app = spawn_app().await;
    let id = create(
        &app,
        json!({
            "title": "Cowboy Bebop",
            "total_episodes": 26,
            "episodes_watched": 3,
            "genres": "Sci-Fi, Noir",
            "status": "watching"
        }),
    )
    .await;

    let (_, before) = send(&app, "GET", &format!("/api/anime/{id}"), None).await;

    let (status, json) = send(
        &app,
        "PUT",
        &format!("/api/anime/{id}"),
        Some(json!({ "title": "Cowboy Bebop", "episodes_watched": 26, "status": "completed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Anime updated successfully");

    let (_, after) = send(&app, "GET", &format!("/api/anime/{id}"), None).await;
    assert_eq!(after["status"], "completed");
    assert_eq!(after["episodes_watched"], 26);
    assert!(after["total_episodes"].is_null());
    assert!(after["genres"].is_null());
    assert_eq!(after["created_at"], before["created_at"]);
}

#[tokio::test]
async fn test_partial_update_is_not_checked_against_stored_total() {
    let app = spawn_app().await;
    let id = create(
        &app,
        json!({ "title": "Haikyu", "total_episodes": 25, "episodes_watched": 3 }),
    )
    .await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/anime/{id}"),
        Some(json!({ "title": "Haikyu", "episodes_watched": 40 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_is_not_repeatable() {
    let app = spawn_app().await;
    let id = create(&app, json!({ "title": "Trigun" })).await;
    let uri = format!("/api/anime/{id}");

    let (status, json) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Anime deleted successfully");

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let app = spawn_app().await;
    let first = create(&app, json!({ "title": "One" })).await;
    let second = create(&app, json!({ "title": "Two" })).await;

    send(&app, "DELETE", &format!("/api/anime/{second}"), None).await;
    let third = create(&app, json!({ "title": "Three" })).await;

    assert!(second > first);
    assert!(third > second);
}

#[tokio::test]
async fn test_status_filter() {
    let app = spawn_app().await;
    create(&app, json!({ "title": "Dorohedoro", "status": "plan" })).await;
    create(&app, json!({ "title": "Vinland Saga", "status": "watching" })).await;
    create(&app, json!({ "title": "Akira", "status": "plan" })).await;

    let (status, json) = send(&app, "GET", "/api/anime/status/plan", None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Akira", "Dorohedoro"]);

    let (status, json) = send(&app, "GET", "/api/anime/status/dropped", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn test_stats() {
    let (state, app) = spawn_app_with(Environment::Development).await;

    for (title, status) in [
        ("W1", "watching"),
        ("W2", "watching"),
        ("C1", "completed"),
        ("P1", "plan"),
    ] {
        create(&app, json!({ "title": title, "status": status })).await;
    }

    // Rows written outside the API can carry statuses the gate would reject.
    state
        .store()
        .conn
        .execute_unprepared(
            "INSERT INTO anime (title, status, created_at) \
             VALUES ('Legacy', 'unknown', '2020-01-01T00:00:00.000000Z')",
        )
        .await
        .unwrap();

    let (status, json) = send(&app, "GET", "/api/anime/stats", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({ "total": 5, "watching": 2, "completed": 1, "plan": 1 })
    );
}

#[tokio::test]
async fn test_duplicate_title_conflicts() {
    let app = spawn_app().await;
    create(&app, json!({ "title": "Monster" })).await;

    let (status, json) = send(&app, "POST", "/api/anime", Some(json!({ "title": "Monster" }))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "Duplicate entry");
    assert_eq!(json["message"], "An anime with this title already exists");
}

#[tokio::test]
async fn test_numeric_strings_are_stored_as_integers() {
    let app = spawn_app().await;
    let id = create(
        &app,
        json!({ "title": "Frieren", "total_episodes": "28", "episodes_watched": "4" }),
    )
    .await;

    let (_, anime) = send(&app, "GET", &format!("/api/anime/{id}"), None).await;
    assert_eq!(anime["total_episodes"], 28);
    assert_eq!(anime["episodes_watched"], 4);
}

#[tokio::test]
async fn test_unmatched_routes() {
    let app = spawn_app().await;

    let (status, json) = send(&app, "GET", "/api/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Not found");
    assert_eq!(json["message"], "Route GET /api/nope not found");

    let (status, json) = send(&app, "PATCH", "/api/anime", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Route PATCH /api/anime not found");
}

#[tokio::test]
async fn test_malformed_bodies() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/anime")
                .header("Content-Type", "application/json")
                .body(Body::from("{\"title\": "))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].is_string());

    // Without a JSON content type the body is ignored and the field rules fail.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/anime")
                .header("Content-Type", "text/plain")
                .body(Body::from("title=Naruto"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "Validation failed");
}

#[tokio::test]
async fn test_internal_errors_expose_detail_outside_production() {
    let (state, app) = spawn_app_with(Environment::Development).await;
    state
        .store()
        .conn
        .execute_unprepared("DROP TABLE anime")
        .await
        .unwrap();

    let (status, json) = send(&app, "GET", "/api/anime", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Internal server error");
    assert!(json["stack"].as_str().unwrap().contains("anime"));
}

#[tokio::test]
async fn test_internal_errors_hide_detail_in_production() {
    let (state, app) = spawn_app_with(Environment::Production).await;
    state
        .store()
        .conn
        .execute_unprepared("DROP TABLE anime")
        .await
        .unwrap();

    let (status, json) = send(&app, "GET", "/api/anime/stats", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Internal server error");
    assert!(json.get("stack").is_none());
}
