use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use favorite_chicken::{
    api::create_router_with_state,
    config::{AppConfig, SeedUser},
    create_app_state, create_app_state_with_config,
    domain::user::UserRole,
};
use serde_json::{json, Value};
use tower::util::ServiceExt;

async fn app() -> Router {
    let state = create_app_state().await.expect("Failed to create state");
    create_router_with_state(state)
}

async fn app_with_user(username: &str, password: &str) -> Router {
    let mut config = AppConfig::default();
    config.auth.users.push(SeedUser {
        username: username.to_string(),
        password: password.to_string(),
        role: UserRole::Sales,
    });

    let state = create_app_state_with_config(&config)
        .await
        .expect("Failed to create state");
    create_router_with_state(state)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

async fn create_item(app: &Router, name: &str) -> String {
    let (status, body) = send(app, json_request("POST", "/items", json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app().await;

    let (status, body) = send(&app, empty_request("GET", "/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, empty_request("GET", "/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"][0]["name"], "inventory");

    let (status, _) = send(&app, empty_request("GET", "/live")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_item_lifecycle() {
    let app = app().await;

    let id = create_item(&app, "Drumstick").await;

    let (status, body) = send(&app, empty_request("GET", &format!("/items/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Drumstick");

    let (status, body) = send(&app, json_request("POST", "/items", json!({ "name": "Drumstick" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["type"], "conflict_error");

    let (status, body) = send(&app, empty_request("DELETE", &format!("/items/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], true);

    let (status, body) = send(&app, empty_request("GET", &format!("/items/{}", id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["type"], "not_found_error");
}

#[tokio::test]
async fn test_invalid_ids_are_bad_requests() {
    let app = app().await;

    let (status, body) = send(&app, empty_request("GET", "/items/not-a-uuid")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_request_error");
}

#[tokio::test]
async fn test_archived_meal_set_rejects_sales() {
    let app = app().await;
    let wing = create_item(&app, "Wing").await;

    let (status, meal_set) = send(
        &app,
        json_request(
            "POST",
            "/meal-sets",
            json!({ "name": "Wing Box", "components": [{ "item_id": wing, "quantity": 6 }] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let meal_set_id = meal_set["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, empty_request("DELETE", &format!("/meal-sets/{}", meal_set_id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_active"], false);

    let (_, body) = send(&app, empty_request("GET", "/meal-sets")).await;
    assert_eq!(body["total"], 0);

    let (_, body) = send(&app, empty_request("GET", "/meal-sets?include_inactive=true")).await;
    assert_eq!(body["total"], 1);

    let (status, _) = send(
        &app,
        json_request("POST", "/sales", json!({ "meal_set_id": meal_set_id, "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_usage_report_from_sales() {
    let app = app().await;
    let wing = create_item(&app, "Wing").await;
    let drink = create_item(&app, "Drink").await;

    let (_, meal_set) = send(
        &app,
        json_request(
            "POST",
            "/meal-sets",
            json!({
                "name": "Combo A",
                "components": [
                    { "item_id": wing, "quantity": 2 },
                    { "item_id": drink, "quantity": 1 }
                ]
            }),
        ),
    )
    .await;
    let meal_set_id = meal_set["id"].as_str().unwrap().to_string();

    for (quantity, date) in [(3, "2024-05-01"), (1, "2024-05-02"), (4, "2024-06-01")] {
        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/sales",
                json!({ "meal_set_id": meal_set_id, "quantity": quantity, "sale_date": date }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(
        &app,
        empty_request("GET", "/usage?start_date=2024-05-01&end_date=2024-05-31"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_items"], 12);
    assert_eq!(body["unique_items"], 2);
    assert_eq!(body["items"][0]["item_name"], "Wing");
    assert_eq!(body["items"][0]["total_used"], 8);
    assert_eq!(body["items"][1]["item_name"], "Drink");
    assert_eq!(body["items"][1]["total_used"], 4);

    let (status, body) = send(&app, empty_request("GET", "/usage/daily?date=2024-06-01")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_items"], 12);

    let (status, body) = send(
        &app,
        empty_request("GET", "/usage/details?start_date=2024-05-01&end_date=2024-05-31"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["breakdown"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_usage_rejects_half_open_range() {
    let app = app().await;

    let (status, _) = send(&app, empty_request("GET", "/usage?start_date=2024-05-01")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_succeeds_for_seeded_user() {
    let app = app_with_user("counter", "crispy-wings").await;

    let (status, body) = send(
        &app,
        json_request("POST", "/auth/login", json!({ "username": "counter", "password": "crispy-wings" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "counter");
    assert_eq!(body["role"], "sales");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_is_rate_limited_after_failure() {
    let app = app_with_user("counter", "crispy-wings").await;

    let login = |password: &str| {
        json_request("POST", "/auth/login", json!({ "username": "counter", "password": password }))
    };

    let (status, body) = send(&app, login("wrong-password")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "invalid_credentials");

    let response = app.clone().oneshot(login("crispy-wings")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key(header::RETRY_AFTER));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["type"], "rate_limit_error");
    assert!(body["error"]["retry_after_ms"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_login_limits_are_per_username() {
    let app = app_with_user("counter", "crispy-wings").await;

    let (status, _) = send(
        &app,
        json_request("POST", "/auth/login", json!({ "username": "counter", "password": "nope-nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        json_request("POST", "/auth/login", json!({ "username": "kitchen", "password": "nope-nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
