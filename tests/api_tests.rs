use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use fleet_backoffice::config::EnvironmentConfig;
use fleet_backoffice::repositories::{Repositories, TripExpenseRepository};
use fleet_backoffice::routes::create_router;
use fleet_backoffice::state::AppState;

struct TestResponse {
    status: StatusCode,
    set_cookie: Option<String>,
    body: Value,
}

async fn create_test_app() -> Router {
    create_test_app_with_store().await.0
}

/// Router plus a handle on the store behind it.
async fn create_test_app_with_store() -> (Router, Repositories) {
    let config = EnvironmentConfig {
        environment: "test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        jwt_secret: "integration-test-secret".to_string(),
        jwt_expiration: 1800,
        cookie_max_age: 86_400,
        bcrypt_cost: 4,
        cors_origins: Vec::new(),
        run_migrations: false,
    };
    let repositories = Repositories::in_memory();
    let app = create_router(AppState::new(config, repositories.clone()));
    (app, repositories)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    cookie: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .map(|value| value.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    TestResponse {
        status,
        set_cookie,
        body,
    }
}

async fn register(app: &Router, email: &str, role: &str) -> TestResponse {
    send(
        app,
        Method::POST,
        "/api/v1/auth/register",
        Some(json!({
            "first_name": "Test",
            "last_name": role,
            "email": email,
            "password": "secret123",
            "role": role,
        })),
        None,
    )
    .await
}

/// Registers a user with `role` and returns the `access_token=...` pair.
async fn login_as(app: &Router, email: &str, role: &str) -> String {
    let registered = register(app, email, role).await;
    assert_eq!(registered.status, StatusCode::CREATED);

    let response = send(
        app,
        Method::POST,
        "/api/v1/auth/login",
        Some(json!({ "email": email, "password": "secret123" })),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    let set_cookie = response.set_cookie.expect("login sets a cookie");
    set_cookie.split(';').next().unwrap().to_string()
}

fn client_body(email: &str) -> Value {
    json!({
        "name": "Acme Logistics",
        "contact_person": "Jane Roe",
        "phone": "+15550100",
        "email": email,
        "address": "1 Warehouse Way",
    })
}

fn trip_body(client_id: i64) -> Value {
    json!({
        "client_id": client_id,
        "start_date": "2025-01-01T00:00:00Z",
        "end_date": "2025-01-03T12:00:00Z",
        "origin_address": "Depot A",
        "destination_address": "Depot B",
        "base_revenue": 1000,
        "additional_charges": 200,
        "status": "COMPLETED",
    })
}

#[tokio::test]
async fn test_health_check_is_public() {
    let app = create_test_app().await;
    let response = send(&app, Method::GET, "/api/v1/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let app = create_test_app().await;
    let first = register(&app, "dup@fleet.test", "STAFF").await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.body["message"], "You are Successfully Registered");
    assert_eq!(first.body["data"]["role"], "STAFF");
    assert!(first.body["data"].get("password").is_none());

    let second = register(&app, "dup@fleet.test", "STAFF").await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["statusCode"], 409);
    assert_eq!(second.body["path"], "/api/v1/auth/register");
    assert!(second.body["timeStamp"].is_string());
    assert_eq!(
        second.body["response"]["message"],
        "User with this email already exists"
    );
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = create_test_app().await;
    register(&app, "viewer@fleet.test", "VIEWER").await;

    let response = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        Some(json!({ "email": "viewer@fleet.test", "password": "wrong-password" })),
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["response"]["message"], "Invalid credentials");
    assert!(response.set_cookie.is_none());
}

#[tokio::test]
async fn test_login_sets_http_only_cookie() {
    let app = create_test_app().await;
    register(&app, "admin@fleet.test", "ADMIN").await;

    let response = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        Some(json!({ "email": "admin@fleet.test", "password": "secret123" })),
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Login Successful");
    assert_eq!(response.body["user"]["email"], "admin@fleet.test");
    let cookie = response.set_cookie.unwrap();
    assert!(cookie.starts_with("access_token="));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = create_test_app().await;
    let response = send(&app, Method::POST, "/api/v1/auth/logout", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Logged out successfully");
    assert!(response.set_cookie.unwrap().starts_with("access_token="));
}

#[tokio::test]
async fn test_protected_route_requires_cookie() {
    let app = create_test_app().await;
    let response = send(&app, Method::GET, "/api/v1/drivers", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["statusCode"], 401);
    assert_eq!(response.body["path"], "/api/v1/drivers");
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = create_test_app().await;
    let response = send(
        &app,
        Method::GET,
        "/api/v1/trucks",
        None,
        Some("access_token=not-a-jwt"),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_viewer_can_read_but_not_write() {
    let app = create_test_app().await;
    let viewer = login_as(&app, "viewer@fleet.test", "VIEWER").await;

    let resources = [
        (
            "/api/v1/drivers",
            json!({
                "first_name": "Max",
                "last_name": "Power",
                "license_number": "DL-001",
                "phone": "+15550101",
            }),
        ),
        (
            "/api/v1/trucks",
            json!({ "number": "TRK-1", "model": "Volvo FH" }),
        ),
        ("/api/v1/clients", client_body("viewer@acme.test")),
        ("/api/v1/trips", trip_body(1)),
    ];

    for (path, body) in resources {
        let list = send(&app, Method::GET, path, None, Some(&viewer)).await;
        assert_eq!(list.status, StatusCode::OK, "GET {}", path);
        assert_eq!(list.body, json!([]));

        let create = send(&app, Method::POST, path, Some(body.clone()), Some(&viewer)).await;
        assert_eq!(create.status, StatusCode::FORBIDDEN, "POST {}", path);
        assert_eq!(create.body["response"]["message"], "Insufficient permissions");

        let item = format!("{}/1", path);
        let update = send(&app, Method::PATCH, &item, Some(body), Some(&viewer)).await;
        assert_eq!(update.status, StatusCode::FORBIDDEN, "PATCH {}", item);

        let delete = send(&app, Method::DELETE, &item, None, Some(&viewer)).await;
        assert_eq!(delete.status, StatusCode::FORBIDDEN, "DELETE {}", item);
    }
}

#[tokio::test]
async fn test_staff_cannot_delete() {
    let app = create_test_app().await;
    let staff = login_as(&app, "staff@fleet.test", "STAFF").await;

    let created = send(
        &app,
        Method::POST,
        "/api/v1/trucks",
        Some(json!({ "number": "TRK-1", "model": "Volvo FH" })),
        Some(&staff),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["message"], "Truck created Successfully");
    assert_eq!(created.body["data"]["fuel_type"], "DIESEL");
    assert_eq!(created.body["data"]["current_status"], "AVAILABLE");

    let id = created.body["data"]["id"].as_i64().unwrap();
    let delete = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/trucks/{}", id),
        None,
        Some(&staff),
    )
    .await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_client_with_trips_cannot_be_deleted() {
    let app = create_test_app().await;
    let admin = login_as(&app, "admin@fleet.test", "ADMIN").await;

    let client = send(
        &app,
        Method::POST,
        "/api/v1/clients",
        Some(client_body("ops@acme.test")),
        Some(&admin),
    )
    .await;
    assert_eq!(client.status, StatusCode::CREATED);
    let client_id = client.body["data"]["id"].as_i64().unwrap();

    let trip = send(
        &app,
        Method::POST,
        "/api/v1/trips",
        Some(trip_body(client_id)),
        Some(&admin),
    )
    .await;
    assert_eq!(trip.status, StatusCode::CREATED);
    let trip_id = trip.body["data"]["id"].as_i64().unwrap();

    let blocked = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/clients/{}", client_id),
        None,
        Some(&admin),
    )
    .await;
    assert_eq!(blocked.status, StatusCode::CONFLICT);
    assert_eq!(
        blocked.body["response"]["message"],
        "Cannot delete client with associated trips"
    );

    let trip_deleted = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/trips/{}", trip_id),
        None,
        Some(&admin),
    )
    .await;
    assert_eq!(trip_deleted.status, StatusCode::OK);

    let deleted = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/clients/{}", client_id),
        None,
        Some(&admin),
    )
    .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["message"], "Client deleted Successfully");

    let gone = send(
        &app,
        Method::GET,
        &format!("/api/v1/clients/{}", client_id),
        None,
        Some(&admin),
    )
    .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_client_email_conflicts() {
    let app = create_test_app().await;
    let admin = login_as(&app, "admin@fleet.test", "ADMIN").await;

    let first = send(
        &app,
        Method::POST,
        "/api/v1/clients",
        Some(client_body("ops@acme.test")),
        Some(&admin),
    )
    .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = send(
        &app,
        Method::POST,
        "/api/v1/clients",
        Some(client_body("ops@acme.test")),
        Some(&admin),
    )
    .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_trip_financial_report() {
    let app = create_test_app().await;
    let admin = login_as(&app, "admin@fleet.test", "ADMIN").await;

    let client = send(
        &app,
        Method::POST,
        "/api/v1/clients",
        Some(client_body("billing@acme.test")),
        Some(&admin),
    )
    .await;
    let client_id = client.body["data"]["id"].as_i64().unwrap();

    let trip = send(
        &app,
        Method::POST,
        "/api/v1/trips",
        Some(trip_body(client_id)),
        Some(&admin),
    )
    .await;
    let trip_id = trip.body["data"]["id"].as_i64().unwrap();

    for (kind, amount) in [("FUEL", 300), ("TOLL", 100)] {
        let expense = send(
            &app,
            Method::POST,
            &format!("/api/v1/trips/{}/expenses", trip_id),
            Some(json!({
                "type": kind,
                "amount": amount,
                "description": "On the road",
                "expense_date": "2025-01-02T08:00:00Z",
            })),
            Some(&admin),
        )
        .await;
        assert_eq!(expense.status, StatusCode::CREATED);
        assert_eq!(expense.body["data"]["type"], kind);
    }

    let report = send(
        &app,
        Method::GET,
        &format!("/api/v1/reports/trip/{}", trip_id),
        None,
        Some(&admin),
    )
    .await;
    assert_eq!(report.status, StatusCode::OK);

    let body = &report.body;
    assert_eq!(body["trip_info"]["duration_days"], 3);
    assert_eq!(body["trip_info"]["creator"]["first_name"], "Test");
    assert_eq!(body["associated_entities"]["client"]["name"], "Acme Logistics");
    assert!(body["associated_entities"]["driver"].is_null());
    assert_eq!(body["revenue_breakdown"]["total_revenue"].as_f64(), Some(1200.0));
    assert_eq!(body["expense_breakdown"]["total_expenses"].as_f64(), Some(400.0));
    assert_eq!(body["expense_breakdown"]["expense_count"], 2);
    assert_eq!(body["expense_breakdown"]["by_type"]["FUEL"].as_f64(), Some(300.0));
    assert_eq!(body["profit_analysis"]["gross_profit"].as_f64(), Some(800.0));
    assert_eq!(
        body["profit_analysis"]["profit_margin_percentage"].as_f64(),
        Some(66.67)
    );
    assert_eq!(body["profit_analysis"]["is_profitable"], true);
    assert_eq!(body["summary"]["net_profit"].as_f64(), Some(800.0));
}

#[tokio::test]
async fn test_client_report_counts_trips() {
    let app = create_test_app().await;
    let admin = login_as(&app, "admin@fleet.test", "ADMIN").await;

    let client = send(
        &app,
        Method::POST,
        "/api/v1/clients",
        Some(client_body("reports@acme.test")),
        Some(&admin),
    )
    .await;
    let client_id = client.body["data"]["id"].as_i64().unwrap();
    for _ in 0..2 {
        send(
            &app,
            Method::POST,
            "/api/v1/trips",
            Some(trip_body(client_id)),
            Some(&admin),
        )
        .await;
    }

    let report = send(
        &app,
        Method::GET,
        &format!("/api/v1/reports/client/{}", client_id),
        None,
        Some(&admin),
    )
    .await;
    assert_eq!(report.status, StatusCode::OK);
    assert_eq!(report.body["performance_metrics"]["total_trips"], 2);
    assert_eq!(
        report.body["performance_metrics"]["total_revenue"].as_f64(),
        Some(2400.0)
    );
    assert_eq!(report.body["trip_status_breakdown"]["COMPLETED"], 2);
}

#[tokio::test]
async fn test_expense_under_missing_trip() {
    let app = create_test_app().await;
    let admin = login_as(&app, "admin@fleet.test", "ADMIN").await;

    let response = send(
        &app,
        Method::POST,
        "/api/v1/trips/999/expenses",
        Some(json!({
            "type": "FUEL",
            "amount": 50,
            "description": "Diesel",
            "expense_date": "2025-01-02T08:00:00Z",
        })),
        Some(&admin),
    )
    .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.body["response"]["message"],
        "Trip with ID 999 not found"
    );
}

#[tokio::test]
async fn test_trip_with_unknown_client_is_bad_request() {
    let app = create_test_app().await;
    let admin = login_as(&app, "admin@fleet.test", "ADMIN").await;

    let response = send(
        &app,
        Method::POST,
        "/api/v1/trips",
        Some(trip_body(4242)),
        Some(&admin),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_validation_errors_list_every_field() {
    let app = create_test_app().await;
    let admin = login_as(&app, "admin@fleet.test", "ADMIN").await;

    let response = send(
        &app,
        Method::POST,
        "/api/v1/drivers",
        Some(json!({
            "first_name": "",
            "last_name": "Power",
            "license_number": "DL-002",
            "phone": "not a phone",
        })),
        Some(&admin),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let messages = response.body["response"]["message"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let app = create_test_app().await;
    let admin = login_as(&app, "admin@fleet.test", "ADMIN").await;

    let response = send(&app, Method::GET, "/api/v1/trucks/abc", None, Some(&admin)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["response"]["message"],
        "Validation failed (numeric string is expected)"
    );
}

#[tokio::test]
async fn test_unknown_route_is_enveloped() {
    let app = create_test_app().await;
    let response = send(&app, Method::GET, "/api/v1/nowhere", None, None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["path"], "/api/v1/nowhere");
    assert_eq!(
        response.body["response"]["message"],
        "Cannot GET /api/v1/nowhere"
    );
}

async fn user_id(app: &Router, cookie: &str, email: &str) -> i64 {
    let users = send(app, Method::GET, "/api/v1/users", None, Some(cookie)).await;
    users.body
        .as_array()
        .unwrap()
        .iter()
        .find(|user| user["email"] == email)
        .and_then(|user| user["id"].as_i64())
        .unwrap()
}

async fn create_client(app: &Router, cookie: &str, email: &str) -> i64 {
    let client = send(
        app,
        Method::POST,
        "/api/v1/clients",
        Some(client_body(email)),
        Some(cookie),
    )
    .await;
    assert_eq!(client.status, StatusCode::CREATED);
    client.body["data"]["id"].as_i64().unwrap()
}

async fn create_trip(app: &Router, cookie: &str, body: Value) -> i64 {
    let trip = send(app, Method::POST, "/api/v1/trips", Some(body), Some(cookie)).await;
    assert_eq!(trip.status, StatusCode::CREATED);
    trip.body["data"]["id"].as_i64().unwrap()
}

async fn create_expense(app: &Router, cookie: &str, trip_id: i64, amount: Value) -> TestResponse {
    send(
        app,
        Method::POST,
        &format!("/api/v1/trips/{}/expenses", trip_id),
        Some(json!({
            "type": "FUEL",
            "amount": amount,
            "description": "Diesel",
            "expense_date": "2025-01-02T08:00:00Z",
        })),
        Some(cookie),
    )
    .await
}

#[tokio::test]
async fn test_money_must_fit_in_cents() {
    let app = create_test_app().await;
    let admin = login_as(&app, "admin@fleet.test", "ADMIN").await;
    let client_id = create_client(&app, &admin, "money@acme.test").await;

    let mut sub_cent = trip_body(client_id);
    sub_cent["base_revenue"] = json!(0.001);
    let response = send(&app, Method::POST, "/api/v1/trips", Some(sub_cent), Some(&admin)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["response"]["message"],
        json!(["base_revenue must have at most 2 decimal places"])
    );

    let mut too_large = trip_body(client_id);
    too_large["base_revenue"] = json!(20_000_000_000u64);
    let response = send(&app, Method::POST, "/api/v1/trips", Some(too_large), Some(&admin)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let trip_id = create_trip(&app, &admin, trip_body(client_id)).await;
    let expense = create_expense(&app, &admin, trip_id, json!(0.004)).await;
    assert_eq!(expense.status, StatusCode::BAD_REQUEST);

    let patch = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/trips/{}", trip_id),
        Some(json!({ "additional_charges": 1.999 })),
        Some(&admin),
    )
    .await;
    assert_eq!(patch.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_trip_list_embeds_short_relations() {
    let app = create_test_app().await;
    let admin = login_as(&app, "admin@fleet.test", "ADMIN").await;
    let client_id = create_client(&app, &admin, "list@acme.test").await;
    create_trip(&app, &admin, trip_body(client_id)).await;

    let list = send(&app, Method::GET, "/api/v1/trips", None, Some(&admin)).await;
    assert_eq!(list.status, StatusCode::OK);
    let trip = &list.body[0];
    assert_eq!(
        trip["client"],
        json!({ "id": client_id, "name": "Acme Logistics", "contact_person": "Jane Roe" })
    );
    assert!(trip["driver"].is_null());
    assert_eq!(trip["creator"]["first_name"], "Test");
    assert_eq!(trip["expense_count"], 0);
}

#[tokio::test]
async fn test_expense_is_scoped_to_its_trip() {
    let app = create_test_app().await;
    let admin = login_as(&app, "admin@fleet.test", "ADMIN").await;
    let client_id = create_client(&app, &admin, "scope@acme.test").await;
    let owner = create_trip(&app, &admin, trip_body(client_id)).await;
    let other = create_trip(&app, &admin, trip_body(client_id)).await;

    let expense = create_expense(&app, &admin, owner, json!(45.5)).await;
    let expense_id = expense.body["data"]["id"].as_i64().unwrap();

    let foreign = format!("/api/v1/trips/{}/expenses/{}", other, expense_id);
    let patch = send(&app, Method::PATCH, &foreign, Some(json!({ "amount": 10 })), Some(&admin)).await;
    assert_eq!(patch.status, StatusCode::NOT_FOUND);
    assert_eq!(
        patch.body["response"]["message"],
        format!("Trip expense with ID {} not found for trip {}", expense_id, other)
    );
    let delete = send(&app, Method::DELETE, &foreign, None, Some(&admin)).await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    let own = format!("/api/v1/trips/{}/expenses/{}", owner, expense_id);
    let patch = send(&app, Method::PATCH, &own, Some(json!({ "amount": 10 })), Some(&admin)).await;
    assert_eq!(patch.status, StatusCode::OK);
    assert_eq!(patch.body["message"], "Trip expense updated Successfully");
    assert_eq!(patch.body["data"]["amount"].as_f64(), Some(10.0));

    let delete = send(&app, Method::DELETE, &own, None, Some(&admin)).await;
    assert_eq!(delete.status, StatusCode::OK);
    assert_eq!(delete.body["message"], "Trip expense deleted Successfully");

    let listed = send(
        &app,
        Method::GET,
        &format!("/api/v1/trips/{}/expenses", owner),
        None,
        Some(&admin),
    )
    .await;
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn test_deleting_trip_removes_its_expenses() {
    let (app, repositories) = create_test_app_with_store().await;
    let admin = login_as(&app, "admin@fleet.test", "ADMIN").await;
    let client_id = create_client(&app, &admin, "cascade@acme.test").await;
    let trip_id = create_trip(&app, &admin, trip_body(client_id)).await;
    create_expense(&app, &admin, trip_id, json!(30)).await;
    create_expense(&app, &admin, trip_id, json!(12.25)).await;

    let counts = repositories
        .expenses
        .count_by_trips(&[trip_id as i32])
        .await
        .unwrap();
    assert_eq!(counts.get(&(trip_id as i32)), Some(&2));

    let deleted = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/trips/{}", trip_id),
        None,
        Some(&admin),
    )
    .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let counts = repositories
        .expenses
        .count_by_trips(&[trip_id as i32])
        .await
        .unwrap();
    assert!(counts.is_empty());

    let listed = send(
        &app,
        Method::GET,
        &format!("/api/v1/trips/{}/expenses", trip_id),
        None,
        Some(&admin),
    )
    .await;
    assert_eq!(listed.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_detail_counts_created_records() {
    let app = create_test_app().await;
    let admin = login_as(&app, "admin@fleet.test", "ADMIN").await;
    let client_id = create_client(&app, &admin, "counts@acme.test").await;
    create_trip(&app, &admin, trip_body(client_id)).await;
    create_trip(&app, &admin, trip_body(client_id)).await;
    send(
        &app,
        Method::POST,
        "/api/v1/trucks",
        Some(json!({ "number": "TRK-9", "model": "Scania R" })),
        Some(&admin),
    )
    .await;

    let id = user_id(&app, &admin, "admin@fleet.test").await;
    let detail = send(&app, Method::GET, &format!("/api/v1/users/{}", id), None, Some(&admin)).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(
        detail.body["counts"],
        json!({ "trips": 2, "drivers": 0, "trucks": 1, "clients": 1 })
    );
    assert_eq!(detail.body["created_trips"].as_array().unwrap().len(), 2);
    assert_eq!(detail.body["created_clients"][0]["id"], client_id);
    assert!(detail.body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_password_update_takes_effect_at_login() {
    let app = create_test_app().await;
    let staff = login_as(&app, "staff@fleet.test", "STAFF").await;
    register(&app, "driver.desk@fleet.test", "VIEWER").await;
    let id = user_id(&app, &staff, "driver.desk@fleet.test").await;

    let update = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/users/{}", id),
        Some(json!({ "password": "new-secret-99" })),
        Some(&staff),
    )
    .await;
    assert_eq!(update.status, StatusCode::OK);
    assert_eq!(update.body["message"], "User Updated Successfully");
    assert!(update.body["data"].get("password").is_none());

    let old = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        Some(json!({ "email": "driver.desk@fleet.test", "password": "secret123" })),
        None,
    )
    .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);

    let new = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        Some(json!({ "email": "driver.desk@fleet.test", "password": "new-secret-99" })),
        None,
    )
    .await;
    assert_eq!(new.status, StatusCode::OK);
}

#[tokio::test]
async fn test_user_with_records_cannot_be_deleted() {
    let app = create_test_app().await;
    let admin = login_as(&app, "admin@fleet.test", "ADMIN").await;
    create_client(&app, &admin, "owned@acme.test").await;
    let id = user_id(&app, &admin, "admin@fleet.test").await;

    let response = send(&app, Method::DELETE, &format!("/api/v1/users/{}", id), None, Some(&admin)).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.body["response"]["message"],
        "Cannot delete user with associated records"
    );
}

#[tokio::test]
async fn test_duplicate_truck_number_and_driver_license_conflict() {
    let app = create_test_app().await;
    let admin = login_as(&app, "admin@fleet.test", "ADMIN").await;

    let truck = json!({ "number": "TRK-7", "model": "MAN TGX" });
    let first = send(&app, Method::POST, "/api/v1/trucks", Some(truck.clone()), Some(&admin)).await;
    assert_eq!(first.status, StatusCode::CREATED);
    let second = send(&app, Method::POST, "/api/v1/trucks", Some(truck), Some(&admin)).await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(
        second.body["response"]["message"],
        "Truck with this number already exists"
    );

    let driver = json!({
        "first_name": "Max",
        "last_name": "Power",
        "license_number": "DL-777",
        "phone": "+15550101",
    });
    let first = send(&app, Method::POST, "/api/v1/drivers", Some(driver.clone()), Some(&admin)).await;
    assert_eq!(first.status, StatusCode::CREATED);
    let second = send(&app, Method::POST, "/api/v1/drivers", Some(driver), Some(&admin)).await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(
        second.body["response"]["message"],
        "Driver with this license number already exists"
    );
}

#[tokio::test]
async fn test_truck_report_counts_completed_trips() {
    let app = create_test_app().await;
    let admin = login_as(&app, "admin@fleet.test", "ADMIN").await;
    let client_id = create_client(&app, &admin, "haul@acme.test").await;
    let truck = send(
        &app,
        Method::POST,
        "/api/v1/trucks",
        Some(json!({ "number": "TRK-3", "model": "DAF XF" })),
        Some(&admin),
    )
    .await;
    let truck_id = truck.body["data"]["id"].as_i64().unwrap();

    for status in ["COMPLETED", "SCHEDULED"] {
        let mut body = trip_body(client_id);
        body["truck_id"] = json!(truck_id);
        body["status"] = json!(status);
        create_trip(&app, &admin, body).await;
    }

    let report = send(
        &app,
        Method::GET,
        &format!("/api/v1/reports/truck/{}", truck_id),
        None,
        Some(&admin),
    )
    .await;
    assert_eq!(report.status, StatusCode::OK);
    let metrics = &report.body["performance_metrics"];
    assert_eq!(metrics["total_trips"], 2);
    assert_eq!(metrics["completed_trips"], 1);
    assert_eq!(metrics["average_revenue_per_trip"].as_f64(), Some(1200.0));
    assert_eq!(report.body["trip_status_breakdown"]["SCHEDULED"], 1);
}
