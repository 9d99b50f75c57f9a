use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::Engine as _;
use http_body_util::BodyExt;
use sea_orm::{ConnectionTrait, Database, Statement};
use serde_json::{Value, json};
use tower::ServiceExt;

use migration::MigratorTrait;

async fn test_app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    for (username, password) in [("alice", "secret"), ("bob", "hunter2")] {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO users (username, password) VALUES (?, ?)",
            vec![username.into(), password.into()],
        ))
        .await
        .unwrap();
    }
    let engine = engine::Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    server::app(engine, db)
}

fn basic(username: &str, password: &str) -> String {
    let token = base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
    format!("Basic {token}")
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str, user: &str, password: &str) -> Request<Body> {
    Request::get(uri)
        .header(header::AUTHORIZATION, basic(user, password))
        .body(Body::empty())
        .unwrap()
}

fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, basic("alice", "secret"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn add(app: &Router, kind: &str, amount: i64, category: &str, remark: &str, date: &str) -> Value {
    let (status, body) = send(
        app,
        with_json(
            "POST",
            "/transactions",
            json!({
                "type": kind,
                "amount_minor": amount,
                "category": category,
                "remark": remark,
                "bank_cash": "HDFC",
                "date": date,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

#[tokio::test]
async fn health_is_public() {
    let app = test_app().await;
    let (status, body) = send(&app, Request::get("/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
}

#[tokio::test]
async fn protected_routes_require_credentials() {
    let app = test_app().await;
    let (status, _) = send(
        &app,
        Request::get("/dashboard").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, get("/dashboard", "alice", "wrong")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_checks_credentials() {
    let app = test_app().await;
    let login = |password: &str| {
        Request::post("/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({"username": "alice", "password": password}).to_string(),
            ))
            .unwrap()
    };

    let (status, body) = send(&app, login("secret")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");

    let (status, body) = send(&app, login("nope")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, login("")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dashboard_buckets_transactions() {
    let app = test_app().await;
    add(&app, "OUT", 500, "Loan", "Sam", "2025-03-01T10:00:00Z").await;
    add(&app, "IN", 200, "Loan", "Sam", "2025-03-02T10:00:00Z").await;
    add(&app, "OUT", 1000, "Food", "", "2025-03-03T10:00:00Z").await;
    add(&app, "IN", 100, "Food", "", "2025-03-04T10:00:00Z").await;
    add(&app, "OUT", 2000, "Savings", "", "2025-03-05T10:00:00Z").await;

    let (status, body) = send(&app, get("/dashboard", "alice", "secret")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["summary"],
        json!({
            "income": 300,
            "expenses": 900,
            "assets": 2000,
            "lent": 300,
            "balance": -3200,
            "total_money_out": 3200,
        })
    );
    assert_eq!(body["lending_chart"], json!([{"person": "Sam", "amount": 300}]));
    assert_eq!(
        body["money_out_chart"],
        json!([
            {"category": "Food", "amount": 900},
            {"category": "Savings", "amount": 2000},
        ])
    );

    let (status, body) = send(
        &app,
        get(
            "/dashboard?type=&startDate=2025-03-03&endDate=2025-03-04",
            "alice",
            "secret",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["expenses"], 900);
    assert_eq!(body["lending_chart"], json!([]));

    let (status, body) = send(&app, get("/dashboard", "bob", "hunter2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["total_money_out"], 0);
}

#[tokio::test]
async fn transaction_lifecycle() {
    let app = test_app().await;
    let created = add(&app, "OUT", 1250, "Food", "lunch", "2025-03-01T12:00:00Z").await;
    assert_eq!(created["message"], "Transaction added successfully");
    let id = created["transaction"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        with_json("PATCH", &format!("/transactions/{id}"), json!({"amount_minor": 1500})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["amount_minor"], 1500);
    assert_eq!(body["remark"], "lunch");

    let (status, body) = send(
        &app,
        with_json(
            "PUT",
            &format!("/transactions/{id}"),
            json!({
                "type": "OUT",
                "amount_minor": 1800,
                "category": "Dining",
                "remark": "team lunch",
                "bank_cash": "HDFC",
                "date": "2025-03-01T12:00:00Z",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["amount_minor"], 1800);
    assert_eq!(body["category"], "Dining");

    let (status, _) = send(
        &app,
        with_json("PATCH", &format!("/transactions/{id}"), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(&app, get("/transactions", "alice", "secret")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["transactions"].as_array().unwrap().len(), 1);

    let (status, _) = send(&app, get(&format!("/transactions/{id}"), "bob", "hunter2")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        with_json("DELETE", &format!("/transactions/{id}"), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Transaction deleted successfully");

    let (status, _) = send(
        &app,
        with_json("DELETE", &format!("/transactions/{id}"), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_input_is_rejected() {
    let app = test_app().await;
    let (status, _) = send(
        &app,
        with_json(
            "POST",
            "/transactions",
            json!({"type": "OUT", "amount_minor": -5, "category": "Food", "bank_cash": "Cash"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    for amount in [i64::MAX, engine::MAX_AMOUNT.cents() + 1] {
        let (status, _) = send(
            &app,
            with_json(
                "POST",
                "/transactions",
                json!({"type": "OUT", "amount_minor": amount, "category": "Food", "bank_cash": "Cash"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
    add(&app, "OUT", engine::MAX_AMOUNT.cents(), "Food", "", "2025-03-01T12:00:00Z").await;
    add(&app, "OUT", 1, "Rent", "", "2025-03-02T12:00:00Z").await;
    let (status, body) = send(&app, get("/dashboard", "alice", "secret")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["total_money_out"], engine::MAX_AMOUNT.cents() + 1);

    let (status, _) = send(&app, get("/dashboard?type=SIDEWAYS", "alice", "secret")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, get("/transactions?cursor=%21%21", "alice", "secret")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn lookups_list_distinct_labels() {
    let app = test_app().await;
    add(&app, "OUT", 100, "Food", "", "2025-03-01T12:00:00Z").await;
    add(&app, "IN", 100, "Salary", "", "2025-03-02T12:00:00Z").await;
    add(&app, "OUT", 100, "Food", "", "2025-03-03T12:00:00Z").await;

    let (_, body) = send(&app, get("/categories", "alice", "secret")).await;
    assert_eq!(body["categories"], json!(["Food", "Salary"]));
    let (_, body) = send(&app, get("/banks", "alice", "secret")).await;
    assert_eq!(body["banks"], json!(["HDFC"]));

    let (_, body) = send(&app, get("/summary", "alice", "secret")).await;
    assert_eq!(body["balance"], -100);
    assert_eq!(body["banks"], json!([{"bank_cash": "HDFC", "amount": -100}]));
}
