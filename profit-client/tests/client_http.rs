// Integration tests running HttpClient against an in-process stub of the
// ProfitApp backend contract.

use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::collections::HashMap;

use profit_client::{ClientConfig, ClientError, ExportFormat, Grouping, NewRecord, RecordType};

#[derive(Clone, Default)]
struct StubState {
    records: Arc<Mutex<Vec<Value>>>,
}

async fn stub_summary() -> Json<Value> {
    Json(json!({
        "today_date": "2024-05-01",
        "today_sales": 100.0,
        "today_expenses": 40.0,
        "today_profit": 60.0,
        "today_orders": 3,
        "today_items": 7,
        "today_discount": 5.0,
        "total_sales": 500.0,
        "total_expenses": 120.0,
        "total_profit": 380.0,
        "total_orders": 21,
        "total_items": 55,
        "total_discount": 18.0
    }))
}

async fn stub_summary_range(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    assert_eq!(params.get("group").map(String::as_str), Some("monthly"));
    assert_eq!(params.get("start").map(String::as_str), Some("2024-01-01"));
    assert_eq!(params.get("end").map(String::as_str), Some("2024-01-31"));
    Json(json!({
        "group": "monthly",
        "groups": [
            { "period": "2024-01", "sales": 300.0, "expenses": 100.0, "profit": 200.0 }
        ],
        "totals": { "sales": 300.0, "profit": 200.0 }
    }))
}

async fn stub_records(
    State(state): State<StubState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let limit: usize = params
        .get("limit")
        .and_then(|value| value.parse().ok())
        .unwrap_or(50);
    let records = state.records.lock().unwrap();
    let page: Vec<Value> = records.iter().rev().take(limit).cloned().collect();
    Json(json!({ "records": page }))
}

async fn stub_add_record(
    State(state): State<StubState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let record_date = payload.get("record_date").and_then(Value::as_str);
    let record_type = payload.get("type").and_then(Value::as_str);
    if record_date.is_none_or(str::is_empty) || !matches!(record_type, Some("Sale" | "Expense")) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing or invalid fields" })),
        ));
    }
    state.records.lock().unwrap().push(payload);
    Ok(Json(json!({ "success": true })))
}

async fn stub_change_plan(Json(payload): Json<Value>) -> Json<Value> {
    if payload.get("plan").and_then(Value::as_str) == Some("pro") {
        Json(json!({ "success": true }))
    } else {
        Json(json!({ "success": false, "error": "Unknown plan" }))
    }
}

async fn stub_failing_summary() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "database unavailable" })),
    )
}

fn stub_router(state: StubState) -> Router {
    Router::new()
        .route("/", get(|| async { "ok" }))
        .route("/api/summary", get(stub_summary))
        .route("/api/summary_range", get(stub_summary_range))
        .route("/api/records", get(stub_records))
        .route("/api/records_range", get(stub_records))
        .route("/api/add_record", post(stub_add_record))
        .route("/api/change_plan", post(stub_change_plan))
        .route("/set_lang", get(|| async { Redirect::to("/") }))
        .route(
            "/api/export/csv",
            get(|| async { "record_date,type,amount\n2024-05-01,Sale,100.00\n" }),
        )
        .with_state(state)
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn stub_client() -> profit_client::HttpClient {
    let base_url = serve(stub_router(StubState::default())).await;
    ClientConfig::new(base_url).build_http_client()
}

#[tokio::test]
async fn summary_decodes_payload() {
    let client = stub_client().await;

    let summary = client.summary().await.unwrap();
    assert_eq!(summary.today_date, "2024-05-01");
    assert_eq!(summary.today_sales, 100.0);
    assert_eq!(summary.total_profit, 380.0);
    // Fields absent from the payload default to zero
    assert_eq!(summary.today_gross, 0.0);
    assert_eq!(summary.total_avg_sale, 0.0);
}

#[tokio::test]
async fn summary_range_sends_query_and_defaults_missing_totals() {
    let client = stub_client().await;

    let range = client
        .summary_range(Some("2024-01-01"), Some("2024-01-31"), Grouping::Monthly)
        .await
        .unwrap();
    assert_eq!(range.group, Grouping::Monthly);
    assert_eq!(range.groups.len(), 1);
    assert_eq!(range.groups[0].period, "2024-01");
    assert_eq!(range.totals.sales, 300.0);
    // Omitted totals fields decode as zero
    assert_eq!(range.totals.expenses, 0.0);
    assert_eq!(range.totals.orders, 0);
}

#[tokio::test]
async fn add_record_then_list_round_trip() {
    let client = stub_client().await;

    client
        .add_record(&NewRecord {
            record_date: "2024-05-01".to_string(),
            record_type: RecordType::Sale,
            amount: 75.5,
        })
        .await
        .unwrap();

    let records = client.records(50, None).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].record_date, "2024-05-01");
    assert_eq!(records[0].record_type, RecordType::Sale);
    assert_eq!(records[0].amount, 75.5);
}

#[tokio::test]
async fn add_record_rejection_carries_backend_message() {
    let client = stub_client().await;

    let err = client
        .add_record(&NewRecord {
            record_date: String::new(),
            record_type: RecordType::Sale,
            amount: 1.0,
        })
        .await
        .unwrap_err();

    match err {
        ClientError::Status { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Missing or invalid fields");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn logical_failure_maps_to_backend_error() {
    let client = stub_client().await;

    client.change_plan(1, "pro").await.unwrap();

    let err = client.change_plan(1, "platinum").await.unwrap_err();
    match err {
        ClientError::Backend(message) => assert_eq!(message, "Unknown plan"),
        other => panic!("expected backend error, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_is_a_fetch_failure() {
    let router = Router::new().route("/api/summary", get(stub_failing_summary));
    let base_url = serve(router).await;
    let client = ClientConfig::new(base_url).build_http_client();

    let err = client.summary().await.unwrap_err();
    assert!(err.is_fetch_failure());
    match err {
        ClientError::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn set_language_follows_redirect_and_ignores_body() {
    let client = stub_client().await;
    client.set_language("sv").await.unwrap();
}

#[tokio::test]
async fn export_returns_file_bytes() {
    let client = stub_client().await;

    let bytes = client.export(ExportFormat::Csv, Some(30)).await.unwrap();
    let body = String::from_utf8(bytes).unwrap();
    assert!(body.starts_with("record_date,type,amount"));
}
