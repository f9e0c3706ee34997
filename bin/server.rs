// Tuition Ledger - Web Server
// JSON API over the store, plus the spreadsheet import endpoint.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;
use tuition_ledger::{
    bank_account_detail, course_detail, filter_payments, import_csv, installment_detail,
    list_bank_accounts, list_courses, list_installments, list_payments, list_products,
    list_students, list_teachers, open_database, payment_detail, product_detail, setup_database,
    student_detail, teacher_detail, EntityKind,
};

/// Shared application state
#[derive(Clone)]
struct AppState {
    db: Arc<Mutex<Connection>>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn fail(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

fn list_response<T: Serialize>(what: &str, result: anyhow::Result<Vec<T>>) -> Response {
    match result {
        Ok(rows) => (StatusCode::OK, Json(ApiResponse::ok(rows))).into_response(),
        Err(e) => {
            eprintln!("Error listing {}: {}", what, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<T>>::fail(format!("Error listing {}", what))),
            )
                .into_response()
        }
    }
}

fn detail_response<T: Serialize>(what: &str, result: anyhow::Result<Option<T>>) -> Response {
    match result {
        Ok(Some(row)) => (StatusCode::OK, Json(ApiResponse::ok(row))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<T>::fail(format!("No such {}", what))),
        )
            .into_response(),
        Err(e) => {
            eprintln!("Error loading {}: {}", what, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<T>::fail(format!("Error loading {}", what))),
            )
                .into_response()
        }
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/payments
async fn get_payments(State(state): State<AppState>) -> Response {
    let conn = state.db.lock().unwrap();
    list_response("payments", list_payments(&conn))
}

#[derive(Deserialize)]
struct PaymentFilterParams {
    category_id: Option<i64>,
    status_id: Option<i64>,
}

/// GET /api/payments/filter?category_id=..&status_id=..
async fn get_payments_filtered(
    State(state): State<AppState>,
    Query(params): Query<PaymentFilterParams>,
) -> Response {
    let conn = state.db.lock().unwrap();
    list_response(
        "payments",
        filter_payments(&conn, params.category_id, params.status_id),
    )
}

/// GET /api/payments/:id
async fn get_payment(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let conn = state.db.lock().unwrap();
    detail_response("payment", payment_detail(&conn, id))
}

/// GET /api/students
async fn get_students(State(state): State<AppState>) -> Response {
    let conn = state.db.lock().unwrap();
    list_response("students", list_students(&conn))
}

/// GET /api/students/:id
async fn get_student(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let conn = state.db.lock().unwrap();
    detail_response("student", student_detail(&conn, id))
}

/// GET /api/teachers
async fn get_teachers(State(state): State<AppState>) -> Response {
    let conn = state.db.lock().unwrap();
    list_response("teachers", list_teachers(&conn))
}

/// GET /api/teachers/:id
async fn get_teacher(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let conn = state.db.lock().unwrap();
    detail_response("teacher", teacher_detail(&conn, id))
}

/// GET /api/courses
async fn get_courses(State(state): State<AppState>) -> Response {
    let conn = state.db.lock().unwrap();
    list_response("courses", list_courses(&conn))
}

/// GET /api/courses/:id
async fn get_course(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let conn = state.db.lock().unwrap();
    detail_response("course", course_detail(&conn, id))
}

/// GET /api/products
async fn get_products(State(state): State<AppState>) -> Response {
    let conn = state.db.lock().unwrap();
    list_response("products", list_products(&conn))
}

/// GET /api/products/:id
async fn get_product(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let conn = state.db.lock().unwrap();
    detail_response("product", product_detail(&conn, id))
}

/// GET /api/bank-accounts
async fn get_bank_accounts(State(state): State<AppState>) -> Response {
    let conn = state.db.lock().unwrap();
    list_response("bank accounts", list_bank_accounts(&conn))
}

/// GET /api/bank-accounts/:id
async fn get_bank_account(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let conn = state.db.lock().unwrap();
    detail_response("bank account", bank_account_detail(&conn, id))
}

/// GET /api/installments
async fn get_installments(State(state): State<AppState>) -> Response {
    let conn = state.db.lock().unwrap();
    list_response("installments", list_installments(&conn))
}

/// GET /api/installments/:id
async fn get_installment(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let conn = state.db.lock().unwrap();
    detail_response("installment", installment_detail(&conn, id))
}

/// POST /api/import/:entity - CSV body, reconciled against the store.
/// Answers the import outcome: {"success": bool, "message": "..."}
async fn post_import(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    body: String,
) -> Response {
    let kind: EntityKind = match entity.parse() {
        Ok(kind) => kind,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::fail(e.to_string())),
            )
                .into_response()
        }
    };

    let conn = state.db.lock().unwrap();
    let outcome = import_csv(&conn, kind, body.as_bytes());
    (StatusCode::OK, Json(outcome)).into_response()
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    let db_path = args.get(1).map(|s| s.as_str()).unwrap_or("tuition.db");
    let addr = args.get(2).map(|s| s.as_str()).unwrap_or("0.0.0.0:3000").to_string();

    println!("Tuition Ledger - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let conn = open_database(std::path::Path::new(db_path)).expect("Failed to open database");
    setup_database(&conn).expect("Failed to set up database");
    println!("✓ Database ready: {}", db_path);

    // Create shared state
    let state = AppState {
        db: Arc::new(Mutex::new(conn)),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/payments", get(get_payments))
        .route("/payments/filter", get(get_payments_filtered))
        .route("/payments/:id", get(get_payment))
        .route("/students", get(get_students))
        .route("/students/:id", get(get_student))
        .route("/teachers", get(get_teachers))
        .route("/teachers/:id", get(get_teacher))
        .route("/courses", get(get_courses))
        .route("/courses/:id", get(get_course))
        .route("/products", get(get_products))
        .route("/products/:id", get(get_product))
        .route("/bank-accounts", get(get_bank_accounts))
        .route("/bank-accounts/:id", get(get_bank_account))
        .route("/installments", get(get_installments))
        .route("/installments/:id", get(get_installment))
        .route("/import/:entity", post(post_import))
        .with_state(state);

    // Build main router
    let app = Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://{}", addr);
    println!("   Try: curl http://{}/api/payments", addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
