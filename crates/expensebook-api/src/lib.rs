//! HTTP API server
//!
//! Routes are organized into modules:
//! - routes::expenses: Expense CRUD (JSON)
//! - routes::categories: Category list (JSON)
//! - routes::reports: Expense report as PDF

pub mod error;
pub mod routes;

use axum::{routing::get, Router};
use expensebook_config::Config;
use expensebook_store::StoreRef;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: StoreRef,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::categories::categories_list;
    use routes::expenses::{
        expenses_create, expenses_delete, expenses_get, expenses_list, expenses_update,
    };
    use routes::reports::expenses_report_pdf;

    let cors = state.config.server.cors;

    let router = Router::new()
        .route("/api/health", get(health_check))
        .route("/expenses", get(expenses_list).post(expenses_create))
        .route(
            "/expenses/:id",
            get(expenses_get).put(expenses_update).delete(expenses_delete),
        )
        .route("/categories", get(categories_list))
        .route("/reports/expenses.pdf", get(expenses_report_pdf))
        .with_state(state);

    if cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Start the HTTP server
///
/// Runs until the listener fails or the process receives Ctrl-C.
///
/// # Arguments
///
/// * `config` - The application configuration
/// * `store` - The shared expense store
pub async fn start_server(config: Config, store: StoreRef) -> std::io::Result<()> {
    let addr = config.bind_address();
    let state = AppState { store, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting expensebook server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - /expenses, /expenses/:id (Expense CRUD)");
    log::info!("  - /categories (Category list)");
    log::info!("  - /reports/expenses.pdf?from=&to=&groupBy= (PDF report)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use expensebook_store::SqliteStore;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let store = SqliteStore::open_in_memory().unwrap();
        create_router(AppState {
            store: Arc::new(store),
            config: Config::default(),
        })
    }

    async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    async fn create(router: &Router, amount: f64, date: &str) -> Value {
        let response = send(
            router,
            Method::POST,
            "/expenses",
            Some(json!({
                "amount": amount,
                "currency": "USD",
                "categoryId": "cat-food",
                "merchant": "Corner Cafe",
                "date": date,
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    #[tokio::test]
    async fn test_health_check() {
        let router = test_router();
        let response = send(&router, Method::GET, "/api/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"OK");
    }

    #[tokio::test]
    async fn test_create_and_list_expenses() {
        let router = test_router();
        let created = create(&router, 25.5, "2026-01-12").await;
        assert_eq!(created["amount"], json!(25.5));
        assert_eq!(created["categoryId"], json!("cat-food"));
        assert!(!created["id"].as_str().unwrap().is_empty());

        let response = send(&router, Method::GET, "/expenses", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let list = body_json(response).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["id"], created["id"]);
    }

    #[tokio::test]
    async fn test_create_missing_fields() {
        let router = test_router();
        let response = send(
            &router,
            Method::POST,
            "/expenses",
            Some(json!({ "amount": 3.0, "currency": "USD" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Missing required fields: amount, currency, categoryId, date" })
        );
    }

    #[tokio::test]
    async fn test_create_with_non_json_body() {
        let router = test_router();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/expenses")
            .body(Body::from("not json"))
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_with_mistyped_amount() {
        let router = test_router();
        let response = send(
            &router,
            Method::POST,
            "/expenses",
            Some(json!({
                "amount": "12.50",
                "currency": "USD",
                "categoryId": "cat-food",
                "date": "2026-01-12",
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("Invalid request body"), "{}", message);

        let response = send(&router, Method::GET, "/expenses", None).await;
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_update_with_mistyped_field_changes_nothing() {
        let router = test_router();
        let created = create(&router, 10.0, "2026-01-12").await;
        let uri = format!("/expenses/{}", created["id"].as_str().unwrap());

        let response = send(
            &router,
            Method::PUT,
            &uri,
            Some(json!({ "note": "Train", "amount": "12.50" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(&router, Method::GET, &uri, None).await;
        assert_eq!(body_json(response).await, created);
    }

    #[tokio::test]
    async fn test_update_with_non_json_body_changes_nothing() {
        let router = test_router();
        let created = create(&router, 10.0, "2026-01-12").await;
        let request = Request::builder()
            .method(Method::PUT)
            .uri(format!("/expenses/{}", created["id"].as_str().unwrap()))
            .body(Body::from("not json"))
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, created);
    }

    #[tokio::test]
    async fn test_get_update_delete_expense() {
        let router = test_router();
        let created = create(&router, 10.0, "2026-01-12").await;
        let uri = format!("/expenses/{}", created["id"].as_str().unwrap());

        let response = send(&router, Method::GET, &uri, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, created);

        let response = send(
            &router,
            Method::PUT,
            &uri,
            Some(json!({ "amount": 12.0, "merchant": null })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let updated = body_json(response).await;
        assert_eq!(updated["amount"], json!(12.0));
        assert_eq!(updated["merchant"], Value::Null);
        assert_eq!(updated["date"], json!("2026-01-12"));

        let response = send(&router, Method::DELETE, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        for method in [Method::GET, Method::DELETE] {
            let response = send(&router, method, &uri, None).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            assert_eq!(body_json(response).await, json!({ "error": "Expense not found" }));
        }

        let response = send(&router, Method::PUT, &uri, Some(json!({ "amount": 1.0 }))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_categories() {
        let router = test_router();
        let response = send(&router, Method::GET, "/categories", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let categories = body_json(response).await;
        let names: Vec<&str> = categories
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert!(names.contains(&"Food"));
        assert_eq!(names.len(), 4);
    }

    #[tokio::test]
    async fn test_report_pdf_response() {
        let router = test_router();
        create(&router, 10.0, "2026-01-05").await;
        create(&router, 5.25, "2026-01-20").await;
        create(&router, 99.0, "2026-02-03").await;

        let response = send(
            &router,
            Method::GET,
            "/reports/expenses.pdf?from=2026-01-01&to=2026-01-31&groupBy=month",
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(headers[header::CACHE_CONTROL], "no-store");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"expenses.pdf\""
        );

        let bytes = body_bytes(response).await;
        assert!(bytes.starts_with(b"%PDF-1.4\n"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("(Total: USD 15.25) Tj"));
        assert!(text.contains("(2026-01: USD 15.25 \\(2 entries\\)) Tj"));
    }

    #[tokio::test]
    async fn test_report_empty_range() {
        let router = test_router();
        let response = send(
            &router,
            Method::GET,
            "/reports/expenses.pdf?from=2030-01-01&to=2030-01-31",
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let text = String::from_utf8_lossy(&body_bytes(response).await).to_string();
        assert!(text.contains("(Total:  0.00) Tj"));
    }

    #[tokio::test]
    async fn test_report_bad_requests() {
        let router = test_router();
        let cases = [
            ("/reports/expenses.pdf?from=2026-01-01", "from and to are required"),
            ("/reports/expenses.pdf?from=01/01/2026&to=2026-01-31", "Invalid date format"),
            ("/reports/expenses.pdf?from=2026-02-01&to=2026-01-01", "Invalid date range"),
            (
                "/reports/expenses.pdf?from=2026-01-01&to=2026-01-31&groupBy=year",
                "Invalid groupBy value",
            ),
        ];
        for (uri, message) in cases {
            let response = send(&router, Method::GET, uri, None).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(body_json(response).await, json!({ "error": message }));
        }
    }

    #[tokio::test]
    async fn test_report_with_out_of_range_year() {
        let router = test_router();
        create(&router, 3.0, "-262143-01-01").await;
        create(&router, 7.0, "2026-01-07").await;

        let response = send(
            &router,
            Method::GET,
            "/reports/expenses.pdf?from=-262143-01-01&to=2026-12-31&groupBy=week",
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "Invalid date format" }));

        let response = send(
            &router,
            Method::GET,
            "/reports/expenses.pdf?from=2026-01-01&to=2026-12-31&groupBy=week",
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let text = String::from_utf8_lossy(&body_bytes(response).await).to_string();
        assert!(text.contains("(Week of 2026-01-05: USD 7.00 \\(1 entries\\)) Tj"));
    }

    #[tokio::test]
    async fn test_report_unencodable_text() {
        let router = test_router();
        let response = send(
            &router,
            Method::POST,
            "/expenses",
            Some(json!({
                "amount": 4.0,
                "currency": "\u{20ac}",
                "categoryId": "cat-food",
                "date": "2026-01-05",
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = send(
            &router,
            Method::GET,
            "/reports/expenses.pdf?from=2026-01-01&to=2026-01-31",
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
