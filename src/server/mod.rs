use axum::Router;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use crate::config::ServerConfig;
use crate::resource::{Comment, Link, Memory};
use crate::storage::{Database, Store};

pub mod error;
pub mod payload;
pub mod routes;

pub use error::{ApiError, ErrorResponse};

/// Build the API router. Every store shares the one `db` handle.
pub fn router(db: Arc<Database>, static_dir: &Path) -> Router {
    Router::new()
        .merge(routes::resource_routes("/api/comments", Store::<Comment>::new(db.clone())))
        .merge(routes::resource_routes("/api/links", Store::<Link>::new(db.clone())))
        .merge(routes::resource_routes("/api/memories", Store::<Memory>::new(db)))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Run until a shutdown signal arrives, then release the database handle.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let db = Arc::new(Database::open(&config.database)?);
    let app = router(db.clone(), &config.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server running at http://localhost:{}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // In-flight requests have drained by now
    db.close()?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> (Router, Arc<Database>) {
        let db = Arc::new(Database::open_in_memory().unwrap());
        (router(db.clone(), Path::new("static-test-missing")), db)
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), 100_000).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn list_empty_returns_array() {
        let (app, _db) = app();
        for uri in ["/api/comments", "/api/links", "/api/memories"] {
            let (status, body) = send(&app, get(uri)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!([]));
        }
    }

    #[tokio::test]
    async fn create_comment_then_list() {
        let (app, _db) = app();

        let (status, body) = send(
            &app,
            post_json("/api/comments", json!({"name": "Alice", "message": "Hi"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": 1, "success": true, "message": "留言已成功添加"}));

        let (_, body) = send(&app, get("/api/comments")).await;
        assert_eq!(body[0]["name"], "Alice");
        assert_eq!(body[0]["email"], Value::Null);
        assert!(body[0]["created_at"].is_string());
    }

    #[tokio::test]
    async fn missing_required_field_is_bad_request() {
        let (app, _db) = app();

        let (status, body) = send(&app, post_json("/api/comments", json!({"name": ""}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "姓名和留言內容為必填項"}));

        let (status, body) = send(&app, post_json("/api/links", json!({"title": "x"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "標題和網址為必填項");

        let (status, body) = send(&app, post_json("/api/memories", json!({"content": "x"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "標題和內容為必填項");

        let (_, body) = send(&app, get("/api/comments")).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn empty_body_is_validation_error() {
        let (app, _db) = app();
        let req = Request::builder()
            .method("POST")
            .uri("/api/links")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "標題和網址為必填項");
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let (app, _db) = app();
        let req = Request::builder()
            .method("POST")
            .uri("/api/memories")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn form_body_creates_link() {
        let (app, _db) = app();
        let req = Request::builder()
            .method("POST")
            .uri("/api/links")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("title=Example&url=http%3A%2F%2Fexample.com&category=A"))
            .unwrap();

        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "網址已成功添加");

        let (_, body) = send(&app, get("/api/links")).await;
        assert_eq!(body[0]["url"], "http://example.com");
        assert_eq!(body[0]["category"], "A");
    }

    #[tokio::test]
    async fn memories_sorted_by_event_date() {
        let (app, _db) = app();
        for (title, date) in [("old", "2020-01-01"), ("new", "2021-01-01")] {
            let (status, _) = send(
                &app,
                post_json("/api/memories", json!({"title": title, "content": "c", "date": date})),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (_, body) = send(&app, get("/api/memories")).await;
        assert_eq!(body[0]["title"], "new");
        assert_eq!(body[1]["title"], "old");
    }

    #[tokio::test]
    async fn storage_failure_is_internal_error() {
        let (app, db) = app();
        db.close().unwrap();

        let (status, body) = send(&app, get("/api/links")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "database connection is closed"}));

        let (status, _) = send(
            &app,
            post_json("/api/links", json!({"title": "t", "url": "u"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn missing_table_message_is_surfaced() {
        let (app, db) = app();
        db.with_conn(|conn| conn.execute("DROP TABLE comments", [])).unwrap();

        let (status, body) = send(&app, get("/api/comments")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("no such table"));
    }

    #[tokio::test]
    async fn numeric_fields_are_accepted() {
        let (app, _db) = app();

        let (status, body) = send(
            &app,
            post_json("/api/memories", json!({"title": "t", "content": "c", "date": 20200101})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, _) = send(&app, post_json("/api/links", json!({"title": 2024, "url": "u"}))).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, get("/api/memories")).await;
        assert_eq!(body[0]["date"], "20200101");

        let (_, body) = send(&app, get("/api/links")).await;
        assert_eq!(body[0]["title"], "2024");
    }

    #[tokio::test]
    async fn null_required_field_is_bad_request() {
        let (app, _db) = app();
        let (status, body) = send(
            &app,
            post_json("/api/links", json!({"title": null, "url": "u"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "標題和網址為必填項");
    }
}
