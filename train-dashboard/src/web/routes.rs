//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use tower_http::services::ServeDir;
use tracing::error;

use crate::board::Board;
use crate::export::{EXPORT_FILE_NAME, ExportDocument, ExportError, render_pdf};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/", get(dashboard_page))
        .route("/health", get(health))
        .route("/board", get(board))
        .route("/export.pdf", get(export_pdf))
        .nest_service("/static", static_dir)
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The dashboard page.
async fn dashboard_page(State(state): State<AppState>) -> DashboardTemplate {
    let snapshot = state.snapshot.current().await;
    let board = Board::build(&snapshot.trains, Utc::now(), &state.config.current_station);
    DashboardTemplate::new(&board, &snapshot, &state.config)
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// The four category tables, as an HTML fragment or JSON.
async fn board(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    let snapshot = state.snapshot.current().await;
    let board = Board::build(&snapshot.trains, Utc::now(), &state.config.current_station);

    if accepts_html(&headers) {
        let html = BoardFragmentTemplate::new(&board, &snapshot)
            .render()
            .map_err(|e| AppError::Internal {
                message: format!("Template error: {}", e),
            })?;
        Ok(Html(html).into_response())
    } else {
        Ok(Json(BoardResponse::new(&board, &snapshot)).into_response())
    }
}

/// Download the PDF export.
async fn export_pdf(State(state): State<AppState>) -> Result<Response, AppError> {
    let trains = state.snapshot.trains().await;
    let board = Board::build(&trains, Utc::now(), &state.config.current_station);
    let doc = ExportDocument::from_board(&board);

    let bytes = tokio::task::spawn_blocking(move || render_pdf(&doc))
        .await
        .map_err(|e| AppError::Internal {
            message: format!("export task failed: {}", e),
        })??;

    let disposition = format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME);
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, disposition.as_str()),
        ],
        bytes,
    )
        .into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    Internal { message: String },
}

impl From<ExportError> for AppError {
    fn from(e: ExportError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        error!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::test_support::train;
    use crate::config::DashboardConfig;
    use crate::domain::Train;
    use crate::feed::TrainSnapshot;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use chrono::Duration;
    use tower::ServiceExt;

    /// T1 (Goods, +1h) is upcoming; T2 (Express, +30h) is outside the window.
    fn feed() -> Vec<Train> {
        let now = Utc::now();
        vec![
            train("T1", "Goods", now + Duration::hours(1)),
            train("T2", "Express", now + Duration::hours(30)),
        ]
    }

    async fn app_with(trains: Vec<Train>) -> (Router, TrainSnapshot) {
        let snapshot = TrainSnapshot::new();
        snapshot.replace(trains, Utc::now()).await;
        let state = AppState::new(snapshot.clone(), DashboardConfig::default());
        (create_router(state), snapshot)
    }

    async fn get(app: Router, uri: &str, accept: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
        let request = Request::builder()
            .uri(uri)
            .header(header::ACCEPT, accept)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, body.to_vec())
    }

    #[tokio::test]
    async fn health_ok() {
        let (app, _) = app_with(Vec::new()).await;
        let (status, _, body) = get(app, "/health", "*/*").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok");
    }

    #[tokio::test]
    async fn dashboard_page_lists_upcoming_trains() {
        let (app, _) = app_with(feed()).await;
        let (status, headers, body) = get(app, "/", "text/html").await;
        let html = String::from_utf8(body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert!(
            headers[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
        assert!(html.contains("Current Station : sc"));
        assert!(html.contains("data-train=\"T1\""));
        assert!(!html.contains("data-train=\"T2\""));
        for heading in ["Goods", "Superfast", "Passenger", "Express"] {
            assert!(html.contains(&format!("<h2>{heading}</h2>")));
        }
    }

    #[tokio::test]
    async fn board_json() {
        let (app, _) = app_with(feed()).await;
        let (status, _, body) = get(app, "/board", "application/json").await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        let sections = json["sections"].as_array().unwrap();
        assert_eq!(sections.len(), 4);
        assert_eq!(sections[0]["category"], "Goods");
        assert_eq!(sections[0]["rows"][0]["name"], "T1");
        assert_eq!(sections[0]["rows"][0]["current_station"], "sc");
        assert_eq!(sections[1]["heading"], "Superfast");
        assert!(sections[3]["rows"].as_array().unwrap().is_empty());
        assert_eq!(json["stale"], false);
    }

    #[tokio::test]
    async fn board_fragment() {
        let (app, _) = app_with(feed()).await;
        let (status, _, body) = get(app, "/board", "text/html").await;
        let html = String::from_utf8(body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("id=\"feed-status\""));
        assert!(html.contains("data-train=\"T1\""));
        assert!(!html.contains("<html"));
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_board() {
        let (app, snapshot) = app_with(feed()).await;
        snapshot.record_failure("connection refused", Utc::now()).await;

        let (status, _, body) = get(app, "/board", "application/json").await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["stale"], true);
        assert_eq!(json["last_failure"]["message"], "connection refused");
        assert_eq!(json["sections"][0]["rows"][0]["name"], "T1");
    }

    #[tokio::test]
    async fn export_pdf_download() {
        let (app, _) = app_with(feed()).await;
        let (status, headers, body) = get(app, "/export.pdf", "*/*").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"trains_list.pdf\""
        );
        assert!(body.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn export_with_empty_feed() {
        let (app, _) = app_with(Vec::new()).await;
        let (status, _, body) = get(app, "/export.pdf", "*/*").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with(b"%PDF"));
    }

    #[test]
    fn app_error_response() {
        let response = AppError::Internal {
            message: "boom".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
