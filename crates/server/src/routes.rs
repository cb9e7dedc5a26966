use axum::extract::{DefaultBodyLimit, Multipart, Query, State};
use axum::http::{header, HeaderValue};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tabella_convert::{convert_to_buffer, ConvertOptions, SheetLayout, Strategy};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::ApiError;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
}

/// Health check response.
#[derive(Serialize, Deserialize)]
pub struct Health {
    /// Server status ("ok" when healthy).
    pub status: String,
    /// Server version from Cargo.toml.
    pub version: String,
}

/// Health check endpoint handler.
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Create the application router.
///
/// This is separated from `main()` to allow testing.
pub fn create_router(config: Config) -> Router {
    let cors = cors_layer(&config);
    Router::new()
        .route("/health", get(health))
        .route("/api/convert", post(convert))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(AppState {
            config: Arc::new(config),
        })
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.frontend_url == "*" {
        return CorsLayer::permissive();
    }
    // FRONTEND_URL holds one or more comma-separated origins
    let origins: Vec<HeaderValue> = config
        .frontend_url
        .split(',')
        .filter_map(|origin| match origin.trim().parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("skipping invalid origin {origin:?}: {e}");
                None
            }
        })
        .collect();
    if origins.is_empty() {
        tracing::warn!("no valid origin in FRONTEND_URL, allowing any origin");
        return CorsLayer::permissive();
    }
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[derive(Debug, Default, Deserialize)]
pub struct ConvertParams {
    strategy: Option<String>,
    layout: Option<String>,
}

impl ConvertParams {
    fn to_options(&self) -> Result<ConvertOptions, ApiError> {
        let strategy = match &self.strategy {
            Some(s) => s.parse::<Strategy>().map_err(ApiError::BadRequest)?,
            None => Strategy::default(),
        };
        let layout = match self.layout.as_deref() {
            None | Some("sheets") => SheetLayout::PerTable,
            Some("merged") => SheetLayout::Merged,
            Some(other) => {
                return Err(ApiError::bad_request(format!(
                    "unknown sheet layout: {other}"
                )))
            }
        };
        Ok(ConvertOptions { strategy, layout })
    }
}

/// `POST /api/convert`: multipart upload in, xlsx attachment out.
async fn convert(
    State(state): State<AppState>,
    Query(params): Query<ConvertParams>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let options = params.to_options()?;

    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("failed to read upload: {e}")))?;
            upload = Some((filename, data.to_vec()));
        }
    }

    let (filename, data) = upload.ok_or_else(|| ApiError::bad_request("No file part"))?;
    if filename.is_empty() {
        return Err(ApiError::bad_request("No selected file"));
    }
    if !filename.to_ascii_lowercase().ends_with(".pdf") {
        return Err(ApiError::bad_request("Invalid file type. Only PDF allowed."));
    }

    // Download name keeps the upload's stem; the scratch file does not
    let stem = Path::new(&filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string();

    let work_dir = state.config.work_dir.clone();
    let (bytes, summary) = tokio::task::spawn_blocking(move || {
        let scratch = tempfile::tempdir_in(&work_dir)
            .map_err(|e| ApiError::internal(format!("failed to create scratch dir: {e}")))?;
        let input_path = scratch.path().join("input.pdf");
        std::fs::write(&input_path, &data)
            .map_err(|e| ApiError::internal(format!("failed to store upload: {e}")))?;
        convert_to_buffer(&input_path, &options).map_err(ApiError::from)
    })
    .await
    .map_err(|e| ApiError::internal(format!("conversion task failed: {e}")))??;

    tracing::info!(
        tables = summary.tables_found,
        sheets = summary.sheets_written,
        "converted upload"
    );

    let headers = [
        (header::CONTENT_TYPE, XLSX_MIME.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{stem}.xlsx\""),
        ),
    ];
    Ok((headers, bytes))
}
