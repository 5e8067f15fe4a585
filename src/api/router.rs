//! HTTP routes: form page, extract, correct, result fetch and downloads.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::error::ApiError;
use crate::api::page::serve_index;
use crate::api::types::{ExtractResponse, HealthResponse, ResultSnapshot};
use crate::config;
use crate::pipeline::correction::{CorrectionResult, Corrector};
use crate::pipeline::extraction::{detect_image_mime, ExtractionPipeline};
use crate::session::SessionStore;

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ExtractionPipeline>,
    pub corrector: Arc<Corrector>,
    pub session: Arc<SessionStore>,
    pub max_upload_bytes: usize,
}

/// Build the application router.
pub fn app_router(state: AppState) -> Router {
    // Body limit leaves headroom over the upload cap for multipart framing;
    // the precise per-file check happens in the handler.
    let body_limit = state.max_upload_bytes + 1024 * 1024;

    Router::new()
        .route("/", get(serve_index))
        .route("/api/extract", post(handle_extract))
        .route("/api/correct", post(handle_correct))
        .route("/api/result", get(handle_result))
        .route("/api/result/text.txt", get(download_text))
        .route("/api/result/corrected.txt", get(download_corrected))
        .route("/api/health", get(handle_health))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn handle_extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, ApiError> {
    // Pull the file field out of the multipart stream
    let mut file_data: Option<(String, Vec<u8>)> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload.png").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file data: {e}")))?;
        file_data = Some((filename, bytes.to_vec()));
    }

    let (filename, bytes) = file_data
        .filter(|(_, bytes)| !bytes.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No file provided.".into()))?;

    if bytes.len() > state.max_upload_bytes {
        return Err(ApiError::PayloadTooLarge {
            max_bytes: state.max_upload_bytes,
        });
    }

    // Magic-byte check up front; the pipeline never runs on non-images
    if detect_image_mime(&bytes).is_none() {
        return Err(ApiError::UnsupportedMedia(
            "File type not supported. Please upload a PNG, JPEG, or WebP image.".into(),
        ));
    }

    // The pipeline is blocking by design; hop off the async runtime
    let pipeline = state.pipeline.clone();
    let extraction = tokio::task::spawn_blocking(move || pipeline.extract(&bytes, &filename))
        .await
        .map_err(|e| ApiError::Internal(format!("extraction task failed: {e}")))??;

    let record = state.session.store_extraction(extraction)?;
    Ok(Json(ExtractResponse::from(record)))
}

async fn handle_correct(
    State(state): State<AppState>,
) -> Result<Json<CorrectionResult>, ApiError> {
    let record = state
        .session
        .extracted()?
        .ok_or(ApiError::NoExtractedText)?;

    let corrector = state.corrector.clone();
    let result = tokio::task::spawn_blocking(move || corrector.correct(&record.text))
        .await
        .map_err(|e| ApiError::Internal(format!("correction task failed: {e}")))??;

    state.session.store_correction(result.clone())?;
    Ok(Json(result))
}

async fn handle_result(State(state): State<AppState>) -> Result<Json<ResultSnapshot>, ApiError> {
    Ok(Json(ResultSnapshot {
        text: state.session.extracted()?.map(ExtractResponse::from),
        correction: state.session.correction()?,
    }))
}

async fn download_text(State(state): State<AppState>) -> Result<Response, ApiError> {
    let record = state
        .session
        .extracted()?
        .ok_or_else(|| ApiError::NotFound("No extracted text to download.".into()))?;
    Ok(plain_text_attachment("ocr_result.txt", record.text))
}

async fn download_corrected(State(state): State<AppState>) -> Result<Response, ApiError> {
    let correction = state
        .session
        .correction()?
        .ok_or_else(|| ApiError::NotFound("No corrected text to download.".into()))?;
    Ok(plain_text_attachment("corrected.txt", correction.corrected))
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: config::APP_VERSION,
    })
}

fn plain_text_attachment(filename: &str, body: String) -> Response {
    (
        [
            (
                header::CONTENT_TYPE,
                "text/plain; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
