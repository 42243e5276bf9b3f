use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        DefaultBodyLimit, Multipart, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{debug, error, info, warn};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

use crate::config::Config;
use crate::event::EventRecord;
use crate::ocr::{self, OcrEngine, OcrError};
use crate::parser::parse_event;

/// Multipart field carrying the image
pub const FILE_FIELD: &str = "file";

// API state that will be shared across handlers
pub struct ApiState {
    pub engine: Arc<dyn OcrEngine>,
    /// 0 disables the timeout
    pub ocr_timeout_secs: u64,
}

impl ApiState {
    pub fn new(engine: Arc<dyn OcrEngine>, ocr_timeout_secs: u64) -> Self {
        Self { engine, ocr_timeout_secs }
    }
}

// General API response, used for errors
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}

/// Errors surfaced by the `/ocr` endpoint
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid upload: {message}")]
    Upload { status: StatusCode, message: String },
    #[error("Missing multipart field 'file'")]
    MissingFile,
    #[error(transparent)]
    Ocr(#[from] OcrError),
}

impl ApiError {
    /// Oversized bodies keep their 413, every other upload problem is a 422
    fn upload(status: StatusCode, message: String) -> Self {
        let status = if status == StatusCode::PAYLOAD_TOO_LARGE {
            status
        } else {
            StatusCode::UNPROCESSABLE_ENTITY
        };
        ApiError::Upload { status, message }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Upload { status, .. } => *status,
            ApiError::MissingFile => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Ocr(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(e: MultipartRejection) -> Self {
        ApiError::upload(e.status(), e.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        ApiError::upload(e.status(), e.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse { success: false, message: self.to_string() };
        (self.status(), Json(body)).into_response()
    }
}

// Health check endpoint
async fn health_check() -> &'static str {
    "EventSnap API is running"
}

/// `POST /ocr`: image upload in, parsed event out
async fn ocr_handler(
    State(state): State<Arc<ApiState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<EventRecord>, ApiError> {
    let request_id = Uuid::new_v4();
    info!("OCR[{}]: Upload received", request_id);

    match process_upload(&state, request_id, multipart).await {
        Ok(record) => {
            info!(
                "OCR[{}]: Extracted title={:?} date={:?} venue={:?}",
                request_id, record.title, record.date, record.venue
            );
            Ok(Json(record))
        }
        Err(e) => {
            error!("OCR[{}]: {}", request_id, e);
            Err(e)
        }
    }
}

async fn process_upload(
    state: &ApiState,
    request_id: Uuid,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<EventRecord, ApiError> {
    let multipart = multipart?;
    let bytes = read_file_field(multipart).await?;
    debug!("OCR[{}]: Read {} bytes from '{}' field", request_id, bytes.len(), FILE_FIELD);

    // Decoding large photos is CPU bound, keep it off the async workers
    let image = tokio::task::spawn_blocking(move || ocr::decode_image(&bytes))
        .await
        .map_err(|e| OcrError::Async(e.to_string()))??;

    let text =
        ocr::recognize_with_timeout(state.engine.as_ref(), &image, state.ocr_timeout_secs).await?;
    debug!(
        "OCR[{}]: {} returned {} characters",
        request_id,
        state.engine.name(),
        text.chars().count()
    );

    let record = parse_event(&text);
    if record.is_blank() {
        warn!("OCR[{}]: No event fields found in OCR output", request_id);
    }
    Ok(record)
}

/// Bytes of the first `file` field; other fields are skipped
async fn read_file_field(mut multipart: Multipart) -> Result<Bytes, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            debug!("Skipping multipart field {:?}", field.name());
            continue;
        }

        if let Some(file_name) = field.file_name() {
            debug!("Upload file name: {}", file_name);
        }
        // empty data still goes to the decoder, which rejects it
        return Ok(field.bytes().await?);
    }

    Err(ApiError::MissingFile)
}

/// Build the router with the permissive CORS policy.
///
/// `max_upload_bytes` of 0 removes the body limit.
pub fn build_router(state: Arc<ApiState>, max_upload_bytes: usize) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = if max_upload_bytes == 0 {
        DefaultBodyLimit::disable()
    } else {
        DefaultBodyLimit::max(max_upload_bytes)
    };

    Router::new()
        .route("/health", get(health_check))
        .route("/ocr", post(ocr_handler))
        .layer(body_limit)
        .layer(cors)
        .with_state(state)
}

// Create and start the API server
pub async fn start_api_server(config: Config) -> Result<()> {
    let engine = ocr::engine_from_config(&config.ocr)?;
    let state = Arc::new(ApiState::new(engine, config.ocr.timeout_secs));
    let app = build_router(state, config.server.max_upload_bytes);

    let host = config.server.host.as_str();
    let port = config.server.port;
    info!("API server starting on http://{}:{}", host, port);

    let listener = TcpListener::bind((host, port))
        .await
        .map_err(|e| anyhow!("Failed to bind to address {}:{}: {}", host, port, e))?;
    let addr = listener.local_addr().context("Failed to read bound address")?;

    info!("Upload endpoint available at http://{}/ocr", addr);
    info!("API server successfully bound to {}. Waiting for connections...", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow!("Failed to start API server: {}", e))?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        // keep serving
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
