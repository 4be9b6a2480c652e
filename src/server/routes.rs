//! HTTP routes
//!
//! Request decoding, status mapping, and response encoding for the vault
//! API. This is the only layer that logs; storage failures arrive here as
//! typed values and leave as JSON error bodies.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{HealthError, StorageError};
use crate::storage::{FileStore, health};

/// Upload size cap (multipart body), matching the original 32 MiB limit.
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

const FORM_FILE_KEY: &str = "file";
const FORM_DIR_KEY: &str = "dir";

/// State shared across handlers
pub struct AppState {
    pub store: Arc<dyn FileStore>,
    pub root: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub dir: String,
    pub filename: String,
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct PathQuery {
    #[serde(default)]
    pub path: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Assemble the vault API router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/v1",
            get(get_file).post(upload_file).delete(remove_file),
        )
        .route("/api/v1/healthz", get(healthz))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

fn api_error(status: StatusCode, message: String, path: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            message,
            path: path.to_string(),
        }),
    )
}

fn bad_request(message: String, path: &str) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, message, path)
}

/// Map storage errors to transport status codes. The core owns the
/// taxonomy, this layer owns the mapping.
fn storage_error(path: &str, error: StorageError) -> ApiError {
    let status = match &error {
        StorageError::InvalidPath(_) => StatusCode::BAD_REQUEST,
        StorageError::AlreadyExists { .. } => StatusCode::CONFLICT,
        StorageError::NotFound(_) => StatusCode::NOT_FOUND,
        StorageError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    api_error(status, error.to_string(), path)
}

async fn get_file(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PathQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let data = state.store.read_file(&query.path).map_err(|e| {
        warn!("Read failed for {}: {}", query.path, e);
        storage_error(&query.path, e)
    })?;

    let content_type = mime_guess::from_path(&query.path)
        .first_or_octet_stream()
        .to_string();

    Ok(([(header::CONTENT_TYPE, content_type)], data))
}

async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let mut dir = String::new();
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(e.to_string(), ""))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FORM_DIR_KEY => {
                dir = field
                    .text()
                    .await
                    .map_err(|e| bad_request(e.to_string(), ""))?;
            }
            FORM_FILE_KEY => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(e.to_string(), ""))?;
                upload = Some((filename, data.to_vec()));
            }
            _ => {}
        }
    }

    let Some((filename, data)) = upload else {
        return Err(bad_request(
            format!("missing form key '{}' for file", FORM_FILE_KEY),
            "",
        ));
    };

    if !filename.contains('.') {
        return Err(bad_request(
            "filename has to be in the format <name>.<ext>, for example vault.json".to_string(),
            "",
        ));
    }

    let logical = join_logical(&dir, &filename);
    let mut reader = data.as_slice();
    state.store.create_file(&logical, &mut reader).map_err(|e| {
        warn!("Upload failed for {}: {}", logical, e);
        storage_error(&logical, e)
    })?;

    info!("Stored {}", logical);
    let response = UploadResponse {
        dir: Path::new(&logical)
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default(),
        filename,
        path: logical,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

async fn remove_file(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PathQuery>,
) -> Result<StatusCode, ApiError> {
    state.store.remove_file(&query.path).map_err(|e| {
        warn!("Remove failed for {}: {}", query.path, e);
        storage_error(&query.path, e)
    })?;

    info!("Removed {}", query.path);
    Ok(StatusCode::NO_CONTENT)
}

async fn healthz(State(state): State<Arc<AppState>>) -> Result<StatusCode, ApiError> {
    health::check(&state.root).map_err(|e| {
        warn!("Health check failed: {}", e);
        let (status, path) = match &e {
            HealthError::RootMissing(path) => (StatusCode::BAD_REQUEST, path.clone()),
            HealthError::ProbeFailed { path, .. } => (StatusCode::BAD_REQUEST, path.clone()),
            HealthError::CleanupFailed { path, .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, path.clone())
            }
        };
        api_error(status, e.to_string(), &path.to_string_lossy())
    })?;

    Ok(StatusCode::OK)
}

/// Join the form-supplied directory and filename into one logical path,
/// the way the upload endpoint addresses files.
fn join_logical(dir: &str, filename: &str) -> String {
    let dir = dir.trim_matches('/');
    if dir.is_empty() {
        filename.to_string()
    } else {
        format!("{}/{}", dir, filename)
    }
}
