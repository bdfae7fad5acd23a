use std::path::PathBuf;
use rocket::{State, get, post, http::Status, fs::NamedFile, serde::json::Json};
use serde_json::Value;
use tracing::{debug, instrument};
use shared::models::*;
use crate::{error::ApiError, store::RosterStore};

pub struct AppState {
    pub store: RosterStore,
}

impl AppState {
    pub fn new(store: RosterStore) -> Self {
        Self { store }
    }
}

/// Directory the bundled static assets were extracted to.
pub struct StaticDir(pub PathBuf);

#[get("/data")]
pub async fn list_entries(state: &State<AppState>) -> Result<Json<Vec<Entry>>, ApiError> {
    state.store
        .list()
        .await
        .map(Json)
        .map_err(|_| ApiError::FetchFailed)
}

// The body is taken as raw JSON so that a wrong shape is answered with the
// same 400 as a failed validation instead of Rocket's 422.
#[instrument(skip(state, body))]
#[post("/submit", data = "<body>")]
pub async fn submit(
    state: &State<AppState>,
    body: Json<Value>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let request = SubmitRequest::from_json(body.into_inner()).map_err(|e| {
        debug!("Malformed submission: {}", e);
        ApiError::InvalidData
    })?;

    match state.store.submit(request).await {
        Ok(users) => Ok(Json(SubmitResponse::ok(users))),
        Err(e) => {
            debug!("Submission rejected: {}", e);
            Err(ApiError::on_submit(e))
        }
    }
}

#[instrument(skip(state))]
#[post("/reset")]
pub async fn reset(state: &State<AppState>) -> Result<Json<ResetResponse>, ApiError> {
    state.store
        .reset()
        .await
        .map(|_| Json(ResetResponse::ok()))
        .map_err(|_| ApiError::ResetFailed)
}

#[rocket::options("/<_..>")]
pub async fn all_options() -> Status {
    Status::Ok
}

#[get("/<path..>", rank = 20)]
pub async fn static_files(path: PathBuf, dir: &State<StaticDir>) -> Option<NamedFile> {
    if path.as_os_str().is_empty() {
        return NamedFile::open(dir.0.join("index.html")).await.ok();
    }

    let file_path = dir.0.join(&path);
    if file_path.is_file() {
        NamedFile::open(&file_path).await.ok()
    } else {
        None
    }
}
