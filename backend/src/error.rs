use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use shared::error::ErrorResponse;
use thiserror::Error;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid data")]
    InvalidData,
    #[error("Failed to save")]
    SaveFailed,
    #[error("Failed to fetch data")]
    FetchFailed,
    #[error("Failed to reset")]
    ResetFailed,
}

impl ApiError {
    pub fn on_submit(e: StoreError) -> Self {
        match e {
            StoreError::Invalid(_) => ApiError::InvalidData,
            StoreError::Backend(_) => ApiError::SaveFailed,
        }
    }

    pub fn status(&self) -> Status {
        match self {
            ApiError::InvalidData => Status::BadRequest,
            ApiError::SaveFailed => Status::InternalServerError,
            ApiError::FetchFailed => Status::InternalServerError,
            ApiError::ResetFailed => Status::InternalServerError,
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        let body = Json(ErrorResponse::new(self.to_string()));

        rocket::Response::build_from(body.respond_to(req)?)
            .status(status)
            .ok()
    }
}
