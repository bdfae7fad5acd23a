use rocket::{Request, catch, serde::json::Json};
use serde::Serialize;
use shared::error::ErrorResponse;

#[derive(Serialize)]
pub struct ErrorMessage {
    error: String,
    status: u16,
}

// Unparseable bodies on /api/submit land here and must look like any other
// rejected submission.
#[catch(400)]
pub fn bad_request(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::invalid_data())
}

#[catch(404)]
pub fn not_found(_req: &Request) -> Json<ErrorMessage> {
    Json(ErrorMessage {
        error: "The requested resource was not found.".into(),
        status: 404
    })
}

#[catch(422)]
pub fn unprocessable(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::invalid_data())
}

#[catch(500)]
pub fn internal_error(_req: &Request) -> Json<ErrorMessage> {
    Json(ErrorMessage {
        error: "An internal server error occurred.".into(),
        status: 500
    })
}
