use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Body returned by the create endpoint: `{ "success": true, "id": … }`.
#[derive(Debug, Serialize)]
pub struct Created {
    pub success: bool,
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn created(id: String) -> Response {
    (StatusCode::OK, Json(Created { success: true, id })).into_response()
}

pub fn error(message: impl Into<String>, status: StatusCode) -> Response {
    let body = ErrorBody {
        error: message.into(),
    };
    (status, Json(body)).into_response()
}
