use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::{contact::ApiContactResponse, ApiError};

pub mod contact;

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiContactResponse::rejected("Sorry, something went wrong.")),
    )
        .into_response()
}

fn bad_request(message: &'static str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiContactResponse::rejected(message)),
    )
        .into_response()
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ApiError {
            message: "Method Not Allowed",
        }),
    )
        .into_response()
}
