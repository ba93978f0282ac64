//! Maps library errors onto the HTTP failure shapes every handler needs:
//! 400 on malformed request bodies, 500 with a plain-text diagnostic on
//! everything else. Method-mismatch 405s are handled by `axum`'s router
//! directly and never reach this type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response(),
        }
    }
}

impl From<revocation_merkle_tree::TreeError> for ApiError {
    fn from(e: revocation_merkle_tree::TreeError) -> Self {
        ApiError::Internal(format!("Unable to store revocation: {e}"))
    }
}

impl From<revocation_ocsp::OcspCodecError> for ApiError {
    fn from(e: revocation_ocsp::OcspCodecError) -> Self {
        ApiError::BadRequest(format!("Invalid OCSPRequest: {e}"))
    }
}
