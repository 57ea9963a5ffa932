use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::application::dto::ErrorResponse;
use crate::application::errors::UploadError;
use crate::application::ports::StorageError;

/// API error response
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: Option<&'static str>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> Option<&'static str> {
        self.code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
            code: self.code.map(str::to_string),
        });

        (self.status, body).into_response()
    }
}

// Convert use case errors to API errors

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Rejected(rejection) => {
                ApiError::bad_request(rejection.to_string()).with_code(rejection.code())
            }
            UploadError::Storage(e) => {
                // The request body broke off while being streamed to disk
                if let StorageError::Io(io) = &e {
                    if let Some(cause) = multipart_cause(io) {
                        return ApiError::new(cause.status(), cause.body_text());
                    }
                }
                // Fault details stay in the log
                error!("Upload failed with storage error: {}", e);
                ApiError::internal_error("Internal server error")
            }
            UploadError::Inspection(e) => {
                error!("Upload failed with inspection error: {}", e);
                ApiError::internal_error("Internal server error")
            }
        }
    }
}

fn multipart_cause(err: &std::io::Error) -> Option<&MultipartError> {
    err.get_ref()
        .and_then(|inner| inner.downcast_ref::<MultipartError>())
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::new(err.status(), err.body_text())
    }
}
