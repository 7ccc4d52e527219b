use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use quietpix_imgproc::denoise::DenoiseError;
use quietpix_io::IoError;

/// An error type for the HTTP api.
///
/// Every variant is rendered as a JSON body `{"error": "<message>"}`.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// The request body is not a readable multipart form.
    #[error("Invalid multipart request. {0}")]
    InvalidMultipart(#[from] MultipartRejection),

    /// A multipart field could not be read.
    #[error("Invalid multipart field. {0}")]
    MultipartField(#[from] MultipartError),

    /// A required form field was not sent.
    #[error("Missing form field '{0}'")]
    MissingField(&'static str),

    /// The uploaded file could not be decoded as an image.
    #[error(transparent)]
    Decode(IoError),

    /// The denoised image could not be encoded.
    #[error(transparent)]
    Encode(IoError),

    /// Method selection, strength parsing or the transform failed.
    #[error(transparent)]
    Denoise(#[from] DenoiseError),

    /// The blocking worker panicked or was cancelled.
    #[error("Worker task failed. {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl ApiError {
    /// The status code reported to the client.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidMultipart(e) => e.status(),
            ApiError::MultipartField(e) => e.status(),
            ApiError::MissingField(_) => StatusCode::BAD_REQUEST,
            ApiError::Denoise(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Decode(_)
            | ApiError::Encode(_)
            | ApiError::Denoise(_)
            | ApiError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{status}: {self}");
        } else {
            log::warn!("{status}: {self}");
        }

        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
