use crate::dataset::DatasetError;
use axum::http::StatusCode;
use std::time::Duration;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: message.into(),
        }
    }
}

impl From<DatasetError> for AppError {
    fn from(err: DatasetError) -> Self {
        match err {
            DatasetError::UnknownType(_) => Self::bad_request(err.to_string()),
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: other.to_string(),
            },
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// Why a provider fetch did not yield a usable image URL.
///
/// Never fatal: the refresh controller logs it, shows it for one pass and
/// keeps whatever URL it already had.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchFailure {
    #[error("provider unreachable: {0}")]
    Transport(String),
    #[error("provider did not answer within {0:?}")]
    Timeout(Duration),
    #[error("provider returned HTTP {0}")]
    Status(u16),
    #[error("provider response unusable: {0}")]
    Decode(String),
}
