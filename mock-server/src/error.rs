use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::FormRejection,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Failure responses. Bodies are plain text, like the real service's error pages.
#[derive(Debug, thiserror::Error)]
pub enum MockError {
    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let status = match &self {
            MockError::Forbidden(_) => StatusCode::FORBIDDEN,
            MockError::BadRequest(_) => StatusCode::BAD_REQUEST,
            MockError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        tracing::debug!(%status, error = %self, "request rejected");
        (status, self.to_string()).into_response()
    }
}

impl From<MultipartError> for MockError {
    fn from(err: MultipartError) -> Self {
        MockError::BadRequest(format!("Malformed multipart body: {}", err.body_text()))
    }
}

impl From<MultipartRejection> for MockError {
    fn from(err: MultipartRejection) -> Self {
        MockError::BadRequest(err.body_text())
    }
}

impl From<FormRejection> for MockError {
    fn from(err: FormRejection) -> Self {
        MockError::BadRequest(err.body_text())
    }
}

pub type MockResult<T> = Result<T, MockError>;
