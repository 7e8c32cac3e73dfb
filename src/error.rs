use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::shared::ErrorResponse;

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Rate limit exceeded: {0}")]
    TooManyRequests(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),

    /// Error with a caller-chosen status and code
    #[error("{code}: {message}")]
    Custom {
        status: StatusCode,
        code: String,
        message: String,
        description: Option<String>,
    },
}

const INTERNAL_DESCRIPTION: &str =
    "The server encountered an unexpected condition. Use the trace id when reporting this error.";

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) | Self::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Custom { status, .. } => *status,
        }
    }

    /// Machine-readable code, `API-<status>00` unless set explicitly
    pub fn code(&self) -> String {
        match self {
            Self::Custom { code, .. } => code.clone(),
            _ => format!("API-{}00", self.status_code().as_u16()),
        }
    }

    /// Short summary shown to clients
    pub fn message(&self) -> String {
        match self {
            Self::Custom { message, .. } => message.clone(),
            _ => self
                .status_code()
                .canonical_reason()
                .map(|reason| capitalize_first(&reason.to_lowercase()))
                .unwrap_or_else(|| "Error".to_string()),
        }
    }

    /// Detail shown to clients. Server-side causes are never exposed.
    pub fn description(&self) -> Option<String> {
        match self {
            Self::BadRequest(detail)
            | Self::Unauthorized(detail)
            | Self::Forbidden(detail)
            | Self::NotFound(detail)
            | Self::Conflict(detail)
            | Self::TooManyRequests(detail) => Some(detail.clone()),
            Self::Internal(_) | Self::Other(_) => Some(INTERNAL_DESCRIPTION.to_string()),
            Self::Custom { description, .. } => description.clone(),
        }
    }

    /// Convert to the client-facing error body. The trace id is filled in later.
    pub fn to_response(&self) -> ErrorResponse {
        let mut response = ErrorResponse::new()
            .with_code(self.code())
            .with_message(self.message());
        response.set_description(self.description());
        response
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Implement IntoResponse for automatic conversion in handlers
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        if status.is_server_error() {
            tracing::error!(
                error = %self,
                code = %code,
                status = %status.as_u16(),
                "Request failed"
            );
        } else {
            tracing::warn!(
                error = %self,
                code = %code,
                status = %status.as_u16(),
                "Request rejected"
            );
        }

        let error_response = self.to_response();

        // The trace middleware reads the body back from extensions to stamp the trace id
        let mut response = (status, Json(error_response.clone())).into_response();
        response.extensions_mut().insert(error_response);
        response
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
