//! Server errors.

use actix_http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use prassign_core::DomainError;
use thiserror::Error;
use tracing::error;

/// Server error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error,\n  caused by: {}", source)]
    IoError { source: std::io::Error },

    #[error("Could not set up metrics: {}", message)]
    MetricsError { message: String },
}

/// Result alias for `ServerError`.
pub type Result<T> = core::result::Result<T, ServerError>;

/// API error, rendered as `{"error": {"code", "message"}}`.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input data: {}", message)]
    InvalidInput { message: String },

    #[error(transparent)]
    DomainError { source: DomainError },
}

impl ApiError {
    /// Build an invalid input error.
    pub fn invalid_input<T: Into<String>>(message: T) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// API error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::DomainError { source } => match source {
                DomainError::TeamExists { .. } => "TEAM_EXISTS",
                DomainError::PullRequestExists { .. } => "PR_EXISTS",
                DomainError::PullRequestMerged { .. } => "PR_MERGED",
                DomainError::NotAssigned { .. } => "NOT_ASSIGNED",
                DomainError::NoCandidate { .. } => "NO_CANDIDATE",
                DomainError::TeamNotFound { .. }
                | DomainError::UserNotFound { .. }
                | DomainError::PullRequestNotFound { .. } => "NOT_FOUND",
                DomainError::InvalidInput { .. } => "INVALID_INPUT",
                DomainError::DeadlineExceeded { .. } | DomainError::DatabaseError { .. } => {
                    "INTERNAL_ERROR"
                }
            },
        }
    }

    /// Render the JSON error body for a code and a message.
    pub fn body(code: &'static str, message: &str) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": code,
                "message": message,
            }
        })
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self::DomainError { source: e }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            "INVALID_INPUT" => StatusCode::BAD_REQUEST,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "INTERNAL_ERROR" => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let message = if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self, message = "Internal error while handling request");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status_code).json(Self::body(self.code(), &message))
    }
}

#[cfg(test)]
mod tests {
    use prassign_database_interface::DatabaseError;

    use super::*;

    fn domain(e: DomainError) -> ApiError {
        e.into()
    }

    #[test]
    fn status_codes() {
        let cases = [
            (ApiError::invalid_input("x"), StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            (
                domain(DomainError::UserNotFound {
                    user_id: "u1".into(),
                }),
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
            (
                domain(DomainError::TeamExists {
                    team_name: "t".into(),
                }),
                StatusCode::CONFLICT,
                "TEAM_EXISTS",
            ),
            (
                domain(DomainError::NoCandidate {
                    pull_request_id: "pr".into(),
                }),
                StatusCode::CONFLICT,
                "NO_CANDIDATE",
            ),
            (
                domain(DomainError::DeadlineExceeded { timeout_ms: 100 }),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
            (
                domain(DomainError::DatabaseError {
                    source: DatabaseError::ImplementationError {
                        source: "boom".into(),
                    },
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ];

        for (error, status, code) in cases {
            assert_eq!(error.status_code(), status);
            assert_eq!(error.code(), code);
        }
    }
}
