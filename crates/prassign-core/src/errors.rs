//! Logic errors.

use prassign_database_interface::DatabaseError;
use thiserror::Error;

/// Logic error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("team already exists: {team_name}")]
    TeamExists { team_name: String },

    #[error("team not found: {team_name}")]
    TeamNotFound { team_name: String },

    #[error("user not found: {user_id}")]
    UserNotFound { user_id: String },

    #[error("pull request already exists: {pull_request_id}")]
    PullRequestExists { pull_request_id: String },

    #[error("pull request not found: {pull_request_id}")]
    PullRequestNotFound { pull_request_id: String },

    #[error("cannot modify merged pull request: {pull_request_id}")]
    PullRequestMerged { pull_request_id: String },

    #[error("user {user_id} is not assigned to pull request {pull_request_id}")]
    NotAssigned {
        pull_request_id: String,
        user_id: String,
    },

    #[error("no active replacement candidate available for pull request {pull_request_id}")]
    NoCandidate { pull_request_id: String },

    #[error("invalid input data: {message}")]
    InvalidInput { message: String },

    #[error("operation deadline of {timeout_ms}ms exceeded")]
    DeadlineExceeded { timeout_ms: u64 },

    /// Wraps [`prassign_database_interface::DatabaseError`].
    #[error("Database error: {source}")]
    DatabaseError { source: DatabaseError },
}

impl DomainError {
    pub fn invalid_input<T: Into<String>>(message: T) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

impl From<DatabaseError> for DomainError {
    fn from(e: DatabaseError) -> Self {
        match e {
            DatabaseError::UnknownTeam(team_name) => Self::TeamNotFound { team_name },
            DatabaseError::UnknownUser(user_id) => Self::UserNotFound { user_id },
            DatabaseError::UnknownPullRequest(pull_request_id) => {
                Self::PullRequestNotFound { pull_request_id }
            }
            e => Self::DatabaseError { source: e },
        }
    }
}

/// Result alias for `DomainError`.
pub type Result<T> = core::result::Result<T, DomainError>;
