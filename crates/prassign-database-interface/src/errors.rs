use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Unknown team '{0}'")]
    UnknownTeam(String),

    #[error("Unknown user '{0}'")]
    UnknownUser(String),

    #[error("Unknown pull request '{0}'")]
    UnknownPullRequest(String),

    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

pub type Result<T, E = DatabaseError> = core::result::Result<T, E>;
