use thiserror::Error;

/// Rejected repository URL. Shown inline next to the input, never as a toast.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a repository URL")]
    EmptyUrl,
    #[error("Please enter a valid GitHub repository URL")]
    NotGithub,
}

/// Failure of one of the two backend calls. The payload is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("{0}")]
    Fetch(String),
    #[error("{0}")]
    Analysis(String),
}

impl ClientError {
    pub fn message(&self) -> &str {
        match self {
            ClientError::Fetch(msg) | ClientError::Analysis(msg) => msg,
        }
    }
}
