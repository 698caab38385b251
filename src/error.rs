use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error("failed to initialize http client: {0}")]
    ClientInit(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("json parse error: {0}")]
    Parse(String),
    #[error("{0}")]
    ServerReported(String),
    #[error("response is missing field {0}")]
    MissingField(&'static str),
}

impl LoginError {
    /// True when the login service could not be reached or understood, as
    /// opposed to the service answering with a rejected login.
    pub fn is_communication_failure(&self) -> bool {
        matches!(
            self,
            LoginError::ClientInit(_) | LoginError::Transport(_) | LoginError::Parse(_)
        )
    }
}

impl From<serde_json::Error> for LoginError {
    fn from(e: serde_json::Error) -> Self {
        LoginError::Parse(e.to_string())
    }
}
