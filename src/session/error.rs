use crate::remote::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The backend refused or could not be reached. `message` is what the
    /// user should see: the server's detail, or a static fallback.
    #[error("{message}")]
    Request {
        message: String,
        #[source]
        source: ApiError,
    },

    #[error("could not persist credential")]
    Storage(#[source] anyhow::Error),
}

impl SessionError {
    pub(super) fn request(source: ApiError, fallback: &str) -> Self {
        let message = source.detail().unwrap_or(fallback).to_string();
        SessionError::Request { message, source }
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            SessionError::Request { source, .. } => Some(source),
            SessionError::Storage(_) => None,
        }
    }
}
