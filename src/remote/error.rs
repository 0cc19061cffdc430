/// Failure talking to the backend.
///
/// Variants carry the server's `detail` message when one was sent.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("unauthorized: {}", .detail.as_deref().unwrap_or("credential rejected"))]
    Unauthorized { detail: Option<String> },

    #[error("forbidden: {}", .detail.as_deref().unwrap_or("insufficient permissions"))]
    Forbidden { detail: Option<String> },

    #[error("server returned {status}: {}", .detail.as_deref().unwrap_or("no details"))]
    Status { status: u16, detail: Option<String> },

    #[error("decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn from_status(status: u16, detail: Option<String>) -> Self {
        match status {
            401 => ApiError::Unauthorized { detail },
            403 => ApiError::Forbidden { detail },
            _ => ApiError::Status { status, detail },
        }
    }

    /// Message supplied by the server, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { detail }
            | ApiError::Forbidden { detail }
            | ApiError::Status { detail, .. } => detail.as_deref(),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }

    /// The credential itself was refused (as opposed to the network or server failing).
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}
