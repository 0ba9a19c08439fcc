use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport failure: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("service returned {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Service {
        status: u16,
        message: Option<String>,
    },
    #[error("malformed response body: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("session storage failure: {0}")]
    Storage(#[source] std::io::Error),
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("not signed in")]
    NotAuthenticated,
}

impl ClientError {
    /// Message for the user: the service's own text when it sent one, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Service {
                message: Some(message),
                ..
            } => message.clone(),
            Self::MissingField(_) | Self::NotAuthenticated => self.to_string(),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Whether the service rejected the bearer token itself.
    pub fn requires_reauth(&self) -> bool {
        matches!(self, Self::NotAuthenticated) || matches!(self.status(), Some(401 | 422))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

impl From<std::io::Error> for ClientError {
    fn from(value: std::io::Error) -> Self {
        Self::Storage(value)
    }
}
