use schoolhub_auth::SessionError;
use schoolhub_config::ConfigError;
use schoolhub_core::FALLBACK_ERROR_MESSAGE;
use thiserror::Error;

/// Message shown when a request never reached the server.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Unable to reach the server. Check your connection and try again.";

/// Message shown on a 401 whose body carries no explanation.
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("{message}")]
    Unauthorized { message: String },

    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ApiError {
    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Text suitable for a toast or inline banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized { message } | Self::Status { message, .. } => message.clone(),
            Self::Transport(_) => NETWORK_ERROR_MESSAGE.to_string(),
            Self::Decode(_) | Self::Config(_) | Self::Session(_) => {
                FALLBACK_ERROR_MESSAGE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_is_shown_verbatim() {
        let error = ApiError::Status {
            status: 409,
            message: "Room is full".into(),
        };
        assert_eq!(error.user_message(), "Room is full");
        assert_eq!(error.status(), Some(409));
        assert_eq!(error.to_string(), "Room is full (HTTP 409)");
    }

    #[test]
    fn test_decode_error_uses_fallback() {
        let decode = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let error = ApiError::from(decode);
        assert_eq!(error.user_message(), FALLBACK_ERROR_MESSAGE);
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_unauthorized() {
        let error = ApiError::Unauthorized {
            message: SESSION_EXPIRED_MESSAGE.into(),
        };
        assert!(error.is_unauthorized());
        assert_eq!(error.status(), Some(401));
    }
}
