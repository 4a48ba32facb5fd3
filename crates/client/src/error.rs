use afilado_core::error::CoreError;
use afilado_core::feedback::Feedback;

/// Errors from the API client and the workflows built on it.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error text from the envelope, or the raw body.
        message: String,
    },

    /// The backend answered `{"success": false}`.
    #[error("API rejected the request: {0}")]
    Api(String),

    /// The backend answered `{"success": true}` without a payload.
    #[error("API response carried no data")]
    MissingData,

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A domain rule failed before or after talking to the backend.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience alias for API call results.
pub type ApiResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Whether the failure is on the transport/server side rather than the input.
    pub fn is_technical(&self) -> bool {
        match self {
            ClientError::Request(_) | ClientError::MissingData | ClientError::Config(_) => true,
            ClientError::Http { status, .. } => *status >= 500 || *status == 408,
            ClientError::Core(CoreError::Internal(_)) => true,
            ClientError::Api(_) | ClientError::Core(_) => false,
        }
    }

    /// How the failure is presented to the user.
    pub fn feedback(&self) -> Feedback {
        match self {
            ClientError::Core(core) => Feedback::from(core),
            ClientError::Api(message) => Feedback::validation(message.clone()),
            ClientError::Http { status: 401, .. } => Feedback::sign_in_required(),
            ClientError::Http { message, .. } if !self.is_technical() => {
                Feedback::validation(message.clone())
            }
            _ => Feedback::technical("Could not reach the server, please retry"),
        }
    }
}
