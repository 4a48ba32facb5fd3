//! The `{success, data, error}` envelope every backend response uses.

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Unwrap the payload, turning `success: false` into [`ClientError::Api`].
    pub fn into_result(self) -> Result<T, ClientError> {
        if !self.success {
            return Err(ClientError::Api(
                self.error
                    .unwrap_or_else(|| "The server reported an unspecified error".to_string()),
            ));
        }
        self.data.ok_or(ClientError::MissingData)
    }
}
