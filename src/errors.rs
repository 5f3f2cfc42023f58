use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlertError {
    #[error("Failed to decode image upload: {0}")]
    DecodingError(String),

    #[error("Failed to store image in S3: {0}")]
    StorageError(String),

    #[error("Failed to classify image with Lookout for Vision: {0}")]
    ClassificationError(String),

    #[error("Failed to start outbound call with Amazon Connect: {0}")]
    TelephonyError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl AlertError {
    /// HTTP status reported to the web client when this error aborts a request.
    ///
    /// Bad input is the client's fault; anything else failed upstream.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            AlertError::DecodingError(_) => 400,
            _ => 502,
        }
    }
}

impl From<base64::DecodeError> for AlertError {
    fn from(error: base64::DecodeError) -> Self {
        AlertError::DecodingError(format!("invalid base64: {error}"))
    }
}

impl From<serde_json::Error> for AlertError {
    fn from(error: serde_json::Error) -> Self {
        AlertError::DecodingError(format!("invalid JSON: {error}"))
    }
}

