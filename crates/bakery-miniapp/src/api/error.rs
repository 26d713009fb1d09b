//! Errors raised by the remote data client.
use thiserror::Error;

/// Shown whenever the cause of a failure is not meant for the user.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// The request did not produce a usable HTTP answer.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The backend answered `success: false`.
    #[error("Request rejected: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),

    /// `success: true` without the `data` the operation returns.
    #[error("Response carried no data")]
    MissingData,
}

impl ApiError {
    /// The text a screen shows for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected(Some(reason)) if !reason.trim().is_empty() => reason.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_transport_detail() {
        let err = ApiError::from(TransportError::Status {
            status: 502,
            body: "<html>bad gateway</html>".into(),
        });
        assert_eq!(err.user_message(), GENERIC_FAILURE);
        assert_eq!(ApiError::MissingData.user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn test_user_message_prefers_server_reason() {
        assert_eq!(
            ApiError::Rejected(Some("Product is out of stock".into())).user_message(),
            "Product is out of stock"
        );
        assert_eq!(ApiError::Rejected(None).user_message(), GENERIC_FAILURE);
        assert_eq!(
            ApiError::Rejected(Some("  ".into())).user_message(),
            GENERIC_FAILURE
        );
    }
}
