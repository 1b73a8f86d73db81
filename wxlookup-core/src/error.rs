use reqwest::StatusCode;
use thiserror::Error;

/// What went wrong while talking to the weather provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to reach the weather provider")]
    Transport(#[source] reqwest::Error),

    #[error("weather provider returned {status}")]
    Status {
        status: StatusCode,
        /// Message from the provider's error body, when it sent one.
        message: Option<String>,
    },

    #[error("weather provider returned an unexpected payload")]
    Malformed(#[source] serde_json::Error),
}

/// The one user-facing failure: a lookup did not produce a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LookupError {
    message: String,
}

impl LookupError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ProviderError> for LookupError {
    fn from(err: ProviderError) -> Self {
        let message = match err {
            ProviderError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message,
            ProviderError::Status { status, .. } => {
                format!("Weather lookup failed ({status})")
            }
            ProviderError::Transport(_) => {
                "Could not reach the weather service. Check your connection.".to_string()
            }
            ProviderError::Malformed(_) => {
                "The weather service sent a response that could not be read.".to_string()
            }
        };

        LookupError { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_message_is_used_verbatim() {
        let err = LookupError::from(ProviderError::Status {
            status: StatusCode::BAD_REQUEST,
            message: Some("No matching location found.".into()),
        });
        assert_eq!(err.message(), "No matching location found.");
    }

    #[test]
    fn status_without_message_falls_back_to_generic_text() {
        let err = LookupError::from(ProviderError::Status {
            status: StatusCode::BAD_GATEWAY,
            message: Some("   ".into()),
        });
        assert_eq!(err.to_string(), "Weather lookup failed (502 Bad Gateway)");
    }

    #[test]
    fn malformed_payload_has_generic_text() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = LookupError::from(ProviderError::Malformed(json_err));
        assert!(err.message().contains("could not be read"));
    }
}
