use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failure reported by one of the external providers. `Display` is the raw
/// provider message, nothing wrapped around it.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The identity gateway rejected or failed an account operation.
    #[error("{0}")]
    Identity(String),
    /// The task store rejected or failed a record operation.
    #[error("{0}")]
    Store(String),
}

// A failed provider call turns into a response whose entire body is the
// provider's message. No status differentiation, no structured error page.
impl IntoResponse for ProviderError {
    fn into_response(self) -> Response {
        self.to_string().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_raw_message() {
        let err = ProviderError::Identity("EmailExistsException: already registered".to_string());
        assert_eq!(
            err.to_string(),
            "EmailExistsException: already registered"
        );
    }
}
