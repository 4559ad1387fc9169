use thiserror::Error;

/// How a provider failure should be handled by the page walker.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    RateLimited,
    Transient,
    Fatal,
}

/// Provider API failure, produced by the HTTP layer so classification can
/// downcast it out of an `anyhow` chain. Rate limiting is detected at
/// response time, since the signal differs per provider.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("provider rate limit exhausted")]
    RateLimited,
    #[error("provider responded with status {status}")]
    Status { status: u16 },
    #[error("network failure: {0}")]
    Network(String),
}

/// Shared classifier used by every provider implementation.
pub fn classify_error(err: &anyhow::Error) -> ErrorClass {
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::RateLimited) => ErrorClass::RateLimited,
        Some(ApiError::Status { status }) if (500..600).contains(status) => ErrorClass::Transient,
        Some(ApiError::Status { .. }) => ErrorClass::Fatal,
        Some(ApiError::Network(_)) => ErrorClass::Transient,
        None => ErrorClass::Fatal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_marker_classifies_as_rate_limited() {
        let err = anyhow::Error::new(ApiError::RateLimited);
        assert_eq!(classify_error(&err), ErrorClass::RateLimited);
    }

    #[test]
    fn server_errors_classify_as_transient() {
        let err = anyhow::Error::new(ApiError::Status { status: 503 });
        assert_eq!(classify_error(&err), ErrorClass::Transient);
        let err = anyhow::Error::new(ApiError::Network("connection reset".to_string()));
        assert_eq!(classify_error(&err), ErrorClass::Transient);
    }

    #[test]
    fn client_errors_and_unknown_errors_classify_as_fatal() {
        let err = anyhow::Error::new(ApiError::Status { status: 404 });
        assert_eq!(classify_error(&err), ErrorClass::Fatal);
        let err = anyhow::anyhow!("malformed scope");
        assert_eq!(classify_error(&err), ErrorClass::Fatal);
    }

    #[test]
    fn classification_survives_context_wrapping() {
        let err =
            anyhow::Error::new(ApiError::RateLimited).context("call GitHub list repositories");
        assert_eq!(classify_error(&err), ErrorClass::RateLimited);
    }
}
