use thiserror::Error;

/// Errors raised while talking to a Terraform Cloud/Enterprise API.
///
/// SECURITY: Error messages must NEVER contain sensitive data like API tokens.
#[derive(Debug, Error)]
pub enum TfeError {
    /// Token missing or not usable as a bearer header
    #[error("authentication setup failed: {message}")]
    Auth { message: String },

    /// API returned a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Requested organization or workspace does not exist (or is hidden from this token)
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// Network-level error (connection failed, timeout, etc.)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body was not the expected JSON:API document
    #[error("failed to decode response: {message}")]
    Decode { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        let err = TfeError::Auth {
            message: "missing API token".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "authentication setup failed: missing API token"
        );
    }

    #[test]
    fn test_api_error_display() {
        let err = TfeError::Api {
            status: 401,
            message: "unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "API error (401): unauthorized");
    }

    #[test]
    fn test_not_found_display() {
        let err = TfeError::NotFound {
            resource: "workspace 'acme/my-prod'".to_string(),
        };
        assert_eq!(err.to_string(), "not found: workspace 'acme/my-prod'");
    }

    #[test]
    fn test_decode_display() {
        let err = TfeError::Decode {
            message: "expected value at line 1 column 1".to_string(),
        };
        assert!(err.to_string().starts_with("failed to decode response"));
    }
}
