//! Auth-specific error types.

/// Errors that can occur while resolving a credential to a profile.
///
/// Every variant collapses to the same unauthorized outcome at the HTTP
/// boundary; the variants exist so server-side logs can tell token misuse
/// apart from provider unavailability.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The scheme indicator matched but no token was present on the request.
    #[error("missing credential token")]
    MissingCredential,

    /// The app-identity verification call failed (network, status, or body).
    #[error("identity verification call failed: {0}")]
    IdentityEndpoint(String),

    /// Verification succeeded but the token was issued for a different app.
    #[error("application identity mismatch: token issued for '{got}', expected '{expected}'")]
    IdentityMismatch { got: String, expected: String },

    /// The profile fetch failed at the transport or status level.
    #[error("profile request failed: {0}")]
    ProfileEndpoint(String),

    /// The profile response did not decode into the consumer's schema.
    #[error("profile decode failed: {0}")]
    ProfileDecode(String),
}

impl AuthError {
    /// Whether this error points at the identity provider rather than the
    /// presented token. Provider failures are an availability signal;
    /// everything else suggests a bad or misdirected token.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            AuthError::IdentityEndpoint(_) | AuthError::ProfileEndpoint(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        let e = AuthError::MissingCredential;
        assert_eq!(e.to_string(), "missing credential token");
    }

    #[test]
    fn test_auth_error_mismatch_display() {
        let e = AuthError::IdentityMismatch {
            got: "111".to_string(),
            expected: "222".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "application identity mismatch: token issued for '111', expected '222'"
        );
    }

    #[test]
    fn test_is_provider_failure() {
        assert!(AuthError::IdentityEndpoint("timeout".into()).is_provider_failure());
        assert!(AuthError::ProfileEndpoint("503".into()).is_provider_failure());
        // A mismatch is a token problem, not a provider problem
        assert!(
            !AuthError::IdentityMismatch {
                got: "a".into(),
                expected: "b".into()
            }
            .is_provider_failure()
        );
        assert!(!AuthError::MissingCredential.is_provider_failure());
    }
}
