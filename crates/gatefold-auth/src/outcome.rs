//! The three-way authentication outcome delivered to the router.

use std::collections::HashMap;

use http::StatusCode;

/// Result of running an authentication scheme against a request.
///
/// `Success` carries the resolved profile. `Failure` ends the request (by
/// convention with an unauthorized status). `Skip` means "not my credential
/// type" and lets the next scheme in a chain have a look.
#[derive(Debug, Clone)]
pub enum AuthOutcome<P> {
    /// The credential resolved to a profile.
    Success(P),
    /// The credential named this scheme but did not authenticate.
    Failure {
        status: Option<StatusCode>,
        details: Option<HashMap<String, String>>,
    },
    /// The credential belongs to a different scheme.
    Skip {
        status: Option<StatusCode>,
        details: Option<HashMap<String, String>>,
    },
}

impl<P> AuthOutcome<P> {
    /// A `Failure` with an unauthorized status and no caller-visible detail.
    ///
    /// Schemes deliberately collapse every failure cause into this shape so
    /// that clients cannot probe why a token was rejected.
    pub fn unauthorized() -> Self {
        AuthOutcome::Failure {
            status: Some(StatusCode::UNAUTHORIZED),
            details: None,
        }
    }

    /// A `Skip` with no status or detail.
    pub fn skip() -> Self {
        AuthOutcome::Skip {
            status: None,
            details: None,
        }
    }

    /// Whether this outcome is `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success(_))
    }

    /// Whether this outcome is `Skip`.
    pub fn is_skip(&self) -> bool {
        matches!(self, AuthOutcome::Skip { .. })
    }

    /// Consume the outcome, returning the profile if authentication succeeded.
    pub fn into_profile(self) -> Option<P> {
        match self {
            AuthOutcome::Success(p) => Some(p),
            _ => None,
        }
    }
}
