//! App-identity verification.
//!
//! Before any profile data from a token is trusted, the token must prove it
//! was issued for the application this deployment expects. Subject ids are
//! application-scoped, so skipping this check would let a token from an
//! unrelated app resolve (or collide) against our cache.

use std::time::Duration;

use gatefold_auth::AuthError;
use serde::Deserialize;

/// The Graph API's `/app` response, reduced to the field we compare.
#[derive(Debug, Deserialize)]
struct AppIdentity {
    id: Option<String>,
}

/// Confirm the token was issued for `app_id`.
///
/// Resolves `Ok(())` only when the `/app` call succeeds and the returned id
/// exactly equals the configured one. Every failure mode — network error,
/// timeout, non-success status, malformed body, missing or mismatched id —
/// is an error here; the caller collapses them all to the same unauthorized
/// outcome and only logging tells them apart.
pub(crate) async fn verify_app_identity(
    client: &reqwest::Client,
    graph_uri: &str,
    token: &str,
    app_id: &str,
    timeout: Duration,
) -> Result<(), AuthError> {
    let response = client
        .get(format!("{graph_uri}/app"))
        .query(&[("access_token", token)])
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| AuthError::IdentityEndpoint(format!("app request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AuthError::IdentityEndpoint(format!(
            "app endpoint returned HTTP {status}"
        )));
    }

    let identity: AppIdentity = response
        .json()
        .await
        .map_err(|e| AuthError::IdentityEndpoint(format!("app response parse failed: {e}")))?;

    match identity.id {
        Some(id) if id == app_id => Ok(()),
        Some(id) => Err(AuthError::IdentityMismatch {
            got: id,
            expected: app_id.to_string(),
        }),
        None => Err(AuthError::IdentityEndpoint(
            "app response missing id".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_identity_decodes_id() {
        let identity: AppIdentity =
            serde_json::from_str(r#"{"id":"167559023134334","name":"Test App"}"#).unwrap();
        assert_eq!(identity.id.as_deref(), Some("167559023134334"));
    }

    #[test]
    fn test_app_identity_tolerates_missing_id() {
        // A success status with no id in the body is handled as an endpoint
        // error, not a decode panic.
        let identity: AppIdentity = serde_json::from_str(r#"{"name":"Test App"}"#).unwrap();
        assert!(identity.id.is_none());
    }
}
