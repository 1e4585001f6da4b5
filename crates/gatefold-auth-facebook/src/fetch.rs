//! Profile fetching and decoding.

use std::time::Duration;

use gatefold_auth::AuthError;

use crate::profile::FacebookProfile;

/// Fetch `/me` with the negotiated field list and decode the body straight
/// into the consumer's schema type.
///
/// Decode failure is a hard failure: if the deployment declared a
/// non-optional attribute the Graph API did not return, the whole
/// authentication attempt fails rather than yielding a partial profile.
pub(crate) async fn fetch_profile<P: FacebookProfile>(
    client: &reqwest::Client,
    graph_uri: &str,
    token: &str,
    fields: &str,
    timeout: Duration,
) -> Result<P, AuthError> {
    let response = client
        .get(format!("{graph_uri}/me"))
        .query(&[("access_token", token), ("fields", fields)])
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| AuthError::ProfileEndpoint(format!("me request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AuthError::ProfileEndpoint(format!(
            "me endpoint returned HTTP {status}"
        )));
    }

    response
        .json::<P>()
        .await
        .map_err(|e| AuthError::ProfileDecode(e.to_string()))
}
