//! The Facebook authentication state machine.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use gatefold_auth::{AuthError, AuthOutcome, AuthScheme};
use http::HeaderMap;

use crate::cache::ProfileCache;
use crate::profile::FacebookProfile;
use crate::{fetch, fields, verify};

/// Header naming the credential type carried by the request.
pub const TOKEN_TYPE_HEADER: &str = "X-token-type";

/// The indicator value that claims a request for this scheme.
pub const FACEBOOK_TOKEN_TYPE: &str = "FacebookToken";

/// Header carrying the OAuth access token itself.
pub const ACCESS_TOKEN_HEADER: &str = "access_token";

/// The live Graph API; overridable for tests and API-version pinning.
pub const DEFAULT_GRAPH_URI: &str = "https://graph.facebook.com";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for [`FacebookAuthenticator`].
#[derive(Debug, Clone)]
pub struct FacebookConfig {
    /// The OAuth application id tokens must have been issued for.
    pub app_id: String,
    /// Base URI of the Graph API.
    pub graph_uri: String,
    /// Extra field names accepted on top of
    /// [`crate::DEFAULT_VALID_FIELDS`], for deployments targeting a Graph
    /// API version that serves more than the built-in set.
    pub extended_fields: Vec<String>,
    /// Bound applied to each of the two outbound calls. A timeout fails the
    /// attempt the same way any other provider failure does.
    pub timeout: Duration,
}

impl FacebookConfig {
    /// Config for the live Graph API with default timeout and field set.
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            graph_uri: DEFAULT_GRAPH_URI.to_string(),
            extended_fields: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Authenticates requests carrying Facebook OAuth access tokens.
///
/// Per request: detect the credential indicator (else `Skip`), require a
/// token (else unauthorized), consult the cache (hit short-circuits with no
/// network traffic), verify the token's issuing application, fetch and
/// decode the profile, cache it, succeed. At most two sequential Graph API
/// calls happen per cache miss, and the profile fetch never runs for a token
/// that failed the app-identity check.
///
/// The field list is negotiated once at construction; declared fields the
/// Graph API does not recognize are logged and dropped at that point.
pub struct FacebookAuthenticator<P: FacebookProfile> {
    config: FacebookConfig,
    client: reqwest::Client,
    cache: Arc<ProfileCache<P>>,
    fields: String,
}

impl<P: FacebookProfile> FacebookAuthenticator<P> {
    /// Build an authenticator over an integrator-owned cache.
    pub fn new(config: FacebookConfig, cache: Arc<ProfileCache<P>>) -> Self {
        let valid: Vec<&str> = fields::DEFAULT_VALID_FIELDS
            .iter()
            .copied()
            .chain(config.extended_fields.iter().map(String::as_str))
            .collect();
        let (negotiated, dropped) = fields::negotiate(P::FIELDS, &valid);

        for field in dropped {
            log::warn!(
                "Declared profile field '{field}' is not a recognized Graph API field \
                 and will not be requested"
            );
        }
        log::debug!("Negotiated Graph API field list: {negotiated}");

        Self {
            config,
            client: reqwest::Client::new(),
            cache,
            fields: negotiated,
        }
    }

    /// The comma-joined field list sent with every profile fetch.
    pub fn negotiated_fields(&self) -> &str {
        &self.fields
    }

    /// Run the state machine against one request's headers.
    pub async fn authenticate(&self, headers: &HeaderMap) -> AuthOutcome<Arc<P>> {
        match headers.get(TOKEN_TYPE_HEADER).and_then(|v| v.to_str().ok()) {
            Some(FACEBOOK_TOKEN_TYPE) => {}
            _ => return AuthOutcome::skip(),
        }

        let token = match headers
            .get(ACCESS_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            Some(t) if !t.is_empty() => t,
            _ => {
                log::info!("{}", AuthError::MissingCredential);
                return AuthOutcome::unauthorized();
            }
        };

        if let Some(profile) = self.cache.get(token) {
            log::debug!("Profile cache hit; no Graph API calls");
            return AuthOutcome::Success(profile);
        }

        if let Err(err) = verify::verify_app_identity(
            &self.client,
            &self.config.graph_uri,
            token,
            &self.config.app_id,
            self.config.timeout,
        )
        .await
        {
            self.log_failure(&err);
            return AuthOutcome::unauthorized();
        }

        match fetch::fetch_profile::<P>(
            &self.client,
            &self.config.graph_uri,
            token,
            &self.fields,
            self.config.timeout,
        )
        .await
        {
            Ok(profile) => AuthOutcome::Success(self.cache.insert(token, profile)),
            Err(err) => {
                self.log_failure(&err);
                AuthOutcome::unauthorized()
            }
        }
    }

    // Causes are kept apart in the logs (provider down vs. token misuse)
    // even though the caller sees one uniform unauthorized outcome.
    fn log_failure(&self, err: &AuthError) {
        if err.is_provider_failure() {
            log::warn!("Identity provider failure: {err}");
        } else {
            log::warn!("Token rejected: {err}");
        }
    }
}

impl<P: FacebookProfile> AuthScheme for FacebookAuthenticator<P> {
    type Profile = Arc<P>;

    fn authenticate(
        &self,
        headers: &HeaderMap,
    ) -> Pin<Box<dyn Future<Output = AuthOutcome<Arc<P>>> + Send + '_>> {
        let headers = headers.clone();
        Box::pin(async move { FacebookAuthenticator::authenticate(self, &headers).await })
    }
}
