//! The scheme trait — the seam between credential providers and the router.

use std::future::Future;
use std::pin::Pin;

use http::HeaderMap;

use crate::AuthOutcome;

/// Trait for authenticating a request against one credential scheme.
///
/// Implement this per identity provider (Facebook, Google, etc.). The
/// middleware calls `authenticate()` with the request headers; the scheme
/// inspects its credential-type indicator and resolves to one of the three
/// [`AuthOutcome`] variants. A scheme that returns `Skip` must do so without
/// any network traffic.
pub trait AuthScheme: Send + Sync + 'static {
    /// The profile type a successful authentication yields. Cloned into
    /// request extensions by the middleware, so it should be cheap to clone
    /// (an `Arc` wrapper is typical).
    type Profile: Clone + Send + Sync + 'static;

    /// Run the scheme against the request headers.
    fn authenticate(
        &self,
        headers: &HeaderMap,
    ) -> Pin<Box<dyn Future<Output = AuthOutcome<Self::Profile>> + Send + '_>>;
}
