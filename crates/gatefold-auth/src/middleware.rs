//! Generic Tower authentication middleware.
//!
//! `AuthLayer` and `AuthService` wrap any inner service with one credential
//! scheme. Generic over `AuthScheme` — plug in any identity provider.
//!
//! Outcome handling: `Success` inserts the profile into request extensions
//! and forwards; `Failure` short-circuits with the outcome's status (401 by
//! default); `Skip` forwards the request untouched so that another scheme
//! stacked below may claim it.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::response::IntoResponse;
use http::{Request, StatusCode};
use tower::{Layer, Service};

use crate::{AuthOutcome, AuthScheme};

/// Tower `Layer` that wraps services with one authentication scheme.
#[derive(Clone)]
pub struct AuthLayer<A: AuthScheme> {
    scheme: Arc<A>,
}

impl<A: AuthScheme> AuthLayer<A> {
    /// Create a new auth layer running the given scheme.
    pub fn new(scheme: Arc<A>) -> Self {
        Self { scheme }
    }
}

impl<A: AuthScheme, S> Layer<S> for AuthLayer<A> {
    type Service = AuthService<A, S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            inner,
            scheme: self.scheme.clone(),
        }
    }
}

/// Tower `Service` that runs a scheme before forwarding requests.
///
/// On `Success`, the profile is available to downstream handlers via request
/// extensions (see [`crate::profile_from_parts`]).
#[derive(Clone)]
pub struct AuthService<A: AuthScheme, S> {
    inner: S,
    scheme: Arc<A>,
}

impl<A, S> Service<Request<Body>> for AuthService<A, S>
where
    A: AuthScheme,
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let scheme = self.scheme.clone();

        Box::pin(async move {
            match scheme.authenticate(req.headers()).await {
                AuthOutcome::Success(profile) => {
                    req.extensions_mut().insert(profile);
                    let resp = inner
                        .call(req)
                        .await
                        .unwrap_or_else(|infallible| match infallible {});
                    Ok(resp.into_response())
                }
                AuthOutcome::Skip { .. } => {
                    log::debug!("Scheme skipped request; forwarding unauthenticated");
                    let resp = inner
                        .call(req)
                        .await
                        .unwrap_or_else(|infallible| match infallible {});
                    Ok(resp.into_response())
                }
                AuthOutcome::Failure { status, details } => {
                    Ok(failure_response(status, details))
                }
            }
        })
    }
}

/// Build the terminal response for a `Failure` outcome.
///
/// The body never carries the failure cause — only the detail map the scheme
/// chose to expose, which by contract contains nothing token-specific.
fn failure_response(
    status: Option<StatusCode>,
    details: Option<std::collections::HashMap<String, String>>,
) -> axum::response::Response {
    let status = status.unwrap_or(StatusCode::UNAUTHORIZED);
    let body = serde_json::json!({
        "error": {
            "category": "authentication",
            "message": "unauthorized",
            "details": details.unwrap_or_default(),
        }
    });

    (
        status,
        [(http::header::CONTENT_TYPE, "application/json")],
        serde_json::to_string(&body).unwrap_or_default(),
    )
        .into_response()
}
