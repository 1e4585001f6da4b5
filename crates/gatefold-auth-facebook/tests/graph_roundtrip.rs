//! End-to-end tests against an in-process stand-in for the Graph API.

use std::convert::Infallible;
use std::future::IntoFuture;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tower::{Layer, ServiceExt};

use gatefold_auth::{AuthLayer, AuthOutcome};
use gatefold_auth_facebook::{
    FacebookAuthenticator, FacebookConfig, FacebookProfile, ProfileCache, ACCESS_TOKEN_HEADER,
    FACEBOOK_TOKEN_TYPE, TOKEN_TYPE_HEADER,
};

const APP_ID: &str = "167559023134334";

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct MiniProfile {
    id: String,
    name: String,
}

impl FacebookProfile for MiniProfile {
    const FIELDS: &'static [&'static str] = &["id", "name"];

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn query_param(uri: &Uri, name: &str) -> Option<String> {
    uri.query()?.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

struct GraphStub {
    uri: String,
    me_hits: Arc<AtomicUsize>,
    last_fields: Arc<Mutex<Option<String>>>,
}

/// Serve `/app` and `/me` on an ephemeral local port. `/app` rejects the
/// token "badtoken" and otherwise reports `app_identity_id` as the issuing
/// application; `/me` counts hits and records the requested field list.
async fn spawn_graph_stub(app_identity_id: &'static str) -> GraphStub {
    let me_hits = Arc::new(AtomicUsize::new(0));
    let last_fields = Arc::new(Mutex::new(None));

    let hits = me_hits.clone();
    let fields_seen = last_fields.clone();

    let app = Router::new()
        .route(
            "/app",
            get(move |uri: Uri| async move {
                match query_param(&uri, "access_token").as_deref() {
                    Some("badtoken") | None => (
                        StatusCode::BAD_REQUEST,
                        Json(serde_json::json!({
                            "error": { "message": "Invalid OAuth access token." }
                        })),
                    ),
                    Some(_) => (
                        StatusCode::OK,
                        Json(serde_json::json!({
                            "id": app_identity_id,
                            "name": "Test App"
                        })),
                    ),
                }
            }),
        )
        .route(
            "/me",
            get(move |uri: Uri| {
                let hits = hits.clone();
                let fields_seen = fields_seen.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    *fields_seen.lock().unwrap() = query_param(&uri, "fields");
                    Json(serde_json::json!({ "id": "123", "name": "test" }))
                }
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(axum::serve(listener, app).into_future());

    GraphStub {
        uri: format!("http://{addr}"),
        me_hits,
        last_fields,
    }
}

fn authenticator_against(
    stub: &GraphStub,
    cache: Arc<ProfileCache<MiniProfile>>,
) -> FacebookAuthenticator<MiniProfile> {
    let mut config = FacebookConfig::new(APP_ID);
    config.graph_uri = stub.uri.clone();
    FacebookAuthenticator::new(config, cache)
}

fn facebook_headers(token: &str) -> http::HeaderMap {
    let mut headers = http::HeaderMap::new();
    headers.insert(TOKEN_TYPE_HEADER, FACEBOOK_TOKEN_TYPE.parse().unwrap());
    headers.insert(ACCESS_TOKEN_HEADER, token.parse().unwrap());
    headers
}

#[tokio::test]
async fn round_trip_then_cache_hit() {
    let stub = spawn_graph_stub(APP_ID).await;
    let cache = Arc::new(ProfileCache::new());
    let auth = authenticator_against(&stub, cache.clone());

    let outcome = auth.authenticate(&facebook_headers("goodtoken")).await;
    let profile = outcome.into_profile().expect("expected Success");
    assert_eq!(profile.id, "123");
    assert_eq!(profile.name, "test");
    assert_eq!(stub.me_hits.load(Ordering::SeqCst), 1);
    assert_eq!(
        stub.last_fields.lock().unwrap().as_deref(),
        Some("id,name")
    );

    // The profile is now cached under the original token; a second attempt
    // succeeds without touching the provider again.
    assert!(cache.get("goodtoken").is_some());
    let again = auth.authenticate(&facebook_headers("goodtoken")).await;
    let cached = again.into_profile().expect("expected cache hit");
    assert_eq!(*cached, *profile);
    assert_eq!(stub.me_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn bad_token_is_unauthorized_and_nothing_is_cached() {
    let stub = spawn_graph_stub(APP_ID).await;
    let cache = Arc::new(ProfileCache::new());
    let auth = authenticator_against(&stub, cache.clone());

    let outcome = auth.authenticate(&facebook_headers("badtoken")).await;
    match outcome {
        AuthOutcome::Failure { status, .. } => {
            assert_eq!(status, Some(StatusCode::UNAUTHORIZED));
        }
        _ => panic!("expected Failure"),
    }

    assert!(cache.get("badtoken").is_none());
    assert!(cache.is_empty());
    // Verification failed, so the profile endpoint was never consulted.
    assert_eq!(stub.me_hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn identity_mismatch_blocks_profile_fetch() {
    // The stub claims the token was issued for a different application.
    let stub = spawn_graph_stub("999999999999999").await;
    let cache = Arc::new(ProfileCache::new());
    let auth = authenticator_against(&stub, cache.clone());

    let outcome = auth.authenticate(&facebook_headers("goodtoken")).await;
    assert!(!outcome.is_success());
    assert!(!outcome.is_skip());
    assert!(cache.is_empty());
    assert_eq!(stub.me_hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn middleware_injects_profile_into_handler() {
    let stub = spawn_graph_stub(APP_ID).await;
    let auth = authenticator_against(&stub, Arc::new(ProfileCache::new()));

    let inner = tower::service_fn(|req: Request<Body>| async move {
        let name = req
            .extensions()
            .get::<Arc<MiniProfile>>()
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "anonymous".to_string());
        Ok::<_, Infallible>((StatusCode::OK, name).into_response())
    });
    let service = AuthLayer::new(Arc::new(auth)).layer(inner);

    let req = Request::builder()
        .header(TOKEN_TYPE_HEADER, FACEBOOK_TOKEN_TYPE)
        .header(ACCESS_TOKEN_HEADER, "goodtoken")
        .body(Body::empty())
        .unwrap();
    let resp = service.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"test");
}
