//! Facebook OAuth2 token authentication for Gatefold.
//!
//! Implements [`gatefold_auth::AuthScheme`] for Facebook:
//! - Header-based credential detection (`X-token-type: FacebookToken`)
//! - App-identity verification before any profile data is trusted
//! - Field negotiation against the Graph API's known-valid field names
//! - Profile decoding into a consumer-defined schema type
//! - Per-consumer-type token cache, at most one Graph round-trip per
//!   already-seen token
//!
//! Consumers declare a profile type implementing [`FacebookProfile`] (or use
//! the stock [`BaseProfile`]), construct a [`ProfileCache`] they own, and
//! hand both to [`FacebookAuthenticator`].

mod authenticator;
mod cache;
mod fetch;
mod fields;
mod profile;
mod verify;

pub use authenticator::{
    FacebookAuthenticator, FacebookConfig, ACCESS_TOKEN_HEADER, DEFAULT_GRAPH_URI,
    FACEBOOK_TOKEN_TYPE, TOKEN_TYPE_HEADER,
};
pub use cache::ProfileCache;
pub use fields::{negotiate, DEFAULT_VALID_FIELDS};
pub use profile::{BaseProfile, FacebookProfile, Picture, PictureData};
