//! Generic authentication primitives for Gatefold.
//!
//! Provides:
//! - [`AuthOutcome`] — The three-way result a scheme delivers to the router
//! - [`AuthScheme`] — Trait for async credential schemes (implement per provider)
//! - [`AuthLayer`] / [`AuthService`] — Tower middleware parameterised over `AuthScheme`
//! - [`AuthError`] — Auth-specific error types
//!
//! A scheme inspects the request headers and resolves to `Success` with a
//! typed profile, `Failure` (by convention unauthorized), or `Skip` when the
//! credential on the request belongs to a different scheme entirely.

mod error;
mod extract;
mod middleware;
mod outcome;
mod scheme;

pub use error::AuthError;
pub use extract::profile_from_parts;
pub use middleware::{AuthLayer, AuthService};
pub use outcome::AuthOutcome;
pub use scheme::AuthScheme;
