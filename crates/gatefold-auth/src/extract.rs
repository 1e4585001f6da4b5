//! Helpers for reading the authenticated profile back out in handlers.

/// Extract the authenticated profile from HTTP request `Parts`, if present.
///
/// `P` must be the same type the scheme's middleware inserted; a request the
/// scheme skipped carries no profile.
pub fn profile_from_parts<P>(parts: &http::request::Parts) -> Option<&P>
where
    P: Clone + Send + Sync + 'static,
{
    parts.extensions.get::<P>()
}
