//! Consumer-defined profile schemas and the stock profile type.

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// A consumer-defined Facebook profile schema.
///
/// `FIELDS` is the explicit, static list of Graph API attribute names this
/// consumer wants requested and decoded. `id` and `name` are mandatory and
/// must appear in `FIELDS`; everything else is optional and per-deployment.
/// Names not recognized by the Graph API are dropped at negotiation time
/// (with a warning) rather than sent.
///
/// A profile is only ever constructed by a successful decode of a Graph API
/// response and is immutable afterwards; the cache hands out `Arc` views.
///
/// Note that `id` is scoped to the OAuth application the token was issued
/// for: two applications may see different ids, or coincidentally colliding
/// ones, for the same person. The app-identity check in the authenticator
/// exists precisely so cached profiles are never keyed across that boundary.
pub trait FacebookProfile: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Attribute names to request from the Graph API, in request order.
    const FIELDS: &'static [&'static str];

    /// The provider-scoped unique subject identifier.
    fn id(&self) -> &str;

    /// The subject's display name.
    fn name(&self) -> &str;
}

/// A ready-made schema covering the commonly wanted attributes.
///
/// Deployments wanting more (location, friends, photos, ...) declare their
/// own type implementing [`FacebookProfile`] instead.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BaseProfile {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub picture: Option<Picture>,
}

impl FacebookProfile for BaseProfile {
    const FIELDS: &'static [&'static str] = &["id", "name", "email", "picture"];

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Profile picture metadata as the Graph API nests it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Picture {
    pub data: PictureData,
}

/// The inner picture record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PictureData {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub is_silhouette: Option<bool>,
}
