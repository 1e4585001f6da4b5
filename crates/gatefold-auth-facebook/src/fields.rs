//! Field negotiation against the Graph API's known-valid field names.
//!
//! The Graph API rejects requests naming fields it does not recognize, so a
//! declared schema is never sent unfiltered; the negotiated list is the
//! declaration-order intersection of the schema's fields and the valid set.

/// Field names the Graph API's `/me` endpoint recognizes and will serve.
///
/// Static and versioned by the Graph API itself; deployments may extend it
/// via [`crate::FacebookConfig::extended_fields`] when targeting a newer API
/// version.
pub const DEFAULT_VALID_FIELDS: &[&str] = &[
    "id",
    "name",
    "first_name",
    "last_name",
    "middle_name",
    "name_format",
    "short_name",
    "email",
    "age_range",
    "birthday",
    "friends",
    "gender",
    "hometown",
    "likes",
    "link",
    "location",
    "photos",
    "picture",
    "posts",
    "profile_pic",
    "taggable_friends",
];

/// Intersect a schema's declared fields with the valid set.
///
/// Returns the comma-joined field list to request, plus the declared names
/// that were dropped for not appearing in the valid set. Declaration order
/// is preserved and duplicates are requested once, so the result is stable
/// across calls for the same inputs.
pub fn negotiate<'a>(declared: &[&'a str], valid: &[&str]) -> (String, Vec<&'a str>) {
    let mut requested: Vec<&str> = Vec::with_capacity(declared.len());
    let mut dropped = Vec::new();

    for &field in declared {
        if requested.contains(&field) {
            continue;
        }
        if valid.contains(&field) {
            requested.push(field);
        } else {
            dropped.push(field);
        }
    }

    (requested.join(","), dropped)
}
