//! JSON to model converters.
//!
//! This module turns raw Discogs API JSON into typed models. Every field the
//! service may omit maps to an `Option` or an empty default, so a sparse
//! response never fails to convert as long as the object carries an `id`.

use serde_json::Value;

use crate::error::{DiscogsError, Result};
use crate::models::{ArtistAttributes, Credit, Release, ReleaseKind, ReleaseRef, Track};

/// Get string from JSON, returning empty string if not found.
fn get_str(json: &Value, key: &str) -> String {
    json.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

/// Get optional string from JSON. `null` counts as absent.
fn get_opt_str(json: &Value, key: &str) -> Option<String> {
    json.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
}

/// Get numeric ID from JSON (handles both numeric and string IDs).
fn get_id(json: &Value, key: &str) -> Option<u64> {
    json.get(key).and_then(|v| {
        if let Some(n) = v.as_u64() {
            Some(n)
        } else if let Some(s) = v.as_str() {
            s.trim().parse().ok()
        } else {
            None
        }
    })
}

/// Get year from JSON. Discogs sends numbers, occasionally strings.
fn get_year(json: &Value, key: &str) -> Option<i32> {
    json.get(key).and_then(|v| {
        if let Some(n) = v.as_i64() {
            i32::try_from(n).ok()
        } else if let Some(s) = v.as_str() {
            s.trim().parse().ok()
        } else {
            None
        }
    })
}

/// Get an array under `key`; `None` when absent or not an array.
fn get_array<'a>(json: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    json.get(key).and_then(|v| v.as_array())
}

/// Parse a credit list, dropping entries without an artist identity.
fn parse_credits(json: &Value, key: &str) -> Option<Vec<Credit>> {
    get_array(json, key).map(|arr| arr.iter().filter_map(parse_credit).collect())
}

/// Parse one artist credit.
///
/// Returns `None` when the entry has no usable ID; Discogs uses ID 0 for
/// free-text credits that are not linked to an artist page.
pub fn parse_credit(json: &Value) -> Option<Credit> {
    let id = get_id(json, "id").filter(|id| *id != 0)?;
    Some(Credit {
        id,
        name: get_str(json, "name"),
        role: get_opt_str(json, "role"),
    })
}

/// Parse one tracklist entry.
pub fn parse_track(json: &Value) -> Track {
    Track {
        position: get_str(json, "position"),
        title: get_str(json, "title"),
        duration: get_opt_str(json, "duration").filter(|d| !d.is_empty()),
        extra_artists: parse_credits(json, "extraartists"),
    }
}

/// Parse a full release.
pub fn parse_release(json: &Value) -> Result<Release> {
    let id = get_id(json, "id")
        .ok_or_else(|| DiscogsError::NoDataApi("release has no id".to_string()))?;

    Ok(Release {
        id,
        title: get_str(json, "title"),
        year: get_year(json, "year"),
        artists: parse_credits(json, "artists"),
        extra_artists: parse_credits(json, "extraartists"),
        tracklist: get_array(json, "tracklist").map(|arr| arr.iter().map(parse_track).collect()),
    })
}

/// Parse an entry of an artist's release list.
pub fn parse_release_ref(json: &Value) -> Option<ReleaseRef> {
    let id = get_id(json, "id")?;
    Some(ReleaseRef {
        id,
        title: get_str(json, "title"),
        year: get_year(json, "year"),
        kind: ReleaseKind::parse(&get_str(json, "type")),
        main_release: get_id(json, "main_release"),
        role: get_opt_str(json, "role"),
    })
}

/// Parse one page of `artists/{id}/releases`.
///
/// Returns the releases on the page and the URL of the next page, if any.
pub fn parse_release_page(json: &Value) -> (Vec<ReleaseRef>, Option<String>) {
    let releases = get_array(json, "releases")
        .map(|arr| arr.iter().filter_map(parse_release_ref).collect())
        .unwrap_or_default();

    let next = json
        .get("pagination")
        .and_then(|p| p.get("urls"))
        .and_then(|u| u.get("next"))
        .and_then(|n| n.as_str())
        .map(|s| s.to_string());

    (releases, next)
}

/// Parse an artist without its release list.
pub fn parse_artist(json: &Value) -> Result<ArtistAttributes> {
    let id = get_id(json, "id")
        .ok_or_else(|| DiscogsError::NoDataApi("artist has no id".to_string()))?;

    Ok(ArtistAttributes {
        id,
        name: get_str(json, "name"),
        real_name: get_opt_str(json, "realname"),
        profile: get_opt_str(json, "profile"),
        releases: Vec::new(),
    })
}
