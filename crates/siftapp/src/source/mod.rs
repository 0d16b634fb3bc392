//! # Sources
//!
//! The engine never fetches anything itself. A [`Source`] delivers the two external
//! inputs of a listing: the raw collection for a domain and the category vocabulary.
//! Either fetch can fail; failures surface as [`SiftError::Fetch`], which callers treat
//! as retryable, and never reach the engine.
//!
//! ## Payload Shapes
//!
//! Collections arrive either wrapped in an envelope keyed by the domain name or as a
//! bare array:
//!
//! ```text
//! {"campaigns": [{...}, {...}]}      [{...}, {...}]
//! ```
//!
//! An envelope without the domain key decodes as an empty collection. Elements that are
//! not objects are skipped with a warning; fields inside an object are decoded leniently
//! (see [`crate::model`]).
//!
//! The vocabulary is `{"categories": ["a", "b"]}` or `["a", "b"]`. Non-string entries
//! are skipped.
//!
//! ## Implementations
//!
//! - [`fs::DirSource`]: reads JSON payloads from a directory.
//! - [`memory::InMemorySource`]: for testing without filesystem I/O.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, SiftError};
use crate::index::Vocabulary;
use crate::model::Domain;

pub mod fs;
pub mod memory;

pub const VOCABULARY_KEY: &str = "categories";

/// Abstract interface for fetching listing inputs.
pub trait Source {
    /// Fetch the raw collection for `domain`, in source order.
    fn fetch_collection<T: DeserializeOwned>(&self, domain: Domain) -> Result<Vec<T>>;

    /// Fetch the category vocabulary.
    fn fetch_vocabulary(&self) -> Result<Vocabulary>;
}

/// Decodes a collection payload for `domain`.
pub fn decode_collection<T: DeserializeOwned>(domain: Domain, payload: &str) -> Result<Vec<T>> {
    let value: Value =
        serde_json::from_str(payload).map_err(|e| SiftError::fetch(domain.as_str(), e))?;
    collection_from_value(domain, value)
}

/// Decodes an already parsed collection payload for `domain`.
pub fn collection_from_value<T: DeserializeOwned>(domain: Domain, value: Value) -> Result<Vec<T>> {
    let elements = match value {
        Value::Array(items) => items,
        Value::Object(mut envelope) => match envelope.remove(domain.as_str()) {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => {
                tracing::debug!(%domain, "envelope has no collection, treating as empty");
                Vec::new()
            }
            Some(other) => {
                return Err(SiftError::fetch(
                    domain.as_str(),
                    format!("expected a list under \"{}\", found {}", domain, kind(&other)),
                ))
            }
        },
        other => {
            return Err(SiftError::fetch(
                domain.as_str(),
                format!("expected a list or an envelope, found {}", kind(&other)),
            ))
        }
    };

    let total = elements.len();
    let items: Vec<T> = elements
        .into_iter()
        .enumerate()
        .filter_map(|(position, element)| match serde_json::from_value(element) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(%domain, position, error = %e, "skipping undecodable record");
                None
            }
        })
        .collect();

    tracing::debug!(%domain, total, decoded = items.len(), "decoded collection");
    Ok(items)
}

/// Decodes a vocabulary payload.
pub fn decode_vocabulary(payload: &str) -> Result<Vocabulary> {
    let value: Value =
        serde_json::from_str(payload).map_err(|e| SiftError::fetch(VOCABULARY_KEY, e))?;

    let names = match value {
        Value::Array(names) => names,
        Value::Object(mut envelope) => match envelope.remove(VOCABULARY_KEY) {
            Some(Value::Array(names)) => names,
            _ => Vec::new(),
        },
        other => {
            return Err(SiftError::fetch(
                VOCABULARY_KEY,
                format!("expected a list or an envelope, found {}", kind(&other)),
            ))
        }
    };

    Ok(names
        .into_iter()
        .filter_map(|name| match name {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Campaign, ItemId, Post};

    #[test]
    fn test_bare_array() {
        let posts: Vec<Post> =
            decode_collection(Domain::Posts, r#"[{"id": 1, "title": "a"}, {"id": "2"}]"#).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, ItemId::from("1"));
        assert_eq!(posts[1].id, ItemId::from("2"));
    }

    #[test]
    fn test_envelope() {
        let campaigns: Vec<Campaign> = decode_collection(
            Domain::Campaigns,
            r#"{"campaigns": [{"id": 7, "signature_count": "12"}], "page": 1}"#,
        )
        .unwrap();
        assert_eq!(campaigns.len(), 1);
        assert_eq!(campaigns[0].signature_count, Some(12));
    }

    #[test]
    fn test_envelope_without_key_is_empty() {
        let polls: Vec<Post> = decode_collection(Domain::Polls, r#"{"detail": "ok"}"#).unwrap();
        assert!(polls.is_empty());
    }

    #[test]
    fn test_non_object_elements_are_skipped() {
        let posts: Vec<Post> =
            decode_collection(Domain::Posts, r#"[{"id": 1}, 42, "junk", {"id": 2}]"#).unwrap();
        assert_eq!(posts.len(), 2);
    }

    #[test]
    fn test_post_with_created_at_and_date_is_kept() {
        let posts: Vec<Post> = collection_from_value(
            Domain::Posts,
            serde_json::json!({"posts": [
                {"id": 1, "title": "x", "created_at": "2024-01-01", "date": "2024-01-01"}
            ]}),
        )
        .unwrap();
        assert_eq!(posts.len(), 1);
        assert!(posts[0].created_at.is_some());
    }

    #[test]
    fn test_malformed_payload_is_fetch_error() {
        let err = decode_collection::<Post>(Domain::Posts, "{not json").unwrap_err();
        assert!(err.is_retryable());

        let err = decode_collection::<Post>(Domain::Posts, r#""hello""#).unwrap_err();
        assert!(matches!(err, SiftError::Fetch { .. }));

        let err = decode_collection::<Post>(Domain::Posts, r#"{"posts": 3}"#).unwrap_err();
        assert!(err.to_string().contains("found a number"));
    }

    #[test]
    fn test_vocabulary_shapes() {
        let v = decode_vocabulary(r#"{"categories": ["food", "housing", 3, "food"]}"#).unwrap();
        assert_eq!(v.iter().collect::<Vec<_>>(), vec!["food", "housing"]);

        let v = decode_vocabulary(r#"["a", "b"]"#).unwrap();
        assert_eq!(v.len(), 2);

        let v = decode_vocabulary(r#"{}"#).unwrap();
        assert!(v.is_empty());

        assert!(decode_vocabulary("true").is_err());
    }
}
