use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use super::{collection_from_value, Source, VOCABULARY_KEY};
use crate::error::{Result, SiftError};
use crate::index::Vocabulary;
use crate::model::Domain;

/// Source backed by in-memory payloads, with switchable failures.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    collections: BTreeMap<Domain, Value>,
    vocabulary: Vocabulary,
    fail_collections: bool,
    fail_vocabulary: bool,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `items` as the collection for `domain`.
    pub fn set_collection<T: Serialize>(&mut self, domain: Domain, items: &[T]) -> Result<()> {
        let value = serde_json::to_value(items)?;
        self.collections.insert(domain, value);
        Ok(())
    }

    /// Stores a raw payload (bare array or envelope) for `domain`.
    pub fn set_payload(&mut self, domain: Domain, payload: Value) {
        self.collections.insert(domain, payload);
    }

    pub fn set_vocabulary(&mut self, vocabulary: Vocabulary) {
        self.vocabulary = vocabulary;
    }

    /// Makes subsequent collection fetches fail (or succeed again).
    pub fn fail_collections(&mut self, fail: bool) {
        self.fail_collections = fail;
    }

    /// Makes subsequent vocabulary fetches fail (or succeed again).
    pub fn fail_vocabulary(&mut self, fail: bool) {
        self.fail_vocabulary = fail;
    }
}

impl Source for InMemorySource {
    fn fetch_collection<T: DeserializeOwned>(&self, domain: Domain) -> Result<Vec<T>> {
        if self.fail_collections {
            return Err(SiftError::fetch(domain.as_str(), "source unavailable"));
        }
        match self.collections.get(&domain) {
            Some(value) => collection_from_value(domain, value.clone()),
            None => Ok(Vec::new()),
        }
    }

    fn fetch_vocabulary(&self) -> Result<Vocabulary> {
        if self.fail_vocabulary {
            return Err(SiftError::fetch(VOCABULARY_KEY, "source unavailable"));
        }
        Ok(self.vocabulary.clone())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{parse_timestamp, Campaign, ItemId, Poll, Post};

    pub fn post(id: &str, category: &str, created_at: Option<&str>) -> Post {
        Post {
            id: ItemId::from(id),
            title: format!("Post {}", id),
            excerpt: format!("Excerpt for post {}", id),
            category: Some(category.to_string()),
            created_at: created_at.and_then(parse_timestamp),
            ..Default::default()
        }
    }

    pub fn campaign(id: &str, category: &str, signature_count: Option<u64>) -> Campaign {
        Campaign {
            id: ItemId::from(id),
            title: format!("Campaign {}", id),
            excerpt: format!("Excerpt for campaign {}", id),
            category: Some(category.to_string()),
            signature_count,
            ..Default::default()
        }
    }

    pub fn poll(id: &str, category: &str, deadline: Option<&str>) -> Poll {
        Poll {
            id: ItemId::from(id),
            title: format!("Poll {}", id),
            description: format!("Description for poll {}", id),
            category: Some(category.to_string()),
            deadline: deadline.and_then(parse_timestamp),
            ..Default::default()
        }
    }

    pub struct SourceFixture {
        pub source: InMemorySource,
    }

    impl Default for SourceFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl SourceFixture {
        pub fn new() -> Self {
            Self {
                source: InMemorySource::new(),
            }
        }

        /// `count` posts, ids `0..count`, all in `category`, no timestamps.
        pub fn with_posts(mut self, count: usize, category: &str) -> Self {
            let posts: Vec<Post> = (0..count)
                .map(|i| post(&i.to_string(), category, None))
                .collect();
            self.source.set_collection(Domain::Posts, &posts).unwrap();
            self
        }

        pub fn with_records<T: Serialize>(mut self, domain: Domain, items: &[T]) -> Self {
            self.source.set_collection(domain, items).unwrap();
            self
        }

        pub fn with_vocabulary(mut self, names: &[&str]) -> Self {
            self.source
                .set_vocabulary(Vocabulary::new(names.iter().copied()));
            self
        }
    }
}
