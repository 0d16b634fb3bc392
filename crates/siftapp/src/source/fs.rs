use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use super::{decode_collection, decode_vocabulary, Source, VOCABULARY_KEY};
use crate::error::{Result, SiftError};
use crate::index::Vocabulary;
use crate::model::Domain;

/// Reads listing payloads from a directory.
///
/// ```text
/// <root>/
/// ├── posts.json
/// ├── campaigns.json
/// ├── polls.json
/// └── categories.json
/// ```
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collection_path(&self, domain: Domain) -> PathBuf {
        self.root.join(format!("{}.json", domain))
    }

    pub fn vocabulary_path(&self) -> PathBuf {
        self.root.join(format!("{}.json", VOCABULARY_KEY))
    }

    fn read(&self, what: &str, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "could not read payload");
            SiftError::fetch(what, format!("{}: {}", path.display(), e))
        })
    }
}

impl Source for DirSource {
    fn fetch_collection<T: DeserializeOwned>(&self, domain: Domain) -> Result<Vec<T>> {
        let path = self.collection_path(domain);
        let payload = self.read(domain.as_str(), &path)?;
        decode_collection(domain, &payload).inspect_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "could not parse collection");
        })
    }

    fn fetch_vocabulary(&self) -> Result<Vocabulary> {
        let path = self.vocabulary_path();
        let payload = self.read(VOCABULARY_KEY, &path)?;
        decode_vocabulary(&payload).inspect_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "could not parse vocabulary");
        })
    }
}
