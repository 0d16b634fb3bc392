//! # API Facade
//!
//! The API layer is a **thin facade** between a [`Source`] and the engine. It is the
//! single entry point UIs use to open and refresh a listing.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Fetches** the collection and vocabulary for a domain
//! - **Applies configuration** (page sizes, missing-deadline policy) to the domain profile
//! - **Hands back** a ready [`Browser`] the UI drives through its entry points
//!
//! ## What the API Does NOT Do
//!
//! - **Listing logic**: that belongs in the engine (`attributes`, `sort`, `pipeline`, `browser`)
//! - **Presentation**: no stdout, stderr or formatting
//!
//! ## Failure Handling
//!
//! A fetch failure is returned as [`SiftError::Fetch`](crate::error::SiftError::Fetch).
//! [`SiftApi::refresh`] fetches both inputs before touching the browser, so a failed
//! refresh leaves the previous listing exactly as it was.
//!
//! ## Generic Over Source
//!
//! `SiftApi<S: Source>` is generic over where payloads come from:
//! - Production: `SiftApi<DirSource>`
//! - Testing: `SiftApi<InMemorySource>`

use serde::de::DeserializeOwned;

use crate::attributes::{DomainProfile, Listable};
use crate::browser::Browser;
use crate::config::SiftConfig;
use crate::error::Result;
use crate::index::Vocabulary;
use crate::model::{Domain, ViewContext};
use crate::source::Source;

pub struct SiftApi<S: Source> {
    source: S,
    config: SiftConfig,
}

impl<S: Source> SiftApi<S> {
    pub fn new(source: S, config: SiftConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &SiftConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn profile(&self, domain: Domain) -> DomainProfile {
        self.config.profile(domain)
    }

    /// Fetches both inputs for `T`'s domain and returns a browser mounted at `ctx`.
    pub fn open<T>(&self, ctx: ViewContext) -> Result<Browser<T>>
    where
        T: Listable + DeserializeOwned,
    {
        let mut browser = Browser::new(self.profile(T::DOMAIN), ctx);
        self.refresh(&mut browser)?;
        Ok(browser)
    }

    /// Refetches the collection and vocabulary and swaps them into `browser`.
    ///
    /// Nothing is swapped unless both fetches succeed.
    pub fn refresh<T>(&self, browser: &mut Browser<T>) -> Result<()>
    where
        T: Listable + DeserializeOwned,
    {
        let (collection, vocabulary) = self.fetch::<T>()?;
        tracing::info!(
            domain = %T::DOMAIN,
            records = collection.len(),
            categories = vocabulary.len(),
            "fetched listing inputs"
        );
        browser.replace_collection(collection);
        browser.replace_vocabulary(vocabulary);
        Ok(())
    }

    fn fetch<T>(&self) -> Result<(Vec<T>, Vocabulary)>
    where
        T: Listable + DeserializeOwned,
    {
        let collection = self.source.fetch_collection::<T>(T::DOMAIN)?;
        let vocabulary = self.source.fetch_vocabulary()?;
        Ok((collection, vocabulary))
    }
}
