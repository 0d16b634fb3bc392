//! # Sift Architecture
//!
//! Sift is a **UI-agnostic list discovery library**. Given a fetched collection of posts,
//! campaigns or polls, it derives what a listing page shows: which records pass the
//! user's category, toggle and search filters, in which order, on which page, and how
//! many records each category holds. The CLI in `crates/sift` is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (crates/sift)                                          │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Fetches inputs through a Source, applies configuration   │
//! │  - Returns a Browser, or a retryable Fetch error            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (browser.rs, pipeline.rs, attributes/, sort.rs,     │
//! │          index.rs)                                          │
//! │  - Pure, infallible, single-threaded                        │
//! │  - One recompute per user action                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Sources (source/)                                          │
//! │  - Abstract Source trait                                    │
//! │  - DirSource (JSON files), InMemorySource (testing)         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## One Engine, Three Domains
//!
//! Posts, campaigns and polls differ only in field names, toggle pairs, sort keys and page
//! size. Each record type implements [`attributes::Listable`]; each domain has a
//! [`attributes::DomainProfile`]. Everything downstream is generic.
//!
//! ## Key Principle: No Ambient State in the Engine
//!
//! The engine never reads the clock, the environment or the filesystem. "Now" is fixed
//! when a listing is mounted ([`model::ViewContext`]) so the same inputs always derive
//! the same view, order included.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for opening and refreshing listings
//! - [`browser`]: Filter-state controller driving one listing
//! - [`pipeline`]: The pure derivation (filter, sort, paginate, count)
//! - [`attributes`]: Record accessors, domain profiles, predicate chain
//! - [`sort`]: Sort keys and comparators
//! - [`index`]: Category counts, vocabulary, menu entries and labels
//! - [`model`]: Records (`Post`, `Campaign`, `Poll`) and lenient decoding
//! - [`source`]: Where collections and vocabularies come from
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod attributes;
pub mod browser;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod pipeline;
pub mod sort;
pub mod source;
