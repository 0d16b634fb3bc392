//! # Listing Attributes
//!
//! The three content domains carry near-identical listing logic with small differences
//! in field names and toggle pairs. Instead of one pipeline per domain, each record type
//! implements [`Listable`], a set of field accessors the engine reads, and each domain
//! registers a [`DomainProfile`] describing its toggles, sort keys and page size.
//!
//! - **Accessors**: category, searchable text, timestamps, counts, boolean flags
//! - **Profiles**: the per-domain table (see [`spec`])
//! - **Filtering**: the predicate chain built from a [`FilterState`] (see [`filter`])
//!
//! ## Boolean Flags
//!
//! | Flag | Campaigns | Polls | Posts |
//! |------|-----------|-------|-------|
//! | `Signed` | `has_signed` | - | - |
//! | `Voted` | - | `has_voted` | - |
//! | `Closed` | deadline passed | deadline passed | - |
//!
//! A flag a record does not carry reads as `false`.

mod filter;
mod spec;

pub use filter::{include, CategoryClause, FilterState, PredicateChain};
pub use spec::{profile, DomainProfile, TogglePair, PROFILES};

use crate::model::{Domain, ItemId, ViewContext};
use chrono::{DateTime, Utc};

/// A boolean property a toggle pair filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Signed,
    Voted,
    /// Derived: a deadline exists and is earlier than the context clock.
    Closed,
}

/// Field accessors the discovery engine needs from a record.
///
/// Everything else on the record is passed through untouched.
pub trait Listable {
    const DOMAIN: Domain;

    fn id(&self) -> &ItemId;

    fn title(&self) -> &str;

    /// The record's category tag; `None` for missing or empty tags.
    fn category(&self) -> Option<&str>;

    /// Fields the free-text clause matches against.
    fn search_fields(&self) -> Vec<&str>;

    fn created_at(&self) -> Option<DateTime<Utc>>;

    fn deadline(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn signature_count(&self) -> Option<u64> {
        None
    }

    fn total_votes(&self) -> Option<u64> {
        None
    }

    fn flag(&self, flag: Flag, ctx: &ViewContext) -> bool;
}
