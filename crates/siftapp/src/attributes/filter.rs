//! Predicate chain.
//!
//! A [`FilterState`] is compiled once per recompute into a [`PredicateChain`], which is
//! then applied to every record. Clauses run in order and short-circuit:
//!
//! 1. **Category**: nothing selected excludes everything; a selection covering the whole
//!    vocabulary is skipped (so uncategorized records stay visible); otherwise the
//!    record's category must be selected.
//! 2. **Toggles**: per pair, both on is a no-op, both off excludes everything, exactly one
//!    on keeps records whose flag matches it.
//! 3. **Search**: trimmed, case-insensitive substring over the record's search fields.

use std::collections::{BTreeMap, BTreeSet};

use super::{DomainProfile, Flag, Listable};
use crate::index::Vocabulary;
use crate::model::ViewContext;
use crate::sort::SortKey;

/// The user's current selections for one listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub selected_categories: BTreeSet<String>,
    /// Toggle name to enabled. Names a profile declares but this map lacks read as enabled.
    pub toggles: BTreeMap<&'static str, bool>,
    pub search_text: String,
    pub sort_key: SortKey,
}

impl FilterState {
    /// Initial state: nothing selected, every toggle on, no search, default sort.
    pub fn new(profile: &DomainProfile) -> Self {
        Self {
            selected_categories: BTreeSet::new(),
            toggles: profile.toggle_names().map(|name| (name, true)).collect(),
            search_text: String::new(),
            sort_key: profile.default_sort,
        }
    }

    pub fn is_enabled(&self, toggle: &str) -> bool {
        self.toggles.get(toggle).copied().unwrap_or(true)
    }
}

/// How the category clause behaves for the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryClause<'a> {
    /// Nothing selected: no record passes.
    Nothing,
    /// Whole vocabulary selected: clause skipped.
    Everything,
    /// Record's category must be one of these.
    Members(&'a BTreeSet<String>),
}

impl<'a> CategoryClause<'a> {
    pub fn new(selected: &'a BTreeSet<String>, vocabulary: &Vocabulary) -> Self {
        if selected.is_empty() {
            CategoryClause::Nothing
        } else if vocabulary.is_covered_by(selected) {
            CategoryClause::Everything
        } else {
            CategoryClause::Members(selected)
        }
    }

    fn matches(&self, category: Option<&str>) -> bool {
        match self {
            CategoryClause::Nothing => false,
            CategoryClause::Everything => true,
            CategoryClause::Members(selected) => category.is_some_and(|c| selected.contains(c)),
        }
    }
}

/// A restrictive toggle pair: only records whose flag equals `keep` pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ToggleClause {
    flag: Flag,
    keep: bool,
}

/// The compiled inclusion test for one recompute.
#[derive(Debug, Clone)]
pub struct PredicateChain<'a> {
    category: CategoryClause<'a>,
    toggles: Vec<ToggleClause>,
    /// Set when some pair has both members off.
    blocked: bool,
    needle: Option<String>,
    ctx: ViewContext,
}

impl<'a> PredicateChain<'a> {
    pub fn compile(
        filter: &'a FilterState,
        vocabulary: &Vocabulary,
        profile: &DomainProfile,
        ctx: ViewContext,
    ) -> Self {
        let mut toggles = Vec::new();
        let mut blocked = false;
        for pair in profile.toggles {
            match (filter.is_enabled(pair.on), filter.is_enabled(pair.off)) {
                (true, true) => {}
                (false, false) => blocked = true,
                (on, _) => toggles.push(ToggleClause {
                    flag: pair.flag,
                    keep: on,
                }),
            }
        }

        let needle = Some(filter.search_text.trim().to_lowercase()).filter(|s| !s.is_empty());

        Self {
            category: CategoryClause::new(&filter.selected_categories, vocabulary),
            toggles,
            blocked,
            needle,
            ctx,
        }
    }

    /// True when no record can pass, whatever the collection holds.
    pub fn excludes_everything(&self) -> bool {
        self.blocked || self.category == CategoryClause::Nothing
    }

    pub fn matches<T: Listable>(&self, item: &T) -> bool {
        if self.blocked || !self.category.matches(item.category()) {
            return false;
        }

        if !self
            .toggles
            .iter()
            .all(|t| item.flag(t.flag, &self.ctx) == t.keep)
        {
            return false;
        }

        match &self.needle {
            None => true,
            Some(needle) => item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle.as_str())),
        }
    }
}

/// One-shot inclusion test. Prefer compiling a [`PredicateChain`] when testing many records.
pub fn include<T: Listable>(
    item: &T,
    filter: &FilterState,
    vocabulary: &Vocabulary,
    profile: &DomainProfile,
    ctx: ViewContext,
) -> bool {
    PredicateChain::compile(filter, vocabulary, profile, ctx).matches(item)
}
