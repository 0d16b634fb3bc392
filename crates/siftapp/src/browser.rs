//! # Filter-State Controller
//!
//! [`Browser`] owns one listing: the raw collection, the category vocabulary, the user's
//! selections, and the last derivation. Every entry point mutates state and then
//! recomputes synchronously, exactly once, before returning. There is never more than
//! one recompute in flight and no intermediate state is observable.
//!
//! ## Rules
//!
//! - **Seeding**: the category selection starts empty. The first time the vocabulary
//!   becomes non-empty, and only if the user has not picked categories by hand, every
//!   vocabulary name is selected. This happens once; later vocabulary swaps leave the
//!   selection alone.
//! - **Page reset**: changing the category selection, a toggle, or the search text sends
//!   the listing back to page 1. Changing the sort key or the page does not.
//! - **Clamping**: requested pages outside `[1, total_pages]` are clamped, never rejected.
//! - **Clear**: search emptied, whole vocabulary selected, every toggle on, default sort.
//!   The page falls back to 1 through the page reset rule.
//!
//! Collection and vocabulary swaps are atomic: the previous value is replaced wholesale.

use std::collections::BTreeSet;

use crate::attributes::{DomainProfile, FilterState, Listable};
use crate::index::{menu_entries, summary_label, CategoryEntry, Vocabulary};
use crate::model::ViewContext;
use crate::pipeline::{Derivation, DerivedView, PageState};
use crate::sort::SortKey;

pub struct Browser<T: Listable> {
    profile: DomainProfile,
    ctx: ViewContext,
    collection: Vec<T>,
    vocabulary: Vocabulary,
    filter: FilterState,
    page: usize,
    seeded: bool,
    manual_selection: bool,
    derivation: Derivation,
}

impl<T: Listable> Browser<T> {
    pub fn new(profile: DomainProfile, ctx: ViewContext) -> Self {
        let filter = FilterState::new(&profile);
        let mut browser = Self {
            profile,
            ctx,
            collection: Vec::new(),
            vocabulary: Vocabulary::default(),
            filter,
            page: 1,
            seeded: false,
            manual_selection: false,
            derivation: Derivation::default(),
        };
        browser.recompute(false);
        browser
    }

    // --- Inputs ---

    /// Swaps in a freshly fetched collection. The page is kept and clamped.
    pub fn replace_collection(&mut self, collection: Vec<T>) {
        self.collection = collection;
        self.recompute(false);
    }

    /// Swaps in a freshly fetched vocabulary, seeding the selection the first time.
    pub fn replace_vocabulary(&mut self, vocabulary: Vocabulary) {
        self.vocabulary = vocabulary;
        let mut selection_changed = false;
        if !self.seeded && !self.vocabulary.is_empty() {
            self.seeded = true;
            if !self.manual_selection {
                self.filter.selected_categories = self.vocabulary.to_set();
                selection_changed = true;
                tracing::info!(
                    domain = %self.profile.domain,
                    categories = self.vocabulary.len(),
                    "selected every category from the vocabulary"
                );
            }
        }
        self.recompute(selection_changed);
    }

    // --- Category entry points ---

    /// Adds `category` to the selection if absent, removes it if present.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.filter.selected_categories.remove(category) {
            self.filter.selected_categories.insert(category.to_string());
        }
        self.manual_selection = true;
        self.recompute(true);
    }

    /// Replaces the selection wholesale.
    pub fn set_categories<I, S>(&mut self, categories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let selected: BTreeSet<String> = categories.into_iter().map(Into::into).collect();
        self.manual_selection = true;
        let changed = selected != self.filter.selected_categories;
        self.filter.selected_categories = selected;
        self.recompute(changed);
    }

    /// Narrows the selection to exactly one category (sidebar click).
    pub fn focus_category(&mut self, category: &str) {
        self.set_categories([category]);
    }

    pub fn select_all_categories(&mut self) {
        let all = self.vocabulary.to_set();
        self.set_categories(all);
    }

    // --- Toggle entry points ---

    /// Flips a named toggle and returns its new value.
    ///
    /// Names the domain does not declare are ignored and return `None`.
    pub fn toggle(&mut self, name: &str) -> Option<bool> {
        let current = self.filter_toggle(name)?;
        self.set_toggle(name, !current);
        Some(!current)
    }

    /// Sets a named toggle. Names the domain does not declare are ignored.
    pub fn set_toggle(&mut self, name: &str, enabled: bool) {
        let Some(key) = self.profile.toggle_names().find(|n| *n == name) else {
            tracing::debug!(domain = %self.profile.domain, toggle = name, "ignoring unknown toggle");
            return;
        };
        let previous = self.filter.toggles.insert(key, enabled);
        self.recompute(previous != Some(enabled));
    }

    fn filter_toggle(&self, name: &str) -> Option<bool> {
        self.profile
            .toggle_names()
            .find(|n| *n == name)
            .map(|n| self.filter.is_enabled(n))
    }

    // --- Search, sort, page ---

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        let changed = text != self.filter.search_text;
        self.filter.search_text = text;
        self.recompute(changed);
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.filter.sort_key = key;
        self.recompute(false);
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
        self.recompute(false);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// Restores every selection to its neutral value.
    pub fn clear_filters(&mut self) {
        self.filter.search_text.clear();
        self.filter.selected_categories = self.vocabulary.to_set();
        for enabled in self.filter.toggles.values_mut() {
            *enabled = true;
        }
        self.filter.sort_key = self.profile.default_sort;
        self.recompute(true);
    }

    fn recompute(&mut self, reset_page: bool) {
        if reset_page {
            self.page = 1;
        }
        self.derivation = Derivation::compute(
            &self.collection,
            &self.vocabulary,
            &self.filter,
            PageState::new(self.page, self.profile.page_size),
            &self.profile,
            self.ctx,
        );
        self.page = self.derivation.current_page;
        tracing::debug!(
            domain = %self.profile.domain,
            total = self.collection.len(),
            filtered = self.derivation.order.len(),
            page = self.page,
            pages = self.derivation.total_pages,
            "recomputed listing"
        );
    }

    // --- Read side ---

    pub fn view(&self) -> DerivedView<'_, T> {
        self.derivation.view(&self.collection)
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.derivation.total_pages
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn profile(&self) -> &DomainProfile {
        &self.profile
    }

    pub fn context(&self) -> &ViewContext {
        &self.ctx
    }

    pub fn collection(&self) -> &[T] {
        &self.collection
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// First `limit` records of the raw collection, in fetch order.
    pub fn recent(&self, limit: usize) -> &[T] {
        &self.collection[..limit.min(self.collection.len())]
    }

    pub fn category_summary(&self) -> String {
        summary_label(&self.filter.selected_categories, &self.vocabulary)
    }

    pub fn category_menu(&self) -> Vec<CategoryEntry> {
        menu_entries(
            &self.vocabulary,
            &self.derivation.category_counts,
            &self.filter.selected_categories,
        )
    }

    pub fn sort_summary(&self) -> &'static str {
        self.filter.sort_key.label()
    }
}
