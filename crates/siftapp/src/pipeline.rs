//! # Pipeline
//!
//! `derive` turns the four inputs (collection, vocabulary, filter state, page state) into
//! the view a renderer needs:
//!
//! ```text
//! collection ──► build_index ─────────────────────────────► category_counts
//!      │
//!      └──────► predicate chain ─► comparator ─► paginate ─► filtered_sorted, page
//! ```
//!
//! The function is total and pure: it never fails, never mutates its inputs, and returns
//! identical output (order included) for identical inputs. Out-of-range pages are clamped
//! to `[1, total_pages]`, and `total_pages` is at least one even for an empty result.
//!
//! [`Derivation`] is the owned, index-based form of the result. The controller keeps one
//! alongside the collection it owns and turns it into a borrowed [`DerivedView`] on demand.

use serde::Serialize;
use std::ops::Range;

use crate::attributes::{DomainProfile, FilterState, Listable, PredicateChain};
use crate::index::{build_index, CategoryCounts, Vocabulary};
use crate::model::ViewContext;
use crate::sort::comparator;

/// Requested page and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    pub current_page: usize,
    pub page_size: usize,
}

impl PageState {
    pub fn new(current_page: usize, page_size: usize) -> Self {
        Self {
            current_page,
            page_size,
        }
    }

    pub fn first(page_size: usize) -> Self {
        Self::new(1, page_size)
    }
}

/// `max(1, ceil(len / page_size))`, with a zero page size treated as one.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Clamps `requested` into `[1, total_pages]`.
pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.clamp(1, total_pages.max(1))
}

/// Owned result of a recompute, expressed as positions in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Derivation {
    /// Collection positions of the filtered records, in sorted order.
    pub order: Vec<usize>,
    pub category_counts: CategoryCounts,
    pub total_pages: usize,
    /// The clamped page.
    pub current_page: usize,
    pub page_size: usize,
}

impl Derivation {
    pub fn compute<T: Listable>(
        collection: &[T],
        vocabulary: &Vocabulary,
        filter: &FilterState,
        page: PageState,
        profile: &DomainProfile,
        ctx: ViewContext,
    ) -> Self {
        let category_counts = build_index(collection);

        let chain = PredicateChain::compile(filter, vocabulary, profile, ctx);
        let mut order: Vec<usize> = if chain.excludes_everything() {
            Vec::new()
        } else {
            collection
                .iter()
                .enumerate()
                .filter(|(_, item)| chain.matches(*item))
                .map(|(pos, _)| pos)
                .collect()
        };

        let cmp = comparator::<T>(filter.sort_key, profile.missing_deadline);
        order.sort_by(|a, b| cmp(&collection[*a], &collection[*b]));

        let page_size = page.page_size.max(1);
        let total_pages = total_pages(order.len(), page_size);
        let current_page = clamp_page(page.current_page, total_pages);

        Self {
            order,
            category_counts,
            total_pages,
            current_page,
            page_size,
        }
    }

    /// Range of `order` shown on the current page.
    pub fn page_range(&self) -> Range<usize> {
        let start = (self.current_page.saturating_sub(1) * self.page_size).min(self.order.len());
        let end = (start + self.page_size).min(self.order.len());
        start..end
    }

    /// Resolves positions against the collection they were computed from.
    pub fn view<'a, T>(&self, collection: &'a [T]) -> DerivedView<'a, T> {
        DerivedView {
            filtered_sorted: self.order.iter().map(|pos| &collection[*pos]).collect(),
            category_counts: self.category_counts.clone(),
            total_pages: self.total_pages,
            current_page: self.current_page,
            page_range: self.page_range(),
        }
    }
}

/// What a renderer needs for one listing.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView<'a, T> {
    pub filtered_sorted: Vec<&'a T>,
    /// Counts over the unfiltered collection.
    pub category_counts: CategoryCounts,
    pub total_pages: usize,
    pub current_page: usize,
    page_range: Range<usize>,
}

impl<'a, T> DerivedView<'a, T> {
    pub fn page_items(&self) -> &[&'a T] {
        &self.filtered_sorted[self.page_range.clone()]
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered_sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered_sorted.is_empty()
    }

    /// 1-based inclusive positions of the current page within `filtered_sorted`,
    /// for "showing 4-6 of 7" labels. `None` when nothing is shown.
    pub fn window(&self) -> Option<(usize, usize)> {
        if self.page_range.is_empty() {
            None
        } else {
            Some((self.page_range.start + 1, self.page_range.end))
        }
    }
}

/// Derives the view for one listing.
pub fn derive<'a, T: Listable>(
    collection: &'a [T],
    vocabulary: &Vocabulary,
    filter: &FilterState,
    page: PageState,
    profile: &DomainProfile,
    ctx: ViewContext,
) -> DerivedView<'a, T> {
    Derivation::compute(collection, vocabulary, filter, page, profile, ctx).view(collection)
}
