//! # Category Index
//!
//! Category menus need two things the raw collection does not give directly:
//!
//! 1. **Counts**: how many records carry each category, over the *unfiltered* collection,
//!    so that narrowing the list never changes the numbers shown in the menu.
//! 2. **Vocabulary**: the externally sourced list of selectable category names. It may
//!    name categories no record carries yet, and records may carry categories it does
//!    not name.
//!
//! ## Menu Entries
//!
//! [`menu_entries`] joins both: vocabulary names in vocabulary order (zero counts
//! included), then categories only seen in the collection, sorted by name.
//!
//! ## Summary Label
//!
//! The collapsed menu button shows [`summary_label`]:
//!
//! | Selection | Label |
//! |-----------|-------|
//! | nothing | `none selected` |
//! | every vocabulary name | `all categories` |
//! | one or two | the names, comma separated |
//! | more | `N selected` |

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::attributes::Listable;

/// Count of records per non-empty category.
pub type CategoryCounts = BTreeMap<String, usize>;

/// Builds the per-category counts for a collection.
///
/// Records without a category are not counted.
pub fn build_index<T: Listable>(collection: &[T]) -> CategoryCounts {
    let mut counts = CategoryCounts::new();
    for item in collection {
        if let Some(category) = item.category() {
            *counts.entry(category.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// The ordered set of selectable category names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Vocabulary {
    names: Vec<String>,
}

impl Vocabulary {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = BTreeSet::new();
        let names = names
            .into_iter()
            .map(Into::into)
            .filter(|name: &String| !name.is_empty())
            .filter(|name| seen.insert(name.clone()))
            .collect();
        Self { names }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn to_set(&self) -> BTreeSet<String> {
        self.names.iter().cloned().collect()
    }

    /// Whether `selected` covers every vocabulary name.
    ///
    /// An empty vocabulary is never covered: there is nothing to have "all" of.
    pub fn is_covered_by(&self, selected: &BTreeSet<String>) -> bool {
        !self.names.is_empty() && self.names.iter().all(|n| selected.contains(n))
    }
}

impl<S: Into<String>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Vocabulary::new(iter)
    }
}

/// One row of a category menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryEntry {
    pub name: String,
    pub count: usize,
    pub selected: bool,
    pub in_vocabulary: bool,
}

/// Builds the rows of a category menu.
pub fn menu_entries(
    vocabulary: &Vocabulary,
    counts: &CategoryCounts,
    selected: &BTreeSet<String>,
) -> Vec<CategoryEntry> {
    let mut entries: Vec<CategoryEntry> = vocabulary
        .iter()
        .map(|name| CategoryEntry {
            name: name.to_string(),
            count: counts.get(name).copied().unwrap_or(0),
            selected: selected.contains(name),
            in_vocabulary: true,
        })
        .collect();

    entries.extend(
        counts
            .iter()
            .filter(|(name, _)| !vocabulary.contains(name))
            .map(|(name, count)| CategoryEntry {
                name: name.clone(),
                count: *count,
                selected: selected.contains(name),
                in_vocabulary: false,
            }),
    );
    entries
}

/// Label for a collapsed category menu.
///
/// "All" uses the same test as the category clause, so the label never claims
/// everything is shown while the list is narrowed.
pub fn summary_label(selected: &BTreeSet<String>, vocabulary: &Vocabulary) -> String {
    if selected.is_empty() {
        "none selected".to_string()
    } else if vocabulary.is_covered_by(selected) {
        "all categories".to_string()
    } else if selected.len() <= 2 {
        selected
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        format!("{} selected", selected.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Post;

    fn post(category: Option<&str>) -> Post {
        Post {
            category: category.map(String::from),
            ..Default::default()
        }
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn counts_per_category() {
        let items = vec![
            post(Some("x")),
            post(Some("y")),
            post(Some("x")),
            post(None),
            post(Some("")),
        ];
        let counts = build_index(&items);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["x"], 2);
        assert_eq!(counts["y"], 1);
    }

    #[test]
    fn empty_collection_has_no_counts() {
        let items: Vec<Post> = Vec::new();
        assert!(build_index(&items).is_empty());
    }

    #[test]
    fn vocabulary_dedupes_and_drops_empty_names() {
        let vocab = Vocabulary::new(["a", "b", "", "a", "c"]);
        assert_eq!(vocab.iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(vocab.len(), 3);
    }

    #[test]
    fn coverage() {
        let vocab = Vocabulary::new(["a", "b"]);
        assert!(vocab.is_covered_by(&set(&["a", "b"])));
        assert!(vocab.is_covered_by(&set(&["a", "b", "z"])));
        assert!(!vocab.is_covered_by(&set(&["a"])));
        assert!(!Vocabulary::default().is_covered_by(&set(&["a"])));
        assert!(!Vocabulary::default().is_covered_by(&set(&[])));
    }

    #[test]
    fn menu_entries_follow_vocabulary_then_extras() {
        let vocab = Vocabulary::new(["math", "physics"]);
        let counts: CategoryCounts = [("physics".to_string(), 2), ("art".to_string(), 1)]
            .into_iter()
            .collect();
        let entries = menu_entries(&vocab, &counts, &set(&["physics"]));

        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["math", "physics", "art"]);
        assert_eq!(entries[0].count, 0);
        assert!(!entries[0].selected);
        assert_eq!(entries[1].count, 2);
        assert!(entries[1].selected);
        assert!(!entries[2].in_vocabulary);
    }

    fn vocab(names: &[&str]) -> Vocabulary {
        Vocabulary::new(names.iter().copied())
    }

    #[test]
    fn summary_all() {
        let v = vocab(&["a", "b", "c"]);
        assert_eq!(summary_label(&set(&["a", "b", "c"]), &v), "all categories");
        assert_eq!(summary_label(&set(&["a", "b", "c", "x"]), &v), "all categories");
    }

    #[test]
    fn summary_none() {
        assert_eq!(summary_label(&set(&[]), &vocab(&["a", "b", "c"])), "none selected");
    }

    #[test]
    fn summary_empty_vocabulary_is_none_selected() {
        assert_eq!(summary_label(&set(&[]), &vocab(&[])), "none selected");
    }

    #[test]
    fn summary_swapped_extra_is_not_all() {
        // same size as the vocabulary, but "b" is missing
        let v = vocab(&["a", "b"]);
        assert_eq!(summary_label(&set(&["a", "art"]), &v), "a, art");
        let v = vocab(&["a", "b", "c"]);
        assert_eq!(summary_label(&set(&["a", "b", "art"]), &v), "3 selected");
    }

    #[test]
    fn summary_short_list() {
        let v = vocab(&["a", "b", "c", "d", "e"]);
        assert_eq!(summary_label(&set(&["b"]), &v), "b");
        assert_eq!(summary_label(&set(&["b", "a"]), &v), "a, b");
    }

    #[test]
    fn summary_count() {
        let v = vocab(&["a", "b", "c", "d", "e"]);
        assert_eq!(summary_label(&set(&["a", "b", "c"]), &v), "3 selected");
    }
}
