use chrono::{TimeZone, Utc};
use siftapp::attributes::{profile, DomainProfile, FilterState};
use siftapp::index::Vocabulary;
use siftapp::model::{parse_timestamp, Campaign, Domain, ItemId, Poll, ViewContext};
use siftapp::pipeline::{derive, Derivation, PageState};
use siftapp::sort::{comparator, MissingDeadline, SortKey};

fn ctx() -> ViewContext {
    ViewContext::at(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
}

/// A mixed bag: some uncategorized, some with categories outside the vocabulary,
/// deadlines on both sides of `ctx()`, missing counts.
fn campaigns() -> Vec<Campaign> {
    let rows: [(&str, Option<&str>, Option<&str>, Option<&str>, Option<u64>, bool); 11] = [
        ("1", Some("food"), Some("2024-01-05"), Some("2024-07-01"), Some(12), true),
        ("2", Some("housing"), Some("2024-02-05"), None, Some(40), false),
        ("3", None, Some("2024-03-05"), Some("2024-05-01"), None, false),
        ("4", Some("food"), None, Some("2024-09-01"), Some(12), true),
        ("5", Some("sports"), Some("2024-04-05"), None, Some(3), false),
        ("6", Some(""), Some("2024-05-05"), Some("2023-12-31"), Some(0), true),
        ("7", Some("housing"), Some("2024-01-05"), Some("2024-06-02"), Some(99), false),
        ("8", Some("transport"), Some("2024-02-10"), None, None, true),
        ("9", Some("food"), Some("2024-03-15"), Some("2024-01-01"), Some(5), false),
        ("10", Some("housing"), None, None, Some(7), false),
        ("11", Some("transport"), Some("2024-05-30"), Some("2025-01-01"), Some(1), true),
    ];
    rows.iter()
        .map(|(id, category, created, deadline, sigs, signed)| Campaign {
            id: ItemId::from(*id),
            title: format!("Campaign number {}", id),
            excerpt: "Student union petition".to_string(),
            category: category.map(String::from),
            created_at: created.and_then(parse_timestamp),
            deadline: deadline.and_then(parse_timestamp),
            signature_count: *sigs,
            has_signed: *signed,
            ..Default::default()
        })
        .collect()
}

fn vocabulary() -> Vocabulary {
    Vocabulary::new(["food", "housing", "transport"])
}

/// A handful of filter states worth checking laws against.
fn filters(p: &DomainProfile, vocab: &Vocabulary) -> Vec<FilterState> {
    let all = {
        let mut f = FilterState::new(p);
        f.selected_categories = vocab.to_set();
        f
    };
    let mut out = vec![all.clone()];

    let mut narrowed = all.clone();
    narrowed.selected_categories.remove("housing");
    out.push(narrowed);

    let mut signed_only = all.clone();
    signed_only.toggles.insert("unsigned", false);
    out.push(signed_only);

    let mut open_only = all.clone();
    open_only.toggles.insert("closed", false);
    open_only.sort_key = SortKey::NearestDeadline;
    out.push(open_only);

    let mut searched = all.clone();
    searched.search_text = " NUMBER 1".into();
    searched.sort_key = SortKey::MostSignatures;
    out.push(searched);

    out
}

#[test]
fn idempotence() {
    let p = profile(Domain::Campaigns);
    let vocab = vocabulary();
    let items = campaigns();
    for f in filters(&p, &vocab) {
        for page in 0..5 {
            let a = Derivation::compute(&items, &vocab, &f, PageState::new(page, 3), &p, ctx());
            let b = Derivation::compute(&items, &vocab, &f, PageState::new(page, 3), &p, ctx());
            assert_eq!(a, b);
            assert_eq!(
                derive(&items, &vocab, &f, PageState::new(page, 3), &p, ctx()),
                derive(&items, &vocab, &f, PageState::new(page, 3), &p, ctx())
            );
        }
    }
}

#[test]
fn empty_selection_law() {
    let p = profile(Domain::Campaigns);
    let vocab = vocabulary();
    let items = campaigns();
    for mut f in filters(&p, &vocab) {
        f.selected_categories.clear();
        let view = derive(&items, &vocab, &f, PageState::first(3), &p, ctx());
        assert!(view.is_empty());
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.current_page, 1);
    }
}

#[test]
fn all_selected_law() {
    let p = profile(Domain::Campaigns);
    let vocab = vocabulary();
    let items = campaigns();
    let f = &filters(&p, &vocab)[0];
    let view = derive(&items, &vocab, f, PageState::first(3), &p, ctx());
    let ids: Vec<&str> = view.filtered_sorted.iter().map(|c| c.id.0.as_str()).collect();

    // uncategorized, empty and out-of-vocabulary categories all stay
    assert!(ids.contains(&"3"));
    assert!(ids.contains(&"6"));
    assert!(ids.contains(&"5"));
    assert_eq!(view.filtered_count(), items.len());
}

#[test]
fn pagination_coverage() {
    let p = profile(Domain::Campaigns);
    let vocab = vocabulary();
    let items = campaigns();
    for f in filters(&p, &vocab) {
        for page_size in [1, 2, 3, 4, 11, 50] {
            let first = derive(&items, &vocab, &f, PageState::first(page_size), &p, ctx());
            let mut stitched: Vec<&Campaign> = Vec::new();
            for page in 1..=first.total_pages {
                let view = derive(&items, &vocab, &f, PageState::new(page, page_size), &p, ctx());
                assert_eq!(view.current_page, page);
                stitched.extend(view.page_items().iter().copied());
            }
            assert_eq!(stitched, first.filtered_sorted);
        }
    }
}

#[test]
fn stability() {
    let items = campaigns();
    for key in [
        SortKey::Newest,
        SortKey::NearestDeadline,
        SortKey::MostSignatures,
    ] {
        for policy in [MissingDeadline::AsEpoch, MissingDeadline::Last] {
            let cmp = comparator::<Campaign>(key, policy);
            let mut once: Vec<&Campaign> = items.iter().collect();
            once.sort_by(|a, b| cmp(*a, *b));
            let mut twice = once.clone();
            twice.sort_by(|a, b| cmp(*a, *b));
            assert_eq!(once, twice);
        }
    }
}

#[test]
fn equal_keys_keep_collection_order() {
    let p = profile(Domain::Campaigns);
    let vocab = vocabulary();
    let items = campaigns();
    let mut f = filters(&p, &vocab)[0].clone();
    f.sort_key = SortKey::MostSignatures;
    let view = derive(&items, &vocab, &f, PageState::first(50), &p, ctx());
    let ids: Vec<&str> = view.filtered_sorted.iter().map(|c| c.id.0.as_str()).collect();

    // 1 and 4 tie at 12, 3 and 8 tie at missing (zero) with 6
    let pos = |id: &str| ids.iter().position(|x| *x == id).unwrap();
    assert!(pos("1") < pos("4"));
    assert!(pos("3") < pos("6"));
    assert!(pos("6") < pos("8"));
}

#[test]
fn toggle_law() {
    let p = profile(Domain::Campaigns);
    let vocab = vocabulary();
    let items = campaigns();
    for pair in p.toggles {
        for mut f in filters(&p, &vocab) {
            f.toggles.insert(pair.on, false);
            f.toggles.insert(pair.off, false);
            let view = derive(&items, &vocab, &f, PageState::first(3), &p, ctx());
            assert!(view.is_empty(), "pair {} should empty the list", pair.label);
        }
    }
}

#[test]
fn counts_ignore_every_filter() {
    let p = profile(Domain::Campaigns);
    let vocab = vocabulary();
    let items = campaigns();
    let expected = derive(&items, &vocab, &filters(&p, &vocab)[0], PageState::first(3), &p, ctx())
        .category_counts;
    assert_eq!(expected["food"], 3);
    assert_eq!(expected["housing"], 3);
    assert_eq!(expected["sports"], 1);
    assert!(!expected.contains_key(""));

    for mut f in filters(&p, &vocab) {
        f.selected_categories.clear();
        f.toggles.insert("signed", false);
        let view = derive(&items, &vocab, &f, PageState::first(3), &p, ctx());
        assert_eq!(view.category_counts, expected);
    }
}

#[test]
fn open_toggle_follows_the_mounted_clock() {
    let p = profile(Domain::Polls);
    let vocab = Vocabulary::new(["campus"]);
    let polls: Vec<Poll> = ["2024-05-31", "2024-06-02"]
        .iter()
        .enumerate()
        .map(|(i, d)| Poll {
            id: ItemId(i.to_string()),
            category: Some("campus".into()),
            deadline: parse_timestamp(d),
            ..Default::default()
        })
        .collect();

    let mut f = FilterState::new(&p);
    f.selected_categories = vocab.to_set();
    f.toggles.insert("closed", false);

    let view = derive(&polls, &vocab, &f, PageState::first(5), &p, ctx());
    assert_eq!(view.filtered_count(), 1);
    assert_eq!(view.filtered_sorted[0].id, ItemId::from("1"));

    let later = ViewContext::at(Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap());
    let view = derive(&polls, &vocab, &f, PageState::first(5), &p, later);
    assert!(view.is_empty());
}
