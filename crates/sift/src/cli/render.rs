//! # Rendering Module
//!
//! Turns a [`Browser`] into terminal text or JSON. Nothing here decides *what* is shown;
//! the browser has already filtered, sorted and paginated. Rendering only lays it out.
//!
//! ## Design Philosophy
//!
//! Layout calculations (width, truncation, padding) stay in Rust because they require
//! Unicode-aware processing. Every public renderer has an `_internal` twin taking
//! `use_color: Option<bool>` so tests can switch ANSI codes off.
//!
//! ## Row Layout
//!
//! ```text
//!   4. Longer library hours…      campus         42 sig     3 days ago  signed closed
//!   ^idx ^title (fill)            ^category      ^metric    ^time ago   ^markers
//! ```
//!
//! Markers name the `on` member of every toggle pair whose flag the record carries, so
//! they read the same as the `--hide` values that would remove the row.

use chrono::{DateTime, Utc};
use console::Style;
use serde::Serialize;
use serde_json::json;
use siftapp::attributes::{DomainProfile, Listable};
use siftapp::browser::Browser;
use siftapp::index::CategoryEntry;
use siftapp::model::ViewContext;
use std::fmt::Display;
use unicode_width::UnicodeWidthStr;

use super::styles::{CATEGORY, CLOSED, HEADER, INDEX, MARKER, MUTED, SELECTED, TIME, TITLE};

pub const LINE_WIDTH: usize = 100;
pub const COL_INDEX: usize = 5;
pub const COL_CATEGORY: usize = 14;
pub const COL_METRIC: usize = 10;
pub const TIME_WIDTH: usize = 14;

fn paint(style: &Style, text: impl Display, use_color: Option<bool>) -> String {
    let styled = style.apply_to(text);
    match use_color {
        Some(c) => styled.force_styling(c).to_string(),
        None => styled.to_string(),
    }
}

pub fn render_listing<T: Listable>(browser: &Browser<T>) -> String {
    render_listing_internal(browser, None)
}

fn render_listing_internal<T: Listable>(browser: &Browser<T>, use_color: Option<bool>) -> String {
    let view = browser.view();
    let profile = browser.profile();
    let ctx = browser.context();
    let mut out = String::new();

    out.push_str(&paint(
        &HEADER,
        format!(
            "{} · {} · {}",
            profile.domain,
            browser.category_summary(),
            browser.sort_summary()
        ),
        use_color,
    ));
    out.push('\n');

    if view.is_empty() {
        let message = if browser.collection().is_empty() {
            format!("No {} yet.", profile.domain)
        } else {
            format!("No {} match the current filters.", profile.domain)
        };
        out.push_str(&paint(&MUTED, message, use_color));
        out.push('\n');
        return out;
    }

    let first = view.window().map(|(start, _)| start).unwrap_or(1);
    for (offset, item) in view.page_items().iter().enumerate() {
        out.push_str(&render_row(*item, first + offset, profile, ctx, use_color));
        out.push('\n');
    }

    out.push_str(&paint(
        &MUTED,
        page_footer(
            view.window(),
            view.filtered_count(),
            view.current_page,
            view.total_pages,
        ),
        use_color,
    ));
    out.push('\n');
    out
}

fn render_row<T: Listable>(
    item: &T,
    position: usize,
    profile: &DomainProfile,
    ctx: &ViewContext,
    use_color: Option<bool>,
) -> String {
    let index = format!("{:>3}. ", position);

    let markers: Vec<&str> = profile
        .toggles
        .iter()
        .filter(|pair| item.flag(pair.flag, ctx))
        .map(|pair| pair.on)
        .collect();
    let markers_text = markers.join(" ");
    let markers_width = if markers_text.is_empty() {
        0
    } else {
        markers_text.width() + 2
    };

    let fixed = COL_INDEX + COL_CATEGORY + COL_METRIC + TIME_WIDTH + 2;
    let available = LINE_WIDTH.saturating_sub(fixed + markers_width);
    let title = truncate_to_width(item.title(), available);
    let title_padding = " ".repeat(available.saturating_sub(title.width()));

    let category = truncate_to_width(item.category().unwrap_or("-"), COL_CATEGORY - 1);
    let category_padding = " ".repeat(COL_CATEGORY.saturating_sub(category.width()));

    let metric = format!("{:>width$}", format_metric(item), width = COL_METRIC);
    let time_ago = format_time_ago(item.created_at(), ctx.now);

    let mut line = format!(
        "{}{}{}  {}{}{}{}",
        paint(&INDEX, index, use_color),
        paint(&TITLE, &title, use_color),
        title_padding,
        paint(&CATEGORY, &category, use_color),
        category_padding,
        metric,
        paint(&TIME, time_ago, use_color),
    );

    if !markers.is_empty() {
        line.push_str("  ");
        let painted: Vec<String> = markers
            .iter()
            .map(|m| {
                let style = if *m == "closed" { &CLOSED } else { &MARKER };
                paint(style, m, use_color)
            })
            .collect();
        line.push_str(&painted.join(" "));
    }
    line
}

fn format_metric<T: Listable>(item: &T) -> String {
    if let Some(count) = item.signature_count() {
        format!("{} sig", count)
    } else if let Some(count) = item.total_votes() {
        format!("{} votes", count)
    } else {
        String::new()
    }
}

/// "showing 4-6 of 7 · page 2 of 3"
pub fn page_footer(
    window: Option<(usize, usize)>,
    filtered: usize,
    current_page: usize,
    total_pages: usize,
) -> String {
    match window {
        Some((start, end)) => format!(
            "showing {}-{} of {} · page {} of {}",
            start, end, filtered, current_page, total_pages
        ),
        None => format!("page {} of {}", current_page, total_pages),
    }
}

pub fn render_categories(entries: &[CategoryEntry], summary: &str) -> String {
    render_categories_internal(entries, summary, None)
}

fn render_categories_internal(
    entries: &[CategoryEntry],
    summary: &str,
    use_color: Option<bool>,
) -> String {
    let mut out = String::new();
    out.push_str(&paint(&HEADER, format!("categories: {}", summary), use_color));
    out.push('\n');

    if entries.is_empty() {
        out.push_str(&paint(&MUTED, "No categories.", use_color));
        out.push('\n');
        return out;
    }

    for entry in entries {
        let check = if entry.selected {
            paint(&SELECTED, "[x]", use_color)
        } else {
            "[ ]".to_string()
        };
        let name = truncate_to_width(&entry.name, COL_CATEGORY * 2);
        let padding = " ".repeat((COL_CATEGORY * 2).saturating_sub(name.width()));
        out.push_str(&format!("{} {}{}{:>5}", check, name, padding, entry.count));
        if !entry.in_vocabulary {
            out.push_str(&paint(&MUTED, "  (not in vocabulary)", use_color));
        }
        out.push('\n');
    }
    out
}

pub fn render_sorts(profile: &DomainProfile) -> String {
    render_sorts_internal(profile, None)
}

fn render_sorts_internal(profile: &DomainProfile, use_color: Option<bool>) -> String {
    let mut out = String::new();
    out.push_str(&paint(&HEADER, format!("{} sort keys", profile.domain), use_color));
    out.push('\n');
    for key in profile.sort_keys {
        let default = if *key == profile.default_sort {
            paint(&MUTED, " (default)", use_color)
        } else {
            String::new()
        };
        out.push_str(&format!("  {:<18}{}{}\n", key.as_str(), key.label(), default));
    }

    if !profile.toggles.is_empty() {
        out.push_str(&paint(&HEADER, "toggles", use_color));
        out.push('\n');
        for pair in profile.toggles {
            out.push_str(&format!("  {:<18}{} / {}\n", pair.label, pair.on, pair.off));
        }
    }
    out
}

pub fn render_recent<T: Listable>(items: &[T], ctx: &ViewContext) -> String {
    render_recent_internal(items, ctx, None)
}

fn render_recent_internal<T: Listable>(
    items: &[T],
    ctx: &ViewContext,
    use_color: Option<bool>,
) -> String {
    if items.is_empty() {
        return format!("{}\n", paint(&MUTED, "Nothing yet.", use_color));
    }
    let available = LINE_WIDTH.saturating_sub(4 + TIME_WIDTH);
    items
        .iter()
        .map(|item| {
            let title = truncate_to_width(item.title(), available);
            let padding = " ".repeat(available.saturating_sub(title.width()));
            format!(
                "  • {}{}{}\n",
                paint(&TITLE, &title, use_color),
                padding,
                paint(&TIME, format_time_ago(item.created_at(), ctx.now), use_color)
            )
        })
        .collect()
}

/// The current page plus everything needed to render it elsewhere.
pub fn listing_json<T: Listable + Serialize>(browser: &Browser<T>) -> serde_json::Value {
    let view = browser.view();
    json!({
        "domain": browser.profile().domain,
        "page": view.current_page,
        "total_pages": view.total_pages,
        "filtered": view.filtered_count(),
        "total": browser.collection().len(),
        "window": view.window().map(|(start, end)| json!({"start": start, "end": end})),
        "categories": browser.category_summary(),
        "sort": browser.filter().sort_key,
        "category_counts": view.category_counts,
        "items": view.page_items(),
    })
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(timestamp) = timestamp else {
        return " ".repeat(TIME_WIDTH);
    };
    let duration = now.signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
