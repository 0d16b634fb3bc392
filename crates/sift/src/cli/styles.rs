//! Styles for the sift CLI.
//!
//! Renderers refer to styles by meaning (a title, a muted timestamp, a status marker)
//! rather than by color, so the look can change in one place. Every style is built once
//! through `once_cell::sync::Lazy`.

use console::Style;
use once_cell::sync::Lazy;

pub static HEADER: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static INDEX: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static TITLE: Lazy<Style> = Lazy::new(Style::new);
pub static CATEGORY: Lazy<Style> = Lazy::new(|| Style::new().cyan());
pub static TIME: Lazy<Style> = Lazy::new(|| Style::new().color256(246).italic());
pub static MARKER: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static CLOSED: Lazy<Style> = Lazy::new(|| Style::new().red());
pub static MUTED: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static SELECTED: Lazy<Style> = Lazy::new(|| Style::new().green().bold());
