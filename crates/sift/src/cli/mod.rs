//! # CLI Behavior
//!
//! This is **one possible UI client** for siftapp, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! For the overall architecture, see the crate-level documentation in [`crate`].
//!
//! ## One Invocation, One Listing
//!
//! Every `sift list` run mounts a fresh browser, feeds it the fetched inputs, then replays
//! the requested changes through the same entry points an interactive UI would use:
//!
//! 1. `--category` / `--only` narrow the category selection
//! 2. `--hide` switches toggles off
//! 3. `--search` sets the search text
//! 4. `--sort` picks the sort key
//! 5. `--page` picks the page (clamped into range)
//!
//! Filter changes reset the page to 1, so the page is applied last.
//!
//! ## Module Structure
//!
//! - `commands`: Tracing setup, configuration, per-command handlers
//! - `render`: Output formatting (rows, menus, footers, JSON)
//! - `setup`: Argument parsing via clap
//! - `styles`: Terminal styling constants

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::{is_retryable, run};
