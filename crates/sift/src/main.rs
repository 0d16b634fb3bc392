//! # Sift CLI Architecture
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this file only
//! invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/siftapp/`: the UI-agnostic discovery engine, sources and configuration
//! - `crates/sift/`: this CLI tool, depends on `siftapp`
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/sift/src/cli/)                           │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Tracing, config and dispatch (commands.rs)               │
//! │  - Terminal rendering with console styles (render.rs)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/siftapp/src/api.rs)                      │
//! │  - Fetches inputs, returns a Browser                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (crates/siftapp/src/browser.rs and friends)         │
//! │  - Pure derivation, no knowledge of stdout or exit codes    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The CLI is responsible for **all** user-facing concerns: argument parsing, logging
//! setup, dispatch, error reporting and rendering.
//!
//! ## Testing Approach
//!
//! - **Engine**: unit tests in `siftapp`, plus law and scenario tests in `siftapp/tests/`.
//! - **Rendering**: unit tests in `render.rs` feed canned records with color disabled.
//! - **End to end**: `tests/` runs the binary against temporary data directories.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        if cli::is_retryable(&e) {
            eprintln!("The data source could not be read. Check it and run the command again.");
        }
        std::process::exit(1);
    }
}
