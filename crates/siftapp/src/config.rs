//! # Configuration
//!
//! Sift configuration is a [`confique`] struct loaded in layers from the environment,
//! TOML files, and compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `SIFT_POSTS_PAGE_SIZE`, `SIFT_MISSING_DEADLINE`, etc.
//! 2. **Explicit file**: the path passed with `--config`.
//! 3. **Global Config**: `sift.toml` in the OS-appropriate config directory (via `directories`).
//! 4. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! Files that do not exist are skipped.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `posts_page_size` | `3` | Posts per page |
//! | `campaigns_page_size` | `3` | Campaigns per page |
//! | `polls_page_size` | `5` | Polls per page |
//! | `missing_deadline` | `as_epoch` | Where deadline-less records sort: `as_epoch` or `last` |
//! | `recent_limit` | `3` | Records in the "recent" sidebar |
//!
//! A page size of `0` is read as `1`.

use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::attributes::{profile, DomainProfile};
use crate::error::Result;
use crate::model::Domain;
use crate::sort::MissingDeadline;

pub const CONFIG_FILE_NAME: &str = "sift.toml";

fn parse_missing_deadline(raw: &str) -> Result<MissingDeadline> {
    raw.parse()
}

/// Configuration for sift, stored in `sift.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SiftConfig {
    #[config(default = 3, env = "SIFT_POSTS_PAGE_SIZE")]
    pub posts_page_size: usize,

    #[config(default = 3, env = "SIFT_CAMPAIGNS_PAGE_SIZE")]
    pub campaigns_page_size: usize,

    #[config(default = 5, env = "SIFT_POLLS_PAGE_SIZE")]
    pub polls_page_size: usize,

    /// "as_epoch" puts deadline-less records first under nearest-deadline, "last" puts them at the end.
    /// When absent, defaults to "as_epoch".
    #[config(env = "SIFT_MISSING_DEADLINE", parse_env = parse_missing_deadline)]
    pub missing_deadline: Option<MissingDeadline>,

    #[config(default = 3, env = "SIFT_RECENT_LIMIT")]
    pub recent_limit: usize,
}

impl Default for SiftConfig {
    fn default() -> Self {
        Self {
            posts_page_size: 3,
            campaigns_page_size: 3,
            polls_page_size: 5,
            missing_deadline: None,
            recent_limit: 3,
        }
    }
}

impl SiftConfig {
    /// Loads the layered configuration.
    ///
    /// `explicit` takes precedence over the global file; the environment beats both.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = explicit {
            builder = builder.file(path);
        }
        if let Some(global) = default_config_path() {
            builder = builder.file(global);
        }
        let config = builder.load()?;
        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }

    pub fn missing_deadline(&self) -> MissingDeadline {
        self.missing_deadline.unwrap_or_default()
    }

    /// Page size for `domain`, never zero.
    pub fn page_size(&self, domain: Domain) -> usize {
        let size = match domain {
            Domain::Posts => self.posts_page_size,
            Domain::Campaigns => self.campaigns_page_size,
            Domain::Polls => self.polls_page_size,
        };
        size.max(1)
    }

    /// The built-in profile for `domain` with this configuration applied.
    pub fn profile(&self, domain: Domain) -> DomainProfile {
        profile(domain)
            .with_page_size(self.page_size(domain))
            .with_missing_deadline(self.missing_deadline())
    }
}

/// `sift.toml` in the OS config directory, if one can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "sift", "sift").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
