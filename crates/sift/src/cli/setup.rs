use clap::{Args, Parser, Subcommand};
use siftapp::model::Domain;
use siftapp::sort::SortKey;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sift",
    bin_name = "sift",
    version,
    disable_help_subcommand = true,
    about = "Filter, sort and page through posts, campaigns and polls",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Read configuration from this file (overrides the global sift.toml)
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show one page of a listing
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show the category menu with per-category counts
    #[command(alias = "cats")]
    Categories {
        /// posts, campaigns or polls
        domain: Domain,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show the most recently fetched records, ignoring filters
    Recent {
        /// posts, campaigns or polls
        domain: Domain,

        /// How many records to show (defaults to `recent_limit` from config)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show the sort keys and toggles a domain offers
    Sorts {
        /// posts, campaigns or polls
        domain: Domain,
    },
}

/// Where records come from and which clock they are judged against.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Directory holding posts.json, campaigns.json, polls.json and categories.json
    #[arg(short, long, value_name = "DIR", env = "SIFT_DATA", default_value = ".")]
    pub data: PathBuf,

    /// Judge deadlines against this instant (RFC 3339) instead of the current time
    #[arg(long, value_name = "TIMESTAMP")]
    pub now: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// posts, campaigns or polls
    pub domain: Domain,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Case-insensitive text to look for in titles and descriptions
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only show these categories (repeatable)
    #[arg(short, long = "category", value_name = "NAME", conflicts_with = "only")]
    pub categories: Vec<String>,

    /// Only show this one category
    #[arg(long, value_name = "NAME")]
    pub only: Option<String>,

    /// Switch a toggle off, e.g. `--hide closed` (repeatable)
    #[arg(long, value_name = "TOGGLE")]
    pub hide: Vec<String>,

    /// Sort key: newest, deadline, signatures or votes
    #[arg(long, value_name = "KEY")]
    pub sort: Option<SortKey>,

    /// Page to show; out-of-range pages are clamped
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
