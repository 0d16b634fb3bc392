use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use siftapp::api::SiftApi;
use siftapp::attributes::{DomainProfile, Listable};
use siftapp::browser::Browser;
use siftapp::config::SiftConfig;
use siftapp::error::SiftError;
use siftapp::model::{parse_timestamp, Campaign, Domain, Poll, Post, ViewContext};
use siftapp::source::fs::DirSource;
use tracing_subscriber::EnvFilter;

use super::render::{
    listing_json, render_categories, render_listing, render_recent, render_sorts,
};
use super::setup::{parse_cli, Commands, ListArgs, SourceArgs};

pub const LOG_ENV: &str = "SIFT_LOG";

/// Parses arguments, sets up logging and configuration, and runs one command.
pub fn run() -> Result<()> {
    let cli = parse_cli();
    init_tracing(cli.verbose);

    let config = SiftConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::List(args) => match args.domain {
            Domain::Posts => handle_list::<Post>(&config, &args),
            Domain::Campaigns => handle_list::<Campaign>(&config, &args),
            Domain::Polls => handle_list::<Poll>(&config, &args),
        },
        Commands::Categories { domain, source } => match domain {
            Domain::Posts => handle_categories::<Post>(&config, &source),
            Domain::Campaigns => handle_categories::<Campaign>(&config, &source),
            Domain::Polls => handle_categories::<Poll>(&config, &source),
        },
        Commands::Recent {
            domain,
            limit,
            source,
        } => {
            let limit = limit.unwrap_or(config.recent_limit);
            match domain {
                Domain::Posts => handle_recent::<Post>(&config, &source, limit),
                Domain::Campaigns => handle_recent::<Campaign>(&config, &source, limit),
                Domain::Polls => handle_recent::<Poll>(&config, &source, limit),
            }
        }
        Commands::Sorts { domain } => {
            print!("{}", render_sorts(&config.profile(domain)));
            Ok(())
        }
    }
}

/// Whether `err` came from a source that may succeed on a second attempt.
pub fn is_retryable(err: &anyhow::Error) -> bool {
    err.downcast_ref::<SiftError>()
        .is_some_and(SiftError::is_retryable)
}

/// Logs go to stderr, filtered by `SIFT_LOG`; the default is `warn`, or `info` with `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn view_context(source: &SourceArgs) -> Result<ViewContext> {
    match &source.now {
        None => Ok(ViewContext::mounted_now()),
        Some(raw) => parse_timestamp(raw)
            .map(ViewContext::at)
            .with_context(|| format!("Invalid --now timestamp: {}", raw)),
    }
}

fn open<T>(config: &SiftConfig, source: &SourceArgs) -> Result<Browser<T>>
where
    T: Listable + DeserializeOwned,
{
    let ctx = view_context(source)?;
    let api = SiftApi::new(DirSource::new(&source.data), config.clone());
    Ok(api.open::<T>(ctx)?)
}

fn handle_list<T>(config: &SiftConfig, args: &ListArgs) -> Result<()>
where
    T: Listable + DeserializeOwned + Serialize,
{
    let mut browser = open::<T>(config, &args.source)?;
    apply_list_args(&mut browser, args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listing_json(&browser))?);
    } else {
        print!("{}", render_listing(&browser));
    }
    Ok(())
}

/// Replays the requested changes through the browser's entry points.
///
/// The page goes last because every filter change sends the listing back to page 1.
fn apply_list_args<T: Listable>(browser: &mut Browser<T>, args: &ListArgs) -> Result<()> {
    let profile = *browser.profile();

    if let Some(only) = &args.only {
        browser.focus_category(only);
    } else if !args.categories.is_empty() {
        browser.set_categories(args.categories.iter().cloned());
    }

    for name in &args.hide {
        check_toggle(&profile, name)?;
        browser.set_toggle(name, false);
    }

    if let Some(search) = &args.search {
        browser.set_search_text(search.clone());
    }

    if let Some(key) = args.sort {
        if !profile.sort_keys.contains(&key) {
            bail!(
                "{} cannot be sorted by {}. Available: {}",
                profile.domain,
                key,
                profile
                    .sort_keys
                    .iter()
                    .map(|k| k.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        browser.set_sort_key(key);
    }

    browser.set_page(args.page);
    Ok(())
}

fn check_toggle(profile: &DomainProfile, name: &str) -> Result<()> {
    if profile.pair_for(name).is_some() {
        return Ok(());
    }
    let available: Vec<&str> = profile.toggle_names().collect();
    if available.is_empty() {
        bail!("{} have no toggles", profile.domain);
    }
    bail!(
        "Unknown toggle for {}: {}. Available: {}",
        profile.domain,
        name,
        available.join(", ")
    )
}

fn handle_categories<T>(config: &SiftConfig, source: &SourceArgs) -> Result<()>
where
    T: Listable + DeserializeOwned,
{
    let browser = open::<T>(config, source)?;
    print!(
        "{}",
        render_categories(&browser.category_menu(), &browser.category_summary())
    );
    Ok(())
}

fn handle_recent<T>(config: &SiftConfig, source: &SourceArgs, limit: usize) -> Result<()>
where
    T: Listable + DeserializeOwned,
{
    let browser = open::<T>(config, source)?;
    print!("{}", render_recent(browser.recent(limit), browser.context()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use siftapp::index::Vocabulary;
    use siftapp::model::ItemId;
    use siftapp::sort::SortKey;

    use super::super::setup::Cli;

    fn list_args(argv: &[&str]) -> ListArgs {
        let mut full = vec!["sift", "list"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Commands::List(args) => args,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    fn browser() -> Browser<Campaign> {
        let config = SiftConfig::default();
        let mut b = Browser::new(config.profile(Domain::Campaigns), ViewContext::mounted_now());
        b.replace_collection(
            (0..8)
                .map(|i| Campaign {
                    id: ItemId(i.to_string()),
                    title: format!("Campaign {}", i),
                    category: Some(if i % 2 == 0 { "food" } else { "housing" }.into()),
                    has_signed: i < 3,
                    ..Default::default()
                })
                .collect(),
        );
        b.replace_vocabulary(Vocabulary::new(["food", "housing"]));
        b
    }

    #[test]
    fn test_apply_list_args_in_order() {
        let mut b = browser();
        let args = list_args(&["campaigns", "-c", "food", "--hide", "signed", "--page", "2"]);
        apply_list_args(&mut b, &args).unwrap();

        // food: 0, 2, 4, 6; signed hidden leaves 4, 6
        assert_eq!(b.view().filtered_count(), 2);
        assert_eq!(b.current_page(), 1);
    }

    #[test]
    fn test_page_is_applied_after_filters() {
        let mut b = browser();
        let args = list_args(&["campaigns", "--search", "campaign", "--page", "3"]);
        apply_list_args(&mut b, &args).unwrap();
        assert_eq!(b.current_page(), 3);
    }

    #[test]
    fn test_only_focuses_one_category() {
        let mut b = browser();
        apply_list_args(&mut b, &list_args(&["campaigns", "--only", "housing"])).unwrap();
        assert_eq!(b.category_summary(), "housing");
    }

    #[test]
    fn test_unknown_toggle_is_an_error() {
        let mut b = browser();
        let err = apply_list_args(&mut b, &list_args(&["campaigns", "--hide", "voted"]))
            .unwrap_err();
        assert!(err.to_string().contains("Available: signed, unsigned, closed, open"));
    }

    #[test]
    fn test_sort_must_be_offered_by_domain() {
        let mut b = browser();
        let err = apply_list_args(&mut b, &list_args(&["campaigns", "--sort", "votes"]))
            .unwrap_err();
        assert!(err.to_string().contains("cannot be sorted by total_votes"));

        apply_list_args(&mut b, &list_args(&["campaigns", "--sort", "signatures"])).unwrap();
        assert_eq!(b.filter().sort_key, SortKey::MostSignatures);
    }

    #[test]
    fn test_view_context_parsing() {
        let args = list_args(&["posts", "--now", "2024-06-01T00:00:00Z"]);
        let ctx = view_context(&args.source).unwrap();
        assert_eq!(ctx.now.to_rfc3339(), "2024-06-01T00:00:00+00:00");

        let args = list_args(&["posts", "--now", "soon"]);
        assert!(view_context(&args.source).is_err());
    }

    #[test]
    fn test_fetch_errors_are_retryable() {
        let err: anyhow::Error = SiftError::fetch("posts", "missing").into();
        assert!(is_retryable(&err));
        assert!(!is_retryable(&anyhow::anyhow!("bad flag")));
    }
}
