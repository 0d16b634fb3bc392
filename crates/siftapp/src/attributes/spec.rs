//! Domain profiles and toggle pair registry.
//!
//! This module is the single source of truth for what differs between domains:
//! which toggle pairs exist, which sort keys are offered, and the page size.

use super::Flag;
use crate::model::Domain;
use crate::sort::{MissingDeadline, SortKey};

/// Two named checkboxes over one boolean flag.
///
/// `on` shows records where the flag is true, `off` shows records where it is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TogglePair {
    pub flag: Flag,
    /// Toggle name showing records with the flag set (e.g. `"signed"`)
    pub on: &'static str,
    /// Toggle name showing records without the flag (e.g. `"unsigned"`)
    pub off: &'static str,
    /// Menu heading for the pair
    pub label: &'static str,
}

impl TogglePair {
    const fn new(flag: Flag, on: &'static str, off: &'static str, label: &'static str) -> Self {
        Self {
            flag,
            on,
            off,
            label,
        }
    }

    /// Whether `name` is one of the two members of this pair.
    pub fn owns(&self, name: &str) -> bool {
        self.on == name || self.off == name
    }
}

const SIGNED: TogglePair = TogglePair::new(Flag::Signed, "signed", "unsigned", "signature");
const STATUS: TogglePair = TogglePair::new(Flag::Closed, "closed", "open", "status");
const VOTED: TogglePair = TogglePair::new(Flag::Voted, "voted", "not_voted", "participation");

/// Per-domain adapter settings for the discovery engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainProfile {
    pub domain: Domain,
    pub page_size: usize,
    pub toggles: &'static [TogglePair],
    pub sort_keys: &'static [SortKey],
    pub default_sort: SortKey,
    pub missing_deadline: MissingDeadline,
}

impl DomainProfile {
    const fn new(domain: Domain, page_size: usize) -> Self {
        Self {
            domain,
            page_size,
            toggles: &[],
            sort_keys: &[SortKey::Newest],
            default_sort: SortKey::Newest,
            missing_deadline: MissingDeadline::AsEpoch,
        }
    }

    const fn toggles(mut self, toggles: &'static [TogglePair]) -> Self {
        self.toggles = toggles;
        self
    }

    const fn sort_keys(mut self, keys: &'static [SortKey]) -> Self {
        self.sort_keys = keys;
        self
    }

    /// Override the page size. Zero is normalized to one.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_missing_deadline(mut self, policy: MissingDeadline) -> Self {
        self.missing_deadline = policy;
        self
    }

    /// Every toggle name this domain exposes, in menu order.
    pub fn toggle_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.toggles.iter().flat_map(|pair| [pair.on, pair.off])
    }

    pub fn pair_for(&self, name: &str) -> Option<&'static TogglePair> {
        self.toggles.iter().find(|pair| pair.owns(name))
    }
}

/// Registry of all domain profiles with their compiled-in defaults.
pub const PROFILES: &[DomainProfile] = &[
    DomainProfile::new(Domain::Posts, 3),
    DomainProfile::new(Domain::Campaigns, 3)
        .toggles(&[SIGNED, STATUS])
        .sort_keys(&[
            SortKey::Newest,
            SortKey::MostSignatures,
            SortKey::NearestDeadline,
        ]),
    DomainProfile::new(Domain::Polls, 5)
        .toggles(&[STATUS, VOTED])
        .sort_keys(&[SortKey::Newest, SortKey::NearestDeadline, SortKey::MostVotes]),
];

/// Look up the default profile for a domain.
pub fn profile(domain: Domain) -> DomainProfile {
    PROFILES
        .iter()
        .copied()
        .find(|p| p.domain == domain)
        .unwrap_or(DomainProfile::new(domain, 1))
}
