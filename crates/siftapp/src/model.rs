//! # Domain Model: Posts, Campaigns and Polls
//!
//! This module defines the records the discovery engine lists: [`Post`], [`Campaign`]
//! and [`Poll`], plus the [`Domain`] they belong to and the [`ViewContext`] a browsing
//! session is mounted with.
//!
//! ## The Problem
//!
//! The remote API is loosely typed. Depending on the endpoint and the age of a record:
//! - ids come back as numbers or as strings,
//! - timestamps are RFC 3339, naive date-times, bare dates, `null`, or missing,
//! - counts are numbers, numeric strings, or missing,
//! - booleans such as `has_signed` are only present for authenticated viewers.
//!
//! A record with a broken field must still be listed. Decoding therefore never fails on
//! a single field: anything that cannot be understood decodes as "missing", and the
//! engine applies neutral defaults for missing values (epoch-zero timestamps, zero counts,
//! `false` flags).
//!
//! ## Pass-through Fields
//!
//! Each record keeps every field the engine does not know about in `extra`, so renderers
//! and the JSON output see the record exactly as fetched.
//!
//! ## Key Functions
//!
//! - [`parse_timestamp`]: lenient timestamp parsing shared by all records
//! - [`Domain`]: the three content domains and their wire names

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::attributes::{Flag, Listable};
use crate::error::SiftError;

/// The content domains the engine knows how to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Posts,
    Campaigns,
    Polls,
}

impl Domain {
    pub const ALL: [Domain; 3] = [Domain::Posts, Domain::Campaigns, Domain::Polls];

    /// The wire name, also used as the envelope key (`{"campaigns": [...]}`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Posts => "posts",
            Domain::Campaigns => "campaigns",
            Domain::Polls => "polls",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "posts" | "post" | "blog" => Ok(Domain::Posts),
            "campaigns" | "campaign" => Ok(Domain::Campaigns),
            "polls" | "poll" => Ok(Domain::Polls),
            other => Err(SiftError::Api(format!("Unknown domain: {}", other))),
        }
    }
}

/// Opaque record identifier. Numeric ids are kept in their decimal form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Default)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId(s.to_string())
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => ItemId(s),
            Value::Number(n) => ItemId(n.to_string()),
            Value::Null => ItemId::default(),
            other => ItemId(other.to_string()),
        })
    }
}

/// Explicit context a browsing session is mounted with.
///
/// The clock is read once, here, so that a recompute never consults ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewContext {
    pub now: DateTime<Utc>,
}

impl ViewContext {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn mounted_now() -> Self {
        Self::at(Utc::now())
    }
}

/// Parses the timestamp shapes the API is known to produce.
///
/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.fff]` (space separator too) and bare
/// `YYYY-MM-DD` (midnight UTC). Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// True when a deadline exists and has already passed.
pub fn is_closed(deadline: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    deadline.is_some_and(|d| d < now)
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => parse_timestamp(&s),
        _ => None,
    })
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_i64().is_some_and(|n| n != 0),
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_category<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => vec![s],
        _ => Vec::new(),
    })
}

fn non_empty(category: &Option<String>) -> Option<&str> {
    category.as_deref().filter(|c| !c.is_empty())
}

/// A blog post.
///
/// Older post payloads carry `date` instead of `created_at`; it is used when `created_at`
/// is missing or unreadable and is otherwise kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(from = "PostPayload")]
pub struct Post {
    pub id: ItemId,
    pub title: String,
    pub excerpt: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
struct PostPayload {
    #[serde(default)]
    id: ItemId,
    #[serde(default, deserialize_with = "lenient_string")]
    title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    excerpt: String,
    #[serde(default, deserialize_with = "lenient_category")]
    category: Option<String>,
    #[serde(default, deserialize_with = "lenient_tags")]
    tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<PostPayload> for Post {
    fn from(payload: PostPayload) -> Self {
        let created_at = payload.created_at.or_else(|| {
            payload
                .extra
                .get("date")
                .and_then(Value::as_str)
                .and_then(parse_timestamp)
        });
        Post {
            id: payload.id,
            title: payload.title,
            excerpt: payload.excerpt,
            category: payload.category,
            tags: payload.tags,
            created_at,
            extra: payload.extra,
        }
    }
}

/// A petition-style campaign users can sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Campaign {
    #[serde(default)]
    pub id: ItemId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub excerpt: String,
    #[serde(default, deserialize_with = "lenient_category")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub signature_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub has_signed: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A poll users can vote in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Poll {
    #[serde(default)]
    pub id: ItemId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_category")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_votes: Option<u64>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub has_voted: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Campaign {
    pub fn is_closed(&self, now: DateTime<Utc>) -> bool {
        is_closed(self.deadline, now)
    }
}

impl Poll {
    pub fn is_closed(&self, now: DateTime<Utc>) -> bool {
        is_closed(self.deadline, now)
    }
}

impl Listable for Post {
    const DOMAIN: Domain = Domain::Posts;

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn category(&self) -> Option<&str> {
        non_empty(&self.category)
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.excerpt.as_str()];
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn flag(&self, _flag: Flag, _ctx: &ViewContext) -> bool {
        false
    }
}

impl Listable for Campaign {
    const DOMAIN: Domain = Domain::Campaigns;

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn category(&self) -> Option<&str> {
        non_empty(&self.category)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.excerpt.as_str()]
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    fn signature_count(&self) -> Option<u64> {
        self.signature_count
    }

    fn flag(&self, flag: Flag, ctx: &ViewContext) -> bool {
        match flag {
            Flag::Signed => self.has_signed,
            Flag::Closed => self.is_closed(ctx.now),
            Flag::Voted => false,
        }
    }
}

impl Listable for Poll {
    const DOMAIN: Domain = Domain::Polls;

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn category(&self) -> Option<&str> {
        non_empty(&self.category)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    fn total_votes(&self) -> Option<u64> {
        self.total_votes
    }

    fn flag(&self, flag: Flag, ctx: &ViewContext) -> bool {
        match flag {
            Flag::Voted => self.has_voted,
            Flag::Closed => self.is_closed(ctx.now),
            Flag::Signed => false,
        }
    }
}
