//! Records exchanged with the view service and the enriched rows built from them.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::vocab::{Bucket, Party};

/// Transaction count per counterparty id. Unordered, lookup only.
pub type TransactionCounts = HashMap<String, u64>;

/// Total moved to or from one counterparty.
///
/// Amount lists arrive sorted by `total` descending; that order is the
/// display order and is never recomputed on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountRecord {
    pub id: String,
    pub total: f64,
}

/// Display record for an id, as returned by the batched lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRecord {
    pub id: String,
    pub bucket: Bucket,
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub employer: Option<String>,
}

impl ResolvedRecord {
    /// `"Name - City, ST"`, or `"Name - Employer - City, ST"` for individuals
    /// with a known employer.
    pub fn display_line(&self) -> String {
        match (&self.employer, self.bucket) {
            (Some(employer), Bucket::Individuals) => {
                format!("{} - {} - {}, {}", self.name, employer, self.city, self.state)
            }
            _ => format!("{} - {}, {}", self.name, self.city, self.state),
        }
    }
}

/// A counterparty joined with its resolved record and derived average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedCounterparty {
    /// 1-based position among the emitted rows.
    pub rank: usize,
    pub resolved: ResolvedRecord,
    pub total: f64,
    pub tx_count: u64,
    pub average: f64,
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    pub amount: f64,
}

/// One free-text search hit with the years it has data for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub id: String,
    pub bucket: Bucket,
    pub name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub employer: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub years: Vec<String>,
}

impl SearchResultItem {
    /// Employer is shown for individuals only.
    pub fn display_line(&self) -> String {
        match (&self.employer, self.bucket) {
            (Some(employer), Bucket::Individuals) => {
                format!("{} - {} - {}, {}", self.name, employer, self.city, self.state)
            }
            _ => format!("{} - {}, {}", self.name, self.city, self.state),
        }
    }
}

/// Per-party total for one year and category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearTotal {
    pub party: Party,
    pub total: f64,
}

/// The service encodes absent text as `""`; decode that as `None`.
pub(crate) fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
