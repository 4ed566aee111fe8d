//! Counterparty join: amount list + transaction counts + resolved records.
//!
//! The amount list is the only source of iteration order and rank. The
//! joiner never sorts; it walks the list once, drops rows it cannot render,
//! and numbers the survivors 1, 2, 3, ...

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use fecview_core::{AmountRecord, EnrichedCounterparty, ResolvedRecord, TransactionCounts};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, warn};

/// What to do with a counterparty that has an amount but no usable
/// transaction count (absent, or zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingCountPolicy {
    /// Fail the whole list so the gap is visible.
    #[default]
    Fail,
    /// Skip the row and keep going.
    Drop,
}

impl FromStr for MissingCountPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fail" => Ok(MissingCountPolicy::Fail),
            "drop" => Ok(MissingCountPolicy::Drop),
            other => Err(format!("unknown missing-count policy: {other}")),
        }
    }
}

impl fmt::Display for MissingCountPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingCountPolicy::Fail => f.write_str("fail"),
            MissingCountPolicy::Drop => f.write_str("drop"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error("no transaction count for counterparty {id}")]
    MissingTransactionCount { id: String },
}

/// Join one counterparty role's amounts with its counts and resolutions.
///
/// Rows whose id did not resolve are skipped (never rendered with
/// placeholder data). Rows whose count is missing or zero follow `policy`.
/// Emitted rows keep the amount list's relative order and carry a
/// contiguous 1-based rank over emitted rows only.
pub fn join(
    amounts: &[AmountRecord],
    counts: &TransactionCounts,
    resolved: &HashMap<String, ResolvedRecord>,
    policy: MissingCountPolicy,
) -> Result<Vec<EnrichedCounterparty>, JoinError> {
    let mut out = Vec::with_capacity(amounts.len());

    for amount in amounts {
        let Some(record) = resolved.get(&amount.id) else {
            debug!(id = %amount.id, "dropping unresolved counterparty");
            continue;
        };

        let tx_count = match counts.get(&amount.id).copied() {
            Some(n) if n > 0 => n,
            _ => match policy {
                MissingCountPolicy::Fail => {
                    error!(id = %amount.id, "counterparty has no transaction count");
                    return Err(JoinError::MissingTransactionCount {
                        id: amount.id.clone(),
                    });
                }
                MissingCountPolicy::Drop => {
                    warn!(id = %amount.id, "dropping counterparty without transaction count");
                    continue;
                }
            },
        };

        out.push(EnrichedCounterparty {
            rank: out.len() + 1,
            resolved: record.clone(),
            total: amount.total,
            tx_count,
            average: amount.total / tx_count as f64,
        });
    }

    Ok(out)
}
