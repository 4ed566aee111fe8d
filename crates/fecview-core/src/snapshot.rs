//! Single-year entity snapshots as returned by the entity view endpoints.
//!
//! Each snapshot splits into a summary (rendered as-is) and the raw
//! counterparty amount lists and transaction-count maps that the client
//! still has to resolve and join.

use serde::{Deserialize, Serialize};

use crate::model::{AmountRecord, TransactionCounts, empty_as_none};

// ── Individual ──

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndividualSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub occupation: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub employer: Option<String>,
    #[serde(default)]
    pub total_out_amt: f64,
    #[serde(default)]
    pub total_out_txs: u64,
    #[serde(default)]
    pub avg_tx_out: f64,
    #[serde(default)]
    pub total_in_amt: f64,
    #[serde(default)]
    pub total_in_txs: u64,
    #[serde(default)]
    pub avg_tx_in: f64,
    #[serde(default)]
    pub net_balance: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    #[serde(flatten)]
    pub summary: IndividualSummary,
    /// Committees that returned or refunded funds to this individual.
    #[serde(default)]
    pub senders_amt: Vec<AmountRecord>,
    #[serde(default)]
    pub senders_txs: TransactionCounts,
    /// Committees this individual contributed to.
    #[serde(default)]
    pub recipients_amt: Vec<AmountRecord>,
    #[serde(default)]
    pub recipients_txs: TransactionCounts,
}

// ── Committee ──

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Committee {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub tres_name: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub designation: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", rename = "type")]
    pub cmte_type: Option<String>,
    #[serde(default)]
    pub party: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub connected_org: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub cand_id: Option<String>,
}

/// Cash-flow totals for one committee-year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitteeTxSummary {
    pub contributions_in_amt: f64,
    pub contributions_in_txs: u64,
    pub avg_contribution_in: f64,
    pub other_receipts_in_amt: f64,
    pub other_receipts_in_txs: u64,
    pub avg_other_in: f64,
    pub total_incoming_amt: f64,
    pub total_incoming_txs: u64,
    pub avg_incoming: f64,
    pub transfers_amt: f64,
    pub transfers_txs: u64,
    pub avg_transfer: f64,
    pub expenditures_amt: f64,
    pub expenditures_txs: u64,
    pub avg_expenditure: f64,
    pub total_outgoing_amt: f64,
    pub total_outgoing_txs: u64,
    pub avg_outgoing: f64,
    pub net_balance: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommitteeTxData {
    #[serde(flatten)]
    pub summary: CommitteeTxSummary,
    #[serde(default)]
    pub top_indv_contributors_amt: Vec<AmountRecord>,
    #[serde(default)]
    pub top_indv_contributors_txs: TransactionCounts,
    #[serde(default)]
    pub top_cmte_org_contributors_amt: Vec<AmountRecord>,
    #[serde(default)]
    pub top_cmte_org_contributors_txs: TransactionCounts,
    #[serde(default)]
    pub transfer_recs_amt: Vec<AmountRecord>,
    #[serde(default)]
    pub transfer_recs_txs: TransactionCounts,
    #[serde(default)]
    pub top_exp_recipients_amt: Vec<AmountRecord>,
    #[serde(default)]
    pub top_exp_recipients_txs: TransactionCounts,
}

// ── Candidate ──

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub party: String,
    #[serde(default)]
    pub office: String,
    /// Principal campaign committee id.
    #[serde(default)]
    pub pcc: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub total_direct_in_amt: f64,
    #[serde(default)]
    pub total_direct_in_txs: u64,
    #[serde(default)]
    pub avg_direct_in: f64,
    #[serde(default)]
    pub total_direct_out_amt: f64,
    #[serde(default)]
    pub total_direct_out_txs: u64,
    #[serde(default)]
    pub avg_direct_out: f64,
    #[serde(default)]
    pub net_balance_direct_tx: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(flatten)]
    pub summary: CandidateSummary,
    #[serde(default)]
    pub direct_senders_amts: Vec<AmountRecord>,
    #[serde(default)]
    pub direct_senders_txs: TransactionCounts,
    #[serde(default)]
    pub direct_recipients_amts: Vec<AmountRecord>,
    #[serde(default)]
    pub direct_recipients_txs: TransactionCounts,
}
