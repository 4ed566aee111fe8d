//! Request and response messages for each view service operation.
//!
//! The caller identifier is not part of these bodies; transports stamp it
//! on every outgoing request.

use serde::{Deserialize, Serialize};

use fecview_core::{
    Bucket, Candidate, Category, Committee, CommitteeTxData, Individual, RankingItem,
    ResolvedRecord, SearchResultItem, YearTotal,
};

// ── Search ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchStatus {
    Ok,
    NoResults,
    TooBroad,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub msg: SearchStatus,
    #[serde(default)]
    pub results: Vec<SearchResultItem>,
}

// ── Rankings ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingsRequest {
    pub year: String,
    pub bucket: Bucket,
    pub category: Category,
    /// Party code, suffixed with `-pre` for the preview list.
    pub party: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingsResponse {
    #[serde(default)]
    pub ranking_list: Vec<RankingItem>,
}

// ── Yearly totals ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YrTotalRequest {
    pub year: String,
    pub category: Category,
    pub party: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YrTotalResponse {
    #[serde(default)]
    pub per_party: Vec<YearTotal>,
}

// ── Entity views ──

/// Shared request shape for individual, committee, and candidate views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRequest {
    pub object_id: String,
    pub bucket: Bucket,
    pub years: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualResponse {
    pub individual: Individual,
    pub bucket: Bucket,
    #[serde(default)]
    pub years: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitteeResponse {
    pub committee: Committee,
    #[serde(default)]
    pub tx_data: CommitteeTxData,
    pub bucket: Bucket,
    #[serde(default)]
    pub years: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateResponse {
    pub candidate: Candidate,
    pub bucket: Bucket,
    #[serde(default)]
    pub years: Vec<String>,
}

// ── Lookup ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupRequest {
    pub object_ids: Vec<String>,
}

/// Resolved records; order is not guaranteed to match the request and ids
/// the service does not recognise are simply absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupResponse {
    #[serde(default)]
    pub results: Vec<ResolvedRecord>,
}
