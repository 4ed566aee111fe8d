//! The `ViewService` trait: the only seam between composition and transport.
//!
//! Composers hold an `Arc<dyn ViewService>` handed to them at construction,
//! so tests substitute an in-memory service per composer.

use async_trait::async_trait;
use thiserror::Error;

use crate::proto::*;

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The query matched more entities than the service is willing to return.
    #[error("query too broad")]
    QueryTooBroad,

    #[error("service unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait ViewService: Send + Sync {
    async fn search_query(&self, req: SearchRequest) -> Result<SearchResponse>;

    async fn view_rankings(&self, req: RankingsRequest) -> Result<RankingsResponse>;

    async fn view_yr_totals(&self, req: YrTotalRequest) -> Result<YrTotalResponse>;

    async fn view_individual(&self, req: EntityRequest) -> Result<IndividualResponse>;

    async fn view_committee(&self, req: EntityRequest) -> Result<CommitteeResponse>;

    async fn view_candidate(&self, req: EntityRequest) -> Result<CandidateResponse>;

    /// Resolve a batch of ids in one round trip. Unknown ids are omitted
    /// from the response rather than reported as errors.
    async fn lookup_obj_by_id(&self, req: LookupRequest) -> Result<LookupResponse>;
}
