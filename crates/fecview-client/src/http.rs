//! HTTP/JSON transport for the view service.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::ServiceConfig;
use crate::proto::*;
use crate::service::{Result, ServiceError, ViewService};

/// Body the service sends back when a search query is rejected as too broad.
const TOO_BROAD_MARKER: &str = "MAX_LENGTH";

/// Request body with the caller identifier stamped alongside the message.
#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    uid: &'a str,
    #[serde(flatten)]
    body: &'a T,
}

/// View service client speaking JSON over HTTP POST, one route per operation.
pub struct HttpViewClient {
    client: reqwest::Client,
    base_url: String,
    uid: String,
}

impl HttpViewClient {
    /// Create a client for the configured service.
    ///
    /// `service_url` should be like `http://localhost:8080`; a trailing
    /// slash is tolerated.
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.service_url.trim_end_matches('/').to_string(),
            uid: config.uid.clone(),
        }
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/proto.View/{}", self.base_url, method)
    }

    async fn call<Req, Resp>(&self, method: &str, req: &Req) -> Result<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = self.endpoint(method);
        debug!(url = %url, "calling view service");

        let envelope = Envelope {
            uid: &self.uid,
            body: req,
        };
        let resp = self.client.post(&url).json(&envelope).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(classify_failure(status.as_u16(), body));
        }

        let bytes = resp.bytes().await?;
        let parsed = serde_json::from_slice(&bytes)?;
        Ok(parsed)
    }
}

fn classify_failure(status: u16, body: String) -> ServiceError {
    if body.trim() == TOO_BROAD_MARKER {
        ServiceError::QueryTooBroad
    } else {
        ServiceError::Server { status, body }
    }
}

#[async_trait]
impl ViewService for HttpViewClient {
    async fn search_query(&self, req: SearchRequest) -> Result<SearchResponse> {
        info!(text = %req.text, "search query");
        self.call("SearchQuery", &req).await
    }

    async fn view_rankings(&self, req: RankingsRequest) -> Result<RankingsResponse> {
        info!(
            year = %req.year,
            bucket = %req.bucket,
            category = %req.category,
            party = %req.party,
            "view rankings"
        );
        self.call("ViewRankings", &req).await
    }

    async fn view_yr_totals(&self, req: YrTotalRequest) -> Result<YrTotalResponse> {
        info!(year = %req.year, category = %req.category, "view yearly totals");
        self.call("ViewYrTotals", &req).await
    }

    async fn view_individual(&self, req: EntityRequest) -> Result<IndividualResponse> {
        info!(id = %req.object_id, "view individual");
        self.call("ViewIndividual", &req).await
    }

    async fn view_committee(&self, req: EntityRequest) -> Result<CommitteeResponse> {
        info!(id = %req.object_id, "view committee");
        self.call("ViewCommittee", &req).await
    }

    async fn view_candidate(&self, req: EntityRequest) -> Result<CandidateResponse> {
        info!(id = %req.object_id, "view candidate");
        self.call("ViewCandidate", &req).await
    }

    async fn lookup_obj_by_id(&self, req: LookupRequest) -> Result<LookupResponse> {
        debug!(count = req.object_ids.len(), "lookup by id");
        self.call("LookupObjByID", &req).await
    }
}
