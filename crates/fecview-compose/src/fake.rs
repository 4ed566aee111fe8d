//! Scripted in-memory view service for composer tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use fecview_client::proto::*;
use fecview_client::service::Result;
use fecview_client::{ServiceError, ViewService};
use fecview_core::{Bucket, Category, RankingItem, ResolvedRecord, YearTotal};

pub(crate) fn record(id: &str, bucket: Bucket, name: &str) -> ResolvedRecord {
    ResolvedRecord {
        id: id.to_string(),
        bucket,
        name: name.to_string(),
        city: "SPRINGFIELD".to_string(),
        state: "IL".to_string(),
        employer: None,
    }
}

pub(crate) fn ranking_item(id: &str, amount: f64) -> RankingItem {
    RankingItem {
        id: id.to_string(),
        name: format!("NAME {id}"),
        city: "SPRINGFIELD".to_string(),
        state: "IL".to_string(),
        amount,
    }
}

#[derive(Default)]
pub(crate) struct FakeService {
    records: HashMap<String, ResolvedRecord>,
    rankings: HashMap<String, Vec<RankingItem>>,
    totals: HashMap<String, Vec<YearTotal>>,
    searches: HashMap<String, SearchResponse>,
    too_broad: HashSet<String>,
    individual: Option<IndividualResponse>,
    committee: Option<CommitteeResponse>,
    candidate: Option<CandidateResponse>,
    failing: HashSet<&'static str>,
    failing_rankings: HashSet<String>,
    poisoned_ids: HashSet<String>,
    lookups: Mutex<Vec<Vec<String>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeService {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_record(mut self, record: ResolvedRecord) -> Self {
        self.records.insert(record.id.clone(), record);
        self
    }

    /// Rankings keyed the way the request spells them, e.g. party `DEM-pre`.
    pub(crate) fn with_rankings(
        mut self,
        year: &str,
        bucket: Bucket,
        category: Category,
        party: &str,
        items: Vec<RankingItem>,
    ) -> Self {
        self.rankings
            .insert(rankings_key(year, bucket, category, party), items);
        self
    }

    pub(crate) fn with_totals(mut self, year: &str, category: Category, rows: Vec<YearTotal>) -> Self {
        self.totals.insert(format!("{year}-{category}"), rows);
        self
    }

    pub(crate) fn with_search(mut self, text: &str, resp: SearchResponse) -> Self {
        self.searches.insert(text.to_string(), resp);
        self
    }

    /// Reject `text` the way the HTTP transport reports an over-broad query.
    pub(crate) fn too_broad(mut self, text: &str) -> Self {
        self.too_broad.insert(text.to_string());
        self
    }

    pub(crate) fn with_individual(mut self, resp: IndividualResponse) -> Self {
        self.individual = Some(resp);
        self
    }

    pub(crate) fn with_committee(mut self, resp: CommitteeResponse) -> Self {
        self.committee = Some(resp);
        self
    }

    pub(crate) fn with_candidate(mut self, resp: CandidateResponse) -> Self {
        self.candidate = Some(resp);
        self
    }

    /// Make every call to `op` fail with `Unavailable`.
    pub(crate) fn failing(mut self, op: &'static str) -> Self {
        self.failing.insert(op);
        self
    }

    /// Fail only the rankings request spelled `key`, e.g. `2020-individuals-donor-DEM-pre`.
    pub(crate) fn failing_rankings(mut self, key: &str) -> Self {
        self.failing_rankings.insert(key.to_string());
        self
    }

    /// Fail any lookup batch that asks for `id`.
    pub(crate) fn poison_lookup(mut self, id: &str) -> Self {
        self.poisoned_ids.insert(id.to_string());
        self
    }

    /// Every lookup batch received, ids as sent.
    pub(crate) fn lookups(&self) -> Vec<Vec<String>> {
        self.lookups.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Every operation received, with its salient parameter.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record_call(&self, op: &'static str, detail: &str) -> Result<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(format!("{op}:{detail}"));
        }
        if self.failing.contains(op) {
            return Err(ServiceError::Unavailable(format!("{op} is down")));
        }
        Ok(())
    }
}

fn rankings_key(year: &str, bucket: Bucket, category: Category, party: &str) -> String {
    format!("{year}-{bucket}-{category}-{party}")
}

fn not_found() -> ServiceError {
    ServiceError::Server {
        status: 404,
        body: "not found".to_string(),
    }
}

#[async_trait]
impl ViewService for FakeService {
    async fn search_query(&self, req: SearchRequest) -> Result<SearchResponse> {
        self.record_call("search_query", &req.text)?;
        if self.too_broad.contains(&req.text) {
            return Err(ServiceError::QueryTooBroad);
        }
        Ok(self.searches.get(&req.text).cloned().unwrap_or(SearchResponse {
            msg: SearchStatus::NoResults,
            results: Vec::new(),
        }))
    }

    async fn view_rankings(&self, req: RankingsRequest) -> Result<RankingsResponse> {
        let key = rankings_key(&req.year, req.bucket, req.category, &req.party);
        self.record_call("view_rankings", &key)?;
        if self.failing_rankings.contains(&key) {
            return Err(ServiceError::Unavailable(format!("rankings {key} is down")));
        }
        Ok(RankingsResponse {
            ranking_list: self.rankings.get(&key).cloned().unwrap_or_default(),
        })
    }

    async fn view_yr_totals(&self, req: YrTotalRequest) -> Result<YrTotalResponse> {
        let key = format!("{}-{}", req.year, req.category);
        self.record_call("view_yr_totals", &key)?;
        Ok(YrTotalResponse {
            per_party: self.totals.get(&key).cloned().unwrap_or_default(),
        })
    }

    async fn view_individual(&self, req: EntityRequest) -> Result<IndividualResponse> {
        self.record_call("view_individual", &req.object_id)?;
        self.individual.clone().ok_or_else(not_found)
    }

    async fn view_committee(&self, req: EntityRequest) -> Result<CommitteeResponse> {
        self.record_call("view_committee", &req.object_id)?;
        self.committee.clone().ok_or_else(not_found)
    }

    async fn view_candidate(&self, req: EntityRequest) -> Result<CandidateResponse> {
        self.record_call("view_candidate", &req.object_id)?;
        self.candidate.clone().ok_or_else(not_found)
    }

    async fn lookup_obj_by_id(&self, req: LookupRequest) -> Result<LookupResponse> {
        self.record_call("lookup_obj_by_id", &req.object_ids.join(","))?;
        if let Ok(mut lookups) = self.lookups.lock() {
            lookups.push(req.object_ids.clone());
        }
        if req.object_ids.iter().any(|id| self.poisoned_ids.contains(id)) {
            return Err(ServiceError::Unavailable("lookup batch failed".to_string()));
        }
        // Reverse to exercise callers that must not rely on response order.
        let results = req
            .object_ids
            .iter()
            .rev()
            .filter_map(|id| self.records.get(id).cloned())
            .collect();
        Ok(LookupResponse { results })
    }
}
