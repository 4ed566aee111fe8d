//! Batched id → display record resolution.

use std::collections::{BTreeSet, HashMap};

use fecview_client::ViewService;
use fecview_client::proto::LookupRequest;
use fecview_client::service::Result;
use fecview_core::ResolvedRecord;
use tracing::debug;

/// Resolves a set of opaque ids in a single lookup round trip.
pub struct LookupResolver<'a> {
    service: &'a dyn ViewService,
}

impl<'a> LookupResolver<'a> {
    pub fn new(service: &'a dyn ViewService) -> Self {
        Self { service }
    }

    /// Resolve `ids`, deduplicated, with one request.
    ///
    /// The returned map only holds ids the service recognised; unknown ids
    /// are left out rather than reported. An empty input resolves to an
    /// empty map without touching the service. A transport failure fails
    /// the whole batch.
    pub async fn resolve(&self, ids: &[&str]) -> Result<HashMap<String, ResolvedRecord>> {
        let unique: BTreeSet<&str> = ids.iter().copied().collect();
        if unique.is_empty() {
            return Ok(HashMap::new());
        }

        let req = LookupRequest {
            object_ids: unique.iter().map(|id| id.to_string()).collect(),
        };
        let resp = self.service.lookup_obj_by_id(req).await?;

        let resolved: HashMap<String, ResolvedRecord> = resp
            .results
            .into_iter()
            .filter(|record| unique.contains(record.id.as_str()))
            .map(|record| (record.id.clone(), record))
            .collect();

        debug!(
            requested = unique.len(),
            resolved = resolved.len(),
            "lookup batch resolved"
        );
        Ok(resolved)
    }
}
