//! Free-text search classification.

use std::sync::Arc;

use fecview_client::proto::{SearchRequest, SearchStatus};
use fecview_client::service::Result;
use fecview_client::{ServiceError, ViewService};
use fecview_core::{Bucket, SearchResultItem};
use serde::Serialize;
use tracing::info;

use crate::links::{LinkBuilder, YearLink};

pub const NO_RESULTS_MESSAGE: &str =
    "No results found! Please use the search bar above to try again.";

pub const TOO_BROAD_MESSAGE: &str = "Too many results! Please refine your search by adding one or more search terms and use the search bar above to try again.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub rank: usize,
    pub id: String,
    pub bucket: Bucket,
    pub name: String,
    /// `"Name - City, ST"`, with employer for individuals.
    pub line: String,
    pub years: Vec<YearLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchResultSet {
    Results { hits: Vec<SearchHit> },
    Empty,
    TooBroad,
}

impl SearchResultSet {
    /// User-facing message for the two non-result outcomes.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            SearchResultSet::Results { .. } => None,
            SearchResultSet::Empty => Some(NO_RESULTS_MESSAGE),
            SearchResultSet::TooBroad => Some(TOO_BROAD_MESSAGE),
        }
    }
}

pub struct SearchComposer {
    service: Arc<dyn ViewService>,
    links: LinkBuilder,
}

impl SearchComposer {
    pub fn new(service: Arc<dyn ViewService>, links: LinkBuilder) -> Self {
        Self { service, links }
    }

    /// Run `query` as given; length and complexity limits belong to the service.
    pub async fn search(&self, query: &str) -> Result<SearchResultSet> {
        let req = SearchRequest {
            text: query.to_string(),
        };
        let resp = match self.service.search_query(req).await {
            Ok(resp) => resp,
            Err(ServiceError::QueryTooBroad) => {
                info!(query, "search rejected as too broad");
                return Ok(SearchResultSet::TooBroad);
            }
            Err(err) => return Err(err),
        };

        let set = match resp.msg {
            SearchStatus::TooBroad => SearchResultSet::TooBroad,
            SearchStatus::NoResults => SearchResultSet::Empty,
            SearchStatus::Ok if resp.results.is_empty() => SearchResultSet::Empty,
            SearchStatus::Ok => SearchResultSet::Results {
                hits: self.hits(resp.results),
            },
        };
        Ok(set)
    }

    fn hits(&self, items: Vec<SearchResultItem>) -> Vec<SearchHit> {
        items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| SearchHit {
                rank: idx + 1,
                line: item.display_line(),
                years: self.links.year_links(&item.years, item.bucket, &item.id),
                id: item.id,
                bucket: item.bucket,
                name: item.name,
            })
            .collect()
    }
}
