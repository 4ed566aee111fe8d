//! Page URL to route.

use std::collections::HashMap;

use fecview_core::{Board, Bucket, Category, Party};
use url::Url;

use crate::ComposeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Search { q: String },
    Rankings { year: String, board: Board },
    RankingsList { year: String, board: Board, party: Party },
    Totals { year: String, category: Category },
    Entity { year: String, bucket: Bucket, id: String },
}

impl Route {
    /// Select a page from its path and parse the query parameters it needs.
    ///
    /// The trailing slash is optional and unrelated parameters are ignored.
    pub fn from_url(url: &Url) -> Result<Self, ComposeError> {
        let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
        let get = |name| param(&params, name);

        let route = match url.path().trim_end_matches('/') {
            "" => Route::Home,
            // An empty query is still a query; the service decides what it means.
            "/search-results" => Route::Search {
                q: get("q")?.to_string(),
            },
            "/rankings" => Route::Rankings {
                year: get("year")?.to_string(),
                board: Board::from_key(get("category")?)?,
            },
            "/rankings-list" => Route::RankingsList {
                year: get("year")?.to_string(),
                board: Board::new(get("bucket")?.parse()?, get("category")?.parse()?)?,
                party: get("party")?.parse()?,
            },
            "/totals" => Route::Totals {
                year: get("year")?.to_string(),
                category: get("category")?.parse()?,
            },
            "/view-object" => Route::Entity {
                year: get("year")?.to_string(),
                bucket: get("bucket")?.parse()?,
                id: get("id")?.to_string(),
            },
            other => return Err(ComposeError::UnknownRoute(other.to_string())),
        };
        Ok(route)
    }
}

fn param<'a>(params: &'a HashMap<String, String>, name: &'static str) -> Result<&'a str, ComposeError> {
    params
        .get(name)
        .map(String::as_str)
        .ok_or(ComposeError::MissingParameter(name))
}
