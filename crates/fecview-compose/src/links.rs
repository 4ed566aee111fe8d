//! Deep links into the entity and full-list pages.

use serde::Serialize;
use url::Url;

use fecview_core::{Board, Bucket, Party};

use crate::ComposeError;

/// A year an entity has data for, linked to that year's snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearLink {
    pub year: String,
    pub href: String,
}

#[derive(Debug, Clone)]
pub struct LinkBuilder {
    base: Url,
}

impl LinkBuilder {
    pub fn new(base: Url) -> Result<Self, ComposeError> {
        if base.cannot_be_a_base() {
            return Err(ComposeError::InvalidLinkBase(base.to_string()));
        }
        Ok(Self { base })
    }

    /// `{base}/view-object/?year=..&bucket=..&id=..`
    pub fn view_object(&self, year: &str, bucket: Bucket, id: &str) -> String {
        self.page(
            "view-object",
            &[("year", year), ("bucket", bucket.as_str()), ("id", id)],
        )
    }

    /// `{base}/rankings-list/?year=..&bucket=..&category=..&party=..`
    pub fn rankings_list(&self, year: &str, board: Board, party: Party) -> String {
        self.page(
            "rankings-list",
            &[
                ("year", year),
                ("bucket", board.bucket().as_str()),
                ("category", board.category().as_str()),
                ("party", party.code()),
            ],
        )
    }

    /// One link per year, in the order the service listed them.
    pub fn year_links(&self, years: &[String], bucket: Bucket, id: &str) -> Vec<YearLink> {
        years
            .iter()
            .map(|year| YearLink {
                year: year.clone(),
                href: self.view_object(year, bucket, id),
            })
            .collect()
    }

    fn page(&self, name: &str, params: &[(&str, &str)]) -> String {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(name).push("");
        }
        url.query_pairs_mut().clear().extend_pairs(params);
        url.to_string()
    }
}
