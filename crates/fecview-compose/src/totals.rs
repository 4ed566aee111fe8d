//! Per-party yearly totals for one money-flow category.

use std::sync::Arc;

use fecview_client::ViewService;
use fecview_client::proto::YrTotalRequest;
use fecview_client::service::Result;
use fecview_core::{Category, Party};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalRow {
    pub rank: usize,
    pub party: Party,
    pub label: &'static str,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearTotalsView {
    /// `"{year} - {category label}"`.
    pub heading: String,
    pub rows: Vec<TotalRow>,
}

pub struct YearTotalsComposer {
    service: Arc<dyn ViewService>,
}

impl YearTotalsComposer {
    pub fn new(service: Arc<dyn ViewService>) -> Self {
        Self { service }
    }

    pub async fn compose(&self, year: &str, category: Category) -> Result<YearTotalsView> {
        let req = YrTotalRequest {
            year: year.to_string(),
            category,
            party: Party::All.code().to_string(),
        };
        let resp = self.service.view_yr_totals(req).await?;

        let rows = resp
            .per_party
            .into_iter()
            .enumerate()
            .map(|(idx, row)| TotalRow {
                rank: idx + 1,
                party: row.party,
                label: row.party.label(),
                total: row.total,
            })
            .collect();

        Ok(YearTotalsView {
            heading: format!("{} - {}", year, category.totals_label()),
            rows,
        })
    }
}
