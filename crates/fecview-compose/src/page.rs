//! Route-driven page composition with stale-result protection.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use fecview_client::ViewService;
use fecview_core::Board;
use serde::Serialize;
use tracing::{debug, error, info};
use url::Url;

use crate::ComposeError;
use crate::entity::{EntityView, EntityViewComposer};
use crate::joiner::MissingCountPolicy;
use crate::links::LinkBuilder;
use crate::rankings::{PREVIEW_LEN, Panel, RankingSegment, RankingsComposer};
use crate::route::Route;
use crate::search::{SearchComposer, SearchResultSet};
use crate::section::Section;
use crate::totals::{YearTotalsComposer, YearTotalsView};

pub const DEFAULT_LINK_BASE: &str = "http://localhost:8081";
pub const DEFAULT_HOME_YEAR: &str = "2020";

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root the generated page links hang off.
    pub link_base: String,
    pub preview_len: usize,
    /// Year of the two home-page leaderboards.
    pub home_year: String,
    pub missing_counts: MissingCountPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            link_base: DEFAULT_LINK_BASE.to_string(),
            preview_len: PREVIEW_LEN,
            home_year: DEFAULT_HOME_YEAR.to_string(),
            missing_counts: MissingCountPolicy::default(),
        }
    }
}

// ── Generations ──

/// Hands out one token per navigation. Starting a navigation supersedes
/// every token issued before it.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    current: Arc<AtomicU64>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> GenerationToken {
        let generation = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        GenerationToken {
            generation,
            current: Arc::clone(&self.current),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationToken {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl GenerationToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// False once a later navigation has begun.
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }
}

// ── Views ──

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageView {
    Home {
        year: String,
        panels: Vec<Panel>,
    },
    Rankings {
        year: String,
        board: Board,
        title: String,
        panels: Vec<Panel>,
    },
    RankingsList {
        title: String,
        content: Section<RankingSegment>,
    },
    Totals(YearTotalsView),
    Search {
        query: String,
        results: SearchResultSet,
    },
    Entity(EntityView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum PageOutcome {
    Rendered(PageView),
    Failed { reason: String },
    /// Finished after a newer navigation began; must not be applied.
    Stale,
}

// ── Pipeline ──

pub struct Pipeline {
    home_year: String,
    rankings: RankingsComposer,
    totals: YearTotalsComposer,
    entities: EntityViewComposer,
    search: SearchComposer,
}

impl Pipeline {
    pub fn new(service: Arc<dyn ViewService>, config: PipelineConfig) -> Result<Self, ComposeError> {
        // A zero-length preview would hide every dashboard panel.
        if config.preview_len == 0 {
            return Err(ComposeError::ZeroPreviewLen);
        }
        let base = Url::parse(&config.link_base)
            .map_err(|_| ComposeError::InvalidLinkBase(config.link_base.clone()))?;
        let links = LinkBuilder::new(base)?;

        Ok(Self {
            rankings: RankingsComposer::new(service.clone(), links.clone(), config.preview_len),
            totals: YearTotalsComposer::new(service.clone()),
            entities: EntityViewComposer::new(service.clone(), links.clone(), config.missing_counts),
            search: SearchComposer::new(service, links),
            home_year: config.home_year,
        })
    }

    pub async fn compose(&self, route: &Route) -> Result<PageView, ComposeError> {
        let view = match route {
            Route::Home => PageView::Home {
                year: self.home_year.clone(),
                panels: self.rankings.home_page(&self.home_year).await,
            },
            Route::Search { q } => PageView::Search {
                query: q.clone(),
                results: self.search.search(q).await?,
            },
            Route::Rankings { year, board } => PageView::Rankings {
                year: year.clone(),
                board: *board,
                title: format!("{} - {}", year, board.title()),
                panels: self.rankings.category_page(year, *board).await,
            },
            Route::RankingsList { year, board, party } => PageView::RankingsList {
                title: board.segment_title(year, *party),
                content: self.rankings.compose_full(year, *board, *party).await?,
            },
            Route::Totals { year, category } => {
                PageView::Totals(self.totals.compose(year, *category).await?)
            }
            Route::Entity { year, bucket, id } => {
                PageView::Entity(self.entities.compose(year, *bucket, id).await?)
            }
        };
        Ok(view)
    }

    /// Compose `route` for the navigation `token` belongs to.
    ///
    /// Errors stop here and come back as `Failed`. A result whose token was
    /// superseded while it was composing is reported `Stale`.
    pub async fn render(&self, route: &Route, token: &GenerationToken) -> PageOutcome {
        let outcome = self.compose(route).await;

        if !token.is_current() {
            debug!(generation = token.generation(), route = ?route, "discarding stale page");
            return PageOutcome::Stale;
        }

        match outcome {
            Ok(view) => {
                info!(generation = token.generation(), route = ?route, "page rendered");
                PageOutcome::Rendered(view)
            }
            Err(err) => {
                error!(route = ?route, error = %err, "page composition failed");
                PageOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Parse `url` into a route and render it.
    pub async fn render_url(&self, url: &Url, token: &GenerationToken) -> PageOutcome {
        match Route::from_url(url) {
            Ok(route) => self.render(&route, token).await,
            Err(err) => {
                error!(url = %url, error = %err, "cannot route page");
                PageOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }
}
