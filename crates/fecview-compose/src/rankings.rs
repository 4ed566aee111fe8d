//! Leaderboard segments: bounded previews for dashboard panels and the
//! unbounded list for the dedicated page.

use std::sync::Arc;

use fecview_client::ViewService;
use fecview_client::proto::RankingsRequest;
use fecview_client::service::Result;
use fecview_core::{Board, Bucket, ListMode, Party, RankingItem};
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, warn};

use crate::links::LinkBuilder;
use crate::section::Section;

/// Entries kept in a preview panel.
pub const PREVIEW_LEN: usize = 10;

/// Leaderboards on the home page, each for the overall party.
const HOME_BOARDS: [Board; 2] = [Board::IndividualDonors, Board::CommitteeRecipients];

/// One numbered, linkable leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub city: String,
    pub state: String,
    pub amount: f64,
    pub href: String,
}

impl RankedEntry {
    pub fn display_line(&self) -> String {
        format!("{} - {}, {}", self.name, self.city, self.state)
    }
}

/// A leaderboard scoped to one year, board, and party.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingSegment {
    pub year: String,
    pub board: Board,
    pub party: Party,
    pub mode: ListMode,
    pub title: String,
    pub entries: Vec<RankedEntry>,
}

impl RankingSegment {
    pub fn bucket(&self) -> Bucket {
        self.board.bucket()
    }
}

/// A dashboard slot holding one preview segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    /// 1-based position on the page.
    pub slot: usize,
    /// Shown above the list on category pages; home panels carry none.
    pub heading: Option<String>,
    /// Link to the full list; home panels carry none.
    pub more_link: Option<String>,
    pub content: Section<RankingSegment>,
}

pub struct RankingsComposer {
    service: Arc<dyn ViewService>,
    links: LinkBuilder,
    preview_len: usize,
}

impl RankingsComposer {
    pub fn new(service: Arc<dyn ViewService>, links: LinkBuilder, preview_len: usize) -> Self {
        Self {
            service,
            links,
            preview_len,
        }
    }

    /// Bounded leaderboard. `Empty` means the caller must hide the panel.
    pub async fn compose_preview(
        &self,
        year: &str,
        board: Board,
        party: Party,
    ) -> Result<Section<RankingSegment>> {
        self.compose(year, board, party, ListMode::Preview).await
    }

    /// Complete leaderboard for the dedicated list page.
    pub async fn compose_full(
        &self,
        year: &str,
        board: Board,
        party: Party,
    ) -> Result<Section<RankingSegment>> {
        self.compose(year, board, party, ListMode::Full).await
    }

    async fn compose(
        &self,
        year: &str,
        board: Board,
        party: Party,
        mode: ListMode,
    ) -> Result<Section<RankingSegment>> {
        let req = RankingsRequest {
            year: year.to_string(),
            bucket: board.bucket(),
            category: board.category(),
            party: party.wire_code(mode),
        };
        let mut items = self.service.view_rankings(req).await?.ranking_list;
        if mode == ListMode::Preview {
            items.truncate(self.preview_len);
        }

        if items.is_empty() {
            debug!(year, board = ?board, party = %party, "suppressing empty segment");
            return Ok(Section::Empty);
        }

        Ok(Section::Ready(RankingSegment {
            year: year.to_string(),
            board,
            party,
            mode,
            title: board.segment_title(year, party),
            entries: self.entries(year, board.bucket(), items),
        }))
    }

    fn entries(&self, year: &str, bucket: Bucket, items: Vec<RankingItem>) -> Vec<RankedEntry> {
        items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| RankedEntry {
                rank: idx + 1,
                href: self.links.view_object(year, bucket, &item.id),
                id: item.id,
                name: item.name,
                city: item.city,
                state: item.state,
                amount: item.amount,
            })
            .collect()
    }

    /// The six party panels of a rankings category page, fetched concurrently.
    pub async fn category_page(&self, year: &str, board: Board) -> Vec<Panel> {
        let segments = join_all(
            Party::PANEL_ORDER
                .iter()
                .map(|&party| self.compose_preview(year, board, party)),
        )
        .await;

        Party::PANEL_ORDER
            .iter()
            .zip(segments)
            .enumerate()
            .map(|(idx, (&party, outcome))| {
                let content = settle(outcome, year, board, party);
                let visible = content.is_visible();
                Panel {
                    slot: idx + 1,
                    heading: visible.then(|| board.segment_title(year, party)),
                    more_link: visible.then(|| self.links.rankings_list(year, board, party)),
                    content,
                }
            })
            .collect()
    }

    /// The two overall-party panels on the home page.
    pub async fn home_page(&self, year: &str) -> Vec<Panel> {
        let segments = join_all(
            HOME_BOARDS
                .iter()
                .map(|&board| self.compose_preview(year, board, Party::All)),
        )
        .await;

        HOME_BOARDS
            .iter()
            .zip(segments)
            .enumerate()
            .map(|(idx, (&board, outcome))| Panel {
                slot: idx + 1,
                heading: None,
                more_link: None,
                content: settle(outcome, year, board, Party::All),
            })
            .collect()
    }
}

/// A failed panel is suppressed like an empty one; the rest of the page stays.
fn settle(
    outcome: Result<Section<RankingSegment>>,
    year: &str,
    board: Board,
    party: Party,
) -> Section<RankingSegment> {
    outcome.unwrap_or_else(|err| {
        warn!(year, board = ?board, party = %party, error = %err, "rankings panel failed");
        Section::failed(err)
    })
}
