//! Result aggregation and view composition.
//!
//! Composers take an injected [`ViewService`](fecview_client::ViewService),
//! issue the requests a page needs, join the fragments by identifier, and
//! hand back ordered, structured view models. Nothing here renders.

mod error;
pub use error::ComposeError;

pub mod entity;
pub mod joiner;
pub mod links;
pub mod page;
pub mod rankings;
pub mod resolver;
pub mod route;
pub mod search;
pub mod section;
pub mod totals;

#[cfg(test)]
pub(crate) mod fake;

pub use entity::{CounterpartyRole, EntityView, EntityViewComposer, RoleSection};
pub use joiner::{JoinError, MissingCountPolicy, join};
pub use links::{LinkBuilder, YearLink};
pub use page::{GenerationToken, Navigator, PageOutcome, PageView, Pipeline, PipelineConfig};
pub use rankings::{Panel, RankedEntry, RankingSegment, RankingsComposer};
pub use resolver::LookupResolver;
pub use route::Route;
pub use search::{SearchComposer, SearchHit, SearchResultSet};
pub use section::Section;
pub use totals::{YearTotalsComposer, YearTotalsView};
