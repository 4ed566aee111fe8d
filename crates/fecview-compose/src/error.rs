use fecview_client::ServiceError;
use fecview_core::VocabError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("view service error: {0}")]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Vocab(#[from] VocabError),

    #[error("missing route parameter: {0}")]
    MissingParameter(&'static str),

    #[error("unknown route: {0}")]
    UnknownRoute(String),

    #[error("link base cannot carry paths: {0}")]
    InvalidLinkBase(String),

    #[error("preview length must be at least 1")]
    ZeroPreviewLen,
}
