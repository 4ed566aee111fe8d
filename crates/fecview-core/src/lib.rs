pub mod format;
pub mod model;
pub mod snapshot;
pub mod vocab;

pub use format::{format_count, format_usd};
pub use model::{
    AmountRecord, EnrichedCounterparty, RankingItem, ResolvedRecord, SearchResultItem,
    TransactionCounts, YearTotal,
};
pub use snapshot::{
    Candidate, CandidateSummary, Committee, CommitteeTxData, CommitteeTxSummary, Individual,
    IndividualSummary,
};
pub use vocab::{Board, Bucket, Category, ListMode, Party, VocabError};
