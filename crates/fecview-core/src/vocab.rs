//! Closed vocabularies shared by every request and view.
//!
//! Buckets, categories, parties, and the eight leaderboards are finite sets
//! known at compile time. Parsing happens once at the route boundary; past
//! that point every label lookup is an exhaustive `match` with no fallback.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VocabError {
    #[error("unknown bucket: {0}")]
    UnknownBucket(String),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unknown party: {0}")]
    UnknownParty(String),

    #[error("no leaderboard for {bucket}-{category}")]
    UnknownBoard { bucket: Bucket, category: Category },

    #[error("malformed leaderboard key: {0}")]
    MalformedBoardKey(String),
}

// ── Bucket ──

/// Entity-kind partition; also the namespace identifiers are unique within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bucket {
    #[serde(rename = "individuals")]
    Individuals,
    #[serde(rename = "cmte_tx_data", alias = "committees")]
    Committees,
    #[serde(rename = "candidates")]
    Candidates,
}

impl Bucket {
    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::Individuals => "individuals",
            Bucket::Committees => "cmte_tx_data",
            Bucket::Candidates => "candidates",
        }
    }
}

impl FromStr for Bucket {
    type Err = VocabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individuals" => Ok(Bucket::Individuals),
            "cmte_tx_data" | "committees" => Ok(Bucket::Committees),
            "candidates" => Ok(Bucket::Candidates),
            other => Err(VocabError::UnknownBucket(other.to_string())),
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Category ──

/// Direction of money flow a ranking or yearly total is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Donor,
    Rec,
    Exp,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Donor => "donor",
            Category::Rec => "rec",
            Category::Exp => "exp",
        }
    }

    /// Heading used on the yearly totals page.
    pub fn totals_label(self) -> &'static str {
        match self {
            Category::Donor => "Funds Contributed",
            Category::Rec => "Funds Received",
            Category::Exp => "Funds Expensed",
        }
    }
}

impl FromStr for Category {
    type Err = VocabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "donor" => Ok(Category::Donor),
            "rec" => Ok(Category::Rec),
            "exp" => Ok(Category::Exp),
            other => Err(VocabError::UnknownCategory(other.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Party ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Party {
    #[serde(rename = "ALL")]
    All,
    #[serde(rename = "DEM")]
    Dem,
    #[serde(rename = "REP")]
    Rep,
    #[serde(rename = "IND")]
    Ind,
    #[serde(rename = "OTH")]
    Oth,
    #[serde(rename = "UNK")]
    Unk,
}

impl Party {
    /// Panel order on a rankings category page.
    pub const PANEL_ORDER: [Party; 6] = [
        Party::All,
        Party::Dem,
        Party::Rep,
        Party::Ind,
        Party::Oth,
        Party::Unk,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Party::All => "ALL",
            Party::Dem => "DEM",
            Party::Rep => "REP",
            Party::Ind => "IND",
            Party::Oth => "OTH",
            Party::Unk => "UNK",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Party::All => "Overall",
            Party::Dem => "Democrat",
            Party::Rep => "Republican",
            Party::Ind => "Independent",
            Party::Oth => "Other",
            Party::Unk => "Unknown",
        }
    }

    /// Party parameter as sent to the rankings endpoint.
    pub fn wire_code(self, mode: ListMode) -> String {
        match mode {
            ListMode::Preview => format!("{}-pre", self.code()),
            ListMode::Full => self.code().to_string(),
        }
    }
}

impl FromStr for Party {
    type Err = VocabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(Party::All),
            "DEM" => Ok(Party::Dem),
            "REP" => Ok(Party::Rep),
            "IND" => Ok(Party::Ind),
            "OTH" => Ok(Party::Oth),
            "UNK" => Ok(Party::Unk),
            other => Err(VocabError::UnknownParty(other.to_string())),
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ── ListMode ──

/// Length-bounded dashboard panel vs the complete leaderboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListMode {
    Preview,
    Full,
}

// ── Board ──

/// One of the eight leaderboards the service precomputes.
///
/// Individuals have no expenditure board, so `individuals-exp` is not
/// representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Board {
    IndividualDonors,
    IndividualRecipients,
    CommitteeDonors,
    CommitteeRecipients,
    CommitteeSpenders,
    CandidateDonors,
    CandidateRecipients,
    CandidateSpenders,
}

impl Board {
    pub fn new(bucket: Bucket, category: Category) -> Result<Self, VocabError> {
        match (bucket, category) {
            (Bucket::Individuals, Category::Donor) => Ok(Board::IndividualDonors),
            (Bucket::Individuals, Category::Rec) => Ok(Board::IndividualRecipients),
            (Bucket::Committees, Category::Donor) => Ok(Board::CommitteeDonors),
            (Bucket::Committees, Category::Rec) => Ok(Board::CommitteeRecipients),
            (Bucket::Committees, Category::Exp) => Ok(Board::CommitteeSpenders),
            (Bucket::Candidates, Category::Donor) => Ok(Board::CandidateDonors),
            (Bucket::Candidates, Category::Rec) => Ok(Board::CandidateRecipients),
            (Bucket::Candidates, Category::Exp) => Ok(Board::CandidateSpenders),
            (bucket, category) => Err(VocabError::UnknownBoard { bucket, category }),
        }
    }

    /// Parse the combined `{bucket}-{category}` key used by the rankings page.
    pub fn from_key(key: &str) -> Result<Self, VocabError> {
        let (bucket, category) = key
            .rsplit_once('-')
            .ok_or_else(|| VocabError::MalformedBoardKey(key.to_string()))?;
        Board::new(bucket.parse()?, category.parse()?)
    }

    pub fn bucket(self) -> Bucket {
        match self {
            Board::IndividualDonors | Board::IndividualRecipients => Bucket::Individuals,
            Board::CommitteeDonors | Board::CommitteeRecipients | Board::CommitteeSpenders => {
                Bucket::Committees
            }
            Board::CandidateDonors | Board::CandidateRecipients | Board::CandidateSpenders => {
                Bucket::Candidates
            }
        }
    }

    pub fn category(self) -> Category {
        match self {
            Board::IndividualDonors | Board::CommitteeDonors | Board::CandidateDonors => {
                Category::Donor
            }
            Board::IndividualRecipients
            | Board::CommitteeRecipients
            | Board::CandidateRecipients => Category::Rec,
            Board::CommitteeSpenders | Board::CandidateSpenders => Category::Exp,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Board::IndividualDonors => "Individual Contributors",
            Board::IndividualRecipients => "Individual Recipients",
            Board::CommitteeDonors => "Committee Donors",
            Board::CommitteeRecipients => "Committee Recipients",
            Board::CommitteeSpenders => "Committee Spenders",
            Board::CandidateDonors => "Candidate Donors",
            Board::CandidateRecipients => "Candidate Recipients",
            Board::CandidateSpenders => "Candidate Spenders",
        }
    }

    /// `"{year} - {board} - {party}"`, the heading of a ranking segment.
    pub fn segment_title(self, year: &str, party: Party) -> String {
        format!("{} - {} - {}", year, self.title(), party.label())
    }
}
