//! ROM Renamer Common Library
//!
//! ファイル名とカタログ正式名の照合エンジン（IOなし）

pub mod catalog;
pub mod error;
pub mod matcher;
pub mod normalizer;
pub mod session;
pub mod similarity;
pub mod types;

pub use catalog::{Catalog, CatalogEntry};
pub use error::{Error, Result};
pub use matcher::{Candidate, CandidateList, MatchOptions, MatchTier, Matcher};
pub use normalizer::{normalize, token_equivalent, Normalizer, TokenSet};
pub use session::{Decision, ResolutionSession, Transition};
pub use similarity::{name_similarity, token_similar};
pub use types::{Action, LocalEntry, LogEntry, Outcome};
