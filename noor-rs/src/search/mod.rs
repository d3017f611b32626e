//! Corpus search module
//!
//! Substring search over the Quran (Arabic text plus English translation)
//! and nine Hadith books, capped at a fixed number of results in corpus order.

pub mod corpus;
pub mod hadith;
pub mod manager;
pub mod quran;
pub mod session;
pub mod types;

pub use corpus::{CorpusSource, FsCorpus, MemoryCorpus, HADITH_BOOKS};
pub use hadith::HadithIndex;
pub use manager::SearchManager;
pub use quran::QuranIndex;
pub use session::{SearchSession, SessionState};
pub use types::*;
