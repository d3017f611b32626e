//! Corpus sources
//!
//! Static JSON documents the search indexes read from: the surah-keyed
//! Quran file, its "chapter:verse"-keyed translation, and one file per
//! hadith book.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

use super::types::{HadithBook, QuranCorpus, VerseRecord};
use crate::config::CorpusConfig;
use crate::error::{NoorError, Result};

/// Hadith books in search order
pub const HADITH_BOOKS: [&str; 9] = [
    "bukhari", "muslim", "abudawud", "tirmidhi", "nasai", "ibnmajah", "malik", "ahmed", "darimi",
];

/// Something that can produce the corpora
#[async_trait]
pub trait CorpusSource: Send + Sync {
    /// Load the Quran verses and translation
    async fn load_quran(&self) -> Result<QuranCorpus>;

    /// Load one hadith book by id
    async fn load_hadith_book(&self, book_id: &str) -> Result<HadithBook>;
}

/// Corpus read from JSON files on disk
pub struct FsCorpus {
    config: CorpusConfig,
}

impl FsCorpus {
    pub fn new(config: CorpusConfig) -> Self {
        Self { config }
    }

    async fn read_json<T: serde::de::DeserializeOwned>(&self, path: PathBuf, name: &str) -> Result<T> {
        debug!("Loading corpus {} from {}", name, path.display());

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| NoorError::corpus(name, format!("{}: {}", path.display(), e)))?;

        serde_json::from_slice(&bytes).map_err(|e| NoorError::corpus(name, e))
    }
}

#[async_trait]
impl CorpusSource for FsCorpus {
    async fn load_quran(&self) -> Result<QuranCorpus> {
        let surahs: BTreeMap<u32, Vec<VerseRecord>> =
            self.read_json(self.config.quran_path(), "quran").await?;
        let translations: HashMap<String, String> =
            self.read_json(self.config.translation_path(), "quran translation").await?;

        Ok(QuranCorpus::new(surahs, translations))
    }

    async fn load_hadith_book(&self, book_id: &str) -> Result<HadithBook> {
        if !HADITH_BOOKS.contains(&book_id) {
            return Err(NoorError::NotFound(format!("hadith book '{}'", book_id)));
        }
        self.read_json(self.config.hadith_path(book_id), book_id).await
    }
}

/// Corpus held in memory
///
/// Counts loads so callers can observe how often documents are read.
#[derive(Default)]
pub struct MemoryCorpus {
    quran: Option<QuranCorpus>,
    books: HashMap<String, HadithBook>,
    quran_loads: AtomicUsize,
    book_loads: AtomicUsize,
}

impl MemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quran(mut self, corpus: QuranCorpus) -> Self {
        self.quran = Some(corpus);
        self
    }

    pub fn with_book(mut self, book_id: &str, book: HadithBook) -> Self {
        self.books.insert(book_id.to_string(), book);
        self
    }

    pub fn quran_loads(&self) -> usize {
        self.quran_loads.load(Ordering::SeqCst)
    }

    pub fn book_loads(&self) -> usize {
        self.book_loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CorpusSource for MemoryCorpus {
    async fn load_quran(&self) -> Result<QuranCorpus> {
        self.quran_loads.fetch_add(1, Ordering::SeqCst);
        self.quran
            .clone()
            .ok_or_else(|| NoorError::corpus("quran", "not present"))
    }

    async fn load_hadith_book(&self, book_id: &str) -> Result<HadithBook> {
        self.book_loads.fetch_add(1, Ordering::SeqCst);
        self.books
            .get(book_id)
            .cloned()
            .ok_or_else(|| NoorError::corpus(book_id, "not present"))
    }
}
