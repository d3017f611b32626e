//! Search types and data structures

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::error::NoorError;

/// One Arabic verse record as stored in the surah-keyed corpus
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VerseRecord {
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

/// The Quran corpus: verses keyed by surah, plus an English translation
/// keyed by "chapter:verse"
#[derive(Debug, Clone, Default)]
pub struct QuranCorpus {
    pub surahs: BTreeMap<u32, Vec<VerseRecord>>,
    pub translations: HashMap<String, String>,
}

impl QuranCorpus {
    /// Build a corpus, sorting each surah's verses by verse number
    pub fn new(mut surahs: BTreeMap<u32, Vec<VerseRecord>>, translations: HashMap<String, String>) -> Self {
        for verses in surahs.values_mut() {
            verses.sort_by_key(|v| v.verse);
        }
        Self { surahs, translations }
    }

    pub fn translation(&self, chapter: u32, verse: u32) -> Option<&str> {
        self.translations
            .get(&format!("{}:{}", chapter, verse))
            .map(String::as_str)
    }

    pub fn verse_count(&self) -> usize {
        self.surahs.values().map(Vec::len).sum()
    }
}

/// English fields of a hadith entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HadithEnglish {
    #[serde(default)]
    pub narrator: String,
    #[serde(default)]
    pub text: String,
}

/// One hadith entry as stored in a book document
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HadithEntry {
    pub id: u32,
    pub id_in_book: u32,
    #[serde(default)]
    pub arabic: String,
    #[serde(default)]
    pub english: HadithEnglish,
}

/// A hadith book document
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HadithBook {
    #[serde(default)]
    pub metadata: serde_json::Value,
    pub hadiths: Vec<HadithEntry>,
}

/// Which corpus a search runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchTab {
    Quran,
    Hadith,
}

impl fmt::Display for SearchTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchTab::Quran => write!(f, "quran"),
            SearchTab::Hadith => write!(f, "hadith"),
        }
    }
}

impl FromStr for SearchTab {
    type Err = NoorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "quran" => Ok(SearchTab::Quran),
            "hadith" => Ok(SearchTab::Hadith),
            other => Err(NoorError::InvalidInput(format!("Unknown search tab '{}'", other))),
        }
    }
}

/// A matching verse
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuranResult {
    pub chapter: u32,
    pub verse: u32,
    pub arabic_text: String,
    pub english_text: String,
    pub link: String,
}

impl QuranResult {
    pub fn new(record: &VerseRecord, english_text: &str) -> Self {
        Self {
            chapter: record.chapter,
            verse: record.verse,
            arabic_text: record.text.clone(),
            english_text: english_text.to_string(),
            link: format!("/quran/{}#verse-{}", record.chapter, record.verse),
        }
    }
}

/// A matching hadith
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HadithResult {
    pub book_id: String,
    pub hadith_id: u32,
    pub id_in_book: u32,
    pub arabic_text: String,
    pub english_narrator: String,
    pub english_text: String,
    pub link: String,
}

impl HadithResult {
    pub fn new(book_id: &str, entry: &HadithEntry) -> Self {
        Self {
            book_id: book_id.to_string(),
            hadith_id: entry.id,
            id_in_book: entry.id_in_book,
            arabic_text: entry.arabic.clone(),
            english_narrator: entry.english.narrator.clone(),
            english_text: entry.english.text.clone(),
            link: format!("/hadith/{}/{}", book_id, entry.id_in_book),
        }
    }
}

/// Search result entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchResult {
    Quran(QuranResult),
    Hadith(HadithResult),
}

/// Search results response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub query: String,
    pub tab: SearchTab,
    /// Matching results in corpus order
    pub results: Vec<SearchResult>,
    pub total: usize,
    /// The result cap was reached; later matches were not searched
    pub truncated: bool,
    /// Query time in milliseconds
    pub query_time_ms: u64,
}

impl SearchResults {
    pub fn empty(query: &str, tab: SearchTab) -> Self {
        Self {
            query: query.to_string(),
            tab,
            results: vec![],
            total: 0,
            truncated: false,
            query_time_ms: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Search index status
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStatus {
    pub quran_loaded: bool,
    pub quran_verses: usize,
    pub hadith_books: Vec<&'static str>,
    pub cached_hadith_books: usize,
    pub searches_run: u64,
}
