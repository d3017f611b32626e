//! Quran verse search

use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

use super::corpus::CorpusSource;
use super::types::{QuranCorpus, QuranResult};
use crate::error::{NoorError, Result};

/// Scan verses in corpus order (surah ascending, verse ascending) and stop at
/// the `limit`-th match.
///
/// A verse matches when its Arabic text contains `query` verbatim, or when
/// its English translation contains `query` ignoring case. Diacritics are not
/// normalized.
pub fn search_verses(corpus: &QuranCorpus, query: &str, limit: usize) -> Vec<QuranResult> {
    let mut results = Vec::new();
    if limit == 0 {
        return results;
    }

    let query_lower = query.to_lowercase();

    for verses in corpus.surahs.values() {
        for record in verses {
            let english = corpus.translation(record.chapter, record.verse).unwrap_or("");

            if record.text.contains(query) || english.to_lowercase().contains(&query_lower) {
                results.push(QuranResult::new(record, english));
                if results.len() >= limit {
                    return results;
                }
            }
        }
    }

    results
}

/// Quran search index over a lazily loaded, memoized corpus
pub struct QuranIndex {
    source: Arc<dyn CorpusSource>,
    corpus: OnceCell<Arc<QuranCorpus>>,
}

impl QuranIndex {
    pub fn new(source: Arc<dyn CorpusSource>) -> Self {
        Self {
            source,
            corpus: OnceCell::new(),
        }
    }

    /// The corpus, loading it on first use. A failed load is not remembered.
    pub async fn corpus(&self) -> Result<Arc<QuranCorpus>> {
        self.corpus
            .get_or_try_init(|| async {
                let corpus = self.source.load_quran().await?;
                info!(
                    "Loaded Quran corpus: {} surahs, {} verses",
                    corpus.surahs.len(),
                    corpus.verse_count()
                );
                Ok::<_, NoorError>(Arc::new(corpus))
            })
            .await
            .map(Arc::clone)
    }

    pub fn is_loaded(&self) -> bool {
        self.corpus.initialized()
    }

    pub fn verse_count(&self) -> usize {
        self.corpus.get().map(|c| c.verse_count()).unwrap_or(0)
    }

    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<QuranResult>> {
        let corpus = self.corpus().await?;
        Ok(search_verses(&corpus, query, limit))
    }
}
