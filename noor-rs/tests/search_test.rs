//! Integration tests for Quran and Hadith search over on-disk corpora

use noor_rs::config::{CorpusConfig, SearchConfig};
use noor_rs::search::{FsCorpus, SearchManager, SearchResult, SearchTab};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn write(path: &Path, value: &Value) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, serde_json::to_vec(value).unwrap()).unwrap();
}

fn hadith(id: u32, narrator: &str, text: &str) -> Value {
    json!({
        "id": id,
        "idInBook": id,
        "arabic": "",
        "english": { "narrator": narrator, "text": text }
    })
}

/// Two surahs of 40 verses each, every verse mentioning mercy, written out
/// of numeric order to exercise sorting
fn write_quran(dir: &Path) {
    let mut surahs = serde_json::Map::new();
    let mut translations = serde_json::Map::new();

    for chapter in [10u32, 2] {
        let verses: Vec<Value> = (1..=40u32)
            .rev()
            .map(|verse| json!({ "chapter": chapter, "verse": verse, "text": format!("آية {}", verse) }))
            .collect();
        surahs.insert(chapter.to_string(), Value::Array(verses));

        for verse in 1..=40u32 {
            translations.insert(
                format!("{}:{}", chapter, verse),
                Value::String(format!("Verse {} of surah {} speaks of Mercy.", verse, chapter)),
            );
        }
    }

    write(&dir.join("quran.json"), &Value::Object(surahs));
    write(&dir.join("quran_en.json"), &Value::Object(translations));
}

fn setup() -> (TempDir, SearchManager) {
    let dir = TempDir::new().unwrap();
    write_quran(dir.path());

    let hadith_dir = dir.path().join("hadith");
    let bukhari: Vec<Value> = (1..=70).map(|i| hadith(i, "Narrated Abu Huraira:", "Whoever fasts Ramadan out of faith.")).collect();
    write(&hadith_dir.join("bukhari.json"), &json!({ "id": 1, "metadata": { "english": { "title": "Sahih al-Bukhari" } }, "hadiths": bukhari }));
    write(&hadith_dir.join("tirmidhi.json"), &json!({ "hadiths": [hadith(4, "Narrated Anas:", "Seek knowledge.")] }));
    write(&hadith_dir.join("darimi.json"), &json!({ "hadiths": [hadith(12, "", "Knowledge is a light.")] }));
    std::fs::write(hadith_dir.join("muslim.json"), b"{ not json").unwrap();

    let corpus = CorpusConfig {
        data_dir: dir.path().to_path_buf(),
        ..CorpusConfig::default()
    };
    let manager = SearchManager::new(Arc::new(FsCorpus::new(corpus)), &SearchConfig::default());

    (dir, manager)
}

fn quran_refs(results: &[SearchResult]) -> Vec<(u32, u32)> {
    results
        .iter()
        .map(|r| match r {
            SearchResult::Quran(v) => (v.chapter, v.verse),
            other => panic!("unexpected result {:?}", other),
        })
        .collect()
}

#[tokio::test]
async fn test_quran_returns_first_fifty_in_corpus_order() {
    let (_dir, manager) = setup();

    let results = manager.search(SearchTab::Quran, "mercy").await;
    assert_eq!(results.total, 50);
    assert!(results.truncated);

    let refs = quran_refs(&results.results);
    let expected: Vec<(u32, u32)> = (1..=40).map(|v| (2, v)).chain((1..=10).map(|v| (10, v))).collect();
    assert_eq!(refs, expected);
}

#[tokio::test]
async fn test_quran_arabic_match_and_links() {
    let (_dir, manager) = setup();

    let results = manager.search(SearchTab::Quran, "آية 33").await;
    let refs = quran_refs(&results.results);
    assert_eq!(refs, vec![(2, 33), (10, 33)]);

    match &results.results[0] {
        SearchResult::Quran(v) => {
            assert_eq!(v.link, "/quran/2#verse-33");
            assert_eq!(v.english_text, "Verse 33 of surah 2 speaks of Mercy.");
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[tokio::test]
async fn test_hadith_cap_filled_by_first_book() {
    let (_dir, manager) = setup();

    let results = manager.search(SearchTab::Hadith, "abu huraira").await;
    assert_eq!(results.total, 50);
    assert!(results.results.iter().all(|r| matches!(r, SearchResult::Hadith(h) if h.book_id == "bukhari")));
}

#[tokio::test]
async fn test_hadith_skips_corrupt_and_missing_books() {
    let (_dir, manager) = setup();

    let results = manager.search(SearchTab::Hadith, "KNOWLEDGE").await;
    let links: Vec<_> = results
        .results
        .iter()
        .map(|r| match r {
            SearchResult::Hadith(h) => h.link.clone(),
            other => panic!("unexpected result {:?}", other),
        })
        .collect();
    assert_eq!(links, vec!["/hadith/tirmidhi/4", "/hadith/darimi/12"]);
}

#[tokio::test]
async fn test_search_is_deterministic() {
    let (_dir, manager) = setup();

    let first = manager.search(SearchTab::Hadith, "faith").await;
    let second = manager.search(SearchTab::Hadith, "faith").await;
    assert_eq!(first.results, second.results);

    let first = manager.search(SearchTab::Quran, "surah 10").await;
    let second = manager.search(SearchTab::Quran, "surah 10").await;
    assert_eq!(first.results, second.results);
    assert_eq!(first.total, 40);
}

#[tokio::test]
async fn test_missing_quran_degrades_to_empty() {
    let dir = TempDir::new().unwrap();
    let corpus = CorpusConfig {
        data_dir: dir.path().to_path_buf(),
        ..CorpusConfig::default()
    };
    let manager = SearchManager::new(Arc::new(FsCorpus::new(corpus)), &SearchConfig::default());

    assert!(manager.try_search(SearchTab::Quran, "mercy").await.is_err());
    assert!(manager.search(SearchTab::Quran, "mercy").await.is_empty());

    let status = manager.status().await;
    assert!(!status.quran_loaded);
}
