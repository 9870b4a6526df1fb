//! Score store operations.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tokio::fs;
use tracing::debug;

use vbench_models::ScoreEntry;

use crate::error::{StoreError, StoreResult};

/// Incremental score persistence, one file per (tag, profile) pair.
///
/// Entries accumulate in memory and the backing file is rewritten after
/// every append, bounding data loss on abrupt termination to the
/// in-flight configuration. Re-running with an existing tag/profile
/// replaces the file wholesale; concurrent runs against the same pair
/// are last-writer-wins and must be serialized by the operator.
#[derive(Debug)]
pub struct ScoreStore {
    scoredir: PathBuf,
    collections: HashMap<(String, String), Vec<ScoreEntry>>,
}

impl ScoreStore {
    /// Create a store rooted at `scoredir` (created on first append).
    pub fn new(scoredir: impl AsRef<Path>) -> Self {
        Self {
            scoredir: scoredir.as_ref().to_path_buf(),
            collections: HashMap::new(),
        }
    }

    /// Path of the backing file for a (tag, profile) pair.
    pub fn score_file(&self, tag: &str, profile: &str) -> PathBuf {
        self.scoredir.join(format!("{tag}_{profile}.json"))
    }

    /// Append one entry and rewrite the backing collection.
    ///
    /// The rewrite goes through a temp file followed by a rename so the
    /// persisted file is a complete, parseable array at every point in
    /// time.
    pub async fn append(&mut self, tag: &str, profile: &str, entry: ScoreEntry) -> StoreResult<()> {
        let file = self.score_file(tag, profile);

        let entries = self
            .collections
            .entry((tag.to_string(), profile.to_string()))
            .or_default();
        entries.push(entry);

        fs::create_dir_all(&self.scoredir).await?;

        let tmp = file.with_extension("json.tmp");
        let body = serde_json::to_vec_pretty(entries)?;

        fs::write(&tmp, &body).await?;
        fs::rename(&tmp, &file).await?;

        debug!("Persisted {} entries to {}", entries.len(), file.display());
        Ok(())
    }
}

/// Load and concatenate every persisted score collection under `scoredir`.
///
/// Entries are returned as raw JSON objects so collections written by
/// older runs with missing fields stay loadable. A missing score
/// directory yields an empty sequence.
pub async fn load_all(scoredir: impl AsRef<Path>) -> StoreResult<Vec<Map<String, Value>>> {
    let scoredir = scoredir.as_ref();
    let mut entries = Vec::new();

    let mut dir = match fs::read_dir(scoredir).await {
        Ok(dir) => dir,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(entries),
        Err(err) => return Err(err.into()),
    };

    let mut files = Vec::new();
    while let Some(item) = dir.next_entry().await? {
        let path = item.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    // deterministic order across platforms
    files.sort();

    for file in files {
        let body = fs::read_to_string(&file).await?;
        let value: Value = serde_json::from_str(&body)?;
        let Value::Array(items) = value else {
            return Err(StoreError::NotAnArray {
                file: file.display().to_string(),
            });
        };
        for item in items {
            if let Value::Object(map) = item {
                entries.push(map);
            }
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use vbench_models::TranscodeResult;

    fn entry(reference: &str, profile: &str, tag: &str) -> ScoreEntry {
        ScoreEntry {
            reference: reference.to_string(),
            profile: profile.to_string(),
            tag: tag.to_string(),
            result: TranscodeResult {
                rate: Some(224.868),
                speed: Some(4.06),
                score_mean: 98.03,
                score_harm_mean: 97.99,
                score_10th_pct: 96.49,
                score_min: 96.38,
            },
            dimensions: [("codec".to_string(), Value::from("libx264"))].into(),
        }
    }

    #[tokio::test]
    async fn test_file_is_complete_after_every_append() {
        let dir = TempDir::new().unwrap();
        let mut store = ScoreStore::new(dir.path());

        for count in 1..=3 {
            store
                .append("ci", "simple", entry(&format!("ref{count}"), "simple", "ci"))
                .await
                .unwrap();

            // a crash right now must leave exactly `count` valid entries
            let body = std::fs::read_to_string(store.score_file("ci", "simple")).unwrap();
            let parsed: Vec<ScoreEntry> = serde_json::from_str(&body).unwrap();
            assert_eq!(parsed.len(), count);
            assert_eq!(parsed[count - 1].reference, format!("ref{count}"));
        }
    }

    #[tokio::test]
    async fn test_no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let mut store = ScoreStore::new(dir.path());
        store
            .append("ci", "simple", entry("ref", "simple", "ci"))
            .await
            .unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|item| item.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["ci_simple.json"]);
    }

    #[tokio::test]
    async fn test_collections_are_separate_per_tag_and_profile() {
        let dir = TempDir::new().unwrap();
        let mut store = ScoreStore::new(dir.path());
        store
            .append("ci", "simple", entry("ref", "simple", "ci"))
            .await
            .unwrap();
        store
            .append("laptop", "streaming", entry("ref", "streaming", "laptop"))
            .await
            .unwrap();

        assert!(store.score_file("ci", "simple").exists());
        assert!(store.score_file("laptop", "streaming").exists());
    }

    #[tokio::test]
    async fn test_load_all_concatenates_collections() {
        let dir = TempDir::new().unwrap();
        let mut store = ScoreStore::new(dir.path());
        store
            .append("ci", "simple", entry("a", "simple", "ci"))
            .await
            .unwrap();
        store
            .append("ci", "simple", entry("b", "simple", "ci"))
            .await
            .unwrap();
        store
            .append("ci", "streaming", entry("a", "streaming", "ci"))
            .await
            .unwrap();

        let entries = load_all(dir.path()).await.unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.contains_key("score_mean")));
    }

    #[tokio::test]
    async fn test_load_all_tolerates_older_schemas() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("old_run.json"),
            r#"[{"reference": "r", "profile": "p", "tag": "t", "score_mean": 90.0}]"#,
        )
        .unwrap();

        let entries = load_all(dir.path()).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].contains_key("speed"));
    }

    #[tokio::test]
    async fn test_load_all_missing_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let entries = load_all(dir.path().join("nope")).await.unwrap();
        assert!(entries.is_empty());
    }
}
