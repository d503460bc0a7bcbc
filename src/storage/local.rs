//! Local filesystem storage implementation.
//!
//! Files are written atomically: the bytes go to a `.tmp` sibling which is
//! then renamed over the target.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::OutputConfig;
use crate::render::{parse_codes, render_codes, render_markdown};
use crate::storage::{CourseSnapshot, CourseStorage, WriteMetadata};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    json_file: String,
    markdown_file: String,
    codes_file: String,
    markdown_title: String,
}

impl LocalStorage {
    /// Create a LocalStorage from the output settings.
    pub fn new(output: &OutputConfig) -> Self {
        Self {
            root_dir: output.dir.clone(),
            json_file: output.json_file.clone(),
            markdown_file: output.markdown_file.clone(),
            codes_file: output.codes_file.clone(),
            markdown_title: output.markdown_title.clone(),
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<String> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(path.display().to_string())
    }

    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<String> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl CourseStorage for LocalStorage {
    async fn write_snapshot(&self, snapshot: &CourseSnapshot) -> Result<WriteMetadata> {
        let json_location = self.write_json(&self.json_file, snapshot).await?;

        let markdown = render_markdown(&self.markdown_title, &snapshot.courses);
        let markdown_location = self
            .write_bytes(&self.markdown_file, markdown.as_bytes())
            .await?;

        log::info!(
            "Wrote {} courses to {} and {}",
            snapshot.count,
            json_location,
            markdown_location
        );

        Ok(WriteMetadata {
            count: snapshot.count,
            json_location,
            markdown_location,
            timestamp: snapshot.generated_at,
        })
    }

    async fn load_snapshot(&self) -> Result<Option<CourseSnapshot>> {
        let snapshot = self.read_json(&self.json_file).await?;
        if snapshot.is_none() {
            log::warn!("No {} found in {}", self.json_file, self.root_dir.display());
        }
        Ok(snapshot)
    }

    async fn write_codes(&self, codes: &[String]) -> Result<String> {
        let location = self
            .write_bytes(&self.codes_file, render_codes(codes).as_bytes())
            .await?;
        log::info!("Wrote {} course codes to {}", codes.len(), location);
        Ok(location)
    }

    async fn load_codes(&self) -> Result<Vec<String>> {
        match self.read_bytes(&self.codes_file).await? {
            Some(bytes) => Ok(parse_codes(&String::from_utf8_lossy(&bytes))),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CourseRecord;
    use tempfile::TempDir;

    fn storage(tmp: &TempDir) -> LocalStorage {
        LocalStorage::new(&OutputConfig {
            dir: tmp.path().to_path_buf(),
            ..OutputConfig::default()
        })
    }

    #[tokio::test]
    async fn test_write_and_read() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        storage.write_bytes("test.txt", b"hello").await.unwrap();
        let data = storage.read_bytes("test.txt").await.unwrap();
        assert_eq!(data, Some(b"hello".to_vec()));
        assert!(!tmp.path().join("test.tmp").exists());
    }

    #[tokio::test]
    async fn test_load_missing_snapshot() {
        let tmp = TempDir::new().unwrap();
        assert!(storage(&tmp).load_snapshot().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_snapshot_round_trip_writes_markdown() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        let courses = vec![CourseRecord {
            crn: "12345".to_string(),
            course_code: "COMP 1405".to_string(),
            section: "A".to_string(),
            credits: 0.5,
            ..CourseRecord::default()
        }];
        let snapshot = CourseSnapshot::new("202510", courses);
        let meta = storage.write_snapshot(&snapshot).await.unwrap();
        assert_eq!(meta.count, 1);

        let loaded = storage.load_snapshot().await.unwrap().unwrap();
        assert_eq!(loaded.term_code, "202510");
        assert_eq!(loaded.courses, snapshot.courses);

        let md = std::fs::read_to_string(tmp.path().join("courses.md")).unwrap();
        assert!(md.starts_with("# Course List\n\n## COMP 1405 (Section A)"));
    }

    #[tokio::test]
    async fn test_codes_round_trip() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);
        assert!(storage.load_codes().await.unwrap().is_empty());

        let codes = vec!["COMP1405".to_string(), "MATH1007".to_string()];
        storage.write_codes(&codes).await.unwrap();

        let text = std::fs::read_to_string(tmp.path().join("course_codes.txt")).unwrap();
        assert_eq!(text, "COMP1405, MATH1007");
        assert_eq!(storage.load_codes().await.unwrap(), codes);
    }
}
