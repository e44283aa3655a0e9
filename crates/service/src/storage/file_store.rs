use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Value};
use tokio::{fs, io::AsyncWriteExt};
use tracing::debug;

use crate::errors::StoreError;
use crate::question::{json_kind, Question};
use crate::storage::QuestionStore;

/// JSON file-backed question collection.
///
/// The whole collection lives in one file as a pretty-printed JSON array
/// (4-space indent). Writes go to a temporary sibling which is then renamed
/// over the target, so readers see either the old or the new file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
}

impl JsonFileStore {
    /// Bind the store to `path`. No I/O happens until the first load or save.
    pub fn new<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { file_path: path.into() })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(".");
        name.push(self.file_path.file_name().unwrap_or_else(|| OsStr::new("questions.json")));
        name.push(format!(".{}.tmp", uuid::Uuid::new_v4()));
        self.file_path.with_file_name(name)
    }

    async fn write_and_rename(&self, temp_path: &Path, data: &[u8]) -> Result<(), StoreError> {
        let mut file = fs::File::create(temp_path)
            .await
            .map_err(|e| StoreError::io(temp_path, e))?;
        file.write_all(data).await.map_err(|e| StoreError::io(temp_path, e))?;
        file.sync_all().await.map_err(|e| StoreError::io(temp_path, e))?;
        drop(file);

        // Atomic rename
        fs::rename(temp_path, &self.file_path)
            .await
            .map_err(|e| StoreError::io(&self.file_path, e))
    }
}

/// Serialize like `JSON.stringify(value, null, 4)`.
pub fn to_pretty_json(questions: &[Question]) -> Result<Vec<u8>, StoreError> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    questions.serialize(&mut ser)?;
    Ok(buf)
}

#[async_trait]
impl QuestionStore for JsonFileStore {
    fn backend(&self) -> &'static str {
        "file"
    }

    async fn try_load(&self) -> Result<Vec<Question>, StoreError> {
        let bytes = fs::read(&self.file_path)
            .await
            .map_err(|e| StoreError::io(&self.file_path, e))?;
        match serde_json::from_slice::<Value>(&bytes)? {
            Value::Array(items) => Ok(items.into_iter().map(Question).collect()),
            other => Err(StoreError::NotACollection(json_kind(&other))),
        }
    }

    async fn write_all(&self, questions: Vec<Question>) -> Result<usize, StoreError> {
        let data = to_pretty_json(&questions)?;
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| StoreError::io(parent, e))?;
        }

        let temp_path = self.temp_path();
        if let Err(e) = self.write_and_rename(&temp_path, &data).await {
            // Drop the partial temp file; the target is untouched
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }
        debug!(path = %self.file_path.display(), bytes = data.len(), "questions file replaced");
        Ok(questions.len())
    }
}
