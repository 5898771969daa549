//! Whole-file JSON collections
//!
//! Each collection is a single JSON array on disk. Every mutation reads the
//! entire file, edits it in memory and writes it back. Mutations of one
//! collection are serialized by an async mutex, and writes go through a
//! temporary file that is renamed over the original so readers never see a
//! partially written document.

use std::{
    io::ErrorKind,
    marker::PhantomData,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::{Mutex, MutexGuard};

use crate::{
    error::{AppError, AppResult},
    models::{PageRequest, Record},
};

pub struct JsonCollection<T> {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonCollection<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            lock: Arc::clone(&self.lock),
            _record: PhantomData,
        }
    }
}

impl<T> JsonCollection<T>
where
    T: Record + Serialize + DeserializeOwned + Clone,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record. A missing or blank file is an empty collection.
    pub async fn load(&self) -> AppResult<Vec<T>> {
        read_records(&self.path).await
    }

    /// Block writers of this collection until the guard is dropped.
    ///
    /// Reads through [`load`](Self::load) stay available to the holder.
    pub async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }

    /// Read-modify-write under the collection lock.
    ///
    /// The file is rewritten only when `f` succeeds.
    pub async fn modify<R, F>(&self, f: F) -> AppResult<R>
    where
        F: FnOnce(&mut Vec<T>) -> AppResult<R>,
    {
        let _guard = self.lock.lock().await;
        let mut records = read_records(&self.path).await?;
        let result = f(&mut records)?;
        write_records(&self.path, &records).await?;
        Ok(result)
    }

    /// One page of records plus the collection size
    pub async fn list(&self, page: &PageRequest) -> AppResult<(Vec<T>, usize)> {
        let records = self.load().await?;
        Ok(page.apply(&records))
    }

    pub async fn get(&self, id: &str) -> AppResult<T> {
        self.load()
            .await?
            .into_iter()
            .find(|record| record.id() == id)
            .ok_or_else(|| not_found::<T>(id))
    }

    pub async fn insert(&self, record: T) -> AppResult<T> {
        self.modify(|records| {
            records.push(record.clone());
            Ok(record)
        })
        .await
    }

    /// Apply `f` to the record with this id and persist the result
    pub async fn update<F>(&self, id: &str, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut T) -> AppResult<()>,
    {
        self.modify(|records| {
            let record = records
                .iter_mut()
                .find(|record| record.id() == id)
                .ok_or_else(|| not_found::<T>(id))?;
            f(record)?;
            Ok(record.clone())
        })
        .await
    }

    /// Remove the record with this id, after `guard` has approved it
    pub async fn remove_if<F>(&self, id: &str, guard: F) -> AppResult<T>
    where
        F: FnOnce(&T) -> AppResult<()>,
    {
        self.modify(|records| {
            let index = records
                .iter()
                .position(|record| record.id() == id)
                .ok_or_else(|| not_found::<T>(id))?;
            guard(&records[index])?;
            Ok(records.remove(index))
        })
        .await
    }

    pub async fn remove(&self, id: &str) -> AppResult<T> {
        self.remove_if(id, |_| Ok(())).await
    }
}

pub(crate) fn not_found<T: Record>(id: &str) -> AppError {
    AppError::NotFound(format!("{} with id {} not found", T::KIND, id))
}

async fn read_records<T: DeserializeOwned>(path: &Path) -> AppResult<Vec<T>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    Ok(serde_json::from_slice(&bytes)?)
}

async fn write_records<T: Serialize>(path: &Path, records: &[T]) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_vec_pretty(records)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;

    tracing::debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        text: String,
    }

    impl Record for Note {
        const KIND: &'static str = "Note";

        fn id(&self) -> &str {
            &self.id
        }
    }

    fn note(id: &str) -> Note {
        Note {
            id: id.to_string(),
            text: format!("note {}", id),
        }
    }

    fn collection(dir: &tempfile::TempDir) -> JsonCollection<Note> {
        JsonCollection::new(dir.path().join("notes.json"))
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collection(&dir).load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let notes = collection(&dir);
        std::fs::write(notes.path(), "  \n").unwrap();
        assert!(notes.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_persists_pretty_array() {
        let dir = tempfile::tempdir().unwrap();
        let notes = collection(&dir);
        notes.insert(note("a")).await.unwrap();
        notes.insert(note("b")).await.unwrap();

        let raw = std::fs::read_to_string(notes.path()).unwrap();
        assert!(raw.starts_with("[\n  {"));
        let stored: Vec<Note> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, vec![note("a"), note("b")]);
    }

    #[tokio::test]
    async fn test_remove_missing_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let notes = collection(&dir);
        notes.insert(note("a")).await.unwrap();
        let before = std::fs::read(notes.path()).unwrap();

        let err = notes.remove("zzz").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(std::fs::read(notes.path()).unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let notes = collection(&dir);
        notes.insert(note("a")).await.unwrap();

        let updated = notes
            .update("a", |n| {
                n.text = "changed".to_string();
                Ok(())
            })
            .await
            .unwrap();
        assert_eq!(updated.text, "changed");
        assert_eq!(notes.get("a").await.unwrap().text, "changed");
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let notes = collection(&dir);
        std::fs::write(notes.path(), "{not json").unwrap();
        assert!(matches!(notes.load().await, Err(AppError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_concurrent_inserts_are_not_lost() {
        let dir = tempfile::tempdir().unwrap();
        let notes = collection(&dir);

        let tasks: Vec<_> = (0..20)
            .map(|i| {
                let notes = notes.clone();
                tokio::spawn(async move { notes.insert(note(&i.to_string())).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(notes.load().await.unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_lock_writes_holds_back_mutations() {
        let dir = tempfile::tempdir().unwrap();
        let notes = collection(&dir);
        notes.insert(note("a")).await.unwrap();

        let guard = notes.lock_writes().await;
        assert_eq!(notes.load().await.unwrap().len(), 1);
        let blocked =
            tokio::time::timeout(std::time::Duration::from_millis(50), notes.remove("a")).await;
        assert!(blocked.is_err());
        drop(guard);

        notes.remove("a").await.unwrap();
        assert!(notes.load().await.unwrap().is_empty());
    }
}
