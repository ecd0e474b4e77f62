//! Write transactions for generated files.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::Result;

/// Counter for unique temporary file names.
static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Writes `content` to `path`, replacing whatever is there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteAction {
    /// Target file path.
    pub path: PathBuf,
    /// Content to write.
    pub content: String,
}

impl WriteAction {
    /// Creates a new write action.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Returns true if the target already holds exactly this content.
    pub fn is_unchanged(&self) -> bool {
        fs::read_to_string(&self.path).is_ok_and(|current| current == self.content)
    }

    /// Performs the write, creating parent directories as needed.
    pub fn execute(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        atomic_write(&self.path, &self.content)?;
        Ok(())
    }

    pub fn describe(&self) -> String {
        if self.path.exists() {
            format!("write {}", self.path.display())
        } else {
            format!("create {}", self.path.display())
        }
    }
}

/// An ordered set of file writes, executed together.
#[derive(Debug, Default)]
pub struct Transaction {
    actions: Vec<WriteAction>,
}

impl Transaction {
    /// Creates a new empty transaction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a write.
    pub fn write(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.actions.push(WriteAction::new(path, content));
    }

    /// Returns the queued actions in order.
    pub fn actions(&self) -> &[WriteAction] {
        &self.actions
    }

    /// Returns the number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns true if there are no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the actions that would change something on disk.
    pub fn pending(&self) -> impl Iterator<Item = &WriteAction> {
        self.actions.iter().filter(|action| !action.is_unchanged())
    }

    /// Returns descriptions of the actions that would change something on disk.
    pub fn describe(&self) -> Vec<String> {
        self.pending().map(WriteAction::describe).collect()
    }

    /// Executes all pending actions, returning the paths written.
    ///
    /// Files whose content is already up to date are left untouched, so
    /// their modification times do not change.
    pub fn execute(&self) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for action in &self.actions {
            if action.is_unchanged() {
                tracing::debug!("Unchanged {}", action.path.display());
                continue;
            }
            action.execute()?;
            written.push(action.path.clone());
        }
        Ok(written)
    }
}

/// Writes content to a file atomically using a temp file and rename.
fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    atomic_write_with(path, |file| file.write_all(content.as_bytes()))
}

/// The temp file is removed whenever the write, sync or rename fails.
fn atomic_write_with<F>(path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let parent = path.parent().unwrap_or(Path::new("."));
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let temp_path = parent.join(format!(
        ".mdtangle-tmp-{}-{}",
        std::process::id(),
        counter,
    ));

    let result = File::create(&temp_path)
        .and_then(|mut file| {
            write(&mut file)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&temp_path, path));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_creates_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("src/lib/math.js");

        let mut tx = Transaction::new();
        tx.write(&path, "sum()\n");
        assert_eq!(tx.describe(), vec![format!("create {}", path.display())]);

        let written = tx.execute().unwrap();
        assert_eq!(written, vec![path.clone()]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "sum()\n");
    }

    #[test]
    fn test_overwrite_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.js");
        fs::write(&path, "old").unwrap();

        let mut tx = Transaction::new();
        tx.write(&path, "new");
        assert_eq!(tx.describe(), vec![format!("write {}", path.display())]);
        tx.execute().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_unchanged_files_are_skipped() {
        let dir = tempdir().unwrap();
        let same = dir.path().join("same.js");
        let other = dir.path().join("other.js");
        fs::write(&same, "same\n").unwrap();

        let mut tx = Transaction::new();
        tx.write(&same, "same\n");
        tx.write(&other, "other\n");

        assert_eq!(tx.len(), 2);
        assert_eq!(tx.pending().count(), 1);
        assert_eq!(tx.execute().unwrap(), vec![other]);
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = tempdir().unwrap();
        let mut tx = Transaction::new();
        tx.write(dir.path().join("a.js"), "a");
        tx.write(dir.path().join("b.js"), "b");
        tx.execute().unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.iter().all(|n| !n.starts_with(".mdtangle-tmp-")));
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_failed_write_removes_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.js");
        fs::write(&path, "old").unwrap();

        let result = atomic_write_with(&path, |file| {
            file.write_all(b"partial")?;
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        });

        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::Other);
        assert_eq!(dir_entries(dir.path()), vec!["index.js"]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep.txt"), "").unwrap();

        assert!(atomic_write(&target, "content").is_err());
        assert_eq!(dir_entries(dir.path()), vec!["out"]);
    }

    #[test]
    fn test_empty_transaction() {
        let tx = Transaction::new();
        assert!(tx.is_empty());
        assert!(tx.describe().is_empty());
        assert!(tx.execute().unwrap().is_empty());
    }
}
