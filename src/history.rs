//! HistoryStore.
//!
//! A simple append-only log indexed from 1, with two cursors: `baseline_size`
//! (set once at startup load) and `append_cursor` (advanced by `history -a`).
//! Entries are never removed during a session.

use std::io::Write as _;
use std::path::Path;

#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: Vec<String>,
    baseline_size: usize,
    append_cursor: usize,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load entries from `path` at startup, skipping blank lines, and set
    /// `baseline_size` to the resulting length. Missing files load as empty.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let mut store = Self::new();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            for line in content.lines() {
                if !line.trim().is_empty() {
                    store.entries.push(line.to_string());
                }
            }
        }
        store.baseline_size = store.entries.len();
        Ok(store)
    }

    /// Append one line typed at the prompt; every line read is recorded,
    /// regardless of whether the command that follows succeeds.
    pub fn push(&mut self, line: String) {
        self.entries.push(line);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn baseline_size(&self) -> usize {
        self.baseline_size
    }

    pub fn append_cursor(&self) -> usize {
        self.append_cursor
    }

    pub fn all(&self) -> &[String] {
        &self.entries
    }

    /// Last `n` entries, oldest first.
    pub fn last(&self, n: usize) -> &[String] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// `history -r file`: append each nonempty line of `file` to the store,
    /// raising indices.
    pub fn read_from(&mut self, path: &Path) -> std::io::Result<()> {
        let content = std::fs::read_to_string(path)?;
        for line in content.lines() {
            if !line.trim().is_empty() {
                self.entries.push(line.to_string());
            }
        }
        Ok(())
    }

    /// `history -w file`: write the full store to `file`.
    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        ensure_parent(path)?;
        let mut file = std::fs::File::create(path)?;
        for entry in &self.entries {
            writeln!(file, "{}", entry)?;
        }
        Ok(())
    }

    /// `history -a file`: append entries from `append_cursor` to the end to
    /// `file`, then advance the cursor.
    pub fn append_to(&mut self, path: &Path) -> std::io::Result<()> {
        ensure_parent(path)?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        for entry in &self.entries[self.append_cursor..] {
            writeln!(file, "{}", entry)?;
        }
        self.append_cursor = self.entries.len();
        Ok(())
    }

    /// Flush the tail from `baseline_size` to the end to `path`, as performed
    /// on normal shell exit.
    pub fn flush_tail(&self, path: &Path) -> std::io::Result<()> {
        ensure_parent(path)?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        for entry in &self.entries[self.baseline_size..] {
            writeln!(file, "{}", entry)?;
        }
        Ok(())
    }
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_skips_blank_lines_and_sets_baseline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hist.txt");
        std::fs::write(&path, "a\n\nb\n   \nc\n").unwrap();
        let store = HistoryStore::load(&path).unwrap();
        assert_eq!(store.all(), &["a", "b", "c"]);
        assert_eq!(store.baseline_size(), 3);
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        let store = HistoryStore::load(&path).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.baseline_size(), 0);
    }

    #[test]
    fn push_grows_past_baseline() {
        let mut store = HistoryStore::new();
        store.push("a".into());
        store.push("b".into());
        assert_eq!(store.len(), 2);
        assert_eq!(store.last(1), &["b"]);
    }

    #[test]
    fn write_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a");
        let mut store = HistoryStore::new();
        store.push("one".into());
        store.push("two".into());
        store.write_to(&path).unwrap();

        let reloaded = HistoryStore::load(&path).unwrap();
        assert_eq!(reloaded.all(), &["one", "two"]);
    }

    #[test]
    fn append_to_advances_cursor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hist.txt");
        let mut store = HistoryStore::new();
        store.push("a".into());
        store.push("b".into());
        store.append_to(&path).unwrap();
        assert_eq!(store.append_cursor(), 2);

        store.push("c".into());
        store.append_to(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "a\nb\nc\n");
    }

    #[test]
    fn flush_tail_only_writes_entries_after_baseline() {
        let dir = tempfile::tempdir().unwrap();
        let load_path = dir.path().join("hist.txt");
        std::fs::write(&load_path, "old\n").unwrap();
        let mut store = HistoryStore::load(&load_path).unwrap();
        store.push("new1".into());
        store.push("new2".into());

        let flush_path = dir.path().join("sub/flushed.txt");
        store.flush_tail(&flush_path).unwrap();
        let content = std::fs::read_to_string(&flush_path).unwrap();
        assert_eq!(content, "new1\nnew2\n");
    }
}
