//! JSON file persistence for books: atomic writes, timestamped backups with
//! bounded retention, and a state file remembering the last opened book.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{domain::BusinessUnit, errors::LedgerError};

use super::{Result, StorageBackend};

const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    last_book: Option<String>,
}

#[derive(Clone)]
pub struct JsonStorage {
    books_dir: PathBuf,
    backups_dir: PathBuf,
    state_file: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let root = root.unwrap_or_else(default_base_dir);
        let books_dir = root.join("books");
        let backups_dir = root.join("backups");
        fs::create_dir_all(&books_dir)?;
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            books_dir,
            backups_dir,
            state_file: root.join("state.json"),
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None, None)
    }

    pub fn book_path(&self, name: &str) -> PathBuf {
        self.books_dir.join(format!("{}.json", canonical_name(name)))
    }

    fn backup_dir(&self, name: &str) -> PathBuf {
        self.backups_dir.join(canonical_name(name))
    }

    fn read_state(&self) -> Result<StoreState> {
        if self.state_file.exists() {
            let data = fs::read_to_string(&self.state_file)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(StoreState::default())
        }
    }

    fn prune_backups(&self, dir: &Path) -> Result<()> {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("json"))
            .collect();
        // Timestamped names sort chronologically.
        files.sort();
        while files.len() > self.retention {
            let oldest = files.remove(0);
            fs::remove_file(oldest)?;
        }
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, book: &BusinessUnit, name: &str) -> Result<()> {
        save_book_to_path(book, &self.book_path(name))
    }

    fn load(&self, name: &str) -> Result<BusinessUnit> {
        let path = self.book_path(name);
        if !path.exists() {
            return Err(LedgerError::Persistence(format!(
                "book `{name}` not found"
            )));
        }
        load_book_from_path(&path)
    }

    fn list_backups(&self, name: &str) -> Result<Vec<String>> {
        let dir = self.backup_dir(name);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut names: Vec<String> = fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("json"))
            .filter_map(|path| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(str::to_string)
            })
            .collect();
        names.sort();
        names.reverse();
        Ok(names)
    }

    fn backup(&self, book: &BusinessUnit, name: &str, note: Option<&str>) -> Result<()> {
        let dir = self.backup_dir(name);
        fs::create_dir_all(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT);
        let file_name = match note.map(slugify).filter(|slug| !slug.is_empty()) {
            Some(slug) => format!("{}_{}_{}.json", canonical_name(name), timestamp, slug),
            None => format!("{}_{}.json", canonical_name(name), timestamp),
        };
        save_book_to_path(book, &dir.join(file_name))?;
        self.prune_backups(&dir)
    }

    fn restore(&self, name: &str, backup_name: &str) -> Result<BusinessUnit> {
        let path = self.backup_dir(name).join(format!("{backup_name}.json"));
        if !path.exists() {
            return Err(LedgerError::Persistence(format!(
                "backup `{backup_name}` not found for book `{name}`"
            )));
        }
        let book = load_book_from_path(&path)?;
        self.save(&book, name)?;
        Ok(book)
    }

    fn last_book(&self) -> Result<Option<String>> {
        Ok(self.read_state()?.last_book)
    }

    fn record_last_book(&self, name: Option<&str>) -> Result<()> {
        let mut state = self.read_state()?;
        state.last_book = name.map(canonical_name);
        let data = serde_json::to_string_pretty(&state)?;
        write_atomic(&self.state_file, &data)
    }
}

pub fn save_book_to_path(book: &BusinessUnit, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(book)?;
    write_atomic(path, &json)?;
    tracing::debug!(path = %path.display(), "book saved");
    Ok(())
}

pub fn load_book_from_path(path: &Path) -> Result<BusinessUnit> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn default_base_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ledger-core")
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let tmp = path.with_extension(TMP_SUFFIX);
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn canonical_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

fn slugify(note: &str) -> String {
    note.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect()
}
