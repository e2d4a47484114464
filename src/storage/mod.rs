pub mod json_backend;

use std::path::Path;

use crate::{domain::BusinessUnit, errors::LedgerError};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over persistence backends capable of storing books and
/// their backups.
pub trait StorageBackend: Send + Sync {
    fn save(&self, book: &BusinessUnit, name: &str) -> Result<()>;
    fn load(&self, name: &str) -> Result<BusinessUnit>;
    fn list_backups(&self, name: &str) -> Result<Vec<String>>;
    fn backup(&self, book: &BusinessUnit, name: &str, note: Option<&str>) -> Result<()>;
    fn restore(&self, name: &str, backup_name: &str) -> Result<BusinessUnit>;
    fn last_book(&self) -> Result<Option<String>>;
    fn record_last_book(&self, name: Option<&str>) -> Result<()>;

    /// Optional helpers for ad-hoc file operations. Default implementations
    /// use plain JSON files.
    fn save_to_path(&self, book: &BusinessUnit, path: &Path) -> Result<()> {
        json_backend::save_book_to_path(book, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<BusinessUnit> {
        json_backend::load_book_from_path(path)
    }
}

pub use json_backend::JsonStorage;
