use crate::domain::business_unit::{BusinessUnit, CURRENT_SCHEMA_VERSION};
use crate::errors::LedgerError;
use crate::storage::StorageBackend;

/// Facade that coordinates the open book, persistence, and backups.
pub struct BookManager {
    pub current: Option<BusinessUnit>,
    current_name: Option<String>,
    storage: Box<dyn StorageBackend>,
}

impl BookManager {
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self {
            current: None,
            current_name: None,
            storage,
        }
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    pub fn open(&mut self, name: &str) -> Result<(), LedgerError> {
        let book = self.storage.load(name)?;
        self.ensure_schema_support(book.schema_version)?;
        self.current = Some(book);
        self.current_name = Some(name.to_string());
        self.storage.record_last_book(Some(name))?;
        Ok(())
    }

    pub fn save(&mut self) -> Result<(), LedgerError> {
        let name = self
            .current_name
            .clone()
            .ok_or_else(|| LedgerError::Persistence("current book is unnamed".into()))?;
        let book = self
            .current
            .as_ref()
            .ok_or_else(|| LedgerError::Persistence("no book open".into()))?;
        self.storage.save(book, &name)
    }

    pub fn save_as(&mut self, name: &str) -> Result<(), LedgerError> {
        let book = self
            .current
            .as_ref()
            .ok_or_else(|| LedgerError::Persistence("no book open".into()))?;
        self.storage.save(book, name)?;
        self.current_name = Some(name.to_string());
        self.storage.record_last_book(Some(name))?;
        Ok(())
    }

    pub fn backup(&self, note: Option<&str>) -> Result<(), LedgerError> {
        let name = self
            .current_name
            .as_deref()
            .ok_or_else(|| LedgerError::Persistence("current book is unnamed".into()))?;
        let book = self
            .current
            .as_ref()
            .ok_or_else(|| LedgerError::Persistence("no book open".into()))?;
        self.storage.backup(book, name, note)
    }

    pub fn list_backups(&self, name: &str) -> Result<Vec<String>, LedgerError> {
        self.storage.list_backups(name)
    }

    pub fn restore(&mut self, name: &str, backup_name: &str) -> Result<(), LedgerError> {
        let book = self.storage.restore(name, backup_name)?;
        self.ensure_schema_support(book.schema_version)?;
        self.current = Some(book);
        self.current_name = Some(name.to_string());
        Ok(())
    }

    pub fn last_opened(&self) -> Result<Option<String>, LedgerError> {
        self.storage.last_book()
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current_name.as_deref()
    }

    pub fn set_current(&mut self, book: BusinessUnit, name: Option<String>) {
        self.current = Some(book);
        self.current_name = name;
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.current_name = None;
    }

    fn ensure_schema_support(&self, schema_version: u8) -> Result<(), LedgerError> {
        if schema_version > CURRENT_SCHEMA_VERSION {
            return Err(LedgerError::Persistence(format!(
                "book schema v{} is newer than supported v{}",
                schema_version, CURRENT_SCHEMA_VERSION
            )));
        }
        Ok(())
    }
}
