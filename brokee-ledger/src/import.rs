//! Statement import into a user's ledger.
//!
//! The import service owns no storage: category lookup and persistence are
//! the [`CategoryResolver`] and [`LedgerStore`] collaborators.

use std::collections::HashMap;

use brokee_ingest::{StatementImporter, TextSource};
use serde::Serialize;

use crate::entry::{CategoryId, LedgerEntry};
use crate::error::{LedgerError, Result};

pub const DEFAULT_IMPORT_CATEGORY: &str = "Revolut";
pub const PARSE_FAILURE_MESSAGE: &str = "Failed to parse PDF";

const STATUS_CREATED: u16 = 201;
const STATUS_BAD_REQUEST: u16 = 400;

pub trait CategoryResolver {
    /// Id of the category imported transactions are filed under, creating it
    /// if needed.
    fn import_category(&mut self) -> Result<CategoryId>;
}

pub trait LedgerStore {
    /// Save a whole statement's entries. Either every entry is kept or, on
    /// error, none of them are.
    fn persist_all(&mut self, entries: &[LedgerEntry]) -> Result<()>;
}

/// Outcome reported back to the caller of an import.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ImportReport {
    Success {
        entries: Vec<LedgerEntry>,
        message: String,
    },
    Failure {
        message: String,
    },
}

impl ImportReport {
    pub fn is_success(&self) -> bool {
        matches!(self, ImportReport::Success { .. })
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ImportReport::Success { .. } => STATUS_CREATED,
            ImportReport::Failure { .. } => STATUS_BAD_REQUEST,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ImportReport::Success { message, .. } | ImportReport::Failure { message } => message.as_str(),
        }
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        match self {
            ImportReport::Success { entries, .. } => entries.as_slice(),
            ImportReport::Failure { .. } => &[],
        }
    }
}

pub struct ImportService<C, S> {
    importer: StatementImporter,
    categories: C,
    store: S,
}

impl<C: CategoryResolver, S: LedgerStore> ImportService<C, S> {
    pub fn new(categories: C, store: S) -> Self {
        Self {
            importer: StatementImporter::new(),
            categories,
            store,
        }
    }

    /// Parse the statement behind `source` and file every row as a ledger
    /// entry for `user_sub`. Any failure yields a generic failure report.
    pub fn import_statement(&mut self, user_sub: &str, source: &impl TextSource) -> ImportReport {
        match self.try_import(user_sub, source) {
            Ok(entries) => {
                let message = format!("Imported {} revolut transactions", entries.len());
                tracing::info!(user = user_sub, count = entries.len(), "statement import done");
                ImportReport::Success { entries, message }
            }
            Err(e) => {
                tracing::warn!(user = user_sub, source = %source.name(), error = %e, "statement import failed");
                ImportReport::Failure {
                    message: PARSE_FAILURE_MESSAGE.to_string(),
                }
            }
        }
    }

    fn try_import(&mut self, user_sub: &str, source: &impl TextSource) -> Result<Vec<LedgerEntry>> {
        let records = self.importer.import(source)?;
        let category_id = self.categories.import_category()?;

        let entries: Vec<LedgerEntry> = records
            .iter()
            .map(|record| LedgerEntry::from_record(record, user_sub, category_id))
            .collect();
        self.store.persist_all(&entries)?;
        Ok(entries)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn categories(&self) -> &C {
        &self.categories
    }
}

/// Name-keyed categories with sequential ids.
#[derive(Debug, Clone)]
pub struct MemoryCategories {
    import_name: String,
    by_name: HashMap<String, CategoryId>,
    next_id: CategoryId,
}

impl MemoryCategories {
    pub fn new(import_name: impl Into<String>) -> Self {
        Self {
            import_name: import_name.into(),
            by_name: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn get_or_create(&mut self, name: &str) -> CategoryId {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.by_name.insert(name.to_string(), id);
        id
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl Default for MemoryCategories {
    fn default() -> Self {
        Self::new(DEFAULT_IMPORT_CATEGORY)
    }
}

impl CategoryResolver for MemoryCategories {
    fn import_category(&mut self) -> Result<CategoryId> {
        if self.import_name.trim().is_empty() {
            return Err(LedgerError::CategoryUnavailable {
                name: self.import_name.clone(),
                reason: "empty category name".to_string(),
            });
        }
        let name = self.import_name.clone();
        Ok(self.get_or_create(&name))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    entries: Vec<LedgerEntry>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn entries_for(&self, user_sub: &str) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter().filter(move |e| e.user_sub == user_sub)
    }
}

impl LedgerStore for MemoryLedger {
    fn persist_all(&mut self, entries: &[LedgerEntry]) -> Result<()> {
        self.entries.extend_from_slice(entries);
        Ok(())
    }
}
