//! Thread-safe handle around a single engine.

use crate::activity::DEFAULT_RECENT_COUNT;
use crate::borrower::Borrower;
use crate::engine::{IssueOutcome, LibraryEngine, ReturnOutcome, StatusReport};
use crate::error::{EngineError, Result};
use crate::item::Item;
use crate::transaction::Transaction;
use std::sync::{Arc, Mutex, MutexGuard};

/// A cloneable handle that serializes every engine operation behind one lock.
///
/// Issue and return read and then write item, borrower, ledger and queue
/// state, and a return can chain into an issue, so the whole engine is one
/// consistency domain. Reads hand back owned copies taken under the lock.
#[derive(Debug, Clone, Default)]
pub struct SharedLibrary {
    inner: Arc<Mutex<LibraryEngine>>,
}

impl SharedLibrary {
    pub fn new(engine: LibraryEngine) -> Self {
        SharedLibrary {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, LibraryEngine>> {
        self.inner.lock().map_err(|_| EngineError::LockPoisoned)
    }

    pub fn issue(&self, borrower_id: &str, item_id: &str) -> Result<IssueOutcome> {
        self.lock()?.issue(borrower_id, item_id)
    }

    pub fn return_item(&self, borrower_id: &str, item_id: &str) -> Result<ReturnOutcome> {
        self.lock()?.return_item(borrower_id, item_id)
    }

    pub fn list_items(&self) -> Result<Vec<Item>> {
        Ok(self.lock()?.list_items().to_vec())
    }

    pub fn list_borrowers(&self) -> Result<Vec<Borrower>> {
        Ok(self.lock()?.list_borrowers().to_vec())
    }

    pub fn sort_items_by_identifier(&self) -> Result<()> {
        self.lock()?.sort_items_by_identifier();
        Ok(())
    }

    pub fn recent_activity(&self, count: usize) -> Result<Vec<Transaction>> {
        Ok(self.lock()?.recent_activity(count))
    }

    pub fn recent_activity_default(&self) -> Result<Vec<Transaction>> {
        self.recent_activity(DEFAULT_RECENT_COUNT)
    }

    pub fn status_report(&self) -> Result<StatusReport> {
        Ok(self.lock()?.status_report())
    }

    pub fn check_invariants(&self) -> Result<bool> {
        Ok(self.lock()?.check_invariants())
    }

    /// Runs `f` with exclusive access to the engine.
    pub fn with_engine<T>(&self, f: impl FnOnce(&mut LibraryEngine) -> T) -> Result<T> {
        let mut engine = self.lock()?;
        Ok(f(&mut engine))
    }
}
