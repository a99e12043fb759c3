//! Borrower model and loan bookkeeping.
//!
//! Maintains the invariant: `held.len() <= max_loans` at all times.

use crate::index::Record;
use serde::Serialize;

/// Represents a registered borrower and the items they currently hold.
///
/// # Invariants
///
/// - `held.len() <= max_loans` after every operation
/// - `held` is in issue order, oldest loan first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Borrower {
    /// Unique borrower identifier.
    pub id: String,

    pub name: String,

    pub contact: String,

    /// Identifiers of items currently on loan to this borrower.
    held: Vec<String>,

    /// Maximum number of concurrent loans.
    max_loans: usize,
}

impl Borrower {
    /// Default concurrent-loan limit.
    pub const DEFAULT_MAX_LOANS: usize = 3;

    /// Creates a borrower with the default loan limit and nothing on loan.
    pub fn new(id: impl Into<String>, name: impl Into<String>, contact: impl Into<String>) -> Self {
        Borrower::with_limit(id, name, contact, Self::DEFAULT_MAX_LOANS)
    }

    /// Creates a borrower with an explicit loan limit.
    pub fn with_limit(
        id: impl Into<String>,
        name: impl Into<String>,
        contact: impl Into<String>,
        max_loans: usize,
    ) -> Self {
        Borrower {
            id: id.into(),
            name: name.into(),
            contact: contact.into(),
            held: Vec::new(),
            max_loans,
        }
    }

    pub fn held(&self) -> &[String] {
        &self.held
    }

    pub fn max_loans(&self) -> usize {
        self.max_loans
    }

    /// Returns `true` if the borrower may not take another item.
    pub fn at_limit(&self) -> bool {
        self.held.len() >= self.max_loans
    }

    /// Returns `true` if `item_id` is currently on loan to this borrower.
    pub fn holds(&self, item_id: &str) -> bool {
        self.held.iter().any(|h| h == item_id)
    }

    /// Records a new loan.
    ///
    /// Returns `false` (and changes nothing) if the borrower is at their limit.
    pub(crate) fn take(&mut self, item_id: &str) -> bool {
        if self.at_limit() {
            return false;
        }

        self.held.push(item_id.to_string());
        true
    }

    /// Removes the first held entry for `item_id`.
    ///
    /// Returns `false` if the borrower did not hold it.
    pub(crate) fn release(&mut self, item_id: &str) -> bool {
        match self.held.iter().position(|h| h == item_id) {
            Some(idx) => {
                self.held.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Verifies the invariant: `held.len() <= max_loans`.
    pub fn check_invariant(&self) -> bool {
        self.held.len() <= self.max_loans
    }
}

impl Record for Borrower {
    fn id(&self) -> &str {
        &self.id
    }
}
