//! Append-only transaction ledger.
//!
//! The ledger is the source of truth for which item is on loan to whom.

use crate::error::{EngineError, Result};
use crate::fine::FinePolicy;
use crate::transaction::Transaction;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Permanent history of every loan, in creation order.
///
/// # Invariants
///
/// - At most one open transaction per item
/// - Transactions are never removed; only `close` mutates one, once
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,

    /// Position by transaction identifier.
    by_id: HashMap<String, usize>,

    /// Open transaction position by item identifier.
    open_by_item: HashMap<String, usize>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new open transaction and returns it.
    pub fn open(
        &mut self,
        tx_id: String,
        borrower_id: &str,
        item_id: &str,
        issued_at: DateTime<Utc>,
    ) -> &Transaction {
        let idx = self.transactions.len();
        self.by_id.insert(tx_id.clone(), idx);
        self.transactions
            .push(Transaction::open(tx_id, borrower_id, item_id, issued_at));
        self.open_by_item.insert(item_id.to_string(), idx);
        &self.transactions[idx]
    }

    /// Closes the open transaction for the borrower/item pair.
    ///
    /// Sets the return time, assesses the fine and marks it returned. Fails
    /// with [`EngineError::NoOpenTransaction`] and leaves the ledger untouched
    /// if no open transaction matches both identifiers, or with
    /// [`EngineError::Overflow`] if the fine cannot be represented.
    pub fn close(
        &mut self,
        borrower_id: &str,
        item_id: &str,
        returned_at: DateTime<Utc>,
        policy: &FinePolicy,
    ) -> Result<&Transaction> {
        let idx = self
            .open_by_item
            .get(item_id)
            .copied()
            .filter(|&idx| self.transactions[idx].matches(borrower_id, item_id))
            .ok_or_else(|| EngineError::NoOpenTransaction {
                borrower: borrower_id.to_string(),
                item: item_id.to_string(),
            })?;

        let fine = policy.fine(self.transactions[idx].issued_at, returned_at)?;

        self.open_by_item.remove(item_id);
        let tx = &mut self.transactions[idx];
        tx.close(returned_at, fine);
        Ok(&*tx)
    }

    /// The open transaction for an item, if it is on loan.
    pub fn open_for_item(&self, item_id: &str) -> Option<&Transaction> {
        self.open_by_item
            .get(item_id)
            .map(|&idx| &self.transactions[idx])
    }

    /// All open transactions, oldest first.
    pub fn open_transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(|tx| tx.is_open())
    }

    pub fn get(&self, tx_id: &str) -> Option<&Transaction> {
        self.by_id.get(tx_id).map(|&idx| &self.transactions[idx])
    }

    /// Every transaction in creation order.
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
