//! Core lending engine.
//!
//! Coordinates the catalog, the ledger, the reservation queue and the
//! recent-activity view. It is the only place that flips item availability or
//! changes what a borrower holds.

use crate::activity::{RecentActivity, DEFAULT_RECENT_COUNT};
use crate::borrower::Borrower;
use crate::catalog::{CatalogEntry, CatalogRecord};
use crate::error::{EngineError, Result};
use crate::fine::FinePolicy;
use crate::ids::TransactionIdGenerator;
use crate::index::{Circulating, Record, RecordIndex};
use crate::item::Item;
use crate::ledger::Ledger;
use crate::money::Money;
use crate::reservation::{Reservation, ReservationQueue};
use crate::transaction::{Command, CommandKind, CommandRecord, Transaction};
use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use log::{debug, info, warn};
use serde::Serialize;
use std::io::{Read, Write};

/// Tunable engine settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Loan limit for catalog members that do not specify one.
    pub default_max_loans: usize,

    pub fine_policy: FinePolicy,

    /// Transaction numbering starts right after this value.
    pub first_transaction_number: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            default_max_loans: Borrower::DEFAULT_MAX_LOANS,
            fine_policy: FinePolicy::default(),
            first_transaction_number: 1000,
        }
    }
}

/// Result of a successful issue request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueOutcome {
    /// The item was lent out.
    Issued(Transaction),

    /// The item was already on loan; the request joined the reservation queue.
    Queued(Reservation),
}

impl IssueOutcome {
    pub fn transaction(&self) -> Option<&Transaction> {
        match self {
            IssueOutcome::Issued(tx) => Some(tx),
            IssueOutcome::Queued(_) => None,
        }
    }

    pub fn is_queued(&self) -> bool {
        matches!(self, IssueOutcome::Queued(_))
    }
}

/// Result of a successful return.
#[derive(Debug)]
pub struct ReturnOutcome {
    /// The closed transaction, fine assessed.
    pub transaction: Transaction,

    /// Set when the returned item was at the head of the reservation queue.
    pub reservation: Option<ReservationFulfillment>,
}

/// The follow-on issue attempted for a dequeued reservation.
///
/// A failed attempt does not undo the return that triggered it.
#[derive(Debug)]
pub struct ReservationFulfillment {
    pub reservation: Reservation,
    pub result: Result<IssueOutcome>,
}

/// Catalog availability counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub total: usize,
    pub available: usize,
    pub issued: usize,
}

/// An open loan past its grace period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverdueLoan {
    pub transaction: Transaction,
    pub days_out: i64,

    /// Fine that would be charged if the item came back now.
    pub accrued_fine: Money,
}

/// The lending engine.
///
/// Owns every item, borrower and transaction. Callers get read-only slices or
/// cloned snapshots, never ownership.
///
/// # Invariants
///
/// - An item is unavailable iff exactly one open transaction references it
/// - No borrower holds more items than their limit
#[derive(Debug, Clone)]
pub struct LibraryEngine {
    config: EngineConfig,
    items: RecordIndex<Item>,
    borrowers: RecordIndex<Borrower>,
    ledger: Ledger,
    reservations: ReservationQueue,
    activity: RecentActivity,
    ids: TransactionIdGenerator,
}

impl LibraryEngine {
    /// Creates an empty engine with default settings.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        LibraryEngine {
            ids: TransactionIdGenerator::starting_after(config.first_transaction_number),
            config,
            items: RecordIndex::new(),
            borrowers: RecordIndex::new(),
            ledger: Ledger::new(),
            reservations: ReservationQueue::new(),
            activity: RecentActivity::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Adds an item to the catalog. It starts on the shelf.
    pub fn add_item(&mut self, mut item: Item) -> Result<()> {
        item.set_available(true);
        self.items.add(item)
    }

    pub fn add_borrower(&mut self, borrower: Borrower) -> Result<()> {
        self.borrowers.add(borrower)
    }

    /// Loads items and members from a catalog CSV in streaming fashion.
    ///
    /// Invalid and duplicate rows are logged at warn level and skipped.
    /// Returns the number of records added.
    pub fn load_catalog_csv<R: Read>(&mut self, reader: R) -> Result<usize> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut loaded = 0;
        for (row_idx, result) in csv_reader.deserialize::<CatalogRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!("Catalog row {}: CSV parse error: {}", row_num, e);
                    continue;
                }
            };

            let added = match record.parse(self.config.default_max_loans) {
                Some(CatalogEntry::Item(item)) => self.add_item(item),
                Some(CatalogEntry::Borrower(borrower)) => self.add_borrower(borrower),
                None => {
                    warn!("Catalog row {}: Failed to parse catalog record", row_num);
                    continue;
                }
            };

            match added {
                Ok(()) => loaded += 1,
                Err(e) => warn!("Catalog row {}: {}", row_num, e),
            }
        }

        debug!("Loaded {} catalog records", loaded);
        Ok(loaded)
    }

    /// Applies issue/return commands from a CSV reader in streaming fashion.
    ///
    /// Rejected commands are logged at warn level and skipped; they never
    /// abort the stream.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (row_idx, result) in csv_reader.deserialize::<CommandRecord>().enumerate() {
            let row_num = row_idx + 2;

            match result {
                Ok(record) => {
                    if let Some(cmd) = record.parse() {
                        if let Err(e) = self.apply(cmd, row_num) {
                            warn!("Row {}: {}", row_num, e);
                        }
                    } else {
                        warn!("Row {}: Failed to parse command record", row_num);
                    }
                }
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row_num, e);
                }
            }
        }

        Ok(())
    }

    /// Applies a single parsed command.
    fn apply(&mut self, cmd: Command, row: usize) -> Result<()> {
        let at = cmd.at.unwrap_or_else(Utc::now);

        match cmd.kind {
            CommandKind::Issue => match self.issue_at(&cmd.borrower, &cmd.item, at)? {
                IssueOutcome::Issued(tx) => {
                    debug!(
                        "Row {}: Issued {} to {} as {}",
                        row, tx.item_id, tx.borrower_id, tx.id
                    );
                }
                IssueOutcome::Queued(_) => {
                    info!(
                        "Row {}: Item {} unavailable, {} added to reservation queue",
                        row, cmd.item, cmd.borrower
                    );
                }
            },
            CommandKind::Return => {
                let outcome = self.return_item_at(&cmd.borrower, &cmd.item, at)?;
                debug!(
                    "Row {}: Returned {} from {} ({}), fine {}",
                    row,
                    outcome.transaction.item_id,
                    outcome.transaction.borrower_id,
                    outcome.transaction.id,
                    outcome.transaction.fine
                );
            }
        }

        Ok(())
    }

    /// Issues an item now. See [`issue_at`](Self::issue_at).
    pub fn issue(&mut self, borrower_id: &str, item_id: &str) -> Result<IssueOutcome> {
        self.issue_at(borrower_id, item_id, Utc::now())
    }

    /// Issues an item to a borrower at the given time.
    ///
    /// An item already on loan is not an error: the request is queued and
    /// [`IssueOutcome::Queued`] returned. Otherwise the borrower must be under
    /// their loan limit. A failed issue changes nothing.
    pub fn issue_at(
        &mut self,
        borrower_id: &str,
        item_id: &str,
        at: DateTime<Utc>,
    ) -> Result<IssueOutcome> {
        let borrower = self
            .borrowers
            .find_mut(borrower_id)
            .ok_or_else(|| EngineError::UnknownBorrower {
                borrower: borrower_id.to_string(),
            })?;
        let item = self
            .items
            .find_mut(item_id)
            .ok_or_else(|| EngineError::UnknownItem {
                item: item_id.to_string(),
            })?;

        if !item.is_available() {
            let reservation = Reservation::new(borrower_id, item_id);
            self.reservations.enqueue(reservation.clone());
            return Ok(IssueOutcome::Queued(reservation));
        }

        if borrower.at_limit() {
            return Err(EngineError::IssueLimitExceeded {
                borrower: borrower_id.to_string(),
                limit: borrower.max_loans(),
            });
        }
        let tx_id = self.ids.next_id()?;

        let taken = borrower.take(item_id);
        debug_assert!(taken);
        item.set_available(false);

        let tx = self.ledger.open(tx_id, borrower_id, item_id, at).clone();
        self.activity.record(&tx.id);

        debug_assert!(self.check_invariants());
        Ok(IssueOutcome::Issued(tx))
    }

    /// Returns an item now. See [`return_item_at`](Self::return_item_at).
    pub fn return_item(&mut self, borrower_id: &str, item_id: &str) -> Result<ReturnOutcome> {
        self.return_item_at(borrower_id, item_id, Utc::now())
    }

    /// Takes an item back from a borrower at the given time.
    ///
    /// Closes the loan and assesses the fine. If the head of the reservation
    /// queue is waiting for this item, it is dequeued and issued in the same
    /// call; that follow-on issue may fail without affecting the return.
    pub fn return_item_at(
        &mut self,
        borrower_id: &str,
        item_id: &str,
        at: DateTime<Utc>,
    ) -> Result<ReturnOutcome> {
        let borrower = self
            .borrowers
            .find_mut(borrower_id)
            .ok_or_else(|| EngineError::UnknownBorrower {
                borrower: borrower_id.to_string(),
            })?;
        let item = self
            .items
            .find_mut(item_id)
            .ok_or_else(|| EngineError::UnknownItem {
                item: item_id.to_string(),
            })?;

        let tx = self
            .ledger
            .close(borrower_id, item_id, at, &self.config.fine_policy)?
            .clone();
        let released = borrower.release(item_id);
        debug_assert!(
            released,
            "{} closed a loan on {} it did not hold",
            borrower_id, item_id
        );
        item.set_available(true);
        self.activity.record(&tx.id);

        debug_assert!(self.check_invariants());

        let reservation = match self.reservations.dequeue_for(item_id) {
            Some(reservation) => {
                info!(
                    "Item {} has a reservation for {}, processing",
                    item_id, reservation.borrower_id
                );
                let result = self.issue_at(&reservation.borrower_id, &reservation.item_id, at);
                if let Err(e) = &result {
                    warn!("Could not process reservation: {}", e);
                }
                Some(ReservationFulfillment {
                    reservation,
                    result,
                })
            }
            None => None,
        };

        Ok(ReturnOutcome {
            transaction: tx,
            reservation,
        })
    }

    /// All items in catalog order.
    pub fn list_items(&self) -> &[Item] {
        self.items.list()
    }

    /// All borrowers in registration order.
    pub fn list_borrowers(&self) -> &[Borrower] {
        self.borrowers.list()
    }

    pub fn find_item(&self, item_id: &str) -> Option<&Item> {
        self.items.find(item_id)
    }

    pub fn find_borrower(&self, borrower_id: &str) -> Option<&Borrower> {
        self.borrowers.find(borrower_id)
    }

    /// Reorders the catalog by item identifier.
    pub fn sort_items_by_identifier(&mut self) {
        self.items.sort_by_identifier();
    }

    /// Up to `count` transactions touched most recently, newest first.
    ///
    /// Each entry is a snapshot of the transaction's current state.
    pub fn recent_activity(&self, count: usize) -> Vec<Transaction> {
        self.activity
            .recent(count)
            .into_iter()
            .filter_map(|id| self.ledger.get(id))
            .cloned()
            .collect()
    }

    /// [`recent_activity`](Self::recent_activity) with the default count of 5.
    pub fn recent_activity_default(&self) -> Vec<Transaction> {
        self.recent_activity(DEFAULT_RECENT_COUNT)
    }

    pub fn status_report(&self) -> StatusReport {
        let total = self.items.len();
        let available = self
            .items
            .list()
            .iter()
            .filter(|item| item.is_available())
            .count();

        StatusReport {
            total,
            available,
            issued: total - available,
        }
    }

    /// Open loans that have run past the grace period as of `now`, oldest first.
    pub fn overdue_report_at(&self, now: DateTime<Utc>) -> Result<Vec<OverdueLoan>> {
        let policy = &self.config.fine_policy;

        self.ledger
            .open_transactions()
            .filter(|tx| FinePolicy::elapsed_days(tx.issued_at, now) > policy.grace_days)
            .map(|tx| {
                Ok(OverdueLoan {
                    transaction: tx.clone(),
                    days_out: FinePolicy::elapsed_days(tx.issued_at, now),
                    accrued_fine: policy.fine(tx.issued_at, now)?,
                })
            })
            .collect()
    }

    pub fn overdue_report(&self) -> Result<Vec<OverdueLoan>> {
        self.overdue_report_at(Utc::now())
    }

    /// Sum of every fine assessed so far.
    pub fn fines_total(&self) -> Money {
        self.ledger.all().iter().map(|tx| tx.fine).sum()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn reservations(&self) -> &ReservationQueue {
        &self.reservations
    }

    /// Verifies the cross-component invariants:
    ///
    /// - every item is unavailable iff the ledger has an open loan for it
    /// - every open loan's borrower holds the item
    /// - every held item has an open loan for that borrower
    /// - no borrower is over their limit
    pub fn check_invariants(&self) -> bool {
        let items_consistent = self.items.list().iter().all(|item| {
            match self.ledger.open_for_item(item.id()) {
                Some(tx) => {
                    !item.is_available()
                        && self
                            .borrowers
                            .find(&tx.borrower_id)
                            .map(|b| b.holds(item.id()))
                            .unwrap_or(false)
                }
                None => item.is_available(),
            }
        });

        let borrowers_consistent = self.borrowers.list().iter().all(|borrower| {
            borrower.check_invariant()
                && borrower.held().iter().all(|item_id| {
                    self.ledger
                        .open_for_item(item_id)
                        .map(|tx| tx.borrower_id == borrower.id)
                        .unwrap_or(false)
                })
        });

        items_consistent && borrowers_consistent
    }

    /// Writes the ledger to CSV in creation order.
    ///
    /// Open loans have an empty `returned_at` and a fine of `0.00`.
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

        csv_writer.write_record(["tx", "borrower", "item", "issued_at", "returned_at", "fine"])?;
        for tx in self.ledger.all() {
            csv_writer.serialize(tx)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

impl Default for LibraryEngine {
    fn default() -> Self {
        Self::new()
    }
}
