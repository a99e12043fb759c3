//! # Library Engine
//!
//! The transaction and availability engine of a lending catalog: issue and
//! return items, assess overdue fines, and queue reservations for items that
//! are out.
//!
//! ## Design Principles
//!
//! - **Single owner**: the engine owns every item, borrower and transaction;
//!   callers get read-only slices or cloned snapshots
//! - **Permanent ledger**: transactions are append-only history
//! - **Typed outcomes**: "queued" is a success, distinct from every error
//! - **Strict invariants**: an item is out iff exactly one open loan names it
//!
//! ## Example
//!
//! ```
//! use library_engine::{Borrower, IssueOutcome, Item, LibraryEngine};
//!
//! let mut engine = LibraryEngine::new();
//! engine.add_item(Item::book("B001", "Design Patterns", "Gamma et al.", "SE")).unwrap();
//! engine.add_borrower(Borrower::new("M001", "John Doe", "john@example.com")).unwrap();
//! engine.add_borrower(Borrower::new("M002", "Jane Smith", "jane@example.com")).unwrap();
//!
//! assert!(matches!(engine.issue("M001", "B001").unwrap(), IssueOutcome::Issued(_)));
//! assert!(engine.issue("M002", "B001").unwrap().is_queued());
//!
//! let outcome = engine.return_item("M001", "B001").unwrap();
//! assert!(outcome.reservation.unwrap().result.is_ok());
//! ```

pub mod activity;
pub mod borrower;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod fine;
pub mod ids;
pub mod index;
pub mod item;
pub mod ledger;
pub mod money;
pub mod reservation;
pub mod shared;
pub mod transaction;

pub use activity::{RecentActivity, DEFAULT_RECENT_COUNT};
pub use borrower::Borrower;
pub use catalog::{CatalogEntry, CatalogRecord};
pub use engine::{
    EngineConfig, IssueOutcome, LibraryEngine, OverdueLoan, ReservationFulfillment,
    ReturnOutcome, StatusReport,
};
pub use error::{EngineError, Result};
pub use fine::FinePolicy;
pub use ids::TransactionIdGenerator;
pub use index::{Circulating, Record, RecordIndex};
pub use item::{Item, ItemKind};
pub use ledger::Ledger;
pub use money::Money;
pub use reservation::{Reservation, ReservationQueue};
pub use shared::SharedLibrary;
pub use transaction::{Command, CommandKind, CommandRecord, Transaction};
