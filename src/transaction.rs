//! Loan transactions and the CSV command records that drive them.

use crate::money::Money;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One issue-to-return loan record.
///
/// Created on a successful issue and mutated exactly once, on return.
/// Serializes as a ledger CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    /// Unique transaction identifier, e.g. `T1001`
    #[serde(rename = "tx")]
    pub id: String,

    #[serde(rename = "borrower")]
    pub borrower_id: String,

    #[serde(rename = "item")]
    pub item_id: String,

    pub issued_at: DateTime<Utc>,

    /// Unset while the loan is open
    pub returned_at: Option<DateTime<Utc>>,

    /// Zero until the loan is closed
    pub fine: Money,

    #[serde(skip)]
    pub returned: bool,
}

impl Transaction {
    /// Creates an open (unreturned) transaction.
    pub fn open(
        id: impl Into<String>,
        borrower_id: impl Into<String>,
        item_id: impl Into<String>,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Transaction {
            id: id.into(),
            borrower_id: borrower_id.into(),
            item_id: item_id.into(),
            issued_at,
            returned_at: None,
            fine: Money::ZERO,
            returned: false,
        }
    }

    /// Returns `true` while the item has not come back.
    pub fn is_open(&self) -> bool {
        !self.returned
    }

    /// Returns `true` if this transaction is for the given pair.
    pub fn matches(&self, borrower_id: &str, item_id: &str) -> bool {
        self.borrower_id == borrower_id && self.item_id == item_id
    }

    /// Closes the loan. A second call is a no-op and returns `false`.
    pub(crate) fn close(&mut self, returned_at: DateTime<Utc>, fine: Money) -> bool {
        if self.returned {
            return false;
        }

        self.returned_at = Some(returned_at);
        self.fine = fine;
        self.returned = true;
        true
    }
}

/// Raw command record as read from CSV.
#[derive(Debug, Deserialize)]
pub struct CommandRecord {
    /// Command type: issue, return
    #[serde(rename = "type")]
    pub cmd_type: String,

    pub borrower: String,

    pub item: String,

    /// Optional RFC 3339 timestamp or `YYYY-MM-DD` date
    pub date: Option<String>,
}

impl CommandRecord {
    /// Parses the raw CSV record into a typed command.
    ///
    /// Returns `None` if the record is invalid (unknown type, empty ids,
    /// unparseable date).
    pub fn parse(&self) -> Option<Command> {
        let borrower = self.borrower.trim();
        let item = self.item.trim();
        if borrower.is_empty() || item.is_empty() {
            return None;
        }

        let kind = match self.cmd_type.trim().to_lowercase().as_str() {
            "issue" => CommandKind::Issue,
            "return" => CommandKind::Return,
            _ => return None,
        };

        let at = match self.date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_timestamp(raw)?),
        };

        Some(Command {
            kind,
            borrower: borrower.to_string(),
            item: item.to_string(),
            at,
        })
    }
}

/// Accepts a full RFC 3339 timestamp or a bare date at midnight UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// A parsed and validated command ready for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    pub borrower: String,
    pub item: String,

    /// When the command happened; `None` means now
    pub at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Lend an item, or queue a reservation if it is out.
    Issue,

    /// Bring an item back and service the reservation queue.
    Return,
}
