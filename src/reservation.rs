//! FIFO queue of deferred issue requests.

use serde::Serialize;
use std::collections::VecDeque;

/// A request to borrow an item that was on loan when asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reservation {
    pub borrower_id: String,
    pub item_id: String,
}

impl Reservation {
    pub fn new(borrower_id: impl Into<String>, item_id: impl Into<String>) -> Self {
        Reservation {
            borrower_id: borrower_id.into(),
            item_id: item_id.into(),
        }
    }
}

/// Strict FIFO of reservations.
///
/// Only the head is ever matched against a returned item. A reservation
/// sitting behind a head for a different item waits, even if its own item
/// comes back first.
#[derive(Debug, Clone, Default)]
pub struct ReservationQueue {
    entries: VecDeque<Reservation>,
}

impl ReservationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, reservation: Reservation) {
        self.entries.push_back(reservation);
    }

    /// Returns `true` if the head reservation is for `item_id`.
    pub fn peek_matches_item(&self, item_id: &str) -> bool {
        self.entries
            .front()
            .map(|r| r.item_id == item_id)
            .unwrap_or(false)
    }

    pub fn dequeue(&mut self) -> Option<Reservation> {
        self.entries.pop_front()
    }

    /// Pops the head only if it is for `item_id`.
    pub fn dequeue_for(&mut self, item_id: &str) -> Option<Reservation> {
        if self.peek_matches_item(item_id) {
            self.dequeue()
        } else {
            None
        }
    }

    /// Pending reservations, head first.
    pub fn iter(&self) -> impl Iterator<Item = &Reservation> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
