//! Transaction identifier generation.

use crate::error::{EngineError, Result};

/// Hands out unique transaction identifiers (`T1001`, `T1002`, ...).
///
/// Owned by the engine, so two engines never share a sequence.
#[derive(Debug, Clone)]
pub struct TransactionIdGenerator {
    last: u32,
}

impl TransactionIdGenerator {
    /// The first identifier produced is `T{start + 1}`.
    pub fn starting_after(start: u32) -> Self {
        TransactionIdGenerator { last: start }
    }

    /// Fails with [`EngineError::Overflow`] once the sequence is exhausted;
    /// the generator is left unchanged.
    pub fn next_id(&mut self) -> Result<String> {
        self.last = self
            .last
            .checked_add(1)
            .ok_or(EngineError::Overflow {
                what: "transaction id",
            })?;
        Ok(format!("T{}", self.last))
    }
}
