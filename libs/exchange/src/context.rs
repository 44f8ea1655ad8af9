//! Execution context of a single call

use ethereum_types::Address;

use crate::error::{ExchangeError, ExchangeResult};

/// Who is calling and when
///
/// `timestamp` is the execution time of the serialized step the call runs
/// in. Deadlines are compared against it once, at entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    pub caller: Address,
    pub timestamp: u64,
}

impl CallContext {
    pub fn new(caller: Address, timestamp: u64) -> Self {
        Self { caller, timestamp }
    }

    /// Reject once `timestamp` has passed `deadline`; `timestamp == deadline` is accepted
    pub fn ensure_not_expired(&self, deadline: u64) -> ExchangeResult<()> {
        if self.timestamp > deadline {
            return Err(ExchangeError::Expired {
                deadline,
                now: self.timestamp,
            });
        }
        Ok(())
    }
}
