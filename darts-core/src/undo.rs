//! Single-slot undo for the most recent throw.

use crate::turn::TurnSnapshot;
use serde::{Deserialize, Serialize};

/// Everything needed to take back one recorded throw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowReceipt {
    /// Scheduler state captured before the throw was applied.
    pub snapshot: TurnSnapshot,
    pub player: String,
    pub points: u32,
}

/// Holds at most one receipt. Taking it empties the slot, so the same throw
/// cannot be reversed twice.
#[derive(Debug, Clone, Default)]
pub struct UndoSlot {
    last: Option<ThrowReceipt>,
}

impl UndoSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever was stored with the newest receipt.
    pub fn store(&mut self, receipt: ThrowReceipt) {
        self.last = Some(receipt);
    }

    pub fn peek(&self) -> Option<&ThrowReceipt> {
        self.last.as_ref()
    }

    pub fn take(&mut self) -> Option<ThrowReceipt> {
        self.last.take()
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}
