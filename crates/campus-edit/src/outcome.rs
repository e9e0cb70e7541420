//! Outcome reporting for the coordinator operations.
//!
//! Capability rejections are absorbed at the save/remove boundary and
//! reported as enum variants; no rejection escapes the engine's public
//! async functions.

/// Result of a `save` or `auto_save` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The capability confirmed the save; snapshots and ledger updated.
    Saved,
    /// Auto-save found the live value equal to the committed value and
    /// made no capability call.
    Unchanged,
    /// A save for this cell was already in flight; the call was a
    /// silent no-op.
    AlreadySaving,
    /// The value was empty; rolled back locally, no capability call.
    RejectedEmpty,
    /// The capability rejected; the field was rolled back and the
    /// message recorded in the error map.
    Failed(String),
    /// The row is not in the row store.
    UnknownRow,
    /// The row disappeared while the capability call was in flight;
    /// the resolution was discarded.
    Superseded,
}

impl SaveOutcome {
    /// Whether the live row now matches server truth for this field.
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Saved | Self::Unchanged)
    }
}

/// Result of a `remove` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Row deleted on the server and purged from all tracking state.
    Removed,
    /// The user dismissed the confirm prompt; nothing changed.
    Cancelled,
    /// A delete for this row was already in flight.
    AlreadyRemoving,
    /// The capability rejected; the row and its tracking state remain.
    Failed(String),
    /// The row is not in the row store.
    UnknownRow,
}
