//! Capability seams the engine depends on but does not implement.
//!
//! The transport layer, the confirm dialog, and the toast surface all
//! live outside this crate. The engine sees them as three traits:
//! [`EditBackend`] (update/delete), [`ConfirmPrompt`], and the
//! [`Notifier`](crate::notify::Notifier) in `notify.rs`.

use std::sync::Arc;

use campus_model::{Patch, RowKey};
use thiserror::Error;

/// Rejection from the update or delete capability.
///
/// The engine treats every variant identically for state purposes
/// (rollback and record the message); classification only picks the
/// notification severity for explicit saves.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum BackendError {
    /// The server rejected the request with an HTTP-like status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a server answer.
    #[error("transport error: {0}")]
    Transport(String),
}

impl BackendError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Whether this looks like something the user can correct
    /// (validation failure, conflict) rather than a system fault.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::Rejected { status, .. } => (400..500).contains(status),
            Self::Transport(_) => false,
        }
    }
}

/// Asynchronous update/delete capability, typically a REST client.
///
/// Both methods must reject (`Err`) on any failure; a resolved `update`
/// may return a patch of server-asserted field values which the engine
/// merges back into the row as authoritative.
// Callers drive these futures from the UI event loop; no Send bound is
// required of implementations.
#[allow(async_fn_in_trait)]
pub trait EditBackend {
    async fn update(&self, id: &RowKey, patch: Patch) -> Result<Patch, BackendError>;

    async fn delete(&self, id: &RowKey) -> Result<(), BackendError>;
}

impl<T: EditBackend> EditBackend for Arc<T> {
    async fn update(&self, id: &RowKey, patch: Patch) -> Result<Patch, BackendError> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: &RowKey) -> Result<(), BackendError> {
        (**self).delete(id).await
    }
}

/// Blocking yes/no prompt shown before a row delete.
///
/// Dismissal is an ordinary outcome (`false`), not an error.
#[allow(async_fn_in_trait)]
pub trait ConfirmPrompt {
    async fn confirm_delete(&self, summary: &str) -> bool;
}

impl<T: ConfirmPrompt> ConfirmPrompt for Arc<T> {
    async fn confirm_delete(&self, summary: &str) -> bool {
        (**self).confirm_delete(summary).await
    }
}

/// Prompt that confirms every delete, for tables whose delete flow is
/// confirmed elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl ConfirmPrompt for AlwaysConfirm {
    async fn confirm_delete(&self, _summary: &str) -> bool {
        true
    }
}
