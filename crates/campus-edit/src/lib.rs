//! Optimistic inline-edit engine for Campus Studio editable tables.
//!
//! Every editable table (users, subjects, classes, schedule slots)
//! shares one state machine: per-cell asynchronous saves, multi-level
//! undo of committed values, reconciliation of optimistic UI state
//! against server-confirmed truth, and a guard against duplicate
//! submissions. This crate is that machine, parameterized over the row
//! type and the injected transport/confirm/notify capabilities.
//!
//! # Architecture
//!
//! - `state.rs` - row store, latest/base snapshots, undo ledger, error
//!   map (synchronous transitions only)
//! - `engine.rs` - [`InlineEditor`], the save coordinator and public API
//! - `backend.rs` - [`EditBackend`] and [`ConfirmPrompt`] capability
//!   seams plus [`BackendError`]
//! - `notify.rs` - [`Notifier`] toast seam with severity classification
//! - `outcome.rs` - [`SaveOutcome`] / [`RemoveOutcome`] reporting
//!
//! # Example
//!
//! ```ignore
//! use campus_edit::{InlineEditor, AlwaysConfirm, NullNotifier};
//! use campus_model::{FieldName, JsonRecord, RowKey};
//!
//! let editor = InlineEditor::new(rest_client, AlwaysConfirm, NullNotifier);
//! editor.set_data(rows);
//!
//! let id = RowKey::new("1")?;
//! let name = FieldName::new("name")?;
//! editor.set_field(&id, &name, "Anna".into());
//! let outcome = editor.auto_save(&id, &name).await;
//! ```

mod backend;
mod engine;
mod notify;
mod outcome;
mod state;

pub use backend::{AlwaysConfirm, BackendError, ConfirmPrompt, EditBackend};
pub use engine::{EMPTY_FIELD_MESSAGE, InlineEditor};
pub use notify::{Notifier, NullNotifier, Severity};
pub use outcome::{RemoveOutcome, SaveOutcome};
