//! Save coordinator and public API for one editable table.
//!
//! One [`InlineEditor`] instance backs one table on screen. It owns all
//! tracking state exclusively; the UI mutates rows only through
//! [`InlineEditor::set_field`] and the operations here. Instances are
//! fully independent, so several tables can coexist without shared
//! state.
//!
//! Concurrency: every operation suspends at most once, at the awaited
//! capability call. State sits behind a mutex that is only held across
//! synchronous sections, never across an await, so saves on different
//! cells proceed concurrently while a duplicate save on a loading cell
//! is rejected under the lock. After the await, commit and rollback
//! re-check that the target row still exists and discard the resolution
//! if `set_data` or `remove` won the race.

use std::sync::{Mutex, MutexGuard, PoisonError};

use campus_model::{CellKey, FieldName, Patch, Record, RowKey, value};
use serde_json::Value;

use crate::backend::{BackendError, ConfirmPrompt, EditBackend};
use crate::notify::{Notifier, Severity};
use crate::outcome::{RemoveOutcome, SaveOutcome};
use crate::state::EngineState;

/// Inline error recorded when a save is rejected locally for an empty
/// value.
pub const EMPTY_FIELD_MESSAGE: &str = "This field cannot be empty.";

/// Optimistic inline-edit engine for one editable table.
pub struct InlineEditor<R, B, C, N>
where
    R: Record,
    B: EditBackend,
    C: ConfirmPrompt,
    N: Notifier,
{
    state: Mutex<EngineState<R>>,
    backend: B,
    confirm: C,
    notifier: N,
}

impl<R, B, C, N> InlineEditor<R, B, C, N>
where
    R: Record,
    B: EditBackend,
    C: ConfirmPrompt,
    N: Notifier,
{
    pub fn new(backend: B, confirm: C, notifier: N) -> Self {
        Self {
            state: Mutex::new(EngineState::new()),
            backend,
            confirm,
            notifier,
        }
    }

    fn state(&self) -> MutexGuard<'_, EngineState<R>> {
        // A poisoning panic cannot leave the maps structurally broken;
        // recover the guard instead of cascading.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Wholesale replace of the table contents, e.g. after a page of a
    /// paginated list loads. The only path that establishes tracking
    /// state for a row.
    pub fn set_data(&self, rows: Vec<R>) {
        let mut state = self.state();
        state.replace_rows(rows);
        tracing::debug!(rows = state.rows().len(), "table data replaced");
    }

    /// Apply a local (unsaved) edit to one cell. Returns `false` when
    /// the row is not in the store.
    pub fn set_field(&self, id: &RowKey, field: &FieldName, value: Value) -> bool {
        self.state().set_live(id, field, value)
    }

    /// Explicit user-triggered save of one cell. Failures surface a
    /// notification in addition to the inline error.
    pub async fn save(&self, id: &RowKey, field: &FieldName) -> SaveOutcome {
        self.save_cell(id, field, false).await
    }

    /// Blur-triggered save. A no-op when the live value already equals
    /// the committed value, and failures stay inline only.
    pub async fn auto_save(&self, id: &RowKey, field: &FieldName) -> SaveOutcome {
        self.save_cell(id, field, true).await
    }

    async fn save_cell(&self, id: &RowKey, field: &FieldName, is_auto: bool) -> SaveOutcome {
        let cell = CellKey::new(id.clone(), field.clone());

        let candidate = {
            let mut state = self.state();
            if !state.has_row(id) {
                return SaveOutcome::UnknownRow;
            }
            if state.is_saving(&cell) {
                tracing::debug!(row = %id, field = %field, "save already in flight, ignoring");
                return SaveOutcome::AlreadySaving;
            }
            let candidate = state.live_value(id, field).unwrap_or(Value::Null);
            if is_auto && state.committed_value(id, field).as_ref() == Some(&candidate) {
                return SaveOutcome::Unchanged;
            }
            if value::is_blank(&candidate) {
                state.record_failure(id, field, EMPTY_FIELD_MESSAGE.to_string());
                return SaveOutcome::RejectedEmpty;
            }
            state.begin_save(&cell);
            state.clear_error(&cell);
            candidate
        };

        let patch = Patch::single(field.clone(), candidate.clone());
        let result = self.backend.update(id, patch).await;

        let mut state = self.state();
        state.end_save(&cell);
        if !state.has_row(id) {
            tracing::debug!(row = %id, field = %field, "row gone before save settled, discarding");
            return SaveOutcome::Superseded;
        }
        match result {
            Ok(server_patch) => {
                state.commit_success(id, field, &candidate, &server_patch);
                tracing::debug!(row = %id, field = %field, "cell saved");
                SaveOutcome::Saved
            }
            Err(err) => {
                let message = err.to_string();
                state.record_failure(id, field, message.clone());
                drop(state);
                tracing::warn!(row = %id, field = %field, error = %message, "cell save failed");
                if !is_auto {
                    self.notifier.notify(severity_of(&err), &message);
                }
                SaveOutcome::Failed(message)
            }
        }
    }

    /// Step one cell back through its committed history: pop the undo
    /// ledger, or fall back to the value as originally loaded. Local
    /// only; the result must itself be saved to persist.
    pub fn revert_field(&self, id: &RowKey, field: &FieldName) -> bool {
        let mut state = self.state();
        if !state.has_row(id) {
            return false;
        }
        let value = state
            .pop_undo(id, field)
            .or_else(|| state.base_value(id, field));
        if let Some(value) = value {
            state.set_live(id, field, value);
        }
        state.clear_error(&CellKey::new(id.clone(), field.clone()));
        true
    }

    /// The predicate the UI should use to enable a revert affordance:
    /// committed history exists, or the live value differs from the
    /// value as loaded.
    pub fn can_revert(&self, id: &RowKey, field: &FieldName) -> bool {
        let state = self.state();
        state.undo_depth(id, field) > 0
            || state.live_value(id, field) != state.base_value(id, field)
    }

    /// Discard all unsaved edits on a row, restoring the last
    /// server-confirmed state and clearing the row's inline errors.
    /// The undo ledger is untouched.
    pub fn cancel(&self, id: &RowKey) -> bool {
        self.state().cancel_row(id)
    }

    /// Confirm, delete on the server, and purge all tracking state for
    /// the row. On failure the row and its state remain intact.
    pub async fn remove(&self, id: &RowKey) -> RemoveOutcome {
        {
            let mut state = self.state();
            if !state.has_row(id) {
                return RemoveOutcome::UnknownRow;
            }
            if !state.begin_remove(id) {
                return RemoveOutcome::AlreadyRemoving;
            }
        }

        if !self.confirm.confirm_delete(id.as_str()).await {
            self.state().end_remove(id);
            return RemoveOutcome::Cancelled;
        }

        match self.backend.delete(id).await {
            Ok(()) => {
                self.state().purge_row(id);
                tracing::debug!(row = %id, "row removed");
                RemoveOutcome::Removed
            }
            Err(err) => {
                let message = err.to_string();
                self.state().end_remove(id);
                tracing::warn!(row = %id, error = %message, "row delete failed");
                self.notifier.notify(severity_of(&err), &message);
                RemoveOutcome::Failed(message)
            }
        }
    }

    // =========================================================================
    // READ ACCESSORS
    // =========================================================================

    /// Clone of the currently displayed rows, in display order.
    pub fn rows(&self) -> Vec<R> {
        self.state().rows().to_vec()
    }

    pub fn row(&self, id: &RowKey) -> Option<R> {
        self.state().row(id).cloned()
    }

    pub fn row_count(&self) -> usize {
        self.state().rows().len()
    }

    pub fn is_saving(&self, id: &RowKey, field: &FieldName) -> bool {
        self.state()
            .is_saving(&CellKey::new(id.clone(), field.clone()))
    }

    pub fn is_removing(&self, id: &RowKey) -> bool {
        self.state().is_removing(id)
    }

    /// Latest inline error for a cell, if any.
    pub fn cell_error(&self, id: &RowKey, field: &FieldName) -> Option<String> {
        self.state()
            .error(&CellKey::new(id.clone(), field.clone()))
            .map(ToOwned::to_owned)
    }

    /// Last server-confirmed value for a cell.
    pub fn committed_value(&self, id: &RowKey, field: &FieldName) -> Option<Value> {
        self.state().committed_value(id, field)
    }

    /// Number of committed values available to `revert_field` before it
    /// falls back to the originally loaded value.
    pub fn undo_depth(&self, id: &RowKey, field: &FieldName) -> usize {
        self.state().undo_depth(id, field)
    }
}

fn severity_of(err: &BackendError) -> Severity {
    if err.is_client_error() {
        Severity::Warning
    } else {
        Severity::Error
    }
}
