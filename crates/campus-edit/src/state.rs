//! Tracking state for one editable table.
//!
//! Holds the row store, the two per-row snapshots, the undo ledger, the
//! error map, and the in-flight sets. Every method is synchronous; the
//! coordinator in `engine.rs` owns the lock and the await points.
//!
//! Snapshot roles:
//! - latest: last server-confirmed state, the rollback target
//! - base: state as first loaded via `replace_rows`, the final revert
//!   fallback, immutable until the next `replace_rows`

use std::collections::{HashMap, HashSet};

use campus_model::{CellKey, FieldName, Patch, Record, RowKey};
use serde_json::Value;

#[derive(Debug)]
pub(crate) struct EngineState<R: Record> {
    rows: Vec<R>,
    latest: HashMap<RowKey, R>,
    base: HashMap<RowKey, R>,
    undo: HashMap<RowKey, HashMap<FieldName, Vec<Value>>>,
    errors: HashMap<CellKey, String>,
    loading_cells: HashSet<CellKey>,
    removing_rows: HashSet<RowKey>,
}

impl<R: Record> EngineState<R> {
    pub(crate) fn new() -> Self {
        Self {
            rows: Vec::new(),
            latest: HashMap::new(),
            base: HashMap::new(),
            undo: HashMap::new(),
            errors: HashMap::new(),
            loading_cells: HashSet::new(),
            removing_rows: HashSet::new(),
        }
    }

    /// Wholesale replace of the row store. Both snapshots are
    /// re-initialized from the incoming rows; ledger, errors, and
    /// in-flight markers are discarded. This is the only path that
    /// establishes tracking for a row.
    pub(crate) fn replace_rows(&mut self, rows: Vec<R>) {
        self.latest.clear();
        self.base.clear();
        self.undo.clear();
        self.errors.clear();
        self.loading_cells.clear();
        self.removing_rows.clear();
        for row in &rows {
            let key = row.id();
            self.latest.insert(key.clone(), row.clone());
            self.base.insert(key, row.clone());
        }
        self.rows = rows;
    }

    pub(crate) fn rows(&self) -> &[R] {
        &self.rows
    }

    pub(crate) fn has_row(&self, id: &RowKey) -> bool {
        self.rows.iter().any(|r| r.id() == *id)
    }

    pub(crate) fn row(&self, id: &RowKey) -> Option<&R> {
        self.rows.iter().find(|r| r.id() == *id)
    }

    fn row_mut(&mut self, id: &RowKey) -> Option<&mut R> {
        self.rows.iter_mut().find(|r| r.id() == *id)
    }

    pub(crate) fn live_value(&self, id: &RowKey, field: &FieldName) -> Option<Value> {
        self.row(id).and_then(|r| r.get(field))
    }

    pub(crate) fn set_live(&mut self, id: &RowKey, field: &FieldName, value: Value) -> bool {
        match self.row_mut(id) {
            Some(row) => {
                row.set(field, value);
                true
            }
            None => false,
        }
    }

    /// Last server-confirmed value for a field, if any.
    pub(crate) fn committed_value(&self, id: &RowKey, field: &FieldName) -> Option<Value> {
        self.latest.get(id).and_then(|r| r.get(field))
    }

    pub(crate) fn base_value(&self, id: &RowKey, field: &FieldName) -> Option<Value> {
        self.base.get(id).and_then(|r| r.get(field))
    }

    /// Initialize the latest snapshot from the live row if it is
    /// unexpectedly absent, so rollback always has a target.
    fn ensure_latest(&mut self, id: &RowKey) {
        if self.latest.contains_key(id) {
            return;
        }
        if let Some(row) = self.row(id).cloned() {
            self.latest.insert(id.clone(), row);
        }
    }

    /// Roll the live field back to the last server-confirmed value.
    pub(crate) fn rollback_field(&mut self, id: &RowKey, field: &FieldName) {
        self.ensure_latest(id);
        if let Some(value) = self.committed_value(id, field) {
            self.set_live(id, field, value);
        }
    }

    /// Commit a confirmed save: push the previous committed value onto
    /// the ledger when the value actually changed, update the latest
    /// snapshot, merge any server-asserted patch into both the live row
    /// and the snapshot, and clear the cell error.
    pub(crate) fn commit_success(
        &mut self,
        id: &RowKey,
        field: &FieldName,
        candidate: &Value,
        server_patch: &Patch,
    ) {
        self.ensure_latest(id);
        let previous = self.committed_value(id, field);
        if previous.as_ref() != Some(candidate) {
            // Only server-confirmed values enter the ledger; a field
            // with no prior committed value contributes nothing.
            if let Some(previous) = previous {
                self.push_undo(id, field, previous);
            }
        }
        if let Some(snapshot) = self.latest.get_mut(id) {
            snapshot.set(field, candidate.clone());
            snapshot.apply_patch(server_patch);
        }
        if let Some(row) = self.row_mut(id) {
            row.apply_patch(server_patch);
        }
        self.errors.remove(&CellKey::new(id.clone(), field.clone()));
    }

    /// Record a failed save: roll back and remember the message.
    pub(crate) fn record_failure(&mut self, id: &RowKey, field: &FieldName, message: String) {
        self.rollback_field(id, field);
        self.errors.insert(CellKey::new(id.clone(), field.clone()), message);
    }

    pub(crate) fn push_undo(&mut self, id: &RowKey, field: &FieldName, value: Value) {
        self.undo
            .entry(id.clone())
            .or_default()
            .entry(field.clone())
            .or_default()
            .push(value);
    }

    pub(crate) fn pop_undo(&mut self, id: &RowKey, field: &FieldName) -> Option<Value> {
        self.undo.get_mut(id)?.get_mut(field)?.pop()
    }

    pub(crate) fn undo_depth(&self, id: &RowKey, field: &FieldName) -> usize {
        self.undo
            .get(id)
            .and_then(|fields| fields.get(field))
            .map_or(0, Vec::len)
    }

    pub(crate) fn error(&self, cell: &CellKey) -> Option<&str> {
        self.errors.get(cell).map(String::as_str)
    }

    pub(crate) fn set_error(&mut self, cell: CellKey, message: String) {
        self.errors.insert(cell, message);
    }

    pub(crate) fn clear_error(&mut self, cell: &CellKey) {
        self.errors.remove(cell);
    }

    /// Mark a cell save as in flight. Returns `false` when one already
    /// is, which the coordinator reports as a duplicate submission.
    pub(crate) fn begin_save(&mut self, cell: &CellKey) -> bool {
        self.loading_cells.insert(cell.clone())
    }

    pub(crate) fn end_save(&mut self, cell: &CellKey) {
        self.loading_cells.remove(cell);
    }

    pub(crate) fn is_saving(&self, cell: &CellKey) -> bool {
        self.loading_cells.contains(cell)
    }

    pub(crate) fn begin_remove(&mut self, id: &RowKey) -> bool {
        self.removing_rows.insert(id.clone())
    }

    pub(crate) fn end_remove(&mut self, id: &RowKey) {
        self.removing_rows.remove(id);
    }

    pub(crate) fn is_removing(&self, id: &RowKey) -> bool {
        self.removing_rows.contains(id)
    }

    /// Drop a row and every piece of tracking state keyed by it.
    pub(crate) fn purge_row(&mut self, id: &RowKey) {
        self.rows.retain(|r| r.id() != *id);
        self.latest.remove(id);
        self.base.remove(id);
        self.undo.remove(id);
        self.errors.retain(|cell, _| cell.row() != id);
        self.loading_cells.retain(|cell| cell.row() != id);
        self.removing_rows.remove(id);
    }

    /// Discard unsaved edits by overwriting the live row with the
    /// latest snapshot; the ledger is untouched.
    pub(crate) fn cancel_row(&mut self, id: &RowKey) -> bool {
        let Some(snapshot) = self.latest.get(id).cloned() else {
            return false;
        };
        let Some(index) = self.rows.iter().position(|r| r.id() == *id) else {
            return false;
        };
        self.rows[index] = snapshot;
        self.errors.retain(|cell, _| cell.row() != id);
        true
    }

    /// Whether any tracking state remains for a row. Test support.
    #[cfg(test)]
    pub(crate) fn is_tracked(&self, id: &RowKey) -> bool {
        self.latest.contains_key(id)
            || self.base.contains_key(id)
            || self.undo.contains_key(id)
            || self.errors.keys().any(|cell| cell.row() == id)
    }
}
