//! Shared test doubles for the engine integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use campus_edit::{
    AlwaysConfirm, BackendError, ConfirmPrompt, EditBackend, InlineEditor, Notifier, Severity,
};
use campus_model::{FieldName, JsonRecord, Patch, RowKey};
use serde_json::Value;

/// Scripted backend with invocation counters. Unscripted calls succeed
/// with an empty patch.
#[derive(Default)]
pub struct MockBackend {
    update_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    update_script: Mutex<VecDeque<Result<Patch, BackendError>>>,
    delete_script: Mutex<VecDeque<Result<(), BackendError>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_update(&self, result: Result<Patch, BackendError>) {
        self.update_script.lock().unwrap().push_back(result);
    }

    pub fn script_delete(&self, result: Result<(), BackendError>) {
        self.delete_script.lock().unwrap().push_back(result);
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

impl EditBackend for MockBackend {
    async fn update(&self, _id: &RowKey, _patch: Patch) -> Result<Patch, BackendError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.update_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Patch::new()))
    }

    async fn delete(&self, _id: &RowKey) -> Result<(), BackendError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.delete_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }
}

/// Backend whose `update` parks until released, for interleaving tests.
#[derive(Default)]
pub struct GatedBackend {
    update_calls: AtomicUsize,
    gate: tokio::sync::Notify,
}

impl GatedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

impl EditBackend for GatedBackend {
    async fn update(&self, _id: &RowKey, _patch: Patch) -> Result<Patch, BackendError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Ok(Patch::new())
    }

    async fn delete(&self, _id: &RowKey) -> Result<(), BackendError> {
        Ok(())
    }
}

/// Confirm prompt that always dismisses.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyConfirm;

impl ConfirmPrompt for DenyConfirm {
    async fn confirm_delete(&self, _summary: &str) -> bool {
        false
    }
}

/// Notifier that records every toast.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(Severity, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }
}

pub type TestEditor = InlineEditor<JsonRecord, Arc<MockBackend>, AlwaysConfirm, Arc<RecordingNotifier>>;

/// Fresh editor over the scripted backend and a recording notifier.
pub fn editor() -> (Arc<MockBackend>, Arc<RecordingNotifier>, TestEditor) {
    let backend = Arc::new(MockBackend::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let editor = InlineEditor::new(Arc::clone(&backend), AlwaysConfirm, Arc::clone(&notifier));
    (backend, notifier, editor)
}

pub fn record(value: Value) -> JsonRecord {
    JsonRecord::from_value(value).unwrap()
}

pub fn key(id: &str) -> RowKey {
    RowKey::new(id).unwrap()
}

pub fn field(name: &str) -> FieldName {
    FieldName::new(name).unwrap()
}
