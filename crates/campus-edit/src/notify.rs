//! User-facing notification seam.
//!
//! Explicit save failures surface a toast; blur-triggered auto-saves
//! never do, only the inline per-cell error. The engine picks the
//! severity, the host application renders it.

use std::sync::Arc;

/// Toast severity for a failed explicit save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Client-correctable rejection (bad input, conflict).
    Warning,
    /// Server or infrastructure failure.
    Error,
}

/// Sink for user-visible failure notifications.
pub trait Notifier {
    fn notify(&self, severity: Severity, message: &str);
}

impl<T: Notifier> Notifier for Arc<T> {
    fn notify(&self, severity: Severity, message: &str) {
        (**self).notify(severity, message);
    }
}

/// Notifier that only logs, for headless and test use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        tracing::debug!(?severity, message, "notification suppressed");
    }
}
