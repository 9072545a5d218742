//! Synchronous fan-out of register events to handlers.

use std::sync::Arc;

use super::handler::GrcEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn GrcEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn register(&mut self, handler: Arc<dyn GrcEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler is logged and does not stop later handlers.
    fn emit<F: Fn(&dyn GrcEventHandler)>(&self, event: &'static str, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::error!(event, "event handler panicked");
            }
        }
    }

    pub fn emit_risk_created(&self, event: &RiskCreatedEvent) {
        self.emit("risk_created", |h| h.on_risk_created(event));
    }

    pub fn emit_risk_updated(&self, event: &RiskUpdatedEvent) {
        self.emit("risk_updated", |h| h.on_risk_updated(event));
    }

    pub fn emit_risk_deleted(&self, event: &RiskDeletedEvent) {
        self.emit("risk_deleted", |h| h.on_risk_deleted(event));
    }

    pub fn emit_control_assessed(&self, event: &ControlAssessedEvent) {
        self.emit("control_assessed", |h| h.on_control_assessed(event));
    }

    pub fn emit_auto_risk_synced(&self, event: &AutoRiskSyncedEvent) {
        self.emit("auto_risk_synced", |h| h.on_auto_risk_synced(event));
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
