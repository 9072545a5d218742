//! Tests for the register event system.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use grc_core::events::types::*;
use grc_core::events::{EventDispatcher, GrcEventHandler};
use grc_core::models::{ControlStatus, RiskLevel};

struct CountingHandler {
    created: AtomicUsize,
    assessed: AtomicUsize,
    synced: AtomicUsize,
}

impl CountingHandler {
    fn new() -> Self {
        Self {
            created: AtomicUsize::new(0),
            assessed: AtomicUsize::new(0),
            synced: AtomicUsize::new(0),
        }
    }
}

impl GrcEventHandler for CountingHandler {
    fn on_risk_created(&self, _event: &RiskCreatedEvent) {
        self.created.fetch_add(1, Ordering::Relaxed);
    }

    fn on_control_assessed(&self, _event: &ControlAssessedEvent) {
        self.assessed.fetch_add(1, Ordering::Relaxed);
    }

    fn on_auto_risk_synced(&self, _event: &AutoRiskSyncedEvent) {
        self.synced.fetch_add(1, Ordering::Relaxed);
    }
}

struct PanickingHandler;

impl GrcEventHandler for PanickingHandler {
    fn on_risk_created(&self, _event: &RiskCreatedEvent) {
        panic!("handler failure");
    }
}

fn created_event() -> RiskCreatedEvent {
    RiskCreatedEvent {
        id: 1,
        risk_id: "RISK-0001".to_string(),
        risk_level: RiskLevel::Medium,
        auto_generated: false,
    }
}

#[test]
fn test_noop_defaults() {
    struct NoopHandler;
    impl GrcEventHandler for NoopHandler {}

    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(NoopHandler));
    dispatcher.emit_risk_created(&created_event());
    dispatcher.emit_risk_deleted(&RiskDeletedEvent { id: 1 });
    assert_eq!(dispatcher.handler_count(), 1);
}

#[test]
fn test_dispatch_reaches_every_handler() {
    let a = Arc::new(CountingHandler::new());
    let b = Arc::new(CountingHandler::new());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(a.clone());
    dispatcher.register(b.clone());

    dispatcher.emit_risk_created(&created_event());
    dispatcher.emit_control_assessed(&ControlAssessedEvent {
        assessment_id: 3,
        control_id: "PR.AC-1".to_string(),
        status: ControlStatus::NotImplemented,
    });
    dispatcher.emit_auto_risk_synced(&AutoRiskSyncedEvent {
        assessment_id: 3,
        control_id: "PR.AC-1".to_string(),
        risk_id: "RISK-0002".to_string(),
        action: AutoRiskAction::Created,
    });

    for handler in [&a, &b] {
        assert_eq!(handler.created.load(Ordering::Relaxed), 1);
        assert_eq!(handler.assessed.load(Ordering::Relaxed), 1);
        assert_eq!(handler.synced.load(Ordering::Relaxed), 1);
    }
}

#[test]
fn test_panicking_handler_does_not_stop_others() {
    let counter = Arc::new(CountingHandler::new());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(PanickingHandler));
    dispatcher.register(counter.clone());

    dispatcher.emit_risk_created(&created_event());
    assert_eq!(counter.created.load(Ordering::Relaxed), 1);
}

#[test]
fn test_empty_dispatcher() {
    let dispatcher = EventDispatcher::default();
    assert_eq!(dispatcher.handler_count(), 0);
    dispatcher.emit_risk_created(&created_event());
}
