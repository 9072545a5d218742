//! Register event system: typed payloads, a handler trait with no-op defaults,
//! and a synchronous dispatcher.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::GrcEventHandler;
