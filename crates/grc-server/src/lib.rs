//! # grc-server
//!
//! JSON HTTP API over a [`RiskRegister`](grc_register::RiskRegister).
//! Every response uses the `{success, message?, count?, data?, error?}`
//! envelope; errors carry the stable code from
//! [`GrcErrorCode`](grc_core::errors::GrcErrorCode).

pub mod api;
pub mod cli;

pub use api::{create_router, AppState};
pub use cli::Cli;
