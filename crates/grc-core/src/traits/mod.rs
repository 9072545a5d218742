//! Trait seams between the register and its storage backends.

pub mod storage;

pub use storage::IRegisterStorage;
