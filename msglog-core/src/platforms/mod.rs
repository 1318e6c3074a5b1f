// File: src/platforms/mod.rs

pub mod memory;

#[cfg(feature = "discord")]
pub mod discord;

pub use memory::{InMemoryMessageStore, StaticCurrentUser};
