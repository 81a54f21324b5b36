//! Core domain types
//!
//! Structures describing what the batch service, the stack inventory and the
//! log service hand back. They are built fresh per call and never persisted.

pub mod job;
pub mod log;
pub mod resources;
pub mod stack;
