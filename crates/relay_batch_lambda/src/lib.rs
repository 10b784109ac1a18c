//! AWS-oriented adapters and operations for relay batch execution.
//!
//! This crate owns runtime integration details (collaborator traits, AWS
//! SDK implementations, and the relay protocol operations) and exposes a
//! single runtime module boundary for packet, envelope, and limit
//! primitives.

pub mod adapters;
pub mod ops;
pub mod runtime;
