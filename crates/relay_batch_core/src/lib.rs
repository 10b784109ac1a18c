//! Shared relay packet domain primitives.
//!
//! This crate owns the relay packet contract, the inbound envelope codec,
//! and the delay/size/naming primitives. It intentionally excludes AWS SDK
//! and Lambda runtime concerns; those live in `relay_batch_lambda`.

pub mod envelope;
pub mod limits;
pub mod naming;
pub mod packet;
