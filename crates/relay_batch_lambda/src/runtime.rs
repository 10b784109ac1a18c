//! Single module boundary over the relay contract primitives.

pub use relay_batch_core::envelope;
pub use relay_batch_core::limits;
pub use relay_batch_core::naming;
pub use relay_batch_core::packet;
