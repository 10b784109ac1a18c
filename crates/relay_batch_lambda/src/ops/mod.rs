pub mod codec;
pub mod relay;
pub mod setup;
pub mod teardown;

mod log;
