/// Delivery delay ceiling in seconds, matching the queue service maximum.
pub const MAX_DELAY_SECONDS: i64 = 900;

/// Soft ceiling on the serialized packet, matching the queue body limit.
pub const MAX_PACKET_BYTES: usize = 64 * 1024;

/// Bounds a requested delivery delay to the range the queue accepts.
///
/// Enforced locally so misuse cannot be silently rejected by the queue
/// service instead.
pub fn clamp_delay_seconds(requested: i64) -> u32 {
    requested.clamp(0, MAX_DELAY_SECONDS) as u32
}
