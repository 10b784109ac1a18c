use serde_json::json;

use crate::adapters::queue::QueueControl;
use crate::ops::log::{log_relay_info, log_relay_warn};
use crate::runtime::limits::{clamp_delay_seconds, MAX_PACKET_BYTES};
use crate::runtime::packet::RelayPacket;

/// Hands the packet off to the next execution by enqueueing one
/// continuation message.
///
/// Returns `Ok(false)` with no side effect when the packet carries no
/// queue address, so task logic needs no separate validity branch. The
/// hop counter is incremented before serialization: the enqueued message
/// always carries the post-hop count.
pub fn relay_pass(
    packet: &mut RelayPacket,
    delay_seconds: Option<i64>,
    queues: &dyn QueueControl,
) -> Result<bool, String> {
    if !packet.is_routable() {
        return Ok(false);
    }

    let delay = clamp_delay_seconds(delay_seconds.unwrap_or(0));
    packet.stats.sqs_count += 1;

    let body = packet.to_wire_json();
    if body.len() > MAX_PACKET_BYTES {
        log_relay_warn(
            "packet_size_exceeded",
            json!({
                "queue_address": packet.queue_address,
                "serialized_bytes": body.len(),
                "limit_bytes": MAX_PACKET_BYTES,
            }),
        );
    }

    queues.send_message(&packet.queue_address, &body, delay)?;

    log_relay_info(
        "relay_sent",
        json!({
            "queue_address": packet.queue_address,
            "sqs_count": packet.stats.sqs_count,
            "delay_seconds": delay,
        }),
    );
    Ok(true)
}
