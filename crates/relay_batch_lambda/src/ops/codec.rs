use serde_json::{json, Value};

use crate::ops::log::log_relay_warn;
use crate::runtime::envelope::packet_from_event;
use crate::runtime::packet::{PacketError, RelayPacket};

/// Recovers the relay packet from an inbound queue event.
///
/// This is the single validation gate protecting the downstream
/// operations: a parseable packet without both routing identifiers comes
/// back as `None` with a diagnostic event, so callers can treat "not a
/// relay message" as a routine branch. Structural envelope failures are
/// errors.
pub fn extract(event: &Value) -> Result<Option<RelayPacket>, PacketError> {
    match packet_from_event(event)? {
        Some(packet) => Ok(Some(packet)),
        None => {
            log_relay_warn(
                "relay_packet_rejected",
                json!({
                    "reason": "missing queueAddress or bindingId",
                }),
            );
            Ok(None)
        }
    }
}
