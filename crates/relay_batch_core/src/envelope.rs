use serde_json::Value;

use crate::packet::{PacketError, RelayPacket};

/// Decodes the body of the first record in an inbound queue event.
///
/// Real queue deliveries carry a JSON-encoded string body; the local
/// simulation path hands the body in already decoded. Both shapes
/// normalize to one JSON value before packet parsing.
pub fn first_record_body(event: &Value) -> Result<Value, PacketError> {
    let records = event
        .get("Records")
        .and_then(Value::as_array)
        .ok_or_else(|| PacketError::new("relay event must include a Records array"))?;

    let record = records
        .first()
        .ok_or_else(|| PacketError::new("relay event must include at least one record"))?;

    let body = record
        .get("body")
        .ok_or_else(|| PacketError::new("relay record must include a body"))?;

    match body {
        Value::String(text) => serde_json::from_str(text)
            .map_err(|error| PacketError::new(format!("malformed relay body: {error}"))),
        Value::Object(_) => Ok(body.clone()),
        _ => Err(PacketError::new(
            "relay body must be a JSON object or an encoded string",
        )),
    }
}

/// Recovers a relay packet from an inbound queue event.
///
/// Structural failures (missing records, undecodable body) are errors; a
/// parseable packet without both routing identifiers is not a relay
/// message and comes back as `None`.
pub fn packet_from_event(event: &Value) -> Result<Option<RelayPacket>, PacketError> {
    let body = first_record_body(event)?;
    let packet: RelayPacket = serde_json::from_value(body)
        .map_err(|error| PacketError::new(format!("malformed relay packet: {error}")))?;

    if !packet.is_provisioned() {
        return Ok(None);
    }

    Ok(Some(packet))
}
