use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Continuation token carried from one relay hop to the next.
///
/// The known routing fields sit alongside caller-defined custom keys in the
/// wire format; custom keys ride in `custom` and are never interpreted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelayPacket {
    #[serde(rename = "queueAddress", default)]
    pub queue_address: String,
    #[serde(rename = "bindingId", default)]
    pub binding_id: String,
    /// Reserved for caller use; never mutated by the relay operations.
    #[serde(default)]
    pub attempt: u64,
    #[serde(default)]
    pub stats: RelayStats,
    #[serde(flatten)]
    pub custom: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelayStats {
    /// Hop counter: incremented by one on every successful relay pass.
    #[serde(rename = "sqsCount", default)]
    pub sqs_count: u64,
}

impl RelayPacket {
    pub fn new(queue_address: impl Into<String>, binding_id: impl Into<String>) -> Self {
        Self {
            queue_address: queue_address.into(),
            binding_id: binding_id.into(),
            attempt: 0,
            stats: RelayStats::default(),
            custom: Map::new(),
        }
    }

    /// A packet can be relayed once it carries a queue address.
    pub fn is_routable(&self) -> bool {
        !self.queue_address.is_empty()
    }

    /// A packet is fully provisioned once both routing identifiers are set.
    pub fn is_provisioned(&self) -> bool {
        !self.queue_address.is_empty() && !self.binding_id.is_empty()
    }

    /// Serializes the packet, standard and custom fields alike, to the
    /// wire representation enqueued between hops.
    pub fn to_wire_json(&self) -> String {
        serde_json::to_string(self).expect("relay packet should serialize")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketError {
    message: String,
}

impl PacketError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for PacketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for PacketError {}
