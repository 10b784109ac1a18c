use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::adapters::binding::BindingControl;
use crate::adapters::queue::QueueControl;
use crate::ops::log::log_relay_info;
use crate::runtime::naming::synthesized_queue_name;
use crate::runtime::packet::RelayPacket;

const DELAY_SECONDS_ATTRIBUTE: &str = "DelaySeconds";

/// Queue provisioning options with documented defaults.
///
/// `queue_name` falls back to a name synthesized from the target and the
/// current time; `queue_attributes` forward verbatim to queue creation,
/// with `DelaySeconds` defaulted to `"0"` when unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SetupOptions {
    pub queue_name: Option<String>,
    pub queue_attributes: BTreeMap<String, String>,
}

/// Provisions the ephemeral queue and its execution binding, producing the
/// initial relay packet.
///
/// Issues exactly one create-queue and one create-binding call; a failure
/// from either surfaces unmodified with no rollback of the first.
pub fn setup(
    target_name: &str,
    options: &SetupOptions,
    queues: &dyn QueueControl,
    bindings: &dyn BindingControl,
) -> Result<RelayPacket, String> {
    let queue_name = match &options.queue_name {
        Some(name) => name.clone(),
        None => synthesized_queue_name(target_name, Utc::now().timestamp_millis()),
    };

    let mut attributes = options.queue_attributes.clone();
    attributes
        .entry(DELAY_SECONDS_ATTRIBUTE.to_string())
        .or_insert_with(|| "0".to_string());

    let queue_address = queues.create_queue(&queue_name, &attributes)?;
    let binding_id = bindings.create_binding(&queue_address, target_name)?;

    let packet = RelayPacket::new(queue_address, binding_id);
    log_relay_info(
        "setup_completed",
        json!({
            "target_name": target_name,
            "queue_name": queue_name,
            "queue_address": packet.queue_address,
            "binding_id": packet.binding_id,
        }),
    );
    Ok(packet)
}
