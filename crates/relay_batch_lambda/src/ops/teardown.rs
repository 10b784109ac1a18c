use serde_json::json;

use crate::adapters::binding::BindingControl;
use crate::adapters::queue::QueueControl;
use crate::ops::log::log_relay_info;
use crate::runtime::packet::RelayPacket;

/// Removes the execution binding and deletes the ephemeral queue.
///
/// Returns `Ok(false)` with no deletion calls when either identifier is
/// missing, making the call idempotent against a packet that was never
/// fully provisioned or already torn down. The binding goes first so no
/// trailing message routes to a target whose queue is already gone.
pub fn tear_down(
    packet: &RelayPacket,
    queues: &dyn QueueControl,
    bindings: &dyn BindingControl,
) -> Result<bool, String> {
    if !packet.is_provisioned() {
        return Ok(false);
    }

    bindings.delete_binding(&packet.binding_id)?;
    queues.delete_queue(&packet.queue_address)?;

    log_relay_info(
        "teardown_completed",
        json!({
            "queue_address": packet.queue_address,
            "binding_id": packet.binding_id,
        }),
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use super::*;

    struct DeletionRecorder {
        calls: Mutex<Vec<String>>,
        fail_queue_delete: bool,
    }

    impl DeletionRecorder {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_queue_delete: false,
            }
        }

        fn failing_on_queue_delete() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_queue_delete: true,
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("poisoned mutex").clone()
        }
    }

    impl QueueControl for DeletionRecorder {
        fn create_queue(
            &self,
            _name: &str,
            _attributes: &BTreeMap<String, String>,
        ) -> Result<String, String> {
            Err("unexpected create during teardown".to_string())
        }

        fn delete_queue(&self, queue_address: &str) -> Result<(), String> {
            if self.fail_queue_delete {
                return Err("simulated queue delete failure".to_string());
            }
            self.calls
                .lock()
                .expect("poisoned mutex")
                .push(format!("delete_queue:{queue_address}"));
            Ok(())
        }

        fn send_message(
            &self,
            _queue_address: &str,
            _body: &str,
            _delay_seconds: u32,
        ) -> Result<(), String> {
            Err("unexpected send during teardown".to_string())
        }
    }

    impl BindingControl for DeletionRecorder {
        fn create_binding(
            &self,
            _queue_address: &str,
            _target_name: &str,
        ) -> Result<String, String> {
            Err("unexpected create during teardown".to_string())
        }

        fn delete_binding(&self, binding_id: &str) -> Result<(), String> {
            self.calls
                .lock()
                .expect("poisoned mutex")
                .push(format!("delete_binding:{binding_id}"));
            Ok(())
        }
    }

    #[test]
    fn teardown_deletes_the_binding_before_the_queue() {
        let recorder = DeletionRecorder::new();
        let packet = RelayPacket::new("https://sqs/queue", "binding-1");

        let removed = tear_down(&packet, &recorder, &recorder).expect("teardown should succeed");
        assert!(removed);
        assert_eq!(
            recorder.calls(),
            vec![
                "delete_binding:binding-1".to_string(),
                "delete_queue:https://sqs/queue".to_string(),
            ]
        );
    }

    #[test]
    fn teardown_without_identifiers_issues_no_deletions() {
        let recorder = DeletionRecorder::new();

        let no_queue = RelayPacket::new("", "binding-1");
        assert!(!tear_down(&no_queue, &recorder, &recorder).expect("guard should not error"));

        let no_binding = RelayPacket::new("https://sqs/queue", "");
        assert!(!tear_down(&no_binding, &recorder, &recorder).expect("guard should not error"));

        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn queue_delete_failure_surfaces_after_the_binding_is_gone() {
        let recorder = DeletionRecorder::failing_on_queue_delete();
        let packet = RelayPacket::new("https://sqs/queue", "binding-1");

        let error = tear_down(&packet, &recorder, &recorder).expect_err("teardown should fail");
        assert_eq!(error, "simulated queue delete failure");
        // No compensation: the binding deletion is not undone.
        assert_eq!(recorder.calls(), vec!["delete_binding:binding-1".to_string()]);
    }
}
