/// Maximum queue name length accepted by the queue service.
pub const MAX_QUEUE_NAME_LEN: usize = 80;

/// Synthesizes a collision-resistant queue name from the execution target
/// and a millisecond timestamp.
///
/// Queue names accept alphanumerics, hyphens, and underscores; target
/// names are sanitized to that set and truncated so the timestamp suffix
/// always fits. The clock value is passed in, keeping this module
/// deterministic.
pub fn synthesized_queue_name(target_name: &str, timestamp_millis: i64) -> String {
    let suffix = format!("-relay-{timestamp_millis}");
    let prefix_room = MAX_QUEUE_NAME_LEN.saturating_sub(suffix.len());

    let sanitized: String = target_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .take(prefix_room)
        .collect();

    format!("{sanitized}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_combines_target_and_timestamp() {
        let name = synthesized_queue_name("worker1", 1_700_000_000_000);
        assert_eq!(name, "worker1-relay-1700000000000");
    }

    #[test]
    fn invalid_characters_are_replaced() {
        let name = synthesized_queue_name("team:worker.v2", 7);
        assert_eq!(name, "team-worker-v2-relay-7");
    }

    #[test]
    fn long_targets_are_truncated_to_fit() {
        let target = "w".repeat(120);
        let name = synthesized_queue_name(&target, 1_700_000_000_000);
        assert_eq!(name.len(), MAX_QUEUE_NAME_LEN);
        assert!(name.ends_with("-relay-1700000000000"));
    }
}
