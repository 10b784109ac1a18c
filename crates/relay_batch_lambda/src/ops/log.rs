use serde_json::json;

pub(crate) fn log_relay_info(event: &str, details: serde_json::Value) {
    eprintln!(
        "{}",
        json!({
            "component": "relay_batch",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

pub(crate) fn log_relay_warn(event: &str, details: serde_json::Value) {
    eprintln!(
        "{}",
        json!({
            "component": "relay_batch",
            "level": "warning",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}
