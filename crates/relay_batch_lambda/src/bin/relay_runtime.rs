use lambda_runtime::{service_fn, Error, LambdaEvent};
use relay_batch_lambda::adapters::aws::{AwsBindingControl, AwsQueueControl, RelayContext};
use relay_batch_lambda::adapters::binding::BindingControl;
use relay_batch_lambda::adapters::queue::QueueControl;
use relay_batch_lambda::ops::codec::extract;
use relay_batch_lambda::ops::relay::relay_pass;
use relay_batch_lambda::ops::setup::{setup, SetupOptions};
use relay_batch_lambda::ops::teardown::tear_down;
use serde::Deserialize;
use serde_json::{json, Value};

const REMAINING_PASSES_KEY: &str = "remainingPasses";

/// Direct-invocation request that starts a relay chain.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartRequest {
    #[serde(default)]
    target_name: Option<String>,
    #[serde(default)]
    remaining_passes: Option<u64>,
    #[serde(flatten)]
    options: SetupOptions,
}

async fn handle_request(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let context = RelayContext {
        region: std::env::var("AWS_REGION")
            .map_err(|_| Error::from("AWS_REGION must be configured"))?,
        account_id: std::env::var("RELAY_ACCOUNT_ID")
            .map_err(|_| Error::from("RELAY_ACCOUNT_ID must be configured"))?,
    };
    let queues = AwsQueueControl::new(aws_sdk_sqs::Client::new(&aws_config));
    let bindings = AwsBindingControl::new(aws_sdk_lambda::Client::new(&aws_config), context);

    if is_sqs_event(&event.payload) {
        handle_relay_hop(&event.payload, &queues, &bindings)
    } else {
        start_relay(&event.payload, &queues, &bindings)
    }
}

fn is_sqs_event(event: &Value) -> bool {
    event
        .get("Records")
        .and_then(Value::as_array)
        .and_then(|records| records.first())
        .and_then(|record| record.get("eventSource"))
        .and_then(Value::as_str)
        .map(|source| source == "aws:sqs")
        .unwrap_or(false)
}

/// Provisions the relay and seeds a countdown workload with the first hop.
fn start_relay(
    payload: &Value,
    queues: &dyn QueueControl,
    bindings: &dyn BindingControl,
) -> Result<Value, Error> {
    let request: StartRequest = serde_json::from_value(payload.clone())
        .map_err(|error| Error::from(format!("invalid start request: {error}")))?;

    let target_name = request
        .target_name
        .or_else(|| std::env::var("AWS_LAMBDA_FUNCTION_NAME").ok())
        .ok_or_else(|| Error::from("targetName or AWS_LAMBDA_FUNCTION_NAME must be provided"))?;
    let remaining = request.remaining_passes.unwrap_or(1);

    let mut packet = setup(&target_name, &request.options, queues, bindings)?;
    packet
        .custom
        .insert(REMAINING_PASSES_KEY.to_string(), json!(remaining));
    relay_pass(&mut packet, None, queues)?;

    Ok(json!({
        "status": "relay_started",
        "queueAddress": packet.queue_address,
        "bindingId": packet.binding_id,
        "remainingPasses": remaining,
    }))
}

/// Runs one unit of the countdown, then relays again or tears down.
fn handle_relay_hop(
    event: &Value,
    queues: &dyn QueueControl,
    bindings: &dyn BindingControl,
) -> Result<Value, Error> {
    let Some(mut packet) = extract(event).map_err(|error| Error::from(error.to_string()))? else {
        return Ok(json!({ "status": "not_a_relay_message" }));
    };

    let remaining = packet
        .custom
        .get(REMAINING_PASSES_KEY)
        .and_then(Value::as_u64)
        .unwrap_or(0);

    if remaining > 0 {
        packet
            .custom
            .insert(REMAINING_PASSES_KEY.to_string(), json!(remaining - 1));
        relay_pass(&mut packet, None, queues)?;
        Ok(json!({
            "status": "relayed",
            "sqsCount": packet.stats.sqs_count,
            "remainingPasses": remaining - 1,
        }))
    } else {
        tear_down(&packet, queues, bindings)?;
        Ok(json!({ "status": "torn_down" }))
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
