use std::collections::BTreeMap;

use aws_sdk_sqs::types::QueueAttributeName;

use crate::adapters::binding::BindingControl;
use crate::adapters::queue::QueueControl;

/// Identity needed to address the queueing and binding services.
#[derive(Debug, Clone)]
pub struct RelayContext {
    pub region: String,
    pub account_id: String,
}

#[derive(Clone)]
pub struct AwsQueueControl {
    sqs_client: aws_sdk_sqs::Client,
}

impl AwsQueueControl {
    pub fn new(sqs_client: aws_sdk_sqs::Client) -> Self {
        Self { sqs_client }
    }
}

impl QueueControl for AwsQueueControl {
    fn create_queue(
        &self,
        name: &str,
        attributes: &BTreeMap<String, String>,
    ) -> Result<String, String> {
        let client = self.sqs_client.clone();
        let queue_name = name.to_string();
        let attributes: Vec<(QueueAttributeName, String)> = attributes
            .iter()
            .map(|(key, value)| (QueueAttributeName::from(key.as_str()), value.clone()))
            .collect();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let mut request = client.create_queue().queue_name(queue_name);
                for (key, value) in attributes {
                    request = request.attributes(key, value);
                }
                let output = request
                    .send()
                    .await
                    .map_err(|error| format!("failed to create relay queue: {error}"))?;
                output
                    .queue_url()
                    .map(str::to_string)
                    .ok_or_else(|| "queue creation returned no queue url".to_string())
            })
        })
    }

    fn delete_queue(&self, queue_address: &str) -> Result<(), String> {
        let client = self.sqs_client.clone();
        let queue_url = queue_address.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .delete_queue()
                    .queue_url(queue_url)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to delete relay queue: {error}"))
            })
        })
    }

    fn send_message(
        &self,
        queue_address: &str,
        body: &str,
        delay_seconds: u32,
    ) -> Result<(), String> {
        let client = self.sqs_client.clone();
        let queue_url = queue_address.to_string();
        let message_body = body.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .send_message()
                    .queue_url(queue_url)
                    .message_body(message_body)
                    .delay_seconds(delay_seconds as i32)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to enqueue relay message: {error}"))
            })
        })
    }
}

#[derive(Clone)]
pub struct AwsBindingControl {
    lambda_client: aws_sdk_lambda::Client,
    context: RelayContext,
}

impl AwsBindingControl {
    pub fn new(lambda_client: aws_sdk_lambda::Client, context: RelayContext) -> Self {
        Self {
            lambda_client,
            context,
        }
    }
}

impl BindingControl for AwsBindingControl {
    fn create_binding(&self, queue_address: &str, target_name: &str) -> Result<String, String> {
        let source_arn = queue_arn(&self.context, queue_address)?;
        let client = self.lambda_client.clone();
        let function_name = target_name.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .create_event_source_mapping()
                    .event_source_arn(source_arn)
                    .function_name(function_name)
                    // Batch size above one would hand several packets to a
                    // single execution, breaking the one-packet-per-hop
                    // assumption of the protocol.
                    .batch_size(1)
                    .enabled(true)
                    .send()
                    .await
                    .map_err(|error| format!("failed to create event source mapping: {error}"))?;
                output
                    .uuid()
                    .map(str::to_string)
                    .ok_or_else(|| "event source mapping returned no uuid".to_string())
            })
        })
    }

    fn delete_binding(&self, binding_id: &str) -> Result<(), String> {
        let client = self.lambda_client.clone();
        let uuid = binding_id.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .delete_event_source_mapping()
                    .uuid(uuid)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to delete event source mapping: {error}"))
            })
        })
    }
}

/// Derives the queue ARN the mapping call needs from the queue URL's
/// trailing name segment, avoiding a describe round-trip.
fn queue_arn(context: &RelayContext, queue_address: &str) -> Result<String, String> {
    let name = queue_address
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| format!("queue address has no name segment: {queue_address}"))?;

    Ok(format!(
        "arn:aws:sqs:{}:{}:{name}",
        context.region, context.account_id
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_context() -> RelayContext {
        RelayContext {
            region: "eu-central-1".to_string(),
            account_id: "123456789012".to_string(),
        }
    }

    #[test]
    fn queue_arn_uses_the_trailing_url_segment() {
        let arn = queue_arn(
            &sample_context(),
            "https://sqs.eu-central-1.amazonaws.com/123456789012/worker1-relay-17",
        )
        .expect("arn should derive");

        assert_eq!(
            arn,
            "arn:aws:sqs:eu-central-1:123456789012:worker1-relay-17"
        );
    }

    #[test]
    fn queue_arn_ignores_a_trailing_slash() {
        let arn = queue_arn(
            &sample_context(),
            "https://sqs.eu-central-1.amazonaws.com/123456789012/worker1-relay-17/",
        )
        .expect("arn should derive");

        assert!(arn.ends_with(":worker1-relay-17"));
    }

    #[test]
    fn queue_arn_rejects_an_empty_address() {
        let error = queue_arn(&sample_context(), "").expect_err("empty address should fail");
        assert!(error.contains("no name segment"));
    }
}
