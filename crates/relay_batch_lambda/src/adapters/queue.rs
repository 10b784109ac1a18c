use std::collections::BTreeMap;

pub trait QueueControl {
    fn create_queue(
        &self,
        name: &str,
        attributes: &BTreeMap<String, String>,
    ) -> Result<String, String>;

    fn delete_queue(&self, queue_address: &str) -> Result<(), String>;

    fn send_message(
        &self,
        queue_address: &str,
        body: &str,
        delay_seconds: u32,
    ) -> Result<(), String>;
}
