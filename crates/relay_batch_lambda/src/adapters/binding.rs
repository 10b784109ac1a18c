pub trait BindingControl {
    fn create_binding(&self, queue_address: &str, target_name: &str) -> Result<String, String>;

    fn delete_binding(&self, binding_id: &str) -> Result<(), String>;
}
