pub const SENSOR_COMPONENT: &str = "sensor";

/// Retained topic on which Home Assistant picks up an entity's discovery config
pub fn discovery_config(discovery_prefix: &str, node_id: &str, object_id: &str) -> String {
    format!("{discovery_prefix}/{SENSOR_COMPONENT}/{node_id}/{object_id}/config")
}

pub fn state(node_id: &str, object_id: &str) -> String {
    format!("{node_id}/{object_id}/state")
}
