//! Home Assistant side of the bridge: the entity model and its MQTT discovery representation

mod discovery;

use serde_json::{Map, Value};

pub use discovery::{discovery_messages, state_messages, state_payload, DeviceInfo};

/// What Home Assistant needs to know about a sensor entity
pub trait Entity {
    /// Stable identifier, unique within one gateway
    fn object_id(&self) -> &str;

    fn name(&self) -> &str;

    fn icon(&self) -> Option<&str>;

    fn unit_of_measurement(&self) -> Option<&str>;

    /// `None` until a value has been observed
    fn state(&self) -> Option<&Value>;

    fn extra_state_attributes(&self) -> Map<String, Value> {
        Map::new()
    }

    fn update(&mut self);
}
