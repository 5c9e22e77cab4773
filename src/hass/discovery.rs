use serde::Serialize;
use serde_json::Value;

use crate::config::MqttConfig;
use crate::constants::topics;
use crate::gateway::StatusPayload;
use crate::interfaces::mqtt::MqttMessage;

use super::Entity;

const DEFAULT_DEVICE_NAME: &str = "TTN Gateway";
const MANUFACTURER: &str = "The Things Network";

/// Device block shared by all entities of one gateway
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceInfo {
    pub identifiers: Vec<String>,
    pub name: String,
    pub manufacturer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sw_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hw_version: Option<String>,
    pub configuration_url: String,
}

impl DeviceInfo {
    pub fn new(node_id: &str, host: &str, status: Option<&StatusPayload>) -> Self {
        let text_field = |key: &str| {
            status
                .and_then(|s| s.get(key))
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Self {
            identifiers: vec![node_id.to_string()],
            name: text_field("gateway").unwrap_or_else(|| DEFAULT_DEVICE_NAME.to_string()),
            manufacturer: MANUFACTURER.to_string(),
            sw_version: text_field("fwversion"),
            hw_version: text_field("hwversion"),
            configuration_url: format!("http://{host}/"),
        }
    }
}

#[derive(Serialize)]
struct SensorConfig<'a> {
    name: &'a str,
    unique_id: String,
    state_topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit_of_measurement: Option<&'a str>,
    device: &'a DeviceInfo,
}

/// Retained config messages that register each entity with Home Assistant
pub fn discovery_messages<E: Entity>(
    entities: &[E],
    settings: &MqttConfig,
    device: &DeviceInfo,
) -> Vec<MqttMessage> {
    entities
        .iter()
        .map(|entity| {
            let config = SensorConfig {
                name: entity.name(),
                unique_id: format!("{}_{}", settings.node_id, entity.object_id()),
                state_topic: topics::state(&settings.node_id, entity.object_id()),
                icon: entity.icon(),
                unit_of_measurement: entity.unit_of_measurement(),
                device,
            };
            MqttMessage::retained(
                topics::discovery_config(
                    &settings.discovery_prefix,
                    &settings.node_id,
                    entity.object_id(),
                ),
                serde_json::to_string(&config).unwrap_or_default(),
            )
        })
        .collect()
}

/// State messages for entities that have a value; the rest, and JSON nulls, are left unknown
pub fn state_messages<E: Entity>(entities: &[E], node_id: &str) -> Vec<MqttMessage> {
    entities
        .iter()
        .filter_map(|entity| {
            entity.state().filter(|value| !value.is_null()).map(|value| {
                MqttMessage::new(
                    topics::state(node_id, entity.object_id()),
                    state_payload(value),
                )
            })
        })
        .collect()
}

pub fn state_payload(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
