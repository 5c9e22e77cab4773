use std::time::Duration;

pub const LOG_LEVEL: &str = "INFO";

pub const SCAN_INTERVAL: Duration = Duration::from_secs(10);
pub const MIN_TIME_BETWEEN_UPDATES: Duration = Duration::from_secs(10);
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

pub const MQTT_BRIDGE_HOST: &str = "localhost";
pub const MQTT_BRIDGE_PORT: u16 = 1883;
pub const MQTT_NODE_ID: &str = "ttn_gateway";
pub const DISCOVERY_PREFIX: &str = "homeassistant";
