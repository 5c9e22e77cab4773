pub const SNAP_COMMON: &str = "SNAP_COMMON";

pub const LOG_LEVEL: &str = "LOGGING_LEVEL";

pub const TTN_GW_HOST: &str = "TTN_GW_HOST";
pub const TTN_GW_SCAN_INTERVAL: &str = "TTN_GW_SCAN_INTERVAL";
pub const TTN_GW_RESOURCES: &str = "TTN_GW_RESOURCES";

pub const MQTT_BRIDGE_HOST: &str = "MQTT_BRIDGE_HOST";
pub const MQTT_BRIDGE_PORT: &str = "MQTT_BRIDGE_PORT";
