pub const SENSOR_PREFIX: &str = "TTN_GW ";

/// A sensor type: canonical name, presentation, and the key the gateway reports it under
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldType {
    pub name: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub icon: &'static str,
    pub json_key: &'static str,
}

impl FieldType {
    const fn new(
        name: &'static str,
        label: &'static str,
        unit: &'static str,
        icon: &'static str,
        json_key: &'static str,
    ) -> Self {
        Self {
            name,
            label,
            unit,
            icon,
            json_key,
        }
    }

    pub fn display_name(&self) -> String {
        format!("{SENSOR_PREFIX}{}", self.label)
    }
}

// Several canonical names differ from the keys in the gateway's status document
pub static FIELD_TYPES: [FieldType; 16] = [
    FieldType::new("gateway", "Gateway", "", "mdi:router-wireless", "gateway"),
    FieldType::new("hwversion", "Hardware Version", "", "mdi:file-document", "hwversion"),
    FieldType::new("blversion", "Bootloader Version", "", "mdi:file-document", "blversion"),
    FieldType::new("fwversion", "Firmware Version", "", "mdi:file-document", "fwversion"),
    FieldType::new("uptime", "Uptime", "Sec.", "mdi:timer-sand", "uptime"),
    FieldType::new("connected", "Connected", "", "mdi:power-plug", "connected"),
    FieldType::new("interface", "Interface", "", "mdi:ethernet-cable", "interface"),
    FieldType::new("ssid", "SSID", "", "mdi:access-point", "ssid"),
    FieldType::new("activationlocked", "Activation Locked", "", "mdi:lock-outline", "activation_locked"),
    FieldType::new("configured", "Configured", "", "mdi:cog", "configured"),
    FieldType::new("region", "Region", "", "mdi:map-marker-radius", "region"),
    FieldType::new("gwcard", "Gateway Card", "", "mdi:radio-tower", "gwcard"),
    FieldType::new("brokerconnected", "Broker Connected", "", "mdi:forum-outline", "connbroker"),
    FieldType::new("packetsup", "Packets Up", "pkts", "mdi:gauge", "pup"),
    FieldType::new("packetsdown", "Packets Down", "pkts", "mdi:gauge", "pdown"),
    FieldType::new("estore", "External Storage", "", "mdi:sd", "estor"),
];

/// Look up a sensor type by canonical name, ignoring case
pub fn field_type(name: &str) -> Option<&'static FieldType> {
    let name = name.trim();
    FIELD_TYPES
        .iter()
        .find(|ft| ft.name.eq_ignore_ascii_case(name))
}

pub fn canonical_names() -> impl Iterator<Item = &'static str> {
    FIELD_TYPES.iter().map(|ft| ft.name)
}
