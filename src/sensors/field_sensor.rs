use std::sync::Arc;

use serde_json::Value;

use crate::gateway::GatewayClient;
use crate::hass::Entity;

use super::field_types::FieldType;

/// Exposes one field of the gateway status document
pub struct FieldSensor {
    client: Arc<GatewayClient>,
    object_id: String,
    name: String,
    field_key: String,
    unit: String,
    icon: String,
    state: Option<Value>,
}

impl FieldSensor {
    pub fn new(client: Arc<GatewayClient>, field_type: &FieldType) -> Self {
        Self::with_details(
            client,
            field_type.name,
            &field_type.display_name(),
            field_type.json_key,
            field_type.unit,
            field_type.icon,
        )
    }

    pub fn with_details(
        client: Arc<GatewayClient>,
        object_id: &str,
        name: &str,
        field_key: &str,
        unit: &str,
        icon: &str,
    ) -> Self {
        Self {
            client,
            object_id: object_id.to_string(),
            name: name.to_string(),
            field_key: field_key.to_string(),
            unit: unit.to_string(),
            icon: icon.to_string(),
            state: None,
        }
    }

    pub fn field_key(&self) -> &str {
        &self.field_key
    }
}

impl Entity for FieldSensor {
    fn object_id(&self) -> &str {
        &self.object_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn icon(&self) -> Option<&str> {
        Some(self.icon.as_str()).filter(|i| !i.is_empty())
    }

    fn unit_of_measurement(&self) -> Option<&str> {
        Some(self.unit.as_str()).filter(|u| !u.is_empty())
    }

    fn state(&self) -> Option<&Value> {
        self.state.as_ref()
    }

    /// Refresh the shared client (subject to its throttle) and pick up this sensor's field.
    ///
    /// The previous value is kept when there is no data or the field is missing.
    fn update(&mut self) {
        self.client.refresh();

        let Some(status) = self.client.latest_data() else {
            log::debug!("No data from TTN gateway; keeping state of {}", self.name);
            return;
        };

        if let Some(value) = status.get(&self.field_key) {
            self.state = Some(value.clone());
        }
        log::debug!("Device: {} State: {:?}", self.object_id, self.state);
    }
}
