use std::sync::Arc;

use crate::config::Config;
use crate::gateway::{GatewayClient, GatewayError};
use crate::hass::Entity;
use crate::helpers::{Clock, SystemClock};
use crate::sensors::FieldSensor;

/// One gateway client and the sensors that share it
pub struct Platform {
    pub client: Arc<GatewayClient>,
    pub sensors: Vec<FieldSensor>,
}

pub fn setup_platform(config: &Config) -> Result<Platform, GatewayError> {
    setup_platform_with_clock(config, SystemClock)
}

/// Create the client, try a first fetch, and build one sensor per configured resource.
///
/// An unreachable gateway does not abort setup: sensors start without a value
/// and pick one up on a later cycle.
pub fn setup_platform_with_clock(
    config: &Config,
    clock: impl Clock + 'static,
) -> Result<Platform, GatewayError> {
    let client = Arc::new(GatewayClient::with_clock(
        &config.host,
        config.client_options(),
        clock,
    )?);

    client.refresh();
    if client.latest_data().is_none() {
        log::warn!(
            "No data from TTN gateway at {} during setup; sensors start without a value",
            client.host()
        );
    }

    let mut sensors = Vec::new();
    for field_type in config.field_types() {
        log::debug!(
            "Adding TTN gateway sensor: {}, {}, {}, {}",
            field_type.display_name(),
            field_type.name,
            field_type.unit,
            field_type.icon
        );
        let mut sensor = FieldSensor::new(Arc::clone(&client), field_type);
        // Within the throttle window, so this reads the setup fetch
        sensor.update();
        sensors.push(sensor);
    }
    log::info!(
        "Set up {} sensors for TTN gateway at {}",
        sensors.len(),
        client.host()
    );

    Ok(Platform { client, sensors })
}

impl Platform {
    /// One scheduled cycle: every sensor asks for a refresh, at most one fetch happens
    pub fn update_all(&mut self) {
        for sensor in self.sensors.iter_mut() {
            sensor.update();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::net::TcpListener;
    use std::time::Duration;

    use mockito::Server;
    use serde_json::json;

    use crate::gateway::STATUS_PATH;
    use crate::helpers::ManualClock;

    #[test]
    fn test_setup_populates_sensors_with_one_fetch() {
        let mut server = Server::new();
        let m = server
            .mock("GET", STATUS_PATH)
            .with_body(r#"{"gateway":"gw1","pup":42}"#)
            .expect(1)
            .create();

        let config = Config {
            resources: vec!["gateway".into(), "packetsup".into(), "uptime".into()],
            ..Config::for_host(&server.host_with_port()).unwrap()
        };
        let platform = setup_platform_with_clock(&config, ManualClock::new()).unwrap();

        let states: Vec<_> = platform.sensors.iter().map(|s| s.state().cloned()).collect();
        assert_eq!(states, vec![Some(json!("gw1")), Some(json!(42)), None]);
        m.assert();
    }

    #[test]
    fn test_setup_proceeds_when_gateway_unreachable() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let host = listener.local_addr().unwrap().to_string();
        drop(listener);

        let config = Config::for_host(&host).unwrap();
        let platform = setup_platform(&config).unwrap();

        assert_eq!(platform.sensors.len(), 16);
        assert!(platform.sensors.iter().all(|s| s.state().is_none()));
        assert!(platform.client.latest_data().is_none());
    }

    #[test]
    fn test_update_all_fetches_once_per_window() {
        let mut server = Server::new();
        let m = server
            .mock("GET", STATUS_PATH)
            .with_body(r#"{"uptime": 10}"#)
            .expect(2)
            .create();

        let clock = ManualClock::new();
        let config = Config::for_host(&server.host_with_port()).unwrap();
        let mut platform = setup_platform_with_clock(&config, clock.clone()).unwrap();

        platform.update_all();
        clock.advance(Duration::from_secs(10));
        platform.update_all();

        m.assert();
    }
}
