use anyhow::{bail, Result};
use serde_json::{json, Map, Value};

use crate::argsets::StatusArgs;
use crate::config::Config;
use crate::hass::Entity;
use crate::helpers;
use crate::platform::setup_platform;
use crate::sensors::FieldSensor;

/// Fetch the gateway status once and print the configured sensors as JSON
pub fn status(args: StatusArgs) -> Result<()> {
    let config = match (args.config.as_deref(), args.host.as_deref()) {
        (None, Some(host)) => Config::for_host(host)?,
        (path, host) => {
            let config = Config::load(path)?;
            match host {
                Some(host) => Config {
                    host: host.to_string(),
                    ..config
                }
                .validate()?,
                None => config,
            }
        }
    };

    let platform = setup_platform(&config)?;
    if platform.client.latest_data().is_none() {
        bail!("no data received from TTN gateway at {}", config.host);
    }

    let report = status_report(&config.host, &platform.sensors);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn status_report(host: &str, sensors: &[FieldSensor]) -> Value {
    let states: Map<String, Value> = sensors
        .iter()
        .map(|s| (s.object_id().to_string(), s.state().cloned().unwrap_or(Value::Null)))
        .collect();

    json!({
        "host": host,
        "fetched_at": helpers::now_iso(),
        "sensors": states,
    })
}
