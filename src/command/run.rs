use std::thread;

use anyhow::Result;

use crate::argsets::RunArgs;
use crate::config::Config;
use crate::hass::{discovery_messages, state_messages, DeviceInfo};
use crate::interfaces::mqtt;
use crate::platform::{setup_platform, Platform};

const CLIENT_PREFIX: &str = "ttngw";

/// Poll the gateway on the scan interval and mirror the sensors to Home Assistant
pub fn run(args: RunArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let mut platform = setup_platform(&config)?;

    let mut discovery_published = publish_discovery(&config, &platform);
    publish_states(&config, &platform);

    if args.once {
        return Ok(());
    }

    let interval = config.scan_interval();
    log::info!(
        "Polling TTN gateway at {} every {}s",
        config.host,
        interval.as_secs()
    );
    loop {
        thread::sleep(interval);

        log::debug!("Starting update cycle");
        platform.update_all();

        // Home Assistant ignores states of entities it hasn't discovered
        if !discovery_published {
            discovery_published = publish_discovery(&config, &platform);
        }
        publish_states(&config, &platform);
    }
}

fn publish_discovery(config: &Config, platform: &Platform) -> bool {
    let latest = platform.client.latest_data();
    let device = DeviceInfo::new(&config.mqtt.node_id, &config.host, latest.as_deref());
    let messages = discovery_messages(&platform.sensors, &config.mqtt, &device);

    match mqtt::publish_msgs(&config.mqtt, &messages, Some(CLIENT_PREFIX)) {
        Ok(()) => {
            log::info!("Published discovery config for {} sensors", messages.len());
            true
        }
        Err(e) => {
            log::error!("Could not publish discovery config: {e}");
            false
        }
    }
}

fn publish_states(config: &Config, platform: &Platform) {
    let messages = state_messages(&platform.sensors, &config.mqtt.node_id);
    log::trace!("Publishing states: {:?}", &messages);

    if let Err(e) = mqtt::publish_msgs(&config.mqtt, &messages, Some(CLIENT_PREFIX)) {
        log::error!("Could not publish sensor states: {e}");
    }
}
