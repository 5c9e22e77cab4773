use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use once_cell::sync::Lazy;
use serde::Deserialize;
use thiserror::Error;

use crate::constants::{defaults, envvars};
use crate::gateway::{self, ClientOptions};
use crate::sensors::{self, FieldType};

static MQTT_BRIDGE_HOST: Lazy<String> = Lazy::new(|| {
    if let Ok(host) = env::var(envvars::MQTT_BRIDGE_HOST) {
        return host;
    }
    defaults::MQTT_BRIDGE_HOST.to_string()
});

static MQTT_BRIDGE_PORT: Lazy<u16> = Lazy::new(|| {
    if let Ok(port) = env::var(envvars::MQTT_BRIDGE_PORT).map(|p| p.parse::<u16>()) {
        if let Ok(port) = port {
            return port;
        }
        log::warn!("Ignoring invalid {}", envvars::MQTT_BRIDGE_PORT);
    }
    defaults::MQTT_BRIDGE_PORT
});

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("could not read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("no gateway host configured; set {} or use a config file", envvars::TTN_GW_HOST)]
    MissingHost,
    #[error("invalid gateway host '{0}'")]
    InvalidHost(String),
    #[error("unknown resource '{0}'")]
    UnknownResource(String),
    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

/// Durations are given in seconds
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub host: String,
    #[serde(default = "default_scan_interval")]
    pub scan_interval: u64,
    #[serde(default = "default_resources")]
    pub resources: Vec<String>,
    #[serde(default = "default_min_time_between_updates")]
    pub min_time_between_updates: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    #[serde(default)]
    pub mqtt: MqttConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MqttConfig {
    #[serde(default = "default_mqtt_host")]
    pub host: String,
    #[serde(default = "default_mqtt_port")]
    pub port: u16,
    #[serde(default = "default_node_id")]
    pub node_id: String,
    #[serde(default = "default_discovery_prefix")]
    pub discovery_prefix: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            host: default_mqtt_host(),
            port: default_mqtt_port(),
            node_id: default_node_id(),
            discovery_prefix: default_discovery_prefix(),
            username: None,
            password: None,
        }
    }
}

fn default_scan_interval() -> u64 {
    defaults::SCAN_INTERVAL.as_secs()
}

fn default_resources() -> Vec<String> {
    sensors::canonical_names().map(String::from).collect()
}

fn default_min_time_between_updates() -> u64 {
    defaults::MIN_TIME_BETWEEN_UPDATES.as_secs()
}

fn default_request_timeout() -> u64 {
    defaults::REQUEST_TIMEOUT.as_secs()
}

fn default_mqtt_host() -> String {
    MQTT_BRIDGE_HOST.clone()
}

fn default_mqtt_port() -> u16 {
    *MQTT_BRIDGE_PORT
}

fn default_node_id() -> String {
    defaults::MQTT_NODE_ID.to_string()
}

fn default_discovery_prefix() -> String {
    defaults::DISCOVERY_PREFIX.to_string()
}

impl Config {
    /// Defaults for everything but the host
    pub fn for_host(host: &str) -> Result<Self, ConfigError> {
        Self {
            host: host.to_string(),
            scan_interval: default_scan_interval(),
            resources: default_resources(),
            min_time_between_updates: default_min_time_between_updates(),
            request_timeout: default_request_timeout(),
            mqtt: MqttConfig::default(),
        }
        .validate()
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        raw.parse()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var(envvars::TTN_GW_HOST).map_err(|_| ConfigError::MissingHost)?;
        let mut config = Self::for_host(&host)?;

        if let Ok(interval) = env::var(envvars::TTN_GW_SCAN_INTERVAL) {
            config.scan_interval =
                interval
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        var: envvars::TTN_GW_SCAN_INTERVAL,
                        value: interval.clone(),
                    })?;
        }
        if let Ok(resources) = env::var(envvars::TTN_GW_RESOURCES) {
            config.resources = resources
                .split(',')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(String::from)
                .collect();
        }

        config.validate()
    }

    /// Read the config file if one is given, otherwise take everything from the environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                Self::from_file(path)
            }
            None => Self::from_env(),
        }
    }

    /// Check the config and normalise resource names to their canonical form
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        self.host = self.host.trim().to_string();
        if self.host.is_empty() {
            return Err(ConfigError::MissingHost);
        }
        gateway::status_url(&self.host).map_err(|_| ConfigError::InvalidHost(self.host.clone()))?;

        for (name, secs) in [
            ("scan_interval", self.scan_interval),
            ("min_time_between_updates", self.min_time_between_updates),
            ("request_timeout", self.request_timeout),
        ] {
            if secs == 0 {
                return Err(ConfigError::ZeroDuration(name));
            }
        }

        // Each resource becomes one entity, so repeats are dropped
        let mut resources: Vec<String> = Vec::with_capacity(self.resources.len());
        for r in self.resources.iter() {
            let name = sensors::field_type(r)
                .ok_or_else(|| ConfigError::UnknownResource(r.clone()))?
                .name;
            if resources.iter().any(|seen| seen == name) {
                log::warn!("Ignoring duplicate resource '{r}'");
                continue;
            }
            resources.push(name.to_string());
        }
        self.resources = resources;

        Ok(self)
    }

    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval)
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            min_time_between_updates: Duration::from_secs(self.min_time_between_updates),
            request_timeout: Duration::from_secs(self.request_timeout),
        }
    }

    /// Sensor types for the configured resources, in configured order
    pub fn field_types(&self) -> Vec<&'static FieldType> {
        self.resources
            .iter()
            .filter_map(|r| sensors::field_type(r))
            .collect()
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(config_raw: &str) -> Result<Self, Self::Err> {
        serde_json::from_str::<Config>(config_raw)?.validate()
    }
}
