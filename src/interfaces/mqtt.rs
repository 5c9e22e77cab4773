use rumqttc::{Client, Connection, Event, MqttOptions, Packet, QoS};
use thiserror::Error;

use crate::config::MqttConfig;

const CHANNEL_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct MqttMessage {
    pub topic: String,
    pub payload: String,
    pub retain: bool,
}

impl MqttMessage {
    pub fn new(topic: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
            retain: false,
        }
    }

    pub fn retained(topic: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            retain: true,
            ..Self::new(topic, payload)
        }
    }
}

#[derive(Error, Debug)]
pub enum MqttError {
    #[error(transparent)]
    MqttClient(#[from] rumqttc::ClientError),
    #[error(transparent)]
    MqttConnection(#[from] rumqttc::ConnectionError),
}

pub fn get_rand_client_id(prefix: Option<&str>) -> String {
    const RAND_ID_BYTES: usize = 3;
    let rand: [u8; RAND_ID_BYTES] = rand::random();
    let randhex = hex::encode(rand);

    if let Some(pref) = prefix {
        format!("{pref}-{randhex}")
    } else {
        randhex
    }
}

pub fn client_conn(
    settings: &MqttConfig,
    client_id: String,
    capacity: usize,
) -> (Client, Connection) {
    log::info!(
        "Establishing MQTT connection to {}:{} as {client_id}",
        settings.host,
        settings.port
    );

    let mut mqttoptions = MqttOptions::new(client_id, settings.host.clone(), settings.port);
    mqttoptions.set_clean_session(true);
    if let Some(username) = &settings.username {
        mqttoptions.set_credentials(
            username.clone(),
            settings.password.clone().unwrap_or_default(),
        );
    }

    Client::new(mqttoptions, capacity)
}

/// Publish a batch over a short-lived connection, returning once the broker has acknowledged all of it
pub fn publish_msgs(
    settings: &MqttConfig,
    messages: &[MqttMessage],
    client_prefix: Option<&str>,
) -> Result<(), MqttError> {
    if messages.is_empty() {
        log::debug!("Nothing to publish");
        return Ok(());
    }

    // Every publish is queued before the event loop is polled, so the whole batch must fit
    let capacity = messages.len().max(CHANNEL_CAPACITY);
    let (mut client, mut connection) =
        client_conn(settings, get_rand_client_id(client_prefix), capacity);

    let mut expected_msg_acks = messages.len();

    for msg in messages.iter() {
        log::debug!("Publishing to {}: {}", msg.topic, msg.payload);

        client.publish(
            msg.topic.clone(),
            QoS::AtLeastOnce,
            msg.retain,
            msg.payload.as_bytes(),
        )?;
    }

    for notification in connection.iter() {
        log::trace!("Notification = {:?}", notification);
        match notification {
            Ok(Event::Incoming(Packet::PubAck(_))) => expected_msg_acks -= 1,
            Err(e) => return Err(e.into()),
            _ => (),
        }
        if expected_msg_acks == 0 {
            break;
        }
    }
    client.disconnect()?;
    Ok(())
}
