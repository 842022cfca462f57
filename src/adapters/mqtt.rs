//! MQTT transport adapter (ESP-IDF target only).
//!
//! Outbound: [`PublishPort`] over `EspMqttClient`, QoS 1.
//! Inbound: a named receiver thread drains the connection, strips the
//! configured topic root and forwards every complete message into the
//! presentation loop's single-consumer channel. The receiver never
//! interprets topics — routing belongs to the domain core.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use embedded_svc::mqtt::client::{Details, EventPayload, QoS};
use esp_idf_svc::mqtt::client::{EspMqttClient, EspMqttConnection, MqttClientConfiguration};
use log::{info, warn};

use crate::app::commands::InboundMessage;
use crate::app::ports::PublishPort;
use crate::config::SystemConfig;
use crate::error::CommsError;

const RECEIVER_STACK: usize = 8 * 1024;
const RECONNECT_BACKOFF: Duration = Duration::from_secs(2);
const KEEP_ALIVE: Duration = Duration::from_secs(300);
const MAX_PAYLOAD_BYTES: usize = 512;

pub struct MqttLink {
    client: Arc<Mutex<EspMqttClient<'static>>>,
    root: String,
}

impl MqttLink {
    /// Connect to the broker, subscribe to the weather sub-tree and the
    /// alarm request topic, and start the receiver thread feeding `tx`.
    pub fn connect(
        config: &SystemConfig,
        tx: Sender<InboundMessage>,
    ) -> Result<Self, CommsError> {
        let conf = MqttClientConfiguration {
            client_id: Some(&config.mqtt_client_id),
            keep_alive_interval: Some(KEEP_ALIVE),
            ..Default::default()
        };

        let (client, conn) = EspMqttClient::new(&config.mqtt_broker_url, &conf)
            .map_err(|_| CommsError::MqttConnectFailed)?;
        let client = Arc::new(Mutex::new(client));

        let subscriptions = [
            config.full_topic(&format!("{}/#", config.weather_prefix)),
            config.full_topic(&config.alarm_request_topic),
        ];
        subscribe_all(&client, &subscriptions)?;
        info!("mqtt: connected to {} as {}", config.mqtt_broker_url, config.mqtt_client_id);

        spawn_receiver(conn, tx, client.clone(), config.mqtt_root.clone(), subscriptions);

        Ok(Self {
            client,
            root: config.mqtt_root.clone(),
        })
    }
}

impl PublishPort for MqttLink {
    fn publish(&mut self, topic: &str, payload: &str, retain: bool) -> Result<(), CommsError> {
        let full = format!("{}/{}", self.root, topic);
        self.client
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .publish(&full, QoS::AtLeastOnce, retain, payload.as_bytes())
            .map(|_| ())
            .map_err(|_| CommsError::MqttPublishFailed)
    }
}

fn subscribe_all(
    client: &Arc<Mutex<EspMqttClient<'static>>>,
    topics: &[String],
) -> Result<(), CommsError> {
    // A panic elsewhere must not stop publishes or re-subscribes;
    // the guarded client is still usable after a poison.
    let mut client = client.lock().unwrap_or_else(PoisonError::into_inner);
    for topic in topics {
        client
            .subscribe(topic, QoS::AtLeastOnce)
            .map_err(|_| CommsError::MqttSubscribeFailed)?;
    }
    Ok(())
}

fn spawn_receiver(
    mut conn: EspMqttConnection,
    tx: Sender<InboundMessage>,
    client: Arc<Mutex<EspMqttClient<'static>>>,
    root: String,
    subscriptions: [String; 2],
) {
    thread::Builder::new()
        .name("mqtt-rx".into())
        .stack_size(RECEIVER_STACK)
        .spawn(move || {
            loop {
                match conn.next() {
                    Ok(event) => {
                        if let EventPayload::Received {
                            topic: Some(topic),
                            data,
                            details,
                            ..
                        } = event.payload()
                        {
                            // Only full payloads; fragments are dropped.
                            if !matches!(details, Details::Complete) {
                                continue;
                            }
                            if data.len() > MAX_PAYLOAD_BYTES {
                                warn!(
                                    "mqtt: dropping oversized payload on {} ({} bytes)",
                                    topic,
                                    data.len()
                                );
                                continue;
                            }

                            let Ok(payload) = core::str::from_utf8(data) else {
                                warn!("mqtt: non-UTF-8 payload on {}", topic);
                                continue;
                            };

                            let Some(relative) = topic
                                .strip_prefix(root.as_str())
                                .and_then(|t| t.strip_prefix('/'))
                            else {
                                continue;
                            };

                            if tx.send(InboundMessage::new(relative, payload)).is_err() {
                                // Presentation loop is gone; stop receiving.
                                return;
                            }
                        }
                    }
                    Err(e) => {
                        warn!("mqtt: receive loop error: {e:?}");
                        thread::sleep(RECONNECT_BACKOFF);
                        if let Err(e) = subscribe_all(&client, &subscriptions) {
                            warn!("mqtt: re-subscribe failed: {e}");
                        }
                    }
                }
            }
        })
        .expect("failed to spawn mqtt receiver thread");
}
