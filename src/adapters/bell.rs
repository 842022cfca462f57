//! HTTP bell adapter (ESP-IDF target only).
//!
//! One GET against the configured endpoint per alarm; the response body
//! is irrelevant, only a 2xx status counts as rung. The connection is
//! built per request with a hard timeout so a dead endpoint costs at
//! most `bell_timeout_secs`.

use std::time::Duration;

use embedded_svc::http::client::Client as HttpClient;
use embedded_svc::http::{Method, Status};
use esp_idf_svc::http::client::{Configuration as HttpClientConfiguration, EspHttpConnection};
use log::{info, warn};

use crate::app::ports::BellPort;
use crate::config::SystemConfig;
use crate::error::CommsError;

pub struct HttpBell {
    url: String,
    timeout: Duration,
}

impl HttpBell {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            url: config.bell_url.clone(),
            timeout: Duration::from_secs(u64::from(config.bell_timeout_secs)),
        }
    }
}

impl BellPort for HttpBell {
    fn ring(&mut self) -> Result<(), CommsError> {
        let conf = HttpClientConfiguration {
            timeout: Some(self.timeout),
            ..Default::default()
        };
        let conn =
            EspHttpConnection::new(&conf).map_err(|_| CommsError::BellRequestFailed)?;
        let mut client = HttpClient::wrap(conn);

        let request = client
            .request(Method::Get, &self.url, &[])
            .map_err(|_| CommsError::BellRequestFailed)?;
        let response = request
            .submit()
            .map_err(|_| CommsError::BellRequestFailed)?;

        let status = response.status();
        if (200..300).contains(&status) {
            info!("bell: rung ({status})");
            Ok(())
        } else {
            warn!("bell: endpoint answered {status}");
            Err(CommsError::BellRequestFailed)
        }
    }
}
