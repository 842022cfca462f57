//! WiFi station bring-up (ESP-IDF target only).
//!
//! Blocking connect with a few retries. Credentials are baked in at
//! flash time via `WIFI_SSID` / `WIFI_PASS` environment variables; there
//! is no provisioning flow on this appliance.

use std::thread;
use std::time::Duration;

use embedded_svc::wifi::{AuthMethod, ClientConfiguration, Configuration};
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::modem::Modem;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};
use log::{info, warn};

use crate::error::CommsError;

const CONNECT_ATTEMPTS: u32 = 5;
const RETRY_DELAY: Duration = Duration::from_secs(3);

/// Bring the station up and wait for an IP. The returned handle must be
/// kept alive for the program lifetime.
pub fn connect(
    modem: Modem,
    sys_loop: EspSystemEventLoop,
    nvs: EspDefaultNvsPartition,
    ssid: &str,
    password: &str,
) -> Result<BlockingWifi<EspWifi<'static>>, CommsError> {
    let esp_wifi =
        EspWifi::new(modem, sys_loop.clone(), Some(nvs)).map_err(|_| CommsError::WifiConnectFailed)?;
    let mut wifi =
        BlockingWifi::wrap(esp_wifi, sys_loop).map_err(|_| CommsError::WifiConnectFailed)?;

    let auth_method = if password.is_empty() {
        AuthMethod::None
    } else {
        AuthMethod::WPAWPA2Personal
    };

    wifi.set_configuration(&Configuration::Client(ClientConfiguration {
        ssid: ssid.try_into().map_err(|_| CommsError::WifiConnectFailed)?,
        password: password
            .try_into()
            .map_err(|_| CommsError::WifiConnectFailed)?,
        auth_method,
        ..Default::default()
    }))
    .map_err(|_| CommsError::WifiConnectFailed)?;

    wifi.start().map_err(|_| CommsError::WifiConnectFailed)?;
    info!("wifi: started, connecting to `{ssid}`");

    for attempt in 1..=CONNECT_ATTEMPTS {
        match wifi.connect().and_then(|()| wifi.wait_netif_up()) {
            Ok(()) => {
                info!("wifi: connected on attempt {attempt}");
                return Ok(wifi);
            }
            Err(e) => {
                warn!("wifi: attempt {attempt}/{CONNECT_ATTEMPTS} failed: {e:#}");
                let _ = wifi.disconnect();
                thread::sleep(RETRY_DELAY);
            }
        }
    }

    Err(CommsError::WifiConnectFailed)
}
