// WiFi Task - Verbindet mit WLAN und managed Connection
use defmt::{Debug2Format, error, info, warn};
use embassy_futures::select::{Either, select};
use embassy_net::{Runner, Stack};
use embassy_time::{Duration, Timer};
use esp_radio::wifi::{ClientConfig, ModeConfig, WifiController, WifiDevice, WifiEvent};

use crate::WifiReconnectSignal;
use crate::config::{WIFI_PASSWORD, WIFI_RETRY_DELAY_SECS, WIFI_SSID};

/// WiFi Connection Task
///
/// Managed die WiFi-Verbindung:
/// - Konfiguriert und startet den Controller
/// - Verbindet mit dem Access Point
/// - Wartet nach einem Fehler `WIFI_RETRY_DELAY_SECS`, es sei denn der
///   Ticker fordert über `reconnect` sofort einen neuen Versuch an
/// - Verbindet nach einem Disconnect automatisch neu
#[embassy_executor::task]
pub async fn connection_task(
    mut controller: WifiController<'static>,
    reconnect: &'static WifiReconnectSignal,
) {
    info!("WiFi: Starting connection task");

    loop {
        if matches!(controller.is_started(), Ok(false)) {
            if let Err(reason) = start_controller(&mut controller).await {
                error!("WiFi: {}", reason);
                retry_pause(reconnect).await;
                continue;
            }
            info!("WiFi: Started successfully");
        }

        info!("WiFi: Connecting to '{}'...", WIFI_SSID);
        if let Err(e) = controller.connect_async().await {
            error!("WiFi: Connection failed: {}", Debug2Format(&e));
            retry_pause(reconnect).await;
            continue;
        }
        info!("WiFi: Connected successfully!");

        // Ein Reconnect-Wunsch während die Verbindung steht ist überholt
        reconnect.reset();

        controller.wait_for_event(WifiEvent::StaDisconnected).await;
        warn!("WiFi: Disconnected from AP, will retry...");
    }
}

/// Station-Modus konfigurieren und Controller starten
async fn start_controller(controller: &mut WifiController<'static>) -> Result<(), &'static str> {
    info!("WiFi: Configuring and starting...");

    let client_config = ModeConfig::Client(
        ClientConfig::default()
            .with_ssid(WIFI_SSID.into())
            .with_password(WIFI_PASSWORD.into()),
    );

    controller
        .set_config(&client_config)
        .map_err(|_| "Failed to set configuration")?;
    controller
        .start_async()
        .await
        .map_err(|_| "Failed to start")?;
    Ok(())
}

/// Wartet bis zum nächsten Versuch oder bis der Ticker drängelt
async fn retry_pause(reconnect: &'static WifiReconnectSignal) {
    match select(
        Timer::after(Duration::from_secs(WIFI_RETRY_DELAY_SECS)),
        reconnect.wait(),
    )
    .await
    {
        Either::First(_) => {}
        Either::Second(_) => info!("WiFi: Reconnect requested by ticker"),
    }
}

/// Network Task
///
/// Überwacht den Netzwerk-Stack:
/// - Prozessiert Netzwerk-Pakete
/// - Managed TCP/IP Stack
#[embassy_executor::task]
pub async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) -> ! {
    runner.run().await
}

/// DHCP Monitor Task
///
/// Loggt bei jeder neuen Verbindung die per DHCP erhaltene
/// Netzwerk-Konfiguration
#[embassy_executor::task]
pub async fn dhcp_task(stack: &'static Stack<'static>) {
    loop {
        stack.wait_config_up().await;

        if let Some(config) = stack.config_v4() {
            info!("WiFi: Got IP address!");
            info!("  IP:      {}", Debug2Format(&config.address.address()));
            info!("  Gateway: {}", Debug2Format(&config.gateway));
            info!("  DNS:     {}", Debug2Format(&config.dns_servers));
            info!("  Dashboard: http://{}/", Debug2Format(&config.address.address()));
        }

        stack.wait_config_down().await;
        warn!("WiFi: Lost IP configuration");
    }
}
