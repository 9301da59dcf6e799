// Ticker Task - Kurs abrufen, anzeigen, Dashboard bedienen
use defmt::{error, info, warn};
use embassy_net::Stack;
use embassy_time::Delay;
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::time::Rate;
use esp_hal_smartled::smart_led_buffer;
use ticker_core::{
    Capabilities, Coordinator, FetchOutcome, Observer, ReconnectOutcome, RgbIndicator, TaskEvent,
};

use crate::config::*;
use crate::hal::{EmbassyClock, I2cLcd, RmtLedWriter, StackConnectivity, TcpHttpClient};
use crate::web::bridge::ChannelRequestPort;
use crate::{ReplySignals, RequestReceiver, WifiReconnectSignal};

/// Observer der jedes Scheduler-Ereignis per defmt loggt
pub struct DefmtObserver;

impl Observer for DefmtObserver {
    fn on_event(&mut self, event: &TaskEvent) {
        match event {
            TaskEvent::Reconnect(ReconnectOutcome::Connected { polls }) => {
                info!("Ticker: WiFi back after {} polls", polls)
            }
            TaskEvent::Reconnect(ReconnectOutcome::GaveUp { polls }) => {
                warn!("Ticker: WiFi still down after {} polls", polls)
            }
            TaskEvent::Reconnect(ReconnectOutcome::StartFailed) => {
                error!("Ticker: Could not start WiFi reconnect")
            }
            TaskEvent::Request { status } => info!("Ticker: Request answered with {}", status),
            TaskEvent::SymbolChanged => info!("Ticker: Symbol changed, history cleared"),
            TaskEvent::Fetch(FetchOutcome::Updated(update)) => info!(
                "Ticker: {} ({}%, {})",
                update.price, update.percent_change, update.direction
            ),
            TaskEvent::Fetch(FetchOutcome::NetworkError { status: Some(status) }) => {
                warn!("Ticker: Price API answered {}", status)
            }
            TaskEvent::Fetch(FetchOutcome::NetworkError { status: None }) => {
                warn!("Ticker: Price API unreachable")
            }
            TaskEvent::Fetch(FetchOutcome::DecodeError(e)) => {
                warn!("Ticker: Could not decode quote: {}", e)
            }
            TaskEvent::Fetch(FetchOutcome::Timeout) => warn!("Ticker: Fetch timed out"),
            TaskEvent::Alert {
                percent_change,
                direction,
            } => info!("Ticker: ALERT {}% ({})", percent_change, direction),
            TaskEvent::Display(Ok(_)) => {}
            TaskEvent::Display(Err(e)) => warn!("Ticker: Display write failed: {}", e),
            TaskEvent::LedFailed(_) => warn!("Ticker: Failed to write to LED"),
        }
    }
}

/// Ticker Task - der einzige Task mit Ticker-Zustand
///
/// Initialisiert Status-LED und LCD und übergibt dann an den
/// kooperativen Scheduler aus ticker-core. Dashboard-Requests kommen
/// über `receiver`, WLAN-Reconnects gehen über `reconnect` an den
/// WiFi Task.
///
/// Scheitert die LED oder die Konfiguration, endet der Task mit einer
/// Fehlermeldung. Ein fehlendes LCD ist kein Abbruchgrund.
#[embassy_executor::task]
#[allow(clippy::too_many_arguments)]
pub async fn ticker_task(
    stack: &'static Stack<'static>,
    reconnect: &'static WifiReconnectSignal,
    gpio8: esp_hal::peripherals::GPIO8<'static>,
    rmt_peripheral: esp_hal::peripherals::RMT<'static>,
    i2c0: esp_hal::peripherals::I2C0<'static>,
    sda: esp_hal::peripherals::GPIO6<'static>,
    scl: esp_hal::peripherals::GPIO7<'static>,
    receiver: RequestReceiver,
    replies: &'static ReplySignals,
) {
    info!("Ticker: Starting for {} via {}", TICKER_SYMBOL, PRICE_API_BASE);

    // Buffer für SmartLED Daten (1 LED), muss den Writer überleben
    let mut rmt_buffer = smart_led_buffer!(1);
    let led = match RmtLedWriter::new(gpio8, rmt_peripheral, RMT_CLOCK_MHZ, &mut rmt_buffer) {
        Ok(led) => led,
        Err(_) => {
            error!("Ticker: Failed to initialize RMT for status LED");
            return;
        }
    };

    let i2c_config = I2cConfig::default().with_frequency(Rate::from_khz(LCD_I2C_FREQ_KHZ));
    let i2c = match I2c::new(i2c0, i2c_config) {
        Ok(i2c) => i2c.with_sda(sda).with_scl(scl),
        Err(_) => {
            error!("Ticker: Failed to configure I2C for LCD");
            return;
        }
    };
    let mut lcd = I2cLcd::new(i2c, Delay, LCD_I2C_ADDRESS, LCD_COLS, LCD_ROWS);
    if let Err(e) = lcd.init() {
        // Weiter ohne LCD, Fehler tauchen dann als Display-Events auf
        warn!("Ticker: LCD init failed: {}", e);
    }

    let mut coordinator = match Coordinator::<HISTORY_CAPACITY>::new(ticker_config()) {
        Ok(coordinator) => coordinator,
        Err(e) => {
            error!("Ticker: Invalid configuration: {}", e);
            return;
        }
    };

    let mut caps = Capabilities {
        network: StackConnectivity::new(*stack, reconnect),
        http: TcpHttpClient::new(*stack),
        display: lcd,
        led: RgbIndicator::new(led, LED_BRIGHTNESS),
        requests: ChannelRequestPort::new(receiver, replies),
        observer: DefmtObserver,
        delay: Delay,
    };

    coordinator.run(&EmbassyClock, &mut caps).await
}
