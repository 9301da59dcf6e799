//! Mock-Implementierungen der Hardware-Traits für Host-Tests
//!
//! Zeit ist simuliert: `SimDelay` rückt die gemeinsame `SimClock` vor,
//! statt wirklich zu warten.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal_async::delay::DelayNs;
use rgb::RGB8;
use ticker_core::{
    Capabilities, Clock, Connectivity, ConnectivityError, DisplayError, Endpoint, Glyph,
    HttpClient, HttpResponse, LedError, NetError, Observer, Request, RequestPort, Response,
    RgbIndicator, SmartLedWriter, TaskEvent, TextDisplay, TickerConfig,
};

/// Verlaufskapazität in allen Tests
pub const CAP: usize = 8;

pub const LED_BRIGHTNESS: u8 = 10;

// ============================================================================
// Mock LED Writer
// ============================================================================

#[derive(Default)]
pub struct MockLedWriter {
    pub last_color: Option<RGB8>,
    pub write_count: usize,
    pub fail_next_write: bool,
}

impl MockLedWriter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SmartLedWriter for MockLedWriter {
    fn write(&mut self, color: RGB8) -> Result<(), LedError> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(LedError::WriteFailed);
        }

        self.last_color = Some(color);
        self.write_count += 1;
        Ok(())
    }
}

// ============================================================================
// Simulierte Zeit
// ============================================================================

#[derive(Clone, Default)]
pub struct SimClock(Rc<Cell<u64>>);

impl SimClock {
    pub fn set(&self, now_ms: u64) {
        self.0.set(now_ms);
    }

    pub fn advance(&self, ms: u64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

pub struct SimDelay {
    pub clock: SimClock,
    pub total_ms: u64,
}

impl DelayNs for SimDelay {
    async fn delay_ns(&mut self, ns: u32) {
        let ms = u64::from(ns / 1_000_000);
        self.total_ms += ms;
        self.clock.advance(ms);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.total_ms += u64::from(ms);
        self.clock.advance(u64::from(ms));
    }
}

// ============================================================================
// Mock Netzwerk
// ============================================================================

/// WLAN-Mock: verbindet sich `polls_to_connect` Polls nach `begin()`
pub struct MockNetwork {
    pub connected: bool,
    /// `None` = Reconnect gelingt nie
    pub polls_to_connect: Option<u8>,
    pub fail_begin: bool,
    pub begin_calls: usize,
    pending: Option<u8>,
}

impl MockNetwork {
    pub fn online() -> Self {
        Self {
            connected: true,
            polls_to_connect: Some(1),
            fail_begin: false,
            begin_calls: 0,
            pending: None,
        }
    }

    pub fn offline(polls_to_connect: Option<u8>) -> Self {
        Self {
            connected: false,
            polls_to_connect,
            ..Self::online()
        }
    }
}

impl Connectivity for MockNetwork {
    fn is_connected(&mut self) -> bool {
        if !self.connected {
            if let Some(remaining) = self.pending.as_mut() {
                if *remaining <= 1 {
                    self.connected = true;
                    self.pending = None;
                } else {
                    *remaining -= 1;
                }
            }
        }
        self.connected
    }

    fn begin(&mut self) -> Result<(), ConnectivityError> {
        self.begin_calls += 1;
        if self.fail_begin {
            return Err(ConnectivityError::StartFailed);
        }
        self.pending = self.polls_to_connect;
        Ok(())
    }
}

/// HTTP-Mock mit vorgegebenen Antworten
///
/// Ist die Queue leer, schlägt der Abruf mit `NetError::Transport` fehl.
#[derive(Default)]
pub struct ScriptedHttp {
    pub responses: VecDeque<Result<(u16, String), NetError>>,
    pub urls: Vec<String>,
    pub timeouts: Vec<u32>,
}

impl ScriptedHttp {
    pub fn push_price(&mut self, price: &str) {
        self.responses.push_back(Ok((200, ticker_body(price, "0.50"))));
    }

    pub fn push(&mut self, response: Result<(u16, String), NetError>) {
        self.responses.push_back(response);
    }
}

impl HttpClient for ScriptedHttp {
    async fn get(
        &mut self,
        url: &str,
        timeout_ms: u32,
        buf: &mut [u8],
    ) -> Result<HttpResponse, NetError> {
        self.urls.push(url.into());
        self.timeouts.push(timeout_ms);

        let (status, body) = self.responses.pop_front().unwrap_or(Err(NetError::Transport))?;
        let bytes = body.as_bytes();
        if bytes.len() > buf.len() {
            return Err(NetError::BufferTooSmall);
        }
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(HttpResponse {
            status,
            len: bytes.len(),
        })
    }
}

/// Body im Format des 24hr-Tickers
pub fn ticker_body(last_price: &str, change_pct: &str) -> String {
    format!(
        r#"{{"symbol":"BTCUSDT","priceChangePercent":"{change_pct}","lastPrice":"{last_price}","count":1200}}"#
    )
}

// ============================================================================
// Mock Display
// ============================================================================

/// Zeichnet den aktuellen Frame auf (wird bei `clear()` geleert)
pub struct RecordingDisplay {
    pub cols: u8,
    pub rows: u8,
    pub frame: Vec<(u8, u8, String)>,
    pub indicators: Vec<(u8, Glyph)>,
    pub clears: usize,
    pub fail_writes: bool,
}

impl RecordingDisplay {
    pub fn new(cols: u8, rows: u8) -> Self {
        Self {
            cols,
            rows,
            frame: Vec::new(),
            indicators: Vec::new(),
            clears: 0,
            fail_writes: false,
        }
    }

    /// Text einer Zeile im aktuellen Frame
    pub fn line(&self, row: u8) -> Option<&str> {
        self.frame
            .iter()
            .rev()
            .find(|(r, _, _)| *r == row)
            .map(|(_, _, text)| text.as_str())
    }
}

impl TextDisplay for RecordingDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.clears += 1;
        self.frame.clear();
        self.indicators.clear();
        Ok(())
    }

    fn write_at(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        if self.fail_writes {
            return Err(DisplayError::BusError);
        }
        if row >= self.rows || usize::from(col) + text.chars().count() > usize::from(self.cols) {
            return Err(DisplayError::OutOfBounds);
        }
        self.frame.push((row, col, text.into()));
        Ok(())
    }

    fn set_indicator(&mut self, slot: u8, glyph: Glyph) -> Result<(), DisplayError> {
        self.indicators.push((slot, glyph));
        Ok(())
    }
}

// ============================================================================
// Mock Request-Port und Observer
// ============================================================================

pub struct QueuedRequests<const N: usize> {
    pub pending: VecDeque<Request>,
    pub replies: Vec<(u32, Response<N>)>,
    next_ticket: u32,
}

impl<const N: usize> QueuedRequests<N> {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            replies: Vec::new(),
            next_ticket: 0,
        }
    }
}

impl<const N: usize> RequestPort<N> for QueuedRequests<N> {
    type Ticket = u32;

    fn try_next(&mut self) -> Option<(u32, Request)> {
        let request = self.pending.pop_front()?;
        self.next_ticket += 1;
        Some((self.next_ticket, request))
    }

    fn reply(&mut self, ticket: u32, response: Response<N>) {
        self.replies.push((ticket, response));
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    pub events: Vec<TaskEvent>,
}

impl Observer for RecordingObserver {
    fn on_event(&mut self, event: &TaskEvent) {
        self.events.push(*event);
    }
}

// ============================================================================
// Setup
// ============================================================================

pub type TestCaps = Capabilities<
    MockNetwork,
    ScriptedHttp,
    RecordingDisplay,
    RgbIndicator<MockLedWriter>,
    QueuedRequests<CAP>,
    RecordingObserver,
    SimDelay,
>;

/// Test-Konfiguration: Fetch 5s, Display 2s, Schwelle 2%
pub fn test_config() -> TickerConfig {
    TickerConfig {
        symbol: "BTCUSDT",
        api_base: "http://relay.local:8080",
        endpoint: Endpoint::Ticker24h,
        fetch_interval_secs: 5,
        display_interval_secs: 2,
        reconnect_interval_secs: 5,
        alert_threshold_pct: 2.0,
        fetch_timeout_ms: 1_000,
        reconnect_attempts: 4,
        reconnect_poll_ms: 250,
        alert_flashes: 2,
        alert_flash_ms: 100,
        tick_ms: 20,
        display_cols: 16,
        display_rows: 2,
    }
}

pub fn test_caps(clock: &SimClock) -> TestCaps {
    Capabilities {
        network: MockNetwork::online(),
        http: ScriptedHttp::default(),
        display: RecordingDisplay::new(16, 2),
        led: RgbIndicator::new(MockLedWriter::new(), LED_BRIGHTNESS),
        requests: QueuedRequests::new(),
        observer: RecordingObserver::default(),
        delay: SimDelay {
            clock: clock.clone(),
            total_ms: 0,
        },
    }
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}
