//! Ticker Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Traits, den Scheduler und Pure Functions des
//! Kurs-Tickers und läuft damit auch auf dem Host (Tests).

#![no_std]

pub mod alert;
pub mod config;
pub mod decode;
pub mod display;
pub mod fetcher;
pub mod history;
pub mod http;
pub mod led;
pub mod logic;
pub mod request;
pub mod scheduler;
pub mod telemetry;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use alert::{AlertFlasher, should_alert};
pub use config::{ConfigError, Endpoint, TickerConfig};
pub use decode::{DecodeError, Quote, decode_quote};
pub use display::{DisplayPresenter, Screen};
pub use fetcher::{FetchOutcome, PriceFetcher};
pub use history::PriceHistory;
pub use led::RgbIndicator;
pub use logic::{indicator_color, percent_change};
pub use request::{Request, Response};
pub use scheduler::{
    Capabilities, Coordinator, PeriodicTask, ReconnectOutcome, TaskEvent, TickReport,
};
pub use telemetry::{PriceUpdate, Snapshot, TelemetryState};
pub use traits::{
    Clock, Connectivity, ConnectivityError, DisplayError, HttpClient, HttpResponse, LedError,
    NetError, Observer, RequestPort, SmartLedWriter, StatusLed, TextDisplay,
};
pub use types::{Direction, Glyph, LedChannel, Symbol, SymbolError};
