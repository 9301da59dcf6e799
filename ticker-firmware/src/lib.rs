// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Dashboard-Antworten werden als alloc::String gesendet
extern crate alloc;

// Module
pub mod config;
pub mod hal;
pub mod tasks;
pub mod web;

// Re-exports von ticker-core
pub use ticker_core::{Request, Response, SmartLedWriter};

// Embassy Channel-Typen
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_sync::signal::Signal;

use crate::config::{HISTORY_CAPACITY, HTTP_TASK_COUNT, REQUEST_QUEUE_DEPTH};

// ============================================================================
// Type-Aliase für Channel-Typen
// ============================================================================
//
// HTTP-Tasks und Ticker-Task teilen sich keinen Zustand. Ein Request
// geht als (task_id, Request) über den Channel, die Antwort kommt über
// das Signal mit Index task_id zurück.

/// Antwort des Tickers an einen HTTP-Task
pub type TickerResponse = Response<HISTORY_CAPACITY>;

/// Ein eingereihter Dashboard-Request mit Absender
pub type TickerRequest = (usize, Request);

/// Channel für Dashboard-Requests (HTTP Tasks → Ticker Task)
pub type RequestChannel = Channel<NoopRawMutex, TickerRequest, REQUEST_QUEUE_DEPTH>;

/// Sender für Dashboard-Requests (ein Sender pro HTTP Task)
pub type RequestSender = Sender<'static, NoopRawMutex, TickerRequest, REQUEST_QUEUE_DEPTH>;

/// Receiver für Dashboard-Requests (Ticker Task pollt non-blocking)
pub type RequestReceiver = Receiver<'static, NoopRawMutex, TickerRequest, REQUEST_QUEUE_DEPTH>;

/// Antwort-Slot eines HTTP Tasks
pub type ReplySignal = Signal<NoopRawMutex, TickerResponse>;

/// Ein Antwort-Slot pro HTTP Task, Index = task_id
pub type ReplySignals = [ReplySignal; HTTP_TASK_COUNT];

/// Reconnect-Wunsch des Tickers an den WiFi Task
pub type WifiReconnectSignal = Signal<NoopRawMutex, ()>;
