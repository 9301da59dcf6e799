// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron und unabhängig.
// Der Ticker Task besitzt den gesamten Ticker-Zustand, HTTP Tasks reden
// nur über Channel + Signale mit ihm (HTTP ↔ Ticker, Ticker → WiFi).

pub mod http;
pub mod ticker;
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use http::http_server_task;
pub use ticker::ticker_task;
pub use wifi::{connection_task, dhcp_task, net_task};
