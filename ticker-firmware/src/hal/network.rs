// WLAN-Status für den Scheduler
use embassy_net::Stack;
use ticker_core::{Connectivity, ConnectivityError};

use crate::WifiReconnectSignal;

/// `Connectivity` über den embassy-net Stack
///
/// Verbunden heißt: Link oben UND per DHCP eine IPv4-Adresse erhalten.
/// Die eigentliche Verbindung managed `connection_task`; `begin()`
/// weckt ihn nur auf, falls er gerade in der Retry-Pause hängt.
pub struct StackConnectivity {
    stack: Stack<'static>,
    reconnect: &'static WifiReconnectSignal,
}

impl StackConnectivity {
    pub fn new(stack: Stack<'static>, reconnect: &'static WifiReconnectSignal) -> Self {
        Self { stack, reconnect }
    }
}

impl Connectivity for StackConnectivity {
    fn is_connected(&mut self) -> bool {
        self.stack.is_link_up() && self.stack.config_v4().is_some()
    }

    fn begin(&mut self) -> Result<(), ConnectivityError> {
        self.reconnect.signal(());
        Ok(())
    }
}
