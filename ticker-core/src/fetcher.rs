//! Kurs-Abruf: URL bauen, HTTP GET, dekodieren, Zustand übernehmen

use core::fmt::Write;

use heapless::String;

use crate::config::{Endpoint, TickerConfig};
use crate::decode::{DecodeError, decode_quote};
use crate::telemetry::{PriceUpdate, TelemetryState};
use crate::traits::{HttpClient, NetError};
use crate::types::Symbol;

/// Antwort-Puffer: Header plus Body (24hr-Ticker ist ca. 600 Bytes)
pub const RESPONSE_BUFFER_SIZE: usize = 2048;

/// Kapazität der Request-URL
pub const URL_CAPACITY: usize = 128;

/// Ergebnis eines Abrufs
///
/// Nur `Updated` verändert den Telemetrie-Zustand.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchOutcome {
    Updated(PriceUpdate),
    /// Transportfehler (`status: None`) oder HTTP-Status != 200
    NetworkError { status: Option<u16> },
    DecodeError(DecodeError),
    Timeout,
}

pub struct PriceFetcher {
    api_base: &'static str,
    endpoint: Endpoint,
    timeout_ms: u32,
    alert_threshold: f32,
    buffer: [u8; RESPONSE_BUFFER_SIZE],
}

impl PriceFetcher {
    pub fn new(config: &TickerConfig) -> Self {
        Self {
            api_base: config.api_base,
            endpoint: config.endpoint,
            timeout_ms: config.fetch_timeout_ms,
            alert_threshold: config.alert_threshold_pct,
            buffer: [0; RESPONSE_BUFFER_SIZE],
        }
    }

    /// Request-URL für ein Symbol
    ///
    /// Wird bei jedem Abruf neu gebaut, damit nach einem Symbolwechsel
    /// nie eine veraltete URL benutzt wird.
    pub fn request_url(&self, symbol: &Symbol) -> Result<String<URL_CAPACITY>, NetError> {
        let mut url = String::new();
        write!(
            url,
            "{}{}?symbol={}",
            self.api_base,
            self.endpoint.path(),
            symbol
        )
        .map_err(|_| NetError::InvalidUrl)?;
        Ok(url)
    }

    /// Führt genau einen Abruf aus
    ///
    /// Bei jedem Fehler bleibt `state` unverändert.
    pub async fn fetch<H: HttpClient, const N: usize>(
        &mut self,
        state: &mut TelemetryState<N>,
        http: &mut H,
    ) -> FetchOutcome {
        let url = match self.request_url(state.symbol()) {
            Ok(url) => url,
            Err(_) => return FetchOutcome::NetworkError { status: None },
        };

        let response = match http.get(&url, self.timeout_ms, &mut self.buffer).await {
            Ok(response) => response,
            Err(NetError::Timeout) => return FetchOutcome::Timeout,
            Err(_) => return FetchOutcome::NetworkError { status: None },
        };

        if response.status != 200 {
            return FetchOutcome::NetworkError {
                status: Some(response.status),
            };
        }

        let body = &self.buffer[..response.len.min(RESPONSE_BUFFER_SIZE)];
        match decode_quote(body) {
            Ok(quote) => FetchOutcome::Updated(state.commit(&quote, self.alert_threshold)),
            Err(error) => FetchOutcome::DecodeError(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_uses_endpoint_and_symbol() {
        let config = TickerConfig {
            api_base: "http://relay.local:8080",
            endpoint: Endpoint::AveragePrice,
            ..TickerConfig::default()
        };
        let fetcher = PriceFetcher::new(&config);
        let url = fetcher
            .request_url(&Symbol::parse("ethbtc").unwrap())
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://relay.local:8080/api/v3/avgPrice?symbol=ETHBTC"
        );
    }
}
