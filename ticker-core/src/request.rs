//! Dashboard-Requests: Status-Abfrage und Symbolwechsel
//!
//! Weder unbekannte Routen noch fehlerhafte Eingaben sind fatal, sie
//! werden als 404 bzw. 400 beantwortet.

use heapless::String;
use serde::Serialize;

use crate::telemetry::{Snapshot, TelemetryState};
use crate::types::Symbol;

pub const STATUS_PATH: &str = "/api/status";
pub const SYMBOL_PATH: &str = "/api/symbol";

/// Roh-Eingabe für einen Symbolwechsel (Validierung erst im Handler)
pub const RAW_SYMBOL_CAPACITY: usize = 32;
pub type RawSymbol = String<RAW_SYMBOL_CAPACITY>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Status,
    SetSymbol(RawSymbol),
    Unknown,
    Malformed(&'static str),
}

impl Request {
    /// Ordnet Pfad und `symbol`-Parameter einem Request zu
    pub fn route(path: &str, symbol_param: Option<&str>) -> Self {
        match path.trim_end_matches('/') {
            STATUS_PATH => Request::Status,
            SYMBOL_PATH => match symbol_param {
                Some(raw) => match RawSymbol::try_from(raw) {
                    Ok(raw) => Request::SetSymbol(raw),
                    Err(_) => Request::Malformed("symbol parameter too long"),
                },
                None => Request::Malformed("missing symbol parameter"),
            },
            _ => Request::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Response<const N: usize> {
    Status(Snapshot<N>),
    SymbolChanged(Symbol),
    NotFound,
    BadRequest(&'static str),
}

#[derive(Serialize)]
struct SymbolBody<'a> {
    symbol: &'a Symbol,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl<const N: usize> Response<N> {
    pub fn status_code(&self) -> u16 {
        match self {
            Response::Status(_) | Response::SymbolChanged(_) => 200,
            Response::NotFound => 404,
            Response::BadRequest(_) => 400,
        }
    }

    /// Serialisiert den Body als JSON nach `buf`, liefert die Länge
    ///
    /// Fehler werden als `{"error":"..."}` kodiert.
    pub fn to_json(&self, buf: &mut [u8]) -> serde_json_core::ser::Result<usize> {
        match self {
            Response::Status(snapshot) => serde_json_core::to_slice(snapshot, buf),
            Response::SymbolChanged(symbol) => {
                serde_json_core::to_slice(&SymbolBody { symbol }, buf)
            }
            Response::NotFound => serde_json_core::to_slice(&ErrorBody { error: "not found" }, buf),
            Response::BadRequest(reason) => {
                serde_json_core::to_slice(&ErrorBody { error: reason }, buf)
            }
        }
    }
}

/// Beantwortet einen Request
///
/// Nur ein gültiger Symbolwechsel verändert den Zustand.
pub fn handle<const N: usize>(state: &mut TelemetryState<N>, request: &Request) -> Response<N> {
    match request {
        Request::Status => Response::Status(state.snapshot()),
        Request::SetSymbol(raw) => match Symbol::parse(raw) {
            Ok(symbol) => {
                state.switch_symbol(symbol.clone());
                Response::SymbolChanged(symbol)
            }
            Err(error) => Response::BadRequest(error.message()),
        },
        Request::Unknown => Response::NotFound,
        Request::Malformed(reason) => Response::BadRequest(reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_status() {
        assert_eq!(Request::route("/api/status", None), Request::Status);
        assert_eq!(Request::route("/api/status/", None), Request::Status);
    }

    #[test]
    fn test_route_symbol() {
        assert_eq!(
            Request::route("/api/symbol", Some("ethusdt")),
            Request::SetSymbol(RawSymbol::try_from("ethusdt").unwrap())
        );
        assert!(matches!(
            Request::route("/api/symbol", None),
            Request::Malformed(_)
        ));
        assert!(matches!(
            Request::route(
                "/api/symbol",
                Some("XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX")
            ),
            Request::Malformed(_)
        ));
    }

    #[test]
    fn test_route_unknown() {
        assert_eq!(Request::route("/admin", None), Request::Unknown);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(Response::<4>::NotFound.status_code(), 404);
        assert_eq!(Response::<4>::BadRequest("x").status_code(), 400);
    }

    fn json<const N: usize>(response: &Response<N>) -> String<256> {
        let mut buf = [0u8; 256];
        let len = response.to_json(&mut buf).unwrap();
        String::try_from(core::str::from_utf8(&buf[..len]).unwrap()).unwrap()
    }

    #[test]
    fn test_error_bodies() {
        assert_eq!(json(&Response::<4>::NotFound), r#"{"error":"not found"}"#);
        assert_eq!(
            json(&Response::<4>::BadRequest("missing symbol parameter")),
            r#"{"error":"missing symbol parameter"}"#
        );
    }

    #[test]
    fn test_symbol_changed_body() {
        let response = Response::<4>::SymbolChanged(Symbol::parse("ethusdt").unwrap());
        assert_eq!(json(&response), r#"{"symbol":"ETHUSDT"}"#);
    }

    #[test]
    fn test_status_body_before_first_quote() {
        let mut state = TelemetryState::<4>::new(Symbol::parse("BTCUSDT").unwrap());
        let response = handle(&mut state, &Request::Status);
        let body = json(&response);

        assert!(body.starts_with(r#"{"symbol":"BTCUSDT","#));
        assert!(body.contains(r#""secondary_change":null"#));
        assert!(body.contains(r#""direction":"flat""#));
        assert!(body.contains(r#""fetch_count":0"#));
        assert!(body.ends_with(r#""history":[]}"#));
    }

    #[test]
    fn test_status_body_too_large_for_buffer() {
        let mut state = TelemetryState::<4>::new(Symbol::parse("BTCUSDT").unwrap());
        let response = handle(&mut state, &Request::Status);
        let mut buf = [0u8; 16];
        assert!(response.to_json(&mut buf).is_err());
    }
}
