// Dashboard-Protokoll
// Definiert Query-Parameter und feste JSON-Antworten der HTTP-API.
// Die eigentlichen Antworten serialisiert ticker-core (Response::to_json).

use serde::Deserialize;
use ticker_core::request::RawSymbol;

/// Query von `GET /api/symbol?symbol=ETHUSDT`
///
/// Fehlt der Parameter, lehnt der Ticker den Request mit 400 ab.
#[derive(Debug, Clone, Deserialize)]
pub struct SymbolQuery {
    #[serde(default)]
    pub symbol: Option<RawSymbol>,
}

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Ticker hat nicht rechtzeitig geantwortet (z.B. während Reconnect)
pub const BUSY_JSON: &str = r#"{"error":"ticker busy"}"#;

/// Antwort passt nicht in den JSON-Buffer
pub const ENCODE_ERROR_JSON: &str = r#"{"error":"response too large"}"#;
