//! Dekodiert die Kurs-Antwort der Börsen-API
//!
//! Unterstützt zwei Formen (Binance REST):
//! - minimal: `{"mins":5,"price":"27123.45","closeTime":...}` (`avgPrice`)
//! - erweitert: `{"lastPrice":"27123.45","priceChangePercent":"-1.20",...}` (`ticker/24hr`)
//!
//! Unbekannte Felder werden ignoriert. Zahlen kommen als Strings.

use serde::Deserialize;

/// Ein dekodierter Kurs
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Quote {
    pub price: f32,
    /// 24h-Änderung in Prozent, falls die API sie liefert
    pub change_24h: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Kein gültiges JSON oder falsche Feldtypen
    Malformed,
    /// Weder `price` noch `lastPrice` vorhanden
    MissingPrice,
    /// Preis nicht parsebar, negativ oder nicht endlich
    InvalidPrice,
    /// `priceChangePercent` vorhanden aber nicht parsebar
    InvalidChange,
}

#[derive(Deserialize)]
struct TickerPayload<'a> {
    #[serde(default, borrow)]
    price: Option<&'a str>,
    #[serde(default, borrow, rename = "lastPrice")]
    last_price: Option<&'a str>,
    #[serde(default, borrow, rename = "priceChangePercent")]
    price_change_percent: Option<&'a str>,
}

/// Dekodiert einen Response-Body
///
/// Entweder vollständig erfolgreich oder Fehler, es gibt kein
/// halbes Ergebnis.
pub fn decode_quote(body: &[u8]) -> Result<Quote, DecodeError> {
    let (payload, _) = serde_json_core::from_slice::<TickerPayload<'_>>(body)
        .map_err(|_| DecodeError::Malformed)?;

    let raw_price = payload
        .last_price
        .or(payload.price)
        .ok_or(DecodeError::MissingPrice)?;
    let price = raw_price
        .trim()
        .parse::<f32>()
        .map_err(|_| DecodeError::InvalidPrice)?;
    if !price.is_finite() || price < 0.0 {
        return Err(DecodeError::InvalidPrice);
    }

    let change_24h = match payload.price_change_percent {
        Some(raw) => {
            let change = raw
                .trim()
                .parse::<f32>()
                .map_err(|_| DecodeError::InvalidChange)?;
            if !change.is_finite() {
                return Err(DecodeError::InvalidChange);
            }
            Some(change)
        }
        None => None,
    };

    Ok(Quote { price, change_24h })
}
