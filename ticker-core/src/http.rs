//! Minimale HTTP/1.0 Hilfsfunktionen für den Kurs-Abruf
//!
//! Der Firmware-Client spricht HTTP/1.0 mit `Connection: close`, damit
//! der Server weder Chunked Encoding noch Keep-Alive nutzt. Der Body
//! reicht dann bis zum Verbindungsende.

use core::fmt::Write;

use heapless::String;

use crate::traits::NetError;

/// Kapazität für die Request-Zeile plus Header
pub const REQUEST_HEAD_CAPACITY: usize = 256;

/// Zerlegte `http://` URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlParts<'a> {
    pub host: &'a str,
    pub port: u16,
    /// Pfad inklusive Query, mindestens "/"
    pub path: &'a str,
}

/// Zerlegt `http://host[:port][/path]`
pub fn split_url(url: &str) -> Result<UrlParts<'_>, NetError> {
    let rest = url.strip_prefix("http://").ok_or(NetError::InvalidUrl)?;
    let (authority, path) = match rest.find('/') {
        Some(index) => (&rest[..index], &rest[index..]),
        None => (rest, "/"),
    };

    let (host, port) = match authority.split_once(':') {
        Some((host, port)) => (
            host,
            port.parse::<u16>().map_err(|_| NetError::InvalidUrl)?,
        ),
        None => (authority, 80),
    };

    if host.is_empty() {
        return Err(NetError::InvalidUrl);
    }
    Ok(UrlParts { host, port, path })
}

/// Baut den GET-Request-Kopf
pub fn request_head(parts: &UrlParts<'_>) -> Result<String<REQUEST_HEAD_CAPACITY>, NetError> {
    let mut head = String::new();
    write!(
        head,
        "GET {} HTTP/1.0\r\nHost: {}\r\nAccept: application/json\r\nConnection: close\r\n\r\n",
        parts.path, parts.host
    )
    .map_err(|_| NetError::InvalidUrl)?;
    Ok(head)
}

/// Liest Status-Code und Body-Offset aus einer Antwort
///
/// `None` solange das Header-Ende noch nicht im Puffer ist oder die
/// Status-Zeile ungültig ist.
pub fn parse_response_head(buf: &[u8]) -> Option<(u16, usize)> {
    let head_end = buf.windows(4).position(|window| window == b"\r\n\r\n")?;
    let head = core::str::from_utf8(&buf[..head_end]).ok()?;
    let status_line = head.lines().next()?;

    let mut parts = status_line.split_whitespace();
    let version = parts.next()?;
    if !version.starts_with("HTTP/") {
        return None;
    }
    let status = parts.next()?.parse::<u16>().ok()?;
    Some((status, head_end + 4))
}
