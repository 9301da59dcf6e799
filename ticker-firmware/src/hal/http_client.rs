// HTTP Client für den Kurs-Abruf
use defmt::{Debug2Format, debug, warn};
use embassy_net::{IpAddress, Ipv4Address, Stack, dns::DnsQueryType, tcp::TcpSocket};
use embassy_time::{Duration, with_timeout};
use ticker_core::http::{parse_response_head, request_head, split_url};
use ticker_core::{HttpClient, HttpResponse, NetError};

use crate::config::{DNS_TIMEOUT_SECS, FETCH_TCP_RX_BUFFER_SIZE, FETCH_TCP_TX_BUFFER_SIZE};

/// HTTP/1.0 GET über einen embassy-net TcpSocket
///
/// Eine Verbindung pro Abruf (`Connection: close`): der Body reicht bis
/// zum Verbindungsende, Chunked Encoding kommt so nicht vor.
pub struct TcpHttpClient {
    stack: Stack<'static>,
    rx_buffer: [u8; FETCH_TCP_RX_BUFFER_SIZE],
    tx_buffer: [u8; FETCH_TCP_TX_BUFFER_SIZE],
}

impl TcpHttpClient {
    pub fn new(stack: Stack<'static>) -> Self {
        Self {
            stack,
            rx_buffer: [0; FETCH_TCP_RX_BUFFER_SIZE],
            tx_buffer: [0; FETCH_TCP_TX_BUFFER_SIZE],
        }
    }

    /// DNS, Connect, Request senden, Antwort bis EOF lesen
    async fn exchange(&mut self, url: &str, buf: &mut [u8]) -> Result<HttpResponse, NetError> {
        let parts = split_url(url)?;
        let head = request_head(&parts)?;

        let address = resolve_host(self.stack, parts.host).await?;
        debug!("HTTP: GET {} via {}", url, Debug2Format(&address));

        let mut socket = TcpSocket::new(self.stack, &mut self.rx_buffer, &mut self.tx_buffer);
        socket
            .connect((address, parts.port))
            .await
            .map_err(|_| NetError::Transport)?;

        let mut written = 0;
        while written < head.len() {
            match socket.write(&head.as_bytes()[written..]).await {
                Ok(0) | Err(_) => return Err(NetError::Transport),
                Ok(n) => written += n,
            }
        }
        socket.flush().await.map_err(|_| NetError::Transport)?;

        let mut len = 0;
        loop {
            if len == buf.len() {
                socket.abort();
                return Err(NetError::BufferTooSmall);
            }
            match socket.read(&mut buf[len..]).await {
                Ok(0) => break,
                Ok(n) => len += n,
                Err(_) => return Err(NetError::Transport),
            }
        }
        socket.close();

        let (status, body_offset) =
            parse_response_head(&buf[..len]).ok_or(NetError::Transport)?;

        // Body an den Anfang schieben
        buf.copy_within(body_offset..len, 0);
        Ok(HttpResponse {
            status,
            len: len - body_offset,
        })
    }
}

impl HttpClient for TcpHttpClient {
    async fn get(
        &mut self,
        url: &str,
        timeout_ms: u32,
        buf: &mut [u8],
    ) -> Result<HttpResponse, NetError> {
        // Harte Deadline über DNS, Connect und Lesen zusammen
        match with_timeout(
            Duration::from_millis(u64::from(timeout_ms)),
            self.exchange(url, buf),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(NetError::Timeout),
        }
    }
}

/// Löst Hostname zu IPv4-Adresse auf
///
/// IP-Literale (z.B. ein Relay im LAN) brauchen keinen DNS-Lookup.
async fn resolve_host(stack: Stack<'static>, host: &str) -> Result<Ipv4Address, NetError> {
    if let Ok(address) = host.parse::<Ipv4Address>() {
        return Ok(address);
    }

    let result = with_timeout(
        Duration::from_secs(DNS_TIMEOUT_SECS),
        stack.dns_query(host, DnsQueryType::A),
    )
    .await;

    match result {
        Ok(Ok(addrs)) => addrs
            .iter()
            .find_map(|addr| match addr {
                IpAddress::Ipv4(ipv4) => Some(*ipv4),
                #[allow(unreachable_patterns)]
                _ => None,
            })
            .ok_or(NetError::Transport),
        Ok(Err(error)) => {
            warn!("HTTP: DNS lookup for '{}' failed: {}", host, Debug2Format(&error));
            Err(NetError::Transport)
        }
        Err(_) => Err(NetError::Timeout),
    }
}
