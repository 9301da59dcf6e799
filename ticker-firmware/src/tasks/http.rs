// HTTP Server Task - Serviert Dashboard und JSON-API
use alloc::string::String;
use defmt::{info, warn};
use embassy_net::Stack;
use embassy_time::Duration;
use picoserve::extract::Query;
use picoserve::response::{IntoResponse, Response, StatusCode};
use picoserve::routing::get;
use ticker_core::Request;
use ticker_core::request::{STATUS_PATH, SYMBOL_PATH};

use crate::config::*;
use crate::web::INDEX_HTML;
use crate::web::bridge::exchange;
use crate::web::protocol::{BUSY_JSON, CONTENT_TYPE_JSON, ENCODE_ERROR_JSON, SymbolQuery};
use crate::{ReplySignals, RequestSender};

/// HTTP Server Task - läuft parallel zum Ticker Task
///
/// Dieser Task stellt das Dashboard bereit:
/// - Serviert index.html auf GET /
/// - GET /api/status liefert den aktuellen Snapshot als JSON
/// - GET /api/symbol?symbol=ETHUSDT wechselt das Symbol
///
/// Der Task besitzt keinen Ticker-Zustand. Jeder API-Aufruf geht über
/// den Request-Channel an den Ticker Task, die Antwort kommt über das
/// Signal `replies[task_id]` zurück.
///
/// **Task Pool:** 4 Instanzen (= HTTP_TASK_COUNT) für concurrent connections
///
/// # Parameter
/// - `task_id`: Eindeutige ID für diese Server-Instanz (0..3), zugleich Index des Antwort-Signals
/// - `stack`: embassy-net Stack für Netzwerk-Zugriff
/// - `sender`: Channel Sender für Dashboard-Requests
/// - `replies`: Antwort-Signale aller Server-Tasks
#[embassy_executor::task(pool_size = 4)]
pub async fn http_server_task(
    task_id: usize,
    stack: &'static Stack<'static>,
    sender: RequestSender,
    replies: &'static ReplySignals,
) {
    info!("HTTP: Server task {} starting on port {}...", task_id, HTTP_PORT);

    let app = picoserve::Router::new()
        .route("/", get(serve_html))
        .route(
            STATUS_PATH,
            get(move || api_call(task_id, sender, replies, Request::Status)),
        )
        .route(
            SYMBOL_PATH,
            get(move |Query(query): Query<SymbolQuery>| {
                let request = Request::route(SYMBOL_PATH, query.symbol.as_deref());
                api_call(task_id, sender, replies, request)
            }),
        );

    // Server-Konfiguration
    let config = picoserve::Config::new(picoserve::Timeouts {
        start_read_request: Some(Duration::from_secs(5)),
        read_request: Some(Duration::from_secs(1)),
        write: Some(Duration::from_secs(1)),
        persistent_start_read_request: Some(Duration::from_secs(5)),
    })
    .keep_connection_alive();

    // HTTP-Buffer für Requests/Responses
    let mut http_buffer = [0u8; HTTP_BUFFER_SIZE];

    // TCP-Buffers für Socket
    let mut rx_buffer = [0u8; TCP_RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TCP_TX_BUFFER_SIZE];

    let server = picoserve::Server::new(&app, &config, &mut http_buffer);

    // task_id ermöglicht mehrere concurrent Server-Instanzen
    let _ = server
        .listen_and_serve(task_id, *stack, HTTP_PORT, &mut rx_buffer, &mut tx_buffer)
        .await;

    info!("HTTP: Server task {} ended", task_id);
}

/// Serviert die HTML-Hauptseite
async fn serve_html() -> impl IntoResponse {
    Response::new(StatusCode::OK, INDEX_HTML).with_header("Content-Type", "text/html; charset=utf-8")
}

/// Leitet einen API-Request an den Ticker weiter und sendet die Antwort als JSON
async fn api_call(
    task_id: usize,
    sender: RequestSender,
    replies: &'static ReplySignals,
    request: Request,
) -> impl IntoResponse {
    let mut json_buffer = [0u8; JSON_BUFFER_SIZE];

    let (status, body) = match exchange(task_id, sender, replies, request).await {
        Some(response) => match response.to_json(&mut json_buffer) {
            Ok(n) => (
                response.status_code(),
                core::str::from_utf8(&json_buffer[..n]).unwrap_or(ENCODE_ERROR_JSON),
            ),
            Err(_) => {
                warn!("HTTP: Response does not fit into {} bytes", JSON_BUFFER_SIZE);
                (500, ENCODE_ERROR_JSON)
            }
        },
        None => {
            warn!("HTTP: Ticker did not answer within {} ms", REPLY_TIMEOUT_MS);
            (503, BUSY_JSON)
        }
    };

    info!("HTTP: API request answered with {}", status);
    Response::new(StatusCode::new(status), String::from(body))
        .with_header("Content-Type", CONTENT_TYPE_JSON)
        .with_header("Cache-Control", "no-store")
}
