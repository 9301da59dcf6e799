// Brücke zwischen HTTP Tasks und Ticker Task
//
// HTTP-Seite: `exchange()` reiht einen Request ein und wartet auf das
// eigene Antwort-Signal. Ticker-Seite: `ChannelRequestPort` pollt den
// Channel non-blocking (höchstens ein Request pro Scheduler-Durchlauf).

use defmt::warn;
use embassy_time::{Duration, with_timeout};
use ticker_core::{Request, RequestPort};

use crate::config::{HISTORY_CAPACITY, REPLY_TIMEOUT_MS};
use crate::{ReplySignals, RequestReceiver, RequestSender, TickerResponse};

/// `RequestPort` des Schedulers, Ticket = task_id des HTTP Tasks
pub struct ChannelRequestPort {
    receiver: RequestReceiver,
    replies: &'static ReplySignals,
}

impl ChannelRequestPort {
    pub fn new(receiver: RequestReceiver, replies: &'static ReplySignals) -> Self {
        Self { receiver, replies }
    }
}

impl RequestPort<HISTORY_CAPACITY> for ChannelRequestPort {
    type Ticket = usize;

    fn try_next(&mut self) -> Option<(usize, Request)> {
        self.receiver.try_receive().ok()
    }

    fn reply(&mut self, ticket: usize, response: TickerResponse) {
        match self.replies.get(ticket) {
            Some(signal) => signal.signal(response),
            None => warn!("HTTP: Reply for unknown server task {}", ticket),
        }
    }
}

/// Schickt einen Request an den Ticker und wartet auf die Antwort
///
/// `None` wenn der Ticker nicht innerhalb von `REPLY_TIMEOUT_MS`
/// antwortet. Eine verspätete Antwort wird beim nächsten Aufruf verworfen.
pub async fn exchange(
    task_id: usize,
    sender: RequestSender,
    replies: &'static ReplySignals,
    request: Request,
) -> Option<TickerResponse> {
    let signal = replies.get(task_id)?;
    signal.reset();

    sender.send((task_id, request)).await;
    with_timeout(Duration::from_millis(REPLY_TIMEOUT_MS), signal.wait())
        .await
        .ok()
}
