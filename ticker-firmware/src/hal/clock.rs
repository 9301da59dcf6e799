// Monotone Zeitbasis für den Scheduler
use embassy_time::Instant;
use ticker_core::Clock;

/// Millisekunden seit Boot (embassy-time)
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
