use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// One second of exam time, tagged with the ticker that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    generation: u64,
}

impl Tick {
    #[must_use]
    pub fn new(generation: u64) -> Self {
        Self { generation }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

pub type TickSender = mpsc::UnboundedSender<Tick>;
pub type TickReceiver = mpsc::UnboundedReceiver<Tick>;

#[must_use]
pub fn tick_channel() -> (TickSender, TickReceiver) {
    mpsc::unbounded_channel()
}

/// Periodic tick task. Aborted on `cancel` or drop.
///
/// Ticks missed while the runtime was stalled are delivered late rather than
/// dropped, so the count of ticks tracks elapsed wall-clock time.
///
/// Must be spawned from inside a tokio runtime.
#[derive(Debug)]
pub struct Ticker {
    generation: u64,
    handle: JoinHandle<()>,
}

impl Ticker {
    #[must_use]
    pub fn spawn(generation: u64, period: Duration, sender: TickSender) -> Self {
        let start = Instant::now() + period;
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                interval.tick().await;
                if sender.send(Tick { generation }).is_err() {
                    break;
                }
            }
        });
        Self { generation, handle }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
