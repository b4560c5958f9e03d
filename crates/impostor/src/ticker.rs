//! The once-per-second clock behind the discussion timer.

use std::time::Duration;

use abort_on_drop::ChildTask;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A running tick source. Dropping it aborts the underlying task, after which no more messages
/// are sent.
#[derive(Debug)]
pub struct Ticker {
    generation: u64,
    _task: ChildTask<()>,
}

impl Ticker {
    /// Send `message(generation)` to `sender` every `period`, starting one period from now.
    ///
    /// Only a weak sender is held so a running ticker never keeps its receiver alive.
    pub fn start<T, F>(
        generation: u64,
        period: Duration,
        sender: mpsc::WeakSender<T>,
        message: F,
    ) -> Self
    where
        T: Send + 'static,
        F: Fn(u64) -> T + Send + 'static,
    {
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            // Seconds missed while the process was suspended are still owed to the countdown
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                interval.tick().await;
                let Some(strong) = sender.upgrade() else {
                    break;
                };
                if strong.send(message(generation)).await.is_err() {
                    break;
                }
            }
            tracing::debug!(generation, "Ticker stopped");
        });

        Self {
            generation,
            _task: task.into(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
