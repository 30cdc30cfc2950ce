use log::debug;
use std::sync::Weak;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

pub(crate) const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Receives clock ticks. Returning `false` ends the ticking task.
pub(crate) trait TickTarget: Send + Sync + 'static {
    fn tick(&self, generation: u64) -> bool;
}

/// Running flag and the background ticker of one live match.
///
/// Every start opens a new generation; a tick carrying an older generation
/// is stale and must be ignored by the target.
#[derive(Debug, Default)]
pub(crate) struct MatchClock {
    running: bool,
    generation: u64,
    ticker: Option<JoinHandle<()>>,
}

impl MatchClock {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn accepts(&self, generation: u64) -> bool {
        self.running && self.generation == generation
    }

    pub fn start<T: TickTarget>(&mut self, runtime: &Handle, target: Weak<T>) {
        self.stop();

        self.generation += 1;
        self.running = true;
        self.ticker = Some(runtime.spawn(run_ticker(target, self.generation)));

        debug!("clock generation {} started", self.generation);
    }

    pub fn stop(&mut self) {
        self.running = false;

        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
            debug!("clock generation {} stopped", self.generation);
        }
    }
}

impl Drop for MatchClock {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_ticker<T: TickTarget>(target: Weak<T>, generation: u64) {
    let mut interval = time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let Some(target) = target.upgrade() else {
            break;
        };

        if !target.tick(generation) {
            break;
        }
    }
}
