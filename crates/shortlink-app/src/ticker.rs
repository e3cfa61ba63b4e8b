use std::future::Future;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace, warn};

/// How often age labels are re-rendered. Labels have minute resolution, so
/// refreshing more often than once a minute would never change them.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Shorter periods, including zero, are raised to this.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Periodic re-render of history age labels.
///
/// The tick is best-effort: a slow render delays the next tick instead of
/// bursting to catch up. The ticker only ever calls `on_tick`; it has no
/// access to the history itself.
pub struct AgeTicker;

impl AgeTicker {
    /// Spawns the ticker on the current tokio runtime.
    ///
    /// The first call to `on_tick` happens one `period` after spawning. The
    /// task stops when the returned handle is cancelled or dropped. A period
    /// below [`MIN_REFRESH_INTERVAL`] is raised to it.
    pub fn spawn<F, Fut>(period: Duration, mut on_tick: F) -> TickerHandle
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let period = if period < MIN_REFRESH_INTERVAL {
            warn!(requested = ?period, min = ?MIN_REFRESH_INTERVAL, "refresh period too short, using minimum");
            MIN_REFRESH_INTERVAL
        } else {
            period
        };

        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = interval.tick() => {
                        trace!("age refresh tick");
                        on_tick().await;
                    }
                }
            }
            debug!("age ticker stopped");
        });

        debug!(?period, "age ticker started");
        TickerHandle {
            stop: Some(stop_tx),
            task,
        }
    }
}

/// Owner of a running [`AgeTicker`]. Dropping it stops the ticker.
#[derive(Debug)]
pub struct TickerHandle {
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl TickerHandle {
    /// Stops the ticker and waits for its task to wind down.
    pub async fn cancel(mut self) {
        self.signal_stop();
        // the task may already have been aborted by a runtime shutdown
        let _ = (&mut self.task).await;
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    fn signal_stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.signal_stop();
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_ticker(period: Duration) -> (TickerHandle, Arc<AtomicUsize>) {
        let ticks = Arc::new(AtomicUsize::new(0));
        let handle = AgeTicker::spawn(period, {
            let ticks = Arc::clone(&ticks);
            move || {
                let ticks = Arc::clone(&ticks);
                async move {
                    ticks.fetch_add(1, Ordering::SeqCst);
                }
            }
        });
        (handle, ticks)
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let period = Duration::from_secs(60);
        let (handle, ticks) = counting_ticker(period);

        tokio::time::sleep(period / 2).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);

        tokio::time::sleep(period * 3).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);

        handle.cancel().await;
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_ticks() {
        let period = Duration::from_secs(60);
        let (handle, ticks) = counting_ticker(period);

        tokio::time::sleep(period + period / 2).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 1);

        handle.cancel().await;
        tokio::time::sleep(period * 5).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_period_ticks_at_minimum() {
        let (handle, ticks) = counting_ticker(Duration::ZERO);

        tokio::time::sleep(MIN_REFRESH_INTERVAL * 3 + MIN_REFRESH_INTERVAL / 2).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
        assert!(!handle.is_finished());

        handle.cancel().await;
    }

    #[tokio::test(start_paused = true)]
    async fn drop_stops_ticks() {
        let period = Duration::from_secs(1);
        let (handle, ticks) = counting_ticker(period);

        drop(handle);
        tokio::time::sleep(period * 10).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
    }
}
