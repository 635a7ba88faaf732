//! Keyed timers with cancellation.
//!
//! Two shapes are supported: a periodic ticker that runs a callback after an initial delay and
//! then on each interval, and a one-shot that runs once after a delay. Starting a timer under an
//! id that is already active replaces it. Stopping is idempotent.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use parking_lot::Mutex;
use tokio::{
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Bound on how long `clear_async` waits for each task.
const STOP_WAIT_TIMEOUT_MS: u64 = 50;

/// A running timer.
struct TickerEntry {
    /// Cancels the task.
    token: CancellationToken,
    /// Task handle, awaited by `clear_async`.
    handle: JoinHandle<()>,
    /// Distinguishes this entry from a later replacement under the same id.
    generation: u64,
}

/// Keyed periodic and one-shot timers.
#[derive(Clone)]
pub struct Ticker {
    /// Active timers by id.
    entries: Arc<Mutex<HashMap<String, TickerEntry>>>,
    /// Source of entry generations.
    generation: Arc<AtomicU64>,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ticker {
    /// Create an empty ticker.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Check if a timer is active for the given id.
    pub fn is_active(&self, id: &str) -> bool {
        self.entries.lock().contains_key(id)
    }

    /// Start or replace a periodic ticker for `id`.
    pub fn start<F>(&self, id: &str, initial: Duration, interval: Duration, mut on_tick: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.stop(id);

        let token = CancellationToken::new();
        let cancel = token.clone();
        let id_for_log = id.to_string();
        let interval = interval.max(Duration::from_millis(1));

        let fut = async move {
            trace!(
                "ticker_start" = %id_for_log,
                init_ms = initial.as_millis(),
                int_ms = interval.as_millis()
            );

            tokio::select! {
                _ = time::sleep(initial) => {}
                _ = cancel.cancelled() => {
                    trace!("ticker_cancelled_initial" = %id_for_log);
                    return;
                }
            }

            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        trace!("ticker_cancelled" = %id_for_log);
                        return;
                    }
                    _ = ticker.tick() => {
                        on_tick();
                    }
                }
            }
        };

        let generation = self.next_generation();
        self.spawn_entry(id, token, generation, fut);
    }

    /// Start or replace a one-shot timer for `id`. The entry is removed once it fires.
    pub fn once<F>(&self, id: &str, delay: Duration, on_fire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.stop(id);

        let token = CancellationToken::new();
        let cancel = token.clone();
        let id_owned = id.to_string();
        let entries = self.entries.clone();
        let generation = self.next_generation();

        let fut = async move {
            trace!("oneshot_armed" = %id_owned, delay_ms = delay.as_millis());
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    trace!("oneshot_cancelled" = %id_owned);
                    return;
                }
                _ = time::sleep(delay) => {}
            }
            {
                let mut map = entries.lock();
                if map.get(&id_owned).is_some_and(|e| e.generation == generation) {
                    map.remove(&id_owned);
                }
            }
            trace!("oneshot_fired" = %id_owned);
            on_fire();
        };

        self.spawn_entry(id, token, generation, fut);
    }

    /// Fresh entry generation.
    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Spawn `fut` and record it under `id`. The map lock is held across the spawn so a task
    /// that completes immediately cannot race its own registration.
    fn spawn_entry<Fut>(&self, id: &str, token: CancellationToken, generation: u64, fut: Fut)
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut map = self.entries.lock();
        let handle = tokio::spawn(fut);
        map.insert(
            id.to_string(),
            TickerEntry {
                token,
                handle,
                generation,
            },
        );
    }

    /// Stop a timer if present (non-blocking). A no-op for inactive ids.
    pub fn stop(&self, id: &str) {
        if let Some(entry) = self.entries.lock().remove(id) {
            entry.token.cancel();
            trace!("ticker_stop" = %id);
        }
    }

    /// Cancel every timer and wait briefly for the tasks to finish.
    pub async fn clear_async(&self) {
        let entries: Vec<TickerEntry> = {
            let mut map = self.entries.lock();
            map.drain().map(|(_, e)| e).collect()
        };

        for e in &entries {
            e.token.cancel();
        }

        for e in entries {
            let _ignored =
                time::timeout(Duration::from_millis(STOP_WAIT_TIMEOUT_MS), e.handle).await;
        }
        trace!("ticker_clear_async");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn periodic_ticks_until_stopped() {
        let ticker = Ticker::new();
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        ticker.start(
            "sample",
            Duration::from_millis(16),
            Duration::from_millis(16),
            move || {
                c.fetch_add(1, Ordering::SeqCst);
            },
        );
        assert!(ticker.is_active("sample"));
        time::sleep(Duration::from_millis(16 * 5 + 8)).await;
        let seen = count.load(Ordering::SeqCst);
        assert!((4..=6).contains(&seen), "ticks: {seen}");

        ticker.stop("sample");
        ticker.stop("sample");
        assert!(!ticker.is_active("sample"));
        time::sleep(Duration::from_millis(100)).await;
        assert_eq!(count.load(Ordering::SeqCst), seen);
    }

    #[tokio::test(start_paused = true)]
    async fn once_fires_once_and_deregisters() {
        let ticker = Ticker::new();
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        ticker.once("collapse", Duration::from_millis(300), move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        time::sleep(Duration::from_millis(299)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(ticker.is_active("collapse"));
        time::sleep(Duration::from_millis(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!ticker.is_active("collapse"));
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_replaces_the_pending_one_shot() {
        let ticker = Ticker::new();
        let count = Arc::new(AtomicUsize::new(0));
        for _ in 0..3 {
            let c = count.clone();
            ticker.once("collapse", Duration::from_millis(300), move || {
                c.fetch_add(1, Ordering::SeqCst);
            });
            time::sleep(Duration::from_millis(200)).await;
        }
        assert_eq!(count.load(Ordering::SeqCst), 0);
        time::sleep(Duration::from_millis(150)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        ticker.clear_async().await;
        assert!(!ticker.is_active("collapse"));
    }
}
