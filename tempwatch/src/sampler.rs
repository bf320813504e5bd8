//! Background sampler: on every tick fetches one reading (or makes one up), appends it
//! to the history and publishes the resulting snapshot to subscribers.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::config::MAX_INTERVAL_SECS;
use crate::history::History;
use crate::source::TemperatureSource;
use crate::types::{Observation, Snapshot, Unit, TIMESTAMP_FORMAT};

pub const FALLBACK_MIN_C: f64 = 15.0;
pub const FALLBACK_MAX_C: f64 = 25.0;

/// Read side handed to the views. `None` until the first tick.
pub type SnapshotRx = watch::Receiver<Option<Arc<Snapshot>>>;

/// Synthetic Celsius reading used whenever the source comes back empty.
pub fn fallback_celsius<R: Rng>(rng: &mut R) -> f64 {
    let raw = rng.random_range(FALLBACK_MIN_C..=FALLBACK_MAX_C);
    (raw * 10.0).round() / 10.0
}

pub struct Sampler<S, R = StdRng> {
    source: S,
    rng: R,
    unit: Unit,
    history: History,
    tx: watch::Sender<Option<Arc<Snapshot>>>,
}

impl<S: TemperatureSource> Sampler<S, StdRng> {
    pub fn new(source: S, capacity: usize, unit: Unit) -> (Self, SnapshotRx) {
        Self::with_rng(source, StdRng::from_os_rng(), capacity, unit)
    }
}

impl<S: TemperatureSource, R: Rng> Sampler<S, R> {
    pub fn with_rng(source: S, rng: R, capacity: usize, unit: Unit) -> (Self, SnapshotRx) {
        let (tx, rx) = watch::channel(None);
        let sampler = Self {
            source,
            rng,
            unit,
            history: History::new(capacity),
            tx,
        };
        (sampler, rx)
    }

    pub async fn sample(&mut self) -> Arc<Snapshot> {
        self.sample_at(Local::now().naive_local()).await
    }

    /// One tick. Fetch failures never leave this function.
    pub async fn sample_at(&mut self, now: NaiveDateTime) -> Arc<Snapshot> {
        let celsius = match self.source.fetch_celsius().await {
            Ok(c) => c,
            Err(e) => {
                let c = fallback_celsius(&mut self.rng);
                debug!("source unavailable ({e}), using synthetic {c:.1}°C");
                c
            }
        };
        let obs = Observation::new(
            self.unit.convert(celsius),
            now.format(TIMESTAMP_FORMAT).to_string(),
        );

        self.history.push(obs.clone());
        let snap = Arc::new(Snapshot {
            history: self.history.to_vec(),
            latest: obs,
        });
        self.tx.send_replace(Some(Arc::clone(&snap)));
        snap
    }

    /// Ticks every `period`, first one a full period after start. `wake` forces an
    /// extra tick and restarts the period. Returns once every subscriber is gone.
    pub async fn run(mut self, period: Duration, wake: Arc<Notify>) {
        // Instant + period must not overflow, here or in `reset`
        let period = period.clamp(Duration::from_millis(1), Duration::from_secs(MAX_INTERVAL_SECS));
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = wake.notified() => {
                    debug!("sample requested");
                    ticker.reset();
                }
            }
            if self.tx.is_closed() {
                break;
            }
            let snap = self.sample().await;
            info!(
                value = snap.latest.value,
                at = %snap.latest.timestamp,
                kept = self.history.len(),
                capacity = self.history.capacity(),
                "new reading"
            );
        }
        debug!("no subscribers left, sampler stopping");
    }
}

pub fn spawn_sampler<S, R>(sampler: Sampler<S, R>, period: Duration, wake: Arc<Notify>) -> JoinHandle<()>
where
    S: TemperatureSource + Send + Sync + 'static,
    R: Rng + Send + 'static,
{
    tokio::spawn(sampler.run(period, wake))
}
