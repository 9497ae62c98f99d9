use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::model::token::{push_sample, DynamicRecord};
use crate::store::{Snapshot, TokenStore};

/// Market cap and liquidity never drop below this.
pub const DEFAULT_FLOOR: f64 = 1_000.0;

/// One random step for a single token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perturbation {
    /// Relative market-cap move, e.g. 0.02 for +2%.
    pub delta: f64,
    /// Relative liquidity move.
    pub liquidity_delta: f64,
    /// Volume added this step.
    pub volume_step: f64,
    pub floor: f64,
}

impl Perturbation {
    pub fn apply(&self, old: &DynamicRecord) -> DynamicRecord {
        let market_cap = (old.market_cap * (1.0 + self.delta)).max(self.floor);
        let liquidity = (old.liquidity * (1.0 + self.liquidity_delta)).max(self.floor);
        DynamicRecord {
            market_cap,
            liquidity,
            volume: old.volume + self.volume_step.max(0.0),
            sparkline: push_sample(&old.sparkline, market_cap),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordChange {
    Perturb(Perturbation),
    /// Absolute values from a feed that knows the real numbers.
    Replace(DynamicRecord),
}

impl RecordChange {
    pub fn apply(&self, old: &DynamicRecord) -> DynamicRecord {
        match self {
            Self::Perturb(p) => p.apply(old),
            Self::Replace(record) => record.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenUpdate {
    pub id: String,
    pub change: RecordChange,
}

/// Where ticker updates come from. The random walk below stands in for a
/// push feed; a streaming client can implement the same trait.
pub trait UpdateSource: Send + 'static {
    /// Produce at most one update for the current tracked set. `None` means
    /// nothing to do this tick.
    fn next_update(&mut self, snapshot: &Snapshot) -> Option<TokenUpdate>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkBounds {
    pub max_swing: f64,
    pub liquidity_swing: f64,
    /// Exclusive upper bound of the integer volume step.
    pub max_volume_step: u64,
    pub floor: f64,
}

impl Default for WalkBounds {
    fn default() -> Self {
        Self {
            max_swing: 0.03,
            liquidity_swing: 0.01,
            max_volume_step: 1_000,
            floor: DEFAULT_FLOOR,
        }
    }
}

/// Uniform random walk: one uniformly chosen token per tick.
pub struct RandomWalk<R = StdRng> {
    rng: R,
    bounds: WalkBounds,
}

impl RandomWalk<StdRng> {
    pub fn new(bounds: WalkBounds) -> Self {
        Self::with_rng(StdRng::from_entropy(), bounds)
    }

    pub fn seeded(seed: u64, bounds: WalkBounds) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), bounds)
    }
}

impl<R: Rng> RandomWalk<R> {
    pub fn with_rng(rng: R, bounds: WalkBounds) -> Self {
        Self { rng, bounds }
    }

    fn symmetric(&mut self, bound: f64) -> f64 {
        if bound > 0.0 {
            self.rng.gen_range(-bound..bound)
        } else {
            0.0
        }
    }

    pub fn draw(&mut self) -> Perturbation {
        let delta = self.symmetric(self.bounds.max_swing);
        let liquidity_delta = self.symmetric(self.bounds.liquidity_swing);
        let volume_step = if self.bounds.max_volume_step > 0 {
            self.rng.gen_range(0..self.bounds.max_volume_step) as f64
        } else {
            0.0
        };
        Perturbation {
            delta,
            liquidity_delta,
            volume_step,
            floor: self.bounds.floor,
        }
    }
}

impl<R: Rng + Send + 'static> UpdateSource for RandomWalk<R> {
    fn next_update(&mut self, snapshot: &Snapshot) -> Option<TokenUpdate> {
        if snapshot.is_empty() {
            return None;
        }
        let idx = self.rng.gen_range(0..snapshot.len());
        let id = snapshot.ids().nth(idx)?.to_string();
        Some(TokenUpdate {
            id,
            change: RecordChange::Perturb(self.draw()),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub id: String,
    pub record: DynamicRecord,
}

/// Run a single tick: read, compute, write, notify. No await in between.
pub fn tick_once<S: UpdateSource + ?Sized>(store: &TokenStore, source: &mut S) -> Option<TickOutcome> {
    let snapshot = store.snapshot();
    let update = source.next_update(&snapshot)?;
    let record = store.apply(&update.id, |old| update.change.apply(old))?;
    tracing::debug!(
        id = %update.id,
        market_cap = record.market_cap,
        liquidity = record.liquidity,
        volume = record.volume,
        "Tick applied"
    );
    Some(TickOutcome {
        id: update.id,
        record,
    })
}

/// Periodic driver for an [`UpdateSource`].
pub struct Ticker;

impl Ticker {
    /// Start ticking every `period`, first tick one period from now.
    /// Must be called inside a tokio runtime.
    pub fn spawn<S: UpdateSource>(store: TokenStore, mut source: S, period: Duration) -> TickerHandle {
        let live = Arc::new(Mutex::new(true));
        let applied = Arc::new(AtomicU64::new(0));
        let task_live = live.clone();
        let task_applied = applied.clone();
        tracing::info!(period_ms = period.as_millis() as u64, "Ticker started");
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                {
                    let guard = task_live.lock().unwrap_or_else(PoisonError::into_inner);
                    if !*guard {
                        break;
                    }
                    if tick_once(&store, &mut source).is_some() {
                        task_applied.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }
        });
        TickerHandle {
            live,
            applied,
            task: Some(task),
        }
    }
}

/// Owning handle for a running ticker. Dropping it cancels the ticker.
pub struct TickerHandle {
    live: Arc<Mutex<bool>>,
    applied: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl TickerHandle {
    /// Stop the ticker. Once this returns no further update reaches the
    /// store, even if a tick was due at the same instant.
    pub fn cancel(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };
        *self.live.lock().unwrap_or_else(PoisonError::into_inner) = false;
        task.abort();
        tracing::info!(applied = self.ticks_applied(), "Ticker cancelled");
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    pub fn ticks_applied(&self) -> u64 {
        self.applied.load(Ordering::Relaxed)
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
