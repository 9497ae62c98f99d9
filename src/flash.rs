use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::store::Snapshot;

pub const DEFAULT_FLASH_DWELL: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashState {
    Neutral,
    Flash(Direction),
}

/// Highlight state for one displayed number.
///
/// `Neutral -> Flash(dir) -> Neutral`. A rise or fall against the last
/// observed value starts (or restarts) a flash; an unchanged value leaves the
/// state alone; the flash decays after `dwell`.
#[derive(Debug, Clone)]
pub struct FlashIndicator {
    dwell: Duration,
    previous: Option<f64>,
    flash: Option<(Direction, Instant)>,
}

impl FlashIndicator {
    pub fn new(dwell: Duration) -> Self {
        Self {
            dwell,
            previous: None,
            flash: None,
        }
    }

    /// Feed the value currently on screen. The first call only records the
    /// baseline.
    pub fn observe(&mut self, value: f64, now: Instant) -> FlashState {
        if let Some(prev) = self.previous {
            if value > prev {
                self.flash = Some((Direction::Up, now));
            } else if value < prev {
                self.flash = Some((Direction::Down, now));
            }
        }
        self.previous = Some(value);
        self.state(now)
    }

    pub fn state(&self, now: Instant) -> FlashState {
        match self.flash {
            Some((dir, since)) if now.saturating_duration_since(since) < self.dwell => {
                FlashState::Flash(dir)
            }
            _ => FlashState::Neutral,
        }
    }

    pub fn previous(&self) -> Option<f64> {
        self.previous
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlashField {
    MarketCap,
    Liquidity,
    Volume,
}

impl FlashField {
    pub const ALL: [FlashField; 3] = [FlashField::MarketCap, FlashField::Liquidity, FlashField::Volume];
}

/// One indicator per (token, field), fed from store snapshots.
#[derive(Debug, Clone)]
pub struct FlashBoard {
    dwell: Duration,
    indicators: HashMap<(String, FlashField), FlashIndicator>,
    last_version: Option<u64>,
}

impl FlashBoard {
    pub fn new(dwell: Duration) -> Self {
        Self {
            dwell,
            indicators: HashMap::new(),
            last_version: None,
        }
    }

    /// Observe every record of `snapshot`. Re-observing a version already
    /// seen is a no-op.
    pub fn observe(&mut self, snapshot: &Snapshot, now: Instant) {
        if self.last_version == Some(snapshot.version) {
            return;
        }
        self.last_version = Some(snapshot.version);
        let dwell = self.dwell;
        self.indicators
            .retain(|(id, _), _| snapshot.records.contains_key(id));
        for (id, record) in &snapshot.records {
            for field in FlashField::ALL {
                let value = match field {
                    FlashField::MarketCap => record.market_cap,
                    FlashField::Liquidity => record.liquidity,
                    FlashField::Volume => record.volume,
                };
                self.indicators
                    .entry((id.clone(), field))
                    .or_insert_with(|| FlashIndicator::new(dwell))
                    .observe(value, now);
            }
        }
    }

    pub fn state(&self, id: &str, field: FlashField, now: Instant) -> FlashState {
        self.indicators
            .get(&(id.to_string(), field))
            .map(|ind| ind.state(now))
            .unwrap_or(FlashState::Neutral)
    }

    /// Forget every baseline, e.g. after the listing was reloaded.
    pub fn reset(&mut self) {
        self.indicators.clear();
        self.last_version = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_observation_is_neutral() {
        let mut ind = FlashIndicator::new(DEFAULT_FLASH_DWELL);
        assert_eq!(ind.observe(10.0, Instant::now()), FlashState::Neutral);
        assert_eq!(ind.previous(), Some(10.0));
    }

    #[test]
    fn equal_value_does_not_restart_flash() {
        let t0 = Instant::now();
        let mut ind = FlashIndicator::new(Duration::from_millis(300));
        ind.observe(10.0, t0);
        ind.observe(11.0, t0);
        let t1 = t0 + Duration::from_millis(200);
        assert_eq!(ind.observe(11.0, t1), FlashState::Flash(Direction::Up));
        assert_eq!(ind.state(t0 + Duration::from_millis(301)), FlashState::Neutral);
    }
}
