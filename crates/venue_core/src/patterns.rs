//! Time-of-day arrival rule sets.
//!
//! A rule set is an ordered list of windows, each with its own per-tick arrival
//! probability. Rules are checked in list order, one uniform draw per active
//! rule per tick. The presets reproduce the demand curves used for the venue:
//! a flat day and a bell-shaped day peaking mid-window.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::clock::SECS_PER_HOUR;
use crate::distributions::ArrivalProbability;
use crate::error::ConfigError;

/// Flat arrival probability per tick (one customer every 144 s on average).
pub const UNIFORM_DAY_PROBABILITY: f64 = 1.0 / 144.0;

/// Bell-shaped day split into eighths of the operating window.
/// Each entry is (first eighth, last eighth exclusive, probability per tick).
/// For an 08:00-12:00 window every eighth is half an hour.
pub const BELL_DAY_BANDS: [(u64, u64, f64); 7] = [
    (0, 1, 1.0 / 250.0), // opening half hour
    (1, 2, 1.0 / 210.0),
    (2, 3, 1.0 / 130.0),
    (3, 5, 1.0 / 70.0), // peak hour around mid-window
    (5, 6, 1.0 / 130.0),
    (6, 7, 1.0 / 210.0),
    (7, 8, 1.0 / 250.0), // closing half hour
];

/// Peak per-tick probability of the gaussian day preset.
pub const GAUSSIAN_PEAK_PROBABILITY: f64 = 1.0 / 70.0;

/// Standard deviation of the gaussian day preset (two hours).
pub const GAUSSIAN_STD_DEV_TICKS: f64 = 2.0 * SECS_PER_HOUR as f64;

/// Which ledger an arrival rule feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrivalStream {
    /// Customers enter the dispatch queue and count toward served/abandoned.
    Served,
    /// Independent walk-in counter; never enters the queue.
    Gross,
}

/// One arrival window `[start_tick, end_tick)` with its probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrivalRule {
    pub start_tick: u64,
    pub end_tick: u64,
    pub probability: ArrivalProbability,
    pub stream: ArrivalStream,
}

impl ArrivalRule {
    pub fn new(start_tick: u64, end_tick: u64, probability: ArrivalProbability) -> Self {
        Self {
            start_tick,
            end_tick,
            probability,
            stream: ArrivalStream::Served,
        }
    }

    pub fn constant(start_tick: u64, end_tick: u64, probability: f64) -> Self {
        Self::new(start_tick, end_tick, ArrivalProbability::Constant(probability))
    }

    /// Route this rule's arrivals to the gross counter instead of the queue.
    pub fn gross(mut self) -> Self {
        self.stream = ArrivalStream::Gross;
        self
    }

    pub fn is_active(&self, tick: u64) -> bool {
        self.start_tick <= tick && tick < self.end_tick
    }

    pub fn probability_at(&self, tick: u64) -> f64 {
        self.probability.at(tick)
    }
}

/// Ordered arrival rules consulted by the arrival system.
#[derive(Debug, Clone, Default, PartialEq, Resource, Serialize, Deserialize)]
pub struct ArrivalRules(pub Vec<ArrivalRule>);

impl ArrivalRules {
    pub fn new(rules: Vec<ArrivalRule>) -> Self {
        Self(rules)
    }

    pub fn rules(&self) -> &[ArrivalRule] {
        &self.0
    }

    /// Rules whose window contains `tick`, in configuration order.
    pub fn active_at(&self, tick: u64) -> impl Iterator<Item = &ArrivalRule> + '_ {
        self.0.iter().filter(move |rule| rule.is_active(tick))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (idx, rule) in self.0.iter().enumerate() {
            if rule.end_tick <= rule.start_tick {
                return Err(ConfigError::EmptyRuleWindow {
                    rule: idx,
                    start_tick: rule.start_tick,
                    end_tick: rule.end_tick,
                });
            }
            if !rule.probability.is_valid() {
                return Err(ConfigError::ProbabilityOutOfRange {
                    rule: idx,
                    probability: rule.probability.peak(),
                });
            }
        }
        Ok(())
    }
}

/// Named arrival presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrivalSchedule {
    /// Flat probability over the whole window.
    Uniform,
    /// Stepped bell curve peaking in the middle of the window.
    #[default]
    Bell,
    /// Bell curve plus a flat gross walk-in stream tracked separately.
    BellWithGross,
    /// Smooth gaussian curve centred on the middle of the window, feeding
    /// the served stream.
    Gaussian,
    /// Bell curve served stream plus a gaussian-density gross walk-in stream.
    BellWithGaussianGross,
}

impl ArrivalSchedule {
    pub fn rules(self, open_tick: u64, close_tick: u64) -> ArrivalRules {
        match self {
            Self::Uniform => uniform_day(open_tick, close_tick),
            Self::Bell => bell_day(open_tick, close_tick),
            Self::BellWithGross => bell_day_with_gross_stream(open_tick, close_tick),
            Self::Gaussian => gaussian_day(open_tick, close_tick),
            Self::BellWithGaussianGross => bell_day_with_gaussian_walk_ins(open_tick, close_tick),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Bell => "bell",
            Self::BellWithGross => "bell-with-gross",
            Self::Gaussian => "gaussian",
            Self::BellWithGaussianGross => "bell-with-gaussian-gross",
        }
    }
}

pub fn uniform_day(open_tick: u64, close_tick: u64) -> ArrivalRules {
    ArrivalRules::new(vec![ArrivalRule::constant(
        open_tick,
        close_tick,
        UNIFORM_DAY_PROBABILITY,
    )])
}

pub fn bell_day(open_tick: u64, close_tick: u64) -> ArrivalRules {
    let len = close_tick.saturating_sub(open_tick);
    let eighth = |k: u64| open_tick + len * k / 8;
    ArrivalRules::new(
        BELL_DAY_BANDS
            .iter()
            .map(|&(from, to, p)| ArrivalRule::constant(eighth(from), eighth(to), p))
            .filter(|rule| rule.end_tick > rule.start_tick)
            .collect(),
    )
}

/// Gross walk-ins are drawn before the served stream on every tick.
pub fn bell_day_with_gross_stream(open_tick: u64, close_tick: u64) -> ArrivalRules {
    let mut rules = vec![ArrivalRule::constant(open_tick, close_tick, UNIFORM_DAY_PROBABILITY).gross()];
    rules.extend(bell_day(open_tick, close_tick).0);
    ArrivalRules::new(rules)
}

/// Served customers arrive along a gaussian curve peaking at the bell's 1/70.
///
/// This is a served-stream variant: the gaussian walk-in stream that counts
/// people alongside the bell-shaped served stream is
/// [bell_day_with_gaussian_walk_ins].
pub fn gaussian_day(open_tick: u64, close_tick: u64) -> ArrivalRules {
    let mean = (open_tick + close_tick) as f64 / 2.0;
    ArrivalRules::new(vec![ArrivalRule::new(
        open_tick,
        close_tick,
        ArrivalProbability::gaussian_with_peak(mean, GAUSSIAN_STD_DEV_TICKS, GAUSSIAN_PEAK_PROBABILITY),
    )])
}

/// Bell served stream plus a gross stream whose per-tick probability is the
/// raw normal density (mean mid-window, sd two hours).
pub fn bell_day_with_gaussian_walk_ins(open_tick: u64, close_tick: u64) -> ArrivalRules {
    let mean = (open_tick + close_tick) as f64 / 2.0;
    let walk_ins = ArrivalProbability::Gaussian {
        mean_tick: mean,
        std_dev_ticks: GAUSSIAN_STD_DEV_TICKS,
        scale: 1.0,
    };
    let mut rules = vec![ArrivalRule::new(open_tick, close_tick, walk_ins).gross()];
    rules.extend(bell_day(open_tick, close_tick).0);
    ArrivalRules::new(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{DEFAULT_CLOSE_TICK, DEFAULT_OPEN_TICK};

    #[test]
    fn bell_day_matches_half_hour_bands() {
        let rules = bell_day(DEFAULT_OPEN_TICK, DEFAULT_CLOSE_TICK);
        assert_eq!(rules.rules().len(), 7);

        let at = |h: f64| {
            let tick = (h * SECS_PER_HOUR as f64) as u64;
            let active: Vec<_> = rules.active_at(tick).collect();
            assert_eq!(active.len(), 1, "exactly one band at {h}");
            active[0].probability_at(tick)
        };
        assert_eq!(at(8.0), 1.0 / 250.0);
        assert_eq!(at(8.75), 1.0 / 210.0);
        assert_eq!(at(9.25), 1.0 / 130.0);
        assert_eq!(at(10.0), 1.0 / 70.0);
        assert_eq!(at(10.75), 1.0 / 130.0);
        assert_eq!(at(11.25), 1.0 / 210.0);
        assert_eq!(at(11.99), 1.0 / 250.0);
        assert_eq!(rules.active_at(DEFAULT_CLOSE_TICK).count(), 0);
    }

    #[test]
    fn gross_stream_rule_comes_first() {
        let rules = bell_day_with_gross_stream(0, 14_400);
        assert_eq!(rules.rules()[0].stream, ArrivalStream::Gross);
        assert!(rules.rules()[1..]
            .iter()
            .all(|rule| rule.stream == ArrivalStream::Served));
        assert_eq!(rules.active_at(100).count(), 2);
    }

    #[test]
    fn gaussian_walk_ins_ride_alongside_the_bell() {
        let rules = bell_day_with_gaussian_walk_ins(DEFAULT_OPEN_TICK, DEFAULT_CLOSE_TICK);
        assert_eq!(rules.rules().len(), 8);
        let walk_ins = rules.rules()[0];
        assert_eq!(walk_ins.stream, ArrivalStream::Gross);
        let density_peak = 1.0 / (GAUSSIAN_STD_DEV_TICKS * (2.0 * std::f64::consts::PI).sqrt());
        assert!((walk_ins.probability_at(36_000) - density_peak).abs() < 1e-12);
        assert_eq!(rules.rules()[1..], bell_day(DEFAULT_OPEN_TICK, DEFAULT_CLOSE_TICK).0[..]);
    }

    #[test]
    fn presets_validate() {
        for schedule in [
            ArrivalSchedule::Uniform,
            ArrivalSchedule::Bell,
            ArrivalSchedule::BellWithGross,
            ArrivalSchedule::Gaussian,
            ArrivalSchedule::BellWithGaussianGross,
        ] {
            schedule
                .rules(DEFAULT_OPEN_TICK, DEFAULT_CLOSE_TICK)
                .validate()
                .expect("preset should be valid");
        }
    }

    #[test]
    fn validation_reports_offending_rule() {
        let rules = ArrivalRules::new(vec![
            ArrivalRule::constant(0, 10, 0.5),
            ArrivalRule::constant(10, 20, 1.2),
        ]);
        assert_eq!(
            rules.validate(),
            Err(ConfigError::ProbabilityOutOfRange {
                rule: 1,
                probability: 1.2
            })
        );

        let rules = ArrivalRules::new(vec![ArrivalRule::constant(5, 5, 0.5)]);
        assert!(matches!(
            rules.validate(),
            Err(ConfigError::EmptyRuleWindow { rule: 0, .. })
        ));
    }
}
