//! Probability distributions for service durations and per-tick arrivals.
//!
//! Service durations are drawn once per customer at dispatch. Arrival
//! probabilities are evaluated once per active rule per tick and compared
//! against a single uniform draw.

use std::f64::consts::PI;

use bevy_ecs::prelude::Resource;
use rand::RngCore;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default mean service duration in seconds.
pub const DEFAULT_SERVICE_MEAN_SECS: f64 = 600.0;
/// Default standard deviation of the service duration in seconds.
pub const DEFAULT_SERVICE_STD_DEV_SECS: f64 = 300.0;

/// Trait for sampling service durations (in seconds).
///
/// Implementations may return negative values; [ServiceTimeModel] clamps them.
pub trait ServiceTimeDistribution: Send + Sync + std::fmt::Debug {
    fn sample_secs(&self, rng: &mut dyn RngCore) -> f64;
}

/// Normal distribution truncated at zero.
#[derive(Debug, Clone)]
pub struct TruncatedNormalService {
    pub mean_secs: f64,
    pub std_dev_secs: f64,
    normal: Normal<f64>,
}

impl TruncatedNormalService {
    pub fn new(mean_secs: f64, std_dev_secs: f64) -> Result<Self, ConfigError> {
        if !mean_secs.is_finite() {
            return Err(ConfigError::InvalidServiceTime(format!(
                "mean must be finite, got {mean_secs}"
            )));
        }
        let normal = Normal::new(mean_secs, std_dev_secs).map_err(|err| {
            ConfigError::InvalidServiceTime(format!("std dev {std_dev_secs}: {err}"))
        })?;
        Ok(Self {
            mean_secs,
            std_dev_secs,
            normal,
        })
    }
}

impl ServiceTimeDistribution for TruncatedNormalService {
    fn sample_secs(&self, rng: &mut dyn RngCore) -> f64 {
        self.normal.sample(rng).max(0.0)
    }
}

/// Fixed service duration. Consumes no randomness.
#[derive(Debug, Clone, Copy)]
pub struct ConstantService {
    pub secs: f64,
}

impl ConstantService {
    pub fn new(secs: f64) -> Self {
        Self { secs: secs.max(0.0) }
    }
}

impl ServiceTimeDistribution for ConstantService {
    fn sample_secs(&self, _rng: &mut dyn RngCore) -> f64 {
        self.secs
    }
}

/// Serializable description of the service-time distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ServiceTimeConfig {
    Normal { mean_secs: f64, std_dev_secs: f64 },
    Constant { secs: f64 },
}

impl Default for ServiceTimeConfig {
    fn default() -> Self {
        Self::Normal {
            mean_secs: DEFAULT_SERVICE_MEAN_SECS,
            std_dev_secs: DEFAULT_SERVICE_STD_DEV_SECS,
        }
    }
}

impl ServiceTimeConfig {
    pub fn build(&self) -> Result<Box<dyn ServiceTimeDistribution>, ConfigError> {
        match *self {
            Self::Normal {
                mean_secs,
                std_dev_secs,
            } => Ok(Box::new(TruncatedNormalService::new(mean_secs, std_dev_secs)?)),
            Self::Constant { secs } => {
                if !secs.is_finite() {
                    return Err(ConfigError::InvalidServiceTime(format!(
                        "constant duration must be finite, got {secs}"
                    )));
                }
                Ok(Box::new(ConstantService::new(secs)))
            }
        }
    }
}

/// The venue's service-time sampler. Negative draws clamp to zero.
#[derive(Debug, Resource)]
pub struct ServiceTimeModel(pub Box<dyn ServiceTimeDistribution>);

impl ServiceTimeModel {
    pub fn new(dist: Box<dyn ServiceTimeDistribution>) -> Self {
        Self(dist)
    }

    pub fn sample_secs(&self, rng: &mut dyn RngCore) -> f64 {
        self.0.sample_secs(rng).max(0.0)
    }
}

/// Per-tick Bernoulli arrival probability, possibly time-of-day dependent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ArrivalProbability {
    /// Same probability on every tick of the rule's window.
    Constant(f64),
    /// Normal density centred on `mean_tick`, multiplied by `scale` and capped at 1.
    Gaussian {
        mean_tick: f64,
        std_dev_ticks: f64,
        scale: f64,
    },
}

impl ArrivalProbability {
    /// Bell curve whose value at `mean_tick` equals `peak`.
    pub fn gaussian_with_peak(mean_tick: f64, std_dev_ticks: f64, peak: f64) -> Self {
        Self::Gaussian {
            mean_tick,
            std_dev_ticks,
            scale: peak * std_dev_ticks * (2.0 * PI).sqrt(),
        }
    }

    /// Probability of one arrival at `tick`.
    pub fn at(&self, tick: u64) -> f64 {
        match *self {
            Self::Constant(p) => p,
            Self::Gaussian {
                mean_tick,
                std_dev_ticks,
                scale,
            } => {
                let z = (tick as f64 - mean_tick) / std_dev_ticks;
                let density = (-0.5 * z * z).exp() / (std_dev_ticks * (2.0 * PI).sqrt());
                (scale * density).min(1.0)
            }
        }
    }

    /// Largest value the probability takes over any tick.
    pub fn peak(&self) -> f64 {
        match *self {
            Self::Constant(p) => p,
            Self::Gaussian {
                std_dev_ticks,
                scale,
                ..
            } => scale / (std_dev_ticks * (2.0 * PI).sqrt()),
        }
    }

    /// Check the probability stays within [0, 1] and is well defined.
    pub(crate) fn is_valid(&self) -> bool {
        match *self {
            Self::Constant(p) => p.is_finite() && (0.0..=1.0).contains(&p),
            Self::Gaussian {
                mean_tick,
                std_dev_ticks,
                scale,
            } => {
                mean_tick.is_finite()
                    && std_dev_ticks.is_finite()
                    && std_dev_ticks > 0.0
                    && scale.is_finite()
                    && scale >= 0.0
                    && self.peak() <= 1.0
            }
        }
    }
}
