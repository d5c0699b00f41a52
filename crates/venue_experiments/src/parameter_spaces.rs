//! Pre-defined parameter space configurations for experimentation.

use venue_core::patterns::ArrivalSchedule;
use venue_core::scenario::ClosingPolicy;

use crate::ParameterSpace;

/// Largest venue the sweeps consider.
pub const MAX_STATIONS: usize = 10;

/// One to ten stations on the default bell day, five seeds each.
pub fn station_sweep_space() -> ParameterSpace {
    ParameterSpace::grid()
        .station_counts((1..=MAX_STATIONS).collect())
        .replications(5)
}

/// Every arrival schedule against a small range of station counts.
pub fn schedule_comparison_space() -> ParameterSpace {
    ParameterSpace::grid()
        .station_counts(vec![2, 4, 6, 8])
        .schedules(vec![
            ArrivalSchedule::Uniform,
            ArrivalSchedule::Bell,
            ArrivalSchedule::BellWithGross,
            ArrivalSchedule::Gaussian,
        ])
        .replications(3)
}

/// How patience and the closing rule move the optimum.
pub fn patience_space() -> ParameterSpace {
    ParameterSpace::grid()
        .station_counts((1..=MAX_STATIONS).collect())
        .reneging_thresholds(vec![900, 1_800, 3_600])
        .closing_policies(vec![
            ClosingPolicy::ForceAbandon,
            ClosingPolicy::FinishService,
            ClosingPolicy::LeaveInService,
        ])
        .replications(2)
}

/// Quick testing.
pub fn minimal_space() -> ParameterSpace {
    ParameterSpace::grid().station_counts(vec![1, 3])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_sizes() {
        assert_eq!(station_sweep_space().generate().len(), 50);
        assert_eq!(schedule_comparison_space().generate().len(), 48);
        assert_eq!(patience_space().generate().len(), 180);
        assert_eq!(minimal_space().generate().len(), 2);
    }
}
