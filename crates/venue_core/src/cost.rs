//! Operating cost of a venue day.
//!
//! Formula: `total = stations * fixed_cost_per_station + abandoned * cost_per_abandonment`

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

/// Cost of keeping one station open for the day.
pub const FIXED_COST_PER_STATION: u64 = 1_000;

/// Cost attributed to each customer lost to abandonment.
pub const COST_PER_ABANDONMENT: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Resource, Serialize, Deserialize)]
pub struct CostModel {
    pub fixed_cost_per_station: u64,
    pub cost_per_abandonment: u64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            fixed_cost_per_station: FIXED_COST_PER_STATION,
            cost_per_abandonment: COST_PER_ABANDONMENT,
        }
    }
}

impl CostModel {
    pub fn breakdown(&self, station_count: usize, abandoned_count: u64) -> CostBreakdown {
        let station_cost = station_count as u64 * self.fixed_cost_per_station;
        let abandonment_cost = abandoned_count * self.cost_per_abandonment;
        CostBreakdown {
            station_cost,
            abandonment_cost,
            total: station_cost + abandonment_cost,
        }
    }
}

/// Cost split into its two parts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub station_cost: u64,
    pub abandonment_cost: u64,
    pub total: u64,
}

/// Total cost under the default model.
pub fn operating_cost(station_count: usize, abandoned_count: u64) -> u64 {
    CostModel::default()
        .breakdown(station_count, abandoned_count)
        .total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_stations_five_abandoned() {
        let cost = CostModel::default().breakdown(3, 5);
        assert_eq!(cost.station_cost, 3_000);
        assert_eq!(cost.abandonment_cost, 50_000);
        assert_eq!(cost.total, 53_000);
        assert_eq!(operating_cost(3, 5), 53_000);
    }

    #[test]
    fn custom_model() {
        let model = CostModel {
            fixed_cost_per_station: 250,
            cost_per_abandonment: 40,
        };
        assert_eq!(model.breakdown(4, 10).total, 1_400);
        assert_eq!(model.breakdown(1, 0).abandonment_cost, 0);
    }
}
