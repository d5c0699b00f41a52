//! Telemetry / KPIs: counters, extrema, customer series and periodic snapshots.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::clock::{format_clock, hour_of_tick, SECS_PER_MINUTE};
use crate::cost::CostBreakdown;
use crate::scenario::ClosingPolicy;

/// Running minimum and maximum. Starts at the `+inf` / `0` sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extrema {
    min: f64,
    max: f64,
}

impl Default for Extrema {
    fn default() -> Self {
        Self {
            min: f64::INFINITY,
            max: 0.0,
        }
    }
}

impl Extrema {
    pub fn record(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Raw minimum; `+inf` until something is recorded.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Raw maximum; `0` until something is recorded.
    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        self.min == f64::INFINITY
    }

    pub fn min_opt(&self) -> Option<f64> {
        (!self.is_empty()).then_some(self.min)
    }

    pub fn max_opt(&self) -> Option<f64> {
        (!self.is_empty()).then_some(self.max)
    }
}

/// Why a customer left without being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbandonReason {
    /// Ran out of patience in the queue.
    Reneged,
    /// Ran out of patience (measured from arrival) while being served.
    InService,
    /// Still waiting, or still in service under [ClosingPolicy::ForceAbandon], at closing time.
    AtClose,
}

/// Counters and extrema accrued over the run.
#[derive(Debug, Clone, Default, PartialEq, Resource)]
pub struct VenueStats {
    pub arrivals: u64,
    pub gross_arrivals: u64,
    pub served: u64,
    pub reneged: u64,
    pub abandoned_in_service: u64,
    pub abandoned_at_close: u64,
    /// Customers left in service at close under [ClosingPolicy::LeaveInService].
    pub in_service_at_close: u64,
    pub service_time: Extrema,
    pub wait_time: Extrema,
    /// Served-stream arrivals keyed by hour of day.
    pub arrivals_by_hour: BTreeMap<u64, u64>,
}

impl VenueStats {
    pub fn served_count(&self) -> u64 {
        self.served
    }

    pub fn abandoned_count(&self) -> u64 {
        self.reneged + self.abandoned_in_service + self.abandoned_at_close
    }

    pub fn min_service_time(&self) -> f64 {
        self.service_time.min()
    }

    pub fn max_service_time(&self) -> f64 {
        self.service_time.max()
    }

    pub fn min_wait_time(&self) -> f64 {
        self.wait_time.min()
    }

    pub fn max_wait_time(&self) -> f64 {
        self.wait_time.max()
    }

    pub fn record_arrival(&mut self, tick: u64) {
        self.arrivals += 1;
        *self.arrivals_by_hour.entry(hour_of_tick(tick)).or_insert(0) += 1;
    }

    pub fn record_gross_arrival(&mut self) {
        self.gross_arrivals += 1;
    }

    /// Extrema only move here; abandoned customers have no wait time.
    pub fn record_completion(&mut self, service_secs: f64, wait_secs: u64) {
        self.served += 1;
        self.service_time.record(service_secs);
        self.wait_time.record(wait_secs as f64);
    }

    pub fn record_abandonments(&mut self, reason: AbandonReason, count: u64) {
        match reason {
            AbandonReason::Reneged => self.reneged += count,
            AbandonReason::InService => self.abandoned_in_service += count,
            AbandonReason::AtClose => self.abandoned_at_close += count,
        }
    }
}

/// A served customer's timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletedCustomer {
    pub arrival_tick: u64,
    pub service_started_at: u64,
    pub service_secs: f64,
    pub departure_tick: u64,
}

impl CompletedCustomer {
    pub fn wait_secs(&self) -> u64 {
        self.departure_tick.saturating_sub(self.arrival_tick)
    }
}

/// Per-customer time series for plotting. Records nothing unless enabled.
#[derive(Debug, Clone, Default, PartialEq, Resource, Serialize, Deserialize)]
pub struct CustomerSeries {
    pub enabled: bool,
    /// Served-stream arrival ticks.
    pub arrival_ticks: Vec<u64>,
    /// Every sampled service duration, including customers who later abandoned.
    pub service_secs: Vec<f64>,
    pub completed: Vec<CompletedCustomer>,
}

impl CustomerSeries {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }

    pub fn record_arrival(&mut self, tick: u64) {
        if self.enabled {
            self.arrival_ticks.push(tick);
        }
    }

    pub fn record_service(&mut self, secs: f64) {
        if self.enabled {
            self.service_secs.push(secs);
        }
    }

    pub fn record_completion(&mut self, record: CompletedCustomer) {
        if self.enabled {
            self.completed.push(record);
        }
    }

    pub fn wait_times(&self) -> impl Iterator<Item = u64> + '_ {
        self.completed.iter().map(CompletedCustomer::wait_secs)
    }

    pub fn departure_ticks(&self) -> impl Iterator<Item = u64> + '_ {
        self.completed.iter().map(|record| record.departure_tick)
    }
}

/// Aggregated counts at one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueCounts {
    pub queue_len: usize,
    pub busy_stations: usize,
    pub idle_stations: usize,
    pub arrivals: u64,
    pub served: u64,
    pub abandoned: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueSnapshot {
    pub tick: u64,
    pub counts: VenueCounts,
}

/// Snapshot capture configuration.
#[derive(Debug, Clone, Copy, Resource)]
pub struct VenueSnapshotConfig {
    pub interval_ticks: u64,
    pub max_snapshots: usize,
}

impl Default for VenueSnapshotConfig {
    fn default() -> Self {
        Self {
            interval_ticks: 60,
            max_snapshots: 10_000,
        }
    }
}

/// Rolling snapshot buffer.
#[derive(Debug, Clone, Default, Resource)]
pub struct VenueSnapshots {
    pub snapshots: VecDeque<VenueSnapshot>,
    pub last_snapshot_at: Option<u64>,
}

/// Read-only view of the venue handed to a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub tick: u64,
    /// Occupancy per station, in station order.
    pub stations: Vec<bool>,
    /// Arrival ticks of queued customers, head first.
    pub queue_arrivals: Vec<u64>,
    pub arrivals: u64,
    pub served: u64,
    pub abandoned: u64,
    pub service_time: Extrema,
    pub wait_time: Extrema,
    pub cost: CostBreakdown,
}

impl FrameSnapshot {
    pub fn queue_len(&self) -> usize {
        self.queue_arrivals.len()
    }

    pub fn busy_stations(&self) -> usize {
        self.stations.iter().filter(|busy| **busy).count()
    }
}

/// Everything a finished run reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub station_count: usize,
    pub open_tick: u64,
    pub close_tick: u64,
    pub closing_policy: ClosingPolicy,
    /// Served-stream customers created over the window.
    pub total_customers: u64,
    pub gross_arrivals: u64,
    pub served_count: u64,
    pub abandoned_count: u64,
    pub reneged_count: u64,
    pub abandoned_in_service: u64,
    pub abandoned_at_close: u64,
    pub in_service_at_close: u64,
    pub service_time: Extrema,
    pub wait_time: Extrema,
    pub cost: CostBreakdown,
    pub arrivals_by_hour: BTreeMap<u64, u64>,
    pub series: Option<CustomerSeries>,
}

impl SimulationResult {
    pub fn cost(&self) -> u64 {
        self.cost.total
    }

    /// Every created customer is accounted for exactly once.
    pub fn is_conserved(&self) -> bool {
        self.served_count + self.abandoned_count + self.in_service_at_close == self.total_customers
    }
}

fn minutes(value: Option<f64>) -> String {
    match value {
        Some(secs) => format!("{:.2} min", secs / SECS_PER_MINUTE as f64),
        None => "n/a".to_string(),
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Simulation results ({} - {}):",
            format_clock(self.open_tick),
            format_clock(self.close_tick)
        )?;
        writeln!(f, "Service stations: {}", self.station_count)?;
        writeln!(f, "Customers entered: {}", self.total_customers)?;
        writeln!(f, "Customers served: {}", self.served_count)?;
        writeln!(
            f,
            "Customers abandoned: {} (queue {}, in service {}, at close {})",
            self.abandoned_count,
            self.reneged_count,
            self.abandoned_in_service,
            self.abandoned_at_close
        )?;
        if self.in_service_at_close > 0 {
            writeln!(f, "Still in service at close: {}", self.in_service_at_close)?;
        }
        if self.gross_arrivals > 0 {
            writeln!(f, "Gross walk-ins: {}", self.gross_arrivals)?;
        }
        writeln!(f, "Abandonment cost: ${}", self.cost.abandonment_cost)?;
        writeln!(f, "Station cost: ${}", self.cost.station_cost)?;
        writeln!(f, "Min service time: {}", minutes(self.service_time.min_opt()))?;
        writeln!(f, "Max service time: {}", minutes(self.service_time.max_opt()))?;
        writeln!(f, "Min wait time: {}", minutes(self.wait_time.min_opt()))?;
        writeln!(f, "Max wait time: {}", minutes(self.wait_time.max_opt()))?;
        write!(f, "Operating cost: ${}", self.cost.total)
    }
}
