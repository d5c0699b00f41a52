use std::collections::VecDeque;

use bevy_ecs::prelude::{Component, Entity, Resource};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A customer from arrival until completion or abandonment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Customer {
    /// Tick the customer walked in. Never changes.
    pub arrival_tick: u64,
    /// Sampled once at dispatch.
    pub service_secs: Option<f64>,
}

impl Customer {
    pub fn arrive(tick: u64) -> Self {
        Self {
            arrival_tick: tick,
            service_secs: None,
        }
    }

    /// Ticks spent in the venue as of `now`.
    pub fn time_in_venue(&self, now: u64) -> u64 {
        now.saturating_sub(self.arrival_tick)
    }
}

/// The customer a station is serving and when service began.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceSlot {
    pub customer: Customer,
    pub started_at: u64,
    pub service_secs: f64,
}

impl ServiceSlot {
    pub fn elapsed(&self, now: u64) -> u64 {
        now.saturating_sub(self.started_at)
    }

    pub fn is_complete(&self, now: u64) -> bool {
        self.elapsed(now) as f64 >= self.service_secs
    }

    /// First tick at which [ServiceSlot::is_complete] holds, capped at `u64::MAX`.
    pub fn natural_end_tick(&self) -> u64 {
        self.started_at.saturating_add(self.service_secs.ceil() as u64)
    }
}

/// One service box. Busy exactly when it holds a [ServiceSlot].
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct Station {
    pub index: usize,
    serving: Option<ServiceSlot>,
}

impl Station {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            serving: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.serving.is_some()
    }

    pub fn serving(&self) -> Option<&ServiceSlot> {
        self.serving.as_ref()
    }

    /// Start serving `customer` at `now`. The station must be idle.
    pub fn begin_service(&mut self, mut customer: Customer, service_secs: f64, now: u64) {
        debug_assert!(self.serving.is_none(), "station {} is already busy", self.index);
        customer.service_secs = Some(service_secs);
        self.serving = Some(ServiceSlot {
            customer,
            started_at: now,
            service_secs,
        });
    }

    /// Free the station, handing back whoever was being served.
    pub fn release(&mut self) -> Option<ServiceSlot> {
        self.serving.take()
    }
}

/// Station entities in dispatch order. Fixed for the lifetime of the venue.
#[derive(Debug, Clone, Default, Resource)]
pub struct StationPool(pub Vec<Entity>);

impl StationPool {
    pub fn stations(&self) -> &[Entity] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// FIFO line of customers not yet assigned a station.
#[derive(Debug, Clone, Default, Resource)]
pub struct DispatchQueue(VecDeque<Customer>);

impl DispatchQueue {
    pub fn push(&mut self, customer: Customer) {
        self.0.push_back(customer);
    }

    pub fn pop_front(&mut self) -> Option<Customer> {
        self.0.pop_front()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Customer> + '_ {
        self.0.iter()
    }

    /// Drop every customer matching `expired`, keeping order. Returns how many left.
    pub fn remove_where<F>(&mut self, mut expired: F) -> usize
    where
        F: FnMut(&Customer) -> bool,
    {
        let before = self.0.len();
        self.0.retain(|customer| !expired(customer));
        before - self.0.len()
    }

    /// Empty the queue, returning how many customers were still waiting.
    pub fn clear(&mut self) -> usize {
        let n = self.0.len();
        self.0.clear();
        n
    }
}

/// The single random stream every draw comes from.
#[derive(Debug, Resource)]
pub struct VenueRng(pub StdRng);

impl VenueRng {
    /// Seeded stream, or OS entropy when no seed is given.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_is_busy_iff_serving() {
        let mut station = Station::new(0);
        assert!(!station.is_busy());
        assert!(station.serving().is_none());

        station.begin_service(Customer::arrive(10), 30.0, 20);
        assert!(station.is_busy());
        let slot = *station.serving().expect("slot");
        assert_eq!(slot.started_at, 20);
        assert_eq!(slot.customer.service_secs, Some(30.0));

        let released = station.release().expect("released");
        assert_eq!(released.customer.arrival_tick, 10);
        assert!(!station.is_busy());
    }

    #[test]
    fn slot_completion_uses_elapsed_ticks() {
        let slot = ServiceSlot {
            customer: Customer::arrive(0),
            started_at: 100,
            service_secs: 2.5,
        };
        assert!(!slot.is_complete(102));
        assert!(slot.is_complete(103));
        assert_eq!(slot.natural_end_tick(), 103);

        let instant = ServiceSlot {
            service_secs: 0.0,
            ..slot
        };
        assert!(instant.is_complete(100));
    }

    #[test]
    fn queue_is_fifo_and_prunes_in_place() {
        let mut queue = DispatchQueue::default();
        for tick in [10, 12, 15] {
            queue.push(Customer::arrive(tick));
        }
        let removed = queue.remove_where(|c| c.arrival_tick == 12);
        assert_eq!(removed, 1);
        assert_eq!(queue.pop_front().map(|c| c.arrival_tick), Some(10));
        assert_eq!(queue.pop_front().map(|c| c.arrival_tick), Some(15));
        assert!(queue.is_empty());
    }

    #[test]
    fn time_in_venue_counts_from_arrival() {
        let customer = Customer::arrive(50);
        assert_eq!(customer.time_in_venue(80), 30);
        assert_eq!(customer.time_in_venue(20), 0);
    }

    #[test]
    fn huge_service_end_saturates() {
        let slot = ServiceSlot {
            customer: Customer::arrive(0),
            started_at: 5,
            service_secs: 1.0e20,
        };
        assert_eq!(slot.natural_end_tick(), u64::MAX);
        assert!(!slot.is_complete(1_000));
    }
}
