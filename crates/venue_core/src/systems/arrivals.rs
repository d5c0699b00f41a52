use bevy_ecs::prelude::{Res, ResMut};
use rand::Rng;
use tracing::trace;

use crate::clock::SimulationClock;
use crate::ecs::{Customer, DispatchQueue, VenueRng};
use crate::patterns::{ArrivalRules, ArrivalStream};
use crate::telemetry::{CustomerSeries, VenueStats};

/// One uniform draw per active rule; a draw below the rule's probability is an arrival.
pub fn arrival_system(
    clock: Res<SimulationClock>,
    rules: Res<ArrivalRules>,
    mut rng: ResMut<VenueRng>,
    mut queue: ResMut<DispatchQueue>,
    mut stats: ResMut<VenueStats>,
    mut series: ResMut<CustomerSeries>,
) {
    let now = clock.now();
    for rule in rules.active_at(now) {
        let draw: f64 = rng.0.gen();
        if draw >= rule.probability_at(now) {
            continue;
        }
        match rule.stream {
            ArrivalStream::Served => {
                queue.push(Customer::arrive(now));
                stats.record_arrival(now);
                series.record_arrival(now);
                trace!(tick = now, queue_len = queue.len(), "customer arrived");
            }
            ArrivalStream::Gross => {
                stats.record_gross_arrival();
                trace!(tick = now, "gross walk-in");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy_ecs::prelude::{Schedule, World};

    use super::*;
    use crate::patterns::ArrivalRule;

    fn world_with_rules(rules: Vec<ArrivalRule>) -> World {
        let mut world = World::new();
        world.insert_resource(SimulationClock::new(100, 200));
        world.insert_resource(ArrivalRules::new(rules));
        world.insert_resource(VenueRng::new(Some(3)));
        world.insert_resource(DispatchQueue::default());
        world.insert_resource(VenueStats::default());
        world.insert_resource(CustomerSeries::enabled());
        world
    }

    #[test]
    fn certain_rule_enqueues_one_customer_per_tick() {
        let mut world = world_with_rules(vec![ArrivalRule::constant(100, 200, 1.0)]);
        let mut schedule = Schedule::default();
        schedule.add_systems(arrival_system);
        schedule.run(&mut world);

        let queue = world.resource::<DispatchQueue>();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.iter().next().map(|c| c.arrival_tick), Some(100));
        assert_eq!(world.resource::<VenueStats>().arrivals, 1);
        assert_eq!(world.resource::<CustomerSeries>().arrival_ticks, vec![100]);
    }

    #[test]
    fn gross_stream_is_counted_but_never_queued() {
        let mut world = world_with_rules(vec![
            ArrivalRule::constant(100, 200, 1.0).gross(),
            ArrivalRule::constant(150, 200, 1.0),
        ]);
        let mut schedule = Schedule::default();
        schedule.add_systems(arrival_system);
        schedule.run(&mut world);

        let stats = world.resource::<VenueStats>();
        assert_eq!(stats.gross_arrivals, 1);
        assert_eq!(stats.arrivals, 0);
        assert!(world.resource::<DispatchQueue>().is_empty());
    }

    #[test]
    fn zero_probability_never_arrives() {
        let mut world = world_with_rules(vec![ArrivalRule::constant(100, 200, 0.0)]);
        let mut schedule = Schedule::default();
        schedule.add_systems(arrival_system);
        for _ in 0..50 {
            schedule.run(&mut world);
        }
        assert_eq!(world.resource::<VenueStats>().arrivals, 0);
    }
}
