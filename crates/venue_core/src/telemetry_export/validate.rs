use crate::telemetry::CompletedCustomer;

/// Checks arrival <= service start <= departure and that the departure is not
/// earlier than the sampled duration allows.
/// Returns an error message if validation fails, None if valid.
pub fn validate_completed_customer(record: &CompletedCustomer) -> Option<String> {
    if record.arrival_tick > record.service_started_at {
        return Some(format!(
            "customer arriving at {}: service started earlier, at {}",
            record.arrival_tick, record.service_started_at
        ));
    }
    if record.service_started_at > record.departure_tick {
        return Some(format!(
            "customer arriving at {}: departed at {} before service started at {}",
            record.arrival_tick, record.departure_tick, record.service_started_at
        ));
    }
    if record.service_secs < 0.0 {
        return Some(format!(
            "customer arriving at {}: negative service time {}",
            record.arrival_tick, record.service_secs
        ));
    }
    let served_for = (record.departure_tick - record.service_started_at) as f64;
    if served_for < record.service_secs {
        return Some(format!(
            "customer arriving at {}: left after {served_for}s of a {}s service",
            record.arrival_tick, record.service_secs
        ));
    }
    None
}
