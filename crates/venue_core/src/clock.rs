use bevy_ecs::prelude::Resource;

/// One tick is one simulated second.
pub const SECS_PER_MINUTE: u64 = 60;
pub const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;

/// Default opening time: 08:00 expressed as ticks since midnight.
pub const DEFAULT_OPEN_TICK: u64 = 8 * SECS_PER_HOUR;
/// Default closing time: 12:00 expressed as ticks since midnight.
pub const DEFAULT_CLOSE_TICK: u64 = 12 * SECS_PER_HOUR;

/// Discrete clock over the half-open operating window `[open_tick, close_tick)`.
///
/// The runner advances it by exactly one tick after each schedule pass; systems
/// only read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Resource)]
pub struct SimulationClock {
    open_tick: u64,
    close_tick: u64,
    now: u64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(DEFAULT_OPEN_TICK, DEFAULT_CLOSE_TICK)
    }
}

impl SimulationClock {
    pub fn new(open_tick: u64, close_tick: u64) -> Self {
        debug_assert!(close_tick >= open_tick, "close tick must not precede open tick");
        Self {
            open_tick,
            close_tick,
            now: open_tick,
        }
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn open_tick(&self) -> u64 {
        self.open_tick
    }

    pub fn close_tick(&self) -> u64 {
        self.close_tick
    }

    /// True once every tick of the window has been simulated.
    pub fn is_closed(&self) -> bool {
        self.now >= self.close_tick
    }

    /// Ticks simulated so far.
    pub fn elapsed(&self) -> u64 {
        self.now - self.open_tick
    }

    pub fn window_len(&self) -> u64 {
        self.close_tick - self.open_tick
    }

    /// Move to the next tick. Saturates at `close_tick`.
    pub fn advance(&mut self) {
        if self.now < self.close_tick {
            self.now += 1;
        }
    }
}

/// Hour of day (0-23 for ticks within one day) that a tick falls in.
pub fn hour_of_tick(tick: u64) -> u64 {
    tick / SECS_PER_HOUR
}

/// Wall-clock label `HH:MM` for a tick counted from midnight.
pub fn format_clock(tick: u64) -> String {
    let hours = tick / SECS_PER_HOUR;
    let minutes = (tick % SECS_PER_HOUR) / SECS_PER_MINUTE;
    format!("{hours:02}:{minutes:02}")
}

/// Human label for a duration in seconds: `"42s"` or `"12m 05s"`.
pub fn format_duration(secs: f64) -> String {
    let total = secs.max(0.0).round() as u64;
    if total >= SECS_PER_MINUTE {
        format!("{}m {:02}s", total / SECS_PER_MINUTE, total % SECS_PER_MINUTE)
    } else {
        format!("{total}s")
    }
}
