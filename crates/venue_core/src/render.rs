//! Background simulation with a foreground frame loop.
//!
//! The simulation runs on a worker thread; the caller's thread pulls a
//! [FrameSnapshot] every `cadence_ticks` ticks and hands it to a [FrameSink].
//! Both sides share one mutex-guarded [RenderContext]. The worker holds the
//! lock for one tick, the frame loop for one snapshot. The worker waits for
//! each frame to be taken before simulating further, so every frame is seen.

use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::clock::SimulationClock;
use crate::error::{RenderError, VenueError};
use crate::runner::VenueSimulation;
use crate::scenario::VenueConfig;
use crate::telemetry::{FrameSnapshot, SimulationResult};

/// Ticks between frames unless configured otherwise.
pub const DEFAULT_RENDER_CADENCE_TICKS: u64 = 100;
/// How long the last frame stays up after the simulation finishes.
pub const DEFAULT_GRACE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub cadence_ticks: u64,
    /// Wall-clock pause after each frame; `None` renders as fast as possible.
    pub frame_interval: Option<Duration>,
    pub grace: Duration,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cadence_ticks: DEFAULT_RENDER_CADENCE_TICKS,
            frame_interval: None,
            grace: DEFAULT_GRACE,
        }
    }
}

impl RenderOptions {
    /// Pace frames at `fps` frames per second. Zero means unpaced.
    pub fn from_fps(fps: u32) -> Self {
        Self {
            frame_interval: (fps > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(fps))),
            ..Self::default()
        }
    }

    pub fn with_cadence(mut self, cadence_ticks: u64) -> Self {
        self.cadence_ticks = cadence_ticks;
        self
    }

    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        if self.cadence_ticks == 0 {
            return Err(RenderError::ZeroCadence);
        }
        Ok(())
    }
}

/// Consumer of rendered frames (terminal dashboard, recorder, ...).
pub trait FrameSink {
    fn render_frame(&mut self, frame: &FrameSnapshot) -> Result<(), RenderError>;
}

/// Keeps every frame in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub frames: Vec<FrameSnapshot>,
}

impl FrameSink for RecordingSink {
    fn render_frame(&mut self, frame: &FrameSnapshot) -> Result<(), RenderError> {
        self.frames.push(frame.clone());
        Ok(())
    }
}

/// State shared between the simulation worker and the frame loop.
struct RenderState {
    sim: VenueSimulation,
    frame_pending: bool,
    finished: bool,
    rendering: bool,
}

/// Explicit handle on the shared state; cloned into the worker thread.
#[derive(Clone)]
pub struct RenderContext {
    shared: Arc<(Mutex<RenderState>, Condvar)>,
}

impl RenderContext {
    fn new(sim: VenueSimulation) -> Self {
        Self {
            shared: Arc::new((
                Mutex::new(RenderState {
                    sim,
                    frame_pending: false,
                    finished: false,
                    rendering: true,
                }),
                Condvar::new(),
            )),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, RenderState>, RenderError> {
        self.shared.0.lock().map_err(|_| RenderError::Poisoned)
    }

    fn wait<'a>(
        &self,
        guard: MutexGuard<'a, RenderState>,
    ) -> Result<MutexGuard<'a, RenderState>, RenderError> {
        self.shared.1.wait(guard).map_err(|_| RenderError::Poisoned)
    }

    fn notify(&self) {
        self.shared.1.notify_all();
    }

    /// Worker loop: one tick per lock, pausing at each frame boundary until
    /// the frame loop has taken its snapshot.
    fn simulate(&self, cadence_ticks: u64) -> Result<(), RenderError> {
        let _finished = FinishedGuard { context: self };
        loop {
            let mut state = self.lock()?;
            while state.frame_pending && state.rendering {
                state = self.wait(state)?;
            }
            let tick = state.sim.now();
            let open_tick = state.sim.world().resource::<SimulationClock>().open_tick();
            if !state.sim.step() {
                return Ok(());
            }
            if state.rendering && (tick - open_tick) % cadence_ticks == 0 {
                state.frame_pending = true;
                drop(state);
                self.notify();
            }
        }
    }

    /// Block until a frame is ready or the worker is done. `None` means done.
    fn next_frame(&self) -> Result<Option<FrameSnapshot>, RenderError> {
        let mut state = self.lock()?;
        loop {
            if state.frame_pending {
                let frame = state.sim.frame_snapshot();
                state.frame_pending = false;
                drop(state);
                self.notify();
                return Ok(Some(frame));
            }
            if state.finished {
                return Ok(None);
            }
            state = self.wait(state)?;
        }
    }

    /// Take the simulation back once the worker has exited.
    fn into_simulation(self) -> Result<VenueSimulation, RenderError> {
        let (state, _) = Arc::try_unwrap(self.shared).map_err(|_| RenderError::Poisoned)?;
        let state = state.into_inner().map_err(|_| RenderError::Poisoned)?;
        Ok(state.sim)
    }

    /// Stop pausing the worker at frame boundaries.
    fn stop_rendering(&self) {
        if let Ok(mut state) = self.shared.0.lock() {
            state.rendering = false;
            state.frame_pending = false;
        }
        self.notify();
    }
}

/// Marks the worker finished and wakes the frame loop on every exit,
/// unwinding included.
struct FinishedGuard<'a> {
    context: &'a RenderContext,
}

impl Drop for FinishedGuard<'_> {
    fn drop(&mut self) {
        let mut state = match self.context.shared.0.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.finished = true;
        drop(state);
        self.context.notify();
    }
}

/// Run the venue on a worker thread, feeding frames to `sink` as it goes.
///
/// After the last tick a final frame is rendered, showing the venue before the
/// closing policy is applied, then the grace delay elapses before the result
/// is returned.
pub fn run_with_renderer<S: FrameSink>(
    config: &VenueConfig,
    options: RenderOptions,
    sink: &mut S,
) -> Result<SimulationResult, VenueError> {
    options.validate()?;
    let sim = VenueSimulation::new(config)?;
    let mut sim = render_simulation(sim, options, sink)?;
    Ok(sim.result())
}

/// Render an already built simulation to its last tick and hand it back,
/// unclosed, so the caller can read its world before taking the result.
pub fn render_simulation<S: FrameSink>(
    sim: VenueSimulation,
    options: RenderOptions,
    sink: &mut S,
) -> Result<VenueSimulation, VenueError> {
    options.validate()?;
    let context = RenderContext::new(sim);

    let worker_context = context.clone();
    let cadence = options.cadence_ticks;
    let worker = thread::Builder::new()
        .name("venue-sim".into())
        .spawn(move || worker_context.simulate(cadence))
        .map_err(RenderError::Io)?;

    let mut frames = 0u64;
    let outcome = loop {
        match context.next_frame() {
            Ok(Some(frame)) => {
                if let Err(err) = sink.render_frame(&frame) {
                    break Err(err);
                }
                frames += 1;
                if let Some(interval) = options.frame_interval {
                    thread::sleep(interval);
                }
            }
            Ok(None) => break Ok(()),
            Err(err) => break Err(err),
        }
    };

    if let Err(err) = outcome {
        warn!(error = %err, "rendering stopped early");
        context.stop_rendering();
        join_worker(worker)?;
        return Err(err.into());
    }

    join_worker(worker)?;
    let sim = context.into_simulation()?;
    sink.render_frame(&sim.frame_snapshot())?;
    frames += 1;
    thread::sleep(options.grace);
    debug!(frames, "render loop finished");
    Ok(sim)
}

fn join_worker(worker: thread::JoinHandle<Result<(), RenderError>>) -> Result<(), RenderError> {
    worker.join().map_err(|_| RenderError::WorkerPanicked)?
}
