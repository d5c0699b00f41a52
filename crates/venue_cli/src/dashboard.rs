//! Plain-text dashboard frames for the render loop.

use std::io::{self, Write};

use venue_core::clock::{format_clock, format_duration};
use venue_core::render::FrameSink;
use venue_core::telemetry::FrameSnapshot;
use venue_core::RenderError;

/// Queue entries drawn before the line is elided.
const MAX_QUEUE_GLYPHS: usize = 40;

/// Draws each frame to a writer, clearing the screen between frames when
/// the writer is a terminal.
pub struct TerminalSink<W: Write> {
    out: W,
    clear: bool,
}

impl TerminalSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self {
            out: io::stdout(),
            clear: true,
        }
    }
}

impl<W: Write> TerminalSink<W> {
    #[cfg(test)]
    pub fn plain(out: W) -> Self {
        Self { out, clear: false }
    }
}

impl<W: Write> FrameSink for TerminalSink<W> {
    fn render_frame(&mut self, frame: &FrameSnapshot) -> Result<(), RenderError> {
        if self.clear {
            write!(self.out, "\x1b[2J\x1b[H")?;
        }
        self.out.write_all(render_text(frame).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

/// Render a frame as a few lines of text.
pub fn render_text(frame: &FrameSnapshot) -> String {
    let boxes: String = frame
        .stations
        .iter()
        .map(|busy| if *busy { "[#]" } else { "[ ]" })
        .collect::<Vec<_>>()
        .join(" ");

    let shown = frame.queue_len().min(MAX_QUEUE_GLYPHS);
    let mut queue = "o".repeat(shown);
    if frame.queue_len() > shown {
        queue.push_str(&format!(" +{}", frame.queue_len() - shown));
    }

    let head_wait = frame
        .queue_arrivals
        .first()
        .map(|arrival| format_duration(frame.tick.saturating_sub(*arrival) as f64))
        .unwrap_or_else(|| "-".to_string());

    format!(
        "Time {}\n\
         Stations {boxes}  ({}/{} busy)\n\
         Queue    {queue}  ({} waiting, head waited {head_wait})\n\
         Entered {}  Served {}  Lost {}\n\
         Cost so far: ${} (stations ${}, lost ${})\n",
        format_clock(frame.tick),
        frame.busy_stations(),
        frame.stations.len(),
        frame.queue_len(),
        frame.arrivals,
        frame.served,
        frame.abandoned,
        frame.cost.total,
        frame.cost.station_cost,
        frame.cost.abandonment_cost,
    )
}
