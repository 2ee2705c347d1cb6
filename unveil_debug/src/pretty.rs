// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! and durations are converted to milliseconds using a [`Timebase`].

use std::io::Write;

use unveil_core::clip::ClipRect;
use unveil_core::time::{Duration, HostTime, Timebase};
use unveil_core::trace::{
    ClipChangeEvent, EndReason, HostResizeEvent, SessionEndEvent, SessionStartEvent,
    SessionTickEvent, StaleTickEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    timebase: Timebase,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr(timebase: Timebase) -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
            timebase,
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn ms(&self, d: Duration) -> f64 {
        d.as_millis_f64(self.timebase)
    }

    fn host_ms(&self, t: HostTime) -> f64 {
        t.to_nanos(self.timebase) as f64 / 1_000_000.0
    }
}

fn reason_name(reason: EndReason) -> &'static str {
    match reason {
        EndReason::Completed => "completed",
        EndReason::Cancelled => "cancelled",
        EndReason::Superseded => "superseded",
        EndReason::Reset => "reset",
    }
}

fn clip_dims(clip: ClipRect) -> String {
    format!("{}x{}", clip.width(), clip.height())
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_session_start(&mut self, e: &SessionStartEvent) {
        let _ = writeln!(
            self.writer,
            "[start] session={} {:?} -> {:?} duration={:.1}ms delay={:.1}ms",
            e.session.0,
            e.from,
            e.to,
            self.ms(e.duration),
            self.ms(e.delay),
        );
    }

    fn on_session_tick(&mut self, e: &SessionTickEvent) {
        let progress = match e.progress {
            Some(p) => format!("{p:.3}"),
            None => "delayed".to_owned(),
        };
        let _ = writeln!(
            self.writer,
            "[tick] session={} now={:.3}ms elapsed={:.1}ms progress={progress}",
            e.session.0,
            self.host_ms(e.now),
            self.ms(e.elapsed),
        );
    }

    fn on_clip_change(&mut self, e: &ClipChangeEvent) {
        let source = match e.session {
            Some(s) => format!("session={}", s.0),
            None => "direct".to_owned(),
        };
        let visible = if e.fully_visible { " VISIBLE" } else { "" };
        let _ = writeln!(
            self.writer,
            "[clip] {source} clip={}{visible}",
            clip_dims(e.clip),
        );
    }

    fn on_session_end(&mut self, e: &SessionEndEvent) {
        let _ = writeln!(
            self.writer,
            "[end] session={} {} clip={}",
            e.session.0,
            reason_name(e.reason),
            clip_dims(e.clip),
        );
    }

    fn on_stale_tick(&mut self, e: &StaleTickEvent) {
        let active = match e.active {
            Some(s) => s.0.to_string(),
            None => "none".to_owned(),
        };
        let _ = writeln!(
            self.writer,
            "[stale] session={} active={active} now={:.3}ms",
            e.session.0,
            self.host_ms(e.now),
        );
    }

    fn on_host_resize(&mut self, e: &HostResizeEvent) {
        let action = if e.synced { "synced" } else { "ignored" };
        let _ = writeln!(
            self.writer,
            "[resize] {:?} -> {:?} {action}",
            e.old, e.new,
        );
    }
}
