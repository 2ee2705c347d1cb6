// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for clip animations.
//!
//! This module provides a [`TraceSink`] trait with one method per animator
//! event. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies.

use crate::clip::{ClipRect, SurfaceSize};
use crate::session::SessionId;
use crate::time::{Duration, HostTime};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Why a session stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// The session reached its target.
    Completed,
    /// [`cancel`](crate::animator::ClipAnimator::cancel) was called.
    Cancelled,
    /// A newer session was started.
    Superseded,
    /// [`reset`](crate::animator::ClipAnimator::reset) was called.
    Reset,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a session is created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionStartEvent {
    /// The new session.
    pub session: SessionId,
    /// Clip size captured at start.
    pub from: SurfaceSize,
    /// Target clip size.
    pub to: SurfaceSize,
    /// Animated duration in host ticks.
    pub duration: Duration,
    /// Start delay in host ticks.
    pub delay: Duration,
}

/// Emitted for every tick accepted by the live session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionTickEvent {
    /// The ticked session.
    pub session: SessionId,
    /// Host time of the tick.
    pub now: HostTime,
    /// Time since the session's first tick.
    pub elapsed: Duration,
    /// Linear progress, or `None` while the start delay is pending.
    pub progress: Option<f64>,
}

/// Emitted whenever the clip rectangle is written.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipChangeEvent {
    /// The session that wrote the clip, or `None` for direct calls.
    pub session: Option<SessionId>,
    /// The new clip.
    pub clip: ClipRect,
    /// Whether the clip now covers the whole host.
    pub fully_visible: bool,
}

/// Emitted when a session stops for any reason.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionEndEvent {
    /// The session that stopped.
    pub session: SessionId,
    /// Why it stopped.
    pub reason: EndReason,
    /// The clip at the moment it stopped.
    pub clip: ClipRect,
}

/// Emitted when a tick for a session that is no longer live is rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaleTickEvent {
    /// The session named by the tick.
    pub session: SessionId,
    /// The live session at the time, if any.
    pub active: Option<SessionId>,
    /// Host time of the tick.
    pub now: HostTime,
}

/// Emitted when the host reports a size change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostResizeEvent {
    /// Size before the change.
    pub old: SurfaceSize,
    /// Size after the change.
    pub new: SurfaceSize,
    /// Whether the clip followed the new size.
    pub synced: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from a [`ClipAnimator`](crate::animator::ClipAnimator).
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a session starts.
    fn on_session_start(&mut self, e: &SessionStartEvent) {
        _ = e;
    }

    /// Called when the live session accepts a tick.
    fn on_session_tick(&mut self, e: &SessionTickEvent) {
        _ = e;
    }

    /// Called when the clip rectangle changes.
    fn on_clip_change(&mut self, e: &ClipChangeEvent) {
        _ = e;
    }

    /// Called when a session stops.
    fn on_session_end(&mut self, e: &SessionEndEvent) {
        _ = e;
    }

    /// Called when a stale tick is rejected.
    fn on_stale_tick(&mut self, e: &StaleTickEvent) {
        _ = e;
    }

    /// Called when the host reports a resize.
    fn on_host_resize(&mut self, e: &HostResizeEvent) {
        _ = e;
    }
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    fn on_session_start(&mut self, e: &SessionStartEvent) {
        (**self).on_session_start(e);
    }

    fn on_session_tick(&mut self, e: &SessionTickEvent) {
        (**self).on_session_tick(e);
    }

    fn on_clip_change(&mut self, e: &ClipChangeEvent) {
        (**self).on_clip_change(e);
    }

    fn on_session_end(&mut self, e: &SessionEndEvent) {
        (**self).on_session_end(e);
    }

    fn on_stale_tick(&mut self, e: &StaleTickEvent) {
        (**self).on_stale_tick(e);
    }

    fn on_host_resize(&mut self, e: &HostResizeEvent) {
        (**self).on_host_resize(e);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`SessionStartEvent`].
    #[inline]
    pub fn session_start(&mut self, e: &SessionStartEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_session_start(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SessionTickEvent`].
    #[inline]
    pub fn session_tick(&mut self, e: &SessionTickEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_session_tick(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ClipChangeEvent`].
    #[inline]
    pub fn clip_change(&mut self, e: &ClipChangeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_clip_change(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SessionEndEvent`].
    #[inline]
    pub fn session_end(&mut self, e: &SessionEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_session_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`StaleTickEvent`].
    #[inline]
    pub fn stale_tick(&mut self, e: &StaleTickEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_stale_tick(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`HostResizeEvent`].
    #[inline]
    pub fn host_resize(&mut self, e: &HostResizeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_host_resize(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_start() -> SessionStartEvent {
        SessionStartEvent {
            session: SessionId(3),
            from: SurfaceSize::ZERO,
            to: SurfaceSize::new(300, 200),
            duration: Duration(250_000_000),
            delay: Duration::ZERO,
        }
    }

    #[test]
    fn noop_sink_accepts_everything() {
        let mut sink = NoopSink;
        sink.on_session_start(&sample_start());
        sink.on_clip_change(&ClipChangeEvent {
            session: None,
            clip: ClipRect::EMPTY,
            fully_visible: false,
        });
        sink.on_host_resize(&HostResizeEvent {
            old: SurfaceSize::ZERO,
            new: SurfaceSize::new(1, 1),
            synced: false,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.session_start(&sample_start());
        tracer.stale_tick(&StaleTickEvent {
            session: SessionId(1),
            active: None,
            now: HostTime(0),
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            ends: Vec<(SessionId, EndReason)>,
        }
        impl TraceSink for RecordingSink {
            fn on_session_end(&mut self, e: &SessionEndEvent) {
                self.ends.push((e.session, e.reason));
            }
        }

        let mut sink = RecordingSink { ends: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.session_end(&SessionEndEvent {
            session: SessionId(9),
            reason: EndReason::Superseded,
            clip: ClipRect::EMPTY,
        });
        drop(tracer);
        assert_eq!(sink.ends, &[(SessionId(9), EndReason::Superseded)]);
    }

    #[test]
    fn mutable_reference_forwards() {
        struct Counter(u32);
        impl TraceSink for Counter {
            fn on_session_start(&mut self, _: &SessionStartEvent) {
                self.0 += 1;
            }
        }

        fn feed(mut sink: impl TraceSink) {
            sink.on_session_start(&sample_start());
            sink.on_session_tick(&SessionTickEvent {
                session: SessionId(3),
                now: HostTime(1),
                elapsed: Duration::ZERO,
                progress: None,
            });
        }

        let mut counter = Counter(0);
        feed(&mut counter);
        feed(&mut counter);
        assert_eq!(counter.0, 2);
    }
}
