// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The clip-dimension animation engine.
//!
//! [`ClipAnimator`] reveals or hides a surface by moving the right and bottom
//! edges of an origin-anchored clip rectangle. The surface's layout box never
//! changes: each frame only rewrites the clip and asks the
//! [`MaskRenderer`] to redraw the outline.
//!
//! # Sessions
//!
//! [`animate_to`](ClipAnimator::animate_to) starts a session from the current
//! clip size to a target size. At most one session is live; starting another,
//! [`cancel`](ClipAnimator::cancel), and [`reset`](ClipAnimator::reset) tear
//! the live one down synchronously, including its tick registration. Every
//! tick names its session, and a tick for anything but the live session is
//! rejected as [`TickStatus::Stale`] without touching state.
//!
//! # Visibility
//!
//! The animator is *fully visible* when the clip is non-empty and equals the
//! host's size. Visibility is recomputed on every clip write. A host resize
//! while fully visible drags the clip along; otherwise the resize is ignored
//! until the next animation or reset.

use crate::clip::{ClipRect, MaskUpdate, SurfaceSize};
use crate::easing::Easing;
use crate::host::{HostResize, LayoutHost, MaskRenderer, TickScheduler};
use crate::scheduler::FrameScheduler;
use crate::session::{AnimationSession, SessionId, normalized_progress};
use crate::time::{Duration, HostTime, Timebase};
use crate::trace::{
    ClipChangeEvent, EndReason, HostResizeEvent, NoopSink, SessionEndEvent, SessionStartEvent,
    SessionTickEvent, StaleTickEvent, TraceSink, Tracer,
};

/// Animator-wide settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimatorConfig {
    /// Session duration in milliseconds.
    pub duration_ms: u32,
    /// Delay between a session's first tick and the start of motion.
    pub start_delay_ms: u32,
    /// Curve applied to session progress.
    pub easing: Easing,
    /// Corner radius of the mask outline; `0.0` for square corners.
    pub corner_radius: f64,
    /// Conversion from host ticks to nanoseconds.
    pub timebase: Timebase,
}

impl AnimatorConfig {
    /// Default session duration.
    pub const DEFAULT_DURATION_MS: u32 = 250;

    /// 250 ms, no delay, [`Easing::FastOutSlowIn`], square corners,
    /// nanosecond ticks.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            duration_ms: Self::DEFAULT_DURATION_MS,
            start_delay_ms: 0,
            easing: Easing::FastOutSlowIn,
            corner_radius: 0.0,
            timebase: Timebase::NANOS,
        }
    }

    /// Sets the session duration.
    #[must_use]
    pub const fn duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Sets the start delay.
    #[must_use]
    pub const fn start_delay_ms(mut self, start_delay_ms: u32) -> Self {
        self.start_delay_ms = start_delay_ms;
        self
    }

    /// Sets the easing curve.
    #[must_use]
    pub const fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Sets the mask corner radius.
    #[must_use]
    pub const fn corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    /// Sets the host timebase.
    #[must_use]
    pub const fn timebase(mut self, timebase: Timebase) -> Self {
        self.timebase = timebase;
        self
    }
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-call overrides for [`ClipAnimator::animate_to_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimateOptions {
    /// Overrides [`AnimatorConfig::duration_ms`].
    pub duration_ms: Option<u32>,
    /// Overrides [`AnimatorConfig::start_delay_ms`].
    pub start_delay_ms: Option<u32>,
}

impl AnimateOptions {
    /// No overrides.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            duration_ms: None,
            start_delay_ms: None,
        }
    }

    /// Overrides the duration.
    #[must_use]
    pub const fn duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Overrides the start delay.
    #[must_use]
    pub const fn start_delay_ms(mut self, start_delay_ms: u32) -> Self {
        self.start_delay_ms = Some(start_delay_ms);
        self
    }
}

/// What a tick did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickStatus {
    /// The tick named a session that is not live; nothing changed.
    Stale,
    /// The session is still inside its start delay; nothing changed.
    Delayed,
    /// The clip moved; `progress` is the linear timeline position in
    /// `[0, 1)`.
    Running {
        /// Linear progress before easing.
        progress: f64,
    },
    /// The clip reached the target and the session ended.
    Finished,
}

impl TickStatus {
    /// Whether this tick completed its session.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Finished)
    }

    /// Whether this tick was rejected.
    #[must_use]
    pub const fn is_stale(self) -> bool {
        matches!(self, Self::Stale)
    }
}

/// Animates a surface's visible bounds by clipping instead of relayout.
///
/// Owns its collaborators: the [`LayoutHost`] being clipped, the
/// [`MaskRenderer`] that draws the result, the [`TickScheduler`] that
/// delivers frames, and a [`TraceSink`] for diagnostics.
///
/// # Usage
///
/// ```
/// use unveil_core::animator::{AnimatorConfig, ClipAnimator, TickStatus};
/// use unveil_core::clip::{MaskUpdate, SurfaceSize};
/// use unveil_core::easing::Easing;
/// use unveil_core::host::MaskRenderer;
/// use unveil_core::scheduler::FrameScheduler;
/// use unveil_core::time::HostTime;
///
/// struct Outline;
/// impl MaskRenderer for Outline {
///     fn invalidate_mask(&mut self, _mask: &MaskUpdate) {}
/// }
///
/// let host = SurfaceSize::new(300, 200);
/// let mut animator = ClipAnimator::new(host, Outline, FrameScheduler::new())
///     .with_config(AnimatorConfig::new().easing(Easing::Linear));
///
/// animator.animate_to(300, 200);
/// assert_eq!(animator.run_frame(HostTime(0)), Some(TickStatus::Running { progress: 0.0 }));
/// assert_eq!(animator.run_frame(HostTime(250_000_000)), Some(TickStatus::Finished));
/// assert!(animator.is_fully_visible());
/// assert_eq!(animator.run_frame(HostTime(260_000_000)), None);
/// ```
#[derive(Debug)]
pub struct ClipAnimator<H, M, S = FrameScheduler, T = NoopSink> {
    host: H,
    renderer: M,
    scheduler: S,
    trace: T,
    config: AnimatorConfig,
    clip: ClipRect,
    fully_visible: bool,
    session: Option<AnimationSession>,
    next_session: u64,
}

impl<H, M, S> ClipAnimator<H, M, S> {
    /// Creates an animator with an empty clip and the default configuration.
    #[must_use]
    pub fn new(host: H, renderer: M, scheduler: S) -> Self {
        Self {
            host,
            renderer,
            scheduler,
            trace: NoopSink,
            config: AnimatorConfig::new(),
            clip: ClipRect::EMPTY,
            fully_visible: false,
            session: None,
            next_session: 1,
        }
    }
}

impl<H, M, S, T> ClipAnimator<H, M, S, T> {
    /// Replaces the configuration. Applies to sessions started afterwards.
    #[must_use]
    pub fn with_config(mut self, config: AnimatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the trace sink.
    #[must_use]
    pub fn with_trace_sink<U: TraceSink>(self, trace: U) -> ClipAnimator<H, M, S, U> {
        ClipAnimator {
            host: self.host,
            renderer: self.renderer,
            scheduler: self.scheduler,
            trace,
            config: self.config,
            clip: self.clip,
            fully_visible: self.fully_visible,
            session: self.session,
            next_session: self.next_session,
        }
    }

    /// The current clip rectangle.
    #[must_use]
    pub fn clip(&self) -> ClipRect {
        self.clip
    }

    /// The current clip width.
    #[must_use]
    pub fn clipped_width(&self) -> i32 {
        self.clip.width()
    }

    /// The current clip height.
    #[must_use]
    pub fn clipped_height(&self) -> i32 {
        self.clip.height()
    }

    /// Whether the clip covers the whole host.
    #[must_use]
    pub fn is_fully_visible(&self) -> bool {
        self.fully_visible
    }

    /// Whether a session is live.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.session.is_some()
    }

    /// The live session, if any.
    #[must_use]
    pub fn active_session(&self) -> Option<SessionId> {
        self.session.map(|s| s.id)
    }

    /// The live session's target size, if any.
    #[must_use]
    pub fn active_target(&self) -> Option<SurfaceSize> {
        self.session.map(|s| s.to)
    }

    /// The current configuration.
    #[must_use]
    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    /// The easing curve new sessions will use.
    #[must_use]
    pub fn easing(&self) -> Easing {
        self.config.easing
    }

    /// Sets the duration used by sessions started afterwards.
    pub fn set_duration_ms(&mut self, duration_ms: u32) {
        self.config.duration_ms = duration_ms;
    }

    /// Sets the easing curve used by sessions started afterwards.
    pub fn set_easing(&mut self, easing: Easing) {
        self.config.easing = easing;
    }

    /// The layout host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the layout host.
    ///
    /// Report size changes made through this reference with
    /// [`on_host_resized`](Self::on_host_resized).
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The mask renderer.
    #[must_use]
    pub fn renderer(&self) -> &M {
        &self.renderer
    }

    /// Mutable access to the mask renderer.
    pub fn renderer_mut(&mut self) -> &mut M {
        &mut self.renderer
    }

    /// The tick scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the tick scheduler.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// The trace sink.
    #[must_use]
    pub fn trace_sink(&self) -> &T {
        &self.trace
    }

    /// Mutable access to the trace sink.
    pub fn trace_sink_mut(&mut self) -> &mut T {
        &mut self.trace
    }

    /// Consumes the animator and returns its collaborators.
    ///
    /// A live session's tick registration is left in the scheduler.
    #[must_use]
    pub fn into_parts(self) -> (H, M, S, T) {
        (self.host, self.renderer, self.scheduler, self.trace)
    }
}

impl<H, M, S, T> ClipAnimator<H, M, S, T>
where
    H: LayoutHost,
    M: MaskRenderer,
    S: TickScheduler,
    T: TraceSink,
{
    /// Sets the clip to `width` x `height` immediately.
    ///
    /// Any values are accepted; sizes that do not match the host exactly
    /// leave the surface not fully visible. A live session is not affected
    /// and will overwrite the clip on its next tick.
    pub fn set_clipped_size(&mut self, width: i32, height: i32) {
        self.apply_clip(SurfaceSize::new(width, height), None);
    }

    /// Animates the clip from its current size to `width` x `height` with the
    /// configured duration and delay.
    ///
    /// Returns the new session's id.
    pub fn animate_to(&mut self, width: i32, height: i32) -> SessionId {
        self.animate_to_with(SurfaceSize::new(width, height), AnimateOptions::new())
    }

    /// Animates the clip from its current size to `target`, applying any
    /// per-call overrides.
    ///
    /// A live session is cancelled first, and the start size is captured
    /// after that, so an interrupted animation continues from wherever it
    /// stopped.
    pub fn animate_to_with(&mut self, target: SurfaceSize, options: AnimateOptions) -> SessionId {
        self.end_session(EndReason::Superseded);

        let id = SessionId(self.next_session);
        self.next_session += 1;

        let timebase = self.config.timebase;
        let duration = Duration::from_millis(
            options.duration_ms.unwrap_or(self.config.duration_ms),
            timebase,
        );
        let delay = Duration::from_millis(
            options.start_delay_ms.unwrap_or(self.config.start_delay_ms),
            timebase,
        );
        let from = self.clip.size();
        let handle = self.scheduler.schedule_ticks(id);

        self.session = Some(AnimationSession {
            id,
            from,
            to: target,
            duration,
            delay,
            easing: self.config.easing,
            handle,
            origin: None,
            elapsed: Duration::ZERO,
        });

        let event = SessionStartEvent {
            session: id,
            from,
            to: target,
            duration,
            delay,
        };
        self.tracer().session_start(&event);
        id
    }

    /// Advances `session` to host time `now`.
    ///
    /// The first tick a session receives fixes its time origin. Ticks for a
    /// session that is not live return [`TickStatus::Stale`] and change
    /// nothing.
    pub fn on_tick(&mut self, session: SessionId, now: HostTime) -> TickStatus {
        let mut live = match self.session {
            Some(live) if live.id == session => live,
            _ => {
                let event = StaleTickEvent {
                    session,
                    active: self.active_session(),
                    now,
                };
                self.tracer().stale_tick(&event);
                return TickStatus::Stale;
            }
        };

        let elapsed = live.advance(now);
        let progress = normalized_progress(elapsed, live.delay, live.duration);
        self.session = Some(live);

        let event = SessionTickEvent {
            session,
            now,
            elapsed,
            progress,
        };
        self.tracer().session_tick(&event);

        match progress {
            None => TickStatus::Delayed,
            Some(p) if p >= 1.0 => {
                self.apply_clip(live.to, Some(session));
                self.end_session(EndReason::Completed);
                TickStatus::Finished
            }
            Some(p) => {
                let size = live.size_at(live.easing.sample(p));
                self.apply_clip(size, Some(session));
                TickStatus::Running { progress: p }
            }
        }
    }

    /// Stops the live session, leaving the clip where it is.
    ///
    /// Returns the cancelled session, or `None` if nothing was running.
    pub fn cancel(&mut self) -> Option<SessionId> {
        self.end_session(EndReason::Cancelled)
    }

    /// Stops the live session and makes the whole host visible immediately.
    pub fn reset(&mut self) {
        self.end_session(EndReason::Reset);
        let size = self.host.size();
        self.apply_clip(size, None);
    }

    /// Reacts to a host size change.
    ///
    /// If the surface was fully visible, the clip follows the new size so it
    /// stays fully visible. Otherwise the clip is left alone.
    ///
    /// Update the host before reporting the change: visibility is checked
    /// against [`LayoutHost::size`].
    pub fn on_host_resized(&mut self, resize: HostResize) {
        let synced = self.fully_visible;
        if synced {
            self.apply_clip(resize.new, None);
        }
        let event = HostResizeEvent {
            old: resize.old,
            new: resize.new,
            synced,
        };
        self.tracer().host_resize(&event);
    }

    fn apply_clip(&mut self, size: SurfaceSize, source: Option<SessionId>) {
        let host = self.host.size();
        self.clip.right = size.width;
        self.clip.bottom = size.height;
        self.fully_visible = self.clip.covers(host);

        let mask = MaskUpdate::new(self.clip, host, self.config.corner_radius);
        self.renderer.invalidate_mask(&mask);

        let event = ClipChangeEvent {
            session: source,
            clip: self.clip,
            fully_visible: self.fully_visible,
        };
        self.tracer().clip_change(&event);
    }

    fn end_session(&mut self, reason: EndReason) -> Option<SessionId> {
        let session = self.session.take()?;
        self.scheduler.cancel_ticks(session.handle);
        let event = SessionEndEvent {
            session: session.id,
            reason,
            clip: self.clip,
        };
        self.tracer().session_end(&event);
        Some(session.id)
    }

    fn tracer(&mut self) -> Tracer<'_> {
        Tracer::new(&mut self.trace)
    }
}

impl<H, M, T> ClipAnimator<H, M, FrameScheduler, T>
where
    H: LayoutHost,
    M: MaskRenderer,
    T: TraceSink,
{
    /// Delivers one tick at `now` to the registered session.
    ///
    /// Returns `None` when no session is registered.
    pub fn run_frame(&mut self, now: HostTime) -> Option<TickStatus> {
        let session = self.scheduler.registered().next()?;
        Some(self.on_tick(session, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::ClipShape;
    use alloc::vec::Vec;

    const MS: u64 = 1_000_000;
    const HOST: SurfaceSize = SurfaceSize::new(300, 200);

    #[derive(Debug, Default)]
    struct RecordingRenderer {
        masks: Vec<MaskUpdate>,
    }

    impl MaskRenderer for RecordingRenderer {
        fn invalidate_mask(&mut self, mask: &MaskUpdate) {
            self.masks.push(*mask);
        }
    }

    type TestAnimator = ClipAnimator<SurfaceSize, RecordingRenderer>;

    fn linear() -> TestAnimator {
        ClipAnimator::new(HOST, RecordingRenderer::default(), FrameScheduler::new())
            .with_config(AnimatorConfig::new().easing(Easing::Linear))
    }

    /// Host time `ms` milliseconds after an arbitrary epoch.
    fn at(ms: u64) -> HostTime {
        HostTime(5_000 * MS + ms * MS)
    }

    fn size(a: &TestAnimator) -> (i32, i32) {
        (a.clipped_width(), a.clipped_height())
    }

    #[test]
    fn starts_empty_and_hidden() {
        let a = linear();
        assert_eq!(a.clip(), ClipRect::EMPTY);
        assert!(!a.is_fully_visible());
        assert!(!a.is_animating());
        assert_eq!(a.config().duration_ms, AnimatorConfig::DEFAULT_DURATION_MS);
    }

    #[test]
    fn visibility_tracks_exact_host_match() {
        let mut a = linear();
        for w in [0, 1, 150, 299, 300] {
            for h in [0, 1, 100, 199, 200] {
                a.set_clipped_size(w, h);
                let expected = w == 300 && h == 200;
                assert_eq!(a.is_fully_visible(), expected, "{w}x{h}");
                assert_eq!(a.clip(), ClipRect::from_size(SurfaceSize::new(w, h)));
            }
        }
    }

    #[test]
    fn degenerate_sizes_are_accepted_but_hidden() {
        let mut a = linear();
        a.set_clipped_size(-10, 200);
        assert_eq!(a.clipped_width(), -10);
        assert!(!a.is_fully_visible());
        a.set_clipped_size(301, 200);
        assert!(!a.is_fully_visible());

        let mut empty_host =
            ClipAnimator::new(SurfaceSize::ZERO, RecordingRenderer::default(), FrameScheduler::new());
        empty_host.reset();
        assert!(!empty_host.is_fully_visible(), "empty host is never fully visible");
    }

    #[test]
    fn set_clipped_size_is_idempotent_and_never_animates() {
        let mut a = linear();
        a.set_clipped_size(120, 80);
        let first = a.clip();
        a.set_clipped_size(120, 80);
        assert_eq!(a.clip(), first);
        assert!(!a.is_animating());
        assert!(a.scheduler().is_idle());
        assert_eq!(a.renderer().masks.len(), 2, "each call invalidates the mask");
        assert_eq!(a.renderer().masks[0], a.renderer().masks[1]);
    }

    #[test]
    fn reset_always_reveals_everything() {
        let mut a = linear();
        a.reset();
        assert!(a.is_fully_visible());
        assert_eq!(a.clip(), ClipRect::from_size(HOST));

        a.set_clipped_size(10, 10);
        a.animate_to(0, 0);
        a.run_frame(at(0));
        a.run_frame(at(100));
        a.reset();
        assert!(a.is_fully_visible());
        assert_eq!(a.clip(), ClipRect::from_size(HOST));
        assert!(!a.is_animating());
        assert!(a.scheduler().is_idle());
    }

    #[test]
    fn linear_reveal_hits_quarter_points() {
        let mut a = linear();
        a.animate_to(300, 200);

        assert_eq!(a.run_frame(at(0)), Some(TickStatus::Running { progress: 0.0 }));
        assert_eq!(size(&a), (0, 0));
        assert!(!a.is_fully_visible());

        assert_eq!(a.run_frame(at(125)), Some(TickStatus::Running { progress: 0.5 }));
        assert_eq!(size(&a), (150, 100));

        assert_eq!(a.run_frame(at(250)), Some(TickStatus::Finished));
        assert_eq!(size(&a), (300, 200));
        assert!(a.is_fully_visible());
        assert!(!a.is_animating());
        assert!(a.scheduler().is_idle());
    }

    #[test]
    fn final_tick_lands_exactly_on_target() {
        let mut a = ClipAnimator::new(HOST, RecordingRenderer::default(), FrameScheduler::new());
        a.set_clipped_size(7, 3);
        a.animate_to(233, 191);

        let mut t = 0;
        let status = loop {
            let status = a.run_frame(at(t)).expect("session stays registered until done");
            if status.is_finished() {
                break status;
            }
            t += 16;
        };
        assert!(status.is_finished());
        assert!(t >= 250, "finished early at {t}ms");
        assert_eq!(a.clip(), ClipRect::from_size(SurfaceSize::new(233, 191)));
        assert_eq!(a.run_frame(at(t + 16)), None);
    }

    #[test]
    fn late_tick_past_duration_still_lands_on_target() {
        let mut a = linear();
        a.animate_to(300, 200);
        a.run_frame(at(0));
        assert_eq!(a.run_frame(at(10_000)), Some(TickStatus::Finished));
        assert_eq!(a.clip(), ClipRect::from_size(HOST));
    }

    #[test]
    fn new_session_cancels_previous_one() {
        let mut a = linear();
        let first = a.animate_to(300, 200);
        a.on_tick(first, at(0));
        a.on_tick(first, at(125));
        assert_eq!(size(&a), (150, 100));

        let second = a.animate_to(0, 0);
        assert_ne!(first, second);
        assert_eq!(a.active_session(), Some(second));
        assert_eq!(a.scheduler().len(), 1);

        let masks_before = a.renderer().masks.len();
        assert!(a.on_tick(first, at(200)).is_stale());
        assert!(a.on_tick(first, at(250)).is_stale());
        assert_eq!(size(&a), (150, 100), "stale ticks must not move the clip");
        assert_eq!(a.renderer().masks.len(), masks_before);

        let live = a.on_tick(second, at(300));
        assert!(!live.is_stale());
        assert_eq!(live, TickStatus::Running { progress: 0.0 });
        assert_eq!(a.run_frame(at(425)), Some(TickStatus::Running { progress: 0.5 }));
        assert_eq!(size(&a), (75, 50), "second session starts where the first stopped");
    }

    #[test]
    fn ticks_after_completion_are_stale() {
        let mut a = linear();
        let id = a.animate_to_with(HOST, AnimateOptions::new().duration_ms(0));
        assert_eq!(a.on_tick(id, at(0)), TickStatus::Finished);
        assert_eq!(a.on_tick(id, at(16)), TickStatus::Stale);
        assert_eq!(a.on_tick(SessionId(0), at(32)), TickStatus::Stale);
    }

    #[test]
    fn cancel_freezes_clip_mid_animation() {
        let mut a = linear();
        let id = a.animate_to(300, 200);
        a.run_frame(at(0));
        a.run_frame(at(50));
        let frozen = a.clip();

        assert_eq!(a.cancel(), Some(id));
        assert_eq!(a.clip(), frozen);
        assert!(!a.is_animating());
        assert!(a.scheduler().is_idle());
        assert_eq!(a.on_tick(id, at(100)), TickStatus::Stale);
        assert_eq!(a.clip(), frozen);
    }

    #[test]
    fn cancel_without_session_is_a_no_op() {
        let mut a = linear();
        assert_eq!(a.cancel(), None);
        assert_eq!(a.cancel(), None);
        assert_eq!(a.clip(), ClipRect::EMPTY);
        assert!(a.renderer().masks.is_empty());
    }

    #[test]
    fn start_delay_holds_the_clip() {
        let mut a = linear().with_config(
            AnimatorConfig::new()
                .easing(Easing::Linear)
                .start_delay_ms(100),
        );
        a.animate_to(300, 200);

        assert_eq!(a.run_frame(at(0)), Some(TickStatus::Delayed));
        assert_eq!(a.run_frame(at(50)), Some(TickStatus::Delayed));
        assert!(a.renderer().masks.is_empty(), "no clip writes during the delay");

        assert_eq!(a.run_frame(at(100)), Some(TickStatus::Running { progress: 0.0 }));
        assert_eq!(a.run_frame(at(225)), Some(TickStatus::Running { progress: 0.5 }));
        assert_eq!(size(&a), (150, 100));
        assert_eq!(a.run_frame(at(350)), Some(TickStatus::Finished));
        assert!(a.is_fully_visible());
    }

    #[test]
    fn per_call_overrides_win() {
        let mut a = linear();
        a.animate_to_with(
            SurfaceSize::new(300, 200),
            AnimateOptions::new().duration_ms(100).start_delay_ms(20),
        );
        assert_eq!(a.run_frame(at(0)), Some(TickStatus::Delayed));
        assert_eq!(a.run_frame(at(70)), Some(TickStatus::Running { progress: 0.5 }));
        assert_eq!(a.run_frame(at(120)), Some(TickStatus::Finished));
    }

    #[test]
    fn duration_change_applies_to_later_sessions() {
        let mut a = linear();
        a.animate_to(300, 200);
        a.set_duration_ms(1_000);
        a.run_frame(at(0));
        assert_eq!(a.run_frame(at(250)), Some(TickStatus::Finished));

        a.animate_to(0, 0);
        a.run_frame(at(300));
        assert_eq!(a.run_frame(at(800)), Some(TickStatus::Running { progress: 0.5 }));
    }

    #[test]
    fn default_easing_is_not_linear() {
        let mut a = ClipAnimator::new(HOST, RecordingRenderer::default(), FrameScheduler::new());
        assert_eq!(a.easing(), Easing::FastOutSlowIn);
        a.animate_to(300, 200);
        a.run_frame(at(0));
        a.run_frame(at(25));
        assert!(a.clipped_width() < 30, "slow start, got {}", a.clipped_width());
        a.run_frame(at(175));
        assert!(a.clipped_width() > 210, "fast middle, got {}", a.clipped_width());
    }

    #[test]
    fn resize_while_fully_visible_follows_host() {
        let mut a = linear();
        a.reset();
        let new = SurfaceSize::new(400, 250);
        *a.host_mut() = new;
        a.on_host_resized(HostResize { old: HOST, new });
        assert_eq!(a.clip(), ClipRect::from_size(new));
        assert!(a.is_fully_visible());
    }

    #[test]
    fn resize_while_clipped_is_ignored() {
        let mut a = linear();
        a.set_clipped_size(150, 100);
        let masks_before = a.renderer().masks.len();
        let new = SurfaceSize::new(400, 250);
        *a.host_mut() = new;
        a.on_host_resized(HostResize { old: HOST, new });
        assert_eq!(a.clip(), ClipRect::from_size(SurfaceSize::new(150, 100)));
        assert!(!a.is_fully_visible());
        assert_eq!(a.renderer().masks.len(), masks_before);
    }

    #[test]
    fn collapse_hides_the_surface() {
        let mut a = linear();
        a.reset();
        a.animate_to(0, 0);
        assert_eq!(a.run_frame(at(0)), Some(TickStatus::Running { progress: 0.0 }));
        assert_eq!(size(&a), (300, 200), "first tick holds the start size");
        assert!(a.is_fully_visible(), "still covers the host at progress 0");

        a.run_frame(at(125));
        assert_eq!(size(&a), (150, 100));
        assert!(!a.is_fully_visible(), "partial clip hides the surface");

        assert_eq!(a.run_frame(at(250)), Some(TickStatus::Finished));
        assert_eq!(a.clip(), ClipRect::EMPTY);
        assert!(!a.is_fully_visible());
    }

    #[test]
    fn mask_tracks_clip_alpha_and_corners() {
        let mut a = linear().with_config(AnimatorConfig::new().corner_radius(12.0));
        a.set_clipped_size(300, 50);
        let mask = *a.renderer().masks.last().expect("mask invalidated");
        assert_eq!(mask.clip, ClipRect::from_size(SurfaceSize::new(300, 50)));
        assert_eq!(mask.alpha, 0.25);
        match mask.shape {
            ClipShape::RoundedRect(r) => {
                assert_eq!(r.rect(), kurbo::Rect::new(0.0, 0.0, 300.0, 50.0));
            }
            other => panic!("expected rounded mask, got {other:?}"),
        }
    }

    #[test]
    fn active_target_reports_live_session() {
        let mut a = linear();
        assert_eq!(a.active_target(), None);
        a.animate_to(120, 40);
        assert_eq!(a.active_target(), Some(SurfaceSize::new(120, 40)));
        a.cancel();
        assert_eq!(a.active_target(), None);
    }

    #[test]
    fn into_parts_returns_collaborators() {
        let mut a = linear();
        a.set_clipped_size(1, 1);
        let (host, renderer, scheduler, _trace) = a.into_parts();
        assert_eq!(host, HOST);
        assert_eq!(renderer.masks.len(), 1);
        assert!(scheduler.is_idle());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn trace_reports_session_lifecycle() {
        #[derive(Default)]
        struct Lifecycle {
            starts: Vec<SessionStartEvent>,
            ends: Vec<SessionEndEvent>,
            stale: Vec<StaleTickEvent>,
            clip_writes: usize,
        }
        impl TraceSink for Lifecycle {
            fn on_session_start(&mut self, e: &SessionStartEvent) {
                self.starts.push(*e);
            }
            fn on_session_end(&mut self, e: &SessionEndEvent) {
                self.ends.push(*e);
            }
            fn on_stale_tick(&mut self, e: &StaleTickEvent) {
                self.stale.push(*e);
            }
            fn on_clip_change(&mut self, _: &ClipChangeEvent) {
                self.clip_writes += 1;
            }
        }

        let mut a = linear().with_trace_sink(Lifecycle::default());
        let first = a.animate_to(300, 200);
        a.run_frame(at(0));
        let second = a.animate_to(0, 0);
        a.on_tick(first, at(16));
        a.run_frame(at(32));
        a.cancel();
        let third = a.animate_to_with(HOST, AnimateOptions::new().duration_ms(0));
        a.run_frame(at(48));
        a.reset();

        let sink = a.trace_sink();
        assert_eq!(sink.starts.len(), 3);
        assert_eq!(sink.starts[1].from, SurfaceSize::ZERO);
        let ends: Vec<_> = sink.ends.iter().map(|e| (e.session, e.reason)).collect();
        assert_eq!(
            ends,
            [
                (first, EndReason::Superseded),
                (second, EndReason::Cancelled),
                (third, EndReason::Completed),
            ]
        );
        assert_eq!(sink.stale.len(), 1);
        assert_eq!(sink.stale[0].active, Some(second));
        assert_eq!(sink.clip_writes, 4);
    }
}
