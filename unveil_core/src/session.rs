// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation session state and timeline math.

use core::fmt;

use crate::clip::SurfaceSize;
use crate::easing::Easing;
use crate::host::TickHandle;
use crate::time::{Duration, HostTime};

/// Identifies one animation session.
///
/// Ids increase monotonically per animator, so a tick carrying an id other
/// than the live session's is stale.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SessionId(pub u64);

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

/// One in-flight transition of the clip from `from` to `to`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AnimationSession {
    pub(crate) id: SessionId,
    pub(crate) from: SurfaceSize,
    pub(crate) to: SurfaceSize,
    pub(crate) duration: Duration,
    pub(crate) delay: Duration,
    pub(crate) easing: Easing,
    pub(crate) handle: TickHandle,
    /// Host time of the first delivered tick.
    pub(crate) origin: Option<HostTime>,
    pub(crate) elapsed: Duration,
}

impl AnimationSession {
    /// Advances the elapsed-time accumulator to `now`.
    pub(crate) fn advance(&mut self, now: HostTime) -> Duration {
        let origin = *self.origin.get_or_insert(now);
        let elapsed = now.saturating_duration_since(origin);
        // Out-of-order ticks never move the timeline backwards.
        if elapsed > self.elapsed {
            self.elapsed = elapsed;
        }
        self.elapsed
    }

    /// The clip size at eased progress `eased`.
    pub(crate) fn size_at(&self, eased: f64) -> SurfaceSize {
        SurfaceSize::new(
            lerp_round(self.from.width, self.to.width, eased),
            lerp_round(self.from.height, self.to.height, eased),
        )
    }
}

/// Normalized timeline progress, or `None` while the start delay has not yet
/// elapsed.
///
/// A zero duration jumps straight to `1.0` once the delay has passed.
#[must_use]
pub fn normalized_progress(elapsed: Duration, delay: Duration, duration: Duration) -> Option<f64> {
    if elapsed < delay {
        return None;
    }
    if duration == Duration::ZERO {
        return Some(1.0);
    }
    let active = elapsed.saturating_sub(delay);
    Some((active.ticks() as f64 / duration.ticks() as f64).clamp(0.0, 1.0))
}

fn lerp_round(from: i32, to: i32, t: f64) -> i32 {
    let from = f64::from(from);
    let to = f64::from(to);
    round_half_away(from + (to - from) * t)
}

/// Rounds half away from zero, saturating at the `i32` range.
#[expect(
    clippy::cast_possible_truncation,
    reason = "value is already rounded; `as` saturates out-of-range values"
)]
fn round_half_away(v: f64) -> i32 {
    if v >= 0.0 {
        (v + 0.5) as i32
    } else {
        (v - 0.5) as i32
    }
}
