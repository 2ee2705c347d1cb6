// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator contracts for embedding a [`ClipAnimator`].
//!
//! The animator never talks to a UI toolkit directly. An embedder supplies
//! three pieces:
//!
//! - **Layout host**: the surface being clipped. Implements [`LayoutHost`]
//!   to report its full size, and reports size changes back through
//!   [`ClipAnimator::on_host_resized`] as a [`HostResize`].
//!
//! - **Mask renderer**: implements [`MaskRenderer`] to apply clip bounds and
//!   redraw the rounded outline. It is a pure sink: nothing flows back.
//!
//! - **Tick scheduler**: implements [`TickScheduler`] to deliver one tick
//!   per frame to a registered session. The embedder's frame loop calls
//!   [`ClipAnimator::on_tick`] for each registered session;
//!   [`FrameScheduler`](crate::scheduler::FrameScheduler) is a ready-made
//!   registry for loops that do not have their own.
//!
//! # Frame loop pseudocode
//!
//! ```rust,ignore
//! fn on_frame(now: HostTime) {
//!     // Deliver one tick to the live session, if any.
//!     if let Some(status) = animator.run_frame(now) {
//!         if status.is_finished() {
//!             // The clip now equals the animation target.
//!         }
//!     }
//! }
//!
//! fn on_layout(old: SurfaceSize, new: SurfaceSize) {
//!     *animator.host_mut() = new;
//!     animator.on_host_resized(HostResize { old, new });
//! }
//! ```
//!
//! [`ClipAnimator`]: crate::animator::ClipAnimator
//! [`ClipAnimator::on_host_resized`]: crate::animator::ClipAnimator::on_host_resized
//! [`ClipAnimator::on_tick`]: crate::animator::ClipAnimator::on_tick

use core::fmt;

use crate::clip::{MaskUpdate, SurfaceSize};
use crate::session::SessionId;

/// The surface whose content is being clipped.
pub trait LayoutHost {
    /// The surface's current full size.
    fn size(&self) -> SurfaceSize;
}

/// A fixed-size host.
impl LayoutHost for SurfaceSize {
    fn size(&self) -> SurfaceSize {
        *self
    }
}

/// A size change reported by the layout host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HostResize {
    /// Size before the change.
    pub old: SurfaceSize,
    /// Size after the change.
    pub new: SurfaceSize,
}

/// Draws the clip bounds and mask outline.
pub trait MaskRenderer {
    /// Called after every clip change with the new clip and its mask.
    fn invalidate_mask(&mut self, mask: &MaskUpdate);
}

/// Identifies one tick registration made with a [`TickScheduler`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TickHandle(pub u64);

impl fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TickHandle({})", self.0)
    }
}

/// Delivers per-frame ticks to animation sessions.
///
/// While a registration is live, the embedder calls
/// [`ClipAnimator::on_tick`](crate::animator::ClipAnimator::on_tick) once per
/// frame with the registered [`SessionId`], in strictly increasing time
/// order.
pub trait TickScheduler {
    /// Starts delivering ticks for `session` and returns a handle that
    /// cancels the registration.
    fn schedule_ticks(&mut self, session: SessionId) -> TickHandle;

    /// Stops delivering ticks for the registration. Unknown handles are
    /// ignored.
    fn cancel_ticks(&mut self, handle: TickHandle);
}
