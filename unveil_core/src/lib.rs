// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clip-based reveal and hide animations.
//!
//! `unveil_core` animates how much of a surface is visible without ever
//! changing the surface's layout size. The surface keeps its full measured
//! bounds; each frame moves the right and bottom edges of an origin-anchored
//! clip rectangle and asks a renderer to redraw the mask outline. It is
//! `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   animate_to(w, h) ──► AnimationSession ──► TickScheduler::schedule_ticks()
//!                                                    │
//!                 ┌──────────────────────────────────┘
//!                 ▼
//!   on_tick(session, now) ──► Easing::sample() ──► ClipRect
//!                                                    │
//!                 ┌──────────────────────────────────┘
//!                 ▼
//!   MaskUpdate ──► MaskRenderer::invalidate_mask()
//! ```
//!
//! **[`animator`]**: [`ClipAnimator`](animator::ClipAnimator), the state
//! machine that owns the clip, the fully-visible flag, and at most one live
//! animation session.
//!
//! **[`clip`]**: Integer sizes, the origin-anchored clip rectangle, and the
//! mask shape handed to renderers.
//!
//! **[`easing`]**: Progress curves, including the default fast-out-slow-in
//! cubic Bézier.
//!
//! **[`host`]**: The collaborator traits an embedder implements: layout
//! host, mask renderer, and tick scheduler.
//!
//! **[`scheduler`]**: [`FrameScheduler`](scheduler::FrameScheduler), a tick
//! registry for frame loops that do not bring their own.
//!
//! **[`session`]**: Session ids and timeline math.
//!
//! **[`time`]**: Host timestamps, durations, and timebase conversion.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! animation instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod animator;
pub mod clip;
pub mod easing;
pub mod host;
pub mod scheduler;
pub mod session;
pub mod time;
pub mod trace;
