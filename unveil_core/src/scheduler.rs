// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A registry-style [`TickScheduler`] for embedders without their own.
//!
//! [`FrameScheduler`] only records which sessions want ticks. The frame loop
//! asks it who is registered and delivers the tick itself, typically via
//! [`ClipAnimator::run_frame`](crate::animator::ClipAnimator::run_frame).

use alloc::vec::Vec;

use crate::host::{TickHandle, TickScheduler};
use crate::session::SessionId;

/// Records live tick registrations in registration order.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    registrations: Vec<(TickHandle, SessionId)>,
    next_handle: u64,
}

impl FrameScheduler {
    /// Creates a scheduler with no registrations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sessions that currently want ticks, oldest registration first.
    pub fn registered(&self) -> impl Iterator<Item = SessionId> + '_ {
        self.registrations.iter().map(|&(_, session)| session)
    }

    /// Whether no session wants ticks.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Number of live registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Whether there are no live registrations. Same as [`is_idle`](Self::is_idle).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_idle()
    }
}

impl TickScheduler for FrameScheduler {
    fn schedule_ticks(&mut self, session: SessionId) -> TickHandle {
        let handle = TickHandle(self.next_handle);
        self.next_handle += 1;
        self.registrations.push((handle, session));
        handle
    }

    fn cancel_ticks(&mut self, handle: TickHandle) {
        self.registrations.retain(|&(h, _)| h != handle);
    }
}
