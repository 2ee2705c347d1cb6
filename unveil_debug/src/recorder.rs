// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`], and [`RecordedEvent::replay`] feeds a
//! decoded event into any other sink.

use unveil_core::clip::{ClipRect, SurfaceSize};
use unveil_core::session::SessionId;
use unveil_core::time::{Duration, HostTime};
use unveil_core::trace::{
    ClipChangeEvent, EndReason, HostResizeEvent, SessionEndEvent, SessionStartEvent,
    SessionTickEvent, StaleTickEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_SESSION_START: u8 = 1;
const TAG_SESSION_TICK: u8 = 2;
const TAG_CLIP_CHANGE: u8 = 3;
const TAG_SESSION_END: u8 = 4;
const TAG_STALE_TICK: u8 = 5;
const TAG_HOST_RESIZE: u8 = 6;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_option_u64(&mut self, v: Option<u64>) {
        match v {
            Some(val) => {
                self.write_u8(1);
                self.write_u64(val);
            }
            None => {
                self.write_u8(0);
                self.write_u64(0);
            }
        }
    }

    fn write_option_f64(&mut self, v: Option<f64>) {
        self.write_option_u64(v.map(f64::to_bits));
    }

    fn write_size(&mut self, s: SurfaceSize) {
        self.write_i32(s.width);
        self.write_i32(s.height);
    }

    fn write_clip(&mut self, c: ClipRect) {
        self.write_i32(c.left);
        self.write_i32(c.top);
        self.write_i32(c.right);
        self.write_i32(c.bottom);
    }

    fn write_reason(&mut self, r: EndReason) {
        self.write_u8(match r {
            EndReason::Completed => 0,
            EndReason::Cancelled => 1,
            EndReason::Superseded => 2,
            EndReason::Reset => 3,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_session_start(&mut self, e: &SessionStartEvent) {
        self.write_u8(TAG_SESSION_START);
        self.write_u64(e.session.0);
        self.write_size(e.from);
        self.write_size(e.to);
        self.write_u64(e.duration.ticks());
        self.write_u64(e.delay.ticks());
    }

    fn on_session_tick(&mut self, e: &SessionTickEvent) {
        self.write_u8(TAG_SESSION_TICK);
        self.write_u64(e.session.0);
        self.write_u64(e.now.ticks());
        self.write_u64(e.elapsed.ticks());
        self.write_option_f64(e.progress);
    }

    fn on_clip_change(&mut self, e: &ClipChangeEvent) {
        self.write_u8(TAG_CLIP_CHANGE);
        self.write_option_u64(e.session.map(|s| s.0));
        self.write_clip(e.clip);
        self.write_bool(e.fully_visible);
    }

    fn on_session_end(&mut self, e: &SessionEndEvent) {
        self.write_u8(TAG_SESSION_END);
        self.write_u64(e.session.0);
        self.write_reason(e.reason);
        self.write_clip(e.clip);
    }

    fn on_stale_tick(&mut self, e: &StaleTickEvent) {
        self.write_u8(TAG_STALE_TICK);
        self.write_u64(e.session.0);
        self.write_option_u64(e.active.map(|s| s.0));
        self.write_u64(e.now.ticks());
    }

    fn on_host_resize(&mut self, e: &HostResizeEvent) {
        self.write_u8(TAG_HOST_RESIZE);
        self.write_size(e.old);
        self.write_size(e.new);
        self.write_bool(e.synced);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`SessionStartEvent`].
    SessionStart(SessionStartEvent),
    /// A [`SessionTickEvent`].
    SessionTick(SessionTickEvent),
    /// A [`ClipChangeEvent`].
    ClipChange(ClipChangeEvent),
    /// A [`SessionEndEvent`].
    SessionEnd(SessionEndEvent),
    /// A [`StaleTickEvent`].
    StaleTick(StaleTickEvent),
    /// A [`HostResizeEvent`].
    HostResize(HostResizeEvent),
}

impl RecordedEvent {
    /// Delivers this event to `sink` as if the animator had emitted it.
    pub fn replay(&self, sink: &mut dyn TraceSink) {
        match self {
            Self::SessionStart(e) => sink.on_session_start(e),
            Self::SessionTick(e) => sink.on_session_tick(e),
            Self::ClipChange(e) => sink.on_clip_change(e),
            Self::SessionEnd(e) => sink.on_session_end(e),
            Self::StaleTick(e) => sink.on_stale_tick(e),
            Self::HostResize(e) => sink.on_host_resize(e),
        }
    }
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first unknown tag or truncated record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[b]| b)
    }

    fn read_i32(&mut self) -> Option<i32> {
        self.take().map(i32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_bool(&mut self) -> Option<bool> {
        Some(self.read_u8()? != 0)
    }

    fn read_option_u64(&mut self) -> Option<Option<u64>> {
        let present = self.read_u8()?;
        let val = self.read_u64()?;
        Some(if present != 0 { Some(val) } else { None })
    }

    fn read_option_f64(&mut self) -> Option<Option<f64>> {
        Some(self.read_option_u64()?.map(f64::from_bits))
    }

    fn read_size(&mut self) -> Option<SurfaceSize> {
        Some(SurfaceSize::new(self.read_i32()?, self.read_i32()?))
    }

    fn read_clip(&mut self) -> Option<ClipRect> {
        Some(ClipRect {
            left: self.read_i32()?,
            top: self.read_i32()?,
            right: self.read_i32()?,
            bottom: self.read_i32()?,
        })
    }

    fn read_reason(&mut self) -> Option<EndReason> {
        Some(match self.read_u8()? {
            0 => EndReason::Completed,
            1 => EndReason::Cancelled,
            2 => EndReason::Superseded,
            3 => EndReason::Reset,
            _ => return None,
        })
    }

    fn decode_session_start(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::SessionStart(SessionStartEvent {
            session: SessionId(self.read_u64()?),
            from: self.read_size()?,
            to: self.read_size()?,
            duration: Duration(self.read_u64()?),
            delay: Duration(self.read_u64()?),
        }))
    }

    fn decode_session_tick(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::SessionTick(SessionTickEvent {
            session: SessionId(self.read_u64()?),
            now: HostTime(self.read_u64()?),
            elapsed: Duration(self.read_u64()?),
            progress: self.read_option_f64()?,
        }))
    }

    fn decode_clip_change(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ClipChange(ClipChangeEvent {
            session: self.read_option_u64()?.map(SessionId),
            clip: self.read_clip()?,
            fully_visible: self.read_bool()?,
        }))
    }

    fn decode_session_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::SessionEnd(SessionEndEvent {
            session: SessionId(self.read_u64()?),
            reason: self.read_reason()?,
            clip: self.read_clip()?,
        }))
    }

    fn decode_stale_tick(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::StaleTick(StaleTickEvent {
            session: SessionId(self.read_u64()?),
            active: self.read_option_u64()?.map(SessionId),
            now: HostTime(self.read_u64()?),
        }))
    }

    fn decode_host_resize(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::HostResize(HostResizeEvent {
            old: self.read_size()?,
            new: self.read_size()?,
            synced: self.read_bool()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_SESSION_START => self.decode_session_start(),
            TAG_SESSION_TICK => self.decode_session_tick(),
            TAG_CLIP_CHANGE => self.decode_clip_change(),
            TAG_SESSION_END => self.decode_session_end(),
            TAG_STALE_TICK => self.decode_stale_tick(),
            TAG_HOST_RESIZE => self.decode_host_resize(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
