// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Each session becomes an async slice (`b`/`e`) keyed by its id, clip sizes
//! become `ClipWidth`/`ClipHeight` counters, and ticks, stale ticks, and
//! resizes become instant events. Session starts, ends, clip changes, and
//! resizes carry no timestamp of their own; they are placed at the most
//! recent tick time seen in the recording.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use unveil_core::time::Timebase;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Timestamps are converted to microseconds using the provided [`Timebase`].
pub fn export(bytes: &[u8], timebase: Timebase, writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let mut last_us = 0.0;

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::SessionStart(e) => {
                events.push(json!({
                    "ph": "b",
                    "name": "Session",
                    "cat": "Animation",
                    "id": e.session.0,
                    "ts": last_us,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "from": format!("{:?}", e.from),
                        "to": format!("{:?}", e.to),
                        "duration_ms": e.duration.as_millis_f64(timebase),
                        "delay_ms": e.delay.as_millis_f64(timebase),
                    }
                }));
            }
            RecordedEvent::SessionTick(e) => {
                last_us = ticks_to_us(e.now.ticks(), timebase);
                events.push(json!({
                    "ph": "i",
                    "name": "Tick",
                    "cat": "Animation",
                    "ts": last_us,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "session": e.session.0,
                        "elapsed_ms": e.elapsed.as_millis_f64(timebase),
                        "progress": e.progress,
                    }
                }));
            }
            RecordedEvent::ClipChange(e) => {
                events.push(json!({
                    "ph": "C",
                    "name": "ClipWidth",
                    "cat": "Clip",
                    "ts": last_us,
                    "pid": 0,
                    "args": { "width": e.clip.width() }
                }));
                events.push(json!({
                    "ph": "C",
                    "name": "ClipHeight",
                    "cat": "Clip",
                    "ts": last_us,
                    "pid": 0,
                    "args": { "height": e.clip.height() }
                }));
            }
            RecordedEvent::SessionEnd(e) => {
                events.push(json!({
                    "ph": "e",
                    "name": "Session",
                    "cat": "Animation",
                    "id": e.session.0,
                    "ts": last_us,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "reason": format!("{:?}", e.reason),
                        "clip": format!("{}x{}", e.clip.width(), e.clip.height()),
                    }
                }));
            }
            RecordedEvent::StaleTick(e) => {
                last_us = ticks_to_us(e.now.ticks(), timebase);
                events.push(json!({
                    "ph": "i",
                    "name": "StaleTick",
                    "cat": "Animation",
                    "ts": last_us,
                    "pid": 0,
                    "tid": 0,
                    "s": "p",
                    "args": {
                        "session": e.session.0,
                        "active": e.active.map(|s| s.0),
                    }
                }));
            }
            RecordedEvent::HostResize(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "HostResize",
                    "cat": "Host",
                    "ts": last_us,
                    "pid": 0,
                    "tid": 0,
                    "s": "p",
                    "args": {
                        "old": format!("{:?}", e.old),
                        "new": format!("{:?}", e.new),
                        "synced": e.synced,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn ticks_to_us(ticks: u64, timebase: Timebase) -> f64 {
    timebase.ticks_to_nanos(ticks) as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use unveil_core::clip::{ClipRect, SurfaceSize};
    use unveil_core::session::SessionId;
    use unveil_core::time::{Duration, HostTime};
    use unveil_core::trace::{
        ClipChangeEvent, EndReason, HostResizeEvent, SessionEndEvent, SessionStartEvent,
        SessionTickEvent, StaleTickEvent, TraceSink,
    };

    fn export_to_values(rec: &RecorderSink) -> Vec<Value> {
        let mut out = Vec::new();
        export(rec.as_bytes(), Timebase::NANOS, &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        serde_json::from_str(&json_str).unwrap()
    }

    #[test]
    fn export_session_lifecycle() {
        let mut rec = RecorderSink::new();
        rec.on_session_start(&SessionStartEvent {
            session: SessionId(1),
            from: SurfaceSize::ZERO,
            to: SurfaceSize::new(300, 200),
            duration: Duration(250_000_000),
            delay: Duration::ZERO,
        });
        rec.on_session_tick(&SessionTickEvent {
            session: SessionId(1),
            now: HostTime(2_000_000),
            elapsed: Duration::ZERO,
            progress: Some(0.0),
        });
        rec.on_clip_change(&ClipChangeEvent {
            session: Some(SessionId(1)),
            clip: ClipRect::from_size(SurfaceSize::new(30, 20)),
            fully_visible: false,
        });
        rec.on_session_end(&SessionEndEvent {
            session: SessionId(1),
            reason: EndReason::Cancelled,
            clip: ClipRect::from_size(SurfaceSize::new(30, 20)),
        });

        let parsed = export_to_values(&rec);
        assert_eq!(parsed.len(), 5);

        assert_eq!(parsed[0]["ph"], "b");
        assert_eq!(parsed[0]["id"], 1);
        assert_eq!(parsed[0]["args"]["to"], "300x200");

        assert_eq!(parsed[1]["ph"], "i");
        assert_eq!(parsed[1]["ts"], 2000.0);

        assert_eq!(parsed[2]["ph"], "C");
        assert_eq!(parsed[2]["name"], "ClipWidth");
        assert_eq!(parsed[2]["args"]["width"], 30);
        assert_eq!(parsed[3]["name"], "ClipHeight");
        assert_eq!(parsed[3]["args"]["height"], 20);
        assert_eq!(parsed[3]["ts"], 2000.0, "clip change takes the tick's time");

        assert_eq!(parsed[4]["ph"], "e");
        assert_eq!(parsed[4]["id"], 1);
        assert_eq!(parsed[4]["args"]["reason"], "Cancelled");
    }

    #[test]
    fn export_stale_tick_and_resize() {
        let mut rec = RecorderSink::new();
        rec.on_stale_tick(&StaleTickEvent {
            session: SessionId(1),
            active: None,
            now: HostTime(5_000),
        });
        rec.on_host_resize(&HostResizeEvent {
            old: SurfaceSize::new(300, 200),
            new: SurfaceSize::new(400, 250),
            synced: true,
        });

        let parsed = export_to_values(&rec);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["name"], "StaleTick");
        assert_eq!(parsed[0]["args"]["active"], Value::Null);
        assert_eq!(parsed[0]["ts"], 5.0);
        assert_eq!(parsed[1]["name"], "HostResize");
        assert_eq!(parsed[1]["ts"], 5.0);
        assert_eq!(parsed[1]["args"]["synced"], true);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], Timebase::NANOS, &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
