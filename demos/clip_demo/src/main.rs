// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated frame loop that drives a clip reveal through its lifecycle.
//!
//! Expands a 300x200 surface, interrupts a collapse halfway with a new
//! reveal, resizes the host while it is fully visible, then clips it by hand
//! and resets. Events are recorded with a
//! [`RecorderSink`](unveil_debug::recorder::RecorderSink), replayed into a
//! [`PrettyPrintSink`](unveil_debug::pretty::PrettyPrintSink) on stdout, and
//! exported as a Chrome trace JSON file.

use std::fs::File;
use std::io::BufWriter;

use unveil_core::animator::{AnimatorConfig, ClipAnimator, TickStatus};
use unveil_core::clip::{MaskUpdate, SurfaceSize};
use unveil_core::host::{HostResize, LayoutHost, MaskRenderer};
use unveil_core::scheduler::FrameScheduler;
use unveil_core::time::{HostTime, Timebase};

use unveil_debug::pretty::PrettyPrintSink;
use unveil_debug::recorder::{RecorderSink, decode};

/// 16.6ms refresh interval in nanoseconds (≈60 Hz).
const REFRESH_INTERVAL_NS: u64 = 16_666_667;
const CORNER_RADIUS: f64 = 12.0;

/// A surface whose layout size the demo changes by hand.
#[derive(Debug)]
struct Surface {
    size: SurfaceSize,
}

impl LayoutHost for Surface {
    fn size(&self) -> SurfaceSize {
        self.size
    }
}

/// Counts mask invalidations and remembers the last one.
#[derive(Debug, Default)]
struct OutlineRenderer {
    invalidations: usize,
    last: Option<MaskUpdate>,
}

impl MaskRenderer for OutlineRenderer {
    fn invalidate_mask(&mut self, mask: &MaskUpdate) {
        self.invalidations += 1;
        self.last = Some(*mask);
    }
}

type Animator<'a> = ClipAnimator<Surface, OutlineRenderer, FrameScheduler, &'a mut RecorderSink>;

/// Simulated display clock.
struct Clock {
    now: u64,
}

impl Clock {
    fn frame(&mut self) -> HostTime {
        let now = HostTime(self.now);
        self.now += REFRESH_INTERVAL_NS;
        now
    }
}

/// Runs frames until the live session finishes. Returns the frame count.
fn run_to_completion(animator: &mut Animator<'_>, clock: &mut Clock) -> usize {
    let mut frames = 0;
    while let Some(status) = animator.run_frame(clock.frame()) {
        frames += 1;
        if status.is_finished() {
            break;
        }
    }
    frames
}

fn resize(animator: &mut Animator<'_>, new: SurfaceSize) {
    let old = animator.host().size;
    animator.host_mut().size = new;
    animator.on_host_resized(HostResize { old, new });
}

fn main() {
    let timebase = Timebase::NANOS;
    let mut recorder = RecorderSink::new();
    let mut clock = Clock {
        now: 1_000_000_000, // start at 1s
    };

    let surface = Surface {
        size: SurfaceSize::new(300, 200),
    };
    let config = AnimatorConfig::new()
        .corner_radius(CORNER_RADIUS)
        .timebase(timebase);
    let mut animator = ClipAnimator::new(surface, OutlineRenderer::default(), FrameScheduler::new())
        .with_config(config)
        .with_trace_sink(&mut recorder);

    // 1. Reveal from nothing.
    animator.animate_to(300, 200);
    let frames = run_to_completion(&mut animator, &mut clock);
    assert!(animator.is_fully_visible(), "reveal should end fully visible");
    println!("reveal finished after {frames} frames");

    // 2. Start collapsing, then change our mind halfway.
    let collapse = animator.animate_to(0, 0);
    for _ in 0..8 {
        animator.run_frame(clock.frame());
    }
    let interrupted_at = animator.clip().size();
    animator.animate_to(300, 200);
    // A frame callback queued for the old session arrives late.
    let status = animator.on_tick(collapse, clock.frame());
    assert_eq!(status, TickStatus::Stale, "superseded session must be rejected");
    let frames = run_to_completion(&mut animator, &mut clock);
    println!("collapse interrupted at {interrupted_at:?}, re-reveal took {frames} frames");

    // 3. Host grows while fully visible: the clip follows.
    resize(&mut animator, SurfaceSize::new(400, 250));
    assert!(animator.is_fully_visible(), "clip should follow the host");

    // 4. Clip by hand; a resize now leaves the clip alone until reset.
    animator.set_clipped_size(150, 100);
    resize(&mut animator, SurfaceSize::new(420, 260));
    assert_eq!(
        animator.clip().size(),
        SurfaceSize::new(150, 100),
        "resize while clipped is ignored"
    );
    animator.reset();
    assert!(animator.is_fully_visible(), "reset reveals the whole host");

    let (_, renderer, _, _) = animator.into_parts();
    if let Some(mask) = renderer.last {
        println!(
            "{} mask invalidations, last {:?} alpha={}",
            renderer.invalidations,
            mask.shape.bounds(),
            mask.alpha,
        );
    }

    // -- replay to stdout --------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()), timebase);
    let mut events = 0;
    for event in decode(recorder.as_bytes()) {
        event.replay(&mut pretty);
        events += 1;
    }

    // -- export Chrome trace -----------------------------------------------
    let path = "clip_trace.json";
    let file = File::create(path).expect("failed to create clip_trace.json");
    let mut writer = BufWriter::new(file);
    unveil_debug::chrome::export(recorder.as_bytes(), timebase, &mut writer)
        .expect("failed to write Chrome trace");

    println!("Wrote {path} ({events} events)");
}
