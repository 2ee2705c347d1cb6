// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing curves mapping linear progress to eased progress.
//!
//! Every curve maps `[0, 1]` onto itself with `sample(0) == 0` and
//! `sample(1) == 1`. Inputs outside that range are clamped.
//!
//! The default, [`Easing::FastOutSlowIn`], is the cubic Bézier
//! `(0.4, 0.0, 0.2, 1.0)`: it accelerates out of the start and settles
//! gently into the target.

use kurbo::{CubicBez, ParamCurve, Point};

/// Bisection steps when inverting the x component of a Bézier curve.
const BEZIER_MAX_STEPS: u32 = 48;
/// Acceptable error in x when inverting a Bézier curve.
const BEZIER_EPSILON: f64 = 1e-7;

/// An interpolation curve applied to normalized session progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    /// No easing.
    Linear,
    /// Quadratic acceleration from rest.
    EaseIn,
    /// Quadratic deceleration to rest.
    EaseOut,
    /// Quadratic acceleration then deceleration.
    EaseInOut,
    /// Cubic Bézier `(0.4, 0.0, 0.2, 1.0)`.
    #[default]
    FastOutSlowIn,
    /// A CSS-style cubic Bézier through `(0, 0)`, `(x1, y1)`, `(x2, y2)`,
    /// `(1, 1)`.
    ///
    /// `x1` and `x2` should lie in `[0, 1]` so the curve is a function of x;
    /// values outside that range are clamped.
    CubicBezier {
        /// First control point x.
        x1: f64,
        /// First control point y.
        y1: f64,
        /// Second control point x.
        x2: f64,
        /// Second control point y.
        y2: f64,
    },
}

impl Easing {
    /// Maps linear progress `t` to eased progress.
    #[must_use]
    pub fn sample(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * 0.5
                }
            }
            Self::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let curve = CubicBez::new(
        Point::ORIGIN,
        Point::new(x1.clamp(0.0, 1.0), y1),
        Point::new(x2.clamp(0.0, 1.0), y2),
        Point::new(1.0, 1.0),
    );

    // x(t) is monotonic once the control x values are in [0, 1].
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    let mut t = x;
    for _ in 0..BEZIER_MAX_STEPS {
        let px = curve.eval(t).x;
        let err = px - x;
        if err < BEZIER_EPSILON && -err < BEZIER_EPSILON {
            break;
        }
        if err < 0.0 {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }
    curve.eval(t).y
}
