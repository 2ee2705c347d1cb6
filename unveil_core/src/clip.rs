// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clip rectangle, surface size, and mask types.
//!
//! A [`ClipRect`] is always anchored at the surface origin: only its right
//! and bottom edges move. The mask handed to renderers is derived from it on
//! every change as a [`MaskUpdate`].

use core::fmt;

/// Integer size of a surface or of an animation endpoint.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SurfaceSize {
    /// Width in surface units.
    pub width: i32,
    /// Height in surface units.
    pub height: i32,
}

impl SurfaceSize {
    /// A zero-by-zero size.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a size from its components.
    #[inline]
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl fmt::Debug for SurfaceSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The visible sub-region of a surface, in the surface's own coordinates.
///
/// `left` and `top` are always zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct ClipRect {
    /// Left edge; always zero.
    pub left: i32,
    /// Top edge; always zero.
    pub top: i32,
    /// Right edge, equal to the clipped width.
    pub right: i32,
    /// Bottom edge, equal to the clipped height.
    pub bottom: i32,
}

impl ClipRect {
    /// The empty clip at the origin.
    pub const EMPTY: Self = Self::from_size(SurfaceSize::ZERO);

    /// Creates an origin-anchored clip of the given size.
    #[inline]
    #[must_use]
    pub const fn from_size(size: SurfaceSize) -> Self {
        Self {
            left: 0,
            top: 0,
            right: size.width,
            bottom: size.height,
        }
    }

    /// `right - left`.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    /// `bottom - top`.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Width and height as a [`SurfaceSize`].
    #[inline]
    #[must_use]
    pub const fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.width(), self.height())
    }

    /// Whether this clip exposes the whole of a surface of size `host`.
    ///
    /// An empty clip never counts as fully visible, even against an empty
    /// host.
    #[inline]
    #[must_use]
    pub const fn covers(&self, host: SurfaceSize) -> bool {
        let (w, h) = (self.width(), self.height());
        w > 0 && h > 0 && w == host.width && h == host.height
    }

    /// Converts to a floating-point [`kurbo::Rect`].
    #[inline]
    #[must_use]
    pub fn to_kurbo(&self) -> kurbo::Rect {
        kurbo::Rect::new(
            f64::from(self.left),
            f64::from(self.top),
            f64::from(self.right),
            f64::from(self.bottom),
        )
    }
}

/// The outline shape used to mask clipped content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClipShape {
    /// An axis-aligned rectangle.
    Rect(kurbo::Rect),
    /// A rectangle with rounded corners.
    RoundedRect(kurbo::RoundedRect),
}

impl ClipShape {
    /// Builds the mask shape for `clip`, rounding corners when
    /// `corner_radius` is positive.
    #[must_use]
    pub fn for_clip(clip: ClipRect, corner_radius: f64) -> Self {
        let rect = clip.to_kurbo();
        if corner_radius > 0.0 {
            Self::RoundedRect(rect.to_rounded_rect(corner_radius))
        } else {
            Self::Rect(rect)
        }
    }

    /// The bounding rectangle of the shape.
    #[must_use]
    pub fn bounds(&self) -> kurbo::Rect {
        match self {
            Self::Rect(r) => *r,
            Self::RoundedRect(r) => r.rect(),
        }
    }
}

/// What a [`MaskRenderer`](crate::host::MaskRenderer) receives whenever the
/// clip changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaskUpdate {
    /// The new clip bounds.
    pub clip: ClipRect,
    /// The mask outline matching `clip`.
    pub shape: ClipShape,
    /// Mask opacity: clipped height over host height.
    ///
    /// Non-finite when the host height is zero.
    pub alpha: f32,
}

impl MaskUpdate {
    /// Derives the mask for `clip` on a host of size `host`.
    #[must_use]
    pub fn new(clip: ClipRect, host: SurfaceSize, corner_radius: f64) -> Self {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "mask alpha only needs single precision"
        )]
        let alpha = (f64::from(clip.height()) / f64::from(host.height)) as f32;
        Self {
            clip,
            shape: ClipShape::for_clip(clip, corner_radius),
            alpha,
        }
    }
}
