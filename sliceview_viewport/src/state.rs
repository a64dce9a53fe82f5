// Copyright 2025 the Sliceview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};

use crate::view_box::StackViewBox;

/// Extent of a stack: in-slice size in stack units plus the slice count.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StackDimensions {
    /// Width of a slice in stack units.
    pub width: f64,
    /// Height of a slice in stack units.
    pub height: f64,
    /// Number of slices along the depth axis.
    pub depths: u32,
}

impl StackDimensions {
    /// Creates a new extent.
    #[inline]
    #[must_use]
    pub const fn new(width: f64, height: f64, depths: u32) -> Self {
        Self {
            width,
            height,
            depths,
        }
    }

    /// Returns the largest valid depth index, or `0.0` for an empty stack.
    #[inline]
    #[must_use]
    pub fn max_depth_index(&self) -> f64 {
        f64::from(self.depths.saturating_sub(1))
    }
}

/// Viewer-owned state of one stack viewport: pan origin, zoom scale, depth
/// slice, and viewport pixel extent.
///
/// The viewer is the sole mutator. Overlay layers hold no copy of this
/// state; they are handed `&ViewportState` on every redraw and must query
/// it fresh each time, because any of origin, scale, depth, and viewport
/// size may have changed since the previous call without further notice.
///
/// All conversions are pure functions of the current state: no memoization,
/// no side effects.
#[derive(Clone, Debug)]
pub struct ViewportState {
    stack: StackDimensions,
    origin: Point,
    depth_index: f64,
    scale: f64,
    min_scale: f64,
    max_scale: f64,
    view_size: Size,
}

impl ViewportState {
    /// Creates a viewport over the given stack.
    ///
    /// - The pan origin starts at the center of a slice.
    /// - The depth index starts at `0`.
    /// - The scale starts at `1.0`, clamped to `[1e-3, 1e3]` by default.
    #[must_use]
    pub fn new(stack: StackDimensions, view_size: Size) -> Self {
        Self {
            stack,
            origin: Point::new(stack.width / 2.0, stack.height / 2.0),
            depth_index: 0.0,
            scale: 1.0,
            min_scale: 1e-3,
            max_scale: 1e3,
            view_size,
        }
    }

    /// Returns the stack extent this viewport looks at.
    #[inline]
    #[must_use]
    pub fn stack(&self) -> StackDimensions {
        self.stack
    }

    /// Returns the pan origin: the stack coordinates at the view center.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Returns the currently displayed depth index.
    #[inline]
    #[must_use]
    pub fn depth_index(&self) -> f64 {
        self.depth_index
    }

    /// Returns the current scale in screen pixels per stack unit.
    #[inline]
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the viewport extent in pixels.
    #[inline]
    #[must_use]
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Moves the pan origin to the given stack coordinates.
    pub fn pan_to(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Moves the pan origin by a delta in stack units.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.origin += delta;
    }

    /// Sets the scale, clamping it into the configured scale range.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.clamp(self.min_scale, self.max_scale);
    }

    /// Sets the minimum and maximum scale factors.
    ///
    /// The provided range is normalized so that `min_scale <= max_scale`.
    /// The current scale is clamped into the new range.
    pub fn set_scale_limits(&mut self, min_scale: f64, max_scale: f64) {
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self.set_scale(self.scale);
    }

    /// Sets the displayed depth index, clamped to the stack's valid range.
    pub fn set_depth_index(&mut self, depth_index: f64) {
        self.depth_index = depth_index.clamp(0.0, self.stack.max_depth_index());
    }

    /// Steps the displayed depth index by a delta, with clamping.
    pub fn step_depth(&mut self, delta: f64) {
        self.set_depth_index(self.depth_index + delta);
    }

    /// Sets the viewport extent in pixels.
    ///
    /// The viewer calls this when its window or pane is resized, then
    /// re-invokes `resize` on every registered layer.
    pub fn set_view_size(&mut self, view_size: Size) {
        self.view_size = view_size;
    }

    /// Returns the visible rectangle in stack units.
    #[must_use]
    pub fn view_box(&self) -> StackViewBox {
        let width = self.view_size.width / self.scale;
        let height = self.view_size.height / self.scale;
        let left = self.origin.x - width / 2.0;
        let top = self.origin.y - height / 2.0;
        StackViewBox::from_rect(Rect::new(left, top, left + width, top + height))
    }

    /// Converts an in-slice stack point into screen pixels.
    ///
    /// The transform is applied independently per axis:
    /// `screen = (p - origin) * scale + view_size / 2`.
    #[inline]
    #[must_use]
    pub fn stack_to_screen(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.origin.x) * self.scale + self.view_size.width / 2.0,
            (p.y - self.origin.y) * self.scale + self.view_size.height / 2.0,
        )
    }

    /// Converts a screen-pixel position back into in-slice stack
    /// coordinates.
    #[inline]
    #[must_use]
    pub fn screen_to_stack(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.view_size.width / 2.0) / self.scale + self.origin.x,
            (p.y - self.view_size.height / 2.0) / self.scale + self.origin.y,
        )
    }

    /// Returns the full slice extent at the current scale, in pixels.
    ///
    /// Layers size their drawing surfaces from this.
    #[inline]
    #[must_use]
    pub fn scaled_extent(&self) -> Size {
        Size::new(self.stack.width * self.scale, self.stack.height * self.scale)
    }
}
