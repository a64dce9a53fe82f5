// Copyright 2025 the Sliceview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sliceview Surface: the drawing boundary between overlay layers and
//! whatever actually puts pixels (or vectors) on screen.
//!
//! Overlay layers are deliberately ignorant of how drawing works. They
//! issue exactly five operations against a [`SurfaceBackend`] — create a
//! surface, clear it, draw a circle, set the surface opacity, destroy the
//! surface — and hold no assumption about the backend's representation.
//! Anything that can honor those five operations can host overlays: an SVG
//! exporter, a canvas, a GPU renderer.
//!
//! - [`SurfaceId`] is a small opaque handle, stable for the lifetime of its
//!   surface. Each surface is exclusively owned by one layer.
//! - [`MarkerStyle`] carries the fill/stroke paint for markers.
//! - [`SurfaceOp`] is the plain-old-data form of the drawing operations,
//!   usable for recording and replay.
//! - [`RecordingSurfaces`] is a stateful reference implementation that
//!   records ops instead of rendering. It exists for tests and debugging
//!   that want to assert on emitted draw sequences; it is intentionally
//!   *not* a renderer.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use sliceview_surface::{
//!     MarkerStyle, RecordingSurfaces, SurfaceBackend, SurfaceDesc, SurfaceOp,
//! };
//!
//! let mut backend = RecordingSurfaces::default();
//! let id = backend.create_surface(SurfaceDesc::new(640, 480));
//! backend.clear(id);
//! backend.draw_circle(id, Point::new(10.0, 20.0), 3.0, &MarkerStyle::default());
//! assert_eq!(backend.ops(id).len(), 2);
//! assert!(matches!(backend.ops(id)[0], SurfaceOp::Clear));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Point;
use peniko::Color;

/// Identifier for a drawing surface.
///
/// This is a small, opaque handle that is stable for the lifetime of the
/// surface. A surface belongs to exactly one overlay layer; backends never
/// share one id between layers.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u32);

/// Creation-time description of a drawing surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SurfaceDesc {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
}

impl SurfaceDesc {
    /// Creates a new description.
    #[inline]
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Fill and stroke paint for a marker.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MarkerStyle {
    /// Fill color.
    pub fill: Color,
    /// Stroke color.
    pub stroke: Color,
    /// Stroke width in pixels.
    pub stroke_width: f64,
}

impl Default for MarkerStyle {
    /// Blue fill with a cyan stroke, one pixel wide.
    fn default() -> Self {
        Self {
            fill: Color::from_rgba8(0x00, 0x00, 0xff, 0xff),
            stroke: Color::from_rgba8(0x00, 0xff, 0xff, 0xff),
            stroke_width: 1.0,
        }
    }
}

/// Plain-old-data form of the operations a surface accepts.
///
/// Backends that record rather than render (see [`RecordingSurfaces`])
/// store these; two redraws are identical exactly when their op sequences
/// compare equal.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    /// Remove all previously drawn content.
    Clear,
    /// Draw a circle with the given paint.
    Circle {
        /// Center in surface pixels.
        center: Point,
        /// Radius in surface pixels.
        radius: f64,
        /// Fill and stroke paint.
        style: MarkerStyle,
    },
    /// Set the opacity applied to the surface as a whole.
    SetOpacity(f64),
}

/// The five-operation drawing boundary overlay layers depend on.
///
/// Implementations are free to choose how surfaces are allocated and
/// stored, but ids must remain valid and refer to the same logical surface
/// until [`SurfaceBackend::destroy_surface`] is called for them. Operations
/// on a destroyed id are a caller bug; the layer types in
/// `sliceview_overlay` guard their surface handle so that this cannot be
/// reached through the public lifecycle.
pub trait SurfaceBackend {
    /// Creates a new, empty surface.
    fn create_surface(&mut self, desc: SurfaceDesc) -> SurfaceId;

    /// Destroys a previously created surface.
    fn destroy_surface(&mut self, id: SurfaceId);

    /// Removes all drawn content from a surface.
    fn clear(&mut self, id: SurfaceId);

    /// Draws a circle onto a surface.
    fn draw_circle(&mut self, id: SurfaceId, center: Point, radius: f64, style: &MarkerStyle);

    /// Sets the opacity applied to a surface as a whole.
    ///
    /// Values are expected to be in `[0, 1]`; validation happens at the
    /// layer boundary, not here.
    fn set_opacity(&mut self, id: SurfaceId, opacity: f64);
}

struct SurfaceRecord {
    desc: SurfaceDesc,
    opacity: f64,
    ops: Vec<SurfaceOp>,
}

/// Recording implementation of [`SurfaceBackend`] for tests and debugging.
///
/// Surfaces are slots keyed by their id; every accepted operation is
/// appended to the owning surface's op log. Nothing is rasterized.
#[derive(Default)]
pub struct RecordingSurfaces {
    slots: Vec<Option<SurfaceRecord>>,
}

impl core::fmt::Debug for RecordingSurfaces {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let alive = self.slots.iter().filter(|s| s.is_some()).count();
        write!(
            f,
            "RecordingSurfaces {{ surfaces: {}, alive: {alive} }}",
            self.slots.len()
        )
    }
}

impl RecordingSurfaces {
    /// Returns the recorded ops of a surface.
    #[must_use]
    pub fn ops(&self, id: SurfaceId) -> &[SurfaceOp] {
        &self.record(id).ops
    }

    /// Returns the current opacity of a surface.
    #[must_use]
    pub fn opacity(&self, id: SurfaceId) -> f64 {
        self.record(id).opacity
    }

    /// Returns the creation-time description of a surface.
    #[must_use]
    pub fn desc(&self, id: SurfaceId) -> SurfaceDesc {
        self.record(id).desc
    }

    /// Returns `true` if the surface has been created and not destroyed.
    #[must_use]
    pub fn is_alive(&self, id: SurfaceId) -> bool {
        matches!(self.slots.get(id.0 as usize), Some(Some(_)))
    }

    /// Clears the op logs of all surfaces while keeping the surfaces.
    pub fn clear_ops(&mut self) {
        for slot in self.slots.iter_mut().flatten() {
            slot.ops.clear();
        }
    }

    fn record(&self, id: SurfaceId) -> &SurfaceRecord {
        self.slots
            .get(id.0 as usize)
            .and_then(Option::as_ref)
            .expect("RecordingSurfaces: unknown or destroyed surface")
    }

    fn record_mut(&mut self, id: SurfaceId) -> &mut SurfaceRecord {
        self.slots
            .get_mut(id.0 as usize)
            .and_then(Option::as_mut)
            .expect("RecordingSurfaces: unknown or destroyed surface")
    }
}

impl SurfaceBackend for RecordingSurfaces {
    fn create_surface(&mut self, desc: SurfaceDesc) -> SurfaceId {
        let id = u32::try_from(self.slots.len())
            .expect("RecordingSurfaces: too many surfaces for u32 SurfaceId");
        self.slots.push(Some(SurfaceRecord {
            desc,
            opacity: 1.0,
            ops: Vec::new(),
        }));
        SurfaceId(id)
    }

    fn destroy_surface(&mut self, id: SurfaceId) {
        if let Some(slot) = self.slots.get_mut(id.0 as usize) {
            *slot = None;
        }
    }

    fn clear(&mut self, id: SurfaceId) {
        self.record_mut(id).ops.push(SurfaceOp::Clear);
    }

    fn draw_circle(&mut self, id: SurfaceId, center: Point, radius: f64, style: &MarkerStyle) {
        self.record_mut(id).ops.push(SurfaceOp::Circle {
            center,
            radius,
            style: *style,
        });
    }

    fn set_opacity(&mut self, id: SurfaceId, opacity: f64) {
        let record = self.record_mut(id);
        record.opacity = opacity;
        record.ops.push(SurfaceOp::SetOpacity(opacity));
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::{MarkerStyle, RecordingSurfaces, SurfaceBackend, SurfaceDesc, SurfaceOp};

    #[test]
    fn ops_are_recorded_per_surface() {
        let mut backend = RecordingSurfaces::default();
        let a = backend.create_surface(SurfaceDesc::new(10, 10));
        let b = backend.create_surface(SurfaceDesc::new(20, 20));

        backend.clear(a);
        backend.draw_circle(a, Point::new(1.0, 2.0), 3.0, &MarkerStyle::default());
        backend.clear(b);

        assert_eq!(backend.ops(a).len(), 2);
        assert_eq!(backend.ops(b), &[SurfaceOp::Clear]);
        assert_eq!(backend.desc(b), SurfaceDesc::new(20, 20));
    }

    #[test]
    fn opacity_is_tracked_and_logged() {
        let mut backend = RecordingSurfaces::default();
        let id = backend.create_surface(SurfaceDesc::new(10, 10));
        assert_eq!(backend.opacity(id), 1.0);

        backend.set_opacity(id, 0.25);
        assert_eq!(backend.opacity(id), 0.25);
        assert_eq!(backend.ops(id), &[SurfaceOp::SetOpacity(0.25)]);
    }

    #[test]
    fn destroy_frees_the_slot() {
        let mut backend = RecordingSurfaces::default();
        let id = backend.create_surface(SurfaceDesc::new(10, 10));
        assert!(backend.is_alive(id));
        backend.destroy_surface(id);
        assert!(!backend.is_alive(id));
        // A second destroy is a no-op.
        backend.destroy_surface(id);
    }

    #[test]
    fn clear_ops_keeps_surfaces() {
        let mut backend = RecordingSurfaces::default();
        let id = backend.create_surface(SurfaceDesc::new(10, 10));
        backend.draw_circle(id, Point::new(0.0, 0.0), 3.0, &MarkerStyle::default());
        backend.clear_ops();
        assert!(backend.is_alive(id));
        assert!(backend.ops(id).is_empty());
    }

    #[test]
    fn default_style_is_blue_on_cyan() {
        let style = MarkerStyle::default();
        let fill = style.fill.to_rgba8();
        assert_eq!((fill.r, fill.g, fill.b, fill.a), (0x00, 0x00, 0xff, 0xff));
        let stroke = style.stroke.to_rgba8();
        assert_eq!(
            (stroke.r, stroke.g, stroke.b, stroke.a),
            (0x00, 0xff, 0xff, 0xff)
        );
    }
}
