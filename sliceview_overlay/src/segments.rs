// Copyright 2025 the Sliceview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::Point;
use sliceview_geom::{Point3, intersect_segment_with_z_plane};
use sliceview_surface::{MarkerStyle, SurfaceBackend, SurfaceId};
use sliceview_viewport::ViewportState;

use crate::layer::{LayerError, OverlayLayer, RedrawSummary, create_layer_surface};
use crate::points::DEFAULT_MARKER_RADIUS;

/// Identifier tag of a dataset segment.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SegmentId(pub u64);

/// A tagged 3D segment of an overlay dataset, in stack coordinates.
///
/// Segments usually connect annotations on different slices; what is drawn
/// on any one slice is the point where the segment pierces it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DataSegment {
    /// Opaque caller-assigned tag.
    pub id: SegmentId,
    /// First endpoint in stack coordinates.
    pub a: Point3,
    /// Second endpoint in stack coordinates.
    pub b: Point3,
}

impl DataSegment {
    /// Creates a new tagged segment.
    #[inline]
    #[must_use]
    pub const fn new(id: SegmentId, a: Point3, b: Point3) -> Self {
        Self { id, a, b }
    }
}

/// An overlay marking where dataset segments cross the current slice.
///
/// On every redraw, each segment is intersected with the plane of the
/// viewport's current depth index:
///
/// - A segment piercing the plane gets one marker at the crossing.
/// - A segment lying *in* the plane gets a marker at each endpoint.
/// - A segment parallel to but off the plane does not intersect; it is
///   skipped and tallied in [`RedrawSummary::skipped`]. One such segment
///   never aborts the batch.
/// - A segment whose infinite line crosses beyond its endpoints is simply
///   not on this slice; it draws nothing and is not an error.
pub struct SegmentOverlay {
    surface: Option<SurfaceId>,
    opacity: f64,
    radius: f64,
    style: MarkerStyle,
    data: Arc<[DataSegment]>,
}

impl core::fmt::Debug for SegmentOverlay {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SegmentOverlay")
            .field("surface", &self.surface)
            .field("opacity", &self.opacity)
            .field("radius", &self.radius)
            .field("style", &self.style)
            .field("segments", &self.data.len())
            .finish()
    }
}

impl SegmentOverlay {
    /// Creates a layer bound to `viewport`'s stack and the given dataset,
    /// with an attached, empty surface and opacity `1`.
    ///
    /// # Errors
    ///
    /// [`LayerError::InvalidViewport`] when the viewport's scaled slice
    /// extent has no drawable area.
    pub fn new<B: SurfaceBackend>(
        backend: &mut B,
        viewport: &ViewportState,
        data: impl Into<Arc<[DataSegment]>>,
    ) -> Result<Self, LayerError> {
        let surface = create_layer_surface(backend, viewport)?;
        Ok(Self {
            surface: Some(surface),
            opacity: 1.0,
            radius: DEFAULT_MARKER_RADIUS,
            style: MarkerStyle::default(),
            data: data.into(),
        })
    }

    /// Returns the dataset this layer draws.
    #[must_use]
    pub fn data(&self) -> &[DataSegment] {
        &self.data
    }

    /// Returns the marker radius in pixels.
    #[inline]
    #[must_use]
    pub fn marker_radius(&self) -> f64 {
        self.radius
    }

    /// Sets the marker radius in pixels.
    pub fn set_marker_radius(&mut self, radius: f64) {
        self.radius = radius;
    }

    /// Returns the marker paint.
    #[inline]
    #[must_use]
    pub fn style(&self) -> MarkerStyle {
        self.style
    }

    /// Sets the marker paint.
    pub fn set_style(&mut self, style: MarkerStyle) {
        self.style = style;
    }

    /// Returns the id of the layer's surface, or `None` after
    /// [`OverlayLayer::unregister`].
    #[inline]
    #[must_use]
    pub fn surface_id(&self) -> Option<SurfaceId> {
        self.surface
    }

    fn surface(&self) -> Result<SurfaceId, LayerError> {
        self.surface.ok_or(LayerError::Unregistered)
    }
}

impl<B: SurfaceBackend> OverlayLayer<B> for SegmentOverlay {
    fn layer_name(&self) -> &'static str {
        "Slice crossings"
    }

    fn opacity(&self) -> f64 {
        self.opacity
    }

    fn set_opacity(&mut self, backend: &mut B, opacity: f64) -> Result<(), LayerError> {
        let surface = self.surface()?;
        if !(0.0..=1.0).contains(&opacity) {
            return Err(LayerError::InvalidOpacity { value: opacity });
        }
        backend.set_opacity(surface, opacity);
        self.opacity = opacity;
        Ok(())
    }

    fn redraw(
        &mut self,
        backend: &mut B,
        viewport: &ViewportState,
    ) -> Result<RedrawSummary, LayerError> {
        let surface = self.surface()?;

        let depth = viewport.depth_index();
        let mut screen: Vec<Point> = Vec::new();
        let mut skipped = 0;
        for seg in self.data.iter() {
            match intersect_segment_with_z_plane(seg.a, seg.b, depth) {
                Ok(Some(hit)) => screen.push(viewport.stack_to_screen(hit)),
                // The line crosses beyond the endpoints; nothing to draw here.
                Ok(None) => {}
                Err(err) if err.is_in_plane() => {
                    screen.push(viewport.stack_to_screen(seg.a.xy()));
                    screen.push(viewport.stack_to_screen(seg.b.xy()));
                }
                Err(_) => skipped += 1,
            }
        }

        backend.clear(surface);
        for &center in &screen {
            backend.draw_circle(surface, center, self.radius, &self.style);
        }

        Ok(RedrawSummary {
            drawn: screen.len(),
            skipped,
        })
    }

    fn unregister(&mut self, backend: &mut B) -> Result<(), LayerError> {
        let surface = self.surface.take().ok_or(LayerError::Unregistered)?;
        backend.destroy_surface(surface);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Point, Size};
    use sliceview_geom::Point3;
    use sliceview_surface::{RecordingSurfaces, SurfaceOp};
    use sliceview_viewport::{StackDimensions, ViewportState};

    use super::{DataSegment, SegmentId, SegmentOverlay};
    use crate::layer::{LayerError, OverlayLayer};

    fn viewport_at_depth(depth: f64) -> ViewportState {
        let mut vp = ViewportState::new(
            StackDimensions::new(1024.0, 768.0, 20),
            Size::new(200.0, 100.0),
        );
        vp.pan_to(Point::new(0.0, 0.0));
        vp.set_depth_index(depth);
        vp
    }

    fn segment(id: u64, a: (f64, f64, f64), b: (f64, f64, f64)) -> DataSegment {
        DataSegment::new(SegmentId(id), Point3::from(a), Point3::from(b))
    }

    fn circle_centers(ops: &[SurfaceOp]) -> Vec<Point> {
        ops.iter()
            .filter_map(|op| match op {
                SurfaceOp::Circle { center, .. } => Some(*center),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn crossing_marker_sits_where_the_segment_pierces_the_slice() {
        let mut backend = RecordingSurfaces::default();
        let vp = viewport_at_depth(5.0);
        let data = [segment(1, (0.0, 0.0, 0.0), (10.0, 10.0, 10.0))];
        let mut layer = SegmentOverlay::new(&mut backend, &vp, data).unwrap();

        let summary = layer.redraw(&mut backend, &vp).unwrap();
        assert_eq!((summary.drawn, summary.skipped), (1, 0));

        let centers = circle_centers(backend.ops(layer.surface_id().unwrap()));
        assert_eq!(centers, [vp.stack_to_screen(Point::new(5.0, 5.0))]);
    }

    #[test]
    fn degenerate_segment_is_skipped_and_the_batch_completes() {
        let mut backend = RecordingSurfaces::default();
        let vp = viewport_at_depth(5.0);
        let data = [
            segment(1, (0.0, 0.0, 0.0), (10.0, 10.0, 10.0)),
            // Parallel to the slice plane but two slices away.
            segment(2, (1.0, 1.0, 7.0), (9.0, 9.0, 7.0)),
            segment(3, (4.0, 4.0, 4.0), (6.0, 6.0, 6.0)),
        ];
        let mut layer = SegmentOverlay::new(&mut backend, &vp, data).unwrap();

        let summary = layer.redraw(&mut backend, &vp).unwrap();
        assert_eq!((summary.drawn, summary.skipped), (2, 1));
        assert_eq!(
            circle_centers(backend.ops(layer.surface_id().unwrap())).len(),
            2
        );
    }

    #[test]
    fn in_plane_segment_draws_both_endpoints() {
        let mut backend = RecordingSurfaces::default();
        let vp = viewport_at_depth(5.0);
        let data = [segment(1, (1.0, 2.0, 5.0), (3.0, 4.0, 5.0))];
        let mut layer = SegmentOverlay::new(&mut backend, &vp, data).unwrap();

        let summary = layer.redraw(&mut backend, &vp).unwrap();
        assert_eq!((summary.drawn, summary.skipped), (2, 0));

        let centers = circle_centers(backend.ops(layer.surface_id().unwrap()));
        assert_eq!(
            centers,
            [
                vp.stack_to_screen(Point::new(1.0, 2.0)),
                vp.stack_to_screen(Point::new(3.0, 4.0)),
            ]
        );
    }

    #[test]
    fn crossing_beyond_the_endpoints_draws_nothing() {
        let mut backend = RecordingSurfaces::default();
        let vp = viewport_at_depth(15.0);
        let data = [segment(1, (0.0, 0.0, 0.0), (10.0, 10.0, 10.0))];
        let mut layer = SegmentOverlay::new(&mut backend, &vp, data).unwrap();

        let summary = layer.redraw(&mut backend, &vp).unwrap();
        assert_eq!((summary.drawn, summary.skipped), (0, 0));
    }

    #[test]
    fn unregister_releases_the_surface_once() {
        let mut backend = RecordingSurfaces::default();
        let vp = viewport_at_depth(0.0);
        let data = [segment(1, (0.0, 0.0, 0.0), (1.0, 1.0, 1.0))];
        let mut layer = SegmentOverlay::new(&mut backend, &vp, data).unwrap();
        let id = layer.surface_id().unwrap();

        layer.unregister(&mut backend).unwrap();
        assert!(!backend.is_alive(id));
        assert_eq!(
            layer.redraw(&mut backend, &vp),
            Err(LayerError::Unregistered)
        );
        assert_eq!(
            layer.unregister(&mut backend),
            Err(LayerError::Unregistered)
        );
    }
}
