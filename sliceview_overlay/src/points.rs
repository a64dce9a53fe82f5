// Copyright 2025 the Sliceview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::Point;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round`
use sliceview_geom::Point3;
use sliceview_surface::{MarkerStyle, SurfaceBackend, SurfaceId};
use sliceview_viewport::{SlicePolicy, ViewportState};

use crate::layer::{LayerError, OverlayLayer, RedrawSummary, create_layer_surface};

/// Default marker radius in pixels.
///
/// Markers keep this radius at every zoom level; they mark a position, not
/// an extent.
pub const DEFAULT_MARKER_RADIUS: f64 = 3.0;

/// Identifier tag of a dataset point.
///
/// The id is opaque to the overlay: it is never interpreted, only carried,
/// so callers can map drawn markers back to their own records.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PointId(pub u64);

/// A tagged 3D point of an overlay dataset, in stack coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DataPoint {
    /// Opaque caller-assigned tag.
    pub id: PointId,
    /// Position in stack coordinates.
    pub pos: Point3,
}

impl DataPoint {
    /// Creates a new tagged point.
    #[inline]
    #[must_use]
    pub const fn new(id: PointId, pos: Point3) -> Self {
        Self { id, pos }
    }
}

/// Rounds every point's depth to the nearest integer slice.
///
/// Doing this once at ingestion lets a dataset with real-valued depths be
/// matched reliably even under [`SlicePolicy::Exact`].
pub fn snap_to_slices(points: &mut [DataPoint]) {
    for p in points {
        p.pos.z = p.pos.z.round();
    }
}

/// An overlay drawing one fixed-radius marker per dataset point on the
/// current slice.
///
/// The layer is bound at construction to an ordered, immutable dataset and
/// never mutates it. On every redraw the dataset is filtered against the
/// viewport's current depth index (see [`SlicePolicy`]), survivors are
/// mapped through the stack→screen transform, and the surface content is
/// replaced wholesale.
pub struct PointOverlay {
    surface: Option<SurfaceId>,
    opacity: f64,
    radius: f64,
    style: MarkerStyle,
    policy: SlicePolicy,
    data: Arc<[DataPoint]>,
}

impl core::fmt::Debug for PointOverlay {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PointOverlay")
            .field("surface", &self.surface)
            .field("opacity", &self.opacity)
            .field("radius", &self.radius)
            .field("style", &self.style)
            .field("policy", &self.policy)
            .field("points", &self.data.len())
            .finish()
    }
}

impl PointOverlay {
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
        data: impl Into<Arc<[DataPoint]>>,
    ) -> Result<Self, LayerError> {
        let surface = create_layer_surface(backend, viewport)?;
        Ok(Self {
            surface: Some(surface),
            opacity: 1.0,
            radius: DEFAULT_MARKER_RADIUS,
            style: MarkerStyle::default(),
            policy: SlicePolicy::default(),
            data: data.into(),
        })
    }

    /// Returns the dataset this layer draws.
    #[must_use]
    pub fn data(&self) -> &[DataPoint] {
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

    /// Returns the slice-membership policy.
    #[inline]
    #[must_use]
    pub fn slice_policy(&self) -> SlicePolicy {
        self.policy
    }

    /// Sets the slice-membership policy.
    pub fn set_slice_policy(&mut self, policy: SlicePolicy) {
        self.policy = policy;
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

impl<B: SurfaceBackend> OverlayLayer<B> for PointOverlay {
    fn layer_name(&self) -> &'static str {
        "Point markers"
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
        let screen: Vec<Point> = self
            .data
            .iter()
            .filter(|p| self.policy.matches(p.pos.z, depth))
            .map(|p| viewport.stack_to_screen(p.pos.xy()))
            .collect();

        backend.clear(surface);
        for &center in &screen {
            backend.draw_circle(surface, center, self.radius, &self.style);
        }

        Ok(RedrawSummary {
            drawn: screen.len(),
            skipped: 0,
        })
    }

    fn unregister(&mut self, backend: &mut B) -> Result<(), LayerError> {
        let surface = self.surface.take().ok_or(LayerError::Unregistered)?;
        backend.destroy_surface(surface);
        Ok(())
    }
}
