// Copyright 2025 the Sliceview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `floor`
use sliceview_surface::{SurfaceBackend, SurfaceDesc, SurfaceId};
use sliceview_viewport::ViewportState;

/// Error raised by overlay-layer lifecycle operations.
///
/// These are fatal to the call that raised them and are surfaced
/// immediately; they are never swallowed. Per-element geometry failures
/// during a redraw are *not* errors — they are tallied in
/// [`RedrawSummary::skipped`] and the batch completes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LayerError {
    /// The layer was already unregistered; its drawing surface is gone and
    /// no further operations are valid.
    Unregistered,
    /// The viewport offers no drawable area to attach a surface to.
    InvalidViewport,
    /// An opacity outside `[0, 1]` was rejected; the previous value is
    /// kept.
    InvalidOpacity {
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for LayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Unregistered => {
                write!(f, "layer has been unregistered; its surface is released")
            }
            Self::InvalidViewport => write!(f, "viewport has no drawable area"),
            Self::InvalidOpacity { value } => {
                write!(f, "opacity {value} is outside the valid range [0, 1]")
            }
        }
    }
}

impl core::error::Error for LayerError {}

/// Synchronous completion summary of a redraw.
///
/// A redraw runs to completion on the caller's turn; this value *is* the
/// completion signal, so there is nothing callback-shaped to wait for.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RedrawSummary {
    /// Number of markers drawn.
    pub drawn: usize,
    /// Number of elements skipped because their geometry was degenerate
    /// for the current slice.
    pub skipped: usize,
}

/// The lifecycle contract an overlay must satisfy to participate in a
/// viewer's render loop.
///
/// A layer is bound at construction to one dataset and draws onto one
/// surface it exclusively owns. The viewer is the sole driver: it passes
/// the current [`ViewportState`] into every `resize`/`redraw` call, and
/// layers re-query that state each time instead of caching it — origin,
/// scale, and depth may all have changed since the previous call.
///
/// Calls on one layer are strictly sequential; the `&mut self` receivers
/// make a redraw atomic from the caller's perspective and keep
/// `unregister` from running while a redraw on the same layer is in
/// flight.
pub trait OverlayLayer<B: SurfaceBackend> {
    /// Returns the static display name of this layer.
    fn layer_name(&self) -> &'static str;

    /// Returns the last opacity set on this layer.
    fn opacity(&self) -> f64;

    /// Sets the layer's surface-level opacity.
    ///
    /// # Errors
    ///
    /// [`LayerError::InvalidOpacity`] when `opacity` is outside `[0, 1]`
    /// (the stored value is left unchanged), [`LayerError::Unregistered`]
    /// after [`OverlayLayer::unregister`].
    fn set_opacity(&mut self, backend: &mut B, opacity: f64) -> Result<(), LayerError>;

    /// Redraws the layer from scratch against the current viewport state.
    ///
    /// Prior content is fully replaced, never incrementally patched:
    /// repeated calls under unchanged viewport and dataset produce
    /// identical draw sequences.
    ///
    /// # Errors
    ///
    /// [`LayerError::Unregistered`] after [`OverlayLayer::unregister`].
    fn redraw(
        &mut self,
        backend: &mut B,
        viewport: &ViewportState,
    ) -> Result<RedrawSummary, LayerError>;

    /// Reacts to a viewport size change.
    ///
    /// Resize has no logic of its own: it is defined as a redraw under the
    /// new viewport dimensions.
    ///
    /// # Errors
    ///
    /// [`LayerError::Unregistered`] after [`OverlayLayer::unregister`].
    fn resize(
        &mut self,
        backend: &mut B,
        viewport: &ViewportState,
    ) -> Result<RedrawSummary, LayerError> {
        self.redraw(backend, viewport)
    }

    /// Detaches and releases the layer's drawing surface.
    ///
    /// # Errors
    ///
    /// [`LayerError::Unregistered`] when called a second time. No
    /// operation is valid afterwards.
    fn unregister(&mut self, backend: &mut B) -> Result<(), LayerError>;
}

/// Allocates a layer surface covering the full slice at the viewport's
/// current scale.
pub(crate) fn create_layer_surface<B: SurfaceBackend>(
    backend: &mut B,
    viewport: &ViewportState,
) -> Result<SurfaceId, LayerError> {
    let extent = viewport.scaled_extent();
    if !extent.width.is_finite()
        || !extent.height.is_finite()
        || extent.width < 1.0
        || extent.height < 1.0
    {
        return Err(LayerError::InvalidViewport);
    }
    Ok(backend.create_surface(SurfaceDesc::new(
        surface_px(extent.width),
        surface_px(extent.height),
    )))
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "the value is finite, floored, and clamped into u32 range"
)]
fn surface_px(v: f64) -> u32 {
    v.min(f64::from(u32::MAX)).floor() as u32
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use kurbo::Size;
    use sliceview_surface::RecordingSurfaces;
    use sliceview_viewport::{StackDimensions, ViewportState};

    use super::{LayerError, create_layer_surface};

    #[test]
    fn surface_covers_the_scaled_slice() {
        let mut backend = RecordingSurfaces::default();
        let mut vp = ViewportState::new(
            StackDimensions::new(100.0, 80.0, 5),
            Size::new(200.0, 100.0),
        );
        vp.set_scale(2.0);

        let id = create_layer_surface(&mut backend, &vp).unwrap();
        let desc = backend.desc(id);
        assert_eq!((desc.width, desc.height), (200, 160));
    }

    #[test]
    fn empty_extent_is_an_invalid_viewport() {
        let mut backend = RecordingSurfaces::default();
        let vp = ViewportState::new(StackDimensions::new(0.0, 80.0, 5), Size::new(200.0, 100.0));
        assert_eq!(
            create_layer_surface(&mut backend, &vp),
            Err(LayerError::InvalidViewport)
        );
    }

    #[test]
    fn errors_render_their_context() {
        let text = LayerError::InvalidOpacity { value: 1.4 }.to_string();
        assert!(text.contains("1.4"), "{text}");
    }
}
