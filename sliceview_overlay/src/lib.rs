// Copyright 2025 the Sliceview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sliceview Overlay: annotation layers kept in sync with a stack viewer.
//!
//! An overlay layer draws vector annotations above the raster slice a
//! viewer currently shows, and follows the viewer through every pan, zoom,
//! and depth change. This crate provides:
//!
//! - [`OverlayLayer`], the lifecycle contract a layer must satisfy to
//!   participate in a viewer's render loop: opacity control, resize
//!   reaction, full redraw, and one-shot teardown.
//! - [`PointOverlay`], markers for tagged 3D points on the current slice.
//! - [`SegmentOverlay`], markers where tagged 3D segments pierce the
//!   current slice plane.
//!
//! The viewer owns the [`ViewportState`](sliceview_viewport::ViewportState)
//! and decides when layers redraw; layers re-query that state on every call
//! and replace their surface content wholesale, so a redraw under
//! unchanged state reproduces the previous draw sequence exactly.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Size;
//! use sliceview_geom::Point3;
//! use sliceview_overlay::{DataPoint, OverlayLayer, PointId, PointOverlay};
//! use sliceview_surface::RecordingSurfaces;
//! use sliceview_viewport::{StackDimensions, ViewportState};
//!
//! let mut backend = RecordingSurfaces::default();
//! let mut viewport = ViewportState::new(
//!     StackDimensions::new(512.0, 512.0, 10),
//!     Size::new(800.0, 600.0),
//! );
//!
//! let data = [
//!     DataPoint::new(PointId(1), Point3::new(100.0, 100.0, 0.0)),
//!     DataPoint::new(PointId(2), Point3::new(200.0, 150.0, 4.0)),
//! ];
//! let mut layer = PointOverlay::new(&mut backend, &viewport, data).unwrap();
//!
//! // Only the point on the displayed slice is drawn.
//! assert_eq!(layer.redraw(&mut backend, &viewport).unwrap().drawn, 1);
//!
//! // The viewer steps to another slice and drives the layer again.
//! viewport.set_depth_index(4.0);
//! assert_eq!(layer.redraw(&mut backend, &viewport).unwrap().drawn, 1);
//!
//! layer.unregister(&mut backend).unwrap();
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod layer;
mod points;
mod segments;

pub use layer::{LayerError, OverlayLayer, RedrawSummary};
pub use points::{DEFAULT_MARKER_RADIUS, DataPoint, PointId, PointOverlay, snap_to_slices};
pub use segments::{DataSegment, SegmentId, SegmentOverlay};
