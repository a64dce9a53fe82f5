// Copyright 2025 the Sliceview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sliceview Geometry: stack-space points and slice-plane crossings.
//!
//! This crate provides the small set of pure geometry primitives needed by
//! overlay layers in a multi-slice stack viewer. The central question it
//! answers is: given 3D content and the depth plane currently on screen,
//! *where* does that content cross the plane?
//!
//! - [`Point3`] is a 3D point in stack (dataset) coordinates. 2D values use
//!   [`kurbo::Point`] throughout, matching the rest of the workspace.
//! - [`line_plane_param`] and [`intersect_line_with_z_plane`] locate the
//!   crossing of an *infinite* line with the plane `z = z_plane`.
//! - [`intersect_segment_with_z_plane`] additionally restricts the crossing
//!   to the closed segment between the two endpoints.
//!
//! A line parallel to the plane has no unique crossing. All three functions
//! report that case as a [`DegenerateLine`] error instead of letting a
//! division by zero escape as `Infinity` or `NaN`; callers pick their own
//! fallback (treat as non-intersecting, use an endpoint that already lies
//! on the plane, and so on).
//!
//! ## Example
//!
//! ```rust
//! use sliceview_geom::{Point3, intersect_line_with_z_plane};
//!
//! let a = Point3::new(0.0, 0.0, 0.0);
//! let b = Point3::new(10.0, 10.0, 10.0);
//! let hit = intersect_line_with_z_plane(a, b, 5.0).unwrap();
//! assert_eq!((hit.x, hit.y), (5.0, 5.0));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

use core::fmt;

use kurbo::Point;

/// A 3D point in stack (dataset) coordinates.
///
/// The `x`/`y` axes span a slice; `z` runs along the depth axis of the
/// stack. Screen-space values are plain [`kurbo::Point`]s and are never
/// represented by this type.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Point3 {
    /// X coordinate within a slice.
    pub x: f64,
    /// Y coordinate within a slice.
    pub y: f64,
    /// Position along the depth axis.
    pub z: f64,
}

impl Point3 {
    /// The origin of stack space.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a new point from its coordinates.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the in-slice projection of this point, dropping `z`.
    #[inline]
    #[must_use]
    pub const fn xy(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Linearly interpolates between `self` and `other`.
    ///
    /// `t = 0` yields `self`, `t = 1` yields `other`. Values outside
    /// `[0, 1]` extrapolate along the same line.
    #[inline]
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            self.x + t * (other.x - self.x),
            self.y + t * (other.y - self.y),
            self.z + t * (other.z - self.z),
        )
    }
}

impl From<(f64, f64, f64)> for Point3 {
    #[inline]
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

/// Error returned when a line is parallel to the requested z plane.
///
/// Both endpoints share the same depth (`z`), so the line either misses the
/// plane entirely or lies inside it; in neither case is there a unique
/// crossing point.
#[derive(Clone, Copy, PartialEq)]
pub struct DegenerateLine {
    /// The common depth of both endpoints.
    pub z: f64,
    /// The depth of the plane the crossing was requested for.
    pub z_plane: f64,
}

impl DegenerateLine {
    /// Returns `true` if the degenerate line lies inside the plane itself.
    #[inline]
    #[must_use]
    pub fn is_in_plane(&self) -> bool {
        self.z == self.z_plane
    }
}

impl fmt::Debug for DegenerateLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DegenerateLine {{ z: {:?}, z_plane: {:?} }}",
            self.z, self.z_plane
        )
    }
}

impl fmt::Display for DegenerateLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line at z = {} is parallel to the plane z = {} and has no unique crossing",
            self.z, self.z_plane
        )
    }
}

impl core::error::Error for DegenerateLine {}

/// Computes the parameter `t` at which the line through `p1` and `p2`
/// crosses the plane `z = z_plane`.
///
/// The line is parametrized as `P(t) = p1 + t * (p2 - p1)`, so `t = 0` is
/// `p1`, `t = 1` is `p2`, and values outside `[0, 1]` lie beyond the
/// endpoints. Solving `P(t).z = z_plane` gives
/// `t = (z_plane - p1.z) / (p2.z - p1.z)`.
///
/// # Errors
///
/// Returns [`DegenerateLine`] when `p1.z == p2.z`: the line is parallel to
/// the plane and no unique crossing exists.
pub fn line_plane_param(p1: Point3, p2: Point3, z_plane: f64) -> Result<f64, DegenerateLine> {
    let dz = p2.z - p1.z;
    if dz == 0.0 {
        return Err(DegenerateLine { z: p1.z, z_plane });
    }
    Ok((z_plane - p1.z) / dz)
}

/// Computes where the *infinite* line through `p1` and `p2` crosses the
/// plane `z = z_plane`, returning the crossing's `(x, y)`.
///
/// No bounds checking is performed: the returned point may lie outside the
/// segment between `p1` and `p2`. Callers that need a segment-bounded
/// crossing should use [`intersect_segment_with_z_plane`] or check the
/// parameter from [`line_plane_param`] themselves.
///
/// # Errors
///
/// Returns [`DegenerateLine`] when the line is parallel to the plane
/// (`p1.z == p2.z`), including the case where it lies inside the plane.
pub fn intersect_line_with_z_plane(
    p1: Point3,
    p2: Point3,
    z_plane: f64,
) -> Result<Point, DegenerateLine> {
    let t = line_plane_param(p1, p2, z_plane)?;
    Ok(Point::new(
        p1.x + t * (p2.x - p1.x),
        p1.y + t * (p2.y - p1.y),
    ))
}

/// Computes where the closed segment from `p1` to `p2` crosses the plane
/// `z = z_plane`.
///
/// Returns `Ok(None)` when the infinite line crosses the plane outside the
/// segment (`t` outside `[0, 1]`).
///
/// # Errors
///
/// Returns [`DegenerateLine`] when the segment is parallel to the plane.
/// [`DegenerateLine::is_in_plane`] distinguishes a segment lying inside the
/// plane from one that misses it entirely.
pub fn intersect_segment_with_z_plane(
    p1: Point3,
    p2: Point3,
    z_plane: f64,
) -> Result<Option<Point>, DegenerateLine> {
    let t = line_plane_param(p1, p2, z_plane)?;
    if !(0.0..=1.0).contains(&t) {
        return Ok(None);
    }
    Ok(Some(Point::new(
        p1.x + t * (p2.x - p1.x),
        p1.y + t * (p2.y - p1.y),
    )))
}
