// Copyright 2025 the Sliceview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};
use sliceview_geom::Point3;

use crate::view_box::{ProjectViewBox, StackViewBox};

/// A scale+offset map along one axis: `project = stack * scale + offset`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AxisMap {
    /// Project units per stack unit.
    pub scale: f64,
    /// Project-space offset of the stack origin.
    pub offset: f64,
}

impl AxisMap {
    /// The identity map.
    pub const IDENTITY: Self = Self::new(1.0, 0.0);

    /// Creates a new axis map.
    #[inline]
    #[must_use]
    pub const fn new(scale: f64, offset: f64) -> Self {
        Self { scale, offset }
    }

    /// Applies the map to a stack-space coordinate.
    #[inline]
    #[must_use]
    pub fn apply(&self, v: f64) -> f64 {
        v * self.scale + self.offset
    }
}

/// Per-axis scale+offset transform from stack space into project space.
///
/// Stacks with different resolutions or placements share one project
/// space; this map is how each stack's coordinates reach it. The identity
/// map covers the single-stack case.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StackToProject {
    /// Map along the X axis.
    pub x: AxisMap,
    /// Map along the Y axis.
    pub y: AxisMap,
    /// Map along the depth axis.
    pub z: AxisMap,
}

impl StackToProject {
    /// The identity transform: stack space and project space coincide.
    pub const IDENTITY: Self = Self {
        x: AxisMap::IDENTITY,
        y: AxisMap::IDENTITY,
        z: AxisMap::IDENTITY,
    };

    /// Creates a transform from per-axis maps.
    #[inline]
    #[must_use]
    pub const fn new(x: AxisMap, y: AxisMap, z: AxisMap) -> Self {
        Self { x, y, z }
    }

    /// Maps a stack-space point into project space.
    #[inline]
    #[must_use]
    pub fn project_point(&self, p: Point3) -> Point3 {
        Point3::new(self.x.apply(p.x), self.y.apply(p.y), self.z.apply(p.z))
    }

    /// Maps an in-slice stack point into project space.
    #[inline]
    #[must_use]
    pub fn project_xy(&self, p: Point) -> Point {
        Point::new(self.x.apply(p.x), self.y.apply(p.y))
    }

    /// Maps a stack depth into project space.
    #[inline]
    #[must_use]
    pub fn project_depth(&self, z: f64) -> f64 {
        self.z.apply(z)
    }

    /// Re-expresses a stack-space view box in project units.
    #[must_use]
    pub fn project_box(&self, vb: StackViewBox) -> ProjectViewBox {
        let r = vb.as_rect();
        let p0 = self.project_xy(Point::new(r.x0, r.y0));
        let p1 = self.project_xy(Point::new(r.x1, r.y1));
        ProjectViewBox::from_rect(Rect::new(
            p0.x.min(p1.x),
            p0.y.min(p1.y),
            p0.x.max(p1.x),
            p0.y.max(p1.y),
        ))
    }
}

impl Default for StackToProject {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;
    use sliceview_geom::Point3;

    use super::{AxisMap, StackToProject};
    use crate::view_box::StackViewBox;

    #[test]
    fn identity_leaves_points_alone() {
        let map = StackToProject::IDENTITY;
        let p = Point3::new(3.0, 5.0, 7.0);
        assert_eq!(map.project_point(p), p);
        assert_eq!(map.project_depth(4.5), 4.5);
    }

    #[test]
    fn anisotropic_resolution_scales_each_axis() {
        // 4x4x40 nm voxels placed 100 project units to the right.
        let map = StackToProject::new(
            AxisMap::new(4.0, 100.0),
            AxisMap::new(4.0, 0.0),
            AxisMap::new(40.0, 0.0),
        );
        let p = map.project_point(Point3::new(2.0, 3.0, 1.0));
        assert_eq!(p, Point3::new(108.0, 12.0, 40.0));
    }

    #[test]
    fn view_box_projection_keeps_units_apart() {
        let map = StackToProject::new(
            AxisMap::new(2.0, 10.0),
            AxisMap::new(2.0, -10.0),
            AxisMap::IDENTITY,
        );
        let stack_box = StackViewBox::from_rect(Rect::new(0.0, 0.0, 50.0, 25.0));
        let project_box = map.project_box(stack_box);
        assert_eq!(project_box.left(), 10.0);
        assert_eq!(project_box.top(), -10.0);
        assert_eq!(project_box.width(), 100.0);
        assert_eq!(project_box.height(), 50.0);
    }
}
