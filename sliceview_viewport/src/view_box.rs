// Copyright 2025 the Sliceview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;

/// The visible rectangle of a viewport, in stack units.
///
/// Stack-space and project-space boxes are distinct types on purpose: the
/// two unit systems must never be compared or substituted for one another.
/// A [`ProjectViewBox`] can only be obtained by running a `StackViewBox`
/// through [`StackToProject`](crate::StackToProject).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StackViewBox(Rect);

impl StackViewBox {
    /// Creates a view box from a rectangle in stack units.
    #[inline]
    #[must_use]
    pub const fn from_rect(rect: Rect) -> Self {
        Self(rect)
    }

    /// Left edge in stack units.
    #[inline]
    #[must_use]
    pub fn left(&self) -> f64 {
        self.0.x0
    }

    /// Top edge in stack units.
    #[inline]
    #[must_use]
    pub fn top(&self) -> f64 {
        self.0.y0
    }

    /// Width in stack units.
    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.0.width()
    }

    /// Height in stack units.
    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.0.height()
    }

    /// Returns the underlying rectangle.
    #[inline]
    #[must_use]
    pub fn as_rect(&self) -> Rect {
        self.0
    }
}

/// The visible rectangle of a viewport, re-expressed in project units.
///
/// See [`StackViewBox`] for why the two unit systems get distinct types.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProjectViewBox(Rect);

impl ProjectViewBox {
    #[inline]
    pub(crate) const fn from_rect(rect: Rect) -> Self {
        Self(rect)
    }

    /// Left edge in project units.
    #[inline]
    #[must_use]
    pub fn left(&self) -> f64 {
        self.0.x0
    }

    /// Top edge in project units.
    #[inline]
    #[must_use]
    pub fn top(&self) -> f64 {
        self.0.y0
    }

    /// Width in project units.
    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.0.width()
    }

    /// Height in project units.
    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.0.height()
    }

    /// Returns the underlying rectangle.
    #[inline]
    #[must_use]
    pub fn as_rect(&self) -> Rect {
        self.0
    }
}
