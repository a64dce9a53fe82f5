// Copyright 2025 the Sliceview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sliceview Viewport: viewer state and the coordinate transform pipeline.
//!
//! This crate provides a small, headless model of a stack viewer's state —
//! pan origin, zoom scale, current depth slice, and viewport pixel extent —
//! together with the stateless conversions that overlay layers run on every
//! redraw:
//!
//! - **Stack space**: the raw units of the dataset being viewed.
//! - **Project space**: stack space after a per-axis scale+offset map
//!   ([`StackToProject`]), shared across stacks.
//! - **Screen space**: pixels within the visible viewport, origin top-left.
//!
//! [`ViewportState`] is owned and mutated by the viewer alone. Layers
//! receive a shared reference on every `resize`/`redraw` call and re-query
//! it each time; scale, origin, and depth may all change between any two
//! calls, so nothing here is memoized.
//!
//! The two view-box types, [`StackViewBox`] and [`ProjectViewBox`], keep
//! the two unit systems apart at the type level: a box in one system cannot
//! be compared with or substituted for a box in the other.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use sliceview_viewport::{StackDimensions, ViewportState};
//!
//! let stack = StackDimensions::new(1024.0, 768.0, 50);
//! let mut vp = ViewportState::new(stack, Size::new(200.0, 100.0));
//! vp.pan_to(Point::new(10.0, 20.0));
//! vp.set_scale(2.0);
//!
//! // The screen transform is applied per axis around the view center.
//! let screen = vp.stack_to_screen(Point::new(15.0, 25.0));
//! assert_eq!((screen.x, screen.y), (110.0, 60.0));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod project;
mod slice;
mod state;
mod view_box;

pub use project::{AxisMap, StackToProject};
pub use slice::SlicePolicy;
pub use state::{StackDimensions, ViewportState};
pub use view_box::{ProjectViewBox, StackViewBox};
