// Copyright 2025 the Sliceview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG export backend for Sliceview drawing surfaces.
//!
//! [`SvgSurfaces`] implements
//! [`SurfaceBackend`] by recording operations and can export any surface as
//! an SVG document. This is intended for debugging and inspection, not
//! pixel-perfect rendering:
//!
//! - Each marker becomes one `<circle>` element.
//! - A surface opacity below `1` is approximated with a `<g opacity>`
//!   wrapper around the content.
//! - A clear discards everything drawn before it, exactly as a live
//!   backend would.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use sliceview_surface::{MarkerStyle, SurfaceBackend, SurfaceDesc};
//! use sliceview_surface_svg::SvgSurfaces;
//!
//! let mut backend = SvgSurfaces::default();
//! let id = backend.create_surface(SurfaceDesc::new(64, 64));
//! backend.draw_circle(id, Point::new(32.0, 32.0), 3.0, &MarkerStyle::default());
//! let svg = backend.to_svg(id);
//! assert!(svg.contains("<circle"));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

use alloc::string::String;
use core::fmt::Write as _;

use kurbo::Point;
use peniko::Color;
use sliceview_surface::{
    MarkerStyle, RecordingSurfaces, SurfaceBackend, SurfaceDesc, SurfaceId, SurfaceOp,
};

/// A recording backend that exports surfaces as SVG documents.
#[derive(Default, Debug)]
pub struct SvgSurfaces {
    inner: RecordingSurfaces,
}

impl SvgSurfaces {
    /// Returns the recorded ops of a surface.
    #[must_use]
    pub fn ops(&self, id: SurfaceId) -> &[SurfaceOp] {
        self.inner.ops(id)
    }

    /// Returns `true` if the surface has been created and not destroyed.
    #[must_use]
    pub fn is_alive(&self, id: SurfaceId) -> bool {
        self.inner.is_alive(id)
    }

    /// Exports the current content of a surface as an SVG document.
    ///
    /// The surface's creation-time extent supplies the `width`/`height`
    /// attributes and the view box.
    #[must_use]
    pub fn to_svg(&self, id: SurfaceId) -> String {
        let desc = self.inner.desc(id);
        let mut body = String::new();
        for op in self.inner.ops(id) {
            match op {
                SurfaceOp::Clear => body.clear(),
                SurfaceOp::Circle {
                    center,
                    radius,
                    style,
                } => write_circle(&mut body, *center, *radius, style),
                // Opacity applies to the surface as a whole, not to the
                // content drawn after the op; the tracked value is used for
                // the wrapper below.
                SurfaceOp::SetOpacity(_) => {}
            }
        }

        let mut svg = String::new();
        let width = desc.width;
        let height = desc.height;
        let _ = writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
        );
        let opacity = self.inner.opacity(id);
        if opacity < 1.0 {
            let _ = write!(svg, "<g opacity=\"{}\">", fmt_f64(opacity.max(0.0)));
            svg.push_str(&body);
            svg.push_str("</g>");
        } else {
            svg.push_str(&body);
        }
        svg.push_str("</svg>");
        svg
    }
}

impl SurfaceBackend for SvgSurfaces {
    fn create_surface(&mut self, desc: SurfaceDesc) -> SurfaceId {
        self.inner.create_surface(desc)
    }

    fn destroy_surface(&mut self, id: SurfaceId) {
        self.inner.destroy_surface(id);
    }

    fn clear(&mut self, id: SurfaceId) {
        self.inner.clear(id);
    }

    fn draw_circle(&mut self, id: SurfaceId, center: Point, radius: f64, style: &MarkerStyle) {
        self.inner.draw_circle(id, center, radius, style);
    }

    fn set_opacity(&mut self, id: SurfaceId, opacity: f64) {
        self.inner.set_opacity(id, opacity);
    }
}

fn write_circle(body: &mut String, center: Point, radius: f64, style: &MarkerStyle) {
    let (fill, fill_alpha) = color_to_svg(style.fill);
    let (stroke, stroke_alpha) = color_to_svg(style.stroke);
    let _ = write!(
        body,
        "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"{}\"",
        fmt_f64(center.x),
        fmt_f64(center.y),
        fmt_f64(radius),
        fmt_f64(style.stroke_width),
    );
    if fill_alpha < 1.0 {
        let _ = write!(body, " fill-opacity=\"{}\"", fmt_f64(fill_alpha));
    }
    if stroke_alpha < 1.0 {
        let _ = write!(body, " stroke-opacity=\"{}\"", fmt_f64(stroke_alpha));
    }
    body.push_str("/>");
}

fn color_to_svg(color: Color) -> (String, f64) {
    let rgba = color.to_rgba8();
    let a = f64::from(rgba.a) / 255.0;
    let mut hex = String::new();
    let _ = write!(hex, "#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
    (hex, a)
}

fn fmt_f64(v: f64) -> String {
    // Keep output readable and stable enough for debugging.
    let mut s = String::new();
    if v.is_finite() {
        let _ = write!(s, "{v}");
    } else {
        s.push('0');
    }
    s
}

#[cfg(test)]
mod tests {
    use kurbo::Point;
    use sliceview_surface::{MarkerStyle, SurfaceBackend, SurfaceDesc};

    use super::SvgSurfaces;

    #[test]
    fn markers_become_circle_elements() {
        let mut backend = SvgSurfaces::default();
        let id = backend.create_surface(SurfaceDesc::new(100, 50));
        backend.draw_circle(id, Point::new(10.0, 20.0), 3.0, &MarkerStyle::default());

        let svg = backend.to_svg(id);
        assert!(svg.contains("width=\"100\" height=\"50\""), "{svg}");
        assert!(
            svg.contains("<circle cx=\"10\" cy=\"20\" r=\"3\" fill=\"#0000ff\" stroke=\"#00ffff\""),
            "{svg}"
        );
    }

    #[test]
    fn clear_discards_prior_content() {
        let mut backend = SvgSurfaces::default();
        let id = backend.create_surface(SurfaceDesc::new(100, 100));
        backend.draw_circle(id, Point::new(1.0, 1.0), 3.0, &MarkerStyle::default());
        backend.clear(id);
        backend.draw_circle(id, Point::new(2.0, 2.0), 3.0, &MarkerStyle::default());

        let svg = backend.to_svg(id);
        assert!(!svg.contains("cx=\"1\""), "{svg}");
        assert!(svg.contains("cx=\"2\""), "{svg}");
    }

    #[test]
    fn surface_opacity_wraps_the_content() {
        let mut backend = SvgSurfaces::default();
        let id = backend.create_surface(SurfaceDesc::new(10, 10));
        backend.draw_circle(id, Point::new(5.0, 5.0), 3.0, &MarkerStyle::default());
        backend.set_opacity(id, 0.5);

        let svg = backend.to_svg(id);
        assert!(svg.contains("<g opacity=\"0.5\">"), "{svg}");
        assert!(svg.ends_with("</g></svg>"), "{svg}");
    }

    #[test]
    fn empty_surface_exports_an_empty_document() {
        let mut backend = SvgSurfaces::default();
        let id = backend.create_surface(SurfaceDesc::new(10, 10));
        let svg = backend.to_svg(id);
        assert!(!svg.contains("<circle"), "{svg}");
        assert!(svg.ends_with("</svg>"), "{svg}");
    }
}
