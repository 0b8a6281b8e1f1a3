//! Block placement and thumbnail previews.
//!
//! Stored blocks are re-inserted at a base point with a uniform scale and a
//! rotation; previews fit the sampled outline into a fixed pixel box with the
//! y axis pointing down.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use svg::node::element::{Polygon, Polyline as SvgPolyline};
use svg::Document;

use crate::curves::{Arc, Circle, Curve, Ellipse, Line, Polyline, Spline};
use crate::error::ParseRgbError;
use crate::geom2::{Affine2, AreaCfg, Bounds2, Pt2};

/// Insertion of a stored block: scale, then rotate, then move to `base`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub base: Pt2,
    pub scale: f64,
    /// CCW rotation in radians.
    pub rotation: f64,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            base: Pt2::zeros(),
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

impl Placement {
    pub fn to_affine(&self) -> Affine2 {
        Affine2::translation(self.base).compose(&Affine2::rotation_scale(self.rotation, self.scale))
    }

    /// Angle offset applied to arcs; a negative scale is a half turn.
    fn angle_offset(&self) -> f64 {
        if self.scale < 0.0 {
            self.rotation + PI
        } else {
            self.rotation
        }
    }
}

impl Curve {
    /// The curve moved by `placement`. Arcs stay arcs and bulges are kept,
    /// since a uniform similarity with positive determinant preserves both.
    pub fn placed(&self, placement: &Placement) -> Curve {
        let f = placement.to_affine();
        let s = placement.scale.abs();
        let da = placement.angle_offset();
        match self {
            Curve::Line(l) => Curve::Line(Line {
                start: f.apply(l.start),
                end: f.apply(l.end),
            }),
            Curve::Arc(a) => Curve::Arc(Arc {
                center: f.apply(a.center),
                radius: a.radius * s,
                start_angle: a.start_angle + da,
                end_angle: a.end_angle + da,
            }),
            Curve::Circle(c) => Curve::Circle(Circle {
                center: f.apply(c.center),
                radius: c.radius * s,
            }),
            Curve::Ellipse(e) => Curve::Ellipse(Ellipse {
                center: f.apply(e.center),
                major_axis: f.apply_vector(e.major_axis),
                ..e.clone()
            }),
            Curve::Spline(sp) => Curve::Spline(Spline {
                control_points: sp.control_points.iter().map(|p| f.apply(*p)).collect(),
                fit_points: sp.fit_points.iter().map(|p| f.apply(*p)).collect(),
                ..sp.clone()
            }),
            Curve::Polyline(p) => Curve::Polyline(Polyline {
                vertices: p.vertices.iter().map(|v| f.apply(*v)).collect(),
                ..p.clone()
            }),
        }
    }
}

/// Map `bounds` into a `width × height` pixel box, keeping `margin` pixels
/// free on every side. Uniform scale, y flipped, content centred.
///
/// A zero extent on one axis is fitted by the other; a single point maps to
/// the box centre at scale 1.
pub fn fit_to_thumbnail(bounds: &Bounds2, width: f64, height: f64, margin: f64) -> Affine2 {
    let avail_w = (width - 2.0 * margin).max(1.0);
    let avail_h = (height - 2.0 * margin).max(1.0);
    let (bw, bh) = (bounds.width(), bounds.height());
    let s = match (bw > 0.0, bh > 0.0) {
        (true, true) => (avail_w / bw).min(avail_h / bh),
        (true, false) => avail_w / bw,
        (false, true) => avail_h / bh,
        (false, false) => 1.0,
    };
    let c = bounds.center();
    Affine2 {
        m: nalgebra::Matrix2::new(s, 0.0, 0.0, -s),
        t: Pt2::new(width / 2.0 - s * c.x, height / 2.0 + s * c.y),
    }
}

/// Stroke colour of a preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRgbError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(err());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Rgb::new(byte(0)?, byte(2)?, byte(4)?))
    }
}

/// One stroked path in pixel space.
#[derive(Clone, Debug, PartialEq)]
pub struct ThumbPath {
    pub points: Vec<Pt2>,
    pub closed: bool,
}

/// Sampled curves fitted to a pixel box.
#[derive(Clone, Debug, PartialEq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub paths: Vec<ThumbPath>,
}

impl Thumbnail {
    /// Sample `curves`, fit them into the box and keep the pixel polylines.
    /// Invalid curves are left out; no valid curve gives an empty thumbnail.
    pub fn render(curves: &[Curve], width: u32, height: u32, margin: f64, cfg: &AreaCfg) -> Self {
        let sampled: Vec<(Vec<Pt2>, bool)> = curves
            .iter()
            .filter(|c| c.validate().is_ok())
            .map(|c| (c.sample(cfg), c.is_closed(cfg.join_tolerance)))
            .filter(|(pts, _)| !pts.is_empty())
            .collect();
        let bounds = sampled
            .iter()
            .filter_map(|(pts, _)| Bounds2::from_points(pts))
            .reduce(|a, b| a.merge(&b));
        let Some(bounds) = bounds else {
            return Self {
                width,
                height,
                paths: Vec::new(),
            };
        };
        let fit = fit_to_thumbnail(&bounds, width as f64, height as f64, margin);
        tracing::debug!(
            curves = sampled.len(),
            scale = fit.m[(0, 0)],
            "thumbnail fitted"
        );
        let paths = sampled
            .into_iter()
            .map(|(pts, closed)| ThumbPath {
                points: pts.into_iter().map(|p| fit.apply(p)).collect(),
                closed,
            })
            .collect();
        Self {
            width,
            height,
            paths,
        }
    }

    /// Standalone SVG document stroking every path in `color`.
    pub fn to_svg(&self, color: Rgb) -> String {
        let stroke = color.to_string();
        let mut doc = Document::new()
            .set("width", self.width)
            .set("height", self.height)
            .set("viewBox", format!("0 0 {} {}", self.width, self.height));
        for path in &self.paths {
            let pts: Vec<String> = path
                .points
                .iter()
                .map(|p| format!("{:.2},{:.2}", p.x, p.y))
                .collect();
            let pts = pts.join(" ");
            doc = if path.closed {
                doc.add(
                    Polygon::new()
                        .set("points", pts)
                        .set("fill", "none")
                        .set("stroke", stroke.as_str())
                        .set("stroke-width", 1),
                )
            } else {
                doc.add(
                    SvgPolyline::new()
                        .set("points", pts)
                        .set("fill", "none")
                        .set("stroke", stroke.as_str())
                        .set("stroke-width", 1),
                )
            };
        }
        doc.to_string()
    }
}
