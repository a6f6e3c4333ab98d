//! Geometry shared by the backends
//!
//! Everything here is in module units with y pointing down. Vector backends
//! take the shape list from [`Layout::shapes`]; the raster backend samples
//! [`Layout::paint_at`] at pixel centres.

use super::{Color, Eye, EyeStyle, ModuleStyle, RenderOptions};
use crate::models::QrSymbol;

/// What a shape is filled with, before colours are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) enum Paint {
    Foreground,
    EyeOuter(Eye),
    EyeInner(Eye),
}

/// Filled outline, quiet zone included in the coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Shape {
    Rect { x: f64, y: f64, w: f64, h: f64 },
    /// Unit square; corner radii clockwise from top left
    Rounded { x: f64, y: f64, radii: [f64; 4] },
    Circle { cx: f64, cy: f64, r: f64 },
    Ring { cx: f64, cy: f64, outer: f64, inner: f64 },
}

impl Shape {
    pub(super) fn center(&self) -> (f64, f64) {
        match *self {
            Shape::Rect { x, y, w, h } => (x + w / 2.0, y + h / 2.0),
            Shape::Rounded { x, y, .. } => (x + 0.5, y + 0.5),
            Shape::Circle { cx, cy, .. } | Shape::Ring { cx, cy, .. } => (cx, cy),
        }
    }
}

/// Decimal with at most four fraction digits and no trailing zeros
pub(super) fn num(value: f64) -> String {
    let text = format!("{value:.4}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

pub(super) struct Layout<'a> {
    symbol: &'a QrSymbol,
    options: &'a RenderOptions,
    /// Modules across, quiet zone included
    pub(super) total: u32,
}

impl<'a> Layout<'a> {
    /// `total` comes from [`RenderOptions::validate`]
    pub(super) fn new(symbol: &'a QrSymbol, options: &'a RenderOptions, total: u32) -> Self {
        Self {
            symbol,
            options,
            total,
        }
    }

    pub(super) fn options(&self) -> &RenderOptions {
        self.options
    }

    pub(super) fn margin(&self) -> usize {
        self.options.margin as usize
    }

    fn size(&self) -> usize {
        self.symbol.size()
    }

    pub(super) fn is_dark(&self, x: usize, y: usize) -> bool {
        self.symbol.is_dark(x, y)
    }

    fn dark(&self, x: Option<usize>, y: Option<usize>) -> bool {
        match (x, y) {
            (Some(x), Some(y)) if x < self.size() && y < self.size() => self.symbol.is_dark(x, y),
            _ => false,
        }
    }

    fn eye_at(&self, x: usize, y: usize) -> Option<(Eye, usize, usize)> {
        Eye::ALL.into_iter().find_map(|eye| {
            let (ox, oy) = eye.origin(self.size());
            ((ox..ox + 7).contains(&x) && (oy..oy + 7).contains(&y)).then_some((eye, ox, oy))
        })
    }

    /// Paint of the dark module at (x, y)
    fn module_paint(&self, x: usize, y: usize) -> Paint {
        match self.eye_at(x, y) {
            Some((eye, ox, oy)) => {
                let ring = x.abs_diff(ox + 3).max(y.abs_diff(oy + 3));
                if ring <= 1 {
                    Paint::EyeInner(eye)
                } else {
                    Paint::EyeOuter(eye)
                }
            }
            None => Paint::Foreground,
        }
    }

    /// Corner radii for a round-style module: only corners whose two
    /// neighbours are both light get rounded
    fn corner_radii(&self, x: usize, y: usize, radius: f64) -> [f64; 4] {
        let left = self.dark(x.checked_sub(1), Some(y));
        let right = self.dark(x.checked_add(1), Some(y));
        let up = self.dark(Some(x), y.checked_sub(1));
        let down = self.dark(Some(x), y.checked_add(1));
        let pick = |a: bool, b: bool| if a || b { 0.0 } else { radius };
        [
            pick(up, left),
            pick(up, right),
            pick(down, right),
            pick(down, left),
        ]
    }

    fn module_shape(&self, x: usize, y: usize) -> Shape {
        let m = self.margin() as f64;
        let (px, py) = (x as f64 + m, y as f64 + m);
        match self.options.module_style {
            ModuleStyle::Square => Shape::Rect {
                x: px,
                y: py,
                w: 1.0,
                h: 1.0,
            },
            ModuleStyle::Dot(size) => Shape::Circle {
                cx: px + 0.5,
                cy: py + 0.5,
                r: size / 2.0,
            },
            ModuleStyle::Round(size) => {
                let radii = self.corner_radii(x, y, size / 2.0);
                if radii.iter().all(|&r| r == 0.0) {
                    Shape::Rect {
                        x: px,
                        y: py,
                        w: 1.0,
                        h: 1.0,
                    }
                } else {
                    Shape::Rounded {
                        x: px,
                        y: py,
                        radii,
                    }
                }
            }
        }
    }

    fn eye_shapes(&self, eye: Eye, out: &mut Vec<(Paint, Shape)>) {
        let m = self.margin() as f64;
        let (ox, oy) = eye.origin(self.size());
        let (x, y) = (ox as f64 + m, oy as f64 + m);
        let outer = Paint::EyeOuter(eye);
        let inner = Paint::EyeInner(eye);
        match self.options.eye_style {
            EyeStyle::Module => {}
            EyeStyle::Square => {
                let rect = |x, y, w, h| Shape::Rect { x, y, w, h };
                out.push((outer, rect(x, y, 7.0, 1.0)));
                out.push((outer, rect(x, y + 6.0, 7.0, 1.0)));
                out.push((outer, rect(x, y + 1.0, 1.0, 5.0)));
                out.push((outer, rect(x + 6.0, y + 1.0, 1.0, 5.0)));
                out.push((inner, rect(x + 2.0, y + 2.0, 3.0, 3.0)));
            }
            EyeStyle::Circle => {
                let (cx, cy) = (x + 3.5, y + 3.5);
                out.push((
                    outer,
                    Shape::Ring {
                        cx,
                        cy,
                        outer: 3.5,
                        inner: 2.5,
                    },
                ));
                out.push((inner, Shape::Circle { cx, cy, r: 1.5 }));
            }
        }
    }

    /// Every filled shape: dark modules in reading order, then the eyes when
    /// they are drawn as whole shapes
    pub(super) fn shapes(&self) -> Vec<(Paint, Shape)> {
        let separate_eyes = self.options.eye_style != EyeStyle::Module;
        let mut out = Vec::new();
        for y in 0..self.size() {
            for x in 0..self.size() {
                if !self.symbol.is_dark(x, y) || (separate_eyes && self.eye_at(x, y).is_some()) {
                    continue;
                }
                out.push((self.module_paint(x, y), self.module_shape(x, y)));
            }
        }
        if separate_eyes {
            for eye in Eye::ALL {
                self.eye_shapes(eye, &mut out);
            }
        }
        out
    }

    /// Paint covering the point (u, v), in module units from the symbol's
    /// top-left corner (quiet zone excluded); `None` is background
    pub(super) fn paint_at(&self, u: f64, v: f64) -> Option<Paint> {
        let n = self.size() as f64;
        if !(0.0..n).contains(&u) || !(0.0..n).contains(&v) {
            return None;
        }
        let (x, y) = (u as usize, v as usize);

        if self.options.eye_style != EyeStyle::Module {
            if let Some((eye, ox, oy)) = self.eye_at(x, y) {
                let dx = u - (ox as f64 + 3.5);
                let dy = v - (oy as f64 + 3.5);
                let d = match self.options.eye_style {
                    EyeStyle::Circle => dx.hypot(dy),
                    _ => dx.abs().max(dy.abs()),
                };
                return if d <= 1.5 {
                    Some(Paint::EyeInner(eye))
                } else if (2.5..=3.5).contains(&d) {
                    Some(Paint::EyeOuter(eye))
                } else {
                    None
                };
            }
        }

        if !self.symbol.is_dark(x, y) {
            return None;
        }
        let (fx, fy) = (u - x as f64, v - y as f64);
        let inside = match self.options.module_style {
            ModuleStyle::Square => true,
            ModuleStyle::Dot(size) => (fx - 0.5).hypot(fy - 0.5) <= size / 2.0,
            ModuleStyle::Round(size) => {
                let [tl, tr, br, bl] = self.corner_radii(x, y, size / 2.0);
                let outside_corner = |r: f64, cx: f64, cy: f64, in_corner: bool| {
                    in_corner && (fx - cx).hypot(fy - cy) > r
                };
                !(outside_corner(tl, tl, tl, fx < tl && fy < tl)
                    || outside_corner(tr, 1.0 - tr, tr, fx > 1.0 - tr && fy < tr)
                    || outside_corner(br, 1.0 - br, 1.0 - br, fx > 1.0 - br && fy > 1.0 - br)
                    || outside_corner(bl, bl, 1.0 - bl, fx < bl && fy > 1.0 - bl))
            }
        };
        inside.then(|| self.module_paint(x, y))
    }

    /// Colour of `paint` at (u, v), coordinates as in [`Layout::paint_at`]
    pub(super) fn color(&self, paint: Paint, u: f64, v: f64) -> Color {
        match self.effective(paint) {
            Paint::Foreground => self.foreground_at(u, v),
            eye => self.solid(eye),
        }
    }

    fn foreground_at(&self, u: f64, v: f64) -> Color {
        let n = self.size() as f64;
        match &self.options.gradient {
            Some(gradient) => gradient.color_at(u / n, v / n),
            None => self.options.foreground,
        }
    }

    /// `paint` with eyes that have no colour of their own folded into the foreground
    pub(super) fn effective(&self, paint: Paint) -> Paint {
        match paint {
            Paint::EyeOuter(eye) | Paint::EyeInner(eye)
                if self.options.eye_colors[eye.index()].is_none() =>
            {
                Paint::Foreground
            }
            other => other,
        }
    }

    /// Flat colour of `paint`, ignoring any gradient
    pub(super) fn solid(&self, paint: Paint) -> Color {
        let colors = |eye: Eye| self.options.eye_colors[eye.index()];
        match paint {
            Paint::EyeOuter(eye) => colors(eye).map_or(self.options.foreground, |c| c.outer),
            Paint::EyeInner(eye) => colors(eye).map_or(self.options.foreground, |c| c.inner),
            Paint::Foreground => self.options.foreground,
        }
    }
}
