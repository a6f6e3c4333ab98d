use std::fmt::Write;

use super::Color;
use super::layout::{Layout, Shape, num};

fn set_color(out: &mut String, color: Color) {
    let _ = writeln!(
        out,
        "{:.4} {:.4} {:.4} setrgbcolor",
        f64::from(color.red) / 255.0,
        f64::from(color.green) / 255.0,
        f64::from(color.blue) / 255.0
    );
}

/// Corner of a rounded square: `arct` when rounded, a plain line otherwise
fn corner(out: &mut String, corner: (f64, f64), next: (f64, f64), radius: f64) {
    if radius > 0.0 {
        let _ = write!(
            out,
            " {} {} {} {} {} arct",
            num(corner.0),
            num(corner.1),
            num(next.0),
            num(next.1),
            num(radius)
        );
    } else {
        let _ = write!(out, " {} {} lineto", num(corner.0), num(corner.1));
    }
}

/// `flip` turns a y-down coordinate into PostScript's y-up one
fn shape(out: &mut String, shape: &Shape, flip: f64) {
    match *shape {
        Shape::Rect { x, y, w, h } => {
            let _ = writeln!(out, "{} {} {} {} F", num(x), num(flip - y - h), num(w), num(h));
        }
        Shape::Circle { cx, cy, r } => {
            let _ = writeln!(out, "{} {} {} C", num(cx), num(flip - cy), num(r));
        }
        Shape::Ring {
            cx,
            cy,
            outer,
            inner,
        } => {
            let (cx, cy) = (num(cx), num(flip - cy));
            let _ = writeln!(
                out,
                "newpath {cx} {cy} {} 0 360 arc {cx} {cy} {} 360 0 arcn closepath fill",
                num(outer),
                num(inner)
            );
        }
        Shape::Rounded { x, y, radii } => {
            let [tl, tr, br, bl] = radii;
            let (top, bottom) = (flip - y, flip - y - 1.0);
            let (left, right) = (x, x + 1.0);
            let _ = write!(out, "newpath {} {} moveto", num(x + 0.5), num(top));
            corner(out, (right, top), (right, bottom), tr);
            corner(out, (right, bottom), (left, bottom), br);
            corner(out, (left, bottom), (left, top), bl);
            corner(out, (left, top), (right, top), tl);
            out.push_str(" closepath fill\n");
        }
    }
}

/// PostScript page of `size` points, drawn in module units.
/// PostScript's origin is bottom-left, so rows are flipped. There is no
/// transparency, and gradients are approximated with one colour per shape
/// taken at its centre.
pub(super) fn render(layout: &Layout<'_>) -> String {
    let options = layout.options();
    let total = f64::from(layout.total);
    let margin = layout.margin() as f64;
    let scale = f64::from(options.size) / total;

    let mut out = String::new();
    out.push_str("%!PS-Adobe-3.0 EPSF-3.0\n");
    out.push_str("%%Creator: rust_qr_encoder\n");
    let _ = writeln!(out, "%%BoundingBox: 0 0 {0} {0}", options.size);
    out.push_str("/F { rectfill } bind def\n");
    out.push_str("/C { newpath 0 360 arc fill } bind def\n");
    set_color(&mut out, options.background);
    let _ = writeln!(out, "0 0 {0} {0} F", options.size);
    let _ = writeln!(out, "{scale:.6} {scale:.6} scale");

    let mut current = None;
    for (paint, s) in layout.shapes() {
        let (cx, cy) = s.center();
        let color = layout.color(paint, cx - margin, cy - margin);
        if current != Some(color) {
            set_color(&mut out, color);
            current = Some(color);
        }
        shape(&mut out, &s, total);
    }
    out.push_str("%%EOF\n");
    out
}
