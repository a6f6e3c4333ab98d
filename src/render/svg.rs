use std::fmt::Write;

use super::layout::{Layout, Paint, Shape, num};
use super::{Color, EyeStyle, GradientType, ModuleStyle};

const GRADIENT_ID: &str = "foreground";

fn fill_attrs(color: Color) -> String {
    if color.is_opaque() {
        format!("fill=\"{color}\"")
    } else {
        format!("fill=\"{color}\" fill-opacity=\"{}\"", num(color.opacity()))
    }
}

fn stop(out: &mut String, offset: u8, color: Color) {
    let opacity = if color.is_opaque() {
        String::new()
    } else {
        format!(" stop-opacity=\"{}\"", num(color.opacity()))
    };
    let _ = writeln!(
        out,
        "\t\t\t<stop offset=\"{offset}\" stop-color=\"{color}\"{opacity}/>"
    );
}

/// Gradient definition over the symbol area, in user space so every path
/// shares one gradient
fn gradient_defs(out: &mut String, layout: &Layout<'_>) {
    let Some(gradient) = layout.options().gradient else {
        return;
    };
    let m = layout.margin() as f64;
    let n = f64::from(layout.total) - 2.0 * m;
    let far = m + n;
    out.push_str("\t<defs>\n");
    let tag = if gradient.kind == GradientType::Radial {
        let _ = writeln!(
            out,
            "\t\t<radialGradient id=\"{GRADIENT_ID}\" gradientUnits=\"userSpaceOnUse\" cx=\"{0}\" cy=\"{0}\" r=\"{1}\">",
            num(m + n / 2.0),
            num(n / 2.0)
        );
        "radialGradient"
    } else {
        let (x1, y1, x2, y2) = match gradient.kind {
            GradientType::Vertical => (m, m, m, far),
            GradientType::Horizontal => (m, m, far, m),
            GradientType::Diagonal => (m, m, far, far),
            _ => (m, far, far, m),
        };
        let _ = writeln!(
            out,
            "\t\t<linearGradient id=\"{GRADIENT_ID}\" gradientUnits=\"userSpaceOnUse\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\">",
            num(x1),
            num(y1),
            num(x2),
            num(y2)
        );
        "linearGradient"
    };
    stop(out, 0, gradient.start);
    stop(out, 1, gradient.end);
    let _ = writeln!(out, "\t\t</{tag}>");
    out.push_str("\t</defs>\n");
}

fn circle(d: &mut String, cx: f64, cy: f64, r: f64, sweep: u8) {
    let _ = write!(
        d,
        "M{},{}a{2},{2} 0 1,{sweep} {3},0a{2},{2} 0 1,{sweep} -{3},0z",
        num(cx - r),
        num(cy),
        num(r),
        num(2.0 * r)
    );
}

/// Clockwise outline; ring holes run the other way so the nonzero rule cuts them out
fn path_data(d: &mut String, shape: &Shape) {
    match *shape {
        Shape::Rect { x, y, w, h } => {
            let _ = write!(d, "M{},{}h{2}v{3}h-{2}z", num(x), num(y), num(w), num(h));
        }
        Shape::Rounded { x, y, radii } => {
            let [tl, tr, br, bl] = radii;
            let _ = write!(d, "M{},{}H{}", num(x + tl), num(y), num(x + 1.0 - tr));
            if tr > 0.0 {
                let _ = write!(d, "a{0},{0} 0 0,1 {0},{0}", num(tr));
            }
            let _ = write!(d, "V{}", num(y + 1.0 - br));
            if br > 0.0 {
                let _ = write!(d, "a{0},{0} 0 0,1 -{0},{0}", num(br));
            }
            let _ = write!(d, "H{}", num(x + bl));
            if bl > 0.0 {
                let _ = write!(d, "a{0},{0} 0 0,1 -{0},-{0}", num(bl));
            }
            let _ = write!(d, "V{}", num(y + tl));
            if tl > 0.0 {
                let _ = write!(d, "a{0},{0} 0 0,1 {0},-{0}", num(tl));
            }
            d.push('z');
        }
        Shape::Circle { cx, cy, r } => circle(d, cx, cy, r, 1),
        Shape::Ring {
            cx,
            cy,
            outer,
            inner,
        } => {
            circle(d, cx, cy, outer, 1);
            circle(d, cx, cy, inner, 0);
        }
    }
}

/// Shapes in module coordinates, scaled to `size` by the viewBox. One path
/// per fill: the foreground (flat or gradient) and each separately coloured
/// eye part.
pub(super) fn render(layout: &Layout<'_>) -> String {
    let options = layout.options();
    let total = layout.total;
    let crisp = options.module_style == ModuleStyle::Square && options.eye_style != EyeStyle::Circle;

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{0}\" height=\"{0}\" viewBox=\"0 0 {1} {1}\"{2}>",
        options.size,
        total,
        if crisp { " shape-rendering=\"crispEdges\"" } else { "" }
    );
    gradient_defs(&mut out, layout);
    let _ = writeln!(
        out,
        "\t<rect width=\"100%\" height=\"100%\" {}/>",
        fill_attrs(options.background)
    );

    let mut groups: Vec<(Paint, String)> = vec![(Paint::Foreground, String::new())];
    for (paint, shape) in layout.shapes() {
        let paint = layout.effective(paint);
        let index = match groups.iter().position(|(p, _)| *p == paint) {
            Some(index) => index,
            None => {
                groups.push((paint, String::new()));
                groups.len() - 1
            }
        };
        let d = &mut groups[index].1;
        if !d.is_empty() {
            d.push(' ');
        }
        path_data(d, &shape);
    }

    for (paint, d) in groups {
        if d.is_empty() {
            continue;
        }
        let fill = match (paint, options.gradient.is_some()) {
            (Paint::Foreground, true) => format!("fill=\"url(#{GRADIENT_ID})\""),
            (paint, _) => fill_attrs(layout.solid(paint)),
        };
        let _ = writeln!(out, "\t<path d=\"{d}\" {fill}/>");
    }
    out.push_str("</svg>\n");
    out
}
