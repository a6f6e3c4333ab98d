use super::layout::Layout;

const DARK: &str = "\u{2588}\u{2588}";
const LIGHT: &str = "  ";

/// Two characters per module so the symbol stays roughly square in a terminal.
/// Colours, styles and pixel size do not apply.
pub(super) fn render(layout: &Layout<'_>) -> String {
    let margin = layout.margin();
    let width = layout.total as usize;
    let size = width - 2 * margin;

    let mut out = String::with_capacity(width * (width * DARK.len() + 1));
    for y in 0..width {
        for x in 0..width {
            let dark = (margin..margin + size).contains(&x)
                && (margin..margin + size).contains(&y)
                && layout.is_dark(x - margin, y - margin);
            out.push_str(if dark { DARK } else { LIGHT });
        }
        out.push('\n');
    }
    out
}
