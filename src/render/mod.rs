//! Output backends for a finished symbol
//!
//! Thin layer on top of [`QrSymbol`]: PNG through the `image` crate, SVG and
//! EPS as text, and a block-character dump for terminals. Module and eye
//! shapes, colours, gradients and the PNG overlay are set in [`RenderOptions`];
//! the geometry they share lives in `layout`.

mod eps;
mod layout;
mod png;
pub mod style;
mod svg;
mod text;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::debug;

use crate::error::RenderError;
use crate::models::QrSymbol;
use layout::Layout;
pub use style::{Eye, EyeColor, EyeStyle, Gradient, GradientType, ModuleStyle, Overlay};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Raster image
    Png,
    /// Scalable vector graphics
    #[default]
    Svg,
    /// Encapsulated PostScript
    Eps,
    /// Unicode block characters, one line per module row
    Text,
}

impl OutputFormat {
    /// Usual file extension
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Eps => "eps",
            OutputFormat::Text => "txt",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            "eps" => Ok(OutputFormat::Eps),
            "text" | "txt" => Ok(OutputFormat::Text),
            _ => Err(RenderError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Eps => "eps",
            OutputFormat::Text => "text",
        })
    }
}

/// RGB colour with an opacity percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel
    pub red: u8,
    /// Green channel
    pub green: u8,
    /// Blue channel
    pub blue: u8,
    /// Opacity in percent, 100 being opaque. EPS has no transparency and ignores it.
    pub alpha: u8,
}

impl Color {
    /// Opaque black
    pub const BLACK: Color = Color::new(0, 0, 0);
    /// Opaque white
    pub const WHITE: Color = Color::new(255, 255, 255);

    /// Opaque colour from its channels
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 100,
        }
    }

    /// Same colour at `alpha` percent opacity, clamped to 100
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self {
            alpha: if alpha > 100 { 100 } else { alpha },
            ..self
        }
    }

    /// Opacity as a fraction in 0..=1
    pub fn opacity(&self) -> f64 {
        f64::from(self.alpha.min(100)) / 100.0
    }

    /// Whether the colour is fully opaque
    pub fn is_opaque(&self) -> bool {
        self.alpha >= 100
    }

    fn to_rgba(self) -> image::Rgba<u8> {
        let alpha = (self.opacity() * 255.0).round() as u8;
        image::Rgba([self.red, self.green, self.blue, alpha])
    }
}

/// Accepts `r,g,b` with each channel in 0-255, optionally followed by an
/// opacity percentage (`r,g,b,a` with `a` in 0-100), or `#rrggbb`
impl FromStr for Color {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RenderError::InvalidColor(s.to_string());
        let s = s.trim();

        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(invalid());
            }
            let channel =
                |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            return Ok(Color::new(channel(0)?, channel(2)?, channel(4)?));
        }

        let channels = s
            .split(',')
            .map(|part| part.trim().parse::<u8>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;
        match channels[..] {
            [red, green, blue] => Ok(Color::new(red, green, blue)),
            [red, green, blue, alpha] if alpha <= 100 => {
                Ok(Color::new(red, green, blue).with_alpha(alpha))
            }
            _ => Err(invalid()),
        }
    }
}

/// `#rrggbb`; opacity is not part of this form
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// How a symbol is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Target width and height in pixels (points for EPS)
    pub size: u32,
    /// Quiet zone around the symbol, in modules
    pub margin: u32,
    /// Colour of dark modules
    pub foreground: Color,
    /// Colour of light modules and the quiet zone
    pub background: Color,
    /// Shape of each dark module
    pub module_style: ModuleStyle,
    /// Shape of the finder patterns
    pub eye_style: EyeStyle,
    /// Per-eye colours, indexed by [`Eye::index`]; `None` follows the foreground
    pub eye_colors: [Option<EyeColor>; 3],
    /// Foreground gradient, replacing `foreground` where set
    pub gradient: Option<Gradient>,
    /// Image drawn over the centre of PNG output
    pub overlay: Option<Overlay>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: 100,
            margin: 0,
            foreground: Color::BLACK,
            background: Color::WHITE,
            module_style: ModuleStyle::default(),
            eye_style: EyeStyle::default(),
            eye_colors: [None; 3],
            gradient: None,
            overlay: None,
        }
    }
}

impl RenderOptions {
    /// Largest accepted `size`, and the most modules across (quiet zone
    /// included) any output may have
    pub const MAX_SIZE: u32 = 8192;

    /// Set the output size in pixels (points for EPS)
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set the quiet zone width in modules
    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the dark module colour
    pub fn with_foreground(mut self, foreground: Color) -> Self {
        self.foreground = foreground;
        self
    }

    /// Set the light module and quiet zone colour
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Set the module shape
    pub fn with_module_style(mut self, style: ModuleStyle) -> Self {
        self.module_style = style;
        self
    }

    /// Set the finder pattern shape
    pub fn with_eye_style(mut self, style: EyeStyle) -> Self {
        self.eye_style = style;
        self
    }

    /// Colour one finder pattern: `inner` for the 3x3 centre, `outer` for the ring
    pub fn with_eye_color(mut self, eye: Eye, inner: Color, outer: Color) -> Self {
        self.eye_colors[eye.index()] = Some(EyeColor { inner, outer });
        self
    }

    /// Fill the foreground with a gradient
    pub fn with_gradient(mut self, gradient: Gradient) -> Self {
        self.gradient = Some(gradient);
        self
    }

    /// Draw an image over the centre of PNG output
    pub fn with_overlay(mut self, overlay: Overlay) -> Self {
        self.overlay = Some(overlay);
        self
    }

    /// Check every option against `symbol` and return the modules across,
    /// quiet zone included
    pub(crate) fn validate(&self, symbol: &QrSymbol) -> Result<u32, RenderError> {
        if self.size == 0 || self.size > Self::MAX_SIZE {
            return Err(RenderError::InvalidSize(self.size));
        }
        self.module_style.validate()?;
        if let Some(overlay) = &self.overlay {
            overlay.validate()?;
        }
        u32::try_from(symbol.size())
            .ok()
            .zip(self.margin.checked_mul(2))
            .and_then(|(size, quiet)| size.checked_add(quiet))
            .filter(|&total| total <= Self::MAX_SIZE)
            .ok_or(RenderError::InvalidMargin(self.margin))
    }
}

/// Render `symbol` into the bytes of a file in `format`
pub fn render(
    symbol: &QrSymbol,
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<Vec<u8>, RenderError> {
    let total = options.validate(symbol)?;
    let layout = Layout::new(symbol, options, total);
    let bytes = match format {
        OutputFormat::Png => png::render(&layout)?,
        OutputFormat::Svg => svg::render(&layout).into_bytes(),
        OutputFormat::Eps => eps::render(&layout).into_bytes(),
        OutputFormat::Text => text::render(&layout).into_bytes(),
    };
    debug!(
        "rendered {}x{} symbol as {format}: {} bytes",
        symbol.size(),
        symbol.size(),
        bytes.len()
    );
    Ok(bytes)
}

/// Render and write to `path`
pub fn write_to_file<P: AsRef<Path>>(
    symbol: &QrSymbol,
    format: OutputFormat,
    options: &RenderOptions,
    path: P,
) -> Result<(), RenderError> {
    let bytes = render(symbol, format, options)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
