//! Module shapes, finder pattern ("eye") styling, gradients and image overlays

use std::fmt;
use std::str::FromStr;

use super::Color;
use crate::error::RenderError;

/// Shape drawn for each dark module
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ModuleStyle {
    /// Full unit squares
    #[default]
    Square,
    /// Circles, the value being the diameter as a fraction of a module
    Dot(f64),
    /// Squares with their outside corners rounded. The value is the corner
    /// diameter as a fraction of a module; corners touching another dark
    /// module stay square so neighbours join up.
    Round(f64),
}

impl ModuleStyle {
    /// Size used for `dot` and `round` when none is given
    pub const DEFAULT_SIZE: f64 = 0.5;

    /// Style by name (`square`, `dot` or `round`); `size` is ignored for `square`
    pub fn new(name: &str, size: f64) -> Result<Self, RenderError> {
        let style = match name.trim().to_ascii_lowercase().as_str() {
            "square" => ModuleStyle::Square,
            "dot" => ModuleStyle::Dot(size),
            "round" => ModuleStyle::Round(size),
            _ => return Err(RenderError::UnknownStyle(name.to_string())),
        };
        style.validate()?;
        Ok(style)
    }

    pub(crate) fn validate(&self) -> Result<(), RenderError> {
        match *self {
            ModuleStyle::Square => Ok(()),
            ModuleStyle::Dot(size) | ModuleStyle::Round(size) if (0.0..1.0).contains(&size) => {
                Ok(())
            }
            ModuleStyle::Dot(size) | ModuleStyle::Round(size) => {
                Err(RenderError::InvalidStyleSize(size))
            }
        }
    }
}

/// How the three finder patterns are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EyeStyle {
    /// Module by module, in the module style
    #[default]
    Module,
    /// Solid square ring around a solid 3x3 square
    Square,
    /// Circular ring around a disc
    Circle,
}

impl FromStr for EyeStyle {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "module" => Ok(EyeStyle::Module),
            "square" => Ok(EyeStyle::Square),
            "circle" => Ok(EyeStyle::Circle),
            _ => Err(RenderError::UnknownStyle(s.to_string())),
        }
    }
}

impl fmt::Display for EyeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EyeStyle::Module => "module",
            EyeStyle::Square => "square",
            EyeStyle::Circle => "circle",
        })
    }
}

/// One of the three finder patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eye {
    /// Index 0
    TopLeft,
    /// Index 1
    TopRight,
    /// Index 2
    BottomLeft,
}

impl Eye {
    /// All eyes in index order
    pub const ALL: [Eye; 3] = [Eye::TopLeft, Eye::TopRight, Eye::BottomLeft];

    /// Position in [`Eye::ALL`]
    pub fn index(self) -> usize {
        match self {
            Eye::TopLeft => 0,
            Eye::TopRight => 1,
            Eye::BottomLeft => 2,
        }
    }

    /// Top-left module of the 7x7 pattern in a symbol `size` modules across
    pub(crate) fn origin(self, size: usize) -> (usize, usize) {
        match self {
            Eye::TopLeft => (0, 0),
            Eye::TopRight => (size - 7, 0),
            Eye::BottomLeft => (0, size - 7),
        }
    }
}

impl TryFrom<usize> for Eye {
    type Error = RenderError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Eye::ALL
            .get(index)
            .copied()
            .ok_or(RenderError::InvalidEye(index))
    }
}

/// Colours for one eye, overriding the foreground
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EyeColor {
    /// The 3x3 centre
    pub inner: Color,
    /// The 7x7 ring
    pub outer: Color,
}

/// Direction of a foreground gradient across the symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradientType {
    /// Top to bottom
    Vertical,
    /// Left to right
    Horizontal,
    /// Top left to bottom right
    Diagonal,
    /// Bottom left to top right
    InverseDiagonal,
    /// Centre outwards; corners past the inscribed circle keep the end colour
    Radial,
}

impl FromStr for GradientType {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "vertical" => Ok(GradientType::Vertical),
            "horizontal" => Ok(GradientType::Horizontal),
            "diagonal" => Ok(GradientType::Diagonal),
            "inverse_diagonal" => Ok(GradientType::InverseDiagonal),
            "radial" => Ok(GradientType::Radial),
            _ => Err(RenderError::UnknownStyle(s.to_string())),
        }
    }
}

/// Two-stop foreground gradient spanning the symbol (quiet zone excluded)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gradient {
    /// Colour at the start of the gradient
    pub start: Color,
    /// Colour at the end of the gradient
    pub end: Color,
    /// Direction
    pub kind: GradientType,
}

impl Gradient {
    /// Gradient from `start` to `end`
    pub fn new(start: Color, end: Color, kind: GradientType) -> Self {
        Self { start, end, kind }
    }

    /// Position along the gradient, 0 at the start and 1 at the end, of the
    /// point `(u, v)` given as fractions of the symbol width and height
    pub fn position(&self, u: f64, v: f64) -> f64 {
        let t = match self.kind {
            GradientType::Vertical => v,
            GradientType::Horizontal => u,
            GradientType::Diagonal => (u + v) / 2.0,
            GradientType::InverseDiagonal => (u + 1.0 - v) / 2.0,
            GradientType::Radial => (u - 0.5).hypot(v - 0.5) * 2.0,
        };
        t.clamp(0.0, 1.0)
    }

    /// Interpolated colour at `(u, v)`, see [`Gradient::position`]
    pub fn color_at(&self, u: f64, v: f64) -> Color {
        let t = self.position(u, v);
        let mix = |a: u8, b: u8| {
            (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
        };
        Color {
            red: mix(self.start.red, self.end.red),
            green: mix(self.start.green, self.end.green),
            blue: mix(self.start.blue, self.end.blue),
            alpha: mix(self.start.alpha, self.end.alpha),
        }
    }
}

/// Image drawn over the centre of PNG output, e.g. a logo
///
/// Only PNG output carries it; vector and text output ignore it. Keep the
/// overlay small or raise the error correction level, since every module it
/// covers has to be recovered by error correction.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    /// Encoded image (PNG)
    pub image: Vec<u8>,
    /// Overlay width as a fraction of the output width; height keeps the aspect ratio
    pub scale: f64,
}

impl Overlay {
    /// Width fraction used when none is given
    pub const DEFAULT_SCALE: f64 = 0.2;

    /// Overlay `image` at `scale` times the output width
    pub fn new(image: Vec<u8>, scale: f64) -> Self {
        Self { image, scale }
    }

    pub(crate) fn validate(&self) -> Result<(), RenderError> {
        if self.scale > 0.0 && self.scale <= 1.0 {
            Ok(())
        } else {
            Err(RenderError::InvalidOverlayScale(self.scale))
        }
    }
}
