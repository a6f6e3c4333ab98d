use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use rust_qr_encoder::encoder::qr_encoder::Segmented;
use rust_qr_encoder::encoder::tables::{data_capacity_bits, data_codewords, ec_block_info};
use rust_qr_encoder::{
    Charset, Color, ECLevel, EncodeOptions, Eye, EyeStyle, Gradient, GradientType, Mode,
    ModuleStyle, OutputFormat, Overlay, RenderError, RenderOptions, Version, encode, render,
};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qrtool", version, about = "QR code encoder CLI")]
struct Cli {
    /// More log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a payload and write the symbol as png, svg, eps or text
    Encode {
        #[command(flatten)]
        payload: PayloadArgs,
        /// Force a mask pattern (0-7)
        #[arg(long)]
        mask: Option<u8>,
        /// Output format
        #[arg(long, default_value = "svg")]
        format: OutputFormat,
        #[command(flatten)]
        styling: StyleArgs,
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show version, segments, bit usage and the penalty of every mask
    Inspect {
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Print data capacity for a version and level
    Capacity {
        /// Version (1-40)
        #[arg(long = "symbol-version")]
        version: u8,
        /// Error correction level
        #[arg(long, default_value = "M")]
        level: ECLevel,
    },
}

#[derive(Args)]
struct PayloadArgs {
    /// Text to encode
    #[arg(long, conflicts_with = "input", required_unless_present = "input")]
    text: Option<String>,
    /// Read the payload bytes from a file instead
    #[arg(long)]
    input: Option<PathBuf>,
    /// Error correction level (L, M, Q, H)
    #[arg(long, default_value = "L")]
    level: ECLevel,
    /// Charset the payload is declared in; command-line text is always UTF-8
    #[arg(long, default_value = "UTF-8")]
    charset: Charset,
    /// Smallest version to consider
    #[arg(long, default_value_t = 1)]
    min_version: u8,
    /// Largest version to consider
    #[arg(long, default_value_t = 40)]
    max_version: u8,
    /// Never emit an ECI header
    #[arg(long)]
    no_eci: bool,
}

#[derive(Args)]
struct StyleArgs {
    /// Output size in pixels
    #[arg(long, default_value_t = 100)]
    size: u32,
    /// Quiet zone in modules
    #[arg(long, default_value_t = 0)]
    margin: u32,
    /// Foreground colour, "r,g,b", "r,g,b,alpha" (alpha 0-100) or "#rrggbb"
    #[arg(long, default_value = "0,0,0")]
    color: Color,
    /// Background colour, same forms as --color
    #[arg(long, default_value = "255,255,255")]
    background: Color,
    /// Module shape: square, dot or round
    #[arg(long, default_value = "square")]
    style: String,
    /// Dot diameter or corner size for --style dot/round, 0 <= size < 1
    #[arg(long, default_value_t = ModuleStyle::DEFAULT_SIZE)]
    style_size: f64,
    /// Finder pattern shape: module, square or circle
    #[arg(long, default_value = "module")]
    eye: EyeStyle,
    /// Finder pattern colours as EYE:INNER[:OUTER], EYE being 0-2; repeatable
    #[arg(long, value_parser = parse_eye_color)]
    eye_color: Vec<(Eye, Color, Color)>,
    /// Foreground gradient as START:END:TYPE (vertical, horizontal, diagonal,
    /// inverse_diagonal or radial)
    #[arg(long, value_parser = parse_gradient)]
    gradient: Option<Gradient>,
    /// PNG image drawn over the centre of PNG output
    #[arg(long)]
    merge: Option<PathBuf>,
    /// Width of --merge as a fraction of the output width
    #[arg(long, default_value_t = Overlay::DEFAULT_SCALE)]
    merge_scale: f64,
}

fn parse_eye_color(s: &str) -> Result<(Eye, Color, Color), RenderError> {
    let parts: Vec<&str> = s.split(':').collect();
    let (eye, inner, outer) = match parts[..] {
        [eye, inner] => (eye, inner, inner),
        [eye, inner, outer] => (eye, inner, outer),
        _ => return Err(RenderError::InvalidColor(s.to_string())),
    };
    let index = eye
        .trim()
        .parse::<usize>()
        .map_err(|_| RenderError::InvalidColor(s.to_string()))?;
    Ok((Eye::try_from(index)?, inner.parse()?, outer.parse()?))
}

fn parse_gradient(s: &str) -> Result<Gradient, RenderError> {
    match s.split(':').collect::<Vec<_>>()[..] {
        [start, end, kind] => Ok(Gradient::new(
            start.parse()?,
            end.parse()?,
            kind.parse::<GradientType>()?,
        )),
        _ => Err(RenderError::UnknownStyle(s.to_string())),
    }
}

impl StyleArgs {
    fn render_options(&self) -> Result<RenderOptions> {
        let mut options = RenderOptions::default()
            .with_size(self.size)
            .with_margin(self.margin)
            .with_foreground(self.color)
            .with_background(self.background)
            .with_module_style(ModuleStyle::new(&self.style, self.style_size)?)
            .with_eye_style(self.eye);
        for &(eye, inner, outer) in &self.eye_color {
            options = options.with_eye_color(eye, inner, outer);
        }
        if let Some(gradient) = self.gradient {
            options = options.with_gradient(gradient);
        }
        if let Some(path) = &self.merge {
            let image =
                std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            options = options.with_overlay(Overlay::new(image, self.merge_scale));
        }
        Ok(options)
    }
}

impl PayloadArgs {
    fn bytes(&self) -> Result<Vec<u8>> {
        match (&self.text, &self.input) {
            (Some(text), _) => Ok(text.as_bytes().to_vec()),
            (None, Some(path)) => {
                std::fs::read(path).with_context(|| format!("reading {}", path.display()))
            }
            (None, None) => bail!("either --text or --input is required"),
        }
    }

    fn options(&self) -> EncodeOptions {
        EncodeOptions::new(self.level)
            .with_charset(self.charset)
            .with_version_range(self.min_version, self.max_version)
            .with_eci(!self.no_eci)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Command::Encode {
            payload,
            mask,
            format,
            styling,
            output,
        } => {
            let mut options = payload.options();
            if let Some(mask) = mask {
                options = options.with_mask(mask);
            }
            let symbol = encode(&payload.bytes()?, &options).context("encoding failed")?;
            let render_options = styling.render_options()?;
            let bytes = render(&symbol, format, &render_options).context("rendering failed")?;
            match output {
                Some(path) => std::fs::write(&path, &bytes)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => std::io::stdout().lock().write_all(&bytes)?,
            }
        }
        Command::Inspect { payload } => inspect_cmd(&payload)?,
        Command::Capacity { version, level } => capacity_cmd(version, level)?,
    }
    Ok(())
}

fn inspect_cmd(payload: &PayloadArgs) -> Result<()> {
    let options = payload.options();
    let segmented = Segmented::new(&payload.bytes()?, &options).context("encoding failed")?;
    let version = segmented.version();

    println!(
        "Version: {} ({}x{}), level {}",
        version,
        version.size(),
        version.size(),
        options.ec_level
    );
    let mut used = 0;
    for (i, seg) in segmented.segments().iter().enumerate() {
        let bits = seg.encoded_len(version).unwrap_or_default();
        used += bits;
        println!(
            "  Segment {}: {:<12} count={:<5} bits={}",
            i,
            seg.mode().to_string(),
            seg.char_count(),
            bits
        );
    }
    println!(
        "Data bits: {} of {}",
        used,
        data_capacity_bits(version, options.ec_level)
    );

    let unmasked = segmented.into_blocks()?.into_matrix();
    let candidates = unmasked.candidates(false);
    let best = candidates
        .iter()
        .min_by_key(|c| (c.penalty().total(), c.mask().id()))
        .map(|c| c.mask());
    println!("Mask penalties:");
    for c in &candidates {
        let p = c.penalty();
        println!(
            "  mask {}: total={:<5} runs={:<4} blocks={:<4} finder={:<4} balance={}{}",
            c.mask(),
            p.total(),
            p.runs,
            p.blocks,
            p.finder_like,
            p.balance,
            if Some(c.mask()) == best { "  <- chosen" } else { "" }
        );
    }
    Ok(())
}

fn capacity_cmd(version: u8, level: ECLevel) -> Result<()> {
    let version = Version::new(version)?;
    let info = ec_block_info(version, level);
    let bits = data_capacity_bits(version, level);

    println!("Version {} ({}x{}), level {}", version, version.size(), version.size(), level);
    println!(
        "  {} data codewords ({} bits), {} block(s) x {} EC codewords",
        data_codewords(version, level),
        bits,
        info.num_blocks,
        info.ecc_per_block
    );
    for mode in Mode::DATA_MODES {
        println!("  {:<12} {} characters", mode.to_string(), max_chars(mode, version, bits));
    }
    Ok(())
}

/// Longest single-segment payload that fits `capacity` bits
fn max_chars(mode: Mode, version: Version, capacity: usize) -> usize {
    let cc_bits = mode.char_count_bits(version);
    let Some(available) = capacity.checked_sub(4 + cc_bits) else {
        return 0;
    };
    let data_bits = |n: usize| match mode {
        Mode::Numeric => n / 3 * 10 + [0, 4, 7][n % 3],
        Mode::Alphanumeric => n / 2 * 11 + (n % 2) * 6,
        Mode::Byte => n * 8,
        Mode::Kanji => n * 13,
        Mode::Eci => usize::MAX,
    };
    let mut n = 0;
    while n + 1 < 1 << cc_bits && data_bits(n + 1) <= available {
        n += 1;
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_eye_color() {
        let (eye, inner, outer) = parse_eye_color("2:255,0,0:#0000ff").unwrap();
        assert_eq!(eye, Eye::BottomLeft);
        assert_eq!(inner, Color::new(255, 0, 0));
        assert_eq!(outer, Color::new(0, 0, 255));

        let (_, inner, outer) = parse_eye_color("0:10,20,30,40").unwrap();
        assert_eq!(inner, outer);
        assert_eq!(inner.alpha, 40);

        assert!(matches!(parse_eye_color("3:0,0,0"), Err(RenderError::InvalidEye(3))));
        assert!(parse_eye_color("0").is_err());
    }

    #[test]
    fn test_style_flags() {
        let cli = Cli::try_parse_from([
            "qrtool",
            "encode",
            "--text",
            "hi",
            "--style",
            "dot",
            "--style-size",
            "0.8",
            "--eye",
            "circle",
            "--color",
            "0,0,0,50",
            "--eye-color",
            "0:255,0,0",
            "--eye-color",
            "1:0,255,0:0,0,255",
            "--gradient",
            "#000000:#ff0000:radial",
        ])
        .unwrap();
        let Command::Encode { styling, .. } = cli.command else {
            panic!("expected encode");
        };
        let options = styling.render_options().unwrap();
        assert_eq!(options.module_style, ModuleStyle::Dot(0.8));
        assert_eq!(options.eye_style, EyeStyle::Circle);
        assert_eq!(options.foreground.alpha, 50);
        assert!(options.eye_colors[0].is_some() && options.eye_colors[1].is_some());
        assert!(options.eye_colors[2].is_none());
        assert_eq!(
            options.gradient.map(|g| g.kind),
            Some(GradientType::Radial)
        );
    }

    #[test]
    fn test_style_size_out_of_range() {
        let cli = Cli::try_parse_from([
            "qrtool", "encode", "--text", "hi", "--style", "round", "--style-size", "1",
        ])
        .unwrap();
        let Command::Encode { styling, .. } = cli.command else {
            panic!("expected encode");
        };
        assert!(styling.render_options().is_err());
    }
}
