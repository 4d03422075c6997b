use crate::config::load_config;
use crate::generate::generate_svg_with;
use crate::measure;
use crate::params::SvgParams;
use crate::query::params_from_query;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "svgplate", version, about = "Placeholder and badge SVG generator")]
pub struct Args {
    /// Text to render; literal \n sequences become line breaks
    #[arg(short = 't', long = "text")]
    pub text: Option<String>,

    /// Text fill color
    #[arg(long = "fill")]
    pub fill: Option<String>,

    /// Font size in user units
    #[arg(long = "fontSize")]
    pub font_size: Option<f32>,

    /// Font family
    #[arg(long = "fontFamily")]
    pub font_family: Option<String>,

    /// Background color
    #[arg(long = "bg")]
    pub bg: Option<String>,

    /// Rotation about the document center, in degrees
    #[arg(long = "rotate")]
    pub rotate: Option<f32>,

    /// Document width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Document height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// JSON file with the full parameter document, or '-' for stdin
    #[arg(short = 'p', long = "params")]
    pub params: Option<PathBuf>,

    /// Raw query string (e.g. "text=Hi&fill=red"), parsed with the same
    /// sanitization and clamping a served request gets
    #[arg(short = 'q', long = "query")]
    pub query: Option<String>,

    /// Size the document from its text (badge mode)
    #[arg(long = "auto-size")]
    pub auto_size: bool,

    /// Config JSON file of default/limit overrides
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Output file. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref()).context("loading config file")?;

    let mut params = if let Some(path) = args.params.as_deref() {
        read_params(path)?
    } else if let Some(query) = args.query.as_deref() {
        params_from_query(query, &config)
    } else {
        SvgParams::default()
    };

    // Flags override file/query values. Flag input is trusted; the caller
    // owns their terminal, so nothing here goes through the sanitizer.
    if let Some(text) = args.text {
        params.text = Some(text.replace("\\n", "\n"));
    }
    if let Some(fill) = args.fill {
        params.fill = Some(fill);
    }
    if let Some(font_size) = args.font_size {
        params.font_size = Some(font_size);
    }
    if let Some(font_family) = args.font_family {
        params.font_family = Some(font_family);
    }
    if let Some(bg) = args.bg {
        params.background = Some(bg);
    }
    if let Some(rotate) = args.rotate {
        params.rotate = Some(rotate);
    }
    if let Some(width) = args.width {
        params.width = Some(width);
    }
    if let Some(height) = args.height {
        params.height = Some(height);
    }

    if args.auto_size {
        measure::apply_badge_size(&mut params, &config);
    }

    let svg = generate_svg_with(&params, &config.defaults);
    write_output_svg(&svg, args.output.as_deref())
}

fn read_params(path: &Path) -> Result<SvgParams> {
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading params file {}", path.display()))?
    };
    serde_json::from_str(&contents).context("parsing params file")
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}
