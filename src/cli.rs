use crate::atlas_dump::AtlasDump;
use crate::config::load_config;
use crate::dataset::build_points;
use crate::engine::{AtlasSession, RebuildTrigger, ViewTransform};
use crate::render::{render_svg, write_output_svg};
use crate::text_metrics::FontTextMetrics;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "catlas",
    version,
    about = "Label dense clusters in layered sentence-embedding projections"
)]
pub struct Args {
    /// Dataset JSON for one query word, or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// The query word the dataset was built for
    #[arg(short = 'w', long = "word")]
    pub word: String,

    /// Network layer to project (0-11)
    #[arg(short = 'l', long = "layer", default_value_t = AtlasSession::DEFAULT_LAYER)]
    pub layer: usize,

    /// Output file. Defaults to stdout for SVG/JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON/JSON5 file overriding engine constants, frame, and theme
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Viewport width
    #[arg(long = "width", default_value_t = 1280.0)]
    pub width: f32,

    /// Viewport height
    #[arg(long = "height", default_value_t = 800.0)]
    pub height: f32,

    /// Zoom scale to apply before resolving label overlaps
    #[arg(short = 'z', long = "zoom", default_value_t = 1.0)]
    pub zoom: f32,

    /// Highlight points whose sentences contain this word
    #[arg(long = "searchWithin")]
    pub search_within: Option<String>,

    /// Color dots by part of speech instead of description labels
    #[arg(long = "colorByPos", default_value_t = false)]
    pub color_by_pos: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    config.frame.width = args.width;
    config.frame.height = args.height;

    let input = read_input(args.input.as_deref())?;
    let points = build_points(&input, &config.frame)?;

    let mut session = AtlasSession::new(
        points,
        &args.word,
        config.frame.width,
        config.engine.clone(),
        config.theme.clone(),
    );
    let metrics = FontTextMetrics::new(&config.theme.font_family);
    session.rebuild(RebuildTrigger::NewQuery, &metrics);
    if args.layer != AtlasSession::DEFAULT_LAYER {
        session.rebuild(RebuildTrigger::LayerChange(args.layer), &metrics);
    }
    if args.zoom != 1.0 {
        session.rebuild(
            RebuildTrigger::ZoomChange(ViewTransform::new(args.zoom, 0.0, 0.0)),
            &metrics,
        );
    }
    if let Some(word) = args.search_within.as_deref() {
        session.subsearch_word = Some(word.to_string());
        session.highlight(None, false);
    }

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&session, &config.frame, args.color_by_pos);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            let svg = render_svg(&session, &config.frame, args.color_by_pos);
            write_png(&svg, &output, &config)?;
        }
        OutputFormat::Json => {
            AtlasDump::from_session(&session).write_json(args.output.as_deref())?;
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &crate::config::Config) -> Result<()> {
    crate::render::write_output_png(svg, output, &config.frame, &config.theme)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &crate::config::Config) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires building with the 'png' feature"
    ))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
