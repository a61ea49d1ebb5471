//! komawari - Reconstruct comic panels from detected page shapes
//!
//! Reads JSON page descriptions produced by an image frontend (page size,
//! outline polygons per background assumption, line segments) and writes
//! the panels of every page in reading order as a JSON array.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use komawari_core::api::{AnalyzeOptions, PageInput, analyze_page, process_pages};
use komawari_core::layout::{PageLayout, PageParams, ReadingDirection};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Reconstruct comic panels from detected page shapes.
#[derive(Parser, Debug)]
#[command(name = "komawari")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON page descriptions, or "-" for stdin
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Reading direction of the panels (ltr or rtl)
    #[arg(long, default_value = "ltr")]
    numbering: ReadingDirection,

    /// Minimum panel size as a fraction of the page size
    #[arg(long = "min-panel-ratio")]
    min_panel_ratio: Option<f64>,

    /// Distance in pixels within which a segment follows a panel edge
    #[arg(long = "segment-tolerance")]
    segment_tolerance: Option<f64>,

    /// Number of worker threads (defaults to available parallelism)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Include the panels after every pipeline phase in the output
    #[arg(long, action = ArgAction::SetTrue)]
    trace: bool,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

/// One page description as written by the frontend.
#[derive(Debug, Deserialize)]
struct PageFile {
    filename: Option<String>,
    #[serde(flatten)]
    input: PageInput,
}

/// One entry of the output array.
#[derive(Debug, Serialize)]
struct PageReport {
    filename: String,
    #[serde(flatten)]
    layout: PageLayout,
    processing_time: f64,
}

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_options(args: &Args) -> Result<AnalyzeOptions> {
    let mut params = PageParams {
        reading_direction: args.numbering,
        trace: args.trace,
        ..PageParams::default()
    };
    if let Some(ratio) = args.min_panel_ratio {
        params.min_panel_size_ratio = ratio;
    }
    if let Some(tolerance) = args.segment_tolerance {
        params.segment_tolerance = tolerance;
    }
    params.validate().context("invalid analysis parameters")?;

    Ok(AnalyzeOptions {
        params,
        threads: args.threads,
    })
}

fn read_source(path: &Path) -> Result<String> {
    let mut data = String::new();
    if path.as_os_str() == "-" {
        io::stdin()
            .read_to_string(&mut data)
            .context("failed to read stdin")?;
    } else {
        File::open(path)
            .and_then(|mut f| f.read_to_string(&mut data))
            .with_context(|| format!("failed to read {}", path.display()))?;
    }
    Ok(data)
}

/// Loads every page of `path`. A file holds one page object or an array.
fn load_pages(path: &Path) -> Result<Vec<(String, PageInput)>> {
    let data = read_source(path)?;
    let value: serde_json::Value = serde_json::from_str(&data)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    let pages: Vec<PageFile> = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value(value).map(|page| vec![page])
    }
    .with_context(|| format!("{} is not a page description", path.display()))?;

    let default_name = path.display().to_string();
    Ok(pages
        .into_iter()
        .map(|page| {
            let name = page.filename.unwrap_or_else(|| default_name.clone());
            (name, page.input)
        })
        .collect())
}

fn analyze_all(pages: &[(String, PageInput)], options: &AnalyzeOptions) -> Result<Vec<PageReport>> {
    let reports = process_pages(pages, options.threads, |(filename, input)| {
        let start = Instant::now();
        analyze_page(input, options)
            .with_context(|| format!("failed to analyse {}", filename))
            .map(|layout| PageReport {
                filename: filename.clone(),
                layout,
                processing_time: start.elapsed().as_secs_f64(),
            })
    })
    .context("failed to build worker pool")?;
    reports.into_iter().collect()
}

fn run(args: &Args) -> Result<()> {
    let options = build_options(args)?;

    let mut pages = Vec::new();
    for path in &args.files {
        if path.as_os_str() != "-" && !path.exists() {
            bail!("file not found: {}", path.display());
        }
        pages.extend(load_pages(path)?);
    }
    tracing::debug!(pages = pages.len(), "loaded page descriptions");

    let reports = analyze_all(&pages, &options)?;

    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .with_context(|| format!("failed to create output file {}", args.outfile))?;
        Box::new(BufWriter::new(file))
    };
    serde_json::to_writer_pretty(&mut output, &reports).context("failed to write output")?;
    writeln!(output)?;
    output.flush()?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);
    run(&args)
}
