//! mabiki-bench: CLI tool for simplification tolerance experimentation.
//!
//! Runs the curve simplifier on a given curve file with configurable
//! parameters, printing reduction diagnostics. Useful for:
//!
//! - Tuning the deviation tolerance against real toolpaths or strokes
//! - Comparing open vs closed seam handling on the same point data
//! - Measuring run durations on large curves
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin mabiki-bench -- [OPTIONS] <CURVE_PATH>
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use mabiki::{Curve, Point, simplify_with_stats};

/// Simplification tolerance experimentation and diagnostics for mabiki.
///
/// Reads a 3D curve from a file, classifies and removes redundant points
/// at the given tolerance, and prints reduction diagnostics.
#[derive(Parser)]
#[command(name = "mabiki-bench", version)]
struct Cli {
    /// Path to the input curve (JSON array of [x, y, z] triples, or
    /// whitespace-separated "x y z" lines).
    curve_path: PathBuf,

    /// Maximum perpendicular deviation a removed point may introduce.
    #[arg(long, default_value_t = 0.1)]
    tolerance: f64,

    /// Treat the curve as a closed loop (last point connects back to
    /// the first).
    #[arg(long)]
    closed: bool,

    /// Curve file format. Inferred from the file extension by default.
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Write the simplified curve to this path, in the input format.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of runs for timing.
    #[arg(long, default_value_t = 1, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    runs: usize,

    /// Output diagnostics as JSON instead of a human-readable report.
    #[arg(long)]
    json: bool,
}

/// Curve file format selection.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
enum Format {
    /// JSON array of [x, y, z] triples.
    Json,
    /// Whitespace- or comma-separated "x y z" lines; `#` starts a comment.
    Text,
}

impl Format {
    /// Infer the format from a file extension, defaulting to text.
    fn infer(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Parse curve points from file contents in the given format.
fn parse_points(text: &str, format: Format) -> Result<Vec<Point>, String> {
    match format {
        Format::Json => {
            let triples: Vec<[f64; 3]> =
                serde_json::from_str(text).map_err(|e| e.to_string())?;
            Ok(triples
                .into_iter()
                .map(|[x, y, z]| Point::new(x, y, z))
                .collect())
        }
        Format::Text => parse_text_points(text),
    }
}

/// Parse whitespace- or comma-separated "x y z" lines.
///
/// Blank lines and lines starting with `#` are skipped.
fn parse_text_points(text: &str) -> Result<Vec<Point>, String> {
    let mut points = Vec::new();
    for (line_number, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let cleaned = trimmed.replace(',', " ");
        let mut fields = cleaned.split_whitespace().map(str::parse::<f64>);
        match (fields.next(), fields.next(), fields.next()) {
            (Some(Ok(x)), Some(Ok(y)), Some(Ok(z))) => points.push(Point::new(x, y, z)),
            _ => {
                return Err(format!(
                    "line {}: expected three numbers, got {trimmed:?}",
                    line_number + 1,
                ));
            }
        }
    }
    Ok(points)
}

/// Encode curve points into file contents in the given format.
fn encode_points(points: &[Point], format: Format) -> Result<String, String> {
    match format {
        Format::Json => {
            let triples: Vec<[f64; 3]> = points.iter().map(|p| [p.x, p.y, p.z]).collect();
            serde_json::to_string_pretty(&triples).map_err(|e| e.to_string())
        }
        Format::Text => Ok(points
            .iter()
            .map(|p| format!("{:.6} {:.6} {:.6}", p.x, p.y, p.z))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.tolerance < 0.0 || cli.tolerance.is_nan() {
        eprintln!("Error: --tolerance must be a non-negative number");
        return ExitCode::FAILURE;
    }

    let format = cli.format.unwrap_or_else(|| Format::infer(&cli.curve_path));

    let text = match std::fs::read_to_string(&cli.curve_path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading {}: {e}", cli.curve_path.display());
            return ExitCode::FAILURE;
        }
    };

    let points = match parse_points(&text, format) {
        Ok(points) => points,
        Err(msg) => {
            eprintln!("Error parsing {}: {msg}", cli.curve_path.display());
            return ExitCode::FAILURE;
        }
    };

    let curve = Curve::new(points, cli.closed);

    eprintln!(
        "Curve: {} ({} points, {})",
        cli.curve_path.display(),
        curve.len(),
        if curve.is_closed() { "closed" } else { "open" },
    );
    eprintln!("Runs: {}", cli.runs);
    eprintln!();

    let mut durations = Vec::with_capacity(cli.runs);
    let mut outcome = None;

    for _ in 0..cli.runs {
        let started = Instant::now();
        let (simplified, stats) = simplify_with_stats(&curve, cli.tolerance);
        durations.push(started.elapsed());
        outcome = Some((simplified, stats));
    }

    // The argument parser enforces runs >= 1, so the loop ran at least once.
    let Some((simplified, stats)) = outcome else {
        return ExitCode::FAILURE;
    };

    if cli.json {
        match serde_json::to_string_pretty(&stats) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing stats: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", stats.report());
    }

    if let Some(ref output_path) = cli.output {
        let encoded = match encode_points(simplified.points(), format) {
            Ok(encoded) => encoded,
            Err(msg) => {
                eprintln!("Error encoding output: {msg}");
                return ExitCode::FAILURE;
            }
        };
        match std::fs::write(output_path, &encoded) {
            Ok(()) => {
                eprintln!(
                    "Simplified curve written to {} ({} points)",
                    output_path.display(),
                    simplified.len(),
                );
            }
            Err(e) => {
                eprintln!("Error writing {}: {e}", output_path.display());
                return ExitCode::FAILURE;
            }
        }
    }

    if cli.runs > 1 {
        print_timing_summary(&durations);
    }

    ExitCode::SUCCESS
}

/// Print aggregated timing statistics across multiple runs.
#[allow(clippy::cast_precision_loss)]
fn print_timing_summary(durations: &[Duration]) {
    let ms: Vec<f64> = durations.iter().map(|d| d.as_secs_f64() * 1000.0).collect();

    let min = ms.iter().copied().reduce(f64::min).unwrap_or(0.0);
    let max = ms.iter().copied().reduce(f64::max).unwrap_or(0.0);
    let mean = ms.iter().sum::<f64>() / ms.len().max(1) as f64;

    eprintln!();
    eprintln!(
        "Duration ({} runs): min={min:.3}ms  mean={mean:.3}ms  max={max:.3}ms",
        durations.len(),
    );
}
