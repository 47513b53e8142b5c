//! CLI argument definitions for the POI normalizer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "poi-normalize",
    version,
    about = "Normalize OSM point-of-interest exports to one point per feature",
    long_about = "Normalize OSM point-of-interest exports to one point per feature.\n\n\
                  Drops sparse attribute columns, removes polygons that contain a\n\
                  point, collapses remaining polygons to centroids and removes\n\
                  duplicate geometries. Reads and writes GeoJSON."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize a GeoJSON export and write the result.
    Normalize(NormalizeArgs),

    /// Show geometry kinds and missing-value shares without writing.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct NormalizeArgs {
    /// Input GeoJSON file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file (default: <INPUT stem>.normalized.geojson next to the input).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// JSON file with normalization options; flags override its values.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Drop columns whose missing share is above this value.
    #[arg(long = "threshold", value_name = "RATIO")]
    pub threshold: Option<f64>,

    /// Spatial predicate matching polygons against points.
    #[arg(long = "predicate", value_enum)]
    pub predicate: Option<PredicateArg>,

    /// CRS label for the output. Coordinates are not transformed.
    #[arg(long = "output-crs", value_name = "CRS")]
    pub output_crs: Option<String>,

    /// Name of the grouping index level to drop.
    #[arg(long = "index-level", value_name = "NAME")]
    pub index_level: Option<String>,

    /// Normalize and report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Input GeoJSON file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Missing share above which a column is marked for dropping.
    #[arg(long = "threshold", value_name = "RATIO")]
    pub threshold: Option<f64>,
}

/// CLI spatial predicate choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum PredicateArg {
    Contains,
    Intersects,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
