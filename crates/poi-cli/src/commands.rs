use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span};

use poi_core::{FeatureFrame, build_feature_frame, missing_ratios, normalize};
use poi_ingest::{IngestOptions, read_geojson};
use poi_model::{Crs, NormalizeOptions, SpatialPredicate};
use poi_output::write_geojson;

use crate::cli::{InspectArgs, NormalizeArgs, PredicateArg};
use crate::types::{ColumnProfile, InspectOutcome, NormalizeOutcome};

/// Suffix appended to the input stem when no output path is given.
const OUTPUT_SUFFIX: &str = "normalized.geojson";

/// Innermost index level, holding the OSM element id.
const ID_LEVEL: &str = "id";

pub fn run_normalize(args: &NormalizeArgs) -> Result<NormalizeOutcome> {
    let span = info_span!("normalize", input = %args.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let options = build_options(args)?;
    let (frame, null_geometries) = load_frame(&args.input, &options.index_level)?;
    let normalized = normalize(&frame, &options)
        .with_context(|| format!("normalize {}", args.input.display()))?;

    let output = if args.dry_run {
        info!("dry run, output not written");
        None
    } else {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&args.input));
        write_geojson(&normalized.frame, &path)?;
        Some(path)
    };

    info!(
        records = normalized.report.output_records,
        duration_ms = start.elapsed().as_millis(),
        "normalization complete"
    );
    Ok(NormalizeOutcome {
        input: args.input.clone(),
        output,
        null_geometries,
        report: normalized.report,
    })
}

pub fn run_inspect(args: &InspectArgs) -> Result<InspectOutcome> {
    let threshold = match args.threshold {
        Some(value) => {
            NormalizeOptions::default()
                .with_sparse_column_threshold(value)
                .validate()?;
            value
        }
        None => NormalizeOptions::default().sparse_column_threshold,
    };
    let (frame, null_geometries) =
        load_frame(&args.input, &NormalizeOptions::default().index_level)?;
    let columns = missing_ratios(&frame.data)
        .into_iter()
        .map(|(name, missing_ratio)| ColumnProfile {
            name,
            missing_ratio,
            would_drop: missing_ratio > threshold,
        })
        .collect();
    Ok(InspectOutcome {
        input: args.input.clone(),
        records: frame.len(),
        null_geometries,
        crs: frame.crs.clone(),
        index_levels: frame.index_names(),
        kind_counts: frame.kind_counts(),
        columns,
        threshold,
    })
}

/// Resolve options: defaults, then the config file, then explicit flags.
pub fn build_options(args: &NormalizeArgs) -> Result<NormalizeOptions> {
    let mut options = match &args.config {
        Some(path) => load_options(path)?,
        None => NormalizeOptions::default(),
    };
    if let Some(threshold) = args.threshold {
        options = options.with_sparse_column_threshold(threshold);
    }
    if let Some(predicate) = args.predicate {
        options = options.with_predicate(match predicate {
            PredicateArg::Contains => SpatialPredicate::Contains,
            PredicateArg::Intersects => SpatialPredicate::Intersects,
        });
    }
    if let Some(raw) = &args.output_crs {
        let crs = Crs::parse(raw).with_context(|| format!("parse output CRS {raw:?}"))?;
        options = options.with_output_crs(crs);
    }
    if let Some(level) = &args.index_level {
        options = options.with_index_level(level.clone());
    }
    if options.index_level == ID_LEVEL {
        bail!("index level {ID_LEVEL:?} holds the record ids and cannot be dropped; choose the grouping level");
    }
    options.validate()?;
    Ok(options)
}

fn load_options(path: &Path) -> Result<NormalizeOptions> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let options: NormalizeOptions = serde_json::from_str(&text)
        .with_context(|| format!("parse config {}", path.display()))?;
    debug!(path = %path.display(), "loaded options");
    Ok(options)
}

fn load_frame(path: &Path, index_level: &str) -> Result<(FeatureFrame, usize)> {
    let ingest = IngestOptions::default().with_index_levels([index_level, ID_LEVEL]);
    let table = read_geojson(path, &ingest).with_context(|| format!("read {}", path.display()))?;
    let null_geometries = table.null_geometries;
    let frame = build_feature_frame(table).context("build feature frame")?;
    Ok((frame, null_geometries))
}

/// `<dir>/<stem>.normalized.geojson` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "output".to_string(), |stem| stem.to_string_lossy().into_owned());
    input.with_file_name(format!("{stem}.{OUTPUT_SUFFIX}"))
}
