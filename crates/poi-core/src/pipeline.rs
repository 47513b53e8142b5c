//! Feature normalization pipeline with ordered step execution.
//!
//! Each step implements [`ProcessingStep`] and replaces the working frame
//! with its output. Diagnostics accumulate in the shared
//! [`PipelineState`].
//!
//! # Standard Pipeline Order
//!
//! 1. **FlattenIndexStep** - Drop the grouping index level
//! 2. **SparseColumnStep** - Drop columns with too many missing values
//! 3. **ContainmentStep** - Remove polygons that contain a point, then
//!    merge points and remaining polygons
//! 4. **PointReductionStep** - Collapse polygons to centroids and explode
//!    multipolygons
//! 5. **DuplicateGeometryStep** - Keep the first of identical geometries
//!
//! # Example
//!
//! ```ignore
//! use poi_core::pipeline::normalize;
//!
//! let normalized = normalize(&frame, &NormalizeOptions::default())?;
//! println!("{}", normalized.report.dropped_columns_message());
//! ```

use anyhow::{Context, Result};
use poi_model::{NormalizationReport, NormalizeOptions};
use tracing::{debug, info, info_span, warn};

use crate::columns::drop_sparse_columns;
use crate::dedupe::drop_duplicate_geometries;
use crate::frame::FeatureFrame;
use crate::index::flatten_index;
use crate::reduce::reduce_to_points;
use crate::spatial::{
    check_crs_compatibility, partition_by_kind, polygons_matching_points, union_frames,
};

/// A single step of the normalization pipeline.
pub trait ProcessingStep: Send + Sync {
    /// Execute this step on the working frame.
    ///
    /// # Arguments
    /// * `frame` - Frame to process (replaced in place)
    /// * `options` - Normalization options
    /// * `state` - Mutable pipeline state collecting diagnostics
    fn execute(
        &self,
        frame: &mut FeatureFrame,
        options: &NormalizeOptions,
        state: &mut PipelineState,
    ) -> Result<()>;

    /// Human-readable name for this step (for logging/debugging).
    fn step_name(&self) -> &str;

    /// Whether this step should be skipped for the given options.
    ///
    /// Default implementation always runs the step.
    fn should_skip(&self, _options: &NormalizeOptions) -> bool {
        false
    }
}

/// Mutable state shared across pipeline steps.
#[derive(Debug, Default)]
pub struct PipelineState {
    pub report: NormalizationReport,
}

impl PipelineState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// An ordered pipeline of processing steps.
pub struct FeaturePipeline {
    steps: Vec<Box<dyn ProcessingStep>>,
}

impl Default for FeaturePipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl FeaturePipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Add a step to the end of the pipeline.
    pub fn add_step(mut self, step: Box<dyn ProcessingStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// Insert a step at a specific position.
    pub fn insert_step(mut self, index: usize, step: Box<dyn ProcessingStep>) -> Self {
        self.steps.insert(index, step);
        self
    }

    /// Remove a step by name.
    pub fn remove_step(mut self, step_name: &str) -> Self {
        self.steps.retain(|s| s.step_name() != step_name);
        self
    }

    /// Execute all steps in order.
    pub fn execute(
        &self,
        frame: &mut FeatureFrame,
        options: &NormalizeOptions,
    ) -> Result<NormalizationReport> {
        let mut state = PipelineState::new();
        self.execute_with_state(frame, options, &mut state)?;
        Ok(state.report)
    }

    /// Execute all steps with provided state.
    pub fn execute_with_state(
        &self,
        frame: &mut FeatureFrame,
        options: &NormalizeOptions,
        state: &mut PipelineState,
    ) -> Result<()> {
        for step in &self.steps {
            if step.should_skip(options) {
                continue;
            }
            let name = step.step_name();
            step.execute(frame, options, state)
                .with_context(|| format!("step {name} failed"))?;
            debug!(step = name, records = frame.len(), "step complete");
            state.report.executed_steps.push(name.to_string());
        }
        Ok(())
    }

    /// List step names in execution order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.step_name()).collect()
    }
}

// ============================================================================
// Standard Processing Steps
// ============================================================================

/// Step 1: Drop the grouping index level.
pub struct FlattenIndexStep;

impl ProcessingStep for FlattenIndexStep {
    fn execute(
        &self,
        frame: &mut FeatureFrame,
        options: &NormalizeOptions,
        _state: &mut PipelineState,
    ) -> Result<()> {
        *frame = flatten_index(frame, &options.index_level)?;
        Ok(())
    }

    fn step_name(&self) -> &str {
        "flatten_index"
    }
}

/// Step 2: Drop columns whose missing share exceeds the threshold.
pub struct SparseColumnStep;

impl ProcessingStep for SparseColumnStep {
    fn execute(
        &self,
        frame: &mut FeatureFrame,
        options: &NormalizeOptions,
        state: &mut PipelineState,
    ) -> Result<()> {
        let (filtered, dropped) = drop_sparse_columns(frame, options.sparse_column_threshold)?;
        *frame = filtered;
        state.report.dropped_columns = dropped;
        info!(
            threshold = options.sparse_column_threshold,
            "{}",
            state.report.dropped_columns_message()
        );
        Ok(())
    }

    fn step_name(&self) -> &str {
        "drop_sparse_columns"
    }
}

/// Step 3: Remove polygons matching a point and merge the subsets.
pub struct ContainmentStep;

impl ProcessingStep for ContainmentStep {
    fn execute(
        &self,
        frame: &mut FeatureFrame,
        options: &NormalizeOptions,
        state: &mut PipelineState,
    ) -> Result<()> {
        state.report.kind_counts = frame.kind_counts();
        let partition = partition_by_kind(frame)?;
        state.report.excluded_other = partition.other;
        if partition.other > 0 {
            let types: Vec<&str> = partition.other_types.iter().copied().collect();
            warn!(
                records = partition.other,
                types = %types.join(", "),
                "excluding records that are neither points nor polygons"
            );
        }
        if let Some(mismatch) = check_crs_compatibility(&partition.points, &partition.polygons) {
            warn!("{}", mismatch.message());
            state.report.crs_mismatch = Some(mismatch);
        }

        let matched =
            polygons_matching_points(&partition.polygons, &partition.points, options.predicate);
        let suppressed = matched.iter().filter(|hit| **hit).count();
        let keep: Vec<bool> = matched.iter().map(|hit| !hit).collect();
        let standalone = partition.polygons.filter(&keep)?;
        debug!(
            points = partition.points.len(),
            polygons = partition.polygons.len(),
            suppressed,
            predicate = options.predicate.as_str(),
            "spatial join complete"
        );
        state.report.suppressed_polygons = suppressed;

        *frame = union_frames(&partition.points, &standalone, frame.crs.clone())?;
        Ok(())
    }

    fn step_name(&self) -> &str {
        "containment_dedup"
    }
}

/// Step 4: Reduce polygons to centroids.
pub struct PointReductionStep;

impl ProcessingStep for PointReductionStep {
    fn execute(
        &self,
        frame: &mut FeatureFrame,
        options: &NormalizeOptions,
        state: &mut PipelineState,
    ) -> Result<()> {
        let reduction = reduce_to_points(
            frame,
            options.other_geometry_policy,
            &options.output_crs,
        )?;
        if reduction.empty > 0 {
            warn!(
                records = reduction.empty,
                "dropping polygons without a centroid"
            );
        }
        if let Some(from) = frame.crs.as_ref()
            && *from != options.output_crs
        {
            debug!(from = %from, to = %options.output_crs, "relabelling CRS without reprojection");
        }
        state.report.exploded_records = reduction.exploded;
        state.report.empty_geometries = reduction.empty;
        state.report.excluded_other += reduction.dropped_other;
        *frame = reduction.frame;
        Ok(())
    }

    fn step_name(&self) -> &str {
        "reduce_to_points"
    }
}

/// Step 5: Drop repeated geometries.
pub struct DuplicateGeometryStep;

impl ProcessingStep for DuplicateGeometryStep {
    fn execute(
        &self,
        frame: &mut FeatureFrame,
        _options: &NormalizeOptions,
        state: &mut PipelineState,
    ) -> Result<()> {
        let (deduped, duplicates) = drop_duplicate_geometries(frame)?;
        if duplicates > 0 {
            info!(duplicates, "found {duplicates} duplicate geometries");
        }
        state.report.duplicate_geometries = duplicates;
        *frame = deduped;
        Ok(())
    }

    fn step_name(&self) -> &str {
        "drop_duplicate_geometries"
    }
}

/// Build the standard normalization pipeline.
pub fn build_default_pipeline() -> FeaturePipeline {
    FeaturePipeline::new()
        .add_step(Box::new(FlattenIndexStep))
        .add_step(Box::new(SparseColumnStep))
        .add_step(Box::new(ContainmentStep))
        .add_step(Box::new(PointReductionStep))
        .add_step(Box::new(DuplicateGeometryStep))
}

/// A normalized frame together with the run diagnostics.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub frame: FeatureFrame,
    pub report: NormalizationReport,
}

/// Run the standard pipeline on a copy of `frame`.
pub fn normalize(frame: &FeatureFrame, options: &NormalizeOptions) -> Result<Normalized> {
    normalize_with(&build_default_pipeline(), frame, options)
}

/// Run a custom pipeline on a copy of `frame`.
pub fn normalize_with(
    pipeline: &FeaturePipeline,
    frame: &FeatureFrame,
    options: &NormalizeOptions,
) -> Result<Normalized> {
    options.validate().context("invalid normalize options")?;
    let span = info_span!("normalize", records = frame.len());
    let _guard = span.enter();

    let mut working = frame.clone();
    let mut state = PipelineState::new();
    state.report.input_records = frame.len();
    pipeline.execute_with_state(&mut working, options, &mut state)?;
    state.report.output_records = working.len();
    state.report.output_crs = working.crs.clone();
    info!(
        input = state.report.input_records,
        output = state.report.output_records,
        "normalization complete"
    );
    Ok(Normalized {
        frame: working,
        report: state.report,
    })
}
