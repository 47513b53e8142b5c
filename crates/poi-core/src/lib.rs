pub mod columns;
pub mod dedupe;
pub mod error;
pub mod frame;
pub mod frame_builder;
pub mod geometry;
pub mod index;
pub mod pipeline;
pub mod reduce;
pub mod spatial;

pub use columns::{drop_sparse_columns, missing_ratios, sparse_columns};
pub use dedupe::{drop_duplicate_geometries, duplicate_flags};
pub use error::FrameError;
pub use frame::FeatureFrame;
pub use frame_builder::build_feature_frame;
pub use geometry::{GeometryKey, kind_of, part_centroids, reduce_geometry, type_name};
pub use index::flatten_index;
pub use pipeline::{
    ContainmentStep, DuplicateGeometryStep, FeaturePipeline, FlattenIndexStep, Normalized,
    PipelineState, PointReductionStep, ProcessingStep, SparseColumnStep, build_default_pipeline,
    normalize, normalize_with,
};
pub use reduce::{PointReduction, reduce_to_points};
pub use spatial::{
    GeometryPartition, check_crs_compatibility, partition_by_kind, polygons_matching_points,
    union_frames,
};
