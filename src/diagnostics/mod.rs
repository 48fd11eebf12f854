//! Diagnostics data model returned alongside the rendered document.
//!
//! `ReconstructionReport` bundles the text output with a `PipelineTrace`
//! describing what every stage saw: stage timings, clustered string rows,
//! whether the tuning-label fallback kicked in, and a per-system summary.

pub mod pipeline;
pub mod timing;

pub use pipeline::{InputDescriptor, PipelineTrace, ReconstructionReport, SystemTrace};
pub use timing::{StageTiming, TimingBreakdown};
