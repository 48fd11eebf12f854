use super::TimingBreakdown;
use crate::reconstruct::classify::ClassifiedTokens;
use serde::Serialize;

/// Result produced by [`Reconstructor::process`](crate::Reconstructor::process).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconstructionReport {
    pub document: String,
    pub trace: PipelineTrace,
}

/// End-to-end trace describing the internal execution of the pipeline.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    /// Clustered rows of horizontal line detections.
    pub string_lines: Vec<i32>,
    pub used_anchor_fallback: bool,
    pub token_count: usize,
    pub systems: Vec<SystemTrace>,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemTrace {
    pub strings: [f32; 6],
    /// Clustered bar-line columns inside the system band.
    pub bars: Vec<i32>,
    pub column_count: usize,
    pub tokens: ClassifiedTokens,
}
