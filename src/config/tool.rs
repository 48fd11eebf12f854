use crate::error::TabError;
use crate::reconstruct::ReconstructParams;
use crate::segments::RunLengthOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub reconstruct: ReconstructParams,
    pub detector: RunLengthOptions,
    /// OCR token sidecar; defaults to `<image>.ocr.json`.
    pub tokens: Option<PathBuf>,
    /// Where to write the pipeline trace as JSON, if anywhere.
    pub report_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<ToolConfig, TabError> {
    let data = fs::read_to_string(path).map_err(|e| {
        TabError::config(format!("failed to read config {}: {e}", path.display()))
    })?;
    serde_json::from_str(&data).map_err(|e| {
        TabError::config(format!("failed to parse config {}: {e}", path.display()))
    })
}
