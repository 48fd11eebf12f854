use serde::{Deserialize, Serialize};

/// Options controlling the run-length line extractor.
///
/// - `dark_threshold`: pixels strictly below this gray level count as ink.
/// - `min_fill_ratio`: fraction of inked pixels a bridged run must keep. Rows
///   crossing a line of text are mostly paper and fall below it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RunLengthOptions {
    pub dark_threshold: u8,
    /// Minimum horizontal run as a fraction of the image width.
    pub horizontal_min_length_ratio: f32,
    /// Largest paper gap bridged inside a horizontal run (pixels).
    pub horizontal_max_gap_px: usize,
    /// Largest paper gap bridged inside a vertical run (pixels).
    pub vertical_max_gap_px: usize,
    pub min_fill_ratio: f32,
}

impl Default for RunLengthOptions {
    fn default() -> Self {
        Self {
            dark_threshold: 128,
            horizontal_min_length_ratio: 0.2,
            horizontal_max_gap_px: 20,
            vertical_max_gap_px: 10,
            min_fill_ratio: 0.6,
        }
    }
}

impl RunLengthOptions {
    pub fn horizontal_min_length(&self, width: usize) -> f32 {
        (width as f32 * self.horizontal_min_length_ratio).max(1.0)
    }
}
