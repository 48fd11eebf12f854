//! Parameter types configuring the reconstruction stages.
//!
//! Every distance is in page pixels. Defaults suit scans where string lines
//! sit roughly 10-20 px apart; denser or sparser pages mostly need the
//! proximity thresholds and the assignment margin scaled together.

use crate::error::TabError;
use serde::{Deserialize, Serialize};

/// Thresholds shared by all reconstruction stages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructParams {
    /// Horizontal detections closer than this merge into one string line.
    pub line_proximity_px: i32,
    /// Vertical detections closer than this merge into one bar line.
    pub bar_proximity_px: i32,
    /// Events closer than this (along x) share a rendered column.
    pub column_proximity_px: f32,
    /// A gap wider than this multiple of the median gap starts a new system.
    pub system_gap_factor: f32,
    /// Band above the top and below the bottom string claimed by a system.
    pub string_assignment_margin_px: f32,
    /// Fewest detected lines a group needs before it is padded to six.
    pub min_system_lines: usize,
    /// Left fraction of the page searched for tuning labels.
    pub anchor_region_ratio: f32,
    /// Endpoint delta below which a segment counts as axis-aligned.
    pub orientation_tolerance_px: f32,
    /// Minimum bar length as a fraction of the system's string span.
    pub bar_min_length_ratio: f32,
    pub header: HeaderOptions,
}

impl Default for ReconstructParams {
    fn default() -> Self {
        Self {
            line_proximity_px: 10,
            bar_proximity_px: 20,
            column_proximity_px: 15.0,
            system_gap_factor: 2.5,
            string_assignment_margin_px: 20.0,
            min_system_lines: 4,
            anchor_region_ratio: 0.2,
            orientation_tolerance_px: 5.0,
            bar_min_length_ratio: 0.8,
            header: HeaderOptions::default(),
        }
    }
}

impl ReconstructParams {
    pub fn validate(&self) -> Result<(), TabError> {
        if self.line_proximity_px <= 0 || self.bar_proximity_px <= 0 {
            return Err(TabError::config("line and bar proximity must be positive"));
        }
        if !(self.column_proximity_px > 0.0) {
            return Err(TabError::config("column proximity must be positive"));
        }
        if !(self.system_gap_factor > 1.0) {
            return Err(TabError::config("system gap factor must exceed 1"));
        }
        if !(2..=6).contains(&self.min_system_lines) {
            return Err(TabError::config("min_system_lines must be within 2..=6"));
        }
        if !(self.anchor_region_ratio > 0.0 && self.anchor_region_ratio <= 1.0) {
            return Err(TabError::config("anchor region ratio must be within (0, 1]"));
        }
        if !(self.string_assignment_margin_px >= 0.0) || !(self.orientation_tolerance_px > 0.0) {
            return Err(TabError::config(
                "assignment margin must be >= 0 and orientation tolerance > 0",
            ));
        }
        if !(self.bar_min_length_ratio >= 0.0) {
            return Err(TabError::config("bar length ratio must be >= 0"));
        }
        Ok(())
    }
}

/// Placeholder text written at the top of the document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderOptions {
    pub title: String,
    /// Used when no tempo marking was recognised.
    pub default_bpm: u32,
}

impl Default for HeaderOptions {
    fn default() -> Self {
        Self {
            title: "OCR Result".to_string(),
            default_bpm: 120,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        ReconstructParams::default().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let params: ReconstructParams =
            serde_json::from_str(r#"{"column_proximity_px": 9.5, "header": {"default_bpm": 90}}"#)
                .unwrap();
        assert_eq!(params.column_proximity_px, 9.5);
        assert_eq!(params.header.default_bpm, 90);
        assert_eq!(params.header.title, "OCR Result");
        assert_eq!(params.line_proximity_px, 10);
    }

    #[test]
    fn rejects_degenerate_gap_factor() {
        let params = ReconstructParams {
            system_gap_factor: 1.0,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(TabError::Config { .. })));
    }

    #[test]
    fn rejects_min_lines_above_six() {
        let params = ReconstructParams {
            min_system_lines: 7,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }
}
