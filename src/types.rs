use serde::{Deserialize, Serialize};

/// Tuning names of the six string-lines, highest pitch first.
pub const TUNING_LABELS: [&str; 6] = ["e", "B", "G", "D", "A", "E"];

/// Number of string-lines in one tablature system.
pub const STRING_COUNT: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A classified line segment reduced to its position along the normal axis:
/// the row of a horizontal line or the column of a vertical one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDetection {
    pub coordinate: i32,
    pub orientation: Orientation,
}

impl LineDetection {
    pub fn horizontal(y: i32) -> Self {
        Self {
            coordinate: y,
            orientation: Orientation::Horizontal,
        }
    }

    pub fn vertical(x: i32) -> Self {
        Self {
            coordinate: x,
            orientation: Orientation::Vertical,
        }
    }
}

/// Text recognised by the OCR backend.
///
/// `bbox` holds the four corners in clockwise order starting top-left, the way
/// OCR engines report quadrilateral detections. Tokens are never mutated once
/// produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub bbox: [[f32; 2]; 4],
    pub text: String,
    /// Recognition confidence; carried through but not used for filtering yet.
    #[serde(default)]
    pub confidence: f32,
}

impl Token {
    pub fn new(bbox: [[f32; 2]; 4], text: impl Into<String>, confidence: f32) -> Self {
        Self {
            bbox,
            text: text.into(),
            confidence,
        }
    }

    /// Axis-aligned token centred at `(cx, cy)` with the given size.
    pub fn centered(cx: f32, cy: f32, w: f32, h: f32, text: impl Into<String>) -> Self {
        let (x0, x1) = (cx - w * 0.5, cx + w * 0.5);
        let (y0, y1) = (cy - h * 0.5, cy + h * 0.5);
        Self::new([[x0, y0], [x1, y0], [x1, y1], [x0, y1]], text, 1.0)
    }

    /// Center from the top edge (x) and the top-left/bottom-right diagonal (y).
    pub fn center(&self) -> [f32; 2] {
        [
            (self.bbox[0][0] + self.bbox[1][0]) * 0.5,
            (self.bbox[0][1] + self.bbox[2][1]) * 0.5,
        ]
    }

    /// Trimmed text with bar glyphs removed.
    pub fn cleaned_text(&self) -> String {
        self.text.trim().replace('|', "")
    }
}
