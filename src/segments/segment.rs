use crate::types::{LineDetection, Orientation};
use serde::{Deserialize, Serialize};

/// Identifier referencing a segment recorded in the pipeline trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(pub u32);

/// Line segment reported by a line backend, in image pixel coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentId,
    pub p0: [f32; 2],
    pub p1: [f32; 2],
    /// Saliency proxy (inked length); informational only.
    pub strength: f32,
}

impl Segment {
    pub fn new(id: SegmentId, p0: [f32; 2], p1: [f32; 2], strength: f32) -> Self {
        Self {
            id,
            p0,
            p1,
            strength,
        }
    }

    pub fn midpoint(&self) -> [f32; 2] {
        [
            (self.p0[0] + self.p1[0]) * 0.5,
            (self.p0[1] + self.p1[1]) * 0.5,
        ]
    }

    pub fn length(&self) -> f32 {
        let dx = self.p1[0] - self.p0[0];
        let dy = self.p1[1] - self.p0[1];
        (dx * dx + dy * dy).sqrt()
    }

    /// Horizontal when the endpoints' vertical delta is below `tol_px`,
    /// vertical when the horizontal delta is. The vertical delta is tested
    /// first, so a stub short in both directions counts as horizontal.
    /// Anything else is ignored.
    pub fn orientation(&self, tol_px: f32) -> Option<Orientation> {
        let dx = (self.p1[0] - self.p0[0]).abs();
        let dy = (self.p1[1] - self.p0[1]).abs();
        if dy < tol_px {
            Some(Orientation::Horizontal)
        } else if dx < tol_px {
            Some(Orientation::Vertical)
        } else {
            None
        }
    }

    /// Reduce to a [`LineDetection`] at the rounded midpoint of the normal axis.
    pub fn to_detection(&self, tol_px: f32) -> Option<LineDetection> {
        let mid = self.midpoint();
        match self.orientation(tol_px)? {
            Orientation::Horizontal => Some(LineDetection::horizontal(mid[1].round() as i32)),
            Orientation::Vertical => Some(LineDetection::vertical(mid[0].round() as i32)),
        }
    }
}

/// Classify segments and keep the coordinates of one orientation.
pub fn coordinates_for(segments: &[Segment], orientation: Orientation, tol_px: f32) -> Vec<i32> {
    segments
        .iter()
        .filter_map(|s| s.to_detection(tol_px))
        .filter(|d| d.orientation == orientation)
        .map(|d| d.coordinate)
        .collect()
}
