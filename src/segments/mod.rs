//! Run-length line extractor for printed tablature.
//!
//! Tab staffs are drawn as long, thin, axis-aligned strokes, so instead of a
//! general segment detector this backend binarizes the page and scans it:
//!
//! - Horizontal pass: every row is scanned for runs of ink. Paper gaps up to
//!   `horizontal_max_gap_px` are bridged so fret numbers printed over a string
//!   do not split it. Runs shorter than a fraction of the page width, or
//!   whose ink coverage is below `min_fill_ratio`, are dropped.
//! - Vertical pass: columns are scanned inside a caller-supplied row band
//!   with the same bridging rule, yielding bar-line candidates.
//!
//! A stroke several pixels thick yields one segment per pixel row/column;
//! collapsing those is the job of the coordinate clusterer.
//!
//! Complexity: one pass over the scanned pixels, O(W*H) for the full page.

mod extractor;
mod options;
mod segment;

pub use options::RunLengthOptions;
pub use segment::{coordinates_for, Segment, SegmentId};

use crate::backend::{LineDetector, LineRequest};
use crate::error::TabError;
use crate::image::ImageU8;

/// [`LineDetector`] backed by the run-length extractor.
#[derive(Clone, Debug, Default)]
pub struct RunLengthDetector {
    pub options: RunLengthOptions,
}

impl RunLengthDetector {
    pub fn new(options: RunLengthOptions) -> Self {
        Self { options }
    }
}

impl LineDetector for RunLengthDetector {
    fn detect_lines(
        &self,
        image: ImageU8<'_>,
        request: LineRequest,
    ) -> Result<Vec<Segment>, TabError> {
        Ok(extract_segments(image, request, self.options))
    }
}

pub fn extract_segments(
    image: ImageU8<'_>,
    request: LineRequest,
    options: RunLengthOptions,
) -> Vec<Segment> {
    let extractor = extractor::RunExtractor::new(image, options);
    match request {
        LineRequest::Strings => extractor.horizontal(options.horizontal_min_length(image.w)),
        LineRequest::Bars {
            top,
            bottom,
            min_length_px,
        } => extractor.vertical(top, bottom, min_length_px),
    }
}
