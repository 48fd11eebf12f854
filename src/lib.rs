#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod backend;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod reconstruct;
pub mod types;

// Concrete line backend; the reconstruction only relies on `backend::LineDetector`.
pub mod segments;

// --- High-level re-exports -------------------------------------------------

// Main entry points: reconstructor, parameters, results.
pub use crate::diagnostics::{PipelineTrace, ReconstructionReport};
pub use crate::error::TabError;
pub use crate::reconstruct::{ReconstructParams, Reconstructor};

// Backend seams and the bundled implementations.
pub use crate::backend::{FixedLines, FixedTokens, LineDetector, LineRequest, TextRecognizer, TokenFile};
pub use crate::segments::{RunLengthDetector, RunLengthOptions};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use tabscan::prelude::*;
///
/// # fn main() -> Result<(), tabscan::TabError> {
/// let (w, h) = (640usize, 480usize);
/// let gray = vec![255u8; w * h];
/// let img = ImageU8 { w, h, stride: w, data: &gray };
///
/// let reconstructor = Reconstructor::new(
///     ReconstructParams::default(),
///     RunLengthDetector::default(),
///     FixedTokens(vec![Token::centered(120.0, 200.0, 8.0, 10.0, "5")]),
/// )?;
/// println!("{}", reconstructor.convert(img)?);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageU8;
    pub use crate::types::Token;
    pub use crate::{FixedTokens, ReconstructParams, Reconstructor, RunLengthDetector};
}
