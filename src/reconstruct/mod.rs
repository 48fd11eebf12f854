//! Tablature reconstruction from line detections and OCR tokens.
//!
//! The stages run strictly forward:
//!
//! - [`cluster1d`]: merge near-duplicate line coordinates.
//! - [`systems`]: split string rows into six-string systems.
//! - [`anchors`]: tuning-label fallback when no system was found.
//! - [`classify`]: notes and metadata from OCR tokens.
//! - [`timeline`]: notes and bars chained into x-ordered columns.
//! - [`render`]: columns written into a per-string character grid.
//! - [`pipeline`]: the [`Reconstructor`] running all of the above.

pub mod anchors;
pub mod classify;
pub mod cluster1d;
pub mod options;
pub mod pipeline;
pub mod render;
pub mod systems;
pub mod timeline;

pub use classify::{ClassifiedTokens, MeasureNumber};
pub use options::{HeaderOptions, ReconstructParams};
pub use pipeline::Reconstructor;
pub use systems::System;
pub use timeline::{Column, Event, NoteEvent};
