//! Orchestration of the reconstruction stages for one page.
//!
//! 1) String lines: horizontal segments from the line backend are clustered
//!    and split into six-string systems.
//! 2) OCR runs once for the page; the tokens are shared by every system.
//! 3) If no system came out of step 1, tuning-label anchors are tried.
//! 4) Each system independently gets its bar lines (vertical segments inside
//!    its band), its tokens classified, a column timeline and a text grid.
//! 5) Blocks are concatenated top to bottom under the document header.

use super::anchors::locate_by_anchors;
use super::classify::{classify_tokens, ClassifyScope};
use super::cluster1d::cluster_coordinates;
use super::options::ReconstructParams;
use super::render::{render_block, render_document, render_grid};
use super::systems::{segment_systems, System};
use super::timeline::build_columns;
use crate::backend::{LineDetector, LineRequest, TextRecognizer};
use crate::diagnostics::{InputDescriptor, PipelineTrace, ReconstructionReport, SystemTrace};
use crate::error::TabError;
use crate::image::ImageU8;
use crate::segments::coordinates_for;
use crate::types::{Orientation, Token};
use log::{debug, info, warn};
use std::time::Instant;

pub struct Reconstructor<L, R> {
    params: ReconstructParams,
    lines: L,
    text: R,
}

struct SystemOutput {
    top: f32,
    block: String,
    trace: SystemTrace,
}

impl<L: LineDetector, R: TextRecognizer> Reconstructor<L, R> {
    pub fn new(params: ReconstructParams, lines: L, text: R) -> Result<Self, TabError> {
        params.validate()?;
        Ok(Self {
            params,
            lines,
            text,
        })
    }

    pub fn params(&self) -> &ReconstructParams {
        &self.params
    }

    /// Convenience wrapper returning only the document text.
    pub fn convert(&self, image: ImageU8<'_>) -> Result<String, TabError> {
        self.process(image).map(|report| report.document)
    }

    pub fn process(&self, image: ImageU8<'_>) -> Result<ReconstructionReport, TabError> {
        let t0 = Instant::now();
        let params = &self.params;
        let mut trace = PipelineTrace {
            input: InputDescriptor {
                width: image.w,
                height: image.h,
            },
            ..Default::default()
        };

        let stage = Instant::now();
        let segments = self.lines.detect_lines(image, LineRequest::Strings)?;
        let rows = coordinates_for(&segments, Orientation::Horizontal, params.orientation_tolerance_px);
        trace.string_lines = cluster_coordinates(&rows, params.line_proximity_px);
        let mut systems = segment_systems(
            &trace.string_lines,
            params.system_gap_factor,
            params.min_system_lines,
        );
        debug!(
            "Reconstructor::process {} segments -> {} string lines -> {} systems",
            segments.len(),
            trace.string_lines.len(),
            systems.len()
        );
        trace.timings.push("strings", elapsed_ms(stage));

        let stage = Instant::now();
        let tokens = self.text.detect_tokens(image)?;
        trace.token_count = tokens.len();
        trace.timings.push("ocr", elapsed_ms(stage));

        if systems.is_empty() {
            info!("Reconstructor::process no systems from lines, trying tuning-label anchors");
            if let Some(system) = locate_by_anchors(&tokens, image.w, params.anchor_region_ratio) {
                trace.used_anchor_fallback = true;
                systems.push(system);
            }
        }
        if systems.is_empty() {
            warn!("Reconstructor::process found neither string lines nor tuning labels");
            return Err(TabError::StructuralDetection);
        }
        systems.sort_by(|a, b| a.top().total_cmp(&b.top()));

        let stage = Instant::now();
        let margin = params.string_assignment_margin_px;
        let jobs: Vec<(System, f32)> = systems
            .iter()
            .enumerate()
            .map(|(i, system)| {
                let ceiling = match i {
                    0 => f32::NEG_INFINITY,
                    _ => systems[i - 1].span(margin).1,
                };
                (system.clone(), ceiling)
            })
            .collect();

        #[cfg(feature = "parallel")]
        let results: Vec<Result<SystemOutput, TabError>> = {
            use rayon::prelude::*;
            jobs.par_iter()
                .map(|(system, ceiling)| self.process_system(image, system, *ceiling, &tokens))
                .collect()
        };
        #[cfg(not(feature = "parallel"))]
        let results: Vec<Result<SystemOutput, TabError>> = jobs
            .iter()
            .map(|(system, ceiling)| self.process_system(image, system, *ceiling, &tokens))
            .collect();

        let mut outputs = results.into_iter().collect::<Result<Vec<_>, _>>()?;
        outputs.sort_by(|a, b| a.top.total_cmp(&b.top));
        trace.timings.push("systems", elapsed_ms(stage));

        let bpm = outputs
            .iter()
            .find_map(|o| o.trace.tokens.tempo)
            .unwrap_or(params.header.default_bpm);
        let blocks: Vec<String> = outputs.iter().map(|o| o.block.clone()).collect();
        let document = render_document(&params.header.title, bpm, &blocks);
        trace.systems = outputs.into_iter().map(|o| o.trace).collect();
        trace.timings.total_ms = elapsed_ms(t0);

        Ok(ReconstructionReport { document, trace })
    }

    fn process_system(
        &self,
        image: ImageU8<'_>,
        system: &System,
        ceiling: f32,
        tokens: &[Token],
    ) -> Result<SystemOutput, TabError> {
        let params = &self.params;
        let margin = params.string_assignment_margin_px;
        let (top, bottom) = system.span(margin);
        let request = LineRequest::Bars {
            top: top.max(0.0).floor() as usize,
            bottom: ((bottom.max(0.0).ceil() as usize) + 1).min(image.h),
            min_length_px: (system.bottom() - system.top()) * params.bar_min_length_ratio,
        };
        let segments = self.lines.detect_lines(image, request)?;
        let xs = coordinates_for(&segments, Orientation::Vertical, params.orientation_tolerance_px);
        let bars = cluster_coordinates(&xs, params.bar_proximity_px);

        let classified = classify_tokens(
            tokens,
            system,
            ClassifyScope::for_system(system, margin, ceiling),
        );
        let columns = build_columns(classified.notes.clone(), &bars, params.column_proximity_px);
        let lines = render_grid(&columns, system.labels());
        debug!(
            "Reconstructor::process_system top={:.0} bars={} notes={} columns={}",
            system.top(),
            bars.len(),
            classified.notes.len(),
            columns.len()
        );

        Ok(SystemOutput {
            top: system.top(),
            block: render_block(&lines),
            trace: SystemTrace {
                strings: system.strings,
                bars,
                column_count: columns.len(),
                tokens: classified,
            },
        })
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
