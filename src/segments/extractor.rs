use super::options::RunLengthOptions;
use super::segment::{Segment, SegmentId};
use crate::image::{ImageU8, ImageView};

/// Running state of one bridged run of ink along a scan line.
struct RunAccumulator {
    start: Option<usize>,
    last: usize,
    inked: usize,
}

impl RunAccumulator {
    fn new() -> Self {
        Self {
            start: None,
            last: 0,
            inked: 0,
        }
    }

    fn reset(&mut self) {
        self.start = None;
        self.last = 0;
        self.inked = 0;
    }

    fn push(&mut self, pos: usize) {
        if self.start.is_none() {
            self.start = Some(pos);
        }
        self.last = pos;
        self.inked += 1;
    }

    /// Inclusive `(start, end)` and fill ratio of the current run.
    fn span(&self) -> Option<(usize, usize, f32)> {
        let start = self.start?;
        let len = self.last - start + 1;
        Some((start, self.last, self.inked as f32 / len as f32))
    }
}

/// Finds maximal runs of ink along one scan line, bridging paper gaps of up
/// to `max_gap` pixels. Returns inclusive `(start, end)` pairs.
pub(super) fn scan_runs<I>(
    inked: I,
    max_gap: usize,
    min_len: f32,
    min_fill: f32,
) -> Vec<(usize, usize)>
where
    I: IntoIterator<Item = bool>,
{
    let mut runs = Vec::new();
    let mut acc = RunAccumulator::new();
    let close = |acc: &mut RunAccumulator, runs: &mut Vec<(usize, usize)>| {
        if let Some((start, end, fill)) = acc.span() {
            let len = (end - start + 1) as f32;
            if len >= min_len && fill >= min_fill {
                runs.push((start, end));
            }
        }
        acc.reset();
    };
    for (pos, dark) in inked.into_iter().enumerate() {
        if !dark {
            continue;
        }
        if acc.start.is_some() && pos - acc.last - 1 > max_gap {
            close(&mut acc, &mut runs);
        }
        acc.push(pos);
    }
    close(&mut acc, &mut runs);
    runs
}

pub(super) struct RunExtractor<'a> {
    image: ImageU8<'a>,
    options: RunLengthOptions,
    segments: Vec<Segment>,
}

impl<'a> RunExtractor<'a> {
    pub(super) fn new(image: ImageU8<'a>, options: RunLengthOptions) -> Self {
        Self {
            image,
            options,
            segments: Vec::new(),
        }
    }

    fn push(&mut self, p0: [f32; 2], p1: [f32; 2], strength: f32) {
        let id = SegmentId(self.segments.len() as u32);
        self.segments.push(Segment::new(id, p0, p1, strength));
    }

    /// One segment per row-run at least `min_len` long.
    pub(super) fn horizontal(mut self, min_len: f32) -> Vec<Segment> {
        let threshold = self.options.dark_threshold;
        let image = self.image;
        for (y, row) in image.rows().enumerate() {
            let runs = scan_runs(
                row.iter().map(|&v| v < threshold),
                self.options.horizontal_max_gap_px,
                min_len,
                self.options.min_fill_ratio,
            );
            for (x0, x1) in runs {
                let y = y as f32;
                self.push([x0 as f32, y], [x1 as f32, y], (x1 - x0 + 1) as f32);
            }
        }
        self.segments
    }

    /// One segment per column-run inside rows `[top, bottom)`.
    pub(super) fn vertical(mut self, top: usize, bottom: usize, min_len: f32) -> Vec<Segment> {
        let threshold = self.options.dark_threshold;
        let bottom = bottom.min(self.image.h);
        if top >= bottom {
            return self.segments;
        }
        let image = self.image;
        for x in 0..image.w {
            let runs = scan_runs(
                (top..bottom).map(|y| image.get(x, y) < threshold),
                self.options.vertical_max_gap_px,
                min_len,
                self.options.min_fill_ratio,
            );
            for (y0, y1) in runs {
                let x = x as f32;
                self.push(
                    [x, (top + y0) as f32],
                    [x, (top + y1) as f32],
                    (y1 - y0 + 1) as f32,
                );
            }
        }
        self.segments
    }
}
