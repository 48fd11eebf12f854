//! Grouping clustered string-line rows into six-string systems.

use crate::types::{STRING_COUNT, TUNING_LABELS};
use log::debug;
use serde::Serialize;

/// One line of tablature: six string rows, top (high `e`) to bottom (low `E`).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct System {
    pub strings: [f32; STRING_COUNT],
}

impl System {
    pub fn new(strings: [f32; STRING_COUNT]) -> Self {
        Self { strings }
    }

    pub fn top(&self) -> f32 {
        self.strings.iter().copied().fold(f32::INFINITY, f32::min)
    }

    pub fn bottom(&self) -> f32 {
        self.strings.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    /// Vertical band `[top - margin, bottom + margin]` whose tokens belong here.
    pub fn span(&self, margin: f32) -> (f32, f32) {
        (self.top() - margin, self.bottom() + margin)
    }

    /// Index of the string nearest to `y`; ties go to the upper string.
    pub fn nearest_string(&self, y: f32) -> usize {
        let mut best = 0;
        let mut best_dist = f32::INFINITY;
        for (idx, &s) in self.strings.iter().enumerate() {
            let dist = (s - y).abs();
            if dist < best_dist {
                best = idx;
                best_dist = dist;
            }
        }
        best
    }

    pub fn labels(&self) -> [&'static str; STRING_COUNT] {
        TUNING_LABELS
    }
}

/// Splits ascending line rows into systems.
///
/// The median consecutive gap is taken as the string spacing; any gap wider
/// than `gap_factor` times that starts a new group. Groups with at least
/// `min_lines` rows are normalized to six, smaller ones are discarded. Fewer
/// than six rows overall yields no systems.
pub fn segment_systems(lines: &[i32], gap_factor: f32, min_lines: usize) -> Vec<System> {
    if lines.len() < STRING_COUNT {
        debug!("segment_systems: only {} lines, need {STRING_COUNT}", lines.len());
        return Vec::new();
    }
    let gaps: Vec<f32> = lines.windows(2).map(|w| (w[1] - w[0]) as f32).collect();
    let median_gap = median(&gaps);
    let boundary = median_gap * gap_factor;
    let min_lines = min_lines.max(2);

    let mut groups: Vec<Vec<i32>> = Vec::new();
    let mut current = vec![lines[0]];
    for (gap, &next) in gaps.iter().zip(&lines[1..]) {
        if *gap > boundary {
            if current.len() >= min_lines {
                groups.push(std::mem::take(&mut current));
            } else {
                debug!("segment_systems: dropping {} stray lines", current.len());
                current.clear();
            }
        }
        current.push(next);
    }
    if current.len() >= min_lines {
        groups.push(current);
    }

    debug!(
        "segment_systems: {} lines, median gap {median_gap:.1}, {} groups",
        lines.len(),
        groups.len()
    );
    groups.iter().map(|g| normalize_group(g)).collect()
}

/// Exactly six rows: extra rows are cut from the bottom, missing rows are
/// extrapolated below using the group's average spacing.
pub fn normalize_group(group: &[i32]) -> System {
    debug_assert!(group.len() >= 2);
    let mut rows: Vec<f32> = group.iter().map(|&y| y as f32).collect();
    if rows.len() < STRING_COUNT {
        let first = rows[0];
        let last = rows[rows.len() - 1];
        let spacing = (last - first) / (rows.len() - 1) as f32;
        debug!(
            "normalize_group: padding {} lines with spacing {spacing:.1}",
            rows.len()
        );
        while rows.len() < STRING_COUNT {
            let next = (rows[rows.len() - 1] + spacing).round();
            rows.push(next);
        }
    }
    let mut strings = [0.0f32; STRING_COUNT];
    strings.copy_from_slice(&rows[..STRING_COUNT]);
    System::new(strings)
}

fn median(values: &[f32]) -> f32 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let m = sorted.len();
    if m == 0 {
        0.0
    } else if m % 2 == 1 {
        sorted[m / 2]
    } else {
        0.5 * (sorted[m / 2 - 1] + sorted[m / 2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(system: &System) -> Vec<f32> {
        system.strings.to_vec()
    }

    #[test]
    fn six_even_lines_form_one_system() {
        let systems = segment_systems(&[10, 20, 30, 40, 50, 60], 2.5, 4);
        assert_eq!(systems.len(), 1);
        assert_eq!(rows(&systems[0]), vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
    }

    #[test]
    fn wide_gap_splits_and_pads_short_group() {
        let lines = [10, 20, 30, 40, 200, 210, 220, 230, 240, 250];
        let systems = segment_systems(&lines, 2.5, 4);
        assert_eq!(systems.len(), 2);
        assert_eq!(rows(&systems[0]), vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
        assert_eq!(
            rows(&systems[1]),
            vec![200.0, 210.0, 220.0, 230.0, 240.0, 250.0]
        );
    }

    #[test]
    fn fewer_than_six_lines_yield_nothing() {
        assert!(segment_systems(&[10, 20, 30, 40, 50], 2.5, 4).is_empty());
        assert!(segment_systems(&[], 2.5, 4).is_empty());
    }

    #[test]
    fn extra_lines_are_truncated() {
        let systems = segment_systems(&[10, 20, 30, 40, 50, 60, 70], 2.5, 4);
        assert_eq!(systems.len(), 1);
        assert_eq!(rows(&systems[0]), vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
    }

    #[test]
    fn small_groups_are_discarded() {
        // A stray pair of rows above a complete staff.
        let lines = [10, 20, 200, 210, 220, 230, 240, 250];
        let systems = segment_systems(&lines, 2.5, 4);
        assert_eq!(systems.len(), 1);
        assert_eq!(systems[0].top(), 200.0);
    }

    #[test]
    fn five_lines_pad_with_average_spacing() {
        let system = normalize_group(&[100, 111, 122, 132, 144]);
        assert_eq!(rows(&system), vec![100.0, 111.0, 122.0, 132.0, 144.0, 155.0]);
    }

    #[test]
    fn span_and_nearest_string() {
        let system = System::new([10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
        assert_eq!(system.span(20.0), (-10.0, 80.0));
        assert_eq!(system.nearest_string(33.0), 2);
        // Equidistant from rows 0 and 1: first wins.
        assert_eq!(system.nearest_string(15.0), 0);
        assert_eq!(system.nearest_string(500.0), 5);
    }

    #[test]
    fn median_of_even_count_averages_middle_pair() {
        assert_eq!(median(&[1.0, 9.0, 3.0, 5.0]), 4.0);
    }
}
