//! Fallback string positions from OCR'd tuning labels.
//!
//! Used only when no system could be built from detected lines. Tuning labels
//! are printed at the left margin, so only tokens centred in the left
//! `region_ratio` of the page whose cleaned text is exactly one of the six
//! labels count as anchors.
//!
//! Only the first six anchors (top-down) are used, giving at most one system.
//! Pages whose staffs were all missed by the line pass therefore lose every
//! system after the first.

use super::systems::System;
use crate::types::{Token, STRING_COUNT, TUNING_LABELS};
use log::debug;

/// Row centers of tokens that look like tuning labels, ascending.
pub fn anchor_rows(tokens: &[Token], image_width: usize, region_ratio: f32) -> Vec<f32> {
    let limit = image_width as f32 * region_ratio;
    let mut rows: Vec<f32> = tokens
        .iter()
        .filter(|t| t.center()[0] < limit)
        .filter(|t| {
            let clean = t.cleaned_text();
            TUNING_LABELS.contains(&clean.as_str())
        })
        .map(|t| t.center()[1])
        .collect();
    rows.sort_by(|a, b| a.total_cmp(b));
    rows
}

pub fn locate_by_anchors(tokens: &[Token], image_width: usize, region_ratio: f32) -> Option<System> {
    let rows = anchor_rows(tokens, image_width, region_ratio);
    debug!("locate_by_anchors: {} tuning-label anchors", rows.len());
    if rows.len() < STRING_COUNT {
        return None;
    }
    let mut strings = [0.0f32; STRING_COUNT];
    strings.copy_from_slice(&rows[..STRING_COUNT]);
    Some(System::new(strings))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(x: f32, y: f32, text: &str) -> Token {
        Token::centered(x, y, 8.0, 10.0, text)
    }

    fn staff_labels(x: f32, top: f32, spacing: f32) -> Vec<Token> {
        TUNING_LABELS
            .iter()
            .enumerate()
            .map(|(i, l)| label(x, top + spacing * i as f32, l))
            .collect()
    }

    #[test]
    fn six_left_margin_labels_form_a_system() {
        let mut tokens = staff_labels(12.0, 50.0, 12.0);
        tokens.reverse();
        let system = locate_by_anchors(&tokens, 500, 0.2).unwrap();
        assert_eq!(system.strings, [50.0, 62.0, 74.0, 86.0, 98.0, 110.0]);
    }

    #[test]
    fn labels_outside_left_region_are_ignored() {
        let tokens = staff_labels(300.0, 50.0, 12.0);
        assert!(locate_by_anchors(&tokens, 500, 0.2).is_none());
    }

    #[test]
    fn bar_glyphs_are_stripped_before_matching() {
        let tokens: Vec<Token> = TUNING_LABELS
            .iter()
            .enumerate()
            .map(|(i, l)| label(10.0, 20.0 + 10.0 * i as f32, &format!(" {l}|")))
            .collect();
        assert!(locate_by_anchors(&tokens, 400, 0.2).is_some());
    }

    #[test]
    fn non_label_text_is_not_an_anchor() {
        let tokens = vec![
            label(10.0, 10.0, "e"),
            label(10.0, 20.0, "b"),
            label(10.0, 30.0, "Gm"),
            label(10.0, 40.0, "5"),
            label(10.0, 50.0, "A"),
        ];
        assert_eq!(anchor_rows(&tokens, 400, 0.2), vec![10.0, 50.0]);
        assert!(locate_by_anchors(&tokens, 400, 0.2).is_none());
    }

    #[test]
    fn only_first_six_anchors_are_used() {
        let mut tokens = staff_labels(10.0, 40.0, 10.0);
        tokens.extend(staff_labels(10.0, 200.0, 10.0));
        let system = locate_by_anchors(&tokens, 400, 0.2).unwrap();
        assert_eq!(system.top(), 40.0);
        assert_eq!(system.bottom(), 90.0);
    }
}
