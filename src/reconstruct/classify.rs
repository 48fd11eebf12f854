//! Sorting OCR tokens into notes and metadata for one system.
//!
//! Tokens inside the system band become notes when their cleaned text is a
//! fret number or a technique symbol; each is assigned to the nearest string.
//! Tokens between `ceiling` and the top of the band are metadata: tempo
//! markings, palm-mute markers, measure numbers, and any other text (kept as
//! title candidates). Everything else is dropped silently; OCR noise is
//! expected.

use super::systems::System;
use super::timeline::{NoteEvent, TECHNIQUE_SYMBOLS};
use crate::types::Token;
use log::debug;
use serde::Serialize;

/// Longest digit string still read as a measure number.
const MAX_MEASURE_DIGITS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassifyScope {
    /// Rows `[top, bottom]` claimed by the system.
    pub band: (f32, f32),
    /// Metadata is only read below this row (end of the previous system).
    pub ceiling: f32,
}

impl ClassifyScope {
    pub fn for_system(system: &System, margin: f32, ceiling: f32) -> Self {
        Self {
            band: system.span(margin),
            ceiling,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MeasureNumber {
    pub x: f32,
    pub number: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedTokens {
    pub notes: Vec<NoteEvent>,
    pub tempo: Option<u32>,
    pub measure_numbers: Vec<MeasureNumber>,
    /// x positions of palm-mute markings.
    pub palm_mutes: Vec<f32>,
    pub titles: Vec<String>,
    pub dropped: usize,
}

pub fn classify_tokens(tokens: &[Token], system: &System, scope: ClassifyScope) -> ClassifiedTokens {
    let (top, bottom) = scope.band;
    let mut out = ClassifiedTokens::default();
    for token in tokens {
        let [x, y] = token.center();
        if top <= y && y <= bottom {
            match note_text(token) {
                Some(text) => out.notes.push(NoteEvent {
                    x,
                    string: system.nearest_string(y),
                    text,
                }),
                None => out.dropped += 1,
            }
        } else if scope.ceiling < y && y < top {
            classify_metadata(token, x, &mut out);
        }
    }
    debug!(
        "classify_tokens: {} notes, {} measure numbers, tempo {:?}, {} dropped",
        out.notes.len(),
        out.measure_numbers.len(),
        out.tempo,
        out.dropped
    );
    out
}

fn note_text(token: &Token) -> Option<String> {
    let clean = token.cleaned_text();
    let numeric = !clean.is_empty() && clean.chars().all(|c| c.is_ascii_digit());
    (numeric || TECHNIQUE_SYMBOLS.contains(&clean.as_str())).then_some(clean)
}

fn classify_metadata(token: &Token, x: f32, out: &mut ClassifiedTokens) {
    let clean = token.cleaned_text();
    if clean.is_empty() {
        out.dropped += 1;
        return;
    }
    if let Some(bpm) = parse_tempo(&clean) {
        if out.tempo.is_none() {
            out.tempo = Some(bpm);
        }
    } else if is_palm_mute(&clean) {
        out.palm_mutes.push(x);
    } else if clean.len() <= MAX_MEASURE_DIGITS && clean.chars().all(|c| c.is_ascii_digit()) {
        match clean.parse() {
            Ok(number) => out.measure_numbers.push(MeasureNumber { x, number }),
            Err(_) => out.dropped += 1,
        }
    } else {
        out.titles.push(clean);
    }
}

/// Reads `♩ = 96`, `♩=96`, `96 BPM`, `bpm: 96` or `Tempo 96`.
fn parse_tempo(text: &str) -> Option<u32> {
    let lower = text.to_lowercase();
    let marked = lower.contains('♩') || lower.contains("bpm") || lower.starts_with("tempo");
    if !marked {
        return None;
    }
    let digits: String = lower.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok().filter(|&bpm| bpm > 0)
}

fn is_palm_mute(text: &str) -> bool {
    let upper = text.to_uppercase();
    upper.starts_with("P.M") || upper == "PM" || upper.starts_with("PM-") || upper.starts_with("PM ")
}
