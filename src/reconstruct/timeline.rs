//! Merging notes and bar lines into x-ordered columns.

use super::cluster1d::chain_sorted;
use serde::Serialize;

/// Glyphs accepted as notes besides fret numbers.
pub const TECHNIQUE_SYMBOLS: [&str; 5] = ["x", "h", "p", "/", "\\"];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NoteEvent {
    pub x: f32,
    /// 0 = high `e` ... 5 = low `E`.
    pub string: usize,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Event {
    Note(NoteEvent),
    /// Spans all six strings.
    Bar { x: f32 },
}

impl Event {
    pub fn x(&self) -> f32 {
        match self {
            Event::Note(note) => note.x,
            Event::Bar { x } => *x,
        }
    }

    pub fn is_bar(&self) -> bool {
        matches!(self, Event::Bar { .. })
    }
}

/// Events sharing one rendered time slot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Column {
    pub events: Vec<Event>,
}

impl Column {
    pub fn has_bar(&self) -> bool {
        self.events.iter().any(Event::is_bar)
    }

    pub fn notes(&self) -> impl Iterator<Item = &NoteEvent> {
        self.events.iter().filter_map(|e| match e {
            Event::Note(note) => Some(note),
            Event::Bar { .. } => None,
        })
    }

    /// Cells the column occupies before its trailing separator.
    pub fn width(&self) -> usize {
        if self.has_bar() {
            1
        } else {
            self.notes()
                .map(|n| n.text.chars().count())
                .max()
                .unwrap_or(1)
                .max(1)
        }
    }
}

/// Sorts notes and bars by x and chains them into columns.
pub fn build_columns(notes: Vec<NoteEvent>, bars: &[i32], proximity: f32) -> Vec<Column> {
    let mut events: Vec<Event> = notes.into_iter().map(Event::Note).collect();
    events.extend(bars.iter().map(|&x| Event::Bar { x: x as f32 }));
    events.sort_by(|a, b| a.x().total_cmp(&b.x()));
    chain_sorted(events, proximity, Event::x)
        .into_iter()
        .map(|events| Column { events })
        .collect()
}
