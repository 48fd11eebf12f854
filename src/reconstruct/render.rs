//! Character-grid rendering of columns into tab text.
//!
//! Each string owns one growable row of cells pre-filled with `-`. Columns
//! are written left to right at a shared cursor: a bar column stamps `|` on
//! every string and advances by one cell; a note column writes each note's
//! text on its string and advances by the widest text plus one separator.

use super::timeline::Column;
use crate::types::STRING_COUNT;

pub const FILLER: char = '-';
pub const BAR: char = '|';

/// Fixed placeholder printed above every system.
pub const MEASURE_PLACEHOLDER: &str = "| 1 |";
/// Fixed placeholder printed below every system.
pub const RHYTHM_PLACEHOLDER: &str = "| | | |";

/// Cells written before the first column: tuning label and opening bar.
const HEADER_CELLS: usize = 2;

#[derive(Clone, Debug)]
pub struct Grid {
    rows: [Vec<char>; STRING_COUNT],
    cursor: usize,
}

impl Grid {
    pub fn new(labels: [&str; STRING_COUNT]) -> Self {
        let mut grid = Self {
            rows: Default::default(),
            cursor: 0,
        };
        for (string, label) in labels.iter().enumerate() {
            let first = label.chars().next().unwrap_or(FILLER);
            grid.put(string, 0, first);
            grid.put(string, 1, BAR);
        }
        grid.cursor = HEADER_CELLS;
        grid
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn put(&mut self, string: usize, offset: usize, ch: char) {
        let row = &mut self.rows[string];
        if row.len() <= offset {
            row.resize(offset + 1, FILLER);
        }
        row[offset] = ch;
    }

    pub fn push_column(&mut self, column: &Column) {
        if column.has_bar() {
            for string in 0..STRING_COUNT {
                self.put(string, self.cursor, BAR);
            }
            self.cursor += 1;
            return;
        }
        let width = column.width();
        let start = self.cursor;
        for note in column.notes() {
            if note.string >= STRING_COUNT {
                continue;
            }
            for (i, ch) in note.text.chars().enumerate() {
                self.put(note.string, start + i, ch);
            }
        }
        self.cursor += width + 1;
    }

    /// Rows cut or padded to the cursor so all six have equal length.
    pub fn lines(&self) -> [String; STRING_COUNT] {
        let len = self.cursor;
        std::array::from_fn(|string| {
            let row = &self.rows[string];
            let mut line: String = row.iter().take(len).collect();
            line.extend(std::iter::repeat(FILLER).take(len.saturating_sub(row.len())));
            line
        })
    }
}

pub fn render_grid(columns: &[Column], labels: [&str; STRING_COUNT]) -> [String; STRING_COUNT] {
    let mut grid = Grid::new(labels);
    for column in columns {
        grid.push_column(column);
    }
    grid.lines()
}

/// System block: measure placeholder, six string lines, rhythm placeholder.
pub fn render_block(lines: &[String; STRING_COUNT]) -> String {
    let mut out = Vec::with_capacity(STRING_COUNT + 2);
    out.push(MEASURE_PLACEHOLDER);
    out.extend(lines.iter().map(String::as_str));
    out.push(RHYTHM_PLACEHOLDER);
    out.join("\n")
}

/// Header followed by every block, each trailed by a blank line.
pub fn render_document(title: &str, bpm: u32, blocks: &[String]) -> String {
    let mut out = vec![format!("Song: {title}"), format!("BPM: {bpm}"), String::new()];
    for block in blocks {
        out.push(block.clone());
        out.push(String::new());
    }
    out.join("\n")
}
