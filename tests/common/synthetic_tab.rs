use tabscan::image::GrayImageU8;
use tabscan::types::{Token, TUNING_LABELS};

/// Geometry of one drawn staff.
#[derive(Clone, Copy, Debug)]
pub struct Staff {
    pub top: usize,
    pub spacing: usize,
    pub left: usize,
    pub right: usize,
}

impl Staff {
    pub fn row(&self, string: usize) -> usize {
        self.top + self.spacing * string
    }

    pub fn bottom(&self) -> usize {
        self.row(5)
    }

    /// Centre row of the 2 px thick string line.
    pub fn center(&self, string: usize) -> f32 {
        self.row(string) as f32 + 0.5
    }
}

/// White page with black 2 px strings and bar lines.
pub fn tab_page(width: usize, height: usize, staffs: &[Staff], bars: &[usize]) -> GrayImageU8 {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let mut img = GrayImageU8::filled(width, height, 255);
    for staff in staffs {
        for string in 0..6 {
            let y = staff.row(string);
            for x in staff.left..=staff.right {
                img.set(x, y, 0);
                img.set(x, y + 1, 0);
            }
        }
        for &bx in bars {
            for y in staff.top..=staff.bottom() + 1 {
                img.set(bx, y, 0);
                img.set(bx + 1, y, 0);
            }
        }
    }
    img
}

/// Whites out the string under a fret number, as printed tabs do.
pub fn clear_behind(img: &mut GrayImageU8, staff: &Staff, string: usize, x: usize, half_width: usize) {
    let y = staff.row(string);
    for xx in x.saturating_sub(half_width)..=x + half_width {
        img.set(xx, y, 255);
        img.set(xx, y + 1, 255);
    }
}

pub fn token(x: f32, y: f32, text: &str) -> Token {
    Token::centered(x, y, 8.0, 12.0, text)
}

/// Tuning-label tokens at the left margin of `staff`.
pub fn label_tokens(staff: &Staff, x: f32) -> Vec<Token> {
    TUNING_LABELS
        .iter()
        .enumerate()
        .map(|(i, l)| token(x, staff.center(i), l))
        .collect()
}
