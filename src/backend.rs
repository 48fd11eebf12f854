//! Seams to the external detection backends.
//!
//! The reconstruction stages never touch pixels themselves. Line segments come
//! from a [`LineDetector`] and text from a [`TextRecognizer`]; both are passed
//! into the [`Reconstructor`](crate::Reconstructor) explicitly so tests can
//! substitute fixed data.

use crate::error::TabError;
use crate::image::ImageU8;
use crate::segments::Segment;
use crate::types::Token;
use std::fs;
use std::path::{Path, PathBuf};

/// What the pipeline asks a line backend to look for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineRequest {
    /// Long horizontal lines across the whole page (string candidates).
    Strings,
    /// Vertical lines confined to rows `[top, bottom)` (bar candidates).
    Bars {
        top: usize,
        bottom: usize,
        min_length_px: f32,
    },
}

pub trait LineDetector: Send + Sync {
    fn detect_lines(
        &self,
        image: ImageU8<'_>,
        request: LineRequest,
    ) -> Result<Vec<Segment>, TabError>;
}

pub trait TextRecognizer: Send + Sync {
    fn detect_tokens(&self, image: ImageU8<'_>) -> Result<Vec<Token>, TabError>;
}

/// Recognizer returning a fixed token list regardless of the pixels.
#[derive(Clone, Debug, Default)]
pub struct FixedTokens(pub Vec<Token>);

impl TextRecognizer for FixedTokens {
    fn detect_tokens(&self, _image: ImageU8<'_>) -> Result<Vec<Token>, TabError> {
        Ok(self.0.clone())
    }
}

/// Line backend replaying pre-computed segments.
///
/// `Strings` requests return `strings` unchanged; `Bars` requests return the
/// `bars` whose midpoint row falls inside the requested band and whose length
/// meets the requested minimum.
#[derive(Clone, Debug, Default)]
pub struct FixedLines {
    pub strings: Vec<Segment>,
    pub bars: Vec<Segment>,
}

impl LineDetector for FixedLines {
    fn detect_lines(
        &self,
        _image: ImageU8<'_>,
        request: LineRequest,
    ) -> Result<Vec<Segment>, TabError> {
        Ok(match request {
            LineRequest::Strings => self.strings.clone(),
            LineRequest::Bars {
                top,
                bottom,
                min_length_px,
            } => self
                .bars
                .iter()
                .filter(|s| {
                    let y = s.midpoint()[1];
                    y >= top as f32 && y < bottom as f32 && s.length() >= min_length_px
                })
                .cloned()
                .collect(),
        })
    }
}

/// Recognizer backed by a JSON sidecar written by an external OCR engine.
///
/// The file holds an array of `{ "bbox": [[x, y]; 4], "text": "..",
/// "confidence": 0.93 }` objects. It is read on every call, so one instance
/// can serve a page that is re-run after the sidecar changes.
#[derive(Clone, Debug)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<image>.ocr.json` next to the image.
    pub fn sidecar_for(image_path: &Path) -> Self {
        Self::new(image_path.with_extension("ocr.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TextRecognizer for TokenFile {
    fn detect_tokens(&self, _image: ImageU8<'_>) -> Result<Vec<Token>, TabError> {
        let data = fs::read_to_string(&self.path).map_err(|e| {
            TabError::backend("ocr", format!("failed to read {}: {e}", self.path.display()))
        })?;
        serde_json::from_str(&data).map_err(|e| {
            TabError::backend("ocr", format!("failed to parse {}: {e}", self.path.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> Vec<u8> {
        vec![255u8; 4]
    }

    fn view(data: &[u8]) -> ImageU8<'_> {
        ImageU8 {
            w: 2,
            h: 2,
            stride: 2,
            data,
        }
    }

    #[test]
    fn token_file_reads_sidecar_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.ocr.json");
        fs::write(
            &path,
            r#"[
                {"bbox": [[10, 20], [18, 20], [18, 30], [10, 30]], "text": "12", "confidence": 0.87},
                {"bbox": [[40, 20], [46, 20], [46, 30], [40, 30]], "text": "h"}
            ]"#,
        )
        .unwrap();

        let data = blank();
        let tokens = TokenFile::new(&path).detect_tokens(view(&data)).unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "12");
        assert!((tokens[0].confidence - 0.87).abs() < 1e-6);
        assert_eq!(tokens[0].center(), [14.0, 25.0]);
        assert_eq!(tokens[1].confidence, 0.0);
    }

    #[test]
    fn missing_sidecar_is_a_backend_error() {
        let dir = tempfile::tempdir().unwrap();
        let data = blank();
        let err = TokenFile::new(dir.path().join("none.json"))
            .detect_tokens(view(&data))
            .unwrap_err();
        assert!(matches!(err, TabError::Backend { backend: "ocr", .. }), "got {err:?}");
    }

    #[test]
    fn sidecar_path_replaces_extension() {
        let file = TokenFile::sidecar_for(Path::new("scans/riff.png"));
        assert_eq!(file.path(), Path::new("scans/riff.ocr.json"));
    }
}
