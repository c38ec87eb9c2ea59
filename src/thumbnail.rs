//! Embedded slicer thumbnail extraction
//!
//! Most slicers embed one or more base64 PNG previews in the G-code comment
//! stream, bracketed by `; thumbnail begin <W>x<H> <len>` and
//! `; thumbnail end` lines (PrusaSlicer also writes `thumbnail_PNG`
//! markers). [`extract`] returns the decoded bytes of the largest embedded
//! image, or `None` when the file carries none.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

struct Block {
    pixels: u64,
    data: String,
}

/// Extract the largest embedded thumbnail from a G-code document.
///
/// Unterminated blocks and blocks whose payload is not valid base64 are
/// ignored; non-comment lines inside a block are skipped without ending it.
pub fn extract(text: &str) -> Option<Vec<u8>> {
    let mut current: Option<Block> = None;
    let mut best: Option<Block> = None;

    for raw in text.lines() {
        let Some(comment) = raw.trim().strip_prefix(';') else {
            continue;
        };
        let comment = comment.trim();

        if comment.contains("thumbnail begin") || comment.contains("thumbnail_PNG begin") {
            // Absurd dimensions are malformed input, tolerated as "no block".
            current = parse_dimensions(comment)
                .and_then(|(w, h)| w.checked_mul(h))
                .map(|pixels| Block {
                    pixels,
                    data: String::new(),
                });
        } else if comment.contains("thumbnail end") || comment.contains("thumbnail_PNG end") {
            if let Some(block) = current.take() {
                let bigger = best.as_ref().map_or(true, |b| block.pixels > b.pixels);
                if !block.data.is_empty() && bigger {
                    best = Some(block);
                }
            }
        } else if let Some(block) = current.as_mut() {
            block.data.push_str(comment);
        }
    }

    best.and_then(|block| STANDARD.decode(block.data).ok())
}

/// Find a `<W>x<H>` token in a begin marker.
fn parse_dimensions(comment: &str) -> Option<(u64, u64)> {
    for word in comment.split_whitespace() {
        if let Some((w, h)) = word.split_once('x') {
            if let (Ok(w), Ok(h)) = (w.parse::<u64>(), h.parse::<u64>()) {
                return Some((w, h));
            }
        }
    }
    None
}
