//! G-code motion-command parsing
//!
//! [`parse`] reduces a newline-delimited G-code document to a [`Document`] in
//! a single pass. Only linear moves (`G0`/`G1`) are interpreted; every other
//! command is skipped without error. Axis words are modal: an axis absent
//! from a move keeps its previous value.
//!
//! Layer segmentation follows the printed Z height: a new layer starts the
//! first time a move reaches a Z strictly above everything seen so far, and
//! the in-progress layer is closed at that moment (never merely because Z
//! changed). A closed layer is only emitted when it holds at least one
//! extrusion segment, so Z-only travel never produces empty layers.

use crate::model::{Document, Layer, Point3d, Segment};

/// Running parse state, threaded through a single pass over the lines.
///
/// This is the accumulator of a fold: each interpreted move updates the
/// position, possibly closes the in-progress layer, and possibly emits one
/// segment. Nothing else mutates it.
struct ParseState {
    x: f64,
    y: f64,
    z: f64,
    /// Cumulative filament feed. `None` until the first move that carries an
    /// E word; that move only establishes the baseline and emits nothing,
    /// since its start point predates any extrusion state.
    e: Option<f64>,
    /// Highest Z observed so far; layers close when a move exceeds it.
    current_z: f64,
    /// Segments of the in-progress (not yet closed) layer.
    segments: Vec<Segment>,
    layers: Vec<Layer>,
}

impl ParseState {
    fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            e: None,
            current_z: f64::NEG_INFINITY,
            segments: Vec::new(),
            layers: Vec::new(),
        }
    }

    /// Interpret one non-empty, comment-stripped line.
    fn apply(&mut self, line: &str) {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return;
        };
        if !is_move_command(command) {
            return;
        }

        // First well-formed word wins for each axis; absent axes inherit.
        let (mut wx, mut wy, mut wz, mut we) = (None, None, None, None);
        for word in words {
            let slot = match word.as_bytes()[0].to_ascii_uppercase() {
                b'X' => &mut wx,
                b'Y' => &mut wy,
                b'Z' => &mut wz,
                b'E' => &mut we,
                _ => continue,
            };
            if slot.is_none() {
                *slot = word[1..].parse::<f64>().ok().filter(|v| v.is_finite());
            }
        }

        let x = wx.unwrap_or(self.x);
        let y = wy.unwrap_or(self.y);
        let z = wz.unwrap_or(self.z);

        // A move strictly above every Z seen so far closes the in-progress
        // layer before the move itself is applied, so a segment on this very
        // line already belongs to the new layer.
        if z != self.z && z > self.current_z {
            if !self.segments.is_empty() {
                let segments = std::mem::take(&mut self.segments);
                self.layers.push(Layer::new(self.z, segments));
            }
            self.current_z = z;
        }

        let e = we.or(self.e);
        if let (Some(previous), Some(new)) = (self.e, e) {
            if new > previous {
                self.segments.push(Segment::new(
                    Point3d::new(self.x, self.y, self.z),
                    Point3d::new(x, y, z),
                ));
            }
        }

        self.x = x;
        self.y = y;
        self.z = z;
        self.e = e;
    }

    /// Flush the final in-progress layer and return the document.
    fn finish(mut self) -> Document {
        if !self.segments.is_empty() {
            let z = self.z;
            let segments = std::mem::take(&mut self.segments);
            self.layers.push(Layer::new(z, segments));
        }
        Document { layers: self.layers }
    }
}

/// Whether a command token is a linear move.
fn is_move_command(command: &str) -> bool {
    command.eq_ignore_ascii_case("G0") || command.eq_ignore_ascii_case("G1")
}

/// Parse a G-code document into per-layer extrusion segments.
///
/// Pure and deterministic: the same text always yields a structurally
/// identical [`Document`]. A document without extrusion parses to zero
/// layers rather than an error.
///
/// # Example
///
/// ```
/// let doc = gcode_viewer::parse("G1 X0 Y0 Z0.2 E1\nG1 X10 Y0 Z0.2 E2\n");
/// assert_eq!(doc.layer_count(), 1);
/// assert_eq!(doc.segment_count(), 1);
/// ```
pub fn parse(text: &str) -> Document {
    let mut state = ParseState::new();

    for raw in text.lines() {
        let line = raw.split(';').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        state.apply(line);
    }

    state.finish()
}
