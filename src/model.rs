//! Data structures representing parsed toolpaths
//!
//! The parser reduces a G-code document to a [`Document`]: an ordered list of
//! [`Layer`]s, each holding the extrusion [`Segment`]s printed in one
//! build-height band. Travel moves, retractions, and non-motion commands
//! never appear here.

/// A point in model space, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3d {
    /// X coordinate (mm)
    pub x: f64,
    /// Y coordinate (mm)
    pub y: f64,
    /// Z coordinate, the build height (mm)
    pub z: f64,
}

impl Point3d {
    /// Create a new point
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// One extrusion move: material deposited from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Position before the move
    pub start: Point3d,
    /// Position after the move
    pub end: Point3d,
}

impl Segment {
    /// Create a new segment
    pub fn new(start: Point3d, end: Point3d) -> Self {
        Self { start, end }
    }

    /// Euclidean length of the move, in millimeters
    pub fn length(&self) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let dz = self.end.z - self.start.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// The extrusion segments sharing one build-height band, in print order.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Z height the layer was printed at, in millimeters
    pub z: f64,
    /// Extrusion segments in print order
    pub segments: Vec<Segment>,
}

impl Layer {
    /// Create a layer at the given Z height
    pub fn new(z: f64, segments: Vec<Segment>) -> Self {
        Self { z, segments }
    }
}

/// An ordered sequence of layers, the parser's sole output.
///
/// A document with zero layers is a valid, representable outcome (a file
/// with motion but no extrusion); it is distinguished from a parse failure
/// at the loading boundary, not here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Layers ordered bottom to top
    pub layers: Vec<Layer>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// True when the document contains no layers
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Number of layers
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Total number of extrusion segments across all layers
    pub fn segment_count(&self) -> usize {
        self.layers.iter().map(|l| l.segments.len()).sum()
    }

    /// Lowest and highest layer heights, or `None` for an empty document
    pub fn z_range(&self) -> Option<(f64, f64)> {
        let first = self.layers.first()?.z;
        let last = self.layers.last()?.z;
        Some((first, last))
    }

    /// Axis-aligned bounding box over all segment endpoints
    pub fn bounding_box(&self) -> Option<(Point3d, Point3d)> {
        let mut min = Point3d::new(f64::MAX, f64::MAX, f64::MAX);
        let mut max = Point3d::new(f64::MIN, f64::MIN, f64::MIN);
        let mut any = false;

        for layer in &self.layers {
            for segment in &layer.segments {
                for p in [&segment.start, &segment.end] {
                    min.x = min.x.min(p.x);
                    min.y = min.y.min(p.y);
                    min.z = min.z.min(p.z);
                    max.x = max.x.max(p.x);
                    max.y = max.y.max(p.y);
                    max.z = max.z.max(p.z);
                    any = true;
                }
            }
        }

        if any { Some((min, max)) } else { None }
    }
}
