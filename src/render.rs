//! Layer rendering policy
//!
//! Turns a parsed [`Document`] into per-segment primitive poses: a color
//! from the layer-height gradient, a model-to-display coordinate transform,
//! and the translation/rotation/length of one oriented cylinder per
//! segment. Everything here is pure math; putting the primitives on screen
//! is the scene module's job, which keeps this half testable without a
//! display.

use crate::error::{Error, Result};
use crate::model::{Document, Point3d, Segment};
use kiss3d::nalgebra::{Point3, Translation3, UnitQuaternion, Vector3};

/// Build plate edge length, in millimeters.
pub const PLATE_SIZE: f32 = 200.0;

/// Cylinder radius for one extrusion track (0.4 mm nozzle).
pub const EXTRUSION_RADIUS: f32 = 0.2;

/// Segments shorter than this produce no primitive.
pub const MIN_SEGMENT_LENGTH: f32 = 1e-4;

/// Pose, size and color of one oriented segment primitive.
///
/// The primitive is a cylinder whose local Y axis is rotated onto the
/// segment direction, centered on the segment midpoint in display space.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentInstance {
    /// Segment midpoint in display space
    pub translation: Translation3<f32>,
    /// Rotation taking local +Y onto the segment direction
    pub rotation: UnitQuaternion<f32>,
    /// Cylinder height, equal to the segment length
    pub length: f32,
    /// Cylinder radius
    pub radius: f32,
    /// Linear RGB color from the layer gradient
    pub color: (f32, f32, f32),
}

/// Map a model-space point (mm, Z = build height) into display space.
///
/// X and Y are centered about the plate half-size, and Y/Z are swapped so
/// the build height becomes the vertical axis of the viewport.
pub fn to_display(p: &Point3d) -> Point3<f32> {
    Point3::new(
        p.x as f32 - PLATE_SIZE / 2.0,
        p.z as f32,
        p.y as f32 - PLATE_SIZE / 2.0,
    )
}

/// Color for layer `index` of `total`, as linear RGB.
///
/// The hue runs over a fixed sub-range of the HSL circle, from blue at the
/// bottom layer toward red at the top, with full saturation and mid
/// lightness. Monotonic in `index`, so adjacent layers shade smoothly.
pub fn layer_color(index: usize, total: usize) -> (f32, f32, f32) {
    let fraction = index as f32 / total.max(1) as f32;
    hsl_to_rgb(0.6 * (1.0 - fraction), 1.0, 0.5)
}

/// Convert HSL (hue in `[0, 1]`) to linear RGB.
fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let sector = h * 6.0;
    let x = c * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    (r + m, g + m, b + m)
}

/// Compute the primitive pose for one segment, or `None` when the segment
/// is too short to orient (degenerate geometry guard, not an error).
pub fn segment_instance(segment: &Segment, color: (f32, f32, f32)) -> Option<SegmentInstance> {
    let start = to_display(&segment.start);
    let end = to_display(&segment.end);

    let direction = end - start;
    let length = direction.norm();
    if length < MIN_SEGMENT_LENGTH {
        return None;
    }

    // rotation_between returns None for exactly opposite vectors; a segment
    // pointing straight down is still valid, so flip around X by hand.
    let rotation = UnitQuaternion::rotation_between(&Vector3::y(), &direction)
        .unwrap_or_else(|| UnitQuaternion::from_axis_angle(&Vector3::x_axis(), std::f32::consts::PI));

    let mid = (start.coords + end.coords) * 0.5;

    Some(SegmentInstance {
        translation: Translation3::new(mid.x, mid.y, mid.z),
        rotation,
        length,
        radius: EXTRUSION_RADIUS,
        color,
    })
}

/// Compute the full primitive set for a document, bottom layer first.
///
/// Returns [`Error::EmptyDocument`] for a document with zero layers, so the
/// caller can surface the "nothing to render" condition before any scene
/// state has been touched.
pub fn build_instances(document: &Document) -> Result<Vec<SegmentInstance>> {
    if document.is_empty() {
        return Err(Error::EmptyDocument);
    }

    let total = document.layer_count();
    let mut instances = Vec::with_capacity(document.segment_count());

    for (index, layer) in document.layers.iter().enumerate() {
        let color = layer_color(index, total);
        for segment in &layer.segments {
            if let Some(instance) = segment_instance(segment, color) {
                instances.push(instance);
            }
        }
    }

    Ok(instances)
}
