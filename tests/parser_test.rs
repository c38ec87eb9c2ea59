//! Integration tests for the G-code parser
//!
//! Exercises the layer-segmentation and extrusion policies end to end,
//! including the canonical two-layer scenario and the empty-document
//! outcomes the viewer must surface to the user.

use gcode_viewer::{Error, parse, render};

/// Two layers, one extrusion each, separated by a travel-only Z climb.
const TWO_LAYERS: &str =
    "G1 X0 Y0 Z0.2 E1\nG1 X10 Y0 Z0.2 E2\nG1 X10 Y0 Z0.4 E2\nG1 X10 Y10 Z0.4 E3";

#[test]
fn two_layer_scenario() {
    let doc = parse(TWO_LAYERS);

    assert_eq!(doc.layer_count(), 2);
    assert_eq!(doc.layers[0].segments.len(), 1);
    assert_eq!(doc.layers[1].segments.len(), 1);

    // Layer 1: the X0 → X10 extrude at Z 0.2.
    let first = &doc.layers[0].segments[0];
    assert_eq!((first.start.x, first.end.x), (0.0, 10.0));
    assert_eq!(first.start.z, 0.2);

    // Layer 2: the Y0 → Y10 extrude at Z 0.4. The Z climb itself (E
    // unchanged) produced nothing.
    let second = &doc.layers[1].segments[0];
    assert_eq!((second.start.y, second.end.y), (0.0, 10.0));
    assert_eq!(second.end.z, 0.4);

    assert_eq!(doc.layers[0].z, 0.2);
    assert_eq!(doc.layers[1].z, 0.4);
}

#[test]
fn comments_and_blank_lines_only() {
    let doc = parse("; generated by a slicer\n\n   \n; layer count: 3\n\t\n");
    assert!(doc.is_empty());
    // The viewer surfaces this as the empty-result condition.
    assert!(matches!(
        render::build_instances(&doc),
        Err(Error::EmptyDocument)
    ));
}

#[test]
fn single_retracting_move() {
    // E decreases from a nonzero start: no segments, no layers.
    let doc = parse("G1 X10 Y10 Z0.2 E5\nG1 X20 E2\n");
    assert_eq!(doc.segment_count(), 0);
    assert_eq!(doc.layer_count(), 0);
}

#[test]
fn travel_only_document() {
    let doc = parse("G0 X10 Y10\nG0 Z5\nG0 X50 Y50\nG1 X0 Y0\n");
    assert!(doc.is_empty());
}

#[test]
fn unrecognized_commands_are_skipped() {
    let doc = parse(
        "M104 S210\nM140 S60\nG28\nG92 E0\n\
         G1 X0 Y0 Z0.2 E1\nG1 X10 E2\n\
         M106 S255\nT0\nG4 P100\n",
    );
    assert_eq!(doc.layer_count(), 1);
    assert_eq!(doc.segment_count(), 1);
}

#[test]
fn g92_z_does_not_split_layers() {
    // Z words on non-move lines are not interpreted at all.
    let doc = parse("G1 X0 Y0 Z0.2 E1\nG1 X10 E2\nG92 Z10\nG1 X20 E3\n");
    assert_eq!(doc.layer_count(), 1);
    assert_eq!(doc.layers[0].segments.len(), 2);
}

#[test]
fn same_z_moves_accumulate_in_one_layer() {
    let doc = parse(
        "G1 X0 Y0 Z0.2 E1\n\
         G1 X10 E2\nG1 Y10 E3\nG1 X0 E4\nG1 Y0 E5\n",
    );
    assert_eq!(doc.layer_count(), 1);
    assert_eq!(doc.layers[0].segments.len(), 4);
}

#[test]
fn parsing_is_idempotent() {
    let first = parse(TWO_LAYERS);
    let second = parse(TWO_LAYERS);
    assert_eq!(first, second);
}

#[test]
fn layer_heights_are_monotonic() {
    let doc = parse(
        "G1 X0 Y0 Z0.2 E1\nG1 X10 E2\n\
         G1 Z0.4\nG1 X0 E3\n\
         G1 Z0.6\nG1 X10 E4\n\
         G1 Z0.8\nG1 X0 E5\n",
    );
    assert_eq!(doc.layer_count(), 4);
    for pair in doc.layers.windows(2) {
        assert!(pair[0].z <= pair[1].z);
    }
}

#[test]
fn g0_moves_extrude_like_g1() {
    // Both linear move commands are interpreted identically.
    let doc = parse("G0 X0 Y0 Z0.2 E1\nG0 X10 E2\n");
    assert_eq!(doc.segment_count(), 1);
}

#[test]
fn segment_count_matches_qualifying_moves() {
    // After the baseline move, every strict E increase emits exactly one
    // segment, including the first move after a layer boundary.
    let text = "G1 X0 Y0 Z0.2 E1\n\
                G1 X10 E2\n\
                G1 X20 E2\n\
                G1 X30 E3\n\
                G1 Z0.4\n\
                G1 X40 E4\n";
    let doc = parse(text);
    assert_eq!(doc.segment_count(), 3);
    assert_eq!(doc.layers[1].segments.len(), 1);
}

#[test]
fn large_document_single_pass() {
    // A synthetic ~1 MB document parses without pathological slowdown; the
    // exact timing lives in the criterion bench, this just proves it works.
    let mut text = String::with_capacity(1 << 20);
    let mut e = 0.0;
    for layer in 0..200 {
        text.push_str(&format!("G1 Z{:.2}\n", 0.2 * (layer + 1) as f64));
        for i in 0..150 {
            e += 1.0;
            text.push_str(&format!("G1 X{} Y{} E{:.1}\n", i % 100, i / 2, e));
        }
    }

    let doc = parse(&text);
    assert_eq!(doc.layer_count(), 200);
    // The very first extruding move only sets the baseline.
    assert_eq!(doc.segment_count(), 200 * 150 - 1);
}
