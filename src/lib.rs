//! # gcode-viewer
//!
//! An interactive 3D viewer for 3D-printer G-code toolpaths.
//!
//! The parser reduces a G-code document to per-layer extrusion segments in
//! one pass; the renderer turns each segment into an oriented cylinder
//! colored by a layer-height gradient and places it in a kiss3d scene.
//! Travel moves, retractions, and every command other than `G0`/`G1` are
//! skipped, so the result is exactly the material that would end up on the
//! plate.
//!
//! ## Features
//!
//! - Single-pass modal G-code parsing with Z-based layer segmentation
//! - Per-layer blue-to-red height gradient
//! - Interactive orbit viewport with build-plate grid and camera preset
//! - Top-view PNG preview export
//! - Extraction of slicer-embedded thumbnails
//!
//! ## Example
//!
//! ```
//! use gcode_viewer::parse;
//!
//! let doc = parse(
//!     "G1 X0 Y0 Z0.2 E1\n\
//!      G1 X10 Y0 Z0.2 E2\n\
//!      G1 X10 Y0 Z0.4 E2\n\
//!      G1 X10 Y10 Z0.4 E3\n",
//! );
//! assert_eq!(doc.layer_count(), 2);
//! assert_eq!(doc.segment_count(), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod model;
pub mod parser;
pub mod preview;
pub mod render;
pub mod scene;
pub mod thumbnail;
pub mod viewport;

pub use error::{Error, Result};
pub use model::{Document, Layer, Point3d, Segment};
pub use parser::parse;
pub use render::SegmentInstance;
pub use scene::{SceneGraph, ToolpathScene};
