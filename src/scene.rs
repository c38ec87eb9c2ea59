//! Scene-graph boundary and the displayed primitive set
//!
//! The renderer never owns the scene graph; it populates an external one
//! through the [`SceneGraph`] trait and keeps handles to everything it
//! inserted so a reload can release them first. [`ToolpathScene`] is that
//! bookkeeping: Idle until a successful [`ToolpathScene::show`], Populated
//! afterwards, back to Idle on [`ToolpathScene::clear`]. Showing while
//! Populated clears implicitly, so repeated loads never accumulate
//! primitives.

use crate::error::Result;
use crate::model::Document;
use crate::render::{self, SegmentInstance};
use kiss3d::scene::SceneNode;
use kiss3d::window::Window;

/// The externally-owned scene graph the renderer populates.
///
/// Implemented for [`kiss3d::window::Window`]; tests substitute a recording
/// double, which is what keeps the load/clear state machine checkable
/// without a display.
pub trait SceneGraph {
    /// Handle to one inserted primitive.
    type Handle;

    /// Insert one oriented segment primitive and return its handle.
    fn add_segment(&mut self, instance: &SegmentInstance) -> Self::Handle;

    /// Remove a primitive and release its geometry and material.
    fn remove(&mut self, handle: &mut Self::Handle);
}

impl SceneGraph for Window {
    type Handle = SceneNode;

    fn add_segment(&mut self, instance: &SegmentInstance) -> SceneNode {
        let mut node = self.add_cylinder(instance.radius, instance.length);
        let (r, g, b) = instance.color;
        node.set_color(r, g, b);
        node.set_local_rotation(instance.rotation);
        node.set_local_translation(instance.translation);
        node
    }

    fn remove(&mut self, handle: &mut SceneNode) {
        // Unlinking drops the node from the graph; its GPU resources go with
        // the last reference.
        handle.unlink();
    }
}

/// The set of toolpath primitives currently in the scene.
pub struct ToolpathScene<S: SceneGraph> {
    nodes: Vec<S::Handle>,
}

impl<S: SceneGraph> ToolpathScene<S> {
    /// Create an empty (Idle) scene set.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// True once a document is on display.
    pub fn is_populated(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// Number of primitives currently displayed.
    pub fn primitive_count(&self) -> usize {
        self.nodes.len()
    }

    /// Display a document, implicitly clearing any previous one.
    ///
    /// The primitive set is computed before anything is removed, so an empty
    /// document fails without touching what is already on screen. Returns
    /// the number of primitives inserted.
    pub fn show(&mut self, graph: &mut S, document: &Document) -> Result<usize> {
        let instances = render::build_instances(document)?;

        self.clear(graph);
        for instance in &instances {
            self.nodes.push(graph.add_segment(instance));
        }
        Ok(self.nodes.len())
    }

    /// Remove every displayed primitive from the scene.
    pub fn clear(&mut self, graph: &mut S) {
        for mut handle in self.nodes.drain(..) {
            graph.remove(&mut handle);
        }
    }
}

impl<S: SceneGraph> Default for ToolpathScene<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    /// Recording double for the external scene graph.
    #[derive(Default)]
    struct RecordingGraph {
        next_id: u32,
        added: usize,
        removed: usize,
    }

    impl SceneGraph for RecordingGraph {
        type Handle = u32;

        fn add_segment(&mut self, _instance: &SegmentInstance) -> u32 {
            self.added += 1;
            self.next_id += 1;
            self.next_id
        }

        fn remove(&mut self, _handle: &mut u32) {
            self.removed += 1;
        }
    }

    const TWO_LAYERS: &str =
        "G1 X0 Y0 Z0.2 E1\nG1 X10 Y0 Z0.2 E2\nG1 X10 Y0 Z0.4 E2\nG1 X10 Y10 Z0.4 E3\n";

    #[test]
    fn test_show_populates() {
        let mut graph = RecordingGraph::default();
        let mut scene = ToolpathScene::new();
        let doc = parse(TWO_LAYERS);

        let count = scene.show(&mut graph, &doc).unwrap();
        assert_eq!(count, 2);
        assert!(scene.is_populated());
        assert_eq!(scene.primitive_count(), 2);
        assert_eq!(graph.added, 2);
        assert_eq!(graph.removed, 0);
    }

    #[test]
    fn test_reload_does_not_accumulate() {
        let mut graph = RecordingGraph::default();
        let mut scene = ToolpathScene::new();

        scene.show(&mut graph, &parse(TWO_LAYERS)).unwrap();
        let second = parse("G1 X0 Y0 Z0.2 E1\nG1 X5 E2\nG1 X10 E3\nG1 X15 E4\n");
        let count = scene.show(&mut graph, &second).unwrap();

        // Exactly the second document's primitives remain.
        assert_eq!(count, 3);
        assert_eq!(scene.primitive_count(), 3);
        assert_eq!(graph.removed, 2);
        assert_eq!(graph.added, 5);
    }

    #[test]
    fn test_clear_returns_to_idle() {
        let mut graph = RecordingGraph::default();
        let mut scene = ToolpathScene::new();

        scene.show(&mut graph, &parse(TWO_LAYERS)).unwrap();
        scene.clear(&mut graph);

        assert!(!scene.is_populated());
        assert_eq!(graph.removed, graph.added);
    }

    #[test]
    fn test_empty_document_leaves_scene_untouched() {
        let mut graph = RecordingGraph::default();
        let mut scene = ToolpathScene::new();

        scene.show(&mut graph, &parse(TWO_LAYERS)).unwrap();
        let err = scene.show(&mut graph, &parse("; comments only\n"));

        assert!(err.is_err());
        assert_eq!(scene.primitive_count(), 2);
        assert_eq!(graph.removed, 0);
    }
}
