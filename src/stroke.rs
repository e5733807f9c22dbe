//! Stroke orchestration.
//!
//! A stroke is one continuous sculpting gesture made of many discrete
//! per-input-event steps. [`Sculptor`] drives each step: it snapshots the
//! affected region for undo, lets the topology engine refine the region,
//! filters the refined selection against the per-step generation stamp,
//! dispatches the configured deformation tool, optionally runs the
//! adaptive cleanup pass, and finally requests a mesh update for the
//! touched region.
//!
//! The mesh, topology engine, and undo store are collaborators owned by
//! the surrounding application and consumed through traits. Every step is
//! synchronous and runs to completion on the calling thread.
//!
//! # Example
//!
//! ```
//! use chisel::prelude::*;
//! use nalgebra::Point3;
//!
//! struct NoUndo;
//! impl UndoStore for NoUndo {
//!     fn push_snapshot(&mut self, _: &[TriangleId], _: &[VertexId]) {}
//! }
//!
//! let positions = vec![
//!     0.0, 0.0, 0.0,
//!     1.0, 0.0, 0.0,
//!     0.5, 1.0, 0.0,
//! ];
//! let mut mesh = MeshBuffers::from_triangles(positions, vec![[0, 1, 2]]).unwrap();
//! let mut sculptor = Sculptor::new(SculptParams::default().with_topology(TopologyMode::Static));
//!
//! let pick = PickInput::new(vec![VertexId::new(0)], 4.0, Point3::origin());
//! sculptor.step(&mut mesh, &mut StaticTopology, &mut NoUndo, &pick);
//! assert!(sculptor.is_active());
//! sculptor.end_stroke();
//! ```

use nalgebra::{Point2, Point3, Unit, Vector3};

use crate::adaptive::AdaptiveThresholds;
use crate::deform::{self, BrushContext, RotateGesture};
use crate::mesh::{SculptMesh, TriangleId, VertexId};
use crate::params::{SculptParams, Tool, TopologyMode};

/// Mesh-resolution refinement driven by the stroke orchestrator.
///
/// Implementations mutate mesh connectivity and return the triangle set
/// that now covers the refined region; the ids in the input set may be
/// invalidated. The orchestrator always recomputes its vertex selection
/// from the returned triangles before touching the mesh again.
pub trait TopologyEngine<M: SculptMesh> {
    /// Subdivide triangles whose edges exceed `max_edge_squared`.
    fn subdivide(
        &mut self,
        mesh: &mut M,
        triangles: Vec<TriangleId>,
        max_edge_squared: f32,
    ) -> Vec<TriangleId>;

    /// Decimate triangles whose edges fall below `min_edge_squared`.
    fn decimate(
        &mut self,
        mesh: &mut M,
        triangles: Vec<TriangleId>,
        min_edge_squared: f32,
    ) -> Vec<TriangleId>;

    /// Merge/cleanup pass for adaptive mode using `merge_distance`.
    fn adapt(
        &mut self,
        mesh: &mut M,
        triangles: Vec<TriangleId>,
        merge_distance: f32,
    ) -> Vec<TriangleId>;
}

/// Topology engine that leaves connectivity untouched, for sessions that
/// sculpt at fixed resolution.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticTopology;

impl<M: SculptMesh> TopologyEngine<M> for StaticTopology {
    fn subdivide(&mut self, _: &mut M, triangles: Vec<TriangleId>, _: f32) -> Vec<TriangleId> {
        triangles
    }

    fn decimate(&mut self, _: &mut M, triangles: Vec<TriangleId>, _: f32) -> Vec<TriangleId> {
        triangles
    }

    fn adapt(&mut self, _: &mut M, triangles: Vec<TriangleId>, _: f32) -> Vec<TriangleId> {
        triangles
    }
}

/// Undo/redo snapshot store. The snapshot must be taken before the step
/// mutates anything.
pub trait UndoStore {
    /// Record the region about to be modified.
    fn push_snapshot(&mut self, triangles: &[TriangleId], vertices: &[VertexId]);
}

/// Picking output consumed by one stroke step.
#[derive(Debug, Clone)]
pub struct PickInput {
    /// Vertices inside the brush sphere.
    pub vertices: Vec<VertexId>,

    /// Squared world-space brush radius.
    pub radius_squared: f32,

    /// World-space intersection point of the pick ray with the mesh.
    pub center: Point3<f32>,

    /// Current screen-space pointer position (rotate only).
    pub mouse: Point2<f32>,

    /// Previous screen-space pointer position (rotate only).
    pub last_mouse: Point2<f32>,
}

impl PickInput {
    /// Pick data for tools that ignore the screen-space pointer.
    pub fn new(vertices: Vec<VertexId>, radius_squared: f32, center: Point3<f32>) -> Self {
        Self {
            vertices,
            radius_squared,
            center,
            mouse: Point2::origin(),
            last_mouse: Point2::origin(),
        }
    }

    /// Attach the current and previous pointer positions.
    pub fn with_pointer(mut self, mouse: Point2<f32>, last_mouse: Point2<f32>) -> Self {
        self.mouse = mouse;
        self.last_mouse = last_mouse;
        self
    }
}

/// Per-interaction-step driver for a sculpting session.
///
/// Owns the session parameters, the step generation counter, and the
/// optional rotate gesture. Idle until the first step of a stroke;
/// [`end_stroke`](Self::end_stroke) returns to idle and discards the
/// gesture.
#[derive(Debug, Default)]
pub struct Sculptor {
    params: SculptParams,
    generation: u64,
    gesture: Option<RotateGesture>,
    active: bool,
}

impl Sculptor {
    /// Create a sculptor with the given session parameters.
    pub fn new(params: SculptParams) -> Self {
        Self {
            params,
            generation: 0,
            gesture: None,
            active: false,
        }
    }

    /// Current session parameters.
    pub fn params(&self) -> &SculptParams {
        &self.params
    }

    /// Mutable session parameters, for UI-driven settings changes.
    pub fn params_mut(&mut self) -> &mut SculptParams {
        &mut self.params
    }

    /// Whether a stroke is in progress.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Generation stamp of the most recent step.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Capture the rotate gesture: the object-space rotation axis and the
    /// screen-space pivot every subsequent rotate step measures from.
    pub fn start_rotate(&mut self, axis: Unit<Vector3<f32>>, pivot: Point2<f32>) {
        self.gesture = Some(RotateGesture::new(axis, pivot));
    }

    /// End the stroke: return to idle and discard any rotate gesture.
    pub fn end_stroke(&mut self) {
        self.active = false;
        self.gesture = None;
    }

    /// Run one stroke step.
    ///
    /// In order: snapshot the touched region for undo, rederive the
    /// adaptive thresholds from the pick radius, refine topology per the
    /// topology mode, recompute and generation-filter the selection,
    /// dispatch the configured tool, run the adaptive cleanup pass when
    /// applicable, and request a mesh update for the final region.
    ///
    /// An empty pick is a silent no-op. Each selected vertex is deformed
    /// at most once per step, even if topology refinement re-expands the
    /// selection.
    pub fn step<M, T, U>(&mut self, mesh: &mut M, topology: &mut T, undo: &mut U, pick: &PickInput)
    where
        M: SculptMesh,
        T: TopologyEngine<M>,
        U: UndoStore,
    {
        if pick.vertices.is_empty() {
            return;
        }
        self.active = true;
        self.generation += 1;

        let mut triangles = mesh.triangles_from_vertices(&pick.vertices);
        undo.push_snapshot(&triangles, &pick.vertices);

        let thresholds = AdaptiveThresholds::derive(pick.radius_squared, self.params.detail);
        match self.params.topology {
            TopologyMode::Static => {}
            TopologyMode::Subdivide => {
                triangles = topology.subdivide(mesh, triangles, thresholds.max_edge_squared);
            }
            TopologyMode::Decimate => {
                triangles = topology.decimate(mesh, triangles, thresholds.min_edge_squared);
            }
            TopologyMode::Uniform | TopologyMode::Adaptive => {
                triangles = topology.subdivide(mesh, triangles, thresholds.max_edge_squared);
                triangles = topology.decimate(mesh, triangles, thresholds.min_edge_squared);
            }
        }

        // Refinement may have grown the region or reallocated ids; the
        // selection is always rebuilt from the refined triangles.
        let mut vertices = mesh.vertices_from_triangles(&triangles);
        let selection: Vec<VertexId> = vertices
            .iter()
            .copied()
            .filter(|&v| mesh.sculpt_generation(v) != self.generation)
            .collect();

        let adaptive = self.params.topology == TopologyMode::Adaptive;
        let mut context = BrushContext::new(pick.center, pick.radius_squared, self.params.intensity)
            .negative(self.params.negative);
        if adaptive {
            context = context.with_step_limit(thresholds.max_step());
        }

        match self.params.tool {
            Tool::Brush => {
                let half = BrushContext {
                    intensity: context.intensity * 0.5,
                    ..context
                };
                deform::flatten(mesh, &selection, &half);
                deform::brush(mesh, &selection, &context);
            }
            Tool::Inflate => deform::inflate(mesh, &selection, &context),
            Tool::Rotate => {
                if let Some(gesture) = &self.gesture {
                    deform::rotate(mesh, &selection, gesture, &context, pick.mouse, pick.last_mouse);
                }
            }
            Tool::Smooth => {
                deform::smooth(mesh, &selection, self.params.intensity, context.step_limit);
            }
            Tool::Flatten => deform::flatten(mesh, &selection, &context),
        }

        for &v in &selection {
            mesh.mark_sculpted(v, self.generation);
        }

        if adaptive {
            triangles = topology.adapt(mesh, triangles, thresholds.merge_distance);
            vertices = mesh.vertices_from_triangles(&triangles);
        }

        mesh.update_region(&triangles, &vertices);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshBuffers;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// 2x2 cell grid in the z = 0 plane; V4 at (1, 1) is interior.
    fn grid() -> RecordingMesh {
        let mut positions = Vec::new();
        for j in 0..3 {
            for i in 0..3 {
                positions.extend_from_slice(&[i as f32, j as f32, 0.0]);
            }
        }
        let triangles = vec![
            [0, 1, 4],
            [0, 4, 3],
            [1, 2, 5],
            [1, 5, 4],
            [3, 4, 7],
            [3, 7, 6],
            [4, 5, 8],
            [4, 8, 7],
        ];
        RecordingMesh {
            inner: MeshBuffers::from_triangles(positions, triangles).unwrap(),
            updates: Vec::new(),
        }
    }

    fn all_vertices(mesh: &RecordingMesh) -> Vec<VertexId> {
        (0..mesh.num_vertices()).map(VertexId::new).collect()
    }

    /// Mesh wrapper recording `update_region` calls.
    struct RecordingMesh {
        inner: MeshBuffers,
        updates: Vec<(Vec<TriangleId>, Vec<VertexId>)>,
    }

    impl SculptMesh for RecordingMesh {
        fn num_vertices(&self) -> usize {
            self.inner.num_vertices()
        }
        fn position(&self, v: VertexId) -> Point3<f32> {
            self.inner.position(v)
        }
        fn set_position(&mut self, v: VertexId, position: Point3<f32>) {
            self.inner.set_position(v, position);
        }
        fn normal(&self, v: VertexId) -> Vector3<f32> {
            self.inner.normal(v)
        }
        fn ring(&self, v: VertexId) -> &[VertexId] {
            self.inner.ring(v)
        }
        fn incident_triangle_count(&self, v: VertexId) -> usize {
            self.inner.incident_triangle_count(v)
        }
        fn sculpt_generation(&self, v: VertexId) -> u64 {
            self.inner.sculpt_generation(v)
        }
        fn mark_sculpted(&mut self, v: VertexId, generation: u64) {
            self.inner.mark_sculpted(v, generation);
        }
        fn triangles_from_vertices(&self, vertices: &[VertexId]) -> Vec<TriangleId> {
            self.inner.triangles_from_vertices(vertices)
        }
        fn vertices_from_triangles(&self, triangles: &[TriangleId]) -> Vec<VertexId> {
            self.inner.vertices_from_triangles(triangles)
        }
        fn update_region(&mut self, triangles: &[TriangleId], vertices: &[VertexId]) {
            self.updates.push((triangles.to_vec(), vertices.to_vec()));
            self.inner.update_region(triangles, vertices);
        }
    }

    type EventLog = Rc<RefCell<Vec<&'static str>>>;

    /// Undo store logging its calls into the shared event log.
    struct LoggingUndo {
        events: EventLog,
        snapshots: Vec<(Vec<TriangleId>, Vec<VertexId>)>,
    }

    impl LoggingUndo {
        fn new(events: &EventLog) -> Self {
            Self {
                events: Rc::clone(events),
                snapshots: Vec::new(),
            }
        }
    }

    impl UndoStore for LoggingUndo {
        fn push_snapshot(&mut self, triangles: &[TriangleId], vertices: &[VertexId]) {
            self.events.borrow_mut().push("undo");
            self.snapshots.push((triangles.to_vec(), vertices.to_vec()));
        }
    }

    /// Identity topology engine logging its calls; `subdivide` also
    /// snapshots the position buffer it observes.
    struct LoggingTopology {
        events: EventLog,
        positions_at_subdivide: Option<Vec<f32>>,
    }

    impl LoggingTopology {
        fn new(events: &EventLog) -> Self {
            Self {
                events: Rc::clone(events),
                positions_at_subdivide: None,
            }
        }
    }

    impl TopologyEngine<RecordingMesh> for LoggingTopology {
        fn subdivide(
            &mut self,
            mesh: &mut RecordingMesh,
            triangles: Vec<TriangleId>,
            _: f32,
        ) -> Vec<TriangleId> {
            self.events.borrow_mut().push("subdivide");
            self.positions_at_subdivide = Some(mesh.inner.positions().to_vec());
            triangles
        }
        fn decimate(
            &mut self,
            _: &mut RecordingMesh,
            triangles: Vec<TriangleId>,
            _: f32,
        ) -> Vec<TriangleId> {
            self.events.borrow_mut().push("decimate");
            triangles
        }
        fn adapt(
            &mut self,
            _: &mut RecordingMesh,
            triangles: Vec<TriangleId>,
            _: f32,
        ) -> Vec<TriangleId> {
            self.events.borrow_mut().push("adapt");
            triangles
        }
    }

    fn run_step(mode: TopologyMode, tool: Tool) -> (RecordingMesh, LoggingUndo, LoggingTopology, Sculptor) {
        let mut mesh = grid();
        let events: EventLog = Rc::new(RefCell::new(Vec::new()));
        let mut undo = LoggingUndo::new(&events);
        let mut topology = LoggingTopology::new(&events);
        let mut sculptor = Sculptor::new(
            SculptParams::default()
                .with_tool(tool)
                .with_topology(mode)
                .with_intensity(1.0),
        );
        let pick = PickInput::new(all_vertices(&mesh), 100.0, Point3::new(1.0, 1.0, 0.0));
        sculptor.step(&mut mesh, &mut topology, &mut undo, &pick);
        (mesh, undo, topology, sculptor)
    }

    fn events_of(undo: &LoggingUndo) -> Vec<&'static str> {
        undo.events.borrow().clone()
    }

    #[test]
    fn refinement_order_per_topology_mode() {
        let (_, undo, _, _) = run_step(TopologyMode::Static, Tool::Inflate);
        assert_eq!(events_of(&undo), vec!["undo"]);

        let (_, undo, _, _) = run_step(TopologyMode::Subdivide, Tool::Inflate);
        assert_eq!(events_of(&undo), vec!["undo", "subdivide"]);

        let (_, undo, _, _) = run_step(TopologyMode::Decimate, Tool::Inflate);
        assert_eq!(events_of(&undo), vec!["undo", "decimate"]);

        let (_, undo, _, _) = run_step(TopologyMode::Uniform, Tool::Inflate);
        assert_eq!(events_of(&undo), vec!["undo", "subdivide", "decimate"]);

        let (_, undo, _, _) = run_step(TopologyMode::Adaptive, Tool::Inflate);
        assert_eq!(events_of(&undo), vec!["undo", "subdivide", "decimate", "adapt"]);
    }

    #[test]
    fn snapshot_is_pushed_before_any_mutation() {
        let (_, undo, topology, _) = run_step(TopologyMode::Subdivide, Tool::Inflate);
        assert_eq!(undo.snapshots.len(), 1);
        // The positions the engine saw right after the snapshot are still
        // the originals: z = 0 everywhere.
        let seen = topology.positions_at_subdivide.as_ref().unwrap();
        assert!(seen.chunks(3).all(|p| p[2] == 0.0));
    }

    #[test]
    fn empty_pick_is_a_silent_no_op() {
        let mut mesh = grid();
        let events: EventLog = Rc::new(RefCell::new(Vec::new()));
        let mut undo = LoggingUndo::new(&events);
        let mut topology = LoggingTopology::new(&events);
        let mut sculptor = Sculptor::new(SculptParams::default());
        let pick = PickInput::new(vec![], 100.0, Point3::origin());
        sculptor.step(&mut mesh, &mut topology, &mut undo, &pick);
        assert!(!sculptor.is_active());
        assert!(events_of(&undo).is_empty());
        assert!(mesh.updates.is_empty());
    }

    #[test]
    fn inflate_step_lifts_the_region_and_stamps_generations() {
        let (mesh, _, _, sculptor) = run_step(TopologyMode::Static, Tool::Inflate);
        assert_eq!(sculptor.generation(), 1);
        assert!(sculptor.is_active());
        // Center vertex sits on the brush center: full falloff.
        assert!(mesh.position(VertexId::new(4)).z > 0.9);
        for v in 0..mesh.num_vertices() {
            assert_eq!(mesh.sculpt_generation(VertexId::new(v)), 1);
        }
    }

    #[test]
    fn already_stamped_vertices_are_skipped() {
        let mut mesh = grid();
        let events: EventLog = Rc::new(RefCell::new(Vec::new()));
        let mut undo = LoggingUndo::new(&events);
        let mut topology = LoggingTopology::new(&events);
        let mut sculptor = Sculptor::new(
            SculptParams::default()
                .with_tool(Tool::Inflate)
                .with_topology(TopologyMode::Static)
                .with_intensity(1.0),
        );
        // Pre-stamp the center with the generation the first step will use.
        mesh.mark_sculpted(VertexId::new(4), 1);
        let pick = PickInput::new(all_vertices(&mesh), 100.0, Point3::new(1.0, 1.0, 0.0));
        sculptor.step(&mut mesh, &mut topology, &mut undo, &pick);
        assert_eq!(mesh.position(VertexId::new(4)).z, 0.0, "stamped vertex moved");
        assert!(mesh.position(VertexId::new(0)).z > 0.0, "unstamped vertex did not move");
    }

    #[test]
    fn next_step_uses_a_fresh_generation() {
        let mut mesh = grid();
        let events: EventLog = Rc::new(RefCell::new(Vec::new()));
        let mut undo = LoggingUndo::new(&events);
        let mut topology = LoggingTopology::new(&events);
        let mut sculptor = Sculptor::new(
            SculptParams::default()
                .with_tool(Tool::Inflate)
                .with_topology(TopologyMode::Static)
                .with_intensity(1.0),
        );
        let pick = PickInput::new(all_vertices(&mesh), 100.0, Point3::new(1.0, 1.0, 0.0));
        sculptor.step(&mut mesh, &mut topology, &mut undo, &pick);
        let after_one = mesh.position(VertexId::new(4)).z;
        sculptor.step(&mut mesh, &mut topology, &mut undo, &pick);
        assert_eq!(sculptor.generation(), 2);
        assert!(mesh.position(VertexId::new(4)).z > after_one, "second step did not deform");
    }

    #[test]
    fn rotate_without_a_gesture_moves_nothing() {
        let (mesh, _, _, _) = run_step(TopologyMode::Static, Tool::Rotate);
        assert!(mesh.inner.positions().chunks(3).all(|p| p[2] == 0.0));
    }

    #[test]
    fn end_stroke_discards_the_gesture() {
        let mut sculptor = Sculptor::new(SculptParams::default().with_tool(Tool::Rotate));
        sculptor.start_rotate(Unit::new_normalize(Vector3::z()), Point2::origin());
        sculptor.end_stroke();
        assert!(!sculptor.is_active());

        let mut mesh = grid();
        let events: EventLog = Rc::new(RefCell::new(Vec::new()));
        let mut undo = LoggingUndo::new(&events);
        let mut topology = LoggingTopology::new(&events);
        let before: Vec<f32> = mesh.inner.positions().to_vec();
        let pick = PickInput::new(all_vertices(&mesh), 100.0, Point3::new(1.0, 1.0, 0.0))
            .with_pointer(Point2::new(0.0, 100.0), Point2::new(100.0, 0.0));
        sculptor.step(&mut mesh, &mut topology, &mut undo, &pick);
        assert_eq!(mesh.inner.positions(), &before[..]);
    }

    #[test]
    fn adaptive_mode_plumbs_the_step_limit() {
        let (mesh, _, _, _) = run_step(TopologyMode::Adaptive, Tool::Inflate);
        let expected = AdaptiveThresholds::derive(100.0, 0.75).max_step();
        // Unclamped magnitude would be 1.0 (intensity 1, radius 10).
        let z = mesh.position(VertexId::new(4)).z;
        assert!((z - expected).abs() < 1e-5, "z = {}, limit = {}", z, expected);
    }

    #[test]
    fn update_region_receives_the_final_region() {
        let (mesh, _, _, _) = run_step(TopologyMode::Static, Tool::Inflate);
        assert_eq!(mesh.updates.len(), 1);
        let (triangles, vertices) = &mesh.updates[0];
        assert_eq!(triangles.len(), 8);
        assert_eq!(vertices.len(), 9);
    }

    #[test]
    fn brush_composite_flattens_then_pushes() {
        // On a flat grid the flatten half-pass is inert, so the composite
        // reduces to the push: the whole region rises.
        let (mesh, _, _, _) = run_step(TopologyMode::Static, Tool::Brush);
        for v in 0..mesh.num_vertices() {
            let z = mesh.position(VertexId::new(v)).z;
            assert!(z > 0.0, "V{} did not rise: z = {}", v, z);
        }
    }
}
