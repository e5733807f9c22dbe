//! Sculpt session parameters.
//!
//! One [`SculptParams`] value describes the tool configuration for the
//! lifetime of the sculpting session: which deformation tool is active,
//! how the topology engine runs alongside it, and the intensity / detail
//! / direction settings. The UI layer mutates it; the stroke orchestrator
//! reads it every step.

/// The deformation applied to the picked region each stroke step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Flatten at half intensity, then push along the region's average
    /// normal at full intensity. Softens sharp pile-up while sculpting.
    #[default]
    Brush,
    /// Push each vertex along its own normal.
    Inflate,
    /// Rotate the region about the axis captured at gesture start.
    Rotate,
    /// Move each vertex toward its Laplacian average.
    Smooth,
    /// Project the region toward its average plane.
    Flatten,
}

/// How the topology engine refines the mesh each stroke step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopologyMode {
    /// Leave connectivity untouched.
    Static,
    /// Subdivide edges longer than the max-edge threshold.
    #[default]
    Subdivide,
    /// Decimate edges shorter than the min-edge threshold.
    Decimate,
    /// Subdivide, then decimate. Decimation runs second so subdivision
    /// cannot run away with the triangle count.
    Uniform,
    /// Subdivide, decimate, then merge/cleanup after deformation, keeping
    /// triangle density proportional to local deformation.
    Adaptive,
}

/// Tool configuration for a sculpting session.
///
/// Numeric setters clamp to `[0, 1]`; out-of-range settings cannot be
/// represented.
///
/// # Example
///
/// ```
/// use chisel::params::{SculptParams, Tool, TopologyMode};
///
/// let params = SculptParams::default()
///     .with_tool(Tool::Inflate)
///     .with_topology(TopologyMode::Adaptive)
///     .with_intensity(0.4)
///     .negative(true);
/// assert_eq!(params.tool, Tool::Inflate);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SculptParams {
    /// Active deformation tool.
    pub tool: Tool,

    /// Topology refinement mode.
    pub topology: TopologyMode,

    /// Deformation intensity in `[0, 1]`.
    pub intensity: f32,

    /// Refinement detail in `[0, 1]`; higher values produce denser
    /// triangles under the brush.
    pub detail: f32,

    /// Subtractive mode: flips the displacement direction of brush and
    /// inflate strokes.
    pub negative: bool,
}

impl Default for SculptParams {
    fn default() -> Self {
        Self {
            tool: Tool::Brush,
            topology: TopologyMode::Subdivide,
            intensity: 0.75,
            detail: 0.75,
            negative: false,
        }
    }
}

impl SculptParams {
    /// Set the active tool.
    pub fn with_tool(mut self, tool: Tool) -> Self {
        self.tool = tool;
        self
    }

    /// Set the topology refinement mode.
    pub fn with_topology(mut self, topology: TopologyMode) -> Self {
        self.topology = topology;
        self
    }

    /// Set the deformation intensity, clamped to `[0, 1]`.
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity.clamp(0.0, 1.0);
        self
    }

    /// Set the refinement detail, clamped to `[0, 1]`.
    pub fn with_detail(mut self, detail: f32) -> Self {
        self.detail = detail.clamp(0.0, 1.0);
        self
    }

    /// Set subtractive mode.
    pub fn negative(mut self, negative: bool) -> Self {
        self.negative = negative;
        self
    }
}
