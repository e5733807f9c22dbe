//! Adaptive topology thresholds.
//!
//! A single "detail" setting plus the current brush radius drive four
//! thresholds that govern how the topology engine refines the mesh and
//! how far one stroke step may displace a vertex. The thresholds are
//! cheap to compute and are rederived at the start of every stroke step,
//! so they can never be stale across brush-radius changes.

/// Refinement thresholds derived from the brush radius and detail setting.
///
/// # Example
///
/// ```
/// use chisel::adaptive::AdaptiveThresholds;
///
/// let t = AdaptiveThresholds::derive(100.0, 0.75);
/// assert!((t.max_edge_squared - 7.0).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveThresholds {
    /// Squared edge length above which the topology engine subdivides.
    pub max_edge_squared: f32,

    /// Squared edge length below which the topology engine decimates.
    pub min_edge_squared: f32,

    /// Squared upper bound on per-vertex displacement in one step.
    pub max_step_squared: f32,

    /// Distance under which the adaptive cleanup pass merges vertices.
    pub merge_distance: f32,
}

impl AdaptiveThresholds {
    /// Derive all four thresholds from the squared brush radius and the
    /// detail setting in `[0, 1]`.
    ///
    /// The constants (1.1, 0.2, 4.2025, 0.2375) were tuned empirically
    /// for stable remeshing convergence; downstream thresholds depend on
    /// their exact values. `merge_distance` mixes a length term with an
    /// area term — the tuning targets this exact expression, so it is
    /// kept as is.
    pub fn derive(radius_squared: f32, detail: f32) -> Self {
        let max_edge_squared = radius_squared * (1.1 - detail) * 0.2;
        let min_edge_squared = max_edge_squared / 4.2025;
        let max_step_squared = min_edge_squared * 0.2375;
        let merge_distance = (4.0 * max_step_squared.sqrt() + max_edge_squared / 3.0) * 1.1;
        Self {
            max_edge_squared,
            min_edge_squared,
            max_step_squared,
            merge_distance,
        }
    }

    /// Linear upper bound on per-vertex displacement, `sqrt(max_step_squared)`.
    #[inline]
    pub fn max_step(&self) -> f32 {
        self.max_step_squared.sqrt()
    }
}
