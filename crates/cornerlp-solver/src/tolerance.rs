/// Below this absolute determinant two boundary lines count as parallel.
pub const PARALLEL_EPSILON: f64 = 1e-10;

/// Slack allowed when testing non-negativity and constraint relations.
pub const FEASIBILITY_EPSILON: f64 = 1e-6;

/// Two corner points closer than this on both axes are the same vertex.
pub const DEDUP_EPSILON: f64 = 1e-6;

/// Floating point tolerances used by the corner-point solver
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Absolute threshold on the intersection determinant
    pub parallel: f64,
    /// Absolute slack for the feasibility predicate
    pub feasibility: f64,
    /// Absolute per-coordinate distance for vertex deduplication
    pub dedup: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            parallel: PARALLEL_EPSILON,
            feasibility: FEASIBILITY_EPSILON,
            dedup: DEDUP_EPSILON,
        }
    }
}
