use crate::geometry::Point;
use crate::problem::Relation;

/// The result of solving a two-variable LP
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Solution status
    pub status: SolutionStatus,
    /// Optimal x, clamped to be non-negative (0 when infeasible)
    pub x: f64,
    /// Optimal y, clamped to be non-negative (0 when infeasible)
    pub y: f64,
    /// Objective at the optimal vertex before clamping (0 when infeasible)
    pub objective_value: f64,
    /// True iff at least one feasible corner point exists
    pub feasible: bool,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// An optimal corner point was found
    Optimal,
    /// No feasible corner point exists
    Infeasible,
}

/// Detailed breakdown of a solve, for result tables and plots
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Every feasible corner point, in discovery order
    pub corner_points: Vec<CornerPoint>,

    /// Satisfaction of each constraint at the reported solution
    pub constraints: Vec<ConstraintCheck>,

    /// Which constraints are binding (tight) at the optimum
    pub binding_constraints: Vec<String>,

    /// `coefficient_x * x` at the reported solution
    pub contribution_x: f64,

    /// `coefficient_y * y` at the reported solution
    pub contribution_y: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerPoint {
    pub point: Point,
    /// Objective evaluated at this vertex
    pub objective_value: f64,
    /// Is this the vertex the solver picked?
    pub optimal: bool,
}

/// How one constraint fares at a given point
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintCheck {
    /// Constraint name
    pub constraint: String,
    pub relation: Relation,
    /// Left-hand side value achieved
    pub lhs: f64,
    /// Required value (from constraint RHS)
    pub rhs: f64,
    /// Distance to the boundary in the allowed direction; negative when violated
    pub slack: f64,
    pub satisfied: bool,
    /// Left-hand side equals the RHS within tolerance
    pub binding: bool,
}

impl Solution {
    pub fn optimal(x: f64, y: f64, objective_value: f64) -> Self {
        Self {
            status: SolutionStatus::Optimal,
            x,
            y,
            objective_value,
            feasible: true,
        }
    }

    pub fn infeasible() -> Self {
        Self {
            status: SolutionStatus::Infeasible,
            x: 0.0,
            y: 0.0,
            objective_value: 0.0,
            feasible: false,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl Analysis {
    pub fn empty() -> Self {
        Self {
            corner_points: Vec::new(),
            constraints: Vec::new(),
            binding_constraints: Vec::new(),
            contribution_x: 0.0,
            contribution_y: 0.0,
        }
    }
}
