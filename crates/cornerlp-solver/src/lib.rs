mod corner;
mod feasibility;
mod geometry;
mod problem;
mod solution;
mod solver;
mod tolerance;

pub use corner::{boundary_lines, corner_points};
pub use feasibility::{check_constraint, is_feasible};
pub use geometry::{intersect, Line, Point};
pub use problem::{Constraint, Goal, Objective, Problem, Relation, RelationParseError};
pub use solution::{Analysis, ConstraintCheck, CornerPoint, Solution, SolutionStatus};
pub use solver::{solve, SolveError, Solver};
pub use tolerance::{Tolerances, DEDUP_EPSILON, FEASIBILITY_EPSILON, PARALLEL_EPSILON};
