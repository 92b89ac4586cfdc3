use log::{debug, warn};
use thiserror::Error;

use crate::corner::corner_points;
use crate::feasibility::check_constraint;
use crate::geometry::Point;
use crate::problem::{Constraint, Objective, Problem};
use crate::solution::{Analysis, CornerPoint, Solution};
use crate::tolerance::Tolerances;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("Non-finite coefficient in {0}")]
    NonFinite(String),
    #[error("Objective is NaN at corner point ({x}, {y})")]
    NonFiniteObjective { x: f64, y: f64 },
}

/// Corner-point solver for two-variable linear programs
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Solver {
    /// Tolerances for floating point comparisons
    tolerances: Tolerances,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    pub fn with_parallel_epsilon(mut self, epsilon: f64) -> Self {
        self.tolerances.parallel = epsilon;
        self
    }

    pub fn with_feasibility_epsilon(mut self, epsilon: f64) -> Self {
        self.tolerances.feasibility = epsilon;
        self
    }

    pub fn with_dedup_epsilon(mut self, epsilon: f64) -> Self {
        self.tolerances.dedup = epsilon;
        self
    }

    pub fn tolerances(&self) -> &Tolerances {
        &self.tolerances
    }

    /// Solve the problem by enumerating the corner points of its feasible region.
    ///
    /// Never fails: an internal fault is logged and reported as infeasible.
    pub fn solve(&self, problem: &Problem) -> Solution {
        match self.try_solve(problem) {
            Ok(solution) => solution,
            Err(e) => {
                warn!("solve failed, reporting infeasible: {}", e);
                Solution::infeasible()
            }
        }
    }

    /// Like [`Solver::solve`], but surfaces internal faults instead of
    /// folding them into the infeasible result.
    pub fn try_solve(&self, problem: &Problem) -> Result<Solution, SolveError> {
        validate(problem)?;

        let points = corner_points(&problem.constraints, &self.tolerances);
        let Some((best, value)) = select(&problem.objective, &points)? else {
            debug!("no feasible corner point among {} constraints", problem.num_constraints());
            return Ok(Solution::infeasible());
        };

        debug!(
            "optimum ({}, {}) = {} over {} corner points",
            best.x,
            best.y,
            value,
            points.len()
        );

        // Clamp only the reported coordinates; the value stays that of the vertex
        Ok(Solution::optimal(clamp_non_negative(best.x), clamp_non_negative(best.y), value))
    }

    /// Build the corner point table and constraint report for a solution
    /// previously returned by [`Solver::solve`] for the same problem.
    pub fn analyze(&self, problem: &Problem, solution: &Solution) -> Analysis {
        if !solution.feasible {
            return Analysis::empty();
        }

        let optimum = solution.point();
        let mut marked = false;
        let corner_points = corner_points(&problem.constraints, &self.tolerances)
            .into_iter()
            .map(|point| {
                let optimal = !marked && point.approx_eq(&optimum, self.tolerances.dedup);
                marked |= optimal;
                CornerPoint {
                    point,
                    objective_value: problem.objective.evaluate(point.x, point.y),
                    optimal,
                }
            })
            .collect();

        let constraints: Vec<_> = problem
            .constraints
            .iter()
            .map(|c| check_constraint(c, &optimum, self.tolerances.feasibility))
            .collect();

        let binding_constraints = constraints
            .iter()
            .filter(|check| check.binding)
            .map(|check| check.constraint.clone())
            .collect();

        Analysis {
            corner_points,
            constraints,
            binding_constraints,
            contribution_x: problem.objective.coefficient_x * solution.x,
            contribution_y: problem.objective.coefficient_y * solution.y,
        }
    }
}

/// Solve with default tolerances
pub fn solve(objective: &Objective, constraints: &[Constraint]) -> Solution {
    let problem = Problem {
        objective: *objective,
        constraints: constraints.to_vec(),
    };
    Solver::new().solve(&problem)
}

fn validate(problem: &Problem) -> Result<(), SolveError> {
    let objective = &problem.objective;
    if !objective.coefficient_x.is_finite() || !objective.coefficient_y.is_finite() {
        return Err(SolveError::NonFinite("objective".to_string()));
    }
    if let Some(c) = problem.constraints.iter().find(|c| !c.is_finite()) {
        return Err(SolveError::NonFinite(format!("constraint {}", c.name)));
    }
    Ok(())
}

/// `max(0, v)` that never yields `-0.0`
fn clamp_non_negative(value: f64) -> f64 {
    if value <= 0.0 { 0.0 } else { value }
}

/// Pick the best point, keeping the earliest on ties.
///
/// Infinite values compare like any other; only NaN is a fault.
fn select(objective: &Objective, points: &[Point]) -> Result<Option<(Point, f64)>, SolveError> {
    let mut best: Option<(Point, f64)> = None;

    for point in points {
        let value = objective.evaluate(point.x, point.y);
        if value.is_nan() {
            return Err(SolveError::NonFiniteObjective {
                x: point.x,
                y: point.y,
            });
        }
        match best {
            Some((_, best_value)) if !objective.goal.is_better(value, best_value) => {}
            _ => best = Some((*point, value)),
        }
    }

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{Goal, Relation};
    use crate::solution::SolutionStatus;

    #[test]
    fn test_simple_maximization() {
        // Maximize: 3x + 2y
        // Subject to:
        //   x + y <= 4
        //   x <= 3
        //   y <= 3
        // Optimal: x=3, y=1, obj=11
        let mut problem = Problem::new(Objective::maximize(3.0, 2.0));
        problem.add_constraint("sum", 1.0, 1.0, Relation::LessOrEqual, 4.0);
        problem.add_constraint("x_max", 1.0, 0.0, Relation::LessOrEqual, 3.0);
        problem.add_constraint("y_max", 0.0, 1.0, Relation::LessOrEqual, 3.0);

        let solution = Solver::new().solve(&problem);

        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert!(solution.feasible);
        assert!((solution.x - 3.0).abs() < 1e-6, "x = {} (expected 3)", solution.x);
        assert!((solution.y - 1.0).abs() < 1e-6, "y = {} (expected 1)", solution.y);
        assert!((solution.objective_value - 11.0).abs() < 1e-6, "obj = {} (expected 11)", solution.objective_value);
    }

    #[test]
    fn test_minimization_with_ge() {
        // Minimize: 2x + 3y
        // Subject to:
        //   x + y >= 4
        //   x <= 3
        //   y <= 3
        // Optimal: x=3, y=1, obj=9
        let mut problem = Problem::new(Objective::minimize(2.0, 3.0));
        problem.add_constraint("sum", 1.0, 1.0, Relation::GreaterOrEqual, 4.0);
        problem.add_constraint("x_max", 1.0, 0.0, Relation::LessOrEqual, 3.0);
        problem.add_constraint("y_max", 0.0, 1.0, Relation::LessOrEqual, 3.0);

        let solution = Solver::new().solve(&problem);

        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert!((solution.x - 3.0).abs() < 1e-6, "x = {} (expected 3)", solution.x);
        assert!((solution.y - 1.0).abs() < 1e-6, "y = {} (expected 1)", solution.y);
        assert!((solution.objective_value - 9.0).abs() < 1e-6, "obj = {} (expected 9)", solution.objective_value);
    }

    #[test]
    fn test_sample_problem() {
        // Corner points: (0,0)=0, (0,6)=18, (8,0)=16, (20/3,8/3)=64/3
        let problem = Problem::sample();
        let solution = Solver::new().solve(&problem);

        assert!(solution.feasible);
        assert!((solution.x - 20.0 / 3.0).abs() < 1e-6, "x = {}", solution.x);
        assert!((solution.y - 8.0 / 3.0).abs() < 1e-6, "y = {}", solution.y);
        assert!((solution.objective_value - 64.0 / 3.0).abs() < 1e-6, "obj = {}", solution.objective_value);
    }

    #[test]
    fn test_infeasible() {
        // x >= 5
        // x <= 3
        let mut problem = Problem::new(Objective::minimize(1.0, 0.0));
        problem.add_constraint("lower", 1.0, 0.0, Relation::GreaterOrEqual, 5.0);
        problem.add_constraint("upper", 1.0, 0.0, Relation::LessOrEqual, 3.0);

        let solution = Solver::new().solve(&problem);

        assert_eq!(solution, Solution::infeasible());
    }

    #[test]
    fn test_negative_rhs_contradiction() {
        let objective = Objective::maximize(1.0, 1.0);
        let constraints = vec![Constraint::new("neg", 1.0, 0.0, Relation::LessOrEqual, -5.0)];

        let solution = solve(&objective, &constraints);

        assert!(!solution.feasible);
        assert_eq!(solution.status, SolutionStatus::Infeasible);
        assert_eq!((solution.x, solution.y, solution.objective_value), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_no_constraints_returns_origin() {
        // The region is unbounded; only the origin is a pairwise vertex
        let solution = solve(&Objective::maximize(2.0, 3.0), &[]);

        assert!(solution.feasible);
        assert_eq!((solution.x, solution.y, solution.objective_value), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_unbounded_region_finds_bounded_vertices_only() {
        // x + y >= 2: vertices (0,2) and (2,0), region open to the top right
        let objective = Objective::maximize(1.0, 1.0);
        let constraints = vec![Constraint::new("floor", 1.0, 1.0, Relation::GreaterOrEqual, 2.0)];

        let solution = solve(&objective, &constraints);

        assert!(solution.feasible);
        assert!((solution.objective_value - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_tie_keeps_first_discovered() {
        // Maximize x + y on x + y <= 4: (0,4) and (4,0) tie; (0,4) comes from
        // the x=0 line pair, which is enumerated first
        let objective = Objective::maximize(1.0, 1.0);
        let constraints = vec![Constraint::new("sum", 1.0, 1.0, Relation::LessOrEqual, 4.0)];

        let solution = solve(&objective, &constraints);

        assert_eq!((solution.x, solution.y), (0.0, 4.0));
        assert_eq!(solution.objective_value, 4.0);
    }

    #[test]
    fn test_equality_constraint() {
        // Minimize x + 2y on x + y = 5 -> (5, 0)
        let objective = Objective::minimize(1.0, 2.0);
        let constraints = vec![Constraint::new("total", 1.0, 1.0, Relation::Equal, 5.0)];

        let solution = solve(&objective, &constraints);

        assert!(solution.feasible);
        assert!((solution.x - 5.0).abs() < 1e-6);
        assert!(solution.y.abs() < 1e-6);
        assert!((solution.objective_value - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_negative_and_zero_coefficients() {
        // Minimize -x + 0y on x <= 3, y <= 2 -> x = 3
        let objective = Objective::new(-1.0, 0.0, Goal::Minimize);
        let constraints = vec![
            Constraint::new("x_max", 1.0, 0.0, Relation::LessOrEqual, 3.0),
            Constraint::new("y_max", 0.0, 1.0, Relation::LessOrEqual, 2.0),
        ];

        let solution = solve(&objective, &constraints);

        assert!((solution.x - 3.0).abs() < 1e-6);
        assert_eq!(solution.y, 0.0);
        assert!((solution.objective_value + 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_result_satisfies_constraints_and_objective() {
        let problem = Problem::sample();
        let solver = Solver::new();
        let solution = solver.solve(&problem);
        let point = solution.point();

        assert!(crate::feasibility::is_feasible(&point, &problem.constraints, 1e-6));
        let expected = problem.objective.evaluate(solution.x, solution.y);
        assert!((solution.objective_value - expected).abs() < 1e-6);
    }

    #[test]
    fn test_adding_constraint_never_improves_maximum() {
        let mut problem = Problem::sample();
        let before = Solver::new().solve(&problem);
        problem.add_constraint("tight", 1.0, 0.0, Relation::LessOrEqual, 2.0);
        let after = Solver::new().solve(&problem);

        assert!(after.feasible);
        assert!(after.objective_value <= before.objective_value + 1e-6);
    }

    #[test]
    fn test_deterministic() {
        let problem = Problem::sample();
        let solver = Solver::new();
        let first = solver.solve(&problem);
        for _ in 0..10 {
            let again = solver.solve(&problem);
            assert_eq!(first.x.to_bits(), again.x.to_bits());
            assert_eq!(first.y.to_bits(), again.y.to_bits());
            assert_eq!(first.objective_value.to_bits(), again.objective_value.to_bits());
        }
    }

    #[test]
    fn test_non_finite_input_is_infeasible() {
        let mut problem = Problem::new(Objective::maximize(f64::NAN, 1.0));
        problem.add_constraint("sum", 1.0, 1.0, Relation::LessOrEqual, 4.0);

        assert_eq!(
            Solver::new().try_solve(&problem),
            Err(SolveError::NonFinite("objective".to_string()))
        );
        assert_eq!(Solver::new().solve(&problem), Solution::infeasible());

        let mut problem = Problem::new(Objective::maximize(1.0, 1.0));
        problem.add_constraint("bad", f64::INFINITY, 1.0, Relation::LessOrEqual, 4.0);
        assert!(matches!(
            Solver::new().try_solve(&problem),
            Err(SolveError::NonFinite(_))
        ));
        assert!(!Solver::new().solve(&problem).feasible);
    }

    #[test]
    fn test_custom_tolerances() {
        // With zero feasibility slack, a 1e-9 overshoot of the RHS is rejected
        let constraints = vec![Constraint::new("cap", 1.0, 0.0, Relation::LessOrEqual, -1e-9)];
        let strict = Solver::new().with_feasibility_epsilon(0.0);
        let problem = Problem {
            objective: Objective::maximize(1.0, 0.0),
            constraints,
        };

        assert!(Solver::new().solve(&problem).feasible);
        assert!(!strict.solve(&problem).feasible);
        assert_eq!(strict.tolerances().feasibility, 0.0);
    }

    #[test]
    fn test_overflowing_objective_still_picks_a_vertex() {
        // 1e308 * 10 overflows to +inf at (0,10) and (10,0); (0,10) is found first
        let objective = Objective::maximize(1e308, 1e308);
        let constraints = vec![Constraint::new("sum", 1.0, 1.0, Relation::LessOrEqual, 10.0)];

        let solution = solve(&objective, &constraints);

        assert!(solution.feasible);
        assert_eq!(solution.status, SolutionStatus::Optimal);
        assert_eq!((solution.x, solution.y), (0.0, 10.0));
        assert_eq!(solution.objective_value, f64::INFINITY);
    }

    #[test]
    fn test_clamped_coordinates_are_positive_zero() {
        // y = 0 meets x + y = 10 at (10, -0.0)
        let objective = Objective::maximize(1.0, 0.0);
        let constraints = vec![Constraint::new("sum", 1.0, 1.0, Relation::LessOrEqual, 10.0)];

        let solution = solve(&objective, &constraints);

        assert_eq!(solution.x, 10.0);
        assert_eq!(solution.y.to_bits(), 0.0f64.to_bits());
        assert_eq!(clamp_non_negative(-0.0).to_bits(), 0.0f64.to_bits());
        assert_eq!(clamp_non_negative(-1e-9), 0.0);
        assert_eq!(clamp_non_negative(2.5), 2.5);
    }

    #[test]
    fn test_dedup_epsilon_merges_nearby_vertices() {
        // Cutting the (1,1) corner by 1e-4 leaves two vertices 1e-4 apart:
        // (0.9999, 1) and (1, 0.9999)
        let mut problem = Problem::new(Objective::maximize(1.0, 1.0));
        problem.add_constraint("y_max", 0.0, 1.0, Relation::LessOrEqual, 1.0);
        problem.add_constraint("x_max", 1.0, 0.0, Relation::LessOrEqual, 1.0);
        problem.add_constraint("cut", 1.0, 1.0, Relation::LessOrEqual, 1.9999);

        let fine = Solver::new();
        let coarse = Solver::new().with_dedup_epsilon(1e-3);

        let solution = fine.solve(&problem);
        assert_eq!(fine.analyze(&problem, &solution).corner_points.len(), 5);

        let solution = coarse.solve(&problem);
        let corners = coarse.analyze(&problem, &solution).corner_points;
        assert_eq!(corners.len(), 4);
        assert!((corners[3].point.x - 0.9999).abs() < 1e-9);
        assert!((corners[3].point.y - 1.0).abs() < 1e-9);
        assert!((solution.objective_value - 1.9999).abs() < 1e-9);
        assert_eq!(coarse.tolerances().dedup, 1e-3);
    }

    #[test]
    fn test_parallel_epsilon_skips_nearly_parallel_pairs() {
        // The two boundaries meet at (2,2) with determinant 5e-4
        let mut problem = Problem::new(Objective::maximize(1.0, 0.0));
        problem.add_constraint("upper", 1.0, 1.0, Relation::LessOrEqual, 4.0);
        problem.add_constraint("lower", 1.0, 1.0005, Relation::GreaterOrEqual, 4.001);

        let solution = Solver::new().solve(&problem);
        assert!((solution.x - 2.0).abs() < 1e-6, "x = {}", solution.x);
        assert!((solution.y - 2.0).abs() < 1e-6, "y = {}", solution.y);

        // With a coarser threshold only the two points on x = 0 remain
        let coarse = Solver::new().with_parallel_epsilon(1e-3);
        let solution = coarse.solve(&problem);
        assert!(solution.feasible);
        assert_eq!(solution.x, 0.0);
        assert!((solution.y - 4.0).abs() < 1e-9);
        assert_eq!(coarse.analyze(&problem, &solution).corner_points.len(), 2);
    }

    #[test]
    fn test_with_tolerances_replaces_all() {
        let tolerances = Tolerances {
            parallel: 1e-3,
            feasibility: 1e-4,
            dedup: 1e-2,
        };
        let solver = Solver::new().with_tolerances(tolerances);

        assert_eq!(solver.tolerances(), &tolerances);
        assert_eq!(
            solver,
            Solver::new()
                .with_parallel_epsilon(1e-3)
                .with_feasibility_epsilon(1e-4)
                .with_dedup_epsilon(1e-2)
        );
        assert_eq!(Solver::new().tolerances(), &Tolerances::default());
    }

    #[test]
    fn test_analyze_sample() {
        let problem = Problem::sample();
        let solver = Solver::new();
        let solution = solver.solve(&problem);
        let analysis = solver.analyze(&problem, &solution);

        assert_eq!(analysis.corner_points.len(), 4);
        let optimal: Vec<_> = analysis.corner_points.iter().filter(|c| c.optimal).collect();
        assert_eq!(optimal.len(), 1);
        assert!((optimal[0].objective_value - 64.0 / 3.0).abs() < 1e-6);

        assert_eq!(analysis.binding_constraints, vec!["c2".to_string(), "c3".to_string()]);
        assert!(analysis.constraints.iter().all(|c| c.satisfied));
        assert!((analysis.contribution_x - 40.0 / 3.0).abs() < 1e-6);
        assert!((analysis.contribution_y - 8.0).abs() < 1e-6);
    }

    #[test]
    fn test_analyze_infeasible_is_empty() {
        let mut problem = Problem::new(Objective::maximize(1.0, 1.0));
        problem.add_constraint("neg", 1.0, 1.0, Relation::LessOrEqual, -1.0);
        let solver = Solver::new();
        let solution = solver.solve(&problem);

        assert_eq!(solver.analyze(&problem, &solution), Analysis::empty());
    }
}
