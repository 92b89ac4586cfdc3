use crate::geometry::Point;
use crate::problem::{Constraint, Relation};
use crate::solution::ConstraintCheck;

/// True when `point` lies in the first quadrant and satisfies every constraint,
/// each test widened by `tolerance`.
pub fn is_feasible(point: &Point, constraints: &[Constraint], tolerance: f64) -> bool {
    if point.x < -tolerance || point.y < -tolerance {
        return false;
    }

    constraints
        .iter()
        .all(|c| satisfies(c.relation, c.lhs(point.x, point.y), c.rhs, tolerance))
}

fn satisfies(relation: Relation, lhs: f64, rhs: f64, tolerance: f64) -> bool {
    match relation {
        Relation::LessOrEqual => lhs <= rhs + tolerance,
        Relation::GreaterOrEqual => lhs >= rhs - tolerance,
        Relation::Equal => (lhs - rhs).abs() <= tolerance,
    }
}

/// Evaluate a single constraint at `point` for the satisfaction report
pub fn check_constraint(constraint: &Constraint, point: &Point, tolerance: f64) -> ConstraintCheck {
    let lhs = constraint.lhs(point.x, point.y);
    let slack = match constraint.relation {
        Relation::LessOrEqual => constraint.rhs - lhs,
        Relation::GreaterOrEqual => lhs - constraint.rhs,
        Relation::Equal => -(lhs - constraint.rhs).abs(),
    };

    ConstraintCheck {
        constraint: constraint.name.clone(),
        relation: constraint.relation,
        lhs,
        rhs: constraint.rhs,
        slack,
        satisfied: satisfies(constraint.relation, lhs, constraint.rhs, tolerance),
        binding: (lhs - constraint.rhs).abs() <= tolerance,
    }
}
