use log::debug;

use crate::feasibility::is_feasible;
use crate::geometry::{intersect, Line, Point};
use crate::problem::Constraint;
use crate::tolerance::Tolerances;

/// Boundary lines in enumeration order: `x = 0`, `y = 0`, then one line per
/// constraint in list order.
pub fn boundary_lines(constraints: &[Constraint]) -> Vec<Line> {
    let mut lines = Vec::with_capacity(constraints.len() + 2);
    lines.push(Line::X_AXIS_BOUNDARY);
    lines.push(Line::Y_AXIS_BOUNDARY);
    lines.extend(constraints.iter().map(Constraint::boundary));
    lines
}

/// Find every distinct feasible vertex reachable as a pairwise intersection
/// of boundary lines.
///
/// Points come back in discovery order: the origin first when it is
/// feasible, then pairs `(i, j)` with `i < j` over [`boundary_lines`].
/// Unbounded directions of the region are not reported.
pub fn corner_points(constraints: &[Constraint], tolerances: &Tolerances) -> Vec<Point> {
    let mut points = Vec::new();

    if is_feasible(&Point::ORIGIN, constraints, tolerances.feasibility) {
        points.push(Point::ORIGIN);
    }

    let lines = boundary_lines(constraints);
    for i in 0..lines.len() {
        for j in (i + 1)..lines.len() {
            let Some(point) = intersect(&lines[i], &lines[j], tolerances.parallel) else {
                continue;
            };
            if !is_feasible(&point, constraints, tolerances.feasibility) {
                continue;
            }
            if points.iter().any(|p| p.approx_eq(&point, tolerances.dedup)) {
                continue;
            }
            debug!("corner point ({}, {}) from lines {} and {}", point.x, point.y, i, j);
            points.push(point);
        }
    }

    points
}
