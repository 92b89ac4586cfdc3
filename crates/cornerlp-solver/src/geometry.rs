/// A line in general form `a*x + b*y = c`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// A candidate vertex of the feasible region
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Line {
    /// The vertical axis, `x = 0`
    pub const X_AXIS_BOUNDARY: Line = Line { a: 1.0, b: 0.0, c: 0.0 };
    /// The horizontal axis, `y = 0`
    pub const Y_AXIS_BOUNDARY: Line = Line { a: 0.0, b: 1.0, c: 0.0 };

    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates within `tolerance` of `other`
    pub fn approx_eq(&self, other: &Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() < tolerance && (self.y - other.y).abs() < tolerance
    }
}

/// Intersect two lines by Cramer's rule.
///
/// Returns `None` when `|a1*b2 - a2*b1| < parallel_epsilon`, which covers both
/// parallel and coincident lines. The threshold is absolute, so very large
/// coefficients can make nearly parallel lines intersect far away.
pub fn intersect(first: &Line, second: &Line, parallel_epsilon: f64) -> Option<Point> {
    let determinant = first.a * second.b - second.a * first.b;

    if determinant.abs() < parallel_epsilon {
        return None;
    }

    let x = (first.c * second.b - second.c * first.b) / determinant;
    let y = (first.a * second.c - second.a * first.c) / determinant;

    Some(Point { x, y })
}
