use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::geometry::Line;

/// Represents a two-variable linear program over non-negative `x` and `y`
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    /// Objective function
    pub objective: Objective,
    /// Constraints, in the order they were entered
    pub constraints: Vec<Constraint>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Objective {
    pub coefficient_x: f64,
    pub coefficient_y: f64,
    /// Whether to maximize or minimize
    pub goal: Goal,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    Maximize,
    Minimize,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Name/label for the constraint (for reports only)
    pub name: String,
    pub coefficient_x: f64,
    pub coefficient_y: f64,
    /// Comparison operator
    pub relation: Relation,
    /// Right-hand side value
    pub rhs: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Less than or equal (<=)
    #[cfg_attr(feature = "serde", serde(rename = "<="))]
    LessOrEqual,
    /// Greater than or equal (>=)
    #[cfg_attr(feature = "serde", serde(rename = ">="))]
    GreaterOrEqual,
    /// Equal (=)
    #[cfg_attr(feature = "serde", serde(rename = "="))]
    Equal,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown relation operator: {0:?}")]
pub struct RelationParseError(pub String);

impl Objective {
    pub fn new(coefficient_x: f64, coefficient_y: f64, goal: Goal) -> Self {
        Self {
            coefficient_x,
            coefficient_y,
            goal,
        }
    }

    pub fn maximize(coefficient_x: f64, coefficient_y: f64) -> Self {
        Self::new(coefficient_x, coefficient_y, Goal::Maximize)
    }

    pub fn minimize(coefficient_x: f64, coefficient_y: f64) -> Self {
        Self::new(coefficient_x, coefficient_y, Goal::Minimize)
    }

    /// Value of the objective at `(x, y)`
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        self.coefficient_x * x + self.coefficient_y * y
    }
}

impl Default for Objective {
    fn default() -> Self {
        Self::maximize(0.0, 0.0)
    }
}

impl Goal {
    /// True when `candidate` strictly improves on `best`. Ties are never better.
    pub fn is_better(self, candidate: f64, best: f64) -> bool {
        match self {
            Goal::Maximize => candidate > best,
            Goal::Minimize => candidate < best,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Goal::Maximize => "maximize",
            Goal::Minimize => "minimize",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Constraint {
    pub fn new(
        name: impl Into<String>,
        coefficient_x: f64,
        coefficient_y: f64,
        relation: Relation,
        rhs: f64,
    ) -> Self {
        Self {
            name: name.into(),
            coefficient_x,
            coefficient_y,
            relation,
            rhs,
        }
    }

    /// Left-hand side evaluated at `(x, y)`
    pub fn lhs(&self, x: f64, y: f64) -> f64 {
        self.coefficient_x * x + self.coefficient_y * y
    }

    /// The boundary line, i.e. the constraint with its relation read as `=`
    pub fn boundary(&self) -> Line {
        Line::new(self.coefficient_x, self.coefficient_y, self.rhs)
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.coefficient_x.is_finite() && self.coefficient_y.is_finite() && self.rhs.is_finite()
    }
}

impl Relation {
    pub fn symbol(self) -> &'static str {
        match self {
            Relation::LessOrEqual => "<=",
            Relation::GreaterOrEqual => ">=",
            Relation::Equal => "=",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Relation {
    type Err = RelationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "<=" | "≤" => Ok(Relation::LessOrEqual),
            ">=" | "≥" => Ok(Relation::GreaterOrEqual),
            "=" | "==" => Ok(Relation::Equal),
            other => Err(RelationParseError(other.to_string())),
        }
    }
}

impl Problem {
    pub fn new(objective: Objective) -> Self {
        Self {
            objective,
            constraints: Vec::new(),
        }
    }

    pub fn set_objective(&mut self, coefficient_x: f64, coefficient_y: f64, goal: Goal) {
        self.objective = Objective::new(coefficient_x, coefficient_y, goal);
    }

    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        coefficient_x: f64,
        coefficient_y: f64,
        relation: Relation,
        rhs: f64,
    ) {
        self.constraints.push(Constraint::new(
            name,
            coefficient_x,
            coefficient_y,
            relation,
            rhs,
        ));
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// The problem the web tool opens with: maximize 2x + 3y under three
    /// resource limits.
    pub fn sample() -> Self {
        let mut problem = Problem::new(Objective::maximize(2.0, 3.0));
        problem.add_constraint("c1", 1.0, 1.0, Relation::LessOrEqual, 10.0);
        problem.add_constraint("c2", 2.0, 1.0, Relation::LessOrEqual, 16.0);
        problem.add_constraint("c3", 1.0, 2.0, Relation::LessOrEqual, 12.0);
        problem
    }
}

impl Default for Problem {
    fn default() -> Self {
        Self::new(Objective::default())
    }
}
