use std::collections::HashSet;

use cornerlp_solver::{Constraint, Goal, Objective, Problem, Relation};
use thiserror::Error;

use crate::ast::*;
use crate::lexer::Span;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Unknown variable '{name}': only x and y are allowed")]
    UnknownVariable { name: String, span: Span },
    #[error("Missing objective: add a `maximize` or `minimize` line")]
    MissingObjective,
    #[error("More than one objective declared")]
    DuplicateObjective(Span),
    #[error("Constant term in objective is not supported")]
    ObjectiveConstant(Span),
    #[error("Duplicate constraint name: {0}")]
    DuplicateConstraint(String, Span),
}

impl CompileError {
    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::UnknownVariable { span, .. }
            | CompileError::DuplicateObjective(span)
            | CompileError::ObjectiveConstant(span)
            | CompileError::DuplicateConstraint(_, span) => Some(*span),
            CompileError::MissingObjective => None,
        }
    }
}

/// An expression folded to `coefficient_x * x + coefficient_y * y + constant`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Linear {
    x: f64,
    y: f64,
    constant: f64,
}

impl Linear {
    fn from_expr(expr: &Expr) -> Result<Self, CompileError> {
        let mut linear = Linear::default();
        for term in &expr.terms {
            match term.variable.as_deref() {
                Some("x") => linear.x += term.coefficient,
                Some("y") => linear.y += term.coefficient,
                Some(other) => {
                    return Err(CompileError::UnknownVariable {
                        name: other.to_string(),
                        span: term.span,
                    });
                }
                None => linear.constant += term.coefficient,
            }
        }
        Ok(linear)
    }

    fn minus(self, other: Linear) -> Linear {
        Linear {
            x: self.x - other.x,
            y: self.y - other.y,
            constant: self.constant - other.constant,
        }
    }
}

/// Lowers a parsed program into a solver [`Problem`]
#[derive(Debug, Default)]
pub struct Compiler;

impl Compiler {
    pub fn new() -> Self {
        Self
    }

    pub fn compile(&self, program: &Program) -> Result<Problem, CompileError> {
        let mut objectives = program.objectives();
        let objective = objectives.next().ok_or(CompileError::MissingObjective)?;
        if let Some(extra) = objectives.next() {
            return Err(CompileError::DuplicateObjective(extra.span));
        }

        let mut problem = Problem::new(self.compile_objective(objective)?);

        let mut names = HashSet::new();
        for (i, decl) in program.constraints().enumerate() {
            let constraint = self.compile_constraint(decl, i)?;
            if !names.insert(constraint.name.clone()) {
                return Err(CompileError::DuplicateConstraint(constraint.name, decl.span));
            }
            problem.constraints.push(constraint);
        }

        Ok(problem)
    }

    fn compile_objective(&self, decl: &ObjectiveDecl) -> Result<Objective, CompileError> {
        let linear = Linear::from_expr(&decl.expr)?;
        if linear.constant != 0.0 {
            return Err(CompileError::ObjectiveConstant(decl.expr.span));
        }
        let goal = match decl.sense {
            Sense::Maximize => Goal::Maximize,
            Sense::Minimize => Goal::Minimize,
        };
        Ok(Objective::new(linear.x, linear.y, goal))
    }

    /// Variables move to the left, constants to the right
    fn compile_constraint(&self, decl: &ConstraintDecl, index: usize) -> Result<Constraint, CompileError> {
        let folded = Linear::from_expr(&decl.lhs)?.minus(Linear::from_expr(&decl.rhs)?);
        let relation = match decl.op {
            RelOp::Le => Relation::LessOrEqual,
            RelOp::Ge => Relation::GreaterOrEqual,
            RelOp::Eq => Relation::Equal,
        };
        let name = decl
            .label
            .clone()
            .unwrap_or_else(|| format!("c{}", index + 1));

        Ok(Constraint::new(name, folded.x, folded.y, relation, -folded.constant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Parser;

    fn compile(source: &str) -> Result<Problem, CompileError> {
        let program = Parser::parse(source).unwrap();
        Compiler::new().compile(&program)
    }

    #[test]
    fn test_compile_sample() {
        let problem = compile(
            "maximize 2x + 3y\nsubject to\nx + y <= 10\n2x + y <= 16\nx + 2y <= 12",
        )
        .unwrap();
        assert_eq!(problem, Problem::sample());
    }

    #[test]
    fn test_terms_are_collected() {
        let problem = compile("min x\nlimit: x + 2 + y <= 3y - x + 5").unwrap();
        let c = &problem.constraints[0];
        assert_eq!(c.name, "limit");
        assert_eq!(c.coefficient_x, 2.0);
        assert_eq!(c.coefficient_y, -2.0);
        assert_eq!(c.rhs, 3.0);
        assert_eq!(c.relation, Relation::LessOrEqual);
    }

    #[test]
    fn test_auto_names_follow_position() {
        let problem = compile("max y\na: x <= 1\ny <= 2\nx >= 0").unwrap();
        let names: Vec<_> = problem.constraints.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c2", "c3"]);
    }

    #[test]
    fn test_unknown_variable() {
        let err = compile("max x + z").unwrap_err();
        assert_eq!(
            err,
            CompileError::UnknownVariable {
                name: "z".to_string(),
                span: Span::new(6, 9),
            }
        );
    }

    #[test]
    fn test_objective_rules() {
        assert_eq!(compile("x <= 4"), Err(CompileError::MissingObjective));
        assert!(matches!(compile("max x\nmin y"), Err(CompileError::DuplicateObjective(_))));
        assert!(matches!(compile("max x + 1"), Err(CompileError::ObjectiveConstant(_))));
    }

    #[test]
    fn test_duplicate_constraint_name() {
        let err = compile("max x\ncap: x <= 1\ncap: y <= 1").unwrap_err();
        assert!(matches!(err, CompileError::DuplicateConstraint(ref name, _) if name == "cap"));
    }
}
