//! WASM bindings for cornerlp
//!
//! This module provides JavaScript-friendly APIs for the browser front end:
//! solving problems entered in the constraint table, solving the text format,
//! and editor diagnostics.

use std::str::FromStr;

use log::warn;
use wasm_bindgen::prelude::*;

use crate::compiler::Compiler;
use crate::format;
use crate::lexer::{Lexer, TokenKind};
use crate::parser::Parser;
use cornerlp_solver::{Analysis, Constraint, Goal, Objective, Problem, Relation, Solution, Solver};

/// Objective as the constraint table holds it
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableObjective {
    coeff_x: f64,
    coeff_y: f64,
    #[serde(rename = "type")]
    goal: String,
}

/// One row of the constraint table
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableConstraint {
    #[serde(default)]
    id: Option<String>,
    coeff_x: f64,
    coeff_y: f64,
    operator: String,
    value: f64,
}

impl TableObjective {
    fn to_objective(&self) -> Objective {
        let goal = if self.goal == "maximize" {
            Goal::Maximize
        } else {
            Goal::Minimize
        };
        Objective::new(self.coeff_x, self.coeff_y, goal)
    }
}

impl TableConstraint {
    fn to_constraint(&self, index: usize) -> Result<Constraint, cornerlp_solver::RelationParseError> {
        let relation = Relation::from_str(&self.operator)?;
        let name = self.id.clone().unwrap_or_else(|| (index + 1).to_string());
        Ok(Constraint::new(name, self.coeff_x, self.coeff_y, relation, self.value))
    }
}

/// Solve the problem from the constraint table and return the result as JSON.
///
/// A row with an operator other than `<=`, `>=` or `=` admits no point, so
/// the whole problem is reported infeasible.
#[wasm_bindgen]
pub fn solve(objective: JsValue, constraints: JsValue) -> Result<JsValue, JsValue> {
    let objective: TableObjective =
        serde_wasm_bindgen::from_value(objective).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let rows: Vec<TableConstraint> =
        serde_wasm_bindgen::from_value(constraints).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let mut problem = Problem::new(objective.to_objective());
    for (i, row) in rows.iter().enumerate() {
        match row.to_constraint(i) {
            Ok(c) => problem.constraints.push(c),
            Err(e) => {
                warn!("row {}: {}", i + 1, e);
                let result = SolveResult::new(&Solution::infeasible(), None);
                return serde_wasm_bindgen::to_value(&result)
                    .map_err(|e| JsValue::from_str(&e.to_string()));
            }
        }
    }

    solve_problem(&problem)
}

/// Parse, compile and solve the text format
#[wasm_bindgen]
pub fn solve_source(source: &str) -> Result<JsValue, JsValue> {
    let program = Parser::parse(source).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let problem = Compiler::new()
        .compile(&program)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    solve_problem(&problem)
}

fn solve_problem(problem: &Problem) -> Result<JsValue, JsValue> {
    let solver = Solver::new();
    let solution = solver.solve(problem);
    let analysis = solver.analyze(problem, &solution);
    let result = SolveResult::new(&solution, Some(AnalysisResult::new(problem, &analysis)));
    serde_wasm_bindgen::to_value(&result).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The problem the app opens with, in constraint table shape
#[wasm_bindgen]
pub fn sample_problem() -> Result<JsValue, JsValue> {
    let problem = Problem::sample();
    let sample = SampleProblem {
        objective: TableObjective {
            coeff_x: problem.objective.coefficient_x,
            coeff_y: problem.objective.coefficient_y,
            goal: problem.objective.goal.to_string(),
        },
        constraints: problem
            .constraints
            .iter()
            .enumerate()
            .map(|(i, c)| TableConstraint {
                id: Some((i + 1).to_string()),
                coeff_x: c.coefficient_x,
                coeff_y: c.coefficient_y,
                operator: c.relation.to_string(),
                value: c.rhs,
            })
            .collect(),
    };
    serde_wasm_bindgen::to_value(&sample).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[derive(serde::Serialize)]
struct SampleProblem {
    objective: TableObjective,
    constraints: Vec<TableConstraint>,
}

/// Render one constraint row as an equation, e.g. `x + 2y <= 12`
#[wasm_bindgen]
pub fn format_constraint(coeff_x: f64, coeff_y: f64, operator: &str, value: f64) -> String {
    let linear = format::format_linear(coeff_x, coeff_y);
    format!("{} {} {}", linear, operator, format::format_number(value))
}

/// Validate source code and return diagnostics as JSON
#[wasm_bindgen]
pub fn validate(source: &str) -> JsValue {
    let diagnostics = get_diagnostics(source);
    serde_wasm_bindgen::to_value(&diagnostics).unwrap_or(JsValue::NULL)
}

#[derive(serde::Serialize)]
struct Diagnostic {
    start: usize,
    end: usize,
    severity: String,
    message: String,
}

fn get_diagnostics(source: &str) -> Vec<Diagnostic> {
    let error = match Parser::parse(source) {
        Err(e) => Some((e.span(), e.to_string())),
        Ok(program) => Compiler::new()
            .compile(&program)
            .err()
            .map(|e| (e.span(), e.to_string())),
    };

    error
        .map(|(span, message)| Diagnostic {
            start: span.map(|s| s.start).unwrap_or(0),
            end: span.map(|s| s.end).unwrap_or(source.len()),
            severity: "error".to_string(),
            message,
        })
        .into_iter()
        .collect()
}

/// Get semantic tokens for syntax highlighting
#[wasm_bindgen]
pub fn get_semantic_tokens(source: &str) -> Result<JsValue, JsValue> {
    let tokens: Vec<SemanticToken> = Lexer::tokenize(source)
        .into_iter()
        .filter(|t| !matches!(t.kind, TokenKind::Newline | TokenKind::Eof))
        .map(|t| {
            let token_type = match t.kind {
                TokenKind::Maximize
                | TokenKind::Minimize
                | TokenKind::Subject
                | TokenKind::To
                | TokenKind::St => "keyword",
                TokenKind::Ident => "variable",
                TokenKind::Number => "number",
                TokenKind::Comment => "comment",
                TokenKind::Colon => "delimiter",
                TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Le
                | TokenKind::Ge
                | TokenKind::Eq => "operator",
                TokenKind::Newline | TokenKind::Eof | TokenKind::Error => "error",
            };
            SemanticToken {
                start: t.span.start,
                end: t.span.end,
                token_type: token_type.to_string(),
            }
        })
        .collect();
    serde_wasm_bindgen::to_value(&tokens).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[derive(serde::Serialize)]
struct SemanticToken {
    start: usize,
    end: usize,
    token_type: String,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveResult {
    status: String,
    x: f64,
    y: f64,
    objective_value: f64,
    feasible: bool,
    analysis: Option<AnalysisResult>,
}

impl SolveResult {
    fn new(solution: &Solution, analysis: Option<AnalysisResult>) -> Self {
        Self {
            status: if solution.feasible {
                "optimal".to_string()
            } else {
                "infeasible".to_string()
            },
            x: solution.x,
            y: solution.y,
            objective_value: solution.objective_value,
            feasible: solution.feasible,
            analysis: analysis.filter(|_| solution.feasible),
        }
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisResult {
    objective: String,
    corner_points: Vec<CornerPointResult>,
    constraints: Vec<ConstraintResult>,
    binding_constraints: Vec<String>,
    contribution_x: f64,
    contribution_y: f64,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct CornerPointResult {
    x: f64,
    y: f64,
    objective_value: f64,
    optimal: bool,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ConstraintResult {
    id: String,
    equation: String,
    lhs: f64,
    rhs: f64,
    slack: f64,
    satisfied: bool,
    binding: bool,
}

impl AnalysisResult {
    fn new(problem: &Problem, analysis: &Analysis) -> Self {
        Self {
            objective: format::format_objective(&problem.objective),
            corner_points: analysis
                .corner_points
                .iter()
                .map(|c| CornerPointResult {
                    x: c.point.x,
                    y: c.point.y,
                    objective_value: c.objective_value,
                    optimal: c.optimal,
                })
                .collect(),
            constraints: problem
                .constraints
                .iter()
                .zip(&analysis.constraints)
                .map(|(c, check)| ConstraintResult {
                    id: check.constraint.clone(),
                    equation: format::format_constraint(c),
                    lhs: check.lhs,
                    rhs: check.rhs,
                    slack: check.slack,
                    satisfied: check.satisfied,
                    binding: check.binding,
                })
                .collect(),
            binding_constraints: analysis.binding_constraints.clone(),
            contribution_x: analysis.contribution_x,
            contribution_y: analysis.contribution_y,
        }
    }
}
