//! Human-readable rendering of objectives and constraints, matching what the
//! result tables print.

use std::fmt::Write;

use cornerlp_solver::{Constraint, Objective, Problem};

/// Round to four decimals and drop trailing zeros (`2`, `6.6667`, `-0.5`)
pub fn format_number(value: f64) -> String {
    let rounded = (value * 1e4).round() / 1e4;
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{}", rounded)
}

fn format_term(coefficient: f64, variable: &str) -> String {
    match format_number(coefficient).as_str() {
        "1" => variable.to_string(),
        "-1" => format!("-{}", variable),
        other => format!("{}{}", other, variable),
    }
}

/// `2x + 3y`, `x - y`, `-y`; zero terms are left out
pub fn format_linear(coefficient_x: f64, coefficient_y: f64) -> String {
    let x_zero = format_number(coefficient_x) == "0";
    let y_zero = format_number(coefficient_y) == "0";

    match (x_zero, y_zero) {
        (true, true) => "0".to_string(),
        (false, true) => format_term(coefficient_x, "x"),
        (true, false) => format_term(coefficient_y, "y"),
        (false, false) => {
            let sign = if coefficient_y < 0.0 { '-' } else { '+' };
            format!(
                "{} {} {}",
                format_term(coefficient_x, "x"),
                sign,
                format_term(coefficient_y.abs(), "y")
            )
        }
    }
}

pub fn format_constraint(constraint: &Constraint) -> String {
    format!(
        "{} {} {}",
        format_linear(constraint.coefficient_x, constraint.coefficient_y),
        constraint.relation,
        format_number(constraint.rhs)
    )
}

pub fn format_objective(objective: &Objective) -> String {
    format!(
        "{} {}",
        objective.goal,
        format_linear(objective.coefficient_x, objective.coefficient_y)
    )
}

fn is_label(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
        && !matches!(
            name,
            "maximize" | "max" | "minimize" | "min" | "subject" | "to" | "st"
        )
}

/// `f64` with every digit kept so it parses back to the same value
fn source_term(coefficient: f64, variable: &str) -> String {
    if coefficient == 1.0 {
        variable.to_string()
    } else {
        format!("{}{}", coefficient, variable)
    }
}

fn source_linear(coefficient_x: f64, coefficient_y: f64) -> String {
    match (coefficient_x == 0.0, coefficient_y == 0.0) {
        (true, true) => "0".to_string(),
        (false, true) => signed_source_term(coefficient_x, "x"),
        (true, false) => signed_source_term(coefficient_y, "y"),
        (false, false) => {
            let sign = if coefficient_y < 0.0 { '-' } else { '+' };
            format!(
                "{} {} {}",
                signed_source_term(coefficient_x, "x"),
                sign,
                source_term(coefficient_y.abs(), "y")
            )
        }
    }
}

fn signed_source_term(coefficient: f64, variable: &str) -> String {
    if coefficient < 0.0 {
        format!("-{}", source_term(-coefficient, variable))
    } else {
        source_term(coefficient, variable)
    }
}

/// Render a problem in the text format accepted by [`crate::Parser`].
///
/// Coefficients are written at full precision, so compiling the output gives
/// back the same numbers. Names that are not valid labels are dropped and the
/// constraint gets a positional name when parsed back.
pub fn to_source(problem: &Problem) -> String {
    let objective = &problem.objective;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        objective.goal,
        source_linear(objective.coefficient_x, objective.coefficient_y)
    );
    let _ = writeln!(out, "subject to");
    for constraint in &problem.constraints {
        let line = format!(
            "{} {} {}",
            source_linear(constraint.coefficient_x, constraint.coefficient_y),
            constraint.relation,
            constraint.rhs + 0.0
        );
        if is_label(&constraint.name) {
            let _ = writeln!(out, "  {}: {}", constraint.name, line);
        } else {
            let _ = writeln!(out, "  {}", line);
        }
    }
    out
}
