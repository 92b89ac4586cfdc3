use clap::{Parser, Subcommand};
use cornerlp_solver::{Problem, SolutionStatus, Solver};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cornerlp")]
#[command(about = "Solve two-variable linear programs by the corner-point method", long_about = None)]
struct Cli {
    /// Log solver steps (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a problem file and output the AST
    Parse {
        /// The file to parse
        file: PathBuf,
        /// Output format (json, pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Solve a problem and output the optimal corner point
    Solve {
        /// The file containing the problem
        file: PathBuf,
        /// Show corner points and constraint report
        #[arg(short, long)]
        analysis: bool,
        /// Output format (json, pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Check a problem file for errors
    Check {
        /// The file to check
        file: PathBuf,
    },
    /// Print the sample problem in the text format
    Sample,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match cli.command {
        Commands::Parse { file, format } => {
            let source = read_source(&file);

            match cornerlp_lang::Parser::parse(&source) {
                Ok(program) => {
                    if format == "json" {
                        println!("{}", serde_json::to_string_pretty(&program).unwrap_or_else(|e| {
                            format!("Error: {}", e)
                        }));
                    } else {
                        println!("{:#?}", program);
                    }
                }
                Err(e) => {
                    eprintln!("Parse error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Solve { file, analysis, format } => {
            let source = read_source(&file);
            let problem = compile(&source);
            log::debug!("loaded {} constraints from {}", problem.num_constraints(), file.display());

            let solver = Solver::new();
            let solution = solver.solve(&problem);
            let report = solver.analyze(&problem, &solution);

            if format == "json" {
                let output = serde_json::json!({
                    "problem": problem,
                    "solution": solution,
                    "analysis": report,
                });
                println!("{}", serde_json::to_string_pretty(&output).unwrap_or_else(|e| {
                    format!("Error: {}", e)
                }));
                if !solution.feasible {
                    std::process::exit(1);
                }
                return;
            }

            println!("Objective: {}", cornerlp_lang::format_objective(&problem.objective));
            println!("Constraints: {}", problem.num_constraints());
            println!();

            match solution.status {
                SolutionStatus::Optimal => {
                    println!("Status: OPTIMAL");
                    println!("x = {}", cornerlp_lang::format_number(solution.x));
                    println!("y = {}", cornerlp_lang::format_number(solution.y));
                    println!(
                        "Objective value: {}",
                        cornerlp_lang::format_number(solution.objective_value)
                    );

                    if analysis {
                        println!();
                        println!("Corner points:");
                        for corner in &report.corner_points {
                            println!(
                                "  ({:>10}, {:>10})  value {:>10}{}",
                                cornerlp_lang::format_number(corner.point.x),
                                cornerlp_lang::format_number(corner.point.y),
                                cornerlp_lang::format_number(corner.objective_value),
                                if corner.optimal { "  <- optimal" } else { "" }
                            );
                        }
                        println!();

                        println!("Constraints:");
                        for (constraint, check) in problem.constraints.iter().zip(&report.constraints) {
                            println!(
                                "  {:10} {:24} lhs {:>10}  {}{}",
                                check.constraint,
                                cornerlp_lang::format_constraint(constraint),
                                cornerlp_lang::format_number(check.lhs),
                                if check.satisfied { "satisfied" } else { "VIOLATED" },
                                if check.binding { " (binding)" } else { "" }
                            );
                        }
                        println!();

                        println!("Contribution to objective:");
                        println!("  x: {}", cornerlp_lang::format_number(report.contribution_x));
                        println!("  y: {}", cornerlp_lang::format_number(report.contribution_y));
                    }
                }
                SolutionStatus::Infeasible => {
                    println!("Status: INFEASIBLE");
                    println!("No corner point satisfies all constraints.");
                    std::process::exit(1);
                }
            }
        }
        Commands::Check { file } => {
            let source = read_source(&file);
            let problem = compile(&source);

            println!("✓ {} is valid", file.display());
            println!("  {}", cornerlp_lang::format_objective(&problem.objective));
            println!("  {} constraints", problem.num_constraints());
        }
        Commands::Sample => {
            print!("{}", cornerlp_lang::to_source(&Problem::sample()));
        }
    }
}

fn read_source(file: &Path) -> String {
    match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        }
    }
}

fn compile(source: &str) -> Problem {
    let program = match cornerlp_lang::Parser::parse(source) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            std::process::exit(1);
        }
    };

    match cornerlp_lang::Compiler::new().compile(&program) {
        Ok(problem) => problem,
        Err(e) => {
            eprintln!("Compile error: {}", e);
            std::process::exit(1);
        }
    }
}
