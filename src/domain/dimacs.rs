//! DIMACS CNF reading and writing
//!
//! - Comments start with `c`
//! - Problem line: `p cnf <num_vars> <num_clauses>`
//! - Clauses: whitespace-separated literals terminated by `0`, free to span lines
//! - Some benchmark files end with a `%` line followed by a stray `0`

use super::models::{Assignment, CnfFormula};
use super::value_objects::SolveStatus;
use std::fmt::Write;

/// Errors raised while reading DIMACS text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DimacsError {
    #[error("No problem line found")]
    MissingProblemLine,

    #[error("Invalid problem line: {0}")]
    InvalidProblemLine(String),

    #[error("Clause found before problem line at line {0}")]
    ClauseBeforeProblemLine(usize),

    #[error("Invalid literal '{token}' at line {line}")]
    InvalidLiteral { token: String, line: usize },

    #[error("Literal {literal} at line {line} exceeds declared {declared} variables")]
    VariableOutOfRange {
        literal: i32,
        line: usize,
        declared: usize,
    },

    #[error("Expected {expected} clauses but found {found}")]
    ClauseCountMismatch { expected: usize, found: usize },
}

/// Parse DIMACS CNF text into a formula
pub fn parse_dimacs(text: &str) -> Result<CnfFormula, DimacsError> {
    let mut header: Option<(usize, usize)> = None;
    let mut clauses = Vec::new();
    let mut current: Vec<i32> = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('c') {
            continue;
        }
        if trimmed.starts_with('%') {
            break;
        }

        if trimmed.starts_with('p') {
            if header.is_some() {
                return Err(DimacsError::InvalidProblemLine(format!(
                    "duplicate problem line at line {}: {}",
                    line_no, trimmed
                )));
            }
            let parts: Vec<&str> = trimmed.split_whitespace().collect();
            if parts.len() != 4 || parts[0] != "p" || parts[1] != "cnf" {
                return Err(DimacsError::InvalidProblemLine(trimmed.to_string()));
            }
            let vars = parts[2]
                .parse()
                .map_err(|_| DimacsError::InvalidProblemLine(trimmed.to_string()))?;
            let count = parts[3]
                .parse()
                .map_err(|_| DimacsError::InvalidProblemLine(trimmed.to_string()))?;
            header = Some((vars, count));
            continue;
        }

        let (declared, _) = header.ok_or(DimacsError::ClauseBeforeProblemLine(line_no))?;

        for token in trimmed.split_whitespace() {
            let literal: i32 = token.parse().map_err(|_| DimacsError::InvalidLiteral {
                token: token.to_string(),
                line: line_no,
            })?;
            if literal == 0 {
                clauses.push(std::mem::take(&mut current));
                continue;
            }
            if literal.unsigned_abs() as usize > declared {
                return Err(DimacsError::VariableOutOfRange {
                    literal,
                    line: line_no,
                    declared,
                });
            }
            current.push(literal);
        }
    }

    let (num_variables, expected) = header.ok_or(DimacsError::MissingProblemLine)?;

    if !current.is_empty() {
        clauses.push(current);
    }

    if clauses.len() != expected {
        return Err(DimacsError::ClauseCountMismatch {
            expected,
            found: clauses.len(),
        });
    }

    Ok(CnfFormula {
        name: String::new(),
        num_variables,
        clauses,
    })
}

/// Render a formula as DIMACS CNF text
pub fn render_dimacs(formula: &CnfFormula) -> String {
    let mut out = String::new();
    if !formula.name.is_empty() {
        let _ = writeln!(out, "c {}", formula.name);
    }
    let _ = writeln!(out, "p cnf {} {}", formula.num_variables, formula.num_clauses());
    for clause in &formula.clauses {
        for lit in clause {
            let _ = write!(out, "{} ", lit);
        }
        out.push_str("0\n");
    }
    out
}

/// Interpret the stdout of an engine following the SAT competition output format
///
/// `s` lines carry the verdict and `v` lines the model. When no `s` line is
/// present the exit code decides: 10 means satisfiable, 20 unsatisfiable.
/// Model literals beyond `num_variables` are ignored, and the assignment is
/// sized by the largest variable the model actually mentions.
pub fn parse_solver_output(
    stdout: &str,
    exit_code: Option<i32>,
    num_variables: usize,
) -> (SolveStatus, Option<Assignment>) {
    let mut status = None;
    let mut model = Vec::new();

    for line in stdout.lines() {
        let trimmed = line.trim();
        if let Some(verdict) = trimmed.strip_prefix("s ") {
            status = match verdict.trim() {
                "SATISFIABLE" => Some(SolveStatus::Satisfiable),
                "UNSATISFIABLE" => Some(SolveStatus::Unsatisfiable),
                _ => Some(SolveStatus::Unknown),
            };
        } else if let Some(values) = trimmed.strip_prefix('v') {
            model.extend(
                values
                    .split_whitespace()
                    .filter_map(|token| token.parse::<i32>().ok())
                    .filter(|&lit| lit != 0 && lit.unsigned_abs() as usize <= num_variables),
            );
        }
    }

    let status = status.unwrap_or(match exit_code {
        Some(10) => SolveStatus::Satisfiable,
        Some(20) => SolveStatus::Unsatisfiable,
        _ => SolveStatus::Unknown,
    });

    let assignment = (status == SolveStatus::Satisfiable && !model.is_empty()).then(|| {
        let used = model.iter().map(|lit| lit.unsigned_abs() as usize).max().unwrap_or(0);
        Assignment::from_literals(used, &model)
    });

    (status, assignment)
}
