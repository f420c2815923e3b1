// DIMACS Subprocess Adapter
// Writes the formula to a scratch file, runs an external engine on it and
// reads back the verdict printed on stdout

use crate::domain::{
    dimacs::{parse_solver_output, render_dimacs},
    models::{CnfFormula, Solution, SolverStatistics},
    solver_service::{Result, SolverError},
    value_objects::SolveStatus,
};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;
use tempfile::TempDir;
use tracing::{debug, warn};

/// Placeholder replaced by the path of the DIMACS input file
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// An external engine reading DIMACS and answering in SAT competition format
#[derive(Debug, Clone)]
pub struct DimacsSolver {
    name: String,
    program: String,
    executable: Option<PathBuf>,
    arguments: Vec<String>,
    verbose: bool,
}

impl DimacsSolver {
    /// `arguments` may contain [`INPUT_PLACEHOLDER`]; when none does, the
    /// input path is appended
    pub fn new(
        name: impl Into<String>,
        program: impl Into<String>,
        arguments: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            executable: None,
            arguments: arguments.into_iter().map(Into::into).collect(),
            verbose: false,
        }
    }

    pub fn with_executable(mut self, executable: Option<PathBuf>) -> Self {
        self.executable = executable;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Locate the engine: configured path first, then `PATH`
    pub fn locate(&self) -> Result<PathBuf> {
        match &self.executable {
            Some(path) if path.is_file() => Ok(path.clone()),
            Some(path) => Err(SolverError::SolverNotAvailable(format!(
                "{} executable '{}' does not exist",
                self.name,
                path.display()
            ))),
            None => which::which(&self.program).map_err(|_| {
                SolverError::SolverNotAvailable(format!(
                    "{} executable '{}' not found on PATH",
                    self.name, self.program
                ))
            }),
        }
    }

    fn command_arguments(&self, input: &Path) -> Vec<String> {
        let input = input.to_string_lossy();
        let mut args: Vec<String> = self
            .arguments
            .iter()
            .map(|arg| arg.replace(INPUT_PLACEHOLDER, &input))
            .collect();
        if !self.arguments.iter().any(|arg| arg.contains(INPUT_PLACEHOLDER)) {
            args.push(input.into_owned());
        }
        args
    }

    pub fn run(&self, formula: &CnfFormula) -> Result<Solution> {
        let executable = self.locate()?;
        let start_time = Instant::now();

        let workdir = TempDir::new()?;
        let input = workdir.path().join("formula.cnf");
        std::fs::write(&input, render_dimacs(formula))?;

        let args = self.command_arguments(&input);
        debug!(
            solver = %self.name,
            executable = %executable.display(),
            ?args,
            "running DIMACS engine"
        );

        let output = Command::new(&executable)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                SolverError::ExecutionFailed(format!("failed to execute {}: {}", self.name, e))
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if self.verbose {
            debug!(solver = %self.name, "stdout: {}", stdout);
            debug!(solver = %self.name, "stderr: {}", stderr);
        }

        let exit_code = output.status.code();
        let (status, assignment) = parse_solver_output(&stdout, exit_code, formula.num_variables);

        let mut statistics = SolverStatistics::for_formula(formula, self.name.clone());
        statistics.solve_time_ms = start_time.elapsed().as_secs_f64() * 1000.0;

        let solution = match (status, assignment) {
            (SolveStatus::Satisfiable, Some(assignment)) => {
                if !assignment.satisfies(formula) {
                    warn!(solver = %self.name, "reported model does not satisfy the formula");
                    return Err(SolverError::ExecutionFailed(format!(
                        "{} reported a model that violates the formula",
                        self.name
                    )));
                }
                Solution::satisfiable(assignment)
            }
            (SolveStatus::Satisfiable, None) => Solution::new(
                SolveStatus::Satisfiable,
                format!("{} reported SATISFIABLE without a model", self.name),
            ),
            (SolveStatus::Unsatisfiable, _) => Solution::unsatisfiable(),
            (SolveStatus::Unknown, _) if !output.status.success() => {
                return Err(SolverError::ExecutionFailed(format!(
                    "{} exited with {:?}: {}",
                    self.name,
                    exit_code,
                    stderr.trim()
                )));
            }
            (SolveStatus::Unknown, _) => {
                Solution::unknown(format!("{} could not decide the formula", self.name))
            }
        };

        Ok(solution.with_statistics(statistics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_placeholder_is_substituted() {
        let solver = DimacsSolver::new("Glucose", "glucose", ["-verb=0", "-model", "{input}"]);
        let args = solver.command_arguments(Path::new("/tmp/f.cnf"));
        assert_eq!(args, vec!["-verb=0", "-model", "/tmp/f.cnf"]);
    }

    #[test]
    fn input_is_appended_without_placeholder() {
        let solver = DimacsSolver::new("Plain", "plain", ["-q"]);
        let args = solver.command_arguments(Path::new("f.cnf"));
        assert_eq!(args, vec!["-q", "f.cnf"]);
    }

    #[test]
    fn missing_configured_executable_is_not_available() {
        let solver = DimacsSolver::new("Glucose", "glucose", Vec::<String>::new())
            .with_executable(Some(PathBuf::from("/nonexistent/glucose")));
        assert!(matches!(
            solver.locate(),
            Err(SolverError::SolverNotAvailable(_))
        ));
    }

    #[test]
    fn program_absent_from_path_is_not_available() {
        let solver = DimacsSolver::new("Ghost", "letsat-no-such-engine", Vec::<String>::new());
        let formula = CnfFormula::new().with_clause([1]);
        assert!(matches!(
            solver.run(&formula),
            Err(SolverError::SolverNotAvailable(_))
        ));
    }
}
