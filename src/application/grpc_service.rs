use std::sync::Arc;
use tonic::{Request, Response, Status};
use tracing::info;

use super::mappers::{self, sat_solver};
use crate::domain::{
    models::CnfFormula,
    solver_service::{formula_errors, validate_assumptions},
};
use crate::solver::SolverRegistry;

/// gRPC service implementation
pub struct GrpcSatSolverService {
    registry: Arc<SolverRegistry>,
}

impl GrpcSatSolverService {
    pub fn new(registry: Arc<SolverRegistry>) -> Self {
        Self { registry }
    }

    async fn solve_formula(
        &self,
        formula: CnfFormula,
        solver_name: &str,
        assumptions: Vec<i32>,
    ) -> Result<Response<sat_solver::SolveResponse>, Status> {
        let handle = self
            .registry
            .resolve(solver_name)
            .map_err(mappers::registry_error_to_status)?
            .clone();

        info!(
            formula = %formula.name,
            solver = %handle.name(),
            variables = formula.num_variables,
            clauses = formula.num_clauses(),
            "solving formula"
        );

        // Engines block on subprocesses or native code
        let solution = tokio::task::spawn_blocking(move || {
            handle.solve_with_assumptions(&formula, &assumptions)
        })
        .await
        .map_err(|e| Status::internal(format!("Solver task failed: {}", e)))?
        .map_err(mappers::solver_error_to_status)?;

        info!(status = %solution.status, "solve finished");

        Ok(Response::new(mappers::domain_to_proto_solution(solution)))
    }
}

#[tonic::async_trait]
impl sat_solver::sat_solver_server::SatSolver for GrpcSatSolverService {
    async fn solve(
        &self,
        request: Request<sat_solver::SolveRequest>,
    ) -> Result<Response<sat_solver::SolveResponse>, Status> {
        let request = request.into_inner();

        // Convert protobuf to domain model
        let formula = mappers::request_to_formula(request.input).map_err(|e| *e)?;

        self.solve_formula(formula, &request.solver, request.assumptions)
            .await
    }

    async fn solve_stream(
        &self,
        request: Request<tonic::Streaming<sat_solver::FormulaChunk>>,
    ) -> Result<Response<sat_solver::SolveResponse>, Status> {
        let mut stream = request.into_inner();

        let mut formula = CnfFormula::new();
        let mut solver_name = String::new();
        let mut assumptions = Vec::new();

        // Collect all chunks
        while let Some(chunk) = stream.message().await? {
            match chunk.chunk {
                Some(sat_solver::formula_chunk::Chunk::Metadata(m)) => {
                    formula.name = m.name;
                    formula.num_variables = formula.num_variables.max(m.num_variables as usize);
                    solver_name = m.solver;
                }
                Some(sat_solver::formula_chunk::Chunk::Clause(c)) => {
                    formula.add_clause(c.literals);
                }
                Some(sat_solver::formula_chunk::Chunk::Assumptions(a)) => {
                    assumptions.extend(a.literals);
                }
                None => {}
            }
        }

        self.solve_formula(formula, &solver_name, assumptions).await
    }

    async fn get_available_solvers(
        &self,
        _request: Request<sat_solver::Empty>,
    ) -> Result<Response<sat_solver::AvailableSolvers>, Status> {
        let solvers = self
            .registry
            .entries()
            .iter()
            .map(mappers::handle_to_proto_info)
            .collect();

        Ok(Response::new(sat_solver::AvailableSolvers { solvers }))
    }

    async fn validate_formula(
        &self,
        request: Request<sat_solver::SolveRequest>,
    ) -> Result<Response<sat_solver::ValidationResult>, Status> {
        let request = request.into_inner();

        let formula = match mappers::request_to_formula(request.input) {
            Ok(formula) => formula,
            Err(status) => {
                return Ok(Response::new(sat_solver::ValidationResult {
                    is_valid: false,
                    errors: vec![status.message().to_string()],
                    ..Default::default()
                }))
            }
        };

        let mut errors = formula_errors(&formula);
        let mut warnings = Vec::new();

        if let Err(e) = validate_assumptions(&request.assumptions) {
            errors.push(e.to_string());
        }

        match self.registry.resolve(&request.solver) {
            Ok(handle) => {
                if !request.assumptions.is_empty() && !handle.supports_assumptions() {
                    errors.push(format!("{} does not support assumptions", handle.name()));
                }
            }
            Err(e) => errors.push(e.to_string()),
        }

        if formula.is_empty() {
            warnings.push("Formula has no clauses (trivially satisfiable)".to_string());
        }
        if formula.clauses.iter().any(|c| c.is_empty()) {
            warnings.push("Formula contains an empty clause (trivially unsatisfiable)".to_string());
        }

        Ok(Response::new(sat_solver::ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            num_variables: u32::try_from(formula.num_variables).unwrap_or(u32::MAX),
            num_clauses: u32::try_from(formula.num_clauses()).unwrap_or(u32::MAX),
        }))
    }
}
