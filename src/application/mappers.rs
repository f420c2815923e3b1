// Mappers: Convert between gRPC protobuf types and domain models
// This keeps protobuf dependencies isolated from the solver layer

use crate::domain::{
    dimacs::parse_dimacs,
    models::{CnfFormula, Solution},
    solver_service::SolverError,
    value_objects::SolveStatus,
};
use crate::solver::{RegistryError, SolverHandle};
use tonic::Status;

pub mod sat_solver {
    tonic::include_proto!("sat_solver");
}

use sat_solver as proto;

/// Convert protobuf CnfFormula to domain CnfFormula
///
/// The declared variable count is raised to cover every literal.
pub fn proto_to_domain_formula(proto_formula: &proto::CnfFormula) -> CnfFormula {
    let mut formula = CnfFormula::new()
        .with_name(proto_formula.name.clone())
        .with_variables(proto_formula.num_variables as usize);
    for clause in &proto_formula.clauses {
        formula.add_clause(clause.literals.iter().copied());
    }
    formula
}

/// Extract the formula from a request, parsing DIMACS text when given
pub fn request_to_formula(
    input: Option<proto::solve_request::Input>,
) -> std::result::Result<CnfFormula, Box<Status>> {
    match input {
        Some(proto::solve_request::Input::Formula(formula)) => {
            Ok(proto_to_domain_formula(&formula))
        }
        Some(proto::solve_request::Input::Dimacs(text)) => parse_dimacs(&text).map_err(|e| {
            Box::new(Status::invalid_argument(format!("Invalid DIMACS input: {}", e)))
        }),
        None => Err(Box::new(Status::invalid_argument(
            "Either a formula or DIMACS text is required",
        ))),
    }
}

/// Convert domain Solution to protobuf SolveResponse
pub fn domain_to_proto_solution(solution: Solution) -> proto::SolveResponse {
    let status = match solution.status {
        SolveStatus::Satisfiable => proto::SolveStatus::Satisfiable as i32,
        SolveStatus::Unsatisfiable => proto::SolveStatus::Unsatisfiable as i32,
        SolveStatus::Unknown => proto::SolveStatus::Unknown as i32,
    };

    proto::SolveResponse {
        status,
        model: solution
            .assignment
            .as_ref()
            .map(|a| a.to_literals())
            .unwrap_or_default(),
        message: solution.message,
        statistics: Some(proto::SolverStatistics {
            solve_time_ms: solution.statistics.solve_time_ms,
            num_variables: solution.statistics.num_variables,
            num_clauses: solution.statistics.num_clauses,
            solver_backend: solution.statistics.solver_backend,
        }),
    }
}

/// Describe a registry entry
pub fn handle_to_proto_info(handle: &SolverHandle) -> proto::SolverInfo {
    proto::SolverInfo {
        name: handle.name().to_string(),
        available: handle.is_available(),
        supports_assumptions: handle.supports_assumptions(),
        unavailable_reason: handle.unavailable_reason().unwrap_or_default().to_string(),
    }
}

pub fn registry_error_to_status(err: RegistryError) -> Status {
    match err {
        RegistryError::NotFound(_) => Status::not_found(err.to_string()),
        RegistryError::OptionalDependencyMissing { .. }
        | RegistryError::MandatoryDependencyMissing { .. } => {
            Status::failed_precondition(err.to_string())
        }
    }
}

pub fn solver_error_to_status(err: SolverError) -> Status {
    match err {
        SolverError::InvalidFormula(_) => Status::invalid_argument(err.to_string()),
        SolverError::SolverNotAvailable(_) => Status::unavailable(err.to_string()),
        SolverError::Unsupported { .. } => Status::failed_precondition(err.to_string()),
        SolverError::ExecutionFailed(_) | SolverError::Io(_) => {
            Status::internal(format!("Solver error: {}", err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Assignment;
    use tonic::Code;

    #[test]
    fn structured_formula_is_mapped() {
        let proto_formula = proto::CnfFormula {
            name: "tiny".to_string(),
            num_variables: 1,
            clauses: vec![
                proto::Clause { literals: vec![1, -4] },
                proto::Clause { literals: vec![2] },
            ],
        };
        let formula = proto_to_domain_formula(&proto_formula);
        assert_eq!(formula.name, "tiny");
        assert_eq!(formula.num_variables, 4);
        assert_eq!(formula.clauses, vec![vec![1, -4], vec![2]]);
    }

    #[test]
    fn dimacs_input_is_parsed_and_errors_become_invalid_argument() {
        let formula = request_to_formula(Some(proto::solve_request::Input::Dimacs(
            "p cnf 2 1\n1 -2 0\n".to_string(),
        )))
        .unwrap();
        assert_eq!(formula.clauses, vec![vec![1, -2]]);

        let err = request_to_formula(Some(proto::solve_request::Input::Dimacs(
            "1 0\n".to_string(),
        )))
        .unwrap_err();
        assert_eq!(err.code(), Code::InvalidArgument);
        assert_eq!(request_to_formula(None).unwrap_err().code(), Code::InvalidArgument);
    }

    #[test]
    fn solution_model_is_flattened() {
        let solution = Solution::satisfiable(Assignment::from_literals(3, &[1, -2, 3]));
        let response = domain_to_proto_solution(solution);
        assert_eq!(response.status, proto::SolveStatus::Satisfiable as i32);
        assert_eq!(response.model, vec![1, -2, 3]);
    }

    #[test]
    fn errors_map_to_status_codes() {
        assert_eq!(
            registry_error_to_status(RegistryError::NotFound("x".into())).code(),
            Code::NotFound
        );
        assert_eq!(
            solver_error_to_status(SolverError::SolverNotAvailable("x".into())).code(),
            Code::Unavailable
        );
        assert_eq!(
            solver_error_to_status(SolverError::ExecutionFailed("x".into())).code(),
            Code::Internal
        );
    }
}
