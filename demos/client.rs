// Example client demonstrating how to use the SAT solver gRPC service
//
// Encodes a tiny scheduling puzzle: three meetings (A, B, C) and two rooms.
// Variable r(m) is true when meeting m is in room 1, false for room 2.
// - A and B overlap, so they need different rooms
// - B and C overlap, so they need different rooms
// - A must be in room 1
//
// Clauses (A=1, B=2, C=3):
//   (1 v 2) (-1 v -2)   A != B
//   (2 v 3) (-2 v -3)   B != C
//   (1)                 A in room 1

use tonic::Request;

pub mod sat_solver {
    tonic::include_proto!("sat_solver");
}

use sat_solver::{
    sat_solver_client::SatSolverClient, solve_request::Input, Clause, CnfFormula, Empty,
    SolveRequest, SolveStatus,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Connect to the gRPC server
    let mut client = SatSolverClient::connect("http://127.0.0.1:50051").await?;

    println!("=== Room Assignment Puzzle ===\n");

    let solvers = client
        .get_available_solvers(Request::new(Empty {}))
        .await?
        .into_inner()
        .solvers;
    println!("Backends:");
    for solver in &solvers {
        if solver.available {
            println!("  - {}", solver.name);
        } else {
            println!("  - {} (unavailable: {})", solver.name, solver.unavailable_reason);
        }
    }

    let clauses = [vec![1, 2], vec![-1, -2], vec![2, 3], vec![-2, -3], vec![1]]
        .into_iter()
        .map(|literals| Clause { literals })
        .collect();

    let request = SolveRequest {
        input: Some(Input::Formula(CnfFormula {
            name: "rooms".to_string(),
            num_variables: 3,
            clauses,
        })),
        // Empty selects the preferred available backend
        solver: String::new(),
        assumptions: vec![],
    };

    let response = client.solve(Request::new(request)).await?.into_inner();

    match SolveStatus::try_from(response.status) {
        Ok(SolveStatus::Satisfiable) => {
            println!("\nSatisfiable:");
            for lit in &response.model {
                let meeting = ["A", "B", "C"][(lit.unsigned_abs() - 1) as usize];
                let room = if *lit > 0 { 1 } else { 2 };
                println!("  meeting {} -> room {}", meeting, room);
            }
        }
        Ok(SolveStatus::Unsatisfiable) => println!("\nNo room assignment exists"),
        _ => println!("\nUndecided: {}", response.message),
    }

    if let Some(stats) = response.statistics {
        println!(
            "\nSolved by {} in {:.2} ms ({} variables, {} clauses)",
            stats.solver_backend, stats.solve_time_ms, stats.num_variables, stats.num_clauses
        );
    }

    Ok(())
}
