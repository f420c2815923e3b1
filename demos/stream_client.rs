// Example: pigeonhole formula sent through gRPC streaming
//
// PHP(n+1, n): n+1 pigeons, n holes, every pigeon in some hole and no two
// pigeons sharing one. Always unsatisfiable and hard for resolution, which
// makes it a convenient stress test. Clauses are generated and sent one at a
// time instead of materializing the whole formula on the client.

use futures::stream;
use tonic::Request;

pub mod sat_solver {
    tonic::include_proto!("sat_solver");
}

use sat_solver::{
    formula_chunk::Chunk, sat_solver_client::SatSolverClient, Clause, FormulaChunk,
    FormulaMetadata, SolveStatus,
};

const HOLES: i32 = 6;
const PIGEONS: i32 = HOLES + 1;

fn var(pigeon: i32, hole: i32) -> i32 {
    pigeon * HOLES + hole + 1
}

fn pigeonhole_clauses() -> Vec<Vec<i32>> {
    let mut clauses = Vec::new();
    for p in 0..PIGEONS {
        clauses.push((0..HOLES).map(|h| var(p, h)).collect());
    }
    for h in 0..HOLES {
        for p in 0..PIGEONS {
            for q in (p + 1)..PIGEONS {
                clauses.push(vec![-var(p, h), -var(q, h)]);
            }
        }
    }
    clauses
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut client = SatSolverClient::connect("http://127.0.0.1:50051").await?;

    let solver = std::env::args().nth(1).unwrap_or_default();
    let clauses = pigeonhole_clauses();

    println!("=== Pigeonhole ({} pigeons, {} holes) ===", PIGEONS, HOLES);
    println!("  {} variables, {} clauses", PIGEONS * HOLES, clauses.len());

    let mut chunks = vec![FormulaChunk {
        chunk: Some(Chunk::Metadata(FormulaMetadata {
            name: format!("php-{}-{}", PIGEONS, HOLES),
            num_variables: (PIGEONS * HOLES) as u32,
            solver,
        })),
    }];
    chunks.extend(clauses.into_iter().map(|literals| FormulaChunk {
        chunk: Some(Chunk::Clause(Clause { literals })),
    }));

    let response = client
        .solve_stream(Request::new(stream::iter(chunks)))
        .await?
        .into_inner();

    let verdict = match SolveStatus::try_from(response.status) {
        Ok(SolveStatus::Unsatisfiable) => "UNSATISFIABLE (as expected)",
        Ok(SolveStatus::Satisfiable) => "SATISFIABLE (engine bug?)",
        _ => "UNKNOWN",
    };
    println!("\nResult: {}", verdict);
    if let Some(stats) = response.statistics {
        println!("Backend: {} ({:.2} ms)", stats.solver_backend, stats.solve_time_ms);
    }

    Ok(())
}
