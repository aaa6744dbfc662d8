//! Fabula solver worker - stdio entry point

use fabula_solver::SolverConfig;
use fabula_worker::StdioServer;
use std::env;
use std::fs;
use tracing::Level;

fn main() {
    // Log to stderr; stdout carries the protocol.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(Level::INFO)
        .init();

    // Solver configuration from FABULA_SOLVER_CONFIG (TOML) or defaults.
    let config = match env::var("FABULA_SOLVER_CONFIG") {
        Ok(path) => match fs::read_to_string(&path).map_err(|e| e.to_string()).and_then(|c| {
            SolverConfig::from_toml(&c)
        }) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load solver config from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        Err(_) => SolverConfig::default(),
    };

    let server = StdioServer::new(config);
    if let Err(e) = server.run() {
        eprintln!("Solver worker error: {}", e);
        std::process::exit(1);
    }
}
