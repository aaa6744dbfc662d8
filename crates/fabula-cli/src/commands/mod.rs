//! Command implementations.

mod conflicts;
mod relations;
mod solve;

pub use conflicts::execute_conflicts;
pub use relations::execute_relations;
pub use solve::execute_solve;

use crate::error::{CliError, Result};
use fabula_domain::SolveRequest;
use fabula_solver::SolverConfig;
use std::fs;

/// Read and parse a scene file.
pub(crate) fn load_scene(path: &str) -> Result<SolveRequest> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Load a solver configuration, or defaults when no path was given.
pub(crate) fn load_config(path: Option<&str>) -> Result<SolverConfig> {
    match path {
        None => Ok(SolverConfig::default()),
        Some(path) => {
            let contents = fs::read_to_string(path)?;
            SolverConfig::from_toml(&contents).map_err(CliError::InvalidInput)
        }
    }
}
