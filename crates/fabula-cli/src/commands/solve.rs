//! Solve command - lay out a scene file.

use super::{load_config, load_scene};
use crate::cli::SolveArgs;
use crate::error::Result;
use crate::output::Formatter;
use fabula_domain::SolveStatus;
use fabula_solver::Solver;

/// Solve the scene and print the layout.
///
/// Returns the solve status so the caller can pick an exit code.
pub fn execute_solve(args: SolveArgs, formatter: &Formatter) -> Result<SolveStatus> {
    let scene = load_scene(&args.scene)?;
    let config = load_config(args.config.as_deref())?;

    let solver = Solver::new(config);
    let response = solver.solve(&scene)?;

    println!("{}", formatter.format_response(&response)?);
    Ok(response.status)
}
