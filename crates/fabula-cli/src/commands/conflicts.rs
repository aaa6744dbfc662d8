//! Conflicts command - scan a scene for contradictions.

use super::{load_config, load_scene};
use crate::cli::ConflictsArgs;
use crate::error::Result;
use crate::output::Formatter;
use fabula_solver::find_all_conflicts;

/// Scan the scene and print every independent conflict.
///
/// Returns how many conflicts were found so the caller can pick an exit
/// code.
pub fn execute_conflicts(args: ConflictsArgs, formatter: &Formatter) -> Result<usize> {
    let scene = load_scene(&args.scene)?;
    let config = load_config(args.config.as_deref())?;

    let conflicts = find_all_conflicts(&scene.events, &scene.assertions, &config);

    println!("{}", formatter.format_conflicts(&conflicts)?);
    Ok(conflicts.len())
}
