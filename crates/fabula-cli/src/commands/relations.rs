//! Relations command - print the Allen vocabulary.

use crate::error::Result;
use crate::output::Formatter;

/// Print the thirteen relations with their inverses and meanings.
pub fn execute_relations(formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_relations()?);
    Ok(())
}
