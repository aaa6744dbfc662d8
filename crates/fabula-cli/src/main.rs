//! Fabula CLI - lay out qualitative chronologies from the command line.

use clap::Parser;
use fabula_cli::{commands, Cli, Command, Formatter, OutputFormat};
use fabula_domain::SolveStatus;

fn main() {
    let cli = Cli::parse();

    let format = cli.format.map(Into::into).unwrap_or(OutputFormat::Table);
    let formatter = Formatter::new(format, !cli.no_color);

    match run(cli.command, &formatter) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("{}", formatter.error(&e.to_string()));
            std::process::exit(1);
        }
    }
}

fn run(command: Command, formatter: &Formatter) -> fabula_cli::Result<i32> {
    match command {
        Command::Solve(args) => {
            let status = commands::execute_solve(args, formatter)?;
            Ok(match status {
                SolveStatus::Satisfiable | SolveStatus::Relaxed => 0,
                SolveStatus::Unsatisfiable => 1,
            })
        }
        Command::Conflicts(args) => {
            let found = commands::execute_conflicts(args, formatter)?;
            Ok(if found == 0 { 0 } else { 1 })
        }
        Command::Relations => {
            commands::execute_relations(formatter)?;
            Ok(0)
        }
    }
}
