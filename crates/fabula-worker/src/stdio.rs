//! Stdio transport for the solver worker
//!
//! One JSON message per line: requests on stdin, answers on stdout, logs on
//! stderr. Native hosts spawn this as a child process and get the same
//! protocol the in-process worker speaks, including the ready signal and
//! per-request ids.

use crate::error::WorkerError;
use crate::protocol::{HostMessage, WorkerMessage};
use fabula_solver::{Solver, SolverConfig};
use std::io::{BufRead, BufReader, Write};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Request id used to answer lines that could not be parsed. The host
/// starts issuing ids at 1, so this never matches an outstanding request.
const UNPARSED_REQUEST_ID: u64 = 0;

/// Line-oriented JSON server around one solver.
pub struct StdioServer {
    solver: Solver,
}

impl StdioServer {
    /// Create a server with the given solver configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self {
            solver: Solver::new(config),
        }
    }

    /// Run over stdin/stdout until stdin closes.
    pub fn run(&self) -> Result<(), WorkerError> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.serve(BufReader::new(stdin.lock()), stdout.lock())
    }

    /// Run over arbitrary line-oriented transports.
    pub fn serve<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> Result<(), WorkerError> {
        self.write_message(&mut writer, &WorkerMessage::Ready)?;
        tracing::info!("solver worker ready on stdio");

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let HostMessage::Solve { request_id, input } = match serde_json::from_str(&line) {
                Ok(message) => message,
                Err(error) => {
                    tracing::error!(%error, "failed to parse request line");
                    self.write_message(
                        &mut writer,
                        &WorkerMessage::Error {
                            request_id: UNPARSED_REQUEST_ID,
                            error_message: format!("parse error: {}", error),
                        },
                    )?;
                    continue;
                }
            };

            tracing::debug!(request_id, events = input.events.len(), "solve request");
            let answer = match catch_unwind(AssertUnwindSafe(|| self.solver.solve(&input))) {
                Ok(Ok(result)) => WorkerMessage::Result { request_id, result },
                Ok(Err(error)) => {
                    tracing::warn!(request_id, %error, "solver rejected request");
                    WorkerMessage::Error {
                        request_id,
                        error_message: error.to_string(),
                    }
                }
                Err(_) => {
                    tracing::error!(request_id, "solver panicked");
                    WorkerMessage::Error {
                        request_id,
                        error_message: "solver worker crashed".to_string(),
                    }
                }
            };
            self.write_message(&mut writer, &answer)?;
        }

        tracing::info!("solver worker stopped");
        Ok(())
    }

    fn write_message<W: Write>(
        &self,
        writer: &mut W,
        message: &WorkerMessage,
    ) -> Result<(), WorkerError> {
        let json = serde_json::to_string(message)
            .map_err(|e| WorkerError::Config(format!("failed to encode message: {}", e)))?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;
        Ok(())
    }
}
