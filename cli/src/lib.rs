//! YACS shell: reads selection commands one per line and prints what changed.
//!
//! ```text
//! stdin -> parse_command() -> Session::execute() -> stdout
//!                                    |
//!                                    v
//!                     SelectionRegistry | LegacySelections
//! ```
//!
//! Each command prints its result line, then one `event ...` line for every
//! selection event it caused. Errors go to the error stream as `error: ...`
//! and do not stop the loop.

mod command;
mod session;

use std::io::{BufRead, Write};

pub use command::{Command, CommandError, parse_command};
pub use session::Session;

/// Drive `session` until `quit` or end of input.
pub fn run(
    session: &mut Session,
    input: impl BufRead,
    mut out: impl Write,
    mut err: impl Write,
) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                tracing::debug!(%line, "Rejected command: {e}");
                writeln!(err, "error: {e}")?;
                continue;
            }
        };

        match session.execute(&command) {
            Ok(lines) => {
                for output in lines {
                    writeln!(out, "{output}")?;
                }
            }
            Err(e) => {
                tracing::warn!(%line, "Command failed: {e}");
                writeln!(err, "error: {e}")?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
