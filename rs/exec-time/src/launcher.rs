use std::ffi::OsString;
use std::fmt;
use std::io::Write;
use std::process::{Command, ExitStatus, Stdio};

use crate::clock::{self, Timestamp};
use crate::error::{Error, Result};
use crate::signals::ForwardGuard;

/// Outcome of one timed run.
#[derive(Debug, Clone, Copy)]
pub struct Measurement {
    elapsed_ns: u64,
    status: ExitStatus,
}

impl Measurement {
    pub fn elapsed_ns(&self) -> u64 {
        self.elapsed_ns
    }

    /// The child's exit status. Informational only; it never changes the
    /// launcher's own exit code.
    pub fn status(&self) -> ExitStatus {
        self.status
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ns", self.elapsed_ns)
    }
}

/// Runs `command_and_args[0]` with the remaining elements as its arguments
/// and times it until it exits.
///
/// The child shares the launcher's stdin, stdout and stderr, environment and
/// working directory. A child that fails or is killed still yields a
/// measurement.
pub fn run(command_and_args: &[OsString]) -> Result<Measurement> {
    let (program, args) = command_and_args.split_first().ok_or(Error::Usage)?;

    if log::log_enabled!(log::Level::Debug) {
        match clock::resolution() {
            Ok(res) => log::debug!("CLOCK_MONOTONIC resolution: {}ns", res),
            Err(e) => log::debug!("CLOCK_MONOTONIC resolution unknown: {}", e),
        }
    }

    let start = Timestamp::now()?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| Error::Launch {
            program: program.clone(),
            source,
        })?;
    let pid = child.id();
    log::debug!("spawned {}: {:?} {:?}", pid, program, args);

    let signals = ForwardGuard::install(pid);
    let waited = child.wait();
    drop(signals);
    let status = waited.map_err(|source| Error::Wait { pid, source })?;

    let end = Timestamp::now()?;
    let elapsed_ns = end.elapsed_since(start)?;
    log::debug!("child {} exited with {} after {}ns", pid, status, elapsed_ns);

    Ok(Measurement { elapsed_ns, status })
}

/// Writes the single result line, `<elapsed> ns`.
pub fn report<W: Write>(measurement: &Measurement, out: &mut W) -> Result<()> {
    writeln!(out, "{}", measurement).map_err(Error::Output)?;
    out.flush().map_err(Error::Output)
}
