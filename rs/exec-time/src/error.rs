use std::ffi::OsString;
use std::io;

use thiserror::Error;

/// Exit code for a successful measurement, whatever the child returned.
pub const EXIT_OK: i32 = 0;
/// Exit code when the child could not be spawned or waited on, or the
/// result could not be written.
pub const EXIT_LAUNCH: i32 = 1;
/// Exit code when no command was given.
pub const EXIT_USAGE: i32 = 2;
/// Exit code when the monotonic clock could not be read.
pub const EXIT_CLOCK: i32 = 3;

#[derive(Debug, Error)]
pub enum Error {
    #[error("usage: exec-time <command> [<arg>...]")]
    Usage,

    #[error("failed to launch {}: {source}", .program.to_string_lossy())]
    Launch {
        program: OsString,
        #[source]
        source: io::Error,
    },

    #[error("failed to wait for pid {pid}: {source}")]
    Wait {
        pid: u32,
        #[source]
        source: io::Error,
    },

    #[error("monotonic clock unavailable: {0}")]
    Clock(#[from] nix::Error),

    #[error("monotonic clock went backwards ({start}ns -> {end}ns)")]
    ClockRegressed { start: u64, end: u64 },

    #[error("failed to write measurement: {0}")]
    Output(#[source] io::Error),
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage => EXIT_USAGE,
            Error::Launch { .. } | Error::Wait { .. } | Error::Output(_) => EXIT_LAUNCH,
            Error::Clock(_) | Error::ClockRegressed { .. } => EXIT_CLOCK,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_class() {
        let launch = Error::Launch {
            program: OsString::from("nope"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(launch.exit_code(), EXIT_LAUNCH);
        assert_eq!(Error::Usage.exit_code(), EXIT_USAGE);
        assert_eq!(Error::Clock(nix::Error::EINVAL).exit_code(), EXIT_CLOCK);
        assert_eq!(
            Error::ClockRegressed { start: 2, end: 1 }.exit_code(),
            EXIT_CLOCK
        );
        assert_ne!(EXIT_OK, EXIT_LAUNCH);
    }

    #[test]
    fn launch_error_names_the_program() {
        let err = Error::Launch {
            program: OsString::from("no-such-binary"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("no-such-binary"));
    }
}
