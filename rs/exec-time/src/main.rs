use chrono::Local;
use env_logger::Builder;
use log::LevelFilter;
use std::env;
use std::ffi::OsString;
use std::io::{self, Write};
use std::process;

use exec_time::error::EXIT_OK;
use exec_time::{report, run};

fn init_logger() {
    let pid = process::id();
    // Quiet by default so the child's stderr stays readable.
    Builder::new()
        .format(move |buf, record| {
            writeln!(
                buf,
                "{} {} {} {}",
                Local::now().format("%H:%M:%S%.6f"),
                pid,
                record.level(),
                record.args()
            )
        })
        .filter(None, LevelFilter::Warn)
        .parse_default_env()
        .init();
}

fn main() {
    init_logger();

    let command_and_args: Vec<OsString> = env::args_os().skip(1).collect();

    let result = run(&command_and_args).and_then(|m| report(&m, &mut io::stdout().lock()));
    let code = match result {
        Ok(()) => EXIT_OK,
        Err(e) => {
            log::debug!("exiting: {:?}", e);
            eprintln!("exec-time: {}", e);
            e.exit_code()
        }
    };
    process::exit(code);
}
