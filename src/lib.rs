pub mod cli;
pub mod io_utils;
pub mod record;
pub mod sql;
pub mod status;
pub mod summary;
pub mod transform;

use std::{env, process::ExitCode, sync::OnceLock};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::{LevelFilter, debug};

use crate::cli::{Cli, Invocation};

/// Exit status for a malformed command line, matching clap's own usage errors.
pub const USAGE_EXIT_CODE: u8 = 2;

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("user_extract", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<ExitCode> {
    init_logging();
    let invocation = Cli::parse().into_invocation();
    debug!("Invocation: {:?}", invocation);
    match invocation {
        Invocation::Describe => {
            Cli::command()
                .print_long_help()
                .context("Printing usage")?;
            Ok(ExitCode::SUCCESS)
        }
        Invocation::Transform(args) => {
            transform::execute(&args)?;
            Ok(ExitCode::SUCCESS)
        }
        Invocation::BadArgumentCount(count) => {
            debug!("Expected 2 paths but received {count}");
            eprintln!("Bad number of arguments");
            eprintln!("{}", Cli::command().render_usage());
            Ok(ExitCode::from(USAGE_EXIT_CODE))
        }
    }
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
