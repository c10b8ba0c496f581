mod artifacts;
mod command_line;
mod deploy;
mod framework;
mod record;
mod runner;
mod utils;

use std::{io, process::ExitCode};

use clap::Parser;
use command_line::CommandLine;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cmd = CommandLine::parse();
    let mut stdout = io::stdout();
    let result = cmd.execute(&mut stdout).await;
    ExitCode::from(runner::exit_status(&result, &mut stdout))
}
