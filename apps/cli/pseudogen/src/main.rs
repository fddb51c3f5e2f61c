use pseudogen::cli::Cli;
use pseudogen::driver;
use pseudogen::logger::initialize as LoggerInitialize;

use pseudogen_core::config::{ProcessEnvironment, load_dotenv};

use std::io::{stderr, stdout};
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logger FIRST
    if let Err(e) = LoggerInitialize(cli.log_level(), cli.log_file.as_deref()) {
        return ExitCode::from(driver::report(&e, &mut stderr()));
    }

    info!("pseudogen {} starting", env!("CARGO_PKG_VERSION"));

    match load_dotenv() {
        Some(path) => info!("Loaded .env from {}", path.display()),
        None => debug!("No .env file, using process environment only"),
    }

    let mut stdout = stdout().lock();
    let mut stderr = stderr();

    ExitCode::from(driver::run(&cli, &ProcessEnvironment, &mut stdout, &mut stderr).await)
}
