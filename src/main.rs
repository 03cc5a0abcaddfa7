// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, build the API client, dispatch.
// - Any error is printed with a ❌ marker and the process exits with 1.

use keep_cli::api::ApiClient;
use keep_cli::args::Command;
use keep_cli::{commands, logging, ui};
use std::io::{self, Write};

fn main() {
    logging::init();

    if let Err(e) = run() {
        let _ = ui::render_error(&mut io::stderr(), &format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args[..])?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if command == Command::Help {
        ui::render_usage(&mut out)?;
        return Ok(());
    }

    // Tokens are resolved per request, not here.
    let api = ApiClient::from_env()?;
    commands::execute(&command, &api, &mut out)?;
    out.flush()?;
    Ok(())
}
