use anyhow::Result;

use hotlist_pulse::cli::Command;
use hotlist_pulse::{handle_digest, handle_export, handle_ingest, handle_process, handle_serve, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Ingest => handle_ingest(),
        Command::Process => handle_process(),
        Command::Export { output_dir } => handle_export(output_dir.as_deref()),
        Command::Digest { limit, output } => handle_digest(*limit, output.as_deref()),
        Command::Serve { port } => handle_serve(*port),
    }
}
