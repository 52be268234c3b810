mod config;
mod replay;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::config::ReplayConfig;
use crate::replay::{ReplayError, Script};

#[derive(Parser, Debug)]
#[command(name = "apper", about = "Headless canvas application shell tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Feed a scripted input session through the shell and print JSON lines.
    Replay {
        script: PathBuf,

        /// Pace events by their `at_ms` timestamps.
        #[arg(long, env = "APPER_REALTIME")]
        realtime: bool,

        /// Status message duration; overrides APPER_MESSAGE_SECS.
        #[arg(long)]
        message_secs: Option<u64>,

        /// Zoom amount per wheel notch; overrides APPER_ZOOM_STEP.
        #[arg(long)]
        zoom_step: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    match execute(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}

async fn execute(command: Command) -> Result<(), ReplayError> {
    match command {
        Command::Replay { script, realtime, message_secs, zoom_step } => {
            let config = ReplayConfig::from_env().with_overrides(message_secs, zoom_step, realtime);
            let script = Script::load(&script)?;
            let mut out = io::stdout().lock();
            replay::run(&script, &config, &mut out).await?;
            Ok(())
        }
    }
}
