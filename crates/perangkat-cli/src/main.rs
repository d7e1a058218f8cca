//! Perangkat CLI tool.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "perangkat")]
#[command(about = "Perangkat document generation CLI", long_about = None)]
struct Cli {
    /// API server URL
    #[arg(
        long,
        env = "PERANGKAT_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scheduler operations
    Schedule {
        #[command(subcommand)]
        command: ScheduleCommands,
    },
    /// Generation bookkeeping
    Generation {
        #[command(subcommand)]
        command: GenerationCommands,
    },
}

#[derive(Subcommand)]
enum ScheduleCommands {
    /// Trigger one scheduling pass (the cron entry point)
    Run,
}

#[derive(Subcommand)]
enum GenerationCommands {
    /// List generation rows for a master
    List {
        /// Master ID
        master_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Schedule { command } => match command {
            ScheduleCommands::Run => {
                commands::schedule::run(&cli.api_url).await?;
            }
        },
        Commands::Generation { command } => match command {
            GenerationCommands::List { master_id } => {
                commands::generation::list(&cli.api_url, &master_id).await?;
            }
        },
    }

    Ok(())
}
