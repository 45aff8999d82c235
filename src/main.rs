mod cmd;
mod data;
mod editor;
mod grid;
mod ui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "calterm", about = "terminal calendar")]
struct Cli {
    /// Path to the data directory containing config and event files (default: ./config)
    #[arg(long, default_value = "./config")]
    data_dir: PathBuf,

    /// View to open in: month, week or day (overrides config.yaml)
    #[arg(long)]
    view: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory with default config and an empty events file
    Init,
    /// Print all stored events sorted by date
    Events,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Resolve data_dir to an absolute path so file I/O works regardless of
    // future directory changes within the process.
    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };
    data::persistence::set_data_dir(data_dir);

    match cli.command {
        None => cmd::root::run(cli.view.as_deref()),
        Some(Commands::Init) => cmd::init::run(),
        Some(Commands::Events) => cmd::events::run(),
    }
}
