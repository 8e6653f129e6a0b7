//! sdk-layout command-line interface
//!
//! Shows where the freshly built SDK lives and which variables point tests at it

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::process;

/// Display an error with its cause chain
fn display_error(err: &anyhow::Error) {
    eprintln!("error: {err}");

    let mut source = err.source();
    while let Some(err) = source {
        eprintln!("caused by: {err}");
        source = err.source();
    }
}

#[derive(Parser)]
#[command(name = "sdk-layout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Locate the SDK build under test and its test environment", long_about = None)]
pub(crate) struct Cli {
    /// Print resolution diagnostics to stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve and print every derived path
    Show {
        #[command(flatten)]
        target: commands::Target,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the projected build-engine variables as shell assignments
    Env {
        #[command(flatten)]
        target: commands::Target,

        /// Assignment syntax to emit
        #[arg(long, value_enum, default_value_t = commands::env::ShellSyntax::Posix)]
        shell: commands::env::ShellSyntax,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    sdk_layout::init_debug(cli.debug);

    let result = match cli.command {
        Commands::Show { target, json } => commands::show::run(&target, json),
        Commands::Env { target, shell } => commands::env::run(&target, shell),
        Commands::Completion { shell } => commands::completion::run(shell),
    };

    if let Err(e) = result {
        display_error(&e);
        process::exit(1);
    }
}

mod commands;
