mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{init, render, validate, InitArgs, RenderArgs, ValidateArgs};
use tracing_subscriber::EnvFilter;

/// Canvas CLI - validate and publish freeform canvas pages
#[derive(Parser, Debug)]
#[command(name = "canvas")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new canvas project
    Init(InitArgs),

    /// Check canvas documents against the block schema
    Validate(ValidateArgs),

    /// Render a canvas document to HTML
    Render(RenderArgs),
}

fn main() {
    // Logs go to stderr so `render --stdout` output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Init(args) => init(args, &cwd),
                Command::Validate(args) => validate(args, &cwd),
                Command::Render(args) => render(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
