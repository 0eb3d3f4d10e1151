mod fmt;
mod stdlib;

use clap::{Parser, Subcommand};
use eyre::Result;
use fmt::FmtCommand;
use stdlib::StdCommand;

/// Extension trait for exiting on library errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for gofer_codegen::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "gofer")]
#[command(version)]
#[command(about = "Format generated Go code and classify import paths")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Fmt(cmd) => cmd.run(),
            Commands::Std(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Reformat Go files with the canonical printer
    Fmt(FmtCommand),

    /// Report whether import paths belong to the standard library
    Std(StdCommand),
}
