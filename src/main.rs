use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use focusbar::cli::args::{Cli, Commands};
use focusbar::cli::commands;
use focusbar::config::Paths;
use focusbar::logging::{self, LogTarget};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::resolve(cli.data_dir)?;
    let format = cli.output;
    let command = cli.command.unwrap_or(Commands::Run);

    let target = if command == Commands::Run {
        paths.ensure_dirs()?;
        LogTarget::File(paths.log_file.clone())
    } else {
        LogTarget::Stderr
    };
    logging::init(cli.verbose, &target)?;

    let output = match command {
        Commands::Run => {
            let config = commands::open_config(&paths).context("could not load session record")?;
            focusbar::tui::run(config)?;
            String::new()
        }
        Commands::Status => commands::status(&paths, format)?,
        Commands::SetLength { minutes } => commands::set_length(&paths, &minutes, format)?,
        Commands::Reset => commands::reset(&paths, format)?,
        Commands::Completions { shell } => commands::completions(shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
