mod cli;
mod error;
mod init;
mod logging;
mod render;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use std::process;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.command.verbose());

    let result = match cli.command {
        Commands::Render {
            reports,
            database,
            output,
            name,
            config,
            archive,
            verbose,
        } => render::execute(render::RenderArgs {
            reports,
            database,
            output,
            name,
            config,
            archive,
            verbose,
        }),
        Commands::Init { config, force } => init::execute(&config, force),
    };

    if let Err(err) = result {
        eprintln!("{} {}", "Error:".bold().red(), err.user_message());
        process::exit(1);
    }
}
