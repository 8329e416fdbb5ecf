use clap::Parser;

use crate::command_line::cli::{Cli, Commands};

mod command_line;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Text { input, common }) => command_line::cli::solve_text(&input, &common),
        Some(Commands::File { path, common }) => command_line::cli::solve_file(&path, &common),
        Some(Commands::Dir { path, common }) => command_line::cli::solve_dir(&path, &common),
        Some(Commands::Suite) => command_line::cli::run_suite(),
        Some(Commands::Completions { shell }) => {
            command_line::cli::print_completions(shell);
            Ok(())
        }
        None => match cli.puzzle {
            Some(path) => command_line::cli::solve_file(&path, &cli.common),
            None => Err("No puzzle given; see --help for usage.".to_owned()),
        },
    };

    if let Err(message) = result {
        eprintln!("{message}");
        std::process::exit(1);
    }
}
