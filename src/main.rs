use clap::Parser;
use taskdeck::cli::commands::Cli;
use taskdeck::cli::handlers;
use taskdeck::config;

fn main() {
    let cli = Cli::parse();

    let resolved = match config::load(cli.api_url.clone(), cli.data_dir.clone(), cli.offline) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("error: could not prepare data directory: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        // No subcommand → launch the TUI
        None => taskdeck::tui::run(&resolved),
        Some(command) => handlers::run(command, &resolved, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
