use clap::Parser;
use plancal::cli::commands::Cli;
use plancal::cli::handlers;
use plancal::io::config_io::load_config;
use plancal::io::logging::{LogTarget, init_logging};
use plancal::io::paths::{LOG_FILE, config_path, resolve_data_dir};

fn main() {
    let cli = Cli::parse();
    let config = load_config(&config_path());
    let data_dir = resolve_data_dir(cli.data_dir.as_deref());

    let result = match cli.command {
        None => {
            // No subcommand → launch TUI, which owns the terminal
            init_logging(&config.log, LogTarget::File(data_dir.join(LOG_FILE)));
            plancal::tui::run(&data_dir, &config)
        }
        Some(command) => {
            init_logging(&config.log, LogTarget::Stderr);
            handlers::dispatch(command, &data_dir, cli.json)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
