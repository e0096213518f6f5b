//! Meditation Player CLI entry point

use std::process::ExitCode;

use clap::Parser;

use meditation_player::cli::{
    app::{config_from_args, load_merged_config, player_options, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    run_session, show_catalog,
};
use meditation_player::infrastructure::XdgConfigStore;
use meditation_player::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    if let Err(e) = logging::init() {
        presenter.warn(&e.to_string());
    }

    if let Some(Commands::Config { action }) = cli.command {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    let config = load_merged_config(config_from_args(&cli)).await;
    let options = player_options(&config, cli.dry_run);

    match cli.command {
        Some(Commands::Catalog) => show_catalog(&options).await,
        _ => run_session(options).await,
    }
}
