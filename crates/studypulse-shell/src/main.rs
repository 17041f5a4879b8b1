use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use studypulse_application::App;
use studypulse_core::KeyValueStore;
use studypulse_core::config::ClientConfig;
use studypulse_infrastructure::paths::StudyPulsePaths;
use studypulse_infrastructure::{ConfigService, FileKeyValueStore, MemoryKeyValueStore};
use studypulse_interaction::HttpTransport;

mod cli;
mod command;
mod display;
mod helper;
mod logging;

use cli::Cli;
use logging::LogSink;
use command::{Command, HELP};
use helper::ShellHelper;

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ConfigService::load_from(path, |name| std::env::var(name).ok()),
        None => ConfigService::load(),
    }
    .context("Failed to load configuration")?;

    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.trim_end_matches('/').to_string();
    }
    if let Some(dir) = &cli.storage_dir {
        config.storage.dir = Some(dir.clone());
    }
    Ok(config)
}

fn open_store(cli: &Cli, config: &ClientConfig) -> Result<Arc<dyn KeyValueStore>> {
    if cli.ephemeral {
        return Ok(Arc::new(MemoryKeyValueStore::new()));
    }
    let path = StudyPulsePaths::storage_file(config.storage.dir.as_ref())?;
    tracing::info!("[Shell] Using storage at {:?}", path);
    Ok(Arc::new(FileKeyValueStore::new(path)))
}

fn log_sink(cli: &Cli) -> Result<LogSink> {
    if cli.ephemeral {
        return Ok(LogSink::Stderr);
    }
    Ok(LogSink::File(StudyPulsePaths::logs_dir()?))
}

/// Runs one command. Returns false when the shell should exit.
async fn dispatch(app: &App, command: Command) -> bool {
    match command {
        Command::Login { username, password } => {
            let _ = app.login(&username, &password).await;
        }
        Command::Register(form) => {
            let _ = app.register(&form).await;
        }
        Command::Logout => app.logout(),
        Command::Menu(page) => app.select_menu(&page).await,
        Command::Go(page) => app.navigate(&page).await,
        Command::Accept(id) => {
            let _ = app.accept_friend_request(&id).await;
        }
        Command::Profile(edit) => {
            let _ = app.update_profile(edit).await;
        }
        Command::Lang(code) => {
            app.set_language(&code);
        }
        Command::Notes => {
            display::print_notifications(&app.notifications().visible());
            return true;
        }
        Command::Show => {}
        Command::Help => {
            println!("{}", HELP.bright_black());
            return true;
        }
        Command::Quit => return false,
    }

    display::print_notifications(&app.notifications().take_undelivered());
    display::print_state(&app.state());
    true
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let _log_guard = logging::init(&config.log_level, &log_sink(&cli)?)?;
    tracing::info!("[Shell] Starting with API {}", config.api.base_url);

    let store = open_store(&cli, &config)?;
    let transport = Arc::new(HttpTransport::new(
        config.api.base_url.clone(),
        config.api.timeout(),
    ));
    let app = App::new(&config, store, transport)?;

    app.initialize().await;
    display::print_notifications(&app.notifications().take_undelivered());
    display::print_state(&app.state());
    println!("{}", "Type 'help' for commands, 'quit' to exit.".bright_black());
    println!();

    let mut rl: Editor<ShellHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(ShellHelper::new()));

    loop {
        match rl.readline("studypulse> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match Command::parse(trimmed) {
                    Ok(command) => {
                        if !dispatch(&app, command).await {
                            println!("{}", "Goodbye!".bright_green());
                            break;
                        }
                    }
                    Err(e) => println!("{}", e.to_string().yellow()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(err) => {
                tracing::error!("[Shell] Readline failed: {}", err);
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ephemeral_run_logs_to_stderr() {
        let cli = Cli::parse_from(["studypulse", "--ephemeral"]);
        assert_eq!(log_sink(&cli).unwrap(), LogSink::Stderr);
    }
}
