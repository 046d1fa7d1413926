mod commands;
mod help;
mod interactive;
mod setup;
mod single_shot;

use std::path::Path;

use clap::Parser;
use codeagent::agent::Agent;

use crate::args::CliArgs;
use crate::config::load_config;
use crate::logging::init_logging;

pub async fn run() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let loaded = load_config(args.config.as_deref())?;
    let _logger = init_logging(&loaded.config.logging, &loaded.paths, args.debug)?;
    if !loaded.config_exists {
        log::debug!(
            "no config at {}, using defaults",
            loaded.paths.config_file.display()
        );
    }

    let mut agent = setup::build_agent(&args, &loaded.config)?;
    if let Some(path) = args.load.as_deref() {
        load_history(&mut agent, path);
    }

    println!("Code Agent started.");
    println!("Type 'help' for help, 'quit' to exit.");
    println!("{}", "-".repeat(50));

    if let Some(command) = args.command.as_deref() {
        single_shot::run(&mut agent, command).await;
    } else {
        interactive::run(&mut agent).await?;
    }

    if let Some(path) = args.save.as_deref() {
        save_history(&agent, path);
    }
    Ok(())
}

/// A missing history file is not an error; the session starts fresh.
fn load_history(agent: &mut Agent, path: &Path) {
    if !path.exists() {
        log::info!("history file {} not found, starting fresh", path.display());
        return;
    }
    match agent.load_conversation(path) {
        Ok(report) if report.issues.is_empty() => {
            println!("Loaded {} messages from {}", report.messages, path.display());
        }
        Ok(report) => {
            println!(
                "Loaded {} messages from {} ({} tool call/result mismatches, see log)",
                report.messages,
                path.display(),
                report.issues.len()
            );
        }
        Err(err) => {
            log::error!("failed to load {}: {err}", path.display());
            eprintln!("Could not load conversation from {}: {err}", path.display());
        }
    }
}

fn save_history(agent: &Agent, path: &Path) {
    match agent.save_conversation(path) {
        Ok(()) => println!("Conversation saved to {}", path.display()),
        Err(err) => {
            log::error!("failed to save {}: {err}", path.display());
            eprintln!("Could not save conversation to {}: {err}", path.display());
        }
    }
}
