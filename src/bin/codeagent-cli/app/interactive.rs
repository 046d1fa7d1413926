use std::io::{self, BufRead, Write};

use codeagent::agent::Agent;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use tokio::sync::mpsc;

use super::commands::ReplCommand;
use super::help::print_help;

pub(super) async fn run(agent: &mut Agent) -> anyhow::Result<()> {
    let mut lines = spawn_line_reader();

    loop {
        prompt()?;
        let line = tokio::select! {
            line = lines.recv() => line,
            _ = tokio::signal::ctrl_c() => {
                println!();
                log::info!("interrupted at prompt");
                break;
            }
        };
        // stdin closed
        let Some(line) = line else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match ReplCommand::parse(input) {
            Some(ReplCommand::Quit) => break,
            Some(ReplCommand::Help) => print_help(agent.registry()),
            Some(ReplCommand::Reset) => {
                agent.reset();
                println!("Conversation history reset.");
            }
            Some(ReplCommand::Clear) => clear_screen(),
            None => {
                tokio::select! {
                    reply = agent.chat(input) => println!("\nAssistant: {reply}"),
                    _ = tokio::signal::ctrl_c() => {
                        log::info!("turn interrupted");
                        println!("\nInterrupted.");
                    }
                }
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn prompt() -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "\nYou: ")?;
    stdout.flush()
}

fn clear_screen() {
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, Clear(ClearType::All), MoveTo(0, 0)) {
        log::debug!("clear screen failed: {err}");
    }
}

/// Read stdin on a plain thread; a blocking read must not hold up runtime
/// shutdown.
fn spawn_line_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(1);
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}
