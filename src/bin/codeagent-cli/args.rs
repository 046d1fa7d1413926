use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "codeagent",
    about = "Coding assistant that can read, write, search and run things in your project"
)]
pub struct CliArgs {
    /// Model to use (defaults to the configured model, then qwen2.5:32b)
    #[arg(long, short = 'm')]
    pub model: Option<String>,
    /// Echo tool calls and include error details in replies
    #[arg(long, short = 'd')]
    pub debug: bool,
    /// Load conversation history from a JSON file
    #[arg(long)]
    pub load: Option<PathBuf>,
    /// Save conversation history to a JSON file on exit
    #[arg(long)]
    pub save: Option<PathBuf>,
    /// Run a single message and exit
    #[arg(long, short = 'c')]
    pub command: Option<String>,
    #[arg(long)]
    pub base_url: Option<String>,
    #[arg(long)]
    pub api_key: Option<String>,
    /// Config file to use instead of ~/.config/codeagent/config.toml
    #[arg(long)]
    pub config: Option<PathBuf>,
}
