#[path = "codeagent-cli/app/mod.rs"]
mod app;
#[path = "codeagent-cli/args.rs"]
mod args;
#[path = "codeagent-cli/config/mod.rs"]
mod config;
#[path = "codeagent-cli/logging.rs"]
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}
