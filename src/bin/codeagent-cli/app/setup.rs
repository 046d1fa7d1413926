use std::sync::Arc;
use std::time::Duration;

use codeagent::agent::Agent;
use codeagent::builder::GatewayBuilder;
use codeagent::progress::ProgressIndicator;
use codeagent::tools::{ToolContext, ToolRegistry};

use crate::args::CliArgs;
use crate::config::{AppConfig, ToolsConfig};

/// Wire the gateway, tools and progress indicator from flags over config.
pub(super) fn build_agent(args: &CliArgs, config: &AppConfig) -> anyhow::Result<Agent> {
    let gateway = gateway_builder(args, config).build()?;
    log::info!(
        "using model {} at {}",
        gateway.model(),
        gateway.base_url()
    );

    let registry = Arc::new(ToolRegistry::with_enabled(&config.tools.enabled));
    for name in &config.tools.enabled {
        if !registry.has_tool(name) {
            log::warn!("ignoring unknown tool in config: {name}");
        }
    }

    let context = tool_context(&config.tools)?;
    let progress = ProgressIndicator::new(
        config.chat.progress_label.clone(),
        Duration::from_millis(config.chat.progress_interval_ms),
    );

    let mut agent = Agent::new(Box::new(gateway), registry, context)
        .with_progress(progress)
        .with_debug(args.debug);
    if let Some(prompt) = config.chat.system_prompt.as_ref() {
        agent = agent.with_system_prompt(prompt.clone());
    }
    Ok(agent)
}

fn gateway_builder(args: &CliArgs, config: &AppConfig) -> GatewayBuilder {
    let gateway = &config.gateway;
    let mut builder = GatewayBuilder::new();
    if let Some(model) = args.model.as_ref().or(config.default_model.as_ref()) {
        builder = builder.model(model.clone());
    }
    if let Some(url) = args.base_url.as_ref().or(gateway.base_url.as_ref()) {
        builder = builder.base_url(url.clone());
    }
    if let Some(key) = args.api_key.as_ref().or(gateway.api_key.as_ref()) {
        builder = builder.api_key(key.clone());
    }
    if let Some(temperature) = gateway.temperature {
        builder = builder.temperature(temperature);
    }
    if let Some(max_tokens) = gateway.max_tokens {
        builder = builder.max_tokens(max_tokens);
    }
    if let Some(timeout) = gateway.timeout_seconds {
        builder = builder.timeout_seconds(timeout);
    }
    builder
}

fn tool_context(config: &ToolsConfig) -> anyhow::Result<ToolContext> {
    let mut context = ToolContext::new(std::env::current_dir()?)
        .with_command_timeout(Duration::from_secs(config.command_timeout_secs));
    if let Some(extensions) = config.search_extensions.as_ref() {
        context = context.with_search_extensions(extensions.clone());
    }
    Ok(context)
}
