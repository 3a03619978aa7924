pub mod azure;
pub mod chat;
pub mod files;
pub mod quickstart;
pub mod showcase;

use crate::prompts::Example;
use crate::report;
use colored::Colorize;
use relay_agent::{run, Agent, AgentConfig, InvocationRequest};
use relay_core::{Config, ConfigError, ProviderConfig};
use relay_tools::{ToolRegistry, ToolSet};
use std::sync::Arc;
use tracing::info;

/// Provider, registry and defaults from the config file, assembled into an agent.
pub fn create_agent(
    provider: &ProviderConfig,
    config: &Config,
    system_prompt: &str,
    tools: ToolSet,
    max_tokens: Option<u32>,
) -> anyhow::Result<Agent> {
    let llm = relay_llm::from_config(provider)?;
    let registry = Arc::new(ToolRegistry::register(tools)?);

    let mut agent_config = AgentConfig::from(&config.agent)
        .with_tool_timeout(std::time::Duration::from_secs(config.tools.tool_timeout_secs));
    if let Some(max) = max_tokens {
        agent_config = agent_config.with_max_tokens(max);
    }

    let agent = Agent::builder()
        .config(agent_config)
        .system_prompt(system_prompt)
        .model(provider.model())
        .llm(llm)
        .tool_registry(registry)
        .build()?;

    info!(
        backend = provider.backend().as_str(),
        model = provider.model(),
        tools = ?agent.tool_names(),
        "Agent created"
    );
    Ok(agent)
}

pub fn print_config_error(err: &ConfigError, remediation: &[&str]) {
    println!("{} {}", "Error:".red().bold(), err);
    println!("\nPlease set the following environment variables:");
    for line in remediation {
        println!("{}", line);
    }
}

/// Runs each example in turn. A failed example is reported and the next
/// one still runs. Returns how many succeeded.
pub async fn run_examples(agent: &Agent, examples: &[Example]) -> usize {
    let mut succeeded = 0;
    for example in examples {
        println!("{}", report::example_header(example.name, example.query));

        match run(agent, &InvocationRequest::new(example.query)).await {
            Ok(result) => {
                println!("{}", "Response:".magenta().bold());
                println!("{}", result.message);
                println!("\n{}", report::metrics_summary(&result));
                succeeded += 1;
            }
            Err(e) => println!("\n{} {}", "Error:".red().bold(), e),
        }
    }
    succeeded
}
