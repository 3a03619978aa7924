use super::{create_agent, print_config_error};
use crate::prompts::{PROVIDER_REMEDIATION, QUICKSTART_PROMPT, QUICKSTART_QUERY};
use crate::report;
use colored::Colorize;
use relay_agent::{run as invoke, InvocationRequest};
use relay_core::{provider, Config, ProcessEnv};
use relay_tools::quickstart_tools;
use std::process::ExitCode;

pub async fn run(config: &Config) -> anyhow::Result<ExitCode> {
    let provider = match provider::resolve(&ProcessEnv) {
        Ok(p) => p,
        Err(e) => {
            print_config_error(&e, &PROVIDER_REMEDIATION);
            return Ok(ExitCode::FAILURE);
        }
    };

    let agent = create_agent(
        &provider,
        config,
        QUICKSTART_PROMPT,
        quickstart_tools(&config.tools),
        Some(1000),
    )?;

    println!("{}", "=== relay agent ===".green().bold());
    println!("Backend: {}", provider.backend().display_name());
    println!("Model: {}", provider.model());
    println!("\nQuery: {}", QUICKSTART_QUERY);
    println!("\nResponse:");

    match invoke(&agent, &InvocationRequest::new(QUICKSTART_QUERY)).await {
        Ok(result) => {
            println!("{}", result.message);
            println!("\n{}", report::performance_report(&result));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("{} {}", "Error:".red().bold(), e);
            Ok(ExitCode::FAILURE)
        }
    }
}
