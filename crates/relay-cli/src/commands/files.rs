use super::{create_agent, print_config_error};
use crate::prompts::{BEDROCK_REMEDIATION, FILES_QUERY, FILE_SYSTEM_PROMPT};
use crate::report;
use colored::Colorize;
use relay_agent::{run as invoke, InvocationRequest};
use relay_core::{provider, Config, ProcessEnv};
use relay_tools::file_tools;
use std::process::ExitCode;

/// File-operations agent on Bedrock, asked a single question.
pub async fn run(config: &Config, query: Option<&str>) -> anyhow::Result<ExitCode> {
    let provider = match provider::resolve_bedrock(&ProcessEnv) {
        Ok(p) => p,
        Err(e) => {
            print_config_error(&e, &BEDROCK_REMEDIATION);
            return Ok(ExitCode::FAILURE);
        }
    };

    let agent = create_agent(
        &provider,
        config,
        FILE_SYSTEM_PROMPT,
        file_tools(&config.tools),
        None,
    )?;

    let query = query.unwrap_or(FILES_QUERY);
    println!("{}", provider.display());
    println!("\nQuery: {}\n", query);

    match invoke(&agent, &InvocationRequest::new(query)).await {
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
