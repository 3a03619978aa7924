use super::{create_agent, print_config_error, run_examples};
use crate::prompts::{PROVIDER_REMEDIATION, SHOWCASE_EXAMPLES, SHOWCASE_PROMPT};
use crate::report::rule;
use colored::Colorize;
use relay_core::{provider, Backend, Config, ProcessEnv};
use relay_tools::demo_tools;
use std::process::ExitCode;

pub async fn run(config: &Config) -> anyhow::Result<ExitCode> {
    let provider = match provider::resolve(&ProcessEnv) {
        Ok(p) => p,
        Err(e) => {
            print_config_error(&e, &PROVIDER_REMEDIATION);
            return Ok(ExitCode::FAILURE);
        }
    };

    println!("{}", "relay Agent Examples".green().bold());
    println!("{}", rule());
    match provider.backend() {
        Backend::AzureOpenAi => println!("Using Azure OpenAI configuration"),
        _ => println!("Using standard OpenAI configuration"),
    }

    let agent = create_agent(&provider, config, SHOWCASE_PROMPT, demo_tools(&config.tools), None)?;

    let succeeded = run_examples(&agent, &SHOWCASE_EXAMPLES).await;

    println!("\n{}", rule());
    if succeeded == SHOWCASE_EXAMPLES.len() {
        println!("All examples completed successfully!");
    } else {
        println!(
            "{} of {} examples completed successfully.",
            succeeded,
            SHOWCASE_EXAMPLES.len()
        );
    }
    Ok(ExitCode::SUCCESS)
}
