use super::{create_agent, print_config_error, run_examples};
use crate::prompts::{AZURE_EXAMPLES, AZURE_PROMPT, AZURE_REMEDIATION, AZURE_TROUBLESHOOTING};
use crate::repl::{run_loop, Terminal};
use crate::report::rule;
use colored::Colorize;
use relay_core::{provider, Config, ProcessEnv};
use relay_tools::assistant_tools;
use std::process::ExitCode;

const PROMPT: &str = "\nEnter your own query (or 'quit' to exit): ";

pub async fn run(config: &Config) -> anyhow::Result<ExitCode> {
    println!("{}", "Azure OpenAI with relay".green().bold());
    println!("{}", rule());

    let provider = match provider::resolve_azure(&ProcessEnv) {
        Ok(p) => p,
        Err(e) => {
            print_config_error(&e, &AZURE_REMEDIATION);
            return Ok(ExitCode::FAILURE);
        }
    };

    println!("{}", provider.display());

    println!("\nCreating Azure OpenAI agent...");
    let agent = match create_agent(
        &provider,
        config,
        AZURE_PROMPT,
        assistant_tools(&config.tools),
        None,
    ) {
        Ok(agent) => agent,
        Err(e) => {
            println!("\n{} {:#}", "Error creating agent:".red().bold(), e);
            println!("\nTroubleshooting tips:");
            for tip in AZURE_TROUBLESHOOTING {
                println!("{}", tip);
            }
            return Ok(ExitCode::FAILURE);
        }
    };
    println!("Agent created successfully!");

    run_examples(&agent, &AZURE_EXAMPLES).await;

    println!("\n{}", rule());
    println!("Demonstrations complete!");

    let mut terminal = Terminal::new()?;
    run_loop(&agent, &mut terminal, &mut std::io::stdout(), PROMPT).await?;

    println!("\nThank you for using relay with Azure OpenAI!");
    Ok(ExitCode::SUCCESS)
}
