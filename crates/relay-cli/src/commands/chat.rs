use super::{create_agent, print_config_error};
use crate::prompts::{CHAT_PROMPT, PROVIDER_REMEDIATION};
use crate::repl::{run_loop, Terminal};
use colored::Colorize;
use relay_core::{provider, Config, ProcessEnv};
use relay_tools::assistant_tools;
use std::process::ExitCode;

pub async fn run(config: &Config, system_prompt: Option<&str>) -> anyhow::Result<ExitCode> {
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
        system_prompt.unwrap_or(CHAT_PROMPT),
        assistant_tools(&config.tools),
        None,
    )?;

    println!("{}", "relay chat".green().bold());
    println!(
        "{} via {}. Type {} to exit\n",
        provider.model(),
        provider.backend().display_name(),
        "quit".yellow()
    );

    let mut terminal = Terminal::new()?;
    let history = run_loop(
        &agent,
        &mut terminal,
        &mut std::io::stdout(),
        &format!("{} ", "You:".cyan().bold()),
    )
    .await?;

    println!("{} ({} exchanges)", "Goodbye!".green(), history.len());
    Ok(ExitCode::SUCCESS)
}
