use onboard_cli::Config;
use onboard_core::default_steps;

/// Dump the step table the chat will walk, honouring the configured age rule
pub fn steps_command(config: &Config) -> anyhow::Result<()> {
    let steps = default_steps(config.minimum_age_years);
    println!("{}", serde_json::to_string_pretty(&steps)?);
    Ok(())
}
