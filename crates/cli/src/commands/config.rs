use clap::Subcommand;
use std::path::Path;
use tips_core::config::AppConfig;

use super::utils::{print_error, print_info, print_success, CliError, CliResult};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Validate the configuration
    Validate,

    /// Show the effective configuration (defaults, file and environment merged)
    Show {
        /// Print as TOML instead of a summary
        #[arg(long)]
        raw: bool,
    },
}

pub fn handle_config_command(
    command: ConfigCommands,
    config: &AppConfig,
    file: &str,
) -> CliResult<()> {
    match command {
        ConfigCommands::Validate => validate_config(config, file),
        ConfigCommands::Show { raw } => show_config(config, file, raw),
    }
}

fn validate_config(config: &AppConfig, file: &str) -> CliResult<()> {
    if !Path::new(file).exists() {
        print_info(&format!("No configuration file at {file}, checking defaults"));
    }

    print_info("Validating configuration...");
    if let Err(e) = config.validate() {
        print_error(&e);
        return Err(CliError::Config(e));
    }

    print_success("Configuration is valid!");
    println!("Configuration Summary:");
    println!("  Environment: {}", config.environment);
    println!("  API: {}", config.api.base_url);
    println!("  Logging: {} ({})", config.logging.level, config.logging.format);

    Ok(())
}

fn show_config(config: &AppConfig, file: &str, raw: bool) -> CliResult<()> {
    if raw {
        let rendered =
            toml::to_string_pretty(config).map_err(|e| CliError::General(e.to_string()))?;
        println!("{rendered}");
        return Ok(());
    }

    println!("Configuration from {file}:");
    println!("  Environment: {}", config.environment);

    println!("\n[API]");
    println!("  Base URL: {}", config.api.base_url);
    println!("  Request Timeout: {}s", config.api.request_timeout_seconds);
    println!("  Connect Timeout: {}s", config.api.connect_timeout_seconds);
    println!("  Concurrent Limit: {}", config.api.concurrent_limit);
    println!("  Permit Timeout: {}ms", config.api.permit_timeout_ms);
    if let Some(user_agent) = &config.api.user_agent {
        println!("  User Agent: {user_agent}");
    }

    println!("\n[Logging]");
    println!("  Level: {}", config.logging.level);
    println!("  Format: {}", config.logging.format);

    Ok(())
}
