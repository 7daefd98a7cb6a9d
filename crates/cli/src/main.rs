use clap::{Parser, Subcommand};
use tips_core::{config::AppConfig, store::LeadStore, types::LeadId};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
use commands::{
    handle_alert_command, handle_config_command, handle_flag_command, list_leads, show_lead,
    utils::{print_error, CliError},
    AlertCommands, ConfigCommands, FlagCommands, LeadsArgs,
};

#[derive(Parser)]
#[command(name = "tips-cli")]
#[command(about = "Tips CLI - browse and flag leads from the Algorithm Tips database")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to $TIPS_CONFIG or config/config.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Identity token used to sign in before running the command
    #[arg(long, global = true, env = "TIPS_ID_TOKEN")]
    id_token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of leads for a filter
    Leads(LeadsArgs),

    /// Show a single lead
    Lead { id: LeadId },

    /// Flag management (requires --id-token)
    #[command(subcommand)]
    Flag(FlagCommands),

    /// Alert management (requires --id-token)
    #[command(subcommand)]
    Alerts(AlertCommands),

    /// Configuration Management
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Sets up the global tracing subscriber. `RUST_LOG` takes precedence over the configured level.
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| {
        let level = &config.logging.level;
        EnvFilter::new(format!("warn,tips_core={level},tips_cli={level}"))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        // "pretty" and any other format default to pretty logging
        let fmt_layer = tracing_subscriber::fmt::layer()
            .pretty()
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr);
        registry.with(fmt_layer).init();
    }
}

fn config_path(cli_path: Option<String>) -> String {
    cli_path
        .or_else(|| std::env::var("TIPS_CONFIG").ok())
        .unwrap_or_else(|| "config/config.toml".to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let file = config_path(cli.config);
    let config = AppConfig::from_file(&file).map_err(|e| CliError::Config(e.to_string()))?;
    init_logging(&config);

    let command = match cli.command {
        Commands::Config(config_command) => {
            handle_config_command(config_command, &config, &file)?;
            return Ok(());
        }
        command => command,
    };

    if let Err(e) = config.validate() {
        print_error(&e);
        return Err(CliError::Config(e).into());
    }

    let store = LeadStore::from_config(&config).map_err(|e| CliError::Config(e.to_string()))?;
    info!(environment = %config.environment, api = %config.api.base_url, "store initialized");

    if let Some(token) = cli.id_token.as_deref() {
        store.sign_in(token).await.map_err(CliError::from)?;
    }

    match command {
        Commands::Leads(args) => list_leads(&store, &args).await?,
        Commands::Lead { id } => show_lead(&store, id).await?,
        Commands::Flag(flag_command) => handle_flag_command(&store, flag_command).await?,
        Commands::Alerts(alert_command) => handle_alert_command(&store, alert_command).await?,
        Commands::Config(_) => {}
    }

    let stats = store.stats();
    info!(
        fetches = stats.fetches,
        lead_hits = stats.lead_hits,
        page_hits = stats.page_hits,
        "done"
    );

    Ok(())
}
