use clap::Subcommand;
use prettytable::{row, Table};
use tips_core::{store::LeadStore, types::AlertId};

use super::utils::{print_success, CliResult};

#[derive(Subcommand)]
pub enum AlertCommands {
    /// List saved alerts
    List,

    /// Delete an alert
    Remove { id: AlertId },
}

pub async fn handle_alert_command(store: &LeadStore, command: AlertCommands) -> CliResult<()> {
    match command {
        AlertCommands::List => {
            store.list_alerts().await?;
            print_alerts(store);
        }
        AlertCommands::Remove { id } => {
            store.remove_alert(id).await?;
            print_success(&format!("Alert {id} removed"));
        }
    }
    Ok(())
}

fn print_alerts(store: &LeadStore) {
    let alerts = store.alerts();
    if alerts.is_empty() {
        println!("No alerts.");
        return;
    }

    let mut table = Table::new();
    table.add_row(row!["ID", "Recipient", "Frequency", "Filter", "Confirmed"]);
    for alert in alerts {
        table.add_row(row![
            alert.id,
            alert.spec.recipient,
            alert.spec.frequency,
            alert.spec.filter,
            match alert.confirmed {
                Some(true) => "yes",
                Some(false) => "pending",
                None => "-",
            },
        ]);
    }
    table.printstd();
}
