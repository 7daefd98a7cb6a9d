use clap::Subcommand;
use tips_core::{store::LeadStore, types::LeadId};

use super::utils::{print_success, CliResult};

#[derive(Subcommand)]
pub enum FlagCommands {
    /// Flag a lead
    Set { id: LeadId },

    /// Remove the flag from a lead
    Clear { id: LeadId },

    /// Re-read flags for the given leads
    Refresh {
        /// Leads to load before refreshing
        #[arg(required = true)]
        ids: Vec<LeadId>,
    },
}

pub async fn handle_flag_command(store: &LeadStore, command: FlagCommands) -> CliResult<()> {
    match command {
        FlagCommands::Set { id } => {
            store.update_flag(id, true).await?;
            print_success(&format!("Lead {id} flagged"));
        }
        FlagCommands::Clear { id } => {
            store.update_flag(id, false).await?;
            print_success(&format!("Lead {id} unflagged"));
        }
        FlagCommands::Refresh { ids } => {
            for id in &ids {
                store.load_by_id(*id).await?;
            }
            store.refresh_all_flags().await?;
            for id in ids {
                let flagged = store.get(id).is_some_and(|lead| lead.flagged);
                println!("{id}\t{}", if flagged { "flagged" } else { "-" });
            }
        }
    }
    Ok(())
}
