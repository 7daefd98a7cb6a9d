use clap::Args;
use prettytable::{row, Table};
use tips_core::{
    store::LeadStore,
    types::{FilterParams, Lead, LeadId},
};

use super::utils::{print_info, CliError, CliResult};

#[derive(Args)]
pub struct LeadsArgs {
    /// Free-text search
    #[arg(long)]
    pub filter: Option<String>,

    /// Earliest discovery date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest discovery date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Source restriction
    #[arg(long)]
    pub source: Option<String>,

    #[arg(long, default_value = "1")]
    pub page: u32,

    /// List the signed-in user's flagged leads
    #[arg(long)]
    pub flagged: bool,
}

impl LeadsArgs {
    fn params(&self) -> FilterParams {
        [("filter", &self.filter), ("from", &self.from), ("to", &self.to), ("source", &self.source)]
            .into_iter()
            .filter_map(|(key, value)| value.as_ref().map(|value| (key, value.clone())))
            .collect()
    }
}

pub async fn list_leads(store: &LeadStore, args: &LeadsArgs) -> CliResult<()> {
    if args.page == 0 {
        return Err(CliError::General("pages start at 1".to_string()));
    }

    let params = args.params().without_empty_text();
    if args.page == 1 {
        store.submit(params.clone(), args.flagged).await?;
    } else {
        store.filter(&params, args.page, args.flagged).await?;
    }

    let leads = store.page(&params, args.page, args.flagged).unwrap_or_default();

    if let Some(meta) = store.page_meta(&params, args.flagged) {
        print_info(&format!(
            "Page {} of {} ({} results)",
            args.page, meta.page_count, meta.num_results
        ));
    }

    print_leads(&leads);
    Ok(())
}

pub async fn show_lead(store: &LeadStore, id: LeadId) -> CliResult<()> {
    store.load_by_id(id).await?;
    let lead = store.get(id).ok_or_else(|| CliError::General(format!("lead {id} not found")))?;
    println!("{}", serde_json::to_string_pretty(&lead)?);
    Ok(())
}

fn print_leads(leads: &[Lead]) {
    if leads.is_empty() {
        println!("No leads.");
        return;
    }

    let mut table = Table::new();
    table.add_row(row!["ID", "Name", "Topic", "Flagged"]);
    for lead in leads {
        table.add_row(row![
            lead.id,
            lead.name().unwrap_or("-"),
            lead.field("topic").and_then(|v| v.as_str()).unwrap_or("-"),
            if lead.flagged { "yes" } else { "" },
        ]);
    }
    table.printstd();
}
