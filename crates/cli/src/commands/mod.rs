pub mod alerts;
pub mod config;
pub mod flags;
pub mod leads;
pub mod utils;

pub use alerts::{handle_alert_command, AlertCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use flags::{handle_flag_command, FlagCommands};
pub use leads::{list_leads, show_lead, LeadsArgs};
