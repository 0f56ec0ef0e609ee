use std::path::PathBuf;

use clap::Parser;

use crate::models::Query;

/// Birthday reminder bot.
///
/// Reads birthdays from a shared spreadsheet and announces the ones
/// matching the selected window, either to the console or to the
/// configured Telegram chats.
#[derive(Parser, Debug)]
#[command(name = "bdaybot", about = "Announces upcoming birthdays from a spreadsheet")]
pub struct CliArgs {
    /// List who has a birthday today
    #[arg(long, group = "query")]
    pub today: bool,

    /// List birthdays in the next <WEEKS> weeks
    #[arg(long, value_name = "WEEKS", group = "query")]
    pub weeks: Option<u32>,

    /// List birthdays with present ideas in the next <WEEKS> weeks
    #[arg(long, value_name = "WEEKS", group = "query")]
    pub presents: Option<u32>,

    /// List birthdays in the month this is run
    #[arg(long, group = "query")]
    pub month: bool,

    /// Print the message to the console instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Verify connectivity to Telegram and the sheet without sending anything
    #[arg(long)]
    pub check_creds: bool,

    /// Path to the config file (default: ~/.bdaybot_config)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// The query selected by the flags, if any
    pub fn query(&self) -> Option<Query> {
        if self.today {
            Some(Query::Today)
        } else if let Some(weeks) = self.weeks {
            Some(Query::NextWeeks(weeks))
        } else if let Some(weeks) = self.presents {
            Some(Query::NextWeeksWithPresent(weeks))
        } else if self.month {
            Some(Query::ThisMonth)
        } else {
            None
        }
    }
}
