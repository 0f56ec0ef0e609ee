mod cli;
mod config;
mod constants;
mod models;
mod notify;
mod services;
mod sheets;
mod utils;

use chrono::Local;
use clap::{CommandFactory, Parser};
use tracing::{error, info};

use crate::cli::CliArgs;
use crate::config::Config;
use crate::constants::LOG_DIRECTIVE;
use crate::models::{Error, Query};
use crate::notify::{TelegramNotifier, deliver_run};
use crate::services::BirthdayService;
use crate::sheets::SheetClient;
use crate::utils::message_formatter::{build_message, compose_delivery_text};
use crate::utils::messages::{format_error, format_info, format_success};

#[tokio::main]
async fn main() {
    // Initialize logging
    initialize_logging();

    let args = CliArgs::parse();

    if args.check_creds {
        let config = load_config_or_exit(&args);
        if !run_credentials_check(&config).await {
            std::process::exit(1);
        }
        return;
    }

    // No query selected: show usage and exit cleanly
    let Some(query) = args.query() else {
        CliArgs::command().print_help().expect("usage text prints");
        return;
    };

    let config = load_config_or_exit(&args);

    if let Err(e) = run(&config, query, args.dry_run).await {
        error!("Run failed: {}", e);
        std::process::exit(1);
    }
}

/// Initialize the logging system
fn initialize_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(LOG_DIRECTIVE.parse().expect("valid log directive")),
        )
        .init();
}

/// Load the configuration file, exiting on failure
fn load_config_or_exit(args: &CliArgs) -> Config {
    match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    }
}

/// Execute one notification run for the selected query
async fn run(config: &Config, query: Query, dry_run: bool) -> Result<(), Error> {
    let records = SheetClient::new().fetch_records(&config.sheet_url).await?;

    // The reference date is fixed here for the whole run
    let service = BirthdayService::new(Local::now().date_naive());
    let selected = service.select(service.occurrences(records), query);

    let intro = query.intro();
    if selected.is_empty() {
        println!("{}", format_info(&format!("No matches for: {}", intro)));
        return Ok(());
    }

    let message = build_message(&selected, &config.template_plain, &config.template_present)?;

    if dry_run {
        println!("{}", intro);
        println!("{}", message);
        return Ok(());
    }

    let notifier = TelegramNotifier::new(config.bot_token.clone())?;
    let text = compose_delivery_text(&intro, &message);
    let reports = deliver_run(&notifier, &config.chat_ids, Some(&text)).await;

    let failed = reports.iter().filter(|report| !report.succeeded()).count();
    if failed > 0 {
        return Err(format!(
            "Delivery failed for {} of {} destination(s)",
            failed,
            reports.len()
        )
        .into());
    }

    info!("Delivered to {} destination(s)", reports.len());
    Ok(())
}

/// Verify connectivity to Telegram and the spreadsheet without sending anything
async fn run_credentials_check(config: &Config) -> bool {
    let mut ok = true;

    match TelegramNotifier::new(config.bot_token.clone()) {
        Ok(notifier) => match notifier.check_connectivity().await {
            Ok(username) => {
                println!(
                    "{}",
                    format_success(&format!("Telegram login ok (bot @{})", username))
                );
            }
            Err(e) => {
                println!("{}", format_error(&format!("Telegram login failed: {}", e)));
                ok = false;
            }
        },
        Err(e) => {
            println!("{}", format_error(&format!("Telegram login failed: {}", e)));
            ok = false;
        }
    }

    match SheetClient::new().check_connectivity(&config.sheet_url).await {
        Ok(count) => {
            println!(
                "{}",
                format_success(&format!("Sheet reachable ({} record(s))", count))
            );
        }
        Err(e) => {
            println!("{}", format_error(&format!("Sheet unreachable: {}", e)));
            ok = false;
        }
    }

    ok
}
