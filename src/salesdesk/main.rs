use clap::Parser;
use directories::ProjectDirs;
use salesdesk::api::{rejection_messages, CmdResult, ConfigAction, DeskApi, ListRequest};
use salesdesk::config::DeskConfig;
use salesdesk::error::{DeskError, Result};
use salesdesk::model::EntityKind;
use salesdesk::remote::http::HttpRemote;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::args::{Cli, Commands, RecordAction};
use cli::print::{
    print_config, print_messages, print_options, print_record, print_rejections, print_table,
};

const LOG_ENV: &str = "SALESDESK_LOG";
const HOME_ENV: &str = "SALESDESK_HOME";

fn main() {
    if let Err(e) = run() {
        let rejections = rejection_messages(&e);
        if rejections.is_empty() {
            eprintln!("Error: {}", e);
        } else {
            eprintln!("Error: form has {} invalid field(s)", rejections.len());
            print_rejections(&rejections);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_dir = config_dir()?;
    match cli.command {
        Commands::Config { key, value } => handle_config(config_dir, key, value),
        Commands::Customers { action } => {
            handle_record(config_dir, cli.base_url, EntityKind::Customers, action)
        }
        Commands::Products { action } => {
            handle_record(config_dir, cli.base_url, EntityKind::Products, action)
        }
        Commands::Stores { action } => {
            handle_record(config_dir, cli.base_url, EntityKind::Stores, action)
        }
        Commands::Sales { action } => {
            handle_record(config_dir, cli.base_url, EntityKind::Sales, action)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn config_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "salesdesk", "salesdesk")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| DeskError::Config("Could not determine config dir".into()))
}

fn init_api(config_dir: PathBuf, base_url: Option<String>) -> Result<DeskApi<HttpRemote>> {
    let mut config = DeskConfig::load(&config_dir)?;
    if let Some(url) = base_url {
        config.set_base_url(&url)?;
    }
    tracing::debug!(base_url = %config.base_url, page_size = config.page_size, "loaded config");

    let remote = HttpRemote::new(&config.base_url, config.timeout())?;
    Ok(DeskApi::new(remote, config_dir, config.page_size()))
}

fn handle_record(
    config_dir: PathBuf,
    base_url: Option<String>,
    kind: EntityKind,
    action: RecordAction,
) -> Result<()> {
    let mut api = init_api(config_dir, base_url)?;

    let result = match action {
        RecordAction::List { page, page_size } => {
            api.list_records(kind, ListRequest { page, page_size })?
        }
        RecordAction::Show { id } => api.show_record(kind, id)?,
        RecordAction::Create { fields } => api.create_record(kind, &fields)?,
        RecordAction::Update { id, fields } => api.update_record(kind, id, &fields)?,
        RecordAction::Delete { id } => api.delete_record(kind, id)?,
        RecordAction::Options => api.options(kind)?,
    };

    print_result(&result);
    Ok(())
}

fn handle_config(config_dir: PathBuf, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    // Config never talks to the server, so it skips building a remote.
    let result = salesdesk::commands::config::run(&config_dir, action)?;
    print_result(&result);
    Ok(())
}

fn print_result(result: &CmdResult) {
    if let Some(record) = &result.record {
        print_record(record);
    }
    if let Some(table) = &result.table {
        if result.record.is_some() {
            println!();
        }
        print_table(table);
    }
    print_options(&result.options);
    if let Some(entries) = &result.config {
        print_config(entries);
    }
    print_messages(&result.messages);
}
