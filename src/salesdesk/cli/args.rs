use clap::{Parser, Subcommand};
use salesdesk::pagination::PageSize;

#[derive(Parser, Debug)]
#[command(name = "salesdesk")]
#[command(about = "Manage customers, products, stores and sales on a salesdesk server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Server root, overriding the configured base-url
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Work with customer records
    #[command(alias = "c")]
    Customers {
        #[command(subcommand)]
        action: RecordAction,
    },

    /// Work with product records
    #[command(alias = "p")]
    Products {
        #[command(subcommand)]
        action: RecordAction,
    },

    /// Work with store records
    #[command(alias = "s")]
    Stores {
        #[command(subcommand)]
        action: RecordAction,
    },

    /// Work with sales
    Sales {
        #[command(subcommand)]
        action: RecordAction,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (base-url, page-size, timeout-secs)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum RecordAction {
    /// Show one page of the table, most recent first
    #[command(alias = "ls")]
    List {
        /// Page to show (1-based)
        #[arg(long)]
        page: Option<usize>,

        /// Rows per page (5 or 10)
        #[arg(long)]
        page_size: Option<PageSize>,
    },

    /// Show one record
    #[command(alias = "v")]
    Show { id: i64 },

    /// Create a record from field=value pairs
    #[command(alias = "n")]
    Create {
        /// A form field, e.g. --set name=Alice
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        fields: Vec<String>,
    },

    /// Change fields of an existing record
    #[command(alias = "e")]
    Update {
        id: i64,

        /// A form field, e.g. --set address="2 High St"
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        fields: Vec<String>,
    },

    /// Delete a record
    #[command(alias = "rm")]
    Delete { id: i64 },

    /// List the records offered when picking one for a sale
    Options,
}
