mod commands;
mod config;

use crate::commands::TaskFields;
use crate::config::Config;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use portfolio_core::{JsonFileStore, Priority, PriorityFilter, StatusFilter, TaskStore};
use std::path::PathBuf;

/// Shopping cart and task manager demos backed by a local JSON store.
#[derive(Parser, Debug)]
#[command(name = "portfolio")]
struct Cli {
    /// Store file, overriding the configured `store_path`
    #[arg(long, global = true)]
    store: Option<PathBuf>,
    /// Extra configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
enum Commands {
    /// List the items for sale
    Catalog,
    /// Manage the shopping cart
    #[command(subcommand)]
    Cart(CartCommand),
    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCommand),
}

#[derive(Debug, Clone, Subcommand)]
enum CartCommand {
    /// Add one unit of a catalog item
    Add { id: u32 },
    /// Remove an item from the cart
    Remove { id: u32 },
    /// Set an item's quantity; zero or less removes it
    Set {
        id: u32,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Show the cart and its subtotal
    Show,
    /// Confirm the order and empty the cart
    Checkout,
}

#[derive(Debug, Clone, Subcommand)]
enum TaskCommand {
    /// Create a task
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Due date as YYYY-MM-DD, defaults to today
        #[arg(long)]
        due: Option<NaiveDate>,
        /// low, medium or high
        #[arg(long)]
        priority: Option<Priority>,
    },
    /// Edit a pending task
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        due: Option<NaiveDate>,
        #[arg(long)]
        priority: Option<Priority>,
    },
    /// Flip a task between pending and completed
    Toggle { id: String },
    /// Delete a task
    Delete { id: String },
    /// List tasks, pending first, by priority then due date
    List {
        /// all, pending or completed
        #[arg(long, default_value_t = StatusFilter::All)]
        status: StatusFilter,
        /// all, low, medium or high
        #[arg(long, default_value_t = PriorityFilter::All)]
        priority: PriorityFilter,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let config = Config::load(args.config.as_deref())?;
    tracing_subscriber::fmt()
        .with_max_level(config.log_level()?)
        .with_writer(std::io::stderr)
        .init();

    let path = args.store.unwrap_or(config.store_path);
    let mut storage = JsonFileStore::open(&path)?;
    tracing::debug!(store = %storage.path().display(), "using store");

    match args.command {
        Commands::Catalog => commands::list_catalog(),
        Commands::Cart(command) => match command {
            CartCommand::Add { id } => commands::cart_add(&mut storage, id)?,
            CartCommand::Remove { id } => commands::cart_remove(&mut storage, id)?,
            CartCommand::Set { id, quantity } => commands::cart_set(&mut storage, id, quantity)?,
            CartCommand::Show => commands::cart_show(&storage),
            CartCommand::Checkout => commands::cart_checkout(&mut storage)?,
        },
        Commands::Task(command) => {
            let mut tasks = TaskStore::load(storage);
            match command {
                TaskCommand::Add {
                    title,
                    description,
                    due,
                    priority,
                } => commands::task_add(
                    &mut tasks,
                    TaskFields {
                        title: Some(title),
                        description,
                        due,
                        priority,
                    },
                )?,
                TaskCommand::Edit {
                    id,
                    title,
                    description,
                    due,
                    priority,
                } => commands::task_edit(
                    &mut tasks,
                    &id,
                    TaskFields {
                        title,
                        description,
                        due,
                        priority,
                    },
                )?,
                TaskCommand::Toggle { id } => commands::task_toggle(&mut tasks, &id),
                TaskCommand::Delete { id } => commands::task_delete(&mut tasks, &id),
                TaskCommand::List { status, priority } => {
                    commands::task_list(&tasks, status, priority)
                }
            }
        }
    }

    Ok(())
}
