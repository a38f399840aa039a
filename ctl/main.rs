#![forbid(unsafe_code)]

//! `taskmanager-ctl` — local maintenance CLI for the `taskmanager` store.
//!
//! Works directly against the `SQLite` file; the server does not need to be
//! running.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use taskmanager::config::GlobalConfig;
use taskmanager::persistence::category_repo::CategoryRepo;
use taskmanager::persistence::db;
use taskmanager::persistence::task_repo::TaskRepo;
use taskmanager::Result;

#[derive(Debug, Parser)]
#[command(
    name = "taskmanager-ctl",
    about = "Local maintenance CLI for the taskmanager store",
    version,
    long_about = None
)]
struct Cli {
    /// Path to the TOML configuration file used to locate the database.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Database file path; overrides the configured one.
    #[arg(long)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the database file and tables if they do not exist.
    InitDb,

    /// List categories by name.
    Categories,

    /// List tasks by identifier.
    Tasks,
}

impl Cli {
    fn database_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.database {
            return Ok(path.clone());
        }
        let mut config = match self.config {
            Some(ref path) => GlobalConfig::load_from_path(path)?,
            None => GlobalConfig::default(),
        };
        config.apply_env_overrides()?;
        Ok(config.database_path)
    }
}

fn main() {
    let args = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(err) => {
            eprintln!("error: failed to build tokio runtime: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = runtime.block_on(run(&args)) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run(args: &Cli) -> Result<()> {
    let path = args.database_path()?;
    let pool = Arc::new(db::connect(&path).await?);

    match args.command {
        Command::InitDb => {
            println!("database ready at {}", path.display());
        }
        Command::Categories => {
            let categories = CategoryRepo::new(Arc::clone(&pool)).list_all().await?;
            if categories.is_empty() {
                println!("no categories");
            }
            for category in categories {
                println!("{:>5}  {category}", category.id);
            }
        }
        Command::Tasks => {
            let tasks = TaskRepo::new(Arc::clone(&pool)).list_all().await?;
            if tasks.is_empty() {
                println!("no tasks");
            }
            for task in tasks {
                println!("{task}  (due {})", task.due_date);
            }
        }
    }

    pool.close().await;
    Ok(())
}
