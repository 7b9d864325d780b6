use clap::Parser;

use argent_cli::cli::{Cli, Command};
use argent_cli::commands::{cmd_open, cmd_register};
use argent_storage::{Domain, RecordStore};
use argent_store_memory::MemoryStore;
use argent_store_mongo::MongoStore;

/// Connection string selecting the in-process store (nothing persisted).
const MEMORY_URL: &str = "memory:";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let url = argent_config::resolve(&argent_config::default_sources(cli.db_url))?;
    let store = open_store(&url).await?;

    match cli.command {
        Command::Register => cmd_register(store.as_ref()).await?,
        Command::Profile { username } => {
            cmd_open(store.as_ref(), Domain::Profile, &username).await?;
        }
        Command::Todo { username } => {
            cmd_open(store.as_ref(), Domain::ToDo, &username).await?;
        }
        Command::Inventory { username } => {
            cmd_open(store.as_ref(), Domain::Inventory, &username).await?;
        }
    }

    Ok(())
}

async fn open_store(url: &str) -> Result<Box<dyn RecordStore>, Box<dyn std::error::Error>> {
    if url == MEMORY_URL {
        return Ok(Box::new(MemoryStore::new()));
    }
    Ok(Box::new(MongoStore::connect(url).await?))
}
