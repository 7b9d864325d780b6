use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "argent")]
#[command(about = "Argent per-user records terminal")]
pub struct Cli {
    /// Document store connection string. When omitted, resolved from
    /// $ARGENT_DB_URL, then ~/.argent/db_url, then ./mongodb.txt.
    /// Use 'memory:' for an in-process store (nothing is persisted).
    #[arg(long)]
    pub db_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Pick a username and create your profile
    Register,
    /// Open a user's profile
    Profile {
        /// Username the profile belongs to
        username: String,
    },
    /// Open a user's to do list
    Todo {
        /// Username the list belongs to
        username: String,
    },
    /// Open a user's inventory
    Inventory {
        /// Username the inventory belongs to
        username: String,
    },
}
