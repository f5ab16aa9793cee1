use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use shiori_application::AppContext;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "shiori")]
#[command(about = "Shiori - a read-it-later bookmarking client", long_about = None)]
struct Cli {
    /// Backend base URL, overriding the configured one
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the access token
    Login {
        /// Username (prompted when omitted)
        username: Option<String>,
    },
    /// Create a new account
    Register {
        /// Username (prompted when omitted)
        username: Option<String>,
    },
    /// Log out by clearing the stored token
    Logout,
    /// Show the current login state
    Status,
    /// List saved articles
    List,
    /// Save a new article
    Add {
        url: String,
        title: String,
        /// Optional memo
        #[arg(long, default_value = "")]
        memo: String,
        /// Existing tag id to attach (repeatable)
        #[arg(long = "tag")]
        tags: Vec<i64>,
        /// Tag to create and attach inline (repeatable)
        #[arg(long = "new-tag")]
        new_tags: Vec<String>,
    },
    /// Toggle the read/unread flag of an article
    Toggle { id: i64 },
    /// Delete an article
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Tag operations
    Tag {
        #[command(subcommand)]
        action: TagAction,
    },
    /// Open the interactive article view
    Shell,
}

#[derive(Subcommand)]
enum TagAction {
    /// List all tags
    List,
    /// Create a new tag
    New { name: String },
}

async fn run(cli: Cli) -> Result<()> {
    let context = AppContext::build(cli.base_url).await?;
    tracing::debug!(base_url = %context.config.base_url, "Client configured");

    match cli.command {
        Commands::Login { username } => commands::auth::login(&context, username).await?,
        Commands::Register { username } => commands::auth::register(&context, username).await?,
        Commands::Logout => commands::auth::logout(&context).await?,
        Commands::Status => commands::auth::status(&context),
        Commands::List => commands::articles::list(&context).await?,
        Commands::Add {
            url,
            title,
            memo,
            tags,
            new_tags,
        } => commands::articles::add(&context, url, title, memo, tags, new_tags).await?,
        Commands::Toggle { id } => commands::articles::toggle(&context, id).await?,
        Commands::Delete { id, yes } => commands::articles::delete(&context, id, yes).await?,
        Commands::Tag { action } => match action {
            TagAction::List => commands::articles::tag_list(&context).await?,
            TagAction::New { name } => commands::articles::tag_new(&context, name).await?,
        },
        Commands::Shell => commands::shell::run(&context).await?,
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}
