mod commands;
mod config;
mod logging;
mod output;

use admin_client::DEFAULT_BASE_URL;
use admin_console::{Tab, DEFAULT_ITEMS_PER_PAGE};
use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::comments::CommentCommand;
use commands::posts::PostCommand;
use commands::tasks::TaskCommand;
use commands::users::UserCommand;
use commands::{Context, ListArgs};
use config::Settings;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the REST backend
    #[arg(short, long, env = "ADMIN_API_URL", default_value = DEFAULT_BASE_URL)]
    server: String,

    /// Where drafts, comment timestamps and the last tab are kept
    #[arg(long, env = "ADMIN_STATE_DIR")]
    state_dir: Option<PathBuf>,

    #[arg(long, env = "ADMIN_PER_PAGE", default_value_t = DEFAULT_ITEMS_PER_PAGE)]
    per_page: usize,

    /// Answer yes to every confirmation prompt
    #[arg(short, long)]
    yes: bool,

    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    Users(UserCommand),

    #[command(subcommand)]
    Posts(PostCommand),

    #[command(subcommand)]
    Comments(CommentCommand),

    #[command(subcommand)]
    Tasks(TaskCommand),

    /// Open the tab that was active last time
    Home,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let settings = Settings {
        api_url: cli.server,
        state_dir: cli.state_dir.unwrap_or_else(config::default_state_dir),
        per_page: cli.per_page.max(1),
        assume_yes: cli.yes,
    };
    tracing::debug!("Connecting to {}", settings.api_url);

    let ctx = Context::new(settings)?;

    match &cli.command {
        Commands::Users(command) => commands::users::run(&ctx, command).await,
        Commands::Posts(command) => commands::posts::run(&ctx, command).await,
        Commands::Comments(command) => commands::comments::run(&ctx, command).await,
        Commands::Tasks(command) => commands::tasks::run(&ctx, command).await,
        Commands::Home => {
            let tab = ctx.active_tab();
            println!("🏠 Last active tab: {}", tab);
            match tab {
                Tab::Users => {
                    commands::users::run(&ctx, &UserCommand::List(ListArgs::default())).await
                }
                Tab::Posts => {
                    commands::posts::run(&ctx, &PostCommand::List(ListArgs::default())).await
                }
                Tab::Tasks => {
                    let command = TaskCommand::List {
                        status: Default::default(),
                        args: ListArgs::default(),
                    };
                    commands::tasks::run(&ctx, &command).await
                }
            }
        }
    }
}
