use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use project_tracker::{config, db, schema, server};

#[derive(Parser)]
#[command(name = "project-tracker")]
#[command(about = "GraphQL API for clients and their projects")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Override the PORT environment variable.
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the API (default).
    Serve,
    /// Print the schema definition language and exit.
    PrintSchema,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::PrintSchema => {
            println!("{}", schema::sdl());
        }
        Command::Serve => {
            // Load configuration
            let config = config::Config::load()?.with_port_override(cli.port);
            // No port means nothing to serve on; fail before opening the store
            config.port()?;

            // A store that cannot be reached is fatal before serving
            let store = db::init(&config).await?;

            server::serve(&config, schema::build(store)).await?;
        }
    }

    Ok(())
}
