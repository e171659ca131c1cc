//! Keepsake CLI - serve the guestbook, link directory and memory journal API

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use keepsake::config::{self, KeepsakeConfig, ServerConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// With no subcommand, keepsake serves using the top-level flags.
#[derive(Parser)]
#[command(name = "keepsake")]
#[command(version)]
#[command(about = "Guestbook, link directory and memory journal backend over SQLite")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    serve: ServeArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Path to the database file
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Directory served for non-API paths
    #[arg(short, long)]
    static_dir: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server (the default)
    Serve(ServeArgs),

    /// Write a default keepsake.toml
    Init {
        /// Where to write the config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

fn resolve_settings(args: ServeArgs) -> anyhow::Result<ServerConfig> {
    let file = config::load_config(args.config.as_deref())?;
    let mut settings = ServerConfig::from_file_config(file);
    if let Some(port) = args.port {
        settings.port = port;
    }
    if let Some(database) = args.database {
        settings.database = database;
    }
    if let Some(static_dir) = args.static_dir {
        settings.static_dir = static_dir;
    }
    Ok(settings)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        None => serve(cli.serve).await?,
        Some(Commands::Serve(args)) => serve(args).await?,

        Some(Commands::Init { config: config_path, force }) => {
            let path = config_path.unwrap_or_else(config::default_config_path);
            let defaults = ServerConfig::default();
            let file = KeepsakeConfig {
                port: Some(defaults.port),
                database: Some(defaults.database.display().to_string()),
                static_dir: Some(defaults.static_dir.display().to_string()),
            };
            config::write_config(&path, &file, force)?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let settings = resolve_settings(args)?;
    tracing::debug!("Resolved settings: {:?}", settings);

    if let Err(e) = keepsake::server::start_server(settings).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
    Ok(())
}
