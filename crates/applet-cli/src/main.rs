mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{activity::ActivitySubcommand, applet::AppletSubcommand, service::ServiceSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "applets",
    about = "Applet catalog and deterministic activity feed",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .applets/ or .git/)
    #[arg(long, global = true, env = "APPLETS_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default config and seeded catalog into .applets/
    Init,

    /// Inspect services
    Service {
        #[command(subcommand)]
        subcommand: ServiceSubcommand,
    },

    /// Inspect and toggle applets
    Applet {
        #[command(subcommand)]
        subcommand: AppletSubcommand,
    },

    /// Query an applet's activity feed
    Activity {
        #[command(subcommand)]
        subcommand: ActivitySubcommand,
    },

    /// Run the JSON API server
    Serve {
        /// Port to listen on (default: server.port from config, 0 = OS-assigned)
        #[arg(long)]
        port: Option<u16>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root, cli.json),
        Commands::Service { subcommand } => cmd::service::run(&root, subcommand, cli.json),
        Commands::Applet { subcommand } => cmd::applet::run(&root, subcommand, cli.json),
        Commands::Activity { subcommand } => cmd::activity::run(&root, subcommand, cli.json),
        Commands::Serve { port } => cmd::serve::run(&root, port),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
