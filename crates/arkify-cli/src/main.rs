mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "arkify",
    about = "Turn a side-project YAML into a story-driven breakdown plan",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root holding .arkify/ (default: auto-detect from .arkify/ or .git/)
    #[arg(long, global = true, env = "ARKIFY_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default .arkify/config.yaml
    Init,

    /// Show the story type and panel order for a project
    Story {
        /// Project YAML file
        file: PathBuf,
    },

    /// Show headline numbers for a project
    Kpis {
        /// Project YAML file
        file: PathBuf,
    },

    /// Check that a project has the fields a breakdown needs
    Check {
        /// Project YAML file
        file: PathBuf,
    },

    /// Build the breakdown plan and write it to the output directory
    Plan {
        /// Project YAML file
        file: PathBuf,

        /// Output directory (default: output.dir from config)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Plan file format: yaml or json (default: output.format from config)
        #[arg(long)]
        format: Option<String>,
    },

    /// Extract development metrics from git history
    GitStats {
        /// Repository to read (default: project root)
        #[arg(long)]
        repo: Option<PathBuf>,
    },

    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Story { file } => cmd::story::run(&file, cli.json),
        Commands::Kpis { file } => cmd::kpis::run(&root, &file, cli.json),
        Commands::Check { file } => cmd::check::run(&file, cli.json),
        Commands::Plan { file, out, format } => {
            cmd::plan::run(&root, &file, out.as_deref(), format.as_deref(), cli.json)
        }
        Commands::GitStats { repo } => cmd::git_stats::run(&root, repo.as_deref(), cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
