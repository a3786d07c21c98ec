mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, plan::PlanArgs, route::RouteArgs};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gt-route",
    about = "Route Beads issues to model tiers and plan escalating agent loops",
    version,
    propagate_version = true
)]
struct Cli {
    /// Rig root (default: auto-detect from .beads/ or .git/)
    #[arg(long, global = true, env = "GT_ROUTE_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick a model tier for an issue (by id, ad hoc, or every open issue)
    Route(RouteArgs),

    /// Build a staged escalation plan for an iterative agent loop
    Plan(PlanArgs),

    /// Show the tier ladder with unit costs and savings against the baseline
    Tiers,

    /// Inspect and validate .beads/routing.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not failures; everything else exits 1.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    tracing::debug!(root = %root.display(), "resolved rig root");

    let result = match cli.command {
        Commands::Route(args) => cmd::route::run(&root, args, cli.json),
        Commands::Plan(args) => cmd::plan::run(&root, args, cli.json),
        Commands::Tiers => cmd::tiers::run(cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
