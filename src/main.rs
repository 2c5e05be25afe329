use anyhow::bail;
use citation_dashboard::{
    components::{Dashboard, GenerateOutcome, QueryMode},
    config::Config,
    render::{write_snapshot, SnapshotQuery},
    utils::{init_console_logger, init_file_logger},
    DashboardApi, HttpApi,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Citation Dashboard: browse and manage a citation analytics backend
#[derive(Parser, Debug)]
#[command(name = "citation-dashboard", version, about, long_about = None)]
struct Cli {
    /// Backend base URL including the API prefix
    #[arg(long, env = "DASHBOARD_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive terminal dashboard (default)
    Tui,
    /// Write a static HTML snapshot of the dashboard
    Snapshot {
        #[arg(short, long, default_value = "dashboard.html")]
        out: PathBuf,
        /// Include the top papers for this topic
        #[arg(long)]
        topic: Option<String>,
        #[arg(long, default_value_t = 10)]
        limit: u32,
        /// Query the database directly instead of the cache
        #[arg(long)]
        bypass: bool,
    },
    /// Generate sample data
    Generate,
    /// Check backend health
    Health,
    /// Delete all papers and citations
    Clear,
    /// Evict one cached top papers entry
    ClearCache { topic: String, limit: u32 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(url) = cli.api_url {
        config = config.with_base_url(url);
    }
    let api: Arc<dyn DashboardApi> = Arc::new(HttpApi::from_config(&config.api));

    let command = cli.command.unwrap_or(Commands::Tui);
    if let Commands::Tui = command {
        let _guard = init_file_logger(&config.log);
        return citation_dashboard::tui::run(config, api).await;
    }

    init_console_logger(&config.log);
    info!(api = %config.api.base_url, "Configuration loaded");

    let dashboard = Dashboard::new(&config, api);
    let result = run_command(&dashboard, command).await;
    print_toasts(&dashboard);
    dashboard.shutdown();
    result
}

async fn run_command(dashboard: &Dashboard, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Tui => bail!("The terminal dashboard is not a one-shot command"),
        Commands::Snapshot {
            out,
            topic,
            limit,
            bypass,
        } => {
            let query = topic.map(|topic| SnapshotQuery {
                topic,
                limit,
                mode: if bypass {
                    QueryMode::Bypass
                } else {
                    QueryMode::Cached
                },
            });
            write_snapshot(dashboard, query.as_ref(), &out).await?;
            println!("Snapshot written to {}", out.display());
        }
        Commands::Generate => match dashboard.generator.generate().await? {
            GenerateOutcome::Completed(_) => {}
            GenerateOutcome::Failed(e) => bail!("Generation failed: {}", e),
            GenerateOutcome::AlreadyRunning => bail!("Generation already running"),
        },
        Commands::Health => {
            if dashboard.maintenance.check_health().await.is_none() {
                bail!("Backend unreachable");
            }
        }
        Commands::Clear => {
            if !dashboard.maintenance.clear_database().await {
                bail!("Clearing the database failed");
            }
        }
        Commands::ClearCache { topic, limit } => {
            if !dashboard.maintenance.clear_cache(&topic, limit).await {
                bail!("Clearing the cache failed");
            }
        }
    }
    Ok(())
}

/// One-shot commands report through the same toasts the dashboard shows.
fn print_toasts(dashboard: &Dashboard) {
    for toast in dashboard.notifier.visible() {
        println!("[{}] {}", toast.severity, toast.message);
    }
}
