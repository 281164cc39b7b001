//! Sports Dashboard CLI
//!
//! Terminal rendering of the sports attribute dashboard: dataset overview,
//! skill heatmap, scatter views, popularity correlation and head-to-head.

#[cfg(feature = "cli")]
mod render;

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use sports_core::analysis::default_pair;
#[cfg(feature = "cli")]
use sports_core::api::OverviewView;
#[cfg(feature = "cli")]
use sports_core::data::builtin_reference;
#[cfg(feature = "cli")]
use sports_core::{
    dashboard_json_from_cache, project, ComparisonState, DashboardConfig, DashboardViews,
    SnapshotCache, ViewOutcome,
};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "sports_dashboard")]
#[command(about = "Explore which sport is best by its athletic attributes", long_about = None)]
struct Cli {
    /// Source CSV (overrides config and SPORTS_DASHBOARD_DATA)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Raw table preview and shape
    Overview {
        /// Only print the first N rows
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Distinct sport names in source order
    Sports,

    /// Correlation matrix over the skill columns
    Heatmap,

    /// Scatter of two columns
    Scatter {
        #[arg(long)]
        x: String,

        #[arg(long)]
        y: String,
    },

    /// Skill correlation with the popularity index, ascending
    Popularity,

    /// Head-to-head attribute comparison
    Compare {
        #[arg(long)]
        sport_a: Option<String>,

        #[arg(long)]
        sport_b: Option<String>,
    },

    /// Every view as one JSON envelope
    Dashboard {
        #[arg(long, default_value = "false")]
        pretty: bool,
    },
}

#[cfg(feature = "cli")]
fn load_config(cli: &Cli) -> Result<DashboardConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            DashboardConfig::from_json_str(&json)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => DashboardConfig::from_env(),
    };
    if let Some(path) = &cli.data {
        config = config.with_source_path(path);
    }
    Ok(config)
}

#[cfg(feature = "cli")]
fn print_outcome<T>(title: &str, outcome: &ViewOutcome<T>, draw: impl Fn(&T) -> String) {
    match outcome {
        ViewOutcome::Ready { data } => print!("{}", draw(data)),
        ViewOutcome::Unavailable { error } => print!("{}", render::unavailable(title, error)),
    }
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let cache = SnapshotCache::new(config.delimiter_byte()?, builtin_reference().clone());

    if let Commands::Dashboard { pretty } = cli.command {
        let json = dashboard_json_from_cache(&cache, &config);
        if pretty {
            let value: serde_json::Value = serde_json::from_str(&json)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        } else {
            println!("{json}");
        }
        return Ok(());
    }

    let snapshot = match cache.get_or_load(&config.source_path) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            println!("⚠️  Dataset unavailable: {err}");
            println!(
                "   Place the CSV at {} or pass --data / set {}.",
                config.source_path.display(),
                sports_core::config::SOURCE_PATH_ENV
            );
            return Ok(());
        }
    };
    let table = &snapshot.table;

    match cli.command {
        Commands::Overview { limit } => {
            print!("{}", render::overview(&OverviewView::build(&snapshot), limit));
        }

        Commands::Sports => {
            for sport in table.distinct_sports() {
                println!("{sport}");
            }
        }

        Commands::Heatmap => {
            let views = DashboardViews::build(&snapshot, &config);
            print_outcome("Heatmap", &views.heatmap, render::heatmap);
        }

        Commands::Scatter { x, y } => {
            let outcome: ViewOutcome<_> = project(table, &x, &y).into();
            print_outcome("Scatter", &outcome, render::scatter);
        }

        Commands::Popularity => {
            let views = DashboardViews::build(&snapshot, &config);
            print_outcome("Popularity scatter", &views.popularity_scatter, render::scatter);
            print_outcome("Popularity correlation", &views.popularity_correlation, |entries| {
                render::popularity_correlation(entries)
            });
        }

        Commands::Compare { sport_a, sport_b } => {
            let selected = config.skill_columns().and_then(|columns| {
                let (default_a, default_b) =
                    default_pair(table, &config.default_sport_a, &config.default_sport_b)?;
                let sport_a = sport_a.unwrap_or(default_a);
                let sport_b = sport_b.unwrap_or(default_b);

                let mut state = ComparisonState::new();
                state.select(table, &sport_a, &sport_b, &columns).cloned()
            });
            let outcome: ViewOutcome<_> = selected.into();
            print_outcome("Comparison", &outcome, render::head_to_head);
        }

        Commands::Dashboard { .. } => {}
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("sports_dashboard CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
