use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use application::{Dashboard, Repositories};
use domain::query::{SearchQuery, highlight};
use domain::{EntityKind, ListQuery, OrgChartView, SystemClock, TableRow};
use infrastructure::{DashboardConfig, SeedData};

#[derive(Parser, Debug)]
#[command(author, version, about = "Operator console for the oil-palm procurement stores", long_about = None)]
struct Args {
    /// Path to config directory
    #[arg(long, default_value = "config")]
    config_dir: String,

    /// Override the fixtures directory
    #[arg(long)]
    fixtures_dir: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: ConsoleCommand,
}

#[derive(Subcommand, Debug)]
enum ConsoleCommand {
    /// List the records of one store
    List {
        /// district, mandal, village, procurement-center, employee, farmer, procurement-batch
        kind: String,

        /// Space-separated search terms, all of which must match
        #[arg(long, default_value = "")]
        search: String,

        /// Exact field match, e.g. --filter status=Pending
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
    },
    /// Print the reporting tree
    OrgChart {
        /// Employee ids whose reports are hidden
        #[arg(long)]
        collapse: Vec<String>,
    },
    /// Record counts per store
    Summary,
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(field, value)| (field.trim().to_string(), value.trim().to_string()))
        .filter(|(field, _)| !field.is_empty())
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))
}

async fn run() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();

    let mut config = DashboardConfig::load(&args.config_dir)
        .with_context(|| format!("loading configuration from {}", args.config_dir))?;
    if let Some(dir) = args.fixtures_dir {
        config.fixtures_dir = Some(dir.into());
    }

    // Logs go to stderr so listings can be piped
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_filter.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let seed = match &config.fixtures_dir {
        Some(dir) => SeedData::from_dir(dir)?,
        None => SeedData::bundled()?,
    };
    let dashboard = Dashboard::new(
        Repositories::in_memory(seed)?,
        Arc::new(SystemClock),
        config.event_buffer,
    );
    info!("Stores ready");

    match args.command {
        ConsoleCommand::List {
            kind,
            search,
            filters,
        } => {
            let kind: EntityKind = kind.parse()?;
            let query = filters
                .into_iter()
                .fold(ListQuery::new(&search), |query, (field, value)| {
                    query.filter(field, value)
                });
            let rows = dashboard.list(kind, &query).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print_rows(kind, &rows, &query.search);
            }
        }
        ConsoleCommand::OrgChart { collapse } => {
            let chart = dashboard.org_chart().await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&chart)?);
                return Ok(());
            }
            let mut view = OrgChartView::new();
            for id in &collapse {
                if chart.find(id).is_none() {
                    return Err(anyhow!("no employee {id} in the org chart"));
                }
                view.toggle(id);
            }
            for (depth, node) in view.visible_rows(&chart) {
                let marker = if node.children.is_empty() {
                    " "
                } else if view.is_expanded(&node.id) {
                    "-"
                } else {
                    "+"
                };
                println!(
                    "{}{} {} ({}, {}) [{}]",
                    "  ".repeat(depth),
                    marker,
                    node.name,
                    node.designation,
                    node.id,
                    node.status
                );
            }
            if !chart.unreachable().is_empty() {
                println!("Reporting cycle: {}", chart.unreachable().join(", "));
            }
        }
        ConsoleCommand::Summary => {
            let summary = dashboard.summary().await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                for store in summary {
                    println!("{:<20} {:>5} total {:>5} open", store.kind.label(), store.total, store.open);
                }
            }
        }
    }
    Ok(())
}

fn print_rows(kind: EntityKind, rows: &[TableRow], search: &SearchQuery) {
    println!("{} ({} rows)", kind.label(), rows.len());
    for row in rows {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|cell| format!("{}: {}", cell.label, emphasize(&cell.value, search)))
            .collect();
        println!("{} | {}", emphasize(&row.id, search), cells.join(" | "));
    }
}

fn emphasize(text: &str, search: &SearchQuery) -> String {
    highlight(text, search)
        .into_iter()
        .map(|segment| {
            if segment.matched {
                format!("*{}*", segment.text)
            } else {
                segment.text.to_string()
            }
        })
        .collect()
}

fn main() {
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = rt.block_on(run()) {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}
