//! Command-line front end for the tool catalog.
//!
//! Each invocation loads the record directory once, then runs one view:
//! the filtered list, a tool's detail page with related tools, the facet
//! vocabulary, or the quality-dimension overview. `--json` swaps the text
//! renderers for machine-readable output of the same data.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use toolradar::render::{
    render_dimensions, render_facets, render_not_found, render_tool_detail, render_tool_list,
};
use toolradar::{
    DimensionIndex, FacetKey, FilterCriteria, FreeAccess, RELATED_LIMIT, ToolStore, compute_visible,
    find_related, resolve_data_dir,
};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "toolradar", version)]
#[command(about = "Search and browse the research-software tool catalog")]
struct Cli {
    /// Directory holding one JSON document per tool
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List tools matching the given search text and filters
    List(ListArgs),
    /// Show one tool and up to three related tools
    Show {
        /// Tool id (the record's file name without extension)
        id: String,
    },
    /// Print the values available for each filter
    Facets,
    /// Print every quality dimension with the tools that carry it
    Dimensions,
}

#[derive(Args)]
struct ListArgs {
    /// Case-insensitive text matched against name and description
    #[arg(long, short = 's', default_value = "")]
    search: String,

    /// Quality dimension name (without the dim: prefix)
    #[arg(long, short = 'd', default_value = "")]
    dimension: String,

    /// Category / software tier (repeatable)
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Usage mode (repeatable)
    #[arg(long)]
    usage: Vec<String>,

    /// Full license string as it appears in the records (repeatable)
    #[arg(long = "license")]
    licenses: Vec<String>,

    /// yes or no (repeatable; both means no constraint)
    #[arg(long)]
    free: Vec<FreeAccess>,
}

impl ListArgs {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria::default()
            .with_search(self.search.as_str())
            .with_dimension(self.dimension.as_str())
            .with_facet(FacetKey::Categories, self.categories.iter().map(String::as_str))
            .with_facet(FacetKey::Usage, self.usage.iter().map(String::as_str))
            .with_facet(FacetKey::Licenses, self.licenses.iter().map(String::as_str))
            .with_free(self.free.iter().copied())
    }
}

fn main() {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let store = ToolStore::load(&data_dir)
        .with_context(|| format!("loading tool records from {}", data_dir.display()))?;
    let report = store.report();
    info!(
        loaded = report.loaded,
        skipped = report.skipped,
        "catalog ready"
    );

    match &cli.command {
        Command::List(args) => run_list(&store, args, cli.json),
        Command::Show { id } => run_show(&store, id, cli.json),
        Command::Facets => run_facets(&store, cli.json),
        Command::Dimensions => run_dimensions(&store, cli.json),
    }
}

fn run_list(store: &ToolStore, args: &ListArgs, as_json: bool) -> Result<()> {
    let criteria = args.criteria();
    let visible = compute_visible(store.all(), &criteria);
    debug!(
        visible = visible.len(),
        total = store.len(),
        unconstrained = criteria.is_unconstrained(),
        "applied filters"
    );

    if as_json {
        return print_json(&json!({
            "criteria": criteria,
            "total": store.len(),
            "load": store.report(),
            "tools": visible,
        }));
    }
    let mut output = String::new();
    render_tool_list(&visible, &mut output)?;
    print!("{output}");
    Ok(())
}

fn run_show(store: &ToolStore, id: &str, as_json: bool) -> Result<()> {
    let Some(record) = store.get(id) else {
        if as_json {
            print_json(&json!({"error": "Tool not found", "id": id}))?;
        } else {
            let mut output = String::new();
            render_not_found(id, &mut output)?;
            print!("{output}");
        }
        std::process::exit(1);
    };

    let related = find_related(record, store.all(), RELATED_LIMIT);
    if as_json {
        return print_json(&json!({"tool": record, "related": related}));
    }
    let mut output = String::new();
    render_tool_detail(record, &related, &mut output)?;
    print!("{output}");
    Ok(())
}

fn run_facets(store: &ToolStore, as_json: bool) -> Result<()> {
    if as_json {
        return print_json(&json!({
            "facets": store.facets(),
            "dimensions": store.dimension_names(),
        }));
    }
    let mut output = String::new();
    render_facets(store.facets(), store.dimension_names(), &mut output)?;
    print!("{output}");
    Ok(())
}

fn run_dimensions(store: &ToolStore, as_json: bool) -> Result<()> {
    let index = DimensionIndex::from_store(store);
    if as_json {
        return print_json(&index);
    }
    let mut output = String::new();
    render_dimensions(&index, store, &mut output)?;
    print!("{output}");
    Ok(())
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{text}");
    Ok(())
}
