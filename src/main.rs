use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use lookbook_core::catalog::{Catalog, CatalogLoad};
use lookbook_core::compatibility::{
    build_index, CompatibilityIndex, EdgeStore, IndexBuild, IndexStats, SlotEdges, SqliteEdgeStore,
    TtlCache,
};
use lookbook_core::config::{AppConfig, IndexBackend};
use lookbook_core::error::AppError;
use lookbook_core::looks::GeneratedLooks;
use lookbook_core::service::{LookbookService, OutfitScore};
use lookbook_core::telemetry;
use lookbook_core::{Sku, Slot};
use serde_json::json;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "lookbook",
    about = "Score garment compatibility and assemble looks from a product catalog",
    version
)]
struct Cli {
    /// Catalog file (.json or .csv); overrides LOOKBOOK_CATALOG_PATH
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    /// Index backing store (memory or sqlite); overrides LOOKBOOK_INDEX_BACKEND
    #[arg(long, global = true, value_parser = parse_backend)]
    backend: Option<IndexBackend>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score every catalog pair and print the build report
    BuildIndex(BuildIndexArgs),
    /// List ranked compatible items for a sku
    Compatible(CompatibleArgs),
    /// Print the compatibility score of two skus
    Pair { a: String, b: String },
    /// Score every pair in an outfit
    Score {
        #[arg(num_args = 2.., required = true)]
        skus: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Generate looks around a base sku
    Looks(LooksArgs),
    /// Print catalog size and edge statistics for the configured index
    Stats {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct BuildIndexArgs {
    /// Write the edges to the configured SQLite database
    #[arg(long)]
    persist: bool,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct CompatibleArgs {
    sku: String,
    /// Restrict to one functional slot
    #[arg(long, value_parser = parse_slot)]
    slot: Option<Slot>,
    /// Maximum items per slot
    #[arg(long, default_value_t = 10)]
    limit: usize,
    #[arg(long, default_value_t = 0.0)]
    min_score: f64,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct LooksArgs {
    sku: String,
    #[arg(long, default_value_t = 3)]
    num_looks: usize,
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        let code = if err.is_not_found() { 2 } else { 1 };
        std::process::exit(code);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    if let Some(path) = cli.catalog {
        config.catalog.path = path;
    }
    if let Some(backend) = cli.backend {
        config.index.backend = backend;
    }

    telemetry::init(&config.telemetry)?;
    info!(?config.environment, backend = ?config.index.backend, "lookbook starting");

    match cli.command {
        Command::BuildIndex(args) => run_build_index(&config, args).await,
        command => {
            let service = open_service(&config).await?;
            run_query(&service, command).await
        }
    }
}

fn parse_slot(raw: &str) -> Result<Slot, String> {
    raw.parse::<Slot>().map_err(|err| err.to_string())
}

fn parse_backend(raw: &str) -> Result<IndexBackend, String> {
    raw.parse::<IndexBackend>().map_err(|err| err.to_string())
}

async fn load_catalog(config: &AppConfig) -> Result<CatalogLoad, AppError> {
    let path = config.catalog.path.clone();
    let load = tokio::task::spawn_blocking(move || Catalog::load(path)).await??;
    Ok(load)
}

/// Score the catalog off the async runtime.
async fn build_edges(load: &CatalogLoad) -> Result<IndexBuild, AppError> {
    let items = load.catalog.sorted_items();
    let skipped = load.rejected.len();
    let build = tokio::task::spawn_blocking(move || build_index(&items, skipped)).await?;
    Ok(build)
}

async fn run_build_index(config: &AppConfig, args: BuildIndexArgs) -> Result<(), AppError> {
    let load = load_catalog(config).await?;
    let build = build_edges(&load).await?;

    if args.persist || config.index.backend == IndexBackend::Sqlite {
        let store = SqliteEdgeStore::connect(&config.index.sqlite_url).await?;
        store.replace_edges(Arc::new(build.edges)).await?;
        info!(url = %config.index.sqlite_url, "edges persisted");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&build.report)?);
    } else {
        print!("{}", build.report);
    }
    Ok(())
}

async fn open_service(config: &AppConfig) -> Result<LookbookService<Catalog>, AppError> {
    let load = load_catalog(config).await?;

    let index = match config.index.backend {
        IndexBackend::Memory => CompatibilityIndex::in_memory(build_edges(&load).await?.edges),
        IndexBackend::Sqlite => {
            let store = SqliteEdgeStore::connect(&config.index.sqlite_url).await?;
            CompatibilityIndex::new(Arc::new(store))
        }
    };
    let index = if config.index.cache_capacity > 0 {
        index.with_cache(TtlCache::new(
            config.index.cache_ttl,
            config.index.cache_capacity,
        ))
    } else {
        index
    };

    Ok(LookbookService::new(
        Arc::new(load.catalog),
        Arc::new(index),
        config.generation,
    ))
}

async fn run_query(service: &LookbookService<Catalog>, command: Command) -> Result<(), AppError> {
    match command {
        Command::BuildIndex(_) => Ok(()),
        Command::Compatible(args) => {
            let sku = Sku::new(args.sku);
            let edges = service
                .compatible_items(&sku, args.slot, Some(args.limit), args.min_score)
                .await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&edges)?);
            } else {
                print!("{}", render_compatible(&sku, &edges));
            }
            Ok(())
        }
        Command::Pair { a, b } => {
            let score = service.pair_score(&Sku::new(a.clone()), &Sku::new(b.clone())).await?;
            match score {
                Some(score) => println!("{a} + {b}: {score:.3}"),
                None => println!("{a} + {b}: not compatible"),
            }
            Ok(())
        }
        Command::Score { skus, json } => {
            let skus: Vec<Sku> = skus.into_iter().map(Sku::new).collect();
            let score = service.score_outfit(&skus).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&score)?);
            } else {
                print!("{}", render_outfit(&score));
            }
            Ok(())
        }
        Command::Stats { json } => {
            let items = service.fetcher().len();
            let stats = service.stats().await?;
            if json {
                let payload = json!({
                    "items": items,
                    "backend": service.index().backend(),
                    "edge_count": stats.edge_count,
                    "distinct_skus": stats.distinct_skus,
                    "mean_score": stats.mean_score,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                print!("{}", render_stats(items, &stats));
            }
            Ok(())
        }
        Command::Looks(args) => {
            let generated = service
                .generate_looks(&Sku::new(args.sku), args.num_looks)
                .await?;
            if args.json {
                let payload = json!({
                    "base_item": generated.base,
                    "looks": generated.looks,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                print!("{}", render_looks(&generated));
            }
            Ok(())
        }
    }
}

fn render_compatible(sku: &Sku, edges: &SlotEdges) -> String {
    if edges.is_empty() {
        return format!("No compatible items for {sku}\n");
    }
    let mut out = format!("Compatible items for {sku}\n");
    for (slot, ranked) in edges {
        out.push_str(&format!("\n{}\n", slot.label()));
        for neighbour in ranked {
            out.push_str(&format!("- {} ({:.3})\n", neighbour.sku, neighbour.score));
        }
    }
    out
}

fn render_outfit(score: &OutfitScore) -> String {
    let mut out = String::from("Outfit pair scores\n");
    if score.pair_scores.is_empty() {
        out.push_str("- no compatible pairs\n");
    }
    for (pair, value) in &score.pair_scores {
        out.push_str(&format!("- {pair}: {value:.3}\n"));
    }
    out.push_str(&format!(
        "Total: {:.3} across {} pairs, average {:.3}\n",
        score.total_score, score.pair_count, score.average_score
    ));
    out
}

fn render_stats(items: usize, stats: &IndexStats) -> String {
    format!(
        "Catalog items: {items}\nEdges: {}\nSkus with edges: {}\nMean score: {:.3}\n",
        stats.edge_count, stats.distinct_skus, stats.mean_score
    )
}

fn render_looks(generated: &GeneratedLooks) -> String {
    let base = &generated.base;
    let mut out = format!(
        "Looks for {} ({}, {})\n",
        base.sku,
        base.display_title(),
        base.slot.label()
    );
    if generated.looks.is_empty() {
        out.push_str("No looks could be assembled\n");
        return out;
    }
    for look in &generated.looks {
        out.push_str(&format!(
            "\n{}: {} [{} = {}]\n  {}\n",
            look.id, look.name, look.dimension, look.dimension_value, look.description
        ));
        for (slot, item) in &look.items {
            out.push_str(&format!("  - {}: {} {}\n", slot.label(), item.sku, item.title));
        }
    }
    out
}
