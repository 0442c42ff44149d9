use clap::Parser;
use nutrimatch_api::{AppState, RestApi};
use nutrimatch_extract::EntityPipeline;
use nutrimatch_ranking::{HashEmbedder, RecipeMatcher, TextEmbedder};
use nutrimatch_storage::{load_dataset, FetchConfig, RecipeFetcher, RecipeRepository};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Dietary-intent extraction and recipe ranking server
#[derive(Parser, Debug)]
#[command(name = "nutrimatch")]
#[command(about = "Structured dietary search and weekly meal planning", long_about = None)]
struct Args {
    /// Path to the data directory
    #[arg(short, long, default_value = "./data")]
    data_dir: PathBuf,

    /// HTTP API port
    #[arg(long, default_value_t = 8080)]
    http_port: u16,

    /// Recipe dataset (CSV) loaded at startup
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Upstream recipe API base URL; enables fetch-on-startup and
    /// POST /recipes/refresh (API key via UPSTREAM_API_KEY)
    #[arg(long)]
    upstream_url: Option<String>,

    /// Pages to pull per upstream fetch
    #[arg(long, default_value_t = 10)]
    fetch_pages: u32,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting nutrimatch v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {:?}", args.data_dir);
    info!("HTTP API port: {}", args.http_port);

    let repository = Arc::new(RecipeRepository::open(&args.data_dir)?);
    let embedder: Arc<dyn TextEmbedder> = Arc::new(HashEmbedder::default());

    if let Some(dataset) = &args.dataset {
        let recipes = load_dataset(dataset, embedder.as_ref())?;
        let inserted = repository.ingest(recipes)?;
        info!("Dataset {:?}: {} new recipes", dataset, inserted);
    }

    let fetcher = match &args.upstream_url {
        Some(url) => {
            let mut config = FetchConfig::new(url.clone()).with_max_pages(args.fetch_pages);
            match std::env::var("UPSTREAM_API_KEY") {
                Ok(key) if !key.is_empty() => config = config.with_api_key(key),
                _ => warn!("UPSTREAM_API_KEY not set, fetching without auth"),
            }
            Some(Arc::new(RecipeFetcher::new(config, embedder.clone())?))
        }
        None => None,
    };

    if let Some(fetcher) = &fetcher {
        let fetched = fetcher.fetch_all().await;
        let inserted = repository.ingest(fetched)?;
        info!("Initial fetch: {} new recipes", inserted);
    }

    info!("Cached recipes: {}", repository.len());

    let state = Arc::new(AppState {
        repository,
        pipeline: EntityPipeline::default(),
        matcher: RecipeMatcher::new(embedder),
        fetcher,
    });

    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(state, http_port).await {
                eprintln!("HTTP server error: {}", e);
            }
        })
    });

    info!("nutrimatch started successfully");
    info!("HTTP API: http://localhost:{}/", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
