use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use catalog_indexer::{Dependencies, IndexerConfig, IndexingError};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Logs go to stderr so stdout stays free for documents.
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

async fn run() -> Result<(), IndexingError> {
    let config = IndexerConfig::from_env()?;
    let mut dependencies = Dependencies::new(&config).await?;

    // The run itself is never cancelled; it stops between batches and
    // flushes what it holds once the signal arrives.
    let shutdown = dependencies.shutdown_handle();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received shutdown signal");
                let _ = shutdown.send(());
            }
            Err(e) => warn!(error = %e, "Could not listen for shutdown signal"),
        }
    });

    let summary = dependencies.run().await?;
    if summary.interrupted {
        info!(
            products = summary.products,
            documents = summary.documents,
            "Indexing stopped early"
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    if let Err(e) = run().await {
        error!(error = %e, "Catalog indexer failed");
        std::process::exit(1);
    }
}
