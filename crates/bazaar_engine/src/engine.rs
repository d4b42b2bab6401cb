use std::sync::{mpsc, Arc};
use std::thread;

use bazaar_logging::bazaar_warn;
use serde_json::Value;
use url::Url;

use crate::fetch::{DocumentFetcher, FetchSettings, ReqwestFetcher};
use crate::{catalog, EngineEvent, FailureKind, FetchError, PriceDocKey};

/// Path of the listings document relative to the data base URL.
pub const LISTINGS_PATH: &str = "data/listings.json";

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub base_url: String,
    pub fetch: FetchSettings,
}

impl EngineConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            fetch: FetchSettings::default(),
        }
    }
}

enum EngineCommand {
    LoadListings { generation: u64 },
    LoadPriceHistory { key: PriceDocKey },
}

/// Command side of the engine. Fetches run on a dedicated thread owning a
/// tokio runtime; results come back on the event receiver returned by
/// [`EngineHandle::new`].
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<(Self, mpsc::Receiver<EngineEvent>), FetchError> {
        let base = Url::parse(&config.base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let fetcher = Arc::new(ReqwestFetcher::new(config.fetch));

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    bazaar_warn!("failed to start engine runtime: {err}");
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let fetcher = fetcher.clone();
                let event_tx = event_tx.clone();
                let base = base.clone();
                runtime.spawn(async move {
                    handle_command(fetcher.as_ref(), &base, command, event_tx).await;
                });
            }
        });

        Ok((Self { cmd_tx }, event_rx))
    }

    pub fn load_listings(&self, generation: u64) {
        let _ = self.cmd_tx.send(EngineCommand::LoadListings { generation });
    }

    pub fn load_price_history(&self, key: PriceDocKey) {
        let _ = self.cmd_tx.send(EngineCommand::LoadPriceHistory { key });
    }
}

async fn handle_command(
    fetcher: &dyn DocumentFetcher,
    base: &Url,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::LoadListings { generation } => {
            let event = match fetch_document(fetcher, base, LISTINGS_PATH).await {
                Ok(doc) => EngineEvent::ListingsLoaded {
                    generation,
                    listings: catalog::parse_listings(&doc),
                },
                Err(error) => EngineEvent::ListingsFailed { generation, error },
            };
            let _ = event_tx.send(event);
        }
        EngineCommand::LoadPriceHistory { key } => {
            let event = match fetch_document(fetcher, base, key.document_path()).await {
                Ok(doc) => match catalog::parse_price_history(&doc) {
                    Some(series) => EngineEvent::PriceHistoryLoaded { key, series },
                    None => EngineEvent::PriceHistoryUnavailable { key },
                },
                Err(error) => {
                    bazaar_warn!("price-history fetch failed: {error}");
                    EngineEvent::PriceHistoryUnavailable { key }
                }
            };
            let _ = event_tx.send(event);
        }
    }
}

/// Fetches a document and parses it as JSON. An unparsable body maps to
/// `Value::Null`, which downstream ingestion treats as an empty collection.
async fn fetch_document(
    fetcher: &dyn DocumentFetcher,
    base: &Url,
    path: &str,
) -> Result<Value, FetchError> {
    let url = base
        .join(path)
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
    let bytes = fetcher.fetch_document(url.as_str()).await?;
    Ok(serde_json::from_slice(&bytes).unwrap_or_else(|err| {
        bazaar_warn!("document {path} is not valid JSON: {err}");
        Value::Null
    }))
}
