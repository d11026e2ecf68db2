//! Remote catalog fetcher.

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::event::EventRecord;
use crate::storage::keys;

/// One of the two independently cached event datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// Today-scoped records.
    Current,
    /// The full catalog.
    All,
}

impl Collection {
    /// Read endpoint path on the catalog server.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Collection::Current => "/eventos",
            Collection::All => "/all_eventos",
        }
    }

    /// Store key holding the cached blob.
    pub fn storage_key(&self) -> &'static str {
        match self {
            Collection::Current => keys::EVENTS_DATA,
            Collection::All => keys::ALL_EVENTS_DATA,
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Collection::Current => write!(f, "eventos"),
            Collection::All => write!(f, "all_eventos"),
        }
    }
}

/// Fetch error types.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status} from {endpoint}")]
    Status { endpoint: &'static str, status: u16 },

    #[error("could not start fetch runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Narrow interface over the remote catalog.
/// One attempt per call; no retry inside the fetch itself.
pub trait EventFetcher: Send + Sync {
    fn fetch(&self, collection: Collection) -> Result<Vec<EventRecord>, FetchError>;
}

/// HTTP fetcher over the catalog's REST endpoints.
///
/// Owns its runtime so callers stay synchronous; the request timeout is
/// enforced at the client so a hung transport surfaces as a fetch
/// failure.
pub struct HttpFetcher {
    base_url: String,
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
            runtime,
        })
    }
}

impl EventFetcher for HttpFetcher {
    fn fetch(&self, collection: Collection) -> Result<Vec<EventRecord>, FetchError> {
        let url = format!("{}{}", self.base_url, collection.endpoint());
        debug!("fetching {collection} from {url}");

        self.runtime.block_on(async {
            let response = self.client.get(&url).send().await?;
            if !response.status().is_success() {
                return Err(FetchError::Status {
                    endpoint: collection.endpoint(),
                    status: response.status().as_u16(),
                });
            }
            let events = response.json::<Vec<EventRecord>>().await?;
            Ok(events)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"[{
        "_id": "e1",
        "Tipo": "Clase",
        "Evento": "Cálculo",
        "Fecha": "2024-06-10",
        "Inicio": "08:30",
        "Fin": "10:00",
        "Sala": "101-A",
        "Edificio": "Edificio C",
        "Campus": "Peñalolén",
        "fechaActualizacion": "2024-06-01"
    }]"#;

    #[test]
    fn fetch_decodes_catalog_records() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/eventos")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(BODY)
            .create();

        let fetcher = HttpFetcher::new(server.url(), Duration::from_secs(5)).unwrap();
        let events = fetcher.fetch(Collection::Current).unwrap();

        mock.assert();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Cálculo");
    }

    #[test]
    fn fetch_maps_non_2xx_to_status_error() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/all_eventos")
            .with_status(500)
            .create();

        let fetcher = HttpFetcher::new(server.url(), Duration::from_secs(5)).unwrap();
        let err = fetcher.fetch(Collection::All).unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 500, .. }));
    }

    #[test]
    fn fetch_maps_malformed_body_to_transport_error() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/eventos")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{ definitely not an array")
            .create();

        let fetcher = HttpFetcher::new(server.url(), Duration::from_secs(5)).unwrap();
        assert!(matches!(
            fetcher.fetch(Collection::Current),
            Err(FetchError::Transport(_))
        ));
    }

    #[test]
    fn collections_map_to_distinct_endpoints_and_keys() {
        assert_ne!(Collection::Current.endpoint(), Collection::All.endpoint());
        assert_ne!(
            Collection::Current.storage_key(),
            Collection::All.storage_key()
        );
    }
}
