use crate::domain::error::DirectoryError;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::client::ApiClient;
use crate::infrastructure::network::http::create_client;
use crate::infrastructure::storage::detail_cache::DetailCache;
use crate::infrastructure::xml::VenueXmlParser;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub client: ApiClient,
    pub config: Arc<RwLock<Config>>,
    pub detail_cache: Arc<DetailCache>,
    pub parser: Arc<Mutex<VenueXmlParser>>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, DirectoryError> {
        let http_client = create_client(&config)?;
        let client = ApiClient::new(http_client, config.endpoints.clone());

        Ok(Self {
            client,
            config: Arc::new(RwLock::new(config)),
            detail_cache: Arc::new(DetailCache::new()),
            parser: Arc::new(Mutex::new(VenueXmlParser::new())),
        })
    }
}
