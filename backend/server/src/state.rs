use std::sync::Arc;

use reqwest::Client;

use super::config::Config;

pub struct AppState {
    pub config: Config,
    pub client: Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Arc<Self>, reqwest::Error> {
        let client = Client::builder().timeout(config.backend_timeout).build()?;

        Ok(Arc::new(Self { config, client }))
    }
}
