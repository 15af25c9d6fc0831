use std::sync::Arc;

use crate::config::Config;
use crate::translate::{ModelProvider, ProviderFactory, TranslationInvoker};

/// Shared, read-only application state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub invoker: TranslationInvoker,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let provider = ProviderFactory::create_provider(&config.translator_config);
        Self::with_provider(config, provider)
    }

    pub fn with_provider(config: Config, provider: Arc<dyn ModelProvider>) -> Self {
        let invoker = TranslationInvoker::new(provider, &config.translator_config);
        Self {
            config: Arc::new(config),
            invoker,
        }
    }
}
