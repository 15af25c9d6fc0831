use std::sync::Arc;
use tracing::info;

use super::huggingface::HuggingFaceProvider;
use super::interface::ModelProvider;
use super::model_service::ModelServiceClient;
use crate::config::{ProviderKind, TranslatorConfig};

/// Factory for creating model providers
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create the model provider selected by `translator_config.provider`.
    pub fn create_provider(config: &TranslatorConfig) -> Arc<dyn ModelProvider> {
        match config.provider {
            ProviderKind::Huggingface => {
                info!(
                    "Initializing Hugging Face provider: hub={}, inference={}, token={}",
                    config.huggingface.hub_url,
                    config.huggingface.inference_url,
                    if config.huggingface.api_token.is_some() { "set" } else { "unset" }
                );
                Arc::new(HuggingFaceProvider::new(&config.huggingface))
            }
            ProviderKind::ModelService => {
                info!(
                    "Initializing model service provider: {}",
                    config.model_service.base_url
                );
                Arc::new(ModelServiceClient::new(
                    config.model_service.base_url.clone(),
                ))
            }
        }
    }
}
