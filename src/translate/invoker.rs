use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::interface::{ModelProvider, TranslateRequest, TranslateResponse};
use crate::config::TranslatorConfig;
use crate::error::Result;

/// Turns validated requests into translated text through a [`ModelProvider`].
///
/// Holds no mutable state: every call loads the model afresh.
#[derive(Clone)]
pub struct TranslationInvoker {
    provider: Arc<dyn ModelProvider>,
    model_namespace: String,
    model_family: String,
}

impl TranslationInvoker {
    pub fn new(provider: Arc<dyn ModelProvider>, config: &TranslatorConfig) -> Self {
        Self {
            provider,
            model_namespace: config.model_namespace.clone(),
            model_family: config.model_family.clone(),
        }
    }

    pub fn provider(&self) -> &Arc<dyn ModelProvider> {
        &self.provider
    }

    /// Validate the code pair and text, then translate.
    pub async fn translate(&self, source_code: &str, target_code: &str, text: &str) -> Result<String> {
        let request = TranslateRequest::from_codes(source_code, target_code, text)?;
        Ok(self.translate_request(&request).await?.translated_text)
    }

    pub async fn translate_request(&self, request: &TranslateRequest) -> Result<TranslateResponse> {
        let request_id = Uuid::new_v4();
        let pair = request.pair();
        let model_name = pair.model_name(&self.model_namespace, &self.model_family);

        info!(
            %request_id,
            "Translating {} chars {} -> {} with {} via {}",
            request.text.chars().count(),
            pair.source.code(),
            pair.target.code(),
            model_name,
            self.provider.name()
        );

        let model = self
            .provider
            .load_model(pair, &model_name)
            .await
            .map_err(|e| {
                warn!(%request_id, "Failed to load {}: {}", model_name, e);
                e
            })?;
        debug!(
            %request_id,
            "Loaded {} for {} -> {} (revision {:?})",
            model.model_name,
            model.pair.source,
            model.pair.target,
            model.revision
        );

        let translated_text = self.provider.generate(&model, &request.text).await.map_err(|e| {
            warn!(%request_id, "Generation with {} failed: {}", model.model_name, e);
            e
        })?;

        info!(%request_id, "Translation complete ({} chars)", translated_text.chars().count());
        Ok(TranslateResponse {
            translated_text,
            source: pair.source.code().to_string(),
            target: pair.target.code().to_string(),
            model: model.model_name,
        })
    }
}
