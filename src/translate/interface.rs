use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TranslateError, ValidationError};
use crate::language::Language;

/// Typed model key: the (source, target) pair a pretrained model is published for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelPair {
    pub source: Language,
    pub target: Language,
}

impl ModelPair {
    pub fn new(source: Language, target: Language) -> std::result::Result<Self, ValidationError> {
        if source == target {
            return Err(ValidationError::SameLanguage);
        }
        Ok(Self { source, target })
    }

    /// Hub identifier, e.g. `Helsinki-NLP/opus-mt-en-fr`
    pub fn model_name(&self, namespace: &str, family: &str) -> String {
        format!(
            "{}/{}-{}-{}",
            namespace,
            family,
            self.source.code(),
            self.target.code()
        )
    }
}

/// A validated translation request
#[derive(Debug, Clone)]
pub struct TranslateRequest {
    pub source: Language,
    pub target: Language,
    pub text: String,
}

impl TranslateRequest {
    /// Same-language is checked before empty text.
    pub fn new(source: Language, target: Language, text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        ModelPair::new(source, target)?;
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyText.into());
        }
        Ok(Self { source, target, text })
    }

    pub fn from_codes(source_code: &str, target_code: &str, text: impl Into<String>) -> Result<Self> {
        let source = Language::from_code(source_code)?;
        let target = Language::from_code(target_code)?;
        Self::new(source, target, text)
    }

    pub fn pair(&self) -> ModelPair {
        ModelPair {
            source: self.source,
            target: self.target,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translated_text: String,
    pub source: String,
    pub target: String,
    pub model: String,
}

/// Handle returned by a provider once model and tokenizer are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedModel {
    pub model_name: String,
    pub pair: ModelPair,
    pub revision: Option<String>,
}

/// Source of pretrained translation models
#[async_trait]
pub trait ModelProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Resolve the model and tokenizer published under `model_name`.
    ///
    /// Called once per translation; implementations must not cache.
    async fn load_model(&self, pair: ModelPair, model_name: &str) -> Result<LoadedModel>;

    /// Run generation on `text` and decode the output to plain text.
    async fn generate(&self, model: &LoadedModel, text: &str) -> Result<String>;

    async fn health_check(&self) -> bool {
        true
    }
}

/// Strip whitespace and reject empty decoder output.
pub(crate) fn decode_output(model_name: &str, raw: Option<String>) -> Result<String> {
    match raw.map(|s| s.trim().to_string()) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(TranslateError::Provider(format!(
            "{} returned an empty translation",
            model_name
        ))),
    }
}
