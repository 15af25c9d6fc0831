use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error};

use super::interface::{decode_output, LoadedModel, ModelPair, ModelProvider};
use crate::config::HuggingFaceConfig;
use crate::error::{Result, TranslateError};

/// Resolves models on the Hugging Face hub and runs them on the hosted inference API.
pub struct HuggingFaceProvider {
    client: Client,
    hub_url: String,
    inference_url: String,
    api_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HubModelInfo {
    id: String,
    sha: Option<String>,
}

impl HuggingFaceProvider {
    pub fn new(config: &HuggingFaceConfig) -> Self {
        Self {
            client: Client::new(),
            hub_url: config.hub_url.trim_end_matches('/').to_string(),
            inference_url: config.inference_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Extract the translation from an inference API response body.
///
/// Successful bodies are `[{"translation_text": "..."}]`; failures carry `{"error": "..."}`.
fn parse_generation(model_name: &str, body: &Value) -> Result<String> {
    if let Some(message) = body.get("error").and_then(|v| v.as_str()) {
        return Err(TranslateError::Provider(format!(
            "{}: {}",
            model_name, message
        )));
    }

    let text = body
        .as_array()
        .and_then(|items| items.first())
        .and_then(|item| item.get("translation_text"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    if text.is_none() {
        return Err(TranslateError::Provider(format!(
            "{}: unexpected response shape",
            model_name
        )));
    }
    decode_output(model_name, text)
}

#[async_trait]
impl ModelProvider for HuggingFaceProvider {
    fn name(&self) -> &'static str {
        "huggingface"
    }

    async fn load_model(&self, pair: ModelPair, model_name: &str) -> Result<LoadedModel> {
        let url = format!("{}/api/models/{}", self.hub_url, model_name);
        debug!("Resolving model {} via {}", model_name, url);

        let response = self.authorized(self.client.get(&url)).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(TranslateError::ModelNotFound(model_name.to_string()));
            }
            // anonymous lookups of missing repositories answer 401
            StatusCode::UNAUTHORIZED if self.api_token.is_none() => {
                return Err(TranslateError::ModelNotFound(model_name.to_string()));
            }
            StatusCode::UNAUTHORIZED => {
                error!("Hub rejected the configured API token for {}", model_name);
                return Err(TranslateError::Provider(format!(
                    "hub rejected the API token while resolving {}",
                    model_name
                )));
            }
            status if !status.is_success() => {
                error!("Hub lookup for {} failed: {}", model_name, status);
                return Err(TranslateError::Provider(format!(
                    "hub lookup for {} returned {}",
                    model_name, status
                )));
            }
            _ => {}
        }

        let info: HubModelInfo = response.json().await?;
        Ok(LoadedModel {
            model_name: info.id,
            pair,
            revision: info.sha,
        })
    }

    async fn generate(&self, model: &LoadedModel, text: &str) -> Result<String> {
        let url = format!("{}/models/{}", self.inference_url, model.model_name);
        let body = json!({
            "inputs": text,
            "options": { "wait_for_model": true },
        });

        let response = self
            .authorized(self.client.post(&url).json(&body))
            .send()
            .await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(TranslateError::ModelNotFound(model.model_name.clone()));
        }

        let value: Value = response.json().await?;
        if !status.is_success() && value.get("error").is_none() {
            return Err(TranslateError::Provider(format!(
                "inference for {} returned {}",
                model.model_name, status
            )));
        }
        parse_generation(&model.model_name, &value)
    }

    async fn health_check(&self) -> bool {
        let url = format!("{}/api/models?limit=1", self.hub_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
