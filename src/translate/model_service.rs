use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::interface::{decode_output, LoadedModel, ModelPair, ModelProvider};
use crate::error::{Result, TranslateError};

/// Client for a sidecar model server that hosts the translation models.
#[derive(Debug, Clone)]
pub struct ModelServiceClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoadRequest {
    pub model_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoadResponse {
    pub success: bool,
    #[serde(default)]
    pub revision: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model_name: String,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub translated_text: Option<String>,
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl ModelServiceClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn request_load(&self, request: &LoadRequest) -> Result<LoadResponse> {
        let url = format!("{}/translate/load", self.base_url);
        let response = self.client.post(&url).json(request).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(TranslateError::ModelNotFound(request.model_name.clone()));
        }
        Ok(response.json().await?)
    }

    pub async fn request_generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let url = format!("{}/translate/generate", self.base_url);
        let response = self.client.post(&url).json(request).send().await?;
        Ok(response.json().await?)
    }

    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        Ok(response.status().is_success())
    }
}

#[async_trait]
impl ModelProvider for ModelServiceClient {
    fn name(&self) -> &'static str {
        "model_service"
    }

    async fn load_model(&self, pair: ModelPair, model_name: &str) -> Result<LoadedModel> {
        debug!("Requesting model service to load {}", model_name);
        let response = self
            .request_load(&LoadRequest {
                model_name: model_name.to_string(),
            })
            .await?;

        if response.success {
            Ok(LoadedModel {
                model_name: model_name.to_string(),
                pair,
                revision: response.revision,
            })
        } else {
            let error_msg = response.error.unwrap_or_else(|| "Unknown error".to_string());
            error!("Model service failed to load {}: {}", model_name, error_msg);
            Err(TranslateError::Provider(format!(
                "{} failed to load: {}",
                model_name, error_msg
            )))
        }
    }

    async fn generate(&self, model: &LoadedModel, text: &str) -> Result<String> {
        let response = self
            .request_generate(&GenerateRequest {
                model_name: model.model_name.clone(),
                text: text.to_string(),
            })
            .await?;

        if response.success {
            decode_output(&model.model_name, response.translated_text)
        } else {
            let error_msg = response.error.unwrap_or_else(|| "Unknown error".to_string());
            error!("Generation with {} failed: {}", model.model_name, error_msg);
            Err(TranslateError::Provider(error_msg))
        }
    }

    async fn health_check(&self) -> bool {
        self.health().await.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use crate::language::Language;
    use crate::translate::invoker::testing::spawn_stub;

    const MODEL: &str = "Helsinki-NLP/opus-mt-en-fr";

    fn en_fr() -> ModelPair {
        ModelPair::new(Language::English, Language::French).unwrap()
    }

    fn loaded_en_fr() -> LoadedModel {
        LoadedModel {
            model_name: MODEL.to_string(),
            pair: en_fr(),
            revision: None,
        }
    }

    fn service_answering(path: &'static str, status: AxumStatus, body: Value) -> Router {
        Router::new().route(path, post(move || async move { (status, Json(body)) }))
    }

    #[tokio::test]
    async fn load_returns_revision() {
        let base = spawn_stub(service_answering(
            "/translate/load",
            AxumStatus::OK,
            json!({ "success": true, "revision": "v2" }),
        ))
        .await;
        let model = ModelServiceClient::new(base).load_model(en_fr(), MODEL).await.unwrap();
        assert_eq!(model.model_name, MODEL);
        assert_eq!(model.revision.as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn load_http_not_found_is_model_not_found() {
        let base = spawn_stub(service_answering(
            "/translate/load",
            AxumStatus::NOT_FOUND,
            json!({ "success": false }),
        ))
        .await;
        let err = ModelServiceClient::new(base).load_model(en_fr(), MODEL).await.unwrap_err();
        assert!(matches!(err, TranslateError::ModelNotFound(ref name) if name == MODEL));
    }

    #[tokio::test]
    async fn load_failure_reply_is_provider_error() {
        let base = spawn_stub(service_answering(
            "/translate/load",
            AxumStatus::OK,
            json!({ "success": false, "error": "CUDA out of memory" }),
        ))
        .await;
        let err = ModelServiceClient::new(base).load_model(en_fr(), MODEL).await.unwrap_err();
        assert_eq!(err.kind(), "provider");
        assert!(err.to_string().contains("CUDA out of memory"));
    }

    #[tokio::test]
    async fn generate_echoes_request_and_trims() {
        let router = Router::new().route(
            "/translate/generate",
            post(|Json(request): Json<GenerateRequest>| async move {
                Json(json!({
                    "success": true,
                    "translated_text": format!("  {}:{}\n", request.model_name, request.text),
                }))
            }),
        );
        let base = spawn_stub(router).await;
        let text = ModelServiceClient::new(base)
            .generate(&loaded_en_fr(), "Hello")
            .await
            .unwrap();
        assert_eq!(text, format!("{}:Hello", MODEL));
    }

    #[tokio::test]
    async fn generate_failure_reply_is_provider_error() {
        let base = spawn_stub(service_answering(
            "/translate/generate",
            AxumStatus::OK,
            json!({ "success": false, "error": "tokenizer crashed" }),
        ))
        .await;
        let err = ModelServiceClient::new(base)
            .generate(&loaded_en_fr(), "Hello")
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::Provider(ref msg) if msg == "tokenizer crashed"));
    }

    #[tokio::test]
    async fn health_follows_service_status() {
        let router = Router::new().route("/health", get(|| async { "ok" }));
        let base = spawn_stub(router).await;
        assert!(ModelServiceClient::new(base).health_check().await);

        let base = spawn_stub(Router::new()).await;
        assert!(!ModelServiceClient::new(base).health_check().await);
    }

    #[test]
    fn generate_response_tolerates_missing_fields() {
        let parsed: GenerateResponse =
            serde_json::from_str(r#"{"success": false, "error": "CUDA out of memory"}"#).unwrap();
        assert!(!parsed.success);
        assert!(parsed.translated_text.is_none());
        assert_eq!(parsed.error.as_deref(), Some("CUDA out of memory"));
    }

    #[test]
    fn load_request_wire_format() {
        let body = serde_json::to_value(LoadRequest {
            model_name: "Helsinki-NLP/opus-mt-en-de".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"model_name": "Helsinki-NLP/opus-mt-en-de"}));
    }
}
