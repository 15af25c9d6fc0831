use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::error::{TranslateError, ValidationError};
use crate::language::{list_languages, Language, LanguageEntry};
use crate::page::{render_page, Outcome, PageView};
use crate::state::AppState;
use crate::translate::{TranslateRequest, TranslateResponse};

#[derive(Debug, Deserialize)]
pub struct TranslateForm {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiTranslateRequest {
    pub source: String,
    pub target: String,
    pub text: String,
}

impl IntoResponse for TranslateError {
    fn into_response(self) -> Response {
        let status = match &self {
            TranslateError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            TranslateError::LanguageNotFound(_) | TranslateError::ModelNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            TranslateError::Provider(_) => StatusCode::BAD_GATEWAY,
        };
        let body = json!({
            "error": self.kind(),
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

pub async fn index() -> Html<String> {
    Html(render_page(&PageView::default()))
}

pub async fn submit(State(state): State<AppState>, Form(form): Form<TranslateForm>) -> Html<String> {
    let mut view = PageView {
        text: form.text.clone(),
        ..PageView::default()
    };

    let languages = Language::from_display_name(&form.source)
        .and_then(|source| Language::from_display_name(&form.target).map(|target| (source, target)));
    let (source, target) = match languages {
        Ok(pair) => pair,
        Err(e) => {
            warn!("Rejected form submission: {}", e);
            view.outcome = Some(Outcome::Error(e.to_string()));
            return Html(render_page(&view));
        }
    };
    view.source = source;
    view.target = target;

    let outcome = match TranslateRequest::new(source, target, form.text) {
        Err(TranslateError::Validation(ValidationError::EmptyText)) => {
            Outcome::Warning(ValidationError::EmptyText.to_string())
        }
        Err(e) => Outcome::Error(e.to_string()),
        Ok(request) => match state.invoker.translate_request(&request).await {
            Ok(response) => Outcome::Success {
                target,
                text: response.translated_text,
            },
            Err(e) => {
                error!("Error in translation: {}", e);
                Outcome::Error(format!("Error in translation: {}", e))
            }
        },
    };
    view.outcome = Some(outcome);
    Html(render_page(&view))
}

pub async fn languages() -> Json<&'static [LanguageEntry]> {
    Json(list_languages())
}

pub async fn translate(
    State(state): State<AppState>,
    Json(payload): Json<ApiTranslateRequest>,
) -> Result<Json<TranslateResponse>, TranslateError> {
    let source = Language::resolve(&payload.source)?;
    let target = Language::resolve(&payload.target)?;
    let request = TranslateRequest::new(source, target, payload.text)?;
    let response = state.invoker.translate_request(&request).await?;
    Ok(Json(response))
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let provider = state.invoker.provider();
    let healthy = provider.health_check().await;
    Json(json!({
        "status": "ok",
        "provider": provider.name(),
        "provider_healthy": healthy,
    }))
}
