use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system_config: SystemConfig,
    #[serde(default)]
    pub translator_config: TranslatorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_static_dir() -> String {
    "static".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Huggingface,
    ModelService,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    #[serde(default = "default_provider")]
    pub provider: ProviderKind,
    #[serde(default = "default_model_namespace")]
    pub model_namespace: String,
    #[serde(default = "default_model_family")]
    pub model_family: String,
    #[serde(default)]
    pub huggingface: HuggingFaceConfig,
    #[serde(default)]
    pub model_service: ModelServiceConfig,
}

fn default_provider() -> ProviderKind {
    ProviderKind::Huggingface
}

fn default_model_namespace() -> String {
    "Helsinki-NLP".to_string()
}

fn default_model_family() -> String {
    "opus-mt".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuggingFaceConfig {
    #[serde(default = "default_hub_url")]
    pub hub_url: String,
    #[serde(default = "default_inference_url")]
    pub inference_url: String,
    #[serde(default)]
    pub api_token: Option<String>,
}

fn default_hub_url() -> String {
    "https://huggingface.co".to_string()
}

fn default_inference_url() -> String {
    "https://api-inference.huggingface.co".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelServiceConfig {
    #[serde(default = "default_model_service_url")]
    pub base_url: String,
}

fn default_model_service_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model_namespace: default_model_namespace(),
            model_family: default_model_family(),
            huggingface: HuggingFaceConfig::default(),
            model_service: ModelServiceConfig::default(),
        }
    }
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            hub_url: default_hub_url(),
            inference_url: default_inference_url(),
            api_token: None,
        }
    }
}

impl Default for ModelServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_model_service_url(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            anyhow::bail!("Configuration file not found: {}", path);
        }

        let content = substitute_env_vars(&load_text_file(path)?);

        // Determine file type by extension
        let path_lower = path.to_lowercase();
        let mut config: Config = if path_lower.ends_with(".json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Defaults plus environment overrides, for running without a config file.
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    fn apply_env_overrides(&mut self) {
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            self.system_config.port = port;
        }

        let hf = &mut self.translator_config.huggingface;
        // Leftover ${VAR} placeholders mean the variable was unset
        if hf
            .api_token
            .as_deref()
            .map_or(true, |t| t.is_empty() || t.starts_with("${"))
        {
            hf.api_token = std::env::var("HF_API_TOKEN").ok().filter(|t| !t.is_empty());
        }
    }

    /// Candidate config file locations, in lookup order.
    pub fn search_paths() -> Vec<PathBuf> {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));

        vec![
            std::env::var("CONFIG_PATH").ok().map(PathBuf::from),
            Some(PathBuf::from("conf.yaml")),
            Some(PathBuf::from("conf.json")),
            Some(exe_dir.join("conf.yaml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load the first of `paths` that exists.
    ///
    /// Missing files are skipped; a file that exists but fails to load is an error.
    pub fn load_first_existing(paths: &[PathBuf]) -> Result<Option<(PathBuf, Config)>> {
        for path in paths {
            if !path.exists() {
                debug!("No configuration at {}", path.display());
                continue;
            }
            let path_str = path.to_string_lossy();
            let config = Config::load(&path_str)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            return Ok(Some((path.clone(), config)));
        }
        Ok(None)
    }
}

/// Replace `${VAR_NAME}` with the variable's value, leaving unknown ones untouched.
pub fn substitute_env_vars(content: &str) -> String {
    let pattern = Regex::new(r"\$\{(\w+)\}").expect("valid placeholder regex");
    pattern
        .replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

/// Read a text file as UTF-8 (BOM stripped), falling back to GBK.
pub fn load_text_file(file_path: &str) -> Result<String> {
    let mut bytes = fs::read(file_path)?;
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        bytes.drain(0..3);
    }

    match String::from_utf8(bytes) {
        Ok(content) => Ok(content),
        Err(err) => {
            let (cow, _, _) = encoding_rs::GBK.decode(err.as_bytes());
            Ok(cow.into_owned())
        }
    }
}
