use std::env;
use std::fs;
use std::path::Path;

use docchat_ai::config::RagConfig;
use docchat_ai::gemini;
use docchat_core::error::AppError;
use serde::Deserialize;

pub const DEFAULT_QDRANT_URL: &str = "http://127.0.0.1:6333";
pub const DEFAULT_DOCUMENT: &str = "resume.pdf";
const CONFIG_FILE_NAME: &str = "docchat.toml";

/// Optional on-disk overrides; every field falls back to an env var and
/// then to a built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    qdrant_url: Option<String>,
    qdrant_api_key: Option<String>,
    gemini_base_url: Option<String>,
    gemini_api_key: Option<String>,
    collection: Option<String>,
    embed_model: Option<String>,
    gen_model: Option<String>,
    vector_dims: Option<u32>,
    top_k: Option<u32>,
    default_document: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub qdrant_url: String,
    pub qdrant_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_api_key: Option<String>,
    pub default_document: String,
    pub rag: RagConfig,
}

impl AppConfig {
    /// Precedence: env var, then config file, then default. An explicitly
    /// passed config path must exist; the implicit ./docchat.toml may not.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let file = match path {
            Some(p) => read_file_config(p)?,
            None => {
                let p = Path::new(CONFIG_FILE_NAME);
                if p.exists() {
                    read_file_config(p)?
                } else {
                    FileConfig::default()
                }
            }
        };

        let defaults = RagConfig::default();
        let rag = RagConfig {
            collection: pick(
                env_string("DOCCHAT_COLLECTION"),
                file.collection,
                defaults.collection,
            ),
            embed_model: pick(
                env_string("DOCCHAT_EMBED_MODEL"),
                file.embed_model,
                defaults.embed_model,
            ),
            gen_model: pick(
                env_string("DOCCHAT_GEN_MODEL"),
                file.gen_model,
                defaults.gen_model,
            ),
            vector_dims: pick(
                env_u32("DOCCHAT_VECTOR_DIMS")?,
                file.vector_dims,
                defaults.vector_dims,
            ),
            top_k: pick(env_u32("DOCCHAT_TOP_K")?, file.top_k, defaults.top_k),
            chunking: defaults.chunking,
        };

        Ok(Self {
            qdrant_url: pick(
                env_string("DOCCHAT_QDRANT_URL"),
                file.qdrant_url,
                DEFAULT_QDRANT_URL.to_string(),
            ),
            qdrant_api_key: env_string("DOCCHAT_QDRANT_API_KEY").or(file.qdrant_api_key),
            gemini_base_url: pick(
                env_string("DOCCHAT_GEMINI_BASE_URL"),
                file.gemini_base_url,
                gemini::DEFAULT_BASE_URL.to_string(),
            ),
            gemini_api_key: env_string("GEMINI_API_KEY").or(file.gemini_api_key),
            default_document: pick(
                env_string("DOCCHAT_DEFAULT_DOCUMENT"),
                file.default_document,
                DEFAULT_DOCUMENT.to_string(),
            ),
            rag,
        })
    }

    pub fn require_gemini_key(&self) -> Result<&str, AppError> {
        self.gemini_api_key.as_deref().ok_or_else(|| {
            AppError::new(
                "CONFIG_INVALID",
                "Gemini API key is required (set GEMINI_API_KEY or gemini_api_key in docchat.toml)",
            )
        })
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, AppError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        AppError::new("CONFIG_INVALID", "Failed to read config file")
            .with_details(format!("path={}; err={}", path.display(), e))
    })?;
    toml::from_str(&raw).map_err(|e| {
        AppError::new("CONFIG_INVALID", "Failed to parse config file")
            .with_details(format!("path={}; err={}", path.display(), e))
    })
}

fn pick<T>(from_env: Option<T>, from_file: Option<T>, default: T) -> T {
    from_env.or(from_file).unwrap_or(default)
}

fn env_string(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_u32(key: &str) -> Result<Option<u32>, AppError> {
    match env_string(key) {
        Some(raw) => raw.parse().map(Some).map_err(|e| {
            AppError::new("CONFIG_INVALID", "Expected a positive integer")
                .with_details(format!("var={key}; value={raw}; err={e}"))
        }),
        None => Ok(None),
    }
}
