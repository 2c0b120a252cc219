//! Process-wide configuration, fixed at startup and read-only thereafter.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

/// Local development origins, always allowed alongside the production origin.
pub const DEV_ORIGINS: &[&str] = &["http://localhost:5173", "http://localhost:3000"];

const DEFAULT_UPLOAD_SUBDIR: &str = "cvg-uploads";

/// Command-line / environment arguments.
#[derive(Parser, Debug)]
#[command(name = "cvg", version, about = "Chat + vision inference gateway")]
pub struct CliArgs {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// API credential for the inference provider (required)
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible endpoint
    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1")]
    pub base_url: String,

    /// Model identifier for the text pipeline
    #[arg(long, env = "TEXT_MODEL", default_value = "gpt-4o-mini")]
    pub text_model: String,

    /// Model identifier for the vision pipeline
    #[arg(long, env = "VISION_MODEL", default_value = "gpt-4o")]
    pub vision_model: String,

    /// Production frontend origin allowed by CORS
    #[arg(long, env = "FRONTEND_ORIGIN")]
    pub frontend_origin: Option<String>,

    /// Directory for temporary upload artifacts
    #[arg(long, env = "UPLOAD_DIR")]
    pub upload_dir: Option<PathBuf>,

    /// Request body size limit in bytes (bounds usable image size)
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = 10 * 1024 * 1024)]
    pub max_upload_bytes: usize,
}

/// Resolved gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub api_key: String,
    pub base_url: String,
    pub text_model: String,
    pub vision_model: String,
    pub allowed_origins: Vec<String>,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl CliArgs {
    /// Resolve arguments into a validated configuration.
    ///
    /// A missing API credential is a fatal startup error, not a runtime one.
    pub fn into_config(self) -> Result<GatewayConfig> {
        let Some(api_key) = self.api_key.filter(|key| !key.is_empty()) else {
            bail!("OPENAI_API_KEY is not set; the gateway cannot call the inference provider");
        };

        let mut allowed_origins: Vec<String> =
            DEV_ORIGINS.iter().map(|origin| origin.to_string()).collect();
        if let Some(origin) = self.frontend_origin {
            if !origin.is_empty() && !allowed_origins.contains(&origin) {
                allowed_origins.push(origin);
            }
        }

        let upload_dir = self
            .upload_dir
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_UPLOAD_SUBDIR));

        Ok(GatewayConfig {
            host: self.host,
            port: self.port,
            api_key,
            base_url: self.base_url,
            text_model: self.text_model,
            vision_model: self.vision_model,
            allowed_origins,
            upload_dir,
            max_upload_bytes: self.max_upload_bytes,
        })
    }
}
