//! Server configuration.
//!
//! Resolved once at startup from command line flags, falling back to
//! environment variables (a `.env` file is loaded first by `main`).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use slovo_protocol::Lexicon;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Russian sentence analysis server")]
pub struct Config {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Without a key the server answers with rule-based analysis only
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-call timeout for the generative service
    #[arg(long, env = "SLOVO_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Sentences processed at the same time
    #[arg(long, env = "SLOVO_CONCURRENCY", default_value_t = 4)]
    pub concurrency: usize,

    /// Compiled lexicon (`slovo compile`); the builtin one when omitted
    #[arg(long, env = "SLOVO_LEXICON")]
    pub lexicon: Option<PathBuf>,
}

impl Config {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The API key, unless it is missing or blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
    }

    pub fn load_lexicon(&self) -> anyhow::Result<Lexicon> {
        let Some(path) = &self.lexicon else {
            return Ok(Lexicon::builtin());
        };
        let bytes =
            std::fs::read(path).with_context(|| format!("reading lexicon {}", path.display()))?;
        Lexicon::from_bytes(&bytes).with_context(|| format!("loading lexicon {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let config = Config::try_parse_from([
            "slovo-server",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--api-key",
            "  ",
            "--concurrency",
            "2",
        ])
        .unwrap();

        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.concurrency, 2);
        // Blank keys count as missing
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_missing_lexicon_file_is_an_error() {
        let config = Config::try_parse_from([
            "slovo-server",
            "--lexicon",
            "/nonexistent/slovo/lexicon.rkyv",
        ])
        .unwrap();
        assert!(config.load_lexicon().is_err());
    }
}
