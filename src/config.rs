// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const MIN_POST_COUNT: u32 = 1;
pub const MAX_POST_COUNT: u32 = 100;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub reddit: RedditConfig,
    pub gemini: GeminiConfig,
    pub scrape: ScrapeConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedditConfig {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScrapeConfig {
    pub subreddit: String,
    pub post_count: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub xlsx_path: PathBuf,
    pub csv_path: Option<PathBuf>,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("REDDIT_QA")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            reddit: RedditConfig {
                client_id: String::new(),
                client_secret: String::new(),
                user_agent: "reddit_qa/0.1 (by /u/example)".to_string(),
            },
            gemini: GeminiConfig {
                api_key: String::new(),
                model: "gemini-1.5-flash".to_string(),
            },
            scrape: ScrapeConfig {
                subreddit: "python".to_string(),
                post_count: 10,
            },
            output: OutputConfig {
                xlsx_path: PathBuf::from("reddit_qa.xlsx"),
                csv_path: None,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.scrape.subreddit.trim().is_empty() {
            return Err(PipelineError::Config(
                "scrape.subreddit must not be empty".to_string(),
            ));
        }

        if !(MIN_POST_COUNT..=MAX_POST_COUNT).contains(&self.scrape.post_count) {
            return Err(PipelineError::Config(format!(
                "scrape.post_count must be between {} and {}",
                MIN_POST_COUNT, MAX_POST_COUNT
            )));
        }

        if self.gemini.model.trim().is_empty() {
            return Err(PipelineError::Config(
                "gemini.model must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Subreddit name with any leading "r/" or "/r/" stripped.
    pub fn subreddit_name(&self) -> &str {
        let name = self.scrape.subreddit.trim();
        let name = name.strip_prefix('/').unwrap_or(name);
        name.strip_prefix("r/").unwrap_or(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.scrape.post_count, 10);
        assert_eq!(config.gemini.model, "gemini-1.5-flash");
    }

    #[test]
    fn test_rejects_empty_subreddit() {
        let mut config = Config::default_config();
        config.scrape.subreddit = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_post_count_out_of_range() {
        let mut config = Config::default_config();
        config.scrape.post_count = 0;
        assert!(config.validate().is_err());
        config.scrape.post_count = 101;
        assert!(config.validate().is_err());
        config.scrape.post_count = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_subreddit_name_strips_prefix() {
        let mut config = Config::default_config();
        config.scrape.subreddit = "r/rust".to_string();
        assert_eq!(config.subreddit_name(), "rust");
        config.scrape.subreddit = "/r/rust".to_string();
        assert_eq!(config.subreddit_name(), "rust");
        config.scrape.subreddit = "rust".to_string();
        assert_eq!(config.subreddit_name(), "rust");
    }
}
