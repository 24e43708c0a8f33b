// file: src/utils/validation.rs
// description: data validation utilities and helpers
// reference: input validation patterns

use crate::config::Config;
use crate::error::{PipelineError, Result};

pub struct Validator;

impl Validator {
    /// Credentials the fetch stage needs. None of these are persisted.
    pub fn require_reddit_credentials(config: &Config) -> Result<()> {
        if config.reddit.client_id.trim().is_empty() {
            return Err(PipelineError::Validation(
                "Reddit client id is missing".to_string(),
            ));
        }

        if config.reddit.client_secret.trim().is_empty() {
            return Err(PipelineError::Validation(
                "Reddit client secret is missing".to_string(),
            ));
        }

        if config.reddit.user_agent.trim().is_empty() {
            return Err(PipelineError::Validation(
                "Reddit user agent is missing".to_string(),
            ));
        }

        Ok(())
    }

    pub fn require_gemini_key(config: &Config) -> Result<()> {
        if config.gemini.api_key.trim().is_empty() {
            return Err(PipelineError::Validation(
                "Gemini API key is missing".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_subreddit_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(PipelineError::Validation(
                "Subreddit name must not be empty".to_string(),
            ));
        }

        if name.contains(char::is_whitespace) {
            return Err(PipelineError::Validation(format!(
                "Subreddit name must not contain whitespace: {}",
                name
            )));
        }

        Ok(())
    }

    pub fn truncate_text(text: &str, max_length: usize) -> String {
        if text.len() <= max_length {
            text.to_string()
        } else {
            let mut end = max_length;
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}...", &text[..end])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_reddit_credentials() {
        let mut config = Config::default_config();
        assert!(Validator::require_reddit_credentials(&config).is_err());

        config.reddit.client_id = "id".to_string();
        config.reddit.client_secret = "secret".to_string();
        assert!(Validator::require_reddit_credentials(&config).is_ok());

        config.reddit.user_agent = "  ".to_string();
        assert!(Validator::require_reddit_credentials(&config).is_err());
    }

    #[test]
    fn test_require_gemini_key() {
        let mut config = Config::default_config();
        assert!(Validator::require_gemini_key(&config).is_err());

        config.gemini.api_key = "key".to_string();
        assert!(Validator::require_gemini_key(&config).is_ok());
    }

    #[test]
    fn test_validate_subreddit_name() {
        assert!(Validator::validate_subreddit_name("rust").is_ok());
        assert!(Validator::validate_subreddit_name("").is_err());
        assert!(Validator::validate_subreddit_name("two words").is_err());
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(Validator::truncate_text("short", 10), "short");
        assert_eq!(
            Validator::truncate_text("this is a very long text", 10),
            "this is a ..."
        );
    }

    #[test]
    fn test_truncate_text_multibyte() {
        let truncated = Validator::truncate_text("héllo wörld", 6);
        assert!(truncated.ends_with("..."));
    }
}
