// file: src/reddit/client.rs
// description: Reddit OAuth2 client for top-thread and comment retrieval
// reference: https://github.com/reddit-archive/reddit/wiki/OAuth2

use crate::config::RedditConfig;
use crate::error::{PipelineError, Result};
use crate::models::{RankedComment, ThreadBundle};
use crate::reddit::listing::{Node, TokenResponse};
use reqwest::{Client, StatusCode};
use tracing::{debug, info};

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const API_BASE: &str = "https://oauth.reddit.com";

/// Comment pages requested per thread. The forest is flattened client-side,
/// so this only bounds how much Reddit sends back in one response.
const COMMENT_PAGE_LIMIT: u32 = 500;

pub struct RedditClient {
    client: Client,
    access_token: String,
}

impl RedditClient {
    /// Authenticates with the `client_credentials` grant. Invalid credentials
    /// surface as [`PipelineError::Auth`], anything else as
    /// [`PipelineError::Fetch`].
    pub async fn connect(config: &RedditConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| PipelineError::Fetch(format!("Failed to build HTTP client: {}", e)))?;

        debug!("Requesting Reddit access token");

        let response = client
            .post(TOKEN_URL)
            .basic_auth(&config.client_id, Some(&config.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| PipelineError::Fetch(format!("Token request failed: {}", e)))?;

        if response.status() == StatusCode::UNAUTHORIZED
            || response.status() == StatusCode::FORBIDDEN
        {
            return Err(PipelineError::Auth(format!(
                "Reddit rejected the client credentials (status {})",
                response.status()
            )));
        }

        if !response.status().is_success() {
            return Err(PipelineError::Fetch(format!(
                "Token request failed with status {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::Fetch(format!("Malformed token response: {}", e)))?;

        if let Some(error) = token.error {
            return Err(PipelineError::Auth(format!(
                "Token endpoint returned an error: {}",
                error
            )));
        }

        let access_token = token.access_token.ok_or_else(|| {
            PipelineError::Auth("Token response contained no access token".to_string())
        })?;

        info!("Reddit authentication successful");

        Ok(Self {
            client,
            access_token,
        })
    }

    /// Top `count` threads of the past day for `subreddit`, each bundled
    /// with its ranked comments, in Reddit's trending order. Any failure
    /// aborts the whole fetch; no partial thread list is returned.
    pub async fn top_threads(&self, subreddit: &str, count: u32) -> Result<Vec<ThreadBundle>> {
        let url = format!("{}/r/{}/top", API_BASE, subreddit);

        debug!("Fetching top {} threads from r/{}", count, subreddit);

        let count = count.to_string();
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[("t", "day"), ("limit", count.as_str())])
            .send()
            .await
            .map_err(|e| PipelineError::Fetch(format!("Listing request failed: {}", e)))?;

        let response = Self::check_status(response, "listing").await?;

        let listing: Node = response
            .json()
            .await
            .map_err(|e| PipelineError::Fetch(format!("Malformed listing response: {}", e)))?;

        let mut bundles = Vec::new();
        for link in listing.links() {
            let comments = self.thread_comments(&link.id).await?;
            bundles.push(ThreadBundle::new(
                link.title.clone(),
                link.selftext.clone(),
                comments,
            ));
        }

        info!("Fetched {} threads from r/{}", bundles.len(), subreddit);
        Ok(bundles)
    }

    /// Full comment forest for one thread, flattened in retrieval order.
    /// Ranking and truncation happen in [`ThreadBundle::new`].
    async fn thread_comments(&self, thread_id: &str) -> Result<Vec<RankedComment>> {
        let url = format!("{}/comments/{}", API_BASE, thread_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[("limit", COMMENT_PAGE_LIMIT.to_string().as_str())])
            .send()
            .await
            .map_err(|e| PipelineError::Fetch(format!("Comment request failed: {}", e)))?;

        let response = Self::check_status(response, "comments").await?;

        // The endpoint returns two listings: the link itself, then its comments.
        let nodes: Vec<Node> = response
            .json()
            .await
            .map_err(|e| PipelineError::Fetch(format!("Malformed comment response: {}", e)))?;

        let mut comments = Vec::new();
        if let Some(comment_listing) = nodes.get(1) {
            comment_listing.collect_comments(&mut comments);
        }

        debug!("Thread {} has {} comments", thread_id, comments.len());
        Ok(comments)
    }

    async fn check_status(response: reqwest::Response, operation: &str) -> Result<reqwest::Response> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(PipelineError::Auth(format!(
                "Reddit rejected the {} request (status {})",
                operation, status
            )));
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PipelineError::Fetch(format!(
                "Reddit {} request failed with status {}: {}",
                operation, status, body
            )));
        }

        Ok(response)
    }
}
