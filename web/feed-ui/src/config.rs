//! Configuration management for the feed UI
//!
//! Loads configuration from environment variables. The binary calls
//! `dotenvy::dotenv()` first so a local `.env` file is honored.

use crate::error::{FeedError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_VIEWER_AVATAR_URL: &str =
    "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=100&h=100&fit=crop&crop=face";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Simulated data layer settings
    pub store: StoreConfig,
    /// Identity used for created posts and comments
    pub viewer: ViewerConfig,
    /// Feed rendering and interaction settings
    pub feed: FeedConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Delay applied to every `list()` call
    pub fetch_latency_ms: u64,
    /// Delay applied to every mutation
    pub mutation_latency_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    pub username: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Number of trailing comments shown under each post
    pub comment_preview: usize,
    pub comment_refresh: CommentRefresh,
    pub event_queue_capacity: usize,
}

/// What happens to the displayed comment list after a comment is submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommentRefresh {
    /// Store is updated, the rendered comment block is left untouched
    DataOnly,
    /// Store is updated and the comment block is re-rendered from it
    RefreshDisplay,
}

impl FromStr for CommentRefresh {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "data-only" | "data_only" => Ok(CommentRefresh::DataOnly),
            "refresh" | "refresh-display" | "refresh_display" => Ok(CommentRefresh::RefreshDisplay),
            other => Err(FeedError::Config(format!(
                "unknown comment refresh policy '{}'",
                other
            ))),
        }
    }
}

impl StoreConfig {
    pub fn fetch_latency(&self) -> Duration {
        Duration::from_millis(self.fetch_latency_ms)
    }

    pub fn mutation_latency(&self) -> Duration {
        Duration::from_millis(self.mutation_latency_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app: AppConfig {
                env: "development".to_string(),
            },
            store: StoreConfig {
                fetch_latency_ms: default_fetch_latency_ms(),
                mutation_latency_ms: 0,
            },
            viewer: ViewerConfig {
                username: "you".to_string(),
                avatar_url: DEFAULT_VIEWER_AVATAR_URL.to_string(),
            },
            feed: FeedConfig {
                comment_preview: default_comment_preview(),
                comment_refresh: CommentRefresh::RefreshDisplay,
                event_queue_capacity: default_event_queue_capacity(),
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let viewer_username =
            std::env::var("FEED_VIEWER_USERNAME").unwrap_or_else(|_| "you".to_string());
        if app_env.eq_ignore_ascii_case("production") && viewer_username.trim().is_empty() {
            return Err(FeedError::Config(
                "FEED_VIEWER_USERNAME must not be empty in production".to_string(),
            ));
        }

        let comment_refresh = match std::env::var("FEED_COMMENT_REFRESH") {
            Ok(raw) => raw.parse()?,
            Err(_) => CommentRefresh::RefreshDisplay,
        };

        Ok(Config {
            app: AppConfig { env: app_env },
            store: StoreConfig {
                fetch_latency_ms: parse_env_or_default(
                    "FEED_FETCH_LATENCY_MS",
                    default_fetch_latency_ms(),
                )?,
                mutation_latency_ms: parse_env_or_default("FEED_MUTATION_LATENCY_MS", 0)?,
            },
            viewer: ViewerConfig {
                username: viewer_username,
                avatar_url: std::env::var("FEED_VIEWER_AVATAR_URL")
                    .unwrap_or_else(|_| DEFAULT_VIEWER_AVATAR_URL.to_string()),
            },
            feed: FeedConfig {
                comment_preview: parse_env_or_default(
                    "FEED_COMMENT_PREVIEW",
                    default_comment_preview(),
                )?,
                comment_refresh,
                event_queue_capacity: parse_env_or_default(
                    "FEED_EVENT_QUEUE_CAPACITY",
                    default_event_queue_capacity(),
                )?
                .max(1),
            },
        })
    }
}

fn parse_env_or_default<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse()
            .map_err(|e| FeedError::Config(format!("Failed to parse {}='{}': {}", key, val, e))),
        Err(_) => Ok(default),
    }
}

fn default_fetch_latency_ms() -> u64 {
    1_000
}

fn default_comment_preview() -> usize {
    2
}

fn default_event_queue_capacity() -> usize {
    64
}
