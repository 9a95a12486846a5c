//! MyGram Feed UI Library
//!
//! Client-side feed pipeline for the MyGram home page: fetches posts from the
//! data layer, renders them into `data-id` keyed markup, and handles likes
//! and comments with optimistic display updates.
//!
//! # Modules
//!
//! - `store`: Data service boundary (`PostStore`) and the in-memory mock backend
//! - `render`: Feed markup, relative timestamps, number formatting
//! - `dom`: The `data-id` addressed document the feed is mounted into
//! - `controller`: Like/comment interactions and the UI event queue
//! - `app`: Application shell (feed loading, create-post modal, event loop)
//! - `models`: Post, Comment and PostDraft
//! - `error`: Error types
//! - `config`: Configuration management
//! - `metrics`: Prometheus counters for loads and interactions

pub mod app;
pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod metrics;
pub mod models;
pub mod render;
pub mod store;

pub use app::{FeedApp, LoadOutcome};
pub use config::Config;
pub use error::{FeedError, Result};
