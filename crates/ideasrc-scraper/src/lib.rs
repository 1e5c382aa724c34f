//! Hacker News collection over the public Firebase API.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::{HackerNewsClient, DEFAULT_HN_API_BASE_URL};
pub use error::ScraperError;
pub use normalize::item_to_record;
pub use types::{HnFeed, HnItem};
