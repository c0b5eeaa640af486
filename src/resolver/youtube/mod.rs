//! YouTube integration
//!
//! Lookups use the public oEmbed endpoint. Searches use the Data API v3,
//! which needs an API key; without one the search pathway is skipped.
//!
//! API docs: https://developers.google.com/youtube/v3/docs/search/list

mod adapter;
mod client;
pub mod dto;

pub use adapter::{first_video, from_oembed};
pub use client::YouTubeClient;
