//! Apple Music integration
//!
//! Uses the public iTunes Search API for both id lookups and keyword
//! searches. No credentials required.
//!
//! API docs: https://performance-partners.apple.com/search-api

mod adapter;
mod client;
pub mod dto;

pub use adapter::{first_song, upscale_artwork};
pub use client::AppleMusicClient;
