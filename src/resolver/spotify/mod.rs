//! Spotify integration
//!
//! Primary lookups use the public oEmbed endpoint (no credentials).
//! Searches use the Web API with a client-credential token.
//!
//! API docs: https://developer.spotify.com/documentation/web-api

mod adapter;
mod client;
pub mod dto;

pub use adapter::{first_hit, from_oembed};
pub use client::SpotifyClient;
