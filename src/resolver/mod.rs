//! Track resolution engine.
//!
//! Turns a pasted music link into a canonical track plus links to the same
//! track on every supported provider.
//!
//! # Architecture
//!
//! ```text
//! parser ─► primary lookup ─► enricher ─► links ─► share registry
//!              │                 │
//!              └── ProviderApi ──┘   (spotify / apple / youtube clients)
//!                      │
//!                 HttpFetcher (+ token cache for Spotify search)
//! ```
//!
//! Provider failures never fail a resolution; they come back as
//! [`Degraded`] and the provider simply contributes nothing.

pub mod apple;
pub mod domain;
pub mod enricher;
pub mod http;
pub mod links;
pub mod oembed;
pub mod parser;
pub mod service;
pub mod share;
pub mod spotify;
pub mod token;
pub mod traits;
pub mod youtube;

pub use domain::{
    Degraded, Provider, ProviderLink, ResolveError, ResolvedTrack, TrackIdentifier, TrackMetadata,
};
pub use service::{Resolution, ResolverService};
