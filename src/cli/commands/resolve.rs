//! One-shot resolution and link parsing commands.

use tokio::runtime::Runtime;

use crate::config::Config;
use crate::resolver::{Resolution, ResolverService, parser};

/// Resolve a single link and print the result
pub fn cmd_resolve(rt: &Runtime, config: Config, url: &str, json: bool) -> anyhow::Result<()> {
    rt.block_on(async {
        let service = ResolverService::from_config(&config)?;

        match service.resolve_url(url).await {
            Ok(resolution) => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&to_json(&resolution))?);
                } else {
                    print!("{}", format_resolution(&resolution));
                }
                Ok(())
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    })
}

/// Show how a link parses, without touching the network
pub fn cmd_parse(url: &str) -> anyhow::Result<()> {
    match parser::parse(url) {
        Some(id) => {
            println!("Provider:      {}", id.provider.display_name());
            println!("Track id:      {}", id.provider_track_id);
            println!("Canonical key: {}", id.canonical_key());
            println!("Track URL:     {}", id.track_url());
            Ok(())
        }
        None => {
            eprintln!("Unsupported URL format: {}", url);
            std::process::exit(1);
        }
    }
}

fn to_json(resolution: &Resolution) -> serde_json::Value {
    serde_json::json!({
        "shortId": resolution.short_id,
        "shortUrl": resolution.short_url,
        "sourceUrl": resolution.source_url,
        "track": &*resolution.track,
    })
}

fn format_resolution(resolution: &Resolution) -> String {
    let track = &resolution.track;
    let mut out = String::new();

    out.push_str(&format!("{} - {}\n", track.artist, track.title));
    out.push_str(&format!("  Key:     {}\n", track.canonical_key));
    if let Some(artwork) = &track.artwork_url {
        out.push_str(&format!("  Artwork: {}\n", artwork));
    }
    out.push_str(&format!("  Share:   {}\n\n", resolution.short_url));

    for link in &track.providers {
        match (&link.deep_link, &link.fallback_search_link) {
            (Some(deep), _) => {
                out.push_str(&format!("  ✓ {:<12} {}\n", link.display_name, deep));
            }
            (None, Some(search)) => {
                out.push_str(&format!("  ? {:<12} {}\n", link.display_name, search));
            }
            (None, None) => {}
        }
    }

    out
}
