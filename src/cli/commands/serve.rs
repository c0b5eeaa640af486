//! HTTP server command.

use std::sync::Arc;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::resolver::ResolverService;
use crate::server;

/// Run the HTTP server until interrupted
pub fn cmd_serve(rt: &Runtime, config: Config) -> anyhow::Result<()> {
    rt.block_on(async {
        let resolver = Arc::new(ResolverService::from_config(&config)?);
        tracing::info!(public_url = %config.server.public_url, "Resolver ready");
        server::serve(resolver, &config.server.bind).await?;
        Ok(())
    })
}
