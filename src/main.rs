use std::sync::Arc;

use anyhow::Context;

use llm_spellcheck::{
    AppConfig, OllamaClient, ResultCache, SpellcheckServer, SpellcheckService, TextGenerator,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log_guard = llm_spellcheck::core::logging::init(&AppConfig::log_dir());
    log::info!("{} v{} starting", llm_spellcheck::NAME, llm_spellcheck::VERSION);

    let config = AppConfig::load();

    let client = OllamaClient::from_config(&config.ollama)
        .context("failed to build model service client")?;
    log::info!(
        "Model service: {} at {} (default model {})",
        client.name(),
        client.base_url(),
        config.ollama.default_model
    );

    let service = Arc::new(SpellcheckService::new(
        Arc::new(client),
        Arc::new(ResultCache::new(config.cache.clone())),
        config.ollama.default_model.clone(),
        config.spellcheck.max_chunk_chars,
    ));

    let addr = config
        .server
        .socket_addr()
        .with_context(|| format!("invalid listen address {}:{}", config.server.host, config.server.port))?;

    SpellcheckServer::new(addr, service)
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for ctrl-c: {}", e);
            }
        })
        .await
        .context("spellcheck service failed")?;

    Ok(())
}
