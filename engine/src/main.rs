// Engine main entry point
use engine::config::EngineSettings;
use engine::data::ThemeLoader;
use engine::registry::{SharedRegistry, ThemeRegistry};
use engine::services::theme_service::MyThemeEngine;
use engine::services::ThemeEngineServer;
use std::net::ToSocketAddrs;
use std::path::Path;
use std::sync::Arc;
use tonic::transport::Server;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    info!("Starting chart theme engine...");

    // Optional settings file as the first argument
    let settings = match std::env::args().nth(1) {
        Some(path) => EngineSettings::load(Path::new(&path))?,
        None => EngineSettings::default(),
    };
    let addr = settings
        .listen_addr()
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| format!("Cannot resolve listen address '{}'", settings.listen_addr()))?;

    let mut registry = ThemeRegistry::with_builtin_themes()?;
    if let Some(dir) = &settings.themes_dir {
        let summary = ThemeLoader::register_dir(&mut registry, dir)?;
        if !summary.is_clean() {
            warn!(rejected = summary.rejected.len(), "Some theme files were rejected");
        }
    }
    if let Some(store) = settings.theme_store() {
        store.restore_or_warn(&mut registry);
    }
    if !registry.contains(&settings.default_theme) {
        warn!(theme = %settings.default_theme, "Default theme is not registered");
    }
    info!(themes = registry.len(), "Theme registry ready");

    let registry = Arc::new(SharedRegistry::new(registry));
    let theme_engine = MyThemeEngine::from_settings(registry, &settings);

    info!("Engine will listen on {}", addr);
    Server::builder()
        .add_service(ThemeEngineServer::new(theme_engine))
        .serve(addr)
        .await?;

    Ok(())
}
