use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::app::App;
use crate::catalog::Catalog;
use crate::config;

/// Pick the catalog: the CLI path wins over `catalog.path`; anything
/// unreadable falls back to the built-in catalog. Also returns a label
/// describing where the catalog came from.
pub fn load_catalog(
    cli_path: Option<&Path>,
    settings: &config::CatalogSettings,
) -> (Catalog, String) {
    let Some(path) = cli_path.or(settings.path.as_deref()) else {
        return (Catalog::builtin(), "built-in catalog".to_string());
    };

    match Catalog::load(path) {
        Ok(catalog) => {
            info!(path = %path.display(), "catalog loaded");
            (catalog, path.display().to_string())
        }
        Err(e) => {
            eprintln!("nada: {e} ({}), using the built-in catalog", path.display());
            warn!(path = %path.display(), error = %e, "catalog fallback");
            (Catalog::builtin(), "built-in catalog".to_string())
        }
    }
}

/// Build the page model with the configured startup defaults.
pub fn build_app(
    catalog: Catalog,
    source: String,
    settings: &config::Settings,
    now: Instant,
) -> App {
    let mut app = App::new(catalog);
    app.theme = settings.ui.theme.into();
    app.volume = settings.player.start_volume.min(100);
    app.set_catalog_source(source);

    if settings.ui.loading_fade_ms > 0 {
        app.start_loading(now + Duration::from_millis(settings.ui.loading_fade_ms));
    }
    app
}
