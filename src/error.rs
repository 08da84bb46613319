use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShoplistError {
    #[error(
        "Backend not configured.\n\nSet server_url and app_id in [backend] of ~/.config/shoplist/config.toml,\nexport SHOPLIST_SERVER_URL and SHOPLIST_APP_ID, or run with --offline."
    )]
    BackendNotConfigured,

    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
