use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::ImageStore;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub images: ImageStore,
}

/// 准备服务器启动的上下文
/// 包括存储（含迁移）与图片目录
pub async fn prepare_server_startup() -> Result<StartupContext> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    let config = AppConfig::get();

    let storage = crate::storage::create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    let images = ImageStore::from_config(&config.upload);
    images.ensure_root().await?;
    warn!("Image web root ready at {}", images.root().display());

    Ok(StartupContext { storage, images })
}
