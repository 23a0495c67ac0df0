//! 头像图片存储
//!
//! 图片直接写在可被 Web 访问的根目录下，实体只保存相对路径（即文件名）。

use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::UploadConfig;
use crate::errors::{Result, SchoolError};
use crate::models::ImageUpload;
use crate::utils::validate_magic_bytes;

// 文件名主干的最大长度
const MAX_STEM_LEN: usize = 50;

#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
    max_size: usize,
    allowed_types: Vec<String>,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>, max_size: usize, allowed_types: Vec<String>) -> Self {
        Self {
            root: root.into(),
            max_size,
            allowed_types: allowed_types.iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(
            &config.web_root,
            config.max_size,
            config.allowed_types.clone(),
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// 确保根目录存在
    pub async fn ensure_root(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            SchoolError::file_operation(format!(
                "创建图片目录 {} 失败: {e}",
                self.root.display()
            ))
        })
    }

    /// 校验上传的图片，返回面向用户的错误信息
    pub fn check(&self, upload: &ImageUpload) -> std::result::Result<(), String> {
        let extension = extension_of(&upload.file_name);
        if extension.is_empty() || !self.allowed_types.contains(&extension) {
            return Err(format!(
                "Image type not allowed, expected one of: {}",
                self.allowed_types.join(", ")
            ));
        }
        if upload.data.is_empty() {
            return Err("Image file is empty".to_string());
        }
        if upload.size() > self.max_size {
            return Err(format!(
                "Image exceeds the size limit of {} bytes",
                self.max_size
            ));
        }
        if !validate_magic_bytes(&upload.data, &extension) {
            return Err("Image content does not match its extension".to_string());
        }
        Ok(())
    }

    /// 生成存储文件名：`<主干>_<uuid><扩展名>`
    pub fn generate_file_name(original: &str) -> String {
        let stem: String = Path::new(original)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .take(MAX_STEM_LEN)
            .collect();
        let stem = if stem.is_empty() { "image".to_string() } else { stem };

        format!(
            "{}_{}{}",
            stem,
            Uuid::new_v4().simple(),
            extension_of(original)
        )
    }

    /// 写入图片，返回保存在实体上的相对路径
    pub async fn store(&self, upload: &ImageUpload) -> Result<String> {
        self.ensure_root().await?;

        let file_name = Self::generate_file_name(&upload.file_name);
        let path = self.root.join(&file_name);
        tokio::fs::write(&path, &upload.data).await.map_err(|e| {
            SchoolError::file_operation(format!("写入图片 {} 失败: {e}", path.display()))
        })?;

        debug!("Stored image {} ({} bytes)", file_name, upload.size());
        Ok(file_name)
    }

    /// 将相对路径解析为根目录下的绝对路径
    ///
    /// 只接受单个普通路径段，拒绝目录穿越与绝对路径。
    pub fn resolve(&self, relative: &str) -> Option<PathBuf> {
        let mut components = Path::new(relative).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Some(self.root.join(name)),
            _ => None,
        }
    }

    pub async fn exists(&self, relative: &str) -> bool {
        match self.resolve(relative) {
            Some(path) => tokio::fs::try_exists(&path).await.unwrap_or(false),
            None => false,
        }
    }

    /// 删除图片，文件不存在时什么也不做
    pub async fn delete(&self, relative: &str) -> Result<()> {
        let Some(path) = self.resolve(relative) else {
            warn!("Refusing to delete image outside web root: {}", relative);
            return Ok(());
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Deleted image {}", relative);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SchoolError::file_operation(format!(
                "删除图片 {} 失败: {e}",
                path.display()
            ))),
        }
    }

    /// 尽力删除图片，失败只记录日志
    pub async fn discard(&self, relative: &str) {
        if let Err(e) = self.delete(relative).await {
            warn!("Failed to remove image {}: {}", relative, e);
        }
    }

    /// 读取图片内容，不存在时返回 None
    pub async fn read(&self, relative: &str) -> Result<Option<Vec<u8>>> {
        let Some(path) = self.resolve(relative) else {
            return Ok(None);
        };

        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SchoolError::file_operation(format!(
                "读取图片 {} 失败: {e}",
                path.display()
            ))),
        }
    }
}

/// 小写扩展名（含点号），没有扩展名时为空字符串
fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}
